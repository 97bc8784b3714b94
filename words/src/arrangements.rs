//! k-permutations of a token sequence.

/// Visit every ordered arrangement of `k` tokens drawn without replacement
/// from `tokens`.
///
/// Tokens are distinguished by position, so repeated tokens produce
/// repeated arrangements. Arrangements are visited in lexicographic order
/// of the chosen positions. `k == 0` visits the empty arrangement once and
/// `k > tokens.len()` visits nothing.
pub fn for_each_arrangement<T, F>(tokens: &[T], k: usize, mut visit: F)
where
    T: Clone,
    F: FnMut(&[T]),
{
    if k > tokens.len() {
        return;
    }

    let mut used = vec![false; tokens.len()];
    let mut current = Vec::with_capacity(k);
    extend(tokens, k, &mut used, &mut current, &mut visit);
}

fn extend<T, F>(tokens: &[T], k: usize, used: &mut [bool], current: &mut Vec<T>, visit: &mut F)
where
    T: Clone,
    F: FnMut(&[T]),
{
    if current.len() == k {
        visit(current.as_slice());
        return;
    }

    for idx in 0..tokens.len() {
        if used[idx] {
            continue;
        }
        used[idx] = true;
        current.push(tokens[idx].clone());
        extend(tokens, k, used, current, visit);
        current.pop();
        used[idx] = false;
    }
}

/// Like [`for_each_arrangement`], but arrangements that repeat an earlier one
/// token for token are skipped, so each distinct sequence is visited once.
pub fn for_each_distinct_arrangement<T, F>(tokens: &[T], k: usize, mut visit: F)
where
    T: Clone + PartialEq,
    F: FnMut(&[T]),
{
    if k > tokens.len() {
        return;
    }

    let mut used = vec![false; tokens.len()];
    let mut current = Vec::with_capacity(k);
    extend_distinct(tokens, k, &mut used, &mut current, &mut visit);
}

fn extend_distinct<T, F>(
    tokens: &[T],
    k: usize,
    used: &mut [bool],
    current: &mut Vec<T>,
    visit: &mut F,
) where
    T: Clone + PartialEq,
    F: FnMut(&[T]),
{
    if current.len() == k {
        visit(current.as_slice());
        return;
    }

    let mut tried: Vec<&T> = Vec::new();
    for idx in 0..tokens.len() {
        if used[idx] || tried.contains(&&tokens[idx]) {
            continue;
        }
        tried.push(&tokens[idx]);
        used[idx] = true;
        current.push(tokens[idx].clone());
        extend_distinct(tokens, k, used, current, visit);
        current.pop();
        used[idx] = false;
    }
}

/// `n! / (n - k)!`, or `None` if it overflows.
pub fn arrangement_count(n: usize, k: usize) -> Option<u128> {
    if k > n {
        return Some(0);
    }
    ((n - k + 1)..=n).try_fold(1u128, |acc, factor| acc.checked_mul(factor as u128))
}

/// Sum of [`arrangement_count`] over every `k` in `sizes`.
pub fn total_arrangements(n: usize, sizes: impl IntoIterator<Item = usize>) -> Option<u128> {
    sizes
        .into_iter()
        .try_fold(0u128, |acc, k| acc.checked_add(arrangement_count(n, k)?))
}
