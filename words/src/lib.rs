use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::ops::RangeInclusive;

pub mod arrangements;
pub mod dictionary;

pub use arrangements::{
    arrangement_count, for_each_arrangement, for_each_distinct_arrangement, total_arrangements,
};
pub use dictionary::Dictionary;

/// How the raw input is split into permutable tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tokenization {
    /// Every character is a token, whitespace included.
    #[default]
    Verbatim,
    /// Whitespace characters are dropped before permuting.
    SkipWhitespace,
}

/// Split a word into single-character tokens, preserving their order.
pub fn tokenize(input: &str, tokenization: Tokenization) -> Vec<char> {
    match tokenization {
        Tokenization::Verbatim => input.chars().collect(),
        Tokenization::SkipWhitespace => input.chars().filter(|c| !c.is_whitespace()).collect(),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Casing {
    /// First character uppercased, the rest lowercased.
    ///
    /// Uses the full uppercase mapping, not a titlecase one, so a leading
    /// `ß` becomes `SS` and a leading `ǆ` becomes `Ǆ`.
    #[default]
    Title,
    Lower,
    Upper,
    Preserve,
}

impl Casing {
    pub fn apply(&self, word: &str) -> String {
        match self {
            Casing::Title => {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first
                        .to_uppercase()
                        .chain(chars.flat_map(char::to_lowercase))
                        .collect(),
                    None => String::new(),
                }
            }
            Casing::Lower => word.to_lowercase(),
            Casing::Upper => word.to_uppercase(),
            Casing::Preserve => word.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Options {
    pub casing: Casing,
    /// Smallest subset size to arrange. Defaults to 0 (the empty string).
    pub min_len: usize,
    /// Largest subset size to arrange. `None` means every token.
    pub max_len: Option<usize>,
    /// Only these subset sizes, if set. Intersected with `min_len..=max_len`.
    pub lengths: Option<BTreeSet<usize>>,
}

impl Options {
    /// The inclusive range of subset sizes for `token_count` tokens.
    ///
    /// `max_len` is clamped to `token_count`. A range whose minimum exceeds
    /// its maximum is empty.
    pub fn subset_sizes(&self, token_count: usize) -> RangeInclusive<usize> {
        let max = self.max_len.unwrap_or(token_count).min(token_count);
        let min = self.min_len;
        if min > max {
            return 1..=0;
        }
        min..=max
    }

    /// Every subset size to arrange for `token_count` tokens, ascending.
    pub fn sizes(&self, token_count: usize) -> Vec<usize> {
        self.subset_sizes(token_count)
            .filter(|k| self.lengths.as_ref().is_none_or(|lengths| lengths.contains(k)))
            .collect()
    }
}

/// Every distinct cased arrangement of every subset of a word's tokens.
#[derive(Debug, Clone, Default)]
pub struct Enumeration {
    words: HashSet<String>,
}

impl Enumeration {
    pub fn new(tokens: &[char], options: &Options) -> Self {
        let mut words = HashSet::new();
        let mut buffer = String::with_capacity(tokens.len() * 4);
        for k in options.sizes(tokens.len()) {
            for_each_distinct_arrangement(tokens, k, |arrangement| {
                buffer.clear();
                buffer.extend(arrangement.iter());
                words.insert(options.casing.apply(&buffer));
            });
        }
        Self { words }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Drop every string that is not a word in `dictionary`.
    pub fn retain_words(&mut self, dictionary: &Dictionary) {
        self.words.retain(|word| dictionary.contains(word));
    }

    /// Number of distinct strings of each length, keyed by length in chars.
    pub fn counts_by_length(&self) -> BTreeMap<usize, usize> {
        self.words.iter().fold(BTreeMap::new(), |mut counts, w| {
            *counts.entry(w.chars().count()).or_default() += 1;
            counts
        })
    }

    /// Consume the set, ordering it by ascending length in chars.
    /// Strings of equal length are ordered lexicographically.
    pub fn into_sorted(self) -> Vec<String> {
        let mut words: Vec<(usize, String)> = self
            .words
            .into_iter()
            .map(|w| (w.chars().count(), w))
            .collect();
        words.sort_unstable();
        words.into_iter().map(|(_, w)| w).collect()
    }
}

/// Tokenize `word` verbatim and enumerate it with default options.
pub fn permutations(word: &str) -> Vec<String> {
    Enumeration::new(&tokenize(word, Tokenization::Verbatim), &Options::default()).into_sorted()
}
