use serde::{Deserialize, Serialize};

/// Every permutation produced for one input word.
#[derive(Debug, Deserialize, Serialize)]
pub struct Words {
    pub input: String,
    pub words: Vec<String>,
    pub by_length: Vec<LengthCount>,
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct LengthCount {
    pub length: usize,
    pub count: usize,
}

impl Words {
    /// Build a listing from words already ordered by length.
    pub fn new(input: &str, words: Vec<String>) -> Self {
        let mut by_length: Vec<LengthCount> = Vec::new();
        for word in &words {
            let length = word.chars().count();
            match by_length.last_mut() {
                Some(last) if last.length == length => last.count += 1,
                _ => by_length.push(LengthCount { length, count: 1 }),
            }
        }
        Self {
            input: input.to_owned(),
            words,
            by_length,
        }
    }
}
