//! Case-insensitive word list used to keep only real words.

use std::collections::HashSet;
use std::io::BufRead;

#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: HashSet<String>,
}

impl Dictionary {
    /// Build a dictionary from a newline-delimited word list.
    /// Blank lines are skipped and surrounding whitespace is trimmed.
    pub fn from_lines(text: &str) -> Self {
        text.lines().collect()
    }

    pub fn from_reader(reader: impl BufRead) -> std::io::Result<Self> {
        let mut dictionary = Self::default();
        for line in reader.lines() {
            dictionary.insert(&line?);
        }
        Ok(dictionary)
    }

    pub fn insert(&mut self, word: &str) {
        let word = word.trim();
        if !word.is_empty() {
            self.words.insert(word.to_lowercase());
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for Dictionary {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut dictionary = Self::default();
        for word in iter {
            dictionary.insert(word);
        }
        dictionary
    }
}
