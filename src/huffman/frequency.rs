// Character frequency analysis.

use std::collections::BTreeMap;

/// Occurrence count per distinct character of a text.
///
/// Backed by a `BTreeMap` so iteration is in ascending character order,
/// which is the order leaves enter the tree builder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<char, u64>,
}

impl FrequencyTable {
    /// Count every character of `text`. Empty input gives an empty table.
    pub fn from_text(text: &str) -> Self {
        let mut counts = BTreeMap::new();
        for ch in text.chars() {
            *counts.entry(ch).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Number of distinct characters.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn get(&self, ch: char) -> Option<u64> {
        self.counts.get(&ch).copied()
    }

    /// Total number of characters counted.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// `(character, count)` pairs in ascending character order.
    pub fn iter(&self) -> impl Iterator<Item = (char, u64)> + '_ {
        self.counts.iter().map(|(&ch, &n)| (ch, n))
    }
}

impl FromIterator<(char, u64)> for FrequencyTable {
    /// Build a table from explicit counts. Repeated characters accumulate.
    fn from_iter<I: IntoIterator<Item = (char, u64)>>(iter: I) -> Self {
        let mut counts = BTreeMap::new();
        for (ch, n) in iter {
            *counts.entry(ch).or_insert(0) += n;
        }
        Self { counts }
    }
}
