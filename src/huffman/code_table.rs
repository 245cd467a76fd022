// Character -> code mapping and its generation from a tree.
//
// Codes are stored as their textual form ("0101"), the same form the
// encoder emits and the table file persists.

use std::collections::BTreeMap;

use log::debug;

use super::error::{HuffmanError, Result};
use super::frequency::FrequencyTable;
use super::tree::{Bit, HuffmanTree, NodeId, TreeShape};

/// Code assigned to the only character of a single-symbol text.
pub const SINGLE_SYMBOL_CODE: &str = "0";

/// Mapping from character to a non-empty code of `'0'`/`'1'` symbols.
///
/// Iterates in ascending character order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<char, String>,
}

impl CodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from explicit `(character, code)` pairs.
    ///
    /// Codes are checked to be non-empty and binary and characters to be
    /// unique. The prefix-free property is not checked here; see
    /// [`CodeTable::is_prefix_free`] and [`HuffmanTree::from_code_table`].
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (char, S)>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for (ch, code) in pairs {
            table.insert(ch, code)?;
        }
        Ok(table)
    }

    /// The table for a text made of one repeated character.
    pub fn single_symbol(ch: char) -> Self {
        let mut codes = BTreeMap::new();
        codes.insert(ch, SINGLE_SYMBOL_CODE.to_string());
        Self { codes }
    }

    /// Generate codes by a depth-first walk of `tree`: `'0'` for every left
    /// descent, `'1'` for every right descent, recorded at each leaf.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();
        let mut stack: Vec<(NodeId, String)> = vec![(tree.root(), String::new())];

        while let Some((id, path)) = stack.pop() {
            let node = tree.node(id);
            if node.is_leaf() {
                if let Some(ch) = node.symbol() {
                    codes.insert(ch, path);
                }
                continue;
            }
            // Right is pushed first so the left subtree is visited first.
            for bit in [Bit::One, Bit::Zero] {
                if let Some(child) = node.child(bit) {
                    let mut child_path = String::with_capacity(path.len() + 1);
                    child_path.push_str(&path);
                    child_path.push(bit.symbol());
                    stack.push((child, child_path));
                }
            }
        }

        debug!("generated {} codes", codes.len());
        Self { codes }
    }

    /// Code table for any builder outcome.
    pub fn from_shape(shape: &TreeShape) -> Self {
        match shape {
            TreeShape::Empty => Self::new(),
            TreeShape::SingleSymbol(ch) => Self::single_symbol(*ch),
            TreeShape::Tree(tree) => Self::from_tree(tree),
        }
    }

    /// Add one entry. Fails on an empty or non-binary code, or when `ch`
    /// already has a code.
    pub fn insert(&mut self, ch: char, code: impl Into<String>) -> Result<()> {
        let code = code.into();
        if code.is_empty() {
            return Err(HuffmanError::malformed(format!("empty code for {ch:?}")));
        }
        if let Some(bad) = code.chars().find(|&c| Bit::from_symbol(c).is_none()) {
            return Err(HuffmanError::malformed(format!(
                "code for {ch:?} contains {bad:?}, expected only '0' and '1'"
            )));
        }
        if self.codes.contains_key(&ch) {
            return Err(HuffmanError::malformed(format!(
                "character {ch:?} has more than one code"
            )));
        }
        self.codes.insert(ch, code);
        Ok(())
    }

    pub fn get(&self, ch: char) -> Option<&str> {
        self.codes.get(&ch).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> + '_ {
        self.codes.iter().map(|(&ch, code)| (ch, code.as_str()))
    }

    /// The only entry, if the table has exactly one.
    pub fn single_entry(&self) -> Option<(char, &str)> {
        match self.codes.len() {
            1 => self.iter().next(),
            _ => None,
        }
    }

    /// True if no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let mut sorted: Vec<&str> = self.codes.values().map(String::as_str).collect();
        sorted.sort_unstable();
        // In lexicographic order a prefix always sorts immediately before
        // some code it prefixes.
        sorted.windows(2).all(|w| !w[1].starts_with(w[0]))
    }

    /// Length of the longest code.
    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(String::len).max().unwrap_or(0)
    }

    /// Number of bits the encoding of a text with these frequencies takes,
    /// or `None` if some character has no code.
    pub fn encoded_len(&self, freq: &FrequencyTable) -> Option<u64> {
        freq.iter().try_fold(0u64, |acc, (ch, count)| {
            let code = self.codes.get(&ch)?;
            Some(acc + count * code.len() as u64)
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
