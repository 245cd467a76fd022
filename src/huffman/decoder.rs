// Bit-string -> text decoding.
//
// `Decoder` is a cursor over a borrowed tree. Each bit moves the cursor one
// level down; landing on a leaf emits its character and resets the cursor
// to the root. Every descent checks that the child exists, so a bit-string
// that leaves the tree is reported instead of walked off.

use log::debug;

use super::code_table::{CodeTable, SINGLE_SYMBOL_CODE};
use super::error::{HuffmanError, Result};
use super::tree::{Bit, HuffmanTree, NodeId};

// ---------------------------------------------------------------------------
// Streaming state machine
// ---------------------------------------------------------------------------

pub struct Decoder<'t> {
    tree: &'t HuffmanTree,
    cursor: NodeId,
    consumed: usize,
}

impl<'t> Decoder<'t> {
    pub fn new(tree: &'t HuffmanTree) -> Self {
        Self {
            tree,
            cursor: tree.root(),
            consumed: 0,
        }
    }

    /// Advance by one bit. Returns the character completed by this bit,
    /// if any.
    pub fn push_bit(&mut self, bit: Bit) -> Result<Option<char>> {
        let position = self.consumed;
        let next = self
            .tree
            .node(self.cursor)
            .child(bit)
            .ok_or(HuffmanError::InvalidBitSequence { position })?;
        self.consumed += 1;

        let node = self.tree.node(next);
        if !node.is_leaf() {
            self.cursor = next;
            return Ok(None);
        }
        let ch = node
            .symbol()
            .ok_or(HuffmanError::InvalidBitSequence { position })?;
        self.cursor = self.tree.root();
        Ok(Some(ch))
    }

    /// Advance by one textual bit (`'0'` or `'1'`).
    pub fn push_symbol(&mut self, symbol: char) -> Result<Option<char>> {
        let bit = Bit::from_symbol(symbol).ok_or(HuffmanError::InvalidSymbol {
            symbol,
            position: self.consumed,
        })?;
        self.push_bit(bit)
    }

    /// True between codes, i.e. when the input so far is well-formed.
    pub fn is_at_root(&self) -> bool {
        self.cursor == self.tree.root()
    }

    pub fn bits_consumed(&self) -> usize {
        self.consumed
    }

    /// Check that the input did not stop in the middle of a code.
    pub fn finish(self) -> Result<()> {
        if self.is_at_root() {
            Ok(())
        } else {
            Err(HuffmanError::TruncatedEncoding {
                consumed: self.consumed,
            })
        }
    }
}

/// Decode a whole bit-string against `tree`.
pub fn decode(tree: &HuffmanTree, bits: &str) -> Result<String> {
    let mut decoder = Decoder::new(tree);
    let mut text = String::new();
    for symbol in bits.chars() {
        if let Some(ch) = decoder.push_symbol(symbol)? {
            text.push(ch);
        }
    }
    decoder.finish()?;
    Ok(text)
}

// ---------------------------------------------------------------------------
// Table-driven decoding
// ---------------------------------------------------------------------------

/// A decoder rebuilt from a persisted code table.
///
/// A single-entry `"0"` table is the single-symbol case: a one-node tree
/// cannot tell its root from its leaf, so it is decoded by counting zeros
/// instead of walking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeTree {
    SingleSymbol(char),
    Tree(HuffmanTree),
}

impl DecodeTree {
    pub fn from_code_table(table: &CodeTable) -> Result<Self> {
        match table.single_entry() {
            Some((ch, SINGLE_SYMBOL_CODE)) => Ok(Self::SingleSymbol(ch)),
            _ => HuffmanTree::from_code_table(table).map(Self::Tree),
        }
    }

    pub fn decode(&self, bits: &str) -> Result<String> {
        match self {
            Self::SingleSymbol(ch) => decode_single_symbol(*ch, bits),
            Self::Tree(tree) => decode(tree, bits),
        }
    }
}

fn decode_single_symbol(ch: char, bits: &str) -> Result<String> {
    let mut text = String::with_capacity(bits.len() * ch.len_utf8());
    for (position, symbol) in bits.chars().enumerate() {
        match Bit::from_symbol(symbol) {
            Some(Bit::Zero) => text.push(ch),
            Some(Bit::One) => return Err(HuffmanError::InvalidBitSequence { position }),
            None => return Err(HuffmanError::InvalidSymbol { symbol, position }),
        }
    }
    Ok(text)
}

/// Rebuild the tree from `table` and decode `bits` with it.
pub fn decode_with_table(table: &CodeTable, bits: &str) -> Result<String> {
    let tree = DecodeTree::from_code_table(table)?;
    let text = tree.decode(bits)?;
    debug!(
        "decoded {} bits into {} chars",
        bits.len(),
        text.chars().count()
    );
    Ok(text)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
