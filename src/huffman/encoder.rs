// Text -> bit-string encoding.
//
// `encode` runs the full pipeline:
//   text -> FrequencyTable -> TreeShape -> CodeTable -> bit-string
// Empty and single-symbol inputs flow through the same path; only the
// table construction differs.

use log::debug;

use super::code_table::CodeTable;
use super::error::{HuffmanError, Result};
use super::frequency::FrequencyTable;
use super::tree::{HuffmanTree, TieBreak};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Configuration for building the code.
#[derive(Debug, Clone, Default)]
pub struct EncodeOptions {
    /// Priority-queue ordering among equal weights.
    pub tie_break: TieBreak,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// An encoded text together with the table needed to decode it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    /// Textual bit-string, one `'0'`/`'1'` per bit.
    pub bits: String,
    pub table: CodeTable,
    pub frequencies: FrequencyTable,
}

impl Encoded {
    /// Number of characters in the original text.
    pub fn text_len(&self) -> u64 {
        self.frequencies.total()
    }

    /// Number of bits in the encoding.
    pub fn bit_len(&self) -> usize {
        self.bits.len()
    }

    /// Encoded size relative to 8 bits per character. `0.0` for empty input.
    pub fn ratio(&self) -> f64 {
        match self.text_len() {
            0 => 0.0,
            n => self.bit_len() as f64 / (n as f64 * 8.0),
        }
    }
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Encode `text` with a code built from its own frequencies.
pub fn encode(text: &str) -> Result<Encoded> {
    encode_with_options(text, &EncodeOptions::default())
}

/// Encode with custom options.
pub fn encode_with_options(text: &str, opts: &EncodeOptions) -> Result<Encoded> {
    let frequencies = FrequencyTable::from_text(text);
    let shape = HuffmanTree::from_frequencies(&frequencies, opts.tie_break);
    let table = CodeTable::from_shape(&shape);
    let bits = encode_with_table(text, &table)?;

    debug!(
        "encoded {} chars ({} distinct) into {} bits",
        frequencies.total(),
        frequencies.len(),
        bits.len()
    );
    Ok(Encoded {
        bits,
        table,
        frequencies,
    })
}

/// Concatenate the code of each character of `text`, in order.
///
/// Fails with `UnknownCharacter` if the table has no code for some
/// character.
pub fn encode_with_table(text: &str, table: &CodeTable) -> Result<String> {
    let mut bits = String::with_capacity(text.len() * table.max_code_len().max(1));
    for (position, ch) in text.chars().enumerate() {
        let code = table.get(ch).ok_or(HuffmanError::UnknownCharacter {
            character: ch,
            position,
        })?;
        bits.push_str(code);
    }
    Ok(bits)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
