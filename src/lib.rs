//! Huffcode: Huffman coding of text in Rust.
//!
//! The crate provides:
//! - The Huffman engine (`huffman`): frequency counting, tree construction,
//!   code generation, and bit-by-bit encode/decode
//! - File-oriented helpers (`io`) for persisting code tables and encoded text
//! - An optional CLI (`cli` feature)
//!
//! Encoded output is textual: one `'0'` or `'1'` per bit.
//!
//! # Quick Start
//!
//! ```
//! use huffcode::huffman::{self, format_code_table, parse_code_table};
//!
//! let encoded = huffman::encode("abracadabra").unwrap();
//! assert!(encoded.bits.chars().all(|c| c == '0' || c == '1'));
//!
//! // The table travels with the bits, e.g. as a `codeMap.txt` file.
//! let persisted = format_code_table(&encoded.table);
//! let table = parse_code_table(&persisted).unwrap();
//! let decoded = huffman::decode_with_table(&table, &encoded.bits).unwrap();
//! assert_eq!(decoded, "abracadabra");
//! ```

pub mod huffman;
pub mod io;

#[cfg(feature = "cli")]
pub mod cli;
