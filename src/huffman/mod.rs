// Huffman coding of text.
//
// # Modules
//
// - `frequency`    Character occurrence counting
// - `tree`         Arena-backed Huffman tree, built from frequencies or a code table
// - `code_table`   Character -> code mapping, generated by tree traversal
// - `encoder`      Text -> bit-string, full encode pipeline
// - `decoder`      Bit-string -> text, bit-by-bit tree walk
// - `table_format` Line-oriented text form of a code table
// - `error`        Error taxonomy shared by all stages

pub mod code_table;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod frequency;
pub mod table_format;
pub mod tree;

// Re-export key types for convenience.
pub use code_table::CodeTable;
pub use decoder::{DecodeTree, Decoder, decode, decode_with_table};
pub use encoder::{EncodeOptions, Encoded, encode, encode_with_options, encode_with_table};
pub use error::{HuffmanError, Result};
pub use frequency::FrequencyTable;
pub use table_format::{format_code_table, parse_code_table, read_code_table, write_code_table};
pub use tree::{Bit, HuffmanTree, Node, NodeId, TieBreak, TreeShape};
