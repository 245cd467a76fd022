// File-level I/O helpers for encoding/decoding.
//
// Provides `save_code_table()`/`load_code_table()` for the persisted table
// and `encode_file()`/`decode_file()` convenience functions that wrap the
// in-memory pipeline with buffered file I/O. Optionally computes SHA-256
// digests of the plain text (feature-gated behind `file-io`) so a decode can
// be checked against the encode that produced it.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

#[cfg(feature = "file-io")]
use sha2::Digest;

use crate::huffman::encoder::{self, EncodeOptions};
use crate::huffman::error::{HuffmanError, Result};
use crate::huffman::{CodeTable, decoder, table_format};

/// Default code table file name.
pub const DEFAULT_TABLE_FILE: &str = "codeMap.txt";

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Statistics returned by `encode_file()`.
#[derive(Debug, Clone)]
pub struct EncodeStats {
    /// Characters in the input text.
    pub text_chars: u64,
    /// Distinct characters, i.e. code table entries.
    pub table_entries: usize,
    /// Bits in the encoded output.
    pub encoded_bits: u64,
    /// Encoded bits relative to 8 bits per character.
    pub ratio: f64,
    /// SHA-256 of the input text (if `file-io` feature is enabled).
    pub text_sha256: Option<[u8; 32]>,
}

/// Statistics returned by `decode_file()`.
#[derive(Debug, Clone)]
pub struct DecodeStats {
    /// Code table entries.
    pub table_entries: usize,
    /// Bits consumed from the encoded input.
    pub encoded_bits: u64,
    /// Characters in the decoded output.
    pub output_chars: u64,
    /// SHA-256 of the decoded text (if `file-io` feature is enabled).
    pub output_sha256: Option<[u8; 32]>,
}

// ---------------------------------------------------------------------------
// Default buffer size
// ---------------------------------------------------------------------------

const BUF_SIZE: usize = 64 * 1024; // 64 KiB

// ---------------------------------------------------------------------------
// Primitive file access
// ---------------------------------------------------------------------------

fn unreadable(path: &Path) -> impl FnOnce(std::io::Error) -> HuffmanError + '_ {
    move |source| HuffmanError::FileUnreadable {
        path: path.to_path_buf(),
        source,
    }
}

fn unwritable(path: &Path) -> impl FnOnce(std::io::Error) -> HuffmanError + '_ {
    move |source| HuffmanError::FileUnwritable {
        path: path.to_path_buf(),
        source,
    }
}

/// Read a whole UTF-8 file.
pub fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(unreadable(path))
}

/// Create (or truncate) `path` and write `text` to it.
pub fn write_text(path: &Path, text: &str) -> Result<()> {
    let file = File::create(path).map_err(unwritable(path))?;
    let mut writer = BufWriter::with_capacity(BUF_SIZE, file);
    writer
        .write_all(text.as_bytes())
        .and_then(|()| writer.flush())
        .map_err(unwritable(path))
}

// ---------------------------------------------------------------------------
// Code table files
// ---------------------------------------------------------------------------

/// Write `table` to `path` in the line-oriented table format.
pub fn save_code_table(path: &Path, table: &CodeTable) -> Result<()> {
    let file = File::create(path).map_err(unwritable(path))?;
    let mut writer = BufWriter::with_capacity(BUF_SIZE, file);
    table_format::write_code_table(&mut writer, table)
        .and_then(|()| writer.flush())
        .map_err(unwritable(path))?;
    log::debug!("wrote {} table entries to {}", table.len(), path.display());
    Ok(())
}

/// Read and parse a code table file.
pub fn load_code_table(path: &Path) -> Result<CodeTable> {
    let file = File::open(path).map_err(unreadable(path))?;
    let mut text = String::new();
    BufReader::with_capacity(BUF_SIZE, file)
        .read_to_string(&mut text)
        .map_err(unreadable(path))?;
    let table = table_format::parse_code_table(&text)?;
    log::debug!("read {} table entries from {}", table.len(), path.display());
    Ok(table)
}

// ---------------------------------------------------------------------------
// encode_file
// ---------------------------------------------------------------------------

/// Encode the text in `input_path`, writing the code table to `table_path`
/// and then the bit-string (plus a trailing newline) to `encoded_path`.
///
/// Nothing is written to `encoded_path` if the table cannot be saved.
pub fn encode_file(
    input_path: &Path,
    encoded_path: &Path,
    table_path: &Path,
    opts: &EncodeOptions,
) -> Result<EncodeStats> {
    let text = read_text(input_path)?;
    let encoded = encoder::encode_with_options(&text, opts)?;

    save_code_table(table_path, &encoded.table)?;
    let mut line = encoded.bits.clone();
    line.push('\n');
    write_text(encoded_path, &line)?;

    Ok(EncodeStats {
        text_chars: encoded.text_len(),
        table_entries: encoded.table.len(),
        encoded_bits: encoded.bit_len() as u64,
        ratio: encoded.ratio(),
        text_sha256: sha256(&text),
    })
}

// ---------------------------------------------------------------------------
// decode_file
// ---------------------------------------------------------------------------

/// Decode the bit-string in `encoded_path` with the table in `table_path`,
/// writing the text to `output_path`.
///
/// Surrounding whitespace (such as the trailing newline written by
/// `encode_file`) is ignored.
pub fn decode_file(
    table_path: &Path,
    encoded_path: &Path,
    output_path: &Path,
) -> Result<DecodeStats> {
    let table = load_code_table(table_path)?;
    let encoded = read_text(encoded_path)?;
    let bits = encoded.trim();
    let text = decoder::decode_with_table(&table, bits)?;
    write_text(output_path, &text)?;

    Ok(DecodeStats {
        table_entries: table.len(),
        encoded_bits: bits.len() as u64,
        output_chars: text.chars().count() as u64,
        output_sha256: sha256(&text),
    })
}

// ---------------------------------------------------------------------------
// Digests
// ---------------------------------------------------------------------------

#[cfg(feature = "file-io")]
pub fn sha256(text: &str) -> Option<[u8; 32]> {
    Some(sha2::Sha256::digest(text.as_bytes()).into())
}

#[cfg(not(feature = "file-io"))]
pub fn sha256(_text: &str) -> Option<[u8; 32]> {
    None
}

/// Lowercase hex rendering of a digest.
pub fn hex_digest(digest: &[u8; 32]) -> String {
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn encode_decode_file_roundtrip() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input.txt");
        let encoded = dir.path().join("encoded.txt");
        let table = dir.path().join(DEFAULT_TABLE_FILE);
        let output = dir.path().join("output.txt");

        let text = "The quick brown fox jumps over the lazy dog.\nSecond line: 1234567890";
        std::fs::write(&input, text).unwrap();

        let enc_stats = encode_file(&input, &encoded, &table, &EncodeOptions::default()).unwrap();
        assert_eq!(enc_stats.text_chars, text.chars().count() as u64);
        assert!(enc_stats.encoded_bits > 0);
        assert!(enc_stats.ratio < 1.0);

        let dec_stats = decode_file(&table, &encoded, &output).unwrap();
        assert_eq!(dec_stats.encoded_bits, enc_stats.encoded_bits);
        assert_eq!(dec_stats.output_chars, enc_stats.text_chars);
        assert_eq!(dec_stats.table_entries, enc_stats.table_entries);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), text);
    }

    #[test]
    fn single_symbol_file_writes_one_entry() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input.txt");
        let encoded = dir.path().join("encoded.txt");
        let table = dir.path().join(DEFAULT_TABLE_FILE);
        let output = dir.path().join("output.txt");
        std::fs::write(&input, "zzzzz").unwrap();

        encode_file(&input, &encoded, &table, &EncodeOptions::default()).unwrap();
        assert_eq!(std::fs::read_to_string(&table).unwrap(), "z:0\n");
        assert_eq!(std::fs::read_to_string(&encoded).unwrap(), "00000\n");

        decode_file(&table, &encoded, &output).unwrap();
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "zzzzz");
    }

    #[test]
    fn table_file_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("table.txt");
        let table = crate::huffman::encode("a:b\\c\r\nd").unwrap().table;
        save_code_table(&path, &table).unwrap();
        assert_eq!(load_code_table(&path).unwrap(), table);
    }

    #[test]
    fn missing_table_is_unreadable() {
        let dir = tempdir().unwrap();
        let err = load_code_table(&dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, HuffmanError::FileUnreadable { .. }), "{err}");
    }

    #[test]
    fn unwritable_destination_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("table.txt");
        let err = save_code_table(&path, &CodeTable::single_symbol('a')).unwrap_err();
        assert!(matches!(err, HuffmanError::FileUnwritable { .. }), "{err}");
    }

    #[test]
    fn failed_table_write_leaves_no_encoded_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input.txt");
        let encoded = dir.path().join("encoded.txt");
        let table = dir.path().join("no-such-dir").join("table.txt");
        std::fs::write(&input, "abc").unwrap();

        let err = encode_file(&input, &encoded, &table, &EncodeOptions::default()).unwrap_err();
        assert!(matches!(err, HuffmanError::FileUnwritable { .. }), "{err}");
        assert!(!encoded.exists());
    }

    #[test]
    fn corrupt_encoded_file_is_rejected() {
        let dir = tempdir().unwrap();
        let table = dir.path().join("table.txt");
        let encoded = dir.path().join("encoded.txt");
        let output = dir.path().join("output.txt");
        std::fs::write(&table, "a:0\nb:10\nc:11\n").unwrap();
        std::fs::write(&encoded, "0101\n").unwrap();

        let err = decode_file(&table, &encoded, &output).unwrap_err();
        assert!(matches!(err, HuffmanError::TruncatedEncoding { .. }), "{err}");
        assert!(!output.exists());
    }

    #[cfg(feature = "file-io")]
    #[test]
    fn sha256_digests_match_across_roundtrip() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input.txt");
        let encoded = dir.path().join("encoded.txt");
        let table = dir.path().join("table.txt");
        let output = dir.path().join("output.txt");
        std::fs::write(&input, "digest me, digest me twice").unwrap();

        let enc_stats = encode_file(&input, &encoded, &table, &EncodeOptions::default()).unwrap();
        let dec_stats = decode_file(&table, &encoded, &output).unwrap();
        assert!(enc_stats.text_sha256.is_some());
        assert_eq!(dec_stats.output_sha256, enc_stats.text_sha256);
    }

    #[test]
    fn hex_digest_is_lowercase_hex() {
        let mut digest = [0u8; 32];
        digest[0] = 0xAB;
        digest[31] = 0x01;
        let hex = hex_digest(&digest);
        assert_eq!(hex.len(), 64);
        assert!(hex.starts_with("ab00"));
        assert!(hex.ends_with("01"));
    }
}
