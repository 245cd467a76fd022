#![no_main]
use huffcode::huffman;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary table text and bit-string: decoding must never panic,
    // only return errors.
    let text = String::from_utf8_lossy(data);
    let (table_text, bits) = text.split_once('\u{0}').unwrap_or((text.as_ref(), ""));

    if let Ok(table) = huffman::parse_code_table(table_text) {
        let _ = huffman::decode_with_table(&table, bits);
    }
});
