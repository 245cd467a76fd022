#![no_main]
use huffcode::huffman::{self, EncodeOptions, TieBreak};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // Use first byte as control flags.
    let flags = data[0];
    let tie_break = if flags & 1 != 0 {
        TieBreak::NewestFirst
    } else {
        TieBreak::InsertionOrder
    };
    let text = String::from_utf8_lossy(&data[1..]);

    let enc = huffman::encode_with_options(&text, &EncodeOptions { tie_break }).unwrap();
    assert!(enc.table.is_prefix_free());
    assert_eq!(
        enc.table.encoded_len(&enc.frequencies),
        Some(enc.bit_len() as u64)
    );

    let decoded = huffman::decode_with_table(&enc.table, &enc.bits).unwrap();
    assert_eq!(decoded, text);

    // Flipping a bit must yield an error or a different text, never a panic.
    if flags & 2 != 0 && !enc.bits.is_empty() {
        let idx = flags as usize % enc.bits.len();
        let mut bits: Vec<u8> = enc.bits.into_bytes();
        bits[idx] = if bits[idx] == b'0' { b'1' } else { b'0' };
        let bits = String::from_utf8(bits).unwrap();
        let _ = huffman::decode_with_table(&enc.table, &bits);
    }
});
