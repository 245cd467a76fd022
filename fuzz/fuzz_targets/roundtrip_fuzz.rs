#![no_main]
use huffcode::huffman;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);

    let enc = huffman::encode(&text).unwrap();
    let table = huffman::parse_code_table(&huffman::format_code_table(&enc.table)).unwrap();
    let decoded = huffman::decode_with_table(&table, &enc.bits).unwrap();
    assert_eq!(decoded, text);
});
