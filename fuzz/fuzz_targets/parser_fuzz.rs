#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);

    // Anything the table parser accepts must survive a format/parse cycle.
    if let Ok(table) = huffcode::huffman::parse_code_table(&text) {
        let formatted = huffcode::huffman::format_code_table(&table);
        let reparsed = huffcode::huffman::parse_code_table(&formatted).unwrap();
        assert_eq!(reparsed, table);
    }

    let mut args = Vec::<String>::new();
    for token in text.split_whitespace().take(32) {
        args.push(token.to_string());
    }
    huffcode::cli::fuzz_try_parse_args(&args);
});
