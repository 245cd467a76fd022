use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::tempdir;

fn bin() -> String {
    env!("CARGO_BIN_EXE_huffcode").to_string()
}

#[test]
fn cli_encode_decode_roundtrip() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.txt");
    let encoded = dir.path().join("encoded.txt");
    let table = dir.path().join("codeMap.txt");
    let output = dir.path().join("output.txt");

    let text = "she sells sea shells: by the \\ sea shore\nand a second line";
    std::fs::write(&input, text).unwrap();

    let st = Command::new(bin())
        .args(["encode", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(&encoded)
        .arg("--table")
        .arg(&table)
        .status()
        .unwrap();
    assert!(st.success());
    assert!(table.exists());

    let st = Command::new(bin())
        .args(["decode", "--input"])
        .arg(&encoded)
        .arg("--output")
        .arg(&output)
        .arg("--table")
        .arg(&table)
        .status()
        .unwrap();
    assert!(st.success());
    assert_eq!(std::fs::read_to_string(&output).unwrap(), text);
}

#[test]
fn cli_stdin_stdout_roundtrip() {
    let dir = tempdir().unwrap();

    let mut child = Command::new(bin())
        .arg("encode")
        .current_dir(dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"abracadabra\nignored second line\n")
        .unwrap();
    let out = child.wait_with_output().unwrap();
    assert!(out.status.success());
    let bits = String::from_utf8(out.stdout).unwrap();
    assert_eq!(bits.trim().len(), 23);
    assert!(dir.path().join("codeMap.txt").exists());

    let mut child = Command::new(bin())
        .arg("decode")
        .current_dir(dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(bits.as_bytes())
        .unwrap();
    let out = child.wait_with_output().unwrap();
    assert!(out.status.success());
    assert_eq!(String::from_utf8(out.stdout).unwrap(), "abracadabra\n");
}

#[test]
fn cli_single_symbol_table() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.txt");
    let table = dir.path().join("map.txt");
    std::fs::write(&input, "zzzz").unwrap();

    let out = Command::new(bin())
        .arg("encode")
        .arg(&input)
        .arg("--table")
        .arg(&table)
        .output()
        .unwrap();
    assert!(out.status.success());
    assert_eq!(String::from_utf8(out.stdout).unwrap(), "0000\n");
    assert_eq!(std::fs::read_to_string(&table).unwrap(), "z:0\n");
}

#[test]
fn cli_refuses_to_overwrite_without_force() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.txt");
    let encoded = dir.path().join("encoded.txt");
    let table = dir.path().join("codeMap.txt");
    std::fs::write(&input, "abc").unwrap();
    std::fs::write(&encoded, "keep me").unwrap();

    let st = Command::new(bin())
        .arg("encode")
        .arg(&input)
        .arg(&encoded)
        .arg("--table")
        .arg(&table)
        .status()
        .unwrap();
    assert!(!st.success());
    assert_eq!(std::fs::read_to_string(&encoded).unwrap(), "keep me");

    let st = Command::new(bin())
        .arg("--force")
        .arg("encode")
        .arg(&input)
        .arg(&encoded)
        .arg("--table")
        .arg(&table)
        .status()
        .unwrap();
    assert!(st.success());
    assert_ne!(std::fs::read_to_string(&encoded).unwrap(), "keep me");
}

#[test]
fn cli_refused_encode_keeps_table_and_bits_paired() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("first.txt");
    let second = dir.path().join("second.txt");
    let encoded = dir.path().join("encoded.txt");
    let table = dir.path().join("codeMap.txt");
    std::fs::write(&first, "aaab").unwrap();
    std::fs::write(&second, "xyzzy").unwrap();

    let st = Command::new(bin())
        .arg("encode")
        .arg(&first)
        .arg(&encoded)
        .arg("--table")
        .arg(&table)
        .status()
        .unwrap();
    assert!(st.success());
    let table_before = std::fs::read(&table).unwrap();
    let bits_before = std::fs::read(&encoded).unwrap();

    // Output exists and no --force: nothing may be written.
    let st = Command::new(bin())
        .arg("encode")
        .arg(&second)
        .arg(&encoded)
        .arg("--table")
        .arg(&table)
        .status()
        .unwrap();
    assert!(!st.success());
    assert_eq!(std::fs::read(&table).unwrap(), table_before);
    assert_eq!(std::fs::read(&encoded).unwrap(), bits_before);

    let out = Command::new(bin())
        .arg("decode")
        .arg(&encoded)
        .arg("--table")
        .arg(&table)
        .output()
        .unwrap();
    assert!(out.status.success());
    assert_eq!(String::from_utf8(out.stdout).unwrap(), "aaab\n");
}

#[test]
fn cli_verbose_logs_summary() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.txt");
    let table = dir.path().join("codeMap.txt");
    std::fs::write(&input, "abracadabra").unwrap();

    let quiet_run = Command::new(bin())
        .arg("encode")
        .arg(&input)
        .arg("--table")
        .arg(&table)
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    assert!(quiet_run.status.success());
    let stderr = String::from_utf8(quiet_run.stderr).unwrap();
    assert!(!stderr.contains("encoder:"), "{stderr}");

    let verbose_run = Command::new(bin())
        .args(["-v", "encode"])
        .arg(&input)
        .arg("--table")
        .arg(&table)
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    assert!(verbose_run.status.success());
    let stderr = String::from_utf8(verbose_run.stderr).unwrap();
    assert!(stderr.contains("encoder: 11 chars, 5 distinct, 23 bits"), "{stderr}");
}

#[test]
fn cli_malformed_table_fails() {
    let dir = tempdir().unwrap();
    let table = dir.path().join("codeMap.txt");
    let encoded = dir.path().join("encoded.txt");
    std::fs::write(&table, "a:0\nb-1\n").unwrap();
    std::fs::write(&encoded, "01\n").unwrap();

    let out = Command::new(bin())
        .arg("decode")
        .arg(&encoded)
        .arg("--table")
        .arg(&table)
        .output()
        .unwrap();
    assert!(!out.status.success());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("malformed code table"), "{stderr}");
}

#[test]
fn cli_truncated_input_fails() {
    let dir = tempdir().unwrap();
    let table = dir.path().join("codeMap.txt");
    let encoded = dir.path().join("encoded.txt");
    std::fs::write(&table, "a:0\nb:10\nc:11\n").unwrap();
    std::fs::write(&encoded, "01\n").unwrap();

    let out = Command::new(bin())
        .arg("decode")
        .arg(&encoded)
        .arg("--table")
        .arg(&table)
        .output()
        .unwrap();
    assert!(!out.status.success());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.starts_with("huffcode:"), "{stderr}");
}

#[test]
fn cli_missing_table_fails() {
    let dir = tempdir().unwrap();
    let encoded = dir.path().join("encoded.txt");
    std::fs::write(&encoded, "0\n").unwrap();

    let st = Command::new(bin())
        .arg("decode")
        .arg(&encoded)
        .arg("--table")
        .arg(dir.path().join("absent.txt"))
        .status()
        .unwrap();
    assert!(!st.success());
}

#[test]
fn cli_table_command_lists_entries() {
    let dir = tempdir().unwrap();
    let table = dir.path().join("codeMap.txt");
    std::fs::write(&table, "a:0\nb:10\nc:11\n").unwrap();

    let out = Command::new(bin()).arg("table").arg(&table).output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("Entries:          3"), "{stdout}");
    assert!(stdout.contains("Prefix-free:      yes"), "{stdout}");
}

#[test]
fn cli_json_stats() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.txt");
    let table = dir.path().join("codeMap.txt");
    std::fs::write(&input, "aabb").unwrap();

    let out = Command::new(bin())
        .args(["--json", "encode"])
        .arg(&input)
        .arg("--table")
        .arg(&table)
        .output()
        .unwrap();
    assert!(out.status.success());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("\"encoded_bits\": 4"), "{stderr}");
}

#[test]
fn cli_config_works() {
    let out = Command::new(bin()).arg("config").output().unwrap();
    assert!(out.status.success());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("DEFAULT_TABLE_FILE=codeMap.txt"), "{stderr}");
}
