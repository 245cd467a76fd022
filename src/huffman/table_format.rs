// Line-oriented text format for persisted code tables.
//
// One entry per line:  <character>:<code>
//
// The character is a single Unicode scalar value written literally, except
// for characters that would break the line structure:
//
//   '\n' -> \n     '\r' -> \r     '\\' -> \\
//
// ':' needs no escape since the separator is always the character right
// after the first entry character. Blank lines are ignored on read.

use std::io::{BufRead, Write};

use super::code_table::CodeTable;
use super::error::{HuffmanError, Result};

const SEPARATOR: char = ':';
const ESCAPE: char = '\\';

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

fn push_escaped(out: &mut String, ch: char) {
    match ch {
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        ESCAPE => out.push_str("\\\\"),
        _ => out.push(ch),
    }
}

/// Render `table` in ascending character order, one line per entry.
pub fn format_code_table(table: &CodeTable) -> String {
    let mut out = String::with_capacity(table.len() * (table.max_code_len() + 4));
    for (ch, code) in table.iter() {
        push_escaped(&mut out, ch);
        out.push(SEPARATOR);
        out.push_str(code);
        out.push('\n');
    }
    out
}

pub fn write_code_table<W: Write>(writer: &mut W, table: &CodeTable) -> std::io::Result<()> {
    writer.write_all(format_code_table(table).as_bytes())
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Parse one non-blank line into `(character, code)`. `lineno` is 1-based.
fn parse_line(line: &str, lineno: usize) -> Result<(char, &str)> {
    let mut chars = line.chars();
    let ch = match chars.next() {
        Some(ESCAPE) => match chars.next() {
            Some('n') => '\n',
            Some('r') => '\r',
            Some(ESCAPE) => ESCAPE,
            Some(other) => {
                return Err(HuffmanError::malformed_at(
                    lineno,
                    format!("unknown escape \\{other}"),
                ));
            }
            None => return Err(HuffmanError::malformed_at(lineno, "dangling escape")),
        },
        Some(ch) => ch,
        None => return Err(HuffmanError::malformed_at(lineno, "empty entry")),
    };

    match chars.next() {
        Some(SEPARATOR) => Ok((ch, chars.as_str())),
        Some(other) => Err(HuffmanError::malformed_at(
            lineno,
            format!("expected ':' after {ch:?}, found {other:?}"),
        )),
        None => Err(HuffmanError::malformed_at(
            lineno,
            format!("missing ':' after {ch:?}"),
        )),
    }
}

/// Parse the text form of a code table.
///
/// Each code must be a non-empty run of `'0'`/`'1'`, and each character may
/// appear once. Errors carry the 1-based line number.
pub fn parse_code_table(text: &str) -> Result<CodeTable> {
    let mut table = CodeTable::new();
    for (idx, line) in text.lines().enumerate() {
        if line.is_empty() {
            continue;
        }
        let lineno = idx + 1;
        let (ch, code) = parse_line(line, lineno)?;
        table
            .insert(ch, code)
            .map_err(|e| match e {
                HuffmanError::MalformedCodeTable { reason, .. } => {
                    HuffmanError::malformed_at(lineno, reason)
                }
                other => other,
            })?;
    }
    Ok(table)
}

/// Read and parse a code table from a buffered reader.
pub fn read_code_table<R: BufRead>(mut reader: R) -> std::io::Result<CodeTable> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(parse_code_table(&text)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
