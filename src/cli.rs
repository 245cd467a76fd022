// Command-line interface for huffcode.
//
// Explicit subcommands for encoding and decoding text, plus
// table inspection and build details. Each command reads its text or bits
// from a file or a single stdin line, and the code table travels through a
// table file (`codeMap.txt` by default).

use std::io::{self, BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, ValueHint};

use crate::huffman::encoder::{self, EncodeOptions};
use crate::huffman::{CodeTable, HuffmanError, TieBreak, decoder};
use crate::io::{self as hio, DEFAULT_TABLE_FILE};

const BUF_SIZE: usize = 64 * 1024;

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// Huffman encoder/decoder for text.
#[derive(Parser, Debug)]
#[command(
    name = "huffcode",
    version,
    about = "Huffman encoder/decoder for text",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,

    /// Force overwrite existing output files.
    #[arg(short = 'f', long, global = true)]
    force: bool,

    /// Quiet mode (suppress non-error output).
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Output stats as JSON to stderr.
    #[arg(long = "json", global = true)]
    json_output: bool,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Encode text into a '0'/'1' bit-string and write its code table.
    Encode(EncodeArgs),
    /// Decode a '0'/'1' bit-string using a code table.
    Decode(DecodeArgs),
    /// Print the entries of a code table file.
    Table(TableArgs),
    /// Print build/configuration details.
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TieBreakArg {
    /// Earliest-created node first among equal weights.
    Insertion,
    /// Most recently created node first among equal weights.
    Newest,
}

impl From<TieBreakArg> for TieBreak {
    fn from(arg: TieBreakArg) -> Self {
        match arg {
            TieBreakArg::Insertion => TieBreak::InsertionOrder,
            TieBreakArg::Newest => TieBreak::NewestFirst,
        }
    }
}

#[derive(Args, Debug)]
struct EncodeArgs {
    /// Input text file (default: one line from stdin).
    #[arg(long, value_hint = ValueHint::FilePath, conflicts_with = "input_pos")]
    input: Option<PathBuf>,

    /// Output file for the bit-string (default: stdout).
    #[arg(long, value_hint = ValueHint::FilePath, conflicts_with = "output_pos")]
    output: Option<PathBuf>,

    /// Code table file to write.
    #[arg(long, short = 't', value_hint = ValueHint::FilePath, default_value = DEFAULT_TABLE_FILE)]
    table: PathBuf,

    /// Ordering among equal weights while building the tree.
    #[arg(long = "tie-break", value_enum, default_value_t = TieBreakArg::Insertion)]
    tie_break: TieBreakArg,

    /// Input file (positional form).
    #[arg(value_hint = ValueHint::FilePath)]
    input_pos: Option<PathBuf>,

    /// Output file (positional form).
    #[arg(value_hint = ValueHint::FilePath)]
    output_pos: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct DecodeArgs {
    /// Input bit-string file (default: one line from stdin).
    #[arg(long, value_hint = ValueHint::FilePath, conflicts_with = "input_pos")]
    input: Option<PathBuf>,

    /// Output file for the decoded text (default: stdout).
    #[arg(long, value_hint = ValueHint::FilePath, conflicts_with = "output_pos")]
    output: Option<PathBuf>,

    /// Code table file to read.
    #[arg(long, short = 't', value_hint = ValueHint::FilePath, default_value = DEFAULT_TABLE_FILE)]
    table: PathBuf,

    /// Input file (positional form).
    #[arg(value_hint = ValueHint::FilePath)]
    input_pos: Option<PathBuf>,

    /// Output file (positional form).
    #[arg(value_hint = ValueHint::FilePath)]
    output_pos: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct TableArgs {
    /// Code table file.
    #[arg(value_hint = ValueHint::FilePath, default_value = DEFAULT_TABLE_FILE)]
    table: PathBuf,
}

// ---------------------------------------------------------------------------
// Resolved command + options (flattened from Cli)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Encode,
    Decode,
    Table,
    Config,
}

struct Options {
    command: Command,
    force: bool,
    quiet: bool,
    verbose: u8,
    json_output: bool,
    tie_break: TieBreak,
    table_file: PathBuf,
    input_file: Option<PathBuf>,
    output_file: Option<PathBuf>,
}

fn resolve_options(cli: Cli) -> Options {
    let quiet = cli.quiet;
    let verbose = cli.verbose.min(2);
    let force = cli.force;
    let json_output = cli.json_output;

    match cli.command {
        Cmd::Encode(args) => Options {
            command: Command::Encode,
            force,
            quiet,
            verbose,
            json_output,
            tie_break: args.tie_break.into(),
            table_file: args.table,
            input_file: args.input.or(args.input_pos),
            output_file: args.output.or(args.output_pos),
        },
        Cmd::Decode(args) => Options {
            command: Command::Decode,
            force,
            quiet,
            verbose,
            json_output,
            tie_break: TieBreak::default(),
            table_file: args.table,
            input_file: args.input.or(args.input_pos),
            output_file: args.output.or(args.output_pos),
        },
        Cmd::Table(args) => Options {
            command: Command::Table,
            force,
            quiet,
            verbose,
            json_output,
            tie_break: TieBreak::default(),
            table_file: args.table,
            input_file: None,
            output_file: None,
        },
        Cmd::Config => Options {
            command: Command::Config,
            force,
            quiet,
            verbose,
            json_output,
            tie_break: TieBreak::default(),
            table_file: PathBuf::from(DEFAULT_TABLE_FILE),
            input_file: None,
            output_file: None,
        },
    }
}

#[cfg(any(test, feature = "fuzzing"))]
pub fn fuzz_try_parse_args(args: &[String]) {
    let argv: Vec<String> = std::iter::once("huffcode".to_string())
        .chain(args.iter().cloned())
        .collect();
    if let Ok(cli) = Cli::try_parse_from(argv) {
        let _ = resolve_options(cli);
    }
}

// ---------------------------------------------------------------------------
// Shared I/O
// ---------------------------------------------------------------------------

/// Read the whole input file, or a single line from stdin without its line
/// terminator.
fn read_input(path: Option<&Path>) -> Result<String, HuffmanError> {
    match path {
        Some(path) => hio::read_text(path),
        None => {
            let mut line = String::new();
            io::stdin()
                .lock()
                .read_line(&mut line)
                .map_err(|source| HuffmanError::FileUnreadable {
                    path: PathBuf::from("<stdin>"),
                    source,
                })?;
            let end = line.trim_end_matches(['\n', '\r']).len();
            line.truncate(end);
            Ok(line)
        }
    }
}

/// Refuse to clobber an existing output file without `--force`. Runs before
/// any file is written so a refused command leaves every file untouched.
fn check_output(opts: &Options) -> Result<(), String> {
    match &opts.output_file {
        Some(path) if path.exists() && !opts.force => Err(format!(
            "output file exists, use -f to overwrite: {}",
            path.display()
        )),
        _ => Ok(()),
    }
}

/// Write `text` to the output file, or to stdout followed by a newline.
fn write_output(opts: &Options, text: &str) -> Result<(), String> {
    match &opts.output_file {
        Some(path) => hio::write_text(path, text).map_err(|e| e.to_string()),
        None => {
            let mut out = BufWriter::with_capacity(BUF_SIZE, io::stdout().lock());
            writeln!(out, "{text}")
                .and_then(|()| out.flush())
                .map_err(|e| format!("write error: {e}"))
        }
    }
}

fn print_json(value: serde_json::Value) {
    match serde_json::to_string_pretty(&value) {
        Ok(s) => eprintln!("{s}"),
        Err(e) => log::warn!("cannot render stats as JSON: {e}"),
    }
}

// ---------------------------------------------------------------------------
// Config command
// ---------------------------------------------------------------------------

fn cmd_config() -> i32 {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!("huffcode version {version} (Rust)");

    let file_io = cfg!(feature = "file-io") as u8;

    eprintln!("FILE_IO={file_io}");
    eprintln!("DEFAULT_TABLE_FILE={DEFAULT_TABLE_FILE}");
    eprintln!("DEFAULT_TIE_BREAK={:?}", TieBreak::default());
    eprintln!("sizeof(char)={}", std::mem::size_of::<char>());

    0
}

// ---------------------------------------------------------------------------
// Encode command
// ---------------------------------------------------------------------------

fn build_encode_options(opts: &Options) -> EncodeOptions {
    EncodeOptions {
        tie_break: opts.tie_break,
    }
}

fn cmd_encode(opts: &Options) -> i32 {
    if let Err(e) = check_output(opts) {
        eprintln!("huffcode: {e}");
        return 1;
    }

    let text = match read_input(opts.input_file.as_deref()) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("huffcode: {e}");
            return 1;
        }
    };

    if text.is_empty() && !opts.quiet {
        log::warn!("input is empty; writing an empty code table");
    }

    let encoded = match encoder::encode_with_options(&text, &build_encode_options(opts)) {
        Ok(enc) => enc,
        Err(e) => {
            eprintln!("huffcode: encode error: {e}");
            return 1;
        }
    };

    // Table before bits: a failed table write leaves the previous bits
    // paired with the previous table.
    if let Err(e) = hio::save_code_table(&opts.table_file, &encoded.table) {
        eprintln!("huffcode: {e}");
        return 1;
    }

    if let Err(e) = write_output(opts, &encoded.bits) {
        eprintln!("huffcode: {e}");
        return 1;
    }

    log::info!(
        "encoder: {} chars, {} distinct, {} bits, ratio {:.3}, table {}",
        encoded.text_len(),
        encoded.table.len(),
        encoded.bit_len(),
        encoded.ratio(),
        opts.table_file.display()
    );

    if opts.json_output {
        print_json(serde_json::json!({
            "command": "encode",
            "text_chars": encoded.text_len(),
            "table_entries": encoded.table.len(),
            "encoded_bits": encoded.bit_len(),
            "ratio": encoded.ratio(),
            "tie_break": format!("{:?}", opts.tie_break),
            "text_sha256": hio::sha256(&text).as_ref().map(hio::hex_digest),
        }));
    }

    0
}

// ---------------------------------------------------------------------------
// Decode command
// ---------------------------------------------------------------------------

fn cmd_decode(opts: &Options) -> i32 {
    if let Err(e) = check_output(opts) {
        eprintln!("huffcode: {e}");
        return 1;
    }

    let table = match hio::load_code_table(&opts.table_file) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("huffcode: {e}");
            return 1;
        }
    };

    let encoded = match read_input(opts.input_file.as_deref()) {
        Ok(bits) => bits,
        Err(e) => {
            eprintln!("huffcode: {e}");
            return 1;
        }
    };
    let bits = encoded.trim();

    let text = match decoder::decode_with_table(&table, bits) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("huffcode: decode error: {e}");
            return 1;
        }
    };

    if let Err(e) = write_output(opts, &text) {
        eprintln!("huffcode: {e}");
        return 1;
    }

    log::info!(
        "decoder: {} bits, {} chars, table {} ({} entries)",
        bits.len(),
        text.chars().count(),
        opts.table_file.display(),
        table.len()
    );

    if opts.json_output {
        print_json(serde_json::json!({
            "command": "decode",
            "encoded_bits": bits.len(),
            "output_chars": text.chars().count(),
            "table_entries": table.len(),
            "output_sha256": hio::sha256(&text).as_ref().map(hio::hex_digest),
        }));
    }

    0
}

// ---------------------------------------------------------------------------
// Table command
// ---------------------------------------------------------------------------

fn print_table(table: &CodeTable) {
    println!("Character  Bits  Code");
    for (ch, code) in table.iter() {
        println!("{:<10} {:>4}  {code}", format!("{ch:?}"), code.len());
    }
}

fn cmd_table(opts: &Options) -> i32 {
    let table = match hio::load_code_table(&opts.table_file) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("huffcode: {e}");
            return 1;
        }
    };

    let prefix_free = table.is_prefix_free();

    if !opts.quiet {
        print_table(&table);
        println!();
        println!("Entries:          {}", table.len());
        println!("Longest code:     {}", table.max_code_len());
        println!("Prefix-free:      {}", if prefix_free { "yes" } else { "no" });
    }

    if opts.json_output {
        let entries: serde_json::Map<String, serde_json::Value> = table
            .iter()
            .map(|(ch, code)| (ch.to_string(), serde_json::Value::from(code)))
            .collect();
        print_json(serde_json::json!({
            "command": "table",
            "entries": entries,
            "max_code_len": table.max_code_len(),
            "prefix_free": prefix_free,
        }));
    }

    if prefix_free {
        0
    } else {
        eprintln!(
            "huffcode: {}: table is not prefix-free",
            opts.table_file.display()
        );
        1
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn log_filter(opts: &Options) -> &'static str {
    match (opts.quiet, opts.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    }
}

/// Main CLI entry point. Parses arguments via clap, dispatches commands.
pub fn run() -> ! {
    let cli = Cli::parse();
    let opts = resolve_options(cli);

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_filter(&opts)))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let exit_code = match opts.command {
        Command::Encode => cmd_encode(&opts),
        Command::Decode => cmd_decode(&opts),
        Command::Table => cmd_table(&opts),
        Command::Config => cmd_config(),
    };

    process::exit(exit_code);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
