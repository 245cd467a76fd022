fn main() {
    #[cfg(feature = "cli")]
    huffcode::cli::run();

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("huffcode: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(1);
    }
}
