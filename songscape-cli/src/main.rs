//! Entry point for the `songscape` binary.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = songscape_cli::run() {
        eprintln!("songscape: {err}");
        std::process::exit(1);
    }
}
