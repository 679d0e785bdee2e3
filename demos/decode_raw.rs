//! Decodes a raw `-lh5-` compressed payload (no archive header, just the compressed bytes
//! for a single method identifier) read from a file path given on the command line, writing
//! the decompressed bytes to stdout.
//!
//! This crate only implements the decompression core; pulling apart an LHA archive's headers
//! to find where a member's compressed bytes start and how many decompressed bytes to expect
//! is a surrounding reader's job, not this crate's. This demo therefore takes the compressed
//! size and decompressed size as explicit arguments.
use std::env;
use std::fs::File;
use std::io::{self, Write};
use std::process::ExitCode;

use lzh_newdecoder::{Decoder, Lh5Decoder};

fn main() -> ExitCode {
    let mut args = env::args().skip(1);
    let (path, decoded_size) = match (args.next(), args.next()) {
        (Some(path), Some(size)) => match size.parse::<usize>() {
            Ok(size) => (path, size),
            Err(_) => {
                eprintln!("decoded_size must be a non-negative integer");
                return ExitCode::FAILURE;
            }
        },
        _ => {
            eprintln!("usage: decode_raw <compressed-file> <decoded-size>");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = run(&path, decoded_size) {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(path: &str, decoded_size: usize) -> io::Result<()> {
    let file = File::open(path)?;
    let mut decoder = Lh5Decoder::new(file);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut buffer = [0u8; 8 * 1024];
    let mut remaining = decoded_size;
    while remaining > 0 {
        let len = buffer.len().min(remaining);
        decoder.fill_buffer(&mut buffer[..len]).map_err(io::Error::from)?;
        out.write_all(&buffer[..len])?;
        remaining -= len;
    }
    Ok(())
}
