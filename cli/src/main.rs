//! Stuff or unstuff stdin with rotating escape codes.
//!
//! Reads all of stdin as a single message and writes the result to stdout. No framing is added:
//! append your own delimiter (like a zero byte) if the output is sent over a shared link.
//!
//! # Usage
//!
//! ```sh
//! printf 'hello\0world' | cargo run --release --bin cuckoo -- stuff > stuffed.bin
//! cargo run --release --bin cuckoo -- unstuff < stuffed.bin
//! ```
//!
//! Pass `--streaming` to use the byte-at-a-time codec instead of the batch codec (both sides
//! must agree when encoding, but either decoder understands either encoding). Pass `--verbose` to
//! log every escape code rotation to stderr.

use bytes::BytesMut;
use clap::{Arg, ArgAction, Command};
use cuckoo_stuff::{
    batch,
    stream::{Decoder, Encoder},
};
use std::io::{Read, Write};
use tracing::{error, info, Level};

fn main() {
    // Parse arguments
    let streaming = Arg::new("streaming")
        .long("streaming")
        .action(ArgAction::SetTrue)
        .help("Process one byte at a time");
    let matches = Command::new("cuckoo")
        .about("stuff or unstuff stdin with rotating escape codes")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log escape code rotations"),
        )
        .subcommand(
            Command::new("stuff")
                .about("remove zero bytes from a message")
                .arg(streaming.clone()),
        )
        .subcommand(
            Command::new("unstuff")
                .about("restore a stuffed message")
                .arg(streaming),
        )
        .get_matches();

    // Create logger
    let level = if matches.get_flag("verbose") {
        Level::TRACE
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    // Read message
    let mut input = Vec::new();
    std::io::stdin()
        .read_to_end(&mut input)
        .expect("failed to read stdin");

    // Transform message
    let (mode, sub) = matches.subcommand().expect("subcommand is required");
    let streaming = sub.get_flag("streaming");
    let output = match mode {
        "stuff" => stuff(&input, streaming),
        "unstuff" => {
            if let Some(position) = input.iter().position(|&b| b == 0) {
                error!(position, "stuffed input contains a zero byte");
                std::process::exit(1);
            }
            unstuff(&input, streaming)
        }
        _ => unreachable!("unknown subcommand"),
    };
    info!(
        mode,
        streaming,
        input = input.len(),
        output = output.len(),
        "transformed message"
    );

    // Write result
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&output).expect("failed to write stdout");
    stdout.flush().expect("failed to flush stdout");
}

fn stuff(input: &[u8], streaming: bool) -> Vec<u8> {
    if !streaming {
        return batch::stuff_to_vec(input);
    }
    let mut output = BytesMut::with_capacity(cuckoo_stuff::max_stuffed_len(input.len()));
    Encoder::default().encode(input, &mut output);
    output.to_vec()
}

fn unstuff(input: &[u8], streaming: bool) -> Vec<u8> {
    if !streaming {
        return batch::unstuff_to_vec(input);
    }
    let mut output = BytesMut::with_capacity(input.len());
    let mut decoder = Decoder::default();
    decoder.decode(input, &mut output);
    decoder.finish(&mut output);
    output.to_vec()
}
