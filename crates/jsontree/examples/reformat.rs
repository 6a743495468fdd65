//! Re-indents a JSON document read from a file or standard input.
//!
//! ```text
//! cargo run --example reformat -- [--compact] [PATH]
//! ```
#![allow(missing_docs)]

use std::{fs::File, io, process::ExitCode};

use jsontree::DEFAULT_BUFFER_SIZE;

fn main() -> ExitCode {
    env_logger::init();

    let mut compact = false;
    let mut path = None;
    for arg in std::env::args().skip(1) {
        if arg == "--compact" {
            compact = true;
        } else {
            path = Some(arg);
        }
    }

    let result = match &path {
        Some(path) => match File::open(path) {
            Ok(file) => jsontree::parse(file, DEFAULT_BUFFER_SIZE),
            Err(err) => {
                eprintln!("{path}: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => jsontree::parse(io::stdin().lock(), DEFAULT_BUFFER_SIZE),
    };

    match result {
        Ok(Some(value)) if compact => println!("{value}"),
        Ok(Some(value)) => println!("{value:#}"),
        Ok(None) => {}
        Err(err) => {
            eprintln!("{}: {err}", path.as_deref().unwrap_or("<stdin>"));
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
