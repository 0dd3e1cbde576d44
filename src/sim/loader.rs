//! Program loader.
//!
//! Reads a plain-text program: one instruction per line, each line starting
//! with a 32-bit hexadecimal machine-code word (no `0x` prefix required,
//! leading whitespace allowed). Anything after the first whitespace run
//! following the word is assembly text and is discarded. Instructions are
//! placed consecutively from address 0, four bytes apart.

use std::fs;
use std::process;

/// Loads a program file, exiting with a diagnostic if it cannot be read.
pub fn load_program(path: &str) -> Vec<u32> {
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("[!] FATAL: could not read file '{}': {}", path, e);
        process::exit(1);
    });
    parse_program(&text)
}

/// Parses program text. Lines whose first token is not a 32-bit hex word
/// are skipped silently.
pub fn parse_program(text: &str) -> Vec<u32> {
    text.lines().filter_map(parse_line).collect()
}

/// Parses a single program line into a machine-code word. An optional `0x`
/// prefix on the word is accepted.
pub fn parse_line(line: &str) -> Option<u32> {
    let token = line.split_whitespace().next()?;
    let token = token.strip_prefix("0x").unwrap_or(token);
    u32::from_str_radix(token, 16).ok()
}
