//! Unit tests for the program loader.

use rv32_pipeline::sim::loader::{parse_line, parse_program};

/// Tests parsing a bare hex word.
#[test]
fn test_parse_bare_word() {
    assert_eq!(parse_line("00500113"), Some(0x00500113));
    assert_eq!(parse_line("deadbeef"), Some(0xDEAD_BEEF));
    assert_eq!(parse_line("DEADBEEF"), Some(0xDEAD_BEEF));
}

/// Tests that trailing assembly text is ignored.
#[test]
fn test_parse_trailing_text_ignored() {
    assert_eq!(
        parse_line("00500113  ; addi x2, x0, 5"),
        Some(0x00500113)
    );
    assert_eq!(parse_line("00a00193 addi x3, x0, 10"), Some(0x00A00193));
}

/// Tests that leading whitespace is allowed.
#[test]
fn test_parse_leading_whitespace() {
    assert_eq!(parse_line("   00500113"), Some(0x00500113));
    assert_eq!(parse_line("\t00500113"), Some(0x00500113));
}

/// Tests the optional 0x prefix.
#[test]
fn test_parse_0x_prefix() {
    assert_eq!(parse_line("0x00500113"), Some(0x00500113));
}

/// Tests that malformed lines parse to nothing.
#[test]
fn test_parse_malformed() {
    assert_eq!(parse_line(""), None);
    assert_eq!(parse_line("   "), None);
    assert_eq!(parse_line("; comment only"), None);
    assert_eq!(parse_line("nothex"), None);
    assert_eq!(parse_line("123456789"), None, "wider than 32 bits");
}

/// Tests that program parsing skips malformed lines silently and keeps
/// instruction order.
#[test]
fn test_parse_program_skips_bad_lines() {
    let text = "00500113 ; addi x2, x0, 5\n\
                garbage line\n\
                \n\
                00a00193\n";
    assert_eq!(parse_program(text), vec![0x00500113, 0x00A00193]);
}
