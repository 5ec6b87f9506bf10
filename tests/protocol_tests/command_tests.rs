//! Command Tests
//!
//! Tests verify:
//! - Construction from array frames and inline lines
//! - Rejection of empty commands and non-bulk arguments
//! - Permissive positional accessors
//! - Canonical formatting

use std::io::Cursor;

use respwire::protocol::read_command;
use respwire::{Command, RespError, Value};

// =============================================================================
// Inline Construction Tests
// =============================================================================

#[test]
fn test_inline_normalization() {
    for line in ["PING", "PING\n", "PING\r", "  PING  ", "PING\r\n"] {
        let cmd = Command::from_inline(line).unwrap();
        assert_eq!(cmd.name(), "PING", "input {:?}", line);
        assert_eq!(cmd.arg_count(), 1, "input {:?}", line);
    }
}

#[test]
fn test_inline_splits_on_whitespace_runs() {
    let cmd = Command::from_inline("SET   mykey\tmyvalue").unwrap();
    assert_eq!(cmd.arg_count(), 3);
    assert_eq!(cmd.value(1), "mykey");
    assert_eq!(cmd.value(2), "myvalue");
}

#[test]
fn test_empty_inline_rejected() {
    for line in ["", "   ", "\r\n"] {
        let result = Command::from_inline(line);
        assert!(matches!(result, Err(RespError::Construction(_))), "input {:?}", line);
    }
}

// =============================================================================
// Array Construction Tests
// =============================================================================

#[test]
fn test_array_as_command() {
    let mut cursor = Cursor::new(&b"*2\r\n$4\r\nLLEN\r\n$6\r\nmysist\r\n"[..]);
    let cmd = read_command(&mut cursor).unwrap().unwrap();

    assert_eq!(cmd.name(), "LLEN");
    assert_eq!(cmd.value(1), "mysist");
    assert_eq!(cmd.arg_count(), 2);
}

#[test]
fn test_from_value_keeps_binary_arguments() {
    let value = Value::array(vec![
        Value::bulk_string("SET"),
        Value::bulk_string("k"),
        Value::bulk_string(vec![0xffu8, 0x00]),
    ]);
    let cmd = Command::from_value(value).unwrap();
    assert_eq!(cmd.arg(2), Some(&[0xffu8, 0x00][..]));
}

#[test]
fn test_non_bulk_argument_rejected() {
    let value = Value::array(vec![Value::bulk_string("INCRBY"), Value::integer(5)]);
    match Command::from_value(value) {
        Err(RespError::UnexpectedCommandType { index, found }) => {
            assert_eq!(index, 1);
            assert_eq!(found, "integer");
        }
        other => panic!("Expected UnexpectedCommandType, got {:?}", other),
    }
}

#[test]
fn test_inline_value_is_not_a_command_frame() {
    // Inline frames decode to simple strings, which are not bulk arguments
    let value = Value::array(vec![Value::simple_string("PING")]);
    let err = Command::try_from(value).unwrap_err();
    assert!(err.is_protocol());
}

#[test]
fn test_null_bulk_argument_rejected() {
    let value = Value::array(vec![Value::bulk_string("GET"), Value::null_bulk_string()]);
    assert!(matches!(
        Command::from_value(value),
        Err(RespError::UnexpectedCommandType { index: 1, .. })
    ));
}

#[test]
fn test_non_array_rejected() {
    assert!(Command::from_value(Value::bulk_string("PING")).unwrap_err().is_protocol());
    assert!(Command::from_value(Value::null_array()).unwrap_err().is_protocol());
}

#[test]
fn test_empty_array_rejected() {
    let result = Command::from_value(Value::array(vec![]));
    assert!(matches!(result, Err(RespError::Construction(_))));
}

#[test]
fn test_read_command_from_bad_array_is_protocol_error() {
    let mut cursor = Cursor::new(&b"*1\r\n:1\r\n"[..]);
    assert!(read_command(&mut cursor).unwrap_err().is_protocol());
}

// =============================================================================
// Accessor Tests
// =============================================================================

#[test]
fn test_value_out_of_range_is_empty() {
    let cmd = Command::new(["GET", "key"]).unwrap();
    assert_eq!(cmd.value(5), "");
    assert_eq!(cmd.arg(5), None);
}

#[test]
fn test_integer_accessor() {
    let cmd = Command::new(["EXPIRE", "key", "-30", "12x"]).unwrap();
    assert_eq!(cmd.integer(2), -30);
    assert_eq!(cmd.integer(0), 0);
    assert_eq!(cmd.integer(3), 0);
    assert_eq!(cmd.integer(9), 0);
}

#[test]
fn test_integer_accessor_rejects_overflow_and_binary() {
    let cmd = Command::new(vec![
        b"INCRBY".to_vec(),
        b"9223372036854775808".to_vec(),
        vec![0xffu8, b'1'],
        b"9223372036854775807".to_vec(),
    ])
    .unwrap();
    assert_eq!(cmd.integer(1), 0);
    assert_eq!(cmd.integer(2), 0);
    assert_eq!(cmd.integer(3), i64::MAX);
}

#[test]
fn test_name_case_preserved() {
    let cmd = Command::from_inline("get key").unwrap();
    assert_eq!(cmd.name(), "get");
    assert!(cmd.is("GET"));
}

// =============================================================================
// Formatting Tests
// =============================================================================

#[test]
fn test_inline_formats_as_bulk_array() {
    let cmd = Command::from_inline("SET key value").unwrap();
    assert_eq!(
        cmd.format(),
        b"*3\r\n$3\r\nSET\r\n$3\r\nkey\r\n$5\r\nvalue\r\n"
    );
}

#[test]
fn test_format_reparses_to_same_command() {
    let cmd = Command::from_inline("HSET h field 42").unwrap();
    let bytes = cmd.format();
    let mut cursor = Cursor::new(&bytes[..]);
    assert_eq!(read_command(&mut cursor).unwrap().unwrap(), cmd);
}
