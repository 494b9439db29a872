use factree::parser::byte_parser::ConsumeMode::{Exclusive, Inclusive};
use factree::parser::{ByteParser, ParsingError, ParsingErrorType};

#[test]
fn test_skip_whitespace() {
    let mut parser = ByteParser::for_str(" \r  \t\n \x0b\x0c x y");
    parser.skip_whitespace();
    assert_eq!(parser.peek(), Some(b'x'));

    parser.next_byte(); // skip x
    parser.skip_whitespace();
    assert_eq!(parser.peek(), Some(b'y'));
}

#[test]
fn test_consume_until_inclusive() {
    let mut parser = ByteParser::for_str("(\"has fur\" nil nil)");
    parser.next_byte();
    parser.next_byte();
    assert!(parser.consume_until(b'"', Inclusive));
    assert_eq!(parser.peek(), Some(b' '));
    assert_eq!(parser.position(), 10);
}

#[test]
fn test_consume_until_exclusive() {
    let mut parser = ByteParser::for_str("(\"has fur\" nil nil)");
    parser.next_byte();
    parser.next_byte();
    assert!(parser.consume_until(b'"', Exclusive));
    assert_eq!(parser.peek(), Some(b'"'));
    assert_eq!(parser.position(), 9);
    assert_eq!(parser.slice_from(2), b"has fur");
}

#[test]
fn test_consume_until_missing_target() {
    let mut parser = ByteParser::for_str("\"never closed");
    parser.next_byte();
    assert!(!parser.consume_until(b'"', Exclusive));
    assert!(parser.is_eof());
}

#[test]
fn test_is_eof() {
    let mut parser = ByteParser::for_str("... happily ever after!");
    parser.consume_until(b'!', Inclusive);
    assert!(parser.is_eof());
    assert_eq!(parser.remaining(), 0);
    assert_eq!(parser.next_byte(), None);
}

#[test]
fn test_position() {
    let mut parser = ByteParser::for_str("Where are we?");
    assert_eq!(parser.position(), 0);
    parser.peek();
    assert_eq!(parser.position(), 0);
    parser.next_byte();
    assert_eq!(parser.position(), 1);

    parser.set_position(10);
    assert_eq!(parser.peek(), Some(b'w'));
    assert_eq!(parser.remaining(), 3);
}

#[test]
fn test_peek_and_consume_sequence() {
    let mut parser = ByteParser::for_str("nil nil)");
    assert!(parser.peek_is_sequence(b"nil"));
    assert!(!parser.peek_is_sequence(b"NIL"));
    assert_eq!(parser.position(), 0);

    assert!(parser.consume_if_sequence(b"nil"));
    assert_eq!(parser.position(), 3);
    assert!(!parser.consume_if_sequence(b"nil"));
    parser.skip_whitespace();
    assert!(parser.consume_if_sequence(b"nil"));
    assert!(!parser.peek_is_sequence(b")nil"));
    assert!(parser.consume_if(b')'));
    assert!(!parser.peek_is_sequence(b"nil"));
}

#[test]
fn test_line_and_column() {
    let mut parser = ByteParser::for_str("(\"a\"\n  (\"b\" nil nil)\n  nil)");
    assert_eq!(parser.line_and_column(), (1, 1));

    parser.consume_until(b'\n', Inclusive);
    assert_eq!(parser.line_and_column(), (2, 1));

    parser.skip_whitespace();
    assert_eq!(parser.line_and_column(), (2, 3));

    parser.consume_until(b'\n', Inclusive);
    parser.skip_whitespace();
    assert_eq!(parser.peek(), Some(b'n'));
    assert_eq!(parser.line_and_column(), (3, 3));
}

#[test]
fn test_context() {
    let mut parser = ByteParser::for_str("(\"cat\" nil nul)");
    parser.set_position(11);
    assert_eq!(parser.get_context(3), b"nul");
    assert_eq!(parser.get_context_as_string(50), "nul)");
}

#[test]
fn test_error_from_parser_state() {
    let mut parser = ByteParser::for_str("(\"cat\"\n nul nil)");
    parser.set_position(8);

    let err = ParsingError::unexpected(&parser, "'(' or 'nil'");
    assert_eq!(
        err.kind(),
        &ParsingErrorType::UnexpectedSymbol {
            found: b'n',
            expected: "'(' or 'nil'"
        }
    );
    assert_eq!((err.line(), err.column()), (2, 2));
    assert_eq!(err.context(), "nul nil)");

    parser.set_position(16);
    let err = ParsingError::unexpected(&parser, "')'");
    assert_eq!(err.kind(), &ParsingErrorType::UnexpectedEof { expected: "')'" });
    assert_eq!(err.context(), "");
    assert!(!err.to_string().contains("Context"));
}
