use std::io::{self, Read, Write};

use rstest::rstest;

use crate::{LiteralKind, MinifyError, SyntaxError, minify, minify_to_vec};

#[rstest]
#[case::string_at_eof("s=\"abc", LiteralKind::String, (1, 3))]
#[case::single_quoted("x = 'abc", LiteralKind::String, (1, 5))]
#[case::raw_newline_in_string("a = 'x\ny'", LiteralKind::String, (1, 5))]
#[case::backslash_at_eof("\n\n  'abc\\", LiteralKind::String, (3, 3))]
#[case::after_crlf("a\r\n'x", LiteralKind::String, (2, 1))]
#[case::block_comment("/* open", LiteralKind::BlockComment, (1, 1))]
#[case::block_comment_almost_closed("a; /* nearly *", LiteralKind::BlockComment, (1, 4))]
#[case::regex_at_eof("x = /abc", LiteralKind::Regex, (1, 5))]
#[case::regex_open_class("x = /a[/", LiteralKind::Regex, (1, 5))]
#[case::raw_newline_in_regex("x = /a\n/", LiteralKind::Regex, (1, 5))]
fn unterminated_literals(
    #[case] input: &str,
    #[case] kind: LiteralKind,
    #[case] position: (usize, usize),
) {
    let err = minify_to_vec(input.as_bytes()).unwrap_err();
    assert_eq!(err.syntax(), Some(SyntaxError::UnterminatedLiteral(kind)));
    assert_eq!(err.position(), Some(position));
    assert!(!err.is_io());
}

#[test]
fn error_message_names_literal_and_position() {
    let err = minify_to_vec(b"s=\"abc").unwrap_err();
    assert_eq!(err.to_string(), "unterminated string literal at 1:3");

    let err = minify_to_vec(b"a;\n  /* x").unwrap_err();
    assert_eq!(err.to_string(), "unterminated block comment at 2:3");

    let err = minify_to_vec(b"f(/x").unwrap_err();
    assert_eq!(err.to_string(), "unterminated regular expression literal at 1:3");
}

#[test]
fn syntax_error_is_the_source() {
    let err = minify_to_vec(b"'").unwrap_err();
    let source = std::error::Error::source(&err).unwrap();
    assert_eq!(source.to_string(), "unterminated string literal");
}

#[test]
fn read_errors_are_propagated() {
    struct Broken;
    impl Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
        }
    }

    let err = minify(Broken, Vec::new()).unwrap_err();
    assert!(err.is_io());
    assert!(err.syntax().is_none());
    let MinifyError::Io(io) = err else {
        panic!("expected an i/o error");
    };
    assert_eq!(io.kind(), io::ErrorKind::BrokenPipe);
}

#[test]
fn write_errors_are_propagated() {
    struct Full;
    impl Write for Full {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::StorageFull, "full"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let err = minify(&b"var a = 1;"[..], Full).unwrap_err();
    assert!(err.is_io());
    assert_eq!(err.to_string(), "i/o error: full");
}
