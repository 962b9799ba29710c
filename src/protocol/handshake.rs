use std::io::{self, ErrorKind, Read};

/// Identification request written to a freshly opened candidate
pub const HANDSHAKE_REQUEST: [u8; 5] = [0xAF, 0xEA, 0x1F, 0x10, 0x05];

/// Prefix a genuine controller answers with
pub const HANDSHAKE_RESPONSE: [u8; 2] = [0xF1, 0x10];

/// Only the first bytes of the reply line are significant.
pub fn is_handshake_response(line: &[u8]) -> bool {
    line.starts_with(&HANDSHAKE_RESPONSE)
}

/// Read bytes up to and including `\n`.
///
/// A read timeout or end of stream ends the line early and returns whatever
/// arrived so far, possibly nothing. Any other I/O error is returned.
pub fn read_line<R: Read + ?Sized>(reader: &mut R) -> io::Result<Vec<u8>> {
    let mut line = Vec::new();
    let mut byte = [0u8; 1];

    loop {
        match reader.read(&mut byte) {
            Ok(0) => break,
            Ok(_) => {
                line.push(byte[0]);
                if byte[0] == b'\n' {
                    break;
                }
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) if e.kind() == ErrorKind::TimedOut || e.kind() == ErrorKind::WouldBlock => break,
            Err(e) => return Err(e),
        }
    }

    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::io::Cursor;

    #[rstest]
    #[case(&[0xF1, 0x10], true)]
    #[case(&[0xF1, 0x10, 0x00, b'\n'], true)]
    #[case(&[0x00, 0x00], false)]
    #[case(&[0xF1], false)]
    #[case(&[], false)]
    fn test_response_prefix(#[case] line: &[u8], #[case] expected: bool) {
        assert_eq!(is_handshake_response(line), expected);
    }

    #[test]
    fn test_read_line_stops_at_newline() {
        let mut input = Cursor::new(b"ab\ncd".to_vec());
        assert_eq!(read_line(&mut input).unwrap(), b"ab\n".to_vec());
        assert_eq!(read_line(&mut input).unwrap(), b"cd".to_vec());
        assert_eq!(read_line(&mut input).unwrap(), Vec::<u8>::new());
    }

    struct TimesOut;

    impl Read for TimesOut {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(ErrorKind::TimedOut, "timed out"))
        }
    }

    #[test]
    fn test_read_line_timeout_is_empty_line() {
        assert_eq!(read_line(&mut TimesOut).unwrap(), Vec::<u8>::new());
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(ErrorKind::BrokenPipe, "unplugged"))
        }
    }

    #[test]
    fn test_read_line_propagates_other_errors() {
        let err = read_line(&mut Broken).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BrokenPipe);
    }
}
