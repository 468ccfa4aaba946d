// tests/integration_tests.rs
//! Integration tests for the buffered readers and writers

use peekio::prelude::*;
use std::io::{self, Cursor};

/// Accepts at most `allowance` more bytes, then refuses without an error.
struct Trickle {
    data: Vec<u8>,
    allowance: usize,
}

impl io::Write for Trickle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = buf.len().min(self.allowance);
        self.allowance -= n;
        self.data.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Moves nothing, forever, without reporting a stop reason.
struct Silent;

impl Source for Silent {
    fn fill(&mut self, _dst: &mut [u8]) -> Transfer {
        Transfer::progress(0)
    }
}

#[test]
fn test_fixed_peek_over_endless_source() {
    for capacity in [1usize, 16, 512, 4096] {
        let mut reader = FixedReader::new(io::repeat(0xAA), vec![0u8; capacity]);
        for n in [0, 1, capacity / 3, capacity] {
            let view = reader.peek(n).expect("peek within capacity");
            assert!(view.len() >= n);
            assert!(view.iter().all(|&b| b == 0xAA));
        }
    }
}

#[test]
fn test_fixed_peek_beyond_capacity() {
    let mut reader = FixedReader::new(io::repeat(0), [0u8; 64]);
    let Partial { value, error } = reader.peek(65).unwrap_err();
    assert_eq!(value.len(), 64);
    assert!(error.is_capacity());
}

#[test]
fn test_growing_reader_large_peek_then_shrink() {
    let mut reader = GrowingReader::new(io::repeat(7));
    assert_eq!(reader.capacity(), 0);

    let view = reader.peek(1 << 20).unwrap();
    assert!(view.len() >= 1 << 20);
    assert_eq!(reader.capacity(), 1 << 20);

    let pending = reader.buffered().len();
    reader.discard(pending - 10).unwrap();
    reader.shrink();
    assert_eq!(reader.capacity(), GROWING_MIN_CAPACITY);
    assert_eq!(reader.buffered(), &[7u8; 10][..]);
}

#[test]
fn test_write_string_then_flush() {
    let text = "The quick brown fox jumps over the lazy dog.\n";
    let mut writer = FixedWriter::new(Vec::<u8>::new(), [0u8; 8]);

    assert_eq!(write_string(&mut writer, text), Ok(text.len()));
    writer.flush().unwrap();
    assert_eq!(writer.get_ref(), text.as_bytes());

    // A second flush has nothing left to send.
    writer.flush().unwrap();
    assert_eq!(writer.get_ref().len(), text.len());
}

#[test]
fn test_peek_to_lines() {
    let mut reader = FixedReader::new(Cursor::new(b"abc\ndef"), [0u8; 16]);

    assert_eq!(peek_to(&mut reader, b'\n', 0).unwrap(), b"abc\n");
    reader.consume(4).unwrap();
    assert_eq!(peek_to(&mut reader, b'\n', 0), Err(Error::Eof));

    // The trailing bytes are still there to read.
    let mut rest = [0u8; 8];
    assert_eq!(reader.read(&mut rest), Ok(3));
    assert_eq!(&rest[..3], b"def");
}

#[test]
fn test_sized_writer_recovers_after_partial_flush() {
    let sink = Trickle {
        data: Vec::new(),
        allowance: 3,
    };
    let mut writer = SizedWriter::new(sink, 32);
    assert_eq!(writer.write(b"0123456789"), Ok(10));

    assert_eq!(writer.flush(), Err(Error::ShortWrite));
    assert_eq!(writer.get_ref().data, b"012");
    assert_eq!(writer.buffered(), b"3456789");

    writer.get_mut().allowance = usize::MAX;
    writer.flush().unwrap();
    assert_eq!(writer.get_ref().data, b"0123456789");
}

#[test]
fn test_fixed_writer_failure_is_sticky() {
    let sink = Trickle {
        data: Vec::new(),
        allowance: 3,
    };
    let mut writer = FixedWriter::new(sink, [0u8; 32]);
    writer.write(b"0123456789").unwrap();

    assert_eq!(writer.flush(), Err(Error::ShortWrite));
    writer.get_mut().allowance = usize::MAX;
    assert_eq!(writer.flush(), Err(Error::ShortWrite));
    assert_eq!(writer.failure(), Some(&Error::ShortWrite));
}

#[test]
fn test_limited_reader_budget() {
    let inner = FixedReader::new(Cursor::new(b"0123456789"), [0u8; 16]);
    let mut reader = LimitedReader::new(inner, 5);
    let mut buf = [0u8; 8];

    assert_eq!(reader.read(&mut buf), Ok(5));
    assert_eq!(&buf[..5], b"01234");
    assert_eq!(reader.read(&mut buf), Err(Error::Eof));
}

#[test]
fn test_invalid_sizes_leave_state_alone() {
    let mut reader = FixedReader::new(Cursor::new(b"abc"), [0u8; 8]);
    reader.peek(3).unwrap();
    assert_eq!(reader.consume(4), Err(Error::InvalidConsumeSize));
    assert_eq!(reader.buffered(), b"abc");

    let mut writer = SizedWriter::new(Vec::<u8>::new(), 16);
    let free = writer.reserve(4).unwrap().len();
    assert_eq!(writer.commit(free + 1), Err(Error::InvalidCommitSize));
    assert!(writer.buffered().is_empty());
}

#[test]
fn test_silent_source_gives_up() {
    let mut reader = GrowingReader::new(Silent);
    let Partial { value, error } = reader.peek(1).unwrap_err();
    assert!(value.is_empty());
    assert_eq!(error, Error::NoProgress);

    let mut buf = [0u8; 4];
    assert_eq!(reader.read(&mut buf), Err(Error::NoProgress));
}

#[test]
fn test_io_failure_is_replayed() {
    struct Broken;

    impl io::Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset by peer"))
        }
    }

    let mut reader = FixedReader::new(Broken, [0u8; 8]);
    let first = reader.peek(1).unwrap_err().error;
    let second = reader.peek(1).unwrap_err().error;
    assert_eq!(first, second);

    let as_io: io::Error = second.into();
    assert_eq!(as_io.kind(), io::ErrorKind::ConnectionReset);
}

#[test]
fn test_request_response_over_duplex() {
    let reader = GrowingReader::new(Cursor::new(b"SET k 3\r\nabc\r\n".to_vec()));
    let writer = SizedWriter::new(Vec::<u8>::new(), 64);
    let mut conn = Duplex::new(reader, writer);

    let header = peek_to(&mut conn, b'\n', 0).unwrap().to_vec();
    assert_eq!(header, b"SET k 3\r\n");
    conn.consume(header.len()).unwrap();

    let body = conn.peek(5).unwrap()[..3].to_vec();
    assert_eq!(body, b"abc");
    conn.consume(5).unwrap();

    write_string(&mut conn, "STORED\r\n").unwrap();
    conn.flush().unwrap();

    let (_, writer) = conn.into_parts();
    assert_eq!(writer.into_inner(), b"STORED\r\n");
}

#[cfg(feature = "anyhow")]
#[test]
fn test_anyhow_interop() {
    fn parse(reader: &mut impl Reader) -> anyhow::Result<usize> {
        let line = peek_to(reader, b'\n', 0)?;
        Ok(line.len())
    }

    let mut reader = FixedReader::new(Cursor::new(b"ok\n"), [0u8; 8]);
    assert_eq!(parse(&mut reader).unwrap(), 3);
}
