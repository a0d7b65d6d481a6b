use std::io::{self, Write};

pub fn write_stdout_text(text: &str) -> io::Result<()> {
    write_tolerating_closed_pipe(&mut io::stdout().lock(), text.as_bytes())
}

pub fn write_stdout_line(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    write_tolerating_closed_pipe(&mut stdout, text.as_bytes())?;
    write_tolerating_closed_pipe(&mut stdout, b"\n")
}

/// Output piped into `head` and friends may be closed early; that is not a failure.
fn write_tolerating_closed_pipe(writer: &mut dyn Write, bytes: &[u8]) -> io::Result<()> {
    match writer.write_all(bytes).and_then(|()| writer.flush()) {
        Err(error) if error.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Write};

    use super::write_tolerating_closed_pipe;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn broken_pipe_is_not_an_error() {
        assert!(write_tolerating_closed_pipe(&mut ClosedPipe, b"hello").is_ok());
    }

    #[test]
    fn other_write_errors_propagate() {
        assert!(write_tolerating_closed_pipe(&mut FullDisk, b"hello").is_err());
    }

    #[test]
    fn bytes_reach_the_writer() {
        let mut buffer = Vec::new();
        assert!(write_tolerating_closed_pipe(&mut buffer, b"hello").is_ok());
        assert_eq!(buffer, b"hello");
    }
}
