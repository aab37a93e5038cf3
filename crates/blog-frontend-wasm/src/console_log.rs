//! Line buffering between `tracing-subscriber`'s formatter and the browser
//! console, which takes whole messages rather than a byte stream.

use std::io;

#[derive(Debug, Default)]
pub struct LineBuffer {
    buf: Vec<u8>,
}

impl LineBuffer {
    /// Drain the buffer as one message without the trailing newline.
    /// `None` when nothing but whitespace was written.
    pub fn take_message(&mut self) -> Option<String> {
        let bytes = std::mem::take(&mut self.buf);
        let text = String::from_utf8_lossy(&bytes);
        let text = text.trim_end();
        (!text.trim_start().is_empty()).then(|| text.to_string())
    }
}

impl io::Write for LineBuffer {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn joins_partial_writes_and_strips_newline() {
        let mut buf = LineBuffer::default();
        write!(buf, " INFO blog_frontend: ").unwrap();
        writeln!(buf, "installed").unwrap();
        assert_eq!(
            buf.take_message().as_deref(),
            Some(" INFO blog_frontend: installed")
        );
        assert_eq!(buf.take_message(), None);
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let mut buf = LineBuffer::default();
        buf.write_all(&[b'o', b'k', 0xFF, b'\n']).unwrap();
        assert_eq!(buf.take_message().as_deref(), Some("ok\u{FFFD}"));
    }
}
