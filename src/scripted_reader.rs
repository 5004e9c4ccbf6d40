use std::collections::VecDeque;
use std::io::{self, Read};

pub struct ScriptedReader {
    chunks: VecDeque<Vec<u8>>,
}

impl ScriptedReader {
    pub fn new(chunks: Vec<Vec<u8>>) -> Self {
        Self {
            chunks: chunks.into(),
        }
    }
}

impl Read for ScriptedReader {
    /// Returns at most one scripted chunk per call. A chunk larger than `buf` is split, with the
    /// remainder served by the next call.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let chunk = match self.chunks.front_mut() {
            None => return Ok(0),
            Some(chunk) => chunk,
        };
        let n = chunk.len().min(buf.len());
        buf[..n].copy_from_slice(&chunk[..n]);
        if n == chunk.len() {
            self.chunks.pop_front();
        } else {
            chunk.drain(..n);
        }
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serves_chunks_separately() {
        let mut reader = ScriptedReader::new(vec![b"ab".to_vec(), b"cde".to_vec()]);
        let mut buf = [0u8; 8];
        assert_eq!(reader.read(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], b"ab");
        assert_eq!(reader.read(&mut buf[..2]).unwrap(), 2);
        assert_eq!(&buf[..2], b"cd");
        assert_eq!(reader.read(&mut buf).unwrap(), 1);
        assert_eq!(&buf[..1], b"e");
        assert_eq!(reader.read(&mut buf).unwrap(), 0);
    }
}
