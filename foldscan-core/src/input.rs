//! Input abstraction for scan text
//!
//! The parser works on a single in-memory string; this type lets
//! callers hand over text directly, point at a file, or stream from a
//! reader (stdin) without the parser caring which.

use crate::error::{CoreError, Result};
use std::fs;
use std::io::Read;
use std::path::PathBuf;

/// A source of scan text
pub enum Input {
    /// Text already in memory
    Text(String),
    /// Path to a UTF-8 text file
    File(PathBuf),
    /// An arbitrary reader (stdin, pipe)
    Reader(Box<dyn Read + Send>),
}

impl std::fmt::Debug for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Input::Text(text) => f
                .debug_tuple("Text")
                .field(&format!("<{} bytes>", text.len()))
                .finish(),
            Input::File(path) => f.debug_tuple("File").field(path).finish(),
            Input::Reader(_) => f.debug_tuple("Reader").field(&"<Reader>").finish(),
        }
    }
}

impl Input {
    /// Create input from a text string
    pub fn from_text<S: Into<String>>(text: S) -> Self {
        Input::Text(text.into())
    }

    /// Create input from a file path
    pub fn from_file<P: Into<PathBuf>>(path: P) -> Self {
        Input::File(path.into())
    }

    /// Create input from a reader
    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
        Input::Reader(Box::new(reader))
    }

    /// Resolve the input to its full text
    pub fn to_text(self) -> Result<String> {
        match self {
            Input::Text(text) => Ok(text),
            Input::File(path) => fs::read_to_string(&path)
                .map_err(|e| CoreError::Io(format!("failed to read file {path:?}: {e}"))),
            Input::Reader(mut reader) => {
                let mut buffer = Vec::new();
                reader
                    .read_to_end(&mut buffer)
                    .map_err(|e| CoreError::Io(format!("failed to read from stream: {e}")))?;
                String::from_utf8(buffer)
                    .map_err(|e| CoreError::Encoding(format!("invalid UTF-8 from stream: {e}")))
            }
        }
    }
}

impl From<String> for Input {
    fn from(text: String) -> Self {
        Input::Text(text)
    }
}

impl From<&str> for Input {
    fn from(text: &str) -> Self {
        Input::Text(text.to_string())
    }
}

impl From<PathBuf> for Input {
    fn from(path: PathBuf) -> Self {
        Input::File(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_text_input_round_trip() {
        let input = Input::from_text("Window 10\n");
        assert_eq!(input.to_text().unwrap(), "Window 10\n");
    }

    #[test]
    fn test_file_input() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "Window 5").unwrap();

        let input = Input::from_file(file.path());
        assert_eq!(input.to_text().unwrap(), "Window 5");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let input = Input::from_file("/nonexistent/scan.txt");
        let err = input.to_text().unwrap_err();
        assert!(matches!(err, CoreError::Io(_)));
    }

    #[test]
    fn test_reader_input() {
        let input = Input::from_reader(std::io::Cursor::new(b"Window 20\n".to_vec()));
        assert_eq!(input.to_text().unwrap(), "Window 20\n");
    }

    #[test]
    fn test_reader_rejects_invalid_utf8() {
        let input = Input::from_reader(std::io::Cursor::new(vec![0xff, 0xfe, 0xfd]));
        let err = input.to_text().unwrap_err();
        assert!(matches!(err, CoreError::Encoding(_)));
    }
}
