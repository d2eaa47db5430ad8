//! Command implementations.

pub mod chunks;
pub mod config;
pub mod extract;

pub use self::chunks::execute_chunks;
pub use self::config::execute_config;
pub use self::extract::execute_extract;

use crate::error::Result;
use std::io::Read;

/// Marker for standard input in file arguments.
pub const STDIN: &str = "-";

/// Read a log from a file, or from stdin for `-`.
///
/// Invalid UTF-8 sequences are replaced rather than rejected; CI logs often
/// carry stray bytes from tool output.
pub fn read_input(source: &str) -> Result<String> {
    let bytes = if source == STDIN {
        let mut buf = Vec::new();
        std::io::stdin().lock().read_to_end(&mut buf)?;
        buf
    } else {
        std::fs::read(source)?
    };

    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}

/// Name shown for a source in output.
pub fn display_name(source: &str) -> &str {
    if source == STDIN {
        "<stdin>"
    } else {
        source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_input_replaces_invalid_utf8() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"ok\n\xffbad\n").unwrap();

        let text = read_input(file.path().to_str().unwrap()).unwrap();
        assert_eq!(text, "ok\n\u{FFFD}bad\n");
    }

    #[test]
    fn test_read_input_missing_file() {
        assert!(read_input("/nonexistent/build.log").is_err());
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("-"), "<stdin>");
        assert_eq!(display_name("build.log"), "build.log");
    }
}
