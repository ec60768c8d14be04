//! Reading reporter logs from disk or stdin

use crate::error::{Error, Result};
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Path argument that selects standard input
pub const STDIN_PATH: &str = "-";

/// Read all lines from a reader
///
/// Invalid UTF-8 is replaced rather than rejected, so stray binary output
/// from a test only spoils its own line.
pub fn read_lines<R: Read>(reader: R, path: &Path) -> Result<Vec<String>> {
    let mut reader = BufReader::new(reader);
    let mut lines = Vec::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| Error::Read {
                path: path.to_path_buf(),
                source,
            })?;
        if read == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        lines.push(line.trim_end_matches(['\n', '\r']).to_string());
    }
    Ok(lines)
}

/// Read a log file, or stdin when `path` is `-`
pub fn load_lines(path: &Path) -> Result<Vec<String>> {
    if path.as_os_str() == STDIN_PATH {
        return read_lines(std::io::stdin().lock(), path);
    }
    let file = std::fs::File::open(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    read_lines(file, path)
}
