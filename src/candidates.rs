//! Line-delimited candidate files, the hand-off between stages.

use std::fs::File;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;

use crate::AppError;

/// Reads one identifier per line, skipping blank lines. A missing file
/// reads as `None`.
pub fn read_candidates(path: &Path) -> Result<Option<Vec<String>>, AppError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect(),
        )),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(AppError::io(path, e)),
    }
}

/// Truncates `path` and writes `lines` in order, duplicates included.
pub fn write_candidates(path: &Path, lines: &[String]) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| AppError::io(path, e))?;
    let mut out = BufWriter::new(file);
    for line in lines {
        writeln!(out, "{}", line).map_err(|e| AppError::io(path, e))?;
    }
    out.flush().map_err(|e| AppError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_candidates(&dir.path().join("absent.txt")).unwrap(), None);
    }

    #[test]
    fn write_truncates_and_keeps_order_and_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("candidates.txt");
        std::fs::write(&path, "stale-1\nstale-2\nstale-3\n").unwrap();

        let lines = vec![String::from("b"), String::from("a"), String::from("b")];
        write_candidates(&path, &lines).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "b\na\nb\n");
        assert_eq!(read_candidates(&path).unwrap(), Some(lines));
    }

    #[test]
    fn blank_lines_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("candidates.txt");
        std::fs::write(&path, "\n  arn-1  \n\n\narn-2").unwrap();
        assert_eq!(
            read_candidates(&path).unwrap(),
            Some(vec![String::from("arn-1"), String::from("arn-2")])
        );
    }
}
