use crate::utils::error::{Result, TrackerError};
use std::fs;
use std::path::{Path, PathBuf};

/// One URL per line; blank lines skipped, lines trimmed.
pub fn parse_url_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Reads the batch file. A missing file is an `InputError`; an empty one
/// yields no URLs and a warning.
pub fn read_urls_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let full_path = absolute(path);

    let content = fs::read_to_string(path).map_err(|e| TrackerError::InputError {
        path: full_path.display().to_string(),
        message: e.to_string(),
    })?;

    println!("Reading from {}", full_path.display());
    let urls = parse_url_list(&content);
    if urls.is_empty() {
        tracing::warn!("{} is empty or contains no URLs", full_path.display());
        println!("Warning: File is empty or contains no valid URLs");
    }

    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_url_list_skips_blank_lines() {
        let content = "https://a.example/1\n\n   \n  https://b.example/2  \r\nhttps://c.example/3";

        assert_eq!(
            parse_url_list(content),
            vec![
                "https://a.example/1".to_string(),
                "https://b.example/2".to_string(),
                "https://c.example/3".to_string(),
            ]
        );
    }

    #[test]
    fn test_read_urls_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "https://a.example/1").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "https://b.example/2").unwrap();

        let urls = read_urls_from_file(file.path()).unwrap();
        assert_eq!(urls.len(), 2);
        assert_eq!(urls[1], "https://b.example/2");
    }

    #[test]
    fn test_whitespace_only_file_yields_no_urls() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "  \n\t\n\n").unwrap();

        let urls = read_urls_from_file(file.path()).unwrap();
        assert!(urls.is_empty());
    }

    #[test]
    fn test_missing_file_is_input_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("jobs.txt");

        match read_urls_from_file(&missing) {
            Err(TrackerError::InputError { path, .. }) => assert!(path.ends_with("jobs.txt")),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
