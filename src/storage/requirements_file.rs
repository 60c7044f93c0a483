//! Reading requirement lists from disk
//!
//! [`load`] is the strict form and returns a [`LoadError`] when the file
//! cannot be read. [`load_or_empty`] is the soft form used by build entry
//! points: an unreadable file is logged and treated as declaring zero
//! dependencies.

use std::{
    fs::File,
    io::{self, BufReader, Read},
    path::{Path, PathBuf},
};

use crate::domain::{
    Line, RequirementList,
    requirement::{classify_line, split_lines},
};

/// Loads the requirement list from the file at `path`.
///
/// Lines end at `\r\n`, `\n` or a lone `\r`. They are trimmed; blank lines
/// and lines exactly equal to `marker` are skipped. The file handle is
/// released before returning on every path.
///
/// # Errors
///
/// Returns [`LoadError::Unreadable`] if the file does not exist, cannot be
/// opened, or is not valid UTF-8.
pub fn load(path: &Path, marker: &str) -> Result<RequirementList, LoadError> {
    let content = read(path)?;
    let requirements = RequirementList::parse(&content, marker);
    tracing::debug!(
        "Loaded {} requirements from {}",
        requirements.len(),
        path.display()
    );
    Ok(requirements)
}

/// Loads the requirement list, substituting an empty list if the file cannot
/// be read.
///
/// The failure is reported as a warning and never propagated.
#[must_use]
pub fn load_or_empty(path: &Path, marker: &str) -> RequirementList {
    load(path, marker).unwrap_or_else(|e| {
        tracing::warn!("{e}");
        RequirementList::default()
    })
}

/// Reads every line of the file with its 1-based line number and
/// classification.
///
/// # Errors
///
/// Returns [`LoadError::Unreadable`] under the same conditions as [`load`].
pub fn inspect(path: &Path, marker: &str) -> Result<Vec<(usize, String, Line)>, LoadError> {
    let content = read(path)?;
    let lines = split_lines(&content)
        .enumerate()
        .map(|(i, line)| (i + 1, line.to_string(), classify_line(line, marker)))
        .collect();
    Ok(lines)
}

/// Reads the whole file as UTF-8. The handle is dropped before returning.
fn read(path: &Path) -> Result<String, LoadError> {
    let mut content = String::new();
    File::open(path)
        .map(BufReader::new)
        .and_then(|mut reader| reader.read_to_string(&mut content))
        .map_err(|source| LoadError::unreadable(path, source))?;
    Ok(content)
}

/// The requirements file could not be read.
///
/// Missing files and unreadable files are the same kind of error; use
/// [`LoadError::is_not_found`] to tell them apart.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The requirements file was not found or could not be read.
    #[error("Failed to read requirements file {}: {source}", path.display())]
    Unreadable {
        /// The path that was read.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
}

impl LoadError {
    fn unreadable(path: &Path, source: io::Error) -> Self {
        Self::Unreadable {
            path: path.to_path_buf(),
            source,
        }
    }

    /// The path that could not be read.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Unreadable { path, .. } => path,
        }
    }

    /// Whether the file does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Unreadable { source, .. } => source.kind() == io::ErrorKind::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::{NamedTempFile, TempDir};

    use super::*;
    use crate::domain::EDITABLE_MARKER;

    fn requirements_file(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("failed to create temp file");
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn loads_in_file_order() {
        let file = requirements_file(b"requests>=2.0\n\n-e.\n  \nnumpy\n");
        let list = load(file.path(), EDITABLE_MARKER).unwrap();
        assert_eq!(list.as_strs(), vec!["requests>=2.0", "numpy"]);
    }

    #[test]
    fn empty_file_is_empty_list() {
        let file = requirements_file(b"");
        assert!(load(file.path(), EDITABLE_MARKER).unwrap().is_empty());
    }

    #[test]
    fn loading_twice_is_identical() {
        let file = requirements_file(b"pandas\npymongo\ncertifi\n");
        let first = load(file.path(), EDITABLE_MARKER).unwrap();
        let second = load(file.path(), EDITABLE_MARKER).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn lone_carriage_return_endings() {
        let file = requirements_file(b"numpy\r-e.\rpandas\r");
        let list = load(file.path(), EDITABLE_MARKER).unwrap();
        assert_eq!(list.as_strs(), vec!["numpy", "pandas"]);

        let lines = inspect(file.path(), EDITABLE_MARKER).unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].2, Line::EditableMarker);
    }

    #[test]
    fn missing_file_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("requirements.txt");

        let error = load(&missing, EDITABLE_MARKER).unwrap_err();
        assert!(error.is_not_found());
        assert_eq!(error.path(), missing);
        assert!(error.to_string().contains("requirements.txt"));
    }

    #[test]
    fn missing_file_soft_fails_to_empty() {
        let tmp = TempDir::new().unwrap();
        let list = load_or_empty(&tmp.path().join("requirements.txt"), EDITABLE_MARKER);
        assert!(list.is_empty());
    }

    #[test]
    fn directory_is_unreadable() {
        let tmp = TempDir::new().unwrap();
        assert!(load(tmp.path(), EDITABLE_MARKER).is_err());
        assert!(load_or_empty(tmp.path(), EDITABLE_MARKER).is_empty());
    }

    #[test]
    fn invalid_utf8_is_unreadable() {
        let file = requirements_file(b"numpy\n\xff\xfe\n");
        let error = load(file.path(), EDITABLE_MARKER).unwrap_err();
        assert!(!error.is_not_found());
    }

    #[test]
    fn inspect_reports_every_line() {
        let file = requirements_file(b"flask\n\n-e.\n-e .\n");
        let lines = inspect(file.path(), EDITABLE_MARKER).unwrap();

        let kinds: Vec<_> = lines
            .iter()
            .map(|(number, raw, line)| (*number, raw.as_str(), line.clone()))
            .collect();

        assert_eq!(kinds.len(), 4);
        assert_eq!(kinds[0].0, 1);
        assert!(matches!(kinds[0].2, Line::Requirement(_)));
        assert_eq!(kinds[1].2, Line::Blank);
        assert_eq!(kinds[2].2, Line::EditableMarker);
        assert_eq!(kinds[3].1, "-e .");
        assert!(matches!(kinds[3].2, Line::Requirement(ref r) if r.is_editable_variant()));
    }
}
