use std::{fmt, ops::Deref};

use non_empty_string::NonEmptyString;
use serde::{Serialize, Serializer, ser::SerializeSeq};

/// The editable-install marker excluded from requirement lists.
///
/// The comparison is exact: `-e .` (with a space) is not the marker.
pub const EDITABLE_MARKER: &str = "-e.";

/// A single dependency specifier.
///
/// A requirement is never empty, carries no surrounding whitespace, and is
/// never the editable-install marker it was parsed against. The specifier
/// itself is not validated; `numpy`, `requests>=2.0` and `not a package` are
/// all accepted and left for the packaging tool to reject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement(NonEmptyString);

impl Requirement {
    /// Creates a requirement from a raw line.
    ///
    /// Surrounding whitespace (including line terminators) is trimmed.
    /// Returns `None` if the trimmed line is empty or exactly equals
    /// `marker`.
    #[must_use]
    pub fn new(line: &str, marker: &str) -> Option<Self> {
        match classify_line(line, marker) {
            Line::Requirement(requirement) => Some(requirement),
            Line::Blank | Line::EditableMarker => None,
        }
    }

    /// Returns the specifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Whether this specifier looks like an editable install that the exact
    /// marker rule did not catch, such as `-e .` or `--editable .`.
    #[must_use]
    pub fn is_editable_variant(&self) -> bool {
        let s = self.as_str();
        s.starts_with("-e") || s.starts_with("-E") || s.starts_with("--editable")
    }
}

impl AsRef<str> for Requirement {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Deref for Requirement {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Requirement> for String {
    fn from(requirement: Requirement) -> Self {
        requirement.0.into_inner()
    }
}

/// The classification of one line of a requirements file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// A dependency specifier that is kept.
    Requirement(Requirement),
    /// Empty or whitespace-only.
    Blank,
    /// Exactly the editable-install marker.
    EditableMarker,
}

/// Classifies a raw line against the given marker.
#[must_use]
pub fn classify_line(line: &str, marker: &str) -> Line {
    let trimmed = line.trim();
    if trimmed == marker {
        // checked before emptiness so an empty marker still reads as blank
        if trimmed.is_empty() {
            return Line::Blank;
        }
        return Line::EditableMarker;
    }
    NonEmptyString::new(trimmed.to_string())
        .map_or(Line::Blank, |s| Line::Requirement(Requirement(s)))
}

/// Splits content into lines on `\r\n`, `\n` or a lone `\r`.
///
/// Line terminators are not included. A trailing terminator does not produce
/// an extra empty line.
pub fn split_lines(content: &str) -> impl Iterator<Item = &str> {
    let mut rest = content;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let end = rest.find(['\r', '\n']).unwrap_or(rest.len());
        let (line, tail) = rest.split_at(end);
        rest = tail
            .strip_prefix("\r\n")
            .or_else(|| tail.strip_prefix('\r'))
            .or_else(|| tail.strip_prefix('\n'))
            .unwrap_or(tail);
        Some(line)
    })
}

/// An ordered list of dependency specifiers.
///
/// Order follows the source lines. Duplicates are kept, and an empty list is
/// a valid result (zero dependencies).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementList {
    requirements: Vec<Requirement>,
}

impl RequirementList {
    /// Parses requirements from the full content of a requirements file.
    #[must_use]
    pub fn parse(content: &str, marker: &str) -> Self {
        Self::from_lines(split_lines(content), marker)
    }

    /// Parses requirements from an iterator of raw lines.
    #[must_use]
    pub fn from_lines<I, S>(lines: I, marker: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let requirements = lines
            .into_iter()
            .filter_map(|line| Requirement::new(line.as_ref(), marker))
            .collect();
        Self { requirements }
    }

    /// The number of requirements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    /// Whether there are no requirements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    /// Iterates over the requirements in file order.
    pub fn iter(&self) -> std::slice::Iter<'_, Requirement> {
        self.requirements.iter()
    }

    /// Returns the requirements as borrowed strings.
    #[must_use]
    pub fn as_strs(&self) -> Vec<&str> {
        self.iter().map(Requirement::as_str).collect()
    }

    /// Consumes the list, returning owned strings for the packaging tool.
    #[must_use]
    pub fn into_strings(self) -> Vec<String> {
        self.requirements.into_iter().map(String::from).collect()
    }
}

impl<'a> IntoIterator for &'a RequirementList {
    type Item = &'a Requirement;
    type IntoIter = std::slice::Iter<'a, Requirement>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for RequirementList {
    type Item = Requirement;
    type IntoIter = std::vec::IntoIter<Requirement>;

    fn into_iter(self) -> Self::IntoIter {
        self.requirements.into_iter()
    }
}

impl FromIterator<Requirement> for RequirementList {
    fn from_iter<T: IntoIterator<Item = Requirement>>(iter: T) -> Self {
        Self {
            requirements: iter.into_iter().collect(),
        }
    }
}

impl Serialize for RequirementList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for requirement in self {
            seq.serialize_element(requirement.as_str())?;
        }
        seq.end()
    }
}

/// Formats as a bracketed, quoted list: `['requests>=2.0', 'numpy']`.
impl fmt::Display for RequirementList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, requirement) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "'{requirement}'")?;
        }
        f.write_str("]")
    }
}
