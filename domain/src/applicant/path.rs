//! Path value object

use serde::{Deserialize, Serialize};

/// A dotted path addressing one node in the applicant-data tree (Value Object)
///
/// Paths are written `applicant.name.first`. A leading JsonPath-style `$.`
/// (or a bare `$`) is accepted and stripped, since stored question paths use
/// both spellings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Path {
    path: String,
}

impl Path {
    /// Create a path from a dotted string, normalizing it.
    ///
    /// Normalization trims whitespace, strips a leading `$.`/`$`, and drops
    /// empty segments. The empty string yields the root path.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let trimmed = raw.trim();
        let without_prefix = trimmed
            .strip_prefix("$.")
            .or_else(|| trimmed.strip_prefix('$'))
            .unwrap_or(trimmed);

        let path = without_prefix
            .split('.')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(".");

        Self { path }
    }

    /// The root path, addressing the whole document.
    pub fn root() -> Self {
        Self {
            path: String::new(),
        }
    }

    /// The normalized dotted representation.
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// True for the root path.
    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// The segments of this path, in order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('.').filter(|s| !s.is_empty())
    }

    /// The last segment, or `None` for the root path.
    pub fn key_name(&self) -> Option<&str> {
        self.segments().last()
    }

    /// The path with the last segment removed, or `None` for the root path.
    pub fn parent(&self) -> Option<Path> {
        if self.is_root() {
            return None;
        }
        match self.path.rfind('.') {
            Some(idx) => Some(Path {
                path: self.path[..idx].to_string(),
            }),
            None => Some(Path::root()),
        }
    }

    /// Extend this path with one more segment.
    pub fn join(&self, segment: &str) -> Path {
        if self.is_root() {
            Path::new(segment)
        } else {
            Path::new(format!("{}.{}", self.path, segment))
        }
    }

    /// Segment-wise prefix check: `applicant.name` starts with `applicant`,
    /// but not with `app`.
    pub fn starts_with(&self, prefix: &Path) -> bool {
        if prefix.is_root() {
            return true;
        }
        let mut ours = self.segments();
        for expected in prefix.segments() {
            match ours.next() {
                Some(segment) if segment == expected => continue,
                _ => return false,
            }
        }
        true
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path)
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Path::new(s)
    }
}

impl From<String> for Path {
    fn from(s: String) -> Self {
        Path::new(s)
    }
}

impl From<Path> for String {
    fn from(p: Path) -> Self {
        p.path
    }
}

impl std::str::FromStr for Path {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Path::new(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_from_dotted_string() {
        let path = Path::new("applicant.name.first");
        assert_eq!(path.as_str(), "applicant.name.first");
        assert_eq!(
            path.segments().collect::<Vec<_>>(),
            vec!["applicant", "name", "first"]
        );
    }

    #[test]
    fn test_jsonpath_prefix_is_stripped() {
        let path = Path::new("$.applicant.birthdate");
        assert_eq!(path.as_str(), "applicant.birthdate");
        assert_eq!(Path::new("$.applicant.birthdate"), Path::new("applicant.birthdate"));
    }

    #[test]
    fn test_empty_string_is_root() {
        assert!(Path::new("").is_root());
        assert!(Path::new("   ").is_root());
        assert!(Path::new("$").is_root());
        assert_eq!(Path::new("").segments().count(), 0);
    }

    #[test]
    fn test_key_name_and_parent() {
        let path = Path::new("applicant.name.first");
        assert_eq!(path.key_name(), Some("first"));
        assert_eq!(path.parent(), Some(Path::new("applicant.name")));
        assert_eq!(Path::new("applicant").parent(), Some(Path::root()));
        assert_eq!(Path::root().parent(), None);
        assert_eq!(Path::root().key_name(), None);
    }

    #[test]
    fn test_join() {
        let path = Path::new("applicant.name");
        assert_eq!(path.join("first"), Path::new("applicant.name.first"));
        assert_eq!(Path::root().join("applicant"), Path::new("applicant"));
    }

    #[test]
    fn test_starts_with_is_segment_wise() {
        let path = Path::new("applicant.name.first");
        assert!(path.starts_with(&Path::new("applicant.name")));
        assert!(path.starts_with(&Path::new("applicant")));
        assert!(path.starts_with(&Path::root()));
        assert!(path.starts_with(&path.clone()));
        assert!(!path.starts_with(&Path::new("app")));
        assert!(!path.starts_with(&Path::new("applicant.address")));
    }

    #[test]
    fn test_serde_round_trips_as_string() {
        let path = Path::new("applicant.name");
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, "\"applicant.name\"");
        let back: Path = serde_json::from_str("\"$.applicant.name\"").unwrap();
        assert_eq!(back, path);
    }

    #[test]
    fn test_display() {
        assert_eq!(Path::new("a.b.c").to_string(), "a.b.c");
    }
}
