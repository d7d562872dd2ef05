use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// The set of approved base images, loaded from a JSON document of shape
/// `{"images": ["cgr.dev/chainguard/go:latest", ...]}`.
///
/// Membership is exact and case-sensitive: no tag normalization, no registry
/// aliasing, no wildcards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AllowList {
    images: BTreeSet<String>,
}

/// Failure to obtain a usable allow-list. Fatal for the whole run: nothing
/// is scanned until the allow-list loads.
#[derive(Debug, thiserror::Error)]
pub enum AllowListError {
    #[error("failed to read allow-list file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("allow-list file '{path}' is not a valid allow-list document: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl AllowList {
    /// Load an allow-list from a JSON file.
    pub fn load(path: &Path) -> Result<AllowList, AllowListError> {
        let content = std::fs::read_to_string(path).map_err(|source| AllowListError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| AllowListError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Exact, case-sensitive membership test. Pure predicate.
    pub fn contains(&self, image: &str) -> bool {
        self.images.contains(image)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Starter allow-list document for `basecheck init`.
    pub fn starter_document() -> String {
        r#"{
  "images": [
    "cgr.dev/chainguard/go:latest",
    "cgr.dev/chainguard/node:latest",
    "cgr.dev/chainguard/python:latest",
    "cgr.dev/chainguard/static:latest"
  ]
}
"#
        .to_string()
    }
}

impl FromIterator<String> for AllowList {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        AllowList {
            images: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn allowlist(images: &[&str]) -> AllowList {
        images.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_membership_exact_and_case_sensitive() {
        let list = allowlist(&["ubuntu:16.04"]);
        assert!(list.contains("ubuntu:16.04"));
        assert!(!list.contains("Ubuntu:16.04"));
        assert!(!list.contains("ubuntu:16.05"));
        assert!(!list.contains("ubuntu:16.04 "));
    }

    #[test]
    fn test_membership_idempotent() {
        let list = allowlist(&["ubuntu:16.04"]);
        assert_eq!(list.contains("ubuntu:16.04"), list.contains("ubuntu:16.04"));
        assert_eq!(list.contains("debian:12"), list.contains("debian:12"));
    }

    #[test]
    fn test_load_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"images": ["cgr.dev/chainguard/go:latest"]}}"#).unwrap();

        let list = AllowList::load(file.path()).unwrap();
        assert_eq!(list.len(), 1);
        assert!(list.contains("cgr.dev/chainguard/go:latest"));
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let err = AllowList::load(Path::new("/nonexistent/allowed-images.json")).unwrap_err();
        assert!(matches!(err, AllowListError::Read { .. }));
    }

    #[test]
    fn test_load_invalid_json_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json at all").unwrap();

        let err = AllowList::load(file.path()).unwrap_err();
        assert!(matches!(err, AllowListError::Parse { .. }));
    }

    #[test]
    fn test_load_missing_images_key_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"allowed": ["ubuntu:16.04"]}}"#).unwrap();

        let err = AllowList::load(file.path()).unwrap_err();
        assert!(matches!(err, AllowListError::Parse { .. }));
    }

    #[test]
    fn test_starter_document_round_trips() {
        let list: AllowList = serde_json::from_str(&AllowList::starter_document()).unwrap();
        assert!(!list.is_empty());
        assert!(list.contains("cgr.dev/chainguard/go:latest"));
    }
}
