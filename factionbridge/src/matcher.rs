//! Author fingerprints and the strategies used to compare them against what an
//! installed plugin declares.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One known author set of a provider, tagged with the version it was seen on.
///
/// The author set is what identifies a plugin. The version label is kept for
/// diagnostics only and never takes part in matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorConfiguration {
    pub version: String,
    pub authors: BTreeSet<String>,
}

impl AuthorConfiguration {
    pub fn new<I, S>(version: impl Into<String>, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            version: version.into(),
            authors: authors.into_iter().map(Into::into).collect(),
        }
    }

    /// Exact set equality with `installed`. Order and duplicates are ignored.
    pub fn matches(&self, installed: &[String]) -> bool {
        matches(self, installed)
    }

    /// See [`partial_match`].
    pub fn coverage(&self, installed: &[String]) -> Vec<bool> {
        let provider: Vec<&str> = self.authors.iter().map(String::as_str).collect();
        partial_match(&provider, installed)
    }
}

/// Exact set equality between a fingerprint and the installed author list.
pub fn matches(fingerprint: &AuthorConfiguration, installed: &[String]) -> bool {
    let installed: BTreeSet<&str> = installed.iter().map(String::as_str).collect();
    fingerprint.authors.len() == installed.len()
        && fingerprint
            .authors
            .iter()
            .all(|author| installed.contains(author.as_str()))
}

/// For each provider author, in sorted order, whether it appears anywhere in
/// the installed list.
pub fn partial_match<S: AsRef<str>>(provider_authors: &[S], installed: &[String]) -> Vec<bool> {
    let mut provider: Vec<&str> = provider_authors.iter().map(AsRef::as_ref).collect();
    provider.sort_unstable();

    let mut installed: Vec<&str> = installed.iter().map(String::as_str).collect();
    installed.sort_unstable();

    provider
        .into_iter()
        .map(|author| installed.binary_search(&author).is_ok())
        .collect()
}

/// True iff `vector` is non-empty and every entry is true.
pub fn full_coverage(vector: &[bool]) -> bool {
    !vector.is_empty() && vector.iter().all(|&hit| hit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_exact_match_ignores_order_and_duplicates() {
        let fp = AuthorConfiguration::new("1.0", ["X", "Y"]);
        assert!(fp.matches(&names(&["Y", "X"])));
        assert!(fp.matches(&names(&["X", "Y", "X"])));
        assert!(!fp.matches(&names(&["X"])));
        assert!(!fp.matches(&names(&["X", "Y", "Z"])));
    }

    #[test]
    fn test_version_is_not_part_of_match() {
        let a = AuthorConfiguration::new("1.0", ["X"]);
        let b = AuthorConfiguration::new("2.0", ["X"]);
        let installed = names(&["X"]);
        assert_eq!(a.matches(&installed), b.matches(&installed));
    }

    #[test]
    fn test_partial_match_is_sorted_by_provider_author() {
        let vector = partial_match(&["c", "a", "b"], &names(&["b", "z", "a"]));
        assert_eq!(vector, vec![true, true, false]);
    }

    #[test]
    fn test_coverage_of_superset() {
        let fp = AuthorConfiguration::new("1.0", ["X", "Y"]);
        let vector = fp.coverage(&names(&["X", "Y", "Z"]));
        assert!(full_coverage(&vector));
        assert!(!fp.matches(&names(&["X", "Y", "Z"])));
    }

    #[test]
    fn test_full_coverage() {
        assert!(full_coverage(&[true, true]));
        assert!(!full_coverage(&[true, false]));
        assert!(!full_coverage(&[]));
    }

    #[test]
    fn test_empty_fingerprint_matches_only_no_authors() {
        let fp = AuthorConfiguration::new("1.0", Vec::<String>::new());
        assert!(fp.matches(&[]));
        assert!(!fp.matches(&names(&["X"])));
        assert!(!full_coverage(&fp.coverage(&names(&["X"]))));
    }
}
