use std::collections::{BTreeSet, HashSet};

/// Package names with an upgrade available, distinct and in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingSet {
    names: BTreeSet<String>,
}

impl PendingSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for PendingSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Operator-configured names eligible for unattended update.
///
/// Keeps the configured order; membership is exact and case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Whitelist {
    entries: Vec<String>,
    lookup: HashSet<String>,
}

impl Whitelist {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries: Vec<String> = entries.into_iter().map(Into::into).collect();
        let lookup = entries.iter().cloned().collect();
        Self { entries, lookup }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup.contains(name)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_set_dedups_and_sorts() {
        let set: PendingSet = ["curl", "bash", "curl", "Zlib", "apt"].into_iter().collect();
        assert_eq!(set.to_vec(), ["Zlib", "apt", "bash", "curl"]);
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn whitelist_is_case_sensitive() {
        let whitelist = Whitelist::new(["openssl", "curl"]);
        assert!(whitelist.contains("curl"));
        assert!(!whitelist.contains("Curl"));
        assert_eq!(whitelist.entries(), ["openssl", "curl"]);
    }
}
