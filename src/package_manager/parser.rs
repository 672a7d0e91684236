//! Reduces each manager's "pending updates" report to bare package names.
//!
//! Every parser is a pure `text -> PendingSet` function; lines that do not
//! look like a package row are dropped rather than reported.

use super::{ManagerKind, PendingSet};
use regex::Regex;
use std::sync::LazyLock;

/// Banner lines printed by `dnf`/`yum check-update` around the package table.
static RPM_BANNER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(Last metadata expiration|Obsoleting Packages|Loaded plugins)")
        .expect("banner pattern is valid")
});

pub trait ListingParser: Send + Sync {
    fn parse(&self, output: &str) -> PendingSet;
}

/// `apt list --upgradable`: `name/repo version arch [upgradable from: ...]`
/// after a `Listing...` header line.
#[derive(Debug, Default)]
pub struct AptParser;

impl ListingParser for AptParser {
    fn parse(&self, output: &str) -> PendingSet {
        output
            .lines()
            .skip(1)
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter_map(|line| line.split_once('/').map(|(name, _)| name))
            .filter(|name| !name.is_empty())
            .collect()
    }
}

/// `dnf check-update` and `yum check-update`: column-aligned rows mixed with
/// banner lines. Best effort: unknown banners are only dropped when their
/// first token starts with `=`.
#[derive(Debug, Default)]
pub struct RpmParser;

impl ListingParser for RpmParser {
    fn parse(&self, output: &str) -> PendingSet {
        output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !RPM_BANNER.is_match(line))
            .filter_map(|line| line.split_whitespace().next())
            .filter(|token| !token.starts_with('='))
            .collect()
    }
}

/// `pacman -Qu`: `name oldver -> newver`
#[derive(Debug, Default)]
pub struct PacmanParser;

impl ListingParser for PacmanParser {
    fn parse(&self, output: &str) -> PendingSet {
        output
            .lines()
            .filter_map(|line| line.split_whitespace().next())
            .collect()
    }
}

/// `zypper list-updates`: pipe-delimited table, name in the third column.
#[derive(Debug, Default)]
pub struct ZypperParser;

impl ListingParser for ZypperParser {
    fn parse(&self, output: &str) -> PendingSet {
        output
            .lines()
            .filter_map(|line| {
                let fields: Vec<&str> = line.split('|').collect();
                (fields.len() >= 3).then(|| fields[2].trim())
            })
            // first table row is the column header
            .skip(1)
            .filter(|name| !name.is_empty())
            .collect()
    }
}

/// Parser for the given manager; `None` has nothing to parse.
pub fn parser_for(kind: ManagerKind) -> Option<&'static dyn ListingParser> {
    match kind {
        ManagerKind::Apt => Some(&AptParser),
        ManagerKind::Dnf | ManagerKind::Yum => Some(&RpmParser),
        ManagerKind::Pacman => Some(&PacmanParser),
        ManagerKind::Zypper => Some(&ZypperParser),
        ManagerKind::None => None,
    }
}
