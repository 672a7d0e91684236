//! Package-manager abstraction: detection, listing of pending updates and
//! selective application of whitelisted updates.

pub mod detector;
pub mod lister;
pub mod parser;
pub mod pending;
pub mod updater;

pub use detector::{PathProbe, WhichProbe, detect};
pub use lister::list_upgradable;
pub use pending::{PendingSet, Whitelist};
pub use updater::{UpdateOutcome, apply_updates, select_candidates};

use std::fmt;

/// The package-manager family in charge of the host. Resolved once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManagerKind {
    Apt,
    Dnf,
    Yum,
    Pacman,
    Zypper,
    None,
}

/// Probe order; earlier entries win when several binaries are present.
pub const DETECTION_ORDER: [ManagerKind; 5] = [
    ManagerKind::Apt,
    ManagerKind::Dnf,
    ManagerKind::Yum,
    ManagerKind::Pacman,
    ManagerKind::Zypper,
];

/// Fixed command lines for one manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagerSpec {
    /// Executable looked up on `PATH` during detection.
    pub binary: &'static str,
    /// Lists pending updates; `list[0]` is the program.
    pub list: &'static [&'static str],
    /// Updates a single package; the package name is appended. `update[0]` is the program.
    pub update: &'static [&'static str],
}

const APT: ManagerSpec = ManagerSpec {
    binary: "apt",
    list: &["apt", "list", "--upgradable"],
    update: &["apt-get", "install", "-y"],
};

const DNF: ManagerSpec = ManagerSpec {
    binary: "dnf",
    list: &["dnf", "check-update"],
    update: &["dnf", "upgrade", "-y"],
};

const YUM: ManagerSpec = ManagerSpec {
    binary: "yum",
    list: &["yum", "check-update"],
    update: &["yum", "update", "-y"],
};

const PACMAN: ManagerSpec = ManagerSpec {
    binary: "pacman",
    list: &["pacman", "-Qu"],
    update: &["pacman", "-S", "--noconfirm"],
};

const ZYPPER: ManagerSpec = ManagerSpec {
    binary: "zypper",
    list: &["zypper", "list-updates"],
    update: &["zypper", "--non-interactive", "update"],
};

impl ManagerKind {
    /// Command table entry, `None` for [`ManagerKind::None`].
    pub fn spec(self) -> Option<&'static ManagerSpec> {
        match self {
            ManagerKind::Apt => Some(&APT),
            ManagerKind::Dnf => Some(&DNF),
            ManagerKind::Yum => Some(&YUM),
            ManagerKind::Pacman => Some(&PACMAN),
            ManagerKind::Zypper => Some(&ZYPPER),
            ManagerKind::None => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ManagerKind::Apt => "apt",
            ManagerKind::Dnf => "dnf",
            ManagerKind::Yum => "yum",
            ManagerKind::Pacman => "pacman",
            ManagerKind::Zypper => "zypper",
            ManagerKind::None => "none",
        }
    }
}

impl fmt::Display for ManagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
