use super::{ManagerKind, PendingSet, Whitelist};
use crate::agents::command_runner::CommandRunner;
use indicatif::ProgressBar;
use tracing::{debug, info, warn};

/// Result of one attempted package update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub name: String,
    pub succeeded: bool,
}

impl UpdateOutcome {
    fn new(name: &str, succeeded: bool) -> Self {
        Self {
            name: name.to_string(),
            succeeded,
        }
    }
}

/// Pending packages that are also whitelisted, in pending (ascending) order.
pub fn select_candidates(pending: &PendingSet, whitelist: &Whitelist) -> Vec<String> {
    pending
        .iter()
        .filter(|name| whitelist.contains(name))
        .map(str::to_string)
        .collect()
}

/// Updates each candidate in order, one invocation per package, ticking `pb`
/// once per attempt.
///
/// Returns exactly one outcome per candidate. A failed package never stops
/// the remaining ones and nothing is retried.
pub fn apply_updates(
    kind: ManagerKind,
    candidates: &[String],
    runner: &dyn CommandRunner,
    pb: &ProgressBar,
) -> Vec<UpdateOutcome> {
    let Some((program, prefix)) = kind.spec().and_then(|spec| spec.update.split_first()) else {
        if !candidates.is_empty() {
            warn!("no package manager available, {} update(s) skipped", candidates.len());
        }
        return candidates
            .iter()
            .map(|name| UpdateOutcome::new(name, false))
            .collect();
    };

    let mut outcomes = Vec::with_capacity(candidates.len());
    for name in candidates {
        pb.set_message(format!("Updating {}", name));

        let mut args: Vec<&str> = prefix.to_vec();
        args.push(name);

        let succeeded = match runner.run(program, &args) {
            Ok(output) if output.success() => {
                info!(package = %name, "updated");
                true
            }
            Ok(output) => {
                warn!(package = %name, status = ?output.status, "update failed");
                false
            }
            Err(e) => {
                warn!(package = %name, "update could not run: {e}");
                false
            }
        };

        debug!(package = %name, succeeded, "update attempt recorded");
        outcomes.push(UpdateOutcome::new(name, succeeded));
        pb.inc(1);
    }
    pb.finish_and_clear();

    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package_manager::testing::StubRunner;

    fn apply(
        kind: ManagerKind,
        candidates: &[String],
        runner: &StubRunner,
    ) -> Vec<UpdateOutcome> {
        apply_updates(kind, candidates, runner, &ProgressBar::hidden())
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_candidates_invoke_nothing() {
        let runner = StubRunner::new();
        let outcomes = apply(ManagerKind::Apt, &[], &runner);
        assert!(outcomes.is_empty());
        assert!(runner.call_lines().is_empty());
    }

    #[test]
    fn one_outcome_per_candidate_in_order() {
        let runner = StubRunner::new();
        let candidates = names(&["zsh", "bash", "curl"]);
        let outcomes = apply(ManagerKind::Dnf, &candidates, &runner);

        let order: Vec<_> = outcomes.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(order, ["zsh", "bash", "curl"]);
        assert!(outcomes.iter().all(|o| o.succeeded));
        assert_eq!(
            runner.call_lines(),
            ["dnf upgrade -y zsh", "dnf upgrade -y bash", "dnf upgrade -y curl"]
        );
    }

    #[test]
    fn single_failure_does_not_abort_batch() {
        let runner = StubRunner::new()
            .respond("pacman -S --noconfirm glibc", 1, "")
            .unavailable("pacman -S --noconfirm zstd");
        let candidates = names(&["bash", "glibc", "linux", "zstd"]);
        let outcomes = apply(ManagerKind::Pacman, &candidates, &runner);

        assert_eq!(outcomes.len(), 4);
        assert_eq!(runner.call_lines().len(), 4);
        let failed: Vec<_> = outcomes
            .iter()
            .filter(|o| !o.succeeded)
            .map(|o| o.name.as_str())
            .collect();
        assert_eq!(failed, ["glibc", "zstd"]);
    }

    #[test]
    fn exactly_one_failure_among_many() {
        let runner = StubRunner::new().respond("zypper --non-interactive update vim", 4, "");
        let candidates = names(&["bash", "vim", "zlib"]);
        let outcomes = apply(ManagerKind::Zypper, &candidates, &runner);

        assert_eq!(outcomes.iter().filter(|o| !o.succeeded).count(), 1);
        assert_eq!(outcomes.iter().filter(|o| o.succeeded).count(), 2);
        assert!(!outcomes[1].succeeded);
    }

    #[test]
    fn manager_specific_update_commands() {
        let cases = [
            (ManagerKind::Apt, "apt-get install -y curl"),
            (ManagerKind::Dnf, "dnf upgrade -y curl"),
            (ManagerKind::Yum, "yum update -y curl"),
            (ManagerKind::Pacman, "pacman -S --noconfirm curl"),
            (ManagerKind::Zypper, "zypper --non-interactive update curl"),
        ];
        for (kind, expected) in cases {
            let runner = StubRunner::new();
            apply(kind, &names(&["curl"]), &runner);
            assert_eq!(runner.call_lines(), [expected]);
        }
    }

    #[test]
    fn none_manager_fails_every_candidate_without_invoking() {
        let runner = StubRunner::new();
        let outcomes = apply(ManagerKind::None, &names(&["a", "b"]), &runner);
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| !o.succeeded));
        assert!(runner.call_lines().is_empty());
    }

    #[test]
    fn only_whitelisted_pending_packages_are_updated() {
        let pending: PendingSet = ["bash", "curl"].into_iter().collect();
        let whitelist = Whitelist::new(["curl", "openssl"]);
        let candidates = select_candidates(&pending, &whitelist);
        assert_eq!(candidates, ["curl"]);

        let runner = StubRunner::new();
        let outcomes = apply(ManagerKind::Apt, &candidates, &runner);
        assert_eq!(outcomes, [UpdateOutcome::new("curl", true)]);
        assert_eq!(runner.call_lines(), ["apt-get install -y curl"]);
    }

    #[test]
    fn empty_whitelist_selects_nothing() {
        let pending: PendingSet = ["bash"].into_iter().collect();
        assert!(select_candidates(&pending, &Whitelist::default()).is_empty());
    }
}
