use super::{ManagerKind, PendingSet, parser::parser_for};
use crate::agents::command_runner::CommandRunner;
use tracing::{debug, warn};

/// Runs the manager's listing command and parses its standard output.
///
/// Never fails: a command that cannot be run yields an empty set, which the
/// caller reports as "nothing to update". The exit status is not consulted
/// because `check-update` exits 100 when updates exist and `pacman -Qu`
/// exits 1 when none do.
pub fn list_upgradable(kind: ManagerKind, runner: &dyn CommandRunner) -> PendingSet {
    let (Some(spec), Some(parser)) = (kind.spec(), parser_for(kind)) else {
        return PendingSet::new();
    };
    let Some((program, args)) = spec.list.split_first() else {
        return PendingSet::new();
    };

    match runner.run(program, args) {
        Ok(output) => {
            let pending = parser.parse(&output.stdout);
            debug!(
                manager = %kind,
                status = ?output.status,
                count = pending.len(),
                "parsed pending updates"
            );
            if pending.is_empty() && !output.stdout.trim().is_empty() {
                debug!(manager = %kind, "listing produced no recognisable package rows");
            }
            pending
        }
        Err(e) => {
            warn!(manager = %kind, "could not list pending updates: {e}");
            PendingSet::new()
        }
    }
}
