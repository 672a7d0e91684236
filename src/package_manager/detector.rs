use super::{DETECTION_ORDER, ManagerKind};
use tracing::debug;

/// Answers whether an executable resolves on the search path.
pub trait PathProbe {
    fn is_available(&self, binary: &str) -> bool;
}

/// Resolves binaries against the process `PATH`.
#[derive(Debug, Default)]
pub struct WhichProbe;

impl PathProbe for WhichProbe {
    fn is_available(&self, binary: &str) -> bool {
        match which::which(binary) {
            Ok(path) => {
                debug!("found '{}' at {}", binary, path.display());
                true
            }
            Err(_) => false,
        }
    }
}

/// First manager in [`DETECTION_ORDER`] whose binary resolves, or [`ManagerKind::None`].
pub fn detect(probe: &dyn PathProbe) -> ManagerKind {
    DETECTION_ORDER
        .into_iter()
        .find(|kind| {
            kind.spec()
                .is_some_and(|spec| probe.is_available(spec.binary))
        })
        .unwrap_or(ManagerKind::None)
}
