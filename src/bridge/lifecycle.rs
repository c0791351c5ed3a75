use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum BridgePhase {
    Constructed = 0,
    Running = 1,
    Terminated = 2,
}

impl BridgePhase {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => BridgePhase::Constructed,
            1 => BridgePhase::Running,
            _ => BridgePhase::Terminated,
        }
    }
}

/// Shared view of a bridge's phase.
///
/// Every host operation and the blocking reader hold a clone; phases only
/// move forward, so a terminated bridge never comes back.
#[derive(Clone)]
pub struct Lifecycle {
    phase: Arc<AtomicU8>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            phase: Arc::new(AtomicU8::new(BridgePhase::Constructed as u8)),
        }
    }

    pub fn phase(&self) -> BridgePhase {
        BridgePhase::from_u8(self.phase.load(Ordering::SeqCst))
    }

    pub fn is_terminated(&self) -> bool {
        self.phase() == BridgePhase::Terminated
    }

    /// Move to `phase` unless the bridge is already past it.
    /// Returns `true` if the phase changed.
    pub fn advance(&self, phase: BridgePhase) -> bool {
        let previous = self.phase.fetch_max(phase as u8, Ordering::SeqCst);
        let changed = previous < phase as u8;
        if changed {
            tracing::info!(
                "Bridge phase: {:?} -> {:?}",
                BridgePhase::from_u8(previous),
                phase
            );
        }
        changed
    }

    pub fn terminate(&self) -> bool {
        self.advance(BridgePhase::Terminated)
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}
