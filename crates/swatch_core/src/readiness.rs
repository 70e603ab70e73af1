//! Startup readiness tracking
//!
//! Each controller that must be initialized before dependent work runs is
//! registered as a requirement. The gate opens once, when the last required
//! component reports ready.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

/// Gate that opens when every required component has signaled ready
#[derive(Debug, Default)]
pub struct ReadinessGate {
    required: FxHashSet<String>,
    ready: FxHashSet<String>,
    opened: bool,
}

impl ReadinessGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component that must report ready before the gate opens
    ///
    /// Requirements added after the gate opened are ignored.
    pub fn require(&mut self, component: impl Into<String>) {
        if self.opened {
            tracing::warn!("ReadinessGate: late requirement ignored, gate already open");
            return;
        }
        self.required.insert(component.into());
    }

    /// Record that a component finished initializing
    ///
    /// Returns true only for the call that opens the gate.
    pub fn mark_ready(&mut self, component: &str) -> bool {
        if self.opened {
            return false;
        }
        if !self.required.contains(component) {
            tracing::debug!("ReadinessGate: {} is not a requirement", component);
            return false;
        }
        self.ready.insert(component.to_string());
        tracing::debug!(
            "ReadinessGate: {} ready ({}/{})",
            component,
            self.ready.len(),
            self.required.len()
        );
        self.try_open()
    }

    /// Open the gate if nothing is outstanding, returns true if it opened now
    pub fn try_open(&mut self) -> bool {
        if self.opened || self.required.len() != self.ready.len() {
            return false;
        }
        self.opened = true;
        true
    }

    pub fn is_open(&self) -> bool {
        self.opened
    }

    /// Components that have not reported ready yet, sorted
    pub fn outstanding(&self) -> SmallVec<[&str; 8]> {
        let mut pending: SmallVec<[&str; 8]> = self
            .required
            .iter()
            .filter(|id| !self.ready.contains(*id))
            .map(String::as_str)
            .collect();
        pending.sort_unstable();
        pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opens_on_last_component() {
        let mut gate = ReadinessGate::new();
        gate.require("shades:primary");
        gate.require("shadow-layers");

        assert!(!gate.mark_ready("shadow-layers"));
        assert_eq!(gate.outstanding().as_slice(), &["shades:primary"]);
        assert!(gate.mark_ready("shades:primary"));
        assert!(gate.is_open());
        assert!(!gate.mark_ready("shades:primary"));
    }

    #[test]
    fn test_unknown_component_ignored() {
        let mut gate = ReadinessGate::new();
        gate.require("a");
        assert!(!gate.mark_ready("b"));
        assert!(!gate.is_open());
    }

    #[test]
    fn test_empty_gate_opens_immediately() {
        let mut gate = ReadinessGate::new();
        assert!(gate.try_open());
        assert!(!gate.try_open());
    }
}
