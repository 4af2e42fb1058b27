//! One-shot "reveal on scroll" bookkeeping.
//!
//! Elements are registered when their owning view mounts. The first time an
//! element crosses the visibility threshold it gets the marker class, is no
//! longer observed, and leaves the registry. Registering it again (a remount)
//! starts a fresh observation.

use crate::domain::ports::{ElementId, ViewportHost};
use std::collections::BTreeSet;

pub const DEFAULT_THRESHOLD: f64 = 0.1;
pub const REVEAL_CLASS: &str = "animate-in";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: ElementId,
    pub is_intersecting: bool,
    pub ratio: f64,
}

pub struct RevealRegistry<H: ViewportHost> {
    host: H,
    threshold: f64,
    observed: BTreeSet<ElementId>,
    connected: bool,
}

impl<H: ViewportHost> RevealRegistry<H> {
    pub fn new(host: H, threshold: f64) -> Self {
        Self {
            host,
            threshold,
            observed: BTreeSet::new(),
            connected: true,
        }
    }

    pub fn with_default_threshold(host: H) -> Self {
        Self::new(host, DEFAULT_THRESHOLD)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn is_observed(&self, element: ElementId) -> bool {
        self.observed.contains(&element)
    }

    /// Start observing `element`. Returns false when nothing changed.
    pub fn register(&mut self, element: ElementId) -> bool {
        if !self.connected || !self.observed.insert(element) {
            return false;
        }
        self.host.observe(element);
        true
    }

    /// Apply the reveal class to every qualifying entry and return the
    /// elements that were revealed by this batch.
    pub fn handle_intersections(&mut self, entries: &[IntersectionEntry]) -> Vec<ElementId> {
        if !self.connected {
            return Vec::new();
        }

        let mut revealed = Vec::new();
        for entry in entries {
            if !entry.is_intersecting || entry.ratio < self.threshold {
                continue;
            }
            if !self.observed.remove(&entry.target) {
                continue;
            }

            self.host.add_class(entry.target, REVEAL_CLASS);
            self.host.unobserve(entry.target);
            revealed.push(entry.target);
        }

        if !revealed.is_empty() {
            tracing::debug!("Revealed {} element(s)", revealed.len());
        }
        revealed
    }

    pub fn observed_len(&self) -> usize {
        self.observed.len()
    }

    pub fn teardown(&mut self) {
        if !self.connected {
            return;
        }
        for element in std::mem::take(&mut self.observed) {
            self.host.unobserve(element);
        }
        self.host.disconnect();
        self.connected = false;
    }
}

impl<H: ViewportHost> Drop for RevealRegistry<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}
