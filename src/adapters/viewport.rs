use crate::domain::ports::{ElementId, ViewportHost};
use std::collections::{BTreeMap, BTreeSet};

/// Headless viewport that records what the registry asked of it.
#[derive(Debug, Default)]
pub struct RecordingViewport {
    observed: BTreeSet<ElementId>,
    classes: BTreeMap<ElementId, Vec<String>>,
    observe_calls: usize,
    disconnected: bool,
}

impl RecordingViewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_observing(&self, element: ElementId) -> bool {
        self.observed.contains(&element)
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    pub fn observe_calls(&self) -> usize {
        self.observe_calls
    }

    pub fn classes_of(&self, element: ElementId) -> &[String] {
        self.classes.get(&element).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_disconnected(&self) -> bool {
        self.disconnected
    }
}

impl ViewportHost for RecordingViewport {
    fn observe(&mut self, element: ElementId) {
        self.observe_calls += 1;
        self.observed.insert(element);
    }

    fn unobserve(&mut self, element: ElementId) {
        self.observed.remove(&element);
    }

    fn disconnect(&mut self) {
        self.observed.clear();
        self.disconnected = true;
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        self.classes.entry(element).or_default().push(class.to_string());
    }
}

impl<T: ViewportHost + ?Sized> ViewportHost for &mut T {
    fn observe(&mut self, element: ElementId) {
        (**self).observe(element)
    }

    fn unobserve(&mut self, element: ElementId) {
        (**self).unobserve(element)
    }

    fn disconnect(&mut self) {
        (**self).disconnect()
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        (**self).add_class(element, class)
    }
}
