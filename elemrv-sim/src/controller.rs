//! Simulated platform interrupt controller
//!
//! Models the gating half of the claim/complete protocol: a delivered
//! source stays in service, and is not delivered again, until software
//! claims it.

use std::cell::{Cell, RefCell};

use elemrv_hal::{InterruptController, SourceId};

use crate::trace::{Event, Trace};

/// Simulated interrupt controller
pub struct SimController {
    trace: Trace,
    enabled: Cell<u32>,
    in_service: Cell<u32>,
    claims: RefCell<Vec<u8>>,
}

impl SimController {
    /// Create a controller in reset state
    pub fn new(trace: Trace) -> Self {
        Self {
            trace,
            enabled: Cell::new(0),
            in_service: Cell::new(0),
            claims: RefCell::new(Vec::new()),
        }
    }

    /// Check if a source is enabled
    pub fn is_enabled(&self, source: SourceId) -> bool {
        self.enabled.get() & source.mask() != 0
    }

    /// Check if a source was delivered and not yet claimed
    pub fn is_in_service(&self, source: SourceId) -> bool {
        self.in_service.get() & source.mask() != 0
    }

    /// Every claim so far, in order
    pub fn claims(&self) -> Vec<u8> {
        self.claims.borrow().clone()
    }

    /// Number of claims of one source
    pub fn claim_count(&self, source: SourceId) -> usize {
        self.claims
            .borrow()
            .iter()
            .filter(|&&id| id == source.get())
            .count()
    }

    /// Sources that would raise a trap given the asserted peripheral lines
    pub(crate) fn deliverable(&self, asserted: u32) -> u32 {
        asserted & self.enabled.get() & !self.in_service.get()
    }

    /// Put delivered sources in service until they are claimed
    pub(crate) fn begin_service(&self, sources: u32) {
        self.in_service.set(self.in_service.get() | sources);
    }
}

impl InterruptController for SimController {
    fn init(&self) {
        self.enabled.set(0);
        self.in_service.set(0);
        self.trace.record(Event::ControllerInit);
    }

    fn enable_source(&self, source: SourceId) {
        self.enabled.set(self.enabled.get() | source.mask());
        self.trace.record(Event::SourceEnabled(source.get()));
    }

    fn disable_source(&self, source: SourceId) {
        self.enabled.set(self.enabled.get() & !source.mask());
        self.trace.record(Event::SourceDisabled(source.get()));
    }

    fn claim(&self, source: SourceId) {
        self.in_service.set(self.in_service.get() & !source.mask());
        self.claims.borrow_mut().push(source.get());
        self.trace.record(Event::Claimed(source.get()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(id: u8) -> SourceId {
        SourceId::new(id).unwrap()
    }

    #[test]
    fn test_enable_is_idempotent() {
        let ctrl = SimController::new(Trace::new());
        ctrl.init();

        ctrl.enable_source(source(1));
        ctrl.enable_source(source(1));
        assert!(ctrl.is_enabled(source(1)));
        assert_eq!(ctrl.deliverable(0b10), 0b10);

        ctrl.disable_source(source(1));
        assert!(!ctrl.is_enabled(source(1)));
        assert_eq!(ctrl.deliverable(0b10), 0);
    }

    #[test]
    fn test_in_service_gates_delivery_until_claim() {
        let ctrl = SimController::new(Trace::new());
        ctrl.enable_source(source(0));

        ctrl.begin_service(0b01);
        assert!(ctrl.is_in_service(source(0)));
        assert_eq!(ctrl.deliverable(0b01), 0);

        ctrl.claim(source(0));
        assert!(!ctrl.is_in_service(source(0)));
        assert_eq!(ctrl.deliverable(0b01), 0b01);
        assert_eq!(ctrl.claim_count(source(0)), 1);
    }
}
