//! Source table
//!
//! Maps controller source ids to the handler that services them. Entries
//! are kept sorted so a trap visits sources in ascending id order, whatever
//! the registration order. Service order within one trap therefore follows
//! the platform's source numbering: with UART on a lower line than GPIO the
//! echo goes out before the edge diagnostic, and the reverse when swapped.

use heapless::Vec;

use elemrv_hal::SourceId;

use crate::context::Context;
use crate::error::Error;

/// Maximum handlers in one table
pub const MAX_TABLE_ENTRIES: usize = 8;

/// Service routine for one interrupt source
///
/// The dispatcher calls `ready`, and for a ready source `disable`,
/// `service`, `enable` in that order, then claims the source at the
/// controller. All four run with interrupts masked.
pub trait IrqHandler<U, G, C> {
    /// Check if the source's peripheral condition is pending
    fn ready(&self, ctx: &Context<U, G, C>) -> bool;

    /// Stop the peripheral from raising the condition
    fn disable(&self, ctx: &Context<U, G, C>);

    /// Clear the condition; returns the units of work done
    fn service(&self, ctx: &Context<U, G, C>) -> usize;

    /// Let the peripheral raise the condition again
    fn enable(&self, ctx: &Context<U, G, C>);
}

/// One registered source
pub struct SourceEntry<'a, U, G, C> {
    pub source: SourceId,
    pub handler: &'a dyn IrqHandler<U, G, C>,
}

/// Fixed-capacity table of source handlers
///
/// Iterated in ascending [`SourceId`] order.
pub struct SourceTable<'a, U, G, C> {
    entries: Vec<SourceEntry<'a, U, G, C>, MAX_TABLE_ENTRIES>,
    num_sources: u8,
}

impl<'a, U, G, C> SourceTable<'a, U, G, C> {
    /// Create an empty table for a controller with `num_sources` lines
    pub const fn new(num_sources: u8) -> Self {
        Self {
            entries: Vec::new(),
            num_sources,
        }
    }

    /// Register the handler for a source
    pub fn register(
        &mut self,
        source: SourceId,
        handler: &'a dyn IrqHandler<U, G, C>,
    ) -> Result<(), Error> {
        if source.get() >= self.num_sources {
            return Err(Error::InvalidSource(source.get()));
        }
        if self.handles(source) {
            return Err(Error::DuplicateSource(source.get()));
        }

        self.entries
            .push(SourceEntry { source, handler })
            .map_err(|_| Error::TableFull)?;
        self.entries.sort_unstable_by_key(|e| e.source);

        debug!("source {} registered", source.get());
        Ok(())
    }

    /// Check if a source has a handler
    pub fn handles(&self, source: SourceId) -> bool {
        self.entries.iter().any(|e| e.source == source)
    }

    /// Entries in ascending source order
    pub fn entries(&self) -> &[SourceEntry<'a, U, G, C>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
