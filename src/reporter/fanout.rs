// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Passing events to multiple [`Reporter`]s in registration order.

use std::fmt;

use linked_hash_map::LinkedHashMap;

use crate::{builder::Format, error::ReportError, event, Reporter};

/// Composite [`Reporter`] forwarding every event to each of its
/// delegates, one [`Format`] at a time, in registration order.
///
/// # Failure policy
///
/// Forwarding is fail-fast: the first delegate returning an error aborts
/// forwarding of that event, the remaining delegates are not invoked and
/// the error propagates to the caller. A reporting failure indicates a
/// broken sink, which shouldn't be papered over by continuing to write
/// partial reports elsewhere.
pub struct Fanout {
    /// Delegate [`Reporter`]s, keyed by the [`Format`] they were
    /// registered for, iterated in registration order.
    delegates: LinkedHashMap<Format, Box<dyn Reporter>>,
}

impl Fanout {
    /// Creates a new [`Fanout`] over the given `delegates`.
    #[must_use]
    pub fn new(delegates: LinkedHashMap<Format, Box<dyn Reporter>>) -> Self {
        Self { delegates }
    }

    /// Read-only view of the delegate registry, for diagnostics.
    #[must_use]
    pub fn delegates(&self) -> &LinkedHashMap<Format, Box<dyn Reporter>> {
        &self.delegates
    }

    /// Number of registered delegates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.delegates.len()
    }

    /// Indicates whether this [`Fanout`] has no delegates at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.delegates.is_empty()
    }
}

impl Reporter for Fanout {
    fn handle_event(&mut self, ev: &event::Run) -> Result<(), ReportError> {
        for (_, delegate) in self.delegates.iter_mut() {
            delegate.handle_event(ev)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Fanout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fanout")
            .field("delegates", &self.delegates.keys().collect::<Vec<_>>())
            .finish()
    }
}
