// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tools for outputting [`Run`] events.
//!
//! [`Run`]: crate::event::Run

pub mod discard;
pub mod fanout;
pub mod json;
pub mod out;
pub mod stats;
pub mod text;

use std::{io, sync::Arc};

use sealed::sealed;

use crate::{error::ReportError, event};

#[doc(inline)]
pub use self::{
    discard::Discard,
    fanout::Fanout,
    json::Json,
    out::{Styles, WritableString, WriteStrExt},
    stats::{Stats, StatsAccumulator, Totals},
    text::Text,
};

/// Reporter of [`Run`] events to some output.
///
/// The execution harness produces events in a [happened-before] order
/// (see [`event`] module docs), drives every [`Reporter`] synchronously,
/// and treats the first returned error as fatal to the reporting of the
/// affected run: a failing sink must not be papered over by continuing
/// to write partial reports elsewhere.
///
/// [`Run`]: event::Run
/// [happened-before]: https://en.wikipedia.org/wiki/Happened-before
pub trait Reporter {
    /// Handles the given [`Run`] event.
    ///
    /// # Errors
    ///
    /// If this [`Reporter`] fails to write the event to its output.
    ///
    /// [`Run`]: event::Run
    fn handle_event(&mut self, ev: &event::Run) -> Result<(), ReportError>;
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn handle_event(&mut self, ev: &event::Run) -> Result<(), ReportError> {
        (**self).handle_event(ev)
    }
}

/// Extension of [`Reporter`] allowing to wrap it into composites.
#[sealed]
pub trait Ext: Reporter + Sized {
    /// Wraps this [`Reporter`] to record step outcomes into the given
    /// `accumulator` and output an aggregate record to `out` at the end
    /// of a run.
    ///
    /// See [`Stats`] for more information.
    #[must_use]
    fn stats_to<O: io::Write>(
        self,
        accumulator: Arc<StatsAccumulator>,
        out: O,
    ) -> Stats<Self, O>;

    /// Erases the concrete type of this [`Reporter`].
    #[must_use]
    fn boxed(self) -> Box<dyn Reporter>
    where
        Self: 'static;
}

#[sealed]
impl<R: Reporter + Sized> Ext for R {
    fn stats_to<O: io::Write>(
        self,
        accumulator: Arc<StatsAccumulator>,
        out: O,
    ) -> Stats<Self, O> {
        Stats::new(self, accumulator, out)
    }

    fn boxed(self) -> Box<dyn Reporter>
    where
        Self: 'static,
    {
        Box::new(self)
    }
}
