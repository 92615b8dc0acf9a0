// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Reporter`]-wrapper for collecting statistics of step outcomes.

use std::{
    io,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use itertools::Itertools as _;
use serde::Serialize;

use crate::{
    error::ReportError,
    event,
    reporter::out::WriteStrExt as _,
    Reporter,
};

/// Counters of step outcomes, accumulated across a run.
///
/// Increments are atomic, so a single accumulator may be shared by
/// reference between [`Stats`] reporters of concurrently running
/// specifications: the final [`Totals`] reflect exactly the union of all
/// recorded outcomes regardless of interleaving.
#[derive(Debug, Default)]
pub struct StatsAccumulator {
    /// Number of [`Passed`] steps.
    ///
    /// [`Passed`]: event::Step::Passed
    passed: AtomicUsize,

    /// Number of [`Failed`] steps.
    ///
    /// [`Failed`]: event::Step::Failed
    failed: AtomicUsize,

    /// Number of [`Pending`] steps.
    ///
    /// [`Pending`]: event::Step::Pending
    pending: AtomicUsize,

    /// Number of [`NotPerformed`] steps.
    ///
    /// [`NotPerformed`]: event::Step::NotPerformed
    not_performed: AtomicUsize,
}

impl StatsAccumulator {
    /// Records a single step `outcome`.
    pub fn record(&self, outcome: &event::Step) {
        let counter = match outcome {
            event::Step::Passed => &self.passed,
            event::Step::Failed(_) => &self.failed,
            event::Step::Pending => &self.pending,
            event::Step::NotPerformed => &self.not_performed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns a snapshot of the accumulated [`Totals`].
    #[must_use]
    pub fn totals(&self) -> Totals {
        Totals {
            passed: self.passed.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            pending: self.pending.load(Ordering::Relaxed),
            not_performed: self.not_performed.load(Ordering::Relaxed),
        }
    }
}

/// Immutable snapshot of accumulated outcome counts.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Totals {
    /// Number of [`Passed`] steps.
    ///
    /// [`Passed`]: event::Step::Passed
    pub passed: usize,

    /// Number of [`Failed`] steps.
    ///
    /// [`Failed`]: event::Step::Failed
    pub failed: usize,

    /// Number of [`Pending`] steps.
    ///
    /// [`Pending`]: event::Step::Pending
    pub pending: usize,

    /// Number of [`NotPerformed`] steps.
    ///
    /// [`NotPerformed`]: event::Step::NotPerformed
    pub not_performed: usize,
}

impl Totals {
    /// Total number of recorded step outcomes.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.passed + self.failed + self.pending + self.not_performed
    }

    /// Indicates whether any recorded step has failed.
    #[must_use]
    pub const fn has_failed(&self) -> bool {
        self.failed > 0
    }
}

/// Wrapper for a [`Reporter`] recording step outcomes into a shared
/// [`StatsAccumulator`] and outputting an aggregate record at the end of
/// a run.
///
/// Every event is forwarded to the wrapped [`Reporter`] first, unchanged
/// and in order, so the wrapped one observes the exact same event
/// sequence.
#[derive(Debug)]
pub struct Stats<R, O: io::Write> {
    /// Wrapped [`Reporter`].
    inner: R,

    /// Shared accumulator the outcomes are recorded into.
    accumulator: Arc<StatsAccumulator>,

    /// Output of the end-of-run aggregate record.
    out: O,
}

impl<R, O: io::Write> Stats<R, O> {
    /// Creates a new [`Stats`] wrapper around the `inner` [`Reporter`].
    #[must_use]
    pub fn new(inner: R, accumulator: Arc<StatsAccumulator>, out: O) -> Self {
        Self { inner, accumulator, out }
    }

    /// Accumulator the outcomes are recorded into.
    #[must_use]
    pub fn accumulator(&self) -> &Arc<StatsAccumulator> {
        &self.accumulator
    }

    /// Returns the wrapped [`Reporter`], dropping this wrapper.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Outputs the aggregate record as `key=value` lines, one per
    /// outcome kind.
    fn write_totals(&mut self) -> io::Result<()> {
        let totals = self.accumulator.totals();
        let record = [
            ("passed", totals.passed),
            ("failed", totals.failed),
            ("pending", totals.pending),
            ("not_performed", totals.not_performed),
        ]
        .iter()
        .map(|(kind, count)| format!("{kind}={count}"))
        .join("\n");
        self.out.write_line(record)?;
        self.out.flush()
    }
}

impl<R: Reporter, O: io::Write> Reporter for Stats<R, O> {
    fn handle_event(&mut self, ev: &event::Run) -> Result<(), ReportError> {
        self.inner.handle_event(ev)?;

        match ev {
            event::Run::Spec(
                _,
                event::Spec::Scenario(_, event::Scenario::Step(_, outcome)),
            ) => self.accumulator.record(outcome),
            event::Run::Finished => {
                self.write_totals().map_err(ReportError::Io)?;
            }
            _ => {}
        }
        Ok(())
    }
}
