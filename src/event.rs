// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Key occurrences in a lifecycle of a specification run.
//!
//! The top-level enum here is [`Run`].
//!
//! Each event enum contains variants indicating what stage of execution
//! the harness is at, and variants with detailed content about the
//! precise sub-event.
//!
//! The execution harness emits these events in a [happened-before] order:
//! a [`Reporter`] always observes `Started` before any sub-event of the
//! same subject, and `Finished` after all of them.
//!
//! [`Reporter`]: crate::Reporter
//! [happened-before]: https://en.wikipedia.org/wiki/Happened-before

use std::sync::Arc;

use crate::path::SpecIdentity;

/// Top-level event of a whole specification run.
#[derive(Clone, Debug)]
pub enum Run {
    /// The run has started.
    Started,

    /// [`Spec`] event, along with the identity of the specification it
    /// belongs to.
    Spec(Arc<SpecIdentity>, Spec),

    /// The run has finished: every specification of this run is done and
    /// no further events will be emitted.
    Finished,
}

/// Event of a single specification.
#[derive(Clone, Debug)]
pub enum Spec {
    /// The specification has started execution.
    Started,

    /// [`Scenario`] event, along with the title of the scenario it
    /// belongs to.
    Scenario(String, Scenario),

    /// The specification has finished execution.
    Finished,
}

/// Event of a scenario inside a specification.
#[derive(Clone, Debug)]
pub enum Scenario {
    /// The scenario has started execution.
    Started,

    /// Outcome of a single step, along with its narrative text.
    Step(String, Step),

    /// The scenario has finished execution.
    Finished,
}

/// Outcome of a single executed (or deliberately skipped) step.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Step {
    /// The step matched and completed successfully.
    Passed,

    /// The step matched and failed with the contained message.
    Failed(String),

    /// The step matched a pending (not yet implemented) definition.
    Pending,

    /// The step wasn't performed, because an earlier step of its scenario
    /// didn't pass.
    NotPerformed,
}
