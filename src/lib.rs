// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Reporting core for behavior-specification test runs.
//!
//! Given a set of requested output [`Format`]s, a [`ReportBuilder`]
//! resolves each one into a concrete [`Reporter`] — consulting an
//! optional custom resolution strategy before the registry defaults —
//! and composes them into a single [`Fanout`] that forwards every
//! lifecycle [`event`] to all configured reporters, in request order,
//! fail-fast.
//!
//! File-backed formats derive their output paths deterministically from
//! the specification's identity ([`UnderscoredLowercase`] strategy) and
//! a [`FileConfig`] ([`FileSinkFactory`]), and statistics-bearing
//! formats are wrapped into a [`reporter::Stats`] decorator aggregating
//! outcome counts across the run — safely shareable between
//! concurrently running specifications.
//!
//! Parsing of specification files, step execution semantics and the
//! execution harness driving the events are external collaborators: this
//! crate only covers the reporting surface they drive.

pub mod builder;
pub mod error;
pub mod event;
pub mod keywords;
pub mod path;
pub mod reporter;
pub mod sink;

#[doc(inline)]
pub use self::{
    builder::{Format, ReportBuilder, ResolveFn},
    error::{ConfigError, ReportError},
    keywords::Keywords,
    path::{PathResolver, SpecIdentity, UnderscoredLowercase},
    reporter::{Ext as ReporterExt, Fanout, Reporter, StatsAccumulator, Totals},
    sink::{FileConfig, FileSink, FileSinkFactory},
};
