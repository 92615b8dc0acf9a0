// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Human-readable line-oriented [`Reporter`].

use std::io;

use crate::{
    error::ReportError,
    event,
    keywords::Keywords,
    path::SpecIdentity,
    reporter::out::{Styles, WriteStrExt as _},
    Reporter,
};

/// [`Reporter`] rendering every event as one human-readable line,
/// labelled through a [`Keywords`] lookup table.
///
/// With `verbose` enabled, individual step outcomes are rendered too;
/// otherwise only specification and scenario level lines are.
#[derive(Debug)]
pub struct Text<O: io::Write> {
    /// Output the lines are written into.
    out: O,

    /// Labels the narrative elements are rendered with.
    keywords: Keywords,

    /// Whether step-level detail is rendered.
    verbose: bool,

    /// [`Styles`] for colorizing the output.
    styles: Styles,
}

impl<O: io::Write> Text<O> {
    /// Creates a new unstyled [`Text`] reporter writing to `out`.
    #[must_use]
    pub fn new(out: O, keywords: Keywords, verbose: bool) -> Self {
        Self { out, keywords, verbose, styles: Styles::none() }
    }

    /// Enables terminal styling whenever an attended, color-capable
    /// terminal is detected.
    #[must_use]
    pub fn styled(mut self) -> Self {
        self.styles = Styles::detected();
        self
    }

    fn spec(
        &mut self,
        id: &SpecIdentity,
        ev: &event::Spec,
    ) -> io::Result<()> {
        match ev {
            event::Spec::Started => {
                let line = format!("{} {id}", self.keywords.spec);
                self.out.write_line(self.styles.header(line))
            }
            event::Spec::Scenario(title, ev) => self.scenario(title, ev),
            event::Spec::Finished => self.out.write_line(""),
        }
    }

    fn scenario(
        &mut self,
        title: &str,
        ev: &event::Scenario,
    ) -> io::Result<()> {
        match ev {
            event::Scenario::Started => {
                let line = format!("  {} {title}", self.keywords.scenario);
                self.out.write_line(self.styles.header(line))
            }
            event::Scenario::Step(text, outcome) => {
                if self.verbose {
                    self.step(text, outcome)
                } else {
                    Ok(())
                }
            }
            event::Scenario::Finished => Ok(()),
        }
    }

    fn step(&mut self, text: &str, outcome: &event::Step) -> io::Result<()> {
        let label = self.keywords.outcome(outcome);
        let line = match outcome {
            event::Step::Passed => {
                self.styles.ok(format!("    {text} ({label})"))
            }
            event::Step::Failed(err) => {
                self.styles.err(format!("    {text} ({label}: {err})"))
            }
            event::Step::Pending | event::Step::NotPerformed => {
                self.styles.skipped(format!("    {text} ({label})"))
            }
        };
        self.out.write_line(line)
    }
}

impl<O: io::Write> Reporter for Text<O> {
    fn handle_event(&mut self, ev: &event::Run) -> Result<(), ReportError> {
        match ev {
            event::Run::Started => Ok(()),
            event::Run::Spec(id, ev) => {
                self.spec(id, ev).map_err(ReportError::Io)
            }
            event::Run::Finished => {
                self.out.flush().map_err(ReportError::Io)
            }
        }
    }
}
