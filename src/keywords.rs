// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Keyword lookup table used for rendering narrative elements.

use smart_default::SmartDefault;

use crate::event;

/// Textual labels a [`Text`] reporter renders narrative elements with.
///
/// Defaults to English labels. Localized tables are produced by an
/// external collaborator and passed into
/// [`ReportBuilder::keywords()`][1].
///
/// [`Text`]: crate::reporter::Text
/// [1]: crate::ReportBuilder::keywords
#[derive(Clone, Debug, SmartDefault)]
pub struct Keywords {
    /// Label preceding a specification name.
    #[default("Specification:".to_owned())]
    pub spec: String,

    /// Label preceding a scenario title.
    #[default("Scenario:".to_owned())]
    pub scenario: String,

    /// Label of a [`Passed`] step outcome.
    ///
    /// [`Passed`]: event::Step::Passed
    #[default("PASSED".to_owned())]
    pub passed: String,

    /// Label of a [`Failed`] step outcome.
    ///
    /// [`Failed`]: event::Step::Failed
    #[default("FAILED".to_owned())]
    pub failed: String,

    /// Label of a [`Pending`] step outcome.
    ///
    /// [`Pending`]: event::Step::Pending
    #[default("PENDING".to_owned())]
    pub pending: String,

    /// Label of a [`NotPerformed`] step outcome.
    ///
    /// [`NotPerformed`]: event::Step::NotPerformed
    #[default("NOT PERFORMED".to_owned())]
    pub not_performed: String,
}

impl Keywords {
    /// Returns the label of the given step `outcome`.
    #[must_use]
    pub fn outcome(&self, outcome: &event::Step) -> &str {
        match outcome {
            event::Step::Passed => &self.passed,
            event::Step::Failed(_) => &self.failed,
            event::Step::Pending => &self.pending,
            event::Step::NotPerformed => &self.not_performed,
        }
    }
}
