// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Structured (JSON) [`Reporter`].

use std::io;

use serde::Serialize;

use crate::{error::ReportError, event, Reporter};

/// [`Reporter`] collecting structured records of a whole run and
/// serializing them as JSON once the run finishes.
#[derive(Debug)]
pub struct Json<O: io::Write> {
    /// Output the serialized run is written into.
    out: O,

    /// Records of all specifications observed so far.
    specs: Vec<SpecRecord>,
}

impl<O: io::Write> Json<O> {
    /// Creates a new [`Json`] reporter writing to `out`.
    #[must_use]
    pub fn new(out: O) -> Self {
        Self { out, specs: vec![] }
    }

    fn handle_spec(&mut self, id: &crate::SpecIdentity, ev: &event::Spec) {
        match ev {
            event::Spec::Started => self.specs.push(SpecRecord {
                name: id.name().to_owned(),
                source: id.source().display().to_string(),
                scenarios: vec![],
            }),
            event::Spec::Scenario(title, ev) => {
                let Some(spec) = self
                    .specs
                    .iter_mut()
                    .rfind(|s| s.name == id.name())
                else {
                    return;
                };
                spec.handle_scenario(title, ev);
            }
            event::Spec::Finished => {}
        }
    }
}

impl<O: io::Write> Reporter for Json<O> {
    fn handle_event(&mut self, ev: &event::Run) -> Result<(), ReportError> {
        match ev {
            event::Run::Started => {}
            event::Run::Spec(id, ev) => self.handle_spec(id, ev),
            event::Run::Finished => {
                serde_json::to_writer(&mut self.out, &self.specs)?;
                self.out.write_all(b"\n").map_err(ReportError::Io)?;
                self.out.flush().map_err(ReportError::Io)?;
            }
        }
        Ok(())
    }
}

/// Serializable record of a single specification.
#[derive(Clone, Debug, Serialize)]
struct SpecRecord {
    /// Compound name of the specification.
    name: String,

    /// Location of the originating module.
    source: String,

    /// Scenarios observed within the specification.
    scenarios: Vec<ScenarioRecord>,
}

impl SpecRecord {
    fn handle_scenario(&mut self, title: &str, ev: &event::Scenario) {
        match ev {
            event::Scenario::Started => self.scenarios.push(ScenarioRecord {
                title: title.to_owned(),
                steps: vec![],
            }),
            event::Scenario::Step(text, outcome) => {
                let Some(scenario) =
                    self.scenarios.iter_mut().rfind(|s| s.title == title)
                else {
                    return;
                };
                scenario.steps.push(StepRecord::new(text, outcome));
            }
            event::Scenario::Finished => {}
        }
    }
}

/// Serializable record of a single scenario.
#[derive(Clone, Debug, Serialize)]
struct ScenarioRecord {
    /// Title of the scenario.
    title: String,

    /// Outcomes of the scenario's steps, in execution order.
    steps: Vec<StepRecord>,
}

/// Serializable record of a single step outcome.
#[derive(Clone, Debug, Serialize)]
struct StepRecord {
    /// Narrative text of the step.
    text: String,

    /// Kind of the outcome.
    outcome: &'static str,

    /// Failure message, if the step failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl StepRecord {
    fn new(text: &str, outcome: &event::Step) -> Self {
        let (kind, error) = match outcome {
            event::Step::Passed => ("passed", None),
            event::Step::Failed(e) => ("failed", Some(e.clone())),
            event::Step::Pending => ("pending", None),
            event::Step::NotPerformed => ("not_performed", None),
        };
        Self { text: text.to_owned(), outcome: kind, error }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{path::SpecIdentity, reporter::WritableString};

    #[test]
    fn serializes_whole_run_at_finish() {
        let mut json = Json::new(WritableString::default());
        let id = Arc::new(SpecIdentity::new("CheckoutSpec", "checkout.rs"));
        let scenario = |ev| {
            event::Run::Spec(
                Arc::clone(&id),
                event::Spec::Scenario("happy path".into(), ev),
            )
        };

        let events = [
            event::Run::Started,
            event::Run::Spec(Arc::clone(&id), event::Spec::Started),
            scenario(event::Scenario::Started),
            scenario(event::Scenario::Step(
                "a filled cart".into(),
                event::Step::Passed,
            )),
            scenario(event::Scenario::Step(
                "payment is accepted".into(),
                event::Step::Failed("card expired".into()),
            )),
            scenario(event::Scenario::Finished),
            event::Run::Spec(Arc::clone(&id), event::Spec::Finished),
        ];
        for ev in &events {
            json.handle_event(ev).unwrap();
        }
        assert_eq!(json.out.0, "", "nothing is written before run finish");

        json.handle_event(&event::Run::Finished).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&json.out.0).unwrap();
        assert_eq!(
            written,
            serde_json::json!([{
                "name": "CheckoutSpec",
                "source": "checkout.rs",
                "scenarios": [{
                    "title": "happy path",
                    "steps": [
                        {"text": "a filled cart", "outcome": "passed"},
                        {
                            "text": "payment is accepted",
                            "outcome": "failed",
                            "error": "card expired",
                        },
                    ],
                }],
            }]),
        );
    }
}
