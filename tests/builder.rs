// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::{fs, ptr, sync::Arc};

use spec_report::{
    event,
    reporter::WritableString,
    ConfigError, FileConfig, FileSinkFactory, Format, Keywords, ReportBuilder,
    ReportError, Reporter, ReporterExt as _, SpecIdentity, StatsAccumulator,
};
use tempfile::TempDir;

fn builder_in(tmp: &TempDir) -> ReportBuilder {
    let identity =
        SpecIdentity::new("MyDramaticSpec", tmp.path().join("my_dramatic_spec.rs"));
    ReportBuilder::new(FileSinkFactory::new(identity))
}

fn scenario_event(ev: event::Scenario) -> event::Run {
    let id = Arc::new(SpecIdentity::new("MyDramaticSpec", "my_dramatic_spec.rs"));
    event::Run::Spec(id, event::Spec::Scenario("some scenario".into(), ev))
}

fn step_event(outcome: event::Step) -> event::Run {
    scenario_event(event::Scenario::Step("some step".into(), outcome))
}

#[test]
fn builds_with_stats_by_default() {
    let tmp = TempDir::new().unwrap();
    let mut builder = builder_in(&tmp);

    let fanout = builder.with_default_formats().build().unwrap();

    assert_eq!(fanout.len(), 1);
    assert!(fanout.delegates().contains_key(&Format::Stats));
}

#[test]
fn default_stats_reporter_writes_aggregate_record() {
    let tmp = TempDir::new().unwrap();
    let mut builder = builder_in(&tmp);

    let mut fanout = builder.with_default_formats().build().unwrap();
    let events = [
        event::Run::Started,
        scenario_event(event::Scenario::Started),
        step_event(event::Step::Passed),
        step_event(event::Step::Passed),
        step_event(event::Step::Failed("boom".into())),
        step_event(event::Step::Pending),
        step_event(event::Step::NotPerformed),
        scenario_event(event::Scenario::Finished),
        event::Run::Finished,
    ];
    for ev in &events {
        fanout.handle_event(ev).unwrap();
    }

    let record = fs::read_to_string(
        tmp.path().join("spec-reports/my_dramatic_spec.stats"),
    )
    .unwrap();
    assert_eq!(record, "passed=2\nfailed=1\npending=1\nnot_performed=1\n");
}

#[test]
fn allows_override_of_default_output_directory() {
    let tmp = TempDir::new().unwrap();
    let mut builder = builder_in(&tmp);

    builder.output_to("my-reports").output_as_absolute(true);

    let config = builder.file_configuration("");
    assert_eq!(config.output_directory, "my-reports");
    assert!(config.absolute);
    assert_eq!(config, FileConfig::new("my-reports", true, ""));
}

#[test]
fn builds_and_overrides_default_reporter_for_a_given_format() {
    let tmp = TempDir::new().unwrap();
    let mut builder = builder_in(&tmp);
    builder
        .output_to(tmp.path().join("out").to_string_lossy())
        .output_as_absolute(true);

    let fixed = fixed_text_reporter();
    let fixed_ptr = ptr::addr_of!(*fixed).cast::<()>();
    let mut slot = Some(fixed);
    builder.resolve_with(move |format, b| match format {
        Format::Text => {
            b.sinks_mut().use_configuration(FileConfig::with_extension("text"));
            Ok(slot.take())
        }
        _ => Ok(None),
    });

    let fanout =
        builder.with_default_formats().with(Format::Text).build().unwrap();

    assert_eq!(fanout.len(), 2);
    let got = fanout.delegates().get(&Format::Text).unwrap();
    assert_eq!(
        ptr::addr_of!(**got).cast::<()>(),
        fixed_ptr,
        "the registry must hold the exact overridden instance",
    );
}

/// Constructs a distinguishable fixed reporter instance.
fn fixed_text_reporter() -> Box<dyn Reporter> {
    spec_report::reporter::Text::new(
        WritableString::default(),
        Keywords::default(),
        true,
    )
    .boxed()
}

#[test]
fn custom_resolver_errors_abort_the_build() {
    let tmp = TempDir::new().unwrap();
    let mut builder = builder_in(&tmp);

    builder.resolve_with(|format, _| match format {
        Format::Structured => Err(ReportError::Config(
            ConfigError::UnresolvedFormat(format),
        )),
        _ => Ok(None),
    });

    let res = builder.with(Format::Structured).build();

    assert!(matches!(
        res,
        Err(ReportError::Config(ConfigError::UnresolvedFormat(
            Format::Structured,
        ))),
    ));
}

#[test]
fn rebuild_recomputes_from_current_configuration() {
    let tmp = TempDir::new().unwrap();
    let mut builder = builder_in(&tmp);

    let first = builder.with_default_formats().build().unwrap();
    assert_eq!(first.len(), 1);

    builder.with(Format::Structured);
    let second = builder.build().unwrap();
    assert_eq!(second.len(), 2);
    assert!(second.delegates().contains_key(&Format::Structured));
}

#[test]
fn file_backed_text_report_is_written_under_resolved_path() {
    let tmp = TempDir::new().unwrap();
    let mut builder = builder_in(&tmp);
    builder.verbose(true);

    let mut fanout = builder.with(Format::Text).build().unwrap();
    let events = [
        event::Run::Spec(
            Arc::new(SpecIdentity::new("MyDramaticSpec", "my_dramatic_spec.rs")),
            event::Spec::Started,
        ),
        scenario_event(event::Scenario::Started),
        step_event(event::Step::Passed),
        event::Run::Finished,
    ];
    for ev in &events {
        fanout.handle_event(ev).unwrap();
    }

    let report = fs::read_to_string(
        tmp.path().join("spec-reports/my_dramatic_spec.txt"),
    )
    .unwrap();
    assert_eq!(
        report,
        "Specification: MyDramaticSpec (my_dramatic_spec.rs)\n\
         \x20 Scenario: some scenario\n\
         \x20   some step (PASSED)\n",
    );
}

#[test]
fn shared_accumulator_aggregates_across_builders() {
    let tmp_one = TempDir::new().unwrap();
    let tmp_two = TempDir::new().unwrap();
    let shared = Arc::new(StatsAccumulator::default());

    let mut fanouts = [&tmp_one, &tmp_two]
        .into_iter()
        .map(|tmp| {
            let mut builder = builder_in(tmp);
            builder
                .with_stats_accumulator(Arc::clone(&shared))
                .with_default_formats();
            builder.build().unwrap()
        })
        .collect::<Vec<_>>();

    for fanout in &mut fanouts {
        fanout.handle_event(&step_event(event::Step::Passed)).unwrap();
        fanout
            .handle_event(&step_event(event::Step::Failed("e".into())))
            .unwrap();
    }

    let totals = shared.totals();
    assert_eq!((totals.passed, totals.failed), (2, 2));
}
