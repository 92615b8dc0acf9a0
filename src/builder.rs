// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Resolution of requested output [`Format`]s into a [`Fanout`]
//! [`Reporter`].

use std::{collections::HashMap, fmt, io, sync::Arc};

use derive_more::with_trait::Display;
use linked_hash_map::LinkedHashMap;
use tracing::debug;

use crate::{
    error::ReportError,
    keywords::Keywords,
    reporter::{Discard, Ext as _, Fanout, Json, StatsAccumulator, Text},
    sink::{FileConfig, FileSinkFactory},
    Reporter,
};

/// Closed set of report output formats.
///
/// Every [`Format`] carries a default reporter-construction rule (see
/// [`ReportBuilder::default_reporter_for()`]) and, where file-backed, a
/// default file extension.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Format {
    /// Human-readable output to the terminal.
    #[display("console")]
    Console,

    /// Human-readable output to a `.txt` file.
    #[display("text")]
    Text,

    /// Structured JSON output to a `.json` file.
    #[display("structured")]
    Structured,

    /// Aggregated outcome statistics, output to a `.stats` file at the
    /// end of a run.
    #[display("stats")]
    Stats,
}

impl Format {
    /// [`Format`]s requested by
    /// [`ReportBuilder::with_default_formats()`].
    pub const DEFAULTS: [Self; 1] = [Self::Stats];

    /// Default file extension of this [`Format`], if it's file-backed.
    #[must_use]
    pub const fn extension(self) -> Option<&'static str> {
        match self {
            Self::Console => None,
            Self::Text => Some("txt"),
            Self::Structured => Some("json"),
            Self::Stats => Some("stats"),
        }
    }

    /// Indicates whether reporters of this [`Format`] accumulate outcome
    /// statistics and output an aggregate record at the end of a run.
    #[must_use]
    pub const fn collects_stats(self) -> bool {
        matches!(self, Self::Stats)
    }
}

/// Custom resolution strategy of a [`Format`] into a [`Reporter`].
///
/// Consulted by [`ReportBuilder::reporter_for()`] before the default
/// construction rules. Returning `Ok(None)` delegates the given
/// [`Format`] back to [`ReportBuilder::default_reporter_for()`], so a
/// strategy may handle selected formats only. The builder itself is
/// passed in for access to [`ReportBuilder::sinks_mut()`],
/// [`ReportBuilder::file_configuration()`] and the default rules.
pub type ResolveFn = dyn FnMut(
    Format,
    &mut ReportBuilder,
) -> Result<Option<Box<dyn Reporter>>, ReportError>;

/// Builder of a [`Fanout`] [`Reporter`] out of a set of requested
/// [`Format`]s.
///
/// Holds the output configuration of one specification-execution
/// context. [`build()`] resolves every requested [`Format`] — in request
/// order, consulting a custom [`ResolveFn`] first when one is installed —
/// into a concrete [`Reporter`], wraps statistics-bearing formats into a
/// [`Stats`] decorator, and assembles the result into a [`Fanout`].
///
/// [`build()`] recomputes everything fresh from the current
/// configuration on every call, so the same builder may be reconfigured
/// and rebuilt between runs.
///
/// [`build()`]: ReportBuilder::build
/// [`Stats`]: crate::reporter::Stats
pub struct ReportBuilder {
    /// Factory of file-backed sinks for this specification.
    sinks: FileSinkFactory,

    /// Requested [`Format`]s, in request order, deduplicated.
    formats: Vec<Format>,

    /// Directory the file-backed reports are output into.
    output_directory: String,

    /// Whether `output_directory` is filesystem-absolute.
    absolute: bool,

    /// Labels the narrative elements are rendered with.
    keywords: Keywords,

    /// Whether step-level detail is rendered by text reporters.
    verbose: bool,

    /// Accumulator the statistics of this run are recorded into.
    accumulator: Arc<StatsAccumulator>,

    /// [`FileConfig`]s computed so far, cached per extension.
    file_configs: HashMap<String, FileConfig>,

    /// Custom [`Format`] resolution strategy, if any.
    resolver: Option<Box<ResolveFn>>,
}

impl ReportBuilder {
    /// Creates a new [`ReportBuilder`] producing file-backed sinks with
    /// the given `sinks` factory.
    #[must_use]
    pub fn new(sinks: FileSinkFactory) -> Self {
        Self {
            sinks,
            formats: vec![],
            output_directory: FileConfig::DEFAULT_DIRECTORY.to_owned(),
            absolute: false,
            keywords: Keywords::default(),
            verbose: false,
            accumulator: Arc::default(),
            file_configs: HashMap::new(),
            resolver: None,
        }
    }

    /// Directs file-backed output into the given `directory`.
    pub fn output_to(&mut self, directory: impl Into<String>) -> &mut Self {
        self.output_directory = directory.into();
        self.file_configs.clear();
        self
    }

    /// Marks the output directory as filesystem-`absolute`, instead of
    /// relative to the specification's originating module location.
    pub fn output_as_absolute(&mut self, absolute: bool) -> &mut Self {
        self.absolute = absolute;
        self.file_configs.clear();
        self
    }

    /// Adds the registry's default [`Format`]s to the requested set.
    ///
    /// Idempotent.
    pub fn with_default_formats(&mut self) -> &mut Self {
        for format in Format::DEFAULTS {
            self.with(format);
        }
        self
    }

    /// Adds the given `format` to the requested set.
    ///
    /// Duplicate requests are no-ops, and the original request order is
    /// kept.
    pub fn with(&mut self, format: Format) -> &mut Self {
        if !self.formats.contains(&format) {
            self.formats.push(format);
        }
        self
    }

    /// Replaces the [`Keywords`] table the narrative elements are
    /// rendered with.
    pub fn keywords(&mut self, keywords: Keywords) -> &mut Self {
        self.keywords = keywords;
        self
    }

    /// Enables (or disables) step-level detail in text reporters.
    pub fn verbose(&mut self, verbose: bool) -> &mut Self {
        self.verbose = verbose;
        self
    }

    /// Replaces the [`StatsAccumulator`] the statistics are recorded
    /// into.
    ///
    /// Pass a shared accumulator here to aggregate outcomes across
    /// multiple concurrently running specifications.
    pub fn with_stats_accumulator(
        &mut self,
        accumulator: Arc<StatsAccumulator>,
    ) -> &mut Self {
        self.accumulator = accumulator;
        self
    }

    /// Installs a custom [`Format`] resolution strategy, consulted
    /// before the default construction rules.
    ///
    /// See [`ResolveFn`] for the delegation contract.
    pub fn resolve_with<F>(&mut self, resolve: F) -> &mut Self
    where
        F: FnMut(
                Format,
                &mut ReportBuilder,
            ) -> Result<Option<Box<dyn Reporter>>, ReportError>
            + 'static,
    {
        self.resolver = Some(Box::new(resolve));
        self
    }

    /// Mutable access to the underlying [`FileSinkFactory`], for custom
    /// resolution strategies substituting a file configuration via
    /// [`FileSinkFactory::use_configuration()`].
    pub fn sinks_mut(&mut self) -> &mut FileSinkFactory {
        &mut self.sinks
    }

    /// Computes the [`FileConfig`] for the given `extension` out of the
    /// current output configuration.
    ///
    /// Cached per extension until the output configuration changes.
    pub fn file_configuration(&mut self, extension: &str) -> FileConfig {
        if let Some(config) = self.file_configs.get(extension) {
            return config.clone();
        }
        let config = FileConfig::new(
            self.output_directory.clone(),
            self.absolute,
            extension,
        );
        self.file_configs.insert(extension.to_owned(), config.clone());
        config
    }

    /// Resolves the given `format` into a concrete [`Reporter`].
    ///
    /// A custom strategy installed via
    /// [`resolve_with()`](ReportBuilder::resolve_with) is consulted
    /// first; [`default_reporter_for()`] is the fallback.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if neither the custom strategy nor the defaults
    /// produce a reporter for the `format`, or [`ReportError::Io`] if a
    /// file-backed reporter's output directory cannot be created.
    ///
    /// [`ConfigError`]: crate::error::ConfigError
    /// [`default_reporter_for()`]: ReportBuilder::default_reporter_for
    pub fn reporter_for(
        &mut self,
        format: Format,
    ) -> Result<Box<dyn Reporter>, ReportError> {
        if let Some(mut resolve) = self.resolver.take() {
            let resolved = resolve(format, self);
            self.resolver = Some(resolve);
            if let Some(reporter) = resolved? {
                debug!(%format, "reporter resolved by custom strategy");
                return Ok(reporter);
            }
        }
        self.default_reporter_for(format)
    }

    /// Default construction rule of the [`Format`] registry: the
    /// explicit fallback for custom resolution strategies.
    ///
    /// # Errors
    ///
    /// [`ReportError::Io`] if a file-backed reporter's output directory
    /// cannot be created.
    pub fn default_reporter_for(
        &mut self,
        format: Format,
    ) -> Result<Box<dyn Reporter>, ReportError> {
        Ok(match format {
            Format::Console => {
                Text::new(io::stdout(), self.keywords.clone(), self.verbose)
                    .styled()
                    .boxed()
            }
            Format::Text => {
                let sink = self.sink_for(format)?;
                Text::new(sink, self.keywords.clone(), self.verbose).boxed()
            }
            Format::Structured => Json::new(self.sink_for(format)?).boxed(),
            // Wrapped into a `Stats` decorator by `build()`.
            Format::Stats => Discard.boxed(),
        })
    }

    /// Resolves every requested [`Format`] into a [`Reporter`] and
    /// assembles them into a [`Fanout`], whose registry is exposed via
    /// [`Fanout::delegates()`] for inspection.
    ///
    /// # Errors
    ///
    /// The first [`reporter_for()`](ReportBuilder::reporter_for) failure
    /// aborts the whole build.
    pub fn build(&mut self) -> Result<Fanout, ReportError> {
        let mut delegates = LinkedHashMap::new();
        for format in self.formats.clone() {
            let mut reporter = self.reporter_for(format)?;
            if format.collects_stats() {
                let sink = self.sink_for(format)?;
                reporter = reporter
                    .stats_to(Arc::clone(&self.accumulator), sink)
                    .boxed();
            }
            debug!(%format, "reporter configured");
            delegates.insert(format, reporter);
        }
        Ok(Fanout::new(delegates))
    }

    fn sink_for(
        &mut self,
        format: Format,
    ) -> Result<crate::sink::FileSink, ReportError> {
        let config = self.file_configuration(format.extension().unwrap_or(""));
        self.sinks.create_sink(&config)
    }
}

impl fmt::Debug for ReportBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportBuilder")
            .field("sinks", &self.sinks)
            .field("formats", &self.formats)
            .field("output_directory", &self.output_directory)
            .field("absolute", &self.absolute)
            .field("verbose", &self.verbose)
            .field("resolver", &self.resolver.as_ref().map(|_| ".."))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::SpecIdentity;

    fn builder() -> ReportBuilder {
        ReportBuilder::new(FileSinkFactory::new(SpecIdentity::new(
            "MySpec",
            "my_spec.rs",
        )))
    }

    #[test]
    fn requested_formats_are_deduplicated_in_request_order() {
        let mut b = builder();

        b.with(Format::Text)
            .with_default_formats()
            .with(Format::Text)
            .with_default_formats();

        assert_eq!(b.formats, vec![Format::Text, Format::Stats]);
    }

    #[test]
    fn file_configuration_reflects_current_output_settings() {
        let mut b = builder();

        assert_eq!(
            b.file_configuration("txt"),
            FileConfig::new(FileConfig::DEFAULT_DIRECTORY, false, "txt"),
        );

        b.output_to("my-reports").output_as_absolute(true);
        for ext in ["", "txt", "json", "stats"] {
            let config = b.file_configuration(ext);
            assert_eq!(config.output_directory, "my-reports");
            assert!(config.absolute);
            assert_eq!(config.extension, ext);
        }
    }

    #[test]
    fn file_configuration_is_cached_per_extension() {
        let mut b = builder();

        let first = b.file_configuration("txt");
        let again = b.file_configuration("txt");
        assert_eq!(first, again);

        b.output_to("elsewhere");
        let recomputed = b.file_configuration("txt");
        assert_eq!(recomputed.output_directory, "elsewhere");
    }

    #[test]
    fn stats_format_collects_stats_and_others_do_not() {
        assert!(Format::Stats.collects_stats());
        for format in [Format::Console, Format::Text, Format::Structured] {
            assert!(!format.collects_stats(), "{format}");
        }
    }
}
