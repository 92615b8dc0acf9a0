// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! File-backed output sinks and their configuration.

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use smart_default::SmartDefault;
use tracing::debug;

use crate::{
    error::ReportError,
    path::{PathResolver, SpecIdentity, UnderscoredLowercase},
};

/// Configuration of file-backed report output.
///
/// Immutable once computed. For a fixed `(output_directory, absolute,
/// extension)` triple the resulting output path is deterministic.
#[derive(Clone, Debug, Eq, PartialEq, SmartDefault)]
pub struct FileConfig {
    /// Directory the report files are output into.
    ///
    /// Interpreted as a filesystem-absolute root if `absolute` is set,
    /// and as relative to the specification's originating module
    /// location otherwise.
    #[default(FileConfig::DEFAULT_DIRECTORY.to_owned())]
    pub output_directory: String,

    /// Whether `output_directory` is a filesystem-absolute root.
    pub absolute: bool,

    /// Extension of the output file, without a leading dot. May be
    /// empty.
    pub extension: String,
}

impl FileConfig {
    /// Default relative output directory of report files.
    pub const DEFAULT_DIRECTORY: &'static str = "spec-reports";

    /// Creates a new [`FileConfig`] out of the given parts.
    #[must_use]
    pub fn new(
        output_directory: impl Into<String>,
        absolute: bool,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            output_directory: output_directory.into(),
            absolute,
            extension: extension.into(),
        }
    }

    /// Creates a new [`FileConfig`] with the given `extension` and
    /// default directory settings.
    #[must_use]
    pub fn with_extension(extension: impl Into<String>) -> Self {
        Self { extension: extension.into(), ..Self::default() }
    }
}

/// Factory of writable [`FileSink`]s for a single specification.
///
/// Resolves a concrete target path out of the specification's identity
/// and a [`FileConfig`], and creates any missing parent directories at
/// resolution time, so an unwritable output tree surfaces when reporters
/// are configured rather than on first write.
pub struct FileSinkFactory {
    /// Identity of the specification this factory produces sinks for.
    identity: SpecIdentity,

    /// Strategy deriving the output filename from the identity.
    resolver: Box<dyn PathResolver>,

    /// [`FileConfig`] substituted for the next sink creation only.
    next_config: Option<FileConfig>,
}

impl FileSinkFactory {
    /// Creates a new [`FileSinkFactory`] for the given specification
    /// `identity`, deriving filenames with the [`UnderscoredLowercase`]
    /// strategy.
    #[must_use]
    pub fn new(identity: SpecIdentity) -> Self {
        Self::with_resolver(identity, Box::new(UnderscoredLowercase::default()))
    }

    /// Creates a new [`FileSinkFactory`] deriving filenames with the
    /// given `resolver`.
    #[must_use]
    pub fn with_resolver(
        identity: SpecIdentity,
        resolver: Box<dyn PathResolver>,
    ) -> Self {
        Self { identity, resolver, next_config: None }
    }

    /// Identity of the specification this factory produces sinks for.
    #[must_use]
    pub fn identity(&self) -> &SpecIdentity {
        &self.identity
    }

    /// Substitutes the given `config` for the next [`create_sink()`]
    /// call only, instead of whatever configuration that call receives.
    ///
    /// [`create_sink()`]: FileSinkFactory::create_sink
    pub fn use_configuration(&mut self, config: FileConfig) {
        self.next_config = Some(config);
    }

    /// Resolves the target path for the given `config` without touching
    /// the filesystem.
    ///
    /// If `config.absolute` is set, the path is rooted at
    /// `config.output_directory`. Otherwise it's rooted at the parent
    /// directory of the specification's originating module, joined with
    /// `config.output_directory`.
    #[must_use]
    pub fn target_path(&self, config: &FileConfig) -> PathBuf {
        let resolved = self.resolver.resolve(&self.identity);
        let stem = Path::new(&resolved)
            .file_stem()
            .map_or_else(|| resolved.clone(), |s| s.to_string_lossy().into_owned());
        let filename = if config.extension.is_empty() {
            stem
        } else {
            format!("{stem}.{}", config.extension.trim_start_matches('.'))
        };

        let root = if config.absolute {
            PathBuf::from(&config.output_directory)
        } else {
            self.identity
                .source()
                .parent()
                .unwrap_or_else(|| Path::new(""))
                .join(&config.output_directory)
        };
        root.join(filename)
    }

    /// Resolves a writable [`FileSink`] for the given `config` (or the
    /// one substituted via [`use_configuration()`]), creating any
    /// missing parent directories.
    ///
    /// The returned sink opens its file lazily, on first write.
    ///
    /// # Errors
    ///
    /// If the target directory cannot be created.
    ///
    /// [`use_configuration()`]: FileSinkFactory::use_configuration
    pub fn create_sink(
        &mut self,
        config: &FileConfig,
    ) -> Result<FileSink, ReportError> {
        let config = self.next_config.take().unwrap_or_else(|| config.clone());
        let path = self.target_path(&config);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(ReportError::Io)?;
        }
        debug!(path = %path.display(), "report sink resolved");
        Ok(FileSink::new(path))
    }
}

impl fmt::Debug for FileSinkFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileSinkFactory")
            .field("identity", &self.identity)
            .field("next_config", &self.next_config)
            .finish_non_exhaustive()
    }
}

/// Writable file-backed sink opening its file lazily, on first write.
///
/// Flushing on release is guaranteed by the standard [`fs::File`] drop
/// discipline of the owning reporter.
#[derive(Debug)]
pub struct FileSink {
    /// Resolved target path of this sink.
    path: PathBuf,

    /// Opened file, if anything has been written already.
    file: Option<fs::File>,
}

impl FileSink {
    /// Creates a new not-yet-opened [`FileSink`] at the given `path`.
    #[must_use]
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path, file: None }
    }

    /// Resolved target path of this sink.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the opened file, opening it if this is the first access.
    fn open(&mut self) -> io::Result<&mut fs::File> {
        match &mut self.file {
            Some(file) => Ok(file),
            file @ None => Ok(file.insert(fs::File::create(&self.path)?)),
        }
    }
}

impl io::Write for FileSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.open()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.as_mut().map_or(Ok(()), io::Write::flush)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    fn identity_in(dir: &Path) -> SpecIdentity {
        SpecIdentity::new("MyDramaticSpec", dir.join("my_dramatic_spec.rs"))
    }

    #[test]
    fn resolves_absolute_paths_from_output_directory() {
        let factory = FileSinkFactory::new(identity_in(Path::new("/src")));
        let config = FileConfig::new("/tmp/reports", true, "txt");

        assert_eq!(
            factory.target_path(&config),
            Path::new("/tmp/reports/my_dramatic_spec.txt"),
        );
    }

    #[test]
    fn resolves_relative_paths_from_spec_source() {
        let factory = FileSinkFactory::new(identity_in(Path::new("/src/specs")));
        let config = FileConfig::with_extension("json");

        assert_eq!(
            factory.target_path(&config),
            Path::new("/src/specs/spec-reports/my_dramatic_spec.json"),
        );
    }

    #[test]
    fn empty_extension_keeps_bare_stem() {
        let factory = FileSinkFactory::new(identity_in(Path::new("/src")));
        let config = FileConfig::new("out", true, "");

        assert_eq!(
            factory.target_path(&config),
            Path::new("out/my_dramatic_spec"),
        );
    }

    #[test]
    fn substituted_configuration_applies_to_next_sink_only() {
        let tmp = tempfile::tempdir().unwrap();
        let mut factory = FileSinkFactory::new(identity_in(tmp.path()));
        let config =
            FileConfig::new(tmp.path().join("out").to_string_lossy(), true, "txt");

        factory.use_configuration(FileConfig::new(
            tmp.path().join("out").to_string_lossy(),
            true,
            "text",
        ));
        let substituted = factory.create_sink(&config).unwrap();
        let plain = factory.create_sink(&config).unwrap();

        assert_eq!(
            substituted.path().extension().and_then(|e| e.to_str()),
            Some("text"),
        );
        assert_eq!(
            plain.path().extension().and_then(|e| e.to_str()),
            Some("txt"),
        );
    }

    #[test]
    fn creates_directories_eagerly_and_file_lazily() {
        let tmp = tempfile::tempdir().unwrap();
        let mut factory = FileSinkFactory::new(identity_in(tmp.path()));
        let config = FileConfig::new(
            tmp.path().join("nested/reports").to_string_lossy(),
            true,
            "txt",
        );

        let mut sink = factory.create_sink(&config).unwrap();

        assert!(tmp.path().join("nested/reports").is_dir());
        assert!(!sink.path().exists(), "file must not exist before first write");

        sink.write_all(b"line\n").unwrap();
        sink.flush().unwrap();
        assert_eq!(fs::read_to_string(sink.path()).unwrap(), "line\n");
    }
}
