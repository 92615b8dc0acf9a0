// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Consolidated error handling types for reporting.
//!
//! Both kinds of failures surface synchronously at the point of
//! occurrence and are never retried: a broken format configuration or an
//! unwritable output directory is caller-correctable, not transient.

use std::io;

use derive_more::with_trait::{Display, Error, From};

use crate::builder::Format;

/// Top-level error type for all reporting operations.
#[derive(Debug, Display, Error, From)]
pub enum ReportError {
    /// I/O error during sink creation, directory creation or output
    /// writing.
    #[display("I/O operation failed: {_0}")]
    Io(io::Error),

    /// Configuration or format resolution error.
    #[display("configuration error: {_0}")]
    Config(ConfigError),

    /// Failed to serialize structured output.
    #[display("serialization failed: {_0}")]
    Serialization(serde_json::Error),
}

/// Errors of resolving a reporting configuration.
#[derive(Debug, Display, Error)]
pub enum ConfigError {
    /// A requested [`Format`] has neither a registry default nor a
    /// reporter supplied by a custom resolver.
    #[display("no reporter is configured for the `{_0}` format")]
    UnresolvedFormat(#[error(not(source))] Format),
}
