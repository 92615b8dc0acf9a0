// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Resolution of specification identities into output paths.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use inflector::Inflector as _;

/// Identity of a single specification unit: its compound name plus the
/// location of its originating module.
///
/// The originating module location is what relative output trees are
/// rooted next to (see [`FileSinkFactory`]).
///
/// [`FileSinkFactory`]: crate::sink::FileSinkFactory
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct SpecIdentity {
    /// Simple compound name (usually mixed-case, e.g. `MyDramaticSpec`).
    name: String,

    /// Filesystem location of the originating module.
    source: PathBuf,
}

impl SpecIdentity {
    /// Creates a new [`SpecIdentity`] out of the given compound `name`
    /// and its originating module `source` location.
    #[must_use]
    pub fn new(name: impl Into<String>, source: impl Into<PathBuf>) -> Self {
        Self { name: name.into(), source: source.into() }
    }

    /// Simple compound name of this specification.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Location of the module this specification originates from.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }
}

impl fmt::Display for SpecIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.source.display())
    }
}

/// Strategy of deriving a canonical relative path from a
/// [`SpecIdentity`].
///
/// Resolution is deterministic and side-effect free.
pub trait PathResolver {
    /// Resolves the given `identity` into a relative path string.
    #[must_use]
    fn resolve(&self, identity: &SpecIdentity) -> String;
}

/// [`PathResolver`] transforming a mixed-case compound name into a
/// lowercase, underscore-separated filename with a configured suffix
/// appended (`MyDramaticSpec` → `my_dramatic_spec.spec`).
///
/// Only the simple name takes part in resolution: two identities with
/// the same simple name but different originating modules resolve to
/// the same path. Callers running such specifications concurrently are
/// responsible for ensuring path uniqueness upstream.
#[derive(Clone, Debug)]
pub struct UnderscoredLowercase {
    /// Suffix appended to every resolved path, including its leading
    /// dot.
    suffix: String,
}

impl UnderscoredLowercase {
    /// Creates a new [`UnderscoredLowercase`] resolver appending the
    /// given `suffix` (e.g. `".spec"`).
    #[must_use]
    pub fn new(suffix: impl Into<String>) -> Self {
        Self { suffix: suffix.into() }
    }
}

impl Default for UnderscoredLowercase {
    fn default() -> Self {
        Self::new(".spec")
    }
}

impl PathResolver for UnderscoredLowercase {
    fn resolve(&self, identity: &SpecIdentity) -> String {
        format!("{}{}", identity.name().to_snake_case(), self.suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_compound_names_to_underscored_lowercase() {
        let resolver = UnderscoredLowercase::default();

        let id = SpecIdentity::new("MyDramaticSpec", "specs/my_dramatic.rs");
        assert_eq!(resolver.resolve(&id), "my_dramatic_spec.spec");
    }

    #[test]
    fn appends_configured_suffix() {
        let resolver = UnderscoredLowercase::new(".story");

        let id = SpecIdentity::new("Checkout", "specs/checkout.rs");
        assert_eq!(resolver.resolve(&id), "checkout.story");
    }

    #[test]
    fn distinct_compound_names_resolve_distinctly() {
        let resolver = UnderscoredLowercase::default();

        let one = SpecIdentity::new("FirstSpec", "a.rs");
        let other = SpecIdentity::new("SecondSpec", "a.rs");
        assert_ne!(resolver.resolve(&one), resolver.resolve(&other));
    }

    #[test]
    fn same_simple_name_from_different_modules_collides() {
        // Documented limitation of the simple-name-only strategy.
        let resolver = UnderscoredLowercase::default();

        let one = SpecIdentity::new("Checkout", "shop/a.rs");
        let other = SpecIdentity::new("Checkout", "billing/b.rs");
        assert_eq!(resolver.resolve(&one), resolver.resolve(&other));
    }
}
