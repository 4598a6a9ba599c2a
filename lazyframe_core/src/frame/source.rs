// Copyright 2026 the Lazyframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolution of the iframe source from the reference attribute.

use alloc::string::String;

/// Outcome of resolving an instance's iframe source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IframeSource {
    /// The reference was a fully qualified URL and is used verbatim.
    Qualified(String),
    /// The reference was joined onto a base path.
    Relative(String),
    /// The reference was absent or empty.
    Missing,
}

impl IframeSource {
    /// Resolves `reference` against a base path.
    ///
    /// References starting with `http` are kept as they are. Otherwise the
    /// base path is `explicit_base` if present, else `configured_base`, else
    /// empty, and a non-empty base path gains a trailing `/` when it lacks
    /// one.
    #[must_use]
    pub fn resolve(
        reference: Option<&str>,
        explicit_base: Option<&str>,
        configured_base: Option<&str>,
    ) -> Self {
        let reference = match reference {
            Some(r) if !r.is_empty() => r,
            _ => return Self::Missing,
        };
        if reference.starts_with("http") {
            return Self::Qualified(reference.into());
        }
        let mut src = String::from(explicit_base.or(configured_base).unwrap_or_default());
        if !src.is_empty() && !src.ends_with('/') {
            src.push('/');
        }
        src.push_str(reference);
        Self::Relative(src)
    }

    /// The resolved source, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Qualified(s) | Self::Relative(s) => Some(s),
            Self::Missing => None,
        }
    }
}
