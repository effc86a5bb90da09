// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::book::{AgeRestriction, VolumeSize};
use crate::{AuthorId, GenreId};
use std::collections::HashSet;
use std::fmt::{self, Display};

/// A single catalog facet. Filters never compose on their own, the engine
/// unions the results of independent lookups to build a candidate pool.
#[derive(Debug, Clone, PartialEq)]
pub enum BookFilter {
    Authors(HashSet<AuthorId>),
    Genres(HashSet<GenreId>),
    Language(String),
    AgeRestriction(AgeRestriction),
    VolumeSize(VolumeSize),
}

impl BookFilter {
    pub fn authors<I>(ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<AuthorId>,
    {
        Self::Authors(ids.into_iter().map(Into::into).collect())
    }

    pub fn genres<I>(ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<GenreId>,
    {
        Self::Genres(ids.into_iter().map(Into::into).collect())
    }

    pub fn language(code: &str) -> Self {
        Self::Language(code.into())
    }
}

impl Display for BookFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookFilter::Authors(ids) => write!(f, "authors({})", ids.len()),
            BookFilter::Genres(ids) => write!(f, "genres({})", ids.len()),
            BookFilter::Language(code) => write!(f, "language({})", code),
            BookFilter::AgeRestriction(age) => write!(f, "age({})", age),
            BookFilter::VolumeSize(size) => write!(f, "volume({})", size),
        }
    }
}
