// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use std::fmt::{self, Display};

/// System-created collections, one of each per user. The engine only ever
/// reads them for exclusion.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ShelfKind {
    Favorite,
    WantToRead,
    Reading,
    Read,
}

impl Display for ShelfKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Favorite => "favorite",
            Self::WantToRead => "want-to-read",
            Self::Reading => "reading",
            Self::Read => "read",
        };

        write!(f, "{}", name)
    }
}

/// What an user answered to a delivered recommendation.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RecommendationResponse {
    Relevant,
    Irrelevant,
}
