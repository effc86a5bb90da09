// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::shelf::RecommendationResponse;
use std::fmt::{self, Display};

/// Everything an user can do to a book that moves their taste profile.
/// Unknown payloads become `Other` and are ignored downstream instead of
/// failing the request.
#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    AddedToFavorites,
    RemovedFromFavorites,
    Rated(i32),
    FinishedReading,
    StartedReading,
    WantToRead,
    RespondedToRecommendation(RecommendationResponse),
    Other(String),
}

impl UserAction {
    /// Map a wire payload to an action. `rated` carries its value
    /// separately, so it is not parseable from here.
    pub fn from_payload(payload: &str) -> Self {
        match payload {
            "favorite" => Self::AddedToFavorites,
            "unfavorite" => Self::RemovedFromFavorites,
            "finished" => Self::FinishedReading,
            "started" => Self::StartedReading,
            "want-to-read" => Self::WantToRead,
            "relevant" => Self::RespondedToRecommendation(RecommendationResponse::Relevant),
            "irrelevant" => Self::RespondedToRecommendation(RecommendationResponse::Irrelevant),
            other => Self::Other(other.to_string()),
        }
    }
}

impl Display for UserAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddedToFavorites => write!(f, "favorite"),
            Self::RemovedFromFavorites => write!(f, "unfavorite"),
            Self::Rated(value) => write!(f, "rated({})", value),
            Self::FinishedReading => write!(f, "finished"),
            Self::StartedReading => write!(f, "started"),
            Self::WantToRead => write!(f, "want-to-read"),
            Self::RespondedToRecommendation(RecommendationResponse::Relevant) => {
                write!(f, "relevant")
            }
            Self::RespondedToRecommendation(RecommendationResponse::Irrelevant) => {
                write!(f, "irrelevant")
            }
            Self::Other(payload) => write!(f, "other({})", payload),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_payloads() {
        assert_eq!(
            UserAction::AddedToFavorites,
            UserAction::from_payload("favorite")
        );
        assert_eq!(
            UserAction::RespondedToRecommendation(RecommendationResponse::Irrelevant),
            UserAction::from_payload("irrelevant")
        );
    }

    #[test]
    fn unknown_payloads_are_other() {
        assert_eq!(
            UserAction::Other("poked".into()),
            UserAction::from_payload("poked")
        );
    }
}
