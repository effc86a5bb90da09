// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::entity::Entity;
use crate::{AuthorId, GenreId, UserId};
use std::collections::HashMap;
use std::fmt::{self, Display};

/// Categorical label derived from a preference weight. Never stored
/// independently: whoever changes a weight recomputes the taste.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Taste {
    Liked,
    Neutral,
    Disliked,
}

impl Default for Taste {
    fn default() -> Self {
        Self::Neutral
    }
}

impl Display for Taste {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Liked => "liked",
            Self::Neutral => "neutral",
            Self::Disliked => "disliked",
        };

        write!(f, "{}", name)
    }
}

/// Accumulated affinity of an user for one genre. One row per
/// (user, genre) pair, created lazily on first contact, never deleted.
#[derive(Debug, Clone, Default)]
pub struct GenrePreference {
    pub id: String,
    pub user_id: UserId,
    pub genre_id: GenreId,
    pub weight: f64,
    pub taste: Taste,
}

impl GenrePreference {
    /// A brand-new row: implicit weight 0, neutral taste.
    pub fn new(user_id: &UserId, genre_id: &GenreId) -> Self {
        Self {
            id: format!("gp:{}:{}", user_id, genre_id),
            user_id: user_id.clone(),
            genre_id: genre_id.clone(),
            weight: 0.0,
            taste: Taste::Neutral,
        }
    }
}

impl Entity for GenrePreference {
    type Id = String;

    fn get_id(&self) -> Self::Id {
        self.id.clone()
    }

    fn get_data(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("genre".into(), self.genre_id.clone());
        map.insert("weight".into(), format!("{:.4}", self.weight));
        map.insert("taste".into(), self.taste.to_string());
        map
    }
}

/// Accumulated affinity of an user for one author. Same lifecycle as
/// `GenrePreference`.
#[derive(Debug, Clone, Default)]
pub struct AuthorPreference {
    pub id: String,
    pub user_id: UserId,
    pub author_id: AuthorId,
    pub weight: f64,
    pub taste: Taste,
}

impl AuthorPreference {
    pub fn new(user_id: &UserId, author_id: &AuthorId) -> Self {
        Self {
            id: format!("ap:{}:{}", user_id, author_id),
            user_id: user_id.clone(),
            author_id: author_id.clone(),
            weight: 0.0,
            taste: Taste::Neutral,
        }
    }
}

impl Entity for AuthorPreference {
    type Id = String;

    fn get_id(&self) -> Self::Id {
        self.id.clone()
    }

    fn get_data(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("author".into(), self.author_id.clone());
        map.insert("weight".into(), format!("{:.4}", self.weight));
        map.insert("taste".into(), self.taste.to_string());
        map
    }
}
