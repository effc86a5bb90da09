// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::entity::Entity;
use crate::error::ErrorKind;
use crate::{AuthorId, BookId, GenreId};
use std::collections::{HashMap, HashSet};
use std::fmt::{self, Display};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum AgeRestriction {
    Everyone,
    Children,
    Teen,
    YoungAdult,
    Mature,
}

impl Default for AgeRestriction {
    fn default() -> Self {
        Self::Everyone
    }
}

impl Display for AgeRestriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Everyone => "everyone",
            Self::Children => "children",
            Self::Teen => "teen",
            Self::YoungAdult => "young-adult",
            Self::Mature => "mature",
        };

        write!(f, "{}", name)
    }
}

impl FromStr for AgeRestriction {
    type Err = ErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "everyone" => Ok(Self::Everyone),
            "children" => Ok(Self::Children),
            "teen" => Ok(Self::Teen),
            "young-adult" => Ok(Self::YoungAdult),
            "mature" => Ok(Self::Mature),
            other => Err(ErrorKind::ValueConvert(other.to_string())),
        }
    }
}

/// Coarse page-count category. The breakpoints are configuration, callers
/// pass them in (see the `config` crate).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum VolumeSize {
    Short,
    Medium,
    Long,
    VeryLong,
}

impl VolumeSize {
    pub fn from_pages(pages: u32, short_max: u32, medium_max: u32, long_max: u32) -> Self {
        if pages <= short_max {
            Self::Short
        } else if pages <= medium_max {
            Self::Medium
        } else if pages <= long_max {
            Self::Long
        } else {
            Self::VeryLong
        }
    }
}

impl Display for VolumeSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
            Self::VeryLong => "very-long",
        };

        write!(f, "{}", name)
    }
}

impl FromStr for VolumeSize {
    type Err = ErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short" => Ok(Self::Short),
            "medium" => Ok(Self::Medium),
            "long" => Ok(Self::Long),
            "very-long" => Ok(Self::VeryLong),
            other => Err(ErrorKind::ValueConvert(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub language: String,
    pub pages: u32,
    pub age_restriction: AgeRestriction,
    pub genres: HashSet<GenreId>,
    pub authors: HashSet<AuthorId>,

    // Aggregate fields, maintained incrementally by the engine.
    pub rating: f64,
    pub ratings_count: u32,

    // Per-request fields, reset on every recommendation pass.
    pub similarity_weight: f64,
    pub is_favorite: bool,
    pub user_rating: Option<i32>,
}

impl Entity for Book {
    type Id = BookId;

    fn get_id(&self) -> Self::Id {
        self.id.clone()
    }

    fn get_data(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("title".into(), self.title.clone());
        map.insert("language".into(), self.language.clone());
        map.insert("pages".into(), self.pages.to_string());
        map.insert("age".into(), self.age_restriction.to_string());
        map.insert("rating".into(), format!("{:.2}", self.rating));
        map.insert("votes".into(), self.ratings_count.to_string());
        map
    }
}

#[derive(Debug, Clone, Default)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

impl Entity for Genre {
    type Id = GenreId;

    fn get_id(&self) -> Self::Id {
        self.id.clone()
    }

    fn get_data(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("name".into(), self.name.clone());
        map
    }
}

#[derive(Debug, Clone, Default)]
pub struct Author {
    pub id: AuthorId,
    pub name: String,
}

impl Entity for Author {
    type Id = AuthorId;

    fn get_id(&self) -> Self::Id {
        self.id.clone()
    }

    fn get_data(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("name".into(), self.name.clone());
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_size_breakpoints() {
        assert_eq!(VolumeSize::Short, VolumeSize::from_pages(150, 150, 350, 600));
        assert_eq!(VolumeSize::Medium, VolumeSize::from_pages(151, 150, 350, 600));
        assert_eq!(VolumeSize::Long, VolumeSize::from_pages(600, 150, 350, 600));
        assert_eq!(VolumeSize::VeryLong, VolumeSize::from_pages(601, 150, 350, 600));
    }

    #[test]
    fn age_restriction_roundtrip() {
        for age in &["everyone", "children", "teen", "young-adult", "mature"] {
            let parsed: AgeRestriction = age.parse().unwrap();
            assert_eq!(*age, parsed.to_string());
        }

        assert!("adult".parse::<AgeRestriction>().is_err());
    }
}
