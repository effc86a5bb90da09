// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::entity::Entity;
use crate::{BookId, UserId};
use std::collections::HashMap;

/// One rating row per (user, book) pair, value in [1, 5]. Re-rating
/// overwrites the value, it never duplicates the row.
#[derive(Debug, Clone, Default)]
pub struct Rating {
    pub id: String,
    pub user_id: UserId,
    pub book_id: BookId,
    pub value: i32,
}

impl Rating {
    pub fn new(user_id: &UserId, book_id: &BookId, value: i32) -> Self {
        Self {
            id: format!("r:{}:{}", user_id, book_id),
            user_id: user_id.clone(),
            book_id: book_id.clone(),
            value,
        }
    }
}

impl Entity for Rating {
    type Id = String;

    fn get_id(&self) -> Self::Id {
        self.id.clone()
    }

    fn get_data(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("book".into(), self.book_id.clone());
        map.insert("value".into(), self.value.to_string());
        map
    }
}

/// Seam for anything carrying incremental rating aggregates. The engine's
/// aggregator works against this instead of concrete catalog types.
pub trait Rateable {
    fn rating(&self) -> f64;
    fn ratings_count(&self) -> u32;
    fn set_rating(&mut self, rating: f64);
    fn set_ratings_count(&mut self, count: u32);
}

impl Rateable for crate::book::Book {
    fn rating(&self) -> f64 {
        self.rating
    }

    fn ratings_count(&self) -> u32 {
        self.ratings_count
    }

    fn set_rating(&mut self, rating: f64) {
        self.rating = rating;
    }

    fn set_ratings_count(&mut self, count: u32) {
        self.ratings_count = count;
    }
}
