// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

pub mod action;
pub mod book;
pub mod entity;
pub mod error;
pub mod filter;
pub mod preference;
pub mod rating;
pub mod shelf;
pub mod user;

use anyhow::Error;
use std::collections::HashSet;

pub use action::UserAction;
pub use book::{AgeRestriction, Author, Book, Genre, VolumeSize};
pub use entity::{Entity, ToTable};
pub use filter::BookFilter;
pub use preference::{AuthorPreference, GenrePreference, Taste};
pub use rating::{Rateable, Rating};
pub use shelf::{RecommendationResponse, ShelfKind};
pub use user::User;

pub type Result<T> = std::result::Result<T, Error>;

pub type BookId = String;
pub type GenreId = String;
pub type AuthorId = String;
pub type UserId = String;

/// Page/limit pair used by every recommendation flow. Pages start at 1,
/// anything below is treated as the first page.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct PageSettings {
    pub page: usize,
    pub limit: usize,
}

impl PageSettings {
    pub fn new(page: usize, limit: usize) -> Self {
        Self { page, limit }
    }

    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1) * self.limit
    }
}

impl Default for PageSettings {
    fn default() -> Self {
        Self { page: 1, limit: 10 }
    }
}

/// Read access to the book catalog. Each `BookFilter` variant is an
/// independent predicate, callers compose them by unioning results.
pub trait Catalog {
    /// Get a book with its genre and author references
    fn book(&self, id: &BookId) -> Result<Option<Book>>;

    /// Get all books
    fn books(&self) -> Result<Vec<Book>>;

    /// Get books that matched a single facet filter
    fn books_by(&self, by: &BookFilter) -> Result<Vec<Book>>;

    /// Get all genres
    fn genres(&self) -> Result<Vec<Genre>>;

    /// Persist aggregate rating fields maintained by the engine
    fn update_book_rating(&self, id: &BookId, rating: f64, ratings_count: u32) -> Result<()>;
}

/// Per-user state: existence, preference rows, ratings, shelves and
/// recommendation responses.
pub trait UserStore {
    /// Get an user with their stored profile fields
    fn user(&self, id: &UserId) -> Result<Option<User>>;

    /// Get all genre preference rows for an user
    fn genre_preferences(&self, user: &UserId) -> Result<Vec<GenrePreference>>;

    /// Get all author preference rows for an user
    fn author_preferences(&self, user: &UserId) -> Result<Vec<AuthorPreference>>;

    /// Insert or replace the row for (user, genre)
    fn upsert_genre_preference(&self, pref: GenrePreference) -> Result<()>;

    /// Insert or replace the row for (user, author)
    fn upsert_author_preference(&self, pref: AuthorPreference) -> Result<()>;

    /// Get the rating an user gave to a book, if any
    fn rating(&self, user: &UserId, book: &BookId) -> Result<Option<Rating>>;

    /// Ids of every book the user has rated
    fn rated_book_ids(&self, user: &UserId) -> Result<HashSet<BookId>>;

    /// Insert or replace the rating row for (user, book)
    fn save_rating(&self, rating: Rating) -> Result<()>;

    /// Ids of books sitting on any of the given static shelves
    fn shelf_book_ids(&self, user: &UserId, kinds: &[ShelfKind]) -> Result<HashSet<BookId>>;

    /// Ids of books the user marked as irrelevant recommendations
    fn irrelevant_response_ids(&self, user: &UserId) -> Result<HashSet<BookId>>;
}

/// Fills the per-request `is_favorite` and `user_rating` fields on a list
/// of books about to be returned to an user.
pub trait Decorator {
    fn decorate(&self, books: &mut [Book], user: &UserId) -> Result<()>;
}

/// Extension point for a collaborative path: find users with a preference
/// profile close to the given one. The engine consults this before falling
/// back to genre-weighted recommendations.
pub trait SimilarUsersFinder {
    fn similar_users(&self, user: &UserId) -> Result<Vec<UserId>>;
}

/// Default finder: no collaborative data source is wired in, so it never
/// yields anyone. Substitute a real implementation without touching the
/// recommendation flows.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSimilarUsers;

impl SimilarUsersFinder for NoSimilarUsers {
    fn similar_users(&self, _user: &UserId) -> Result<Vec<UserId>> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_settings_offset() {
        assert_eq!(0, PageSettings::new(1, 10).offset());
        assert_eq!(10, PageSettings::new(2, 10).offset());
        assert_eq!(0, PageSettings::new(0, 10).offset());
    }

    #[test]
    fn no_similar_users_is_empty() {
        let finder = NoSimilarUsers;
        assert!(finder.similar_users(&"42".to_string()).unwrap().is_empty());
    }
}
