pub mod demo;

use config::VolumeConfig;
use controller::error::ErrorKind;
use controller::{
    AuthorId, AuthorPreference, Book, BookFilter, BookId, Catalog, Decorator, Genre, GenreId,
    GenrePreference, Rating, RecommendationResponse, Result, ShelfKind, User, UserId, UserStore,
    VolumeSize,
};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Default)]
struct Store {
    books: HashMap<BookId, Book>,
    genres: HashMap<GenreId, Genre>,
    users: HashMap<UserId, User>,
    genre_prefs: HashMap<(UserId, GenreId), GenrePreference>,
    author_prefs: HashMap<(UserId, AuthorId), AuthorPreference>,
    ratings: HashMap<(UserId, BookId), Rating>,
    shelves: HashMap<(UserId, ShelfKind), HashSet<BookId>>,
    responses: HashMap<(UserId, BookId), RecommendationResponse>,
}

/// Catalog, user store and decorator over plain maps. Stands in for the
/// database-backed controllers during tests and in the REPL; everything
/// goes through `RefCell`, so writes from one borrow at a time only.
#[derive(Debug, Default)]
pub struct MemoryController {
    volume: VolumeConfig,
    store: RefCell<Store>,
}

impl MemoryController {
    pub fn new() -> Self {
        Self::with_volume(VolumeConfig::default())
    }

    pub fn with_volume(volume: VolumeConfig) -> Self {
        Self {
            volume,
            store: RefCell::new(Store::default()),
        }
    }

    fn volume_of(&self, book: &Book) -> VolumeSize {
        VolumeSize::from_pages(
            book.pages,
            self.volume.short_max,
            self.volume.medium_max,
            self.volume.long_max,
        )
    }

    pub fn add_book(&self, book: Book) {
        self.store.borrow_mut().books.insert(book.id.clone(), book);
    }

    pub fn add_genre(&self, genre: Genre) {
        self.store
            .borrow_mut()
            .genres
            .insert(genre.id.clone(), genre);
    }

    pub fn add_user(&self, user: User) {
        self.store.borrow_mut().users.insert(user.id.clone(), user);
    }

    pub fn shelve(&self, user: &UserId, kind: ShelfKind, book: &BookId) {
        self.store
            .borrow_mut()
            .shelves
            .entry((user.clone(), kind))
            .or_default()
            .insert(book.clone());
    }

    pub fn unshelve(&self, user: &UserId, kind: ShelfKind, book: &BookId) {
        if let Some(shelf) = self
            .store
            .borrow_mut()
            .shelves
            .get_mut(&(user.clone(), kind))
        {
            shelf.remove(book);
        }
    }

    pub fn respond(&self, user: &UserId, book: &BookId, response: RecommendationResponse) {
        self.store
            .borrow_mut()
            .responses
            .insert((user.clone(), book.clone()), response);
    }
}

impl Catalog for MemoryController {
    fn book(&self, id: &BookId) -> Result<Option<Book>> {
        Ok(self.store.borrow().books.get(id).cloned())
    }

    fn books(&self) -> Result<Vec<Book>> {
        let mut books: Vec<_> = self.store.borrow().books.values().cloned().collect();
        books.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(books)
    }

    fn books_by(&self, by: &BookFilter) -> Result<Vec<Book>> {
        let store = self.store.borrow();

        let mut matched: Vec<_> = store
            .books
            .values()
            .filter(|book| match by {
                BookFilter::Authors(ids) => !book.authors.is_disjoint(ids),
                BookFilter::Genres(ids) => !book.genres.is_disjoint(ids),
                BookFilter::Language(code) => &book.language == code,
                BookFilter::AgeRestriction(age) => &book.age_restriction == age,
                BookFilter::VolumeSize(size) => &self.volume_of(book) == size,
            })
            .cloned()
            .collect();

        matched.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(matched)
    }

    fn genres(&self) -> Result<Vec<Genre>> {
        let mut genres: Vec<_> = self.store.borrow().genres.values().cloned().collect();
        genres.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(genres)
    }

    fn update_book_rating(&self, id: &BookId, rating: f64, ratings_count: u32) -> Result<()> {
        let mut store = self.store.borrow_mut();
        let book = store
            .books
            .get_mut(id)
            .ok_or_else(|| ErrorKind::NotFoundById(id.clone()))?;

        book.rating = rating;
        book.ratings_count = ratings_count;
        Ok(())
    }
}

impl UserStore for MemoryController {
    fn user(&self, id: &UserId) -> Result<Option<User>> {
        Ok(self.store.borrow().users.get(id).cloned())
    }

    fn genre_preferences(&self, user: &UserId) -> Result<Vec<GenrePreference>> {
        let mut prefs: Vec<_> = self
            .store
            .borrow()
            .genre_prefs
            .values()
            .filter(|pref| &pref.user_id == user)
            .cloned()
            .collect();

        prefs.sort_by(|a, b| a.genre_id.cmp(&b.genre_id));
        Ok(prefs)
    }

    fn author_preferences(&self, user: &UserId) -> Result<Vec<AuthorPreference>> {
        let mut prefs: Vec<_> = self
            .store
            .borrow()
            .author_prefs
            .values()
            .filter(|pref| &pref.user_id == user)
            .cloned()
            .collect();

        prefs.sort_by(|a, b| a.author_id.cmp(&b.author_id));
        Ok(prefs)
    }

    fn upsert_genre_preference(&self, pref: GenrePreference) -> Result<()> {
        self.store
            .borrow_mut()
            .genre_prefs
            .insert((pref.user_id.clone(), pref.genre_id.clone()), pref);
        Ok(())
    }

    fn upsert_author_preference(&self, pref: AuthorPreference) -> Result<()> {
        self.store
            .borrow_mut()
            .author_prefs
            .insert((pref.user_id.clone(), pref.author_id.clone()), pref);
        Ok(())
    }

    fn rating(&self, user: &UserId, book: &BookId) -> Result<Option<Rating>> {
        Ok(self
            .store
            .borrow()
            .ratings
            .get(&(user.clone(), book.clone()))
            .cloned())
    }

    fn rated_book_ids(&self, user: &UserId) -> Result<HashSet<BookId>> {
        Ok(self
            .store
            .borrow()
            .ratings
            .values()
            .filter(|rating| &rating.user_id == user)
            .map(|rating| rating.book_id.clone())
            .collect())
    }

    fn save_rating(&self, rating: Rating) -> Result<()> {
        self.store
            .borrow_mut()
            .ratings
            .insert((rating.user_id.clone(), rating.book_id.clone()), rating);
        Ok(())
    }

    fn shelf_book_ids(&self, user: &UserId, kinds: &[ShelfKind]) -> Result<HashSet<BookId>> {
        let store = self.store.borrow();
        let mut ids = HashSet::new();

        for kind in kinds {
            if let Some(shelf) = store.shelves.get(&(user.clone(), *kind)) {
                ids.extend(shelf.iter().cloned());
            }
        }

        Ok(ids)
    }

    fn irrelevant_response_ids(&self, user: &UserId) -> Result<HashSet<BookId>> {
        Ok(self
            .store
            .borrow()
            .responses
            .iter()
            .filter(|((uid, _), response)| {
                uid == user && **response == RecommendationResponse::Irrelevant
            })
            .map(|((_, book_id), _)| book_id.clone())
            .collect())
    }
}

impl Decorator for MemoryController {
    fn decorate(&self, books: &mut [Book], user: &UserId) -> Result<()> {
        let store = self.store.borrow();
        let favorites = store
            .shelves
            .get(&(user.clone(), ShelfKind::Favorite))
            .cloned()
            .unwrap_or_default();

        for book in books {
            book.is_favorite = favorites.contains(&book.id);
            book.user_rating = store
                .ratings
                .get(&(user.clone(), book.id.clone()))
                .map(|rating| rating.value);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common_macros::hash_set;

    fn controller_with_books() -> MemoryController {
        let controller = MemoryController::new();

        controller.add_book(Book {
            id: "b1".into(),
            title: "A Study in Scarlet".into(),
            language: "en".into(),
            pages: 120,
            genres: hash_set! { "mystery".to_string() },
            authors: hash_set! { "doyle".to_string() },
            ..Default::default()
        });

        controller.add_book(Book {
            id: "b2".into(),
            title: "The Hobbit".into(),
            language: "en".into(),
            pages: 310,
            genres: hash_set! { "fantasy".to_string() },
            authors: hash_set! { "tolkien".to_string() },
            ..Default::default()
        });

        controller
    }

    #[test]
    fn filter_by_genre_and_volume() {
        let controller = controller_with_books();

        let mystery = controller
            .books_by(&BookFilter::genres(vec!["mystery"]))
            .unwrap();
        assert_eq!(1, mystery.len());
        assert_eq!("b1", mystery[0].id);

        let short = controller
            .books_by(&BookFilter::VolumeSize(VolumeSize::Short))
            .unwrap();
        assert_eq!(1, short.len());
        assert_eq!("b1", short[0].id);
    }

    #[test]
    fn decorate_fills_request_fields() {
        let controller = controller_with_books();
        let user: UserId = "u1".into();

        controller.add_user(User {
            id: user.clone(),
            name: "Ada".into(),
            ..Default::default()
        });
        controller.shelve(&user, ShelfKind::Favorite, &"b2".to_string());
        controller
            .save_rating(Rating::new(&user, &"b1".to_string(), 4))
            .unwrap();

        let mut books = controller.books().unwrap();
        controller.decorate(&mut books, &user).unwrap();

        let b1 = books.iter().find(|b| b.id == "b1").unwrap();
        let b2 = books.iter().find(|b| b.id == "b2").unwrap();

        assert_eq!(Some(4), b1.user_rating);
        assert!(!b1.is_favorite);
        assert!(b2.is_favorite);
        assert_eq!(None, b2.user_rating);
    }

    #[test]
    fn upsert_preference_replaces_row() {
        let controller = MemoryController::new();
        let user: UserId = "u1".into();

        let mut pref = GenrePreference::new(&user, &"fantasy".to_string());
        controller.upsert_genre_preference(pref.clone()).unwrap();

        pref.weight = 0.5;
        controller.upsert_genre_preference(pref).unwrap();

        let prefs = controller.genre_preferences(&user).unwrap();
        assert_eq!(1, prefs.len());
        assert!((prefs[0].weight - 0.5).abs() < 1e-9);
    }
}
