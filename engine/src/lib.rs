//! The recommendation core: three request flows (similar books,
//! possibly-liked books, user-interest books) plus the preference update
//! and rating entry points, all built against the `controller` traits.

pub mod aggregate;
pub mod error;
pub mod relevance;
pub mod similarity;
pub mod update;
pub mod weights;

use crate::error::ErrorKind;
use crate::similarity::Profile;
use config::Config;
use controller::{
    Book, BookFilter, BookId, Catalog, Decorator, GenreId, NoSimilarUsers, PageSettings, Rating,
    Result, SimilarUsersFinder, UserAction, UserId, UserStore,
};
use log::debug;
use rand::seq::SliceRandom;
use rand::thread_rng;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

pub struct Engine<'a, C, F = NoSimilarUsers>
where
    C: Catalog + UserStore + Decorator,
    F: SimilarUsersFinder,
{
    controller: &'a C,
    config: Config,
    finder: F,
}

impl<'a, C> Engine<'a, C>
where
    C: Catalog + UserStore + Decorator,
{
    pub fn with_controller(controller: &'a C, config: Config) -> Self {
        Self {
            controller,
            config,
            finder: NoSimilarUsers,
        }
    }
}

impl<'a, C, F> Engine<'a, C, F>
where
    C: Catalog + UserStore + Decorator,
    F: SimilarUsersFinder,
{
    /// Same engine, but with a collaborative finder wired in.
    pub fn with_finder(controller: &'a C, config: Config, finder: F) -> Self {
        Self {
            controller,
            config,
            finder,
        }
    }

    /// Books like the given one. A missing reference yields an empty page:
    /// "no such book" and "no similar books" look the same to the caller
    /// here. Recall is intentionally broad (one matching facet is enough
    /// to enter the pool), refined by scoring the paged survivors.
    pub fn similar_books(
        &self,
        book_id: &BookId,
        page: PageSettings,
        user: Option<&UserId>,
    ) -> Result<Vec<Book>> {
        let reference = match self.controller.book(book_id)? {
            Some(book) => book,
            None => return Ok(Vec::new()),
        };

        let profile = Profile::from_book(&reference, &self.config.volume);

        let filters = [
            BookFilter::Authors(reference.authors.clone()),
            BookFilter::Genres(reference.genres.clone()),
            BookFilter::AgeRestriction(reference.age_restriction),
            BookFilter::Language(reference.language.clone()),
            BookFilter::VolumeSize(similarity::volume_of(&reference, &self.config.volume)),
        ];

        let mut pool = BTreeMap::new();
        for filter in &filters {
            for book in self.controller.books_by(filter)? {
                pool.entry(book.id.clone()).or_insert(book);
            }
        }

        debug!("similar to {}: pool of {} candidates", book_id, pool.len());

        let candidates: Vec<_> = pool.into_iter().map(|(_, book)| book).collect();
        let survivors = relevance::exclude(
            self.controller,
            candidates,
            user,
            self.config.preference.veto_threshold,
        )?;

        // Similarity is only computed on one page's worth of survivors,
        // then that page is re-sorted locally. Relevance filtering above
        // already ran pool-wide.
        let mut page_books = paged(survivors, &page);
        page_books.retain(|book| book.id != reference.id);

        for book in &mut page_books {
            book.similarity_weight = similarity::score_normalized(
                &profile,
                book,
                &self.config.similarity,
                &self.config.volume,
            );
        }

        let corpus = aggregate::corpus_average(&self.controller.books()?);
        let trusted = self.config.rating.trusted_count;

        page_books.sort_by(|a, b| {
            descending(a.similarity_weight, b.similarity_weight).then_with(|| {
                descending(
                    aggregate::weighted_rating(a, corpus, trusted),
                    aggregate::weighted_rating(b, corpus, trusted),
                )
            })
        });

        if let Some(user) = user {
            self.controller.decorate(&mut page_books, user)?;
        }

        Ok(page_books)
    }

    /// Genre-weighted fallback recommendations. Per preferred genre (all
    /// catalog genres when the profile is too thin to trust), the best
    /// books by weighted rating are pre-selected; the union is shuffled
    /// on purpose so the page does not fossilize.
    pub fn possibly_liked_books(
        &self,
        page: PageSettings,
        user: Option<&UserId>,
    ) -> Result<Vec<Book>> {
        let user_id = user.ok_or(ErrorKind::Unauthorized)?;

        if self.controller.user(user_id)?.is_none() {
            return Err(ErrorKind::UserNotFound(user_id.clone()).into());
        }

        let prefs: Vec<_> = self
            .controller
            .genre_preferences(user_id)?
            .into_iter()
            .filter(|pref| update::is_preferred(pref.taste))
            .collect();

        let similar = self.finder.similar_users(user_id)?;
        if !similar.is_empty() {
            // A real finder is plugged in; the collaborative ranking path
            // itself is still the fallback below.
            debug!(
                "found {} similar users for {}, collaborative ranking not wired",
                similar.len(),
                user_id
            );
        }

        let weight_by_genre: HashMap<GenreId, f64> = prefs
            .iter()
            .map(|pref| (pref.genre_id.clone(), pref.weight))
            .collect();

        let cold_start = prefs.len() < self.config.cold_start.min_genre_preferences;
        let genre_ids: Vec<GenreId> = if cold_start {
            self.controller
                .genres()?
                .into_iter()
                .map(|genre| genre.id)
                .collect()
        } else {
            prefs.into_iter().map(|pref| pref.genre_id).collect()
        };

        let corpus = aggregate::corpus_average(&self.controller.books()?);
        let trusted = self.config.rating.trusted_count;

        let mut pool = BTreeMap::new();
        for genre_id in genre_ids {
            let take = self.per_genre_take(weight_by_genre.get(&genre_id).copied());

            let mut matches = self
                .controller
                .books_by(&BookFilter::Genres(single(genre_id)))?;
            matches.sort_by(|a, b| {
                descending(
                    aggregate::weighted_rating(a, corpus, trusted),
                    aggregate::weighted_rating(b, corpus, trusted),
                )
            });

            for book in matches.into_iter().take(take) {
                pool.entry(book.id.clone()).or_insert(book);
            }
        }

        let candidates: Vec<_> = pool.into_iter().map(|(_, book)| book).collect();
        let mut survivors = relevance::exclude(
            self.controller,
            candidates,
            Some(user_id),
            self.config.preference.veto_threshold,
        )?;

        survivors.shuffle(&mut thread_rng());

        let mut page_books = paged(survivors, &page);
        self.controller.decorate(&mut page_books, user_id)?;

        Ok(page_books)
    }

    /// Books matching the user's accumulated taste profile. An empty
    /// profile is a valid empty state, not a failure.
    pub fn user_interest_books(
        &self,
        page: PageSettings,
        user: Option<&UserId>,
    ) -> Result<Vec<Book>> {
        let user_id = user.ok_or(ErrorKind::Unauthorized)?;

        let user = self
            .controller
            .user(user_id)?
            .ok_or_else(|| ErrorKind::UserNotFound(user_id.clone()))?;

        let genre_prefs = self.controller.genre_preferences(user_id)?;
        let author_prefs = self.controller.author_preferences(user_id)?;

        if genre_prefs.is_empty() && author_prefs.is_empty() {
            return Ok(Vec::new());
        }

        let preferred_genres: HashSet<GenreId> = genre_prefs
            .into_iter()
            .filter(|pref| update::is_preferred(pref.taste))
            .map(|pref| pref.genre_id)
            .collect();
        let preferred_authors: HashSet<_> = author_prefs
            .into_iter()
            .filter(|pref| update::is_preferred(pref.taste))
            .map(|pref| pref.author_id)
            .collect();

        let mut pool = BTreeMap::new();
        for filter in &[
            BookFilter::Genres(preferred_genres.clone()),
            BookFilter::Authors(preferred_authors.clone()),
        ] {
            for book in self.controller.books_by(filter)? {
                pool.entry(book.id.clone()).or_insert(book);
            }
        }

        let mut candidates = Vec::new();
        for (_, mut book) in pool {
            book.similarity_weight = similarity::interest_score(
                &book,
                &preferred_genres,
                &preferred_authors,
                &user,
                &self.config.similarity,
                &self.config.volume,
            );

            // Below the bar the book is not interesting enough for this
            // path, whatever the catalog thinks of it.
            if book.similarity_weight >= self.config.similarity.min_interest {
                candidates.push(book);
            }
        }

        let mut survivors = relevance::exclude(
            self.controller,
            candidates,
            Some(user_id),
            self.config.preference.veto_threshold,
        )?;

        self.controller.decorate(&mut survivors, user_id)?;

        Ok(paged(self.bucket_and_shuffle(survivors), &page))
    }

    /// Record or overwrite a rating and keep the book's aggregate mean
    /// consistent, then feed the event into the preference model.
    pub fn rate_book(&self, user_id: &UserId, book_id: &BookId, value: i32) -> Result<()> {
        if !(1..=5).contains(&value) {
            return Err(ErrorKind::InvalidRating(value).into());
        }

        if self.controller.user(user_id)?.is_none() {
            return Err(ErrorKind::UserNotFound(user_id.clone()).into());
        }

        let mut book = self
            .controller
            .book(book_id)?
            .ok_or_else(|| ErrorKind::BookNotFound(book_id.clone()))?;

        match self.controller.rating(user_id, book_id)? {
            Some(mut existing) => {
                aggregate::revise_rating(&mut book, existing.value, value);
                existing.value = value;
                self.controller.save_rating(existing)?;
            }
            None => {
                aggregate::record_new_rating(&mut book, value);
                self.controller.save_rating(Rating::new(user_id, book_id, value))?;
            }
        }

        self.controller
            .update_book_rating(book_id, book.rating, book.ratings_count)?;

        self.apply_action(user_id, book_id, &UserAction::Rated(value))
    }

    /// Feed any user action into the preference model. Unknown users,
    /// unknown books and unrecognized actions are logged no-ops.
    pub fn apply_action(
        &self,
        user_id: &UserId,
        book_id: &BookId,
        action: &UserAction,
    ) -> Result<()> {
        update::apply(self.controller, &self.config, user_id, book_id, action)
    }

    /// `base_take * (bias + weight * scale)`, with the default weight
    /// standing in when the user has no row for the genre (which makes
    /// the take come out at exactly `base_take`). Tuned constants, kept
    /// verbatim.
    fn per_genre_take(&self, weight: Option<f64>) -> usize {
        let cold = &self.config.cold_start;
        let weight = weight.unwrap_or(cold.default_weight);

        (cold.base_take as f64 * (cold.take_bias + weight * cold.take_scale)).round() as usize
    }

    /// Tiered anti-staleness ranking: the most-similar tier always comes
    /// first, but inside a tier the order is shuffled per request.
    fn bucket_and_shuffle(&self, books: Vec<Book>) -> Vec<Book> {
        let mut best = Vec::new();
        let mut good = Vec::new();
        let mut rest = Vec::new();

        for book in books {
            if book.similarity_weight >= self.config.similarity.best_bucket {
                best.push(book);
            } else if book.similarity_weight >= self.config.similarity.good_bucket {
                good.push(book);
            } else {
                rest.push(book);
            }
        }

        let mut rng = thread_rng();
        best.shuffle(&mut rng);
        good.shuffle(&mut rng);
        rest.shuffle(&mut rng);

        best.into_iter().chain(good).chain(rest).collect()
    }
}

fn paged(books: Vec<Book>, page: &PageSettings) -> Vec<Book> {
    books
        .into_iter()
        .skip(page.offset())
        .take(page.limit)
        .collect()
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

fn single(id: GenreId) -> HashSet<GenreId> {
    let mut set = HashSet::new();
    set.insert(id);
    set
}
