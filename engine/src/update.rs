//! Applies an user action to their per-genre and per-author preference
//! rows: every genre/author the book carries gets its weight smoothed by
//! the action's delta, missing rows are created from weight 0. One row
//! per (user, target) pair, always.

use crate::weights;
use config::Config;
use controller::{
    AuthorPreference, Catalog, GenrePreference, Result, UserAction, UserId, UserStore,
};
use controller::{BookId, Taste};
use log::{debug, warn};
use std::collections::HashMap;

pub fn apply<C>(
    controller: &C,
    config: &Config,
    user_id: &UserId,
    book_id: &BookId,
    action: &UserAction,
) -> Result<()>
where
    C: Catalog + UserStore,
{
    if controller.user(user_id)?.is_none() {
        warn!("preference update for unknown user({}), skipping", user_id);
        return Ok(());
    }

    let book = match controller.book(book_id)? {
        Some(book) => book,
        None => {
            warn!("preference update for unknown book({}), skipping", book_id);
            return Ok(());
        }
    };

    let delta = weights::delta_for(action, &config.preference);
    if delta == 0.0 {
        debug!("action {} carries no preference delta, skipping", action);
        return Ok(());
    }

    let smoothing = config.preference.smoothing;
    let liked = config.preference.liked_threshold;

    let mut genre_rows: HashMap<_, _> = controller
        .genre_preferences(user_id)?
        .into_iter()
        .map(|pref| (pref.genre_id.clone(), pref))
        .collect();

    for genre_id in &book.genres {
        let mut row = genre_rows
            .remove(genre_id)
            .unwrap_or_else(|| GenrePreference::new(user_id, genre_id));

        row.weight = weights::smooth(row.weight, delta, smoothing);
        row.taste = weights::classify(row.weight, liked);
        controller.upsert_genre_preference(row)?;
    }

    let mut author_rows: HashMap<_, _> = controller
        .author_preferences(user_id)?
        .into_iter()
        .map(|pref| (pref.author_id.clone(), pref))
        .collect();

    for author_id in &book.authors {
        let mut row = author_rows
            .remove(author_id)
            .unwrap_or_else(|| AuthorPreference::new(user_id, author_id));

        row.weight = weights::smooth(row.weight, delta, smoothing);
        row.taste = weights::classify(row.weight, liked);
        controller.upsert_author_preference(row)?;
    }

    Ok(())
}

/// Convenience for flows that only need to know whether a taste row is a
/// positive signal.
pub fn is_preferred(taste: Taste) -> bool {
    taste != Taste::Disliked
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use controller::{Book, User};
    use memory::MemoryController;

    fn seeded() -> (MemoryController, UserId, BookId) {
        let controller = MemoryController::new();
        let user: UserId = "u1".into();
        let book_id: BookId = "b1".into();

        controller.add_user(User {
            id: user.clone(),
            name: "Ada".into(),
            ..Default::default()
        });

        controller.add_book(Book {
            id: book_id.clone(),
            title: "The Hobbit".into(),
            genres: vec!["fantasy".to_string()].into_iter().collect(),
            authors: vec!["tolkien".to_string()].into_iter().collect(),
            ..Default::default()
        });

        (controller, user, book_id)
    }

    #[test]
    fn first_favorite_creates_neutral_rows() {
        let (controller, user, book) = seeded();
        let config = Config::default();

        apply(
            &controller,
            &config,
            &user,
            &book,
            &UserAction::AddedToFavorites,
        )
        .unwrap();

        let genre_prefs = controller.genre_preferences(&user).unwrap();
        assert_eq!(1, genre_prefs.len());
        assert_eq!("fantasy", genre_prefs[0].genre_id);
        assert_approx_eq!(0.051, genre_prefs[0].weight);
        assert_eq!(Taste::Neutral, genre_prefs[0].taste);

        let author_prefs = controller.author_preferences(&user).unwrap();
        assert_eq!(1, author_prefs.len());
        assert_approx_eq!(0.051, author_prefs[0].weight);
    }

    #[test]
    fn repeated_actions_update_the_same_row() {
        let (controller, user, book) = seeded();
        let config = Config::default();

        for _ in 0..5 {
            apply(
                &controller,
                &config,
                &user,
                &book,
                &UserAction::AddedToFavorites,
            )
            .unwrap();
        }

        let genre_prefs = controller.genre_preferences(&user).unwrap();
        assert_eq!(1, genre_prefs.len());

        // Still nudging upward, still bounded.
        assert!(genre_prefs[0].weight > 0.051);
        assert!(genre_prefs[0].weight <= 1.0);
    }

    #[test]
    fn unknown_entities_and_actions_are_noops() {
        let (controller, user, book) = seeded();
        let config = Config::default();

        apply(
            &controller,
            &config,
            &"ghost".to_string(),
            &book,
            &UserAction::AddedToFavorites,
        )
        .unwrap();

        apply(
            &controller,
            &config,
            &user,
            &"missing".to_string(),
            &UserAction::AddedToFavorites,
        )
        .unwrap();

        apply(
            &controller,
            &config,
            &user,
            &book,
            &UserAction::Other("poked".into()),
        )
        .unwrap();

        assert!(controller.genre_preferences(&user).unwrap().is_empty());
        assert!(controller.author_preferences(&user).unwrap().is_empty());
    }
}
