//! Pool-wide exclusion pass: drops candidates the user has already dealt
//! with, plus anything carrying a genre the user has vetoed. Set-based
//! and order-preserving among survivors.

use controller::{Book, Result, ShelfKind, UserId, UserStore};
use std::collections::HashSet;

const EXCLUDED_SHELVES: [ShelfKind; 3] =
    [ShelfKind::Read, ShelfKind::Reading, ShelfKind::Favorite];

/// Remove everything the user has rated, shelved (read/reading/favorite)
/// or marked irrelevant, and any book carrying a genre whose preference
/// weight sits at or below `veto_threshold`. Anonymous and unknown users
/// see the candidates untouched.
pub fn exclude<S: UserStore>(
    store: &S,
    candidates: Vec<Book>,
    user: Option<&UserId>,
    veto_threshold: f64,
) -> Result<Vec<Book>> {
    let user = match user {
        Some(user) => user,
        None => return Ok(candidates),
    };

    if store.user(user)?.is_none() {
        return Ok(candidates);
    }

    let mut excluded = store.rated_book_ids(user)?;
    excluded.extend(store.shelf_book_ids(user, &EXCLUDED_SHELVES)?);
    excluded.extend(store.irrelevant_response_ids(user)?);

    // Absolute veto, distinct from an ordinary dislike: a genre this far
    // down removes every book carrying it, whatever its other merits.
    let vetoed_genres: HashSet<_> = store
        .genre_preferences(user)?
        .into_iter()
        .filter(|pref| pref.weight <= veto_threshold)
        .map(|pref| pref.genre_id)
        .collect();

    let survivors = candidates
        .into_iter()
        .filter(|book| !excluded.contains(&book.id))
        .filter(|book| vetoed_genres.is_empty() || book.genres.is_disjoint(&vetoed_genres))
        .collect();

    Ok(survivors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use controller::{GenrePreference, Rating, User};
    use memory::MemoryController;

    fn book(id: &str, genres: &[&str]) -> Book {
        Book {
            id: id.into(),
            genres: genres.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn seeded_controller() -> (MemoryController, UserId) {
        let controller = MemoryController::new();
        let user: UserId = "u1".into();

        controller.add_user(User {
            id: user.clone(),
            name: "Ada".into(),
            ..Default::default()
        });

        (controller, user)
    }

    #[test]
    fn rated_and_shelved_books_are_dropped() {
        let (controller, user) = seeded_controller();

        controller
            .save_rating(Rating::new(&user, &"rated".to_string(), 4))
            .unwrap();
        controller.shelve(&user, ShelfKind::Read, &"read".to_string());

        let candidates = vec![book("rated", &[]), book("read", &[]), book("fresh", &[])];
        let survivors = exclude(&controller, candidates, Some(&user), -0.995).unwrap();

        assert_eq!(1, survivors.len());
        assert_eq!("fresh", survivors[0].id);
    }

    #[test]
    fn vetoed_genre_removes_carriers() {
        let (controller, user) = seeded_controller();

        let mut pref = GenrePreference::new(&user, &"horror".to_string());
        pref.weight = -1.0;
        controller.upsert_genre_preference(pref).unwrap();

        // An ordinary dislike is not a veto.
        let mut pref = GenrePreference::new(&user, &"romance".to_string());
        pref.weight = -0.5;
        controller.upsert_genre_preference(pref).unwrap();

        let candidates = vec![
            book("b1", &["horror", "mystery"]),
            book("b2", &["romance"]),
            book("b3", &["fantasy"]),
        ];
        let survivors = exclude(&controller, candidates, Some(&user), -0.995).unwrap();

        let ids: Vec<_> = survivors.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(vec!["b2", "b3"], ids);
    }

    #[test]
    fn anonymous_and_unknown_users_see_everything() {
        let (controller, user) = seeded_controller();
        controller
            .save_rating(Rating::new(&user, &"rated".to_string(), 4))
            .unwrap();

        let candidates = vec![book("rated", &[]), book("fresh", &[])];

        let all = exclude(&controller, candidates.clone(), None, -0.995).unwrap();
        assert_eq!(2, all.len());

        let ghost: UserId = "nobody".into();
        let all = exclude(&controller, candidates, Some(&ghost), -0.995).unwrap();
        assert_eq!(2, all.len());
    }
}
