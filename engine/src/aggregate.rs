//! Incremental rating aggregates. The stored mean is maintained in O(1)
//! per event, never recomputed from the full rating table.

use controller::Rateable;

/// First rating from an user: bump the count and fold the value into the
/// running mean. `value` must already be validated into [1, 5].
pub fn record_new_rating<R: Rateable>(entity: &mut R, value: i32) {
    let count = entity.ratings_count() + 1;
    let rating = (entity.rating() * f64::from(count - 1) + f64::from(value)) / f64::from(count);

    entity.set_ratings_count(count);
    entity.set_rating(rating);
}

/// Re-rating: swap the old value out of the mean. A zero count means no
/// rating ever existed, so there is nothing to revise.
pub fn revise_rating<R: Rateable>(entity: &mut R, old_value: i32, new_value: i32) {
    let count = entity.ratings_count();
    if count == 0 {
        return;
    }

    let rating =
        (entity.rating() * f64::from(count) - f64::from(old_value) + f64::from(new_value))
            / f64::from(count);

    entity.set_rating(rating);
}

/// Bayesian shrinkage: entities with few ratings are pulled toward the
/// corpus average, so a handful of lucky five-star votes cannot outrank
/// well-established entities. Vanishes as the count grows.
pub fn weighted_rating<R: Rateable>(entity: &R, corpus_average: f64, trusted_count: u32) -> f64 {
    let count = f64::from(entity.ratings_count());
    let trusted = f64::from(trusted_count);
    let total = count + trusted;

    (count / total) * entity.rating() + (trusted / total) * corpus_average
}

/// Mean stored rating over the entities that have at least one rating,
/// zero for an empty collection.
pub fn corpus_average<'a, R, I>(entities: I) -> f64
where
    R: Rateable + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut sum = 0.0;
    let mut n = 0u32;

    for entity in entities {
        if entity.ratings_count() > 0 {
            sum += entity.rating();
            n += 1;
        }
    }

    if n == 0 {
        0.0
    } else {
        sum / f64::from(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use controller::Book;

    #[test]
    fn record_then_revise() {
        let mut book = Book::default();

        record_new_rating(&mut book, 5);
        assert_approx_eq!(5.0, book.rating);
        assert_eq!(1, book.ratings_count);

        record_new_rating(&mut book, 3);
        assert_approx_eq!(4.0, book.rating);
        assert_eq!(2, book.ratings_count);

        // The first user changes their mind: 5 -> 2.
        revise_rating(&mut book, 5, 2);
        assert_approx_eq!(3.5, book.rating);
        assert_eq!(2, book.ratings_count);
    }

    #[test]
    fn revise_without_ratings_is_noop() {
        let mut book = Book::default();
        revise_rating(&mut book, 5, 1);

        assert_approx_eq!(0.0, book.rating);
        assert_eq!(0, book.ratings_count);
    }

    #[test]
    fn weighted_rating_limits() {
        let mut book = Book {
            rating: 5.0,
            ratings_count: 0,
            ..Default::default()
        };

        // No ratings: fully shrunk to the corpus average.
        assert_approx_eq!(3.0, weighted_rating(&book, 3.0, 10));

        // Plenty of ratings: shrinkage vanishes.
        book.ratings_count = 1_000_000;
        assert_approx_eq!(5.0, weighted_rating(&book, 3.0, 10), 1e-4);
    }

    #[test]
    fn corpus_average_skips_unrated() {
        let books = vec![
            Book {
                rating: 4.0,
                ratings_count: 10,
                ..Default::default()
            },
            Book {
                rating: 2.0,
                ratings_count: 5,
                ..Default::default()
            },
            Book::default(),
        ];

        assert_approx_eq!(3.0, corpus_average(&books));
        assert_approx_eq!(0.0, corpus_average(&Vec::<Book>::new()));
    }
}
