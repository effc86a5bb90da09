//! Categorical similarity between a reference profile and a candidate
//! book: Jaccard overlap on genre/author id sets plus flat bonuses for
//! matching language, age category and volume size, each weighted by the
//! configured score table and normalized by the profile-specific maximum.

use config::{SimilarityConfig, VolumeConfig};
use controller::{AgeRestriction, AuthorId, Book, GenreId, User, VolumeSize};
use num_traits::float::Float;
use std::collections::HashSet;
use std::hash::Hash;

/// Jaccard index over two id sets. Two empty sets are considered
/// identical (index 1); otherwise the union is non-empty.
pub fn jaccard<K, V>(a: &HashSet<K>, b: &HashSet<K>) -> Option<V>
where
    K: Hash + Eq,
    V: Float,
{
    if a.is_empty() && b.is_empty() {
        return Some(V::one());
    }

    let union = a.union(b).count();
    let inter = a.intersection(b).count();

    Some(V::from(inter)? / V::from(union)?)
}

pub fn volume_of(book: &Book, volume: &VolumeConfig) -> VolumeSize {
    VolumeSize::from_pages(
        book.pages,
        volume.short_max,
        volume.medium_max,
        volume.long_max,
    )
}

/// The reference side of a similarity comparison. The similar-books flow
/// builds it from a book (all five facets present); the user-interest
/// flow omits the language facet.
#[derive(Debug, Clone)]
pub struct Profile {
    pub genres: HashSet<GenreId>,
    pub authors: HashSet<AuthorId>,
    pub language: Option<String>,
    pub age_restriction: Option<AgeRestriction>,
    pub volume_size: Option<VolumeSize>,
}

impl Profile {
    pub fn from_book(book: &Book, volume: &VolumeConfig) -> Self {
        Self {
            genres: book.genres.clone(),
            authors: book.authors.clone(),
            language: Some(book.language.clone()),
            age_restriction: Some(book.age_restriction),
            volume_size: Some(volume_of(book, volume)),
        }
    }

    /// Highest attainable score for this profile: the sum of the weights
    /// of the facets it carries. 6.5 for a full book profile, 6 for the
    /// user-interest one (no language).
    pub fn max_score(&self, config: &SimilarityConfig) -> f64 {
        let mut max = config.genre_weight + config.author_weight;

        if self.language.is_some() {
            max += config.language_weight;
        }
        max += config.age_weight;
        max += config.volume_weight;

        max
    }
}

/// Raw additive score, monotonically non-decreasing in pairwise category
/// agreement, never negative.
pub fn score(
    profile: &Profile,
    candidate: &Book,
    config: &SimilarityConfig,
    volume: &VolumeConfig,
) -> f64 {
    let genre_overlap: f64 = jaccard(&profile.genres, &candidate.genres).unwrap_or(0.0);
    let author_overlap: f64 = jaccard(&profile.authors, &candidate.authors).unwrap_or(0.0);

    let mut total = config.genre_weight * genre_overlap + config.author_weight * author_overlap;

    if let Some(language) = &profile.language {
        if language == &candidate.language {
            total += config.language_weight;
        }
    }

    if profile.age_restriction == Some(candidate.age_restriction) {
        total += config.age_weight;
    }

    if profile.volume_size == Some(volume_of(candidate, volume)) {
        total += config.volume_weight;
    }

    total
}

/// Score normalized into [0, 1] by the profile maximum. This is what ends
/// up stored in the candidate's `similarity_weight`.
pub fn score_normalized(
    profile: &Profile,
    candidate: &Book,
    config: &SimilarityConfig,
    volume: &VolumeConfig,
) -> f64 {
    score(profile, candidate, config, volume) / profile.max_score(config)
}

/// Normalized interest of an user in one book, in [0, 1]. The Jaccard
/// side compares the book's sets against their intersection with the
/// user's preferred sets, so a large preference profile does not dilute a
/// full match on a two-author book. Language never participates, the
/// maximum is the remaining four weights.
pub fn interest_score(
    book: &Book,
    preferred_genres: &HashSet<GenreId>,
    preferred_authors: &HashSet<AuthorId>,
    user: &User,
    config: &SimilarityConfig,
    volume: &VolumeConfig,
) -> f64 {
    let liked_authors: HashSet<_> = book
        .authors
        .intersection(preferred_authors)
        .cloned()
        .collect();
    let liked_genres: HashSet<_> = book.genres.intersection(preferred_genres).cloned().collect();

    let author_overlap: f64 = jaccard(&book.authors, &liked_authors).unwrap_or(0.0);
    let genre_overlap: f64 = jaccard(&book.genres, &liked_genres).unwrap_or(0.0);

    let mut total = config.author_weight * author_overlap + config.genre_weight * genre_overlap;

    if user.preferred_volume == Some(volume_of(book, volume)) {
        total += config.volume_weight;
    }

    if user.preferred_age == Some(book.age_restriction) {
        total += config.age_weight;
    }

    let max =
        config.author_weight + config.genre_weight + config.volume_weight + config.age_weight;

    total / max
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use common_macros::hash_set;
    use config::Config;

    fn book(genres: &[&str], authors: &[&str], language: &str, pages: u32) -> Book {
        Book {
            genres: genres.iter().map(|s| s.to_string()).collect(),
            authors: authors.iter().map(|s| s.to_string()).collect(),
            language: language.into(),
            pages,
            age_restriction: AgeRestriction::Teen,
            ..Default::default()
        }
    }

    #[test]
    fn jaccard_is_symmetric() {
        let a: HashSet<_> = hash_set! { "x".to_string(), "y".to_string() };
        let b: HashSet<_> = hash_set! { "y".to_string(), "z".to_string() };

        let ab: f64 = jaccard(&a, &b).unwrap();
        let ba: f64 = jaccard(&b, &a).unwrap();

        assert_approx_eq!(ab, ba);
        assert_approx_eq!(1.0 / 3.0, ab);
    }

    #[test]
    fn jaccard_of_empty_sets_is_one() {
        let empty: HashSet<String> = HashSet::new();
        let other: HashSet<_> = hash_set! { "x".to_string() };

        assert_approx_eq!(1.0, jaccard::<_, f64>(&empty, &empty).unwrap());
        assert_approx_eq!(0.0, jaccard::<_, f64>(&empty, &other).unwrap());
    }

    #[test]
    fn identical_books_hit_the_profile_maximum() {
        let config = Config::default();
        let reference = book(&["fantasy", "mystery"], &["a1"], "en", 200);
        let profile = Profile::from_book(&reference, &config.volume);

        assert_approx_eq!(6.5, profile.max_score(&config.similarity));
        assert_approx_eq!(
            6.5,
            score(&profile, &reference, &config.similarity, &config.volume)
        );
        assert_approx_eq!(
            1.0,
            score_normalized(&profile, &reference, &config.similarity, &config.volume)
        );
    }

    #[test]
    fn full_match_beats_single_shared_genre() {
        let config = Config::default();
        let reference = book(&["fantasy", "mystery"], &["a1"], "en", 200);
        let profile = Profile::from_book(&reference, &config.volume);

        let twin = book(&["fantasy", "mystery"], &["a1"], "en", 210);
        let loose = book(&["fantasy"], &["a2"], "de", 800);

        let twin_score = score(&profile, &twin, &config.similarity, &config.volume);
        let loose_score = score(&profile, &loose, &config.similarity, &config.volume);

        assert!(twin_score >= 5.5);
        assert!(twin_score > loose_score);
    }

    #[test]
    fn interest_prefers_fully_covered_books() {
        let config = Config::default();
        let user = User::default();

        let preferred_genres: HashSet<_> =
            hash_set! { "fantasy".to_string(), "scifi".to_string(), "romance".to_string() };
        let preferred_authors: HashSet<_> = hash_set! { "a1".to_string() };

        let covered = book(&["fantasy"], &["a1"], "en", 200);
        let partial = book(&["fantasy", "horror"], &["a2"], "en", 200);

        let covered_score = interest_score(
            &covered,
            &preferred_genres,
            &preferred_authors,
            &user,
            &config.similarity,
            &config.volume,
        );
        let partial_score = interest_score(
            &partial,
            &preferred_genres,
            &preferred_authors,
            &user,
            &config.similarity,
            &config.volume,
        );

        // Both genre and author sets fully covered: (2 + 2) / 6.
        assert_approx_eq!(4.0 / 6.0, covered_score);
        assert!(partial_score < covered_score);
    }
}
