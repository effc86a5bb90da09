use anyhow::Error;
use serde::Deserialize;
use std::path::Path;

/// Per-category similarity weights plus the thresholds used when turning
/// normalized similarities into recommendation tiers. All of these are
/// empirically tuned, none is derived.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SimilarityConfig {
    pub genre_weight: f64,
    pub author_weight: f64,
    pub age_weight: f64,
    pub language_weight: f64,
    pub volume_weight: f64,
    pub min_interest: f64,
    pub best_bucket: f64,
    pub good_bucket: f64,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            genre_weight: 2.0,
            author_weight: 2.0,
            age_weight: 1.0,
            language_weight: 0.5,
            volume_weight: 1.0,
            min_interest: 0.48,
            best_bucket: 0.9,
            good_bucket: 0.75,
        }
    }
}

/// Bayesian-shrinkage constant: how many ratings a book needs before its
/// own average starts to dominate the corpus average.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RatingConfig {
    pub trusted_count: u32,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self { trusted_count: 10 }
    }
}

/// Weight-model constants: classification thresholds, the smoothing
/// factor and the per-action deltas.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PreferenceConfig {
    pub liked_threshold: f64,
    pub veto_threshold: f64,
    pub smoothing: f64,
    pub favorite_delta: f64,
    pub unfavorite_delta: f64,
    pub finished_delta: f64,
    pub started_delta: f64,
    pub want_to_read_delta: f64,
    pub relevant_delta: f64,
    pub irrelevant_delta: f64,
}

impl Default for PreferenceConfig {
    fn default() -> Self {
        Self {
            liked_threshold: 0.3,
            veto_threshold: -0.995,
            smoothing: 0.17,
            favorite_delta: 0.3,
            unfavorite_delta: -0.3,
            finished_delta: 0.2,
            started_delta: 0.15,
            want_to_read_delta: 0.1,
            relevant_delta: 0.3,
            irrelevant_delta: -0.3,
        }
    }
}

/// Page-count breakpoints for the volume-size category.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct VolumeConfig {
    pub short_max: u32,
    pub medium_max: u32,
    pub long_max: u32,
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            short_max: 150,
            medium_max: 350,
            long_max: 600,
        }
    }
}

/// Constants of the possibly-liked fallback path. The per-genre take is
/// `base_take * (take_bias + weight * take_scale)`, with `default_weight`
/// standing in when the user has no row for a genre (it makes the take
/// come out at exactly `base_take`).
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ColdStartConfig {
    pub min_genre_preferences: usize,
    pub base_take: usize,
    pub take_bias: f64,
    pub take_scale: f64,
    pub default_weight: f64,
}

impl Default for ColdStartConfig {
    fn default() -> Self {
        Self {
            min_genre_preferences: 3,
            base_take: 10,
            take_bias: 0.7,
            take_scale: 0.5,
            default_weight: 0.6,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub similarity: SimilarityConfig,
    pub rating: RatingConfig,
    pub preference: PreferenceConfig,
    pub volume: VolumeConfig,
    pub cold_start: ColdStartConfig,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;
        let parsed: Self = toml::from_str(&contents)?;
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Error;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn load_example_config() -> Result<(), Error> {
        let loaded = Config::load("example.toml")?;
        assert_eq!(Config::default(), loaded);

        Ok(())
    }

    #[test]
    fn defaults_carry_tuned_constants() {
        let config = Config::default();

        assert_approx_eq!(2.0, config.similarity.genre_weight);
        assert_approx_eq!(0.5, config.similarity.language_weight);
        assert_eq!(10, config.rating.trusted_count);
        assert_approx_eq!(-0.995, config.preference.veto_threshold);
        assert_eq!(3, config.cold_start.min_genre_preferences);
    }
}
