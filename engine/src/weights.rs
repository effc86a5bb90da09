//! The preference weight model: how a scalar taste weight in [-1, 1]
//! evolves under user actions and how it maps back to a categorical label.

use config::PreferenceConfig;
use controller::{Taste, UserAction};

pub fn clamp(weight: f64) -> f64 {
    weight.max(-1.0).min(1.0)
}

/// Boundary values are inclusive on the liked/disliked side: exactly
/// `liked_threshold` is already `Liked`.
pub fn classify(weight: f64, liked_threshold: f64) -> Taste {
    if weight >= liked_threshold {
        Taste::Liked
    } else if weight <= -liked_threshold {
        Taste::Disliked
    } else {
        Taste::Neutral
    }
}

/// Exponential smoothing toward `old + delta`: a single strong action only
/// moves the weight by about `smoothing` of the raw delta, repeated
/// consistent signals converge toward the bound.
pub fn smooth(old: f64, delta: f64, smoothing: f64) -> f64 {
    clamp((1.0 - smoothing) * old + smoothing * (old + delta))
}

/// The scalar nudge an action is worth. Ratings are centered so three
/// stars is neutral; unrecognized actions are worth nothing.
pub fn delta_for(action: &UserAction, config: &PreferenceConfig) -> f64 {
    use controller::RecommendationResponse::{Irrelevant, Relevant};

    match action {
        UserAction::AddedToFavorites => config.favorite_delta,
        UserAction::RemovedFromFavorites => config.unfavorite_delta,
        UserAction::Rated(value) => (*value - 3) as f64 / 5.0,
        UserAction::FinishedReading => config.finished_delta,
        UserAction::StartedReading => config.started_delta,
        UserAction::WantToRead => config.want_to_read_delta,
        UserAction::RespondedToRecommendation(Relevant) => config.relevant_delta,
        UserAction::RespondedToRecommendation(Irrelevant) => config.irrelevant_delta,
        UserAction::Other(_) => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    const SMOOTHING: f64 = 0.17;
    const LIKED: f64 = 0.3;

    #[test]
    fn smooth_stays_bounded() {
        let mut weight = 0.0;
        for _ in 0..1000 {
            weight = smooth(weight, 0.3, SMOOTHING);
            assert!(weight <= 1.0);
        }

        let mut weight = 0.0;
        for _ in 0..1000 {
            weight = smooth(weight, -0.4, SMOOTHING);
            assert!(weight >= -1.0);
        }
    }

    #[test]
    fn smooth_first_favorite() {
        // 0.83 * 0 + 0.17 * 0.3
        assert_approx_eq!(0.051, smooth(0.0, 0.3, SMOOTHING));
    }

    #[test]
    fn classify_thresholds_are_inclusive() {
        assert_eq!(Taste::Liked, classify(0.3, LIKED));
        assert_eq!(Taste::Disliked, classify(-0.3, LIKED));
        assert_eq!(Taste::Neutral, classify(0.2999, LIKED));
        assert_eq!(Taste::Neutral, classify(-0.2999, LIKED));
        assert_eq!(Taste::Liked, classify(1.0, LIKED));
        assert_eq!(Taste::Disliked, classify(-1.0, LIKED));
    }

    #[test]
    fn rating_deltas_center_on_three_stars() {
        let config = PreferenceConfig::default();

        assert_approx_eq!(-0.4, delta_for(&UserAction::Rated(1), &config));
        assert_approx_eq!(0.0, delta_for(&UserAction::Rated(3), &config));
        assert_approx_eq!(0.4, delta_for(&UserAction::Rated(5), &config));
    }

    #[test]
    fn unknown_action_is_worth_nothing() {
        let config = PreferenceConfig::default();
        let action = UserAction::Other("poked".into());

        assert_approx_eq!(0.0, delta_for(&action, &config));
    }
}
