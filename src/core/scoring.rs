use std::collections::HashSet;

use uuid::Uuid;

use crate::models::{Criterion, Property, PropertyScore, Rating, RatingScore};

/// Weight applied to the mean must-have rating
pub const MUST_HAVE_WEIGHT: f64 = 3.0;

/// Weight applied to the mean nice-to-have rating
pub const NICE_TO_HAVE_WEIGHT: f64 = 1.0;

/// Compute the comparable score of a property from its ratings
///
/// Scoring formula:
/// total = (
///     mean(must-have ratings) * 3 +     # 0 when no must-have ratings
///     mean(nice-to-have ratings) * 1    # 0 when no nice-to-have ratings
/// )
///
/// Ratings whose criterion is not in `criteria` do not contribute to any
/// score but are kept on the result for detail display. A property only
/// meets all must-haves when at least one must-have exists and every one of
/// them is rated `Meets`.
pub fn compute_score(
    property: Property,
    ratings: Vec<Rating>,
    criteria: &[Criterion],
) -> PropertyScore {
    let (must_have_ids, nice_to_have_ids) = partition_criteria(criteria);

    let must_have_ratings: Vec<&Rating> = ratings
        .iter()
        .filter(|r| must_have_ids.contains(&r.criterion_id))
        .collect();
    let nice_to_have_ratings: Vec<&Rating> = ratings
        .iter()
        .filter(|r| nice_to_have_ids.contains(&r.criterion_id))
        .collect();

    let must_have_score = mean_score(&must_have_ratings);
    let nice_to_have_score = mean_score(&nice_to_have_ratings);

    let total_score = must_have_score * MUST_HAVE_WEIGHT + nice_to_have_score * NICE_TO_HAVE_WEIGHT;

    let meets_all_must_haves = !must_have_ids.is_empty()
        && must_have_ratings.len() == must_have_ids.len()
        && must_have_ratings.iter().all(|r| r.score == RatingScore::Meets);

    PropertyScore {
        property,
        must_have_score,
        nice_to_have_score,
        total_score,
        meets_all_must_haves,
        ratings,
    }
}

/// Split criterion ids into must-have and nice-to-have sets
#[inline]
fn partition_criteria(criteria: &[Criterion]) -> (HashSet<Uuid>, HashSet<Uuid>) {
    let mut must_have = HashSet::new();
    let mut nice_to_have = HashSet::new();

    for criterion in criteria {
        if criterion.is_must_have() {
            must_have.insert(criterion.id);
        } else {
            nice_to_have.insert(criterion.id);
        }
    }

    (must_have, nice_to_have)
}

/// Arithmetic mean of the ratings, 0 when there are none
#[inline]
fn mean_score(ratings: &[&Rating]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }

    let sum: f64 = ratings.iter().map(|r| r.score.value() as f64).sum();
    sum / ratings.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CriterionType;
    use chrono::Utc;

    fn create_property(name: &str) -> Property {
        Property {
            id: Uuid::new_v4(),
            name: name.to_string(),
            address: "123 Main St".to_string(),
            neighborhood: "Capitol Hill".to_string(),
            price: None,
            bedrooms: None,
            bathrooms: None,
            sqft: None,
            date_viewed: None,
            listing_url: None,
            notes: None,
            archived: false,
            latitude: None,
            longitude: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn create_criterion(name: &str, criterion_type: CriterionType) -> Criterion {
        Criterion {
            id: Uuid::new_v4(),
            name: name.to_string(),
            criterion_type,
            definition: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn rate(property: &Property, criterion: &Criterion, score: RatingScore) -> Rating {
        Rating {
            id: Uuid::new_v4(),
            property_id: property.id,
            criterion_id: criterion.id,
            score,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_all_must_haves_met() {
        let a = create_criterion("A", CriterionType::MustHave);
        let b = create_criterion("B", CriterionType::MustHave);
        let c = create_criterion("C", CriterionType::NiceToHave);
        let property = create_property("P");
        let ratings = vec![
            rate(&property, &a, RatingScore::Meets),
            rate(&property, &b, RatingScore::Meets),
            rate(&property, &c, RatingScore::Partial),
        ];

        let score = compute_score(property, ratings, &[a, b, c]);

        assert_eq!(score.must_have_score, 3.0);
        assert_eq!(score.nice_to_have_score, 2.0);
        assert_eq!(score.total_score, 11.0);
        assert!(score.meets_all_must_haves);
        assert_eq!(score.ratings.len(), 3);
    }

    #[test]
    fn test_partial_must_have_fails() {
        let a = create_criterion("A", CriterionType::MustHave);
        let b = create_criterion("B", CriterionType::MustHave);
        let c = create_criterion("C", CriterionType::NiceToHave);
        let property = create_property("Q");
        let ratings = vec![
            rate(&property, &a, RatingScore::Meets),
            rate(&property, &b, RatingScore::Partial),
        ];

        let score = compute_score(property, ratings, &[a, b, c]);

        assert_eq!(score.must_have_score, 2.5);
        assert_eq!(score.nice_to_have_score, 0.0);
        assert_eq!(score.total_score, 7.5);
        assert!(!score.meets_all_must_haves);
    }

    #[test]
    fn test_missing_must_have_rating_fails() {
        let a = create_criterion("A", CriterionType::MustHave);
        let b = create_criterion("B", CriterionType::MustHave);
        let property = create_property("R");
        let ratings = vec![rate(&property, &a, RatingScore::Meets)];

        let score = compute_score(property, ratings, &[a, b]);

        // Mean covers only the ratings that exist
        assert_eq!(score.must_have_score, 3.0);
        assert!(!score.meets_all_must_haves);
    }

    #[test]
    fn test_no_must_have_criteria_never_qualifies() {
        let c = create_criterion("C", CriterionType::NiceToHave);
        let property = create_property("S");
        let ratings = vec![rate(&property, &c, RatingScore::Meets)];

        let score = compute_score(property, ratings, &[c]);

        assert_eq!(score.must_have_score, 0.0);
        assert_eq!(score.nice_to_have_score, 3.0);
        assert_eq!(score.total_score, 3.0);
        assert!(!score.meets_all_must_haves);
    }

    #[test]
    fn test_unknown_criterion_ignored() {
        let a = create_criterion("A", CriterionType::MustHave);
        let deleted = create_criterion("Deleted", CriterionType::NiceToHave);
        let property = create_property("T");
        let ratings = vec![
            rate(&property, &a, RatingScore::Meets),
            rate(&property, &deleted, RatingScore::DoesntMeet),
        ];

        let score = compute_score(property, ratings, &[a]);

        assert_eq!(score.nice_to_have_score, 0.0);
        assert_eq!(score.total_score, 9.0);
        assert!(score.meets_all_must_haves);
        assert_eq!(score.ratings.len(), 2);
    }

    #[test]
    fn test_no_ratings_scores_zero() {
        let a = create_criterion("A", CriterionType::MustHave);
        let property = create_property("U");

        let score = compute_score(property, vec![], &[a]);

        assert_eq!(score.must_have_score, 0.0);
        assert_eq!(score.nice_to_have_score, 0.0);
        assert_eq!(score.total_score, 0.0);
        assert!(!score.meets_all_must_haves);
    }
}
