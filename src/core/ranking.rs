use std::cmp::Ordering;

use uuid::Uuid;

use crate::models::PropertyScore;

/// Order scores by total score, highest first
///
/// The sort is stable: properties with exactly equal totals keep their
/// input order.
pub fn rank_by_total(mut scores: Vec<PropertyScore>) -> Vec<PropertyScore> {
    scores.sort_by(|a, b| descending(a.total_score, b.total_score));
    scores
}

/// Keep only Tier 1 properties, best nice-to-have score first
///
/// Every Tier 1 property has a must-have score of 3, so ordering inside the
/// tier depends on nice-to-have quality alone.
pub fn filter_tier1(scores: Vec<PropertyScore>) -> Vec<PropertyScore> {
    let mut tier1: Vec<PropertyScore> = scores
        .into_iter()
        .filter(|s| s.meets_all_must_haves)
        .collect();

    tier1.sort_by(|a, b| descending(a.nice_to_have_score, b.nice_to_have_score));
    tier1
}

/// Order scores by their rating for one criterion, then by total score
///
/// A property without a rating for the criterion counts as 0 and sorts
/// after every rated property.
pub fn rank_by_criterion(mut scores: Vec<PropertyScore>, criterion_id: Uuid) -> Vec<PropertyScore> {
    scores.sort_by(|a, b| {
        criterion_value(b, criterion_id)
            .cmp(&criterion_value(a, criterion_id))
            .then_with(|| descending(a.total_score, b.total_score))
    });
    scores
}

#[inline]
fn criterion_value(score: &PropertyScore, criterion_id: Uuid) -> u8 {
    score
        .rating_for(criterion_id)
        .map(|r| r.score.value())
        .unwrap_or(0)
}

#[inline]
fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Property, Rating, RatingScore};
    use chrono::Utc;

    fn create_score(name: &str, total: f64, nice: f64, tier1: bool) -> PropertyScore {
        PropertyScore {
            property: Property {
                id: Uuid::new_v4(),
                name: name.to_string(),
                address: format!("{} Main St", name),
                neighborhood: "Highlands".to_string(),
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
            },
            must_have_score: if tier1 { 3.0 } else { (total - nice) / 3.0 },
            nice_to_have_score: nice,
            total_score: total,
            meets_all_must_haves: tier1,
            ratings: vec![],
        }
    }

    fn with_rating(
        mut score: PropertyScore,
        criterion_id: Uuid,
        value: RatingScore,
    ) -> PropertyScore {
        score.ratings.push(Rating {
            id: Uuid::new_v4(),
            property_id: score.property.id,
            criterion_id,
            score: value,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        });
        score
    }

    fn names(scores: &[PropertyScore]) -> Vec<&str> {
        scores.iter().map(|s| s.property.name.as_str()).collect()
    }

    #[test]
    fn test_rank_by_total_descending() {
        let scores = vec![
            create_score("low", 4.0, 1.0, false),
            create_score("high", 12.0, 3.0, true),
            create_score("mid", 8.0, 2.0, false),
        ];

        let ranked = rank_by_total(scores);

        assert_eq!(names(&ranked), vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_rank_by_total_ties_keep_input_order() {
        let scores = vec![
            create_score("first", 9.0, 0.0, false),
            create_score("top", 10.0, 1.0, false),
            create_score("second", 9.0, 0.0, false),
            create_score("third", 9.0, 0.0, false),
        ];

        let ranked = rank_by_total(scores);

        assert_eq!(names(&ranked), vec!["top", "first", "second", "third"]);
    }

    #[test]
    fn test_filter_tier1() {
        let scores = vec![
            create_score("a", 10.0, 1.0, true),
            create_score("b", 11.5, 3.0, false),
            create_score("c", 12.0, 3.0, true),
            create_score("d", 11.0, 2.0, true),
        ];

        let tier1 = filter_tier1(scores);

        assert_eq!(names(&tier1), vec!["c", "d", "a"]);
        assert!(tier1.iter().all(|s| s.meets_all_must_haves));
    }

    #[test]
    fn test_filter_tier1_empty_when_none_qualify() {
        let scores = vec![create_score("a", 7.5, 0.0, false)];
        assert!(filter_tier1(scores).is_empty());
    }

    #[test]
    fn test_rank_by_criterion_unrated_sorts_last() {
        let parking = Uuid::new_v4();
        let scores = vec![
            create_score("unrated", 12.0, 3.0, true),
            with_rating(create_score("partial", 5.0, 2.0, false), parking, RatingScore::Partial),
            with_rating(create_score("meets", 4.0, 1.0, false), parking, RatingScore::Meets),
        ];

        let ranked = rank_by_criterion(scores, parking);

        assert_eq!(names(&ranked), vec!["meets", "partial", "unrated"]);
    }

    #[test]
    fn test_rank_by_criterion_ties_use_total() {
        let parking = Uuid::new_v4();
        let scores = vec![
            with_rating(create_score("lower", 6.0, 0.0, false), parking, RatingScore::Meets),
            with_rating(create_score("higher", 9.0, 0.0, false), parking, RatingScore::Meets),
            create_score("none-high", 8.0, 2.0, false),
            create_score("none-low", 2.0, 2.0, false),
        ];

        let ranked = rank_by_criterion(scores, parking);

        assert_eq!(names(&ranked), vec!["higher", "lower", "none-high", "none-low"]);
    }
}
