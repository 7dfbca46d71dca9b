use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::core::{
    ranking::{filter_tier1, rank_by_criterion, rank_by_total},
    scoring::compute_score,
};
use crate::models::{Criterion, Property, PropertyScore, Rating};

/// Which properties a report shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportView {
    /// Only properties meeting every must-have
    #[default]
    Tier1,
    /// Every non-archived property
    All,
}

impl FromStr for ReportView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tier1" => Ok(ReportView::Tier1),
            "all" => Ok(ReportView::All),
            other => Err(format!("unknown report view '{}', expected tier1 or all", other)),
        }
    }
}

impl fmt::Display for ReportView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportView::Tier1 => f.write_str("tier1"),
            ReportView::All => f.write_str("all"),
        }
    }
}

/// Sort key for the all-properties view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportSort {
    #[default]
    Total,
    Criterion(Uuid),
}

impl FromStr for ReportSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "total" {
            return Ok(ReportSort::Total);
        }
        Uuid::parse_str(s)
            .map(ReportSort::Criterion)
            .map_err(|_| format!("unknown sort key '{}', expected total or a criterion id", s))
    }
}

impl fmt::Display for ReportSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportSort::Total => f.write_str("total"),
            ReportSort::Criterion(id) => write!(f, "{}", id),
        }
    }
}

/// Result of building a comparison report
#[derive(Debug)]
pub struct Report {
    pub scores: Vec<PropertyScore>,
    pub property_count: usize,
    pub tier1_count: usize,
    pub has_ratings: bool,
}

/// Score every non-archived property and order the result for display
///
/// # Pipeline Stages
/// 1. Drop archived properties
/// 2. Group ratings by property
/// 3. Score each property against the full criteria list
/// 4. Filter or rank according to the view and sort key
///
/// The Tier 1 view always orders by nice-to-have score and ignores `sort`.
pub fn build_report(
    properties: Vec<Property>,
    criteria: &[Criterion],
    ratings: Vec<Rating>,
    view: ReportView,
    sort: ReportSort,
) -> Report {
    let mut ratings_by_property: HashMap<Uuid, Vec<Rating>> = HashMap::new();
    for rating in ratings {
        ratings_by_property
            .entry(rating.property_id)
            .or_default()
            .push(rating);
    }

    let scores: Vec<PropertyScore> = properties
        .into_iter()
        .filter(|p| !p.archived)
        .map(|property| {
            let property_ratings = ratings_by_property.remove(&property.id).unwrap_or_default();
            compute_score(property, property_ratings, criteria)
        })
        .collect();

    let property_count = scores.len();
    let tier1_count = scores.iter().filter(|s| s.meets_all_must_haves).count();
    let has_ratings = scores.iter().any(|s| !s.ratings.is_empty());

    let scores = match (view, sort) {
        (ReportView::Tier1, _) => filter_tier1(scores),
        (ReportView::All, ReportSort::Total) => rank_by_total(scores),
        (ReportView::All, ReportSort::Criterion(id)) => rank_by_criterion(scores, id),
    };

    tracing::debug!(
        "Built {} report sorted by {}: {} rows from {} properties ({} tier 1)",
        view,
        sort,
        scores.len(),
        property_count,
        tier1_count
    );

    Report {
        scores,
        property_count,
        tier1_count,
        has_ratings,
    }
}
