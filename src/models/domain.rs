use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Whether a criterion gates Tier 1 or only affects ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CriterionType {
    #[serde(rename = "must-have")]
    MustHave,
    #[serde(rename = "nice-to-have")]
    NiceToHave,
}

impl CriterionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CriterionType::MustHave => "must-have",
            CriterionType::NiceToHave => "nice-to-have",
        }
    }
}

impl fmt::Display for CriterionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CriterionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "must-have" => Ok(CriterionType::MustHave),
            "nice-to-have" => Ok(CriterionType::NiceToHave),
            other => Err(format!("unknown criterion type: {}", other)),
        }
    }
}

/// A decision criterion defined by the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Criterion {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub criterion_type: CriterionType,
    #[serde(default)]
    pub definition: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Criterion {
    pub fn is_must_have(&self) -> bool {
        self.criterion_type == CriterionType::MustHave
    }
}

/// A candidate rental or purchase property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub neighborhood: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub bedrooms: Option<f64>,
    #[serde(default)]
    pub bathrooms: Option<f64>,
    #[serde(default)]
    pub sqft: Option<i32>,
    #[serde(default)]
    pub date_viewed: Option<NaiveDate>,
    #[serde(default)]
    pub listing_url: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Property {
    /// Coordinates, when both latitude and longitude are set
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates { latitude, longitude }),
            _ => None,
        }
    }
}

/// Raised when a numeric score is outside 1..=3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid rating score {0}: expected 1, 2 or 3")]
pub struct InvalidRatingScore(pub i64);

/// Ordinal rating of how well a property meets a criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum RatingScore {
    DoesntMeet = 1,
    Partial = 2,
    Meets = 3,
}

impl RatingScore {
    pub fn value(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for RatingScore {
    type Error = InvalidRatingScore;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(RatingScore::DoesntMeet),
            2 => Ok(RatingScore::Partial),
            3 => Ok(RatingScore::Meets),
            other => Err(InvalidRatingScore(other as i64)),
        }
    }
}

impl TryFrom<i16> for RatingScore {
    type Error = InvalidRatingScore;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .map_err(|_| InvalidRatingScore(value as i64))
            .and_then(RatingScore::try_from)
    }
}

impl From<RatingScore> for u8 {
    fn from(score: RatingScore) -> Self {
        score.value()
    }
}

/// A property's rating against one criterion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rating {
    pub id: Uuid,
    pub property_id: Uuid,
    pub criterion_id: Uuid,
    pub score: RatingScore,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comparison tier derived from the must-have outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Tier1,
    Tier2,
}

/// Scored view of one property, recomputed on every report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyScore {
    pub property: Property,
    pub must_have_score: f64,
    pub nice_to_have_score: f64,
    pub total_score: f64,
    pub meets_all_must_haves: bool,
    pub ratings: Vec<Rating>,
}

impl PropertyScore {
    pub fn tier(&self) -> Tier {
        if self.meets_all_must_haves {
            Tier::Tier1
        } else {
            Tier::Tier2
        }
    }

    /// The rating given for a criterion, if any
    pub fn rating_for(&self, criterion_id: Uuid) -> Option<&Rating> {
        self.ratings.iter().find(|r| r.criterion_id == criterion_id)
    }
}

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Memoized geocoding result keyed by normalized address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeCacheEntry {
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
}

impl GeocodeCacheEntry {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// An important place (work, gym, family) used for distance lookups
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyLocation {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl KeyLocation {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_score_accepts_only_three_values() {
        assert_eq!(RatingScore::try_from(1u8), Ok(RatingScore::DoesntMeet));
        assert_eq!(RatingScore::try_from(3u8), Ok(RatingScore::Meets));
        assert_eq!(RatingScore::try_from(0u8), Err(InvalidRatingScore(0)));
        assert_eq!(RatingScore::try_from(4u8), Err(InvalidRatingScore(4)));
        assert_eq!(RatingScore::try_from(-1i16), Err(InvalidRatingScore(-1)));
        assert_eq!(RatingScore::try_from(2i16), Ok(RatingScore::Partial));
    }

    #[test]
    fn test_rating_score_serde() {
        let score: RatingScore = serde_json::from_str("2").unwrap();
        assert_eq!(score, RatingScore::Partial);
        assert_eq!(serde_json::to_string(&RatingScore::Meets).unwrap(), "3");
        assert!(serde_json::from_str::<RatingScore>("5").is_err());
    }

    #[test]
    fn test_criterion_type_round_trip_text() {
        assert_eq!("must-have".parse::<CriterionType>(), Ok(CriterionType::MustHave));
        assert_eq!(CriterionType::NiceToHave.to_string(), "nice-to-have");
        assert!("optional".parse::<CriterionType>().is_err());
        assert_eq!(
            serde_json::to_string(&CriterionType::MustHave).unwrap(),
            "\"must-have\""
        );
    }
}
