use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::domain::{CriterionType, RatingScore};

/// Body for creating or updating a criterion
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CriterionDraft {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(rename = "type")]
    pub criterion_type: CriterionType,
    #[serde(default)]
    pub definition: Option<String>,
}

/// Body for creating or updating a property
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PropertyDraft {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub address: String,
    #[validate(length(min = 1))]
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
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// Body for toggling a property's archived flag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveRequest {
    pub archived: bool,
}

/// Query parameters for listing properties
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertyListQuery {
    pub archived: Option<bool>,
}

/// One rating in a batch save
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingInput {
    pub criterion_id: Uuid,
    pub score: RatingScore,
    #[serde(default)]
    pub notes: Option<String>,
}

impl RatingInput {
    /// Notes to store; blank notes are stored as NULL
    pub fn stored_notes(&self) -> Option<&str> {
        self.notes.as_deref().filter(|n| !n.trim().is_empty())
    }
}

/// Body for saving a property's ratings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SaveRatingsRequest {
    #[validate(length(min = 1))]
    pub ratings: Vec<RatingInput>,
}

/// Body for creating or updating a key location
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LocationDraft {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub address: String,
}

/// Body for a one-off geocode lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeRequest {
    #[serde(default)]
    pub address: String,
}

/// Query parameters for the report endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportQuery {
    #[serde(default)]
    pub view: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_draft_requires_fields() {
        let draft = PropertyDraft {
            name: "Loft".to_string(),
            address: String::new(),
            neighborhood: "RiNo".to_string(),
            ..Default::default()
        };
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_rating_input_rejects_out_of_range_score() {
        let json = r#"{"criterion_id":"6f1c1c1e-6b43-4bd4-9a0a-6a4ad2f4b1a1","score":4}"#;
        assert!(serde_json::from_str::<RatingInput>(json).is_err());

        let json = r#"{"criterion_id":"6f1c1c1e-6b43-4bd4-9a0a-6a4ad2f4b1a1","score":3}"#;
        let input: RatingInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.score, RatingScore::Meets);
        assert!(input.notes.is_none());
    }

    #[test]
    fn test_blank_rating_notes_stored_as_null() {
        let mut input = RatingInput {
            criterion_id: Uuid::nil(),
            score: RatingScore::Partial,
            notes: Some(String::new()),
        };
        assert_eq!(input.stored_notes(), None);

        input.notes = Some("  \t ".to_string());
        assert_eq!(input.stored_notes(), None);

        input.notes = Some("Washer in closet".to_string());
        assert_eq!(input.stored_notes(), Some("Washer in closet"));
    }
}
