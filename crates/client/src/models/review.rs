//! Review domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use foodiefinds_core::{Email, Rating, ReviewId};

/// A published food review.
///
/// The id and `posted_at` timestamp are assigned by the remote store on
/// creation. `owner` is immutable after creation; only the owner may
/// mutate or delete the review (enforced by the remote store).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Server-assigned unique id.
    #[serde(rename = "_id")]
    pub id: ReviewId,
    pub food_name: String,
    /// URI of the dish photo.
    pub food_image: String,
    pub restaurant_name: String,
    pub location: String,
    pub rating: Rating,
    pub review_text: String,
    /// Owner key, immutable after creation.
    #[serde(rename = "userEmail")]
    pub owner: Email,
    /// Owner display name captured at posting time.
    #[serde(rename = "reviewerName")]
    pub owner_name: String,
    /// Owner avatar captured at posting time.
    #[serde(rename = "reviewerPhoto", default)]
    pub owner_photo: Option<String>,
    /// Server-assigned posting timestamp.
    #[serde(rename = "postedDate")]
    pub posted_at: DateTime<Utc>,
}

/// Fields a validation failure can name.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is empty.
    #[error("{0} is required")]
    MissingField(&'static str),
    /// No star rating was selected.
    #[error("please select a star rating")]
    MissingRating,
}

/// An unsaved review as the editor assembles it.
///
/// `rating` starts as `None` (no stars selected); [`ReviewDraft::validate`]
/// refuses the draft until every field is filled in, so an invalid draft
/// never reaches the network.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewDraft {
    pub food_name: String,
    pub food_image: String,
    pub restaurant_name: String,
    pub location: String,
    pub rating: Option<Rating>,
    pub review_text: String,
}

impl ReviewDraft {
    /// Pre-fill a draft from an existing review (edit flow).
    #[must_use]
    pub fn from_review(review: &Review) -> Self {
        Self {
            food_name: review.food_name.clone(),
            food_image: review.food_image.clone(),
            restaurant_name: review.restaurant_name.clone(),
            location: review.location.clone(),
            rating: Some(review.rating),
            review_text: review.review_text.clone(),
        }
    }

    /// Check the draft is submittable.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingRating` if no stars are selected,
    /// or `ValidationError::MissingField` naming the first empty field.
    pub fn validate(&self) -> Result<Rating, ValidationError> {
        let rating = self.rating.ok_or(ValidationError::MissingRating)?;
        let fields = [
            ("foodName", &self.food_name),
            ("foodImage", &self.food_image),
            ("restaurantName", &self.restaurant_name),
            ("location", &self.location),
            ("reviewText", &self.review_text),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingField(name));
            }
        }
        Ok(rating)
    }
}

/// Wire payload for creating or updating a review.
///
/// On create, the remote store fills in the id and posting timestamp;
/// on update, the owner fields are left untouched server-side.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPayload {
    pub food_name: String,
    pub food_image: String,
    pub restaurant_name: String,
    pub location: String,
    pub rating: Rating,
    pub review_text: String,
    #[serde(rename = "userEmail")]
    pub owner: Email,
    #[serde(rename = "reviewerName")]
    pub owner_name: String,
    #[serde(rename = "reviewerPhoto")]
    pub owner_photo: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn draft() -> ReviewDraft {
        ReviewDraft {
            food_name: "Margherita Pizza".into(),
            food_image: "https://img.example/pizza.jpg".into(),
            restaurant_name: "Tony's Pizzeria".into(),
            location: "Brooklyn, NY".into(),
            rating: Some(Rating::new(5).unwrap()),
            review_text: "Perfect char on the crust.".into(),
        }
    }

    #[test]
    fn test_validate_accepts_complete_draft() {
        assert_eq!(draft().validate().unwrap().value(), 5);
    }

    #[test]
    fn test_validate_rejects_missing_rating() {
        let mut d = draft();
        d.rating = None;
        assert_eq!(d.validate().unwrap_err(), ValidationError::MissingRating);
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        let mut d = draft();
        d.food_name = "  ".into();
        assert_eq!(
            d.validate().unwrap_err(),
            ValidationError::MissingField("foodName")
        );

        let mut d = draft();
        d.review_text = String::new();
        assert_eq!(
            d.validate().unwrap_err(),
            ValidationError::MissingField("reviewText")
        );
    }

    #[test]
    fn test_review_wire_names() {
        let json = serde_json::json!({
            "_id": "6740f2",
            "foodName": "Pad Thai",
            "foodImage": "https://img.example/pad.jpg",
            "restaurantName": "Thai Corner",
            "location": "Austin, TX",
            "rating": 4,
            "reviewText": "Great balance of sweet and sour.",
            "userEmail": "sam@example.com",
            "reviewerName": "Sam",
            "postedDate": "2025-11-02T18:30:00Z"
        });

        let review: Review = serde_json::from_value(json).unwrap();
        assert_eq!(review.id.as_str(), "6740f2");
        assert_eq!(review.rating.value(), 4);
        assert_eq!(review.owner.as_str(), "sam@example.com");
        assert_eq!(review.owner_photo, None);
    }

    #[test]
    fn test_draft_from_review_roundtrip() {
        let json = serde_json::json!({
            "_id": "r1",
            "foodName": "Ramen",
            "foodImage": "https://img.example/r.jpg",
            "restaurantName": "Noodle Bar",
            "location": "Seattle, WA",
            "rating": 3,
            "reviewText": "Broth could be richer.",
            "userEmail": "sam@example.com",
            "reviewerName": "Sam",
            "reviewerPhoto": "https://pic.example/s.png",
            "postedDate": "2025-11-02T18:30:00Z"
        });
        let review: Review = serde_json::from_value(json).unwrap();
        let draft = ReviewDraft::from_review(&review);
        assert_eq!(draft.rating, Some(review.rating));
        assert_eq!(draft.food_name, review.food_name);
    }
}
