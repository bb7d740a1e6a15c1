//! Favorite domain types.

use serde::{Deserialize, Serialize};

use foodiefinds_core::{Email, FavoriteId, Rating, ReviewId};

use super::review::Review;

/// A bookmarked review.
///
/// Holds a reference to the review plus a denormalized display snapshot
/// captured at favorite-time. The snapshot is intentionally never
/// refreshed when the underlying review changes. The pair
/// `(owner, review_id)` is unique; the remote store enforces that
/// atomically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    /// Server-assigned unique id.
    #[serde(rename = "_id")]
    pub id: FavoriteId,
    /// Member who saved the favorite.
    #[serde(rename = "userEmail")]
    pub owner: Email,
    /// The review this favorite points at (reference, not ownership).
    pub review_id: ReviewId,
    pub food_name: String,
    pub food_image: String,
    pub restaurant_name: String,
    pub location: String,
    pub rating: Rating,
    /// Name of the member who wrote the review, at favorite-time.
    pub reviewer_name: String,
}

/// Wire payload for saving a favorite; the remote store assigns the id.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteDraft {
    #[serde(rename = "userEmail")]
    pub owner: Email,
    pub review_id: ReviewId,
    pub food_name: String,
    pub food_image: String,
    pub restaurant_name: String,
    pub location: String,
    pub rating: Rating,
    pub reviewer_name: String,
}

impl FavoriteDraft {
    /// Capture the display snapshot of `review` for `owner`.
    #[must_use]
    pub fn snapshot(owner: Email, review: &Review) -> Self {
        Self {
            owner,
            review_id: review.id.clone(),
            food_name: review.food_name.clone(),
            food_image: review.food_image.clone(),
            restaurant_name: review.restaurant_name.clone(),
            location: review.location.clone(),
            rating: review.rating,
            reviewer_name: review.owner_name.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn review() -> Review {
        serde_json::from_value(serde_json::json!({
            "_id": "r1",
            "foodName": "Ramen",
            "foodImage": "https://img.example/r.jpg",
            "restaurantName": "Noodle Bar",
            "location": "Seattle, WA",
            "rating": 4,
            "reviewText": "Rich broth.",
            "userEmail": "author@example.com",
            "reviewerName": "Avery",
            "postedDate": "2025-11-02T18:30:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn test_snapshot_captures_display_fields() {
        let owner = Email::parse("fan@example.com").unwrap();
        let draft = FavoriteDraft::snapshot(owner.clone(), &review());

        assert_eq!(draft.owner, owner);
        assert_eq!(draft.review_id.as_str(), "r1");
        assert_eq!(draft.food_name, "Ramen");
        assert_eq!(draft.reviewer_name, "Avery");
        assert_eq!(draft.rating.value(), 4);
    }

    #[test]
    fn test_favorite_wire_names() {
        let json = serde_json::json!({
            "_id": "f1",
            "userEmail": "fan@example.com",
            "reviewId": "r1",
            "foodName": "Ramen",
            "foodImage": "https://img.example/r.jpg",
            "restaurantName": "Noodle Bar",
            "location": "Seattle, WA",
            "rating": 4,
            "reviewerName": "Avery"
        });
        let favorite: Favorite = serde_json::from_value(json).unwrap();
        assert_eq!(favorite.id.as_str(), "f1");
        assert_eq!(favorite.review_id.as_str(), "r1");
    }
}
