// src/models/review.rs
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Review {
    pub review_id: String,   // System-assigned identifier, unique within the collection
    pub product: Value,      // Product the review is about
    pub username: Value,     // Author of the review
    pub review: Value,       // Free text body
    pub upvotes: u64,        // Starts at 0, only ever incremented
    #[serde(flatten)]
    pub extra: Map<String, Value>, // Caller-supplied fields kept verbatim
}

/// Upvote counter as returned by `GET /reviews/{id}/upvotes`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Upvotes {
    pub upvotes: u64,
}

/// A validated creation payload that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub product: Value,
    pub username: Value,
    pub review: Value,
    pub extra: Map<String, Value>,
}

impl NewReview {
    /// Validates a raw request body.
    ///
    /// Returns `None` when `product`, `username` or `review` is absent or
    /// falsy (see [`is_truthy`]). A body that is not a JSON object carries
    /// none of them.
    /// Any other field is kept as-is, except `review_id` and `upvotes` which
    /// belong to the system.
    pub fn from_payload(payload: Value) -> Option<Self> {
        let mut fields = match payload {
            Value::Object(fields) => fields,
            _ => Map::new(),
        };

        let product = take_required(&mut fields, "product");
        let username = take_required(&mut fields, "username");
        let review = take_required(&mut fields, "review");

        fields.shift_remove("review_id");
        fields.shift_remove("upvotes");

        Some(NewReview {
            product: product?,
            username: username?,
            review: review?,
            extra: fields,
        })
    }

    pub fn into_review(self, review_id: String) -> Review {
        Review {
            review_id,
            product: self.product,
            username: self.username,
            review: self.review,
            upvotes: 0,
            extra: self.extra,
        }
    }
}

fn take_required(fields: &mut Map<String, Value>, key: &str) -> Option<Value> {
    fields.shift_remove(key).filter(is_truthy)
}

/// JavaScript truthiness: `null`, `false`, `0`, `-0` and `""` are falsy,
/// every other value (including empty arrays and objects) is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Review {review_id} already has the maximum number of upvotes")]
pub struct UpvoteOverflow {
    pub review_id: String,
}

// First record whose id matches, in collection order
pub fn find_review<'a>(reviews: &'a [Review], review_id: &str) -> Option<&'a Review> {
    reviews.iter().find(|review| review.review_id == review_id)
}

// New collection with `review` appended at the end
pub fn with_review(reviews: &[Review], review: Review) -> Vec<Review> {
    let mut updated = Vec::with_capacity(reviews.len() + 1);
    updated.extend_from_slice(reviews);
    updated.push(review);
    updated
}

/// Builds the collection that results from upvoting `review_id` once.
///
/// Returns the upvoted record together with the new collection, or `None`
/// when no record carries that id. Every record with a matching id is
/// replaced by the upvoted copy of the first match; all others pass through.
/// A counter already at `u64::MAX` is an error, never a wrap.
pub fn with_upvote(
    reviews: &[Review],
    review_id: &str,
) -> Result<Option<(Review, Vec<Review>)>, UpvoteOverflow> {
    let Some(current) = find_review(reviews, review_id) else {
        return Ok(None);
    };
    let upvotes = current.upvotes.checked_add(1).ok_or_else(|| UpvoteOverflow {
        review_id: review_id.to_string(),
    })?;
    let upvoted = Review {
        upvotes,
        ..current.clone()
    };

    let updated = reviews
        .iter()
        .map(|review| {
            if review.review_id == review_id {
                upvoted.clone()
            } else {
                review.clone()
            }
        })
        .collect();

    Ok(Some((upvoted, updated)))
}
