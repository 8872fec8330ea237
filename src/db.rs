use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::models::review::{self, NewReview, Review, UpvoteOverflow};

pub const REVIEWS_FILE: &str = "reviews.json";
pub const PETS_FILE: &str = "pets.json";
pub const TERMS_FILE: &str = "terms.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to serialize collection: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Upvote(#[from] UpvoteOverflow),
}

/// The three JSON documents of the data directory.
///
/// Reviews are held behind a mutex that is kept for the whole
/// read-modify-write of a mutation, so writes from this process are applied
/// one after another and the in-memory snapshot always matches the last
/// successful write. Changes made to the files by other processes are not
/// picked up.
#[derive(Debug)]
pub struct Database {
    dir: PathBuf,
    reviews: Mutex<Vec<Review>>,
    pets: Vec<Value>,
    terms: Vec<Value>,
}

impl Database {
    // Read every document in `dir`
    pub async fn load(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();

        let reviews: Vec<Review> = read_document(&dir.join(REVIEWS_FILE)).await?;
        let pets: Vec<Value> = read_document(&dir.join(PETS_FILE)).await?;
        let terms: Vec<Value> = read_document(&dir.join(TERMS_FILE)).await?;

        info!(
            "[DB] Loaded {} reviews, {} pets, {} terms from {}",
            reviews.len(),
            pets.len(),
            terms.len(),
            dir.display()
        );

        Ok(Database {
            dir,
            reviews: Mutex::new(reviews),
            pets,
            terms,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn reviews(&self) -> Vec<Review> {
        self.reviews.lock().await.clone()
    }

    pub async fn find_review(&self, review_id: &str) -> Option<Review> {
        let reviews = self.reviews.lock().await;
        review::find_review(&reviews, review_id).cloned()
    }

    pub fn pets(&self) -> &[Value] {
        &self.pets
    }

    pub fn terms(&self) -> &[Value] {
        &self.terms
    }

    /// Assigns a fresh id to `new_review`, appends it and rewrites the
    /// reviews document. The snapshot is left as it was if the write fails.
    pub async fn insert_review(&self, new_review: NewReview) -> Result<Review, StoreError> {
        let mut reviews = self.reviews.lock().await;

        let review_id = fresh_review_id(&reviews);
        let created = new_review.into_review(review_id);
        debug!("[DB] Inserting review {}", created.review_id);

        let updated = review::with_review(&reviews, created.clone());
        self.persist_reviews(&updated).await?;
        *reviews = updated;

        info!("[DB] Review {} inserted", created.review_id);
        Ok(created)
    }

    /// Adds one upvote to `review_id` and rewrites the reviews document.
    ///
    /// `Ok(None)` means no review has that id; nothing is written then.
    pub async fn increment_upvotes(&self, review_id: &str) -> Result<Option<Review>, StoreError> {
        let mut reviews = self.reviews.lock().await;

        let upvote = review::with_upvote(&reviews, review_id).map_err(|e| {
            error!("[DB] {}", e);
            e
        })?;
        let Some((upvoted, updated)) = upvote else {
            debug!("[DB] No review {} to upvote", review_id);
            return Ok(None);
        };

        self.persist_reviews(&updated).await?;
        *reviews = updated;

        info!("[DB] Review {} now has {} upvotes", review_id, upvoted.upvotes);
        Ok(Some(upvoted))
    }

    async fn persist_reviews(&self, reviews: &[Review]) -> Result<(), StoreError> {
        let path = self.dir.join(REVIEWS_FILE);

        let json = serde_json::to_string_pretty(reviews).map_err(|e| {
            error!("[DB] Failed to serialize {} reviews: {}", reviews.len(), e);
            e
        })?;

        atomic_write(&path, &json).await.map_err(|source| {
            error!("[DB] Failed to write {}: {}", path.display(), source);
            StoreError::Write { path, source }
        })
    }
}

async fn read_document<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    let text = fs::read_to_string(path)
        .await
        .map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    serde_json::from_str(&text).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

// uuid v4, re-drawn on the off chance it is already taken
fn fresh_review_id(reviews: &[Review]) -> String {
    loop {
        let review_id = Uuid::new_v4().to_string();
        if review::find_review(reviews, &review_id).is_none() {
            return review_id;
        }
        warn!("[DB] Generated review id {} already in use", review_id);
    }
}

/// Writes `content` next to `path` and renames it into place.
/// The temp name carries the PID so two processes never share one.
async fn atomic_write(path: &Path, content: &str) -> Result<(), std::io::Error> {
    let tmp_path = path.with_extension(format!("json.tmp.{}", std::process::id()));
    fs::write(&tmp_path, content.as_bytes()).await?;
    if let Err(e) = fs::rename(&tmp_path, path).await {
        let _ = fs::remove_file(&tmp_path).await;
        return Err(e);
    }
    Ok(())
}
