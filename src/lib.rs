//! JSON-file backed API for the pet shop client: reviews with upvotes, plus
//! read-only pets and terms listings.
//!
//! Every collection lives in its own pretty-printed JSON document under a
//! data directory (`db/` by default). The documents are read once at startup;
//! review mutations rewrite `reviews.json` in full.
pub mod config;
pub mod db;
pub mod error;
pub mod models;

#[cfg(feature = "server")]
pub mod api;
