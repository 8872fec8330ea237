use actix_web::web;
use petreviews::db::{Database, PETS_FILE, REVIEWS_FILE, TERMS_FILE};
use serde_json::{json, Value};
use tempfile::TempDir;

pub const MILO_REVIEW: &str = "0c6f1b9e-5d3a-4e8e-9a41-2f7d8c1b6a10";
pub const LUNA_REVIEW: &str = "7e2a4d5c-1b8f-4c3a-b6d9-8f0e2a1c3b47";

// Data directory with two reviews, two pets and one term
pub fn seed_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_json(
        &dir,
        REVIEWS_FILE,
        &json!([
            {
                "review_id": MILO_REVIEW,
                "product": "Squeaky Bone",
                "username": "milo_the_beagle",
                "review": "Survived three days.",
                "upvotes": 4
            },
            {
                "review_id": LUNA_REVIEW,
                "product": "Cat Tower Deluxe",
                "username": "luna",
                "review": "Sturdy and tall.",
                "upvotes": 1,
                "verified": true
            }
        ]),
    );
    write_json(
        &dir,
        PETS_FILE,
        &json!([
            { "id": 1, "name": "Milo", "species": "dog" },
            { "id": 2, "name": "Luna", "species": "cat" }
        ]),
    );
    write_json(
        &dir,
        TERMS_FILE,
        &json!([{ "term": "Upvote", "definition": "A vote marking a review as helpful." }]),
    );
    dir
}

pub async fn load(dir: &TempDir) -> web::Data<Database> {
    web::Data::new(Database::load(dir.path()).await.unwrap())
}

pub fn read_reviews_file(dir: &TempDir) -> Vec<Value> {
    let text = std::fs::read_to_string(dir.path().join(REVIEWS_FILE)).unwrap();
    serde_json::from_str(&text).unwrap()
}

fn write_json(dir: &TempDir, name: &str, value: &Value) {
    let text = serde_json::to_string_pretty(value).unwrap();
    std::fs::write(dir.path().join(name), text).unwrap();
}
