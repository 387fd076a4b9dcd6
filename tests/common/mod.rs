//! Shared test fixtures for the model and RPC tests.
//!
//! Every test gets a fresh database from `#[sqlx::test]` with the crate's
//! migrations applied; these helpers only create rows.

#![allow(dead_code)]

use slidedeck::models::presentation::{self, NewPresentation, Presentation};
use slidedeck::models::slide::{self, NewSlide, Slide};
use sqlx::PgPool;

pub async fn create_presentation(pool: &PgPool, title: &str) -> Presentation {
    presentation::create(
        pool,
        &NewPresentation { title: title.to_string(), description: Some(format!("About {title}")) },
    )
    .await
    .expect("create presentation")
}

pub fn new_slide(presentation_id: i64, title: &str, order_index: i32) -> NewSlide {
    NewSlide {
        presentation_id,
        title: title.to_string(),
        content: format!("{title} body"),
        image_url: None,
        order_index,
    }
}

pub async fn create_slide(pool: &PgPool, presentation_id: i64, title: &str, order_index: i32) -> Slide {
    slide::create(pool, &new_slide(presentation_id, title, order_index))
        .await
        .expect("create slide")
}

pub async fn count_slides(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM slides")
        .fetch_one(pool)
        .await
        .expect("count slides")
}
