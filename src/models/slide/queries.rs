use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::errors::{AppError, db_failure, rejected};
use crate::models::field::Field;
use super::types::*;

const RETURNING: &str =
    " RETURNING id, presentation_id, title, content, image_url, order_index, created_at";

/// Slides of a presentation by ascending `order_index`, ties by id.
///
/// An unknown presentation id yields an empty list, same as a presentation
/// without slides.
pub async fn find_by_presentation(pool: &PgPool, presentation_id: i64) -> Result<Vec<Slide>, AppError> {
    sqlx::query_as::<_, Slide>(
        "SELECT id, presentation_id, title, content, image_url, order_index, created_at \
         FROM slides WHERE presentation_id = $1 \
         ORDER BY order_index ASC, id ASC",
    )
    .bind(presentation_id)
    .fetch_all(pool)
    .await
    .map_err(db_failure("Failed to fetch slides by presentation"))
}

/// Find a single slide by id.
pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Slide>, AppError> {
    sqlx::query_as::<_, Slide>(
        "SELECT id, presentation_id, title, content, image_url, order_index, created_at \
         FROM slides WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(db_failure("Get slide failed"))
}

/// Create a slide under an existing presentation.
///
/// The parent check and the insert are one statement: no row is written when
/// the presentation does not exist, and `AppError::NotFound` is returned.
pub async fn create(pool: &PgPool, input: &NewSlide) -> Result<Slide, AppError> {
    input.validate().map_err(rejected("Slide creation rejected"))?;

    let created = sqlx::query_as::<_, Slide>(&format!(
        "INSERT INTO slides (presentation_id, title, content, image_url, order_index) \
         SELECT p.id, $2, $3, $4, $5 FROM presentations p WHERE p.id = $1{RETURNING}"
    ))
    .bind(input.presentation_id)
    .bind(&input.title)
    .bind(&input.content)
    .bind(input.image_url.as_deref())
    .bind(input.order_index)
    .fetch_optional(pool)
    .await
    .map_err(db_failure("Slide creation failed"))?;

    created.ok_or_else(|| {
        log::error!(
            "Slide creation failed: presentation with id {} not found",
            input.presentation_id
        );
        AppError::NotFound(format!("presentation with id {} not found", input.presentation_id))
    })
}

/// Apply a partial update. Absent fields keep their stored value.
///
/// An update with no fields touches nothing and reports `NoChangeRequested`.
pub async fn update(pool: &PgPool, input: &SlideUpdate) -> Result<SlideUpdateOutcome, AppError> {
    if !input.has_changes() {
        return Ok(SlideUpdateOutcome::NoChangeRequested);
    }
    input.validate().map_err(rejected("Slide update rejected"))?;

    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE slides SET ");
    {
        let mut set = qb.separated(", ");
        if let Field::Present(title) = &input.title {
            set.push("title = ").push_bind_unseparated(title.as_str());
        }
        if let Field::Present(content) = &input.content {
            set.push("content = ").push_bind_unseparated(content.as_str());
        }
        if let Field::Present(image_url) = &input.image_url {
            set.push("image_url = ").push_bind_unseparated(image_url.as_deref());
        }
        if let Field::Present(order_index) = input.order_index {
            set.push("order_index = ").push_bind_unseparated(order_index);
        }
    }
    qb.push(" WHERE id = ").push_bind(input.id).push(RETURNING);

    let updated = qb
        .build_query_as::<Slide>()
        .fetch_optional(pool)
        .await
        .map_err(db_failure("Slide update failed"))?;

    Ok(match updated {
        Some(slide) => SlideUpdateOutcome::Updated(slide),
        None => SlideUpdateOutcome::NotFound,
    })
}

/// Delete one slide. Returns false when no such slide exists.
pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM slides WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(db_failure("Slide deletion failed"))?;

    Ok(result.rows_affected() > 0)
}
