use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::errors::{AppError, db_failure, rejected};
use crate::models::field::Field;
use crate::models::slide;
use super::types::*;

const RETURNING: &str =
    " RETURNING id, title, description, view_count, created_at, updated_at";

// Strictly later than the previous value even if the clock has not advanced.
const TOUCH_UPDATED_AT: &str =
    "updated_at = GREATEST(clock_timestamp(), updated_at + INTERVAL '1 microsecond')";

/// Create a presentation with zero views. `created_at` and `updated_at` are equal.
pub async fn create(pool: &PgPool, input: &NewPresentation) -> Result<Presentation, AppError> {
    input.validate().map_err(rejected("Presentation creation rejected"))?;

    sqlx::query_as::<_, Presentation>(&format!(
        "INSERT INTO presentations (title, description, view_count, created_at, updated_at) \
         VALUES ($1, $2, 0, now(), now()){RETURNING}"
    ))
    .bind(&input.title)
    .bind(input.description.as_deref())
    .fetch_one(pool)
    .await
    .map_err(db_failure("Presentation creation failed"))
}

/// All presentations, most recently created first.
pub async fn find_all(pool: &PgPool) -> Result<Vec<Presentation>, AppError> {
    sqlx::query_as::<_, Presentation>(
        "SELECT id, title, description, view_count, created_at, updated_at \
         FROM presentations ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await
    .map_err(db_failure("Get presentations failed"))
}

/// Find a single presentation by id.
pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Presentation>, AppError> {
    sqlx::query_as::<_, Presentation>(
        "SELECT id, title, description, view_count, created_at, updated_at \
         FROM presentations WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(db_failure("Get presentation failed"))
}

/// Find a presentation and its slides ordered by `order_index`.
/// Returns `None` when the presentation does not exist.
pub async fn find_with_slides(
    pool: &PgPool,
    id: i64,
) -> Result<Option<PresentationWithSlides>, AppError> {
    let Some(presentation) = find_by_id(pool, id).await? else {
        return Ok(None);
    };

    let slides = slide::find_by_presentation(pool, presentation.id).await?;

    Ok(Some(PresentationWithSlides { presentation, slides }))
}

/// Add one view in a single store-side update. Returns `None` when absent.
pub async fn increment_view_count(pool: &PgPool, id: i64) -> Result<Option<Presentation>, AppError> {
    sqlx::query_as::<_, Presentation>(&format!(
        "UPDATE presentations SET view_count = view_count + 1, {TOUCH_UPDATED_AT} \
         WHERE id = $1{RETURNING}"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(db_failure("View count increment failed"))
}

/// Apply a partial update of title and/or description.
pub async fn update(
    pool: &PgPool,
    input: &PresentationUpdate,
) -> Result<PresentationUpdateOutcome, AppError> {
    if !input.has_changes() {
        return Ok(PresentationUpdateOutcome::NoChangeRequested);
    }
    input.validate().map_err(rejected("Presentation update rejected"))?;

    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE presentations SET ");
    {
        let mut set = qb.separated(", ");
        if let Field::Present(title) = &input.title {
            set.push("title = ").push_bind_unseparated(title.as_str());
        }
        if let Field::Present(description) = &input.description {
            set.push("description = ").push_bind_unseparated(description.as_deref());
        }
        set.push(TOUCH_UPDATED_AT);
    }
    qb.push(" WHERE id = ").push_bind(input.id).push(RETURNING);

    let updated = qb
        .build_query_as::<Presentation>()
        .fetch_optional(pool)
        .await
        .map_err(db_failure("Presentation update failed"))?;

    Ok(match updated {
        Some(p) => PresentationUpdateOutcome::Updated(p),
        None => PresentationUpdateOutcome::NotFound,
    })
}
