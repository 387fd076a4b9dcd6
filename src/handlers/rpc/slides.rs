use serde::Deserialize;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::slide::{self, NewSlide, Slide, SlideUpdate, SlideUpdateOutcome};
use super::presentations::IdInput;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationIdInput {
    pub presentation_id: i64,
}

/// getSlidesByPresentation (query)
pub async fn get_slides_by_presentation(
    pool: &PgPool,
    input: PresentationIdInput,
) -> Result<Vec<Slide>, AppError> {
    slide::find_by_presentation(pool, input.presentation_id).await
}

/// createSlide (mutation) - fails with NOT_FOUND for a dangling presentation id.
pub async fn create_slide(pool: &PgPool, input: NewSlide) -> Result<Slide, AppError> {
    let created = slide::create(pool, &input).await?;
    log::info!(
        "Created slide {} in presentation {} at position {}",
        created.id,
        created.presentation_id,
        created.order_index
    );
    Ok(created)
}

/// updateSlide (mutation)
///
/// Both "no such slide" and "no fields supplied" answer null on the wire.
pub async fn update_slide(pool: &PgPool, input: SlideUpdate) -> Result<Option<Slide>, AppError> {
    let outcome = slide::update(pool, &input).await?;
    if outcome == SlideUpdateOutcome::NoChangeRequested {
        log::debug!("updateSlide {} carried no fields, nothing written", input.id);
    }
    Ok(outcome.into_updated())
}

/// deleteSlide (mutation) - false when no such slide existed.
pub async fn delete_slide(pool: &PgPool, input: IdInput) -> Result<bool, AppError> {
    slide::delete(pool, input.id).await
}
