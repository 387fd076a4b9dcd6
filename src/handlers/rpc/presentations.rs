use serde::Deserialize;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::presentation::{
    self, NewPresentation, Presentation, PresentationUpdate, PresentationWithSlides,
};

#[derive(Debug, Deserialize)]
pub struct IdInput {
    pub id: i64,
}

/// getPresentations (query)
pub async fn get_presentations(pool: &PgPool) -> Result<Vec<Presentation>, AppError> {
    presentation::find_all(pool).await
}

/// getPresentationWithSlides (query) - null when the id does not resolve.
pub async fn get_presentation_with_slides(
    pool: &PgPool,
    input: IdInput,
) -> Result<Option<PresentationWithSlides>, AppError> {
    presentation::find_with_slides(pool, input.id).await
}

/// incrementViewCount (mutation) - null when the id does not resolve.
pub async fn increment_view_count(
    pool: &PgPool,
    input: IdInput,
) -> Result<Option<Presentation>, AppError> {
    presentation::increment_view_count(pool, input.id).await
}

/// createPresentation (mutation)
pub async fn create_presentation(
    pool: &PgPool,
    input: NewPresentation,
) -> Result<Presentation, AppError> {
    let created = presentation::create(pool, &input).await?;
    log::info!("Created presentation {} '{}'", created.id, created.title);
    Ok(created)
}

/// updatePresentation (mutation) - null when nothing was updated.
pub async fn update_presentation(
    pool: &PgPool,
    input: PresentationUpdate,
) -> Result<Option<Presentation>, AppError> {
    Ok(presentation::update(pool, &input).await?.into_updated())
}
