use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::field::Field;
use crate::validate::{validate_image_url, validate_order_index};

/// A stored slide row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Slide {
    pub id: i64,
    pub presentation_id: i64,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub order_index: i32,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a slide. Title and content may be empty.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSlide {
    pub presentation_id: i64,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub order_index: i32,
}

impl NewSlide {
    pub fn validate(&self) -> Result<(), AppError> {
        let errors: Vec<String> = [
            self.image_url.as_deref().and_then(validate_image_url),
            validate_order_index(self.order_index),
        ]
        .into_iter()
        .flatten()
        .collect();

        if errors.is_empty() { Ok(()) } else { Err(AppError::Validation(errors)) }
    }
}

/// Partial update of a slide. Only `Present` fields are written.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SlideUpdate {
    pub id: i64,
    #[serde(default)]
    pub title: Field<String>,
    #[serde(default)]
    pub content: Field<String>,
    #[serde(default)]
    pub image_url: Field<Option<String>>,
    #[serde(default)]
    pub order_index: Field<i32>,
}

impl SlideUpdate {
    /// Columns this update would write, in a fixed order.
    pub fn changed_columns(&self) -> Vec<&'static str> {
        let mut cols = Vec::new();
        if self.title.is_present() {
            cols.push("title");
        }
        if self.content.is_present() {
            cols.push("content");
        }
        if self.image_url.is_present() {
            cols.push("image_url");
        }
        if self.order_index.is_present() {
            cols.push("order_index");
        }
        cols
    }

    pub fn has_changes(&self) -> bool {
        !self.changed_columns().is_empty()
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();
        if let Field::Present(Some(url)) = &self.image_url {
            errors.extend(validate_image_url(url));
        }
        if let Field::Present(order_index) = self.order_index {
            errors.extend(validate_order_index(order_index));
        }
        if errors.is_empty() { Ok(()) } else { Err(AppError::Validation(errors)) }
    }
}

/// Result of a partial slide update.
///
/// `NotFound` and `NoChangeRequested` are both sentinels, not errors.
#[derive(Debug, Clone, PartialEq)]
pub enum SlideUpdateOutcome {
    Updated(Slide),
    NotFound,
    NoChangeRequested,
}

impl SlideUpdateOutcome {
    pub fn into_updated(self) -> Option<Slide> {
        match self {
            SlideUpdateOutcome::Updated(s) => Some(s),
            _ => None,
        }
    }
}
