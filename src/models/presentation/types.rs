use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::field::Field;
use crate::models::slide::Slide;
use crate::validate::validate_required;

/// A stored presentation row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Presentation {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A presentation together with its slides in display order. Computed on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentationWithSlides {
    #[serde(flatten)]
    pub presentation: Presentation,
    pub slides: Vec<Slide>,
}

/// Input for creating a presentation. `description` may be null.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPresentation {
    pub title: String,
    pub description: Option<String>,
}

impl NewPresentation {
    pub fn validate(&self) -> Result<(), AppError> {
        match validate_required(&self.title, "Title") {
            Some(error) => Err(AppError::Validation(vec![error])),
            None => Ok(()),
        }
    }
}

/// Partial update of a presentation's editable fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PresentationUpdate {
    pub id: i64,
    #[serde(default)]
    pub title: Field<String>,
    #[serde(default)]
    pub description: Field<Option<String>>,
}

impl PresentationUpdate {
    pub fn has_changes(&self) -> bool {
        self.title.is_present() || self.description.is_present()
    }

    pub fn validate(&self) -> Result<(), AppError> {
        match &self.title {
            Field::Present(title) => match validate_required(title, "Title") {
                Some(error) => Err(AppError::Validation(vec![error])),
                None => Ok(()),
            },
            Field::Absent => Ok(()),
        }
    }
}

/// Result of a partial presentation update.
#[derive(Debug, Clone, PartialEq)]
pub enum PresentationUpdateOutcome {
    Updated(Presentation),
    NotFound,
    NoChangeRequested,
}

impl PresentationUpdateOutcome {
    pub fn into_updated(self) -> Option<Presentation> {
        match self {
            PresentationUpdateOutcome::Updated(p) => Some(p),
            _ => None,
        }
    }
}
