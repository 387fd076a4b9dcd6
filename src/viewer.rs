use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::presentation::{self, Presentation, PresentationWithSlides};
use crate::models::slide::Slide;

/// An opened presentation being paged through one slide at a time.
#[derive(Debug, Clone)]
pub struct DeckViewer {
    deck: PresentationWithSlides,
    current: usize,
}

impl DeckViewer {
    pub fn new(deck: PresentationWithSlides) -> Self {
        DeckViewer { deck, current: 0 }
    }

    pub fn presentation(&self) -> &Presentation {
        &self.deck.presentation
    }

    pub fn slides(&self) -> &[Slide] {
        &self.deck.slides
    }

    pub fn index(&self) -> usize {
        self.current
    }

    /// The slide on screen, or `None` for a deck without slides.
    pub fn current(&self) -> Option<&Slide> {
        self.deck.slides.get(self.current)
    }

    /// (1-based position, total slides). `(0, 0)` for an empty deck.
    pub fn position(&self) -> (usize, usize) {
        let total = self.deck.slides.len();
        if total == 0 { (0, 0) } else { (self.current + 1, total) }
    }

    pub fn has_next(&self) -> bool {
        self.current + 1 < self.deck.slides.len()
    }

    pub fn has_prev(&self) -> bool {
        self.current > 0
    }

    /// Advance one slide. Returns false at the last slide.
    pub fn next(&mut self) -> bool {
        if self.has_next() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Go back one slide. Returns false at the first slide.
    pub fn prev(&mut self) -> bool {
        if self.has_prev() {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to a slide by 0-based index. Out-of-range indexes are ignored.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index < self.deck.slides.len() {
            self.current = index;
            true
        } else {
            false
        }
    }

    /// Leave the viewer, handing back the deck.
    pub fn close(self) -> PresentationWithSlides {
        self.deck
    }
}

/// Open a presentation for viewing and record one view.
///
/// Returns `None` when the presentation does not exist. A failed view-count
/// increment is logged and does not prevent opening.
pub async fn open(pool: &PgPool, id: i64) -> Result<Option<DeckViewer>, AppError> {
    let Some(mut deck) = presentation::find_with_slides(pool, id).await? else {
        return Ok(None);
    };

    match presentation::increment_view_count(pool, id).await {
        Ok(Some(counted)) => deck.presentation = counted,
        Ok(None) => log::warn!("Presentation {id} vanished before its view was counted"),
        Err(e) => log::warn!("Could not count view of presentation {id}: {e}"),
    }

    Ok(Some(DeckViewer::new(deck)))
}
