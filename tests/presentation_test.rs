//! Integration tests for the presentation access operations: create, list,
//! fetch with slides, view counting and partial updates.

use slidedeck::errors::AppError;
use slidedeck::models::field::Field;
use slidedeck::models::presentation::{
    self, NewPresentation, PresentationUpdate, PresentationUpdateOutcome,
};
use sqlx::PgPool;

mod common;
use common::{create_presentation, create_slide};

// ---------------------------------------------------------------------------
// create
// ---------------------------------------------------------------------------

#[sqlx::test(migrator = "slidedeck::db::MIGRATOR")]
async fn test_create_starts_with_zero_views(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let created = presentation::create(
        &pool,
        &NewPresentation { title: "Kickoff".to_string(), description: Some("Q3 plan".to_string()) },
    )
    .await?;

    assert!(created.id > 0);
    assert_eq!(created.title, "Kickoff");
    assert_eq!(created.description.as_deref(), Some("Q3 plan"));
    assert_eq!(created.view_count, 0);
    assert_eq!(created.created_at, created.updated_at);
    Ok(())
}

#[sqlx::test(migrator = "slidedeck::db::MIGRATOR")]
async fn test_create_with_null_description(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let created = presentation::create(
        &pool,
        &NewPresentation { title: "No blurb".to_string(), description: None },
    )
    .await?;

    let stored = presentation::find_by_id(&pool, created.id).await?.expect("stored");
    assert_eq!(stored.description, None);
    assert_eq!(stored, created);
    Ok(())
}

#[sqlx::test(migrator = "slidedeck::db::MIGRATOR")]
async fn test_create_rejects_blank_title(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let result = presentation::create(
        &pool,
        &NewPresentation { title: "   ".to_string(), description: None },
    )
    .await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM presentations")
        .fetch_one(&pool)
        .await?;
    assert_eq!(count, 0, "nothing should be written on validation failure");
    Ok(())
}

#[sqlx::test(migrator = "slidedeck::db::MIGRATOR")]
async fn test_create_accepts_long_text(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let input = NewPresentation { title: "t".repeat(201), description: Some("d".repeat(2_001)) };
    let created = presentation::create(&pool, &input).await?;
    assert_eq!(created.title, input.title);
    assert_eq!(created.description, input.description);
    Ok(())
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

#[sqlx::test(migrator = "slidedeck::db::MIGRATOR")]
async fn test_list_empty(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let all = presentation::find_all(&pool).await?;
    assert!(all.is_empty());
    Ok(())
}

#[sqlx::test(migrator = "slidedeck::db::MIGRATOR")]
async fn test_list_newest_first(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let first = create_presentation(&pool, "First").await;
    let second = create_presentation(&pool, "Second").await;

    let ids: Vec<i64> = presentation::find_all(&pool).await?.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);

    let third = create_presentation(&pool, "Third").await;
    let all = presentation::find_all(&pool).await?;
    assert_eq!(all[0].id, third.id, "a new presentation moves to the front");
    assert!(all.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    Ok(())
}

// ---------------------------------------------------------------------------
// find_with_slides
// ---------------------------------------------------------------------------

#[sqlx::test(migrator = "slidedeck::db::MIGRATOR")]
async fn test_with_slides_not_found(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let result = presentation::find_with_slides(&pool, 999).await?;
    assert!(result.is_none(), "unknown id is a sentinel, not an error");
    Ok(())
}

#[sqlx::test(migrator = "slidedeck::db::MIGRATOR")]
async fn test_with_slides_empty_deck(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let p = create_presentation(&pool, "Empty").await;

    let found = presentation::find_with_slides(&pool, p.id).await?.expect("found");
    assert_eq!(found.presentation, p);
    assert!(found.slides.is_empty());
    Ok(())
}

#[sqlx::test(migrator = "slidedeck::db::MIGRATOR")]
async fn test_with_slides_ordered_by_order_index(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let p = create_presentation(&pool, "Ordered").await;
    let other = create_presentation(&pool, "Other").await;
    create_slide(&pool, p.id, "Third", 2).await;
    create_slide(&pool, p.id, "First", 0).await;
    create_slide(&pool, other.id, "Elsewhere", 1).await;
    create_slide(&pool, p.id, "Second", 1).await;

    let found = presentation::find_with_slides(&pool, p.id).await?.expect("found");
    let order: Vec<i32> = found.slides.iter().map(|s| s.order_index).collect();
    let titles: Vec<&str> = found.slides.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(order, vec![0, 1, 2]);
    assert_eq!(titles, vec!["First", "Second", "Third"]);
    assert!(found.slides.iter().all(|s| s.presentation_id == p.id));
    Ok(())
}

// ---------------------------------------------------------------------------
// increment_view_count
// ---------------------------------------------------------------------------

#[sqlx::test(migrator = "slidedeck::db::MIGRATOR")]
async fn test_increment_is_cumulative(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let p = create_presentation(&pool, "Popular").await;

    let mut last_updated = p.updated_at;
    for expected in 1..=3 {
        let counted = presentation::increment_view_count(&pool, p.id)
            .await?
            .expect("present");
        assert_eq!(counted.view_count, expected);
        assert!(counted.updated_at > last_updated, "updated_at must strictly increase");
        assert_eq!(counted.created_at, p.created_at);
        assert_eq!(counted.title, p.title);
        last_updated = counted.updated_at;
    }
    Ok(())
}

#[sqlx::test(migrator = "slidedeck::db::MIGRATOR")]
async fn test_increment_concurrent_calls_lose_nothing(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let p = create_presentation(&pool, "Busy").await;

    let id = p.id;
    let mut handles = Vec::new();
    for _ in 0..10 {
        let pool = pool.clone();
        handles.push(tokio::spawn(async move {
            presentation::increment_view_count(&pool, id).await
        }));
    }
    for handle in handles {
        handle.await?.expect("increment").expect("present");
    }

    let stored = presentation::find_by_id(&pool, p.id).await?.expect("present");
    assert_eq!(stored.view_count, 10);
    Ok(())
}

#[sqlx::test(migrator = "slidedeck::db::MIGRATOR")]
async fn test_increment_unknown_id(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
    assert!(presentation::increment_view_count(&pool, 999).await?.is_none());
    Ok(())
}

// ---------------------------------------------------------------------------
// update
// ---------------------------------------------------------------------------

#[sqlx::test(migrator = "slidedeck::db::MIGRATOR")]
async fn test_update_title_only(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let p = create_presentation(&pool, "Draft").await;

    let outcome = presentation::update(
        &pool,
        &PresentationUpdate { id: p.id, title: Field::Present("Final".to_string()), ..Default::default() },
    )
    .await?;

    let updated = outcome.into_updated().expect("updated");
    assert_eq!(updated.title, "Final");
    assert_eq!(updated.description, p.description);
    assert_eq!(updated.view_count, p.view_count);
    assert!(updated.updated_at > p.updated_at);
    Ok(())
}

#[sqlx::test(migrator = "slidedeck::db::MIGRATOR")]
async fn test_update_clears_description(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let p = create_presentation(&pool, "Described").await;
    assert!(p.description.is_some());

    let outcome = presentation::update(
        &pool,
        &PresentationUpdate { id: p.id, description: Field::Present(None), ..Default::default() },
    )
    .await?;

    let updated = outcome.into_updated().expect("updated");
    assert_eq!(updated.description, None);
    assert_eq!(updated.title, "Described");
    Ok(())
}

#[sqlx::test(migrator = "slidedeck::db::MIGRATOR")]
async fn test_update_without_fields_is_noop(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let p = create_presentation(&pool, "Untouched").await;

    let outcome = presentation::update(&pool, &PresentationUpdate { id: p.id, ..Default::default() }).await?;
    assert_eq!(outcome, PresentationUpdateOutcome::NoChangeRequested);

    let stored = presentation::find_by_id(&pool, p.id).await?.expect("present");
    assert_eq!(stored, p);
    Ok(())
}

#[sqlx::test(migrator = "slidedeck::db::MIGRATOR")]
async fn test_update_unknown_id(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let outcome = presentation::update(
        &pool,
        &PresentationUpdate { id: 999, title: Field::Present("Ghost".to_string()), ..Default::default() },
    )
    .await?;
    assert_eq!(outcome, PresentationUpdateOutcome::NotFound);
    Ok(())
}

#[sqlx::test(migrator = "slidedeck::db::MIGRATOR")]
async fn test_update_rejects_blank_title(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let p = create_presentation(&pool, "Keeps its name").await;

    let result = presentation::update(
        &pool,
        &PresentationUpdate { id: p.id, title: Field::Present("  ".to_string()), ..Default::default() },
    )
    .await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    let stored = presentation::find_by_id(&pool, p.id).await?.expect("present");
    assert_eq!(stored, p, "nothing should be written on validation failure");
    Ok(())
}
