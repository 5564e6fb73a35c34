//! Integration tests for the PostgreSQL repositories and store.
//!
//! These need a running PostgreSQL reachable via `DATABASE_URL`; run them
//! with `cargo test -p greyimage-db -- --ignored`.

use greyimage_core::search::SortDirection;
use greyimage_db::models::convert_task::CreateConvertTask;
use greyimage_db::models::image::{CreateImage, ImageQuery, ImageSortField};
use greyimage_db::repositories::{ConvertTaskRepo, ImageRepo};
use greyimage_db::store::{ConvertTaskStore, ImageStore, PgStore};
use sqlx::PgPool;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_image(name: &str, width: i32) -> CreateImage {
    CreateImage {
        name: name.to_string(),
        content_type: "image/png".to_string(),
        content: vec![0x89, b'P', b'N', b'G'],
        width,
        height: 1,
        created_by: Uuid::nil(),
    }
}

fn page(search: Option<&str>, page: i64, page_size: i64) -> ImageQuery {
    ImageQuery {
        search: search.map(str::to_string),
        sort: ImageSortField::Name,
        direction: SortDirection::Asc,
        page,
        page_size,
    }
}

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn create_then_find_round_trips(pool: PgPool) {
    let created = ImageRepo::create(&pool, &new_image("a.png", 4)).await.unwrap();
    let found = ImageRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .expect("image should exist");

    assert_eq!(found, created);
    assert_eq!(found.content, vec![0x89, b'P', b'N', b'G']);
    assert!(found.updated_at.is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn update_missing_row_returns_none(pool: PgPool) {
    let mut image = ImageRepo::create(&pool, &new_image("a.png", 4)).await.unwrap();
    assert!(ImageRepo::delete(&pool, image.id).await.unwrap());

    image.name = "b.png".into();
    assert!(ImageRepo::update(&pool, &image).await.unwrap().is_none());
    assert!(!ImageRepo::delete(&pool, image.id).await.unwrap());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn list_page_applies_search_and_offset(pool: PgPool) {
    let store = PgStore::new(pool);
    for i in 0..12 {
        ImageStore::insert(&store, &new_image(&format!("img-{i:02}.png"), i))
            .await
            .unwrap();
    }
    ImageStore::insert(&store, &new_image("other_50%.png", 1))
        .await
        .unwrap();

    assert_eq!(store.count(None).await.unwrap(), 13);
    assert_eq!(store.count(Some("img-")).await.unwrap(), 12);
    // Wildcards in the term are literal.
    assert_eq!(store.count(Some("50%")).await.unwrap(), 1);
    assert_eq!(store.count(Some("_")).await.unwrap(), 1);

    let second = store.list_page(&page(Some("img-"), 2, 5)).await.unwrap();
    let names: Vec<_> = second.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["img-05.png", "img-06.png", "img-07.png", "img-08.png", "img-09.png"]
    );
}

// ---------------------------------------------------------------------------
// Convert tasks
// ---------------------------------------------------------------------------

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn task_defaults_and_cascade(pool: PgPool) {
    let input = ImageRepo::create(&pool, &new_image("in.png", 1)).await.unwrap();
    let output = ImageRepo::create(&pool, &new_image("out.png", 1)).await.unwrap();

    let mut task = ConvertTaskRepo::create(
        &pool,
        &CreateConvertTask {
            in_image_id: input.id,
            parameters: None,
        },
        Uuid::nil(),
    )
    .await
    .unwrap();
    assert_eq!(task.status, "");
    assert_eq!(task.parameters, serde_json::json!({}));
    assert!(task.out_image_id.is_none());

    task.out_image_id = Some(output.id);
    task.status = "done".into();
    ConvertTaskRepo::update(&pool, &task).await.unwrap().unwrap();

    ImageRepo::delete(&pool, output.id).await.unwrap();
    let reloaded = ConvertTaskRepo::find_by_id(&pool, task.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.out_image_id, None);

    let store = PgStore::new(pool);
    assert_eq!(store.list_for_image(input.id).await.unwrap().len(), 1);
    ImageStore::delete(&store, input.id).await.unwrap();
    assert!(ConvertTaskStore::get_by_id(&store, task.id)
        .await
        .unwrap()
        .is_none());
}
