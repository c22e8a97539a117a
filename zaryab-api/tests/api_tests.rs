//! Integration tests for zaryab-api endpoints
//!
//! Every test drives the full router with `oneshot` against its own seeded
//! in-memory content store.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot` method
use zaryab_common::config::ApiConfig;

use common::*;

async fn get_json(app: axum::Router, path: &str) -> (StatusCode, Value) {
    let response = app.oneshot(get(path)).await.unwrap();
    let status = response.status();
    (status, extract_json(response.into_body()).await)
}

fn slugs(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .expect("data should be an array")
        .iter()
        .map(|item| item["slug"].as_str().unwrap_or_default().to_string())
        .collect()
}

// =============================================================================
// Operational endpoints
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app(setup_db().await);

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "zaryab-api");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_buildinfo_endpoint() {
    let app = setup_app(setup_db().await);

    let request = Request::builder()
        .uri("/buildinfo")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert!(body["git_hash"].is_string());
    assert!(body["build_profile"].is_string());
}

// =============================================================================
// Pagination
// =============================================================================

#[tokio::test]
async fn test_articles_pagination_meta() {
    let db = setup_db().await;
    for d in 1..=12 {
        add_post(&db, "articles", &format!("article-{}", d), &format!("Article {}", d), &day(d)).await;
    }

    let (status, body) = get_json(setup_app(db), "/articles?page=3&per_page=5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"], json!({"total": 12, "pages": 3, "page": 3, "per_page": 5}));
    // Newest first: the third page holds the two oldest
    assert_eq!(slugs(&body), vec!["article-2", "article-1"]);
}

#[tokio::test]
async fn test_pagination_defaults_and_cap() {
    let db = setup_db().await;
    add_post(&db, "articles", "only", "Only", &day(1)).await;

    let (_, body) = get_json(setup_app(db.clone()), "/articles?page=abc&per_page=-3").await;
    assert_eq!(body["meta"], json!({"total": 1, "pages": 1, "page": 1, "per_page": 10}));

    let (_, body) = get_json(setup_app(db.clone()), "/articles?per_page=5000").await;
    assert_eq!(body["meta"]["per_page"], 100);

    let (_, body) = get_json(setup_app(db), "/articles?page=4").await;
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["meta"]["page"], 4);
}

#[tokio::test]
async fn test_podcasts_default_page_size_and_date() {
    let db = setup_db().await;
    for d in 1..=25 {
        let id = add_post(&db, "podcast", &format!("episode-{}", d), &format!("Episode {}", d), &day(d)).await;
        set_meta(&db, id, "host", json!("Maryam")).await;
    }

    let (status, body) = get_json(setup_app(db), "/podcasts").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"], json!({"total": 25, "pages": 2, "page": 1, "per_page": 21}));
    assert_eq!(body["data"][0]["name"], "Episode 25");
    assert_eq!(body["data"][0]["date"], "2024-01-25");
    assert_eq!(body["data"][0]["host"], "Maryam");
    assert_eq!(body["data"][0]["guest"], Value::Null);
}

#[tokio::test]
async fn test_drafts_are_invisible() {
    let db = setup_db().await;
    add_post(&db, "articles", "live", "Live", &day(1)).await;
    add_draft(&db, "articles", "hidden").await;

    let (_, body) = get_json(setup_app(db.clone()), "/articles").await;
    assert_eq!(body["meta"]["total"], 1);

    let (status, _) = get_json(setup_app(db), "/articles/hidden").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Not found
// =============================================================================

#[tokio::test]
async fn test_unknown_slugs_return_stable_codes() {
    let db = setup_db().await;

    let cases = [
        ("/about-us", "no_page"),
        ("/articles/missing", "no_article"),
        ("/articles/similar/missing", "no_article"),
        ("/author-reviews/missing", "no_review"),
        ("/author-reviews/similar/missing", "no_review"),
        ("/authors/missing", "no_author"),
        ("/authors-archive/missing", "no_author"),
        ("/books/featured", "no_book"),
        ("/books/missing", "no_book"),
        ("/episodes/missing", "no_episode"),
        ("/featured-story", "no_featured_story"),
        ("/story-champion/latest", "no_story_champion"),
        ("/letters/missing", "no_letter"),
        ("/podcasts/missing", "no_podcast"),
        ("/poems/missing", "no_poem"),
        ("/stories/missing", "no_story"),
        ("/stories/similar/missing", "no_story"),
        ("/stories/collection/missing", "no_collection"),
        ("/categories", "no_categories"),
        ("/story_type", "no_terms"),
        ("/collection", "no_terms"),
    ];

    for (path, code) in cases {
        let (status, body) = get_json(setup_app(db.clone()), path).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{path}");
        assert_eq!(body["code"], code, "{path}");
        assert_eq!(body["data"]["status"], 404, "{path}");
        assert!(body["message"].is_string(), "{path}");
    }
}

#[tokio::test]
async fn test_slug_lookup_is_per_type() {
    let db = setup_db().await;
    add_post(&db, "stories", "shared", "Story", &day(1)).await;

    let (status, body) = get_json(setup_app(db), "/articles/shared").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "no_article");
}

// =============================================================================
// Articles and reviews
// =============================================================================

#[tokio::test]
async fn test_article_detail_denormalizes_author_and_categories() {
    let db = setup_db().await;
    let author = add_post(&db, "authors", "sara", "Sara", &day(1)).await;
    set_image(&db, author, "https://cdn.example/sara.jpg").await;
    set_meta(&db, author, "job", json!("Novelist")).await;

    let article = add_post(&db, "articles", "on-rain", "On Rain", &day(2)).await;
    set_body(&db, article, "First line\nsecond line\n\nNext paragraph", "").await;
    set_meta(&db, article, "author", json!({"ID": author, "post_title": "Sara"})).await;
    set_meta(&db, article, "big_image", json!({"url": "https://cdn.example/rain.jpg"})).await;
    set_meta(&db, article, "date_shamsi", json!("1403/01/15")).await;

    let essays = add_term(&db, "categories", "Essays", "essays").await;
    let nature = add_term(&db, "categories", "Nature", "nature").await;
    attach_term(&db, article, nature, 0).await;
    attach_term(&db, article, essays, 1).await;

    let (status, body) = get_json(setup_app(db.clone()), "/articles/on-rain").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "On Rain");
    assert_eq!(body["big_image"], "https://cdn.example/rain.jpg");
    assert_eq!(body["date_shamsi"], "1403/01/15");
    assert_eq!(body["time"], Value::Null);
    assert_eq!(body["author"]["name"], "Sara");
    assert_eq!(body["author"]["job"], "Novelist");
    assert_eq!(body["author"]["featured_image"], "https://cdn.example/sara.jpg");
    assert_eq!(body["author"]["youtube"], Value::Null);
    assert_eq!(
        body["categories"],
        json!([
            {"id": nature, "name": "Nature", "slug": "nature"},
            {"id": essays, "name": "Essays", "slug": "essays"},
        ])
    );
    assert_eq!(
        body["content"],
        "<p>First line<br />\nsecond line</p>\n<p>Next paragraph</p>\n"
    );

    let (_, list) = get_json(setup_app(db), "/articles").await;
    assert_eq!(list["data"][0]["author"], "Sara");
    assert_eq!(list["data"][0]["image"], Value::Null);
    assert_eq!(list["data"][0]["categories"][0]["slug"], "nature");
}

#[tokio::test]
async fn test_dangling_author_projects_as_empty() {
    let db = setup_db().await;
    let article = add_post(&db, "articles", "orphan", "Orphan", &day(1)).await;
    set_meta(&db, article, "author", json!(9999)).await;

    let (_, detail) = get_json(setup_app(db.clone()), "/articles/orphan").await;
    assert_eq!(detail["author"], Value::Null);
    assert_eq!(detail["categories"], json!([]));

    let (_, list) = get_json(setup_app(db), "/articles").await;
    assert_eq!(list["data"][0]["author"], "");
}

#[tokio::test]
async fn test_similar_excludes_the_named_item() {
    let db = setup_db().await;
    for (d, slug) in ["a", "b", "c"].iter().enumerate() {
        add_post(&db, "review", slug, slug, &day(d as u32 + 1)).await;
    }

    let (status, body) = get_json(setup_app(db), "/author-reviews/similar/b").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(slugs(&body), vec!["c", "a"]);
    assert_eq!(body["meta"]["total"], 2);
}

#[tokio::test]
async fn test_review_detail() {
    let db = setup_db().await;
    let review = add_post(&db, "review", "critique", "Critique", &day(1)).await;
    set_meta(&db, review, "time", json!("12 min")).await;

    let (status, body) = get_json(setup_app(db), "/author-reviews/critique").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["time"], "12 min");
    assert_eq!(body["author"], Value::Null);
}

// =============================================================================
// Stories and episodes
// =============================================================================

/// Story `s` with episodes numbered 1..=4, plus story `t` whose episodes
/// interleave; returns (story s id, story t id)
async fn seed_two_stories(db: &sqlx::SqlitePool) -> (i64, i64) {
    let author = add_post(db, "authors", "nima", "Nima", &day(1)).await;
    let s = add_post(db, "stories", "s", "Story S", &day(2)).await;
    let t = add_post(db, "stories", "t", "Story T", &day(3)).await;
    set_meta(db, s, "author", json!(author)).await;

    let winter = add_term(db, "collection", "Winter", "winter").await;
    attach_term(db, s, winter, 0).await;

    // Inserted out of order to prove sorting is by number, not insertion
    for n in [3, 1, 4, 2] {
        let id = add_post(db, "episodes", &format!("s-{}", n), &format!("S part {}", n), &day(10 + n)).await;
        set_meta(db, id, "story", json!(s)).await;
        set_meta(db, id, "episode_number", json!(n)).await;
        set_meta(db, id, "episode_title", json!(format!("Chapter {}", n))).await;
    }
    for n in [2, 5] {
        let id = add_post(db, "episodes", &format!("t-{}", n), &format!("T part {}", n), &day(20 + n)).await;
        set_meta(db, id, "story", json!(t.to_string())).await;
        set_meta(db, id, "episode_number", json!(n.to_string())).await;
    }

    (s, t)
}

#[tokio::test]
async fn test_episode_adjacency() {
    let db = setup_db().await;
    seed_two_stories(&db).await;

    let (status, body) = get_json(setup_app(db.clone()), "/episodes/s-3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["previous_episode"], "s-2");
    assert_eq!(body["next_episode"], "s-4");
    assert_eq!(body["story_slug"], "s");
    assert_eq!(body["episode_title"], "Chapter 3");
    assert_eq!(body["author"]["name"], "Nima");
    assert_eq!(body["collection"][0]["slug"], "winter");

    let (_, first) = get_json(setup_app(db.clone()), "/episodes/s-1").await;
    assert_eq!(first["previous_episode"], Value::Null);
    assert_eq!(first["next_episode"], "s-2");

    let (_, last) = get_json(setup_app(db.clone()), "/episodes/s-4").await;
    assert_eq!(last["next_episode"], Value::Null);

    // Story t skips 3 and 4; stored as numeric strings
    let (_, t2) = get_json(setup_app(db), "/episodes/t-2").await;
    assert_eq!(t2["previous_episode"], Value::Null);
    assert_eq!(t2["next_episode"], "t-5");
    assert_eq!(t2["author"], Value::Null);
    assert_eq!(t2["collection"], json!([]));
}

#[tokio::test]
async fn test_episodes_linked_as_post_object_list() {
    let db = setup_db().await;
    let story = add_post(&db, "stories", "s", "S", &day(1)).await;
    for n in 1..=3 {
        let id = add_post(&db, "episodes", &format!("e{}", n), "ep", &day(2)).await;
        set_meta(&db, id, "story", json!([{"ID": story, "post_title": "S"}])).await;
        set_meta(&db, id, "episode_number", json!(n)).await;
    }

    let (status, body) = get_json(setup_app(db.clone()), "/episodes/e2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["story_slug"], "s");
    assert_eq!(body["previous_episode"], "e1");
    assert_eq!(body["next_episode"], "e3");

    let (_, detail) = get_json(setup_app(db), "/stories/s").await;
    let episodes: Vec<&str> = detail["episodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["slug"].as_str().unwrap())
        .collect();
    assert_eq!(episodes, vec!["e1", "e2", "e3"]);
}

#[tokio::test]
async fn test_equal_episode_numbers_resolve_by_id() {
    let db = setup_db().await;
    let story = add_post(&db, "stories", "dup", "Dup", &day(1)).await;
    for (slug, n) in [("one", 1), ("two-a", 2), ("two-b", 2)] {
        let id = add_post(&db, "episodes", slug, slug, &day(2)).await;
        set_meta(&db, id, "story", json!(story)).await;
        set_meta(&db, id, "episode_number", json!(n)).await;
    }

    let (_, body) = get_json(setup_app(db), "/episodes/one").await;
    assert_eq!(body["next_episode"], "two-a");
}

#[tokio::test]
async fn test_episode_without_story() {
    let db = setup_db().await;
    add_post(&db, "episodes", "loose", "Loose", &day(1)).await;

    let (status, body) = get_json(setup_app(db), "/episodes/loose").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["story_slug"], "");
    assert_eq!(body["previous_episode"], Value::Null);
    assert_eq!(body["next_episode"], Value::Null);
}

#[tokio::test]
async fn test_story_detail_lists_episodes_in_order() {
    let db = setup_db().await;
    seed_two_stories(&db).await;

    let (status, body) = get_json(setup_app(db), "/stories/s").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["author"]["name"], "Nima");
    assert_eq!(body["collection"], json!([{"id": 1, "name": "Winter", "slug": "winter"}]));

    let numbers: Vec<i64> = body["episodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["episode_number"].as_i64().unwrap())
        .collect();
    assert_eq!(numbers, vec![1, 2, 3, 4]);
    assert_eq!(body["episodes"][0]["slug"], "s-1");
}

#[tokio::test]
async fn test_stories_filtered_by_category_and_collection() {
    let db = setup_db().await;
    let (s, _) = seed_two_stories(&db).await;
    let drama = add_term(&db, "categories", "Drama", "drama").await;
    attach_term(&db, s, drama, 0).await;

    let (_, all) = get_json(setup_app(db.clone()), "/stories").await;
    assert_eq!(slugs(&all), vec!["t", "s"]);

    let (_, filtered) = get_json(setup_app(db.clone()), "/stories?categories=drama,unused").await;
    assert_eq!(slugs(&filtered), vec!["s"]);
    assert_eq!(filtered["data"][0]["author"], "Nima");
    assert_eq!(filtered["data"][0]["categories"][0]["name"], "Drama");

    let (status, in_collection) = get_json(setup_app(db.clone()), "/stories/collection/winter").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(slugs(&in_collection), vec!["s"]);

    let (_, similar) = get_json(setup_app(db), "/stories/similar/s").await;
    assert_eq!(slugs(&similar), vec!["t"]);
}

#[tokio::test]
async fn test_featured_story() {
    let db = setup_db().await;
    let featured = add_post(&db, "featured_story", "pick", "Pick", &day(1)).await;

    let (status, body) = get_json(setup_app(db.clone()), "/featured-story").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "no_story");

    let story = add_post(&db, "stories", "chosen", "Chosen", &day(2)).await;
    set_meta(&db, story, "duration", json!("8 min")).await;
    set_meta(&db, featured, "story", json!([story])).await;

    let (status, body) = get_json(setup_app(db), "/featured-story").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["slug"], "chosen");
    assert_eq!(body["duration"], "8 min");
    assert_eq!(body["author"], "");
    assert_eq!(body["excerpt"], "Body of Chosen");
}

#[tokio::test]
async fn test_latest_story_champion() {
    let db = setup_db().await;
    let author = add_post(&db, "authors", "leila", "Leila", &day(1)).await;
    let story = add_post(&db, "stories", "winner", "Winner", &day(1)).await;
    set_body(&db, story, "Full text", "Hand written summary").await;

    add_post(&db, "story_champion", "old", "Old", &day(2)).await;
    let latest = add_post(&db, "story_champion", "new", "New", &day(3)).await;
    set_meta(&db, latest, "author", json!(author)).await;
    set_meta(&db, latest, "story", json!({"id": story})).await;

    let (status, body) = get_json(setup_app(db), "/story-champion/latest").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["author"], json!({"name": "Leila", "slug": "leila"}));
    assert_eq!(
        body["story"],
        json!({"title": "Winner", "excerpt": "Hand written summary", "slug": "winner"})
    );
    assert_eq!(body["featured_image"], Value::Null);
}

// =============================================================================
// Poems, books, letters, authors, pages
// =============================================================================

#[tokio::test]
async fn test_poems_excerpt_and_type_filter() {
    let db = setup_db().await;
    let ghazal = add_term(&db, "poem_type", "Ghazal", "ghazal").await;
    let poem = add_post(&db, "poem", "night", "Night", &day(1)).await;
    set_body(&db, poem, "line one\nline two\nline three\nline four", "").await;
    attach_term(&db, poem, ghazal, 0).await;
    add_post(&db, "poem", "free", "Free", &day(2)).await;

    let (_, body) = get_json(setup_app(db.clone()), "/poems?poem_type=ghazal").await;
    assert_eq!(slugs(&body), vec!["night"]);
    assert_eq!(body["data"][0]["excerpt"], "<p>line one<br>\nline two<br>\nline three");
    assert_eq!(body["data"][0]["poem_type"], json!([{"id": ghazal, "name": "Ghazal", "slug": "ghazal"}]));

    let (_, all) = get_json(setup_app(db.clone()), "/poems").await;
    assert_eq!(all["meta"]["total"], 2);

    let (status, detail) = get_json(setup_app(db), "/poems/night").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        detail["content"],
        "<p>line one<br />\nline two<br />\nline three<br />\nline four</p>\n"
    );
}

#[tokio::test]
async fn test_books() {
    let db = setup_db().await;
    let old = add_post(&db, "book", "first", "First", &day(1)).await;
    set_meta(&db, old, "pdf", json!("https://cdn.example/first.pdf")).await;
    let latest = add_post(&db, "book", "second", "Second", &day(2)).await;
    set_meta(&db, latest, "collection", json!("Short prose")).await;

    let (status, featured) = get_json(setup_app(db.clone()), "/books/featured").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(featured["slug"], "second");
    assert_eq!(featured["pdf"], "");

    let (status, detail) = get_json(setup_app(db), "/books/second").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["collection"], "Short prose");
    assert_eq!(detail["author"], Value::Null);
}

#[tokio::test]
async fn test_letters_filters() {
    let db = setup_db().await;
    let archive = add_term(&db, "letter_type", "Archive", "archive").await;
    let personal = add_term(&db, "letter_type", "Personal", "personal").await;

    let old = add_post(&db, "letters", "old", "Old", &day(1)).await;
    attach_term(&db, old, archive, 0).await;
    attach_term(&db, old, personal, 1).await;
    let mid = add_post(&db, "letters", "mid", "Mid", &day(2)).await;
    attach_term(&db, mid, personal, 0).await;
    add_post(&db, "letters", "new", "New", &day(3)).await;

    let cases = [
        ("/letters", vec!["new", "mid", "old"]),
        ("/letters?type=all", vec!["new", "mid", "old"]),
        ("/letters?type=archive", vec!["old"]),
        ("/letters?type=non-archive", vec!["new", "mid"]),
        ("/letters?letter_type=personal", vec!["mid", "old"]),
        ("/letters?type=non-archive&letter_type=personal", vec!["mid"]),
    ];
    for (path, expected) in cases {
        let (_, body) = get_json(setup_app(db.clone()), path).await;
        assert_eq!(slugs(&body), expected, "{path}");
        assert_eq!(body["meta"]["total"], expected.len(), "{path}");
    }
}

#[tokio::test]
async fn test_letter_detail_images() {
    let db = setup_db().await;
    let letter = add_post(&db, "letters", "no-12", "Letter 12", &day(1)).await;
    set_meta(&db, letter, "number", json!(12)).await;
    set_meta(&db, letter, "pdf", json!({"url": "https://cdn.example/12.pdf"})).await;
    set_meta(
        &db,
        letter,
        "images",
        json!([
            {"number": 1, "image": {"url": "https://cdn.example/12-1.jpg"}},
            {"number": 2, "image": "https://cdn.example/12-2.jpg"},
        ]),
    )
    .await;

    let (status, body) = get_json(setup_app(db.clone()), "/letters/no-12").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "number": 12,
            "title": "Letter 12",
            "images": [
                {"number": 1, "image": "https://cdn.example/12-1.jpg"},
                {"number": 2, "image": "https://cdn.example/12-2.jpg"},
            ],
        })
    );

    let (_, list) = get_json(setup_app(db), "/letters").await;
    assert_eq!(list["data"][0]["pdf"], "https://cdn.example/12.pdf");
}

#[tokio::test]
async fn test_authors_and_archive() {
    let db = setup_db().await;
    let author = add_post(&db, "authors", "sara", "Sara", &day(1)).await;
    set_meta(&db, author, "total_letters", json!(4)).await;
    add_post(&db, "authors_archive", "older", "Older", &day(1)).await;
    add_post(&db, "authors_archive", "newer", "Newer", &day(2)).await;

    let (_, authors) = get_json(setup_app(db.clone()), "/authors").await;
    assert_eq!(authors["data"][0]["name"], "Sara");
    assert_eq!(authors["data"][0]["total_letters"], 4);

    let (_, detail) = get_json(setup_app(db.clone()), "/authors/sara").await;
    assert_eq!(detail["content"], "Body of Sara");

    let (_, archive) = get_json(setup_app(db.clone()), "/authors-archive").await;
    assert_eq!(slugs(&archive), vec!["newer", "older"]);
    assert_eq!(archive["data"][0]["excerpt"], "Body of Newer");

    let (status, entry) = get_json(setup_app(db), "/authors-archive/older").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(entry["title"], "Older");
}

#[tokio::test]
async fn test_about_us() {
    let db = setup_db().await;
    let page = add_post(&db, "page", "about-us", "About Us", &day(1)).await;
    set_meta(
        &db,
        page,
        "questions",
        json!([{"question": "Who are we?", "answer": "Readers."}]),
    )
    .await;

    let (status, body) = get_json(setup_app(db), "/about-us").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["slug"], "about-us");
    assert_eq!(body["content"], "<p>Body of About Us</p>\n");
    assert_eq!(body["questions"], json!([{"question": "Who are we?", "answer": "Readers."}]));
}

// =============================================================================
// Taxonomies
// =============================================================================

#[tokio::test]
async fn test_taxonomy_listing_includes_empty_terms() {
    let db = setup_db().await;
    let zeta = add_term(&db, "story_type", "Zeta", "zeta").await;
    let alpha = add_term(&db, "story_type", "Alpha", "alpha").await;
    add_term(&db, "categories", "Only", "only").await;

    let story = add_post(&db, "stories", "a", "A", &day(1)).await;
    attach_term(&db, story, zeta, 0).await;
    let draft = add_draft(&db, "stories", "b").await;
    attach_term(&db, draft, zeta, 0).await;

    let (status, body) = get_json(setup_app(db.clone()), "/story_type").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"id": alpha, "name": "Alpha", "slug": "alpha", "count": 0},
            {"id": zeta, "name": "Zeta", "slug": "zeta", "count": 1},
        ])
    );

    let (status, categories) = get_json(setup_app(db.clone()), "/categories").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(categories[0]["slug"], "only");

    let (status, body) = get_json(setup_app(db), "/poem_type").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No terms found in poem_type");
}

#[tokio::test]
async fn test_taxonomy_routes_follow_config() {
    let db = setup_db().await;
    add_term(&db, "poem_type", "Ghazal", "ghazal").await;

    let config = ApiConfig {
        taxonomy_routes: vec![zaryab_common::db::Taxonomy::StoryType],
        ..ApiConfig::default()
    };
    let response = setup_app_with(db, config).oneshot(get("/poem_type")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    // Unrouted: axum's empty 404, not a JSON error body
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(bytes.is_empty());
}

// =============================================================================
// Global search
// =============================================================================

#[tokio::test]
async fn test_global_search_without_filters_counts_everything() {
    let db = setup_db().await;
    for d in 1..=3 {
        add_post(&db, "stories", &format!("story-{}", d), "Story", &day(d)).await;
    }
    add_post(&db, "poem", "poem", "Poem", &day(1)).await;
    add_post(&db, "book", "book", "Book", &day(1)).await;

    let (status, body) = get_json(setup_app(db), "/global-search").await;
    assert_eq!(status, StatusCode::OK);

    let keys: Vec<&String> = body.as_object().unwrap().keys().collect();
    assert_eq!(keys.len(), 6);
    assert_eq!(body["stories"]["count"], 3);
    assert_eq!(body["stories"]["posts"].as_array().unwrap().len(), 3);
    assert_eq!(body["poem"]["count"], 1);
    assert_eq!(body["articles"], json!({"count": 0, "posts": []}));
    assert!(body.get("book").is_none());
}

#[tokio::test]
async fn test_global_search_keyword_and_categories() {
    let db = setup_db().await;
    let moon = add_post(&db, "stories", "moon-river", "Moon River", &day(1)).await;
    let tide = add_post(&db, "poem", "tide", "Tide", &day(2)).await;
    set_body(&db, tide, "the pale MOON rises", "").await;
    add_post(&db, "articles", "sun", "Sun", &day(3)).await;
    add_post(&db, "letters", "discount", "100% moon", &day(4)).await;

    let (_, body) = get_json(setup_app(db.clone()), "/global-search?keyword=moon").await;
    assert_eq!(body["stories"]["count"], 1);
    assert_eq!(body["stories"]["posts"][0], json!({"title": "Moon River", "featured_image": null, "slug": "moon-river"}));
    assert_eq!(body["poem"]["count"], 1);
    assert_eq!(body["articles"]["count"], 0);
    assert_eq!(body["letters"]["count"], 1);

    // Wildcards in the keyword match literally
    let (_, body) = get_json(setup_app(db.clone()), "/global-search?keyword=0%25%20moon").await;
    assert_eq!(body["letters"]["count"], 1);
    let (_, body) = get_json(setup_app(db.clone()), "/global-search?keyword=%25").await;
    assert_eq!(body["stories"]["count"], 0);

    let fantasy = add_term(&db, "categories", "Fantasy", "fantasy").await;
    attach_term(&db, moon, fantasy, 0).await;
    let (_, body) = get_json(setup_app(db), "/global-search?categories=fantasy").await;
    assert_eq!(body["stories"]["count"], 1);
    assert_eq!(body["poem"]["count"], 0);
}

// =============================================================================
// Newsletter
// =============================================================================

#[tokio::test]
async fn test_newsletter_subscribe_then_conflict() {
    let db = setup_db().await;

    let response = setup_app(db.clone())
        .oneshot(post_json("/newsletter", json!({"email": "reader@example.com"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body, json!({"message": "Subscription successful"}));
    assert_eq!(subscriber_count(&db).await, 1);

    // Normalized before the duplicate check
    let response = setup_app(db.clone())
        .oneshot(post_json("/newsletter", json!({"email": "  Reader@Example.com "})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body, json!({"message": "Email already subscribed"}));
    assert_eq!(subscriber_count(&db).await, 1);
}

#[tokio::test]
async fn test_newsletter_rejects_invalid_email() {
    let db = setup_db().await;

    for body in [json!({"email": "not-an-email"}), json!({}), json!({"email": 42})] {
        let response = setup_app(db.clone())
            .oneshot(post_json("/newsletter", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = extract_json(response.into_body()).await;
        assert_eq!(body["code"], "rest_invalid_param");
        assert_eq!(body["data"]["status"], 400);
        assert!(body["data"]["params"]["email"].is_string());
    }
    assert_eq!(subscriber_count(&db).await, 0);
}

#[tokio::test]
async fn test_newsletter_accepts_form_and_query() {
    let db = setup_db().await;

    let response = setup_app(db.clone())
        .oneshot(post_form("/newsletter", "email=form%40example.com"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let request = Request::builder()
        .method("POST")
        .uri("/wp-json/v1/newsletter?email=query@example.com")
        .body(Body::empty())
        .unwrap();
    let response = setup_app(db.clone()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(subscriber_count(&db).await, 2);
}

#[tokio::test]
async fn test_newsletter_requires_post() {
    let response = setup_app(setup_db().await)
        .oneshot(get("/newsletter"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// =============================================================================
// Configuration
// =============================================================================

#[tokio::test]
async fn test_custom_prefix() {
    let db = setup_db().await;
    add_post(&db, "articles", "a", "A", &day(1)).await;

    let config = ApiConfig {
        api_prefix: "/api".to_string(),
        default_per_page: 1,
        ..ApiConfig::default()
    };
    let app = setup_app_with(db.clone(), config);
    let request = Request::builder()
        .uri("/api/articles")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["meta"]["per_page"], 1);

    let config = ApiConfig {
        api_prefix: String::new(),
        ..ApiConfig::default()
    };
    let request = Request::builder()
        .uri("/articles/a")
        .body(Body::empty())
        .unwrap();
    let response = setup_app_with(db, config).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
