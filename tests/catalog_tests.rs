// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Catalog client and game endpoints against a local fake catalog API.

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{create_test_app_with_catalog, register_and_login, send, spawn_fake_catalog, TEST_API_KEY};
use game_shelf::error::AppError;
use game_shelf::services::{CatalogClient, CatalogQuery, SearchQuery, SortBy};

fn client(base_url: &str) -> CatalogClient {
    CatalogClient::new(
        base_url.to_string(),
        "catalog.test".to_string(),
        TEST_API_KEY.to_string(),
    )
}

fn ids(page: &Value) -> Vec<u64> {
    page["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["id"].as_u64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_list_sends_filters_and_api_key() {
    let (url, log) = spawn_fake_catalog().await;
    let catalog = client(&url);

    let query = CatalogQuery {
        platform: Some("browser".to_string()),
        genre: Some("Shooter".to_string()),
        sort: SortBy::Alphabetical,
    };
    let games = catalog.list_games(&query).await.unwrap();
    assert_eq!(
        games.iter().map(|g| g.id).collect::<Vec<_>>(),
        vec![2, 5]
    );

    let requests = log.lock().unwrap();
    let (path, params, key) = &requests[0];
    assert_eq!(path, "/games");
    assert_eq!(params["platform"], "browser");
    assert_eq!(params["category"], "Shooter");
    assert_eq!(params["sort-by"], "alphabetical");
    assert_eq!(key.as_deref(), Some(TEST_API_KEY));
}

#[tokio::test]
async fn test_oldest_first_reverses_release_order() {
    let (url, log) = spawn_fake_catalog().await;
    let catalog = client(&url);

    let newest = catalog
        .list_games(&CatalogQuery {
            sort: SortBy::ReleaseDate,
            ..Default::default()
        })
        .await
        .unwrap();
    let oldest = catalog
        .list_games(&CatalogQuery {
            sort: SortBy::ReleaseDateOldest,
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(newest[0].title, "Lost Ark");
    assert_eq!(oldest[0].title, "RuneScape");
    let mut reversed = newest.clone();
    reversed.reverse();
    assert_eq!(oldest, reversed);

    // Both ask the API for the same order
    let requests = log.lock().unwrap();
    assert!(requests
        .iter()
        .all(|(_, params, _)| params["sort-by"] == "release-date"));
}

#[tokio::test]
async fn test_popular_is_capped() {
    let (url, log) = spawn_fake_catalog().await;
    let games = client(&url).popular(8).await.unwrap();
    assert_eq!(games.len(), 8);
    assert_eq!(log.lock().unwrap()[0].1["sort-by"], "popularity");
}

#[tokio::test]
async fn test_game_detail_and_not_found() {
    let (url, log) = spawn_fake_catalog().await;
    let catalog = client(&url);

    let game = catalog.game(3).await.unwrap();
    assert_eq!(game.title, "RuneScape");
    assert_eq!(game.description.as_deref(), Some("Long description"));
    assert_eq!(game.screenshots.len(), 1);
    assert_eq!(log.lock().unwrap()[0].1["id"], "3");

    let err = catalog.game(999).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_search_filters() {
    let (url, _) = spawn_fake_catalog().await;
    let catalog = client(&url);

    let titles = |games: Vec<game_shelf::models::Game>| -> Vec<String> {
        games.into_iter().map(|g| g.title).collect()
    };

    let found = catalog
        .search(&SearchQuery {
            text: "world".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(titles(found), vec!["World of Warcraft", "World of Tanks"]);

    let found = catalog
        .search(&SearchQuery {
            text: "world".to_string(),
            platform: None,
            from_year: Some(2010),
        })
        .await
        .unwrap();
    assert_eq!(titles(found), vec!["World of Tanks"]);

    let found = catalog
        .search(&SearchQuery {
            text: String::new(),
            platform: Some("Web Browser".to_string()),
            from_year: None,
        })
        .await
        .unwrap();
    assert_eq!(titles(found), vec!["RuneScape", "Tanki Online"]);
}

#[tokio::test]
async fn test_upstream_failure_is_catalog_error() {
    let (url, _) = spawn_fake_catalog().await;
    let catalog = client(&format!("{}/broken", url));

    let err = catalog.list_games(&CatalogQuery::default()).await.unwrap_err();
    match err {
        AppError::CatalogApi(msg) => assert!(msg.contains("500"), "{}", msg),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_no_results_status_is_an_empty_listing() {
    let (url, _) = spawn_fake_catalog().await;
    let empty = format!("{}/empty", url);

    let query = CatalogQuery {
        platform: Some("browser".to_string()),
        genre: Some("sailing".to_string()),
        sort: SortBy::Relevance,
    };
    assert!(client(&empty).list_games(&query).await.unwrap().is_empty());

    let (app, _) = create_test_app_with_catalog(&empty);
    let (status, page) = send(&app, "GET", "/api/games?genre=sailing", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 0);
    assert_eq!(page["total_pages"], 0);

    let (status, page) = send(&app, "GET", "/api/games/search?q=world", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 0);

    let (status, games) = send(&app, "GET", "/api/games/popular", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(games, json!([]));
}

#[tokio::test]
async fn test_unreachable_catalog_is_bad_gateway() {
    // Nothing listens on the discard port
    let (app, _) = create_test_app_with_catalog("http://127.0.0.1:9");
    let (status, body) = send(&app, "GET", "/api/games", None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "catalog_error");
}

#[tokio::test]
async fn test_games_endpoint_pagination() {
    let (url, _) = spawn_fake_catalog().await;
    let (app, _) = create_test_app_with_catalog(&url);

    let (status, first) = send(&app, "GET", "/api/games", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["total"], 30);
    assert_eq!(first["total_pages"], 2);
    assert_eq!(ids(&first)[..5], [1, 2, 3, 4, 5]);

    let (_, second) = send(&app, "GET", "/api/games?page=2", None).await;
    assert_eq!(ids(&second).len(), 10);
    assert_eq!(second["has_next"], false);
    assert_eq!(second["has_previous"], true);

    let (status, _) = send(&app, "GET", "/api/games?page=0", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_games_endpoint_filters() {
    let (url, log) = spawn_fake_catalog().await;
    let (app, _) = create_test_app_with_catalog(&url);

    let (status, page) = send(
        &app,
        "GET",
        "/api/games?platform=pc&genre=All&sort=release-date-old",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["items"][0]["title"], "RuneScape");

    let requests = log.lock().unwrap();
    let (_, params, _) = &requests[0];
    assert_eq!(params["platform"], "pc");
    assert!(!params.contains_key("category"));
    assert_eq!(params["sort-by"], "release-date");
}

#[tokio::test]
async fn test_popular_endpoint() {
    let (url, _) = spawn_fake_catalog().await;
    let (app, _) = create_test_app_with_catalog(&url);

    let (status, games) = send(&app, "GET", "/api/games/popular", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(games.as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn test_search_endpoint() {
    let (url, _) = spawn_fake_catalog().await;
    let (app, _) = create_test_app_with_catalog(&url);

    let (status, page) = send(&app, "GET", "/api/games/search?q=filler&year=2015", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 25);
    assert_eq!(ids(&page).len(), 20);

    let (_, page) = send(&app, "GET", "/api/games/search?q=filler&year=2016", None).await;
    assert_eq!(page["total"], 0);

    let (status, body) = send(&app, "GET", "/api/games/search?q=x&year=soon", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_game_detail_endpoint_with_saved_status() {
    let (url, _) = spawn_fake_catalog().await;
    let (app, _) = create_test_app_with_catalog(&url);

    // Logged out: detail works, no status
    let (status, body) = send(&app, "GET", "/api/games/4", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Lost Ark");
    assert_eq!(body["description"], "Long description");
    assert_eq!(body["saved_status"], Value::Null);

    register_and_login(&app, "player_one", "one@example.com").await;
    let game = body.clone();
    send(
        &app,
        "POST",
        "/api/saved",
        Some(json!({ "status": "interested", "game": game })),
    )
    .await;

    let (_, body) = send(&app, "GET", "/api/games/4", None).await;
    assert_eq!(body["saved_status"], "interested");

    let (status, body) = send(&app, "GET", "/api/games/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}
