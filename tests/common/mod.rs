// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use game_shelf::config::Config;
use game_shelf::db::MemoryStore;
use game_shelf::routes::create_router;
use game_shelf::AppState;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

pub const TEST_API_KEY: &str = "test_api_key";
pub const TEST_PASSWORD: &str = "Abc123!!";

/// Create a test app with an in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (Router, Arc<AppState>) {
    create_test_app_with_catalog(&Config::test_default().catalog_api_url)
}

/// Create a test app whose catalog client points at `catalog_url`.
#[allow(dead_code)]
pub fn create_test_app_with_catalog(catalog_url: &str) -> (Router, Arc<AppState>) {
    let config = Config {
        catalog_api_url: catalog_url.to_string(),
        catalog_api_key: TEST_API_KEY.to_string(),
        ..Config::test_default()
    };
    let state = Arc::new(AppState::new(config, Box::new(MemoryStore::new())));
    (create_router(state.clone()), state)
}

/// Send a request with an optional JSON body and return status + parsed body.
#[allow(dead_code)]
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, read_json(response).await)
}

/// Parse a response body as JSON (`Null` for an empty body).
#[allow(dead_code)]
pub async fn read_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    }
}

/// Register and log in a user through the API.
#[allow(dead_code)]
pub async fn register_and_login(app: &Router, username: &str, email: &str) {
    let (status, _) = send(
        app,
        "POST",
        "/api/account/register",
        Some(serde_json::json!({
            "username": username,
            "email": email,
            "password": TEST_PASSWORD,
            "confirm_password": TEST_PASSWORD,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        app,
        "POST",
        "/api/account/login",
        Some(serde_json::json!({ "username": username, "password": TEST_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

/// A catalog game as the API returns it.
#[allow(dead_code)]
pub fn game_json(id: u64, title: &str, platform: &str, genre: &str, release_date: &str) -> Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "thumbnail": format!("https://example.com/g/{}/thumbnail.jpg", id),
        "short_description": format!("{} description", title),
        "game_url": format!("https://example.com/open/{}", id),
        "genre": genre,
        "platform": platform,
        "publisher": "Publisher",
        "developer": "Developer",
        "release_date": release_date,
        "profile_url": format!("https://example.com/{}", id),
    })
}

/// Games served by the fake catalog, in "relevance" order.
#[allow(dead_code)]
pub fn fixture_games() -> Vec<Value> {
    let mut games = vec![
        game_json(1, "World of Warcraft", "PC (Windows)", "MMORPG", "2004-11-23"),
        game_json(2, "World of Tanks", "PC (Windows)", "Shooter", "2011-04-12"),
        game_json(3, "RuneScape", "Web Browser", "MMORPG", "2001-01-04"),
        game_json(4, "Lost Ark", "PC (Windows)", "MMORPG", "2022-02-11"),
        game_json(5, "Tanki Online", "Web Browser", "Shooter", "2009-06-01"),
    ];
    // Pad the catalog so listings span more than one page
    for id in 100..125 {
        games.push(game_json(
            id,
            &format!("Filler Quest {}", id),
            "PC (Windows)",
            "MMORPG",
            "2015-05-05",
        ));
    }
    games
}

/// Requests seen by the fake catalog: (path, query params, api key header).
pub type RequestLog = Arc<Mutex<Vec<(String, HashMap<String, String>, Option<String>)>>>;

#[derive(Clone)]
struct FakeCatalog {
    games: Arc<Vec<Value>>,
    log: RequestLog,
}

fn record(catalog: &FakeCatalog, path: &str, params: &HashMap<String, String>, headers: &HeaderMap) {
    let key = headers
        .get("x-rapidapi-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    catalog
        .log
        .lock()
        .unwrap()
        .push((path.to_string(), params.clone(), key));
}

async fn fake_games(
    State(catalog): State<FakeCatalog>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Vec<Value>> {
    record(&catalog, "/games", &params, &headers);
    let mut games: Vec<Value> = catalog.games.iter().cloned().collect();
    if let Some(category) = params.get("category") {
        games.retain(|g| g["genre"].as_str().unwrap().eq_ignore_ascii_case(category));
    }
    if params.get("sort-by").map(String::as_str) == Some("release-date") {
        // Newest first, like the real API
        games.sort_by(|a, b| {
            b["release_date"]
                .as_str()
                .unwrap()
                .cmp(a["release_date"].as_str().unwrap())
        });
    }
    Json(games)
}

async fn fake_game(
    State(catalog): State<FakeCatalog>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    record(&catalog, "/game", &params, &headers);
    let id: u64 = params.get("id").and_then(|v| v.parse().ok()).unwrap_or(0);
    catalog
        .games
        .iter()
        .find(|g| g["id"].as_u64() == Some(id))
        .map(|g| {
            let mut detail = g.clone();
            detail["description"] = Value::String("Long description".to_string());
            detail["screenshots"] = serde_json::json!([{ "id": 1, "image": "https://example.com/s1.jpg" }]);
            Json(detail)
        })
        .ok_or((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "status": 0, "status_message": "No game found" })),
        ))
}

/// Start a fake catalog API on a random local port.
/// Returns its base URL and the request log.
#[allow(dead_code)]
pub async fn spawn_fake_catalog() -> (String, RequestLog) {
    let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
    let catalog = FakeCatalog {
        games: Arc::new(fixture_games()),
        log: log.clone(),
    };
    let app = Router::new()
        .route("/games", get(fake_games))
        .route("/game", get(fake_game))
        .route(
            "/empty/games",
            get(|| async {
                (
                    StatusCode::CREATED,
                    Json(serde_json::json!({ "status": 0, "status_message": "No results found." })),
                )
            }),
        )
        .route(
            "/broken/games",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded") }),
        )
        .with_state(catalog);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), log)
}
