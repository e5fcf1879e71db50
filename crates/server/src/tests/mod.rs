// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use gigbook_domain::{Band, BandId, BandMember, BandRole, Permission, Song, SongId};
use gigbook_persistence::Persistence;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::AppState;
use crate::session::{ACTOR_HEADER, SESSION_HEADER};

/// Helper to create test app state with in-memory persistence and a small
/// song catalog.
pub fn create_test_app_state() -> AppState {
    let mut persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    for (id, title, seconds) in [
        ("song-a", "Wild Rover", Some(180)),
        ("song-b", "Whiskey in the Jar", Some(200)),
        ("song-c", "Galway Girl", Some(150)),
        ("song-x", "Encore Jam", None),
    ] {
        persistence
            .insert_song(&Song::new(SongId::new(id), title, "Various", seconds))
            .unwrap();
    }
    AppState::new(persistence)
}

/// Helper to register `band-1`: `owner-1` leads it, `drummer-2` may edit,
/// `roadie-3` has no permissions.
pub async fn register_band(app_state: &AppState) {
    let mut band: Band = Band::new(BandId::new("band-1"), "The Regulars");
    band.upsert_member(BandMember::new("owner-1", BandRole::Leader, []));
    band.upsert_member(BandMember::new(
        "drummer-2",
        BandRole::Member,
        [Permission::EditSetlists],
    ));
    band.upsert_member(BandMember::new("roadie-3", BandRole::Member, []));
    app_state.persistence.lock().await.upsert_band(&band).unwrap();
}

/// Helper to send a request and decode the JSON response body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    actor: Option<&str>,
    session: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(actor) = actor {
        builder = builder.header(ACTOR_HEADER, actor);
    }
    if let Some(session) = session {
        builder = builder.header(SESSION_HEADER, session);
    }
    let request: Request<Body> = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status: StatusCode = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };
    (status, value)
}

/// Helper to create a setlist as `actor` and return its id.
pub async fn create_setlist_as(app: &Router, actor: &str, body: Value) -> String {
    let (status, value) = send(app, "POST", "/setlists", Some(actor), None, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {value}");
    value["setlist_id"].as_str().unwrap().to_string()
}

/// Helper to add a catalog song to a set as `actor`.
pub async fn add_song_as(
    app: &Router,
    actor: &str,
    setlist_id: &str,
    set_index: usize,
    song_id: &str,
) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        &format!("/setlists/{setlist_id}/songs"),
        Some(actor),
        None,
        Some(json!({ "set_index": set_index, "song_id": song_id })),
    )
    .await
}
