use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};

use filmorate_server::{AppState, routes};

fn server() -> TestServer {
    TestServer::new(routes::router(AppState::in_memory())).expect("test server")
}

fn film_payload(name: &str) -> Value {
    json!({
        "name": name,
        "description": "описание",
        "releaseDate": "2000-01-01",
        "duration": 120,
        "mpa": { "id": 1 },
        "genres": [{ "id": 2 }]
    })
}

fn user_payload(login: &str) -> Value {
    json!({
        "email": format!("{login}@example.com"),
        "login": login,
        "name": "",
        "birthday": "1990-05-05"
    })
}

async fn create_film(server: &TestServer, name: &str) -> i64 {
    let response = server.post("/films").json(&film_payload(name)).await;
    response.assert_status_ok();
    let body: Value = response.json();
    body["id"].as_i64().expect("film id")
}

async fn create_user(server: &TestServer, login: &str) -> i64 {
    let response = server.post("/users").json(&user_payload(login)).await;
    response.assert_status_ok();
    let body: Value = response.json();
    body["id"].as_i64().expect("user id")
}

#[tokio::test]
async fn film_create_assigns_id_and_resolves_references() {
    let server = server();
    let response = server.post("/films").json(&film_payload("Интерстеллар")).await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "Интерстеллар");
    assert_eq!(body["mpa"]["name"], "G");
    assert_eq!(body["genres"][0]["name"], "Драма");

    let fetched = server.get("/films/1").await;
    fetched.assert_status_ok();
}

#[tokio::test]
async fn film_with_empty_name_is_rejected_with_message() {
    let server = server();
    let response = server.post("/films").json(&film_payload("")).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "Название не может быть пустым" }));
}

#[tokio::test]
async fn film_with_caller_supplied_id_is_rejected() {
    let server = server();
    let mut payload = film_payload("наглый");
    payload["id"] = json!(5);
    let response = server.post("/films").json(&payload).await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn user_with_bad_email_is_rejected_with_message() {
    let server = server();
    let mut payload = user_payload("user");
    payload["email"] = json!("no-at-symbol");
    let response = server.post("/users").json(&payload).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({
        "error": "Электронная почта не может быть пустой и должна содержать символ @"
    }));
}

#[tokio::test]
async fn unknown_film_id_yields_404_body() {
    let server = server();
    let response = server.get("/films/999").await;
    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({ "error": "Не существующий ИД" }));
}

#[tokio::test]
async fn updating_unknown_film_is_404() {
    let server = server();
    let mut payload = film_payload("призрак");
    payload["id"] = json!(42);
    let response = server.put("/films").json(&payload).await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_fully_replaces_film() {
    let server = server();
    let id = create_film(&server, "до").await;

    let mut payload = film_payload("после");
    payload["id"] = json!(id);
    payload["duration"] = json!(200);
    let response = server.put("/films").json(&payload).await;
    response.assert_status_ok();

    let body: Value = server.get(&format!("/films/{id}")).await.json();
    assert_eq!(body["name"], "после");
    assert_eq!(body["duration"], 200);
}

#[tokio::test]
async fn empty_user_name_defaults_to_login() {
    let server = server();
    let response = server.post("/users").json(&user_payload("somelogin")).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["name"], "somelogin");
}

#[tokio::test]
async fn popular_returns_only_liked_film_for_count_one() {
    let server = server();
    let x = create_film(&server, "X").await;
    create_film(&server, "Y").await;
    let fan = create_user(&server, "fan").await;

    server
        .put(&format!("/films/{x}/like/{fan}"))
        .await
        .assert_status_ok();

    let response = server.get("/films/popular").add_query_param("count", 1).await;
    response.assert_status_ok();
    let body: Value = response.json();
    let films = body.as_array().expect("array body");
    assert_eq!(films.len(), 1);
    assert_eq!(films[0]["id"], json!(x));
}

#[tokio::test]
async fn popular_defaults_to_ten_entries() {
    let server = server();
    for i in 0..12 {
        create_film(&server, &format!("фильм {i}")).await;
    }
    let body: Value = server.get("/films/popular").await.json();
    assert_eq!(body.as_array().expect("array body").len(), 10);
}

#[tokio::test]
async fn like_with_unknown_user_is_404_and_leaves_no_trace() {
    let server = server();
    let x = create_film(&server, "X").await;

    server
        .put(&format!("/films/{x}/like/999"))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    // Removing the like also 404s on the missing user, not on a dangling row.
    server
        .delete(&format!("/films/{x}/like/999"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn friendship_flow_is_directional_then_mutual() {
    let server = server();
    let a = create_user(&server, "a").await;
    let b = create_user(&server, "b").await;

    server
        .put(&format!("/users/{a}/friends/{b}"))
        .await
        .assert_status_ok();

    let a_friends: Value = server.get(&format!("/users/{a}/friends")).await.json();
    assert_eq!(a_friends.as_array().unwrap().len(), 1);
    assert_eq!(a_friends[0]["id"], json!(b));
    assert_eq!(a_friends[0]["isFriend"], json!(false));

    let b_friends: Value = server.get(&format!("/users/{b}/friends")).await.json();
    assert!(b_friends.as_array().unwrap().is_empty());

    server
        .put(&format!("/users/{b}/friends/{a}"))
        .await
        .assert_status_ok();

    let a_friends: Value = server.get(&format!("/users/{a}/friends")).await.json();
    assert_eq!(a_friends[0]["isFriend"], json!(true));
}

#[tokio::test]
async fn common_friends_endpoint_returns_intersection() {
    let server = server();
    let a = create_user(&server, "a").await;
    let b = create_user(&server, "b").await;
    let c = create_user(&server, "c").await;

    server.put(&format!("/users/{a}/friends/{c}")).await.assert_status_ok();
    server.put(&format!("/users/{b}/friends/{c}")).await.assert_status_ok();

    let common: Value = server
        .get(&format!("/users/{a}/friends/common/{b}"))
        .await
        .json();
    let list = common.as_array().expect("array body");
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], json!(c));
}

#[tokio::test]
async fn friendship_with_unknown_user_is_404() {
    let server = server();
    let a = create_user(&server, "a").await;
    server
        .put(&format!("/users/{a}/friends/999"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_user_cascades_into_likes_and_friendships() {
    let server = server();
    let x = create_film(&server, "X").await;
    create_film(&server, "Y").await;
    let a = create_user(&server, "a").await;
    let b = create_user(&server, "b").await;

    server.put(&format!("/films/{x}/like/{a}")).await.assert_status_ok();
    server.put(&format!("/users/{b}/friends/{a}")).await.assert_status_ok();

    server.delete(&format!("/users/{a}")).await.assert_status_ok();

    let b_friends: Value = server.get(&format!("/users/{b}/friends")).await.json();
    assert!(b_friends.as_array().unwrap().is_empty());

    // X lost its only like, so the ranking falls back to id order.
    let popular: Value = server.get("/films/popular").add_query_param("count", 2).await.json();
    assert_eq!(popular.as_array().unwrap().len(), 2);
    assert_eq!(popular[0]["id"], json!(x));
}

#[tokio::test]
async fn deleting_film_removes_it_and_its_likes() {
    let server = server();
    let x = create_film(&server, "X").await;
    let fan = create_user(&server, "fan").await;
    server.put(&format!("/films/{x}/like/{fan}")).await.assert_status_ok();

    server.delete(&format!("/films/{x}")).await.assert_status_ok();

    server
        .get(&format!("/films/{x}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn genre_and_mpa_lookup_tables_are_served() {
    let server = server();

    let genres: Value = server.get("/genres").await.json();
    assert_eq!(genres.as_array().unwrap().len(), 6);

    let comedy: Value = server.get("/genres/1").await.json();
    assert_eq!(comedy, json!({ "id": 1, "name": "Комедия" }));

    let ratings: Value = server.get("/mpa").await.json();
    assert_eq!(ratings.as_array().unwrap().len(), 5);

    server.get("/mpa/99").await.assert_status(StatusCode::NOT_FOUND);
    server.get("/genres/99").await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn users_list_round_trips_birthday() {
    let server = server();
    create_user(&server, "dated").await;
    let users: Value = server.get("/users").await.json();
    assert_eq!(users[0]["birthday"], "1990-05-05");
    assert_eq!(users[0]["email"], "dated@example.com");
}
