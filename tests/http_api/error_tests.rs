//! Error envelopes for invalid input and unknown tasks.

use crate::http_api::helpers::{app, create_task, send, send_raw};
use axum::{
    Router,
    http::{Method, StatusCode},
};
use rstest::rstest;
use serde_json::{Value, json};
use taskboard::task::adapters::http::{BAD_REQUEST_MESSAGE, NOT_FOUND_MESSAGE};

#[rstest]
#[case(json!({}))]
#[case(json!({ "title": "" }))]
#[case(json!({ "title": "    " }))]
#[case(json!({ "title": null, "description": "orphan" }))]
#[tokio::test(flavor = "multi_thread")]
async fn create_without_valid_title_is_a_validation_error(
    app: Router,
    #[case] body: Value,
) -> Result<(), eyre::Report> {
    let response = send(&app, Method::POST, "/tasks", Some(body)).await?;
    let listing = send(&app, Method::GET, "/tasks", None).await?;

    eyre::ensure!(response.status == StatusCode::BAD_REQUEST, "status {}", response.status);
    eyre::ensure!(
        response.body["error"]["kind"] == json!("validation"),
        "unexpected body {}",
        response.body
    );
    eyre::ensure!(response.body["error"]["field"] == json!("title"), "field mismatch");
    eyre::ensure!(listing.body == json!([]), "nothing should be persisted");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_json_is_a_bad_request(app: Router) -> Result<(), eyre::Report> {
    let response = send_raw(&app, Method::POST, "/tasks", Some("{\"title\":".to_owned())).await?;

    eyre::ensure!(response.status == StatusCode::BAD_REQUEST, "status {}", response.status);
    eyre::ensure!(
        response.body["error"]["kind"] == json!("bad_request"),
        "unexpected body {}",
        response.body
    );
    eyre::ensure!(
        response.body["error"]["message"] == json!(BAD_REQUEST_MESSAGE),
        "decoder detail leaked: {}",
        response.body
    );
    Ok(())
}

#[rstest]
#[case("/tasks/5f0c7f1e-9a3c-4d1b-8f7e-2a6b9c0d1e2f")]
#[case("/tasks/not-a-uuid")]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_task_is_not_found(app: Router, #[case] path: &str) -> Result<(), eyre::Report> {
    let lookup = send(&app, Method::GET, path, None).await?;
    let update = send(&app, Method::PATCH, path, Some(json!({ "completed": true }))).await?;
    let delete = send(&app, Method::DELETE, path, None).await?;

    for response in [&lookup, &update, &delete] {
        eyre::ensure!(response.status == StatusCode::NOT_FOUND, "status {}", response.status);
        eyre::ensure!(
            response.body["error"]["kind"] == json!("not_found"),
            "unexpected body {}",
            response.body
        );
        eyre::ensure!(
            response.body["error"]["message"] == json!(NOT_FOUND_MESSAGE),
            "path segment echoed: {}",
            response.body
        );
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn padded_identifier_does_not_resolve(app: Router) -> Result<(), eyre::Report> {
    let id = create_task(&app, json!({ "title": "Exact ids only" })).await?;

    let padded = send(&app, Method::GET, &format!("/tasks/%20{id}%20"), None).await?;
    let exact = send(&app, Method::GET, &format!("/tasks/{id}"), None).await?;

    eyre::ensure!(padded.status == StatusCode::NOT_FOUND, "status {}", padded.status);
    eyre::ensure!(exact.status == StatusCode::OK, "status {}", exact.status);
    Ok(())
}

#[rstest]
#[case(json!({ "title": "" }))]
#[case(json!({ "title": null }))]
#[tokio::test(flavor = "multi_thread")]
async fn update_to_invalid_title_is_rejected(
    app: Router,
    #[case] body: Value,
) -> Result<(), eyre::Report> {
    let id = create_task(&app, json!({ "title": "Stable" })).await?;
    let path = format!("/tasks/{id}");

    let response = send(&app, Method::PATCH, &path, Some(body)).await?;
    let fetched = send(&app, Method::GET, &path, None).await?;

    eyre::ensure!(response.status == StatusCode::BAD_REQUEST, "status {}", response.status);
    eyre::ensure!(fetched.body["title"] == json!("Stable"), "title should be unchanged");
    Ok(())
}

#[rstest]
#[case("/tasks?completed=maybe")]
#[case("/tasks?sort=priority")]
#[case("/tasks?order=sideways")]
#[case("/tasks?limit=-1")]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_list_query_is_a_bad_request(
    app: Router,
    #[case] uri: &str,
) -> Result<(), eyre::Report> {
    let response = send(&app, Method::GET, uri, None).await?;

    eyre::ensure!(response.status == StatusCode::BAD_REQUEST, "status {}", response.status);
    eyre::ensure!(
        response.body["error"]["kind"] == json!("bad_request"),
        "unexpected body {}",
        response.body
    );
    eyre::ensure!(
        response.body["error"]["message"] == json!(BAD_REQUEST_MESSAGE),
        "decoder detail leaked: {}",
        response.body
    );
    Ok(())
}
