//! HTTP-level tests for the user directory, profiles and admin user
//! management.

mod common;

use axum::http::StatusCode;
use common::{
    create_project, delete_auth, expect_data, expect_error, get_auth, put_json_auth,
    user_with_token,
};
use promon_core::roles::GlobalRole;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn user_list_is_short_and_searchable() {
    let app = common::build_test_app();
    let (_, token) = user_with_token(&app, "alice", GlobalRole::Student).await;
    user_with_token(&app, "bob", GlobalRole::Student).await;

    let data = expect_data(
        get_auth(app.router(), "/api/v1/users", &token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(data.as_array().unwrap().len(), 2);
    assert!(data[0].get("email").is_none(), "short view hides email");

    let data = expect_data(
        get_auth(app.router(), "/api/v1/users?search=ALI", &token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(data.as_array().unwrap().len(), 1);
    assert_eq!(data[0]["username"], "alice");
}

#[tokio::test]
async fn profile_lists_participating_projects() {
    let app = common::build_test_app();
    let (pm, token) = user_with_token(&app, "pm", GlobalRole::ProjectManager).await;
    create_project(&app, &token, "Alpha").await;
    create_project(&app, &token, "Beta").await;

    let data = expect_data(
        get_auth(app.router(), &format!("/api/v1/users/{}", pm.id), &token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(data["username"], "pm");
    assert_eq!(data["email"], "pm@test.com");
    let names: Vec<&str> = data["projects"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Alpha", "Beta"]);
}

#[tokio::test]
async fn unknown_profile_is_404() {
    let app = common::build_test_app();
    let (_, token) = user_with_token(&app, "alice", GlobalRole::Student).await;
    let response = get_auth(
        app.router(),
        &format!("/api/v1/users/{}", Uuid::new_v4()),
        &token,
    )
    .await;
    expect_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}

#[tokio::test]
async fn users_update_only_themselves_unless_admin() {
    let app = common::build_test_app();
    let (alice, alice_token) = user_with_token(&app, "alice", GlobalRole::Student).await;
    let (bob, _) = user_with_token(&app, "bob", GlobalRole::Student).await;
    let (_, admin_token) = user_with_token(&app, "root", GlobalRole::Admin).await;

    let response = put_json_auth(
        app.router(),
        &format!("/api/v1/users/{}", bob.id),
        json!({ "firstName": "Hacked" }),
        &alice_token,
    )
    .await;
    expect_error(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;

    let data = expect_data(
        put_json_auth(
            app.router(),
            &format!("/api/v1/users/{}", alice.id),
            json!({ "githubUsername": "alice-gh", "colorCode": "#123456" }),
            &alice_token,
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(data["githubUsername"], "alice-gh");
    assert_eq!(data["firstName"], "Test", "omitted fields are preserved");

    let data = expect_data(
        put_json_auth(
            app.router(),
            &format!("/api/v1/users/{}", bob.id),
            json!({ "group": "Admins fixed this" }),
            &admin_token,
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(data["group"], "Admins fixed this");
}

#[tokio::test]
async fn profile_fields_can_be_cleared_with_null() {
    let app = common::build_test_app();
    let (alice, token) = user_with_token(&app, "alice", GlobalRole::Student).await;
    let uri = format!("/api/v1/users/{}", alice.id);

    put_json_auth(app.router(), &uri, json!({ "colorCode": "#abcdef" }), &token).await;
    let data = expect_data(
        put_json_auth(app.router(), &uri, json!({ "colorCode": null }), &token).await,
        StatusCode::OK,
    )
    .await;
    assert!(data["colorCode"].is_null());
}

#[tokio::test]
async fn role_is_not_patchable() {
    let app = common::build_test_app();
    let (alice, token) = user_with_token(&app, "alice", GlobalRole::Student).await;

    let data = expect_data(
        put_json_auth(
            app.router(),
            &format!("/api/v1/users/{}", alice.id),
            json!({ "role": "admin" }),
            &token,
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(data["role"], "student");
}

#[tokio::test]
async fn renaming_to_taken_username_conflicts() {
    let app = common::build_test_app();
    let (alice, token) = user_with_token(&app, "alice", GlobalRole::Student).await;
    user_with_token(&app, "bob", GlobalRole::Student).await;

    let response = put_json_auth(
        app.router(),
        &format!("/api/v1/users/{}", alice.id),
        json!({ "username": "bob" }),
        &token,
    )
    .await;
    expect_error(response, StatusCode::CONFLICT, "CONFLICT").await;
}

#[tokio::test]
async fn admin_endpoints_require_admin() {
    let app = common::build_test_app();
    let (student, student_token) = user_with_token(&app, "student", GlobalRole::Student).await;
    let (_, admin_token) = user_with_token(&app, "root", GlobalRole::Admin).await;

    let response = get_auth(app.router(), "/api/v1/admin/users", &student_token).await;
    expect_error(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;

    let data = expect_data(
        get_auth(app.router(), "/api/v1/admin/users", &admin_token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(data.as_array().unwrap().len(), 2);
    assert!(data[0].get("email").is_some(), "admin list uses the full view");

    let uri = format!("/api/v1/admin/users/{}", student.id);
    let response = delete_auth(app.router(), &uri, &admin_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = delete_auth(app.router(), &uri, &admin_token).await;
    expect_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}

#[tokio::test]
async fn renamed_username_is_trimmed_before_length_check() {
    let app = common::build_test_app();
    let (alice, token) = user_with_token(&app, "alice", GlobalRole::Student).await;
    let uri = format!("/api/v1/users/{}", alice.id);

    let response = put_json_auth(app.router(), &uri, json!({ "username": "  ab  " }), &token).await;
    expect_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;

    let data = expect_data(
        put_json_auth(app.router(), &uri, json!({ "username": "  alicia  " }), &token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(data["username"], "alicia");
}
