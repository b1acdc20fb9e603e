//! HTTP-level tests for the `/projects` resource.

mod common;

use axum::http::StatusCode;
use common::{
    add_participant, create_project, delete_auth, expect_data, expect_error, get_auth,
    post_json_auth, put_json_auth, user_with_token,
};
use promon_core::roles::GlobalRole;
use serde_json::json;

#[tokio::test]
async fn create_project_returns_owner_participant() {
    let app = common::build_test_app();
    let (pm, token) = user_with_token(&app, "pm", GlobalRole::ProjectManager).await;

    let body = json!({
        "name": "Apollo",
        "description": "Moon",
        "dueDate": "2030-06-01T12:00:00Z",
        "avatar": "https://img.example/apollo.png",
    });
    let data = expect_data(
        post_json_auth(app.router(), "/api/v1/projects", body, &token).await,
        StatusCode::CREATED,
    )
    .await;

    assert_eq!(data["name"], "Apollo");
    assert_eq!(data["avatar"], "https://img.example/apollo.png");
    assert_eq!(data["dueDate"], "2030-06-01T12:00:00Z");
    assert_eq!(data["owner"]["role"], "owner");
    assert_eq!(data["owner"]["user"]["id"], pm.id.to_string());
}

#[tokio::test]
async fn new_project_has_exactly_one_owner_equal_to_creator() {
    let app = common::build_test_app();
    let (pm, token) = user_with_token(&app, "pm", GlobalRole::ProjectManager).await;
    let project_id = create_project(&app, &token, "Solo").await;

    let data = expect_data(
        get_auth(
            app.router(),
            &format!("/api/v1/projects/{project_id}/participants"),
            &token,
        )
        .await,
        StatusCode::OK,
    )
    .await;
    let participants = data.as_array().unwrap();
    assert_eq!(participants.len(), 1);
    assert_eq!(participants[0]["role"], "owner");
    assert_eq!(participants[0]["user"]["id"], pm.id.to_string());
}

#[tokio::test]
async fn only_project_managers_create_projects() {
    let app = common::build_test_app();
    let (_, student_token) = user_with_token(&app, "student", GlobalRole::Student).await;
    let (_, admin_token) = user_with_token(&app, "root", GlobalRole::Admin).await;
    let body = json!({ "name": "Nope", "dueDate": "2030-01-01T00:00:00Z" });

    for token in [&student_token, &admin_token] {
        let response = post_json_auth(app.router(), "/api/v1/projects", body.clone(), token).await;
        expect_error(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;
    }
}

#[tokio::test]
async fn blank_project_name_is_invalid() {
    let app = common::build_test_app();
    let (_, token) = user_with_token(&app, "pm", GlobalRole::ProjectManager).await;
    let body = json!({ "name": "   ", "dueDate": "2030-01-01T00:00:00Z" });

    let response = post_json_auth(app.router(), "/api/v1/projects", body, &token).await;
    expect_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

#[tokio::test]
async fn project_info_nests_participants_and_tasks() {
    let app = common::build_test_app();
    let (_, token) = user_with_token(&app, "pm", GlobalRole::ProjectManager).await;
    let project_id = create_project(&app, &token, "Info").await;
    post_json_auth(
        app.router(),
        &format!("/api/v1/projects/{project_id}/tasks"),
        json!({ "title": "First task", "estimatedTime": "3h" }),
        &token,
    )
    .await;

    let data = expect_data(
        get_auth(
            app.router(),
            &format!("/api/v1/projects/{project_id}"),
            &token,
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(data["name"], "Info");
    assert_eq!(data["participants"].as_array().unwrap().len(), 1);
    assert_eq!(data["tasks"][0]["title"], "First task");
    assert_eq!(data["tasks"][0]["status"], "BACKLOG");
    assert_eq!(data["tasks"][0]["estimatedTime"], "3h");
}

#[tokio::test]
async fn outsiders_cannot_read_projects() {
    let app = common::build_test_app();
    let (_, owner_token) = user_with_token(&app, "pm", GlobalRole::ProjectManager).await;
    let (_, other_token) = user_with_token(&app, "other", GlobalRole::ProjectManager).await;
    let project_id = create_project(&app, &owner_token, "Private").await;

    let response = get_auth(
        app.router(),
        &format!("/api/v1/projects/{project_id}"),
        &other_token,
    )
    .await;
    expect_error(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;
}

#[tokio::test]
async fn partial_update_preserves_omitted_fields() {
    let app = common::build_test_app();
    let (_, token) = user_with_token(&app, "pm", GlobalRole::ProjectManager).await;
    let project_id = create_project(&app, &token, "Patchable").await;
    let uri = format!("/api/v1/projects/{project_id}");

    let first = expect_data(
        put_json_auth(
            app.router(),
            &uri,
            json!({ "repo": "https://git.example/p" }),
            &token,
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(first["repo"], "https://git.example/p");
    assert_eq!(first["name"], "Patchable");
    assert_eq!(first["description"], "integration test project");
    assert_eq!(first["participants"].as_array().unwrap().len(), 1);

    // A second, disjoint patch keeps the first patch's value.
    let second = expect_data(
        put_json_auth(
            app.router(),
            &uri,
            json!({ "reportName": "Final report" }),
            &token,
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(second["repo"], "https://git.example/p");
    assert_eq!(second["reportName"], "Final report");
    assert_eq!(second["dueDate"], first["dueDate"]);

    // An empty patch changes nothing.
    let third = expect_data(
        put_json_auth(app.router(), &uri, json!({}), &token).await,
        StatusCode::OK,
    )
    .await;
    for field in ["name", "description", "repo", "reportName", "dueDate", "avatar"] {
        assert_eq!(third[field], second[field], "{field} changed");
    }
}

#[tokio::test]
async fn nullable_fields_clear_but_required_fields_do_not() {
    let app = common::build_test_app();
    let (_, token) = user_with_token(&app, "pm", GlobalRole::ProjectManager).await;
    let project_id = create_project(&app, &token, "Clearable").await;
    let uri = format!("/api/v1/projects/{project_id}");

    let data = expect_data(
        put_json_auth(app.router(), &uri, json!({ "description": null }), &token).await,
        StatusCode::OK,
    )
    .await;
    assert!(data["description"].is_null());

    let response = put_json_auth(app.router(), &uri, json!({ "name": null }), &token).await;
    expect_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;

    let response = put_json_auth(app.router(), &uri, json!({ "dueDate": null }), &token).await;
    expect_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

#[tokio::test]
async fn members_cannot_update_but_teamleads_can() {
    let app = common::build_test_app();
    let (_, owner_token) = user_with_token(&app, "pm", GlobalRole::ProjectManager).await;
    let (member, member_token) = user_with_token(&app, "member", GlobalRole::Student).await;
    let (lead, lead_token) = user_with_token(&app, "lead", GlobalRole::Student).await;
    let project_id = create_project(&app, &owner_token, "Roles").await;
    add_participant(&app, &owner_token, project_id, &member, "member").await;
    add_participant(&app, &owner_token, project_id, &lead, "teamlead").await;
    let uri = format!("/api/v1/projects/{project_id}");

    let response = put_json_auth(app.router(), &uri, json!({ "name": "X" }), &member_token).await;
    expect_error(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;

    let data = expect_data(
        put_json_auth(app.router(), &uri, json!({ "name": "Renamed" }), &lead_token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(data["name"], "Renamed");

    // Deletion is owner-only.
    let response = delete_auth(app.router(), &uri, &lead_token).await;
    expect_error(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;
    let response = delete_auth(app.router(), &uri, &owner_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn deleting_a_project_cascades() {
    let app = common::build_test_app();
    let (_, token) = user_with_token(&app, "pm", GlobalRole::ProjectManager).await;
    let (_, admin_token) = user_with_token(&app, "root", GlobalRole::Admin).await;
    let project_id = create_project(&app, &token, "Doomed").await;
    post_json_auth(
        app.router(),
        &format!("/api/v1/projects/{project_id}/tasks"),
        json!({ "title": "Orphan" }),
        &token,
    )
    .await;

    let uri = format!("/api/v1/projects/{project_id}");
    let response = delete_auth(app.router(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Gone for everyone, admin included.
    let response = get_auth(app.router(), &uri, &admin_token).await;
    expect_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;
    let response = get_auth(
        app.router(),
        &format!("/api/v1/projects/{project_id}/tasks"),
        &admin_token,
    )
    .await;
    expect_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}

#[tokio::test]
async fn deleting_nonexistent_project_is_not_found() {
    let app = common::build_test_app();
    let (_, admin_token) = user_with_token(&app, "root", GlobalRole::Admin).await;

    let response = delete_auth(app.router(), "/api/v1/projects/424242", &admin_token).await;
    let json = expect_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;
    assert_eq!(json["error"], "Project with id 424242 not found");
}

#[tokio::test]
async fn admin_search_matches_name_case_insensitively() {
    let app = common::build_test_app();
    let (_, token) = user_with_token(&app, "pm", GlobalRole::ProjectManager).await;
    let (_, admin_token) = user_with_token(&app, "root", GlobalRole::Admin).await;
    create_project(&app, &token, "Rocket Science").await;
    create_project(&app, &token, "Gardening").await;
    create_project(&app, &token, "Pocket rocket").await;

    let data = expect_data(
        get_auth(app.router(), "/api/v1/admin/projects?search=ROCKET", &admin_token).await,
        StatusCode::OK,
    )
    .await;
    let names: Vec<&str> = data
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Rocket Science", "Pocket rocket"]);
    assert_eq!(data[0]["participants"].as_array().unwrap().len(), 1);

    let response = get_auth(app.router(), "/api/v1/admin/projects", &token).await;
    expect_error(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;
}
