use dekor_core::error::{ApiError, ConfigurationError};
use dekor_core::http::{IntoResponse, StatusCode};
use dekor_core::response::ApiResponse;
use http_body_util::BodyExt;

async fn response_parts(resp: impl IntoResponse) -> (StatusCode, serde_json::Value) {
    let resp = resp.into_response();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

// ── Error envelope ──────────────────────────────────────────────────────

#[tokio::test]
async fn not_found_renders_the_envelope() {
    let err = ApiError::NotFound("no user with id 7".into());
    let (status, body) = response_parts(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["statusCode"], 404);
    assert_eq!(body["data"], serde_json::Value::Null);
    assert_eq!(body["message"], "no user with id 7");
}

#[tokio::test]
async fn unauthorized_and_forbidden_pair_with_their_statuses() {
    let (status, _) = response_parts(ApiError::Unauthorized("no token".into())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = response_parts(ApiError::Forbidden("not yours".into())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn unprocessable_entity_carries_the_detail_list() {
    let err = ApiError::UnprocessableEntity {
        message: "validation failed".into(),
        errors: vec![
            serde_json::json!({"field": "email", "error": "not an email"}),
            serde_json::json!({"field": "name", "error": "too short"}),
        ],
    };
    let (status, body) = response_parts(err).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["statusCode"], 422);
    assert_eq!(body["data"], serde_json::Value::Null);
    assert_eq!(body["message"], "validation failed");
    assert_eq!(body["errors"].as_array().unwrap().len(), 2);
    assert_eq!(body["errors"][0]["field"], "email");
}

#[tokio::test]
async fn custom_uses_the_given_status() {
    let err = ApiError::Custom {
        status: StatusCode::IM_A_TEAPOT,
        message: "short and stout".into(),
    };
    let (status, body) = response_parts(err).await;
    assert_eq!(status, StatusCode::IM_A_TEAPOT);
    assert_eq!(body["statusCode"], 418);
}

#[test]
fn display_pairs_status_and_message() {
    let err = ApiError::Conflict("email taken".into());
    assert_eq!(err.to_string(), "409 Conflict: email taken");
}

// ── Success envelope ────────────────────────────────────────────────────

#[tokio::test]
async fn ok_envelope_wraps_data() {
    let resp = ApiResponse::ok(serde_json::json!({"id": 1}), "created");
    let (status, body) = response_parts(resp).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["statusCode"], 200);
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["message"], "created");
}

// ── Configuration errors ────────────────────────────────────────────────

#[test]
fn configuration_errors_name_the_route() {
    let err = ConfigurationError::UnsupportedVerb {
        controller: "UserController",
        handler: "list".into(),
        verb: "foo".into(),
    };
    assert_eq!(
        err.to_string(),
        "route UserController::list declares unsupported verb \"foo\""
    );

    let err = ConfigurationError::MissingVerb {
        controller: "UserController",
        handler: "orphan".into(),
    };
    assert_eq!(
        err.to_string(),
        "route UserController::orphan has middleware but no verb annotation"
    );

    let err = ConfigurationError::InvalidGlobalPrefix("/api".into());
    assert_eq!(err.to_string(), "global prefix \"/api\" must not start with '/'");
}
