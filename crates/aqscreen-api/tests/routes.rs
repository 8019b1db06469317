use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use aqscreen_api::config::ApiConfig;
use aqscreen_api::router;
use aqscreen_api::state::AppState;
use aqscreen_instruments::ScreeningEngine;
use aqscreen_storage::memory::MemoryStore;

fn app() -> Router {
    let state = AppState::new(ScreeningEngine::new(), Arc::new(MemoryStore::new()));
    router(state, &ApiConfig::default())
}

fn answers(total: usize) -> Value {
    let mut map = serde_json::Map::new();
    for i in 1..=10 {
        map.insert(format!("A{i}"), json!(u8::from(i <= total)));
    }
    Value::Object(map)
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

fn post(uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn delete(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn health_reports_healthy() {
    let (status, body) = send(&app(), get("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy"}));
}

#[tokio::test]
async fn questions_list_all_ten_items() {
    let (status, body) = send(&app(), get("/questions", None)).await;
    assert_eq!(status, StatusCode::OK);

    let questions = body["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 10);
    assert_eq!(questions[0]["id"], "A1");
    assert_eq!(
        questions[0]["text"],
        "I often notice small sounds when others do not"
    );
    assert_eq!(questions[9]["id"], "A10");
}

#[tokio::test]
async fn instruments_are_listed_and_looked_up() {
    let app = app();
    let (status, body) = send(&app, get("/instruments", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], "aq10");
    assert_eq!(body[0]["item_count"], 10);

    let (status, body) = send(&app, get("/instruments/aq10", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "AQ-10");
    assert_eq!(body["items"].as_array().unwrap().len(), 10);

    let (status, body) = send(&app, get("/instruments/phq9", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "instrument not found: phq9");
}

#[tokio::test]
async fn screening_scores_questionnaire_only() {
    let (status, body) = send(&app(), post("/screening", None, &json!({"answers": answers(6)}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["aq10_total"], 6);
    assert_eq!(body["probability"], 0.6);
    assert_eq!(body["risk_level"], "High");
    assert_eq!(body["prediction"], 1);
    assert!(body.get("fusion_details").is_none());
}

#[tokio::test]
async fn screening_fuses_secondary_signals() {
    let request = json!({
        "answers": answers(5),
        "secondary": {
            "physical": {"score": 80, "reason": "limited eye contact"},
            "speech": {"score": 20, "reason": "typical prosody"}
        }
    });
    let (status, body) = send(&app(), post("/screening", None, &request)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["risk_level"], "Medium");
    assert_eq!(body["fusion_details"]["original_physical_score"], 80.0);
    assert_eq!(body["fusion_details"]["speech_contribution"], 0.05);
}

#[tokio::test]
async fn missing_answers_are_unprocessable() {
    let mut partial = answers(3);
    partial.as_object_mut().unwrap().remove("A3");
    partial.as_object_mut().unwrap().remove("A7");

    let (status, body) = send(&app(), post("/screening", None, &json!({"answers": partial}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["fields"], json!(["answers.A3", "answers.A7"]));
    assert_eq!(body["error"], "missing answers for A3, A7");
}

#[tokio::test]
async fn out_of_range_answer_is_unprocessable() {
    let mut bad = answers(0);
    bad["A2"] = json!(2);

    let (status, body) = send(&app(), post("/screening", None, &json!({"answers": bad}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["fields"], json!(["answers.A2"]));
}

#[tokio::test]
async fn wrongly_typed_answer_is_unprocessable() {
    for bad in [json!(-1), json!(300), json!("yes")] {
        let mut submitted = answers(4);
        submitted["A3"] = bad;

        let (status, body) =
            send(&app(), post("/screening", None, &json!({"answers": submitted}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["fields"], json!(["answers.A3"]));
    }
}

#[tokio::test]
async fn non_numeric_signal_score_is_unprocessable() {
    let request = json!({
        "answers": answers(5),
        "secondary": {"physical": {"score": "high", "reason": "fidgeting"}}
    });
    let (status, body) = send(&app(), post("/screening", None, &request)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["fields"], json!(["secondary.physical.score"]));
    assert_eq!(body["error"], "physical score is not a finite number");
}

#[tokio::test]
async fn single_signal_on_the_medium_threshold_is_medium() {
    let request = json!({
        "answers": answers(4),
        "secondary": {"physical": {"score": 40, "reason": "some gaze aversion"}}
    });
    let (status, body) = send(&app(), post("/screening", None, &request)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["probability"], 0.4);
    assert_eq!(body["risk_level"], "Medium");
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let req = Request::builder()
        .method("POST")
        .uri("/screening")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"answers\": "))
        .unwrap();

    let (status, body) = send(&app(), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert!(body.get("fields").is_none());
}

#[tokio::test]
async fn summary_renders_markdown_and_prompt_context() {
    let app = app();
    let (_, result) = send(&app, post("/screening", None, &json!({"answers": answers(8)}))).await;

    let (status, body) = send(
        &app,
        post(
            "/screening/summary",
            None,
            &json!({"screening_result": result, "include_recommendations": false}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let summary = body["summary"].as_str().unwrap();
    assert!(summary.contains("Risk Assessment: High (80.0% probability)"));
    assert!(!summary.contains("**Recommendations:**"));
    assert_eq!(body["prompt_context"]["aq10_total"], "8/10");
}

#[tokio::test]
async fn history_requires_bearer_token() {
    let app = app();

    let (status, body) = send(&app, get("/screening-history", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "missing bearer token");

    let (status, _) = send(&app, get("/screening-history", Some(""))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, get("/screening-history", Some("a/b"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn history_round_trip() {
    let app = app();

    let (status, created) = send(
        &app,
        post("/screening-history", Some("alice"), &json!({"answers": answers(7)})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["user_id"], "alice");
    assert_eq!(created["result"]["risk_level"], "High");
    assert_eq!(created["request"]["answers"]["A1"], 1);
    let id = created["id"].as_str().unwrap().to_string();

    let (status, listed) = send(&app, get("/screening-history", Some("alice"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["id"], id.as_str());

    let uri = format!("/screening-history/{id}");
    let (status, fetched) = send(&app, get(&uri, Some("alice"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, _) = send(&app, delete(&uri, "alice")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, get(&uri, Some("alice"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, delete(&uri, "alice")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn history_is_private_to_each_user() {
    let app = app();
    let (_, created) = send(
        &app,
        post("/screening-history", Some("alice"), &json!({"answers": answers(2)})),
    )
    .await;
    let uri = format!("/screening-history/{}", created["id"].as_str().unwrap());

    let (status, listed) = send(&app, get("/screening-history", Some("bob"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([]));

    let (status, _) = send(&app, get(&uri, Some("bob"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, delete(&uri, "bob")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, get(&uri, Some("alice"))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn invalid_submission_is_not_saved() {
    let app = app();
    let (status, _) = send(
        &app,
        post("/screening-history", Some("alice"), &json!({"answers": {}})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let mut bad = answers(3);
    bad["A1"] = json!("agree");
    let (status, body) = send(
        &app,
        post("/screening-history", Some("alice"), &json!({"answers": bad})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["fields"], json!(["answers.A1"]));

    let (_, listed) = send(&app, get("/screening-history", Some("alice"))).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn malformed_record_id_is_bad_request() {
    let (status, body) = send(&app(), get("/screening-history/not-a-uuid", Some("alice"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
