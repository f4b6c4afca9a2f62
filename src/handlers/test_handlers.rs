use super::*;
use crate::completion::{CompletionClient, MockCompletionClient};
use crate::config::Config;
use crate::imgflip::{MockMemeClient, MemeOutcome};
use crate::memes::FixedPicker;
use crate::models::SyllabusRow;
use crate::syllabus::SyllabusStore;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

struct PanickingCompletion;

#[async_trait::async_trait]
impl CompletionClient for PanickingCompletion {
    async fn complete(&self, _prompt: &str) -> crate::error::Result<String> {
        panic!("completion exploded")
    }
}

const LESSON: &str = "Polynomials are basically a stacked thali of terms, fr fr.";

fn test_router(
    completion: impl CompletionClient + 'static,
    memes: MockMemeClient,
    static_dir: &std::path::Path,
) -> Router {
    let mut cfg = Config::default();
    cfg.server.static_dir = static_dir.to_string_lossy().into_owned();

    let syllabus = SyllabusStore::new(
        vec![SyllabusRow {
            subject: "Math".into(),
            grade: Some(8),
            topic: Some("Polynomials".into()),
            keywords: Some("degree, coefficient".into()),
            description: Some("Polynomials and their zeroes".into()),
        }],
        3,
    );

    let ctx = AppContext::with_collaborators(
        Arc::new(cfg),
        Arc::new(syllabus),
        Arc::new(completion),
        Arc::new(memes),
        Arc::new(FixedPicker::new("Drake")),
    )
    .unwrap();
    router(Arc::new(ctx))
}

fn happy_completion() -> MockCompletionClient {
    let mut completion = MockCompletionClient::new();
    completion.expect_complete().returning(|p: &str| {
        if p.starts_with("Context:") {
            Ok(LESSON.to_string())
        } else {
            Ok("Not understanding polynomials | Getting the math vibes".to_string())
        }
    });
    completion
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_lesson_returns_lesson_and_meme_url() {
    let dir = tempfile::tempdir().unwrap();
    let mut memes = MockMemeClient::new();
    memes
        .expect_caption()
        .times(1)
        .returning(|_, _| MemeOutcome::Url("https://i.imgflip.com/abc.jpg".to_string()));

    let app = test_router(happy_completion(), memes, &dir.path().join("missing"));
    let response = app
        .oneshot(post_json(
            "/api/lesson",
            r#"{"query":"polynomials","subject":"Math"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(
        body["lesson"],
        format!("{LESSON}\n\n**Meme Quiz Vibes**: Check this out: https://i.imgflip.com/abc.jpg")
    );
    assert_eq!(body["meme_url"], "https://i.imgflip.com/abc.jpg");
}

#[tokio::test]
async fn test_lesson_failed_meme_is_null() {
    let dir = tempfile::tempdir().unwrap();
    let mut memes = MockMemeClient::new();
    memes
        .expect_caption()
        .returning(|_, _| MemeOutcome::Failed);

    let app = test_router(happy_completion(), memes, &dir.path().join("missing"));
    let response = app
        .oneshot(post_json("/api/lesson", r#"{"query":"polynomials"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert!(body["meme_url"].is_null());
    assert!(body["lesson"].as_str().unwrap().ends_with("Meme generation failed."));
}

#[tokio::test]
async fn test_lesson_missing_query_is_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    for payload in [r#"{"subject":"Math"}"#, r#"{"query":null}"#, r#"{"query":"  "}"#, "not json"] {
        let app = test_router(
            MockCompletionClient::new(),
            MockMemeClient::new(),
            &dir.path().join("missing"),
        );
        let response = app.oneshot(post_json("/api/lesson", payload)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{payload}");
        let body = json_body(response).await;
        assert_eq!(body["error"], "Missing query parameter");
    }
}

#[tokio::test]
async fn test_lesson_provider_failure_is_still_ok() {
    let dir = tempfile::tempdir().unwrap();
    let mut completion = MockCompletionClient::new();
    completion
        .expect_complete()
        .returning(|_| Err(crate::error::VibeCheckError::Provider("401".to_string())));
    let mut memes = MockMemeClient::new();
    memes.expect_caption().never();

    let app = test_router(completion, memes, &dir.path().join("missing"));
    let response = app
        .oneshot(post_json("/api/lesson", r#"{"query":"atoms","subject":"Science"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(
        body["lesson"],
        "Oops, something’s not vibin’! Try again with query: atoms"
    );
    assert!(body["meme_url"].is_null());
}

#[tokio::test]
async fn test_lesson_panic_is_internal_error() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_router(
        PanickingCompletion,
        MockMemeClient::new(),
        &dir.path().join("missing"),
    );
    let response = app
        .oneshot(post_json("/api/lesson", r#"{"query":"atoms"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["error"], "completion exploded");
}

#[tokio::test]
async fn test_topics_returns_matches_and_answer() {
    let dir = tempfile::tempdir().unwrap();
    let mut completion = MockCompletionClient::new();
    completion
        .expect_complete()
        .times(1)
        .returning(|_| Ok("1. Polynomials 2. Zeroes 3. Factorisation".to_string()));

    let app = test_router(completion, MockMemeClient::new(), &dir.path().join("missing"));
    let response = app
        .oneshot(post_json(
            "/api/topics",
            r#"{"question":"degree of a polynomial","subject":"Math","grade":8}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["matches"][0]["topic"], "Polynomials");
    assert_eq!(body["matches"][0]["grade"], "8");
    assert_eq!(body["answer"], "1. Polynomials 2. Zeroes 3. Factorisation");
}

#[tokio::test]
async fn test_topics_missing_question_is_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_router(
        MockCompletionClient::new(),
        MockMemeClient::new(),
        &dir.path().join("missing"),
    );
    let response = app
        .oneshot(post_json("/api/topics", r#"{"subject":"Math"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "Missing question parameter");
}

#[tokio::test]
async fn test_health_and_static_frontend() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>VibeCheck</h1>").unwrap();
    let app = test_router(MockCompletionClient::new(), MockMemeClient::new(), dir.path());

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"<h1>VibeCheck</h1>");
}
