//! Integration tests for the question batch endpoint.

mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn test_remote_questions_are_translated() {
    // Arrange
    let app = common::build_test_app();

    // Act
    let (status, json) =
        common::get_json(app, "/api/v1/questions?category=historia&difficulty=medium&amount=1").await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["source"], "remote");

    let questions = json["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 1);
    let question = &questions[0];
    assert_eq!(question["text"], "Who was the first emperor of Rome? [es]");
    assert_eq!(question["original_text"], "Who was the first emperor of Rome?");
    assert_eq!(question["source"], "remote");
    assert_eq!(question["time_limit_secs"], 30);
    assert_eq!(question["points"], 20);

    let mut indices: Vec<u64> = question["answers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["original_index"].as_u64().unwrap())
        .collect();
    indices.sort_unstable();
    assert_eq!(indices, vec![0, 1, 2, 3]);
}

#[tokio::test]
async fn test_offline_remote_serves_builtin_fallback() {
    // Arrange
    let app = common::build_offline_app();

    // Act
    let (status, json) =
        common::get_json(app, "/api/v1/questions?category=ciencia&difficulty=hard&amount=5").await;

    // Assert: the built-in bank has no hard ciencia entries, so any difficulty is used.
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["source"], "fallback");
    let questions = json["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 2);
    for question in questions {
        assert_eq!(question["text"], question["original_text"]);
        assert_eq!(question["source"], "fallback");
    }
}

#[tokio::test]
async fn test_unknown_category_returns_400() {
    let app = common::build_test_app();

    let (status, json) = common::get_json(app, "/api/v1/questions?category=astrologia").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_category");
    assert!(json["message"].as_str().unwrap().contains("astrologia"));
}

#[tokio::test]
async fn test_default_amount_is_used_when_missing() {
    let app = common::build_test_app();

    let (status, json) = common::get_json(app, "/api/v1/questions?category=historia").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["questions"].as_array().unwrap().len(), 2);
}
