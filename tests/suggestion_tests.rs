/// Integration tests for the suggestion call and reconciliation against a
/// mocked Gemini endpoint
use httpmock::prelude::*;
use serde_json::json;

use pc_quoter::catalog::{Catalog, Category, Part};
use pc_quoter::config::SuggestionsConfig;
use pc_quoter::error::AppError;
use pc_quoter::pricing::PricingPrefs;
use pc_quoter::suggest::{self, BuildTier};

fn test_config(base_url: String) -> SuggestionsConfig {
    SuggestionsConfig {
        enabled: true,
        api_key: "test-key".to_string(),
        base_url,
        model: "gemini-2.5-flash".to_string(),
        timeout_seconds: 5,
    }
}

fn sample_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    catalog.insert(
        Category::Cpu,
        vec![
            Part::new("Ryzen 5 5600", 899.0),
            Part::new("Ryzen 7 5700X", 1299.0),
        ],
    );
    catalog.insert(Category::Gpu, vec![Part::new("RTX 4060", 2199.9)]);
    catalog.insert(Category::Ram, vec![Part::new("Fury 16GB", 299.0)]);
    catalog
}

/// Wrap option objects the way the generateContent response carries them:
/// as JSON text inside the first candidate part
fn gemini_response(options: serde_json::Value) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{ "text": options.to_string() }]
            },
            "finishReason": "STOP"
        }],
        "usageMetadata": {
            "promptTokenCount": 100,
            "candidatesTokenCount": 50,
            "totalTokenCount": 150
        }
    })
}

#[tokio::test]
async fn test_three_options_reconciled_in_order() {
    let server = MockServer::start_async().await;
    let options = json!([
        {"tier": "Economy", "justification": "cheapest", "cpu": "Ryzen 5 5600", "ram": "Fury 16GB"},
        {"tier": "Balanced", "justification": "best value", "cpu": "Ryzen 5 5600", "gpu": "RTX 4060"},
        {"tier": "Performance", "justification": "fastest", "cpu": "Ryzen 7 5700X", "gpu": "RTX 4060"}
    ]);
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1beta/models/gemini-2.5-flash:generateContent")
                .query_param("key", "test-key");
            then.status(200).json_body(gemini_response(options));
        })
        .await;

    let catalog = sample_catalog();
    let raw = suggest::gemini::generate_suggestions(
        &reqwest::Client::new(),
        &test_config(server.url("/v1beta")),
        &catalog,
        "a mid-range gaming PC",
    )
    .await
    .expect("suggestion call should succeed");
    mock.assert_async().await;

    let processed = suggest::reconcile(raw, &catalog, PricingPrefs::default());

    let tiers: Vec<BuildTier> = processed.iter().map(|o| o.tier).collect();
    assert_eq!(
        tiers,
        vec![BuildTier::Economy, BuildTier::Balanced, BuildTier::Performance]
    );
    assert!((processed[0].total_cost - 1198.0).abs() < 1e-9);
    assert!((processed[1].total_cost - 3098.9).abs() < 1e-9);
    assert!((processed[2].total_cost - 3498.9).abs() < 1e-9);
    // Every option carries its own fresh default preferences
    assert_eq!(processed[1].prefs, PricingPrefs::default());
}

#[tokio::test]
async fn test_unknown_part_name_is_silently_omitted() {
    let server = MockServer::start_async().await;
    let options = json!([
        {"tier": "Balanced", "justification": "x", "cpu": "Ryzen 5 5600", "gpu": "RTX 9999 Ultra"}
    ]);
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1beta/models/gemini-2.5-flash:generateContent");
            then.status(200).json_body(gemini_response(options));
        })
        .await;

    let catalog = sample_catalog();
    let raw = suggest::gemini::generate_suggestions(
        &reqwest::Client::new(),
        &test_config(server.url("/v1beta")),
        &catalog,
        "anything",
    )
    .await
    .unwrap();

    let processed = suggest::reconcile(raw, &catalog, PricingPrefs::default());
    assert_eq!(processed.len(), 1);
    assert!(processed[0].build.get(Category::Gpu).is_none());
    assert_eq!(processed[0].total_cost, 899.0);
}

#[tokio::test]
async fn test_malformed_payload_is_suggestion_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1beta/models/gemini-2.5-flash:generateContent");
            then.status(200).json_body(json!({
                "candidates": [{
                    "content": {
                        "role": "model",
                        "parts": [{ "text": "sorry, I cannot do that" }]
                    }
                }]
            }));
        })
        .await;

    let result = suggest::gemini::generate_suggestions(
        &reqwest::Client::new(),
        &test_config(server.url("/v1beta")),
        &sample_catalog(),
        "anything",
    )
    .await;

    assert!(matches!(result, Err(AppError::AiSuggestion { .. })));
}

#[tokio::test]
async fn test_auth_failure_is_suggestion_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1beta/models/gemini-2.5-flash:generateContent");
            then.status(401).body("API key not valid");
        })
        .await;

    let result = suggest::gemini::generate_suggestions(
        &reqwest::Client::new(),
        &test_config(server.url("/v1beta")),
        &sample_catalog(),
        "anything",
    )
    .await;

    match result {
        Err(AppError::AiSuggestion { detail }) => {
            assert!(detail.contains("401"));
        }
        other => panic!("expected AiSuggestion error, got {:?}", other.map(|v| v.len())),
    }
}

#[tokio::test]
async fn test_prompt_carries_catalog_listing() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1beta/models/gemini-2.5-flash:generateContent")
                .body_includes("Ryzen 7 5700X")
                .body_includes("a quiet workstation")
                .body_includes("responseSchema");
            then.status(200).json_body(gemini_response(json!([])));
        })
        .await;

    let raw = suggest::gemini::generate_suggestions(
        &reqwest::Client::new(),
        &test_config(server.url("/v1beta")),
        &sample_catalog(),
        "a quiet workstation",
    )
    .await
    .unwrap();

    mock.assert_async().await;
    assert!(raw.is_empty());
}
