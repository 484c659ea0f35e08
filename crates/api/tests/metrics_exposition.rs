//! Prometheus exposition with the global recorder installed.
//!
//! Kept in its own test binary so the process-wide recorder is installed once.

use api::{create_router, telemetry, AppState};
use feature_engine::StandardScaler;
use inference_engine::{LinearRegressor, ModelSlot, ModelStore, Regressor, SpeedBundle};
use reqwest::StatusCode;
use serde_json::json;
use std::sync::Arc;

fn store() -> ModelStore {
    let speed = SpeedBundle::new(
        Some("Ridge".to_string()),
        Regressor::Linear(LinearRegressor::new(vec![2.0, 3.0], 1.0).unwrap()),
        StandardScaler::new(vec![0.0, 0.0], vec![1.0, 1.0]).unwrap(),
        vec!["accel_x".to_string(), "accel_y".to_string()],
    )
    .unwrap();

    ModelStore::new(
        ModelSlot::Unavailable {
            reason: "task artifact missing".to_string(),
        },
        speed.into(),
    )
}

#[tokio::test]
async fn test_prediction_counters_are_exposed() {
    let handle = telemetry::install_recorder().expect("recorder installs once per process");
    let state = AppState::new(store()).with_metrics(handle);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let app = create_router(Arc::new(state));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}/predictFault", base))
        .json(&json!({ "temperature": 90.0, "humidity": 1.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client
        .post(format!("{}/predictSpeed", base))
        .json(&json!({ "accel_x": 1.0, "accel_y": 1.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = client
        .post(format!("{}/predictTaskTime", base))
        .json(&json!({
            "task_name": "Digging",
            "engine_hours": 1.0,
            "fuel_used": 1.0,
            "load_cycles": 1,
            "idling_time": 1.0
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = reqwest::get(format!("{}/metrics", base)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();

    assert!(body.contains(r#"predictions_total{endpoint="predictFault",outcome="invalid_input"} 1"#));
    assert!(body.contains(r#"predictions_total{endpoint="predictSpeed",outcome="ok"} 1"#));
    assert!(body.contains(
        r#"predictions_total{endpoint="predictTaskTime",outcome="model_unavailable"} 1"#
    ));
    assert!(body.contains(r#"model_loaded{model="speed"} 1"#));
    assert!(body.contains(r#"model_loaded{model="task"} 0"#));
}
