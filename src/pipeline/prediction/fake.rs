//! In-process stand-ins for the inference service, bound to 127.0.0.1.

use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Map, Value};

/// Serve `app` on an ephemeral port and return its base URL.
pub(crate) async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// A base URL nothing is listening on.
pub(crate) async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Shape of a real response: three scored labels and one failed model.
pub(crate) fn sample_response() -> Value {
    json!({
        "predictions": {
            "diabetes": {
                "risk_score": 0.42,
                "probability": [0.58, 0.42],
                "features_used": ["age", "bmi", "diabetesFamilyHistory", "bloodSugar"],
                "prediction": 0
            },
            "heart_disease": {
                "risk_score": 63.2,
                "probability": [0.31, 0.69],
                "features_used": ["age", "sex", "cholesterol", "smoking", "bloodPressureSystolic"],
                "prediction": 1
            },
            "blood_pressure": {
                "risk_score": 48.0,
                "features_used": ["age", "bmi", "cholesterol", "bloodPressureSystolic"],
                "prediction": 0
            },
            "respiratory": {
                "error": "model file not found",
                "features_required": ["age", "bmi", "smoking"]
            }
        },
        "features_received": {}
    })
}

fn index() -> Value {
    json!({
        "status": "running",
        "available_models": ["diabetes", "heart_disease", "respiratory", "blood_pressure"]
    })
}

/// `POST /predict` answers with a fixed status and body.
pub(crate) fn predict_route(status: StatusCode, body: Value) -> Router {
    Router::new()
        .route("/", get(|| async { Json(index()) }))
        .route(
            "/predict",
            post(move || {
                let body = body.clone();
                async move { (status, Json(body)) }
            }),
        )
}

/// `POST /predict` reports every received feature as a label scored with
/// the feature's value.
pub(crate) fn echo_route() -> Router {
    Router::new().route(
        "/predict",
        post(|Json(request): Json<Value>| async move {
            let mut predictions = Map::new();
            if let Some(features) = request.get("features").and_then(Value::as_object) {
                for (name, value) in features {
                    predictions.insert(name.clone(), json!({ "risk_score": value }));
                }
            }
            Json(json!({ "predictions": predictions }))
        }),
    )
}

/// `POST /predict` answers 200 with a non-JSON body.
pub(crate) fn text_route(text: &'static str) -> Router {
    Router::new().route("/predict", post(move || async move { text }))
}

/// `POST /predict` answers only after `delay`.
pub(crate) fn slow_route(delay: Duration) -> Router {
    Router::new().route(
        "/predict",
        post(move || async move {
            tokio::time::sleep(delay).await;
            Json(sample_response())
        }),
    )
}
