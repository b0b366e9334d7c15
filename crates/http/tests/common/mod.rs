//! In-process stand-in for the ArogyaShayak API.
//!
//! Serves a fixed hospital and accommodation list from an `axum` router bound to
//! an ephemeral local port, and records what each request carried.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

/// A request as seen by the server.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub query: HashMap<String, String>,
    pub body: Option<Value>,
    pub authorization: Option<String>,
}

/// Shared server state.
#[derive(Clone, Default)]
pub struct ApiState {
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl ApiState {
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, path: &str, query: HashMap<String, String>, body: Option<Value>, headers: &HeaderMap) {
        let authorization = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.requests.lock().unwrap().push(Recorded {
            path: path.to_string(),
            query,
            body,
            authorization,
        });
    }
}

/// A running test server.
pub struct TestApi {
    pub base_url: String,
    pub state: ApiState,
}

/// Starts the API on `127.0.0.1:0`.
pub async fn spawn_api() -> TestApi {
    let state = ApiState::default();
    let app = Router::new()
        .route("/api/hospitals", get(list_hospitals))
        .route("/api/chat/estimate-travel", post(estimate_travel))
        .route("/api/accommodations", get(list_accommodations))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApi {
        base_url: format!("http://{}", addr),
        state,
    }
}

fn hospitals() -> Vec<Value> {
    let names = [
        ("h1", "Apollo Hospital Patna", "Cardiology"),
        ("h2", "Apollo Clinic Gaya", "Orthopedics"),
        ("h3", "AIIMS Patna", "Cardiology"),
        ("h4", "Apollo Cancer Centre", "Oncology"),
        ("h5", "Paras HMRI", "Neurology"),
    ];
    names
        .iter()
        .map(|(id, name, specialty)| {
            json!({
                "_id": id,
                "name": name,
                "address": { "street": "Bailey Road", "city": "Patna", "state": "Bihar" },
                "specialties": [specialty],
                "rating": 4.2,
                "numReviews": 87,
                "isAyushmanEmpanelled": true,
                "location": { "lat": 25.61, "lng": 85.14 }
            })
        })
        .collect()
}

async fn list_hospitals(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    state.record("/api/hospitals", query.clone(), None, &headers);

    let name = query.get("name").cloned().unwrap_or_default().to_lowercase();
    match name.as_str() {
        "error" => {
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "message": "catalog offline" })),
            )
                .into_response();
        }
        "broken" => return (StatusCode::OK, "not json").into_response(),
        _ => {}
    }

    let specialty = query.get("specialty").map(|s| s.to_lowercase());
    let matches: Vec<Value> = hospitals()
        .into_iter()
        .filter(|h| {
            h["name"]
                .as_str()
                .is_some_and(|n| n.to_lowercase().contains(&name))
        })
        .filter(|h| match &specialty {
            Some(s) => h["specialties"][0]
                .as_str()
                .is_some_and(|v| v.to_lowercase() == *s),
            None => true,
        })
        .collect();

    // Paras is served without page counters, like the older API.
    if name == "paras" {
        return Json(json!({ "data": matches })).into_response();
    }

    let page: usize = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let limit: usize = query.get("limit").and_then(|l| l.parse().ok()).unwrap_or(12);
    let pages = matches.len().div_ceil(limit);
    let data: Vec<Value> = matches
        .into_iter()
        .skip(page.saturating_sub(1) * limit)
        .take(limit)
        .collect();

    Json(json!({ "data": data, "page": page, "pages": pages })).into_response()
}

async fn estimate_travel(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record("/api/chat/estimate-travel", HashMap::new(), Some(body.clone()), &headers);

    if body["origin"] == "Nowhere" {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "estimation failed" })),
        )
            .into_response();
    }

    Json(json!({
        "estimatedCost": "500-800",
        "estimatedTime": "8 hours",
        "modes": ["Train", "Bus"],
        "tips": "Book Tatkal tickets early"
    }))
    .into_response()
}

async fn list_accommodations(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    state.record("/api/accommodations", query, None, &headers);

    Json(json!({
        "data": [
            { "_id": "s1", "name": "Sewa Sadan", "type": "Dharamshala", "pricePerNight": 450 },
            { "_id": "s2", "name": "Rain Basera", "type": "Shelter", "pricePerNight": 300 },
            { "_id": "s3", "name": "Hotel Maurya", "type": "Hotel", "pricePerNight": 2500,
              "rating": 4.1, "amenities": ["WiFi", "AC"] },
            { "_id": "s4", "name": "Guest House", "type": "Hotel", "pricePerNight": 900 }
        ]
    }))
    .into_response()
}
