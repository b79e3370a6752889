use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::domain::entities::unit::{
    sample_units, DeleteReceipt, MutationReceipt, Unit, UnitFields, UnitId,
};
use crate::infra::wire::{IdRequest, UpdateRequest, ALL_PATH, CREATE_PATH, DELETE_PATH, SINGLE_PATH, UPDATE_PATH};

/// Mock units API. Every route answers from the fixed sample fleet or echoes
/// its input; nothing is stored between requests.
pub fn build_router() -> Router {
    Router::new()
        .route(ALL_PATH, post(all_units))
        .route(SINGLE_PATH, post(single_unit))
        .route(CREATE_PATH, post(create_unit))
        .route(UPDATE_PATH, post(update_unit))
        .route(DELETE_PATH, post(delete_unit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn all_units() -> Json<Vec<Unit>> {
    Json(sample_units().to_vec())
}

async fn single_unit(Json(request): Json<IdRequest>) -> Json<Unit> {
    let mut unit = sample_units()[0].clone();
    unit.id = request.id;
    Json(unit)
}

/// Keys present in `fields` win over `id`, like an object spread.
fn with_id(id: &UnitId, fields: UnitFields) -> UnitFields {
    let mut data = UnitFields::new();
    data.insert("id".to_string(), Value::String(id.0.clone()));
    data.extend(fields);
    data
}

fn generated_id() -> UnitId {
    UnitId(format!("UNIT-{}", Utc::now().timestamp_millis()))
}

async fn create_unit(Json(fields): Json<UnitFields>) -> Json<MutationReceipt> {
    let id = generated_id();
    info!(id = %id, "create unit (not persisted)");
    Json(MutationReceipt {
        message: "Unit created successfully".to_string(),
        data: with_id(&id, fields),
    })
}

async fn update_unit(Json(request): Json<UpdateRequest>) -> Json<MutationReceipt> {
    info!(id = %request.id, "update unit (not persisted)");
    Json(MutationReceipt {
        message: format!("Unit {} updated successfully", request.id),
        data: with_id(&request.id, request.data),
    })
}

async fn delete_unit(Json(request): Json<IdRequest>) -> Json<DeleteReceipt> {
    info!(id = %request.id, "delete unit (not persisted)");
    Json(DeleteReceipt {
        message: format!("Unit {} deleted successfully", request.id),
        deleted_id: request.id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    async fn post_json(path: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");
        let request = match body {
            Some(body) => request.body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .expect("request should build");

        let response = build_router()
            .oneshot(request)
            .await
            .expect("router should respond");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn all_returns_seven_sample_units() {
        let (status, body) = post_json("/units/all", None).await;

        assert_eq!(status, StatusCode::OK);
        let units: Vec<Unit> = serde_json::from_value(body).expect("body should be a unit list");
        assert_eq!(units.len(), 7);
        assert_eq!(units[2].id, UnitId::from("UNIT-003"));
        assert_eq!(units[6].unit_name, "Golf Squad");
    }

    #[tokio::test]
    async fn repeated_reads_ignore_mutations() {
        post_json("/units/delete", Some(serde_json::json!({ "id": "UNIT-001" }))).await;
        post_json("/units/create", Some(serde_json::json!({ "unitName": "New" }))).await;

        let (_, body) = post_json("/units/all", None).await;
        let units: Vec<Unit> = serde_json::from_value(body).expect("body should be a unit list");
        assert_eq!(units, sample_units().to_vec());
    }

    #[tokio::test]
    async fn single_echoes_requested_id() {
        let (status, body) = post_json("/units/single", Some(serde_json::json!({ "id": "UNIT-042" }))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], "UNIT-042");
        assert_eq!(body["unitName"], "Alpha Team");
        assert_eq!(body["status"], "Enabled");
    }

    #[tokio::test]
    async fn create_assigns_timestamp_id_and_echoes_input() {
        let (status, body) = post_json(
            "/units/create",
            Some(serde_json::json!({ "unitName": "Hotel", "crew": 4 })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Unit created successfully");
        let id = body["data"]["id"].as_str().expect("id should be a string");
        let millis = id.strip_prefix("UNIT-").expect("id should carry the UNIT- prefix");
        assert!(millis.parse::<i64>().is_ok(), "id suffix should be a timestamp: {id}");
        assert_eq!(body["data"]["unitName"], "Hotel");
        assert_eq!(body["data"]["crew"], 4);
    }

    #[tokio::test]
    async fn create_input_id_overrides_generated_id() {
        let (_, body) = post_json("/units/create", Some(serde_json::json!({ "id": "MINE" }))).await;
        assert_eq!(body["data"]["id"], "MINE");
    }

    #[tokio::test]
    async fn update_merges_id_and_data() {
        let (status, body) = post_json(
            "/units/update",
            Some(serde_json::json!({ "id": "UNIT-002", "data": { "location": "Harbor" } })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Unit UNIT-002 updated successfully");
        assert_eq!(body["data"], serde_json::json!({ "id": "UNIT-002", "location": "Harbor" }));
    }

    #[tokio::test]
    async fn update_without_data_echoes_only_id() {
        let (_, body) = post_json("/units/update", Some(serde_json::json!({ "id": "UNIT-002" }))).await;
        assert_eq!(body["data"], serde_json::json!({ "id": "UNIT-002" }));
    }

    #[tokio::test]
    async fn delete_echoes_deleted_id() {
        let (status, body) = post_json("/units/delete", Some(serde_json::json!({ "id": "UNIT-005" }))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!({
                "message": "Unit UNIT-005 deleted successfully",
                "deletedId": "UNIT-005"
            })
        );
    }

    #[tokio::test]
    async fn missing_id_is_rejected() {
        let (status, _) = post_json("/units/delete", Some(serde_json::json!({}))).await;
        assert!(status.is_client_error());
    }
}
