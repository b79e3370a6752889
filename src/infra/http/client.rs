use std::collections::HashSet;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::domain::entities::unit::{DeleteReceipt, MutationReceipt, Unit, UnitDraft, UnitId};
use crate::infra::http::endpoints::UnitEndpoints;
use crate::infra::wire::{IdRequest, UpdateRequest};
use crate::usecase::ports::unit_source::{FetchError, UnitSource};

/// `UnitSource` backed by the units HTTP service.
#[derive(Debug, Clone)]
pub struct HttpUnitSource {
    client: reqwest::Client,
    endpoints: UnitEndpoints,
}

impl HttpUnitSource {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            endpoints: UnitEndpoints::new(base_url),
        }
    }

    pub fn endpoints(&self) -> &UnitEndpoints {
        &self.endpoints
    }

    async fn post<B: Serialize + ?Sized>(&self, url: &str, body: Option<&B>) -> Result<String, FetchError> {
        let mut request = self.client.post(url).header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|err| FetchError::Transport {
            url: url.to_string(),
            reason: err.to_string(),
        })?;

        let status = response.status();
        debug!(url, status = status.as_u16(), "units service responded");
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|err| FetchError::Transport {
            url: url.to_string(),
            reason: err.to_string(),
        })
    }
}

fn malformed(url: &str, reason: impl Into<String>) -> FetchError {
    FetchError::Malformed {
        url: url.to_string(),
        reason: reason.into(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn decode<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, FetchError> {
    serde_json::from_str(body).map_err(|err| malformed(url, err.to_string()))
}

/// Decodes the `/units/all` body: a JSON array of well-formed units with unique ids.
pub fn decode_unit_list(url: &str, body: &str) -> Result<Vec<Unit>, FetchError> {
    let value: Value = decode(url, body)?;
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(malformed(
                url,
                format!("expected a JSON array of units, got {}", json_kind(&other)),
            ))
        }
    };

    let mut seen = HashSet::with_capacity(items.len());
    let mut units = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let unit: Unit = serde_json::from_value(item)
            .map_err(|err| malformed(url, format!("unit at index {index}: {err}")))?;
        if !seen.insert(unit.id.clone()) {
            return Err(malformed(url, format!("duplicate unit id {}", unit.id)));
        }
        units.push(unit);
    }
    Ok(units)
}

#[async_trait]
impl UnitSource for HttpUnitSource {
    async fn fetch_all(&self) -> Result<Vec<Unit>, FetchError> {
        let url = &self.endpoints.get_all;
        let body = self.post::<()>(url, None).await?;
        decode_unit_list(url, &body)
    }

    async fn fetch_single(&self, id: &UnitId) -> Result<Unit, FetchError> {
        let url = &self.endpoints.get_single;
        let body = self.post(url, Some(&IdRequest { id: id.clone() })).await?;
        decode(url, &body)
    }

    async fn create(&self, draft: UnitDraft) -> Result<MutationReceipt, FetchError> {
        let url = &self.endpoints.create;
        let body = self.post(url, Some(&draft.into_fields())).await?;
        decode(url, &body)
    }

    async fn update(&self, id: &UnitId, draft: UnitDraft) -> Result<MutationReceipt, FetchError> {
        let url = &self.endpoints.update;
        let request = UpdateRequest {
            id: id.clone(),
            data: draft.into_fields(),
        };
        let body = self.post(url, Some(&request)).await?;
        decode(url, &body)
    }

    async fn delete(&self, id: &UnitId) -> Result<DeleteReceipt, FetchError> {
        let url = &self.endpoints.delete;
        let body = self.post(url, Some(&IdRequest { id: id.clone() })).await?;
        decode(url, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use tokio::net::TcpListener;

    use crate::domain::entities::unit::{sample_units, UnitStatus};
    use crate::infra::server::routes::build_router;

    async fn serve(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("should bind ephemeral port");
        let addr = listener.local_addr().expect("listener should have an address");
        tokio::spawn(async move {
            axum::serve(listener, router).await.ok();
        });
        format!("http://{addr}")
    }

    #[test]
    fn decode_rejects_wrapped_object() {
        let err = decode_unit_list("u", r#"{"units": []}"#).expect_err("object should be rejected");
        assert_eq!(err.kind(), "malformed");
        assert!(err.to_string().contains("got an object"), "unexpected error: {err}");
    }

    #[test]
    fn decode_rejects_missing_fields_with_index() {
        let body = r#"[{"id":"UNIT-1","unitName":"A","unitType":"K9 Unit","location":"x","vehicleReg":"r","status":"Enabled"},{"id":"UNIT-2"}]"#;
        let err = decode_unit_list("u", body).expect_err("missing fields should be rejected");
        assert!(err.to_string().contains("unit at index 1"), "unexpected error: {err}");
    }

    #[test]
    fn decode_rejects_unknown_status_and_duplicate_ids() {
        let bad_status = r#"[{"id":"UNIT-1","unitName":"A","unitType":"K9 Unit","location":"x","vehicleReg":"r","status":"Retired"}]"#;
        assert!(decode_unit_list("u", bad_status).is_err());

        let row = r#"{"id":"UNIT-1","unitName":"A","unitType":"K9 Unit","location":"x","vehicleReg":"r","status":"Disabled"}"#;
        let duplicated = format!("[{row},{row}]");
        let err = decode_unit_list("u", &duplicated).expect_err("duplicate ids should be rejected");
        assert!(err.to_string().contains("duplicate unit id UNIT-1"));
    }

    #[tokio::test]
    async fn fetch_all_reads_sample_fleet() {
        let base_url = serve(build_router()).await;
        let source = HttpUnitSource::new(&base_url);

        let units = source.fetch_all().await.expect("fetch should succeed");

        assert_eq!(units, sample_units().to_vec());
    }

    #[tokio::test]
    async fn mutations_round_trip_through_echo_routes() {
        let base_url = serve(build_router()).await;
        let source = HttpUnitSource::new(&base_url);
        let id = UnitId::from("UNIT-003");

        let single = source.fetch_single(&id).await.expect("single should succeed");
        assert_eq!(single.id, id);
        assert_eq!(single.unit_name, "Alpha Team");

        let draft = UnitDraft {
            unit_name: "Hotel Team".to_string(),
            status: UnitStatus::Disabled,
            ..UnitDraft::default()
        };
        let created = source.create(draft.clone()).await.expect("create should succeed");
        assert_eq!(created.message, "Unit created successfully");
        assert!(created.unit_id().is_some_and(|id| id.starts_with("UNIT-")));
        assert_eq!(created.data.get("unitName"), Some(&Value::from("Hotel Team")));

        let updated = source.update(&id, draft).await.expect("update should succeed");
        assert_eq!(updated.message, "Unit UNIT-003 updated successfully");
        assert_eq!(updated.unit_id(), Some("UNIT-003"));
        assert_eq!(updated.data.get("status"), Some(&Value::from("Disabled")));

        let deleted = source.delete(&id).await.expect("delete should succeed");
        assert_eq!(deleted.deleted_id, id);
        assert_eq!(deleted.message, "Unit UNIT-003 deleted successfully");
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let router = Router::new().route(
            "/units/all",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let base_url = serve(router).await;

        let err = HttpUnitSource::new(&base_url)
            .fetch_all()
            .await
            .expect_err("500 should fail");

        assert!(matches!(err, FetchError::Status { status: 500, .. }), "unexpected error: {err:?}");
    }

    #[tokio::test]
    async fn wrapped_payload_is_malformed() {
        let router = Router::new().route(
            "/units/all",
            post(|| async { Json(serde_json::json!({ "data": sample_units() })) }),
        );
        let base_url = serve(router).await;

        let err = HttpUnitSource::new(&base_url)
            .fetch_all()
            .await
            .expect_err("wrapped payload should fail");

        assert_eq!(err.kind(), "malformed");
    }

    #[tokio::test]
    async fn unreachable_service_is_a_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("should bind ephemeral port");
        let addr = listener.local_addr().expect("listener should have an address");
        drop(listener);

        let err = HttpUnitSource::new(&format!("http://{addr}"))
            .fetch_all()
            .await
            .expect_err("closed port should fail");

        assert_eq!(err.kind(), "transport");
    }
}
