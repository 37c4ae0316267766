//! HTTP/JSON implementation of the Space Travel API

use super::{ApiFailure, ApiOutcome, ApiResponse, SpaceTravelApi, TransportError};
use crate::models::{
    NewSpacecraft, Planet, RemoteErrorBody, Spacecraft, SpacecraftId, TransferRequest,
};
use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, warn};
use url::Url;

/// Talks to the remote service at `base_url`
///
/// Endpoints:
/// - `GET    {base}/spacecrafts`
/// - `GET    {base}/spacecrafts/{id}`
/// - `POST   {base}/spacecrafts`
/// - `DELETE {base}/spacecrafts/{id}`
/// - `GET    {base}/planets`
/// - `POST   {base}/transfers`
#[derive(Debug, Clone)]
pub struct HttpSpaceTravelApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpSpaceTravelApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| TransportError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(TransportError::InvalidUrl(base_url.to_string()));
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL (segments are percent-encoded)
    fn endpoint(&self, segments: &[&str]) -> Result<Url, TransportError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TransportError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response, TransportError> {
        request.send().await.map_err(|e| {
            error!("Space Travel API request failed: {}", e);
            if e.is_connect() {
                TransportError::Unreachable(e.to_string())
            } else {
                TransportError::Request(e)
            }
        })
    }
}

/// Decode a 2xx body as `T`, or turn the response into an [`ApiFailure`]
async fn read_json<T: DeserializeOwned>(response: Response) -> ApiOutcome<T> {
    if !response.status().is_success() {
        return Ok(ApiResponse::Failure(read_failure(response).await));
    }

    let body = response.bytes().await?;
    serde_json::from_slice(&body)
        .map(ApiResponse::Data)
        .map_err(|e| TransportError::Decode(e.to_string()))
}

/// Accept any 2xx as confirmation, ignoring its body
async fn read_ack(response: Response) -> ApiOutcome<()> {
    if response.status().is_success() {
        Ok(ApiResponse::Data(()))
    } else {
        Ok(ApiResponse::Failure(read_failure(response).await))
    }
}

async fn read_failure(response: Response) -> ApiFailure {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<RemoteErrorBody>(&body)
        .ok()
        .and_then(|b| b.message);

    warn!(
        "Space Travel API rejected request: {} ({})",
        status,
        message.as_deref().unwrap_or("no message")
    );

    ApiFailure::new(status.as_u16(), message)
}

#[async_trait]
impl SpaceTravelApi for HttpSpaceTravelApi {
    async fn list_spacecraft(&self) -> ApiOutcome<Vec<Spacecraft>> {
        let url = self.endpoint(&["spacecrafts"])?;
        debug!("GET {}", url);
        let response = self.send(self.client.get(url)).await?;
        read_json(response).await
    }

    async fn get_spacecraft(&self, id: &SpacecraftId) -> ApiOutcome<Option<Spacecraft>> {
        let url = self.endpoint(&["spacecrafts", id.as_str()])?;
        debug!("GET {}", url);
        let response = self.send(self.client.get(url)).await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!("Spacecraft {} is unknown to the service", id);
            return Ok(ApiResponse::Data(None));
        }

        read_json(response).await
    }

    async fn build_spacecraft(&self, payload: &NewSpacecraft) -> ApiOutcome<Spacecraft> {
        let url = self.endpoint(&["spacecrafts"])?;
        debug!("POST {} ({})", url, payload.name);
        let response = self.send(self.client.post(url).json(payload)).await?;
        read_json(response).await
    }

    async fn destroy_spacecraft(&self, id: &SpacecraftId) -> ApiOutcome<()> {
        let url = self.endpoint(&["spacecrafts", id.as_str()])?;
        debug!("DELETE {}", url);
        let response = self.send(self.client.delete(url)).await?;
        read_ack(response).await
    }

    async fn list_planets(&self) -> ApiOutcome<Vec<Planet>> {
        let url = self.endpoint(&["planets"])?;
        debug!("GET {}", url);
        let response = self.send(self.client.get(url)).await?;
        read_json(response).await
    }

    async fn transfer_spacecraft(&self, request: &TransferRequest) -> ApiOutcome<()> {
        let url = self.endpoint(&["transfers"])?;
        debug!(
            "POST {} ({} -> planet {})",
            url, request.spacecraft_id, request.target_planet_id
        );
        let response = self.send(self.client.post(url).json(request)).await?;
        read_ack(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlanetId;
    use axum::{
        extract::Path,
        http::StatusCode as AxumStatus,
        routing::{get, post},
        Json, Router,
    };
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    fn spacecraft_json(id: &str) -> Value {
        json!({
            "id": id,
            "name": "Prophecy",
            "capacity": 10000,
            "description": "Ark ship",
            "currentLocation": 2
        })
    }

    /// Serve a stub of the remote API on an ephemeral port
    async fn stub_server() -> String {
        let app = Router::new()
            .route(
                "/api/spacecrafts",
                get(|| async { Json(json!([spacecraft_json("a"), spacecraft_json("b")])) })
                    .post(|Json(body): Json<Value>| async move {
                        if body["capacity"].as_u64().unwrap_or(0) > 1_000_000 {
                            return (
                                AxumStatus::UNPROCESSABLE_ENTITY,
                                Json(json!({ "message": "Capacity exceeds shipyard limits" })),
                            );
                        }
                        let mut created = spacecraft_json("new");
                        created["name"] = body["name"].clone();
                        (AxumStatus::CREATED, Json(created))
                    }),
            )
            .route(
                "/api/spacecrafts/{id}",
                get(|Path(id): Path<String>| async move {
                    match id.as_str() {
                        "a" => (AxumStatus::OK, Json(spacecraft_json("a"))),
                        "null" => (AxumStatus::OK, Json(Value::Null)),
                        "broken" => (AxumStatus::INTERNAL_SERVER_ERROR, Json(json!({}))),
                        _ => (AxumStatus::NOT_FOUND, Json(json!({ "message": "missing" }))),
                    }
                })
                .delete(|Path(id): Path<String>| async move {
                    if id == "a" {
                        (AxumStatus::OK, Json(json!({ "data": null })))
                    } else {
                        (AxumStatus::NOT_FOUND, Json(json!({ "message": "No such spacecraft" })))
                    }
                }),
            )
            .route("/api/planets", get(|| async { "not json" }))
            .route(
                "/api/transfers",
                post(|Json(body): Json<Value>| async move {
                    if body["targetPlanetId"] == 9 {
                        (AxumStatus::BAD_REQUEST, Json(json!({ "message": "Planet is full" })))
                    } else {
                        (AxumStatus::OK, Json(json!({})))
                    }
                }),
            );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}/api", addr)
    }

    async fn client() -> HttpSpaceTravelApi {
        HttpSpaceTravelApi::new(&stub_server().await, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_endpoint_appends_segments() {
        let api = HttpSpaceTravelApi::new("http://example.com/api/", Duration::from_secs(1)).unwrap();
        let url = api.endpoint(&["spacecrafts", "a b"]).unwrap();

        assert_eq!(url.as_str(), "http://example.com/api/spacecrafts/a%20b");
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let result = HttpSpaceTravelApi::new("not a url", Duration::from_secs(1));
        assert!(matches!(result, Err(TransportError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_list_spacecraft() {
        let api = client().await;
        let fleet = api.list_spacecraft().await.unwrap().into_result().unwrap();

        assert_eq!(fleet.len(), 2);
        assert_eq!(fleet[1].id, SpacecraftId::new("b"));
    }

    #[tokio::test]
    async fn test_get_spacecraft_absent_and_failure() {
        let api = client().await;

        let found = api.get_spacecraft(&"a".into()).await.unwrap();
        let missing = api.get_spacecraft(&"zzz".into()).await.unwrap();
        let null_body = api.get_spacecraft(&"null".into()).await.unwrap();
        let broken = api.get_spacecraft(&"broken".into()).await.unwrap();

        assert!(matches!(found, ApiResponse::Data(Some(_))));
        assert_eq!(missing, ApiResponse::Data(None));
        assert_eq!(null_body, ApiResponse::Data(None));
        assert_eq!(broken, ApiResponse::Failure(ApiFailure::new(500, None)));
    }

    #[tokio::test]
    async fn test_build_spacecraft_success_and_rejection() {
        let api = client().await;
        let mut payload = NewSpacecraft {
            name: "Kepler".to_string(),
            capacity: 500,
            description: "Scout".to_string(),
            picture_url: None,
        };

        let built = api.build_spacecraft(&payload).await.unwrap();
        assert_eq!(built.data().map(|s| s.name.as_str()), Some("Kepler"));

        payload.capacity = 2_000_000;
        let rejected = api.build_spacecraft(&payload).await.unwrap();
        assert_eq!(
            rejected,
            ApiResponse::Failure(ApiFailure::new(
                422,
                Some("Capacity exceeds shipyard limits".to_string())
            ))
        );
    }

    #[tokio::test]
    async fn test_destroy_spacecraft() {
        let api = client().await;

        assert_eq!(api.destroy_spacecraft(&"a".into()).await.unwrap(), ApiResponse::Data(()));
        let missing = api.destroy_spacecraft(&"b".into()).await.unwrap();
        assert!(missing.is_error());
    }

    #[tokio::test]
    async fn test_transfer_spacecraft() {
        let api = client().await;
        let ok = TransferRequest {
            spacecraft_id: "a".into(),
            target_planet_id: PlanetId(1),
        };
        let full = TransferRequest {
            spacecraft_id: "a".into(),
            target_planet_id: PlanetId(9),
        };

        assert_eq!(api.transfer_spacecraft(&ok).await.unwrap(), ApiResponse::Data(()));
        assert_eq!(
            api.transfer_spacecraft(&full).await.unwrap(),
            ApiResponse::Failure(ApiFailure::new(400, Some("Planet is full".to_string())))
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_transport_error() {
        let api = client().await;
        let result = api.list_planets().await;

        assert!(matches!(result, Err(TransportError::Decode(_))));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = HttpSpaceTravelApi::new(&format!("http://{}/api", addr), Duration::from_secs(2))
            .unwrap();
        let result = api.list_spacecraft().await;

        assert!(matches!(result, Err(TransportError::Unreachable(_))));
    }
}
