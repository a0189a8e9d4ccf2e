//! Batch endpoints
//!
//! Each request gets its own cancellation token. The token fires when the
//! configured request timeout elapses or when the handler future is dropped
//! (client disconnect); items not yet started are then reported as canceled.

use crate::core::batch::BatchResponse;
use crate::core::models::{ResourcePoolCreate, SubscriptionCreate};
use crate::server::state::AppState;
use crate::utils::error::GatewayError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::debug;

/// Path prefix of the batch API
pub const BATCH_SCOPE: &str = "/o2ims-infrastructureInventory/v1/batch";

/// Configure batch routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(BATCH_SCOPE)
            .route("/subscriptions", web::post().to(create_subscriptions))
            .route("/subscriptions/delete", web::post().to(delete_subscriptions))
            .route("/resourcePools", web::post().to(create_resource_pools))
            .route("/resourcePools/delete", web::post().to(delete_resource_pools)),
    );
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubscriptionsRequest {
    pub subscriptions: Vec<SubscriptionCreate>,
    #[serde(default)]
    pub atomic: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSubscriptionsRequest {
    pub subscription_ids: Vec<String>,
    #[serde(default)]
    pub atomic: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResourcePoolsRequest {
    pub resource_pools: Vec<ResourcePoolCreate>,
    #[serde(default)]
    pub atomic: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResourcePoolsRequest {
    pub resource_pool_ids: Vec<String>,
    #[serde(default)]
    pub atomic: bool,
}

async fn create_subscriptions(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> ActixResult<HttpResponse> {
    let request: CreateSubscriptionsRequest = decode(&body)?;
    let (cancel, _guard) = deadline_token(state.config.server().request_timeout());

    let response = state
        .batch
        .create_subscriptions(&cancel, request.subscriptions, request.atomic)
        .await?;
    Ok(render(response))
}

async fn delete_subscriptions(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> ActixResult<HttpResponse> {
    let request: DeleteSubscriptionsRequest = decode(&body)?;
    let (cancel, _guard) = deadline_token(state.config.server().request_timeout());

    let response = state
        .batch
        .delete_subscriptions(&cancel, request.subscription_ids, request.atomic)
        .await?;
    Ok(render(response))
}

async fn create_resource_pools(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> ActixResult<HttpResponse> {
    let request: CreateResourcePoolsRequest = decode(&body)?;
    let (cancel, _guard) = deadline_token(state.config.server().request_timeout());

    let response = state
        .batch
        .create_resource_pools(&cancel, request.resource_pools, request.atomic)
        .await?;
    Ok(render(response))
}

async fn delete_resource_pools(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> ActixResult<HttpResponse> {
    let request: DeleteResourcePoolsRequest = decode(&body)?;
    let (cancel, _guard) = deadline_token(state.config.server().request_timeout());

    let response = state
        .batch
        .delete_resource_pools(&cancel, request.resource_pool_ids, request.atomic)
        .await?;
    Ok(render(response))
}

/// Decode a JSON body, mapping failures to a 400
fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, GatewayError> {
    serde_json::from_slice(body).map_err(|e| {
        debug!(error = %e, "rejecting malformed batch request");
        GatewayError::bad_request(format!("invalid request body: {}", e))
    })
}

/// Token cancelled after `timeout`, or when the returned guard is dropped
fn deadline_token(timeout: Duration) -> (CancellationToken, DropGuard) {
    let token = CancellationToken::new();
    let timer = token.clone();
    actix_web::rt::spawn(async move {
        tokio::select! {
            _ = tokio::time::sleep(timeout) => {
                debug!(timeout_secs = timeout.as_secs(), "batch request deadline elapsed");
                timer.cancel();
            }
            _ = timer.cancelled() => {}
        }
    });

    let guard = token.clone().drop_guard();
    (token, guard)
}

fn render(response: BatchResponse) -> HttpResponse {
    let status =
        StatusCode::from_u16(response.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status).json(response)
}
