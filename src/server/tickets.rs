//! `/tickets` handlers.
//!
//! The front-end selects the operation with a `method` query parameter
//! rather than with paths: `GET` for reads, `POST` with a JSON body for
//! writes.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use super::AppState;
use super::error::ApiError;
use crate::model::Ticket;
use crate::{NewTicket, TicketUpdate};

/// Query string shared by both verbs.
#[derive(Debug, Default, Deserialize)]
pub struct TicketQuery {
    pub method: Option<String>,
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreateRequest {
    name: Option<String>,
    description: Option<String>,
    #[serde(default, deserialize_with = "present")]
    status: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct UpdateRequest {
    id: Option<String>,
    name: Option<String>,
    description: Option<String>,
    #[serde(default, deserialize_with = "present")]
    status: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct IdRequest {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatusRequest {
    id: Option<String>,
    #[serde(default, deserialize_with = "present")]
    status: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub id: String,
    pub ticket: Ticket,
}

#[derive(Debug, Serialize)]
pub struct TicketResponse {
    pub success: bool,
    pub ticket: Ticket,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// `GET /tickets?method=allTickets|ticketById&id=...`
pub async fn read(
    State(state): State<AppState>,
    Query(query): Query<TicketQuery>,
) -> Result<Response, ApiError> {
    let method = require_method(query.method)?;
    match method.as_str() {
        "allTickets" => {
            let summaries = run(&state, |service| service.list_summaries()).await?;
            Ok(Json(summaries).into_response())
        }
        "ticketById" => {
            let id = non_empty(query.id)
                .ok_or_else(|| ApiError::bad_request("ID parameter is required"))?;
            let ticket = run(&state, move |service| service.get_by_id(&id)).await?;
            Ok(Json(ticket).into_response())
        }
        _ => Err(ApiError::InvalidMethod),
    }
}

/// `POST /tickets?method=createTicket|updateTicket|deleteTicket|statusTicket`
pub async fn write(
    State(state): State<AppState>,
    Query(query): Query<TicketQuery>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let method = require_method(query.method)?;
    let body = parse_body(&body)?;
    debug!(method = %method, body = %body, "ticket write request");

    match method.as_str() {
        "createTicket" => {
            let req: CreateRequest = from_body(body)?;
            let new = NewTicket {
                name: req.name,
                description: req.description,
                status: req.status.as_ref().map(truthy),
            };
            let ticket = run(&state, move |service| service.create(new)).await?;
            Ok(Json(CreatedResponse {
                success: true,
                id: ticket.id.clone(),
                ticket,
            })
            .into_response())
        }
        "updateTicket" => {
            let req: UpdateRequest = from_body(body)?;
            let id = non_empty(req.id).ok_or_else(|| ApiError::bad_request("ID is required"))?;
            let update = TicketUpdate {
                name: req.name,
                description: req.description,
                status: req.status.as_ref().map(truthy),
            };
            let ticket = run(&state, move |service| service.update(&id, update)).await?;
            Ok(Json(TicketResponse {
                success: true,
                ticket,
            })
            .into_response())
        }
        "deleteTicket" => {
            let req: IdRequest = from_body(body)?;
            let id = non_empty(req.id).ok_or_else(|| ApiError::bad_request("ID is required"))?;
            run(&state, move |service| service.delete(&id)).await?;
            Ok(Json(SuccessResponse { success: true }).into_response())
        }
        "statusTicket" => {
            let req: StatusRequest = from_body(body)?;
            let (Some(id), Some(status)) = (non_empty(req.id), req.status) else {
                return Err(ApiError::bad_request("ID and status are required"));
            };
            let status = truthy(&status);
            let ticket = run(&state, move |service| service.set_status(&id, Some(status))).await?;
            Ok(Json(TicketResponse {
                success: true,
                ticket,
            })
            .into_response())
        }
        _ => Err(ApiError::InvalidMethod),
    }
}

/// Run a service call on the blocking pool; the store does file I/O.
async fn run<T, F>(state: &AppState, f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&super::BoxedTicketService) -> crate::Result<T> + Send + 'static,
{
    let service = Arc::clone(&state.service);
    tokio::task::spawn_blocking(move || f(&service))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .map_err(ApiError::from)
}

fn require_method(method: Option<String>) -> Result<String, ApiError> {
    non_empty(method).ok_or(ApiError::MissingMethod)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// An empty body counts as `{}`.
fn parse_body(raw: &[u8]) -> Result<Value, ApiError> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    serde_json::from_slice(raw).map_err(|e| ApiError::BodyParse(e.to_string()))
}

fn from_body<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    serde_json::from_value(body).map_err(|e| ApiError::BodyParse(e.to_string()))
}

/// Keeps an explicit `null` distinguishable from a missing key.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// JavaScript truthiness, which browser clients rely on for `status`.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
