//! API routes

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use crate::conversation::Turn;
use crate::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    model: String,
    remote: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChatbotRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default, deserialize_with = "lenient_history")]
    pub history: Vec<Turn>,
}

/// Keeps the entries that decode as turns and drops the rest
fn lenient_history<'de, D>(deserializer: D) -> Result<Vec<Turn>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<Turn>(entry) {
            Ok(turn) => Some(turn),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable history entry");
                None
            }
        })
        .collect())
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatbotReply {
    pub reply: String,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        model: state.config.bot.llm.model.clone(),
        remote: state.engine.has_remote(),
    })
}

/// Always answers 200.
///
/// A body that cannot be read or decoded is handled as an empty message.
/// History entries that do not decode are dropped and the rest are kept.
async fn chatbot(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Json<ChatbotReply> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("chatbot", %request_id);

    async move {
        let request = match body {
            Ok(body) => parse_request(&body),
            Err(rejection) => {
                tracing::warn!(error = %rejection, "Unreadable chatbot body; treating as empty message");
                ChatbotRequest::default()
            }
        };
        tracing::debug!(history = request.history.len(), "Chatbot request");

        let reply = state.engine.respond(&request.message, &request.history).await;
        Json(ChatbotReply { reply })
    }
    .instrument(span)
    .await
}

fn parse_request(body: &[u8]) -> ChatbotRequest {
    match serde_json::from_slice(body) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(error = %e, "Malformed chatbot request; treating as empty message");
            ChatbotRequest::default()
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/chatbot", post(chatbot))
        .route("/api/chatbot", post(chatbot))
}
