use std::{fmt::Display, sync::Arc};

use engine::{evaluate, InputOutcome, Session};
use shared::{
    error::{ApiError, ErrorCode},
    protocol::{ClientRequest, ComputeResponse, ServerEvent},
};
use tracing::error;

use crate::app_state::AppState;

/// Evaluate one input on the blocking pool so long expansions never stall
/// the async workers.
pub(crate) async fn compute(
    state: Arc<AppState>,
    input: String,
) -> Result<ComputeResponse, ApiError> {
    ensure_input_size(&input, state.max_input_bytes)?;
    let options = state.options;
    tokio::task::spawn_blocking(move || ComputeResponse::from(evaluate(&input, &options)))
        .await
        .map_err(internal)
}

/// Websocket frames carry either a JSON `ClientRequest` or the raw input text.
pub(crate) fn parse_client_message(text: &str) -> ClientRequest {
    serde_json::from_str(text).unwrap_or_else(|_| ClientRequest::Input {
        value: text.to_string(),
    })
}

/// Run one request against a connection's session on the blocking pool.
///
/// The session is moved in and handed back. If the task dies the connection
/// continues with a fresh session.
pub(crate) async fn run_client_request(
    mut session: Session,
    request: ClientRequest,
    max_input_bytes: usize,
) -> (Session, ServerEvent) {
    let options = *session.options();
    let joined = tokio::task::spawn_blocking(move || {
        let event = handle_client_request(&mut session, request, max_input_bytes);
        (session, event)
    })
    .await;

    match joined {
        Ok(done) => done,
        Err(join_error) => {
            error!(%join_error, "session task failed; starting a fresh session");
            (Session::new(options), ServerEvent::Error(internal(join_error)))
        }
    }
}

pub(crate) fn handle_client_request(
    session: &mut Session,
    request: ClientRequest,
    max_input_bytes: usize,
) -> ServerEvent {
    match request {
        ClientRequest::Input { value } => {
            if let Err(error) = ensure_input_size(&value, max_input_bytes) {
                return ServerEvent::Error(error);
            }
            outcome_event(session.handle_input(&value))
        }
        ClientRequest::Reset => {
            session.reset();
            ServerEvent::SessionReset
        }
    }
}

fn outcome_event(outcome: InputOutcome) -> ServerEvent {
    match outcome {
        InputOutcome::Updated(update) => ServerEvent::ResultsUpdated {
            sanitized: update.sanitized,
            results: update.results,
            range_error: update.range_error.map(|error| error.to_string()),
            rendered: update.rendered,
            truncated: update.truncated,
        },
        InputOutcome::Suppressed { sanitized } | InputOutcome::Incomplete { sanitized } => {
            ServerEvent::Unchanged { sanitized }
        }
    }
}

fn ensure_input_size(input: &str, max_input_bytes: usize) -> Result<(), ApiError> {
    if input.len() > max_input_bytes {
        return Err(ApiError::new(
            ErrorCode::PayloadTooLarge,
            format!("input exceeds {max_input_bytes} bytes"),
        ));
    }
    Ok(())
}

pub(crate) fn internal(error: impl Display) -> ApiError {
    ApiError::new(ErrorCode::Internal, error.to_string())
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
