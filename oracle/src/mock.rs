//! Scripted oracle for testing

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chess_common::UciMove;

use crate::{Oracle, OracleError, OraclePayload, OracleRequest, Side};

/// Mock oracle - only compiled in test mode or with mock feature
///
/// Responses are consumed in order. Clones share the script and the call log,
/// so a test can keep a clone after handing one to a controller.
#[derive(Clone, Default)]
pub struct MockOracle {
    responses: Arc<Mutex<VecDeque<Result<OraclePayload, OracleError>>>>,
    call_log: Arc<Mutex<Vec<OracleRequest>>>,
}

impl MockOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response
    pub fn with_response(self, payload: OraclePayload) -> Self {
        self.push_response(payload);
        self
    }

    /// Queue a failure
    pub fn with_error(self, error: OracleError) -> Self {
        self.push_error(error);
        self
    }

    pub fn push_response(&self, payload: OraclePayload) {
        self.responses.lock().unwrap().push_back(Ok(payload));
    }

    pub fn push_error(&self, error: OracleError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Every request received so far
    pub fn calls(&self) -> Vec<OracleRequest> {
        self.call_log.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.call_log.lock().unwrap().len()
    }

    /// Build a payload with the given legal moves and placeholder texts
    pub fn payload(fen: &str, turn: Side, legal_moves: &[&str]) -> OraclePayload {
        OraclePayload {
            fen: fen.to_string(),
            turn,
            selected_square: None,
            legal_targets: Vec::new(),
            is_game_over: false,
            status_text: format!("{} to move", turn.title()),
            score_text: "Even".to_string(),
            legal_moves_uci: legal_moves
                .iter()
                .map(|m| m.parse::<UciMove>().expect("mock move must be valid UCI"))
                .collect(),
        }
    }
}

#[async_trait]
impl Oracle for MockOracle {
    async fn evaluate(&self, request: &OracleRequest) -> Result<OraclePayload, OracleError> {
        self.call_log.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(OracleError::Rejected("Mock response not configured".into())))
    }
}
