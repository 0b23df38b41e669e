use napi::Result as NapiResult;
use napi_derive::napi;

use emi_core::bridge;
use emi_core::EmiSession;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// One-shot calculations
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_emi(input_json: String) -> NapiResult<String> {
    bridge::calculate_emi_json(&input_json).map_err(to_napi_error)
}

#[napi]
pub fn build_schedule(input_json: String) -> NapiResult<String> {
    bridge::build_schedule_json(&input_json).map_err(to_napi_error)
}

#[napi]
pub fn replay_session(edits_json: String) -> NapiResult<String> {
    bridge::replay_session_json(&edits_json).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Interactive session
// ---------------------------------------------------------------------------

/// Stateful calculator for a form. Each setter takes the raw field text and
/// returns whether it was applied; the state always reflects the last
/// accepted inputs.
#[napi]
pub struct Calculator {
    session: EmiSession,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

#[napi]
impl Calculator {
    #[napi(constructor)]
    pub fn new() -> Self {
        Self {
            session: EmiSession::new(),
        }
    }

    #[napi]
    pub fn set_principal(&mut self, text: String) -> bool {
        self.session.accept_principal_text(&text)
    }

    #[napi]
    pub fn set_rate(&mut self, text: String) -> bool {
        self.session.accept_rate_text(&text)
    }

    #[napi]
    pub fn set_tenure(&mut self, text: String) -> bool {
        self.session.accept_tenure_text(&text)
    }

    /// Current inputs and derived outputs as JSON.
    #[napi]
    pub fn state(&self) -> NapiResult<String> {
        bridge::session_state_json(&self.session).map_err(to_napi_error)
    }
}
