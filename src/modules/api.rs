//! Shared API slice holding the short-lived security token.

use serde::Serialize;

use crate::store::{Action, Reducer, SliceState};

pub const SLICE_KEY: &str = "api";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiAction {
    /// A token refresh resolved. `sequence` orders refreshes by issue time.
    TokenReceived { sequence: u64, token: String },
}

impl ApiAction {
    pub const TOKEN_RECEIVED: &'static str = "RECEIVE_CSRF_TOKEN";

    pub fn kind(&self) -> &'static str {
        match self {
            ApiAction::TokenReceived { .. } => Self::TOKEN_RECEIVED,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiState {
    pub csrf_token: Option<String>,
    /// Sequence of the refresh that produced `csrf_token`.
    pub token_sequence: u64,
}

impl SliceState for ApiState {}

pub struct ApiReducer;

impl Reducer for ApiReducer {
    type State = ApiState;

    fn reduce(state: Self::State, action: &Action) -> Self::State {
        match action {
            Action::Api(ApiAction::TokenReceived { sequence, token }) => {
                if *sequence <= state.token_sequence {
                    tracing::debug!(
                        sequence,
                        current = state.token_sequence,
                        "Discarding out-of-order token"
                    );
                    return state;
                }
                ApiState {
                    csrf_token: Some(token.clone()),
                    token_sequence: *sequence,
                }
            }
            _ => state,
        }
    }
}
