//! Shared error-surfacing slice consumed by the global error modal.

use serde::Serialize;

use crate::store::{Action, Reducer, SliceState};

pub const SLICE_KEY: &str = "errorModalData";

/// Message key for generic server failures.
pub const SERVER_ERROR_MESSAGE: &str = "serverErrorMessage";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorModalAction {
    Show { message_key: String },
    Hide,
}

impl ErrorModalAction {
    pub const SHOW: &'static str = "SHOW_ERROR_MODAL";
    pub const HIDE: &'static str = "HIDE_ERROR_MODAL";

    pub fn show(message_key: impl Into<String>) -> Self {
        ErrorModalAction::Show {
            message_key: message_key.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ErrorModalAction::Show { .. } => Self::SHOW,
            ErrorModalAction::Hide => Self::HIDE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorModalState {
    pub visible: bool,
    pub message_key: Option<String>,
}

impl SliceState for ErrorModalState {}

pub struct ErrorModalReducer;

impl Reducer for ErrorModalReducer {
    type State = ErrorModalState;

    fn reduce(state: Self::State, action: &Action) -> Self::State {
        match action {
            Action::ErrorModal(ErrorModalAction::Show { message_key }) => ErrorModalState {
                visible: true,
                message_key: Some(message_key.clone()),
            },
            Action::ErrorModal(ErrorModalAction::Hide) => ErrorModalState::default(),
            _ => state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_then_hide() {
        let shown = ErrorModalReducer::reduce(
            ErrorModalState::default(),
            &ErrorModalAction::show(SERVER_ERROR_MESSAGE).into(),
        );
        assert!(shown.visible);
        assert_eq!(shown.message_key.as_deref(), Some(SERVER_ERROR_MESSAGE));

        let hidden = ErrorModalReducer::reduce(shown, &ErrorModalAction::Hide.into());
        assert_eq!(hidden, ErrorModalState::default());
    }
}
