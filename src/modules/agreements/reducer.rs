use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::AGREEMENT_NUMBER_FIELD;
use crate::store::{Action, Reducer, SliceState};

/// The device an agreement is being registered for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Device {
    pub serial_number_key: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Terms {
    pub is_fetching: bool,
    pub content: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AgreementsAction {
    ShowModal { device: Device },
    HideModal,
    AddSubmissionInfo { agreement_number: String },
    RequestTermsConditions,
    /// `None` when the fetch failed.
    ReceiveTermsConditions(Option<Value>),
    RequestAddressFormFields,
    ReceiveAddressFormFields(Vec<Value>),
    /// The server accepted the agreement number and chose the plan template.
    TemplateResolved { template_id: String },
    /// A field-level rejection shown next to `field`.
    FieldError { field: String, message: String },
    ClearFieldErrors,
}

impl AgreementsAction {
    pub const SHOW_MODAL: &'static str = "TOGGLE_AGREEMENT_MODAL_SHOW";
    pub const HIDE_MODAL: &'static str = "TOGGLE_AGREEMENT_MODAL_HIDE";
    pub const ADD_SUBMISSION_INFO: &'static str = "ADD_AGREEMENT_SUBMISSION_INFO";
    pub const REQUEST_TERMS: &'static str = "REQUEST_TERMS_CONDITIONS";
    pub const RECEIVE_TERMS: &'static str = "RECEIVE_TERMS_CONDITIONS";
    pub const REQUEST_ADDRESS_FIELDS: &'static str = "REQUEST_ADDRESS_FORM_FIELDS";
    pub const RECEIVE_ADDRESS_FIELDS: &'static str = "RECEIVE_ADDRESS_FORM_FIELDS";
    pub const TEMPLATE_RESOLVED: &'static str = "AGREEMENT_TEMPLATE_RESOLVED";
    pub const FIELD_ERROR: &'static str = "AGREEMENT_FIELD_ERROR";
    pub const CLEAR_FIELD_ERRORS: &'static str = "CLEAR_AGREEMENT_FIELD_ERRORS";

    pub fn kind(&self) -> &'static str {
        match self {
            AgreementsAction::ShowModal { .. } => Self::SHOW_MODAL,
            AgreementsAction::HideModal => Self::HIDE_MODAL,
            AgreementsAction::AddSubmissionInfo { .. } => Self::ADD_SUBMISSION_INFO,
            AgreementsAction::RequestTermsConditions => Self::REQUEST_TERMS,
            AgreementsAction::ReceiveTermsConditions(_) => Self::RECEIVE_TERMS,
            AgreementsAction::RequestAddressFormFields => Self::REQUEST_ADDRESS_FIELDS,
            AgreementsAction::ReceiveAddressFormFields(_) => Self::RECEIVE_ADDRESS_FIELDS,
            AgreementsAction::TemplateResolved { .. } => Self::TEMPLATE_RESOLVED,
            AgreementsAction::FieldError { .. } => Self::FIELD_ERROR,
            AgreementsAction::ClearFieldErrors => Self::CLEAR_FIELD_ERRORS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgreementsState {
    pub is_open: bool,
    pub device: Device,
    pub terms: Terms,
    pub is_submitted: bool,
    pub agreement_number: Option<String>,
    pub fetching_address: bool,
    pub address_form_fields: Vec<Value>,
    /// Plan template of the validated agreement number.
    #[serde(rename = "templateID")]
    pub template_id: Option<String>,
    /// Inline errors keyed by form field name.
    pub field_errors: BTreeMap<String, String>,
}

impl SliceState for AgreementsState {}

pub struct AgreementsReducer;

impl Reducer for AgreementsReducer {
    type State = AgreementsState;

    fn reduce(state: Self::State, action: &Action) -> Self::State {
        let Action::Agreements(action) = action else {
            return state;
        };

        match action {
            AgreementsAction::ShowModal { device } => AgreementsState {
                is_open: true,
                device: device.clone(),
                ..state
            },
            AgreementsAction::HideModal => AgreementsState {
                is_open: false,
                device: Device::default(),
                ..state
            },
            AgreementsAction::AddSubmissionInfo { agreement_number } => AgreementsState {
                agreement_number: Some(agreement_number.clone()),
                is_submitted: true,
                ..state
            },
            AgreementsAction::RequestTermsConditions => AgreementsState {
                terms: Terms {
                    is_fetching: true,
                    content: None,
                },
                ..state
            },
            AgreementsAction::ReceiveTermsConditions(content) => AgreementsState {
                terms: Terms {
                    is_fetching: false,
                    content: content.clone(),
                },
                ..state
            },
            AgreementsAction::RequestAddressFormFields => AgreementsState {
                fetching_address: true,
                ..state
            },
            AgreementsAction::ReceiveAddressFormFields(fields) => AgreementsState {
                fetching_address: false,
                address_form_fields: fields.clone(),
                ..state
            },
            AgreementsAction::TemplateResolved { template_id } => {
                let mut field_errors = state.field_errors;
                field_errors.remove(AGREEMENT_NUMBER_FIELD);
                AgreementsState {
                    template_id: Some(template_id.clone()),
                    field_errors,
                    ..state
                }
            }
            AgreementsAction::FieldError { field, message } => {
                let mut field_errors = state.field_errors;
                field_errors.insert(field.clone(), message.clone());
                AgreementsState {
                    field_errors,
                    ..state
                }
            }
            AgreementsAction::ClearFieldErrors if state.field_errors.is_empty() => state,
            AgreementsAction::ClearFieldErrors => AgreementsState {
                field_errors: BTreeMap::new(),
                ..state
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reduce(state: AgreementsState, action: AgreementsAction) -> AgreementsState {
        AgreementsReducer::reduce(state, &action.into())
    }

    #[test]
    fn modal_opens_with_device_and_closes_clean() {
        let device = Device {
            serial_number_key: "SN1".to_string(),
            description: "Laptop".to_string(),
        };
        let state = reduce(
            AgreementsState::default(),
            AgreementsAction::ShowModal {
                device: device.clone(),
            },
        );
        assert!(state.is_open);
        assert_eq!(state.device, device);

        let state = reduce(state, AgreementsAction::HideModal);
        assert!(!state.is_open);
        assert_eq!(state.device, Device::default());
    }

    #[test]
    fn terms_fetch_replaces_content() {
        let state = reduce(AgreementsState::default(), AgreementsAction::RequestTermsConditions);
        assert!(state.terms.is_fetching);

        let state = reduce(
            state,
            AgreementsAction::ReceiveTermsConditions(Some(json!({ "html": "<p>terms</p>" }))),
        );
        assert!(!state.terms.is_fetching);
        assert_eq!(state.terms.content, Some(json!({ "html": "<p>terms</p>" })));
    }

    #[test]
    fn field_errors_accumulate_and_clear() {
        let state = reduce(
            AgreementsState::default(),
            AgreementsAction::FieldError {
                field: "postal".to_string(),
                message: "Invalid postcode".to_string(),
            },
        );
        assert_eq!(
            state.field_errors.get("postal").map(String::as_str),
            Some("Invalid postcode")
        );

        let state = reduce(state, AgreementsAction::ClearFieldErrors);
        assert!(state.field_errors.is_empty());
    }

    #[test]
    fn submission_info_marks_submitted() {
        let state = reduce(
            AgreementsState::default(),
            AgreementsAction::AddSubmissionInfo {
                agreement_number: "AG-1".to_string(),
            },
        );
        assert!(state.is_submitted);
        assert_eq!(state.agreement_number.as_deref(), Some("AG-1"));
    }

    #[test]
    fn resolved_template_clears_agreement_number_error() {
        let state = reduce(
            AgreementsState::default(),
            AgreementsAction::FieldError {
                field: AGREEMENT_NUMBER_FIELD.to_string(),
                message: "Unknown agreement".to_string(),
            },
        );
        let state = reduce(
            state,
            AgreementsAction::FieldError {
                field: "city".to_string(),
                message: "Required".to_string(),
            },
        );

        let state = reduce(
            state,
            AgreementsAction::TemplateResolved {
                template_id: "T-42".to_string(),
            },
        );
        assert_eq!(state.template_id.as_deref(), Some("T-42"));
        assert!(!state.field_errors.contains_key(AGREEMENT_NUMBER_FIELD));
        assert!(state.field_errors.contains_key("city"));
    }
}
