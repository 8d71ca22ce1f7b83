use std::sync::Arc;

use reqwest::Url;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use super::reducer::AgreementsAction;
use super::{ADDRESS_FIELDS, AGREEMENT_NUMBER_FIELD};
use crate::fetch::{FailureClass, FetchError, FetchRequest};
use crate::modules::error_modal::{ErrorModalAction, SERVER_ERROR_MESSAGE};
use crate::modules::services::Services;
use crate::navigation::{TokenError, TokenHandle};
use crate::resource::{dispatch_logged, runtime_for};
use crate::store::{Dispatched, Store, Thunk};

const LOCALE_PARAM: &str = "uiLocale";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistrationAddress {
    pub address1: String,
    pub address2: String,
    pub address3: String,
    pub address4: String,
    pub city: String,
    pub state: String,
    pub postal: String,
}

/// Body of the agreement registration request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationSubmission {
    pub agreement_number: String,
    pub serial_number_key: String,
    pub email_address: String,
    #[serde(rename = "templateID")]
    pub template_id: String,
    pub address: RegistrationAddress,
}

/// Body of the agreement number check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgreementNumberCheck {
    pub agreement_number: String,
    pub serial_number_key: String,
}

#[derive(Debug, Error)]
enum MutationError {
    #[error("No security token: {0}")]
    Token(#[from] TokenError),

    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// POST `body` once the refresh behind `token` has resolved, sending the
/// token in the configured header.
async fn authorized_post(
    services: &Services,
    token: TokenHandle,
    url: Url,
    body: &impl Serialize,
) -> Result<Value, MutationError> {
    let token = token.token().await?;
    let body = serde_json::to_value(body)?;
    let request =
        FetchRequest::post_json(url, body).with_header(services.csrf_header.as_str(), token);
    Ok(services.fetcher.fetch(request).await?)
}

fn localized(url: &Url, locale: &str) -> Url {
    let mut url = url.clone();
    url.query_pairs_mut().append_pair(LOCALE_PARAM, locale);
    url
}

fn show_server_error(store: &Store) {
    dispatch_logged(store, ErrorModalAction::show(SERVER_ERROR_MESSAGE).into());
}

/// Fetch the terms and conditions for `locale`.
pub fn fetch_terms(services: Arc<Services>, locale: String) -> Thunk {
    Thunk::new("fetch_terms", move |store| {
        let runtime = runtime_for("fetch_terms")?;
        store.dispatch(AgreementsAction::RequestTermsConditions)?;

        let url = localized(&services.endpoints.terms, &locale);
        let store = store.clone();
        Ok(Dispatched::Task(runtime.spawn(async move {
            match services.fetcher.fetch(FetchRequest::get(url)).await {
                Ok(terms) => dispatch_logged(
                    &store,
                    AgreementsAction::ReceiveTermsConditions(Some(terms)).into(),
                ),
                Err(err) => {
                    tracing::warn!(error = %err, "Fetching terms and conditions failed");
                    dispatch_logged(&store, AgreementsAction::ReceiveTermsConditions(None).into());
                    show_server_error(&store);
                }
            }
        })))
    })
}

/// Fetch the address form layout for `locale`.
pub fn fetch_address_form_fields(services: Arc<Services>, locale: String) -> Thunk {
    Thunk::new("fetch_address_form_fields", move |store| {
        let runtime = runtime_for("fetch_address_form_fields")?;
        store.dispatch(AgreementsAction::RequestAddressFormFields)?;

        let url = localized(&services.endpoints.address_fields, &locale);
        let store = store.clone();
        Ok(Dispatched::Task(runtime.spawn(async move {
            match services.fetcher.fetch(FetchRequest::get(url)).await {
                Ok(mut body) => {
                    let fields = match body.get_mut("addressFormFields").map(Value::take) {
                        Some(Value::Array(fields)) => fields,
                        _ => Vec::new(),
                    };
                    dispatch_logged(
                        &store,
                        AgreementsAction::ReceiveAddressFormFields(fields).into(),
                    );
                }
                Err(err) => {
                    tracing::warn!(error = %err, "Fetching address form fields failed");
                    dispatch_logged(
                        &store,
                        AgreementsAction::ReceiveAddressFormFields(Vec::new()).into(),
                    );
                    show_server_error(&store);
                }
            }
        })))
    })
}

/// Submit an agreement registration.
///
/// Waits for the most recent security token before posting. A rejection
/// naming one of the address fields is shown inline on that field; any
/// other failure opens the error modal.
pub fn submit_registration(services: Arc<Services>, submission: RegistrationSubmission) -> Thunk {
    Thunk::new("submit_registration", move |store| {
        let runtime = runtime_for("submit_registration")?;
        store.dispatch(AgreementsAction::ClearFieldErrors)?;

        let token = services.tokens.latest();
        let store = store.clone();
        Ok(Dispatched::Task(runtime.spawn(async move {
            let url = services.endpoints.agreement_registration.clone();
            match authorized_post(&services, token, url, &submission).await {
                Ok(response) => {
                    let accepted = response
                        .get("agreementCode")
                        .is_some_and(|code| match code {
                            Value::Null => false,
                            Value::String(code) => !code.is_empty(),
                            _ => true,
                        });
                    if accepted {
                        tracing::info!(
                            agreement = %submission.agreement_number,
                            "Agreement registered"
                        );
                        dispatch_logged(
                            &store,
                            AgreementsAction::AddSubmissionInfo {
                                agreement_number: submission.agreement_number,
                            }
                            .into(),
                        );
                    } else {
                        tracing::warn!("Registration response carried no agreementCode");
                        show_server_error(&store);
                    }
                }
                Err(MutationError::Fetch(err)) => match err.classify(&ADDRESS_FIELDS) {
                    FailureClass::FieldValidation { field, message } => {
                        tracing::debug!(%field, "Registration rejected for field");
                        dispatch_logged(
                            &store,
                            AgreementsAction::FieldError { field, message }.into(),
                        );
                    }
                    FailureClass::Transport | FailureClass::Unexpected => {
                        tracing::warn!(error = %err, "Registration failed");
                        show_server_error(&store);
                    }
                },
                Err(err) => {
                    tracing::warn!(error = %err, "Registration not sent");
                    show_server_error(&store);
                }
            }
        })))
    })
}

/// Check an agreement number with the server before registration.
///
/// Sent with the most recent security token. On success the plan template
/// is stored for the registration form. A rejection's message is shown on
/// the agreement number field; any other failure opens the error modal and
/// marks the field with the server error.
pub fn validate_agreement_number(services: Arc<Services>, check: AgreementNumberCheck) -> Thunk {
    Thunk::new("validate_agreement_number", move |store| {
        let runtime = runtime_for("validate_agreement_number")?;

        let token = services.tokens.latest();
        let store = store.clone();
        Ok(Dispatched::Task(runtime.spawn(async move {
            let url = services.endpoints.agreement_validation.clone();
            let template_id = match authorized_post(&services, token, url, &check).await {
                Ok(response) => response
                    .get("templateID")
                    .and_then(Value::as_str)
                    .filter(|id| !id.is_empty())
                    .map(str::to_string),
                Err(MutationError::Fetch(FetchError::Rejected { rejection, .. })) => {
                    tracing::debug!(%rejection, "Agreement number rejected");
                    let message = rejection
                        .message
                        .unwrap_or_else(|| SERVER_ERROR_MESSAGE.to_string());
                    agreement_number_error(&store, message);
                    return;
                }
                Err(err) => {
                    tracing::warn!(error = %err, "Agreement number check failed");
                    None
                }
            };

            match template_id {
                Some(template_id) => dispatch_logged(
                    &store,
                    AgreementsAction::TemplateResolved { template_id }.into(),
                ),
                None => {
                    show_server_error(&store);
                    agreement_number_error(&store, SERVER_ERROR_MESSAGE.to_string());
                }
            }
        })))
    })
}

fn agreement_number_error(store: &Store, message: String) {
    dispatch_logged(
        store,
        AgreementsAction::FieldError {
            field: AGREEMENT_NUMBER_FIELD.to_string(),
            message,
        }
        .into(),
    );
}
