//! Agreement registration modal: device selection, terms and address form
//! lookups, agreement number validation and the registration submission.

mod reducer;
mod thunks;

pub use reducer::{AgreementsAction, AgreementsReducer, AgreementsState, Device, Terms};
pub use thunks::{
    fetch_address_form_fields, fetch_terms, submit_registration, validate_agreement_number,
    AgreementNumberCheck, RegistrationAddress, RegistrationSubmission,
};

pub const SLICE_KEY: &str = "agreementModalData";

/// Form field holding the agreement number.
pub const AGREEMENT_NUMBER_FIELD: &str = "agreementNumber";

/// Form fields the server may name in a field-level rejection.
pub const ADDRESS_FIELDS: [&str; 7] = [
    "address1", "address2", "address3", "address4", "city", "state", "postal",
];
