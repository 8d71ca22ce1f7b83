//! The closed set of actions understood by the store.

use crate::modules::activity::ActivityAction;
use crate::modules::agreements::AgreementsAction;
use crate::modules::api::ApiAction;
use crate::modules::error_modal::ErrorModalAction;
use crate::modules::location::LocationAction;
use crate::modules::shipping_label::ShippingLabelAction;

use super::middleware::Dispatchable;

/// Immutable description of something that happened.
///
/// Every domain contributes its own closed enumeration; the store only ever
/// sees this wrapper. Actions carry data, never behavior.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Run through every reducer whenever the slice registry is rebuilt.
    Init,
    Location(LocationAction),
    Api(ApiAction),
    ErrorModal(ErrorModalAction),
    Activity(ActivityAction),
    Agreements(AgreementsAction),
    ShippingLabel(ShippingLabelAction),
}

impl Action {
    pub const INIT: &'static str = "@@store/INIT";

    /// Stable wire name of the action, used for logging and telemetry filters.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Init => Self::INIT,
            Action::Location(action) => action.kind(),
            Action::Api(action) => action.kind(),
            Action::ErrorModal(action) => action.kind(),
            Action::Activity(action) => action.kind(),
            Action::Agreements(action) => action.kind(),
            Action::ShippingLabel(action) => action.kind(),
        }
    }
}

macro_rules! impl_from_domain {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Action {
                fn from(action: $ty) -> Self {
                    Action::$variant(action)
                }
            }

            impl From<$ty> for Dispatchable {
                fn from(action: $ty) -> Self {
                    Dispatchable::Action(Action::$variant(action))
                }
            }
        )*
    };
}

impl_from_domain! {
    Location => LocationAction,
    Api => ApiAction,
    ErrorModal => ErrorModalAction,
    Activity => ActivityAction,
    Agreements => AgreementsAction,
    ShippingLabel => ShippingLabelAction,
}
