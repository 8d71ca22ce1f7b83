//! Shipping label slice, registered lazily with its route.

use serde::{Deserialize, Serialize};

use crate::store::{Action, Reducer, SliceState};

pub const SLICE_KEY: &str = "shippingLabelData";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub name: String,
    pub lines: Vec<String>,
    pub city: String,
    pub state: String,
    pub postal: String,
    pub country: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShippingLabelState {
    pub barcode_data: serde_json::Map<String, serde_json::Value>,
    pub dispatch_id: String,
    pub shipping_address: Address,
    pub return_address: Address,
}

impl SliceState for ShippingLabelState {}

#[derive(Debug, Clone, PartialEq)]
pub enum ShippingLabelAction {
    /// Label data embedded in the page; `None` leaves the slice unchanged.
    DataLoaded(Option<ShippingLabelState>),
    /// The label page was shown for `dispatch_id`. Reported to analytics
    /// only; the slice is owned by `DataLoaded`.
    PageViewed { dispatch_id: String },
}

impl ShippingLabelAction {
    pub const DATA_LOADED: &'static str = "SHIPPING_LABEL_DATA_LOADED";
    pub const PAGE_VIEWED: &'static str = "SHIPPING_LABEL_PAGE_VIEWED";

    pub fn kind(&self) -> &'static str {
        match self {
            ShippingLabelAction::DataLoaded(_) => Self::DATA_LOADED,
            ShippingLabelAction::PageViewed { .. } => Self::PAGE_VIEWED,
        }
    }
}

pub struct ShippingLabelReducer;

impl Reducer for ShippingLabelReducer {
    type State = ShippingLabelState;

    fn reduce(state: Self::State, action: &Action) -> Self::State {
        match action {
            Action::ShippingLabel(ShippingLabelAction::DataLoaded(Some(label))) => label.clone(),
            _ => state,
        }
    }
}
