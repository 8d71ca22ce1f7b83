use serde::Serialize;

use super::model::{Case, Notification};
use crate::resource::{self, ResourceAction, ResourceState};
use crate::store::{Action, Reducer, SliceState};

#[derive(Debug, Clone, PartialEq)]
pub enum ActivityAction {
    /// Lifecycle of the case list. `Reset` clears the notifications.
    Resource(ResourceAction<Case, Notification>),
    SeeMoreActivity { show: bool },
    SeeMoreNotifications { show: bool },
    /// The history page was shown. Reported to analytics only.
    PageViewed,
}

impl ActivityAction {
    pub const REQUEST: &'static str = "REQUEST_ACTIVITIES";
    pub const REQUEST_MORE: &'static str = "REQUEST_MORE_ACTIVITIES";
    pub const RECEIVE: &'static str = "RECEIVE_ACTIVITIES";
    pub const RESET_NOTIFICATIONS: &'static str = "RESET_NOTIFICATIONS";
    pub const SEE_MORE_ACTIVITY: &'static str = "SEE_MORE_ACTIVITY";
    pub const SEE_MORE_NOTIFICATIONS: &'static str = "SEE_MORE_NOTIFICATIONS";
    pub const PAGE_VIEWED: &'static str = "ACTIVITY_PAGE_VIEWED";

    pub fn kind(&self) -> &'static str {
        match self {
            ActivityAction::Resource(ResourceAction::Request { .. }) => Self::REQUEST,
            ActivityAction::Resource(ResourceAction::RequestMore { .. }) => Self::REQUEST_MORE,
            ActivityAction::Resource(ResourceAction::Receive { .. }) => Self::RECEIVE,
            ActivityAction::Resource(ResourceAction::Reset) => Self::RESET_NOTIFICATIONS,
            ActivityAction::SeeMoreActivity { .. } => Self::SEE_MORE_ACTIVITY,
            ActivityAction::SeeMoreNotifications { .. } => Self::SEE_MORE_NOTIFICATIONS,
            ActivityAction::PageViewed => Self::PAGE_VIEWED,
        }
    }
}

impl From<ResourceAction<Case, Notification>> for ActivityAction {
    fn from(action: ResourceAction<Case, Notification>) -> Self {
        ActivityAction::Resource(action)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityState {
    #[serde(flatten)]
    pub resource: ResourceState<Case, Notification>,
    pub show_more_activities: bool,
    pub show_more_notifications: bool,
}

impl ActivityState {
    pub fn cases(&self) -> &[Case] {
        &self.resource.items
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.resource.derived
    }
}

impl SliceState for ActivityState {}

pub struct ActivityReducer;

impl Reducer for ActivityReducer {
    type State = ActivityState;

    fn reduce(state: Self::State, action: &Action) -> Self::State {
        let Action::Activity(action) = action else {
            return state;
        };

        match action {
            ActivityAction::Resource(lifecycle) => ActivityState {
                resource: resource::reduce(state.resource, lifecycle),
                ..state
            },
            ActivityAction::SeeMoreActivity { show } => ActivityState {
                show_more_activities: *show,
                ..state
            },
            ActivityAction::SeeMoreNotifications { show } => ActivityState {
                show_more_notifications: *show,
                ..state
            },
            ActivityAction::PageViewed => state,
        }
    }
}
