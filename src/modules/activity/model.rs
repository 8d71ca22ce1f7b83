use serde::{Deserialize, Serialize};

use crate::resource::{Cursor, Page};

/// One support case as returned by the activity endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Case {
    pub id: String,
    pub title: String,
    pub status: String,
    pub updated_at: Option<String>,
    /// Message shown as a notification while the case needs attention.
    pub notification: Option<String>,
}

/// A notification derived from a case carrying a notification message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub case_id: String,
    pub message: String,
}

impl Notification {
    pub fn from_cases(cases: &[Case]) -> Vec<Notification> {
        cases
            .iter()
            .filter_map(|case| {
                let message = case.notification.as_deref()?.trim();
                (!message.is_empty()).then(|| Notification {
                    case_id: case.id.clone(),
                    message: message.to_string(),
                })
            })
            .collect()
    }
}

/// Response body of the activity endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActivityPayload {
    pub cases: Vec<Case>,
    pub bookmark: Option<Cursor>,
    pub more_records: bool,
}

impl ActivityPayload {
    pub fn into_page(self) -> Page<Case, Notification> {
        let notifications = Notification::from_cases(&self.cases);
        Page::new(self.cases)
            .with_derived(notifications)
            .with_cursor(self.bookmark, self.more_records)
    }
}
