use serde::Serialize;

use super::cursor::Cursor;
use super::generation::Generation;

/// Coarse lifecycle phase, derived from the state flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Idle,
    Fetching,
    FetchingMore,
    Failed,
}

/// State of a network-backed list.
///
/// `is_fetching` and `fetching_more` are never both set. `items` grows by
/// concatenation across paginated loads and is replaced wholesale by a
/// fresh fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceState<T, D = ()> {
    pub is_fetching: bool,
    pub fetching_more: bool,
    pub items: Vec<T>,
    pub derived: Vec<D>,
    pub error: bool,
    pub cursor: Option<Cursor>,
    pub has_more: bool,
    /// Item count before the last successful receive.
    pub previous_count: usize,
    /// Set once any receive has been applied.
    pub fetch_complete: bool,
    #[serde(skip)]
    pub generation: Generation,
}

impl<T, D> Default for ResourceState<T, D> {
    fn default() -> Self {
        Self {
            is_fetching: false,
            fetching_more: false,
            items: Vec::new(),
            derived: Vec::new(),
            error: false,
            cursor: None,
            has_more: false,
            previous_count: 0,
            fetch_complete: false,
            generation: Generation::default(),
        }
    }
}

impl<T, D> ResourceState<T, D> {
    pub fn phase(&self) -> Phase {
        if self.is_fetching {
            Phase::Fetching
        } else if self.fetching_more {
            Phase::FetchingMore
        } else if self.error {
            Phase::Failed
        } else {
            Phase::Idle
        }
    }

    pub fn is_pending(&self) -> bool {
        self.is_fetching || self.fetching_more
    }

    /// Whether a request-more would be honoured right now.
    pub fn can_request_more(&self) -> bool {
        !self.is_pending() && self.has_more
    }

    /// Items added by the last successful receive, for moving focus to them.
    pub fn newly_appended(&self) -> &[T] {
        let start = self.previous_count.min(self.items.len());
        &self.items[start..]
    }
}
