use super::generation::Generation;
use super::page::{Page, Received};

/// The fixed action shapes of the resource lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceAction<T, D = ()> {
    /// Start a fresh fetch; its result replaces the items.
    Request { generation: Generation },
    /// Start fetching the next page; only honoured while `has_more` is set.
    RequestMore { generation: Generation },
    /// A fetch finished, successfully or not.
    Receive {
        generation: Generation,
        append: bool,
        received: Received<T, D>,
    },
    /// Clear derived records without touching fetch status.
    Reset,
}

impl<T, D> ResourceAction<T, D> {
    pub fn receive_page(generation: Generation, append: bool, page: Page<T, D>) -> Self {
        ResourceAction::Receive {
            generation,
            append,
            received: Received::Page(page),
        }
    }

    pub fn receive_failure(generation: Generation, append: bool) -> Self {
        ResourceAction::Receive {
            generation,
            append,
            received: Received::Failed,
        }
    }
}
