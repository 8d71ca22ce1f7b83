//! State transitions of the resource lifecycle.

use super::action::ResourceAction;
use super::page::Received;
use super::state::ResourceState;

/// Apply one lifecycle action.
///
/// Pure: out-of-order or illegal actions leave the state untouched rather
/// than failing.
pub fn reduce<T: Clone, D: Clone>(
    state: ResourceState<T, D>,
    action: &ResourceAction<T, D>,
) -> ResourceState<T, D> {
    match action {
        ResourceAction::Request { generation } => {
            if *generation <= state.generation {
                tracing::debug!(%generation, current = %state.generation, "Ignoring stale request");
                return state;
            }
            ResourceState {
                is_fetching: true,
                fetching_more: false,
                generation: *generation,
                ..state
            }
        }

        ResourceAction::RequestMore { generation } => {
            if *generation <= state.generation || !state.can_request_more() {
                tracing::debug!(
                    %generation,
                    phase = ?state.phase(),
                    has_more = state.has_more,
                    "Ignoring request-more"
                );
                return state;
            }
            ResourceState {
                fetching_more: true,
                generation: *generation,
                ..state
            }
        }

        ResourceAction::Receive {
            generation,
            append,
            received,
        } => {
            let expected = if *append {
                state.fetching_more
            } else {
                state.is_fetching
            };
            if *generation != state.generation || !expected {
                tracing::debug!(
                    %generation,
                    current = %state.generation,
                    append,
                    "Ignoring superseded receive"
                );
                return state;
            }

            match received {
                Received::Page(page) => {
                    let previous_count = state.items.len();
                    let (items, derived) = if *append {
                        let mut items = state.items;
                        items.extend(page.items.iter().cloned());
                        let mut derived = state.derived;
                        derived.extend(page.derived.iter().cloned());
                        (items, derived)
                    } else {
                        (page.items.clone(), page.derived.clone())
                    };

                    ResourceState {
                        is_fetching: false,
                        fetching_more: false,
                        items,
                        derived,
                        error: false,
                        cursor: page.cursor.clone(),
                        has_more: page.has_more,
                        previous_count,
                        fetch_complete: true,
                        generation: state.generation,
                    }
                }
                Received::Failed if *append => ResourceState {
                    fetching_more: false,
                    error: true,
                    has_more: true,
                    fetch_complete: true,
                    ..state
                },
                Received::Failed => ResourceState {
                    is_fetching: false,
                    error: true,
                    cursor: None,
                    has_more: false,
                    fetch_complete: true,
                    ..state
                },
            }
        }

        ResourceAction::Reset => ResourceState {
            derived: Vec::new(),
            ..state
        },
    }
}
