//! Lifecycle of list data fetched over the network.
//!
//! A resource moves between four phases:
//!
//! ```text
//!            request                 receive(page, replace)
//!   Idle ─────────────→ Fetching ─────────────────────────→ Idle
//!    │                     └── receive(failure) ──────────→ Failed
//!    │ request-more (has_more)
//!    └────────────────→ FetchingMore ── receive(page, append) → Idle
//!                           └── receive(failure, append) ───→ Failed (has_more kept)
//! ```
//!
//! Every request carries a [`Generation`]; a receive whose generation is
//! not the resource's current one is ignored, so superseded responses can
//! never overwrite newer data.

mod action;
mod cursor;
mod generation;
mod page;
mod paged;
mod query;
mod reducer;
mod state;

pub use action::ResourceAction;
pub use cursor::Cursor;
pub use generation::{Generation, GenerationCounter};
pub use page::{Page, Received};
pub use paged::{fetch_first_page, fetch_next_page, PagedResource};
pub(crate) use paged::{dispatch_logged, runtime_for};
pub use query::PageQuery;
pub use reducer::reduce;
pub use state::{Phase, ResourceState};
