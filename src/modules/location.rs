//! Current-location slice, updated on every committed navigation.

use reqwest::Url;
use serde::Serialize;
use uuid::Uuid;

use crate::store::{Action, Reducer, SliceState};

pub const SLICE_KEY: &str = "location";

/// Origin the in-app paths are resolved against; only path, query and
/// fragment are ever read back.
const ORIGIN: &str = "http://portal.invalid/";

/// A committed browser location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub pathname: String,
    /// Query string including the leading `?`, or empty. Kept encoded.
    pub search: String,
    /// Fragment including the leading `#`, or empty.
    pub hash: String,
    /// Unique per navigation, so revisiting a path is still a change.
    pub key: Uuid,
}

impl Location {
    /// Resolve `path` into pathname, search and hash and give it a fresh key.
    pub fn parse(path: &str) -> Self {
        let resolved = Url::parse(ORIGIN).and_then(|origin| origin.join(path));
        let (pathname, search, hash) = match resolved {
            Ok(url) => (
                url.path().to_string(),
                url.query().map(|q| format!("?{q}")).unwrap_or_default(),
                url.fragment().map(|f| format!("#{f}")).unwrap_or_default(),
            ),
            Err(err) => {
                tracing::debug!(path, error = %err, "Unresolvable path, keeping it verbatim");
                (path.to_string(), String::new(), String::new())
            }
        };
        Self {
            pathname,
            search,
            hash,
            key: Uuid::new_v4(),
        }
    }

    /// Decoded value of a query parameter, if present.
    pub fn query_param(&self, name: &str) -> Option<String> {
        let query = self.search.strip_prefix('?')?;
        let mut url = Url::parse(ORIGIN).ok()?;
        url.set_query(Some(query));
        url.query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationAction {
    Changed(Location),
}

impl LocationAction {
    pub const CHANGED: &'static str = "LOCATION_CHANGE";

    pub fn kind(&self) -> &'static str {
        match self {
            LocationAction::Changed(_) => Self::CHANGED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationState {
    pub pathname: String,
    pub search: String,
    pub hash: String,
    pub key: Option<Uuid>,
}

impl Default for LocationState {
    fn default() -> Self {
        Self {
            pathname: "/".to_string(),
            search: String::new(),
            hash: String::new(),
            key: None,
        }
    }
}

impl SliceState for LocationState {}

pub struct LocationReducer;

impl Reducer for LocationReducer {
    type State = LocationState;

    fn reduce(state: Self::State, action: &Action) -> Self::State {
        match action {
            Action::Location(LocationAction::Changed(location)) => LocationState {
                pathname: location.pathname.clone(),
                search: location.search.clone(),
                hash: location.hash.clone(),
                key: Some(location.key),
            },
            _ => state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_search() {
        let location = Location::parse("/activity?serialNumberKey=ABC&x");
        assert_eq!(location.pathname, "/activity");
        assert_eq!(location.search, "?serialNumberKey=ABC&x");
        assert_eq!(location.hash, "");
        assert_eq!(location.query_param("serialNumberKey").as_deref(), Some("ABC"));
        assert_eq!(location.query_param("x").as_deref(), Some(""));
        assert_eq!(location.query_param("y"), None);
    }

    #[test]
    fn query_values_are_decoded() {
        let location = Location::parse("/activity?serialNumberKey=SN%2F7+a%26b");
        assert_eq!(location.search, "?serialNumberKey=SN%2F7+a%26b");
        assert_eq!(
            location.query_param("serialNumberKey").as_deref(),
            Some("SN/7 a&b")
        );
    }

    #[test]
    fn fragment_is_split_off() {
        let location = Location::parse("/repairs/shippingLabel/dispatchId/D1?x=1#print");
        assert_eq!(location.pathname, "/repairs/shippingLabel/dispatchId/D1");
        assert_eq!(location.search, "?x=1");
        assert_eq!(location.hash, "#print");
    }

    #[test]
    fn empty_path_is_root() {
        let location = Location::parse("");
        assert_eq!(location.pathname, "/");
        assert_eq!(location.search, "");
    }

    #[test]
    fn each_parse_gets_a_new_key() {
        assert_ne!(Location::parse("/a").key, Location::parse("/a").key);
    }

    #[test]
    fn change_updates_state() {
        let location = Location::parse("/activity");
        let state = LocationReducer::reduce(
            LocationState::default(),
            &LocationAction::Changed(location.clone()).into(),
        );
        assert_eq!(state.pathname, "/activity");
        assert_eq!(state.key, Some(location.key));
    }
}
