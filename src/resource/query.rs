use reqwest::Url;

use super::cursor::Cursor;

/// Query parameter carrying the pagination cursor.
pub const BOOKMARK_PARAM: &str = "bookmark";

/// Pagination parameters appended to a resource URL.
///
/// Without a cursor the first page is requested. The optional scope narrows
/// the resource (e.g. to one device) and is sent alongside the cursor.
#[derive(Debug, Clone, Default)]
pub struct PageQuery<'a> {
    pub cursor: Option<&'a Cursor>,
    pub scope: Option<(&'a str, &'a str)>,
}

impl<'a> PageQuery<'a> {
    pub fn first_page() -> Self {
        Self::default()
    }

    pub fn after(cursor: Option<&'a Cursor>) -> Self {
        Self {
            cursor,
            scope: None,
        }
    }

    /// Add a scoping parameter; empty values are ignored.
    pub fn scoped(mut self, param: &'a str, value: Option<&'a str>) -> Self {
        self.scope = value.filter(|v| !v.is_empty()).map(|v| (param, v));
        self
    }

    pub fn apply(&self, base: &Url) -> Url {
        let mut url = base.clone();
        if self.cursor.is_none() && self.scope.is_none() {
            return url;
        }
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(cursor) = self.cursor {
                pairs.append_pair(BOOKMARK_PARAM, cursor.as_str());
            }
            if let Some((param, value)) = self.scope {
                pairs.append_pair(param, value);
            }
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://portal.test/api/v1/activity/history").unwrap()
    }

    #[test]
    fn first_page_has_no_bookmark() {
        let url = PageQuery::first_page().apply(&base());
        assert_eq!(url.query(), None);
    }

    #[test]
    fn cursor_and_scope_are_appended() {
        let cursor = Cursor::from_server("tok 1");
        let url = PageQuery::after(Some(&cursor))
            .scoped("serialNumberKey", Some("ABC"))
            .apply(&base());
        assert_eq!(url.query(), Some("bookmark=tok+1&serialNumberKey=ABC"));
    }

    #[test]
    fn empty_scope_is_ignored() {
        let url = PageQuery::first_page()
            .scoped("serialNumberKey", Some(""))
            .apply(&base());
        assert_eq!(url.query(), None);
    }
}
