use super::cursor::Cursor;

/// One page of results as delivered by the server.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T, D = ()> {
    pub items: Vec<T>,
    /// Records derived from `items` (e.g. notifications), kept in step with them.
    pub derived: Vec<D>,
    pub cursor: Option<Cursor>,
    pub has_more: bool,
}

impl<T, D> Page<T, D> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            derived: Vec::new(),
            cursor: None,
            has_more: false,
        }
    }

    pub fn with_derived(mut self, derived: Vec<D>) -> Self {
        self.derived = derived;
        self
    }

    pub fn with_cursor(mut self, cursor: Option<Cursor>, has_more: bool) -> Self {
        self.cursor = cursor;
        self.has_more = has_more;
        self
    }
}

/// Result of a fetch as seen by the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Received<T, D = ()> {
    Page(Page<T, D>),
    Failed,
}
