//! # Lists & Tables
//!
//! [`TablePresenter`] turns one [`Page`] into a [`TableModel`]. It never
//! fetches: query edits become a new [`ListQuery`] through
//! [`ListQuery::apply`], and the owning view hands that to its data source.

use crate::error::ViewError;
use std::fmt::Debug;

pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Paging and filtering of a list request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListQuery {
    pub offset: usize,
    pub limit: usize,
    pub filter_text: String,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_PAGE_SIZE,
            filter_text: String::new(),
        }
    }
}

/// A user edit of the list controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryEdit {
    Filter(String),
    /// Zero-based page index.
    Page(usize),
    PageSize(usize),
    Next,
    Previous,
}

impl ListQuery {
    pub fn new(limit: usize) -> Result<Self, ViewError> {
        if limit == 0 {
            return Err(ViewError::Validation("page size must be positive".into()));
        }
        Ok(Self {
            limit,
            ..Self::default()
        })
    }

    pub fn with_filter(mut self, filter_text: impl Into<String>) -> Self {
        self.filter_text = filter_text.into();
        self
    }

    /// The query after `edit`, or `None` when nothing would change.
    ///
    /// `total` is the item count of the current result and bounds `Next`.
    pub fn apply(&self, edit: &QueryEdit, total: usize) -> Option<ListQuery> {
        let mut next = self.clone();
        match edit {
            QueryEdit::Filter(text) => {
                next.filter_text = text.clone();
                next.offset = 0;
            }
            QueryEdit::Page(index) => {
                next.offset = index.saturating_mul(self.limit);
            }
            QueryEdit::PageSize(limit) => {
                if *limit == 0 {
                    return None;
                }
                next.limit = *limit;
                next.offset = 0;
            }
            QueryEdit::Next => {
                if self.offset + self.limit < total {
                    next.offset = self.offset + self.limit;
                }
            }
            QueryEdit::Previous => {
                next.offset = self.offset.saturating_sub(self.limit);
            }
        }
        (next != *self).then_some(next)
    }

    /// Zero-based index of the page this query points at.
    pub fn page_index(&self) -> usize {
        self.offset / self.limit.max(1)
    }
}

/// One page of a list result.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    items: Vec<T>,
    total: usize,
}

impl<T> Page<T> {
    /// `total` is raised to `items.len()` if a server reports less.
    pub fn new(items: Vec<T>, total: usize) -> Self {
        let total = total.max(items.len());
        Self { items, total }
    }

    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

/// A table header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub key: &'static str,
    pub label: String,
    pub width: Option<&'static str>,
}

impl Column {
    pub fn new(key: &'static str, label: impl Into<String>) -> Self {
        Self {
            key,
            label: label.into(),
            width: None,
        }
    }

    pub fn width(mut self, width: &'static str) -> Self {
        self.width = Some(width);
        self
    }
}

/// Per-screen knowledge of how an item becomes a row.
pub trait RowRenderer<T>: Send + Sync {
    type Row: Clone + Debug + PartialEq + Send + 'static;

    fn columns(&self) -> Vec<Column>;

    fn render_row(&self, item: &T) -> Self::Row;
}

/// Everything a table widget needs to draw one page.
#[derive(Debug, Clone, PartialEq)]
pub struct TableModel<R> {
    pub columns: Vec<Column>,
    pub rows: Vec<R>,
    pub total: usize,
    pub query: ListQuery,
    /// Zero-based.
    pub current_page: usize,
    pub page_count: usize,
}

impl<R> TableModel<R> {
    pub fn has_next(&self) -> bool {
        self.current_page + 1 < self.page_count
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 0
    }
}

pub struct TablePresenter<R> {
    renderer: R,
}

impl<R> TablePresenter<R> {
    pub fn new(renderer: R) -> Self {
        Self { renderer }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn render<T>(&self, page: &Page<T>, query: &ListQuery) -> TableModel<R::Row>
    where
        R: RowRenderer<T>,
    {
        let limit = query.limit.max(1);
        TableModel {
            columns: self.renderer.columns(),
            rows: page
                .items()
                .iter()
                .map(|item| self.renderer.render_row(item))
                .collect(),
            total: page.total(),
            query: query.clone(),
            current_page: query.page_index(),
            page_count: page.total().div_ceil(limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NameRenderer;

    impl RowRenderer<&'static str> for NameRenderer {
        type Row = String;

        fn columns(&self) -> Vec<Column> {
            vec![Column::new("name", "Name").width("100%")]
        }

        fn render_row(&self, item: &&'static str) -> String {
            item.to_uppercase()
        }
    }

    #[test]
    fn test_render_page() {
        let presenter = TablePresenter::new(NameRenderer);
        let page = Page::new(vec!["abc", "xyz"], 2);
        let model = presenter.render(&page, &ListQuery::default());

        assert_eq!(model.columns[0].label, "Name");
        assert_eq!(model.rows, vec!["ABC".to_string(), "XYZ".to_string()]);
        assert_eq!(model.total, 2);
        assert_eq!(model.current_page, 0);
        assert_eq!(model.page_count, 1);
        assert!(!model.has_next());
    }

    #[test]
    fn test_filter_resets_offset() {
        let query = ListQuery {
            offset: 50,
            ..ListQuery::default()
        };
        let next = query.apply(&QueryEdit::Filter("abc".into()), 100).unwrap();
        assert_eq!(next.offset, 0);
        assert_eq!(next.filter_text, "abc");

        // Same filter on page 0 changes nothing
        assert!(next.apply(&QueryEdit::Filter("abc".into()), 1).is_none());
    }

    #[test]
    fn test_paging_edits() {
        let query = ListQuery::new(10).unwrap();
        let next = query.apply(&QueryEdit::Next, 25).unwrap();
        assert_eq!(next.offset, 10);
        let last = next.apply(&QueryEdit::Page(2), 25).unwrap();
        assert_eq!(last.offset, 20);
        assert!(last.apply(&QueryEdit::Next, 25).is_none());
        assert_eq!(last.apply(&QueryEdit::Previous, 25).unwrap().offset, 10);
        assert!(query.apply(&QueryEdit::Previous, 25).is_none());
        assert!(query.apply(&QueryEdit::PageSize(0), 25).is_none());
        assert!(ListQuery::new(0).is_err());
    }

    #[test]
    fn test_page_total_never_below_items() {
        let page = Page::new(vec![1, 2, 3], 1);
        assert_eq!(page.total(), 3);
    }
}
