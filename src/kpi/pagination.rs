use serde::{Deserialize, Serialize};

/// Offset/limit window over a fully computed result list.
///
/// A `limit` of 0 means "no limit".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub offset: usize,
    pub limit: usize,
}

impl Page {
    #[must_use]
    pub const fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }
}

/// Applies `page` to `values`. An offset past the end yields an empty list.
#[must_use]
pub fn paginate<T>(values: Vec<T>, page: Page) -> Vec<T> {
    if page.offset > values.len() {
        tracing::debug!(
            "Offset {} is past the end of {} results",
            page.offset,
            values.len()
        );
        return Vec::new();
    }

    let limit = if page.limit == 0 {
        usize::MAX
    } else {
        page.limit
    };
    values.into_iter().skip(page.offset).take(limit).collect()
}
