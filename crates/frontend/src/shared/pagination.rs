//! Page window over a filtered list
//!
//! Two navigation policies exist side by side and are kept distinct:
//! clamping stops at the edges, wrap-around cycles past them.

/// Records per page in the TIN tables
pub const PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagePolicy {
    /// Previous/next are no-ops at the edges and the edge controls are disabled
    Clamp,
    /// Next after the last page goes to page 1, previous before page 1 goes to the last
    WrapAround,
}

/// `ceil(count / page_size)`; 0 when there is nothing to show
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    /// 1-based
    page: usize,
    page_size: usize,
    policy: PagePolicy,
}

impl Paginator {
    pub fn new(policy: PagePolicy) -> Self {
        Self::with_page_size(policy, PAGE_SIZE)
    }

    pub fn with_page_size(policy: PagePolicy, page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            policy,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self, count: usize) -> usize {
        total_pages(count, self.page_size)
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    pub fn next(&mut self, count: usize) {
        let total = self.total_pages(count);
        if total == 0 {
            return;
        }
        self.page = match self.policy {
            PagePolicy::Clamp if self.page >= total => self.page,
            PagePolicy::WrapAround if self.page >= total => 1,
            _ => self.page + 1,
        };
    }

    pub fn prev(&mut self, count: usize) {
        let total = self.total_pages(count);
        if total == 0 {
            return;
        }
        self.page = match self.policy {
            PagePolicy::Clamp if self.page <= 1 => self.page,
            PagePolicy::WrapAround if self.page <= 1 => total,
            _ => self.page - 1,
        };
    }

    /// Whether the "previous" control is enabled
    pub fn can_go_prev(&self, count: usize) -> bool {
        match self.policy {
            PagePolicy::Clamp => self.page > 1,
            PagePolicy::WrapAround => self.total_pages(count) > 0,
        }
    }

    /// Whether the "next" control is enabled
    pub fn can_go_next(&self, count: usize) -> bool {
        match self.policy {
            PagePolicy::Clamp => self.page < self.total_pages(count),
            PagePolicy::WrapAround => self.total_pages(count) > 0,
        }
    }

    /// Records `[(page-1)*size, page*size)` of `items`
    pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.page - 1).saturating_mul(self.page_size);
        if start >= items.len() {
            return &[];
        }
        let end = (start + self.page_size).min(items.len());
        &items[start..end]
    }
}
