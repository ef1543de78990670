use serde::Serialize;

/// Offset window over a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub skip: u64,
    pub limit: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { skip: 0, limit: 20 }
    }
}

impl PageRequest {
    pub fn new(skip: u64, limit: u64) -> Self {
        Self { skip, limit }
    }

    /// 1-based page number of this window.
    pub fn page(&self) -> u64 {
        self.skip / self.limit.max(1) + 1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
}

impl<T> PageResult<T> {
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            skip: request.skip,
            limit: request.limit,
        }
    }

    pub fn page(&self) -> u64 {
        PageRequest::new(self.skip, self.limit).page()
    }

    pub fn total_pages(&self) -> u64 {
        if self.limit == 0 {
            return 0;
        }
        self.total.div_ceil(self.limit)
    }

    pub fn has_next(&self) -> bool {
        self.page() < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.page() > 1
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            skip: self.skip,
            limit: self.limit,
        }
    }
}
