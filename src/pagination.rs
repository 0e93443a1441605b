// src/pagination.rs
//! Fixed page-size, slice-based pagination

/// Page sizes used by each list screen
pub mod page_size {
    pub const RECRUITER_JOBS: usize = 5;
    pub const APPLICANTS: usize = 7;
    pub const ADMIN_JOBS: usize = 5;
    pub const ADMIN_USERS: usize = 5;
    pub const SEEKER_APPLICATIONS: usize = 7;
    pub const SEEKER_JOB_BOARD: usize = 4;
}

/// 1-based page cursor over a list of known length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    per_page: usize,
    current: usize,
}

impl Paginator {
    pub fn new(per_page: usize) -> Self {
        Self {
            per_page: per_page.max(1),
            current: 1,
        }
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.per_page)
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.current - 1) * self.per_page;
        if start >= items.len() {
            return &[];
        }
        let end = (start + self.per_page).min(items.len());
        &items[start..end]
    }

    /// Jump to `page`; out-of-range requests are ignored
    pub fn go_to(&mut self, page: usize, len: usize) -> bool {
        if page >= 1 && page <= self.total_pages(len) {
            self.current = page;
            true
        } else {
            false
        }
    }

    pub fn next(&mut self, len: usize) -> bool {
        if self.current < self.total_pages(len) {
            self.current += 1;
            true
        } else {
            false
        }
    }

    pub fn prev(&mut self) -> bool {
        if self.current > 1 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    /// Pull the cursor back onto the last page after the list shrank
    pub fn clamp(&mut self, len: usize) {
        let total = self.total_pages(len);
        if self.current > total && total > 0 {
            self.current = total;
        }
    }

    pub fn reset(&mut self) {
        self.current = 1;
    }

    pub fn has_prev(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self, len: usize) -> bool {
        self.current < self.total_pages(len)
    }
}
