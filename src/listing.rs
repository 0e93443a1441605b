// src/listing.rs
//! In-memory list views with optimistic updates after delete/edit

use crate::pagination::Paginator;
use crate::types::{Application, Job, Record};

#[derive(Debug, Clone)]
pub struct ListView<T> {
    items: Vec<T>,
    pager: Paginator,
}

impl<T: Record> ListView<T> {
    pub fn new(per_page: usize) -> Self {
        Self {
            items: Vec::new(),
            pager: Paginator::new(per_page),
        }
    }

    pub fn with_items(per_page: usize, items: Vec<T>) -> Self {
        let mut view = Self::new(per_page);
        view.load(items);
        view
    }

    /// Replace the contents after a (re)load; always back to page 1
    pub fn load(&mut self, items: Vec<T>) {
        self.items = items;
        self.pager.reset();
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn page(&self) -> &[T] {
        self.pager.slice(&self.items)
    }

    pub fn current_page(&self) -> usize {
        self.pager.current()
    }

    pub fn total_pages(&self) -> usize {
        self.pager.total_pages(self.items.len())
    }

    pub fn go_to(&mut self, page: usize) -> bool {
        self.pager.go_to(page, self.items.len())
    }

    pub fn next(&mut self) -> bool {
        self.pager.next(self.items.len())
    }

    pub fn prev(&mut self) -> bool {
        self.pager.prev()
    }

    pub fn find(&self, id: i64) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Drop a record the server just deleted and keep the cursor on a real page
    pub fn remove(&mut self, id: i64) -> Option<T> {
        let pos = self.items.iter().position(|item| item.id() == id)?;
        let removed = self.items.remove(pos);
        self.pager.clamp(self.items.len());
        Some(removed)
    }

    /// Swap in the server's copy of an updated record
    pub fn replace(&mut self, id: i64, item: T) -> bool {
        match self.items.iter_mut().find(|existing| existing.id() == id) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    pub fn update<F>(&mut self, id: i64, f: F) -> bool
    where
        F: FnOnce(&mut T),
    {
        match self.items.iter_mut().find(|existing| existing.id() == id) {
            Some(slot) => {
                f(slot);
                true
            }
            None => false,
        }
    }
}

/// Admin tables: highest id first
pub fn newest_id_first<T: Record>(items: &mut [T]) {
    items.sort_by_key(|item| std::cmp::Reverse(item.id()));
}

/// Recruiter applicant table: applied date, else creation time, newest first; undated last
pub fn newest_submitted_first(items: &mut [Application]) {
    items.sort_by(|a, b| b.submitted_at().cmp(&a.submitted_at()));
}

/// Seeker history: applied date newest first; undated last
pub fn newest_applied_first(items: &mut [Application]) {
    items.sort_by(|a, b| b.applied_at().cmp(&a.applied_at()));
}

/// Jobs shown on the public board
pub fn public_board(jobs: Vec<Job>) -> Vec<Job> {
    jobs.into_iter().filter(Job::is_listed_publicly).collect()
}

/// Jobs shown on the seeker board
pub fn seeker_board(jobs: Vec<Job>) -> Vec<Job> {
    jobs.into_iter().filter(Job::is_open).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::page_size;
    use crate::types::ApplicationStatus;

    fn job(id: i64, active: Option<bool>) -> Job {
        Job {
            id,
            active,
            ..Job::default()
        }
    }

    fn app(id: i64, applied: Option<&str>, created: Option<&str>) -> Application {
        Application {
            id,
            applied_date: applied.map(str::to_string),
            created_at: created.map(str::to_string),
            ..Application::default()
        }
    }

    #[test]
    fn test_remove_last_item_on_last_page_moves_back() {
        let jobs: Vec<Job> = (1..=6).map(|id| job(id, Some(true))).collect();
        let mut view = ListView::with_items(page_size::ADMIN_JOBS, jobs);
        assert!(view.go_to(2));
        assert_eq!(view.page().len(), 1);

        let removed = view.remove(6).unwrap();
        assert_eq!(removed.id, 6);
        assert_eq!(view.current_page(), 1);
        assert_eq!(view.page().len(), 5);
        assert!(view.remove(42).is_none());
    }

    #[test]
    fn test_replace_and_update() {
        let mut view = ListView::with_items(page_size::APPLICANTS, vec![app(1, None, None)]);
        assert!(view.update(1, |a| a.status = Some(ApplicationStatus::Shortlisted)));
        assert_eq!(view.find(1).unwrap().status(), ApplicationStatus::Shortlisted);
        assert!(!view.update(2, |_| {}));

        let mut jobs = ListView::with_items(page_size::RECRUITER_JOBS, vec![job(3, Some(true))]);
        assert!(jobs.replace(3, job(3, Some(false))));
        assert_eq!(jobs.items()[0].active, Some(false));
        assert_eq!(jobs.find(3).and_then(|j| j.active), Some(false));
        assert!(!jobs.replace(4, job(4, None)));
    }

    #[test]
    fn test_reload_resets_page() {
        let mut view = ListView::with_items(2, (1..=5).map(|id| job(id, None)).collect());
        assert!(view.go_to(3));
        view.load((1..=5).map(|id| job(id, None)).collect());
        assert_eq!(view.current_page(), 1);
    }

    #[test]
    fn test_sort_orders() {
        let mut jobs = vec![job(2, None), job(9, None), job(5, None)];
        newest_id_first(&mut jobs);
        let ids: Vec<i64> = jobs.iter().map(|j| j.id).collect();
        assert_eq!(ids, vec![9, 5, 2]);

        let mut apps = vec![
            app(1, None, None),
            app(2, Some("2024-02-01T10:00:00"), None),
            app(3, None, Some("2024-03-01T10:00:00")),
        ];
        newest_submitted_first(&mut apps);
        let ids: Vec<i64> = apps.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);

        newest_applied_first(&mut apps);
        let ids: Vec<i64> = apps.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_board_filters() {
        let jobs = vec![job(1, Some(true)), job(2, None), job(3, Some(false))];
        let public: Vec<i64> = public_board(jobs.clone()).iter().map(|j| j.id).collect();
        let seeker: Vec<i64> = seeker_board(jobs).iter().map(|j| j.id).collect();
        assert_eq!(public, vec![1]);
        assert_eq!(seeker, vec![1, 2]);
    }
}
