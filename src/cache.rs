//! Keyed in-memory cache of task-board reads.
//!
//! The service owns the data; we only remember what we last fetched per
//! (group, list, date) so the board can render instantly. Creating a task
//! invalidates the whole family of task reads, mirroring the service's
//! "anything under tasks may have changed" contract, and the next view of a
//! stale key refetches.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::dto::Task;

/// Identifies one cached board read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskKey {
    pub group_id: String,
    pub task_list_id: u64,
    pub date: NaiveDate,
}

#[derive(Debug)]
struct Entry {
    tasks: Vec<Task>,
    stale: bool,
}

/// Cache of task reads with whole-family invalidation.
#[derive(Debug, Default)]
pub struct TaskCache {
    entries: HashMap<TaskKey, Entry>,
    invalidations: u64,
}

impl TaskCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh tasks for a key, if present and not invalidated since.
    pub fn get(&self, key: &TaskKey) -> Option<&[Task]> {
        self.entries
            .get(key)
            .filter(|e| !e.stale)
            .map(|e| e.tasks.as_slice())
    }

    /// Store a completed fetch, clearing any stale mark for the key.
    pub fn insert(&mut self, key: TaskKey, tasks: Vec<Task>) {
        self.entries.insert(key, Entry { tasks, stale: false });
    }

    /// Mark every cached task read stale. Entries are kept so a board can
    /// keep showing the old data while its refetch is in flight.
    pub fn invalidate_all(&mut self) {
        for entry in self.entries.values_mut() {
            entry.stale = true;
        }
        self.invalidations += 1;
    }

    /// Whether a key needs a (re)fetch before it can be trusted.
    pub fn needs_fetch(&self, key: &TaskKey) -> bool {
        self.get(key).is_none()
    }

    /// Last data for a key regardless of staleness.
    pub fn get_even_stale(&self, key: &TaskKey) -> Option<&[Task]> {
        self.entries.get(key).map(|e| e.tasks.as_slice())
    }

    /// How many invalidations have happened.
    pub fn invalidation_count(&self) -> u64 {
        self.invalidations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(date: &str) -> TaskKey {
        TaskKey {
            group_id: "3".to_string(),
            task_list_id: 7,
            date: date.parse().unwrap(),
        }
    }

    fn task(id: u64) -> Task {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": "t",
            "description": "d",
            "commentCount": 0,
            "frequency": "DAILY",
            "checked": false,
            "date": null
        }))
        .unwrap()
    }

    #[test]
    fn fresh_insert_is_served() {
        let mut cache = TaskCache::new();
        let k = key("2026-08-06");
        assert!(cache.needs_fetch(&k));
        cache.insert(k.clone(), vec![task(1)]);
        assert_eq!(cache.get(&k).unwrap().len(), 1);
        assert!(!cache.needs_fetch(&k));
    }

    #[test]
    fn invalidation_marks_every_key_stale_once() {
        let mut cache = TaskCache::new();
        let a = key("2026-08-06");
        let b = key("2026-08-07");
        cache.insert(a.clone(), vec![task(1)]);
        cache.insert(b.clone(), vec![task(2)]);

        cache.invalidate_all();
        assert_eq!(cache.invalidation_count(), 1);
        assert!(cache.get(&a).is_none());
        assert!(cache.get(&b).is_none());
        assert!(cache.needs_fetch(&a));
        // The old data stays visible while a refetch runs.
        assert_eq!(cache.get_even_stale(&a).unwrap()[0].id, 1);
    }

    #[test]
    fn refetch_clears_stale_mark() {
        let mut cache = TaskCache::new();
        let k = key("2026-08-06");
        cache.insert(k.clone(), vec![task(1)]);
        cache.invalidate_all();
        cache.insert(k.clone(), vec![task(1), task(3)]);
        assert_eq!(cache.get(&k).unwrap().len(), 2);
        assert_eq!(cache.invalidation_count(), 1);
    }
}
