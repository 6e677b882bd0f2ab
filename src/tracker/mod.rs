//! Task checklist state
//!
//! Predefined tasks come from the [`TaskCatalog`]; custom tasks and progress
//! come from the vault. Reads merge the three. Every mutation is written back
//! before the in-memory copy changes, so a failed save leaves both untouched.

pub mod models;

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::catalog::TaskCatalog;
use crate::clock::Clock;
use crate::error::{Result, TaskError};
use crate::vault::{Bucket, StateVault};

pub use models::{
    Cadence, CustomTasks, Expansion, NewTask, SavedProgress, Task, TaskLists, TaskState,
};

const CUSTOM_TASK_ICON: &str = "mdi-checkbox-marked-outline";

/// Replacement progress for one task
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    pub completed: bool,
    pub current_count: Option<u32>,
    pub notes: Option<String>,
}

/// What `delete_task` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deletion {
    /// A custom task was removed along with its progress
    Removed,
    /// A predefined task was flagged as deleted
    Hidden,
}

pub struct Tracker {
    vault: Arc<StateVault>,
    catalog: TaskCatalog,
    clock: Arc<dyn Clock>,
    progress: Option<SavedProgress>,
    custom: Option<CustomTasks>,
}

impl Tracker {
    /// Load saved progress and custom tasks from the vault
    pub fn load(vault: Arc<StateVault>, catalog: TaskCatalog, clock: Arc<dyn Clock>) -> Result<Self> {
        let progress = vault.load::<SavedProgress>()?;
        let custom = vault.load::<CustomTasks>()?;
        log::debug!(
            "Loaded {} task states and {} custom expansions",
            progress.as_ref().map_or(0, |p| p.0.len()),
            custom.as_ref().map_or(0, |c| c.0.len())
        );

        Ok(Self {
            vault,
            catalog,
            clock,
            progress,
            custom,
        })
    }

    /// Catalog expansions with custom tasks appended after the predefined ones
    pub fn expansions(&self) -> BTreeMap<String, Expansion> {
        let mut merged = self.catalog.expansions().clone();

        for (key, lists) in self.custom.iter().flat_map(|c| &c.0) {
            let expansion = merged.entry(key.clone()).or_insert_with(|| Expansion {
                name: key.clone(),
                tasks: TaskLists::default(),
            });
            expansion.tasks.daily.extend(lists.daily.iter().cloned());
            expansion.tasks.weekly.extend(lists.weekly.iter().cloned());
        }
        merged
    }

    /// Tasks of one list with saved progress applied. Deleted tasks are hidden.
    pub fn tasks_with_progress(&self, expansion: &str, cadence: Cadence) -> Vec<Task> {
        let merged = self.expansions();
        let Some(tasks) = merged.get(expansion).map(|e| e.tasks.list(cadence)) else {
            return Vec::new();
        };

        tasks
            .iter()
            .filter_map(|task| match self.state(&task.id) {
                Some(state) if state.is_deleted() => None,
                Some(state) => Some(task.clone().with_state(state)),
                None => Some(task.clone()),
            })
            .collect()
    }

    /// A visible task by id, with progress applied
    pub fn find_task(&self, task_id: &str) -> Option<Task> {
        self.expansions()
            .keys()
            .flat_map(|key| Cadence::ALL.map(|cadence| self.tasks_with_progress(key, cadence)))
            .flatten()
            .find(|t| t.id == task_id)
    }

    /// Replace the saved progress for `task_id`
    pub fn update_task(&mut self, task_id: &str, update: TaskUpdate) -> Result<()> {
        let mut progress = self.progress.clone().unwrap_or_default();
        progress.0.insert(
            task_id.to_string(),
            TaskState {
                completed: update.completed,
                current_count: update.current_count,
                notes: update.notes,
                deleted: None,
            },
        );
        self.commit_progress(progress)
    }

    /// Mark a task done or not done. Countable tasks keep their count
    /// consistent: done fills it to the target, undone drops it below.
    pub fn set_completed(&mut self, task_id: &str, completed: bool) -> Result<Task> {
        self.patch(task_id, |task, update| {
            update.completed = completed;
            if let Some(target) = task.target_count {
                let count = update.current_count.unwrap_or(0);
                update.current_count = Some(if completed {
                    target
                } else if count >= target {
                    target.saturating_sub(1)
                } else {
                    count
                });
            }
            Ok(())
        })
    }

    /// Set progress on a countable task. Reaching the target completes it.
    pub fn set_count(&mut self, task_id: &str, count: u32) -> Result<Task> {
        self.patch(task_id, |task, update| {
            if !task.is_countable() {
                return Err(TaskError::NotCountable(task.id.clone()).into());
            }
            let count = task.target_count.map_or(count, |target| count.min(target));
            update.current_count = Some(count);
            update.completed = task.target_count.is_some_and(|target| count >= target);
            Ok(())
        })
    }

    pub fn set_note(&mut self, task_id: &str, note: Option<String>) -> Result<Task> {
        self.patch(task_id, |_, update| {
            update.notes = note.filter(|n| !n.trim().is_empty());
            Ok(())
        })
    }

    /// Forget all progress
    pub fn reset_progress(&mut self) -> Result<()> {
        self.vault.reset(Bucket::TaskProgress)?;
        self.progress = Some(SavedProgress::default());
        Ok(())
    }

    /// Add a user-defined task, creating the expansion if needed
    pub fn add_custom_task(
        &mut self,
        expansion: &str,
        cadence: Cadence,
        new_task: NewTask,
    ) -> Result<Task> {
        let name = new_task.name.trim();
        if name.is_empty() {
            return Err(TaskError::EmptyName.into());
        }

        let countable = new_task.target_count.is_some();
        let task = Task {
            id: self.next_custom_id(),
            name: name.to_string(),
            subtitle: new_task.subtitle.unwrap_or_default(),
            kind: cadence.to_string(),
            tags: Vec::new(),
            icon: CUSTOM_TASK_ICON.to_string(),
            completed: false,
            is_countable: countable.then_some(true),
            current_count: countable.then_some(0),
            target_count: new_task.target_count,
            notes: new_task.notes.clone(),
        };

        let mut custom = self.custom.clone().unwrap_or_default();
        custom
            .0
            .entry(expansion.to_string())
            .or_default()
            .list_mut(cadence)
            .push(task.clone());

        let mut progress = self.progress.clone().unwrap_or_default();
        progress.0.insert(
            task.id.clone(),
            TaskState {
                completed: false,
                current_count: countable.then_some(0),
                notes: new_task.notes,
                deleted: None,
            },
        );

        self.commit_both(custom, progress)?;
        log::debug!("Added custom task {} to {} {}", task.id, expansion, cadence);
        Ok(task)
    }

    /// Remove a custom task, or hide a predefined one
    pub fn delete_task(&mut self, task_id: &str, expansion: &str) -> Result<Deletion> {
        let mut custom = self.custom.clone().unwrap_or_default();
        let removed = custom.0.get_mut(expansion).is_some_and(|lists| {
            let before = lists.daily.len() + lists.weekly.len();
            lists.daily.retain(|t| t.id != task_id);
            lists.weekly.retain(|t| t.id != task_id);
            lists.daily.len() + lists.weekly.len() < before
        });

        if removed {
            if self.state(task_id).is_some() {
                let mut progress = self.progress.clone().unwrap_or_default();
                progress.0.remove(task_id);
                self.commit_both(custom, progress)?;
            } else {
                self.commit_custom(custom)?;
            }
            return Ok(Deletion::Removed);
        }

        if !self.catalog.contains(expansion, task_id) {
            return Err(TaskError::UnknownTask(task_id.to_string()).into());
        }

        let mut progress = self.progress.clone().unwrap_or_default();
        progress.0.entry(task_id.to_string()).or_default().deleted = Some(true);
        self.commit_progress(progress)?;
        Ok(Deletion::Hidden)
    }

    fn state(&self, task_id: &str) -> Option<&TaskState> {
        self.progress.as_ref().and_then(|p| p.get(task_id))
    }

    fn patch<F>(&mut self, task_id: &str, apply: F) -> Result<Task>
    where
        F: FnOnce(&Task, &mut TaskUpdate) -> Result<()>,
    {
        let task = self
            .find_task(task_id)
            .ok_or_else(|| TaskError::UnknownTask(task_id.to_string()))?;

        let mut update = TaskUpdate {
            completed: task.completed,
            current_count: task.current_count,
            notes: task.notes.clone(),
        };
        apply(&task, &mut update)?;
        self.update_task(task_id, update)?;

        self.find_task(task_id)
            .ok_or_else(|| TaskError::UnknownTask(task_id.to_string()).into())
    }

    fn next_custom_id(&self) -> String {
        let base = format!("custom-{}", self.clock.now_millis());
        let taken = |id: &str| {
            self.catalog.defines(id)
                || self.custom.as_ref().is_some_and(|c| c.0.values().any(|l| l.contains(id)))
        };

        let mut id = base.clone();
        let mut n = 1;
        while taken(&id) {
            n += 1;
            id = format!("{}-{}", base, n);
        }
        id
    }

    fn commit_progress(&mut self, progress: SavedProgress) -> Result<()> {
        self.vault.save(&progress)?;
        self.progress = Some(progress);
        Ok(())
    }

    fn commit_custom(&mut self, custom: CustomTasks) -> Result<()> {
        self.vault.save(&custom)?;
        self.custom = Some(custom);
        Ok(())
    }

    /// Write custom tasks, then progress. If the progress write fails the
    /// previous custom tasks are written back before the error is returned.
    fn commit_both(&mut self, custom: CustomTasks, progress: SavedProgress) -> Result<()> {
        self.vault.save(&custom)?;
        if let Err(e) = self.vault.save(&progress) {
            self.restore_custom();
            return Err(e);
        }
        self.custom = Some(custom);
        self.progress = Some(progress);
        Ok(())
    }

    fn restore_custom(&self) {
        let restored = match &self.custom {
            Some(previous) => self.vault.save(previous),
            None => self.vault.reset(Bucket::CustomTasks),
        };
        if let Err(e) = restored {
            log::error!("Could not restore {}: {}", Bucket::CustomTasks, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::{Error, StorageError};
    use crate::storage::{FailingStorage, LocalStorage, MemoryStorage, StorageResult};
    use crate::vault::DEFAULT_PASSPHRASE;
    use std::sync::atomic::{AtomicBool, Ordering};

    const WORLD_BOSS: &str = "tww-weekly-world-boss";
    const DELVES: &str = "tww-weekly-delves";

    fn vault_on(storage: Arc<dyn LocalStorage>) -> Arc<StateVault> {
        Arc::new(StateVault::new(storage, DEFAULT_PASSPHRASE))
    }

    fn tracker_on(vault: Arc<StateVault>) -> Tracker {
        let clock = Arc::new(ManualClock::new(1_700_000_000_000));
        Tracker::load(vault, TaskCatalog::embedded().unwrap(), clock).unwrap()
    }

    fn setup() -> (Tracker, Arc<StateVault>) {
        let vault = vault_on(Arc::new(MemoryStorage::new()));
        (tracker_on(vault.clone()), vault)
    }

    /// Memory storage that refuses writes to one key while locked
    struct ReadOnlyKey {
        inner: MemoryStorage,
        key: &'static str,
        locked: AtomicBool,
    }

    impl ReadOnlyKey {
        fn new(bucket: Bucket, locked: bool) -> Self {
            Self {
                inner: MemoryStorage::new(),
                key: bucket.key(),
                locked: AtomicBool::new(locked),
            }
        }
    }

    impl LocalStorage for ReadOnlyKey {
        fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
            self.inner.get_item(key)
        }

        fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
            if key == self.key && self.locked.load(Ordering::SeqCst) {
                return Err(StorageError::Io("quota exceeded".to_string()));
            }
            self.inner.set_item(key, value)
        }

        fn remove_item(&self, key: &str) -> StorageResult<bool> {
            self.inner.remove_item(key)
        }

        fn keys_with_prefix(&self, prefix: &str) -> StorageResult<Vec<String>> {
            self.inner.keys_with_prefix(prefix)
        }

        fn clear(&self) -> StorageResult<usize> {
            self.inner.clear()
        }
    }

    fn read_only(bucket: Bucket) -> Arc<StateVault> {
        vault_on(Arc::new(ReadOnlyKey::new(bucket, true)))
    }

    fn new_task(name: &str) -> NewTask {
        NewTask {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_fresh_tracker_has_no_progress() {
        let (tracker, vault) = setup();

        assert!(tracker.progress.as_ref().is_none());
        assert!(vault.load::<SavedProgress>().unwrap().is_none());
        let tasks = tracker.tasks_with_progress("tww", Cadence::Weekly);
        assert!(tasks.iter().all(|t| !t.completed));
    }

    #[test]
    fn test_add_custom_task_to_new_expansion() {
        let (mut tracker, vault) = setup();

        let task = tracker
            .add_custom_task("midnight", Cadence::Weekly, new_task("Housing chores"))
            .unwrap();

        let custom = vault.load::<CustomTasks>().unwrap().unwrap();
        assert_eq!(custom.0["midnight"].weekly, vec![task.clone()]);
        assert!(custom.0["midnight"].daily.is_empty());

        let progress = vault.load::<SavedProgress>().unwrap().unwrap();
        assert_eq!(progress.0[&task.id], TaskState::default());

        let merged = tracker.expansions();
        assert_eq!(merged["midnight"].name, "midnight");
    }

    #[test]
    fn test_custom_tasks_merge_after_predefined() {
        let (mut tracker, _) = setup();
        let predefined = tracker.tasks_with_progress("tww", Cadence::Daily).len();

        let task = tracker
            .add_custom_task("tww", Cadence::Daily, new_task("Fish"))
            .unwrap();

        let daily = tracker.tasks_with_progress("tww", Cadence::Daily);
        assert_eq!(daily.len(), predefined + 1);
        assert_eq!(daily.last().unwrap().id, task.id);
    }

    #[test]
    fn test_countable_custom_task_starts_at_zero() {
        let (mut tracker, _) = setup();
        let task = tracker
            .add_custom_task(
                "tww",
                Cadence::Weekly,
                NewTask {
                    name: "Kill rares".to_string(),
                    target_count: Some(5),
                    ..Default::default()
                },
            )
            .unwrap();

        assert!(task.is_countable());
        assert_eq!(tracker.progress.as_ref().unwrap().0[&task.id].current_count, Some(0));
    }

    #[test]
    fn test_custom_ids_are_unique_within_a_millisecond() {
        let (mut tracker, _) = setup();
        let a = tracker.add_custom_task("tww", Cadence::Weekly, new_task("A")).unwrap();
        let b = tracker.add_custom_task("tww", Cadence::Weekly, new_task("B")).unwrap();

        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_empty_name_rejected() {
        let (mut tracker, _) = setup();
        let err = tracker
            .add_custom_task("tww", Cadence::Weekly, new_task("   "))
            .unwrap_err();
        assert!(matches!(err, Error::Task(TaskError::EmptyName)));
    }

    #[test]
    fn test_update_task_persists() {
        let (mut tracker, vault) = setup();

        tracker
            .update_task(
                WORLD_BOSS,
                TaskUpdate {
                    completed: true,
                    notes: Some("Kordac".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        // A second tracker on the same vault sees the change
        let reloaded = tracker_on(vault);
        let boss = reloaded.find_task(WORLD_BOSS).unwrap();
        assert!(boss.completed);
        assert_eq!(boss.notes.as_deref(), Some("Kordac"));
    }

    #[test]
    fn test_set_completed_keeps_notes() {
        let (mut tracker, _) = setup();
        tracker.set_note(WORLD_BOSS, Some("Kordac".to_string())).unwrap();

        let task = tracker.set_completed(WORLD_BOSS, true).unwrap();

        assert!(task.completed);
        assert_eq!(task.notes.as_deref(), Some("Kordac"));
    }

    #[test]
    fn test_set_count_completes_at_target() {
        let (mut tracker, _) = setup();

        let partial = tracker.set_count(DELVES, 3).unwrap();
        assert_eq!(partial.current_count, Some(3));
        assert!(!partial.completed);

        let done = tracker.set_count(DELVES, 99).unwrap();
        assert_eq!(done.current_count, done.target_count);
        assert!(done.completed);
    }

    #[test]
    fn test_undo_countable_drops_below_target() {
        let (mut tracker, _) = setup();
        let done = tracker.set_count(DELVES, 99).unwrap();
        let target = done.target_count.unwrap();

        let undone = tracker.set_completed(DELVES, false).unwrap();

        assert!(!undone.completed);
        assert_eq!(undone.current_count, Some(target - 1));
    }

    #[test]
    fn test_undo_keeps_partial_count() {
        let (mut tracker, _) = setup();
        tracker.set_count(DELVES, 3).unwrap();

        let undone = tracker.set_completed(DELVES, false).unwrap();

        assert_eq!(undone.current_count, Some(3));
    }

    #[test]
    fn test_set_count_on_plain_task_rejected() {
        let (mut tracker, _) = setup();
        let err = tracker.set_count(WORLD_BOSS, 1).unwrap_err();
        assert!(matches!(err, Error::Task(TaskError::NotCountable(_))));
    }

    #[test]
    fn test_unknown_task_rejected() {
        let (mut tracker, _) = setup();
        let err = tracker.set_completed("nope", true).unwrap_err();
        assert!(matches!(err, Error::Task(TaskError::UnknownTask(_))));
    }

    #[test]
    fn test_reset_progress() {
        let (mut tracker, vault) = setup();
        tracker.set_completed(WORLD_BOSS, true).unwrap();

        tracker.reset_progress().unwrap();

        assert!(vault.load::<SavedProgress>().unwrap().is_none());
        assert!(!tracker.find_task(WORLD_BOSS).unwrap().completed);
    }

    #[test]
    fn test_delete_custom_task_removes_it() {
        let (mut tracker, vault) = setup();
        let task = tracker
            .add_custom_task("tww", Cadence::Weekly, new_task("Temp"))
            .unwrap();

        let outcome = tracker.delete_task(&task.id, "tww").unwrap();

        assert_eq!(outcome, Deletion::Removed);
        assert!(tracker.find_task(&task.id).is_none());
        let progress = vault.load::<SavedProgress>().unwrap().unwrap();
        assert!(progress.get(&task.id).is_none());
    }

    #[test]
    fn test_delete_predefined_task_hides_it() {
        let (mut tracker, _) = setup();
        tracker.set_completed(WORLD_BOSS, true).unwrap();

        let outcome = tracker.delete_task(WORLD_BOSS, "tww").unwrap();

        assert_eq!(outcome, Deletion::Hidden);
        assert!(tracker.find_task(WORLD_BOSS).is_none());
        assert!(tracker.progress.as_ref().unwrap().0[WORLD_BOSS].is_deleted());
        // Still defined in the catalog
        assert!(tracker.expansions()["tww"].tasks.contains(WORLD_BOSS));
    }

    #[test]
    fn test_delete_wrong_expansion_rejected() {
        let (mut tracker, _) = setup();
        let err = tracker.delete_task(WORLD_BOSS, "df").unwrap_err();
        assert!(matches!(err, Error::Task(TaskError::UnknownTask(_))));
    }

    #[test]
    fn test_add_rejected_by_custom_bucket_writes_nothing() {
        let vault = read_only(Bucket::CustomTasks);
        let mut tracker = tracker_on(vault.clone());

        assert!(tracker.add_custom_task("tww", Cadence::Daily, new_task("Fish")).is_err());

        assert!(vault.load::<SavedProgress>().unwrap().is_none());
        assert!(vault.load::<CustomTasks>().unwrap().is_none());
        assert!(tracker.progress.as_ref().is_none());
        assert!(tracker.custom.as_ref().is_none());
    }

    #[test]
    fn test_add_rejected_by_progress_bucket_restores_custom_tasks() {
        let vault = read_only(Bucket::TaskProgress);
        let mut tracker = tracker_on(vault.clone());

        assert!(tracker.add_custom_task("tww", Cadence::Daily, new_task("Fish")).is_err());

        assert!(vault.load::<CustomTasks>().unwrap().is_none());
        assert!(vault.load::<SavedProgress>().unwrap().is_none());
        assert!(tracker.custom.as_ref().is_none());
        let predefined = TaskCatalog::embedded().unwrap().expansions()["tww"].tasks.daily.len();
        assert_eq!(tracker.tasks_with_progress("tww", Cadence::Daily).len(), predefined);
    }

    #[test]
    fn test_failed_delete_keeps_custom_task() {
        let storage = Arc::new(ReadOnlyKey::new(Bucket::TaskProgress, false));
        let vault = vault_on(storage.clone());
        let mut tracker = tracker_on(vault.clone());
        let task = tracker
            .add_custom_task("tww", Cadence::Weekly, new_task("Temp"))
            .unwrap();
        storage.locked.store(true, Ordering::SeqCst);

        assert!(tracker.delete_task(&task.id, "tww").is_err());

        assert!(tracker.find_task(&task.id).is_some());
        let custom = vault.load::<CustomTasks>().unwrap().unwrap();
        assert!(custom.0["tww"].contains(&task.id));
    }

    #[test]
    fn test_failed_save_leaves_state_untouched() {
        let (tracker, _) = setup();
        let mut tracker = Tracker {
            vault: vault_on(Arc::new(FailingStorage)),
            ..tracker
        };

        assert!(tracker.set_completed(WORLD_BOSS, true).is_err());
        assert!(tracker.progress.as_ref().is_none());
        assert!(!tracker.find_task(WORLD_BOSS).unwrap().completed);
    }
}
