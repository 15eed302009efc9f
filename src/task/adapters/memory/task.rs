//! In-memory task repository.

use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{SortDirection, Task, TaskId, TaskQuery, TaskSortKey},
    ports::{TaskMutation, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Cloning shares the underlying collection.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    insertion_order: Vec<TaskId>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: &impl ToString) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn compare_by(key: TaskSortKey, left: &Task, right: &Task) -> Ordering {
    match key {
        TaskSortKey::CreatedAt => left.created_at().cmp(&right.created_at()),
        TaskSortKey::UpdatedAt => left.updated_at().cmp(&right.updated_at()),
        TaskSortKey::Title => left.title().cmp(right.title()),
    }
}

/// Applies filter, stable sort and page bounds to tasks in insertion order.
fn select(state: &InMemoryTaskState, query: &TaskQuery) -> Vec<Task> {
    let mut matching: Vec<&Task> = state
        .insertion_order
        .iter()
        .filter_map(|id| state.tasks.get(id))
        .filter(|task| {
            query
                .completed()
                .is_none_or(|completed| task.is_completed() == completed)
        })
        .collect();

    if let Some((key, direction)) = query.sort() {
        matching.sort_by(|left, right| {
            let ordering = compare_by(key, left, right);
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }

    matching
        .into_iter()
        .skip(query.offset())
        .take(query.limit().unwrap_or(usize::MAX))
        .cloned()
        .collect()
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }

        state.insertion_order.push(task.id());
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, id: TaskId, mutation: TaskMutation) -> TaskRepositoryResult<Task> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        let stored = state
            .tasks
            .get_mut(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        let mut candidate = stored.clone();
        mutation(&mut candidate)?;
        *stored = candidate.clone();
        Ok(candidate)
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list(&self, query: &TaskQuery) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(select(&state, query))
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        if state.tasks.remove(&id).is_none() {
            return Err(TaskRepositoryError::NotFound(id));
        }
        state.insertion_order.retain(|stored| *stored != id);
        Ok(())
    }
}
