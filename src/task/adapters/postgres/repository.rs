//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{PersistedTaskData, SortDirection, Task, TaskId, TaskQuery, TaskSortKey},
    ports::{TaskMutation, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::time::Duration;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a connection pool for the database at `database_url`.
///
/// # Errors
///
/// Returns [`TaskRepositoryError::Persistence`] when the pool cannot open its
/// initial connections within `connection_timeout`.
pub fn build_pool(
    database_url: &str,
    max_size: u32,
    connection_timeout: Duration,
) -> TaskRepositoryResult<TaskPgPool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .max_size(max_size)
        .connection_timeout(connection_timeout)
        .build(manager)
        .map_err(TaskRepositoryError::persistence)
}

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, id: TaskId, mutation: TaskMutation) -> TaskRepositoryResult<Task> {
        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx_conn| {
                // The row lock holds off concurrent updates and deletes until
                // this transaction commits.
                let row = tasks::table
                    .find(id.into_inner())
                    .select(TaskRow::as_select())
                    .for_update()
                    .get_result::<TaskRow>(tx_conn)
                    .optional()?;
                let mut task = row
                    .map(row_to_task)
                    .ok_or(TaskRepositoryError::NotFound(id))?;

                mutation(&mut task)?;

                diesel::update(tasks::table.find(id.into_inner()))
                    .set(&to_changeset(&task))
                    .execute(tx_conn)?;
                Ok(task)
            })
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            Ok(row.map(row_to_task))
        })
        .await
    }

    async fn list(&self, query: &TaskQuery) -> TaskRepositoryResult<Vec<Task>> {
        let request = *query;
        self.run_blocking(move |connection| {
            let mut statement = tasks::table.select(TaskRow::as_select()).into_boxed();

            if let Some(completed) = request.completed() {
                statement = statement.filter(tasks::completed.eq(completed));
            }

            // `position` breaks ties so equal keys keep insertion order.
            statement = match request.sort() {
                None => statement.order(tasks::position.asc()),
                Some((TaskSortKey::CreatedAt, SortDirection::Asc)) => {
                    statement.order((tasks::created_at.asc(), tasks::position.asc()))
                }
                Some((TaskSortKey::CreatedAt, SortDirection::Desc)) => {
                    statement.order((tasks::created_at.desc(), tasks::position.asc()))
                }
                Some((TaskSortKey::UpdatedAt, SortDirection::Asc)) => {
                    statement.order((tasks::updated_at.asc(), tasks::position.asc()))
                }
                Some((TaskSortKey::UpdatedAt, SortDirection::Desc)) => {
                    statement.order((tasks::updated_at.desc(), tasks::position.asc()))
                }
                Some((TaskSortKey::Title, SortDirection::Asc)) => {
                    statement.order((tasks::title.asc(), tasks::position.asc()))
                }
                Some((TaskSortKey::Title, SortDirection::Desc)) => {
                    statement.order((tasks::title.desc(), tasks::position.asc()))
                }
            };

            let offset = i64::try_from(request.offset()).map_err(TaskRepositoryError::persistence)?;
            statement = statement.offset(offset);
            if let Some(page_size) = request.limit() {
                let limit = i64::try_from(page_size).map_err(TaskRepositoryError::persistence)?;
                statement = statement.limit(limit);
            }

            let rows = statement
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_task).collect())
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(tasks::table.find(id.into_inner()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().to_owned(),
        description: task.description().map(str::to_owned),
        completed: task.is_completed(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn to_changeset(task: &Task) -> TaskChangeset {
    TaskChangeset {
        title: task.title().to_owned(),
        description: task.description().map(str::to_owned),
        completed: task.is_completed(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> Task {
    let TaskRow {
        id,
        title,
        description,
        completed,
        created_at,
        updated_at,
    } = row;

    Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        title,
        description,
        completed,
        created_at,
        updated_at,
    })
}
