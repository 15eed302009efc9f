//! Store, update, lookup and delete against `PostgreSQL`.

use crate::postgres_tasks::helpers::prepared_repo;
use mockable::DefaultClock;
use std::sync::Arc;
use taskboard::task::{
    domain::{Task, TaskChanges, TaskDraft, TaskId},
    ports::{TaskRepository, TaskRepositoryError},
    services::{CreateTaskRequest, TaskLifecycleService, UpdateTaskRequest},
};

fn draft(title: &str, description: Option<&str>) -> TaskDraft {
    TaskDraft {
        title: Some(title.to_owned()),
        description: description.map(str::to_owned),
        completed: false,
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn stored_task_round_trips_exactly() -> Result<(), eyre::Report> {
    let Some(ctx) = prepared_repo().await? else {
        return Ok(());
    };
    let task = Task::create(draft("Round trip", Some("With description")), &DefaultClock)?;

    ctx.repo.store(&task).await?;
    let fetched = ctx.repo.find_by_id(task.id()).await?;

    eyre::ensure!(fetched.as_ref() == Some(&task), "expected {task:?}, got {fetched:?}");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_identifier_is_rejected() -> Result<(), eyre::Report> {
    let Some(ctx) = prepared_repo().await? else {
        return Ok(());
    };
    let task = Task::create(draft("Once", None), &DefaultClock)?;
    ctx.repo.store(&task).await?;

    let result = ctx.repo.store(&task).await;

    eyre::ensure!(
        matches!(result, Err(TaskRepositoryError::DuplicateTask(id)) if id == task.id()),
        "expected duplicate error, got {result:?}"
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn update_persists_changes_and_can_clear_description() -> Result<(), eyre::Report> {
    let Some(ctx) = prepared_repo().await? else {
        return Ok(());
    };
    let task = Task::create(draft("Before", Some("Remove me")), &DefaultClock)?;
    ctx.repo.store(&task).await?;

    let written = ctx
        .repo
        .update(
            task.id(),
            Box::new(|current| {
                current.apply(
                    TaskChanges {
                        title: Some("After".to_owned()),
                        description: Some(None),
                        completed: Some(true),
                    },
                    &DefaultClock,
                )
            }),
        )
        .await?;
    let fetched = ctx.repo.find_by_id(task.id()).await?;

    eyre::ensure!(written.title() == "After", "unexpected title {:?}", written.title());
    eyre::ensure!(written.description().is_none(), "description should be cleared");
    eyre::ensure!(written.created_at() == task.created_at(), "created_at changed");
    eyre::ensure!(
        fetched.as_ref() == Some(&written),
        "expected {written:?}, got {fetched:?}"
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_mutation_rolls_back() -> Result<(), eyre::Report> {
    let Some(ctx) = prepared_repo().await? else {
        return Ok(());
    };
    let task = Task::create(draft("Keep", None), &DefaultClock)?;
    ctx.repo.store(&task).await?;

    let result = ctx
        .repo
        .update(
            task.id(),
            Box::new(|current| {
                current.apply(
                    TaskChanges {
                        title: Some(String::new()),
                        ..TaskChanges::default()
                    },
                    &DefaultClock,
                )
            }),
        )
        .await;
    let fetched = ctx.repo.find_by_id(task.id()).await?;

    eyre::ensure!(
        matches!(result, Err(TaskRepositoryError::Rejected(_))),
        "expected rejection, got {result:?}"
    );
    eyre::ensure!(fetched.as_ref() == Some(&task), "expected {task:?}, got {fetched:?}");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_service_updates_keep_both_changes() -> Result<(), eyre::Report> {
    let Some(ctx) = prepared_repo().await? else {
        return Ok(());
    };
    let service = Arc::new(TaskLifecycleService::new(
        Arc::new(ctx.repo.clone()),
        Arc::new(DefaultClock),
    ));
    let created = service.create(CreateTaskRequest::new("Contended")).await?;
    let id = created.id();

    let renamer = Arc::clone(&service);
    let completer = Arc::clone(&service);
    let (renamed, completed) = tokio::try_join!(
        async move {
            renamer
                .update(id, UpdateTaskRequest::new().with_title("Renamed"))
                .await
        },
        async move {
            completer
                .update(id, UpdateTaskRequest::new().with_completed(true))
                .await
        },
    )?;
    let stored = service.get(id).await?;

    eyre::ensure!(stored.title() == "Renamed", "rename lost: {stored:?}");
    eyre::ensure!(stored.is_completed(), "completion lost: {stored:?}");
    eyre::ensure!(
        stored.updated_at() >= renamed.updated_at() && stored.updated_at() >= completed.updated_at(),
        "updated_at moved backwards: {stored:?}"
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn update_and_delete_of_missing_task_are_not_found() -> Result<(), eyre::Report> {
    let Some(ctx) = prepared_repo().await? else {
        return Ok(());
    };
    let task = Task::create(draft("Gone", None), &DefaultClock)?;
    ctx.repo.store(&task).await?;
    ctx.repo.delete(task.id()).await?;

    let update = ctx
        .repo
        .update(
            task.id(),
            Box::new(|current| current.apply(TaskChanges::default(), &DefaultClock)),
        )
        .await;
    let second_delete = ctx.repo.delete(task.id()).await;
    let unknown_delete = ctx.repo.delete(TaskId::new()).await;
    let lookup = ctx.repo.find_by_id(task.id()).await?;

    eyre::ensure!(
        matches!(update, Err(TaskRepositoryError::NotFound(_))),
        "expected not found, got {update:?}"
    );
    eyre::ensure!(
        matches!(second_delete, Err(TaskRepositoryError::NotFound(_))),
        "expected not found, got {second_delete:?}"
    );
    eyre::ensure!(
        matches!(unknown_delete, Err(TaskRepositoryError::NotFound(_))),
        "expected not found, got {unknown_delete:?}"
    );
    eyre::ensure!(lookup.is_none(), "deleted task must stay deleted");
    Ok(())
}
