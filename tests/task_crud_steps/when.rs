//! When steps for task CRUD BDD scenarios.

use super::world::{TaskWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskboard::task::{
    domain::{SortDirection, TaskId, TaskQuery, TaskSortKey},
    services::{CreateTaskRequest, UpdateTaskRequest},
};

#[when(r#"a task titled "{title}" is created"#)]
fn create_titled_task(world: &mut TaskWorld, title: String) -> Result<(), eyre::Report> {
    let task = run_async(world.service.create(CreateTaskRequest::new(title)))
        .wrap_err("create titled task")?;
    world.current_task = Some(task);
    Ok(())
}

#[when("a task with a blank title is created")]
fn create_blank_task(world: &mut TaskWorld) {
    world.last_create_result = Some(run_async(
        world.service.create(CreateTaskRequest::new("   ")),
    ));
}

#[when("the task is marked as completed")]
fn complete_task(world: &mut TaskWorld) -> Result<(), eyre::Report> {
    let id = world.current_task()?.id();
    let updated = run_async(
        world
            .service
            .update(id, UpdateTaskRequest::new().with_completed(true)),
    )
    .wrap_err("complete task")?;
    world.previous_task = world.current_task.replace(updated);
    Ok(())
}

#[when("the task is deleted")]
fn delete_task(world: &mut TaskWorld) -> Result<(), eyre::Report> {
    let id = world.current_task()?.id();
    run_async(world.service.delete(id)).wrap_err("delete task")?;
    Ok(())
}

#[when("an unknown task is updated")]
fn update_unknown_task(world: &mut TaskWorld) {
    let outcome = run_async(
        world
            .service
            .update(TaskId::new(), UpdateTaskRequest::new().with_title("Ghost")),
    );
    world.last_outcome = Some(outcome.map(|_| ()));
}

#[when("an unknown task is deleted")]
fn delete_unknown_task(world: &mut TaskWorld) {
    world.last_outcome = Some(run_async(world.service.delete(TaskId::new())));
}

#[when("the completed tasks are listed by title")]
fn list_completed_by_title(world: &mut TaskWorld) -> Result<(), eyre::Report> {
    let query = TaskQuery::new()
        .with_completed(true)
        .sorted_by(TaskSortKey::Title, SortDirection::Asc);
    let tasks = run_async(world.service.list(query)).wrap_err("list completed tasks")?;
    world.listed_titles = tasks.iter().map(|task| task.title().to_owned()).collect();
    Ok(())
}
