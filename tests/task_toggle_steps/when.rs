//! When steps for task toggle BDD scenarios.

use super::world::{TaskDeskWorld, run_async};
use rstest_bdd_macros::when;

#[when(r#"the task "{text}" is added with priority "{priority}""#)]
fn add_task(world: &mut TaskDeskWorld, text: String, priority: String) {
    world.last_added = Some(run_async(world.desk.add_task(&text, None, &priority)));
}

#[when("task {id:i32} is toggled")]
fn toggle_task(world: &mut TaskDeskWorld, id: i32) {
    world.listed = run_async(world.desk.toggle_task(id));
}

#[when("task {id:i32} is deleted")]
fn delete_task(world: &mut TaskDeskWorld, id: i32) {
    world.listed = run_async(world.desk.delete_task(id));
}
