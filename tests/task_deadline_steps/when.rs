//! When steps for task deadline BDD scenarios.

use super::{
    helpers::admitted,
    world::{DeadlineWorld, run_async},
};
use chrono::Duration;
use eyre::WrapErr;
use mockable::Clock;
use rstest_bdd_macros::when;
use taskmaster::task::services::{UpdateStatusRequest, UpdateTaskFieldsRequest};

#[when("the admin lists all tasks")]
fn admin_lists_all(world: &mut DeadlineWorld) -> Result<(), eyre::Report> {
    run_async(world.harness.service.list_all(world.harness.admin)).wrap_err("list all tasks")?;
    Ok(())
}

#[when("the employee submits a file")]
fn employee_submits(world: &mut DeadlineWorld) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let upload = admitted("report.pdf", "application/pdf", b"%PDF-1.7 final")?;
    let result = run_async(world.harness.service.update_status(
        world.harness.employee,
        UpdateStatusRequest::new(task_id, "submitted").with_attachment(upload),
    ));
    world.last_submission = Some(result);
    Ok(())
}

#[when("the admin moves the deadline {hours:i64} hours later")]
fn admin_moves_deadline(world: &mut DeadlineWorld, hours: i64) -> Result<(), eyre::Report> {
    let task = world.task()?;
    let request = UpdateTaskFieldsRequest::new(task.id())
        .with_deadline(world.harness.clock.utc() + Duration::hours(hours));
    let edited = run_async(world.harness.service.update_fields(world.harness.admin, request))
        .wrap_err("edit deadline")?;
    world.task = Some(edited);
    Ok(())
}
