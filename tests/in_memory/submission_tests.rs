//! Submission gate behaviour observed through the lifecycle service.

use super::helpers::{Harness, admitted, harness};
use chrono::Duration;
use mockable::Clock;
use rstest::rstest;
use taskmaster::task::{
    domain::{TaskDomainError, TaskStatus},
    services::{ErrorKind, TaskLifecycleError, UpdateStatusRequest},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn submission_before_deadline_stores_attachment(harness: Harness) -> eyre::Result<()> {
    let task = harness.create_task(Duration::hours(1)).await?;

    let view = harness.submit_pdf(task.id()).await?;

    eyre::ensure!(view.task.status() == TaskStatus::Submitted);
    let file = view
        .task
        .submission_file()
        .ok_or_else(|| eyre::eyre!("missing submission reference"))?;
    eyre::ensure!(file.original_name == "report.pdf");
    eyre::ensure!(file.content_type == "application/pdf");
    eyre::ensure!(file.filename.ends_with("report.pdf") && file.filename != "report.pdf");
    eyre::ensure!(harness.attachments.len()? == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn late_submission_has_no_side_effects(harness: Harness) -> eyre::Result<()> {
    let task = harness.create_task(Duration::hours(1)).await?;
    harness.clock.advance(Duration::hours(2));
    let upload = admitted("report.pdf", "application/pdf", b"%PDF-1.7")?;

    let result = harness
        .service
        .update_status(
            harness.employee,
            UpdateStatusRequest::new(task.id(), "submitted")
                .with_comment("Sorry this is late")
                .with_attachment(upload),
        )
        .await;

    let err = result.err().ok_or_else(|| eyre::eyre!("late submission accepted"))?;
    eyre::ensure!(err.kind() == ErrorKind::DeadlineViolation, "got {err:?}");
    let stored = harness.stored(task.id()).await?;
    eyre::ensure!(stored.status() == TaskStatus::Pending);
    eyre::ensure!(stored.comments().is_empty());
    eyre::ensure!(stored.submission_file().is_none());
    eyre::ensure!(harness.attachments.is_empty()?);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn returned_task_accepts_resubmission_after_deadline(harness: Harness) -> eyre::Result<()> {
    let task = harness.create_task(Duration::hours(1)).await?;
    let first = harness.submit_pdf(task.id()).await?;
    let first_file = first
        .task
        .submission_file()
        .cloned()
        .ok_or_else(|| eyre::eyre!("missing first submission"))?;
    harness
        .service
        .update_status(
            harness.admin,
            UpdateStatusRequest::new(task.id(), "returned").with_comment("Add sources"),
        )
        .await?;
    harness.clock.advance(Duration::days(2));

    let resubmitted = harness.submit_pdf(task.id()).await?;

    eyre::ensure!(resubmitted.task.status() == TaskStatus::Submitted);
    let second_file = resubmitted
        .task
        .submission_file()
        .ok_or_else(|| eyre::eyre!("missing second submission"))?;
    eyre::ensure!(second_file.filename != first_file.filename);
    eyre::ensure!(
        harness.attachments.len()? == 1,
        "replaced attachment was not removed"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn return_comment_is_last_with_author_and_time(harness: Harness) -> eyre::Result<()> {
    let task = harness.create_task(Duration::hours(1)).await?;
    harness
        .service
        .update_status(
            harness.employee,
            UpdateStatusRequest::new(task.id(), "submitted")
                .with_comment("First draft attached")
                .with_attachment(admitted("draft.txt", "text/plain", b"draft")?),
        )
        .await?;
    harness.clock.advance(Duration::minutes(10));
    let returned_at = harness.clock.utc();

    harness
        .service
        .update_status(
            harness.admin,
            UpdateStatusRequest::new(task.id(), "returned").with_comment("Needs a conclusion"),
        )
        .await?;
    let view = harness.service.get_task(harness.employee, task.id()).await?;

    eyre::ensure!(view.task.status() == TaskStatus::Returned);
    eyre::ensure!(view.comments.len() == 2);
    let last = view
        .comments
        .last()
        .ok_or_else(|| eyre::eyre!("missing comments"))?;
    eyre::ensure!(last.text == "Needs a conclusion");
    eyre::ensure!(last.created_at == returned_at);
    let author = last
        .author
        .as_ref()
        .ok_or_else(|| eyre::eyre!("comment author unresolved"))?;
    eyre::ensure!(author.id == harness.admin.user_id());
    eyre::ensure!(author.name == "Grace Hopper");
    Ok(())
}

#[rstest]
#[case("")]
#[case("   ")]
#[case(" \n\t ")]
#[tokio::test(flavor = "multi_thread")]
async fn whitespace_comment_changes_status_without_adding_history(
    harness: Harness,
    #[case] comment: &str,
) -> eyre::Result<()> {
    let task = harness.create_task(Duration::hours(1)).await?;
    harness.submit_pdf(task.id()).await?;

    let view = harness
        .service
        .update_status(
            harness.admin,
            UpdateStatusRequest::new(task.id(), "returned").with_comment(comment),
        )
        .await?;

    eyre::ensure!(view.task.status() == TaskStatus::Returned);
    eyre::ensure!(view.task.comments().is_empty());
    eyre::ensure!(harness.stored(task.id()).await?.comments().is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn admin_completes_submitted_task(harness: Harness) -> eyre::Result<()> {
    let task = harness.create_task(Duration::hours(1)).await?;
    harness.submit_pdf(task.id()).await?;

    let view = harness
        .service
        .update_status(harness.admin, UpdateStatusRequest::new(task.id(), "completed"))
        .await?;

    eyre::ensure!(view.task.status() == TaskStatus::Completed);
    eyre::ensure!(view.task.submission_file().is_some());
    Ok(())
}

#[rstest]
#[case("submitted", false)]
#[case("completed", true)]
#[case("returned", true)]
#[tokio::test(flavor = "multi_thread")]
async fn completed_task_accepts_no_further_changes(
    harness: Harness,
    #[case] target: &str,
    #[case] by_admin: bool,
) -> eyre::Result<()> {
    let task = harness.create_task(Duration::hours(1)).await?;
    harness.submit_pdf(task.id()).await?;
    harness
        .service
        .update_status(harness.admin, UpdateStatusRequest::new(task.id(), "completed"))
        .await?;
    let (actor, request) = if by_admin {
        (harness.admin, UpdateStatusRequest::new(task.id(), target))
    } else {
        (
            harness.employee,
            UpdateStatusRequest::new(task.id(), target)
                .with_attachment(admitted("again.pdf", "application/pdf", b"%PDF")?),
        )
    };

    let result = harness.service.update_status(actor, request).await;

    eyre::ensure!(matches!(
        result,
        Err(TaskLifecycleError::Domain(
            TaskDomainError::InvalidStatusTransition { .. }
        ))
    ));
    eyre::ensure!(harness.stored(task.id()).await?.status() == TaskStatus::Completed);
    eyre::ensure!(harness.attachments.len()? == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn submission_without_file_is_rejected(harness: Harness) -> eyre::Result<()> {
    let task = harness.create_task(Duration::hours(1)).await?;

    let result = harness
        .service
        .update_status(harness.employee, UpdateStatusRequest::new(task.id(), "submitted"))
        .await;

    eyre::ensure!(matches!(
        result,
        Err(TaskLifecycleError::Domain(TaskDomainError::MissingAttachment(_)))
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn colleague_cannot_submit_for_assignee(harness: Harness) -> eyre::Result<()> {
    let task = harness.create_task(Duration::hours(1)).await?;

    let result = harness
        .service
        .update_status(
            harness.colleague,
            UpdateStatusRequest::new(task.id(), "submitted")
                .with_attachment(admitted("mine.pdf", "application/pdf", b"%PDF")?),
        )
        .await;

    let err = result.err().ok_or_else(|| eyre::eyre!("submission accepted"))?;
    eyre::ensure!(err.kind() == ErrorKind::Forbidden);
    eyre::ensure!(harness.attachments.is_empty()?);
    Ok(())
}

#[rstest]
#[case("done")]
#[case("in-progress")]
#[case("")]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_status_is_a_validation_error(
    harness: Harness,
    #[case] status: &str,
) -> eyre::Result<()> {
    let task = harness.create_task(Duration::hours(1)).await?;

    let result = harness
        .service
        .update_status(harness.admin, UpdateStatusRequest::new(task.id(), status))
        .await;

    let err = result.err().ok_or_else(|| eyre::eyre!("status accepted"))?;
    eyre::ensure!(err.kind() == ErrorKind::Validation);
    Ok(())
}
