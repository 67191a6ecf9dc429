//! Task lifecycle engine.
//!
//! Every operation receives the acting [`Actor`] explicitly. Mutating
//! operations follow one order: validate, gate, mutate, persist. A refused
//! request leaves the stored task untouched.

use super::{AttachmentDownload, CommentView, TaskLifecycleError, TaskLifecycleResult, TaskView};
use crate::identity::{
    domain::{Actor, UserId, UserRecord, UserRole, UserSummary},
    ports::IdentityDirectory,
};
use crate::task::{
    domain::{
        AdmittedUpload, ApprovedTransition, NewTask, SubmissionFile, Task, TaskComment,
        TaskFieldChanges, TaskId, TaskStatus, deadline,
        gate::{self, StatusChange},
        upload::content_type_for_filename,
    },
    ports::{AttachmentMetadata, AttachmentStore, TaskRepository},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::Arc;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: String,
    assigned_to: UserId,
    deadline: DateTime<Utc>,
}

impl CreateTaskRequest {
    /// Creates a request with every required field.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        assigned_to: UserId,
        deadline: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            assigned_to,
            deadline,
        }
    }
}

/// Request payload for a status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateStatusRequest {
    task_id: TaskId,
    status: String,
    comment: Option<String>,
    attachment: Option<AdmittedUpload>,
}

impl UpdateStatusRequest {
    /// Creates a request for the given target status string.
    #[must_use]
    pub fn new(task_id: TaskId, status: impl Into<String>) -> Self {
        Self {
            task_id,
            status: status.into(),
            comment: None,
            attachment: None,
        }
    }

    /// Adds a comment to append with the status change.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Attaches an upload that already passed the upload policy.
    #[must_use]
    pub fn with_attachment(mut self, attachment: AdmittedUpload) -> Self {
        self.attachment = Some(attachment);
        self
    }
}

/// Request payload for an admin field edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskFieldsRequest {
    task_id: TaskId,
    changes: TaskFieldChanges,
}

impl UpdateTaskFieldsRequest {
    /// Creates an edit request that changes nothing yet.
    #[must_use]
    pub fn new(task_id: TaskId) -> Self {
        Self {
            task_id,
            changes: TaskFieldChanges::default(),
        }
    }

    /// Sets a replacement title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.changes.title = Some(title.into());
        self
    }

    /// Sets a replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.changes.description = Some(description.into());
        self
    }

    /// Sets a replacement deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.changes.deadline = Some(deadline);
        self
    }
}

type SummaryCache = HashMap<UserId, Option<UserSummary>>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, A, D, C>
where
    R: TaskRepository,
    A: AttachmentStore,
    D: IdentityDirectory,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    attachments: Arc<A>,
    directory: Arc<D>,
    clock: Arc<C>,
}

impl<R, A, D, C> TaskLifecycleService<R, A, D, C>
where
    R: TaskRepository,
    A: AttachmentStore,
    D: IdentityDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(
        repository: Arc<R>,
        attachments: Arc<A>,
        directory: Arc<D>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            repository,
            attachments,
            directory,
            clock,
        }
    }

    /// Creates a `pending` task assigned to an employee.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Forbidden`] for non-admin actors,
    /// [`TaskLifecycleError::Domain`] when the title or description is blank,
    /// [`TaskLifecycleError::UnknownAssignee`] when the assignee is not a
    /// registered employee, or repository errors.
    pub async fn create(
        &self,
        actor: Actor,
        request: CreateTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        ensure_admin(actor, "create tasks")?;
        let task = Task::new(
            NewTask {
                title: request.title,
                description: request.description,
                assigned_to: request.assigned_to,
                assigned_by: actor.user_id(),
                deadline: request.deadline,
            },
            &*self.clock,
        )?;

        let assignee = self.directory.find_by_id(task.assigned_to()).await?;
        if !assignee.is_some_and(|user| user.role() == UserRole::Employee) {
            return Err(TaskLifecycleError::UnknownAssignee(task.assigned_to()));
        }

        self.repository.store(&task).await?;
        tracing::info!(
            task_id = %task.id(),
            assigned_to = %task.assigned_to(),
            deadline = %task.deadline(),
            "task created"
        );
        Ok(task)
    }

    /// Lists every task, reconciling overdue ones first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Forbidden`] for non-admin actors, or
    /// repository and directory errors.
    pub async fn list_all(&self, actor: Actor) -> TaskLifecycleResult<Vec<TaskView>> {
        ensure_admin(actor, "list all tasks")?;
        let tasks = self.repository.list_all().await?;
        self.reconciled_views(tasks).await
    }

    /// Lists the tasks assigned to `assignee`, reconciling overdue ones first.
    ///
    /// Employees may only list their own tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Forbidden`] when an employee asks for
    /// another user's tasks, or repository and directory errors.
    pub async fn list_for_assignee(
        &self,
        actor: Actor,
        assignee: UserId,
    ) -> TaskLifecycleResult<Vec<TaskView>> {
        if !actor.is_admin() && actor.user_id() != assignee {
            return Err(TaskLifecycleError::Forbidden {
                role: actor.role(),
                operation: "list tasks assigned to another user",
            });
        }
        let tasks = self.repository.list_by_assignee(assignee).await?;
        self.reconciled_views(tasks).await
    }

    /// Lists the acting user's own tasks.
    ///
    /// # Errors
    ///
    /// Returns repository and directory errors.
    pub async fn list_my_tasks(&self, actor: Actor) -> TaskLifecycleResult<Vec<TaskView>> {
        self.list_for_assignee(actor, actor.user_id()).await
    }

    /// Reads one task, reconciling it if overdue.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist,
    /// [`TaskLifecycleError::Forbidden`] when an employee reads a task that is
    /// not theirs, or repository and directory errors.
    pub async fn get_task(&self, actor: Actor, task_id: TaskId) -> TaskLifecycleResult<TaskView> {
        let task = self.find_task_or_error(task_id).await?;
        ensure_can_view(actor, &task)?;
        let reconciled = self.reconcile_and_persist(task, self.clock.utc()).await?;
        self.resolve_view(reconciled, &mut SummaryCache::new()).await
    }

    /// Requests a status change, optionally with a comment and attachment.
    ///
    /// The submission gate runs before anything is stored. An attachment is
    /// written to the attachment store only after approval, and removed again
    /// if the task cannot be persisted. A replaced earlier submission is
    /// removed after the new one is persisted.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::InvalidStatus`] for an unknown status,
    /// [`TaskLifecycleError::NotFound`] when the task does not exist,
    /// [`TaskLifecycleError::Domain`] when the gate refuses the change, or
    /// storage errors.
    pub async fn update_status(
        &self,
        actor: Actor,
        request: UpdateStatusRequest,
    ) -> TaskLifecycleResult<TaskView> {
        let UpdateStatusRequest {
            task_id,
            status,
            comment,
            attachment,
        } = request;
        let target = TaskStatus::try_from(status.as_str())?;
        let mut task = self.find_task_or_error(task_id).await?;
        let now = self.clock.utc();

        let approved = gate::authorize(
            &task,
            StatusChange {
                actor,
                target,
                has_attachment: attachment.is_some(),
                now,
            },
        )?;

        let submission = match attachment {
            Some(upload) => Some(self.store_attachment(&upload, now).await?),
            None => None,
        };
        let previous_submission = task.submission_file().cloned();
        let entry = comment
            .as_deref()
            .and_then(|text| TaskComment::new(text, actor.user_id(), now));

        if let Err(err) = self
            .persist_transition(&mut task, approved, entry, submission.clone(), now)
            .await
        {
            if let Some(stored) = submission.as_ref() {
                self.discard_attachment(task_id, stored).await;
            }
            return Err(err);
        }

        if submission.is_some()
            && let Some(replaced) = previous_submission.as_ref()
        {
            self.discard_attachment(task_id, replaced).await;
        }

        tracing::info!(
            task_id = %task_id,
            from = %approved.from(),
            to = %approved.to(),
            actor = %actor.user_id(),
            "task status changed"
        );
        self.resolve_view(task, &mut SummaryCache::new()).await
    }

    /// Applies an admin edit to title, description or deadline.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Forbidden`] for non-admin actors,
    /// [`TaskLifecycleError::NotFound`] when the task does not exist,
    /// [`TaskLifecycleError::Domain`] when a supplied text is blank, or
    /// repository errors.
    pub async fn update_fields(
        &self,
        actor: Actor,
        request: UpdateTaskFieldsRequest,
    ) -> TaskLifecycleResult<Task> {
        ensure_admin(actor, "edit tasks")?;
        let mut task = self.find_task_or_error(request.task_id).await?;
        let previous_status = task.status();
        task.apply_field_changes(request.changes, &*self.clock)?;
        self.repository.update(&task).await?;

        tracing::info!(
            task_id = %task.id(),
            status = %task.status(),
            status_reset = previous_status != task.status(),
            "task fields updated"
        );
        Ok(task)
    }

    /// Permanently deletes a task and its stored attachment.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Forbidden`] for non-admin actors,
    /// [`TaskLifecycleError::NotFound`] when the task does not exist, or
    /// repository errors. Failing to remove the attachment is logged only.
    pub async fn delete(&self, actor: Actor, task_id: TaskId) -> TaskLifecycleResult<()> {
        ensure_admin(actor, "delete tasks")?;
        let task = self.find_task_or_error(task_id).await?;
        self.repository.delete(task_id).await?;
        if let Some(stored) = task.submission_file() {
            self.discard_attachment(task_id, stored).await;
        }
        tracing::info!(task_id = %task_id, "task deleted");
        Ok(())
    }

    /// Fetches the submitted file of a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist,
    /// [`TaskLifecycleError::AttachmentNotFound`] when nothing was submitted,
    /// [`TaskLifecycleError::Forbidden`] when an employee asks for another
    /// user's file, or attachment store errors.
    pub async fn get_attachment(
        &self,
        actor: Actor,
        task_id: TaskId,
    ) -> TaskLifecycleResult<AttachmentDownload> {
        let task = self.find_task_or_error(task_id).await?;
        ensure_can_view(actor, &task)?;
        let file = task
            .submission_file()
            .cloned()
            .ok_or(TaskLifecycleError::AttachmentNotFound(task_id))?;
        let bytes = self.attachments.retrieve(&file).await?;
        let content_type = content_type_for_filename(&file.original_name);
        Ok(AttachmentDownload {
            file,
            bytes,
            content_type,
        })
    }

    /// Lists employees an admin can assign tasks to.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Forbidden`] for non-admin actors, or
    /// directory errors.
    pub async fn list_employees(&self, actor: Actor) -> TaskLifecycleResult<Vec<UserSummary>> {
        ensure_admin(actor, "list employees")?;
        let employees = self.directory.list_by_role(UserRole::Employee).await?;
        Ok(employees.iter().map(UserRecord::summary).collect())
    }

    async fn find_task_or_error(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(task_id))
    }

    async fn persist_transition(
        &self,
        task: &mut Task,
        approved: ApprovedTransition,
        comment: Option<TaskComment>,
        submission: Option<SubmissionFile>,
        now: DateTime<Utc>,
    ) -> TaskLifecycleResult<()> {
        task.apply_transition(approved, comment, submission, now)?;
        self.repository.update(task).await?;
        Ok(())
    }

    async fn store_attachment(
        &self,
        upload: &AdmittedUpload,
        now: DateTime<Utc>,
    ) -> TaskLifecycleResult<SubmissionFile> {
        let metadata = AttachmentMetadata {
            original_name: upload.original_name().to_owned(),
            content_type: upload.content_type().to_owned(),
            uploaded_at: now,
        };
        Ok(self.attachments.store(upload.bytes(), &metadata).await?)
    }

    async fn discard_attachment(&self, task_id: TaskId, file: &SubmissionFile) {
        if let Err(err) = self.attachments.remove(file).await {
            tracing::warn!(
                task_id = %task_id,
                file = %file.filename,
                error = %err,
                "failed to remove stored attachment"
            );
        }
    }

    async fn reconcile_and_persist(
        &self,
        mut task: Task,
        now: DateTime<Utc>,
    ) -> TaskLifecycleResult<Task> {
        if deadline::reconcile(&mut task, now) {
            self.repository.update(&task).await?;
            tracing::debug!(
                task_id = %task.id(),
                deadline = %task.deadline(),
                "pending task passed its deadline; marked not-submitted"
            );
        }
        Ok(task)
    }

    async fn reconciled_views(&self, tasks: Vec<Task>) -> TaskLifecycleResult<Vec<TaskView>> {
        let now = self.clock.utc();
        let mut cache = SummaryCache::new();
        let mut views = Vec::with_capacity(tasks.len());
        for task in tasks {
            let reconciled = self.reconcile_and_persist(task, now).await?;
            views.push(self.resolve_view(reconciled, &mut cache).await?);
        }
        Ok(views)
    }

    async fn resolve_view(
        &self,
        task: Task,
        cache: &mut SummaryCache,
    ) -> TaskLifecycleResult<TaskView> {
        let assignee = self.summary_for(task.assigned_to(), cache).await?;
        let assigner = self.summary_for(task.assigned_by(), cache).await?;
        let mut comments = Vec::with_capacity(task.comments().len());
        for comment in task.comments() {
            comments.push(CommentView {
                text: comment.text().to_owned(),
                author: self.summary_for(comment.author(), cache).await?,
                created_at: comment.created_at(),
            });
        }
        Ok(TaskView {
            task,
            assignee,
            assigner,
            comments,
        })
    }

    async fn summary_for(
        &self,
        user_id: UserId,
        cache: &mut SummaryCache,
    ) -> TaskLifecycleResult<Option<UserSummary>> {
        if let Some(cached) = cache.get(&user_id) {
            return Ok(cached.clone());
        }
        let summary = self
            .directory
            .find_by_id(user_id)
            .await?
            .as_ref()
            .map(UserRecord::summary);
        cache.insert(user_id, summary.clone());
        Ok(summary)
    }
}

fn ensure_admin(actor: Actor, operation: &'static str) -> TaskLifecycleResult<()> {
    if actor.is_admin() {
        return Ok(());
    }
    Err(TaskLifecycleError::Forbidden {
        role: actor.role(),
        operation,
    })
}

fn ensure_can_view(actor: Actor, task: &Task) -> TaskLifecycleResult<()> {
    if actor.is_admin() || actor.user_id() == task.assigned_to() {
        return Ok(());
    }
    Err(TaskLifecycleError::Forbidden {
        role: actor.role(),
        operation: "access tasks assigned to another user",
    })
}
