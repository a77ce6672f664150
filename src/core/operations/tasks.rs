use crate::core::client::BatchServiceClient;
use crate::domain::models::task::{
    CloudTask, CloudTaskListResult, CloudTaskListSubtasksResult, TaskAddCollectionParameter,
    TaskAddCollectionResult, TaskAddParameter, TaskUpdateParameter,
};
use crate::domain::options::*;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use reqwest::Method;
use tracing::debug;

pub struct TaskOperations<'a> {
    client: &'a BatchServiceClient,
}

impl<'a> TaskOperations<'a> {
    pub(crate) fn new(client: &'a BatchServiceClient) -> Self {
        Self { client }
    }

    pub async fn add(
        &self,
        job_id: &str,
        task: &TaskAddParameter,
        options: &TaskAddOptions,
    ) -> Result<ResponseHeaders> {
        task.validate()?;
        self.client
            .send_action(Method::POST, &["jobs", job_id, "tasks"], options, Some(task))
            .await
    }

    pub async fn list(&self, job_id: &str, options: &TaskListOptions) -> Result<CloudTaskListResult> {
        self.client
            .get_json(&["jobs", job_id, "tasks"], options)
            .await
    }

    /// Adds up to 100 tasks in one request.
    ///
    /// The call succeeds as a whole even when individual tasks are rejected;
    /// check [`TaskAddCollectionResult::failures`].
    pub async fn add_collection(
        &self,
        job_id: &str,
        tasks: &TaskAddCollectionParameter,
        options: &TaskAddCollectionOptions,
    ) -> Result<TaskAddCollectionResult> {
        tasks.validate()?;
        let result: TaskAddCollectionResult = self
            .client
            .send_json(
                Method::POST,
                &["jobs", job_id, "addtaskcollection"],
                options,
                tasks,
            )
            .await?;
        debug!(
            "Added {} tasks to job {}, {} rejected",
            tasks.value.len(),
            job_id,
            result.failures().count()
        );
        Ok(result)
    }

    pub async fn delete(
        &self,
        job_id: &str,
        task_id: &str,
        options: &TaskDeleteOptions,
    ) -> Result<ResponseHeaders> {
        self.client
            .send_empty(Method::DELETE, &["jobs", job_id, "tasks", task_id], options)
            .await
    }

    pub async fn get(&self, job_id: &str, task_id: &str, options: &TaskGetOptions) -> Result<CloudTask> {
        self.client
            .get_json(&["jobs", job_id, "tasks", task_id], options)
            .await
    }

    pub async fn update(
        &self,
        job_id: &str,
        task_id: &str,
        update: &TaskUpdateParameter,
        options: &TaskUpdateOptions,
    ) -> Result<ResponseHeaders> {
        update.validate()?;
        self.client
            .send_action(
                Method::PUT,
                &["jobs", job_id, "tasks", task_id],
                options,
                Some(update),
            )
            .await
    }

    /// Subtasks of a multi-instance task; one unpaged response.
    pub async fn list_subtasks(
        &self,
        job_id: &str,
        task_id: &str,
        options: &TaskListSubtasksOptions,
    ) -> Result<CloudTaskListSubtasksResult> {
        self.client
            .get_json(&["jobs", job_id, "tasks", task_id, "subtasksinfo"], options)
            .await
    }

    pub async fn terminate(
        &self,
        job_id: &str,
        task_id: &str,
        options: &TaskTerminateOptions,
    ) -> Result<ResponseHeaders> {
        self.client
            .send_empty(
                Method::POST,
                &["jobs", job_id, "tasks", task_id, "terminate"],
                options,
            )
            .await
    }

    /// Resets a failed task so it runs again; its retry count starts over.
    pub async fn reactivate(
        &self,
        job_id: &str,
        task_id: &str,
        options: &TaskReactivateOptions,
    ) -> Result<ResponseHeaders> {
        self.client
            .send_empty(
                Method::POST,
                &["jobs", job_id, "tasks", task_id, "reactivate"],
                options,
            )
            .await
    }
}
