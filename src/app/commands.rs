use crate::config::cli::{file_list_options, Command, ListArgs};
use crate::core::client::BatchServiceClient;
use crate::domain::models::PagedList;
use crate::domain::options::{GetOptions, RequestOptions};
use crate::utils::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Runs one read-only command and returns its result as JSON.
pub async fn run(client: &BatchServiceClient, command: &Command) -> Result<Value> {
    tracing::debug!("Running command: {}", command.name());
    let get = GetOptions::default();
    let request = RequestOptions::default();

    match command {
        Command::ListApplications { list } => {
            let page = client.applications().list(&list.to_options()).await?;
            paged(client, page, list).await
        }
        Command::ListPools { list } => {
            let page = client.pools().list(&list.to_options()).await?;
            paged(client, page, list).await
        }
        Command::GetPool { pool_id } => to_json(&client.pools().get(pool_id, &get).await?),
        Command::ListNodes { pool_id, list } => {
            let page = client
                .compute_nodes()
                .list(pool_id, &list.to_options())
                .await?;
            paged(client, page, list).await
        }
        Command::GetNode { pool_id, node_id } => {
            to_json(&client.compute_nodes().get(pool_id, node_id, &get).await?)
        }
        Command::ListJobs { list } => {
            let page = client.jobs().list(&list.to_options()).await?;
            paged(client, page, list).await
        }
        Command::GetJob { job_id } => to_json(&client.jobs().get(job_id, &get).await?),
        Command::TaskCounts { job_id } => {
            to_json(&client.jobs().get_task_counts(job_id, &request).await?)
        }
        Command::ListTasks { job_id, list } => {
            let page = client.tasks().list(job_id, &list.to_options()).await?;
            paged(client, page, list).await
        }
        Command::GetTask { job_id, task_id } => {
            to_json(&client.tasks().get(job_id, task_id, &get).await?)
        }
        Command::ListSchedules { list } => {
            let page = client.job_schedules().list(&list.to_options()).await?;
            paged(client, page, list).await
        }
        Command::GetSchedule { job_schedule_id } => {
            to_json(&client.job_schedules().get(job_schedule_id, &get).await?)
        }
        Command::ListCertificates { list } => {
            let page = client.certificates().list(&list.to_options()).await?;
            paged(client, page, list).await
        }
        Command::ListNodeAgentSkus { list } => {
            let page = client
                .accounts()
                .list_node_agent_skus(&list.to_options())
                .await?;
            paged(client, page, list).await
        }
        Command::ListPoolNodeCounts { list } => {
            let page = client
                .accounts()
                .list_pool_node_counts(&list.to_options())
                .await?;
            paged(client, page, list).await
        }
        Command::ListTaskFiles {
            job_id,
            task_id,
            recursive,
            list,
        } => {
            let options = file_list_options(list, *recursive);
            let page = client.files().list_from_task(job_id, task_id, &options).await?;
            paged(client, page, list).await
        }
    }
}

/// The first page as returned, or every item when `--all` was given.
async fn paged<T>(client: &BatchServiceClient, page: PagedList<T>, list: &ListArgs) -> Result<Value>
where
    T: Serialize + DeserializeOwned,
{
    if !list.all {
        return to_json(&page);
    }
    let items = client
        .list_all(page, &list.to_options().request)
        .await?;
    tracing::info!("Fetched {} items across all pages", items.len());
    to_json(&items)
}

fn to_json<T: Serialize>(value: &T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::error::BatchError;

    #[test]
    fn test_page_keeps_next_link() {
        let page = PagedList {
            value: vec![BatchError::default()],
            next_link: Some("https://acct.westus.batch.azure.com/pools?$skiptoken=2".to_string()),
        };
        let json = to_json(&page).unwrap();
        assert_eq!(json["value"].as_array().map(Vec::len), Some(1));
        assert_eq!(
            json["odata.nextLink"],
            "https://acct.westus.batch.azure.com/pools?$skiptoken=2"
        );
    }
}
