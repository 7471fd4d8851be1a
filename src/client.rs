//! This module provides a client to the task-management REST API

use std::error::Error;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::category::Category;
use crate::quick_task::{NewQuickTask, QuickTask, QuickTaskId};
use crate::session::Session;
use crate::task::{NewTask, Task, TaskId};
use crate::status::TaskStatus;
use crate::traits::TaskSource;

static TASKS_PATH: &str = "tasks/";
static CATEGORIES_PATH: &str = "family/";
static QUICK_TASKS_PATH: &str = "quickTasks/";


/// A [`TaskSource`] that talks to the REST API.
///
/// Every request is authenticated with the token of the [`Session`] it has been created with.
/// There is no retry and no timeout other than the HTTP stack defaults.
pub struct Client {
    session: Session,
    http: reqwest::Client,
}

impl Client {
    /// Create a client. This does not start a connection
    pub fn new(session: Session) -> Result<Self, Box<dyn Error>> {
        let http = reqwest::Client::builder()
            .user_agent(crate::config::user_agent())
            .build()?;
        Ok(Self { session, http })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header(AUTHORIZATION, format!("Token {}", self.session.token()))
    }

    fn task_url(&self, id: &TaskId) -> Result<Url, url::ParseError> {
        self.session.endpoint(&format!("{}{}/", TASKS_PATH, id))
    }

    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, Box<dyn Error>> {
        let url = self.session.endpoint(path)?;
        log::debug!("GET {}", url);

        let response = self.authorized(self.http.get(url.clone()))
            .send()
            .await?;
        let response = check_status(response, &url)?;
        let items = response.json().await?;
        Ok(items)
    }

    /// Change the status of a task, sending the whole (updated) task to the server
    pub async fn set_task_status(&self, task: &Task, status: TaskStatus) -> Result<Task, Box<dyn Error>> {
        let mut updated = task.clone();
        updated.set_status(status);
        self.update_task(&updated).await
    }
}

fn check_status(response: Response, url: &Url) -> Result<Response, Box<dyn Error>> {
    if response.status().is_success() == false {
        return Err(format!("Unexpected HTTP status code {:?} for {}", response.status(), url).into());
    }
    Ok(response)
}

#[async_trait]
impl TaskSource for Client {
    async fn get_tasks(&self) -> Result<Vec<Task>, Box<dyn Error>> {
        let tasks: Vec<Task> = self.get_list(TASKS_PATH).await?;
        log::debug!("Fetched {} tasks", tasks.len());
        Ok(tasks)
    }

    async fn get_categories(&self) -> Result<Vec<Category>, Box<dyn Error>> {
        self.get_list(CATEGORIES_PATH).await
    }

    async fn get_quick_tasks(&self) -> Result<Vec<QuickTask>, Box<dyn Error>> {
        self.get_list(QUICK_TASKS_PATH).await
    }

    async fn create_task(&self, new_task: &NewTask) -> Result<Task, Box<dyn Error>> {
        let url = self.session.endpoint(TASKS_PATH)?;
        log::debug!("POST {}", url);

        let response = self.authorized(self.http.post(url.clone()))
            .json(new_task)
            .send()
            .await?;
        let response = check_status(response, &url)?;
        let created = response.json().await?;
        Ok(created)
    }

    async fn update_task(&self, task: &Task) -> Result<Task, Box<dyn Error>> {
        let url = self.task_url(task.id())?;
        log::debug!("PUT {}", url);

        let response = self.authorized(self.http.put(url.clone()))
            .json(task)
            .send()
            .await?;
        let response = check_status(response, &url)?;
        let updated = response.json().await?;
        Ok(updated)
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), Box<dyn Error>> {
        let url = self.task_url(id)?;
        log::debug!("DELETE {}", url);

        let response = self.authorized(self.http.delete(url.clone()))
            .send()
            .await?;
        check_status(response, &url)?;
        Ok(())
    }

    async fn create_quick_task(&self, new_quick_task: &NewQuickTask) -> Result<QuickTask, Box<dyn Error>> {
        let url = self.session.endpoint(QUICK_TASKS_PATH)?;
        log::debug!("POST {}", url);

        let mut body = new_quick_task.clone();
        if body.creator.is_none() {
            body.creator = self.session.user_id().map(String::from);
        }

        let response = self.authorized(self.http.post(url.clone()))
            .json(&body)
            .send()
            .await?;
        let response = check_status(response, &url)?;
        let created = response.json().await?;
        Ok(created)
    }

    async fn delete_quick_task(&self, id: QuickTaskId) -> Result<(), Box<dyn Error>> {
        let url = self.session.endpoint(&format!("{}{}/", QUICK_TASKS_PATH, id))?;
        log::debug!("DELETE {}", url);

        let response = self.authorized(self.http.delete(url.clone()))
            .send()
            .await?;
        check_status(response, &url)?;
        Ok(())
    }
}
