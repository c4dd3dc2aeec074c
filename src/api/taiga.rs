use super::{ActivityFields, ApiError, ProjectContext, Session, TaskTracker};
use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Client, RequestBuilder, Response,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Upper bound for every request, connection included.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Browser-like identity sent by default. Some Taiga deployments sit behind
/// filters that reject non-browser clients.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub const ACTIVITY_DATE_ATTRIBUTE: &str = "Activity Date";
pub const START_TIME_ATTRIBUTE: &str = "Start Time";
pub const TIME_SPENT_ATTRIBUTE: &str = "Total Time Spent";

/// Version stamp sent with custom attribute updates. Taiga accepts it only
/// while the task has never been edited.
const CUSTOM_ATTRIBUTES_VERSION: u32 = 1;

const API_PREFIX: &str = "api/v1";
const AUTH_URL: &str = "auth";
const PROJECT_BY_SLUG_URL: &str = "projects/by_slug";
const STORY_BY_REF_URL: &str = "userstories/by_ref";
const TASK_STATUSES_URL: &str = "task-statuses";
const TASKS_URL: &str = "tasks";
const CUSTOM_ATTRIBUTES_URL: &str = "task-custom-attributes";
const CUSTOM_ATTRIBUTES_VALUES_URL: &str = "tasks/custom-attributes-values";

#[derive(Serialize, Debug)]
struct LoginCredentials<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize, Debug)]
struct AuthResponse {
    auth_token: String,
    id: i64,
    #[serde(default)]
    full_name: String,
}

#[derive(Deserialize, Debug)]
struct IdResponse {
    id: i64,
}

#[derive(Deserialize, Debug)]
struct NamedItem {
    id: i64,
    name: String,
}

#[derive(Serialize, Debug)]
struct NewTask<'a> {
    subject: &'a str,
    assigned_to: i64,
    status: i64,
    project: i64,
    user_story: i64,
    is_blocked: bool,
    is_closed: bool,
}

#[derive(Serialize, Debug)]
struct CustomAttributesPatch {
    attributes_values: BTreeMap<String, String>,
    version: u32,
}

/// Maps the project's custom attribute definitions to the values to write,
/// keyed by attribute id. Attributes with other names are left untouched.
fn attribute_values(attributes: &[NamedItem], fields: &ActivityFields<'_>) -> BTreeMap<String, String> {
    attributes
        .iter()
        .filter_map(|attribute| {
            let value = match attribute.name.as_str() {
                ACTIVITY_DATE_ATTRIBUTE => fields.date,
                START_TIME_ATTRIBUTE => fields.start_time,
                TIME_SPENT_ATTRIBUTE => fields.spent,
                _ => return None,
            };
            Some((attribute.id.to_string(), value.to_owned()))
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct Taiga {
    client: Client,
    config: TaigaConfig,
}

impl Taiga {
    pub fn new(config: &TaigaConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}/{}", self.config.api_url.trim_end_matches('/'), API_PREFIX, path)
    }

    /// Sends the request and turns any non-2xx answer into [`ApiError::Http`].
    async fn execute(&self, request: RequestBuilder, session: Option<&Session>) -> Result<Response, ApiError> {
        let request = match session {
            Some(session) => request.bearer_auth(&session.auth_token),
            None => request,
        };
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Http {
            status: status.as_u16(),
            body,
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder, session: Option<&Session>) -> Result<T, ApiError> {
        let response = self.execute(request, session).await?;
        Ok(response.json::<T>().await?)
    }
}

impl TaskTracker for Taiga {
    async fn authenticate(&self, username: &str, password: &str) -> Result<Session, ApiError> {
        let credentials = LoginCredentials {
            kind: "normal",
            username,
            password,
        };
        let request = self.client.post(self.url(AUTH_URL)).json(&credentials);
        let auth = self
            .fetch::<AuthResponse>(request, None)
            .await
            .map_err(|e| ApiError::Auth(e.to_string()))?;

        Ok(Session {
            auth_token: auth.auth_token,
            user_id: auth.id,
            display_name: auth.full_name,
        })
    }

    async fn resolve_project_id(&self, session: &Session, slug: &str) -> Result<i64, ApiError> {
        let request = self.client.get(self.url(PROJECT_BY_SLUG_URL)).query(&[("slug", slug)]);
        let project = self
            .fetch::<IdResponse>(request, Some(session))
            .await
            .map_err(|e| e.not_found_as(|| format!("project '{}'", slug)))?;
        Ok(project.id)
    }

    async fn resolve_story_id(&self, session: &Session, reference: &str, project_id: i64) -> Result<i64, ApiError> {
        let project = project_id.to_string();
        let request = self
            .client
            .get(self.url(STORY_BY_REF_URL))
            .query(&[("ref", reference), ("project", project.as_str())]);
        let story = self
            .fetch::<IdResponse>(request, Some(session))
            .await
            .map_err(|e| e.not_found_as(|| format!("user story '{}'", reference)))?;
        Ok(story.id)
    }

    async fn resolve_status_id(&self, session: &Session, project_id: i64, name: &str) -> Result<i64, ApiError> {
        let request = self.client.get(self.url(TASK_STATUSES_URL)).query(&[("project", project_id)]);
        let statuses = self.fetch::<Vec<NamedItem>>(request, Some(session)).await?;

        statuses
            .into_iter()
            .find(|status| status.name == name)
            .map(|status| status.id)
            .ok_or_else(|| ApiError::NotFound(format!("status {}", name)))
    }

    async fn create_task(&self, session: &Session, subject: &str, context: &ProjectContext) -> Result<i64, ApiError> {
        let task = NewTask {
            subject,
            assigned_to: session.user_id,
            status: context.done_status_id,
            project: context.project_id,
            user_story: context.story_id,
            is_blocked: false,
            is_closed: true,
        };
        let request = self.client.post(self.url(TASKS_URL)).json(&task);
        let created = self.fetch::<IdResponse>(request, Some(session)).await?;
        Ok(created.id)
    }

    async fn update_custom_fields(
        &self,
        session: &Session,
        task_id: i64,
        project_id: i64,
        fields: &ActivityFields<'_>,
    ) -> Result<(), ApiError> {
        let request = self.client.get(self.url(CUSTOM_ATTRIBUTES_URL)).query(&[("project", project_id)]);
        let attributes = self.fetch::<Vec<NamedItem>>(request, Some(session)).await?;

        let patch = CustomAttributesPatch {
            attributes_values: attribute_values(&attributes, fields),
            version: CUSTOM_ATTRIBUTES_VERSION,
        };
        let url = self.url(&format!("{}/{}", CUSTOM_ATTRIBUTES_VALUES_URL, task_id));
        self.execute(self.client.patch(url).json(&patch), Some(session)).await?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaigaConfig {
    /// Base URL of the Taiga instance, without the `/api/v1` suffix.
    pub api_url: String,
    pub user_agent: String,
}

impl TaigaConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    pub fn with_user_agent(self, user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            ..self
        }
    }
}
