use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::types::{
    Completion, DailyActivity, ErrorBody, LeaderboardEntry, LoginRequest, MessageResponse,
    NewSkill, NewTask, Overview, Recommendation, RegisterRequest, Skill, SkillProgress, Task,
    TokenResponse, UserStats, WeakArea,
};
use crate::error::AptivaraError;

/// Backend used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Everything the client asks of the skill-tracker backend.
///
/// Implemented over HTTP by [`ApiClient`]; the TUI is written against this
/// trait so its state handling can be exercised without a server.
#[cfg_attr(test, mockall::automock)]
pub trait SkillTrackerApi {
    /// Exchange credentials for a bearer token.
    fn login(&self, email: &str, password: &str) -> Result<String, AptivaraError>;
    /// Create an account.
    fn register(&self, name: &str, email: &str, password: &str) -> Result<(), AptivaraError>;

    fn overview(&self) -> Result<Overview, AptivaraError>;
    fn user_stats(&self) -> Result<UserStats, AptivaraError>;
    fn activity_heatmap(&self, days: u32) -> Result<Vec<DailyActivity>, AptivaraError>;
    fn weak_areas(&self) -> Result<Vec<WeakArea>, AptivaraError>;
    fn ai_recommendation(&self) -> Result<String, AptivaraError>;
    fn leaderboard(&self, limit: u32) -> Result<Vec<LeaderboardEntry>, AptivaraError>;
    fn skills_progress(&self) -> Result<Vec<SkillProgress>, AptivaraError>;

    fn skills(&self) -> Result<Vec<Skill>, AptivaraError>;
    fn create_skill(&self, skill: &NewSkill) -> Result<Skill, AptivaraError>;
    fn update_skill(&self, id: i64, skill: &NewSkill) -> Result<Skill, AptivaraError>;
    fn delete_skill(&self, id: i64) -> Result<(), AptivaraError>;

    fn tasks(&self, skill_id: i64) -> Result<Vec<Task>, AptivaraError>;
    fn create_task(&self, skill_id: i64, task: &NewTask) -> Result<Task, AptivaraError>;
    fn complete_task(&self, task_id: i64) -> Result<Completion, AptivaraError>;
}

/// Blocking HTTP client for the skill-tracker REST API.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client for `base_url` with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AptivaraError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("aptivara/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Attach the bearer token used for authenticated endpoints.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// The configured base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether a token is attached.
    #[must_use]
    pub const fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(%method, path, "api request");
        self.http.request(method, self.url(path))
    }

    fn authed(&self, method: Method, path: &str) -> Result<RequestBuilder, AptivaraError> {
        let token = self.token.as_deref().ok_or(AptivaraError::NotLoggedIn)?;
        Ok(self.request(method, path).bearer_auth(token))
    }

    /// Send a request and decode a JSON body, mapping non-2xx statuses.
    fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, AptivaraError> {
        self.send_or(request, None)
    }

    /// Like [`Self::send`], using `fallback` when an error body has no detail.
    fn send_or<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        fallback: Option<&str>,
    ) -> Result<T, AptivaraError> {
        let response = request.send()?;
        let status = response.status();
        let body = response.text()?;
        debug!(status = status.as_u16(), bytes = body.len(), "api response");

        if !status.is_success() {
            let detail = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message())
                .or_else(|| fallback.map(str::to_string));
            return Err(AptivaraError::from_status(status.as_u16(), detail));
        }

        serde_json::from_str(&body).map_err(AptivaraError::Parse)
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AptivaraError> {
        self.send(self.authed(Method::GET, path)?)
    }
}

impl SkillTrackerApi for ApiClient {
    fn login(&self, email: &str, password: &str) -> Result<String, AptivaraError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response: TokenResponse = self
            .send(self.request(Method::POST, "/auth/login").json(&body))
            .map_err(|e| match e {
                AptivaraError::Unauthorized(_) | AptivaraError::Api { .. } => {
                    AptivaraError::InvalidCredentials
                }
                other => other,
            })?;

        Ok(response.access_token)
    }

    fn register(&self, name: &str, email: &str, password: &str) -> Result<(), AptivaraError> {
        let body = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };

        let _: MessageResponse = self.send_or(
            self.request(Method::POST, "/auth/register").json(&body),
            Some("Registration failed"),
        )?;
        Ok(())
    }

    fn overview(&self) -> Result<Overview, AptivaraError> {
        self.get("/dashboard/overview")
    }

    fn user_stats(&self) -> Result<UserStats, AptivaraError> {
        self.get("/dashboard/user-stats")
    }

    fn activity_heatmap(&self, days: u32) -> Result<Vec<DailyActivity>, AptivaraError> {
        self.get(&format!("/dashboard/activity-heatmap?days={days}"))
    }

    fn weak_areas(&self) -> Result<Vec<WeakArea>, AptivaraError> {
        self.get("/dashboard/weak-areas")
    }

    fn ai_recommendation(&self) -> Result<String, AptivaraError> {
        let rec: Recommendation = self.get("/dashboard/ai-recommendation")?;
        Ok(rec.recommendation)
    }

    fn leaderboard(&self, limit: u32) -> Result<Vec<LeaderboardEntry>, AptivaraError> {
        self.get(&format!("/dashboard/leaderboard?limit={limit}"))
    }

    fn skills_progress(&self) -> Result<Vec<SkillProgress>, AptivaraError> {
        self.get("/dashboard/skills-progress")
    }

    fn skills(&self) -> Result<Vec<Skill>, AptivaraError> {
        self.get("/skills/")
    }

    fn create_skill(&self, skill: &NewSkill) -> Result<Skill, AptivaraError> {
        if skill.name.trim().is_empty() {
            return Err(AptivaraError::InvalidInput("Skill name is required".to_string()));
        }
        self.send(self.authed(Method::POST, "/skills/")?.json(skill))
    }

    fn update_skill(&self, id: i64, skill: &NewSkill) -> Result<Skill, AptivaraError> {
        self.send(self.authed(Method::PUT, &format!("/skills/{id}"))?.json(skill))
    }

    fn delete_skill(&self, id: i64) -> Result<(), AptivaraError> {
        let _: MessageResponse = self.send(self.authed(Method::DELETE, &format!("/skills/{id}"))?)?;
        Ok(())
    }

    fn tasks(&self, skill_id: i64) -> Result<Vec<Task>, AptivaraError> {
        self.get(&format!("/tasks/{skill_id}"))
    }

    fn create_task(&self, skill_id: i64, task: &NewTask) -> Result<Task, AptivaraError> {
        self.send(self.authed(Method::POST, &format!("/tasks/{skill_id}"))?.json(task))
    }

    fn complete_task(&self, task_id: i64) -> Result<Completion, AptivaraError> {
        self.send(self.authed(Method::PUT, &format!("/tasks/{task_id}/complete"))?)
    }
}
