//! `RemoteLogService` over HTTP/JSON.

use super::remote::{Credentials, RemoteLogService, Session};
use crate::errors::{AppError, AppResult};
use crate::models::entry::Entry;
use crate::models::profile::Profile;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

pub struct HttpLogService {
    base: String,
    token: Option<String>,
    http: Client,
}

impl HttpLogService {
    pub fn new(base: &str, token: Option<String>, timeout: Duration) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("HTTP client: {e}")))?;

        Ok(Self {
            base: base.trim_end_matches('/').to_string(),
            token,
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(t) => req.bearer_auth(t),
            None => req,
        }
    }

    /// Exchange credentials for a session token.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<Session> {
        let body = Credentials {
            email: email.to_string(),
            password: password.to_string(),
            full_name: None,
        };
        debug!(email, "POST /login");
        let resp = self.http.post(self.url("/login")).json(&body).send().await?;
        json_body(check(resp).await?).await
    }

    pub async fn register(&self, email: &str, password: &str, name: Option<&str>) -> AppResult<()> {
        let body = Credentials {
            email: email.to_string(),
            password: password.to_string(),
            full_name: name.map(str::to_string),
        };
        debug!(email, "POST /register");
        let resp = self
            .http
            .post(self.url("/register"))
            .json(&body)
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }
}

#[async_trait]
impl RemoteLogService for HttpLogService {
    async fn fetch_profile(&self) -> AppResult<Option<Profile>> {
        debug!("GET /profile");
        let resp = self
            .authorized(self.http.get(self.url("/profile")))
            .send()
            .await?;
        // The service answers `null` before a profile exists.
        json_body::<Option<Profile>>(check(resp).await?).await
    }

    async fn save_profile(&self, profile: &Profile) -> AppResult<Profile> {
        debug!(name = %profile.name, "POST /profile");
        let resp = self
            .authorized(self.http.post(self.url("/profile")))
            .json(profile)
            .send()
            .await?;
        check(resp).await?;
        Ok(profile.clone())
    }

    async fn fetch_entries(&self) -> AppResult<Vec<Entry>> {
        debug!("GET /logs");
        let resp = self
            .authorized(self.http.get(self.url("/logs")))
            .send()
            .await?;
        json_body(check(resp).await?).await
    }

    async fn create_entry(&self, entry: &Entry) -> AppResult<Entry> {
        // The service spreads the request body over its reply, so a
        // temporary id in the body would shadow the assigned one.
        let mut body = serde_json::to_value(entry)?;
        if let Some(obj) = body.as_object_mut() {
            obj.remove("id");
        }

        debug!(kind = entry.entry_type().et_as_str(), "POST /logs");
        let resp = self
            .authorized(self.http.post(self.url("/logs")))
            .json(&body)
            .send()
            .await?;
        let created: Entry = json_body(check(resp).await?).await?;
        if created.id.is_empty() {
            return Err(AppError::Sync("create reply carries no id".into()));
        }
        Ok(created)
    }

    async fn update_entry(&self, id: &str, entry: &Entry) -> AppResult<Entry> {
        debug!(id, "PUT /logs/:id");
        let resp = self
            .authorized(self.http.put(self.url(&format!("/logs/{id}"))))
            .json(entry)
            .send()
            .await?;
        let text = check(resp).await?.text().await?;

        // Older deployments answer `{ success: true }` instead of the entry.
        match serde_json::from_str::<Entry>(&text) {
            Ok(mut echoed) => {
                echoed.id = id.to_string();
                Ok(echoed)
            }
            Err(_) => {
                let mut sent = entry.clone();
                sent.id = id.to_string();
                Ok(sent)
            }
        }
    }

    async fn delete_entry(&self, id: &str) -> AppResult<()> {
        debug!(id, "DELETE /logs/:id");
        let resp = self
            .authorized(self.http.delete(self.url(&format!("/logs/{id}"))))
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }
}

async fn check(resp: Response) -> AppResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let msg = if body.is_empty() {
        status.to_string()
    } else {
        format!("{status}: {body}")
    };

    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::Auth(msg),
        StatusCode::NOT_FOUND => AppError::NotFound(msg),
        _ => AppError::Network(msg),
    })
}

async fn json_body<T: DeserializeOwned>(resp: Response) -> AppResult<T> {
    let text = resp.text().await?;
    serde_json::from_str(&text).map_err(|e| AppError::Network(format!("unexpected reply: {e}")))
}
