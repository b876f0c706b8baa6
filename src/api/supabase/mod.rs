use crate::api::error::ApiError;
use crate::api::models::*;
use chrono::Utc;
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

const DEFAULT_SUPABASE_URL: &str = "http://localhost:54321";
const DEFAULT_ANON_KEY: &str = "";

/// Connection details for the hosted backend. Compile-time env overrides let
/// deployments point at their own project.
#[derive(Debug, Clone, PartialEq)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl SupabaseConfig {
    pub fn from_env() -> Self {
        let url = option_env!("SUPABASE_URL").unwrap_or(DEFAULT_SUPABASE_URL);
        let anon_key = option_env!("SUPABASE_ANON_KEY").unwrap_or(DEFAULT_ANON_KEY);
        if anon_key.is_empty() {
            tracing::warn!("SUPABASE_ANON_KEY not set at build time; requests will be anonymous");
        }
        Self {
            url: url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        }
    }
}

/// Thin REST client. Cheap to construct, so call sites build one per request
/// from the current config and session signals.
pub struct SupabaseClient {
    pub config: SupabaseConfig,
    access_token: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct ServiceErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

impl ServiceErrorBody {
    fn into_message(self) -> Option<String> {
        self.message.or(self.msg).or(self.error_description)
    }
}

impl SupabaseClient {
    pub fn new(config: SupabaseConfig) -> Self {
        Self {
            config,
            access_token: None,
        }
    }

    pub fn with_session(config: SupabaseConfig, session: Option<&AuthSession>) -> Self {
        Self {
            access_token: session.map(|s| s.access_token.clone()),
            config,
        }
    }

    fn bearer(&self) -> &str {
        self.access_token.as_deref().unwrap_or(&self.config.anon_key)
    }

    fn rest_request(
        &self,
        method: reqwest::Method,
        table: &str,
        query: &str,
    ) -> reqwest::RequestBuilder {
        let url = if query.is_empty() {
            format!("{}/rest/v1/{}", self.config.url, table)
        } else {
            format!("{}/rest/v1/{}?{}", self.config.url, table, query)
        };
        HTTP_CLIENT
            .request(method, &url)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(self.bearer())
    }

    fn auth_request(&self, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/auth/v1/{}", self.config.url, path);
        HTTP_CLIENT
            .post(&url)
            .header("apikey", &self.config.anon_key)
    }

    async fn expect_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(ApiError::Unauthorized);
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ServiceErrorBody>(&body)
            .ok()
            .and_then(ServiceErrorBody::into_message)
            .unwrap_or(body);
        let message = if message.trim().is_empty() {
            "unknown error".to_string()
        } else {
            message
        };
        Err(ApiError::Service {
            status: status.as_u16(),
            message,
        })
    }

    async fn get_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &str,
    ) -> Result<Vec<T>, ApiError> {
        let response = self
            .rest_request(reqwest::Method::GET, table, query)
            .send()
            .await?;
        let response = Self::expect_success(response).await?;
        Ok(response.json().await?)
    }

    async fn insert_row(
        &self,
        table: &str,
        query: &str,
        body: &serde_json::Value,
        prefer: &str,
    ) -> Result<(), ApiError> {
        let response = self
            .rest_request(reqwest::Method::POST, table, query)
            .header("Prefer", prefer)
            .json(body)
            .send()
            .await?;
        Self::expect_success(response).await?;
        Ok(())
    }

    async fn patch_rows(
        &self,
        table: &str,
        query: &str,
        body: &serde_json::Value,
    ) -> Result<(), ApiError> {
        let response = self
            .rest_request(reqwest::Method::PATCH, table, query)
            .header("Prefer", "return=minimal")
            .json(body)
            .send()
            .await?;
        Self::expect_success(response).await?;
        Ok(())
    }

    async fn delete_rows(&self, table: &str, query: &str) -> Result<(), ApiError> {
        let response = self
            .rest_request(reqwest::Method::DELETE, table, query)
            .send()
            .await?;
        Self::expect_success(response).await?;
        Ok(())
    }
}

// Percent-encode a single filter value so ids and free text survive the
// query string.
fn encode_query_value(s: &str) -> String {
    let mut result = String::new();
    for c in s.chars() {
        match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '-' | '_' | '.' | '~' => result.push(c),
            ' ' => result.push_str("%20"),
            _ => {
                for byte in c.to_string().as_bytes() {
                    result.push_str(&format!("%{:02X}", byte));
                }
            }
        }
    }
    result
}

include!("auth.rs");
include!("catalog.rs");
include!("library.rs");
include!("engagement.rs");
