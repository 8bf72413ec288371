//! Mirror REST client: paginated historical message fetches.

use std::time::Duration;

use super::error::MirrorError;
use super::model::{MirrorMessage, MirrorMessagesResponse};
use crate::core::constants::{APP_NAME, MIRROR_REST_PAGE_LIMIT, MIRROR_REST_TIMEOUT_SECS};

/// Stateless, safe for concurrent use across topics — built once and shared
/// by every Topic Supervisor.
#[derive(Clone)]
pub struct MirrorClient {
    http: reqwest::Client,
    base_url: String,
}

impl MirrorClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(MIRROR_REST_TIMEOUT_SECS))
            .user_agent(format!("{}/{}", APP_NAME, env!("CARGO_PKG_VERSION")))
            .build()
            .expect("reqwest client configuration is valid");

        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Fetch messages for `topic_id` strictly after `cursor`, ascending by
    /// consensus timestamp.
    pub async fn fetch_messages(
        &self,
        topic_id: &str,
        cursor: Option<&str>,
        limit: u32,
    ) -> Result<(Vec<MirrorMessage>, Option<String>), MirrorError> {
        let limit = if limit == 0 {
            MIRROR_REST_PAGE_LIMIT
        } else {
            limit
        };
        let mut url = format!(
            "{}/api/v1/topics/{}/messages?limit={}",
            self.base_url, topic_id, limit
        );
        if let Some(cursor) = cursor {
            url.push_str(&format!("&timestamp=gt:{}", cursor));
        }

        self.get_page(&url).await
    }

    /// Follow a continuation URL verbatim.
    pub async fn fetch_next(
        &self,
        next_url: &str,
    ) -> Result<(Vec<MirrorMessage>, Option<String>), MirrorError> {
        let url = if next_url.starts_with("http") {
            next_url.to_string()
        } else {
            format!("{}{}", self.base_url, next_url)
        };
        self.get_page(&url).await
    }

    async fn get_page(
        &self,
        url: &str,
    ) -> Result<(Vec<MirrorMessage>, Option<String>), MirrorError> {
        let response = self.http.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(MirrorError::Status { status, body });
        }

        let body = response.text().await?;
        let parsed: MirrorMessagesResponse = serde_json::from_str(&body)?;
        Ok((parsed.messages, parsed.links.next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trims_trailing_slash() {
        let client = MirrorClient::new("https://mirror.example/api/");
        assert_eq!(client.base_url, "https://mirror.example/api");
    }
}
