use crate::config::Settings;
use crate::domain::catalog::Category;
use crate::fetch::PageSource;
use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use std::time::Duration;

/// Plain GET of the category listing page.
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    http: reqwest::Client,
}

impl HttpPageFetcher {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        Self::new(&settings.user_agent, Duration::from_secs(settings.fetch_timeout_secs))
    }

    pub fn new(user_agent: &str, timeout: Duration) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent).context("invalid user agent header")?,
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .context("failed to build page fetch http client")?;

        Ok(Self { http })
    }

    pub async fn fetch_url(&self, url: &str) -> anyhow::Result<String> {
        let res = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("GET {url} failed"))?;

        let status = res.status();
        if !status.is_success() {
            anyhow::bail!("GET {url} returned HTTP {status}");
        }

        res.text()
            .await
            .with_context(|| format!("failed to read body of {url}"))
    }
}

#[async_trait::async_trait]
impl PageSource for HttpPageFetcher {
    fn source_name(&self) -> &'static str {
        "scrape"
    }

    async fn fetch_category(&self, category: &Category) -> anyhow::Result<String> {
        self.fetch_url(category.url).await
    }
}
