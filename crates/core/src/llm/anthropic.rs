use crate::config::Settings;
use crate::domain::catalog::Category;
use crate::fetch::PageSource;
use crate::llm::error::SearchDiagnosticsError;
use crate::llm::text::strip_code_fences;
use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const DEFAULT_MAX_TOKENS: u32 = 4096;
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_MAX_SEARCHES: u32 = 5;

const WEB_SEARCH_TOOL_TYPE: &str = "web_search_20250305";
const WEB_SEARCH_TOOL_NAME: &str = "web_search";

/// Asks the Messages API to run a web search and hand back raw listing text
/// in the same `·`-separated layout the extractor reads from vendor pages.
#[derive(Debug, Clone)]
pub struct AnthropicSearchClient {
    http: reqwest::Client,
    api_key: HeaderValue,
    base_url: String,
    model: String,
    max_tokens: u32,
    max_searches: u32,
}

impl AnthropicSearchClient {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let mut api_key = HeaderValue::from_str(settings.require_anthropic_api_key()?)
            .context("ANTHROPIC_API_KEY is not a valid header value")?;
        api_key.set_sensitive(true);
        let base_url =
            std::env::var("ANTHROPIC_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("ANTHROPIC_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let max_tokens = env_number("ANTHROPIC_MAX_TOKENS").unwrap_or(DEFAULT_MAX_TOKENS);
        let max_searches = env_number("ANTHROPIC_MAX_SEARCHES").unwrap_or(DEFAULT_MAX_SEARCHES);
        let timeout_secs = env_number("ANTHROPIC_TIMEOUT_SECS").unwrap_or(DEFAULT_TIMEOUT_SECS);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build reqwest client")?;

        Ok(Self {
            http,
            api_key,
            base_url,
            model,
            max_tokens,
            max_searches,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub async fn search_for_deals(&self, category: &Category) -> anyhow::Result<String> {
        let req = CreateMessageRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages: vec![Message {
                role: "user",
                content: Self::user_prompt(category),
            }],
            tools: vec![Tool {
                kind: WEB_SEARCH_TOOL_TYPE,
                name: WEB_SEARCH_TOOL_NAME,
                max_uses: self.max_searches,
            }],
        };

        let (raw_json, res) = self.create_message(req).await?;

        if matches!(res.stop_reason.as_deref(), Some("max_tokens")) {
            tracing::warn!(
                category = category.key,
                max_tokens = self.max_tokens,
                "search response hit max_tokens; listing text may be truncated"
            );
        }

        let text = Self::response_text(&res);
        if text.is_empty() {
            tracing::debug!(category = category.key, response = %raw_json, "search response had no text blocks");
        }
        Ok(strip_code_fences(&text).to_string())
    }

    async fn create_message(
        &self,
        req: CreateMessageRequest,
    ) -> anyhow::Result<(serde_json::Value, CreateMessageResponse)> {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", self.api_key.clone());
        headers.insert(
            "anthropic-version",
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );

        let url = format!("{}/v1/messages", self.base_url.trim_end_matches('/'));
        let res = self
            .http
            .post(url)
            .headers(headers)
            .json(&req)
            .send()
            .await
            .context("Anthropic request failed")?;

        let status = res.status();
        let text = res
            .text()
            .await
            .context("failed to read Anthropic response body")?;
        if !status.is_success() {
            let raw_response_json = serde_json::from_str::<serde_json::Value>(&text).ok();
            return Err(SearchDiagnosticsError {
                stage: "http",
                detail: format!("status={status}"),
                raw_output: Some(text),
                raw_response_json,
            }
            .into());
        }

        let raw_json = serde_json::from_str::<serde_json::Value>(&text)
            .with_context(|| format!("failed to parse Anthropic response JSON: {text}"))?;
        let parsed = serde_json::from_value::<CreateMessageResponse>(raw_json.clone())
            .map_err(|err| SearchDiagnosticsError {
                stage: "decode",
                detail: err.to_string(),
                raw_output: None,
                raw_response_json: Some(raw_json.clone()),
            })?;
        Ok((raw_json, parsed))
    }

    fn user_prompt(category: &Category) -> String {
        format!(
            "Search {site} for {category} deals using this query: {query}\n\n\
Extract ALL deals you find in this exact format:\n\
Product Name · Price Info · Savings Info\n\n\
Return ONLY the raw deal text, no explanations or commentary.",
            site = category.vendor.domain(),
            category = category.name.to_lowercase(),
            query = category.search_query,
        )
    }

    fn response_text(res: &CreateMessageResponse) -> String {
        let mut out = String::new();
        for block in &res.content {
            if let ContentBlock::Text { text } = block {
                if !out.is_empty() {
                    out.push('\n');
                }
                out.push_str(text);
            }
        }
        out
    }
}

#[async_trait::async_trait]
impl PageSource for AnthropicSearchClient {
    fn source_name(&self) -> &'static str {
        "search"
    }

    async fn fetch_category(&self, category: &Category) -> anyhow::Result<String> {
        self.search_for_deals(category).await
    }
}

fn env_number<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.trim().parse::<T>().ok())
}

#[derive(Debug, Clone, Serialize)]
struct CreateMessageRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
    tools: Vec<Tool>,
}

#[derive(Debug, Clone, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Clone, Serialize)]
struct Tool {
    #[serde(rename = "type")]
    kind: &'static str,
    name: &'static str,
    max_uses: u32,
}

#[derive(Debug, Clone, Deserialize)]
struct CreateMessageResponse {
    content: Vec<ContentBlock>,

    #[serde(default)]
    stop_reason: Option<String>,
}

// Search results and tool-use blocks arrive interleaved with text; only text is kept.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },

    #[serde(other)]
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::find_category;
    use serde_json::json;

    #[test]
    fn keeps_only_text_blocks() {
        let res: CreateMessageResponse = serde_json::from_value(json!({
            "content": [
                {"type": "server_tool_use", "id": "srvtoolu_1", "name": "web_search", "input": {"query": "gloves"}},
                {"type": "web_search_tool_result", "tool_use_id": "srvtoolu_1", "content": []},
                {"type": "text", "text": "Glove · $30.00 $15.00 (50% off)"},
                {"type": "text", "text": "Mitt · $20.00 $15.00 (25% off)"}
            ],
            "stop_reason": "end_turn"
        }))
        .unwrap();

        assert_eq!(
            AnthropicSearchClient::response_text(&res),
            "Glove · $30.00 $15.00 (50% off)\nMitt · $20.00 $15.00 (25% off)"
        );
    }

    #[test]
    fn request_carries_web_search_tool() {
        let req = CreateMessageRequest {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            messages: vec![],
            tools: vec![Tool {
                kind: WEB_SEARCH_TOOL_TYPE,
                name: WEB_SEARCH_TOOL_NAME,
                max_uses: 3,
            }],
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["tools"][0]["type"], "web_search_20250305");
        assert_eq!(v["tools"][0]["name"], "web_search");
        assert_eq!(v["tools"][0]["max_uses"], 3);
    }

    #[test]
    fn prompt_names_site_and_query() {
        let category = find_category("golf_town_gloves").unwrap();
        let prompt = AnthropicSearchClient::user_prompt(category);
        assert!(prompt.starts_with("Search golftown.com for gloves deals"));
        assert!(prompt.contains("site:golftown.com clearance golf gloves price off"));
        assert!(prompt.contains("Product Name · Price Info · Savings Info"));
    }

    #[test]
    fn construction_requires_api_key() {
        let settings = Settings::default();
        let err = AnthropicSearchClient::from_settings(&settings).unwrap_err();
        assert!(err.to_string().contains("ANTHROPIC_API_KEY"));
    }

    #[test]
    fn construction_rejects_key_unfit_for_header() {
        let settings = Settings {
            anthropic_api_key: Some("sk-test\nsecond-line".to_string()),
            ..Settings::default()
        };
        let err = AnthropicSearchClient::from_settings(&settings).unwrap_err();
        assert_eq!(
            err.to_string(),
            "ANTHROPIC_API_KEY is not a valid header value"
        );
    }
}
