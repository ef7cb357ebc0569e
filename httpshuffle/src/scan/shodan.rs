//! Shodan検索APIクライアント
//!
//! `/shodan/host/search` を1ページ目から順に呼び出し、マッチが0件の
//! ページが返るまで結果を集める。どこかのページで失敗した場合は
//! それまでの結果を捨ててエラーを返す。

use super::ScanSource;
use crate::common::error::ScanError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

/// デフォルトのAPIベースURL
pub const DEFAULT_BASE_URL: &str = "https://api.shodan.io";

/// デフォルトの検索クエリ
pub const DEFAULT_QUERY: &str = "product:SimpleHTTPServer";

/// 1リクエストのタイムアウト（秒）
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    matches: Vec<SearchMatch>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchMatch {
    ip_str: String,
    port: u16,
}

impl SearchMatch {
    fn to_url(&self) -> String {
        format!("http://{}:{}", self.ip_str, self.port)
    }
}

/// Shodan検索クライアント
#[derive(Clone)]
pub struct ShodanClient {
    client: Client,
    api_key: String,
    base_url: String,
    query: String,
    max_pages: Option<u32>,
}

impl ShodanClient {
    /// APIキーを指定して作成
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            query: DEFAULT_QUERY.to_string(),
            max_pages: None,
        }
    }

    /// ベースURLを設定（末尾のスラッシュは除去）
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// 検索クエリを設定
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// 取得ページ数の上限を設定（`None` で無制限）
    pub fn with_max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// HTTPクライアントを差し替える
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// 1ページ分を取得してURLに変換する
    async fn fetch_page(&self, page: u32) -> Result<Vec<String>, ScanError> {
        let url = format!("{}/shodan/host/search", self.base_url);
        let page_param = page.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("query", self.query.as_str()),
                ("page", page_param.as_str()),
            ])
            .send()
            .await
            .map_err(|source| ScanError::Request { page, source })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| ScanError::Request { page, source })?;

        if !status.is_success() {
            // エラー時もJSONで理由が返ることが多い
            if let Ok(SearchResponse {
                error: Some(message),
                ..
            }) = serde_json::from_str::<SearchResponse>(&body)
            {
                return Err(ScanError::Api { page, message });
            }
            return Err(ScanError::Status {
                page,
                status: status.as_u16(),
            });
        }

        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|source| ScanError::Parse { page, source })?;

        if let Some(message) = parsed.error {
            return Err(ScanError::Api { page, message });
        }

        Ok(parsed.matches.iter().map(SearchMatch::to_url).collect())
    }
}

#[async_trait]
impl ScanSource for ShodanClient {
    async fn fetch(&self) -> Result<Vec<String>, ScanError> {
        if self.api_key.trim().is_empty() {
            return Err(ScanError::MissingApiKey);
        }

        info!(query = %self.query, "Starting endpoint scan");

        let mut urls = Vec::new();
        let mut page: u32 = 1;
        loop {
            if let Some(max) = self.max_pages {
                if page > max {
                    warn!(max_pages = max, "Scan page limit reached, stopping");
                    break;
                }
            }

            let found = self.fetch_page(page).await.map_err(|e| {
                warn!(page, error = %e, "Scan aborted");
                e
            })?;

            if found.is_empty() {
                debug!(page, "No more matches");
                break;
            }

            debug!(page, matches = found.len(), "Fetched scan page");
            urls.extend(found);
            page += 1;
        }

        info!(count = urls.len(), pages = page - 1, "Scan complete");
        Ok(urls)
    }
}
