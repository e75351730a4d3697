//! HTTPクライアント
//!
//! 一覧・詳細ページ・画像の取得をすべてここに集約する。リトライはしない。

use std::path::Path;

use futures::StreamExt;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use url::Url;

use crate::config::CrawlerConfig;
use crate::error::CrawlerError;

#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(config: &CrawlerConfig) -> Result<Self, CrawlerError> {
        let mut builder = Client::builder();

        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent);
        }
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| CrawlerError::ClientInit(e.to_string()))?;

        Ok(Self { client })
    }

    /// URL文字列をパース
    pub fn parse_url(raw: &str) -> Result<Url, CrawlerError> {
        Url::parse(raw).map_err(|source| CrawlerError::InvalidUrl {
            url: raw.to_string(),
            source,
        })
    }

    /// GETして2xx以外はエラーにする
    async fn get(&self, url: &Url) -> Result<Response, CrawlerError> {
        debug!("GET {}", url);

        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| CrawlerError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CrawlerError::Status {
                url: url.to_string(),
                status,
            });
        }

        Ok(resp)
    }

    pub async fn get_text(&self, url: &Url) -> Result<String, CrawlerError> {
        self.get(url)
            .await?
            .text()
            .await
            .map_err(|source| CrawlerError::Request {
                url: url.to_string(),
                source,
            })
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, CrawlerError> {
        let body = self.get_text(url).await?;
        serde_json::from_str(&body).map_err(|source| CrawlerError::Decode {
            url: url.to_string(),
            source,
        })
    }

    /// レスポンスボディを新規ファイルへストリーム書き込みし、書き込んだバイト数を返す
    ///
    /// 途中で失敗した場合は書きかけのファイルを削除する。
    pub async fn download_to(&self, url: &Url, path: &Path) -> Result<u64, CrawlerError> {
        let resp = self.get(url).await?;

        let mut file = tokio::fs::File::create(path)
            .await
            .map_err(|e| CrawlerError::file_io(path, e))?;

        match Self::copy_body(resp, &mut file, url, path).await {
            Ok(written) => Ok(written),
            Err(e) => {
                drop(file);
                if let Err(remove_err) = tokio::fs::remove_file(path).await {
                    warn!("Failed to remove partial file {:?}: {}", path, remove_err);
                }
                Err(e)
            }
        }
    }

    async fn copy_body(
        resp: Response,
        file: &mut tokio::fs::File,
        url: &Url,
        path: &Path,
    ) -> Result<u64, CrawlerError> {
        let mut stream = resp.bytes_stream();
        let mut written = 0u64;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|source| CrawlerError::Request {
                url: url.to_string(),
                source,
            })?;
            file.write_all(&chunk)
                .await
                .map_err(|e| CrawlerError::file_io(path, e))?;
            written += chunk.len() as u64;
        }

        file.flush()
            .await
            .map_err(|e| CrawlerError::file_io(path, e))?;

        Ok(written)
    }
}
