use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::task::{Context, Poll};

use tower::Service;
use tracing::info;

use crate::config::{CrawlMode, CrawlerConfig};
use crate::crawler::{EmotionCrawler, ShowcaseCrawler};
use crate::error::CrawlerError;
use crate::traits::Crawler;
use crate::types::CrawlReport;

/// クロールリクエスト
#[derive(Debug, Clone, Default)]
pub struct CrawlRequest {
    pub config: CrawlerConfig,
}

impl CrawlRequest {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            config: CrawlerConfig::new(output_dir),
        }
    }

    pub fn with_mode(mut self, mode: CrawlMode) -> Self {
        self.config.mode = mode;
        self
    }
}

impl From<CrawlerConfig> for CrawlRequest {
    fn from(config: CrawlerConfig) -> Self {
        Self { config }
    }
}

impl From<CrawlRequest> for CrawlerConfig {
    fn from(req: CrawlRequest) -> Self {
        req.config
    }
}

/// tower::Serviceを実装したクローラーサービス
#[derive(Debug, Clone, Default)]
pub struct CrawlerService {}

impl CrawlerService {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Service<CrawlRequest> for CrawlerService {
    type Response = CrawlReport;
    type Error = CrawlerError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: CrawlRequest) -> Self::Future {
        info!(
            "Crawl request received: mode={:?}, output_dir={:?}",
            req.config.mode, req.config.output_dir
        );

        Box::pin(async move {
            let config: CrawlerConfig = req.into();

            let report = match config.mode.clone() {
                CrawlMode::Emotions(emotions) => {
                    let mut crawler = EmotionCrawler::new(config, emotions)?;
                    crawler.execute().await?
                }
                CrawlMode::Showcase { pages } => {
                    let mut crawler = ShowcaseCrawler::new(config, pages)?;
                    crawler.execute().await?
                }
            };

            info!(
                "Crawl completed: packages={}, stickers={}, downloaded={}, skipped={}",
                report.packages, report.stickers, report.downloaded, report.skipped
            );

            Ok(report)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crawl_request_builder() {
        let req = CrawlRequest::new("/tmp/out").with_mode(CrawlMode::Showcase { pages: 1..=2 });

        assert_eq!(req.config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(req.config.mode, CrawlMode::Showcase { pages: 1..=2 });
    }

    #[test]
    fn test_crawl_request_to_config() {
        let req = CrawlRequest::from(CrawlerConfig::new("/tmp/x").with_limit(3));
        let config: CrawlerConfig = req.into();

        assert_eq!(config.limit, 3);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/x"));
    }
}
