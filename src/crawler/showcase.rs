use std::ops::RangeInclusive;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::info;

use crate::client::HttpClient;
use crate::config::CrawlerConfig;
use crate::download::ImageLayout;
use crate::error::CrawlerError;
use crate::listing::showcase_packages;
use crate::traits::Crawler;
use crate::types::{DownloadSummary, PackageId, StickerIndex};

use super::{download_all, resolve_packages};

/// ショーケースページ巡回クローラー
///
/// 画像は `<output_dir>/` 直下に保存する。ラベルは出力しない。
pub struct ShowcaseCrawler {
    config: CrawlerConfig,
    client: HttpClient,
    pages: RangeInclusive<u32>,
}

impl ShowcaseCrawler {
    pub fn new(config: CrawlerConfig, pages: RangeInclusive<u32>) -> Result<Self, CrawlerError> {
        let client = HttpClient::new(&config)?;
        Ok(Self {
            config,
            client,
            pages,
        })
    }
}

#[async_trait]
impl Crawler for ShowcaseCrawler {
    type Listing = Vec<PackageId>;

    async fn list(&mut self) -> Result<Vec<PackageId>, CrawlerError> {
        info!("Listing showcase pages {:?}...", self.pages);

        let mut package_ids = Vec::new();
        for page in self.pages.clone() {
            package_ids.extend(showcase_packages(&self.client, &self.config, page).await?);
        }
        Ok(package_ids)
    }

    async fn resolve(&mut self, listing: &Vec<PackageId>) -> Result<StickerIndex, CrawlerError> {
        resolve_packages(&self.client, &self.config, listing).await
    }

    async fn download(&mut self, stickers: &StickerIndex) -> Result<DownloadSummary, CrawlerError> {
        download_all(&self.client, &self.config, ImageLayout::Flat, stickers).await
    }

    async fn emit(
        &mut self,
        _listing: &Vec<PackageId>,
        _stickers: &StickerIndex,
    ) -> Result<Option<PathBuf>, CrawlerError> {
        Ok(None)
    }
}
