use std::path::PathBuf;

use async_trait::async_trait;
use tracing::info;

use crate::client::HttpClient;
use crate::config::CrawlerConfig;
use crate::download::ImageLayout;
use crate::error::CrawlerError;
use crate::label::{write_csv, LabelMatrix, LABEL_FILE};
use crate::listing::search_packages;
use crate::traits::Crawler;
use crate::types::{DownloadSummary, Emotion, EmotionPackages, StickerIndex};

use super::{download_all, resolve_packages};

/// 感情カテゴリ検索クローラー
///
/// 画像は `<output_dir>/image/` に保存し、最後に `label.csv` を出力する。
pub struct EmotionCrawler {
    config: CrawlerConfig,
    client: HttpClient,
    emotions: Vec<Emotion>,
}

impl EmotionCrawler {
    pub fn new(config: CrawlerConfig, emotions: Vec<Emotion>) -> Result<Self, CrawlerError> {
        let client = HttpClient::new(&config)?;
        Ok(Self {
            config,
            client,
            emotions,
        })
    }

    pub fn label_path(&self) -> PathBuf {
        self.config.output_dir.join(LABEL_FILE)
    }
}

#[async_trait]
impl Crawler for EmotionCrawler {
    type Listing = EmotionPackages;

    async fn list(&mut self) -> Result<EmotionPackages, CrawlerError> {
        info!("Listing packages for {} emotions...", self.emotions.len());

        let mut emotion_packages = EmotionPackages::new();
        for &emotion in &self.emotions {
            let package_ids = search_packages(&self.client, &self.config, emotion).await?;
            emotion_packages
                .entry(emotion)
                .or_default()
                .extend(package_ids);
        }
        Ok(emotion_packages)
    }

    async fn resolve(&mut self, listing: &EmotionPackages) -> Result<StickerIndex, CrawlerError> {
        resolve_packages(&self.client, &self.config, listing.values().flatten()).await
    }

    async fn download(&mut self, stickers: &StickerIndex) -> Result<DownloadSummary, CrawlerError> {
        download_all(&self.client, &self.config, ImageLayout::Nested, stickers).await
    }

    async fn emit(
        &mut self,
        listing: &EmotionPackages,
        stickers: &StickerIndex,
    ) -> Result<Option<PathBuf>, CrawlerError> {
        let matrix = LabelMatrix::build(listing, stickers);
        let path = self.label_path();
        write_csv(&path, &matrix.to_rows()).await?;
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emotion_crawler_new() {
        let config = CrawlerConfig::new("/tmp/stickers");
        let crawler = EmotionCrawler::new(config, Emotion::ALL.to_vec()).unwrap();
        assert_eq!(crawler.emotions.len(), 6);
        assert_eq!(crawler.label_path(), PathBuf::from("/tmp/stickers/label.csv"));
    }
}
