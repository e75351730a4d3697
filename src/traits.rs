use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::CrawlerError;
use crate::types::{CrawlReport, DownloadSummary, StickerIndex};

#[async_trait]
pub trait Crawler: Send + Sync {
    /// 一覧フェーズの出力
    type Listing: Send + Sync;

    /// パッケージ一覧を取得
    async fn list(&mut self) -> Result<Self::Listing, CrawlerError>;

    /// パッケージごとのスタンプIDを解決
    async fn resolve(&mut self, listing: &Self::Listing) -> Result<StickerIndex, CrawlerError>;

    /// 画像ダウンロード
    async fn download(&mut self, stickers: &StickerIndex) -> Result<DownloadSummary, CrawlerError>;

    /// 集計結果の出力（出力しないモードは None）
    async fn emit(
        &mut self,
        listing: &Self::Listing,
        stickers: &StickerIndex,
    ) -> Result<Option<PathBuf>, CrawlerError>;

    /// 一括実行（list → resolve → download → emit）
    async fn execute(&mut self) -> Result<CrawlReport, CrawlerError> {
        let listing = self.list().await?;
        let stickers = self.resolve(&listing).await?;
        let summary = self.download(&stickers).await?;
        let label_path = self.emit(&listing, &stickers).await?;

        Ok(CrawlReport {
            packages: stickers.len(),
            stickers: stickers.values().map(Vec::len).sum(),
            downloaded: summary.downloaded,
            skipped: summary.skipped,
            label_path,
        })
    }
}
