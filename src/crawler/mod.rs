//! モード別クローラー
//!
//! - `EmotionCrawler`: 感情検索 → ラベルCSV出力
//! - `ShowcaseCrawler`: ショーケースページ巡回（画像のみ）

mod emotion;
mod showcase;

pub use emotion::EmotionCrawler;
pub use showcase::ShowcaseCrawler;

use tracing::debug;

use crate::client::HttpClient;
use crate::config::CrawlerConfig;
use crate::download::{download_sticker, ImageLayout};
use crate::error::CrawlerError;
use crate::stickers::fetch_stickers;
use crate::types::{DownloadSummary, PackageId, StickerIndex};

/// 各パッケージのスタンプIDを取得（同じパッケージは1回だけ）
async fn resolve_packages<'a, I>(
    client: &HttpClient,
    config: &CrawlerConfig,
    package_ids: I,
) -> Result<StickerIndex, CrawlerError>
where
    I: IntoIterator<Item = &'a PackageId>,
{
    let mut index = StickerIndex::new();
    for package_id in package_ids {
        if index.contains_key(package_id) {
            debug!("package {} already resolved", package_id);
            continue;
        }
        let sticker_ids = fetch_stickers(client, config, package_id).await?;
        index.insert(package_id.clone(), sticker_ids);
    }
    Ok(index)
}

/// 全スタンプ画像を順にダウンロード
async fn download_all(
    client: &HttpClient,
    config: &CrawlerConfig,
    layout: ImageLayout,
    stickers: &StickerIndex,
) -> Result<DownloadSummary, CrawlerError> {
    let mut summary = DownloadSummary::default();
    for (package_id, sticker_ids) in stickers {
        for sticker_id in sticker_ids {
            let outcome = download_sticker(client, config, layout, package_id, sticker_id).await?;
            summary.record(&outcome);
        }
    }
    Ok(summary)
}
