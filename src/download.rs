//! スタンプ画像のダウンロード
//!
//! 保存先に同名ファイルがあれば中身は確認せずスキップする。再実行時の唯一の再開手段。

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::info;
use url::Url;

use crate::client::HttpClient;
use crate::config::CrawlerConfig;
use crate::error::CrawlerError;
use crate::types::{image_file_name, DownloadOutcome, PackageId, StickerId};

/// 画像の置き方
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageLayout {
    /// `<output_dir>/image/<file>`
    Nested,
    /// `<output_dir>/<file>`
    Flat,
}

pub fn image_path(
    output_dir: &Path,
    layout: ImageLayout,
    package_id: &PackageId,
    sticker_id: &StickerId,
) -> PathBuf {
    let file_name = image_file_name(package_id, sticker_id);
    match layout {
        ImageLayout::Nested => output_dir.join("image").join(file_name),
        ImageLayout::Flat => output_dir.join(file_name),
    }
}

/// 画像URL `<image_host>/<sticker_id>/iPhone/sticker@2x.png`
pub fn image_url(config: &CrawlerConfig, sticker_id: &StickerId) -> Result<Url, CrawlerError> {
    HttpClient::parse_url(&format!(
        "{}/{}/iPhone/sticker@2x.png",
        config.image_host.trim_end_matches('/'),
        sticker_id
    ))
}

pub async fn download_sticker(
    client: &HttpClient,
    config: &CrawlerConfig,
    layout: ImageLayout,
    package_id: &PackageId,
    sticker_id: &StickerId,
) -> Result<DownloadOutcome, CrawlerError> {
    let path = image_path(&config.output_dir, layout, package_id, sticker_id);

    fetch_if_missing(client, config, sticker_id, path)
        .await
        .map_err(|e| CrawlerError::Download {
            package_id: package_id.clone(),
            sticker_id: sticker_id.clone(),
            source: Box::new(e),
        })
}

async fn fetch_if_missing(
    client: &HttpClient,
    config: &CrawlerConfig,
    sticker_id: &StickerId,
    path: PathBuf,
) -> Result<DownloadOutcome, CrawlerError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| CrawlerError::file_io(parent, e))?;
    }

    match tokio::fs::metadata(&path).await {
        Ok(_) => {
            info!("{:?} existed!", path);
            return Ok(DownloadOutcome::Skipped(path));
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(CrawlerError::file_io(&path, e)),
    }

    let url = image_url(config, sticker_id)?;
    let written = client.download_to(&url, &path).await?;
    info!("{:?} download successfully. ({} bytes)", path, written);

    Ok(DownloadOutcome::Downloaded(path))
}
