//! パッケージ詳細ページからスタンプIDを取り出す

use tracing::info;
use url::Url;

use crate::client::HttpClient;
use crate::config::CrawlerConfig;
use crate::error::CrawlerError;
use crate::extract::{lines_between, sticker};
use crate::types::{PackageId, StickerId};

/// 詳細ページURL `<sticker_host>/<id>/zh-Hant`
pub fn sticker_page_url(config: &CrawlerConfig, package_id: &PackageId) -> Result<Url, CrawlerError> {
    HttpClient::parse_url(&format!(
        "{}/{}/zh-Hant",
        config.sticker_host.trim_end_matches('/'),
        package_id
    ))
}

pub async fn fetch_stickers(
    client: &HttpClient,
    config: &CrawlerConfig,
    package_id: &PackageId,
) -> Result<Vec<StickerId>, CrawlerError> {
    let fetch = async {
        let url = sticker_page_url(config, package_id)?;
        client.get_text(&url).await
    };

    let body = fetch.await.map_err(|e| CrawlerError::Stickers {
        package_id: package_id.clone(),
        source: Box::new(e),
    })?;

    let sticker_ids = parse_stickers(&body);
    info!("package {} crawled ({} stickers)", package_id, sticker_ids.len());
    Ok(sticker_ids)
}

pub fn parse_stickers(body: &str) -> Vec<StickerId> {
    lines_between(body, sticker::PREFIX, sticker::SUFFIX)
        .map(StickerId::from)
        .collect()
}
