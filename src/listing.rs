//! パッケージ一覧の取得
//!
//! 検索モードはJSON API、ショーケースモードはHTMLページから取り出す。

use tracing::info;
use url::Url;

use crate::client::HttpClient;
use crate::config::CrawlerConfig;
use crate::error::CrawlerError;
use crate::extract::{lines_between, showcase};
use crate::types::{Emotion, PackageId, SearchResponse};

/// 感情検索URL
pub fn search_url(config: &CrawlerConfig, emotion: Emotion) -> Result<Url, CrawlerError> {
    let mut url = HttpClient::parse_url(&config.search_url)?;
    url.query_pairs_mut()
        .append_pair("limit", &config.limit.to_string())
        .append_pair("query", emotion.as_str())
        .append_pair("offset", "0")
        .append_pair("type", "ALL")
        .append_pair("includeFacets", "false");
    Ok(url)
}

/// ショーケースURL（1始まりのページ番号）
pub fn showcase_url(config: &CrawlerConfig, page: u32) -> Result<Url, CrawlerError> {
    let mut url = HttpClient::parse_url(&config.showcase_url)?;
    url.query_pairs_mut().append_pair("page", &page.to_string());
    Ok(url)
}

/// 感情カテゴリでパッケージIDを検索（最大 `limit` 件、レスポンス順）
pub async fn search_packages(
    client: &HttpClient,
    config: &CrawlerConfig,
    emotion: Emotion,
) -> Result<Vec<PackageId>, CrawlerError> {
    let fetch = async {
        let url = search_url(config, emotion)?;
        let resp: SearchResponse = client.get_json(&url).await?;
        Ok::<_, CrawlerError>(resp.items.into_iter().map(|item| item.id).collect::<Vec<_>>())
    };

    let package_ids = fetch.await.map_err(|e| CrawlerError::Listing {
        emotion,
        source: Box::new(e),
    })?;

    info!("[{}] package crawled {}", emotion, package_ids.len());
    Ok(package_ids)
}

/// ショーケースページからパッケージIDを抽出
pub async fn showcase_packages(
    client: &HttpClient,
    config: &CrawlerConfig,
    page: u32,
) -> Result<Vec<PackageId>, CrawlerError> {
    let fetch = async {
        let url = showcase_url(config, page)?;
        client.get_text(&url).await
    };

    let body = fetch.await.map_err(|e| CrawlerError::Showcase {
        page,
        source: Box::new(e),
    })?;

    let package_ids = parse_showcase(&body);
    info!("[page {}] package crawled {}", page, package_ids.len());
    Ok(package_ids)
}

/// ショーケースHTMLからパッケージIDを行順に取り出す
pub fn parse_showcase(body: &str) -> Vec<PackageId> {
    lines_between(body, showcase::PREFIX, showcase::SUFFIX)
        .map(PackageId::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_query_parameters() {
        let url = search_url(&CrawlerConfig::default(), Emotion::Fearful).unwrap();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert_eq!(url.path(), "/api/search/sticker");
        assert_eq!(
            pairs,
            vec![
                ("limit".to_string(), "5".to_string()),
                ("query".to_string(), "Fearful".to_string()),
                ("offset".to_string(), "0".to_string()),
                ("type".to_string(), "ALL".to_string()),
                ("includeFacets".to_string(), "false".to_string()),
            ]
        );
    }

    #[test]
    fn test_showcase_url_page() {
        let url = showcase_url(&CrawlerConfig::default(), 3).unwrap();
        assert_eq!(url.query(), Some("page=3"));
    }

    #[test]
    fn test_invalid_search_url() {
        let config = CrawlerConfig::default().with_search_url("::bad::");
        let err = search_url(&config, Emotion::Happy).unwrap_err();
        assert!(matches!(err, CrawlerError::InvalidUrl { .. }));
    }

    #[test]
    fn test_parse_showcase() {
        let body = format!(
            "<li>\n{p}111{s}\n<span>{p}222{s}</span>\n  {p}333{s}\n</li>",
            p = showcase::PREFIX,
            s = showcase::SUFFIX
        );
        assert_eq!(
            parse_showcase(&body),
            vec![PackageId::from("111"), PackageId::from("333")]
        );
    }
}
