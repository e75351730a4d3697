use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::error::CrawlerError;
use crate::types::Emotion;

/// 検索APIで1感情あたりに取得するパッケージ数
pub const DEFAULT_LIMIT: u32 = 5;

pub const SEARCH_URL: &str = "https://store.line.me/api/search/sticker";
pub const SHOWCASE_URL: &str = "https://store.line.me/stickershop/showcase/top/zh-Hant";
pub const STICKER_HOST: &str = "https://store.line.me/stickershop/product";
pub const IMAGE_HOST: &str = "https://stickershop.line-scdn.net/stickershop/v1/sticker";

/// パッケージの探し方（デプロイごとにどちらか一方）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlMode {
    /// 感情カテゴリで検索APIを叩く（ラベルCSVを出力）
    Emotions(Vec<Emotion>),
    /// ショーケースページを順に読む（1始まり）
    Showcase { pages: RangeInclusive<u32> },
}

impl Default for CrawlMode {
    fn default() -> Self {
        CrawlMode::Emotions(Emotion::ALL.to_vec())
    }
}

#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    pub output_dir: PathBuf,
    pub mode: CrawlMode,
    pub limit: u32,
    pub search_url: String,
    pub showcase_url: String,
    pub sticker_host: String,
    pub image_host: String,
    pub user_agent: Option<String>,
    /// 未指定ならトランスポートの既定値に任せる
    pub timeout: Option<Duration>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./output"),
            mode: CrawlMode::default(),
            limit: DEFAULT_LIMIT,
            search_url: SEARCH_URL.to_string(),
            showcase_url: SHOWCASE_URL.to_string(),
            sticker_host: STICKER_HOST.to_string(),
            image_host: IMAGE_HOST.to_string(),
            user_agent: None,
            timeout: None,
        }
    }
}

impl CrawlerConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    /// 環境変数から設定を読む（すべて任意）
    ///
    /// - `STICKER_OUTPUT_DIR`: 出力ディレクトリ
    /// - `STICKER_MODE`: `emotion` | `showcase`
    /// - `STICKER_PAGES`: ショーケースのページ範囲（`3` または `1-5`）
    pub fn from_env() -> Result<Self, CrawlerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// `from_env` の本体。値の取り出し方だけ差し替えられる
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CrawlerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup("STICKER_OUTPUT_DIR") {
            config = config.with_output_dir(dir);
        }

        let pages = lookup("STICKER_PAGES");
        match lookup("STICKER_MODE").as_deref() {
            None | Some("emotion") => {
                if let Some(raw) = pages {
                    warn!("STICKER_PAGES={} is ignored outside showcase mode", raw);
                }
            }
            Some("showcase") => {
                let pages = match pages.as_deref() {
                    Some(raw) => parse_pages(raw)?,
                    None => 1..=1,
                };
                config = config.with_mode(CrawlMode::Showcase { pages });
            }
            Some(other) => {
                return Err(CrawlerError::Config(format!("不明なモード: {}", other)));
            }
        }

        Ok(config)
    }

    pub fn with_output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = path.into();
        self
    }

    pub fn with_mode(mut self, mode: CrawlMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_search_url(mut self, url: impl Into<String>) -> Self {
        self.search_url = url.into();
        self
    }

    pub fn with_showcase_url(mut self, url: impl Into<String>) -> Self {
        self.showcase_url = url.into();
        self
    }

    pub fn with_sticker_host(mut self, host: impl Into<String>) -> Self {
        self.sticker_host = host.into();
        self
    }

    pub fn with_image_host(mut self, host: impl Into<String>) -> Self {
        self.image_host = host.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// `3` や `1-5` をページ範囲に変換
pub fn parse_pages(raw: &str) -> Result<RangeInclusive<u32>, CrawlerError> {
    let invalid = || CrawlerError::Config(format!("不正なページ範囲: {}", raw));

    let (start, end) = match raw.split_once('-') {
        Some((a, b)) => (a.trim(), b.trim()),
        None => (raw.trim(), raw.trim()),
    };
    let start: u32 = start.parse().map_err(|_| invalid())?;
    let end: u32 = end.parse().map_err(|_| invalid())?;

    if start == 0 || start > end {
        return Err(invalid());
    }
    Ok(start..=end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CrawlerConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("./output"));
        assert_eq!(config.limit, 5);
        assert_eq!(config.mode, CrawlMode::Emotions(Emotion::ALL.to_vec()));
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = CrawlerConfig::new("/tmp/out")
            .with_limit(10)
            .with_mode(CrawlMode::Showcase { pages: 2..=4 })
            .with_image_host("http://localhost:9000/img")
            .with_timeout(Duration::from_secs(30));

        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.limit, 10);
        assert_eq!(config.mode, CrawlMode::Showcase { pages: 2..=4 });
        assert_eq!(config.image_host, "http://localhost:9000/img");
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    }

    fn lookup_from<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key: &str| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = CrawlerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("./output"));
        assert_eq!(config.mode, CrawlMode::Emotions(Emotion::ALL.to_vec()));
    }

    #[test]
    fn test_from_lookup_showcase_mode() {
        let vars = [
            ("STICKER_OUTPUT_DIR", "/tmp/showcase"),
            ("STICKER_MODE", "showcase"),
            ("STICKER_PAGES", "2-3"),
        ];
        let config = CrawlerConfig::from_lookup(lookup_from(&vars)).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/tmp/showcase"));
        assert_eq!(config.mode, CrawlMode::Showcase { pages: 2..=3 });

        let config =
            CrawlerConfig::from_lookup(lookup_from(&[("STICKER_MODE", "showcase")])).unwrap();
        assert_eq!(config.mode, CrawlMode::Showcase { pages: 1..=1 });
    }

    #[test]
    fn test_from_lookup_pages_ignored_in_emotion_mode() {
        let config = CrawlerConfig::from_lookup(lookup_from(&[("STICKER_PAGES", "1-9")])).unwrap();
        assert_eq!(config.mode, CrawlMode::Emotions(Emotion::ALL.to_vec()));

        let vars = [("STICKER_MODE", "emotion"), ("STICKER_PAGES", "4")];
        let config = CrawlerConfig::from_lookup(lookup_from(&vars)).unwrap();
        assert_eq!(config.mode, CrawlMode::Emotions(Emotion::ALL.to_vec()));
    }

    #[test]
    fn test_from_lookup_rejects_bad_values() {
        let err = CrawlerConfig::from_lookup(lookup_from(&[("STICKER_MODE", "random")])).unwrap_err();
        assert!(matches!(err, CrawlerError::Config(_)));

        let vars = [("STICKER_MODE", "showcase"), ("STICKER_PAGES", "0")];
        assert!(CrawlerConfig::from_lookup(lookup_from(&vars)).is_err());
    }

    #[test]
    fn test_parse_pages() {
        assert_eq!(parse_pages("3").unwrap(), 3..=3);
        assert_eq!(parse_pages("1-5").unwrap(), 1..=5);
        assert_eq!(parse_pages(" 2 - 2 ").unwrap(), 2..=2);
        assert!(parse_pages("0").is_err());
        assert!(parse_pages("5-1").is_err());
        assert!(parse_pages("abc").is_err());
    }
}
