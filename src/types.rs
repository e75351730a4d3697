//! クローラー関連の型定義

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::CrawlerError;

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

opaque_id!(
    /// スタンプパッケージID（一覧レスポンス由来、中身は解釈しない）
    PackageId
);

opaque_id!(
    /// パッケージ内の個別スタンプID（詳細ページ由来）
    StickerId
);

/// 感情カテゴリ
///
/// 宣言順が検索順（`Emotion::ALL`）になる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Emotion {
    Happy,
    Sad,
    Fearful,
    Angry,
    Surprised,
    Disgusted,
}

impl Emotion {
    pub const ALL: [Emotion; 6] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Fearful,
        Emotion::Angry,
        Emotion::Surprised,
        Emotion::Disgusted,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Emotion::Happy => "Happy",
            Emotion::Sad => "Sad",
            Emotion::Fearful => "Fearful",
            Emotion::Angry => "Angry",
            Emotion::Surprised => "Surprised",
            Emotion::Disgusted => "Disgusted",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Emotion {
    type Err = CrawlerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Emotion::ALL
            .into_iter()
            .find(|e| e.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CrawlerError::Config(format!("不明な感情カテゴリ: {}", s)))
    }
}

/// 検索APIのレスポンス
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<PackageItem>,
}

/// 検索結果のパッケージ
#[derive(Debug, Clone, Deserialize)]
pub struct PackageItem {
    pub id: PackageId,
}

/// 感情ごとのパッケージ一覧（検索モードの一覧フェーズ出力）
pub type EmotionPackages = BTreeMap<Emotion, Vec<PackageId>>;

/// パッケージごとのスタンプID（解決フェーズ出力）
pub type StickerIndex = BTreeMap<PackageId, Vec<StickerId>>;

/// 画像ファイル名 `<PackageId>-<StickerId>.png`
pub fn image_file_name(package_id: &PackageId, sticker_id: &StickerId) -> String {
    format!("{}-{}.png", package_id, sticker_id)
}

/// 1枚分のダウンロード結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Downloaded(PathBuf),
    /// 既存ファイルのためスキップ
    Skipped(PathBuf),
}

/// ダウンロードフェーズの集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadSummary {
    pub downloaded: usize,
    pub skipped: usize,
}

impl DownloadSummary {
    pub fn record(&mut self, outcome: &DownloadOutcome) {
        match outcome {
            DownloadOutcome::Downloaded(_) => self.downloaded += 1,
            DownloadOutcome::Skipped(_) => self.skipped += 1,
        }
    }
}

/// クロール結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    /// 解決したパッケージ数
    pub packages: usize,
    /// 列挙したスタンプ数（重複込み）
    pub stickers: usize,
    pub downloaded: usize,
    pub skipped: usize,
    /// ラベルCSV（検索モードのみ）
    pub label_path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_file_name() {
        let name = image_file_name(&PackageId::from("1234"), &StickerId::from("5678"));
        assert_eq!(name, "1234-5678.png");
        assert_eq!(
            image_file_name(&PackageId::from("1234"), &StickerId::from("5678")),
            name
        );
    }

    #[test]
    fn test_image_file_name_keeps_ids_opaque() {
        let name = image_file_name(&PackageId::from("a-b"), &StickerId::from("0x10"));
        assert_eq!(name, "a-b-0x10.png");
    }

    #[test]
    fn test_emotion_round_trip_names() {
        for emotion in Emotion::ALL {
            assert_eq!(emotion.as_str().parse::<Emotion>().unwrap(), emotion);
        }
        assert_eq!("happy".parse::<Emotion>().unwrap(), Emotion::Happy);
        assert!("Bored".parse::<Emotion>().is_err());
    }

    #[test]
    fn test_search_response_decode() {
        let body = r#"{"items":[{"id":"A"},{"id":"B","title":"ignored"}],"totalCount":2}"#;
        let resp: SearchResponse = serde_json::from_str(body).unwrap();
        let ids: Vec<_> = resp.items.into_iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![PackageId::from("A"), PackageId::from("B")]);
    }

    #[test]
    fn test_search_response_without_items() {
        let resp: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.items.is_empty());
    }

    #[test]
    fn test_download_summary_record() {
        let mut summary = DownloadSummary::default();
        summary.record(&DownloadOutcome::Downloaded(PathBuf::from("a.png")));
        summary.record(&DownloadOutcome::Skipped(PathBuf::from("b.png")));
        summary.record(&DownloadOutcome::Skipped(PathBuf::from("c.png")));
        assert_eq!(summary, DownloadSummary { downloaded: 1, skipped: 2 });
    }
}
