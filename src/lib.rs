//! LINEスタンプクローラー
//!
//! - 感情カテゴリ検索でパッケージを集め、スタンプ画像と感情ラベルCSVを出力
//! - ショーケースページを巡回してスタンプ画像を保存
//!
//! 処理は 一覧 → スタンプ解決 → ダウンロード → ラベル出力 の順で、
//! どこかで失敗したらその時点で全体を中断する。
//!
//! # 使用例
//!
//! ```rust,ignore
//! use sticker_crawler::{CrawlRequest, CrawlerService};
//! use tower::Service;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut service = CrawlerService::new();
//!
//!     let request = CrawlRequest::new("./output");
//!
//!     let report = service.call(request).await.unwrap();
//!     println!("label: {:?}", report.label_path);
//! }
//! ```

pub mod client;
pub mod config;
pub mod crawler;
pub mod download;
pub mod error;
pub mod extract;
pub mod label;
pub mod listing;
pub mod service;
pub mod stickers;
pub mod traits;
pub mod types;

// 主要な型をリエクスポート
pub use client::HttpClient;
pub use config::{CrawlMode, CrawlerConfig};
pub use crawler::{EmotionCrawler, ShowcaseCrawler};
pub use download::ImageLayout;
pub use error::CrawlerError;
pub use label::LabelMatrix;
pub use service::{CrawlRequest, CrawlerService};
pub use traits::Crawler;
pub use types::{
    image_file_name, CrawlReport, DownloadOutcome, DownloadSummary, Emotion, EmotionPackages,
    PackageId, StickerId, StickerIndex,
};
