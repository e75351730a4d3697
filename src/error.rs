use std::path::PathBuf;

use thiserror::Error;

use crate::types::{Emotion, PackageId, StickerId};

#[derive(Error, Debug)]
pub enum CrawlerError {
    #[error("HTTPクライアント初期化エラー: {0}")]
    ClientInit(String),

    #[error("設定エラー: {0}")]
    Config(String),

    #[error("URL構築エラー: {url}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("リクエストエラー: {url}: {source}")]
    Request {
        url: String,
        source: reqwest::Error,
    },

    #[error("HTTPステータスエラー: {url}: {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("レスポンスのデコードエラー: {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },

    #[error("ファイル操作エラー: {path:?}: {source}")]
    FileIO {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("[{emotion}] パッケージ一覧の取得に失敗: {source}")]
    Listing {
        emotion: Emotion,
        source: Box<CrawlerError>,
    },

    #[error("ショーケース {page} ページの取得に失敗: {source}")]
    Showcase {
        page: u32,
        source: Box<CrawlerError>,
    },

    #[error("パッケージ {package_id} のスタンプ取得に失敗: {source}")]
    Stickers {
        package_id: PackageId,
        source: Box<CrawlerError>,
    },

    #[error("スタンプ {package_id}/{sticker_id} のダウンロードに失敗: {source}")]
    Download {
        package_id: PackageId,
        sticker_id: StickerId,
        source: Box<CrawlerError>,
    },

    #[error("ラベルCSVの書き込みに失敗: {path:?}: {source}")]
    Label {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl CrawlerError {
    pub fn file_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CrawlerError::FileIO {
            path: path.into(),
            source,
        }
    }

    /// コンテキストを剥がした元のエラー
    pub fn root(&self) -> &CrawlerError {
        match self {
            CrawlerError::Listing { source, .. }
            | CrawlerError::Showcase { source, .. }
            | CrawlerError::Stickers { source, .. }
            | CrawlerError::Download { source, .. } => source.root(),
            other => other,
        }
    }
}
