//! 感情ラベル行列とCSV出力（検索モードのみ）

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::Path;

use tracing::info;

use crate::error::CrawlerError;
use crate::types::{image_file_name, Emotion, EmotionPackages, StickerIndex};

pub const LABEL_FILE: &str = "label.csv";

/// 画像ファイル名 → 感情 → 有無
///
/// 行は常に `Emotion::ALL` 全部を持つ（未出現は false）。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelMatrix {
    rows: BTreeMap<String, BTreeMap<Emotion, bool>>,
}

impl LabelMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// 一覧フェーズと解決フェーズの結果から組み立てる
    pub fn build(emotion_packages: &EmotionPackages, stickers: &StickerIndex) -> Self {
        let mut matrix = Self::new();
        for (emotion, package_ids) in emotion_packages {
            for package_id in package_ids {
                let Some(sticker_ids) = stickers.get(package_id) else {
                    continue;
                };
                for sticker_id in sticker_ids {
                    matrix.mark(image_file_name(package_id, sticker_id), *emotion);
                }
            }
        }
        matrix
    }

    pub fn mark(&mut self, image: String, emotion: Emotion) {
        let row = self
            .rows
            .entry(image)
            .or_insert_with(|| Emotion::ALL.into_iter().map(|e| (e, false)).collect());
        row.insert(emotion, true);
    }

    pub fn get(&self, image: &str, emotion: Emotion) -> Option<bool> {
        self.rows.get(image).and_then(|row| row.get(&emotion).copied())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn images(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    /// `image, emotion, 1|0` の行。画像名→感情名の辞書順。
    pub fn to_rows(&self) -> Vec<[String; 3]> {
        let mut rows: Vec<[String; 3]> = self
            .rows
            .iter()
            .flat_map(|(image, emotions)| {
                emotions.iter().map(move |(emotion, flag)| {
                    [
                        image.clone(),
                        emotion.as_str().to_string(),
                        format_flag(*flag).to_string(),
                    ]
                })
            })
            .collect();
        rows.sort_by(|a, b| (&a[0], &a[1]).cmp(&(&b[0], &b[1])));
        rows
    }
}

pub fn format_flag(flag: bool) -> &'static str {
    if flag {
        "1"
    } else {
        "0"
    }
}

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// CSV 1行を書き出す
pub fn write_row<W: Write, S: AsRef<str>>(mut w: W, row: &[S], sep: char) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            write!(w, "{}", sep)?;
        }
        let cell = cell.as_ref();
        if needs_quotes(cell, sep) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// ヘッダなしでCSVを書き出す（既存ファイルは上書き）
pub async fn write_csv(path: &Path, rows: &[[String; 3]]) -> Result<(), CrawlerError> {
    let to_label_err = |source| CrawlerError::Label {
        path: path.to_path_buf(),
        source,
    };

    let mut buf: Vec<u8> = Vec::new();
    for row in rows {
        write_row(&mut buf, row, ',').map_err(to_label_err)?;
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.map_err(to_label_err)?;
        }
    }
    tokio::fs::write(path, buf).await.map_err(to_label_err)?;

    info!("{:?} generated!", path);
    Ok(())
}
