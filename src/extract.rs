//! 固定文字列による行単位の抽出
//!
//! HTMLはパースしない。各行をトリムし、接頭辞で始まり接尾辞で終わる行だけから
//! 間の文字列を取り出す。サイト側のマークアップに合わせた固定値なので、
//! 変わったら定数ごと差し替えること。

/// パッケージ詳細ページのスタンプ画像 `<span>`
pub mod sticker {
    pub const PREFIX: &str = r#"<span class="mdCMN09Image" style="background-image:url(https://stickershop.line-scdn.net/stickershop/v1/sticker/"#;
    pub const SUFFIX: &str = r#"/iPhone/sticker@2x.png);"></span>"#;
}

/// ショーケースページのパッケージリンク
pub mod showcase {
    pub const PREFIX: &str = r#"<a href="/stickershop/product/"#;
    pub const SUFFIX: &str = r#"/zh-Hant" class="mdCMN02Link">"#;
}

/// 接頭辞と接尾辞に挟まれた部分を行順に返す（重複は除かない）
///
/// 接頭辞と接尾辞が重なるほど短い行は対象外。
pub fn lines_between<'a>(
    body: &'a str,
    prefix: &'a str,
    suffix: &'a str,
) -> impl Iterator<Item = &'a str> + 'a {
    body.split('\n').filter_map(move |line| {
        line.trim()
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_suffix(suffix))
    })
}
