// テンプレートパーサー
//
// テンプレート本文からプレースホルダー（`%I`, `%L`, `%s`, `%F`、任意で `:<name>`）を
// 抽出し、テキストとプレースホルダーの列に分解します。

use crate::core::error::TemplateError;
use regex::Regex;
use std::sync::LazyLock;

/// プレースホルダーのパターン
///
/// - `%%` : エスケープされた `%`
/// - `%<kind>[:<name>]` : 既知の種別
/// - `%<other>` : 未知の種別
/// - `%` (末尾) : 種別なし
static PLACEHOLDER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)%(?:%|([ILsF])(?::([A-Za-z0-9_]+))?|(.)|$)")
        .expect("placeholder pattern is a valid regex")
});

/// プレースホルダー種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    /// `%I` 識別子
    Identifier,
    /// `%L` リテラル
    Literal,
    /// `%s` そのまま埋め込み（配列はカンマ区切り）
    Raw,
    /// `%F` ファイルインクルード
    Include,
}

impl PlaceholderKind {
    fn from_char(c: &str) -> Option<Self> {
        match c {
            "I" => Some(PlaceholderKind::Identifier),
            "L" => Some(PlaceholderKind::Literal),
            "s" => Some(PlaceholderKind::Raw),
            "F" => Some(PlaceholderKind::Include),
            _ => None,
        }
    }
}

/// プレースホルダー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// 種別
    pub kind: PlaceholderKind,
    /// パラメータ名（`:<name>` が指定された場合）
    pub name: Option<String>,
    /// 元テキスト内のバイト位置
    pub position: usize,
}

/// テンプレートの構成要素
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// そのまま出力するテキスト
    Text(String),
    /// プレースホルダー
    Placeholder(Placeholder),
}

/// テンプレート本文をセグメント列に分解
///
/// 連続するテキストは1つのセグメントにまとめます。
pub fn parse_segments(text: &str) -> Result<Vec<Segment>, TemplateError> {
    let mut segments = Vec::new();
    let mut pending = String::new();
    let mut last = 0;

    for caps in PLACEHOLDER_PATTERN.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        pending.push_str(&text[last..whole.start()]);
        last = whole.end();

        if let Some(kind) = caps.get(1) {
            // from_char はパターンの文字クラスと一致している
            let Some(kind) = PlaceholderKind::from_char(kind.as_str()) else {
                continue;
            };
            if !pending.is_empty() {
                segments.push(Segment::Text(std::mem::take(&mut pending)));
            }
            segments.push(Segment::Placeholder(Placeholder {
                kind,
                name: caps.get(2).map(|m| m.as_str().to_string()),
                position: whole.start(),
            }));
        } else if let Some(unknown) = caps.get(3) {
            return Err(TemplateError::UnknownPlaceholder {
                kind: unknown.as_str().to_string(),
                position: whole.start(),
            });
        } else if whole.as_str() == "%%" {
            pending.push('%');
        } else {
            return Err(TemplateError::UnknownPlaceholder {
                kind: String::new(),
                position: whole.start(),
            });
        }
    }

    pending.push_str(&text[last..]);
    if !pending.is_empty() {
        segments.push(Segment::Text(pending));
    }

    Ok(segments)
}

/// テンプレート本文からプレースホルダーを出現順に抽出
pub fn extract_placeholders(text: &str) -> Result<Vec<Placeholder>, TemplateError> {
    Ok(parse_segments(text)?
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Placeholder(p) => Some(p),
            Segment::Text(_) => None,
        })
        .collect())
}
