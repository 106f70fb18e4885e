// SQLテンプレートエンジン
//
// 名前付きパラメータ・識別子クォート・ファイルインクルードを備えた
// SQLテンプレートの展開処理。
//
// 処理は2段階に分かれます。
// 1. コンパイル: 本文を解析し、`%F` を展開して型付きプレースホルダー列を得る
// 2. 展開: 位置引数の列だけを入力とする純粋関数
// 名前付きモードは、パラメータ名をマッピングから引いて位置引数の列に
// 変換してから同じ展開処理を呼び出します。

pub mod parser;
pub mod value;

pub use parser::{extract_placeholders, Placeholder, PlaceholderKind, Segment};
pub use value::{TemplateParams, TemplateValue};

use crate::core::error::TemplateError;
use crate::core::naming::TEMPLATE_EXTENSION;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// コンパイル済みSQLテンプレート
///
/// `%F` は全て展開済みで、プレースホルダーは `%I` / `%L` / `%s` のみです。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlTemplate {
    segments: Vec<Segment>,
}

impl SqlTemplate {
    /// インラインのテンプレート本文をコンパイル
    ///
    /// ファイルを基準としないため `%F` は使用できません。
    pub fn parse(text: &str) -> Result<Self, TemplateError> {
        Self::compile(text, None)
    }

    /// テンプレートファイルを読み込んでコンパイル
    ///
    /// `%F:<name>` は同じディレクトリの `<name>.sql` の内容に置き換えます。
    /// キャッシュはせず、呼び出しのたびにファイルを読み込みます。
    pub fn from_file(path: &Path) -> Result<Self, TemplateError> {
        let text = read_template(path)?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self::compile(&text, Some(&base_dir))
    }

    /// 本文を解析し、ファイルインクルードを展開
    fn compile(text: &str, base_dir: Option<&Path>) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();

        for segment in parser::parse_segments(text)? {
            match segment {
                Segment::Placeholder(Placeholder {
                    kind: PlaceholderKind::Include,
                    name,
                    position,
                }) => {
                    let name = name.ok_or(TemplateError::MissingIncludeName { position })?;
                    let Some(dir) = base_dir else {
                        return Err(TemplateError::IncludeWithoutBase { name });
                    };
                    segments.extend(load_include(dir, &name)?);
                }
                other => segments.push(other),
            }
        }

        Ok(Self { segments })
    }

    /// プレースホルダーを出現順に返す
    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(p) => Some(p),
            Segment::Text(_) => None,
        })
    }

    /// 名前付きモードで必要なパラメータ名を出現順に返す（重複あり）
    pub fn parameter_names(&self) -> Vec<&str> {
        self.placeholders()
            .filter_map(|p| p.name.as_deref())
            .collect()
    }

    /// 名前付きパラメータを位置引数の列に解決
    ///
    /// 名前のないプレースホルダーや、マッピングに存在しない名前はエラーになります。
    pub fn resolve(&self, params: &TemplateParams) -> Result<Vec<TemplateValue>, TemplateError> {
        self.placeholders()
            .map(|p| {
                let name = p
                    .name
                    .as_deref()
                    .ok_or(TemplateError::UnnamedPlaceholder { position: p.position })?;
                params
                    .get(name)
                    .cloned()
                    .ok_or_else(|| TemplateError::MissingParameter {
                        name: name.to_string(),
                    })
            })
            .collect()
    }

    /// 位置引数でテンプレートを展開
    ///
    /// 引数はプレースホルダーに左から順に対応します。余った引数は無視します。
    pub fn render(&self, args: &[TemplateValue]) -> Result<String, TemplateError> {
        let mut output = String::new();
        let mut index = 0;

        for segment in &self.segments {
            match segment {
                Segment::Text(text) => output.push_str(text),
                Segment::Placeholder(placeholder) => {
                    let value = args
                        .get(index)
                        .ok_or(TemplateError::MissingPositional { index })?;
                    output.push_str(&render_placeholder(placeholder, value)?);
                    index += 1;
                }
            }
        }

        // NUL文字は出力に含めない
        Ok(output.replace('\0', ""))
    }

    /// 名前付きパラメータでテンプレートを展開
    ///
    /// 全ての名前を解決してから展開するため、失敗時に部分的な出力はありません。
    pub fn render_named(&self, params: &TemplateParams) -> Result<String, TemplateError> {
        let args = self.resolve(params)?;
        self.render(&args)
    }
}

/// プレースホルダー1つ分を展開
fn render_placeholder(
    placeholder: &Placeholder,
    value: &TemplateValue,
) -> Result<String, TemplateError> {
    match placeholder.kind {
        PlaceholderKind::Identifier => value.to_identifier().ok_or(TemplateError::NullIdentifier {
            position: placeholder.position,
        }),
        PlaceholderKind::Literal => Ok(value.to_template_literal()),
        PlaceholderKind::Raw => Ok(value.to_raw()),
        // compile で全て展開済み
        PlaceholderKind::Include => Err(TemplateError::IncludeWithoutBase {
            name: placeholder.name.clone().unwrap_or_default(),
        }),
    }
}

/// テンプレートファイルを読み込む
fn read_template(path: &Path) -> Result<String, TemplateError> {
    if !path.is_file() {
        return Err(TemplateError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    debug!(path = %path.display(), "reading template file");
    fs::read_to_string(path).map_err(|e| TemplateError::FileRead {
        path: path.display().to_string(),
        cause: e.to_string(),
    })
}

/// インクルードファイルを読み込んでセグメント列にする
///
/// インクルードは1段のみで、インクルード先の `%F` はエラーになります。
fn load_include(base_dir: &Path, name: &str) -> Result<Vec<Segment>, TemplateError> {
    let path: PathBuf = base_dir.join(format!("{}.{}", name, TEMPLATE_EXTENSION));
    let text = read_template(&path)?;
    let segments = parser::parse_segments(&text)?;

    let nested = segments.iter().find_map(|segment| match segment {
        Segment::Placeholder(Placeholder {
            kind: PlaceholderKind::Include,
            name,
            ..
        }) => Some(name.clone().unwrap_or_default()),
        _ => None,
    });
    if let Some(nested) = nested {
        return Err(TemplateError::NestedInclude { name: nested });
    }

    Ok(segments)
}

/// インラインのテンプレートを位置引数で展開
pub fn format(sql: &str, args: &[TemplateValue]) -> Result<String, TemplateError> {
    SqlTemplate::parse(sql)?.render(args)
}

/// インラインのテンプレートを名前付きパラメータで展開
pub fn format_named(sql: &str, params: &TemplateParams) -> Result<String, TemplateError> {
    SqlTemplate::parse(sql)?.render_named(params)
}

/// テンプレートファイルを名前付きパラメータで展開
pub fn format_file(path: &Path, params: &TemplateParams) -> Result<String, TemplateError> {
    SqlTemplate::from_file(path)?.render_named(params)
}
