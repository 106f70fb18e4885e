// エラー型定義
//
// ライブラリ全体で使用されるカスタムエラー型を提供します。
// thiserrorを使用して、TranslateError, TemplateError, IoError を定義します。

use thiserror::Error;

/// 変換エラー
///
/// 操作ディスパッチ時の入力エラーを表現します。
/// テンプレート展開中のエラーはそのまま包んで呼び出し元へ返します。
#[derive(Debug, Error)]
pub enum TranslateError {
    /// `type` フィールドが存在しない
    #[error("Operation type required")]
    MissingOperationType,

    /// 登録されていない操作タイプ
    #[error("Unknown operation type: {0}")]
    UnknownOperationType(String),

    /// テンプレートエラー
    #[error(transparent)]
    Template(#[from] TemplateError),
}

impl TranslateError {
    /// 操作タイプ未指定エラーかどうか
    pub fn is_missing_operation_type(&self) -> bool {
        matches!(self, TranslateError::MissingOperationType)
    }

    /// 未知の操作タイプエラーかどうか
    pub fn is_unknown_operation_type(&self) -> bool {
        matches!(self, TranslateError::UnknownOperationType(_))
    }

    /// テンプレートエラーかどうか
    pub fn is_template(&self) -> bool {
        matches!(self, TranslateError::Template(_))
    }
}

/// テンプレートエラー
///
/// SQLテンプレートの解析・展開時に発生するエラーを表現します。
#[derive(Debug, Clone, Error)]
pub enum TemplateError {
    /// Unknown placeholder kind
    #[error("Unrecognized format: '%{kind}' at position {position}")]
    UnknownPlaceholder {
        /// プレースホルダー種別の文字（末尾の単独 `%` の場合は空）
        kind: String,
        /// テンプレート内のバイト位置
        position: usize,
    },

    /// Named parameter missing from the supplied mapping
    #[error("Missing parameter: {name}")]
    MissingParameter {
        /// パラメータ名
        name: String,
    },

    /// Not enough positional arguments
    #[error("Missing positional argument #{index}")]
    MissingPositional {
        /// 0始まりの引数番号
        index: usize,
    },

    /// Placeholder without a name used in named mode
    #[error("Placeholder at position {position} has no name (required in named mode)")]
    UnnamedPlaceholder {
        /// テンプレート内のバイト位置
        position: usize,
    },

    /// NULL passed to an identifier placeholder
    #[error("SQL identifier cannot be null (placeholder at position {position})")]
    NullIdentifier {
        /// テンプレート内のバイト位置
        position: usize,
    },

    /// `%F` without a file name
    #[error("File include at position {position} has no file name")]
    MissingIncludeName {
        /// テンプレート内のバイト位置
        position: usize,
    },

    /// `%F` in a template that was not loaded from a file
    #[error("File include '%F:{name}' requires a file-based template")]
    IncludeWithoutBase {
        /// インクルード名
        name: String,
    },

    /// `%F` inside an included file
    #[error("Nested file include '%F:{name}' is not supported")]
    NestedInclude {
        /// インクルード名
        name: String,
    },

    /// Template or included file not found
    #[error("File not found: {path}")]
    FileNotFound {
        /// ファイルパス
        path: String,
    },

    /// Template file read error
    #[error("Failed to read template: {path} (cause: {cause})")]
    FileRead {
        /// ファイルパス
        path: String,
        /// エラー原因
        cause: String,
    },
}

impl TemplateError {
    /// 未知のプレースホルダーエラーかどうか
    pub fn is_unknown_placeholder(&self) -> bool {
        matches!(self, TemplateError::UnknownPlaceholder { .. })
    }

    /// パラメータ不足エラーかどうか（名前付き・位置指定の両方）
    pub fn is_missing_parameter(&self) -> bool {
        matches!(
            self,
            TemplateError::MissingParameter { .. } | TemplateError::MissingPositional { .. }
        )
    }

    /// ファイルインクルード関連のエラーかどうか
    pub fn is_include(&self) -> bool {
        matches!(
            self,
            TemplateError::MissingIncludeName { .. }
                | TemplateError::IncludeWithoutBase { .. }
                | TemplateError::NestedInclude { .. }
        )
    }

    /// ファイルが見つからないエラーかどうか
    pub fn is_file_not_found(&self) -> bool {
        matches!(self, TemplateError::FileNotFound { .. })
    }
}

/// I/Oエラー
///
/// 入力ファイルの読み込みや出力ファイルの書き込み時に発生するエラーを表現します。
#[derive(Debug, Error)]
pub enum IoError {
    /// File not found
    #[error("File not found: {path}")]
    FileNotFound {
        /// ファイルパス
        path: String,
    },

    /// File read error
    #[error("Failed to read file: {path} (cause: {cause})")]
    FileRead {
        /// ファイルパス
        path: String,
        /// エラー原因
        cause: String,
    },

    /// File write error
    #[error("Failed to write file: {path} (cause: {cause})")]
    FileWrite {
        /// ファイルパス
        path: String,
        /// エラー原因
        cause: String,
    },

    /// Parse error (JSON / YAML)
    #[error("Failed to parse file: {path} (cause: {cause})")]
    Parse {
        /// ファイルパス
        path: String,
        /// エラー原因
        cause: String,
    },
}

impl IoError {
    /// ファイルが見つからないエラーかどうか
    pub fn is_file_not_found(&self) -> bool {
        matches!(self, IoError::FileNotFound { .. })
    }

    /// ファイル読み込みエラーかどうか
    pub fn is_file_read(&self) -> bool {
        matches!(self, IoError::FileRead { .. })
    }

    /// ファイル書き込みエラーかどうか
    pub fn is_file_write(&self) -> bool {
        matches!(self, IoError::FileWrite { .. })
    }

    /// 解析エラーかどうか
    pub fn is_parse(&self) -> bool {
        matches!(self, IoError::Parse { .. })
    }
}
