// 変換サービス
//
// テーブル記述（JSON値）の `type` フィールドを見て、方言ごとに登録された
// 操作ハンドラーへディスパッチします。
// 現在登録されている操作は `create` のみです。

use crate::adapters::sql_generator::postgres::PostgresSqlGenerator;
use crate::adapters::sql_generator::redshift::RedshiftSqlGenerator;
use crate::adapters::sql_generator::SqlGenerator;
use crate::core::config::Dialect;
use crate::core::error::TranslateError;
use crate::core::schema::TableDescriptor;
use crate::services::schema_normalizer::SchemaNormalizerService;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;

/// 操作タイプ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    /// CREATE TABLE（PostgreSQLではインデックスを含む）
    Create,
}

impl OperationType {
    /// 操作タイプの文字列表現
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Create => "create",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationType {
    type Err = TranslateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(OperationType::Create),
            "" => Err(TranslateError::MissingOperationType),
            other => Err(TranslateError::UnknownOperationType(other.to_string())),
        }
    }
}

/// ハンドラーへ渡す実行コンテキスト
#[derive(Debug, Clone)]
pub struct TranslationContext {
    /// PostgreSQLのインデックステンプレートを含むディレクトリ（`None` は同梱テンプレート）
    pub template_dir: Option<PathBuf>,
}

/// 操作ハンドラー
pub type OperationHandler =
    fn(&TranslationContext, &TableDescriptor) -> Result<String, TranslateError>;

fn create_postgres(
    context: &TranslationContext,
    table: &TableDescriptor,
) -> Result<String, TranslateError> {
    let generator = match context.template_dir {
        Some(ref dir) => PostgresSqlGenerator::new(dir.clone()),
        None => PostgresSqlGenerator::default(),
    };
    Ok(generator.generate_create_table(table)?)
}

fn create_redshift(
    _context: &TranslationContext,
    table: &TableDescriptor,
) -> Result<String, TranslateError> {
    Ok(RedshiftSqlGenerator::new().generate_create_table(table)?)
}

/// 変換サービス
///
/// (方言, 操作タイプ) の組をキーにハンドラーを保持します。
#[derive(Debug, Clone)]
pub struct Translator {
    context: TranslationContext,
    normalizer: SchemaNormalizerService,
    handlers: HashMap<(Dialect, OperationType), OperationHandler>,
}

impl Translator {
    /// 新しいTranslatorを作成
    ///
    /// # Arguments
    ///
    /// * `template_dir` - `create-index.sql` を含むテンプレートディレクトリ。
    ///   ファイルがない場合は同梱テンプレートを使います。
    pub fn new(template_dir: PathBuf) -> Self {
        Self::with_context(TranslationContext {
            template_dir: Some(template_dir),
        })
    }

    fn with_context(context: TranslationContext) -> Self {
        let mut translator = Self {
            context,
            normalizer: SchemaNormalizerService::new(),
            handlers: HashMap::new(),
        };
        translator.register(Dialect::Postgres, OperationType::Create, create_postgres);
        translator.register(Dialect::Redshift, OperationType::Create, create_redshift);
        translator
    }

    /// ハンドラーを登録（既存の登録は置き換える）
    pub fn register(
        &mut self,
        dialect: Dialect,
        operation: OperationType,
        handler: OperationHandler,
    ) {
        self.handlers.insert((dialect, operation), handler);
    }

    /// 指定した組にハンドラーが登録されているか
    pub fn supports(&self, dialect: Dialect, operation: OperationType) -> bool {
        self.handlers.contains_key(&(dialect, operation))
    }

    /// テーブル記述をSQLへ変換
    ///
    /// # Arguments
    ///
    /// * `dialect` - 出力する方言
    /// * `input` - `type` フィールドを持つテーブル記述
    ///
    /// # Returns
    ///
    /// 生成されたSQL文字列
    ///
    /// # Errors
    ///
    /// - `type` が未指定または空の場合は `MissingOperationType`
    /// - 登録されていない `type` の場合は `UnknownOperationType`
    /// - インデックステンプレートの読み込み・展開に失敗した場合は `Template`
    pub fn translate(&self, dialect: Dialect, input: &Value) -> Result<String, TranslateError> {
        let operation = operation_type(input)?;
        let handler = self
            .handlers
            .get(&(dialect, operation))
            .ok_or_else(|| TranslateError::UnknownOperationType(operation.to_string()))?;

        debug!(%dialect, %operation, "dispatching translation");
        let table = self.normalizer.normalize_table(input);
        handler(&self.context, &table)
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::with_context(TranslationContext { template_dir: None })
    }
}

/// 入力から操作タイプを取り出す
fn operation_type(input: &Value) -> Result<OperationType, TranslateError> {
    match input.get("type") {
        None | Some(Value::Null) => Err(TranslateError::MissingOperationType),
        Some(Value::String(s)) => s.parse(),
        Some(other) => Err(TranslateError::UnknownOperationType(other.to_string())),
    }
}

/// 同梱テンプレートを使ってテーブル記述をSQLへ変換
pub fn translate(dialect: Dialect, input: &Value) -> Result<String, TranslateError> {
    Translator::default().translate(dialect, input)
}
