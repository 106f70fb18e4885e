// translateコマンドハンドラー
//
// テーブル記述ファイルを読み込み、指定された方言のSQLへ変換します。

use crate::cli::command_context::CommandContext;
use crate::cli::commands::emit_sql;
use crate::services::schema_loader::SchemaLoaderService;
use crate::services::translator::Translator;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::PathBuf;
use tracing::debug;

/// translateコマンドの入力パラメータ
#[derive(Debug, Clone)]
pub struct TranslateCommand {
    /// プロジェクトのルートパス
    pub project_path: PathBuf,
    /// 設定ファイルのパス（指定されない場合は既定の場所を探す）
    pub config_path: Option<PathBuf>,
    /// テーブル記述ファイル
    pub input: PathBuf,
    /// SQL方言（指定されない場合は設定ファイルから取得）
    pub dialect: Option<String>,
    /// 入力に `type` がない場合に使う操作タイプ
    pub operation: Option<String>,
    /// テンプレートディレクトリ（指定されない場合は設定ファイルから取得）
    pub template_dir: Option<PathBuf>,
    /// 出力ファイル（指定されない場合は標準出力）
    pub output: Option<PathBuf>,
}

/// translateコマンドハンドラー
#[derive(Debug, Clone, Default)]
pub struct TranslateCommandHandler {}

impl TranslateCommandHandler {
    /// 新しいTranslateCommandHandlerを作成
    pub fn new() -> Self {
        Self {}
    }

    /// translateコマンドを実行
    ///
    /// # Arguments
    ///
    /// * `command` - translateコマンドのパラメータ
    ///
    /// # Returns
    ///
    /// 標準出力の場合は生成されたSQL、ファイル出力の場合は書き込みのサマリー
    pub fn execute(&self, command: &TranslateCommand) -> Result<String> {
        let context =
            CommandContext::load(command.project_path.clone(), command.config_path.clone())?;
        let dialect = context.dialect(command.dialect.as_deref())?;
        let template_dir = context.template_dir(command.template_dir.as_deref());

        let input_path = context.resolve(&command.input);
        let mut input = SchemaLoaderService::new()
            .load_file(&input_path)
            .with_context(|| format!("Failed to load table description: {:?}", input_path))?;

        if let Some(ref operation) = command.operation {
            apply_operation_default(&mut input, operation);
        }

        debug!(%dialect, ?template_dir, "translating");
        let translator = match template_dir {
            Some(dir) => Translator::new(dir),
            None => Translator::default(),
        };
        let sql = translator
            .translate(dialect, &input)
            .with_context(|| format!("Failed to translate {:?}", input_path))?;

        let output = command.output.as_ref().map(|p| context.resolve(p));
        emit_sql(sql, output.as_deref())
    }
}

/// 入力に `type` がない場合のみ操作タイプを補う
fn apply_operation_default(input: &mut Value, operation: &str) {
    if let Value::Object(map) = input {
        let missing = matches!(map.get("type"), None | Some(Value::Null));
        if missing {
            map.insert("type".to_string(), Value::String(operation.to_string()));
        }
    }
}
