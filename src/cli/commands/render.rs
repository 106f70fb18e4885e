// renderコマンドハンドラー
//
// 任意のSQLテンプレートファイルを名前付きパラメータで展開します。

use crate::adapters::sql_template::{SqlTemplate, TemplateParams, TemplateValue};
use crate::cli::command_context::CommandContext;
use crate::cli::commands::emit_sql;
use crate::services::schema_loader::SchemaLoaderService;
use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;

/// renderコマンドの入力パラメータ
#[derive(Debug, Clone)]
pub struct RenderCommand {
    /// プロジェクトのルートパス
    pub project_path: PathBuf,
    /// テンプレートファイル
    pub template: PathBuf,
    /// パラメータファイル
    pub params_file: Option<PathBuf>,
    /// `key=value` 形式のパラメータ
    pub params: Vec<String>,
    /// 出力ファイル（指定されない場合は標準出力）
    pub output: Option<PathBuf>,
}

/// renderコマンドハンドラー
#[derive(Debug, Clone, Default)]
pub struct RenderCommandHandler {}

impl RenderCommandHandler {
    /// 新しいRenderCommandHandlerを作成
    pub fn new() -> Self {
        Self {}
    }

    /// renderコマンドを実行
    pub fn execute(&self, command: &RenderCommand) -> Result<String> {
        let context = CommandContext::new(command.project_path.clone());

        let mut params = match command.params_file {
            Some(ref path) => SchemaLoaderService::new()
                .load_params(&context.resolve(path))
                .with_context(|| "Failed to load template parameters")?,
            None => TemplateParams::new(),
        };
        for param in &command.params {
            let (key, value) = parse_param(param)?;
            params.insert(key, value);
        }

        let template_path = context.resolve(&command.template);
        let sql = SqlTemplate::from_file(&template_path)
            .and_then(|template| template.render_named(&params))
            .with_context(|| format!("Failed to render template {:?}", template_path))?;

        let output = command.output.as_ref().map(|p| context.resolve(p));
        emit_sql(sql, output.as_deref())
    }
}

/// `key=value` を解析（値はテキストとして扱う）
fn parse_param(param: &str) -> Result<(String, TemplateValue)> {
    let (key, value) = param
        .split_once('=')
        .ok_or_else(|| anyhow!("Invalid parameter '{}': expected KEY=VALUE", param))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(anyhow!("Invalid parameter '{}': empty key", param));
    }
    Ok((key.to_string(), TemplateValue::from(value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_param() {
        let (key, value) = parse_param("schema=music").unwrap();
        assert_eq!(key, "schema");
        assert_eq!(value, TemplateValue::from("music"));

        let (_, value) = parse_param("expr=a=b").unwrap();
        assert_eq!(value, TemplateValue::from("a=b"));
    }

    #[test]
    fn test_parse_param_invalid() {
        assert!(parse_param("schema").is_err());
        assert!(parse_param("=music").is_err());
    }
}
