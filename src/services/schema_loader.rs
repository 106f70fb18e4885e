// スキーマローダーサービス
//
// テーブル記述ファイル（JSON / YAML）とテンプレートパラメータファイルを
// serde_json::Value として読み込みます。

use crate::adapters::sql_template::{TemplateParams, TemplateValue};
use crate::core::error::IoError;
use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// 入力ファイルの形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Yaml,
}

impl InputFormat {
    /// 拡張子から形式を判定（不明な拡張子はJSON扱い）
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                InputFormat::Yaml
            }
            _ => InputFormat::Json,
        }
    }
}

/// スキーマローダーサービス
#[derive(Debug, Clone, Default)]
pub struct SchemaLoaderService {}

impl SchemaLoaderService {
    /// 新しいSchemaLoaderServiceを作成
    pub fn new() -> Self {
        Self {}
    }

    /// ファイルを読み込んでJSON値に変換
    ///
    /// # Arguments
    ///
    /// * `path` - `.json` / `.yaml` / `.yml` ファイル
    ///
    /// # Errors
    ///
    /// - ファイルが存在しない場合
    /// - 読み込みまたは解析に失敗した場合
    pub fn load_file(&self, path: &Path) -> Result<Value> {
        if !path.is_file() {
            return Err(IoError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let content = fs::read_to_string(path).map_err(|e| IoError::FileRead {
            path: path.display().to_string(),
            cause: e.to_string(),
        })?;

        let format = InputFormat::from_path(path);
        debug!(path = %path.display(), ?format, "loading input file");

        self.parse_str(&content, format).map_err(|e| {
            anyhow::Error::from(IoError::Parse {
                path: path.display().to_string(),
                cause: format!("{:#}", e),
            })
        })
    }

    /// 文字列を指定形式で解析
    pub fn parse_str(&self, content: &str, format: InputFormat) -> Result<Value> {
        match format {
            InputFormat::Json => serde_json::from_str(content).context("Invalid JSON"),
            InputFormat::Yaml => serde_saphyr::from_str(content).context("Invalid YAML"),
        }
    }

    /// テンプレートパラメータファイルを読み込む
    ///
    /// トップレベルはオブジェクトである必要があります。
    pub fn load_params(&self, path: &Path) -> Result<TemplateParams> {
        let value = self.load_file(path)?;
        TemplateValue::params_from_json(&value).ok_or_else(|| {
            anyhow::Error::from(IoError::Parse {
                path: path.display().to_string(),
                cause: "template parameters must be a mapping".to_string(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_input_format_from_path() {
        assert_eq!(InputFormat::from_path(Path::new("a.json")), InputFormat::Json);
        assert_eq!(InputFormat::from_path(Path::new("a.yml")), InputFormat::Yaml);
        assert_eq!(InputFormat::from_path(Path::new("a.YAML")), InputFormat::Yaml);
        assert_eq!(InputFormat::from_path(Path::new("a")), InputFormat::Json);
    }

    #[test]
    fn test_load_json_file() {
        let file = write_temp(".json", r#"{"type": "create", "table": "bar"}"#);
        let value = SchemaLoaderService::new().load_file(file.path()).unwrap();

        assert_eq!(value["type"], "create");
        assert_eq!(value["table"], "bar");
    }

    #[test]
    fn test_load_yaml_file() {
        let file = write_temp(
            ".yaml",
            "type: create\ntable: bar\ncolumns:\n  - name: id\n    type: INT\n    length: 4\n",
        );
        let value = SchemaLoaderService::new().load_file(file.path()).unwrap();

        assert_eq!(value["table"], "bar");
        assert_eq!(value["columns"][0]["name"], "id");
        assert_eq!(value["columns"][0]["length"], 4);
    }

    #[test]
    fn test_load_missing_file() {
        let err = SchemaLoaderService::new()
            .load_file(Path::new("/nonexistent/table.json"))
            .unwrap_err();
        let io = err.downcast_ref::<IoError>().unwrap();
        assert!(io.is_file_not_found());
    }

    #[test]
    fn test_load_invalid_json() {
        let file = write_temp(".json", "{not json");
        let err = SchemaLoaderService::new().load_file(file.path()).unwrap_err();
        let io = err.downcast_ref::<IoError>().unwrap();
        assert!(io.is_parse());
    }

    #[test]
    fn test_load_params_requires_mapping() {
        let file = write_temp(".json", r#"{"schema": "music", "columns": ["id"]}"#);
        let params = SchemaLoaderService::new().load_params(file.path()).unwrap();
        assert_eq!(params.len(), 2);

        let file = write_temp(".json", "[1, 2]");
        let err = SchemaLoaderService::new().load_params(file.path()).unwrap_err();
        assert!(err.downcast_ref::<IoError>().unwrap().is_parse());
    }
}
