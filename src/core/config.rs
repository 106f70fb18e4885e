// 設定ファイル管理
//
// プロジェクトの設定ファイル（YAML形式）の読み込みと、
// 既定の方言・テンプレートディレクトリの解決を行います。

use crate::core::error::IoError;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// SQL方言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// 汎用リレーショナル方言
    #[default]
    #[serde(alias = "postgresql")]
    Postgres,
    /// カラムナ型データウェアハウス方言
    Redshift,
}

impl Dialect {
    /// 対応している全ての方言
    pub const ALL: [Dialect; 2] = [Dialect::Postgres, Dialect::Redshift];
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::Postgres => write!(f, "postgres"),
            Dialect::Redshift => write!(f, "redshift"),
        }
    }
}

impl FromStr for Dialect {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Dialect::Postgres),
            "redshift" => Ok(Dialect::Redshift),
            other => Err(anyhow!(
                "Unsupported SQL dialect: {}. Please specify one of: postgres, redshift.",
                other
            )),
        }
    }
}

/// プロジェクト設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// 設定ファイルのバージョン
    #[serde(default = "default_version")]
    pub version: String,

    /// 既定のSQL方言
    #[serde(default)]
    pub dialect: Dialect,

    /// テンプレートディレクトリ（未指定の場合は同梱テンプレートを使用）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<PathBuf>,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            dialect: Dialect::default(),
            template_dir: None,
        }
    }
}

impl Config {
    /// デフォルトの設定ファイルパス
    pub const DEFAULT_CONFIG_PATH: &'static str = crate::core::naming::CONFIG_FILE;

    /// 設定ファイルを読み込む
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(IoError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let content = fs::read_to_string(path).map_err(|e| IoError::FileRead {
            path: path.display().to_string(),
            cause: e.to_string(),
        })?;

        content.parse()
    }

    /// テンプレートディレクトリを解決する
    ///
    /// 相対パスは `base` からの相対として扱います。
    /// 未指定の場合は `None`（同梱テンプレート）を返します。
    pub fn resolve_template_dir(&self, base: &Path) -> Option<PathBuf> {
        self.template_dir.as_ref().map(|dir| {
            if dir.is_absolute() {
                dir.clone()
            } else {
                base.join(dir)
            }
        })
    }
}

/// std::str::FromStrトレイトの実装
impl FromStr for Config {
    type Err = anyhow::Error;

    fn from_str(yaml: &str) -> Result<Self, Self::Err> {
        serde_saphyr::from_str(yaml).with_context(|| "Failed to parse config file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_display() {
        assert_eq!(Dialect::Postgres.to_string(), "postgres");
        assert_eq!(Dialect::Redshift.to_string(), "redshift");
    }

    #[test]
    fn test_dialect_from_str() {
        assert_eq!("postgres".parse::<Dialect>().unwrap(), Dialect::Postgres);
        assert_eq!("PostgreSQL".parse::<Dialect>().unwrap(), Dialect::Postgres);
        assert_eq!("redshift".parse::<Dialect>().unwrap(), Dialect::Redshift);
        assert!("mysql".parse::<Dialect>().is_err());
    }

    #[test]
    fn test_config_from_yaml() {
        let yaml = "version: \"1.0\"\ndialect: redshift\ntemplate_dir: templates\n";
        let config: Config = yaml.parse().unwrap();

        assert_eq!(config.dialect, Dialect::Redshift);
        assert_eq!(config.template_dir, Some(PathBuf::from("templates")));
    }

    #[test]
    fn test_config_defaults_when_fields_missing() {
        let config: Config = "{}".parse().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_resolve_template_dir() {
        let base = Path::new("/project");

        let config = Config::default();
        assert_eq!(config.resolve_template_dir(base), None);

        let config = Config {
            template_dir: Some(PathBuf::from("sql")),
            ..Config::default()
        };
        assert_eq!(
            config.resolve_template_dir(base),
            Some(PathBuf::from("/project/sql"))
        );

        let config = Config {
            template_dir: Some(PathBuf::from("/opt/sql")),
            ..Config::default()
        };
        assert_eq!(config.resolve_template_dir(base), Some(PathBuf::from("/opt/sql")));
    }
}
