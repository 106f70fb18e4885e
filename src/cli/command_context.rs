// コマンド共通コンテキスト
//
// 設定ファイル読み込みやパス解決の重複をCLI層で集約する。

use crate::core::config::{Config, Dialect};
use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// CLIコマンド共通の実行コンテキスト
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub project_path: PathBuf,
    pub config_path: Option<PathBuf>,
    pub config: Config,
}

impl CommandContext {
    /// 設定ファイルを使わないコンテキストを作成
    pub fn new(project_path: PathBuf) -> Self {
        Self {
            project_path,
            config_path: None,
            config: Config::default(),
        }
    }

    /// プロジェクトルートから設定を読み込んでコンテキストを作成
    ///
    /// `config_path` が指定された場合はそのファイルが必須です。
    /// 指定がなく既定の設定ファイルもない場合は既定値を使います。
    pub fn load(project_path: PathBuf, config_path: Option<PathBuf>) -> Result<Self> {
        let (config_path, config) = match config_path {
            Some(path) => {
                let path = resolve_path(&project_path, &path);
                if !path.exists() {
                    return Err(anyhow!("Config file not found: {:?}", path));
                }
                let config =
                    Config::from_file(&path).with_context(|| "Failed to read config file")?;
                (Some(path), config)
            }
            None => {
                let path = project_path.join(Config::DEFAULT_CONFIG_PATH);
                if path.exists() {
                    let config =
                        Config::from_file(&path).with_context(|| "Failed to read config file")?;
                    (Some(path), config)
                } else {
                    debug!("no config file found; using defaults");
                    (None, Config::default())
                }
            }
        };

        Ok(Self {
            project_path,
            config_path,
            config,
        })
    }

    /// 方言を解決（引数の指定が設定より優先）
    pub fn dialect(&self, requested: Option<&str>) -> Result<Dialect> {
        match requested {
            Some(name) => name.parse(),
            None => Ok(self.config.dialect),
        }
    }

    /// テンプレートディレクトリを解決（引数の指定が設定より優先）
    ///
    /// 設定ファイル内の相対パスは設定ファイルのディレクトリ基準です。
    /// どちらも指定がない場合は `None`（同梱テンプレート）です。
    pub fn template_dir(&self, requested: Option<&Path>) -> Option<PathBuf> {
        if let Some(dir) = requested {
            return Some(resolve_path(&self.project_path, dir));
        }
        let base = self
            .config_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(&self.project_path);
        self.config.resolve_template_dir(base)
    }

    /// プロジェクトルート基準でパスを解決
    pub fn resolve(&self, path: &Path) -> PathBuf {
        resolve_path(&self.project_path, path)
    }
}

fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
