// コマンドハンドラー層
// 各CLIコマンドの実装

pub mod render;
pub mod translate;

use crate::core::error::IoError;
use colored::Colorize;
use anyhow::Result;
use std::fs;
use std::path::Path;

/// 生成したSQLを出力先に応じて処理
///
/// 出力ファイルが指定された場合は書き込んでサマリーを返し、
/// 指定がない場合はSQLをそのまま返します（標準出力用）。
pub(crate) fn emit_sql(sql: String, output: Option<&Path>) -> Result<String> {
    let Some(path) = output else {
        return Ok(sql);
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| IoError::FileWrite {
            path: parent.display().to_string(),
            cause: e.to_string(),
        })?;
    }

    let mut content = sql;
    if !content.ends_with('\n') {
        content.push('\n');
    }
    fs::write(path, content).map_err(|e| IoError::FileWrite {
        path: path.display().to_string(),
        cause: e.to_string(),
    })?;

    Ok(format!("{} SQL written to {}", "✓".green(), path.display()))
}
