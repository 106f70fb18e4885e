// 命名ポリシー
//
// アプリケーション名と関連ファイル名の単一ソースを提供します。

/// 既定の設定ファイル名
pub const CONFIG_FILE: &str = ".stratum-ddl.yaml";

/// バイナリ名
pub const BINARY_NAME: &str = "stratum-ddl";

/// テンプレートファイルの拡張子（`%F:<name>` で省略される部分）
pub const TEMPLATE_EXTENSION: &str = "sql";

/// インデックス作成テンプレートのファイル名
pub const CREATE_INDEX_TEMPLATE: &str = "create-index.sql";

/// 派生インデックス名の接尾辞
pub const INDEX_SUFFIX: &str = "idx";
