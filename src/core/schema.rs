// テーブル記述子モデル
//
// 方言に依存しないテーブル定義を表現するドメインモデル。
// 正規化済み（全フィールドが存在する）の形だけを表現します。

use crate::core::naming::INDEX_SUFFIX;

/// テーブル記述子
///
/// 正規化済みのテーブル定義。カラムとインデックスの順序は入力どおりに保持され、
/// 生成されるSQLの順序をそのまま決定します。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableDescriptor {
    /// スキーマ名
    pub schema: String,

    /// テーブル名
    pub table: String,

    /// 説明（生成には使用しない）
    pub description: Option<String>,

    /// 主キーを構成するカラム名（空の場合は主キーなし）
    pub primary_key: Vec<String>,

    /// カラム定義
    pub columns: Vec<ColumnDescriptor>,

    /// インデックス定義
    pub indexes: Vec<IndexDescriptor>,

    /// 方言固有のストレージオプション
    pub options: StorageOptions,
}

impl TableDescriptor {
    /// 新しいテーブル記述子を作成
    pub fn new(schema: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            table: table.into(),
            ..Self::default()
        }
    }

    /// カラムを追加
    pub fn add_column(&mut self, column: ColumnDescriptor) {
        self.columns.push(column);
    }

    /// インデックスを追加
    pub fn add_index(&mut self, index: IndexDescriptor) {
        self.indexes.push(index);
    }

    /// 主キーが定義されているかどうか
    pub fn has_primary_key(&self) -> bool {
        !self.primary_key.is_empty()
    }
}

/// カラム記述子
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDescriptor {
    /// カラム名
    pub name: String,

    /// 宣言された型（大文字小文字を区別しない）
    pub column_type: String,

    /// 長さ（正の整数）
    pub length: Option<u64>,

    /// NULL許容
    pub nullable: bool,

    /// デフォルト値のSQL式
    ///
    /// `None` は「未指定」、`Some("")` は空の式が指定されたことを表します。
    pub default: Option<String>,

    /// 圧縮エンコーディングのヒント（カラムナ方言のみ）
    pub encode: Option<String>,
}

impl ColumnDescriptor {
    /// 新しいカラム記述子を作成（NULL許容、デフォルトなし）
    pub fn new(name: impl Into<String>, column_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.into(),
            length: None,
            nullable: true,
            default: None,
            encode: None,
        }
    }

    /// 長さを指定
    pub fn with_length(mut self, length: u64) -> Self {
        self.length = Some(length);
        self
    }

    /// NOT NULLにする
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// デフォルト値を指定
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// エンコーディングを指定
    pub fn with_encode(mut self, encode: impl Into<String>) -> Self {
        self.encode = Some(encode.into());
        self
    }
}

/// インデックス記述子
///
/// インデックス名は指定できず、常にテーブル名とカラム名から導出されます。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDescriptor {
    /// 対象カラム名（順序どおり）
    pub columns: Vec<String>,
}

impl IndexDescriptor {
    /// 新しいインデックス記述子を作成
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// インデックス名を導出
    ///
    /// `<table>_<col1>_..._<coln>_idx` の形式。
    pub fn derive_name(&self, table: &str) -> String {
        std::iter::once(table)
            .chain(self.columns.iter().map(String::as_str))
            .chain(std::iter::once(INDEX_SUFFIX))
            .collect::<Vec<_>>()
            .join("_")
    }
}

/// ストレージオプション（カラムナ方言のみ）
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StorageOptions {
    /// 分散スタイル
    pub dist_style: Option<String>,

    /// 分散キー
    pub dist_key: Option<String>,

    /// ソートキー（複合キーはカンマ区切り）
    pub sort_key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_descriptor_defaults() {
        let column = ColumnDescriptor::new("id", "INT");

        assert!(column.nullable);
        assert_eq!(column.default, None);
        assert_eq!(column.length, None);
        assert_eq!(column.encode, None);
    }

    #[test]
    fn test_column_descriptor_builder() {
        let column = ColumnDescriptor::new("title", "VARCHAR")
            .with_length(256)
            .not_null()
            .with_default("''")
            .with_encode("ZSTD");

        assert_eq!(column.length, Some(256));
        assert!(!column.nullable);
        assert_eq!(column.default.as_deref(), Some("''"));
        assert_eq!(column.encode.as_deref(), Some("ZSTD"));
    }

    #[test]
    fn test_derive_index_name_single_column() {
        let index = IndexDescriptor::new(vec!["id".to_string()]);
        assert_eq!(index.derive_name("bar"), "bar_id_idx");
    }

    #[test]
    fn test_derive_index_name_compound() {
        let index = IndexDescriptor::new(vec!["id".to_string(), "name".to_string()]);
        assert_eq!(index.derive_name("bar"), "bar_id_name_idx");
    }

    #[test]
    fn test_table_descriptor_helpers() {
        let mut table = TableDescriptor::new("music", "albums");
        assert!(!table.has_primary_key());

        table.add_column(ColumnDescriptor::new("id", "INT"));
        table.add_index(IndexDescriptor::new(vec!["id".to_string()]));
        table.primary_key = vec!["id".to_string()];

        assert!(table.has_primary_key());
        assert_eq!(table.columns.len(), 1);
        assert_eq!(table.indexes.len(), 1);
    }
}
