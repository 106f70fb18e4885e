// SQL生成アダプター
//
// 正規化済みのテーブル記述子から各方言用のCREATE TABLE文を生成するアダプター層。
// 方言に共通するフラグメント（CREATE句・カラム定義・主キー）はここで生成します。

pub mod postgres;
pub mod redshift;

use crate::adapters::sql_quote::{quote_identifier, quote_identifiers};
use crate::adapters::type_mapping::TypeMapper;
use crate::core::error::TemplateError;
use crate::core::schema::{ColumnDescriptor, TableDescriptor};

/// SQLジェネレータートレイト
///
/// 各方言用のSQLジェネレーターが実装すべきインターフェース。
pub trait SqlGenerator {
    /// CREATE TABLE文を生成
    ///
    /// # Arguments
    ///
    /// * `table` - 正規化済みのテーブル記述子
    ///
    /// # Returns
    ///
    /// 改行区切りのSQL文字列。テンプレートの展開に失敗した場合はエラー。
    fn generate_create_table(&self, table: &TableDescriptor) -> Result<String, TemplateError>;
}

/// CREATE TABLE句を生成
pub fn generate_create_preamble(table: &TableDescriptor) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {}.{}",
        quote_identifier(&table.schema),
        quote_identifier(&table.table)
    )
}

/// カラム定義1行を生成
///
/// `include_encoding` がfalseの場合、エンコーディング指定は出力しません。
pub fn generate_column_definition(
    column: &ColumnDescriptor,
    mapper: &TypeMapper,
    include_encoding: bool,
) -> String {
    let mut line = format!(
        "{} {}",
        quote_identifier(&column.name),
        mapper.map_type(&column.column_type)
    );

    if let Some(length) = column.length {
        line.push_str(&format!("({})", length));
    }

    if !column.nullable {
        line.push_str(" NOT NULL");
    }

    if let Some(ref default_value) = column.default {
        line.push_str(&format!(" DEFAULT {}", default_value));
    }

    if include_encoding {
        if let Some(ref encode) = column.encode {
            line.push_str(&format!(" ENCODE {}", encode));
        }
    }

    line
}

/// 全カラムの定義行を生成
pub fn generate_columns(
    table: &TableDescriptor,
    mapper: &TypeMapper,
    include_encoding: bool,
) -> Vec<String> {
    table
        .columns
        .iter()
        .map(|column| generate_column_definition(column, mapper, include_encoding))
        .collect()
}

/// 主キーのフラグメントを生成
///
/// 主キーがない場合は空文字列を返します。
pub fn generate_primary_key(table: &TableDescriptor) -> String {
    if table.has_primary_key() {
        format!(",PRIMARY KEY({})", quote_identifiers(&table.primary_key))
    } else {
        String::new()
    }
}

/// 空のフラグメントを除いて改行で結合
pub fn polish<I>(fragments: I) -> String
where
    I: IntoIterator<Item = String>,
{
    fragments
        .into_iter()
        .filter(|f| !f.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// 条件付きのフラグメント
pub(crate) fn fragment_if(condition: bool, text: &str) -> String {
    if condition {
        text.to_string()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Dialect;

    #[test]
    fn test_generate_create_preamble() {
        let table = TableDescriptor::new("foo", "bar");
        assert_eq!(generate_create_preamble(&table), "CREATE TABLE IF NOT EXISTS foo.bar");

        let table = TableDescriptor::new("fOO", "bAR");
        assert_eq!(
            generate_create_preamble(&table),
            r#"CREATE TABLE IF NOT EXISTS "fOO"."bAR""#
        );
    }

    #[test]
    fn test_generate_column_definition_simple() {
        let mapper = TypeMapper::new(Dialect::Postgres);
        let column = ColumnDescriptor::new("id", "int");

        assert_eq!(generate_column_definition(&column, &mapper, false), "id INT");
    }

    #[test]
    fn test_generate_column_definition_full() {
        let mapper = TypeMapper::new(Dialect::Redshift);
        let column = ColumnDescriptor::new("createdTime", "TIMESTAMPTZ")
            .not_null()
            .with_default("(CURRENT_TIMESTAMP AT TIME ZONE 'utc')")
            .with_encode("LZO");

        assert_eq!(
            generate_column_definition(&column, &mapper, true),
            r#""createdTime" TIMESTAMPTZ NOT NULL DEFAULT (CURRENT_TIMESTAMP AT TIME ZONE 'utc') ENCODE LZO"#
        );
        assert_eq!(
            generate_column_definition(&column, &mapper, false),
            r#""createdTime" TIMESTAMPTZ NOT NULL DEFAULT (CURRENT_TIMESTAMP AT TIME ZONE 'utc')"#
        );
    }

    #[test]
    fn test_generate_column_definition_with_length() {
        let mapper = TypeMapper::new(Dialect::Postgres);
        let column = ColumnDescriptor::new("title", "VARCHAR").with_length(256);

        assert_eq!(
            generate_column_definition(&column, &mapper, false),
            "title VARCHAR(256)"
        );
    }

    #[test]
    fn test_generate_column_definition_empty_default_is_present() {
        let mapper = TypeMapper::new(Dialect::Postgres);
        let column = ColumnDescriptor::new("note", "TEXT").with_default("''");

        assert_eq!(
            generate_column_definition(&column, &mapper, false),
            "note TEXT DEFAULT ''"
        );
    }

    #[test]
    fn test_generate_primary_key() {
        let mut table = TableDescriptor::new("foo", "bar");
        assert_eq!(generate_primary_key(&table), "");

        table.primary_key = vec!["foo".to_string(), "bar".to_string(), "baz".to_string()];
        assert_eq!(generate_primary_key(&table), ",PRIMARY KEY(foo,bar,baz)");

        table.primary_key = vec!["fOO".to_string()];
        assert_eq!(generate_primary_key(&table), r#",PRIMARY KEY("fOO")"#);
    }

    #[test]
    fn test_polish_drops_empty_fragments() {
        let joined = polish(vec![
            "a".to_string(),
            String::new(),
            "b".to_string(),
            String::new(),
        ]);
        assert_eq!(joined, "a\nb");
        assert_eq!(polish(Vec::<String>::new()), "");
    }
}
