// Redshift用SQLジェネレーター
//
// テーブル記述子からRedshift用のDDL文を生成します。
// Redshiftにはインデックスがないため、インデックス定義は無視します。

use crate::adapters::sql_generator::{
    fragment_if, generate_columns, generate_create_preamble, generate_primary_key, polish,
    SqlGenerator,
};
use crate::adapters::type_mapping::TypeMapper;
use crate::core::config::Dialect;
use crate::core::error::TemplateError;
use crate::core::schema::{StorageOptions, TableDescriptor};
use tracing::debug;

/// Redshift用SQLジェネレーター
#[derive(Debug, Clone)]
pub struct RedshiftSqlGenerator {
    type_mapper: TypeMapper,
}

impl RedshiftSqlGenerator {
    /// 新しいRedshiftSqlGeneratorを作成
    pub fn new() -> Self {
        Self {
            type_mapper: TypeMapper::new(Dialect::Redshift),
        }
    }

    /// テーブルオプション（DISTSTYLE / DISTKEY / SORTKEY）を生成
    ///
    /// 指定されたオプションのみを改行区切りで出力します。
    pub fn generate_table_options(&self, options: &StorageOptions) -> String {
        polish([
            options
                .dist_style
                .as_ref()
                .map(|s| format!("DISTSTYLE {}", s))
                .unwrap_or_default(),
            options
                .dist_key
                .as_ref()
                .map(|k| format!("DISTKEY({})", k))
                .unwrap_or_default(),
            options
                .sort_key
                .as_ref()
                .map(|k| format!("SORTKEY({})", k))
                .unwrap_or_default(),
        ])
    }
}

impl Default for RedshiftSqlGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlGenerator for RedshiftSqlGenerator {
    fn generate_create_table(&self, table: &TableDescriptor) -> Result<String, TemplateError> {
        debug!(
            schema = %table.schema,
            table = %table.table,
            columns = table.columns.len(),
            "generating redshift CREATE TABLE"
        );
        if !table.indexes.is_empty() {
            debug!(count = table.indexes.len(), "ignoring indexes for redshift");
        }

        let columns = generate_columns(table, &self.type_mapper, true);
        let has_columns = !columns.is_empty();

        Ok(polish([
            generate_create_preamble(table),
            fragment_if(has_columns, "("),
            columns.join(",\n"),
            generate_primary_key(table),
            fragment_if(has_columns, ")"),
            self.generate_table_options(&table.options),
            fragment_if(has_columns, ";"),
        ]))
    }
}
