// PostgreSQL用SQLジェネレーター
//
// テーブル記述子からPostgreSQL用のDDL文を生成します。
// インデックスは存在チェック付きの匿名ブロックとしてテンプレートから生成します。
// テンプレートディレクトリに create-index.sql がない場合は、バイナリに
// 埋め込んだ同梱テンプレートを使います。

use crate::adapters::sql_generator::{
    fragment_if, generate_columns, generate_create_preamble, generate_primary_key, polish,
    SqlGenerator,
};
use crate::adapters::sql_template::{SqlTemplate, TemplateParams, TemplateValue};
use crate::adapters::type_mapping::TypeMapper;
use crate::core::config::Dialect;
use crate::core::error::TemplateError;
use crate::core::naming::CREATE_INDEX_TEMPLATE;
use crate::core::schema::{IndexDescriptor, TableDescriptor};
use std::path::PathBuf;
use tracing::{debug, warn};

/// 同梱のインデックス作成テンプレート
pub const BUNDLED_CREATE_INDEX_TEMPLATE: &str = include_str!("../../../sql/create-index.sql");

/// PostgreSQL用SQLジェネレーター
#[derive(Debug, Clone)]
pub struct PostgresSqlGenerator {
    /// `None` の場合は同梱テンプレートのみを使う
    template_dir: Option<PathBuf>,
    type_mapper: TypeMapper,
}

impl PostgresSqlGenerator {
    /// 新しいPostgresSqlGeneratorを作成
    ///
    /// # Arguments
    ///
    /// * `template_dir` - `create-index.sql` を含むテンプレートディレクトリ
    pub fn new(template_dir: PathBuf) -> Self {
        Self {
            template_dir: Some(template_dir),
            type_mapper: TypeMapper::new(Dialect::Postgres),
        }
    }

    /// インデックス作成テンプレートを読み込む
    fn index_template(&self) -> Result<SqlTemplate, TemplateError> {
        let Some(ref dir) = self.template_dir else {
            return SqlTemplate::parse(BUNDLED_CREATE_INDEX_TEMPLATE);
        };

        let path = dir.join(CREATE_INDEX_TEMPLATE);
        if path.is_file() {
            SqlTemplate::from_file(&path)
        } else {
            warn!(path = %path.display(), "index template not found; using bundled template");
            SqlTemplate::parse(BUNDLED_CREATE_INDEX_TEMPLATE)
        }
    }

    /// インデックス作成テンプレートのパラメータ
    fn index_params(&self, table: &TableDescriptor, index: &IndexDescriptor) -> TemplateParams {
        let mut params = TemplateParams::new();
        params.insert("schema".to_string(), TemplateValue::from(&table.schema));
        params.insert("table".to_string(), TemplateValue::from(&table.table));
        params.insert(
            "indexName".to_string(),
            TemplateValue::from(index.derive_name(&table.table)),
        );
        params.insert(
            "columns".to_string(),
            TemplateValue::from(index.columns.clone()),
        );
        params
    }

    /// CREATE INDEX文を生成
    pub fn generate_create_index(
        &self,
        table: &TableDescriptor,
        index: &IndexDescriptor,
    ) -> Result<String, TemplateError> {
        self.index_template()?.render_named(&self.index_params(table, index))
    }

    /// 全インデックスのCREATE INDEX文を生成
    ///
    /// テンプレートは1回だけ読み込みます。
    pub fn generate_indexes(&self, table: &TableDescriptor) -> Result<Vec<String>, TemplateError> {
        if table.indexes.is_empty() {
            return Ok(Vec::new());
        }

        let template = self.index_template()?;
        table
            .indexes
            .iter()
            .map(|index| template.render_named(&self.index_params(table, index)))
            .collect()
    }
}

impl Default for PostgresSqlGenerator {
    fn default() -> Self {
        Self {
            template_dir: None,
            type_mapper: TypeMapper::new(Dialect::Postgres),
        }
    }
}

impl SqlGenerator for PostgresSqlGenerator {
    fn generate_create_table(&self, table: &TableDescriptor) -> Result<String, TemplateError> {
        debug!(
            schema = %table.schema,
            table = %table.table,
            columns = table.columns.len(),
            indexes = table.indexes.len(),
            "generating postgres CREATE TABLE"
        );

        // PostgreSQLはカラムエンコーディングを持たない
        let columns = generate_columns(table, &self.type_mapper, false);
        let has_columns = !columns.is_empty();
        let indexes = self.generate_indexes(table)?;

        let mut fragments = vec![
            generate_create_preamble(table),
            fragment_if(has_columns, "("),
            columns.join(",\n"),
            generate_primary_key(table),
            fragment_if(has_columns, ")"),
            fragment_if(has_columns, ";"),
        ];
        fragments.extend(indexes);

        Ok(polish(fragments))
    }
}
