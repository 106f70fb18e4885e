// スキーマ正規化サービス
//
// 部分的に指定されたテーブル定義（JSON値）を、全フィールドが揃った
// TableDescriptorへ変換します。
// 正規化は失敗しません。型が合わないフィールドは警告を出して既定値を使います。

use crate::core::schema::{ColumnDescriptor, IndexDescriptor, StorageOptions, TableDescriptor};
use serde_json::{Map, Value};
use tracing::warn;

/// スキーマ正規化サービス
#[derive(Debug, Clone, Default)]
pub struct SchemaNormalizerService {}

impl SchemaNormalizerService {
    /// 新しいSchemaNormalizerServiceを作成
    pub fn new() -> Self {
        Self {}
    }

    /// テーブル定義を正規化
    ///
    /// カラムとインデックスの順序は入力どおりに保持します。
    /// `type` など記述子に含まれないフィールドは無視します。
    pub fn normalize_table(&self, value: &Value) -> TableDescriptor {
        let Some(obj) = value.as_object() else {
            warn!("table description is not an object; using an empty table");
            return TableDescriptor::default();
        };

        TableDescriptor {
            schema: string_field(obj, "schema"),
            table: string_field(obj, "table"),
            description: optional_string(obj, "description"),
            primary_key: self.normalize_primary_key(obj.get("primaryKey")),
            columns: self.normalize_columns(obj.get("columns")),
            indexes: self.normalize_indexes(obj.get("indexes")),
            options: StorageOptions {
                dist_style: optional_string(obj, "distStyle"),
                dist_key: optional_string(obj, "distKey"),
                sort_key: optional_key_list(obj, "sortKey"),
            },
        }
    }

    /// カラム定義を正規化
    ///
    /// オブジェクト以外は `None` を返します。
    pub fn normalize_column(&self, value: &Value) -> Option<ColumnDescriptor> {
        let obj = value.as_object()?;

        Some(ColumnDescriptor {
            name: string_field(obj, "name"),
            column_type: string_field(obj, "type"),
            length: length_field(obj),
            nullable: nullable_field(obj),
            default: default_field(obj),
            encode: optional_string(obj, "encode"),
        })
    }

    fn normalize_columns(&self, value: Option<&Value>) -> Vec<ColumnDescriptor> {
        match value {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .filter_map(|(i, item)| {
                    let column = self.normalize_column(item);
                    if column.is_none() {
                        warn!(index = i, "skipping column that is not an object");
                    }
                    column
                })
                .collect(),
            Some(_) => {
                warn!(field = "columns", "expected an array; using no columns");
                Vec::new()
            }
        }
    }

    fn normalize_primary_key(&self, value: Option<&Value>) -> Vec<String> {
        match value {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::String(s)) if s.is_empty() => Vec::new(),
            Some(Value::String(s)) => vec![s.clone()],
            Some(Value::Array(items)) => string_items(items, "primaryKey"),
            Some(_) => {
                warn!(field = "primaryKey", "expected a string or an array; using no primary key");
                Vec::new()
            }
        }
    }

    fn normalize_indexes(&self, value: Option<&Value>) -> Vec<IndexDescriptor> {
        let items = match value {
            None | Some(Value::Null) => return Vec::new(),
            Some(Value::Array(items)) => items,
            Some(_) => {
                warn!(field = "indexes", "expected an array; using no indexes");
                return Vec::new();
            }
        };

        items
            .iter()
            .filter_map(|item| {
                let columns = match item {
                    Value::String(s) if !s.is_empty() => vec![s.clone()],
                    Value::Array(cols) => string_items(cols, "indexes"),
                    _ => Vec::new(),
                };
                if columns.is_empty() {
                    warn!(field = "indexes", "skipping index without columns");
                    None
                } else {
                    Some(IndexDescriptor::new(columns))
                }
            })
            .collect()
    }
}

/// 必須の文字列フィールド（未指定は空文字列）
fn string_field(obj: &Map<String, Value>, key: &str) -> String {
    match obj.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(_) => {
            warn!(field = key, "expected a string; using an empty string");
            String::new()
        }
    }
}

/// 任意の文字列フィールド（空文字列は未指定扱い）
fn optional_string(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            warn!(field = key, "expected a string; ignoring");
            None
        }
    }
}

/// 文字列または文字列配列のキー指定（配列はカンマ区切りにする）
fn optional_key_list(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key) {
        Some(Value::Array(items)) => {
            let keys = string_items(items, key);
            (!keys.is_empty()).then(|| keys.join(","))
        }
        _ => optional_string(obj, key),
    }
}

/// 配列から文字列要素だけを取り出す
fn string_items(items: &[Value], field: &str) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.clone()),
            _ => {
                warn!(field, "skipping non-string entry");
                None
            }
        })
        .collect()
}

/// 長さ（正の整数のみ有効）
fn length_field(obj: &Map<String, Value>) -> Option<u64> {
    let length = match obj.get("length") {
        None | Some(Value::Null) => return None,
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        Some(_) => None,
    };

    match length {
        Some(0) => None,
        Some(n) => Some(n),
        None => {
            warn!(field = "length", "expected a positive integer; ignoring");
            None
        }
    }
}

/// NULL許容（既定はtrue）
fn nullable_field(obj: &Map<String, Value>) -> bool {
    match obj.get("nullable") {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => *b,
        Some(_) => {
            warn!(field = "nullable", "expected a boolean; using true");
            true
        }
    }
}

/// デフォルト値の式
///
/// 未指定は `None`。明示的な `null` は `NULL` 式として扱います。
fn default_field(obj: &Map<String, Value>) -> Option<String> {
    match obj.get("default") {
        None => None,
        Some(Value::Null) => Some("NULL".to_string()),
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Bool(b)) => Some(b.to_string().to_uppercase()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(_) => {
            warn!(field = "default", "expected a scalar SQL expression; ignoring");
            None
        }
    }
}
