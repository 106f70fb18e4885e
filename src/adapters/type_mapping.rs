// カラム型マッピング
//
// 宣言された型名を方言ごとの型名に変換します。
// 未登録の型名はどちらの方言でもそのまま出力します。

use crate::core::config::Dialect;
use tracing::debug;

/// 両方言で共通の型名テーブル
const COMMON_TYPES: &[(&str, &str)] = &[
    ("INT", "INT"),
    ("SMALLINT", "SMALLINT"),
    ("BIGINT", "BIGINT"),
    ("VARCHAR", "VARCHAR"),
    ("CHAR", "CHAR"),
    ("BOOLEAN", "BOOLEAN"),
    ("BOOL", "BOOLEAN"),
    ("TIMESTAMP", "TIMESTAMP"),
    ("TIMESTAMPTZ", "TIMESTAMPTZ"),
    ("DATE", "DATE"),
    ("TEXT", "TEXT"),
    ("FLOAT4", "FLOAT4"),
    ("FLOAT8", "FLOAT8"),
    ("BIGSERIAL", "BIGSERIAL"),
];

/// 型マッパー
#[derive(Debug, Clone, Copy)]
pub struct TypeMapper {
    dialect: Dialect,
}

impl TypeMapper {
    /// 指定した方言用のTypeMapperを作成
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    /// 方言の型テーブル
    fn table(&self) -> &'static [(&'static str, &'static str)] {
        match self.dialect {
            Dialect::Postgres | Dialect::Redshift => COMMON_TYPES,
        }
    }

    /// 登録済みの型名を検索（大文字小文字を区別しない）
    pub fn lookup(&self, declared: &str) -> Option<&'static str> {
        let upper = declared.to_ascii_uppercase();
        self.table()
            .iter()
            .find(|(from, _)| *from == upper)
            .map(|(_, to)| *to)
    }

    /// 型名をマッピング
    ///
    /// 未登録の型名は宣言どおりに返します。
    pub fn map_type(&self, declared: &str) -> String {
        match self.lookup(declared) {
            Some(mapped) => mapped.to_string(),
            None => {
                debug!(dialect = %self.dialect, column_type = declared, "passing through unmapped column type");
                declared.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_known_types_case_insensitive() {
        let mapper = TypeMapper::new(Dialect::Postgres);

        assert_eq!(mapper.map_type("INT"), "INT");
        assert_eq!(mapper.map_type("int"), "INT");
        assert_eq!(mapper.map_type("varchar"), "VARCHAR");
        assert_eq!(mapper.map_type("TimestampTz"), "TIMESTAMPTZ");
    }

    #[test]
    fn test_map_bool_alias() {
        for dialect in Dialect::ALL {
            let mapper = TypeMapper::new(dialect);
            assert_eq!(mapper.map_type("bool"), "BOOLEAN");
        }
    }

    #[test]
    fn test_unmapped_type_passes_through_in_every_dialect() {
        for dialect in Dialect::ALL {
            let mapper = TypeMapper::new(dialect);
            assert_eq!(mapper.lookup("TIMESTAMP WITHOUT TIME ZONE"), None);
            assert_eq!(
                mapper.map_type("TIMESTAMP WITHOUT TIME ZONE"),
                "TIMESTAMP WITHOUT TIME ZONE"
            );
            // 大文字化はマッピング検索のみに使い、出力は宣言どおり
            assert_eq!(mapper.map_type("numeric"), "numeric");
        }
    }
}
