/// PostgreSQL用CREATE変換のテスト
///
/// テーブル記述からPostgreSQL用のCREATE TABLE文と、
/// 存在チェック付きのインデックス作成ブロックが生成されることを確認します。

#[cfg(test)]
mod postgres_create_tests {
    use serde_json::{json, Value};
    use stratum_ddl::{translate, Dialect};

    fn translate_creation(mut input: Value) -> String {
        input["type"] = json!("create");
        translate(Dialect::Postgres, &input).unwrap()
    }

    fn index_block(schema: &str, table: &str, name: &str, create: &str) -> String {
        format!(
            "do\n$$\nbegin\nif not exists (\n    select indexname\n        from pg_indexes\n    where schemaname = '{schema}'\n        and tablename = '{table}'\n        and indexname = '{name}'\n)\nthen\n    {create}\nend if;\nend\n$$;\n"
        )
    }

    /// 操作タイプ未指定はエラー
    #[test]
    fn test_missing_type_is_error() {
        let err = translate(Dialect::Postgres, &json!({"schema": "foo", "table": "bar"}))
            .unwrap_err();
        assert_eq!(err.to_string(), "Operation type required");
    }

    /// 未知の操作タイプはエラー
    #[test]
    fn test_unknown_type_is_error() {
        let err = translate(
            Dialect::Postgres,
            &json!({"type": "non-existent", "schema": "foo", "table": "bar"}),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Unknown operation type: non-existent");
    }

    /// カラムなしのテーブル
    #[test]
    fn test_create_table_without_columns() {
        let sql = translate_creation(json!({"schema": "foo", "table": "bar"}));
        assert_eq!(sql, "CREATE TABLE IF NOT EXISTS foo.bar");
    }

    /// キャメルケースのスキーマ名・テーブル名はクォートされる
    #[test]
    fn test_escapes_camelcase_schema_and_table() {
        let sql = translate_creation(json!({"schema": "fOO", "table": "bAR"}));
        assert_eq!(sql, r#"CREATE TABLE IF NOT EXISTS "fOO"."bAR""#);
    }

    /// 最も単純なカラム
    #[test]
    fn test_simplest_column() {
        let sql = translate_creation(json!({"columns": [{"name": "id", "type": "INT"}]}));
        assert!(sql.contains("\nid INT\n"));
    }

    /// カラムは ",\n" で結合される
    #[test]
    fn test_joins_columns() {
        let sql = translate_creation(json!({
            "columns": [
                {"name": "id", "type": "INT"},
                {"name": "price", "type": "FLOAT4"}
            ]
        }));
        assert!(sql.contains("id INT,\nprice FLOAT4"));
    }

    /// 主キー
    #[test]
    fn test_primary_key_forms() {
        let sql = translate_creation(json!({"primaryKey": "foo"}));
        assert!(sql.contains(",PRIMARY KEY(foo)"));

        let sql = translate_creation(json!({"primaryKey": "fOO"}));
        assert!(sql.contains(r#",PRIMARY KEY("fOO")"#));

        let sql = translate_creation(json!({"primaryKey": ["foo", "bar", "baz"]}));
        assert!(sql.contains(",PRIMARY KEY(foo,bar,baz)"));
    }

    /// エンコーディングは出力されない
    #[test]
    fn test_encodings_are_dropped() {
        let sql = translate_creation(json!({
            "columns": [{"name": "id", "type": "INT", "encode": "ZSTD"}]
        }));
        assert!(!sql.contains("ENCODE"));
    }

    /// インデックスの生成
    #[test]
    fn test_generates_index() {
        let sql = translate_creation(json!({"schema": "foo", "table": "bar", "indexes": [["id"]]}));
        let expected = format!(
            "CREATE TABLE IF NOT EXISTS foo.bar\n{}",
            index_block("foo", "bar", "bar_id_idx", "create index bar_id_idx ON foo.bar(id);")
        );
        assert_eq!(sql, expected);
    }

    /// キャメルケースのインデックスはクォートされ、チェック側はリテラルのまま
    #[test]
    fn test_escapes_camelcase_index() {
        let sql =
            translate_creation(json!({"schema": "fOO", "table": "bAR", "indexes": [["bAZ"]]}));
        let expected = format!(
            "CREATE TABLE IF NOT EXISTS \"fOO\".\"bAR\"\n{}",
            index_block(
                "fOO",
                "bAR",
                "bAR_bAZ_idx",
                r#"create index "bAR_bAZ_idx" ON "fOO"."bAR"("bAZ");"#
            )
        );
        assert_eq!(sql, expected);
    }

    /// 複合インデックス
    #[test]
    fn test_generates_compound_index() {
        let sql = translate_creation(json!({
            "schema": "foo", "table": "bar", "indexes": [["id", "name"]]
        }));
        let expected = format!(
            "CREATE TABLE IF NOT EXISTS foo.bar\n{}",
            index_block(
                "foo",
                "bar",
                "bar_id_name_idx",
                "create index bar_id_name_idx ON foo.bar(id,name);"
            )
        );
        assert_eq!(sql, expected);
    }

    /// 複数インデックスは空行を挟んで順に出力される
    #[test]
    fn test_generates_multiple_indexes() {
        let sql = translate_creation(json!({
            "schema": "foo", "table": "bar", "indexes": [["id"], ["name"]]
        }));
        let expected = format!(
            "CREATE TABLE IF NOT EXISTS foo.bar\n{}\n{}",
            index_block("foo", "bar", "bar_id_idx", "create index bar_id_idx ON foo.bar(id);"),
            index_block(
                "foo",
                "bar",
                "bar_name_idx",
                "create index bar_name_idx ON foo.bar(name);"
            )
        );
        assert_eq!(sql, expected);
        assert!(sql.contains("$$;\n\ndo"));
    }

    /// 全要素の組み合わせ
    #[test]
    fn test_puts_it_all_together() {
        let sql = translate_creation(json!({
            "schema": "music",
            "table": "albums",
            "description": "This is table of musical albums",
            "columns": [
                {"name": "id", "type": "INT", "nullable": false, "encode": "DELTA32K"},
                {"name": "title", "type": "VARCHAR", "length": 256, "encode": "ZSTD"},
                {"name": "dateReleased", "type": "DATE", "encode": "LZO"}
            ],
            "primaryKey": "id",
            "indexes": [["dateReleased"]],
            "distStyle": "KEY",
            "distKey": "title",
            "sortKey": "id"
        }));

        let expected = format!(
            "CREATE TABLE IF NOT EXISTS music.albums\n(\nid INT NOT NULL,\ntitle VARCHAR(256),\n\"dateReleased\" DATE\n,PRIMARY KEY(id)\n)\n;\n{}",
            index_block(
                "music",
                "albums",
                "albums_dateReleased_idx",
                r#"create index "albums_dateReleased_idx" ON music.albums("dateReleased");"#
            )
        );
        assert_eq!(sql, expected);
    }

    /// ストレージオプションは出力されない
    #[test]
    fn test_storage_options_are_ignored() {
        let sql = translate_creation(json!({
            "columns": [{"name": "id", "type": "INT"}],
            "distStyle": "KEY",
            "distKey": "id",
            "sortKey": "id"
        }));
        assert!(!sql.contains("DISTSTYLE"));
        assert!(!sql.contains("DISTKEY"));
        assert!(!sql.contains("SORTKEY"));
    }

    /// 同じ入力からは常に同じ出力
    #[test]
    fn test_output_is_deterministic() {
        let input = json!({
            "type": "create",
            "schema": "foo",
            "table": "bar",
            "columns": [{"name": "id", "type": "INT"}],
            "indexes": [["id"]]
        });
        let first = translate(Dialect::Postgres, &input).unwrap();
        let second = translate(Dialect::Postgres, &input).unwrap();
        assert_eq!(first, second);
    }
}
