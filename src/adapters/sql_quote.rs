// SQL識別子・リテラルのクォートユーティリティ
//
// sql_generatorとsql_templateの両方から使用される共有モジュールです。
// 安全な識別子はそのまま出力し、それ以外はダブルクォートで囲みます。

/// クォート不要と判定される識別子でも予約語の場合はクォートする
const RESERVED_WORDS: &[&str] = &[
    "AES128", "AES256", "ALL", "ALLOWOVERWRITE", "ANALYSE", "ANALYZE", "AND", "ANY",
    "ARRAY", "AS", "ASC", "AUTHORIZATION", "BACKUP", "BETWEEN", "BINARY", "BLANKSASNULL",
    "BOTH", "BYTEDICT", "BZIP2", "CASE", "CAST", "CHECK", "COLLATE", "COLUMN",
    "CONSTRAINT", "CREATE", "CREDENTIALS", "CROSS", "CURRENT_DATE", "CURRENT_TIME",
    "CURRENT_TIMESTAMP", "CURRENT_USER", "CURRENT_USER_ID", "DEFAULT", "DEFERRABLE",
    "DEFLATE", "DEFRAG", "DELTA", "DELTA32K", "DESC", "DISABLE", "DISTINCT", "DO",
    "ELSE", "EMPTYASNULL", "ENABLE", "ENCODE", "ENCRYPT", "ENCRYPTION", "END",
    "EXCEPT", "EXPLICIT", "FALSE", "FOR", "FOREIGN", "FREEZE", "FROM", "FULL",
    "GLOBALDICT256", "GLOBALDICT64K", "GRANT", "GROUP", "GZIP", "HAVING", "IDENTITY",
    "IGNORE", "ILIKE", "IN", "INITIALLY", "INNER", "INTERSECT", "INTO", "IS", "ISNULL",
    "JOIN", "LEADING", "LEFT", "LIKE", "LIMIT", "LOCALTIME", "LOCALTIMESTAMP", "LUN",
    "LUNS", "LZO", "LZOP", "MINUS", "MOSTLY13", "MOSTLY32", "MOSTLY8", "NATURAL",
    "NEW", "NOT", "NOTNULL", "NULL", "NULLS", "OFF", "OFFLINE", "OFFSET", "OLD", "ON",
    "ONLY", "OPEN", "OR", "ORDER", "OUTER", "OVERLAPS", "PARALLEL", "PARTITION",
    "PERCENT", "PERMISSIONS", "PLACING", "PRIMARY", "RAW", "READRATIO", "RECOVER",
    "REFERENCES", "RESPECT", "REJECTLOG", "RESORT", "RESTORE", "RIGHT", "SELECT",
    "SESSION_USER", "SIMILAR", "SOME", "SYSDATE", "SYSTEM", "TABLE", "TAG", "TDES",
    "TEXT255", "TEXT32K", "THEN", "TIMESTAMP", "TO", "TOP", "TRAILING", "TRUE",
    "TRUNCATECOLUMNS", "UNION", "UNIQUE", "USER", "USING", "VERBOSE", "WALLET",
    "WHEN", "WHERE", "WITH", "WITHOUT",
];

/// エスケープ文字列リテラルの接頭辞
pub const ESCAPE_STRING_PREFIX: &str = "E'";

/// 予約語かどうか（大文字小文字を区別しない）
pub fn is_reserved_word(name: &str) -> bool {
    let upper = name.to_ascii_uppercase();
    RESERVED_WORDS.contains(&upper.as_str())
}

/// クォートせずに出力できる識別子かどうか
///
/// 先頭が小文字英字またはアンダースコア、以降が小文字英数字・`_`・`$`のみで、
/// 予約語ではない場合にtrueを返します。
pub fn is_safe_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    (first.is_ascii_lowercase() || first == '_')
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '$')
        && !is_reserved_word(name)
}

/// 識別子をクォート
///
/// 安全な識別子はそのまま返し、それ以外はダブルクォートで囲みます。
/// 識別子内のダブルクォートは二重にエスケープします。
///
/// # Examples
/// ```
/// use stratum_ddl::adapters::sql_quote::quote_identifier;
/// assert_eq!(quote_identifier("users"), "users");
/// assert_eq!(quote_identifier("dateReleased"), r#""dateReleased""#);
/// ```
pub fn quote_identifier(name: &str) -> String {
    if is_safe_identifier(name) {
        name.to_string()
    } else {
        format!("\"{}\"", name.replace('"', "\"\""))
    }
}

/// カラム名リストをクォートしてカンマ区切りで結合
///
/// 区切りは空白なしの `,` です。
pub fn quote_identifiers(names: &[String]) -> String {
    names
        .iter()
        .map(|n| quote_identifier(n))
        .collect::<Vec<_>>()
        .join(",")
}

/// 文字列リテラルをクォート
///
/// シングルクォートは二重にエスケープします。
/// バックスラッシュを含む場合は二重化し、`E'` 接頭辞付きのエスケープ文字列にします。
///
/// # Examples
/// ```
/// use stratum_ddl::adapters::sql_quote::quote_literal;
/// assert_eq!(quote_literal("it's"), "'it''s'");
/// assert_eq!(quote_literal(r"a\b"), r"E'a\\b'");
/// ```
pub fn quote_literal(value: &str) -> String {
    let escaped = value.replace('\'', "''");
    if escaped.contains('\\') {
        format!("{}{}'", ESCAPE_STRING_PREFIX, escaped.replace('\\', "\\\\"))
    } else {
        format!("'{}'", escaped)
    }
}

/// エスケープ文字列接頭辞を取り除く
///
/// `E'...'`（大文字小文字を区別しない）で始まるリテラルを通常の `'...'` にします。
pub fn strip_escape_prefix(literal: &str) -> String {
    let bytes = literal.as_bytes();
    if bytes.len() >= 2 && (bytes[0] == b'E' || bytes[0] == b'e') && bytes[1] == b'\'' {
        literal[1..].to_string()
    } else {
        literal.to_string()
    }
}
