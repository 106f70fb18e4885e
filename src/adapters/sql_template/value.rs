// テンプレート引数の値
//
// プレースホルダーに埋め込む値を表現します。
// 日時系の値は変換時に全てUTCタイムスタンプへ正規化されるため、
// 呼び出し側がどの日時型を使っても同じ表現で出力されます。

use crate::adapters::sql_quote::{quote_identifier, quote_literal, strip_escape_prefix};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;
use std::collections::BTreeMap;

/// タイムスタンプの出力形式
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f+00:00";

/// 名前付きパラメータ
pub type TemplateParams = BTreeMap<String, TemplateValue>;

/// テンプレート引数の値
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateValue {
    /// NULL
    Null,
    /// 真偽値
    Bool(bool),
    /// 整数
    Integer(i64),
    /// 浮動小数点数
    Float(f64),
    /// 文字列
    Text(String),
    /// UTCタイムスタンプ
    Timestamp(DateTime<Utc>),
    /// 値のリスト（カンマ区切りで展開）
    List(Vec<TemplateValue>),
}

impl TemplateValue {
    /// リストの各要素を変換してカンマ区切りで結合
    fn join_with(items: &[TemplateValue], f: impl Fn(&TemplateValue) -> Option<String>) -> Option<String> {
        items
            .iter()
            .map(f)
            .collect::<Option<Vec<_>>>()
            .map(|parts| parts.join(","))
    }

    fn timestamp_text(ts: &DateTime<Utc>) -> String {
        ts.format(TIMESTAMP_FORMAT).to_string()
    }

    /// `%I` 用の表現
    ///
    /// NULLは識別子にできないため `None` を返します。
    pub fn to_identifier(&self) -> Option<String> {
        match self {
            TemplateValue::Null => None,
            TemplateValue::Bool(b) => Some(quote_identifier(&b.to_string())),
            TemplateValue::Integer(i) => Some(quote_identifier(&i.to_string())),
            TemplateValue::Float(f) => Some(quote_identifier(&f.to_string())),
            TemplateValue::Text(s) => Some(quote_identifier(s)),
            TemplateValue::Timestamp(ts) => Some(quote_identifier(&Self::timestamp_text(ts))),
            TemplateValue::List(items) => Self::join_with(items, Self::to_identifier),
        }
    }

    /// SQLリテラルとしての表現
    ///
    /// バックスラッシュを含む文字列は `E'...'` 形式になります。
    pub fn to_literal(&self) -> String {
        match self {
            TemplateValue::Null => "NULL".to_string(),
            TemplateValue::Bool(b) => b.to_string(),
            TemplateValue::Integer(i) => i.to_string(),
            TemplateValue::Float(f) => f.to_string(),
            TemplateValue::Text(s) => quote_literal(s),
            TemplateValue::Timestamp(ts) => quote_literal(&Self::timestamp_text(ts)),
            TemplateValue::List(items) => {
                Self::join_with(items, |v| Some(v.to_literal())).unwrap_or_default()
            }
        }
    }

    /// `%L` 用の表現
    ///
    /// `E'` 接頭辞はリストの要素ごとに取り除きます。
    pub fn to_template_literal(&self) -> String {
        match self {
            TemplateValue::List(items) => {
                Self::join_with(items, |v| Some(v.to_template_literal())).unwrap_or_default()
            }
            other => strip_escape_prefix(&other.to_literal()),
        }
    }

    /// `%s` 用の表現
    pub fn to_raw(&self) -> String {
        match self {
            TemplateValue::Null => String::new(),
            TemplateValue::Bool(b) => b.to_string(),
            TemplateValue::Integer(i) => i.to_string(),
            TemplateValue::Float(f) => f.to_string(),
            TemplateValue::Text(s) => s.clone(),
            TemplateValue::Timestamp(ts) => Self::timestamp_text(ts),
            TemplateValue::List(items) => {
                Self::join_with(items, |v| Some(v.to_raw())).unwrap_or_default()
            }
        }
    }

    /// JSONオブジェクトから名前付きパラメータを作成
    ///
    /// オブジェクト以外の場合は `None` を返します。
    pub fn params_from_json(value: &Value) -> Option<TemplateParams> {
        value.as_object().map(|map| {
            map.iter()
                .map(|(k, v)| (k.clone(), TemplateValue::from(v)))
                .collect()
        })
    }
}

impl From<&str> for TemplateValue {
    fn from(value: &str) -> Self {
        TemplateValue::Text(value.to_string())
    }
}

impl From<String> for TemplateValue {
    fn from(value: String) -> Self {
        TemplateValue::Text(value)
    }
}

impl From<&String> for TemplateValue {
    fn from(value: &String) -> Self {
        TemplateValue::Text(value.clone())
    }
}

impl From<bool> for TemplateValue {
    fn from(value: bool) -> Self {
        TemplateValue::Bool(value)
    }
}

impl From<i32> for TemplateValue {
    fn from(value: i32) -> Self {
        TemplateValue::Integer(value.into())
    }
}

impl From<i64> for TemplateValue {
    fn from(value: i64) -> Self {
        TemplateValue::Integer(value)
    }
}

impl From<f64> for TemplateValue {
    fn from(value: f64) -> Self {
        TemplateValue::Float(value)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for TemplateValue {
    fn from(value: DateTime<Tz>) -> Self {
        TemplateValue::Timestamp(value.with_timezone(&Utc))
    }
}

impl From<NaiveDateTime> for TemplateValue {
    fn from(value: NaiveDateTime) -> Self {
        TemplateValue::Timestamp(value.and_utc())
    }
}

impl From<NaiveDate> for TemplateValue {
    fn from(value: NaiveDate) -> Self {
        value
            .and_hms_opt(0, 0, 0)
            .map_or(TemplateValue::Null, |midnight| {
                TemplateValue::Timestamp(midnight.and_utc())
            })
    }
}

impl<T: Into<TemplateValue>> From<Vec<T>> for TemplateValue {
    fn from(value: Vec<T>) -> Self {
        TemplateValue::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<TemplateValue>> From<Option<T>> for TemplateValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(TemplateValue::Null, Into::into)
    }
}

impl From<&Value> for TemplateValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => TemplateValue::Null,
            Value::Bool(b) => TemplateValue::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => TemplateValue::Integer(i),
                None => TemplateValue::Float(n.as_f64().unwrap_or_default()),
            },
            Value::String(s) => TemplateValue::Text(s.clone()),
            Value::Array(items) => TemplateValue::List(items.iter().map(Into::into).collect()),
            Value::Object(_) => TemplateValue::Text(value.to_string()),
        }
    }
}
