// Adapters
// 方言ごとのSQL文字列生成とテンプレートファイルへのアクセスを扱う

pub mod sql_generator;
pub mod sql_quote;
pub mod sql_template;
pub mod type_mapping;
