// Stratum DDLライブラリのエントリーポイント
//
// モジュール構造:
// - cli: CLIレイヤー（ユーザー入力の受付とコマンドルーティング）
// - core: コアドメイン（テーブル記述子、設定、エラー型）
// - adapters: 方言ごとのSQL生成、識別子のクォート、SQLテンプレートエンジン
// - services: 入力の読み込み・正規化と操作のディスパッチ

pub mod adapters;
pub mod cli;
pub mod core;
pub mod services;

pub use crate::core::config::Dialect;
pub use crate::core::error::{TemplateError, TranslateError};
pub use crate::services::translator::{translate, OperationType, Translator};
