// Core Domain
// テーブル記述子モデル、設定、エラー型などの純粋なドメイン定義

pub mod config;
pub mod error;
pub mod naming;
pub mod schema;
