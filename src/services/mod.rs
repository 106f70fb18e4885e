// Services Layer
// 入力の読み込み・正規化と、方言ごとのハンドラーへのディスパッチを行うサービス層

pub mod schema_loader;
pub mod schema_normalizer;
pub mod translator;
