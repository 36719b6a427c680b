// src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("設定ファイル {path} を読み込めません: {reason}")]
    ConfigurationUnreadable { path: String, reason: String },
    #[error("不正なパラメータ: {0}")]
    InvalidConfiguration(String),
    #[error("数値が発散しました (grid index {grid_index}, electron {electron_index})")]
    NumericInstability {
        grid_index: usize,
        electron_index: usize,
    },
    #[error("出力エラー: {0}")]
    Output(#[from] std::io::Error),
}
