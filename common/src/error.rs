//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV is empty: header row not found")]
    EmptyInput,

    #[error("Required column not found: {0}")]
    MissingColumn(String),

    #[error("Invalid week column range: {start}..={end}")]
    InvalidWeekRange { start: usize, end: usize },

    #[error("Class {0} is already selected")]
    AlreadySelected(String),

    #[error("Class {candidate} conflicts with selected class {existing}")]
    Conflict { candidate: String, existing: String },

    #[error("Storage error: {0}")]
    Storage(String),
}

impl Error {
    /// 選択操作で発生したエラーか（ファイル読み込みエラーと区別する）
    pub fn is_selection_error(&self) -> bool {
        matches!(self, Error::AlreadySelected(_) | Error::Conflict { .. })
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
