use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("{0}")]
    Planner(#[from] class_planner_common::Error),

    #[error("授業が見つかりません: {0}")]
    ClassNotFound(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("バックグラウンド処理エラー: {0}")]
    Task(String),

    #[error("入力エラー: {0}")]
    Prompt(String),
}

pub type Result<T> = std::result::Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_common_error() {
        let err: PlannerError = class_planner_common::Error::Conflict {
            candidate: "C2".into(),
            existing: "C1".into(),
        }
        .into();
        assert!(matches!(err, PlannerError::Planner(_)));
        assert_eq!(err.to_string(), "Class C2 conflicts with selected class C1");
    }
}
