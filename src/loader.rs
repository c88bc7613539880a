//! CSV読み込み
//!
//! パースはCPU処理なので `spawn_blocking` で実行し、その間スピナーを表示する。

use crate::error::{PlannerError, Result};
use chrono::NaiveDate;
use class_planner_common::{parse_csv_with, term_start, ParseOptions, ParseReport};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// パース依頼
#[derive(Debug, Clone)]
pub struct ParseRequest {
    pub content: String,
    pub options: ParseOptions,
}

/// パース結果
#[derive(Debug, Clone)]
pub struct ParseResponse {
    pub report: ParseReport,
    /// 最も早い開始日を含む週の月曜日
    pub term_start: Option<NaiveDate>,
}

impl ParseResponse {
    /// 学期開始日。不明なら今日を含む週の月曜日
    pub fn term_start_or_today(&self) -> NaiveDate {
        self.term_start
            .unwrap_or_else(|| class_planner_common::monday_of(chrono::Local::now().date_naive()))
    }
}

/// バックグラウンドでパース
pub async fn run(request: ParseRequest) -> Result<ParseResponse> {
    let handle = tokio::task::spawn_blocking(move || -> Result<ParseResponse> {
        let report = parse_csv_with(&request.content, &request.options)?;
        let term_start = term_start(&report.data.classes);
        Ok(ParseResponse { report, term_start })
    });

    handle
        .await
        .map_err(|e| PlannerError::Task(e.to_string()))?
}

/// ファイルを読み込んでパース
pub async fn load_file(path: &Path, options: ParseOptions, show_progress: bool) -> Result<ParseResponse> {
    let content = read_csv(path).await?;

    let spinner = show_progress.then(|| {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner());
        pb.set_message(format!("{} を解析中...", path.display()));
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    });

    let result = run(ParseRequest { content, options }).await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let response = result?;
    tracing::info!(
        path = %path.display(),
        classes = response.report.data.len(),
        skipped = response.report.skipped_rows,
        "csv loaded"
    );
    Ok(response)
}

async fn read_csv(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(PlannerError::FileNotFound(path.display().to_string()));
    }
    let bytes = tokio::fs::read(path).await?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// 保存用のJSON出力先（ディレクトリ指定ならCSV名を引き継ぐ）
pub fn output_path(csv: &Path, output: &Path) -> PathBuf {
    if output.is_dir() {
        let stem = csv
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "classes".to_string());
        output.join(format!("{}.json", stem))
    } else {
        output.to_path_buf()
    }
}
