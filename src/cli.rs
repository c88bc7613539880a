use clap::{Args, Parser, Subcommand};
use class_planner_common::{Filters, LayoutStrategy, TimeSlot};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "class-planner")]
#[command(about = "授業CSVから時間割を組み立てる履修計画ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 選択状態の保存先JSON（省略時は設定ファイルの値）
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// CSVを解析して概要を表示
    Parse {
        /// 授業CSVファイル
        #[arg(required = true)]
        csv: PathBuf,

        /// 列の解決方法 (auto/header/fixed)
        #[arg(short, long)]
        layout: Option<LayoutStrategy>,

        /// 解析結果をJSONで出力
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 授業を絞り込んで一覧表示
    List {
        /// 授業CSVファイル
        #[arg(required = true)]
        csv: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// 授業IDを指定して時間割に追加
    Add {
        /// 授業CSVファイル
        #[arg(required = true)]
        csv: PathBuf,

        /// 授業ID (Mã LHP)
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// 一覧から対話的に選んで追加
    Pick {
        /// 授業CSVファイル
        #[arg(required = true)]
        csv: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// 時間割から授業を削除
    Remove {
        /// 授業ID (Mã LHP)
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// 時間割を空にする
    Clear,

    /// 選択中の授業を表示
    Selected,

    /// 週ごとの時間割を表示
    Week {
        /// 授業CSVファイル（学期開始日の算出に使用）
        #[arg(required = true)]
        csv: PathBuf,

        /// 週番号（1始まり、範囲外は端に丸める）
        #[arg(short, long, default_value = "1")]
        week: u32,
    },

    /// 設定を表示/編集
    Config {
        /// 表示する週数を設定
        #[arg(long)]
        total_weeks: Option<u32>,

        /// 既定の列解決方法を設定 (auto/header/fixed)
        #[arg(long)]
        layout: Option<LayoutStrategy>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// 絞り込み条件
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// 授業名（複数指定可）
    #[arg(long = "subject")]
    pub subjects: Vec<String>,

    /// 担当教員（複数指定可）
    #[arg(long = "instructor")]
    pub instructors: Vec<String>,

    /// 時間帯 (all/morning/afternoon/evening)
    #[arg(long, default_value = "all")]
    pub slot: TimeSlot,

    /// 曜日コード (2=月曜 … 8=日曜)
    #[arg(long, value_parser = clap::value_parser!(u8).range(2..=8))]
    pub day: Option<u8>,

    /// 授業名・IDの検索語
    #[arg(short, long, default_value = "")]
    pub search: String,
}

impl FilterArgs {
    pub fn filters(&self) -> Filters {
        Filters {
            subjects: self.subjects.clone(),
            instructors: self.instructors.clone(),
            time_slot: self.slot,
            day_of_week: self.day,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_filters() {
        let cli = Cli::parse_from([
            "class-planner",
            "list",
            "classes.csv",
            "--subject",
            "Giải tích",
            "--subject",
            "Vật lý",
            "--slot",
            "morning",
            "--day",
            "3",
            "-s",
            "int",
        ]);

        match cli.command {
            Commands::List { csv, filter } => {
                assert_eq!(csv, PathBuf::from("classes.csv"));
                let filters = filter.filters();
                assert_eq!(filters.subjects, vec!["Giải tích", "Vật lý"]);
                assert_eq!(filters.time_slot, TimeSlot::Morning);
                assert_eq!(filters.day_of_week, Some(3));
                assert_eq!(filter.search, "int");
            }
            _ => panic!("expected list command"),
        }
    }

    #[test]
    fn test_day_out_of_range_rejected() {
        let result = Cli::try_parse_from(["class-planner", "list", "classes.csv", "--day", "1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_store_flag() {
        let cli = Cli::parse_from(["class-planner", "selected", "--store", "/tmp/sel.json"]);
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/sel.json")));
        assert!(matches!(cli.command, Commands::Selected));
    }

    #[test]
    fn test_add_requires_ids() {
        assert!(Cli::try_parse_from(["class-planner", "add", "classes.csv"]).is_err());
    }
}
