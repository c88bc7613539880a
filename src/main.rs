use clap::Parser;
use class_planner::{cli, config, error, loader, picker, render, store};
use class_planner_common::{search, ParseOptions, Planner, WeekCursor, WeekGrid};
use cli::{Cli, Commands};
use config::Config;
use error::{PlannerError, Result};
use std::path::Path;
use store::FileStore;
use tracing::Level;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load()?;
    let store_path = config.selection_path(cli.store.clone())?;

    match cli.command {
        Commands::Parse { csv, layout, output } => {
            println!("📚 class-planner - CSV解析\n");

            let options = ParseOptions::with_strategy(layout.unwrap_or(config.layout));
            let response = loader::load_file(&csv, options, true).await?;
            print!("{}", render::report_summary(&response.report, response.term_start));

            if let Some(output) = output {
                let path = loader::output_path(&csv, &output);
                let json = serde_json::to_string_pretty(&response.report.data)?;
                std::fs::write(&path, json)?;
                println!("✔ 結果を保存: {}", path.display());
            }
        }

        Commands::List { csv, filter } => {
            let response = load(&csv, &config).await?;
            let planner = Planner::open(FileStore::new(&store_path));

            let filters = filter.filters();
            let matched = search(&response.report.data.classes, &filters, &filter.search);
            print!("{}", render::class_list(&matched, planner.selection()));
            println!("\n{}件 / 全{}件", matched.len(), response.report.data.len());
        }

        Commands::Add { csv, ids } => {
            let response = load(&csv, &config).await?;
            let mut planner = Planner::open(FileStore::new(&store_path));

            for id in &ids {
                let class = response
                    .report
                    .data
                    .find(id)
                    .ok_or_else(|| PlannerError::ClassNotFound(id.clone()))?;
                planner.add(class.clone())?;
                println!("✔ 追加: {} {}", class.id, class.name);
            }
            print!("\n{}", render::selection_summary(planner.selection()));
        }

        Commands::Pick { csv, filter } => {
            let response = load(&csv, &config).await?;
            let mut planner = Planner::open(FileStore::new(&store_path));

            let matched = search(&response.report.data.classes, &filter.filters(), &filter.search);
            let candidates = picker::candidates(&matched, planner.selection());
            if candidates.is_empty() {
                println!("追加できる授業がありません");
                return Ok(());
            }

            for id in picker::pick(&candidates)? {
                let Some(class) = response.report.data.find(&id) else {
                    continue;
                };
                // 同時に選んだ授業同士が重複する場合は後の方を追加しない
                match planner.add(class.clone()) {
                    Ok(()) => println!("✔ 追加: {} {}", class.id, class.name),
                    Err(e) if e.is_selection_error() => println!("✖ {}", e),
                    Err(e) => return Err(e.into()),
                }
            }
            print!("\n{}", render::selection_summary(planner.selection()));
        }

        Commands::Remove { ids } => {
            let mut planner = Planner::open(FileStore::new(&store_path));
            for id in &ids {
                if planner.remove(id)? {
                    println!("✔ 削除: {}", id);
                } else {
                    println!("選択されていません: {}", id);
                }
            }
            print!("\n{}", render::selection_summary(planner.selection()));
        }

        Commands::Clear => {
            let mut planner = Planner::open(FileStore::new(&store_path));
            planner.clear()?;
            println!("✔ 選択をすべて削除しました");
        }

        Commands::Selected => {
            let planner = Planner::open(FileStore::new(&store_path));
            print!("{}", render::selection_summary(planner.selection()));
        }

        Commands::Week { csv, week } => {
            let response = load(&csv, &config).await?;
            let planner = Planner::open(FileStore::new(&store_path));

            let cursor = WeekCursor::at(week, config.total_weeks);
            let term_start = response.term_start_or_today();
            let grid = WeekGrid::build(planner.selection().classes(), cursor.current(), Some(term_start));
            print!("{}", render::week_grid(&grid, &cursor, term_start));
        }

        Commands::Config { total_weeks, layout, show } => {
            let mut config = config;

            if let Some(weeks) = total_weeks {
                config.set_total_weeks(weeks)?;
                println!("✔ 週数を設定しました: {}", weeks);
            }

            if let Some(layout) = layout {
                config.set_layout(layout)?;
                println!("✔ 列の解決方法を設定しました: {}", layout);
            }

            if show {
                println!("設定:");
                println!("  週数: {}", config.total_weeks);
                println!("  列の解決方法: {}", config.layout);
                println!("  保存先: {}", store_path.display());
            }
        }
    }

    Ok(())
}

async fn load(csv: &Path, config: &Config) -> Result<loader::ParseResponse> {
    let response = loader::load_file(csv, ParseOptions::with_strategy(config.layout), true).await?;
    if response.report.skipped_rows > 0 {
        println!("- {}行を読み飛ばしました", response.report.skipped_rows);
    }
    Ok(response)
}
