//! 연간 수익률 리포트 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 종목별 연간 최고 월간 수익률
//! returns highest -i test_returns.csv
//!
//! # 종목별 연간 최대 draw-up
//! returns drawup -i test_returns.csv -o out/max_drawups.csv
//!
//! # 두 값을 함께, (종목, 연도) 순으로 정렬해 JSON으로
//! returns report -i test_returns.csv --format json --sort
//! ```

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{error, info};

use returns_analytics::RowOrder;
use returns_cli::report::{run_report, OutputFormat, ReportConfig, ReportKind};
use returns_core::{init_logging, AppConfig, LogConfig, LogFormat};

#[derive(Parser)]
#[command(name = "returns")]
#[command(
    about = "Annual highest-return and max draw-up reports from monthly returns",
    long_about = None
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 설정 파일 (TOML, 기본: config/returns.toml이 있으면 사용)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// 로그 형식 (pretty, json, compact)
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// 종목별 연간 최고 월간 수익률 (ticker,year,highest_return)
    Highest(ReportArgs),

    /// 종목별 연간 최대 draw-up (ticker,year,max_drawup)
    Drawup(ReportArgs),

    /// 최고 수익률과 최대 draw-up 통합 리포트
    Report(ReportArgs),
}

#[derive(Args)]
struct ReportArgs {
    /// 입력 CSV 파일 (ticker,date,monthly_return)
    #[arg(short, long)]
    input: PathBuf,

    /// 출력 파일 경로 ("-"이면 stdout, 기본: 설정의 출력 디렉토리/파일 이름)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// 출력 형식 (csv, json, table)
    #[arg(short, long)]
    format: Option<String>,

    /// 잘못된 행을 건너뛰고 계속 진행
    #[arg(long)]
    skip_invalid: bool,

    /// (종목, 연도) 순으로 정렬 (기본: 입력 등장 순서)
    #[arg(long)]
    sort: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => AppConfig::load(Some(path))
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => AppConfig::load_default().context("Failed to load config")?,
    };

    // 로깅 초기화 (CLI 인자 > 설정 파일)
    let mut log_config = LogConfig::from(&config.logging);
    if let Some(level) = cli.log_level {
        log_config.level = level;
    }
    if let Some(format) = cli.log_format {
        log_config = log_config.with_format(format.parse::<LogFormat>().map_err(|e| anyhow!(e))?);
    }
    init_logging(log_config).map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    let (kind, args) = match cli.command {
        Commands::Highest(args) => (ReportKind::Highest, args),
        Commands::Drawup(args) => (ReportKind::Drawup, args),
        Commands::Report(args) => (ReportKind::Combined, args),
    };

    let report_config = build_report_config(kind, args, &config)?;
    info!(
        report = kind.name(),
        input = %report_config.input.display(),
        "Starting report"
    );

    match run_report(report_config) {
        Ok(stats) => {
            stats.log_summary(kind.name());
            Ok(())
        }
        Err(e) => {
            error!("Report failed: {:#}", e);
            Err(e)
        }
    }
}

/// CLI 인자와 설정을 합쳐 리포트 설정을 만듭니다.
fn build_report_config(
    kind: ReportKind,
    args: ReportArgs,
    config: &AppConfig,
) -> Result<ReportConfig> {
    let format = OutputFormat::parse(args.format.as_deref().unwrap_or(&config.output.format))?;

    let output = match args.output {
        Some(path) if path.as_os_str() == "-" => None,
        Some(path) => Some(path),
        // 테이블은 화면 출력용
        None if format == OutputFormat::Table => None,
        None => {
            let file_name = match kind {
                ReportKind::Highest => &config.output.highest_file,
                ReportKind::Drawup => &config.output.drawup_file,
                ReportKind::Combined => &config.output.report_file,
            };
            let path = config.output.path_for(file_name);
            if format == OutputFormat::Json {
                Some(path.with_extension("json"))
            } else {
                Some(path)
            }
        }
    };

    let order = if args.sort || config.output.sort {
        RowOrder::ByKey
    } else {
        RowOrder::FirstSeen
    };

    let mut input_config = config.input.clone();
    input_config.skip_invalid |= args.skip_invalid;

    Ok(ReportConfig {
        kind,
        input: args.input,
        output,
        format,
        order,
        input_config,
    })
}
