//! 연간 리포트 명령어.
//!
//! 월간 수익률 CSV를 읽어 (종목, 연도)별 결과를 출력합니다.
//!
//! # 사용 예시
//!
//! ```bash
//! # 연간 최고 수익률 (ticker,year,highest_return)
//! returns highest -i test_returns.csv -o max_returns.csv
//!
//! # 연간 최대 draw-up (ticker,year,max_drawup)
//! returns drawup -i test_returns.csv -o max_drawups.csv
//!
//! # 두 값을 함께 테이블로 출력
//! returns report -i test_returns.csv --format table
//! ```

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

use returns_analytics::{group_returns, sort_rows, summarize_groups, RowOrder};
use returns_core::{InputConfig, ResultRow};

use crate::commands::ingest::read_returns;
use crate::stats::RunStats;

/// 리포트 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// 연간 최고 수익률
    Highest,
    /// 연간 최대 draw-up
    Drawup,
    /// 두 값 모두
    Combined,
}

impl ReportKind {
    /// 출력 컬럼 이름.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            ReportKind::Highest => &["ticker", "year", "highest_return"],
            ReportKind::Drawup => &["ticker", "year", "max_drawup"],
            ReportKind::Combined => &["ticker", "year", "highest_return", "max_drawup"],
        }
    }

    /// 로그에 쓰는 이름.
    pub fn name(&self) -> &'static str {
        match self {
            ReportKind::Highest => "highest-return",
            ReportKind::Drawup => "max-drawup",
            ReportKind::Combined => "annual-report",
        }
    }

    /// 결과 행을 컬럼 순서에 맞는 문자열 필드로 변환합니다.
    fn fields(&self, row: &ResultRow) -> Vec<String> {
        let mut fields = vec![row.instrument.clone(), row.year.to_string()];
        match self {
            ReportKind::Highest => fields.push(row.highest_return.to_string()),
            ReportKind::Drawup => fields.push(row.max_drawup.to_string()),
            ReportKind::Combined => {
                fields.push(row.highest_return.to_string());
                fields.push(row.max_drawup.to_string());
            }
        }
        fields
    }
}

/// 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(anyhow::anyhow!(
                "Invalid format: {}. Use: table, csv, json",
                s
            )),
        }
    }
}

/// 리포트 실행 설정.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// 리포트 종류
    pub kind: ReportKind,
    /// 입력 CSV 경로
    pub input: PathBuf,
    /// 출력 경로 (None이면 stdout)
    pub output: Option<PathBuf>,
    /// 출력 형식
    pub format: OutputFormat,
    /// 결과 행 정렬
    pub order: RowOrder,
    /// 입력 설정
    pub input_config: InputConfig,
}

/// 리포트를 생성합니다.
pub fn run_report(config: ReportConfig) -> Result<RunStats> {
    let started = Instant::now();
    let mut stats = RunStats::new();

    let ingested = read_returns(&config.input, &config.input_config)?;
    stats.records_read = ingested.rows_read;
    stats.records_skipped = ingested.rows_skipped;

    let grouped = group_returns(ingested.records).context("Failed to group returns")?;
    if grouped.is_empty() {
        info!("No return records in input; writing an empty report");
    }
    stats.groups = grouped.len();

    let mut rows = summarize_groups(&grouped).context("Failed to aggregate groups")?;
    sort_rows(&mut rows, config.order);

    let content = render(&rows, config.kind, config.format)?;
    write_output(&content, config.output.as_ref())?;

    stats.rows_written = rows.len();
    stats.elapsed = started.elapsed();
    Ok(stats)
}

/// 결과 행을 지정된 형식의 문자열로 변환합니다.
pub fn render(rows: &[ResultRow], kind: ReportKind, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(format_table(rows, kind)),
        OutputFormat::Csv => format_csv(rows, kind),
        OutputFormat::Json => format_json(rows, kind),
    }
}

/// 파일 또는 stdout에 출력.
fn write_output(content: &str, output_path: Option<&PathBuf>) -> Result<()> {
    if let Some(path) = output_path {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        file.write_all(content.as_bytes())
            .context("Failed to write to file")?;
        info!("Output written to: {}", path.display());
    } else {
        print!("{}", content);
    }

    Ok(())
}

/// 테이블 형식 출력.
fn format_table(rows: &[ResultRow], kind: ReportKind) -> String {
    let columns = kind.columns();
    let mut output = String::new();

    // 헤더
    for column in columns {
        output.push_str(&format!("{:<16}", column.to_uppercase()));
    }
    output.push('\n');
    output.push_str(&"-".repeat(16 * columns.len()));
    output.push('\n');

    // 데이터
    for row in rows {
        for field in kind.fields(row) {
            output.push_str(&format!("{:<16}", field));
        }
        output.push('\n');
    }

    // 요약
    output.push('\n');
    output.push_str(&format!("Total: {} rows\n", rows.len()));

    output
}

/// CSV 형식 출력.
fn format_csv(rows: &[ResultRow], kind: ReportKind) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());

    wtr.write_record(kind.columns())
        .context("Failed to write CSV header")?;

    for row in rows {
        wtr.write_record(kind.fields(row))
            .context("Failed to write CSV record")?;
    }

    let bytes = wtr.into_inner().context("Failed to flush CSV writer")?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}

/// JSON 형식 출력.
///
/// Decimal 값은 정밀도 보존을 위해 문자열로 기록합니다.
fn format_json(rows: &[ResultRow], kind: ReportKind) -> Result<String> {
    let objects: Vec<Value> = rows
        .iter()
        .map(|row| {
            let mut object = Map::new();
            object.insert("ticker".to_string(), Value::from(row.instrument.clone()));
            object.insert("year".to_string(), Value::from(row.year));
            if kind != ReportKind::Drawup {
                object.insert(
                    "highest_return".to_string(),
                    Value::from(row.highest_return.to_string()),
                );
            }
            if kind != ReportKind::Highest {
                object.insert(
                    "max_drawup".to_string(),
                    Value::from(row.max_drawup.to_string()),
                );
            }
            Value::Object(object)
        })
        .collect();

    serde_json::to_string_pretty(&objects).context("Failed to serialize to JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use returns_core::{AnnualStats, GroupKey};
    use rust_decimal_macros::dec;

    fn rows() -> Vec<ResultRow> {
        vec![
            ResultRow::new(
                GroupKey::new("AAPL", 2019),
                AnnualStats {
                    highest_return: dec!(0.097),
                    max_drawup: dec!(0.0522),
                },
            ),
            ResultRow::new(
                GroupKey::new("MSFT", 2019),
                AnnualStats {
                    highest_return: dec!(-0.01),
                    max_drawup: dec!(0),
                },
            ),
        ]
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("CSV").unwrap(), OutputFormat::Csv);
        assert_eq!(OutputFormat::parse("json").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("table").unwrap(), OutputFormat::Table);
        assert!(OutputFormat::parse("xlsx").is_err());
    }

    #[test]
    fn test_csv_highest() {
        let csv = render(&rows(), ReportKind::Highest, OutputFormat::Csv).unwrap();
        assert_eq!(
            csv,
            "ticker,year,highest_return\nAAPL,2019,0.097\nMSFT,2019,-0.01\n"
        );
    }

    #[test]
    fn test_csv_drawup() {
        let csv = render(&rows(), ReportKind::Drawup, OutputFormat::Csv).unwrap();
        assert_eq!(csv, "ticker,year,max_drawup\nAAPL,2019,0.0522\nMSFT,2019,0\n");
    }

    #[test]
    fn test_json_combined() {
        let json = render(&rows(), ReportKind::Combined, OutputFormat::Json).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["ticker"], "AAPL");
        assert_eq!(value[0]["year"], 2019);
        assert_eq!(value[0]["highest_return"], "0.097");
        assert_eq!(value[0]["max_drawup"], "0.0522");
    }

    #[test]
    fn test_json_drawup_omits_highest() {
        let json = render(&rows(), ReportKind::Drawup, OutputFormat::Json).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert!(value[0].get("highest_return").is_none());
        assert!(value[0].get("max_drawup").is_some());
    }

    #[test]
    fn test_table() {
        let table = render(&rows(), ReportKind::Combined, OutputFormat::Table).unwrap();
        assert!(table.starts_with("TICKER"));
        assert!(table.contains("0.0522"));
        assert!(table.contains("Total: 2 rows"));
    }
}
