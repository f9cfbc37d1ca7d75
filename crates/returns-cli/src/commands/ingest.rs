//! CSV 월간 수익률 입력.
//!
//! 헤더가 있는 CSV 파일을 읽어 [`ReturnRecord`] 목록으로 변환합니다.
//!
//! ```text
//! ticker,date,monthly_return
//! AAPL,2019-01-31,0.0552
//! AAPL,2019-02-28,0.0448
//! ```
//!
//! 에러에 표시되는 레코드 번호는 파일의 줄 번호(헤더가 1번 줄)입니다.
//! 헤더조차 없는 빈 파일은 레코드가 없는 입력으로 취급합니다.

use anyhow::{anyhow, Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

use returns_core::{InputConfig, ReturnRecord, ReturnsError};

/// 읽기 결과.
#[derive(Debug, Clone, Default)]
pub struct Ingested {
    /// 검증을 통과한 레코드
    pub records: Vec<ReturnRecord>,
    /// 읽은 데이터 행 수
    pub rows_read: usize,
    /// 건너뛴 행 수
    pub rows_skipped: usize,
}

/// 헤더에서 찾은 컬럼 위치.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    instrument: usize,
    period: usize,
    value: usize,
}

impl ColumnIndex {
    fn resolve(headers: &csv::StringRecord, config: &InputConfig) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| anyhow!("Missing column '{}' in header: {:?}", name, headers))
        };

        Ok(Self {
            instrument: find(&config.instrument_column)?,
            period: find(&config.period_column)?,
            value: find(&config.value_column)?,
        })
    }
}

/// CSV 파일에서 수익률 레코드를 읽습니다.
pub fn read_returns(path: impl AsRef<Path>, config: &InputConfig) -> Result<Ingested> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;

    info!("Reading returns from {}", path.display());
    read_returns_from(file, config)
}

/// 임의의 reader에서 수익률 레코드를 읽습니다.
///
/// `config.skip_invalid`가 false면 첫 번째 잘못된 행에서 중단합니다.
pub fn read_returns_from<R: Read>(reader: R, config: &InputConfig) -> Result<Ingested> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().context("Failed to read CSV header")?.clone();
    if headers.is_empty() {
        debug!("Input has no header; treating as empty");
        return Ok(Ingested::default());
    }
    let columns = ColumnIndex::resolve(&headers, config)?;

    let mut ingested = Ingested::default();

    for result in rdr.records() {
        ingested.rows_read += 1;

        let parsed = match result {
            Ok(row) => {
                let line = row.position().map_or(ingested.rows_read + 1, |p| p.line() as usize);
                ReturnRecord::parse(
                    line,
                    row.get(columns.instrument).unwrap_or(""),
                    row.get(columns.period).unwrap_or(""),
                    row.get(columns.value).unwrap_or(""),
                )
            }
            Err(err) => {
                let line = err
                    .position()
                    .map_or(ingested.rows_read + 1, |p| p.line() as usize);
                Err(ReturnsError::malformed(line, err.to_string()))
            }
        };

        match parsed {
            Ok(record) => ingested.records.push(record),
            Err(err) if config.skip_invalid && err.is_record_error() => {
                warn!(error = %err, "Skipping invalid row");
                ingested.rows_skipped += 1;
            }
            Err(err) => return Err(err).context("Invalid input row"),
        }
    }

    debug!(
        rows = ingested.rows_read,
        skipped = ingested.rows_skipped,
        "Finished reading returns"
    );

    Ok(ingested)
}
