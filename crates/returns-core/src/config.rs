//! 설정 관리.
//!
//! 기본값 → TOML 파일(선택) → 환경 변수(`RETURNS__` 접두사) 순서로 덮어씁니다.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// 입력 설정
    pub input: InputConfig,
    /// 출력 설정
    pub output: OutputConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
}

/// 입력 CSV 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InputConfig {
    /// 종목 코드 컬럼 이름
    pub instrument_column: String,
    /// 기간(날짜) 컬럼 이름
    pub period_column: String,
    /// 월간 수익률 컬럼 이름
    pub value_column: String,
    /// 잘못된 행을 건너뛸지 여부 (false면 첫 에러에서 중단)
    pub skip_invalid: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            instrument_column: "ticker".to_string(),
            period_column: "date".to_string(),
            value_column: "monthly_return".to_string(),
            skip_invalid: false,
        }
    }
}

/// 출력 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// 출력 디렉토리
    pub directory: PathBuf,
    /// 연간 최고 수익률 파일 이름
    pub highest_file: String,
    /// 연간 최대 draw-up 파일 이름
    pub drawup_file: String,
    /// 통합 리포트 파일 이름
    pub report_file: String,
    /// 출력 형식 (csv, json, table)
    pub format: String,
    /// (종목, 연도) 순으로 정렬할지 여부 (false면 입력 등장 순서)
    pub sort: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            highest_file: "max_returns.csv".to_string(),
            drawup_file: "max_drawups.csv".to_string(),
            report_file: "annual_returns.csv".to_string(),
            format: "csv".to_string(),
            sort: false,
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
    /// 그룹 span 종료 이벤트 출력 여부
    pub span_events: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            span_events: false,
        }
    }
}

impl AppConfig {
    /// 파일(선택)과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 지정되었는데 존재하지 않으면 에러를 반환합니다.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("RETURNS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// 기본 경로(`config/returns.toml`)가 있으면 함께 로드합니다.
    pub fn load_default() -> Result<Self, config::ConfigError> {
        let default_path = Path::new("config/returns.toml");
        if default_path.exists() {
            Self::load(Some(default_path))
        } else {
            Self::load(None)
        }
    }
}

impl OutputConfig {
    /// 출력 디렉토리 기준의 전체 경로를 반환합니다.
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.directory.join(file_name)
    }
}
