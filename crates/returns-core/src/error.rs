//! 수익률 통계 시스템의 에러 타입.
//!
//! 이 모듈은 레코드 검증, 집계, 설정 및 입출력 과정에서 발생하는 에러를 정의합니다.

use thiserror::Error;

/// 핵심 에러.
#[derive(Debug, Error)]
pub enum ReturnsError {
    /// 잘못된 레코드 (빈 종목 코드, 연도 없는 기간, 유한하지 않은 수익률 등)
    ///
    /// `record`는 입력 내 1부터 시작하는 레코드 번호입니다.
    #[error("잘못된 레코드 (#{record}): {reason}")]
    MalformedRecord { record: usize, reason: String },

    /// 수익률 차이가 Decimal 범위를 벗어남
    #[error("수익률 계산 오버플로: {0}")]
    Overflow(String),

    /// 빈 그룹 집계 시도
    #[error("빈 그룹은 집계할 수 없습니다")]
    EmptyGroup,

    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 입출력 에러
    #[error("입출력 에러: {0}")]
    Io(#[from] std::io::Error),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),
}

/// 수익률 통계 작업을 위한 Result 타입.
pub type ReturnsResult<T> = Result<T, ReturnsError>;

impl ReturnsError {
    /// 잘못된 레코드 에러를 생성합니다.
    pub fn malformed(record: usize, reason: impl Into<String>) -> Self {
        ReturnsError::MalformedRecord {
            record,
            reason: reason.into(),
        }
    }

    /// 개별 레코드 단위의 에러인지 확인합니다.
    ///
    /// 호출자는 이 값으로 해당 레코드만 건너뛸지 전체 작업을 중단할지 결정합니다.
    pub fn is_record_error(&self) -> bool {
        matches!(self, ReturnsError::MalformedRecord { .. })
    }
}

impl From<serde_json::Error> for ReturnsError {
    fn from(err: serde_json::Error) -> Self {
        ReturnsError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for ReturnsError {
    fn from(err: config::ConfigError) -> Self {
        ReturnsError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_error() {
        let err = ReturnsError::malformed(3, "empty instrument");
        assert!(err.is_record_error());
        assert_eq!(err.to_string(), "잘못된 레코드 (#3): empty instrument");

        assert!(!ReturnsError::EmptyGroup.is_record_error());
        assert!(!ReturnsError::Overflow("max - min".to_string()).is_record_error());
        assert!(!ReturnsError::Config("missing".to_string()).is_record_error());
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let err: ReturnsError = json_err.into();
        assert!(matches!(err, ReturnsError::Serialization(_)));
    }
}
