//! 월간 수익률 레코드와 (종목, 연도) 그룹 키.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ReturnsError, ReturnsResult};
use crate::types::{parse_return, Period, Return};

/// 월간 수익률 레코드.
///
/// 한 번 읽힌 뒤 변경되지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnRecord {
    /// 종목 식별자 (대소문자 구분, 정확히 일치해야 같은 종목)
    #[serde(rename = "ticker")]
    pub instrument: String,
    /// 관측 기간
    #[serde(rename = "date")]
    pub period: Period,
    /// 월간 수익률 (음수 가능)
    #[serde(rename = "monthly_return")]
    pub value: Return,
}

impl ReturnRecord {
    /// 새 레코드를 생성합니다.
    pub fn new(instrument: impl Into<String>, period: Period, value: Return) -> Self {
        Self {
            instrument: instrument.into(),
            period,
            value,
        }
    }

    /// 문자열 필드로부터 레코드를 파싱하고 검증합니다.
    ///
    /// # Arguments
    ///
    /// * `record` - 에러 보고용 레코드 번호 (1부터 시작)
    /// * `instrument` - 종목 코드
    /// * `period` - 기간 문자열 (4자리 연도로 시작)
    /// * `value` - 수익률 문자열
    pub fn parse(
        record: usize,
        instrument: &str,
        period: &str,
        value: &str,
    ) -> ReturnsResult<Self> {
        let period: Period = period
            .parse()
            .map_err(|reason| ReturnsError::malformed(record, reason))?;
        let value = parse_return(value).map_err(|reason| ReturnsError::malformed(record, reason))?;

        let parsed = Self::new(instrument, period, value);
        parsed.validate(record)?;
        Ok(parsed)
    }

    /// 그룹 키 `(instrument, year)`를 반환합니다.
    pub fn group_key(&self) -> GroupKey {
        GroupKey::new(self.instrument.clone(), self.period.year())
    }

    /// 타입으로 보장되지 않는 제약을 검증합니다.
    ///
    /// 기간과 수익률은 생성 시점에 이미 검증되므로 종목 코드만 확인합니다.
    pub fn validate(&self, record: usize) -> ReturnsResult<()> {
        if self.instrument.is_empty() {
            return Err(ReturnsError::malformed(record, "종목 코드가 비어 있습니다"));
        }
        Ok(())
    }
}

/// (종목, 연도) 복합 그룹 키.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    /// 종목 식별자
    pub instrument: String,
    /// 달력 연도
    pub year: i32,
}

impl GroupKey {
    /// 새 그룹 키를 생성합니다.
    pub fn new(instrument: impl Into<String>, year: i32) -> Self {
        Self {
            instrument: instrument.into(),
            year,
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.instrument, self.year)
    }
}
