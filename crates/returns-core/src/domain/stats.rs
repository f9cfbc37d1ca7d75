//! 연간 통계와 결과 행.

use serde::{Deserialize, Serialize};

use super::record::GroupKey;
use crate::types::Return;

/// 한 (종목, 연도) 그룹의 집계 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualStats {
    /// 연중 최고 월간 수익률 (반올림하지 않음)
    pub highest_return: Return,
    /// 최대 draw-up (소수점 4자리 반올림, 항상 0 이상)
    pub max_drawup: Return,
}

/// 출력 결과 행. 그룹 키마다 하나씩 생성됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    /// 종목 식별자
    #[serde(rename = "ticker")]
    pub instrument: String,
    /// 달력 연도
    pub year: i32,
    /// 연중 최고 월간 수익률
    pub highest_return: Return,
    /// 최대 draw-up
    pub max_drawup: Return,
}

impl ResultRow {
    /// 그룹 키와 집계 결과로 결과 행을 생성합니다.
    pub fn new(key: GroupKey, stats: AnnualStats) -> Self {
        Self {
            instrument: key.instrument,
            year: key.year,
            highest_return: stats.highest_return,
            max_drawup: stats.max_drawup,
        }
    }

    /// 이 행의 그룹 키.
    pub fn key(&self) -> GroupKey {
        GroupKey::new(self.instrument.clone(), self.year)
    }
}
