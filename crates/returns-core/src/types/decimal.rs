//! 정밀한 수익률 계산을 위한 Decimal 유틸리티.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// 월간 수익률 타입 (0.01 = 1%).
pub type Return = Decimal;

/// Decimal 연산을 위한 확장 트레이트.
pub trait DecimalExt {
    /// 지정된 소수점 자릿수로 반올림합니다 (0.5는 0에서 먼 쪽으로).
    fn round_half_away(&self, dp: u32) -> Decimal;
}

impl DecimalExt for Decimal {
    fn round_half_away(&self, dp: u32) -> Decimal {
        self.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
    }
}

/// 문자열을 수익률로 파싱합니다.
///
/// 일반 표기(`0.0552`)와 지수 표기(`5.52e-2`)를 모두 허용합니다.
/// `NaN`, `inf` 같은 유한하지 않은 값과 Decimal 범위를 넘는 값은 거부됩니다.
pub fn parse_return(s: &str) -> Result<Return, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("수익률 값이 비어 있습니다".to_string());
    }

    Decimal::from_str(s)
        .map(|d| d.normalize())
        .map_err(|e| format!("유한한 숫자가 아닙니다: {} ({})", s, e))
}
