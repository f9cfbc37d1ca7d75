//! 그룹 집계 모듈
//!
//! 한 (종목, 연도) 그룹의 시간순 수익률을 두 개의 값으로 축약합니다:
//! - 최고 수익률 (Highest Return): 연중 가장 큰 월간 수익률
//! - 최대 Draw-up: 저점 매수 후 이후 고점 매도로 얻을 수 있는 최대 상승폭
//!
//! Draw-up은 `max - min`과 다릅니다. 저점이 항상 고점보다 먼저 와야 하므로
//! 나중 저점과 이전 고점 사이의 차이는 계산하지 않습니다.
//!
//! # 사용 예시
//!
//! ```rust
//! use returns_analytics::max_drawup;
//! use rust_decimal::Decimal;
//! use std::str::FromStr;
//!
//! let values = ["0.0552", "0.0448", "0.097"].map(|v| Decimal::from_str(v).unwrap());
//! assert_eq!(max_drawup(values).unwrap(), Decimal::from_str("0.0522").unwrap());
//! ```

use returns_core::{AnnualStats, DecimalExt, Return, ReturnRecord, ReturnsError, ReturnsResult};
use rust_decimal::Decimal;

/// Draw-up 결과의 소수점 자릿수 (0.5는 0에서 먼 쪽으로 반올림)
pub const DRAWUP_DECIMAL_PLACES: u32 = 4;

/// 단일 순방향 Draw-up 스캐너.
///
/// 지금까지의 최저값(`trough`)과 최대 상승폭(`best`)만 유지합니다.
/// 첫 값으로 저점을 초기화하므로 양의 무한대 초기값과 같은 결과를 냅니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct DrawupScan {
    trough: Option<Return>,
    best: Return,
}

impl DrawupScan {
    /// 빈 스캐너를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 다음 값을 시간순으로 반영합니다.
    ///
    /// 새 저점이 된 값은 같은 단계에서 자기 자신과의 상승폭을 만들지 않습니다.
    ///
    /// # Errors
    ///
    /// 저점과의 차이가 Decimal 범위를 넘으면 `Overflow`를 반환하고 상태는 바뀌지 않습니다.
    pub fn push(&mut self, value: Return) -> ReturnsResult<()> {
        match self.trough {
            Some(trough) if value >= trough => {
                let gain = value.checked_sub(trough).ok_or_else(|| {
                    ReturnsError::Overflow(format!("{} - {}", value, trough))
                })?;
                self.best = self.best.max(gain);
            }
            _ => self.trough = Some(value),
        }
        Ok(())
    }

    /// 반올림하지 않은 최대 상승폭.
    pub fn best(&self) -> Return {
        self.best
    }
}

/// 반올림하지 않은 최대 Draw-up을 계산합니다.
///
/// 값이 없거나 하나뿐이면 0을 반환합니다.
pub fn max_drawup<I>(values: I) -> ReturnsResult<Return>
where
    I: IntoIterator<Item = Return>,
{
    let mut scan = DrawupScan::new();
    for value in values {
        scan.push(value)?;
    }
    Ok(scan.best())
}

/// 최고 수익률을 계산합니다. 값이 없으면 `None`.
pub fn highest_return<I>(values: I) -> Option<Return>
where
    I: IntoIterator<Item = Return>,
{
    values.into_iter().max()
}

/// 한 그룹을 (최고 수익률, 최대 Draw-up)으로 축약합니다.
///
/// `group`은 기간 오름차순이어야 합니다 ([`crate::group_returns`]가 보장).
///
/// # Errors
///
/// 빈 슬라이스는 `EmptyGroup`을, 상승폭이 Decimal 범위를 넘으면 `Overflow`를 반환합니다.
pub fn aggregate(group: &[ReturnRecord]) -> ReturnsResult<AnnualStats> {
    debug_assert!(
        group.windows(2).all(|w| w[0].period <= w[1].period),
        "group must be sorted by period"
    );

    let highest =
        highest_return(group.iter().map(|r| r.value)).ok_or(ReturnsError::EmptyGroup)?;
    let drawup = max_drawup(group.iter().map(|r| r.value))?;

    Ok(AnnualStats {
        highest_return: highest,
        max_drawup: round_drawup(drawup),
    })
}

/// Draw-up을 출력 정밀도로 반올림합니다.
pub fn round_drawup(value: Decimal) -> Decimal {
    value.round_half_away(DRAWUP_DECIMAL_PLACES).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use returns_core::Period;
    use rust_decimal_macros::dec;

    fn group(values: &[Decimal]) -> Vec<ReturnRecord> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let period = Period::from_ymd(2019, i as u32 + 1, 1).unwrap();
                ReturnRecord::new("AAPL", period, *v)
            })
            .collect()
    }

    #[test]
    fn test_reference_example() {
        let stats = aggregate(&group(&[dec!(0.0552), dec!(0.0448), dec!(0.097)])).unwrap();
        assert_eq!(stats.highest_return, dec!(0.097));
        assert_eq!(stats.max_drawup, dec!(0.0522));
    }

    #[test]
    fn test_single_element() {
        let stats = aggregate(&group(&[dec!(-0.03)])).unwrap();
        assert_eq!(stats.highest_return, dec!(-0.03));
        assert_eq!(stats.max_drawup, Decimal::ZERO);
    }

    #[test]
    fn test_decreasing_series() {
        let stats = aggregate(&group(&[dec!(0.3), dec!(0.2), dec!(0.1), dec!(-0.1)])).unwrap();
        assert_eq!(stats.highest_return, dec!(0.3));
        assert_eq!(stats.max_drawup, Decimal::ZERO);
    }

    #[test]
    fn test_later_trough_does_not_pair_with_earlier_peak() {
        // max - min = 0.5 - (-0.4) = 0.9 이지만 저점이 고점 뒤에 있음
        let values = [dec!(0.1), dec!(0.5), dec!(-0.4), dec!(-0.3)];
        assert_eq!(max_drawup(values).unwrap(), dec!(0.4));
    }

    #[test]
    fn test_best_survives_new_trough() {
        let values = [dec!(0.0), dec!(0.6), dec!(-0.2), dec!(0.1)];
        assert_eq!(max_drawup(values).unwrap(), dec!(0.6));
    }

    #[test]
    fn test_equal_values_give_zero_drawup() {
        let mut scan = DrawupScan::new();
        scan.push(dec!(0.1)).unwrap();
        scan.push(dec!(0.1)).unwrap();
        assert_eq!(scan.best(), Decimal::ZERO);
    }

    #[test]
    fn test_negative_values() {
        let values = [dec!(-0.05), dec!(-0.08), dec!(-0.01)];
        assert_eq!(max_drawup(values).unwrap(), dec!(0.07));
        assert_eq!(highest_return(values), Some(dec!(-0.01)));
    }

    #[test]
    fn test_empty_group() {
        assert!(matches!(aggregate(&[]), Err(ReturnsError::EmptyGroup)));
        assert_eq!(max_drawup(Vec::new()).unwrap(), Decimal::ZERO);
        assert_eq!(highest_return(Vec::new()), None);
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(round_drawup(dec!(0.12345)), dec!(0.1235));
        assert_eq!(round_drawup(dec!(0.12344)), dec!(0.1234));
        assert_eq!(round_drawup(dec!(0.00005)), dec!(0.0001));
        assert_eq!(round_drawup(dec!(0.00004999)), Decimal::ZERO);

        let stats = aggregate(&group(&[dec!(0.1), dec!(0.22345)])).unwrap();
        assert_eq!(stats.max_drawup, dec!(0.1235));
    }

    #[test]
    fn test_highest_return_is_not_rounded() {
        let stats = aggregate(&group(&[dec!(0.123456789)])).unwrap();
        assert_eq!(stats.highest_return, dec!(0.123456789));
    }

    #[test]
    fn test_extreme_values_overflow_instead_of_panicking() {
        let err = aggregate(&group(&[Decimal::MIN, Decimal::MAX])).unwrap_err();
        assert!(matches!(err, ReturnsError::Overflow(_)));
        assert!(!err.is_record_error());

        let mut scan = DrawupScan::new();
        scan.push(Decimal::MIN).unwrap();
        assert!(scan.push(Decimal::MAX).is_err());
        assert_eq!(scan.best(), Decimal::ZERO);
    }

    #[test]
    fn test_extreme_values_within_range() {
        // 하락 후에는 뺄셈이 일어나지 않음
        let stats = aggregate(&group(&[Decimal::MAX, Decimal::MIN])).unwrap();
        assert_eq!(stats.highest_return, Decimal::MAX);
        assert_eq!(stats.max_drawup, Decimal::ZERO);

        // 0 - MIN = MAX 는 표현 가능
        let stats = aggregate(&group(&[Decimal::MIN, Decimal::ZERO])).unwrap();
        assert_eq!(stats.max_drawup, Decimal::MAX);
    }
}
