//! 레코드 → 결과 행 파이프라인
//!
//! 그룹 분할과 그룹별 집계를 연결합니다. 그룹은 서로 독립적이므로
//! `parallel` feature가 켜져 있으면 rayon으로 병렬 집계합니다.
//! 어느 경우든 결과 행 순서는 그룹 키의 첫 등장 순서를 따릅니다.

use returns_core::{group_span, GroupKey, ResultRow, ReturnRecord, ReturnsResult};
use tracing::{debug, trace};

use crate::aggregator::aggregate;
use crate::grouper::{group_returns, GroupedReturns};

/// 결과 행 정렬 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowOrder {
    /// 입력에서 그룹 키가 처음 등장한 순서
    #[default]
    FirstSeen,
    /// (종목, 연도) 오름차순
    ByKey,
}

/// 레코드를 그룹으로 나누고 그룹마다 결과 행 하나를 만듭니다.
///
/// 입력이 비어 있으면 빈 벡터를 반환합니다.
pub fn summarize<I>(records: I) -> ReturnsResult<Vec<ResultRow>>
where
    I: IntoIterator<Item = ReturnRecord>,
{
    let grouped = group_returns(records)?;
    summarize_groups(&grouped)
}

/// 정렬 방식을 지정해 결과 행을 만듭니다.
pub fn summarize_ordered<I>(records: I, order: RowOrder) -> ReturnsResult<Vec<ResultRow>>
where
    I: IntoIterator<Item = ReturnRecord>,
{
    let mut rows = summarize(records)?;
    sort_rows(&mut rows, order);
    Ok(rows)
}

/// 이미 분할된 그룹을 집계합니다.
#[cfg(not(feature = "parallel"))]
pub fn summarize_groups(grouped: &GroupedReturns) -> ReturnsResult<Vec<ResultRow>> {
    let rows = grouped
        .iter()
        .map(|(key, group)| summarize_group(key, group))
        .collect::<ReturnsResult<Vec<_>>>()?;

    debug!(rows = rows.len(), "Summarized groups");
    Ok(rows)
}

/// 이미 분할된 그룹을 병렬로 집계합니다.
#[cfg(feature = "parallel")]
pub fn summarize_groups(grouped: &GroupedReturns) -> ReturnsResult<Vec<ResultRow>> {
    use rayon::iter::{IntoParallelIterator, ParallelIterator};

    let partitions: Vec<(&GroupKey, &[ReturnRecord])> = grouped.iter().collect();

    // IndexedParallelIterator의 collect는 원래 순서를 유지
    let rows = partitions
        .into_par_iter()
        .map(|(key, group)| summarize_group(key, group))
        .collect::<ReturnsResult<Vec<_>>>()?;

    debug!(
        rows = rows.len(),
        threads = rayon::current_num_threads(),
        "Summarized groups in parallel"
    );
    Ok(rows)
}

fn summarize_group(key: &GroupKey, group: &[ReturnRecord]) -> ReturnsResult<ResultRow> {
    let span = group_span!("summarize_group", key, group.len());
    let _enter = span.enter();

    let stats = aggregate(group)?;
    trace!(
        highest_return = %stats.highest_return,
        max_drawup = %stats.max_drawup,
        "Aggregated group"
    );

    Ok(ResultRow::new(key.clone(), stats))
}

/// 결과 행을 지정된 방식으로 정렬합니다.
pub fn sort_rows(rows: &mut [ResultRow], order: RowOrder) {
    match order {
        RowOrder::FirstSeen => {}
        RowOrder::ByKey => rows.sort_by_cached_key(ResultRow::key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use returns_core::ReturnsError;
    use rust_decimal_macros::dec;

    fn record(instrument: &str, period: &str, value: &str) -> ReturnRecord {
        ReturnRecord::parse(1, instrument, period, value).unwrap()
    }

    #[test]
    fn test_empty_input_gives_no_rows() {
        assert!(summarize(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn test_multi_year_rows_are_independent() {
        let rows = summarize(vec![
            record("AAPL", "2019-01-31", "0.0552"),
            record("AAPL", "2019-02-28", "0.0448"),
            record("AAPL", "2019-03-31", "0.097"),
            record("AAPL", "2020-01-31", "0.02"),
            record("AAPL", "2020-02-29", "-0.1"),
            record("AAPL", "2020-03-31", "0.05"),
        ])
        .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].key(), GroupKey::new("AAPL", 2019));
        assert_eq!(rows[0].highest_return, dec!(0.097));
        assert_eq!(rows[0].max_drawup, dec!(0.0522));

        // 2019년 저점(0.0448)은 2020년 계산에 영향을 주지 않음
        assert_eq!(rows[1].key(), GroupKey::new("AAPL", 2020));
        assert_eq!(rows[1].highest_return, dec!(0.05));
        assert_eq!(rows[1].max_drawup, dec!(0.15));
    }

    #[test]
    fn test_row_order() {
        let records = vec![
            record("MSFT", "2020-01-31", "0.01"),
            record("AAPL", "2020-01-31", "0.02"),
            record("AAPL", "2019-01-31", "0.03"),
        ];

        let first_seen = summarize_ordered(records.clone(), RowOrder::FirstSeen).unwrap();
        let keys: Vec<_> = first_seen.iter().map(ResultRow::key).collect();
        assert_eq!(
            keys,
            vec![
                GroupKey::new("MSFT", 2020),
                GroupKey::new("AAPL", 2020),
                GroupKey::new("AAPL", 2019),
            ]
        );

        let by_key = summarize_ordered(records, RowOrder::ByKey).unwrap();
        let keys: Vec<_> = by_key.iter().map(ResultRow::key).collect();
        assert_eq!(
            keys,
            vec![
                GroupKey::new("AAPL", 2019),
                GroupKey::new("AAPL", 2020),
                GroupKey::new("MSFT", 2020),
            ]
        );
    }

    #[test]
    fn test_duplicate_periods_follow_input_order() {
        // 2월 값 두 개는 입력 순서대로 남음: 0.0, -0.2, 0.3 → 0.5
        let rows = summarize(vec![
            record("AAPL", "2019-02-28", "-0.2"),
            record("AAPL", "2019-01-31", "0.0"),
            record("AAPL", "2019-02-28", "0.3"),
        ])
        .unwrap();
        assert_eq!(rows[0].max_drawup, dec!(0.5));
        assert_eq!(rows[0].highest_return, dec!(0.3));

        // 반대 순서: 0.0, 0.3, -0.2 → 0.3
        let rows = summarize(vec![
            record("AAPL", "2019-02-28", "0.3"),
            record("AAPL", "2019-01-31", "0.0"),
            record("AAPL", "2019-02-28", "-0.2"),
        ])
        .unwrap();
        assert_eq!(rows[0].max_drawup, dec!(0.3));
        assert_eq!(rows[0].highest_return, dec!(0.3));
    }

    #[test]
    fn test_unbounded_values_report_overflow() {
        let result = summarize(vec![
            record("X", "2019-01-31", "-79228162514264337593543950335"),
            record("X", "2019-02-28", "79228162514264337593543950335"),
        ]);
        assert!(matches!(result, Err(ReturnsError::Overflow(_))));

        // 다른 그룹의 큰 값은 서로 빼지 않음
        let rows = summarize(vec![
            record("X", "2019-01-31", "-79228162514264337593543950335"),
            record("X", "2020-01-31", "79228162514264337593543950335"),
        ])
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row.max_drawup.is_zero()));
    }
}
