//! (종목, 연도) 그룹 분할 모듈
//!
//! 임의 순서의 월간 수익률 레코드를 `(instrument, year)` 키로 묶고,
//! 각 그룹을 기간 오름차순으로 정렬합니다.
//!
//! # 정렬 규칙
//!
//! - 그룹 내부: `period` 오름차순, 안정 정렬 (같은 기간의 중복 레코드는 입력 순서 유지)
//! - 그룹 순서: 입력에서 키가 처음 등장한 순서
//!
//! 중복된 `(instrument, period)` 레코드는 버리지 않고 모두 포함합니다.

use indexmap::IndexMap;
use returns_core::{GroupKey, ReturnRecord, ReturnsResult};
use tracing::debug;

/// 그룹별로 분할된 수익률 레코드.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedReturns {
    groups: IndexMap<GroupKey, Vec<ReturnRecord>>,
}

impl GroupedReturns {
    /// 그룹 수를 반환합니다.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// 그룹이 없는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// 특정 그룹의 정렬된 레코드를 반환합니다.
    pub fn get(&self, key: &GroupKey) -> Option<&[ReturnRecord]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    /// (그룹 키, 정렬된 레코드) 쌍을 첫 등장 순서로 반환합니다.
    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &[ReturnRecord])> {
        self.groups.iter().map(|(k, v)| (k, v.as_slice()))
    }
}

impl IntoIterator for GroupedReturns {
    type Item = (GroupKey, Vec<ReturnRecord>);
    type IntoIter = indexmap::map::IntoIter<GroupKey, Vec<ReturnRecord>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

/// 레코드를 (종목, 연도) 그룹으로 분할합니다.
///
/// 입력 순서와 무관하게 같은 그룹 집합과 같은 정렬 결과를 만듭니다
/// (그룹의 나열 순서만 첫 등장 순서를 따릅니다).
///
/// # Errors
///
/// 검증에 실패한 레코드가 하나라도 있으면 `MalformedRecord`로 전체 호출이 실패합니다.
/// 레코드 번호는 입력 내 1부터 시작하는 위치입니다.
///
/// # 예시
///
/// ```rust
/// use returns_analytics::group_returns;
/// use returns_core::{GroupKey, ReturnRecord};
///
/// let records = vec![
///     ReturnRecord::parse(1, "AAPL", "2019-03-31", "0.097").unwrap(),
///     ReturnRecord::parse(2, "AAPL", "2019-01-31", "0.0552").unwrap(),
/// ];
/// let grouped = group_returns(records).unwrap();
/// let group = grouped.get(&GroupKey::new("AAPL", 2019)).unwrap();
/// assert_eq!(group[0].period.month(), 1);
/// ```
pub fn group_returns<I>(records: I) -> ReturnsResult<GroupedReturns>
where
    I: IntoIterator<Item = ReturnRecord>,
{
    let mut groups: IndexMap<GroupKey, Vec<ReturnRecord>> = IndexMap::new();

    for (index, record) in records.into_iter().enumerate() {
        record.validate(index + 1)?;
        groups.entry(record.group_key()).or_default().push(record);
    }

    for records in groups.values_mut() {
        // sort_by_key는 안정 정렬
        records.sort_by_key(|r| r.period);
    }

    debug!(groups = groups.len(), "Grouped return records");

    Ok(GroupedReturns { groups })
}
