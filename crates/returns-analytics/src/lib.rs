//! 연간 수익률 분석 엔진.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 그룹 분할: 레코드를 (종목, 연도) 그룹으로 나누고 기간순 정렬
//! - 그룹 집계: 최고 월간 수익률과 최대 Draw-up 계산
//! - 요약 파이프라인: 레코드 → 결과 행 (`parallel` feature로 그룹 병렬 처리)
//!
//! 입출력은 수행하지 않습니다.

pub mod aggregator;
pub mod grouper;
pub mod summary;

pub use aggregator::{
    aggregate, highest_return, max_drawup, round_drawup, DrawupScan, DRAWUP_DECIMAL_PLACES,
};
pub use grouper::{group_returns, GroupedReturns};
pub use summary::{sort_rows, summarize, summarize_groups, summarize_ordered, RowOrder};
