//! 도메인 모델.
//!
//! - [`record`]: 월간 수익률 레코드, 그룹 키
//! - [`stats`]: 연간 통계, 결과 행

pub mod record;
pub mod stats;

pub use record::*;
pub use stats::*;
