//! 연간 수익률 리포트 CLI 도구 모음.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - CSV 월간 수익률 파일 읽기
//! - 연간 최고 수익률 / 최대 Draw-up / 통합 리포트 생성
//! - CSV, JSON, 테이블 출력
//! - 실행 통계

pub mod commands;
pub mod stats;

pub use commands::*;
pub use stats::RunStats;
