//! # Returns Core
//!
//! 연간 수익률 통계 계산에 쓰이는 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 워크스페이스 전반에서 사용되는 기본 타입을 제공합니다:
//! - 월간 수익률 레코드와 기간(Period) 타입
//! - (종목, 연도) 그룹 키
//! - 연간 통계 및 결과 행
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
