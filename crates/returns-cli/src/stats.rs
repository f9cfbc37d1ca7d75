//! 실행 통계 구조체.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 리포트 실행 통계
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunStats {
    /// 읽은 데이터 행 수 (헤더 제외)
    pub records_read: usize,
    /// 검증 실패로 건너뛴 행 수
    pub records_skipped: usize,
    /// 생성된 (종목, 연도) 그룹 수
    pub groups: usize,
    /// 출력한 결과 행 수
    pub rows_written: usize,
    /// 소요 시간
    #[serde(skip)]
    pub elapsed: Duration,
}

impl RunStats {
    /// 새 통계 객체 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 건너뛴 비율 (%)
    pub fn skip_rate(&self) -> f64 {
        if self.records_read == 0 {
            0.0
        } else {
            (self.records_skipped as f64 / self.records_read as f64) * 100.0
        }
    }

    /// 통계 요약 로그 출력
    pub fn log_summary(&self, operation: &str) {
        tracing::info!(
            operation = operation,
            records_read = self.records_read,
            records_skipped = self.records_skipped,
            groups = self.groups,
            rows_written = self.rows_written,
            skip_rate = %format!("{:.1}%", self.skip_rate()),
            elapsed = %format!("{:.3}s", self.elapsed.as_secs_f64()),
            "리포트 완료"
        );
    }
}
