//! 월간 수익률 관측 기간.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 관측 기간 (최소 연-월 단위).
///
/// 연도는 항상 4자리(0000~9999)이며, 같은 연도 안에서의 시간 순서 비교에 사용됩니다.
/// 일(day)이 없는 입력(`YYYY-MM`)은 해당 월 1일로 취급합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period(NaiveDate);

impl Period {
    /// 날짜로부터 기간을 생성합니다.
    ///
    /// 연도가 4자리 범위를 벗어나면 `None`을 반환합니다.
    pub fn from_date(date: NaiveDate) -> Option<Self> {
        (0..=9999).contains(&date.year()).then_some(Self(date))
    }

    /// 연, 월, 일로 기간을 생성합니다.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).and_then(Self::from_date)
    }

    /// 달력 연도.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// 월 (1~12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }
}

impl FromStr for Period {
    type Err = String;

    /// `YYYY-MM-DD`, `YYYY/MM/DD`, `YYYYMMDD`, `YYYY-MM`, `YYYY/MM` 형식을 허용합니다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        let year_part = s
            .get(..4)
            .filter(|p| p.bytes().all(|b| b.is_ascii_digit()))
            .ok_or_else(|| format!("4자리 연도로 시작하지 않습니다: {:?}", s))?;
        let year: i32 = year_part
            .parse()
            .map_err(|_| format!("연도를 해석할 수 없습니다: {:?}", s))?;
        let rest = &s[4..];

        let (month, day) = match rest.chars().next() {
            Some(sep @ ('-' | '/')) => {
                let mut parts = rest[1..].split(sep);
                let month = parts.next().and_then(parse_two_digits);
                let day = match parts.next() {
                    Some(d) => parse_two_digits(d),
                    None => Some(1),
                };
                if parts.next().is_some() {
                    return Err(format!("알 수 없는 날짜 형식입니다: {:?}", s));
                }
                (month, day)
            }
            Some(_) if rest.len() == 4 && rest.is_ascii() => {
                (parse_two_digits(&rest[..2]), parse_two_digits(&rest[2..]))
            }
            None => return Err(format!("월 정보가 없습니다: {:?}", s)),
            Some(_) => return Err(format!("알 수 없는 날짜 형식입니다: {:?}", s)),
        };

        match (month, day) {
            (Some(month), Some(day)) => Self::from_ymd(year, month, day)
                .ok_or_else(|| format!("존재하지 않는 날짜입니다: {:?}", s)),
            _ => Err(format!("월/일을 해석할 수 없습니다: {:?}", s)),
        }
    }
}

/// 1~2자리 숫자만 허용합니다.
fn parse_two_digits(s: &str) -> Option<u32> {
    if s.is_empty() || s.len() > 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
