//! 점 구분 버전 비교 유틸리티 (외부 크레이트 없이)
//!
//! 릴리즈 태그는 사람이 붙이는 값이라 형식이 느슨합니다.
//! 파싱은 절대 실패하지 않으며, 읽을 수 없는 자리는 `0`으로 취급합니다.

use std::cmp::Ordering;
use std::fmt;

/// major.minor.patch 세 자리 버전
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// "1.2.3", "2.3", "1.x.4" 형식을 파싱
    ///
    /// `.`으로 최대 세 조각까지 나누고, 없거나 숫자가 아닌 조각은 `0`이 됩니다.
    /// 세 번째 조각은 나머지 전체이므로 "1.2.3.4"의 patch는 `0`입니다.
    pub fn parse(s: &str) -> Self {
        let mut parts = [0u64; 3];
        for (slot, piece) in parts.iter_mut().zip(s.splitn(3, '.')) {
            *slot = piece.parse().unwrap_or(0);
        }
        Self {
            major: parts[0],
            minor: parts[1],
            patch: parts[2],
        }
    }

    /// `other`보다 엄격하게 새로운 버전인지 확인 (같으면 false)
    pub fn is_newer_than(&self, other: &Version) -> bool {
        self > other
    }

    pub fn as_tuple(&self) -> (u64, u64, u64) {
        (self.major, self.minor, self.patch)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.major.cmp(&other.major) {
            Ordering::Equal => {}
            ord => return ord,
        }
        match self.minor.cmp(&other.minor) {
            Ordering::Equal => {}
            ord => return ord,
        }
        self.patch.cmp(&other.patch)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// 버전 문자열을 (major, minor, patch) 튜플로 파싱
pub fn parse_version(s: &str) -> (u64, u64, u64) {
    Version::parse(s).as_tuple()
}

/// `remote`가 `local`보다 새로운지 확인
pub fn is_newer(remote: &str, local: &str) -> bool {
    Version::parse(remote).is_newer_than(&Version::parse(local))
}
