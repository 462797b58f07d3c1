//! 리포트 본문에서 발견 건수를 추출하는 휴리스틱
//!
//! 리포트는 사람이 읽는 Markdown이라 스키마가 없습니다.
//! 아래 규칙을 순서대로 적용하고 처음 맞는 규칙의 값을 씁니다.
//! 뒤로 갈수록 근사치이므로 투표가 아니라 엄격한 우선순위입니다.
//!
//! 1. `<!-- findings: N -->` 머신 마커
//! 2. "no static issues found" (대소문자 무시) → 0
//! 3. "C critical and H high" → C + H
//! 4. "N issues" / "N findings" → N
//! 5. 그 외 → [`NO_SCORE`]

use regex::Regex;
use std::sync::OnceLock;

/// 결과 없음 센티널
pub const NO_SCORE: i64 = -1;

struct Patterns {
    findings_marker: Regex,
    no_issues: Regex,
    critical_high: Regex,
    issue_count: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        findings_marker: Regex::new(r"<!-- findings: ([0-9]+) -->").expect("static regex"),
        no_issues: Regex::new(r"(?i)no static issues found").expect("static regex"),
        critical_high: Regex::new(r"([0-9]+)\s+critical\s+and\s+([0-9]+)\s+high").expect("static regex"),
        issue_count: Regex::new(r"([0-9]+)\s+(?:issues?|findings?)").expect("static regex"),
    })
}

/// 리포트 텍스트에서 발견 건수 추출. 실패하지 않으며 모르면 `-1`
///
/// 숫자는 ASCII `0-9`만 인정합니다. `i64`를 넘는 값은 규칙 1/4에서
/// 파싱 실패로 취급해 다음 규칙으로 넘어갑니다.
pub fn extract_score(text: &str) -> i64 {
    let p = patterns();

    if let Some(n) = p
        .findings_marker
        .captures(text)
        .and_then(|caps| caps[1].parse::<i64>().ok())
    {
        return n;
    }

    if p.no_issues.is_match(text) {
        return 0;
    }

    if let Some(caps) = p.critical_high.captures(text) {
        // 캡처는 ASCII 숫자뿐이라 파싱 실패는 오버플로뿐: 상한으로 고정
        let critical: i64 = caps[1].parse().unwrap_or(i64::MAX);
        let high: i64 = caps[2].parse().unwrap_or(i64::MAX);
        return critical.saturating_add(high);
    }

    if let Some(n) = p
        .issue_count
        .captures(text)
        .and_then(|caps| caps[1].parse::<i64>().ok())
    {
        return n;
    }

    NO_SCORE
}
