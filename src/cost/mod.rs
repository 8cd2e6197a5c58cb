//! Remediation cost model
//!
//! A pure function over the deduplicated violation list. Common-UI
//! violations sharing a `(ruleId, selector)` key collapse to one counted
//! instance, each remaining violation is priced as
//! `base(automation level) × impact multiplier × repetition tier`, and the
//! result aggregates per responsible role.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::audit::Violation;
use crate::taxonomy::{item_for_rule, AutomationLevel};

/// Hours per man-month in the reporting unit
const MAN_MONTH_HOURS: f64 = 160.0;

/// Team role responsible for a class of fixes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Planning,
    Design,
    Publishing,
    Development,
}

impl Role {
    const ALL: [Role; 4] = [Role::Planning, Role::Design, Role::Publishing, Role::Development];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Planning => "Planning",
            Role::Design => "Design",
            Role::Publishing => "Publishing",
            Role::Development => "Development",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rule-ID to responsible-role table; anything unlisted lands on Publishing
fn role_for_rule(rule_id: &str) -> Role {
    match rule_id {
        "image-alt" | "frame-title" => Role::Planning,
        "color-contrast" | "link-in-text-block" => Role::Design,
        "tabindex" | "focus-order-semantics" => Role::Development,
        _ => Role::Publishing,
    }
}

fn base_hours(rule_id: &str) -> f64 {
    match item_for_rule(rule_id).map(|item| item.automation_level) {
        Some(AutomationLevel::High) => 0.2,
        Some(AutomationLevel::Medium) => 0.5,
        Some(AutomationLevel::Manual) => 1.0,
        None => 0.3,
    }
}

fn impact_multiplier(impact: &str) -> f64 {
    match impact {
        "critical" => 1.5,
        "serious" => 1.2,
        "moderate" => 1.0,
        "minor" => 0.8,
        _ => 1.0,
    }
}

/// Per rule-ID group: the 1st occurrence costs full price, the 2nd-5th
/// half, the 6th+ a tenth (bulk-fix efficiency for systemic issues)
fn repetition_discount(occurrence: u32) -> f64 {
    match occurrence {
        1 => 1.0,
        2..=5 => 0.5,
        _ => 0.1,
    }
}

/// Effort aggregated for one role
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub role: Role,
    pub count: u32,
    pub man_hours: f64,
    pub description: String,
}

/// Derived cost view over a violation list; never mutates its input
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostReport {
    pub items: Vec<CostBreakdown>,
    pub total_violations: usize,
    pub total_man_hours: f64,
    /// 1 M/M = 160 hours
    pub total_man_months: f64,
    pub recommendations: HashMap<Role, Vec<String>>,
}

struct RoleTally {
    count: u32,
    hours: f64,
    descriptions: Vec<String>,
}

/// Estimates remediation effort for a deduplicated violation list
pub fn calculate_cost(violations: &[Violation]) -> CostReport {
    // Common-UI findings recur identically across pages; count each
    // (ruleId, selector) pair once
    let mut common_seen: HashSet<(String, String)> = HashSet::new();
    let counted: Vec<&Violation> = violations
        .iter()
        .filter(|violation| {
            if violation.is_common != Some(true) {
                return true;
            }
            let key = (
                violation.rule_id.clone(),
                violation.selector.clone().unwrap_or_default(),
            );
            common_seen.insert(key)
        })
        .collect();

    let mut tallies: HashMap<Role, RoleTally> = Role::ALL
        .iter()
        .map(|role| {
            (
                *role,
                RoleTally {
                    count: 0,
                    hours: 0.0,
                    descriptions: Vec::new(),
                },
            )
        })
        .collect();

    let mut occurrences: HashMap<&str, u32> = HashMap::new();
    for violation in &counted {
        let occurrence = occurrences.entry(violation.rule_id.as_str()).or_insert(0);
        *occurrence += 1;

        let hours = base_hours(&violation.rule_id)
            * impact_multiplier(&violation.impact)
            * repetition_discount(*occurrence);

        let role = role_for_rule(&violation.rule_id);
        if let Some(tally) = tallies.get_mut(&role) {
            tally.count += 1;
            tally.hours += hours;
            if !violation.description.is_empty()
                && !tally.descriptions.contains(&violation.description)
            {
                tally.descriptions.push(violation.description.clone());
            }
        }
    }

    let total_hours: f64 = tallies.values().map(|tally| tally.hours).sum();

    let items = Role::ALL
        .iter()
        .map(|role| {
            let tally = &tallies[role];
            let mut description = tally
                .descriptions
                .iter()
                .take(3)
                .cloned()
                .collect::<Vec<_>>()
                .join(", ");
            if tally.descriptions.len() > 3 {
                description.push_str("...");
            }
            CostBreakdown {
                role: *role,
                count: tally.count,
                man_hours: round1(tally.hours),
                description,
            }
        })
        .collect();

    CostReport {
        items,
        total_violations: counted.len(),
        total_man_hours: round1(total_hours),
        total_man_months: round2(total_hours / MAN_MONTH_HOURS),
        recommendations: recommendations(),
    }
}

/// Static per-role remediation guidance, attached to every report
fn recommendations() -> HashMap<Role, Vec<String>> {
    let mut map = HashMap::new();
    map.insert(
        Role::Planning,
        vec![
            "버튼/링크의 목적을 명확히 하는 대체 텍스트(aria-label) 기획 정의".to_string(),
            "페이지 타이틀 및 제목(Heading) 계층 구조 재설계".to_string(),
            "기획 단계에서 'WCAG 2.2' 기준을 반영한 스토리보드 작성".to_string(),
        ],
    );
    map.insert(
        Role::Design,
        vec![
            "명도 대비(4.5:1) 미달 색상 일괄 조정 및 가이드 업데이트".to_string(),
            "색상 외 정보를 전달하는 시각적 수단(패턴, 밑줄 등) 추가".to_string(),
            "포커스링(Focus Ring) 디자인 표준 정의 및 적용".to_string(),
        ],
    );
    map.insert(
        Role::Publishing,
        vec![
            "시맨틱 태그(header, nav, main, footer) 구조 강화".to_string(),
            "Form 요소의 레이블(Label) 연결 및 title 속성 보완".to_string(),
            "반복되는 UI 요소(GNB, Footer)에 스킵 네비게이션 적용".to_string(),
        ],
    );
    map.insert(
        Role::Development,
        vec![
            "키보드 포커스 트랩 방지 및 논리적 순서 보장".to_string(),
            "모달/팝업 열림/닫힘 시 포커스 관리 로직(Focus Management) 구현".to_string(),
            "스크린리더 사용자(보조기기)를 위한 상태 정보(aria-expanded 등) 제공".to_string(),
        ],
    );
    map
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
