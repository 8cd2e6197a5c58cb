//! Custom ARIA pattern rule source
//!
//! Checks for state attributes that common widget roles must carry but the
//! general oracle does not enforce: tab selection, checkbox/radio state,
//! slider values, toggle-button pressed state. Findings use synthetic
//! `custom-aria-*` rule IDs so they are distinguishable from oracle rules,
//! and default to `serious` impact.

use crate::browser::Page;
use crate::rules::dom::{css_path, region_markup, snippet};
use crate::rules::types::Impact;
use crate::rules::{RawViolation, RuleSource, Scope, ViolationNode};
use crate::Result;
use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};

const CUSTOM_HELP_URL: &str = "https://www.w3.org/WAI/ARIA/apg/patterns/";

pub struct AriaRuleSource;

#[async_trait]
impl RuleSource for AriaRuleSource {
    fn id(&self) -> &'static str {
        "custom-aria"
    }

    async fn analyze(&self, page: &dyn Page, scope: &Scope) -> Result<Vec<RawViolation>> {
        let html = page.content().await?;

        let markup = match scope {
            Scope::Document => html,
            Scope::Region(selector) => match region_markup(&html, selector) {
                Some(markup) => markup,
                None => return Ok(Vec::new()),
            },
        };

        Ok(analyze_markup(&markup))
    }
}

fn analyze_markup(markup: &str) -> Vec<RawViolation> {
    let document = Html::parse_document(markup);
    let mut violations: Vec<RawViolation> = Vec::new();

    check_tabs(&document, &mut violations);
    check_checkboxes(&document, &mut violations);
    check_radios(&document, &mut violations);
    check_sliders(&document, &mut violations);
    check_toggle_buttons(&document, &mut violations);

    violations
}

fn add_node(
    violations: &mut Vec<RawViolation>,
    id: &str,
    description: &str,
    help: &str,
    el: ElementRef,
    failure_summary: &str,
) {
    let node = ViolationNode {
        html: snippet(el),
        target: vec![css_path(el)],
        failure_summary: failure_summary.to_string(),
        bounding_box: None,
    };

    if let Some(existing) = violations.iter_mut().find(|v| v.id == id) {
        existing.nodes.push(node);
        return;
    }

    violations.push(RawViolation {
        id: id.to_string(),
        impact: Some(Impact::Serious),
        description: description.to_string(),
        help: help.to_string(),
        help_url: CUSTOM_HELP_URL.to_string(),
        nodes: vec![node],
    });
}

fn select<'a>(document: &'a Html, selector: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(selector) {
        Ok(parsed) => document.select(&parsed).collect(),
        Err(_) => Vec::new(),
    }
}

fn check_tabs(document: &Html, violations: &mut Vec<RawViolation>) {
    for el in select(document, r#"[role="tab"]"#) {
        if el.value().attr("aria-selected").is_none() {
            add_node(
                violations,
                "custom-aria-tab-missing-selected",
                "Tab 요소는 aria-selected 속성을 가져야 합니다.",
                "role=\"tab\" 요소에 aria-selected=\"true\" 또는 \"false\"를 명시하세요.",
                el,
                "aria-selected attribute is missing",
            );
        }
        if el.value().attr("aria-controls").is_none() {
            add_node(
                violations,
                "custom-aria-tab-missing-controls",
                "Tab 요소는 aria-controls 속성을 가져야 합니다.",
                "role=\"tab\" 요소에 제어하는 패널의 ID를 aria-controls로 명시하세요.",
                el,
                "aria-controls attribute is missing",
            );
        }
    }
}

fn check_checkboxes(document: &Html, violations: &mut Vec<RawViolation>) {
    for el in select(document, r#"[role="checkbox"]"#) {
        if el.value().attr("aria-checked").is_none() {
            add_node(
                violations,
                "custom-aria-checkbox-missing-checked",
                "Checkbox 요소는 aria-checked 속성을 가져야 합니다.",
                "role=\"checkbox\" 요소에 aria-checked=\"true/false/mixed\"를 명시하세요.",
                el,
                "aria-checked attribute is missing",
            );
        }
    }
}

fn check_radios(document: &Html, violations: &mut Vec<RawViolation>) {
    for el in select(document, r#"[role="radio"]"#) {
        if el.value().attr("aria-checked").is_none() {
            add_node(
                violations,
                "custom-aria-radio-missing-checked",
                "Radio 요소는 aria-checked 속성을 가져야 합니다.",
                "role=\"radio\" 요소에 aria-checked=\"true/false\"를 명시하세요.",
                el,
                "aria-checked attribute is missing",
            );
        }
    }
}

fn check_sliders(document: &Html, violations: &mut Vec<RawViolation>) {
    for el in select(document, r#"[role="slider"]"#) {
        let mut missing = Vec::new();
        for attr in ["aria-valuenow", "aria-valuemin", "aria-valuemax"] {
            if el.value().attr(attr).is_none() {
                missing.push(attr);
            }
        }

        if !missing.is_empty() {
            let missing = missing.join(", ");
            add_node(
                violations,
                "custom-aria-slider-missing-values",
                "Slider 요소는 aria-valuenow, aria-valuemin, aria-valuemax 속성을 가져야 합니다.",
                &format!("role=\"slider\" 요소에 다음 속성이 누락되었습니다: {missing}"),
                el,
                &format!("Missing attributes: {missing}"),
            );
        }
    }
}

fn check_toggle_buttons(document: &Html, violations: &mut Vec<RawViolation>) {
    for el in select(document, r#"[role="button"], button"#) {
        let Some(value) = el.value().attr("aria-pressed") else {
            continue;
        };
        if !matches!(value, "true" | "false" | "mixed") {
            add_node(
                violations,
                "custom-aria-button-invalid-pressed",
                "Button의 aria-pressed 속성값은 true, false, 또는 mixed여야 합니다.",
                &format!("현재 값 \"{value}\"은 유효하지 않습니다."),
                el,
                &format!("Invalid aria-pressed value: {value}"),
            );
        }
    }
}
