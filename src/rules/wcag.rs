//! Static WCAG rule source
//!
//! The default accessibility oracle for backends without a script engine:
//! rule predicates run over the serialized DOM and report failures under the
//! same rule IDs the taxonomy table indexes. Layout- and script-dependent
//! rules (contrast, focus order) are out of reach here and are left to
//! richer oracle implementations plugged in through `RuleSource`.

use crate::browser::Page;
use crate::rules::dom::{css_path, element_text, region_markup, snippet};
use crate::rules::{RawViolation, RuleSource, Scope, ViolationNode};
use crate::rules::types::Impact;
use crate::Result;
use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;

pub struct WcagRuleSource;

#[async_trait]
impl RuleSource for WcagRuleSource {
    fn id(&self) -> &'static str {
        "wcag-static"
    }

    async fn analyze(&self, page: &dyn Page, scope: &Scope) -> Result<Vec<RawViolation>> {
        let html = page.content().await?;

        match scope {
            Scope::Document => Ok(analyze_markup(&html)),
            Scope::Region(selector) => match region_markup(&html, selector) {
                Some(markup) => Ok(analyze_region(&markup)),
                None => Ok(Vec::new()),
            },
        }
    }
}

fn analyze_markup(markup: &str) -> Vec<RawViolation> {
    let document = Html::parse_document(markup);
    let mut findings = Findings::default();

    check_html_lang(&document, &mut findings);
    check_document_title(&document, &mut findings);
    element_checks(&document, &mut findings);

    findings.into_violations()
}

/// Region scans skip the document-level checks: the parser wraps the
/// extracted fragment in a synthetic `<html>` that has no lang or title
fn analyze_region(markup: &str) -> Vec<RawViolation> {
    let document = Html::parse_document(markup);
    let mut findings = Findings::default();
    element_checks(&document, &mut findings);
    findings.into_violations()
}

fn element_checks(document: &Html, findings: &mut Findings) {
    check_image_alt(document, findings);
    check_area_alt(document, findings);
    check_form_labels(document, findings);
    check_button_name(document, findings);
    check_link_name(document, findings);
    check_frame_title(document, findings);
    check_duplicate_ids(document, findings);
    check_empty_headings(document, findings);
}

/// Accumulates nodes per rule ID, in first-seen order
#[derive(Default)]
struct Findings {
    order: Vec<String>,
    by_rule: HashMap<String, RawViolation>,
}

impl Findings {
    fn push(
        &mut self,
        id: &str,
        impact: Impact,
        description: &str,
        help: &str,
        el: ElementRef,
        failure_summary: &str,
    ) {
        let violation = self.by_rule.entry(id.to_string()).or_insert_with(|| {
            self.order.push(id.to_string());
            RawViolation {
                id: id.to_string(),
                impact: Some(impact),
                description: description.to_string(),
                help: help.to_string(),
                help_url: format!("https://dequeuniversity.com/rules/axe/4.8/{id}"),
                nodes: Vec::new(),
            }
        });

        violation.nodes.push(ViolationNode {
            html: snippet(el),
            target: vec![css_path(el)],
            failure_summary: failure_summary.to_string(),
            bounding_box: None,
        });
    }

    fn into_violations(mut self) -> Vec<RawViolation> {
        self.order
            .iter()
            .filter_map(|id| self.by_rule.remove(id))
            .collect()
    }
}

fn select<'a>(document: &'a Html, selector: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(selector) {
        Ok(parsed) => document.select(&parsed).collect(),
        Err(_) => Vec::new(),
    }
}

fn has_accessible_name(el: ElementRef) -> bool {
    let value = el.value();
    value
        .attr("aria-label")
        .is_some_and(|v| !v.trim().is_empty())
        || value.attr("aria-labelledby").is_some()
        || value.attr("title").is_some_and(|v| !v.trim().is_empty())
}

fn check_image_alt(document: &Html, findings: &mut Findings) {
    for img in select(document, "img") {
        let has_alt = img.value().attr("alt").is_some();
        if !has_alt && !has_accessible_name(img) {
            findings.push(
                "image-alt",
                Impact::Critical,
                "이미지 요소에는 대체 텍스트가 있어야 합니다.",
                "img 요소에 alt 속성을 제공하세요.",
                img,
                "Element does not have an alt attribute",
            );
        }
    }
}

fn check_area_alt(document: &Html, findings: &mut Findings) {
    for area in select(document, "area[href]") {
        let has_alt = area
            .value()
            .attr("alt")
            .is_some_and(|v| !v.trim().is_empty());
        if !has_alt && !has_accessible_name(area) {
            findings.push(
                "area-alt",
                Impact::Serious,
                "이미지 맵 영역에는 대체 텍스트가 있어야 합니다.",
                "area 요소에 alt 속성을 제공하세요.",
                area,
                "Element has no alt attribute",
            );
        }
    }
}

fn check_html_lang(document: &Html, findings: &mut Findings) {
    for html_el in select(document, "html") {
        let has_lang = html_el
            .value()
            .attr("lang")
            .is_some_and(|v| !v.trim().is_empty());
        if !has_lang {
            findings.push(
                "html-has-lang",
                Impact::Serious,
                "html 요소에는 lang 속성이 있어야 합니다.",
                "<html lang=\"ko\">와 같이 문서의 기본 언어를 명시하세요.",
                html_el,
                "The <html> element does not have a lang attribute",
            );
        }
    }
}

fn check_document_title(document: &Html, findings: &mut Findings) {
    let titles = select(document, "head > title");
    let empty = titles
        .first()
        .map(|t| element_text(*t).is_empty())
        .unwrap_or(true);

    if empty {
        if let Some(html_el) = select(document, "html").first() {
            findings.push(
                "document-title",
                Impact::Serious,
                "문서에는 페이지 내용을 설명하는 title 요소가 있어야 합니다.",
                "title 요소에 페이지 특성을 담은 제목을 넣으세요.",
                *html_el,
                "Document does not have a non-empty <title> element",
            );
        }
    }
}

fn check_form_labels(document: &Html, findings: &mut Findings) {
    let labelled_ids: Vec<String> = select(document, "label[for]")
        .iter()
        .filter_map(|l| l.value().attr("for").map(str::to_string))
        .collect();

    for input in select(
        document,
        "input:not([type=hidden]):not([type=submit]):not([type=button]):not([type=image]), select, textarea",
    ) {
        let id = input.value().attr("id");
        let has_label = id.is_some_and(|id| labelled_ids.iter().any(|l| l == id));

        if !has_label && !has_accessible_name(input) {
            findings.push(
                "label",
                Impact::Critical,
                "폼 요소에는 레이블이 있어야 합니다.",
                "input 요소에 대응하는 label 태그를 제공하고 id/for 속성으로 연결하세요.",
                input,
                "Form element does not have an associated label",
            );
        }
    }
}

fn check_button_name(document: &Html, findings: &mut Findings) {
    for button in select(document, "button") {
        if element_text(button).is_empty() && !has_accessible_name(button) {
            findings.push(
                "button-name",
                Impact::Critical,
                "버튼에는 인식 가능한 텍스트가 있어야 합니다.",
                "버튼에 텍스트 콘텐츠 또는 aria-label을 제공하세요.",
                button,
                "Element has no discernible text",
            );
        }
    }
}

fn check_link_name(document: &Html, findings: &mut Findings) {
    for link in select(document, "a[href]") {
        if element_text(link).is_empty() && !has_accessible_name(link) {
            // An image with alt text names its link
            let named_by_image = select_within(link, "img").iter().any(|img| {
                img.value().attr("alt").is_some_and(|v| !v.trim().is_empty())
            });

            if !named_by_image {
                findings.push(
                    "link-name",
                    Impact::Serious,
                    "링크에는 인식 가능한 텍스트가 있어야 합니다.",
                    "링크의 목적을 알 수 있는 텍스트 또는 aria-label을 제공하세요.",
                    link,
                    "Element has no discernible text",
                );
            }
        }
    }
}

fn check_frame_title(document: &Html, findings: &mut Findings) {
    for frame in select(document, "iframe, frame") {
        let has_title = frame
            .value()
            .attr("title")
            .is_some_and(|v| !v.trim().is_empty());
        if !has_title {
            findings.push(
                "frame-title",
                Impact::Serious,
                "프레임에는 title 속성이 있어야 합니다.",
                "iframe 요소에 내용을 설명하는 title 속성을 제공하세요.",
                frame,
                "Element has no title attribute",
            );
        }
    }
}

fn check_duplicate_ids(document: &Html, findings: &mut Findings) {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let elements = select(document, "[id]");

    for el in &elements {
        if let Some(id) = el.value().attr("id") {
            *seen.entry(id.to_string()).or_insert(0) += 1;
        }
    }

    for el in elements {
        let Some(id) = el.value().attr("id") else {
            continue;
        };
        if seen.get(id).copied().unwrap_or(0) > 1 {
            findings.push(
                "duplicate-id",
                Impact::Minor,
                "id 속성값은 문서 내에서 고유해야 합니다.",
                "중복된 id 값을 고유한 값으로 변경하세요.",
                el,
                "Document has multiple elements with the same id",
            );
        }
    }
}

fn check_empty_headings(document: &Html, findings: &mut Findings) {
    for heading in select(document, "h1, h2, h3, h4, h5, h6") {
        if element_text(heading).is_empty() && !has_accessible_name(heading) {
            findings.push(
                "empty-heading",
                Impact::Minor,
                "제목 요소는 비어 있지 않아야 합니다.",
                "제목 요소에 텍스트 콘텐츠를 제공하거나 요소를 제거하세요.",
                heading,
                "Heading has no content",
            );
        }
    }
}

fn select_within<'a>(el: ElementRef<'a>, selector: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(selector) {
        Ok(parsed) => el.select(&parsed).collect(),
        Err(_) => Vec::new(),
    }
}
