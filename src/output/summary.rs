//! Terminal summary of a completed run

use crate::audit::AuditResult;
use crate::cost::CostReport;

/// Prints a condensed audit summary to stdout
///
/// # Arguments
///
/// * `result` - The completed audit result
/// * `cost` - The derived cost report
pub fn print_summary(result: &AuditResult, cost: &CostReport) {
    println!("=== 접근성 진단 결과 ===\n");

    println!("Overview:");
    println!("  검사 페이지 수: {}", result.total_pages);
    println!("  위반 항목 수 (중복 제거): {}", result.total_violations);
    println!();

    if !result.summary.by_principle.is_empty() {
        println!("원칙별 위반:");
        let mut counts: Vec<_> = result.summary.by_principle.iter().collect();
        counts.sort_by(|a, b| b.1.cmp(a.1));
        for (principle, count) in counts {
            let percentage = if result.total_violations > 0 {
                (*count as f64 / result.total_violations as f64) * 100.0
            } else {
                0.0
            };
            println!("  {}: {} ({:.1}%)", principle, count, percentage);
        }
        println!();
    }

    if !result.summary.by_impact.is_empty() {
        println!("심각도별 위반:");
        for impact in ["critical", "serious", "moderate", "minor"] {
            if let Some(count) = result.summary.by_impact.get(impact) {
                println!("  {}: {}", impact, count);
            }
        }
        println!();
    }

    println!("수선 비용 추정:");
    for item in &cost.items {
        if item.count > 0 {
            println!("  {}: {}건, {:.1}h", item.role, item.count, item.man_hours);
        }
    }
    println!(
        "  합계: {:.1}h ({:.2} M/M)",
        cost.total_man_hours, cost.total_man_months
    );
    println!();

    if let Some(seo) = &result.seo_result {
        println!("SEO/AI 점수:");
        println!("  SEO: {}/100", seo.overall_score.seo);
        println!("  GEO(AI): {}/100", seo.overall_score.geo_ai);
        println!("  종합: {}/100", seo.overall_score.total);
    }
}
