//! SEO and AI-friendliness analysis
//!
//! Three sub-checks over the target origin: sitemap.xml (presence,
//! well-formedness, URL reachability, robots.txt linkage), llms.txt
//! (presence and structure) and front-page metadata. Each scores 0-100;
//! the overall score averages sitemap+metadata into an SEO score and takes
//! llms.txt as the GEO/AI score.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use regex::Regex;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::Result;

const FETCH_TIMEOUT: Duration = Duration::from_secs(15);
const SAMPLE_LIMIT: usize = 10;

/// Sitemap.xml analysis: presence 30, well-formed 30, sampled URL
/// reachability up to 30, robots.txt reference 10
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapAnalysis {
    pub exists: bool,
    pub robots_txt_reference: bool,
    pub xml_valid: bool,
    pub total_urls: usize,
    pub sampled_ok: usize,
    pub sampled_total: usize,
    pub errors: Vec<String>,
    pub score: u32,
}

/// llms.txt analysis: structure 30, volume 25, summary 20, keywords 15,
/// readability 10
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmsTxtAnalysis {
    pub exists: bool,
    pub has_h1: bool,
    pub has_h2: bool,
    pub has_h3: bool,
    pub paragraph_count: usize,
    pub word_count: usize,
    pub has_summary: bool,
    pub score: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagCheck {
    pub exists: bool,
    pub length: usize,
    pub optimal: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenGraphCheck {
    pub has_title: bool,
    pub has_description: bool,
    pub has_image: bool,
    pub has_url: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportCheck {
    pub exists: bool,
    pub mobile_friendly: bool,
}

/// Front-page metadata analysis: title 25, description 25, canonical 20,
/// Open Graph 20, viewport 10
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataAnalysis {
    pub title: TagCheck,
    pub description: TagCheck,
    pub canonical_exists: bool,
    pub open_graph: OpenGraphCheck,
    pub viewport: ViewportCheck,
    pub score: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallScore {
    pub seo: u32,
    #[serde(rename = "geoAI")]
    pub geo_ai: u32,
    pub total: u32,
}

/// Aggregate SEO/AI result folded into the audit report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoResult {
    pub url: String,
    pub timestamp: String,
    pub sitemap: SitemapAnalysis,
    pub llms_txt: LlmsTxtAnalysis,
    pub metadata: MetadataAnalysis,
    pub overall_score: OverallScore,
}

/// SEO analysis seam; the pipeline only depends on this trait
#[async_trait]
pub trait SeoAnalyzer: Send + Sync {
    async fn analyze(&self, seed: &Url) -> Result<SeoResult>;
}

/// Plain-HTTP analyzer used by the CLI
pub struct HttpSeoAnalyzer {
    client: reqwest::Client,
}

impl HttpSeoAnalyzer {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("jindan/", env!("CARGO_PKG_VERSION")))
            .timeout(FETCH_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }

    async fn fetch_text(&self, url: &str) -> Option<String> {
        match self.client.get(url).send().await {
            Ok(response) if response.status().is_success() => response.text().await.ok(),
            Ok(response) => {
                debug!(url, status = %response.status(), "non-success fetch");
                None
            }
            Err(e) => {
                debug!(url, error = %e, "fetch failed");
                None
            }
        }
    }

    async fn analyze_sitemap(&self, origin: &str) -> SitemapAnalysis {
        let mut result = SitemapAnalysis::default();

        if let Some(robots) = self.fetch_text(&format!("{origin}/robots.txt")).await {
            result.robots_txt_reference = robots
                .lines()
                .any(|line| line.to_ascii_lowercase().starts_with("sitemap:"));
        }

        let Some(content) = self.fetch_text(&format!("{origin}/sitemap.xml")).await else {
            result.errors.push("Sitemap.xml 파일을 찾을 수 없습니다.".to_string());
            result.score = sitemap_score(&result);
            return result;
        };
        result.exists = true;

        result.xml_valid = content.contains("<urlset") || content.contains("<sitemapindex");
        if !result.xml_valid {
            result.errors.push("유효하지 않은 XML 형식".to_string());
        }

        let urls = extract_sitemap_urls(&content);
        result.total_urls = urls.len();

        // Reachability check over a bounded sample
        for url in urls.iter().take(SAMPLE_LIMIT) {
            result.sampled_total += 1;
            match self.client.get(url).send().await {
                Ok(response) if response.status().is_success() => result.sampled_ok += 1,
                Ok(_) | Err(_) => {}
            }
        }

        result.score = sitemap_score(&result);
        result
    }

    async fn analyze_llms_txt(&self, origin: &str) -> LlmsTxtAnalysis {
        match self.fetch_text(&format!("{origin}/llms.txt")).await {
            Some(content) => analyze_llms_content(&content),
            None => LlmsTxtAnalysis::default(),
        }
    }

    async fn analyze_metadata(&self, seed: &Url) -> MetadataAnalysis {
        match self.fetch_text(seed.as_str()).await {
            Some(html) => analyze_metadata_html(&html),
            None => MetadataAnalysis::default(),
        }
    }
}

#[async_trait]
impl SeoAnalyzer for HttpSeoAnalyzer {
    async fn analyze(&self, seed: &Url) -> Result<SeoResult> {
        let origin = seed.origin().ascii_serialization();

        let sitemap = self.analyze_sitemap(&origin).await;
        let metadata = self.analyze_metadata(seed).await;
        let llms_txt = self.analyze_llms_txt(&origin).await;

        let seo = (sitemap.score + metadata.score) / 2;
        let geo_ai = llms_txt.score;
        let total = (seo + geo_ai) / 2;

        if !sitemap.errors.is_empty() {
            warn!(errors = ?sitemap.errors, "sitemap analysis reported problems");
        }

        Ok(SeoResult {
            url: seed.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            sitemap,
            llms_txt,
            metadata,
            overall_score: OverallScore { seo, geo_ai, total },
        })
    }
}

fn extract_sitemap_urls(content: &str) -> Vec<String> {
    // A full XML parser buys nothing here, <loc> extraction suffices
    let Ok(re) = Regex::new(r"<loc>\s*([^<]+?)\s*</loc>") else {
        return Vec::new();
    };
    re.captures_iter(content)
        .map(|captures| captures[1].to_string())
        .collect()
}

fn sitemap_score(result: &SitemapAnalysis) -> u32 {
    let mut score = 0u32;
    if result.exists {
        score += 30;
    }
    if result.xml_valid {
        score += 30;
    }
    if result.sampled_total > 0 {
        let rate = result.sampled_ok as f64 / result.sampled_total as f64;
        score += (rate * 30.0).round() as u32;
    }
    if result.robots_txt_reference {
        score += 10;
    }
    score.min(100)
}

fn analyze_llms_content(content: &str) -> LlmsTxtAnalysis {
    let has_h1 = content.lines().any(|line| line.starts_with("# "));
    let has_h2 = content.lines().any(|line| line.starts_with("## "));
    let has_h3 = content.lines().any(|line| line.starts_with("### "));

    let paragraphs: Vec<&str> = content
        .split("\n\n")
        .filter(|paragraph| !paragraph.trim().is_empty())
        .collect();
    let word_count = content.split_whitespace().count();

    // A summary is prose near the top, before any section heading
    let has_summary = paragraphs
        .iter()
        .take(2)
        .any(|paragraph| !paragraph.trim_start().starts_with('#') && paragraph.trim().len() > 30);

    let mut result = LlmsTxtAnalysis {
        exists: true,
        has_h1,
        has_h2,
        has_h3,
        paragraph_count: paragraphs.len(),
        word_count,
        has_summary,
        score: 0,
    };
    result.score = llms_score(&result);
    result
}

fn llms_score(result: &LlmsTxtAnalysis) -> u32 {
    let mut score = 0u32;

    // Structure (30)
    if result.has_h1 {
        score += 10;
    }
    if result.has_h2 {
        score += 10;
    }
    if result.has_h3 {
        score += 10;
    }

    // Volume (25)
    if (100..=500).contains(&result.word_count) {
        score += 25;
    } else if result.word_count > 50 {
        score += 15;
    }

    // Summary (20)
    if result.has_summary {
        score += 20;
    }

    // Keyword density proxy (15): several distinct sections
    if result.paragraph_count >= 3 {
        score += 15;
    }

    // Readability (10)
    if result.has_h2 && result.paragraph_count >= 2 {
        score += 10;
    }

    score.min(100)
}

fn analyze_metadata_html(html: &str) -> MetadataAnalysis {
    let document = Html::parse_document(html);

    let select_content = |css: &str, attr: &str| -> Option<String> {
        let selector = Selector::parse(css).ok()?;
        document
            .select(&selector)
            .next()
            .and_then(|element| element.value().attr(attr))
            .map(|value| value.trim().to_string())
    };

    let title_text = Selector::parse("title")
        .ok()
        .and_then(|selector| {
            document
                .select(&selector)
                .next()
                .map(|element| element.text().collect::<String>().trim().to_string())
        })
        .unwrap_or_default();
    let title = TagCheck {
        exists: !title_text.is_empty(),
        length: title_text.chars().count(),
        optimal: (50..=60).contains(&title_text.chars().count()),
    };

    let description_text =
        select_content("meta[name=\"description\"]", "content").unwrap_or_default();
    let description = TagCheck {
        exists: !description_text.is_empty(),
        length: description_text.chars().count(),
        optimal: (150..=160).contains(&description_text.chars().count()),
    };

    let canonical_exists = select_content("link[rel=\"canonical\"]", "href").is_some();

    let open_graph = OpenGraphCheck {
        has_title: select_content("meta[property=\"og:title\"]", "content").is_some(),
        has_description: select_content("meta[property=\"og:description\"]", "content").is_some(),
        has_image: select_content("meta[property=\"og:image\"]", "content").is_some(),
        has_url: select_content("meta[property=\"og:url\"]", "content").is_some(),
    };

    let viewport_content = select_content("meta[name=\"viewport\"]", "content").unwrap_or_default();
    let viewport = ViewportCheck {
        exists: !viewport_content.is_empty(),
        mobile_friendly: viewport_content.to_ascii_lowercase().contains("width=device-width"),
    };

    let mut result = MetadataAnalysis {
        title,
        description,
        canonical_exists,
        open_graph,
        viewport,
        score: 0,
    };
    result.score = metadata_score(&result);
    result
}

fn metadata_score(result: &MetadataAnalysis) -> u32 {
    let mut score = 0u32;

    if result.title.optimal {
        score += 25;
    } else if result.title.exists {
        score += 15;
    }

    if result.description.optimal {
        score += 25;
    } else if result.description.exists {
        score += 15;
    }

    if result.canonical_exists {
        score += 20;
    }

    score += [
        result.open_graph.has_title,
        result.open_graph.has_description,
        result.open_graph.has_image,
        result.open_graph.has_url,
    ]
    .iter()
    .filter(|present| **present)
    .count() as u32
        * 5;

    if result.viewport.mobile_friendly {
        score += 10;
    } else if result.viewport.exists {
        score += 5;
    }

    score.min(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_sitemap_urls() {
        let xml = r#"<?xml version="1.0"?>
            <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
              <url><loc>https://ex.test/</loc></url>
              <url><loc> https://ex.test/a </loc></url>
            </urlset>"#;
        let urls = extract_sitemap_urls(xml);
        assert_eq!(urls, vec!["https://ex.test/", "https://ex.test/a"]);
    }

    #[test]
    fn test_sitemap_score_full() {
        let result = SitemapAnalysis {
            exists: true,
            robots_txt_reference: true,
            xml_valid: true,
            total_urls: 5,
            sampled_ok: 5,
            sampled_total: 5,
            errors: vec![],
            score: 0,
        };
        assert_eq!(sitemap_score(&result), 100);
    }

    #[test]
    fn test_sitemap_score_missing_file() {
        assert_eq!(sitemap_score(&SitemapAnalysis::default()), 0);
    }

    #[test]
    fn test_llms_analysis_structured_document() {
        let content = "# 사이트 소개\n\n이 웹사이트는 접근성 진단 도구를 제공하는 서비스입니다.\n\n\
            ## 주요 기능\n\n- 자동 진단\n- 보고서 생성\n\n### 상세\n\n내용이 이어집니다.";
        let result = analyze_llms_content(content);
        assert!(result.exists);
        assert!(result.has_h1 && result.has_h2 && result.has_h3);
        assert!(result.has_summary);
        assert!(result.score >= 30);
    }

    #[test]
    fn test_metadata_analysis_parses_tags() {
        let html = r#"<html><head>
            <title>좋은 페이지</title>
            <meta name="description" content="설명입니다">
            <link rel="canonical" href="https://ex.test/">
            <meta property="og:title" content="OG 제목">
            <meta name="viewport" content="width=device-width, initial-scale=1">
            </head><body></body></html>"#;
        let result = analyze_metadata_html(html);
        assert!(result.title.exists);
        assert!(!result.title.optimal);
        assert!(result.description.exists);
        assert!(result.canonical_exists);
        assert!(result.open_graph.has_title);
        assert!(!result.open_graph.has_image);
        assert!(result.viewport.mobile_friendly);
        // 15 + 15 + 20 + 5 + 10
        assert_eq!(result.score, 65);
    }

    #[test]
    fn test_metadata_score_empty_page() {
        assert_eq!(analyze_metadata_html("<html></html>").score, 0);
    }
}
