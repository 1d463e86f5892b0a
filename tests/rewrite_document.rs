//! 文档改写集成测试
//!
//! 验证可见文本被替换、属性与结构保持不变

mod common;

use common::{collect_comments, collect_elements, collect_text, NEUTRAL_PAGE, SAMPLE_PAGE};

use renoun::core::{rewrite_document_from_data, rewrite_html};
use renoun::substitution::{RewritePolicy, RuleSet};

fn rewrite(html: &str) -> String {
    rewrite_html(&RuleSet::default(), html).unwrap()
}

#[test]
fn test_title_is_rewritten() {
    let output = rewrite(SAMPLE_PAGE);
    assert!(output.contains("<title>Fale University Test Page</title>"));

    let (_, title) =
        rewrite_document_from_data(&RuleSet::default(), SAMPLE_PAGE.as_bytes(), None).unwrap();
    assert_eq!(title.as_deref(), Some("Fale University Test Page"));
}

#[test]
fn test_link_text_rewritten_href_kept() {
    let output = rewrite(SAMPLE_PAGE);
    assert!(output.contains(r#"<a href="https://www.yale.edu/about">About Fale</a>"#));
    assert!(output.contains(r#"<a href="https://www.yale.edu/admissions">Fale Admissions</a>"#));
}

#[test]
fn test_image_alt_unchanged() {
    let output = rewrite(SAMPLE_PAGE);
    assert!(output.contains(r#"alt="Yale Logo""#));
    assert!(output.contains(r#"src="https://www.yale.edu/images/logo.png""#));
}

#[test]
fn test_body_text_rewritten() {
    let output = rewrite(SAMPLE_PAGE);
    assert!(output.contains("<h1>Welcome to Fale University</h1>"));
    assert!(output.contains("Fale University is a private Ivy League research university"));
    assert!(output.contains("Fale was founded in 1701"));
    assert!(!collect_text(&output)
        .iter()
        .any(|t| t.contains("Yale") && !t.contains("var site")));
}

#[test]
fn test_attributes_are_byte_identical() {
    let output = rewrite(SAMPLE_PAGE);
    assert_eq!(collect_elements(SAMPLE_PAGE), collect_elements(&output));
}

#[test]
fn test_mailto_link_text_is_a_url_token() {
    // 文本中的 info@yale.edu 同样按整词替换，href 保持不变
    let output = rewrite(SAMPLE_PAGE);
    assert!(output.contains(r#"href="mailto:info@yale.edu""#));
    assert!(output.contains(">info@fale.edu</a>"));
}

#[test]
fn test_script_and_comments_untouched() {
    let output = rewrite(SAMPLE_PAGE);
    assert!(output.contains(r#"var site = "Yale";"#));
    assert_eq!(collect_comments(&output), vec![" Yale footer ".to_string()]);
}

#[test]
fn test_document_without_vocabulary_is_unchanged() {
    let output = rewrite(NEUTRAL_PAGE);
    assert_eq!(collect_elements(NEUTRAL_PAGE), collect_elements(&output));
    assert_eq!(collect_text(NEUTRAL_PAGE), collect_text(&output));
}

#[test]
fn test_rewrite_is_idempotent() {
    let once = rewrite(SAMPLE_PAGE);
    let twice = rewrite(&once);
    assert_eq!(once, twice);
}

#[test]
fn test_phrase_policy_only_touches_anchored_names() {
    let rules = RuleSet::from_policy(RewritePolicy::Phrase, "Yale", "Fale").unwrap();
    let output = rewrite_html(&rules, SAMPLE_PAGE).unwrap();

    assert!(output.contains("<title>Fale University Test Page</title>"));
    assert!(output.contains("<h1>Welcome to Fale University</h1>"));
    // 不在短语中的出现保持原样
    assert!(output.contains("Yale was founded in 1701"));
    assert!(output.contains(">About Yale</a>"));
}

#[test]
fn test_mixed_case_fragment() {
    let html = "<p>YALE University, Yale College, and yale medical school</p>";
    let output = rewrite(html);
    assert!(output.contains("<p>FALE University, Fale College, and fale medical school</p>"));
}

#[test]
fn test_empty_input() {
    let output = rewrite("");
    assert_eq!(output, "<html><head></head><body></body></html>");
}

#[test]
fn test_fragment_is_wrapped_in_document() {
    let output = rewrite("<p>Yale</p>");
    assert_eq!(output, "<html><head></head><body><p>Fale</p></body></html>");
}
