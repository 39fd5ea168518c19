//! Keyword-anchored entity extraction.
//!
//! Each trigger keyword marks the END of an entity name ("…有限公司", "…承建").
//! The start is found by walking backwards from the keyword until a boundary
//! character: whitespace or any non-alphanumeric character, except the
//! punctuation that commonly appears inside Chinese company names.
//!
//! Two passes over the keyword list:
//!   1. strict: candidates containing an ignore keyword are rejected and the
//!      next keyword is tried;
//!   2. lenient: the first candidate found is returned regardless.
//!
//! Only the leftmost occurrence of each keyword is used, and keyword order
//! always beats text position.

use crate::keywords::KeywordSets;

/// Characters skipped by the backward scan (neither part of the boundary test
/// nor a terminator).
pub const PUNCT_IGNORE: &[char] = &['(', ')', '（', '）', '·', '、'];

/// Extract the entity anchored on the first matching trigger keyword.
pub fn extract_entity<'t>(
    text: &'t str,
    entity_keywords: &[String],
    ignore_keywords: &[String],
) -> Option<&'t str> {
    if text.is_empty() {
        return None;
    }

    // The lenient pass would rescan the same leftmost occurrences and return
    // the first candidate, so remember it while running the strict pass.
    let mut fallback: Option<&'t str> = None;

    for keyword in entity_keywords {
        let Some(candidate) = candidate_for(text, keyword) else {
            continue;
        };
        if !is_suppressed(candidate, ignore_keywords) {
            return Some(candidate);
        }
        tracing::trace!(keyword = %keyword, candidate, "candidate suppressed");
        fallback.get_or_insert(candidate);
    }

    fallback
}

/// [`extract_entity`] with both lists taken from `keywords`.
pub fn extract_with<'t>(text: &'t str, keywords: &KeywordSets) -> Option<&'t str> {
    extract_entity(text, &keywords.entity, &keywords.ignore)
}

/// Candidate span ending with the leftmost occurrence of `keyword`.
fn candidate_for<'t>(text: &'t str, keyword: &str) -> Option<&'t str> {
    let keyword_start = text.find(keyword)?;
    let end = keyword_start + keyword.len();
    let start = scan_entity_start(text, keyword_start);
    Some(&text[start..end])
}

/// Byte offset where the entity ending before `before` begins.
fn scan_entity_start(text: &str, before: usize) -> usize {
    for (idx, c) in text[..before].char_indices().rev() {
        if PUNCT_IGNORE.contains(&c) {
            continue;
        }
        if c.is_whitespace() || !c.is_alphanumeric() {
            return idx + c.len_utf8();
        }
    }
    0
}

fn is_suppressed(candidate: &str, ignore_keywords: &[String]) -> bool {
    ignore_keywords
        .iter()
        .any(|ignore| candidate.contains(ignore.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kws(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(extract_entity("", &kws(&["承建"]), &[]), None);
    }

    #[test]
    fn test_no_keyword_present() {
        assert_eq!(
            extract_entity("某办公楼改造工程招标公告", &kws(&["承建", "有限公司"]), &[]),
            None
        );
    }

    #[test]
    fn test_parenthesised_segment_kept() {
        assert_eq!(
            extract_entity("某某(集团)有限公司承建", &kws(&["承建"]), &[]),
            Some("某某(集团)有限公司承建")
        );
    }

    #[test]
    fn test_stops_at_nearest_boundary() {
        let text = "中标公告：江苏某建设集团（华东·分公司）、中建三局承建";
        assert_eq!(
            extract_entity(text, &kws(&["承建"]), &[]),
            Some("江苏某建设集团（华东·分公司）、中建三局承建")
        );
        assert_eq!(
            extract_entity("项目名称 南京某市政工程有限公司中标", &kws(&["有限公司"]), &[]),
            Some("南京某市政工程有限公司")
        );
    }

    #[test]
    fn test_ascii_alphanumerics_are_part_of_name() {
        assert_eq!(
            extract_entity("中标人:ABC123建设有限公司", &kws(&["有限公司"]), &[]),
            Some("ABC123建设有限公司")
        );
    }

    #[test]
    fn test_rerun_on_own_output() {
        let keywords = kws(&["承建"]);
        let first = extract_entity("公告：某某(集团)有限公司承建", &keywords, &[]).unwrap();
        assert_eq!(extract_entity(first, &keywords, &[]), Some(first));
        // once the keyword is gone there is nothing to anchor on
        assert_eq!(extract_entity("某某(集团)有限公司", &keywords, &[]), None);
    }

    #[test]
    fn test_suppressed_candidate_moves_to_next_keyword() {
        let text = "招标代理集团发布，某建设有限公司中标";
        assert_eq!(
            extract_entity(text, &kws(&["集团", "有限公司"]), &kws(&["代理"])),
            Some("某建设有限公司")
        );
    }

    #[test]
    fn test_lenient_pass_returns_suppressed_candidate() {
        let text = "本项目由招标代理集团负责";
        assert_eq!(
            extract_entity(text, &kws(&["有限公司", "集团"]), &kws(&["代理"])),
            Some("本项目由招标代理集团")
        );
    }

    #[test]
    fn test_lenient_pass_prefers_first_keyword() {
        let text = "代理有限公司，招标代理集团";
        assert_eq!(
            extract_entity(text, &kws(&["集团", "有限公司"]), &kws(&["代理"])),
            Some("招标代理集团")
        );
    }

    #[test]
    fn test_only_leftmost_occurrence_considered() {
        let text = "代理公司，某建设公司";
        assert_eq!(
            extract_entity(text, &kws(&["公司"]), &kws(&["代理"])),
            Some("代理公司")
        );
    }

    #[test]
    fn test_keyword_order_beats_position() {
        let text = "某集团，甲有限公司";
        assert_eq!(
            extract_entity(text, &kws(&["有限公司", "集团"]), &[]),
            Some("甲有限公司")
        );
    }

    #[test]
    fn test_empty_keyword_yields_empty_entity() {
        assert_eq!(extract_entity("某公司", &kws(&[""]), &[]), Some(""));
    }

    #[test]
    fn test_extract_with_keyword_sets() {
        let sets = KeywordSets::new(kws(&["有限公司"]), kws(&["监理"]));
        assert_eq!(
            extract_with("监理：某监理有限公司；施工：某建设有限公司", &sets),
            Some("某监理有限公司")
        );
    }
}
