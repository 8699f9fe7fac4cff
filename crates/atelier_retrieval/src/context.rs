//! Context-block rendering for retrieved matches.

use atelier_interface::{GenerationMatch, PatternMatch};

/// Hard cap on rendered code excerpts, in characters.
pub const MAX_EXCERPT_CHARS: usize = 1500;

const TRUNCATION_MARKER: &str = "\n// ... (truncated)";

/// Truncate a code excerpt to [`MAX_EXCERPT_CHARS`], appending a marker when
/// content was dropped.
pub fn truncate_excerpt(code: &str) -> String {
    match code.char_indices().nth(MAX_EXCERPT_CHARS) {
        Some((byte_index, _)) => format!("{}{}", &code[..byte_index], TRUNCATION_MARKER),
        None => code.to_string(),
    }
}

/// Render retrieved matches into the textual context block appended to the
/// generation prompt.
///
/// Returns an empty string when both result sets are empty (no enrichment).
pub fn render_context_block(
    generations: &[GenerationMatch],
    patterns: &[PatternMatch],
) -> String {
    if generations.is_empty() && patterns.is_empty() {
        return String::new();
    }

    let mut block = String::from(
        "Use the following prior work as style and quality exemplars for this task.\n",
    );

    for m in generations {
        block.push_str(&format!(
            "\n### Prior generation (quality {:.2}, similarity {:.2})\nPrompt: {}\n```\n{}\n```\n",
            m.quality_score,
            m.similarity,
            m.prompt,
            truncate_excerpt(&m.code)
        ));
    }

    for p in patterns {
        block.push_str(&format!(
            "\n### Pattern: {} ({})\n{}\n```\n{}\n```\n",
            p.name,
            p.category,
            p.description,
            truncate_excerpt(&p.code)
        ));
    }

    block.push_str("\nMatch or exceed the quality of the exemplars above.\n");
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::Framework;
    use uuid::Uuid;

    fn generation(code: &str) -> GenerationMatch {
        GenerationMatch {
            generation_id: Uuid::new_v4(),
            similarity: 0.9,
            prompt: "Create a pricing card".to_string(),
            code: code.to_string(),
            quality_score: 0.85,
            framework: Framework::React,
        }
    }

    #[test]
    fn empty_matches_render_empty_block() {
        assert_eq!(render_context_block(&[], &[]), "");
    }

    #[test]
    fn short_excerpts_are_not_truncated() {
        let excerpt = truncate_excerpt("const x = 1;");
        assert_eq!(excerpt, "const x = 1;");
    }

    #[test]
    fn long_excerpts_are_capped_with_marker() {
        let long = "x".repeat(MAX_EXCERPT_CHARS + 100);
        let excerpt = truncate_excerpt(&long);
        assert!(excerpt.ends_with("// ... (truncated)"));
        assert!(excerpt.chars().count() < long.chars().count());
    }

    #[test]
    fn block_includes_prompt_and_closing_instruction() {
        let block = render_context_block(&[generation("<Card />")], &[]);
        assert!(block.contains("Create a pricing card"));
        assert!(block.contains("<Card />"));
        assert!(block.contains("Match or exceed"));
    }

    #[test]
    fn block_includes_pattern_metadata() {
        let pattern = PatternMatch {
            pattern_id: Uuid::new_v4(),
            similarity: 0.7,
            name: "Responsive navbar".to_string(),
            category: "navigation".to_string(),
            description: "Collapsible navigation bar".to_string(),
            code: "<nav />".to_string(),
            framework: None,
        };
        let block = render_context_block(&[], &[pattern]);
        assert!(block.contains("Responsive navbar"));
        assert!(block.contains("navigation"));
        assert!(block.contains("Collapsible"));
    }
}
