//! Per-gate issue detectors.
//!
//! Each detector is a pure function from source text to a list of
//! human-readable issue strings. An empty list means the gate passes.

use regex::Regex;
use std::sync::LazyLock;

static XSS_SINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"dangerouslySetInnerHTML|\.innerHTML\s*=|insertAdjacentHTML|v-html\s*=")
        .expect("valid regex")
});
static DOCUMENT_WRITE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"document\.write\s*\(").expect("valid regex"));
static DYNAMIC_EVAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\beval\s*\(|new\s+Function\s*\(").expect("valid regex"));
static SPAWN_REQUIRE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"require\s*\(\s*['"](child_process|fs|node:child_process|node:fs)['"]\s*\)"#)
        .expect("valid regex")
});

/// Flags raw-HTML injection sinks, `document.write`, dynamic code
/// evaluation, and process/filesystem-spawning require patterns.
pub fn security_issues(code: &str) -> Vec<String> {
    let mut issues = Vec::new();
    if XSS_SINK.is_match(code) {
        issues.push("Potential XSS vector detected (raw HTML injection sink)".to_string());
    }
    if DOCUMENT_WRITE.is_match(code) {
        issues.push("Use of document.write detected".to_string());
    }
    if DYNAMIC_EVAL.is_match(code) {
        issues.push("Dynamic code evaluation detected (eval or Function constructor)".to_string());
    }
    if SPAWN_REQUIRE.is_match(code) {
        issues.push("Process or filesystem access detected in component code".to_string());
    }
    issues
}

static DEBUG_PRINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"console\.(log|debug|info)\s*\(").expect("valid regex"));
static ANY_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":\s*any\b|\bas\s+any\b|<any>").expect("valid regex"));

const MAX_LINE_CHARS: usize = 120;

/// Flags debug-print statements (error-level logging is allowed), the `any`
/// type escape hatch, and overlong lines.
pub fn lint_issues(code: &str) -> Vec<String> {
    let mut issues = Vec::new();
    if DEBUG_PRINT.is_match(code) {
        issues.push("Debug logging statement found (console.log/debug/info)".to_string());
    }
    if ANY_ESCAPE.is_match(code) {
        issues.push("Untyped 'any' escape hatch found".to_string());
    }
    for (index, line) in code.lines().enumerate() {
        if line.chars().count() > MAX_LINE_CHARS {
            issues.push(format!(
                "Line {} exceeds {} characters",
                index + 1,
                MAX_LINE_CHARS
            ));
        }
    }
    issues
}

static STATE_HOOK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\buse(State|Effect|Reducer|LayoutEffect)\s*\(").expect("valid regex")
});
static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[a-zA-Z][a-zA-Z0-9]*[\s/>]").expect("valid regex"));
static CLIENT_DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"['"]use client['"]"#).expect("valid regex"));

/// Heuristic consistency check: components combining stateful hooks with
/// markup must declare the client-execution directive.
pub fn type_check_issues(code: &str) -> Vec<String> {
    let mut issues = Vec::new();
    if STATE_HOOK.is_match(code) && MARKUP_TAG.is_match(code) && !CLIENT_DIRECTIVE.is_match(code) {
        issues.push(
            "Component uses state/effect hooks with markup but lacks a 'use client' directive"
                .to_string(),
        );
    }
    issues
}

static IMG_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<img\b[^>]*>").expect("valid regex"));
static EMPTY_BUTTON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<button\b([^>]*)>\s*</button>").expect("valid regex"));
static INPUT_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<input\b[^>]*>").expect("valid regex"));
static TAB_INDEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"tab[iI]ndex\s*=\s*[{"']?\s*(\d+)"#).expect("valid regex")
});
static INPUT_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"type\s*=\s*["']([a-zA-Z]+)["']"#).expect("valid regex"));

fn is_text_input(tag: &str) -> bool {
    match INPUT_TYPE.captures(tag) {
        Some(captures) => captures[1].eq_ignore_ascii_case("text"),
        // type defaults to text when omitted
        None => true,
    }
}

/// Flags images without alternative text, buttons with neither text content
/// nor an accessible label, unlabeled text inputs, and positive explicit
/// tab-order values.
pub fn accessibility_issues(code: &str) -> Vec<String> {
    let mut issues = Vec::new();

    for tag in IMG_TAG.find_iter(code) {
        if !tag.as_str().contains("alt=") {
            issues.push("Image without alt text".to_string());
        }
    }

    for captures in EMPTY_BUTTON.captures_iter(code) {
        let attrs = &captures[1];
        if !attrs.contains("aria-label") && !attrs.contains("aria-labelledby") {
            issues.push("Button with no text content and no accessible label".to_string());
        }
    }

    let has_label_element = code.contains("<label");
    for tag in INPUT_TAG.find_iter(code) {
        let tag = tag.as_str();
        if is_text_input(tag)
            && !tag.contains("aria-label")
            && !tag.contains("aria-labelledby")
            && !has_label_element
        {
            issues.push("Text input without an associated label or aria-label".to_string());
        }
    }

    for captures in TAB_INDEX.captures_iter(code) {
        if captures[1].parse::<u32>().unwrap_or(0) > 0 {
            issues.push("Positive tabIndex disrupts natural tab order".to_string());
        }
    }

    issues
}

static CLASS_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:className|class)\s*=\s*["']([^"']*)["']"#).expect("valid regex")
});
static LAYOUT_UTILITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\s)(flex|grid|inline-flex|inline-grid)(?:\s|$)").expect("valid regex")
});
static BREAKPOINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:sm|md|lg|xl|2xl):").expect("valid regex"));

/// Flags layout-establishing class combinations that lack any
/// responsive-breakpoint modifier. Code with no layout utilities is exempt.
pub fn responsive_issues(code: &str) -> Vec<String> {
    let mut uses_layout = false;
    let mut has_breakpoint = false;
    for captures in CLASS_ATTR.captures_iter(code) {
        let classes = &captures[1];
        if LAYOUT_UTILITY.is_match(classes) {
            uses_layout = true;
        }
        if BREAKPOINT.is_match(classes) {
            has_breakpoint = true;
        }
    }
    if uses_layout && !has_breakpoint {
        vec!["Layout utilities (flex/grid) used without responsive breakpoints".to_string()]
    } else {
        Vec::new()
    }
}
