//! Markup helpers for the embedded document.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Tags some engines emit that are rewritten to the shorthand other engines use.
static PRODUCER_TAGS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(</?)(p|em|strong|del)\b").expect("tag pattern is valid")
});

/// Normalize editor output so it does not depend on the editing engine.
///
/// `p` becomes `div`, `em` becomes `i`, `strong` becomes `b` and `del`
/// becomes `s`, in both opening and closing tags. Attributes are kept.
pub fn normalize_markup(html: &str) -> String {
    PRODUCER_TAGS
        .replace_all(html, |caps: &Captures<'_>| {
            let replacement = match caps[2].to_ascii_lowercase().as_str() {
                "p" => "div",
                "em" => "i",
                "strong" => "b",
                _ => "s",
            };
            format!("{}{}", &caps[1], replacement)
        })
        .into_owned()
}

/// Minimal document written into the editing frame before content is loaded.
pub fn document_shell(style: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"UTF-8\" /><style type=\"text/css\">{style}</style></head><body></body></html>"
    )
}

/// Style rule that shows `placeholder` while the editor body is empty.
///
/// The body carries the `empty` class while it has no text.
pub fn placeholder_rule(placeholder: &str) -> String {
    let escaped = placeholder.replace('\\', "\\\\").replace('\'', "\\'");
    format!("body.empty:before{{position:fixed;color:#888;content:'{escaped}';}}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_becomes_div() {
        assert_eq!(normalize_markup("<p>hi</p>"), "<div>hi</div>");
    }

    #[test]
    fn test_inline_tags() {
        insta::assert_snapshot!(
            normalize_markup(r#"<P class="x"><EM>a</EM> <strong>b</strong> <del>c</del></P>"#),
            @r#"<div class="x"><i>a</i> <b>b</b> <s>c</s></div>"#
        );
    }

    #[test]
    fn test_similar_tag_names_untouched() {
        let html = "<pre>x</pre><param name=a><span>y</span><details>z</details>";
        assert_eq!(normalize_markup(html), html);
    }

    #[test]
    fn test_text_untouched() {
        assert_eq!(normalize_markup("p em strong del"), "p em strong del");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let once = normalize_markup("<p><em>x</em></p>");
        assert_eq!(normalize_markup(&once), once);
    }

    #[test]
    fn test_document_shell() {
        insta::assert_snapshot!(
            document_shell("body{margin:0px;}"),
            @r#"<!DOCTYPE html><html><head><meta charset="UTF-8" /><style type="text/css">body{margin:0px;}</style></head><body></body></html>"#
        );
    }

    #[test]
    fn test_placeholder_rule_escapes_quotes() {
        assert_eq!(
            placeholder_rule("Don't stop"),
            r"body.empty:before{position:fixed;color:#888;content:'Don\'t stop';}"
        );
    }
}
