//! Per-order EAN payment metadata.

use serde::{Deserialize, Serialize};

use eanpay_core::ValueObject;

use crate::submission::{EanSubmission, is_blank};

/// What gets stored against an order after a successful EAN checkout.
///
/// Fields that were empty at submission time are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EanPaymentMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ean_num: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub req_num: Option<String>,
}

impl ValueObject for EanPaymentMeta {}

impl EanPaymentMeta {
    /// Keep the filled-in submitted fields, each passed through [`sanitize_text_field`].
    pub fn from_submission(submission: &EanSubmission) -> Self {
        fn keep(value: &Option<String>) -> Option<String> {
            value
                .as_deref()
                .filter(|v| !is_blank(v))
                .map(sanitize_text_field)
        }

        Self {
            ean_num: keep(&submission.ean_num),
            ref_name: keep(&submission.ref_name),
            req_num: keep(&submission.req_num),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ean_num.is_none() && self.ref_name.is_none() && self.req_num.is_none()
    }
}

/// Clean a single-line text field for storage.
///
/// Drops `<script>` and `<style>` elements with their contents, then any
/// other markup tags, folds line breaks and tabs into spaces, collapses runs
/// of whitespace and trims both ends. A `<` that does not open a tag is kept.
pub fn sanitize_text_field(input: &str) -> String {
    // Repeat until stable: removing one tag can expose another ("<<a>b>").
    let mut current = strip_tags(&strip_element_bodies(input));
    loop {
        let next = strip_tags(&current);
        if next == current {
            break;
        }
        current = next;
    }

    current.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn strip_element_bodies(input: &str) -> String {
    ["script", "style"]
        .iter()
        .fold(input.to_string(), |acc, name| strip_element(&acc, name))
}

/// Remove every `<name ...>...</name>` span, matching the name case-insensitively.
/// An opening tag without a matching close is left for the generic tag pass.
fn strip_element(input: &str, name: &str) -> String {
    let open = format!("<{name}");
    let close = format!("</{name}>");
    // ASCII lowercasing keeps byte offsets aligned with `input`.
    let lower = input.to_ascii_lowercase();

    let mut out = String::with_capacity(input.len());
    let mut pos = 0;

    while let Some(rel) = lower[pos..].find(&open) {
        let start = pos + rel;
        let after_name = start + open.len();
        let body = lower[after_name..]
            .find('>')
            .map(|gt| after_name + gt + 1);

        match body.and_then(|b| lower[b..].find(&close).map(|end| b + end + close.len())) {
            Some(end) => {
                out.push_str(&input[pos..start]);
                pos = end;
            }
            None => {
                out.push_str(&input[pos..after_name]);
                pos = after_name;
            }
        }
    }

    out.push_str(&input[pos..]);
    out
}

fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let opens_tag = after
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || matches!(c, '/' | '!' | '?'));

        match after.find('>') {
            Some(end) if opens_tag => rest = &after[end + 1..],
            _ => {
                out.push('<');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_non_empty_fields_are_kept() {
        let submission = EanSubmission::new("4006381333931", "", "REQ-1");
        let meta = EanPaymentMeta::from_submission(&submission);
        assert_eq!(meta.ean_num.as_deref(), Some("4006381333931"));
        assert_eq!(meta.ref_name, None);
        assert_eq!(meta.req_num.as_deref(), Some("REQ-1"));
        assert!(!meta.is_empty());
    }

    #[test]
    fn empty_submission_yields_empty_meta() {
        let meta = EanPaymentMeta::from_submission(&EanSubmission::default());
        assert!(meta.is_empty());
    }

    #[test]
    fn absent_fields_are_not_serialized() {
        let meta = EanPaymentMeta {
            ean_num: Some("4006381333931".into()),
            ..EanPaymentMeta::default()
        };
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json, serde_json::json!({ "ean_num": "4006381333931" }));
    }

    #[test]
    fn sanitize_strips_tags_and_whitespace() {
        assert_eq!(sanitize_text_field("  Jane <b>Doe</b>\n"), "Jane Doe");
        assert_eq!(sanitize_text_field("a\t\tb\r\nc"), "a b c");
    }

    #[test]
    fn sanitize_drops_script_and_style_contents() {
        assert_eq!(sanitize_text_field("<script>x</script>REQ"), "REQ");
        assert_eq!(
            sanitize_text_field("A<SCRIPT type=\"text/javascript\">alert(1)</Script>B"),
            "AB"
        );
        assert_eq!(sanitize_text_field("<style>p{}</style> Jane <b>Doe</b>"), "Jane Doe");
        assert_eq!(sanitize_text_field("<script>unterminated"), "unterminated");
    }

    #[test]
    fn zero_reference_fields_are_not_stored() {
        let meta = EanPaymentMeta::from_submission(&EanSubmission::new("4006381333931", "0", "0"));
        assert_eq!(meta.ref_name, None);
        assert_eq!(meta.req_num, None);
        assert_eq!(meta.ean_num.as_deref(), Some("4006381333931"));
    }

    #[test]
    fn sanitize_keeps_lone_angle_brackets() {
        assert_eq!(sanitize_text_field("1 < 2"), "1 < 2");
        assert_eq!(sanitize_text_field("a <b"), "a <b");
        assert_eq!(sanitize_text_field("5 > 3"), "5 > 3");
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: sanitizing twice is the same as sanitizing once.
            #[test]
            fn sanitize_is_idempotent(input in ".{0,64}") {
                let once = sanitize_text_field(&input);
                prop_assert_eq!(sanitize_text_field(&once), once.clone());
            }

            /// Property: output is a single trimmed line.
            #[test]
            fn sanitize_output_is_single_line(input in "[a-z \t\r\n<>/]{0,64}") {
                let out = sanitize_text_field(&input);
                prop_assert!(!out.contains('\n') && !out.contains('\t') && !out.contains('\r'));
                prop_assert_eq!(out.trim(), out.as_str());
            }
        }
    }
}
