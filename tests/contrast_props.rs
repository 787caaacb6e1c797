//! Property tests for the contrast mathematics and report invariants.

use accesslint::analyze;
use accesslint::contrast::{contrast_ratio, relative_luminance};
use accesslint::css::Color;
use proptest::prelude::*;

proptest! {
    #[test]
    fn contrast_is_symmetric(
        r1 in 0u8..=255, g1 in 0u8..=255, b1 in 0u8..=255,
        r2 in 0u8..=255, g2 in 0u8..=255, b2 in 0u8..=255,
    ) {
        let a = Color::rgb(r1, g1, b1);
        let b = Color::rgb(r2, g2, b2);
        prop_assert_eq!(contrast_ratio(a, b), contrast_ratio(b, a));
    }

    #[test]
    fn contrast_with_self_is_one(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255) {
        let c = Color::rgb(r, g, b);
        prop_assert_eq!(contrast_ratio(c, c), 1.0);
    }

    #[test]
    fn contrast_is_at_least_one(
        r1 in 0u8..=255, g1 in 0u8..=255, b1 in 0u8..=255,
        r2 in 0u8..=255, g2 in 0u8..=255, b2 in 0u8..=255,
    ) {
        let ratio = contrast_ratio(Color::rgb(r1, g1, b1), Color::rgb(r2, g2, b2));
        prop_assert!(ratio >= 1.0);
        prop_assert!(ratio <= 21.0 + 1e-9);
    }

    #[test]
    fn luminance_is_normalized(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255) {
        let l = relative_luminance(Color::rgb(r, g, b));
        prop_assert!((0.0..=1.0).contains(&l));
    }

    #[test]
    fn score_stays_in_bounds(
        missing_alts in 0usize..15,
        text_gray in 0u8..=255,
    ) {
        let mut html = String::from("<html><body>");
        for i in 0..missing_alts {
            html.push_str(&format!(r#"<img src="{i}.png">"#));
        }
        html.push_str(&format!(
            r#"<p style="color: #{0:02x}{0:02x}{0:02x}">some text</p>"#,
            text_gray
        ));
        html.push_str("</body></html>");

        let report = analyze(&html).unwrap();
        prop_assert!(report.summary.score <= 100);
        prop_assert_eq!(
            report.summary.critical_count + report.summary.warning_count,
            (report.critical.len() + report.warnings.len()) as u32
        );
    }
}
