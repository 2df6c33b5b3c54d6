//! End-to-end checks for the SwiftTranslator Singlish→Sinhala converter.
//!
//! The page under test is a third-party site that transliterates romanized
//! Sinhala ("Singlish") into Sinhala script as the user types. Nothing about
//! its markup is under our control, so every element is located through an
//! ordered fallback chain of heuristics and every conversion is observed by
//! polling (see the `uiprobe` crate).
//!
//! The live suites in `tests/` are gated behind the `live` feature and
//! `#[ignore]`, since they need chromium, network access, and the site
//! itself to be up:
//!
//! ```text
//! cargo test -p swifttranslator-e2e --features live -- --ignored
//! ```

use std::sync::OnceLock;

use regex::Regex;
use uiprobe::Selector;

#[cfg(feature = "live")]
mod live;
#[cfg(feature = "live")]
pub use live::{convert_once, LiveTranslator};

/// Target page when `TRANSLATOR_URL` is not set
pub const DEFAULT_TRANSLATOR_URL: &str = "https://www.swifttranslator.com/";

/// URL of the page under test, overridable via `TRANSLATOR_URL`
#[must_use]
pub fn translator_url() -> String {
    std::env::var("TRANSLATOR_URL").unwrap_or_else(|_| DEFAULT_TRANSLATOR_URL.to_string())
}

/// Selector chains for the converter page.
///
/// Chains are ordered by confidence: the element id the site ships today,
/// then placeholder and label heuristics that survive id churn, then a bare
/// positional guess. Resolution degrades left to right.
#[derive(Debug, Clone)]
pub struct TranslatorPage {
    input: Vec<Selector>,
    output: Vec<Selector>,
    clear: Selector,
}

impl Default for TranslatorPage {
    fn default() -> Self {
        Self::new()
    }
}

impl TranslatorPage {
    /// Selector chains for the current SwiftTranslator markup
    #[must_use]
    pub fn new() -> Self {
        Self {
            input: vec![
                Selector::css("#singlish"),
                Selector::placeholder_contains("textarea", "Singlish"),
                Selector::labeled_control("Singlish", "textarea"),
                Selector::nth("textarea", 0),
            ],
            output: vec![
                Selector::css("#sinhala"),
                Selector::labeled_control("Sinhala", "textarea"),
                Selector::nth("textarea", 1),
            ],
            clear: Selector::button_labeled("clear"),
        }
    }

    /// Candidate chain for the Singlish input field
    #[must_use]
    pub fn input_candidates(&self) -> &[Selector] {
        &self.input
    }

    /// Candidate chain for the Sinhala output field
    #[must_use]
    pub fn output_candidates(&self) -> &[Selector] {
        &self.output
    }

    /// Selector for the clear control
    #[must_use]
    pub const fn clear_button(&self) -> &Selector {
        &self.clear
    }
}

fn sinhala_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("[\u{0D80}-\u{0DFF}]").unwrap())
}

/// Whether `text` contains at least one Sinhala-script code point
#[must_use]
pub fn contains_sinhala(text: &str) -> bool {
    sinhala_re().is_match(text)
}

/// Install the test log subscriber once; respects `RUST_LOG`.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    static INIT: OnceLock<()> = OnceLock::new();
    INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
