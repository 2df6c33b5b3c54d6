//! UI behavior cases: real-time conversion while typing, and the clear
//! control emptying both fields.
//!
//! Gated behind the `live` feature and `#[ignore]`; see `tests/functional.rs`.

#![cfg(feature = "live")]

use std::time::Duration;

use swifttranslator_e2e::LiveTranslator;
use uiprobe::{read_value, Field, ProbeResult};

#[tokio::test]
#[ignore = "drives the live translator site; requires chromium and network"]
async fn output_updates_in_real_time_while_typing() -> ProbeResult<()> {
    let translator = LiveTranslator::open().await?;
    let input = translator.input_field().await?;

    input.fill("").await?;
    tokio::time::sleep(Duration::from_millis(200)).await;

    // Grow the input one keystroke at a time, sampling the output after
    // each, the way a user would watch the conversion happen.
    let mut observed = Vec::new();
    for prefix in ["m", "ma", "mam", "mama"] {
        input.fill(prefix).await?;
        tokio::time::sleep(Duration::from_millis(500)).await;
        observed.push(translator.read_output().await?);
    }

    let last = observed.last().expect("sampled four keystrokes");
    assert!(!last.is_empty(), "no output after typing finished");

    // Whenever two consecutive samples were both non-empty, the later one
    // must reflect the extra keystroke.
    if !observed[0].is_empty() && !observed[1].is_empty() {
        assert_ne!(observed[1], observed[0], "output ignored a keystroke");
    }

    translator.close().await
}

#[tokio::test]
#[ignore = "drives the live translator site; requires chromium and network"]
async fn clearing_the_input_empties_the_output() -> ProbeResult<()> {
    let translator = LiveTranslator::open().await?;

    let converted = translator.convert("mama gedhara yanavaa").await?;
    assert!(!converted.is_empty(), "conversion never appeared");

    // Prefers the page's own clear button, falls back to blanking the input.
    translator.clear().await?;

    let output = translator.output_field().await?;
    translator.probe().poll_until_empty(&output).await?;
    assert_eq!(read_value(&output).await, "");

    translator.close().await
}
