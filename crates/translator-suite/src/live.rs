//! Fixture for driving the live converter page.
//!
//! Each [`LiveTranslator`] owns its own browser session and page, so test
//! cases can run concurrently without sharing any mutable state. Environment
//! knobs: `TRANSLATOR_URL` (target page), `CHROMIUM_PATH` (browser binary),
//! `PROBE_HEADFUL` (watch the run), `PROBE_NO_SANDBOX` (container CI).

use std::time::Duration;

use uiprobe::{
    read_value, resolve_visible, BrowserConfig, Candidate, CdpField, Field, PageHandle,
    ProbeResult, Session, UiProbe,
};

use crate::{init_tracing, translator_url, TranslatorPage};

/// A live browser session pointed at the converter page
#[derive(Debug)]
pub struct LiveTranslator {
    session: Session,
    page: PageHandle,
    model: TranslatorPage,
    probe: UiProbe,
}

impl LiveTranslator {
    /// Launch a browser and navigate to the converter.
    ///
    /// # Errors
    ///
    /// Fails when chromium cannot start or the page cannot be reached.
    pub async fn open() -> ProbeResult<Self> {
        init_tracing();

        let mut config = BrowserConfig::default();
        if std::env::var_os("PROBE_HEADFUL").is_some() {
            config = config.with_headless(false);
        }
        if std::env::var_os("PROBE_NO_SANDBOX").is_some() {
            config = config.with_no_sandbox();
        }
        if let Ok(path) = std::env::var("CHROMIUM_PATH") {
            config = config.with_chromium_path(path);
        }

        let session = Session::launch(config).await?;
        let page = session.open(&translator_url()).await?;

        Ok(Self {
            session,
            page,
            model: TranslatorPage::new(),
            probe: UiProbe::new(),
        })
    }

    /// The probe driving this session
    #[must_use]
    pub const fn probe(&self) -> &UiProbe {
        &self.probe
    }

    /// Resolve the Singlish input field
    pub async fn input_field(&self) -> ProbeResult<CdpField> {
        resolve_visible(&self.page.candidates(self.model.input_candidates())).await
    }

    /// Resolve the Sinhala output field
    pub async fn output_field(&self) -> ProbeResult<CdpField> {
        resolve_visible(&self.page.candidates(self.model.output_candidates())).await
    }

    /// Write `text` into the input and return the observed conversion.
    pub async fn convert(&self, text: &str) -> ProbeResult<String> {
        let input = self.input_field().await?;
        let output = self.output_field().await?;
        self.probe.convert_and_observe(&input, &output, text).await
    }

    /// Read whatever the output field currently shows
    pub async fn read_output(&self) -> ProbeResult<String> {
        Ok(read_value(&self.output_field().await?).await)
    }

    /// Type into the input one character at a time
    pub async fn type_slowly(&self, text: &str, delay: Duration) -> ProbeResult<()> {
        let input = self.input_field().await?;
        self.probe.type_slowly(&input, text, delay).await
    }

    /// Clear the input, preferring the page's own clear control when present
    pub async fn clear(&self) -> ProbeResult<()> {
        let button = self.page.candidate(self.model.clear_button().clone());
        if button.count().await.unwrap_or(0) > 0 {
            button.first().click().await
        } else {
            self.input_field().await?.fill("").await
        }
    }

    /// Capture a PNG of the page for post-mortem diagnostics
    pub async fn screenshot(&self) -> ProbeResult<Vec<u8>> {
        self.page.screenshot().await
    }

    /// Shut the browser down
    pub async fn close(self) -> ProbeResult<()> {
        self.session.close().await
    }
}

/// Open a fresh session, run one conversion, and shut the session down.
///
/// This is the shape almost every functional case wants; keeping sessions
/// test-local is what lets the host runner schedule cases concurrently.
pub async fn convert_once(text: &str) -> ProbeResult<String> {
    let translator = LiveTranslator::open().await?;
    let output = translator.convert(text).await?;
    translator.close().await?;
    Ok(output)
}
