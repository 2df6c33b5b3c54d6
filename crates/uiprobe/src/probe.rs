//! Bounded observation of asynchronous UI updates.
//!
//! The page under test converts input as the user types; there is no event
//! to await, only a value to watch. [`UiProbe`] captures a baseline, writes
//! the input, and polls the output at a fixed interval until it diverges
//! from the baseline (or empties, for blank input) or a wall-clock deadline
//! passes. The deadline is the only failure mode: a slow site, a down site,
//! and drifted markup all surface as [`ProbeError::PollTimeout`].

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::field::{read_value, Field};
use crate::result::{ProbeError, ProbeResult};

/// Default observation deadline (10 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Default polling interval (100ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Default settle delay between clearing and writing the input (100ms)
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 100;

/// Timing options for probe operations
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProbeOptions {
    /// Observation deadline in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
    /// Settle delay in milliseconds
    pub settle_delay_ms: u64,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
        }
    }
}

impl ProbeOptions {
    /// Create options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the observation deadline in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set the polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Set the settle delay in milliseconds
    #[must_use]
    pub const fn with_settle_delay(mut self, settle_delay_ms: u64) -> Self {
        self.settle_delay_ms = settle_delay_ms;
        self
    }

    /// Deadline as a Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Polling interval as a Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Settle delay as a Duration
    #[must_use]
    pub const fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

/// Writes into an input field and observes the resulting output update.
#[derive(Debug, Clone, Default)]
pub struct UiProbe {
    options: ProbeOptions,
}

impl UiProbe {
    /// Create a probe with default timing
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a probe with custom timing
    #[must_use]
    pub const fn with_options(options: ProbeOptions) -> Self {
        Self { options }
    }

    /// Get the timing options
    #[must_use]
    pub const fn options(&self) -> &ProbeOptions {
        &self.options
    }

    /// Write `text` into `input` and return the converted value observed in
    /// `output`.
    ///
    /// Success is driven by change detection against the baseline captured
    /// before the write, not by value equality: an output that already holds
    /// the expected conversion will time out, because nothing ever diverges
    /// from the baseline. Blank input instead waits for the output to empty.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::PollTimeout`] when the output never satisfies
    /// the observation condition within the deadline.
    pub async fn convert_and_observe<F: Field>(
        &self,
        input: &F,
        output: &F,
        text: &str,
    ) -> ProbeResult<String> {
        let baseline = read_value(output).await;
        tracing::debug!(baseline = %baseline, chars = text.chars().count(), "writing input");

        input.fill("").await?;
        tokio::time::sleep(self.options.settle_delay()).await;
        input.fill(text).await?;

        if text.trim().is_empty() {
            self.poll_until_empty(output).await?;
            Ok(String::new())
        } else {
            self.poll_until_changed(output, &baseline).await
        }
    }

    /// Poll `output` until its value differs from `baseline`.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::PollTimeout`] when the deadline passes first.
    pub async fn poll_until_changed<F: Field>(
        &self,
        output: &F,
        baseline: &str,
    ) -> ProbeResult<String> {
        let start = Instant::now();
        loop {
            let value = read_value(output).await;
            if value != baseline {
                tracing::debug!(
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "output diverged from baseline"
                );
                return Ok(value);
            }
            if start.elapsed() >= self.options.timeout() {
                return Err(ProbeError::PollTimeout {
                    ms: self.options.timeout_ms,
                });
            }
            tokio::time::sleep(self.options.poll_interval()).await;
        }
    }

    /// Poll `output` until it reads exactly empty.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::PollTimeout`] when the deadline passes first.
    pub async fn poll_until_empty<F: Field>(&self, output: &F) -> ProbeResult<()> {
        let start = Instant::now();
        loop {
            if read_value(output).await.is_empty() {
                return Ok(());
            }
            if start.elapsed() >= self.options.timeout() {
                return Err(ProbeError::PollTimeout {
                    ms: self.options.timeout_ms,
                });
            }
            tokio::time::sleep(self.options.poll_interval()).await;
        }
    }

    /// Write `text` one character at a time, pausing `delay` between
    /// keystrokes so a real-time converter is observed mid-typing.
    ///
    /// # Errors
    ///
    /// Propagates the first write failure.
    pub async fn type_slowly<F: Field>(
        &self,
        input: &F,
        text: &str,
        delay: Duration,
    ) -> ProbeResult<()> {
        let mut typed = String::with_capacity(text.len());
        for ch in text.chars() {
            typed.push(ch);
            input.fill(&typed).await?;
            tokio::time::sleep(delay).await;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockField, MockTranslator};

    fn fast_probe() -> UiProbe {
        UiProbe::with_options(
            ProbeOptions::new()
                .with_timeout(250)
                .with_poll_interval(20)
                .with_settle_delay(5),
        )
    }

    fn shouting(text: &str) -> String {
        if text.trim().is_empty() {
            String::new()
        } else {
            text.to_uppercase()
        }
    }

    mod options_tests {
        use super::*;

        #[test]
        fn test_default_constants() {
            let options = ProbeOptions::default();
            assert_eq!(options.timeout_ms, 10_000);
            assert_eq!(options.poll_interval_ms, 100);
            assert_eq!(options.settle_delay_ms, 100);
        }

        #[test]
        fn test_builder_chain() {
            let options = ProbeOptions::new()
                .with_timeout(2_000)
                .with_poll_interval(50)
                .with_settle_delay(10);
            assert_eq!(options.timeout(), Duration::from_millis(2_000));
            assert_eq!(options.poll_interval(), Duration::from_millis(50));
            assert_eq!(options.settle_delay(), Duration::from_millis(10));
        }
    }

    mod convert_tests {
        use super::*;

        #[tokio::test]
        async fn test_nonempty_input_returns_changed_output() {
            let page = MockTranslator::converting(shouting);
            let output = fast_probe()
                .convert_and_observe(&page.input, &page.output, "mama gedhara yanavaa")
                .await
                .unwrap();
            assert_eq!(output, "MAMA GEDHARA YANAVAA");
            assert_ne!(output, "");
        }

        #[tokio::test]
        async fn test_unresponsive_output_times_out() {
            let page = MockTranslator::inert().with_output("පැරණි");
            let err = fast_probe()
                .convert_and_observe(&page.input, &page.output, "aluth")
                .await
                .unwrap_err();
            assert!(err.is_poll_timeout());
        }

        #[tokio::test]
        async fn test_empty_input_waits_for_empty_output() {
            let page = MockTranslator::converting(shouting).with_output("පැරණි");
            let output = fast_probe()
                .convert_and_observe(&page.input, &page.output, "")
                .await
                .unwrap();
            assert_eq!(output, "");
        }

        #[tokio::test]
        async fn test_whitespace_input_counts_as_empty() {
            let page = MockTranslator::converting(shouting).with_output("පැරණි");
            let output = fast_probe()
                .convert_and_observe(&page.input, &page.output, "   ")
                .await
                .unwrap();
            assert_eq!(output, "");
        }

        #[tokio::test]
        async fn test_empty_input_times_out_when_output_never_clears() {
            let page = MockTranslator::inert().with_output("හිරවුනා");
            let err = fast_probe()
                .convert_and_observe(&page.input, &page.output, "")
                .await
                .unwrap_err();
            assert!(err.is_poll_timeout());
        }

        #[tokio::test]
        async fn test_repeat_conversion_times_out_on_unchanged_baseline() {
            // Change detection, not value equality: the second conversion of
            // the same text finds the output already at its final value and
            // never observes a divergence.
            let page = MockTranslator::converting(shouting);
            let probe = fast_probe();
            let first = probe
                .convert_and_observe(&page.input, &page.output, "hari hari")
                .await
                .unwrap();
            assert_eq!(first, "HARI HARI");

            let err = probe
                .convert_and_observe(&page.input, &page.output, "hari hari")
                .await
                .unwrap_err();
            assert!(err.is_poll_timeout());
        }
    }

    mod poll_tests {
        use super::*;

        #[tokio::test]
        async fn test_poll_until_changed_sees_immediate_divergence() {
            let field = MockField::input_with_value(true, "already different");
            let value = fast_probe()
                .poll_until_changed(&field, "baseline")
                .await
                .unwrap();
            assert_eq!(value, "already different");
        }

        #[tokio::test]
        async fn test_poll_until_changed_times_out_on_stable_value() {
            let field = MockField::input_with_value(true, "stable");
            let err = fast_probe()
                .poll_until_changed(&field, "stable")
                .await
                .unwrap_err();
            assert!(matches!(err, ProbeError::PollTimeout { ms: 250 }));
        }

        #[tokio::test]
        async fn test_poll_until_empty_on_already_empty_field() {
            let field = MockField::input(true);
            assert!(fast_probe().poll_until_empty(&field).await.is_ok());
        }
    }

    mod typing_tests {
        use super::*;

        #[tokio::test]
        async fn test_type_slowly_builds_up_the_input() {
            let page = MockTranslator::converting(shouting);
            fast_probe()
                .type_slowly(&page.input, "mama", Duration::from_millis(1))
                .await
                .unwrap();
            assert_eq!(read_value(&page.input).await, "mama");
            assert_eq!(read_value(&page.output).await, "MAMA");
        }
    }
}
