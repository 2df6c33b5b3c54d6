//! uiprobe: resilient probing of a live web UI.
//!
//! Built for end-to-end suites that drive a third-party page they do not
//! control: elements are located through ordered fallback chains of
//! selection heuristics, values are read with a lenient dual strategy, and
//! asynchronous UI updates are observed by bounded change-detection polling
//! rather than event hooks.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Selector chain ──► resolve_visible ──► Field handle         │
//! │                                            │                 │
//! │  UiProbe::convert_and_observe:             ▼                 │
//! │    baseline ─ clear ─ settle ─ write ─ poll until changed    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The [`Candidate`]/[`Field`] traits are the backend seam: the `browser`
//! feature provides a Chrome DevTools Protocol implementation
//! (chromiumoxide), and [`mock`] provides an in-memory one so the probing
//! contract is testable without a browser.

#![warn(missing_docs)]

mod browser;
mod field;
/// In-memory backend for testing probe logic without a browser
pub mod mock;
mod probe;
mod result;
mod selector;

pub use browser::BrowserConfig;
#[cfg(feature = "browser")]
pub use browser::{CdpCandidate, CdpField, PageHandle, Session};
pub use field::{read_value, resolve_visible, Candidate, Field};
pub use probe::{
    ProbeOptions, UiProbe, DEFAULT_POLL_INTERVAL_MS, DEFAULT_SETTLE_DELAY_MS, DEFAULT_TIMEOUT_MS,
};
pub use result::{ProbeError, ProbeResult};
pub use selector::Selector;
