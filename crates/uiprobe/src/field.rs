//! Element handles and the resolution/read primitives built on them.
//!
//! The two traits here are the seam between probing logic and any concrete
//! page backend: the CDP backend implements them against a live browser, the
//! [`mock`](crate::mock) backend implements them in memory so every property
//! of the resolution and observation logic is testable without chromium.

use async_trait::async_trait;

use crate::result::{ProbeError, ProbeResult};

/// One heuristic guess at an element: zero or more matches on the page.
#[async_trait]
pub trait Candidate: Send + Sync {
    /// The element handle this candidate resolves to
    type Field: Field;

    /// Number of elements currently matching this candidate
    async fn count(&self) -> ProbeResult<usize>;

    /// Handle to the first match. The handle is lazy; it may point at
    /// nothing until the page actually contains a match.
    fn first(&self) -> Self::Field;

    /// Short description for logs
    fn describe(&self) -> String;
}

/// A handle to (at most) one element on a page.
#[async_trait]
pub trait Field: Send + Sync {
    /// Whether the element exists and is rendered visibly
    async fn is_visible(&self) -> ProbeResult<bool>;

    /// Read the form-control value.
    ///
    /// # Errors
    ///
    /// Fails with [`ProbeError::ValueReadError`] when the element is not a
    /// form control (or is missing); callers wanting the lenient read use
    /// [`read_value`].
    async fn input_value(&self) -> ProbeResult<String>;

    /// Read the element's text content, `None` when the element is missing
    async fn text_content(&self) -> ProbeResult<Option<String>>;

    /// Replace the element's content with `text`
    async fn fill(&self, text: &str) -> ProbeResult<()>;

    /// Click the element
    async fn click(&self) -> ProbeResult<()>;
}

/// Resolve a candidate chain to a usable element handle.
///
/// Candidates are tried in priority order; the first one that has at least
/// one match whose first element is visible wins. When nothing in the chain
/// is visible the first candidate's first match is returned anyway — callers
/// always get a handle to probe, at the cost of possibly probing the wrong
/// element when the page's markup has drifted. That degrade path is logged.
///
/// # Errors
///
/// Returns [`ProbeError::NoCandidates`] for an empty chain.
pub async fn resolve_visible<C: Candidate>(candidates: &[C]) -> ProbeResult<C::Field> {
    let Some(fallback) = candidates.first() else {
        return Err(ProbeError::NoCandidates);
    };

    for candidate in candidates {
        match candidate.count().await {
            Ok(0) | Err(_) => continue,
            Ok(_) => {}
        }
        let field = candidate.first();
        if field.is_visible().await.unwrap_or(false) {
            tracing::debug!(candidate = %candidate.describe(), "resolved visible element");
            return Ok(field);
        }
    }

    tracing::warn!(
        candidate = %fallback.describe(),
        "no visible match in candidate chain, degrading to first candidate"
    );
    Ok(fallback.first())
}

/// Read whatever value the element currently presents.
///
/// Tries the form-control value first, falls back to text content, and
/// yields `""` when neither is available. Never fails.
pub async fn read_value<F: Field>(field: &F) -> String {
    match field.input_value().await {
        Ok(value) => value,
        Err(_) => match field.text_content().await {
            Ok(Some(text)) => text,
            _ => String::new(),
        },
    }
}
