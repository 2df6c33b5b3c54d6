//! Browser session control for driving a live page.
//!
//! Real browser control goes through the Chrome DevTools Protocol via
//! chromiumoxide when the `browser` feature is enabled. Probe logic itself
//! never depends on this module; it talks to the [`Candidate`]/[`Field`]
//! traits, which `CdpCandidate`/`CdpField` implement here by evaluating the
//! selector's JavaScript on the page.
//!
//! [`Candidate`]: crate::Candidate
//! [`Field`]: crate::Field

/// Browser configuration
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1280,
            viewport_height: 800,
            chromium_path: None,
            sandbox: true,
        }
    }
}

impl BrowserConfig {
    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }
}

// ============================================================================
// CDP implementation (`browser` feature)
// ============================================================================

#[cfg(feature = "browser")]
mod cdp {
    use std::sync::Arc;

    use async_trait::async_trait;
    use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
    use chromiumoxide::cdp::browser_protocol::page::{
        CaptureScreenshotFormat, CaptureScreenshotParams,
    };
    use chromiumoxide::page::Page as CdpPage;
    use futures::StreamExt;
    use serde::de::DeserializeOwned;
    use tokio::sync::Mutex;

    use super::BrowserConfig;
    use crate::field::{Candidate, Field};
    use crate::result::{ProbeError, ProbeResult};
    use crate::selector::Selector;

    /// A running browser instance
    #[derive(Debug)]
    pub struct Session {
        config: BrowserConfig,
        inner: Arc<Mutex<CdpBrowser>>,
        #[allow(dead_code)]
        handle: tokio::task::JoinHandle<()>,
    }

    impl Session {
        /// Launch a browser.
        ///
        /// # Errors
        ///
        /// Returns [`ProbeError::BrowserLaunchError`] when chromium cannot
        /// be started.
        pub async fn launch(config: BrowserConfig) -> ProbeResult<Self> {
            let mut builder = CdpConfig::builder()
                .window_size(config.viewport_width, config.viewport_height);

            if !config.headless {
                builder = builder.with_head();
            }

            if !config.sandbox {
                builder = builder.no_sandbox();
            }

            if let Some(ref path) = config.chromium_path {
                builder = builder.chrome_executable(path);
            }

            let cdp_config = builder
                .build()
                .map_err(|e| ProbeError::BrowserLaunchError { message: e })?;

            let (browser, mut handler) = CdpBrowser::launch(cdp_config).await.map_err(|e| {
                ProbeError::BrowserLaunchError {
                    message: e.to_string(),
                }
            })?;

            // Drain CDP events until the connection drops.
            let handle = tokio::spawn(async move {
                while let Some(event) = handler.next().await {
                    if event.is_err() {
                        break;
                    }
                }
            });

            tracing::debug!(headless = config.headless, "browser launched");

            Ok(Self {
                config,
                inner: Arc::new(Mutex::new(browser)),
                handle,
            })
        }

        /// Open a page and wait for it to load.
        ///
        /// # Errors
        ///
        /// Returns [`ProbeError::NavigationError`] when the page cannot be
        /// reached or never finishes loading.
        pub async fn open(&self, url: &str) -> ProbeResult<PageHandle> {
            let browser = self.inner.lock().await;
            let page = browser
                .new_page(url)
                .await
                .map_err(|e| ProbeError::NavigationError {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;

            page.wait_for_navigation()
                .await
                .map_err(|e| ProbeError::NavigationError {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;

            // The converter wires its handlers after load; give its scripts
            // a beat before probing.
            tokio::time::sleep(std::time::Duration::from_millis(PAGE_SETTLE_MS)).await;

            tracing::debug!(url, "page opened");

            Ok(PageHandle {
                inner: Arc::new(Mutex::new(page)),
                url: url.to_string(),
            })
        }

        /// Get the browser configuration
        #[must_use]
        pub const fn config(&self) -> &BrowserConfig {
            &self.config
        }

        /// Close the browser.
        pub async fn close(self) -> ProbeResult<()> {
            let mut browser = self.inner.lock().await;
            browser
                .close()
                .await
                .map_err(|e| ProbeError::BrowserLaunchError {
                    message: e.to_string(),
                })?;
            Ok(())
        }
    }

    /// Grace period after the load event, in milliseconds
    const PAGE_SETTLE_MS: u64 = 500;

    /// A live page
    #[derive(Debug, Clone)]
    pub struct PageHandle {
        inner: Arc<Mutex<CdpPage>>,
        url: String,
    }

    impl PageHandle {
        /// Current URL
        #[must_use]
        pub fn url(&self) -> &str {
            &self.url
        }

        /// A candidate bound to this page
        #[must_use]
        pub fn candidate(&self, selector: Selector) -> CdpCandidate {
            CdpCandidate {
                page: Arc::clone(&self.inner),
                selector,
            }
        }

        /// Candidates for a whole selector chain, in chain order
        #[must_use]
        pub fn candidates(&self, selectors: &[Selector]) -> Vec<CdpCandidate> {
            selectors
                .iter()
                .cloned()
                .map(|selector| self.candidate(selector))
                .collect()
        }

        /// Capture a PNG screenshot (failure diagnostics).
        ///
        /// # Errors
        ///
        /// Returns [`ProbeError::ScreenshotError`] when capture or decoding
        /// fails.
        pub async fn screenshot(&self) -> ProbeResult<Vec<u8>> {
            let page = self.inner.lock().await;
            let params = CaptureScreenshotParams::builder()
                .format(CaptureScreenshotFormat::Png)
                .build();

            let screenshot =
                page.execute(params)
                    .await
                    .map_err(|e| ProbeError::ScreenshotError {
                        message: e.to_string(),
                    })?;

            use base64::Engine;
            base64::engine::general_purpose::STANDARD
                .decode(&screenshot.data)
                .map_err(|e| ProbeError::ScreenshotError {
                    message: e.to_string(),
                })
        }
    }

    async fn eval<T: DeserializeOwned>(page: &Arc<Mutex<CdpPage>>, expr: String) -> ProbeResult<T> {
        let page = page.lock().await;
        let result = page
            .evaluate(expr)
            .await
            .map_err(|e| ProbeError::PageError {
                message: e.to_string(),
            })?;
        result.into_value().map_err(|e| ProbeError::PageError {
            message: e.to_string(),
        })
    }

    /// A selector bound to a live page
    #[derive(Debug, Clone)]
    pub struct CdpCandidate {
        page: Arc<Mutex<CdpPage>>,
        selector: Selector,
    }

    #[async_trait]
    impl Candidate for CdpCandidate {
        type Field = CdpField;

        async fn count(&self) -> ProbeResult<usize> {
            eval(&self.page, self.selector.to_count_expr()).await
        }

        fn first(&self) -> CdpField {
            CdpField {
                page: Arc::clone(&self.page),
                selector: self.selector.clone(),
            }
        }

        fn describe(&self) -> String {
            self.selector.describe()
        }
    }

    /// The first match of a selector on a live page
    #[derive(Debug, Clone)]
    pub struct CdpField {
        page: Arc<Mutex<CdpPage>>,
        selector: Selector,
    }

    #[async_trait]
    impl Field for CdpField {
        async fn is_visible(&self) -> ProbeResult<bool> {
            let expr = format!(
                "(() => {{ const el = {pick}; if (!el) return false; \
                 const rect = el.getBoundingClientRect(); \
                 const style = window.getComputedStyle(el); \
                 return rect.width > 0 && rect.height > 0 && \
                 style.visibility !== 'hidden' && style.display !== 'none'; }})()",
                pick = self.selector.to_pick_expr()
            );
            eval(&self.page, expr).await
        }

        async fn input_value(&self) -> ProbeResult<String> {
            let expr = format!(
                "(() => {{ const el = {pick}; \
                 if (!el || !('value' in el)) return null; \
                 return String(el.value); }})()",
                pick = self.selector.to_pick_expr()
            );
            let value: Option<String> = eval(&self.page, expr).await?;
            value.ok_or_else(|| ProbeError::ValueReadError {
                message: format!("{} is not a form control", self.selector.describe()),
            })
        }

        async fn text_content(&self) -> ProbeResult<Option<String>> {
            let expr = format!(
                "(() => {{ const el = {pick}; return el ? el.textContent : null; }})()",
                pick = self.selector.to_pick_expr()
            );
            eval(&self.page, expr).await
        }

        async fn fill(&self, text: &str) -> ProbeResult<()> {
            // Write through the prototype's value setter and dispatch input
            // events, so framework-managed pages observe the change.
            let expr = format!(
                "(() => {{ const el = {pick}; if (!el) return false; \
                 el.focus(); \
                 const proto = el.tagName === 'TEXTAREA' ? HTMLTextAreaElement.prototype : HTMLInputElement.prototype; \
                 const desc = Object.getOwnPropertyDescriptor(proto, 'value'); \
                 if (desc && desc.set) {{ desc.set.call(el, {text:?}); }} else {{ el.value = {text:?}; }} \
                 el.dispatchEvent(new Event('input', {{ bubbles: true }})); \
                 el.dispatchEvent(new Event('change', {{ bubbles: true }})); \
                 return true; }})()",
                pick = self.selector.to_pick_expr()
            );
            let filled: bool = eval(&self.page, expr).await?;
            if filled {
                Ok(())
            } else {
                Err(ProbeError::InputError {
                    message: format!("{} matched no element", self.selector.describe()),
                })
            }
        }

        async fn click(&self) -> ProbeResult<()> {
            let expr = format!(
                "(() => {{ const el = {pick}; if (!el) return false; el.click(); return true; }})()",
                pick = self.selector.to_pick_expr()
            );
            let clicked: bool = eval(&self.page, expr).await?;
            if clicked {
                Ok(())
            } else {
                Err(ProbeError::InputError {
                    message: format!("{} matched no element", self.selector.describe()),
                })
            }
        }
    }
}

#[cfg(feature = "browser")]
pub use cdp::{CdpCandidate, CdpField, PageHandle, Session};
