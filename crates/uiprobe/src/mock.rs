//! In-memory page backend for testing probe logic without a browser.
//!
//! [`MockField`] stands in for a page element: it has a visibility flag, a
//! kind (form control, text node, or inert), and shared string state so two
//! handles can observe the same element. [`MockTranslator`] wires an input
//! and an output field together the way the real page does — filling the
//! input rewrites the output through a transform.

use std::fmt;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::field::{Candidate, Field};
use crate::result::{ProbeError, ProbeResult};

type Transform = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// What kind of element a [`MockField`] pretends to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MockKind {
    /// A form control: value reads and writes succeed
    Input,
    /// A text node: value reads fail, text content succeeds
    Text,
    /// Neither value nor text is available
    Inert,
}

/// A fake element handle with shared state
#[derive(Clone)]
pub struct MockField {
    visible: bool,
    kind: MockKind,
    value: Arc<Mutex<String>>,
    link: Option<(Arc<Mutex<String>>, Transform)>,
}

impl fmt::Debug for MockField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockField")
            .field("visible", &self.visible)
            .field("kind", &self.kind)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

impl MockField {
    fn new(visible: bool, kind: MockKind, value: impl Into<String>) -> Self {
        Self {
            visible,
            kind,
            value: Arc::new(Mutex::new(value.into())),
            link: None,
        }
    }

    /// An empty form control
    #[must_use]
    pub fn input(visible: bool) -> Self {
        Self::new(visible, MockKind::Input, "")
    }

    /// A form control holding `value`
    #[must_use]
    pub fn input_with_value(visible: bool, value: impl Into<String>) -> Self {
        Self::new(visible, MockKind::Input, value)
    }

    /// A text node holding `content`
    #[must_use]
    pub fn text(visible: bool, content: impl Into<String>) -> Self {
        Self::new(visible, MockKind::Text, content)
    }

    /// An element exposing neither value nor text
    #[must_use]
    pub fn inert(visible: bool) -> Self {
        Self::new(visible, MockKind::Inert, "")
    }

    fn with_shared_value(mut self, store: Arc<Mutex<String>>) -> Self {
        self.value = store;
        self
    }

    fn with_fill_link(mut self, store: Arc<Mutex<String>>, transform: Transform) -> Self {
        self.link = Some((store, transform));
        self
    }

    fn current(&self) -> String {
        self.value.lock().unwrap().clone()
    }
}

#[async_trait]
impl Field for MockField {
    async fn is_visible(&self) -> ProbeResult<bool> {
        Ok(self.visible)
    }

    async fn input_value(&self) -> ProbeResult<String> {
        match self.kind {
            MockKind::Input => Ok(self.current()),
            MockKind::Text | MockKind::Inert => Err(ProbeError::ValueReadError {
                message: "element is not a form control".to_string(),
            }),
        }
    }

    async fn text_content(&self) -> ProbeResult<Option<String>> {
        match self.kind {
            MockKind::Input | MockKind::Text => Ok(Some(self.current())),
            MockKind::Inert => Ok(None),
        }
    }

    async fn fill(&self, text: &str) -> ProbeResult<()> {
        match self.kind {
            MockKind::Input => {
                *self.value.lock().unwrap() = text.to_string();
                if let Some((store, transform)) = &self.link {
                    *store.lock().unwrap() = transform(text);
                }
                Ok(())
            }
            MockKind::Text | MockKind::Inert => Err(ProbeError::InputError {
                message: "element is not fillable".to_string(),
            }),
        }
    }

    async fn click(&self) -> ProbeResult<()> {
        Ok(())
    }
}

/// A fake candidate: a fixed match count and the field its first match is
#[derive(Debug, Clone)]
pub struct MockCandidate {
    matches: Option<usize>,
    field: MockField,
}

impl MockCandidate {
    /// A candidate with `matches` matches whose first match is `field`
    #[must_use]
    pub fn new(matches: usize, field: MockField) -> Self {
        Self {
            matches: Some(matches),
            field,
        }
    }

    /// A candidate whose count query fails
    #[must_use]
    pub fn failing(field: MockField) -> Self {
        Self {
            matches: None,
            field,
        }
    }
}

#[async_trait]
impl Candidate for MockCandidate {
    type Field = MockField;

    async fn count(&self) -> ProbeResult<usize> {
        self.matches.ok_or_else(|| ProbeError::PageError {
            message: "count query failed".to_string(),
        })
    }

    fn first(&self) -> MockField {
        self.field.clone()
    }

    fn describe(&self) -> String {
        match self.matches {
            Some(n) => format!("mock({n} matches)"),
            None => "mock(failing)".to_string(),
        }
    }
}

/// An input/output field pair that behaves like the real converter page
#[derive(Debug)]
pub struct MockTranslator {
    /// The fillable input field
    pub input: MockField,
    /// The output field the conversion lands in
    pub output: MockField,
}

impl MockTranslator {
    /// A page whose output is `transform(input)` immediately after each fill
    pub fn converting<F>(transform: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        let store = Arc::new(Mutex::new(String::new()));
        let output = MockField::input(true).with_shared_value(Arc::clone(&store));
        let input = MockField::input(true).with_fill_link(store, Arc::new(transform));
        Self { input, output }
    }

    /// A page whose output never reacts to the input
    #[must_use]
    pub fn inert() -> Self {
        let store = Arc::new(Mutex::new(String::new()));
        let output = MockField::input(true).with_shared_value(store);
        let input = MockField::input(true);
        Self { input, output }
    }

    /// Preset the output field, as if a previous conversion had run
    #[must_use]
    pub fn with_output(self, value: impl Into<String>) -> Self {
        *self.output.value.lock().unwrap() = value.into();
        self
    }
}
