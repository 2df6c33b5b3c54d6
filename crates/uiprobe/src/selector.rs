//! Selection heuristics for locating page elements.
//!
//! A [`Selector`] is one heuristic guess at an element: a CSS id, a
//! placeholder substring, a labeled container, a positional index, or a
//! fuzzy button label. Selectors compile to JavaScript expressions that the
//! browser backend evaluates; candidate chains (ordered slices of selectors)
//! are resolved by [`resolve_visible`](crate::resolve_visible).

/// Selector for locating elements on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// CSS selector (e.g. `#singlish`)
    Css(String),
    /// Element of `tag` whose placeholder contains `needle`, case-insensitive
    PlaceholderContains {
        /// Tag to scan (e.g. `textarea`)
        tag: String,
        /// Placeholder substring to match
        needle: String,
    },
    /// First `control` nested under a `div` whose text mentions `label`
    LabeledControl {
        /// Label text identifying the container
        label: String,
        /// CSS selector for the control inside it
        control: String,
    },
    /// The n-th match of a CSS selector (zero-based)
    Nth {
        /// Base CSS selector
        css: String,
        /// Zero-based index into the match list
        index: usize,
    },
    /// Button-like element whose visible label contains `name`, case-insensitive
    ButtonLabeled {
        /// Label substring to match
        name: String,
    },
}

/// Elements treated as buttons by [`Selector::ButtonLabeled`]
const BUTTON_QUERY: &str = r#"button, [role="button"], input[type="button"], input[type="submit"]"#;

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create a placeholder-substring selector
    #[must_use]
    pub fn placeholder_contains(tag: impl Into<String>, needle: impl Into<String>) -> Self {
        Self::PlaceholderContains {
            tag: tag.into(),
            needle: needle.into(),
        }
    }

    /// Create a labeled-container selector
    #[must_use]
    pub fn labeled_control(label: impl Into<String>, control: impl Into<String>) -> Self {
        Self::LabeledControl {
            label: label.into(),
            control: control.into(),
        }
    }

    /// Create a positional selector
    #[must_use]
    pub fn nth(css: impl Into<String>, index: usize) -> Self {
        Self::Nth {
            css: css.into(),
            index,
        }
    }

    /// Create a fuzzy button-label selector
    #[must_use]
    pub fn button_labeled(name: impl Into<String>) -> Self {
        Self::ButtonLabeled { name: name.into() }
    }

    /// JavaScript expression evaluating to the first matching element or `null`
    #[must_use]
    pub fn to_pick_expr(&self) -> String {
        match self {
            Self::Css(css) => format!("document.querySelector({css:?})"),
            Self::PlaceholderContains { tag, needle } => {
                let needle = needle.to_lowercase();
                format!(
                    "(Array.from(document.querySelectorAll({tag:?})).find(el => \
                     (el.getAttribute('placeholder') || '').toLowerCase().includes({needle:?})) || null)"
                )
            }
            Self::LabeledControl { label, control } => format!(
                "(() => {{ \
                 const scopes = Array.from(document.querySelectorAll('div')).filter(d => d.textContent.includes({label:?})); \
                 for (const scope of scopes) {{ const hit = scope.querySelector({control:?}); if (hit) return hit; }} \
                 return null; }})()"
            ),
            Self::Nth { css, index } => {
                format!("(document.querySelectorAll({css:?})[{index}] || null)")
            }
            Self::ButtonLabeled { name } => {
                let name = name.to_lowercase();
                format!(
                    "(Array.from(document.querySelectorAll({BUTTON_QUERY:?})).find(el => \
                     ((el.textContent || '') + ' ' + (el.value || '')).toLowerCase().includes({name:?})) || null)"
                )
            }
        }
    }

    /// JavaScript expression evaluating to the number of matches
    #[must_use]
    pub fn to_count_expr(&self) -> String {
        match self {
            Self::Css(css) => format!("document.querySelectorAll({css:?}).length"),
            Self::PlaceholderContains { tag, needle } => {
                let needle = needle.to_lowercase();
                format!(
                    "Array.from(document.querySelectorAll({tag:?})).filter(el => \
                     (el.getAttribute('placeholder') || '').toLowerCase().includes({needle:?})).length"
                )
            }
            Self::LabeledControl { label, control } => format!(
                "Array.from(document.querySelectorAll('div')).filter(d => \
                 d.textContent.includes({label:?})).filter(d => d.querySelector({control:?})).length"
            ),
            // Positional selection matches exactly one element, or nothing.
            Self::Nth { css, index } => {
                format!("(document.querySelectorAll({css:?}).length > {index} ? 1 : 0)")
            }
            Self::ButtonLabeled { name } => {
                let name = name.to_lowercase();
                format!(
                    "Array.from(document.querySelectorAll({BUTTON_QUERY:?})).filter(el => \
                     ((el.textContent || '') + ' ' + (el.value || '')).toLowerCase().includes({name:?})).length"
                )
            }
        }
    }

    /// Short human-readable form for logs and error messages
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Css(css) => format!("css({css})"),
            Self::PlaceholderContains { tag, needle } => {
                format!("placeholder({tag}, *{needle}*)")
            }
            Self::LabeledControl { label, control } => format!("labeled({label} > {control})"),
            Self::Nth { css, index } => format!("nth({css}, {index})"),
            Self::ButtonLabeled { name } => format!("button(*{name}*)"),
        }
    }
}
