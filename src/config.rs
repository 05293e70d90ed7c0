//! Generator configuration
//!
//! One [`GenConfig`] is shared by every emitter of a run. The CLI builds it from its flags; library users build
//! it with the `with_*` methods.

/// Generator configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenConfig {
    /// Only emit records of this component (`defs`, `enums`, `compat-ids`); required by `iface`
    pub component: Option<String>,
    /// Run the wording linter on emitted diagnostics
    pub verify_wording: bool,
    /// Prefix outputs with a generated-file banner
    pub emit_header: bool,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            component: None,
            verify_wording: true,
            emit_header: true,
        }
    }
}

impl GenConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict output to one component
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Enable or disable the wording linter
    pub fn with_verify_wording(mut self, verify: bool) -> Self {
        self.verify_wording = verify;
        self
    }

    /// Enable or disable the generated-file banner
    pub fn with_header(mut self, emit: bool) -> Self {
        self.emit_header = emit;
        self
    }

    /// The component filter; an empty name means no filter.
    pub fn component_filter(&self) -> Option<&str> {
        self.component.as_deref().filter(|c| !c.is_empty())
    }

    /// Whether a record of `component` passes the component filter.
    pub fn includes(&self, component: &str) -> bool {
        self.component_filter().is_none_or(|wanted| wanted == component)
    }
}
