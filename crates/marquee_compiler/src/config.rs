//! Compiler configuration.

/// What to do when a closing `end` names a different construct.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EndMismatchPolicy {
    /// Record a recoverable error and assume the intended closer was used.
    #[default]
    Recover,
    /// Abort the compilation unit.
    Reject,
}

/// Configuration for a compilation session.
///
/// Controls end-keyword checking, parser stack limits, and tracing.
#[derive(Clone, Debug)]
pub struct CompileOptions {
    /// Policy for mismatched closing keywords.
    pub end_mismatch: EndMismatchPolicy,

    /// Maximum number of parser stack frames before the unit aborts.
    pub max_stack_depth: usize,

    /// Frames reserved up front; the stack grows geometrically from here.
    pub initial_stack_capacity: usize,

    /// Log every shift and reduction at `trace` level.
    pub trace_reductions: bool,

    /// Name used for diagnostics context.
    pub unit_name: Option<String>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            end_mismatch: EndMismatchPolicy::Recover,
            max_stack_depth: 10_000,
            initial_stack_capacity: 200,
            trace_reductions: false,
            unit_name: None,
        }
    }
}

impl CompileOptions {
    /// Creates a configuration that rejects mismatched closing keywords.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            end_mismatch: EndMismatchPolicy::Reject,
            ..Self::default()
        }
    }

    /// Creates a configuration that traces every parser step.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            trace_reductions: true,
            ..Self::default()
        }
    }

    /// Builder method to set the end-mismatch policy.
    #[must_use]
    pub fn with_end_mismatch(mut self, policy: EndMismatchPolicy) -> Self {
        self.end_mismatch = policy;
        self
    }

    /// Builder method to set the maximum stack depth.
    #[must_use]
    pub fn with_max_stack_depth(mut self, depth: usize) -> Self {
        self.max_stack_depth = depth;
        self
    }

    /// Builder method to set the initial stack capacity.
    #[must_use]
    pub fn with_initial_stack_capacity(mut self, capacity: usize) -> Self {
        self.initial_stack_capacity = capacity;
        self
    }

    /// Builder method to enable/disable step tracing.
    #[must_use]
    pub fn with_trace_reductions(mut self, trace: bool) -> Self {
        self.trace_reductions = trace;
        self
    }

    /// Builder method to set the unit name.
    #[must_use]
    pub fn with_unit_name(mut self, name: impl Into<String>) -> Self {
        self.unit_name = Some(name.into());
        self
    }
}
