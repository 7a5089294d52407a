use kernel_bridge::KernelSolidHandle;

/// Result of a single validated modeling step.
#[derive(Debug, Clone)]
pub struct StepResult {
    /// Handle to the produced solid. The input handle is superseded.
    pub handle: KernelSolidHandle,
    /// Non-fatal warnings and timing information.
    pub diagnostics: Diagnostics,
}

impl StepResult {
    pub fn new(handle: KernelSolidHandle) -> Self {
        Self {
            handle,
            diagnostics: Diagnostics::default(),
        }
    }
}

/// Non-fatal diagnostics from an operation.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Time spent inside the kernel, in milliseconds.
    pub kernel_time_ms: f64,
}

/// Errors from modeling operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum OpError {
    #[error("kernel error: {0}")]
    Kernel(#[from] kernel_bridge::KernelError),

    #[error("invalid parameter: {reason}")]
    InvalidParameter { reason: String },

    #[error("selection matched nothing: {query}")]
    EmptySelection { query: String },

    #[error("selection for {query} expected one entity, matched {count}")]
    AmbiguousSelection { query: String, count: usize },
}
