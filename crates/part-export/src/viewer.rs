use holder_types::RenderHint;
use kernel_bridge::KernelSolidHandle;
use tracing::{debug, info};
use uuid::Uuid;

/// Identifier assigned to a solid when it is handed to a viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayId(pub Uuid);

impl DisplayId {
    fn fresh() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Display surface for built solids. Implementations decide what showing
/// means; the pipeline only names things and picks hints.
pub trait Viewer {
    /// Display a solid under a name, with a render hint.
    fn show(&mut self, solid: &KernelSolidHandle, name: &str, hint: RenderHint) -> DisplayId;

    /// Display a debug-only solid. Production viewers may drop these.
    fn show_debug(&mut self, solid: &KernelSolidHandle, name: &str) -> DisplayId;
}

/// Viewer that only logs. The production default: there is no screen to
/// draw on, but the build record should still name what was produced.
#[derive(Debug, Default)]
pub struct LogViewer;

impl Viewer for LogViewer {
    fn show(&mut self, solid: &KernelSolidHandle, name: &str, hint: RenderHint) -> DisplayId {
        let id = DisplayId::fresh();
        info!(?solid, name, alpha = hint.alpha, "show");
        id
    }

    fn show_debug(&mut self, solid: &KernelSolidHandle, name: &str) -> DisplayId {
        let id = DisplayId::fresh();
        debug!(?solid, name, "show (debug)");
        id
    }
}

/// One recorded `show` call.
#[derive(Debug, Clone)]
pub struct ShownSolid {
    pub id: DisplayId,
    pub solid: KernelSolidHandle,
    pub name: String,
    pub hint: RenderHint,
    pub debug: bool,
}

/// Viewer that records every call, for asserting on display behavior.
#[derive(Debug, Default)]
pub struct RecordingViewer {
    pub shown: Vec<ShownSolid>,
}

impl RecordingViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find(&self, name: &str) -> Option<&ShownSolid> {
        self.shown.iter().find(|s| s.name == name)
    }
}

impl Viewer for RecordingViewer {
    fn show(&mut self, solid: &KernelSolidHandle, name: &str, hint: RenderHint) -> DisplayId {
        let id = DisplayId::fresh();
        self.shown.push(ShownSolid {
            id,
            solid: solid.clone(),
            name: name.to_string(),
            hint,
            debug: false,
        });
        id
    }

    fn show_debug(&mut self, solid: &KernelSolidHandle, name: &str) -> DisplayId {
        let id = DisplayId::fresh();
        self.shown.push(ShownSolid {
            id,
            solid: solid.clone(),
            name: name.to_string(),
            hint: RenderHint::default(),
            debug: true,
        });
        id
    }
}
