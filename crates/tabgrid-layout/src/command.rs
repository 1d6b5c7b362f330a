//! Host commands.
//!
//! The host drives a container with a small JSON vocabulary:
//!
//! ```json
//! [
//!   {"op": "set_layout", "layout": "TRIPLE_VERT_LEFT"},
//!   {"op": "resize", "width": 1000, "height": 800},
//!   {"op": "drag", "separator": 3, "dx": 120}
//! ]
//! ```
//!
//! `layout` accepts the integer host code or the layout name. Unknown values
//! select `SINGLE` rather than failing.

use serde::{Deserialize, Serialize};
use tabgrid_core::Size;

use crate::container::{Container, DragOutcome, LayoutChange, ResizeOutcome};
use crate::error::Result;
use crate::region::RegionId;
use crate::template::{LayoutId, resolve_code, resolve_name};

/// A layout selector as sent by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LayoutRequest {
    Code(i64),
    Name(String),
}

impl LayoutRequest {
    /// Resolve to a layout, falling back to `SINGLE`.
    #[must_use]
    pub fn resolve(&self) -> LayoutId {
        match self {
            Self::Code(code) => resolve_code(*code),
            Self::Name(name) => resolve_name(name),
        }
    }
}

impl From<LayoutId> for LayoutRequest {
    fn from(id: LayoutId) -> Self {
        Self::Name(id.name().to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum HostCommand {
    SetLayout {
        layout: LayoutRequest,
    },
    Resize {
        width: f64,
        height: f64,
    },
    /// One pointer-move event over a separator.
    Drag {
        separator: RegionId,
        #[serde(default)]
        dx: i32,
        #[serde(default)]
        dy: i32,
    },
}

impl HostCommand {
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }
}

/// Parse a JSON array of commands.
pub fn parse_script(input: &str) -> Result<Vec<HostCommand>> {
    Ok(serde_json::from_str(input)?)
}

/// What applying one [`HostCommand`] did.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CommandOutcome {
    Layout(LayoutChange),
    Resize(ResizeOutcome),
    Drag(DragOutcome),
}

impl Container {
    pub fn apply(&mut self, command: &HostCommand) -> Result<CommandOutcome> {
        Ok(match command {
            HostCommand::SetLayout { layout } => {
                CommandOutcome::Layout(self.set_layout(layout.resolve()))
            }
            HostCommand::Resize { width, height } => {
                CommandOutcome::Resize(self.resize(Size::new(*width, *height)))
            }
            HostCommand::Drag { separator, dx, dy } => {
                CommandOutcome::Drag(self.pointer_drag(*separator, *dx, *dy)?)
            }
        })
    }
}
