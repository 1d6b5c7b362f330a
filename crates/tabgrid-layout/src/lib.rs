#![forbid(unsafe_code)]

//! Resizable multi-pane layouts for tabbed charting workspaces.
//!
//! A [`Container`] realises one of 17 [`LayoutId`] templates as a flat list
//! of panes and separators with flex fractions, lays them out in pixels on
//! [`Container::resize`], and moves whole groups of regions when a separator
//! is dragged. Chart surfaces implement [`ContentSurface`] and survive layout
//! switches in positional order.
//!
//! ```
//! use tabgrid_core::{PixelRect, Size};
//! use tabgrid_layout::{Container, EngineConfig, LayoutId};
//!
//! let mut tab = Container::new(EngineConfig::default());
//! tab.set_layout(LayoutId::DoubleVert);
//! tab.resize(Size::from((1000, 800)));
//! assert_eq!(
//!     tab.pane_rects(),
//!     vec![PixelRect::new(0, 0, 499, 800), PixelRect::new(501, 0, 499, 800)]
//! );
//! ```

pub mod binding;
pub mod command;
pub mod config;
pub mod container;
pub mod error;
pub mod region;
pub mod template;
pub mod workspace;

pub use binding::{ContentSurface, PaneSlots, RehostSummary};
pub use command::{CommandOutcome, HostCommand, LayoutRequest, parse_script};
pub use config::{ConfigError, EngineConfig, MIN_FRAME_HEIGHT, MIN_FRAME_WIDTH, SEPARATOR_PX};
pub use container::{
    Container, DragIgnoredReason, DragOutcome, DragSide, LayoutChange, RectKind, RegionRect,
    ResizeOutcome,
};
pub use error::{LayoutError, Result};
pub use region::{RegionId, RegionKind, RegionNode};
pub use template::{
    FLEX_EPSILON, LayoutId, LayoutIssue, LayoutTemplate, Placement, check_invariants, instantiate,
    instantiate_code, resolve_code, resolve_name,
};
pub use workspace::{ActiveSelection, ContainerId, Workspace};
