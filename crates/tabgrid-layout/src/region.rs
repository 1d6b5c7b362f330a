//! Region nodes: the panes and separators of one container.
//!
//! Nodes live in a flat arena owned by the container and are addressed by
//! [`RegionId`] (their index). Both kinds carry a `flex_width` and a
//! `flex_height`, each a share of the whole container. A separator's own
//! drag axis has a flex of 0; it is drawn at a fixed pixel thickness.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tabgrid_core::{Axis, Fraction, Orientation};

/// Arena index of a region within one container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(u16);

impl RegionId {
    #[must_use]
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }

    /// Position in the owning node list.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// Node payload variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegionKind {
    /// A leaf hosting one chart surface. `frame` is the pane's position in
    /// the template's placement order.
    Pane { frame: usize },
    /// A splitter. Dragging it by a positive delta grows every region in
    /// `positive` and shrinks every region in `negative` by the same flex.
    Separator {
        orientation: Orientation,
        positive: BTreeSet<RegionId>,
        negative: BTreeSet<RegionId>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionNode {
    pub id: RegionId,
    #[serde(flatten)]
    pub kind: RegionKind,
    pub flex_width: Fraction,
    pub flex_height: Fraction,
}

impl RegionNode {
    /// Construct a pane node.
    #[must_use]
    pub fn pane(id: RegionId, frame: usize, flex_width: Fraction, flex_height: Fraction) -> Self {
        Self {
            id,
            kind: RegionKind::Pane { frame },
            flex_width,
            flex_height,
        }
    }

    /// Construct a separator node.
    #[must_use]
    pub fn separator(
        id: RegionId,
        orientation: Orientation,
        flex_width: Fraction,
        flex_height: Fraction,
        positive: BTreeSet<RegionId>,
        negative: BTreeSet<RegionId>,
    ) -> Self {
        Self {
            id,
            kind: RegionKind::Separator {
                orientation,
                positive,
                negative,
            },
            flex_width,
            flex_height,
        }
    }

    #[must_use]
    pub fn is_pane(&self) -> bool {
        matches!(self.kind, RegionKind::Pane { .. })
    }

    #[must_use]
    pub fn is_separator(&self) -> bool {
        matches!(self.kind, RegionKind::Separator { .. })
    }

    /// Drag orientation; `Orientation::None` for panes.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        match self.kind {
            RegionKind::Pane { .. } => Orientation::None,
            RegionKind::Separator { orientation, .. } => orientation,
        }
    }

    /// Placement-order index of a pane.
    #[must_use]
    pub fn frame(&self) -> Option<usize> {
        match self.kind {
            RegionKind::Pane { frame } => Some(frame),
            RegionKind::Separator { .. } => None,
        }
    }

    /// `(positive, negative)` groups of a separator.
    #[must_use]
    pub fn groups(&self) -> Option<(&BTreeSet<RegionId>, &BTreeSet<RegionId>)> {
        match &self.kind {
            RegionKind::Pane { .. } => None,
            RegionKind::Separator {
                positive, negative, ..
            } => Some((positive, negative)),
        }
    }

    /// True for a separator whose drag axis is `axis`.
    #[must_use]
    pub fn separates_along(&self, axis: Axis) -> bool {
        self.orientation().drag_axis() == Some(axis)
    }

    #[must_use]
    pub fn flex_along(&self, axis: Axis) -> Fraction {
        match axis {
            Axis::X => self.flex_width,
            Axis::Y => self.flex_height,
        }
    }

    pub fn set_flex_along(&mut self, axis: Axis, value: Fraction) {
        match axis {
            Axis::X => self.flex_width = value,
            Axis::Y => self.flex_height = value,
        }
    }

    /// Human-readable name, e.g. `pane-0` or `sep-3`.
    #[must_use]
    pub fn label(&self) -> String {
        match self.kind {
            RegionKind::Pane { frame } => format!("pane-{frame}"),
            RegionKind::Separator { .. } => format!("sep-{}", self.id.get()),
        }
    }
}
