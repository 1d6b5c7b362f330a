//! The layout engine for one container (one tab).
//!
//! Flex fractions are the source of truth. [`Container::resize`] turns them
//! into pixel rectangles and pushes each pane's size to its surface;
//! [`Container::drag_separator`] only ever moves fractions and then re-runs
//! the same resize path, so repeated drags and window resizes never drift
//! apart.
//!
//! # Pixel placement
//!
//! Inside a row or column, the boundary after each child sits at
//! `round(total_px * cumulative_flex)`. Siblings therefore tile their parent
//! exactly. A separator is `separator_px` thick and centred on its boundary;
//! the neighbours on either side give up half the thickness each. For a
//! 1000px wide `DOUBLE_VERT` this yields panes of 499px at x=0 and x=501.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tabgrid_core::{Axis, Orientation, PixelRect, Size};
use tracing::{debug, debug_span, trace};

use crate::binding::{ContentSurface, PaneSlots, RehostSummary};
use crate::config::EngineConfig;
use crate::error::{LayoutError, Result};
use crate::region::{RegionId, RegionKind, RegionNode};
use crate::template::{
    LayoutIssue, LayoutId, Placement, check_invariants, instantiate, is_separator_along,
    resolve_code,
};

/// Result of a [`Container::resize`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ResizeOutcome {
    /// A dimension was not positive; nothing changed.
    Ignored,
    /// Rects were recomputed and `delivered` surfaces were notified.
    Applied { delivered: usize },
}

/// Result of a [`Container::set_layout`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutChange {
    pub previous: Option<LayoutId>,
    pub current: LayoutId,
    pub rehost: RehostSummary,
    pub resize: ResizeOutcome,
}

/// Which group's minimum stopped a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragSide {
    Positive,
    Negative,
}

/// Why a drag left the fractions untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragIgnoredReason {
    /// The container has not been given a renderable size yet.
    NotSized,
    /// The pointer delta along the drag axis was zero.
    NoMovement,
    /// The two groups hold less than twice the minimum between them.
    Overconstrained,
}

/// Result of a separator drag. `delta` is the flex moved from the negative
/// to the positive group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DragOutcome {
    Applied { delta: f64 },
    Clamped { delta: f64, side: DragSide },
    Ignored { reason: DragIgnoredReason },
}

impl DragOutcome {
    /// Flex actually moved; zero when ignored.
    #[must_use]
    pub fn delta(&self) -> f64 {
        match *self {
            Self::Applied { delta } | Self::Clamped { delta, .. } => delta,
            Self::Ignored { .. } => 0.0,
        }
    }
}

/// What a resolved rect belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RectKind {
    Pane { frame: usize },
    Separator { orientation: Orientation },
}

/// One entry of [`Container::current_pixel_rects`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionRect {
    pub id: RegionId,
    #[serde(flatten)]
    pub kind: RectKind,
    #[serde(flatten)]
    pub rect: PixelRect,
}

#[derive(Debug, Default)]
pub struct Container {
    config: EngineConfig,
    layout: Option<LayoutId>,
    nodes: Vec<RegionNode>,
    placement: Option<Placement>,
    frames: Vec<RegionId>,
    slots: PaneSlots,
    pixel_size: Size,
    /// Resolved rects indexed by region id; empty until the first
    /// renderable resize after a layout change.
    rects: Vec<PixelRect>,
}

impl Container {
    /// An empty container: no layout, no regions, zero size.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn layout(&self) -> Option<LayoutId> {
        self.layout
    }

    #[must_use]
    pub fn pixel_size(&self) -> Size {
        self.pixel_size
    }

    #[must_use]
    pub fn nodes(&self) -> &[RegionNode] {
        &self.nodes
    }

    #[must_use]
    pub fn node(&self, id: RegionId) -> Option<&RegionNode> {
        self.nodes.get(id.index())
    }

    #[must_use]
    pub fn placement(&self) -> Option<&Placement> {
        self.placement.as_ref()
    }

    /// Number of panes the current layout shows.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Region hosting frame `index`.
    #[must_use]
    pub fn frame_region(&self, index: usize) -> Option<RegionId> {
        self.frames.get(index).copied()
    }

    pub fn separators(&self) -> impl Iterator<Item = &RegionNode> + '_ {
        self.nodes.iter().filter(|node| node.is_separator())
    }

    #[must_use]
    pub fn slots(&self) -> &PaneSlots {
        &self.slots
    }

    /// Replace the region tree with the template for `id`.
    ///
    /// Slot `i` moves to frame `i` of the new layout. Surfaces whose slot has
    /// no frame left are kept, not dropped. The new rects are computed and
    /// delivered before this returns.
    pub fn set_layout(&mut self, id: LayoutId) -> LayoutChange {
        let span = debug_span!("tabgrid.set_layout", layout = %id);
        let _guard = span.enter();

        let template = instantiate(id);
        let previous = self.layout.replace(id);
        let previous_frames = self.frames.len();
        self.nodes = template.nodes;
        self.placement = Some(template.placement);
        self.frames = template.frames;
        self.rects.clear();

        let rehost = self.slots.rehost(&self.frames);
        debug!(
            previous = ?previous,
            previous_frames,
            frames = self.frames.len(),
            reused = rehost.reused,
            created = rehost.created,
            unhosted = rehost.unhosted,
            "layout switched"
        );

        let resize = self.resize(self.pixel_size);
        LayoutChange {
            previous,
            current: id,
            rehost,
            resize,
        }
    }

    /// [`set_layout`](Self::set_layout) from a raw host code; unknown codes
    /// select `SINGLE`.
    pub fn set_layout_code(&mut self, code: i64) -> LayoutChange {
        self.set_layout(resolve_code(code))
    }

    /// Lay every region out for `size` and push pane sizes to their surfaces.
    ///
    /// Ignored when either dimension is not positive.
    pub fn resize(&mut self, size: Size) -> ResizeOutcome {
        if !size.is_renderable() {
            trace!(width = size.width, height = size.height, "resize ignored");
            return ResizeOutcome::Ignored;
        }
        self.pixel_size = size;
        self.rects = match &self.placement {
            Some(placement) => {
                compute_rects(&self.nodes, placement, size, self.config.separator_px)
            }
            None => Vec::new(),
        };

        let rects = &self.rects;
        let delivered = self
            .slots
            .deliver(|region| rects.get(region.index()).copied());
        trace!(
            width = size.width,
            height = size.height,
            regions = rects.len(),
            delivered,
            "resize applied"
        );
        ResizeOutcome::Applied { delivered }
    }

    /// Move separator `id` by `delta_px` along its drag axis.
    ///
    /// A positive delta grows the positive group. Each side stops at the
    /// minimum frame share; the drag then sticks there rather than being
    /// rejected.
    pub fn drag_separator(&mut self, id: RegionId, delta_px: i32) -> Result<DragOutcome> {
        let node = self.node(id).ok_or(LayoutError::UnknownRegion { id })?;
        let (axis, positive, negative) = match &node.kind {
            RegionKind::Separator {
                orientation,
                positive,
                negative,
            } => match orientation.drag_axis() {
                Some(axis) => (axis, positive.clone(), negative.clone()),
                None => return Err(LayoutError::NotASeparator { id }),
            },
            RegionKind::Pane { .. } => return Err(LayoutError::NotASeparator { id }),
        };

        if !self.pixel_size.is_renderable() {
            return Ok(self.ignore_drag(id, DragIgnoredReason::NotSized));
        }
        if delta_px == 0 {
            return Ok(self.ignore_drag(id, DragIgnoredReason::NoMovement));
        }

        let minimum = self.config.min_along(axis);
        let pos = self.group_extent(&positive, axis);
        let neg = self.group_extent(&negative, axis);
        let total = pos + neg;
        if total < 2.0 * minimum {
            return Ok(self.ignore_drag(id, DragIgnoredReason::Overconstrained));
        }

        let delta = f64::from(delta_px) / self.pixel_size.along(axis);
        let mut new_pos = pos + delta;
        let mut clamped = None;
        if new_pos < minimum {
            new_pos = minimum;
            clamped = Some(DragSide::Positive);
        } else if total - new_pos < minimum {
            new_pos = total - minimum;
            clamped = Some(DragSide::Negative);
        }
        let applied = new_pos - pos;

        for node in &mut self.nodes {
            let shift = if positive.contains(&node.id) {
                applied
            } else if negative.contains(&node.id) {
                -applied
            } else {
                continue;
            };
            let moved = node.flex_along(axis).saturating_add(shift);
            node.set_flex_along(axis, moved);
        }

        let outcome = match clamped {
            Some(side) => {
                debug!(separator = %id, requested = delta, applied, side = ?side, "drag clamped");
                DragOutcome::Clamped {
                    delta: applied,
                    side,
                }
            }
            None => DragOutcome::Applied { delta: applied },
        };
        trace!(separator = %id, delta_px, applied, "drag");

        self.resize(self.pixel_size);
        Ok(outcome)
    }

    /// Feed one pointer-move event; only the component along the
    /// separator's drag axis is used.
    pub fn pointer_drag(&mut self, id: RegionId, dx: i32, dy: i32) -> Result<DragOutcome> {
        let node = self.node(id).ok_or(LayoutError::UnknownRegion { id })?;
        let delta = match node.orientation().drag_axis() {
            Some(Axis::X) => dx,
            Some(Axis::Y) => dy,
            None => return Err(LayoutError::NotASeparator { id }),
        };
        self.drag_separator(id, delta)
    }

    fn ignore_drag(&self, id: RegionId, reason: DragIgnoredReason) -> DragOutcome {
        debug!(separator = %id, reason = ?reason, "drag ignored");
        DragOutcome::Ignored { reason }
    }

    /// Smallest pane share along `axis` within a drag group.
    fn group_extent(&self, group: &BTreeSet<RegionId>, axis: Axis) -> f64 {
        let members = || group.iter().filter_map(|id| self.node(*id));
        let panes = members()
            .filter(|node| node.is_pane())
            .map(|node| node.flex_along(axis).get())
            .fold(f64::INFINITY, f64::min);
        if panes.is_finite() {
            panes
        } else {
            members()
                .map(|node| node.flex_along(axis).get())
                .fold(0.0, f64::max)
        }
    }

    /// Attach `surface` to the pane at `region`, returning any surface it
    /// replaces. The pane receives its current size straight away when the
    /// container is already laid out.
    pub fn bind(
        &mut self,
        region: RegionId,
        surface: Box<dyn ContentSurface>,
    ) -> Result<Option<Box<dyn ContentSurface>>> {
        let frame = self.pane_frame(region)?;
        let replaced = self
            .slots
            .bind(frame, region, surface)
            .map_err(|_| LayoutError::FrameOutOfRange {
                frame,
                frame_count: self.slots.len(),
            })?;
        if let Some(rect) = self.rects.get(region.index()).copied() {
            self.slots.deliver_to(frame, rect);
        }
        debug!(region = %region, frame, replaced = replaced.is_some(), "surface bound");
        Ok(replaced)
    }

    /// Detach the pane at `region` from its slot, keeping the slot's
    /// surface. Returns the slot index, or `None` if the pane was already
    /// vacant.
    pub fn unbind(&mut self, region: RegionId) -> Result<Option<usize>> {
        self.pane_frame(region)?;
        let slot = self.slots.unbind(region);
        debug!(region = %region, slot = ?slot, "surface unbound");
        Ok(slot)
    }

    /// Give up ownership of the surface in `slot`.
    pub fn take_surface(&mut self, slot: usize) -> Option<Box<dyn ContentSurface>> {
        self.slots.take_surface(slot)
    }

    fn pane_frame(&self, region: RegionId) -> Result<usize> {
        let node = self
            .node(region)
            .ok_or(LayoutError::UnknownRegion { id: region })?;
        node.frame().ok_or(LayoutError::NotAPane { id: region })
    }

    /// Rects of every region in id order; empty until the container has
    /// been given a renderable size.
    #[must_use]
    pub fn current_pixel_rects(&self) -> Vec<RegionRect> {
        self.nodes
            .iter()
            .zip(&self.rects)
            .map(|(node, rect)| RegionRect {
                id: node.id,
                kind: match &node.kind {
                    RegionKind::Pane { frame } => RectKind::Pane { frame: *frame },
                    RegionKind::Separator { orientation, .. } => RectKind::Separator {
                        orientation: *orientation,
                    },
                },
                rect: *rect,
            })
            .collect()
    }

    /// Pane rects in frame order.
    #[must_use]
    pub fn pane_rects(&self) -> Vec<PixelRect> {
        self.frames
            .iter()
            .filter_map(|id| self.rects.get(id.index()).copied())
            .collect()
    }

    #[must_use]
    pub fn rect(&self, id: RegionId) -> Option<PixelRect> {
        self.rects.get(id.index()).copied()
    }

    /// Structural problems with the current regions under this container's
    /// minimums. Empty for every layout the engine builds, before and after
    /// any sequence of drags.
    #[must_use]
    pub fn invariant_report(&self) -> Vec<LayoutIssue> {
        match &self.placement {
            Some(placement) => check_invariants(&self.nodes, placement, &self.config),
            None => Vec::new(),
        }
    }
}

/// Half-open pixel interval.
#[derive(Debug, Clone, Copy)]
struct Span {
    start: i64,
    end: i64,
}

impl Span {
    /// Confines `start..end` to `outer`, collapsing to an empty span at the edge.
    fn within(self, outer: Span) -> Self {
        let start = self.start.clamp(outer.start, outer.end);
        Self {
            start,
            end: self.end.clamp(start, outer.end),
        }
    }
}

/// Whole-pixel extent of a container dimension, bounded by what a `PixelRect` can hold.
fn pixel_extent(length: f64) -> i64 {
    length.round().clamp(0.0, f64::from(u32::MAX)) as i64
}

#[derive(Debug, Clone, Copy)]
struct PixelBox {
    x: Span,
    y: Span,
}

impl PixelBox {
    fn along(&self, axis: Axis) -> Span {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    fn with(mut self, axis: Axis, span: Span) -> Self {
        match axis {
            Axis::X => self.x = span,
            Axis::Y => self.y = span,
        }
        self
    }

    fn to_rect(self) -> PixelRect {
        let clamp = |v: i64| u32::try_from(v.max(0)).unwrap_or(u32::MAX);
        let x = clamp(self.x.start);
        let y = clamp(self.y.start);
        PixelRect::new(
            x,
            y,
            clamp(self.x.end).saturating_sub(x),
            clamp(self.y.end).saturating_sub(y),
        )
    }
}

struct Placer<'a> {
    nodes: &'a [RegionNode],
    extent: (i64, i64),
    lead: i64,
    trail: i64,
    thickness: i64,
    rects: Vec<PixelRect>,
}

fn compute_rects(
    nodes: &[RegionNode],
    placement: &Placement,
    size: Size,
    separator_px: u32,
) -> Vec<PixelRect> {
    let thickness = i64::from(separator_px);
    let extent = (pixel_extent(size.width), pixel_extent(size.height));
    let mut placer = Placer {
        nodes,
        extent,
        lead: thickness / 2,
        trail: thickness - thickness / 2,
        thickness,
        rects: vec![PixelRect::default(); nodes.len()],
    };
    let root = PixelBox {
        x: Span {
            start: 0,
            end: extent.0,
        },
        y: Span {
            start: 0,
            end: extent.1,
        },
    };
    placer.place(placement, root, (0.0, 0.0));
    placer.rects
}

impl Placer<'_> {
    fn boundary(&self, axis: Axis, cursor: f64) -> i64 {
        let extent = match axis {
            Axis::X => self.extent.0,
            Axis::Y => self.extent.1,
        };
        pixel_extent(extent as f64 * cursor)
    }

    /// `origin` is the flex offset of `bbox` from the container's top-left.
    fn place(&mut self, placement: &Placement, bbox: PixelBox, origin: (f64, f64)) {
        let axis = match placement {
            Placement::Region(id) => {
                if let Some(slot) = self.rects.get_mut(id.index()) {
                    *slot = bbox.to_rect();
                }
                return;
            }
            stack => match stack.axis() {
                Some(axis) => axis,
                None => return,
            },
        };

        let children = placement.children();
        let outer = bbox.along(axis);
        let mut cursor = match axis {
            Axis::X => origin.0,
            Axis::Y => origin.1,
        };

        for (index, child) in children.iter().enumerate() {
            let child_origin = match axis {
                Axis::X => (cursor, origin.1),
                Axis::Y => (origin.0, cursor),
            };
            let start = if index == 0 {
                outer.start
            } else {
                self.boundary(axis, cursor)
            };
            cursor += child.extent(self.nodes, axis);
            let end = if index + 1 == children.len() {
                outer.end
            } else {
                self.boundary(axis, cursor)
            };

            let span = if is_separator_along(self.nodes, child, axis) {
                let start = start.saturating_sub(self.lead);
                Span {
                    start,
                    end: start.saturating_add(self.thickness),
                }
            } else {
                let after_separator =
                    index > 0 && is_separator_along(self.nodes, &children[index - 1], axis);
                let before_separator = children
                    .get(index + 1)
                    .is_some_and(|next| is_separator_along(self.nodes, next, axis));
                let start = start.saturating_add(if after_separator { self.trail } else { 0 });
                let end = end.saturating_sub(if before_separator { self.lead } else { 0 });
                Span { start, end }
            };
            self.place(child, bbox.with(axis, span.within(outer)), child_origin);
        }
    }
}
