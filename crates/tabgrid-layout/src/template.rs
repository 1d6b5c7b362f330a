//! Layout templates.
//!
//! A template turns one of the 17 [`LayoutId`]s into a flat list of
//! [`RegionNode`]s plus a [`Placement`] tree that records where each region
//! sits. The table is pure data: [`instantiate`] is deterministic and total,
//! and [`LayoutTemplate::invariant_report`] checks the structural properties
//! the engine relies on without touching any rendering code.
//!
//! Two shapes cover every layout:
//!
//! ```text
//! symmetric(X, 3)             compound(X, Dominant, Split(2))
//! ┌────┬────┬────┐            ┌─────────┬─────────┐
//! │ p0 │ p1 │ p2 │            │         │   p1    │
//! │    │    │    │            │   p0    ├─────────┤
//! │    │    │    │            │         │   p2    │
//! └────┴────┴────┘            └─────────┴─────────┘
//! ```
//!
//! In a compound layout the outer separator's group on the sub-area side
//! holds the inner panes *and* the inner separators, so one drag moves the
//! whole sub-area and keeps its internal split ratio.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tabgrid_core::{Axis, Fraction, Orientation};
use thiserror::Error;
use tracing::warn;

use crate::config::EngineConfig;
use crate::region::{RegionId, RegionNode};

/// Tolerance used when comparing flex sums.
pub const FLEX_EPSILON: f64 = 1e-9;

/// The layout catalogue, in host code order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutId {
    Single,
    DoubleVert,
    DoubleHoriz,
    TripleVert,
    TripleVertLeft,
    TripleVertRight,
    TripleHoriz,
    TripleHorizTop,
    TripleHorizBottom,
    QuadSqV,
    QuadSqH,
    QuadVert,
    QuadHoriz,
    QuadLeft,
    QuadRight,
    QuadTop,
    QuadBottom,
}

impl LayoutId {
    pub const ALL: [Self; 17] = [
        Self::Single,
        Self::DoubleVert,
        Self::DoubleHoriz,
        Self::TripleVert,
        Self::TripleVertLeft,
        Self::TripleVertRight,
        Self::TripleHoriz,
        Self::TripleHorizTop,
        Self::TripleHorizBottom,
        Self::QuadSqV,
        Self::QuadSqH,
        Self::QuadVert,
        Self::QuadHoriz,
        Self::QuadLeft,
        Self::QuadRight,
        Self::QuadTop,
        Self::QuadBottom,
    ];

    /// Look up a layout by its host code.
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }

    /// Host code of this layout.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Number of panes the layout shows.
    #[must_use]
    pub const fn frame_count(self) -> usize {
        match self {
            Self::Single => 1,
            Self::DoubleVert | Self::DoubleHoriz => 2,
            Self::TripleVert
            | Self::TripleVertLeft
            | Self::TripleVertRight
            | Self::TripleHoriz
            | Self::TripleHorizTop
            | Self::TripleHorizBottom => 3,
            Self::QuadSqV
            | Self::QuadSqH
            | Self::QuadVert
            | Self::QuadHoriz
            | Self::QuadLeft
            | Self::QuadRight
            | Self::QuadTop
            | Self::QuadBottom => 4,
        }
    }

    /// Wire name, e.g. `DOUBLE_VERT`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Single => "SINGLE",
            Self::DoubleVert => "DOUBLE_VERT",
            Self::DoubleHoriz => "DOUBLE_HORIZ",
            Self::TripleVert => "TRIPLE_VERT",
            Self::TripleVertLeft => "TRIPLE_VERT_LEFT",
            Self::TripleVertRight => "TRIPLE_VERT_RIGHT",
            Self::TripleHoriz => "TRIPLE_HORIZ",
            Self::TripleHorizTop => "TRIPLE_HORIZ_TOP",
            Self::TripleHorizBottom => "TRIPLE_HORIZ_BOTTOM",
            Self::QuadSqV => "QUAD_SQ_V",
            Self::QuadSqH => "QUAD_SQ_H",
            Self::QuadVert => "QUAD_VERT",
            Self::QuadHoriz => "QUAD_HORIZ",
            Self::QuadLeft => "QUAD_LEFT",
            Self::QuadRight => "QUAD_RIGHT",
            Self::QuadTop => "QUAD_TOP",
            Self::QuadBottom => "QUAD_BOTTOM",
        }
    }
}

impl fmt::Display for LayoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown layout name {0:?}")]
pub struct UnknownLayoutName(pub String);

impl FromStr for LayoutId {
    type Err = UnknownLayoutName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownLayoutName(s.to_string()))
    }
}

/// Resolve a raw host code, falling back to [`LayoutId::Single`].
#[must_use]
pub fn resolve_code(code: i64) -> LayoutId {
    match u8::try_from(code).ok().and_then(LayoutId::from_code) {
        Some(id) => id,
        None => {
            warn!(code, fallback = %LayoutId::Single, "unknown layout code");
            LayoutId::Single
        }
    }
}

/// Resolve a layout name, falling back to [`LayoutId::Single`].
#[must_use]
pub fn resolve_name(name: &str) -> LayoutId {
    name.parse().unwrap_or_else(|_| {
        warn!(name, fallback = %LayoutId::Single, "unknown layout name");
        LayoutId::Single
    })
}

/// Where regions sit relative to each other.
///
/// A `Row` lays its children out along x, a `Column` along y. Children of a
/// stack alternate between content (a pane or a nested stack) and the
/// separators dividing them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    Region(RegionId),
    Row(Vec<Placement>),
    Column(Vec<Placement>),
}

impl Placement {
    /// Stack along `axis`.
    #[must_use]
    pub fn stack(axis: Axis, children: Vec<Placement>) -> Self {
        match axis {
            Axis::X => Self::Row(children),
            Axis::Y => Self::Column(children),
        }
    }

    /// Layout axis of a stack; `None` for a single region.
    #[must_use]
    pub fn axis(&self) -> Option<Axis> {
        match self {
            Self::Region(_) => None,
            Self::Row(_) => Some(Axis::X),
            Self::Column(_) => Some(Axis::Y),
        }
    }

    #[must_use]
    pub fn children(&self) -> &[Placement] {
        match self {
            Self::Region(_) => &[],
            Self::Row(children) | Self::Column(children) => children,
        }
    }

    #[must_use]
    pub fn as_region(&self) -> Option<RegionId> {
        match self {
            Self::Region(id) => Some(*id),
            _ => None,
        }
    }

    /// Every region in this subtree, depth first.
    #[must_use]
    pub fn regions(&self) -> Vec<RegionId> {
        let mut out = Vec::new();
        self.collect_regions(&mut out);
        out
    }

    fn collect_regions(&self, out: &mut Vec<RegionId>) {
        match self {
            Self::Region(id) => out.push(*id),
            Self::Row(children) | Self::Column(children) => {
                for child in children {
                    child.collect_regions(out);
                }
            }
        }
    }

    /// Flex share of this subtree along `axis`.
    ///
    /// A stack along `axis` sums its children; a stack across it shares one
    /// extent, so the first child's is used.
    #[must_use]
    pub fn extent(&self, nodes: &[RegionNode], axis: Axis) -> f64 {
        match self {
            Self::Region(id) => nodes
                .get(id.index())
                .map_or(0.0, |node| node.flex_along(axis).get()),
            stack if stack.axis() == Some(axis) => stack
                .children()
                .iter()
                .map(|child| child.extent(nodes, axis))
                .sum(),
            stack => stack
                .children()
                .iter()
                .find(|child| !is_separator_along(nodes, child, axis.cross()))
                .map_or(0.0, |child| child.extent(nodes, axis)),
        }
    }
}

/// True when `placement` is a single separator dragged along `axis`.
pub(crate) fn is_separator_along(nodes: &[RegionNode], placement: &Placement, axis: Axis) -> bool {
    placement
        .as_region()
        .and_then(|id| nodes.get(id.index()))
        .is_some_and(|node| node.separates_along(axis))
}

/// Declarative region list for one layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutTemplate {
    pub id: LayoutId,
    pub nodes: Vec<RegionNode>,
    pub placement: Placement,
    /// Pane regions in placement order.
    pub frames: Vec<RegionId>,
}

impl LayoutTemplate {
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Check the template against the default engine minimums.
    #[must_use]
    pub fn invariant_report(&self) -> Vec<LayoutIssue> {
        check_invariants(&self.nodes, &self.placement, &EngineConfig::default())
    }
}

/// Build the template for `id`.
#[must_use]
pub fn instantiate(id: LayoutId) -> LayoutTemplate {
    use Half::{Dominant, Split};

    match id {
        LayoutId::Single => single(id),
        LayoutId::DoubleVert => symmetric(id, Axis::X, 2),
        LayoutId::DoubleHoriz => symmetric(id, Axis::Y, 2),
        LayoutId::TripleVert => symmetric(id, Axis::X, 3),
        LayoutId::TripleVertLeft => compound(id, Axis::X, Dominant, Split(2)),
        LayoutId::TripleVertRight => compound(id, Axis::X, Split(2), Dominant),
        LayoutId::TripleHoriz => symmetric(id, Axis::Y, 3),
        LayoutId::TripleHorizTop => compound(id, Axis::Y, Dominant, Split(2)),
        LayoutId::TripleHorizBottom => compound(id, Axis::Y, Split(2), Dominant),
        LayoutId::QuadSqV => compound(id, Axis::X, Split(2), Split(2)),
        LayoutId::QuadSqH => compound(id, Axis::Y, Split(2), Split(2)),
        LayoutId::QuadVert => symmetric(id, Axis::X, 4),
        LayoutId::QuadHoriz => symmetric(id, Axis::Y, 4),
        LayoutId::QuadLeft => compound(id, Axis::X, Dominant, Split(3)),
        LayoutId::QuadRight => compound(id, Axis::X, Split(3), Dominant),
        LayoutId::QuadTop => compound(id, Axis::Y, Dominant, Split(3)),
        LayoutId::QuadBottom => compound(id, Axis::Y, Split(3), Dominant),
    }
}

/// Build the template for a raw host code; unknown codes yield `SINGLE`.
#[must_use]
pub fn instantiate_code(code: i64) -> LayoutTemplate {
    instantiate(resolve_code(code))
}

/// One side of a compound layout.
#[derive(Debug, Clone, Copy)]
enum Half {
    /// A single pane spanning the whole cross axis.
    Dominant,
    /// `n` panes stacked along the cross axis.
    Split(usize),
}

struct TemplateBuilder {
    id: LayoutId,
    nodes: Vec<RegionNode>,
    frames: Vec<RegionId>,
}

impl TemplateBuilder {
    fn new(id: LayoutId) -> Self {
        Self {
            id,
            nodes: Vec::with_capacity(8),
            frames: Vec::with_capacity(id.frame_count()),
        }
    }

    fn next_id(&self) -> RegionId {
        // Templates hold at most 7 nodes.
        RegionId::new(self.nodes.len() as u16)
    }

    fn pane(&mut self, axis: Axis, main: f64, cross: f64) -> RegionId {
        let id = self.next_id();
        let (width, height) = flex_pair(axis, main, cross);
        self.nodes
            .push(RegionNode::pane(id, self.frames.len(), width, height));
        self.frames.push(id);
        id
    }

    fn separator(
        &mut self,
        axis: Axis,
        cross: f64,
        positive: BTreeSet<RegionId>,
        negative: BTreeSet<RegionId>,
    ) -> RegionId {
        let id = self.next_id();
        let (width, height) = flex_pair(axis, 0.0, cross);
        self.nodes.push(RegionNode::separator(
            id,
            Orientation::separating(axis),
            width,
            height,
            positive,
            negative,
        ));
        id
    }

    /// Stack `panes` along `axis`, inserting a separator between each
    /// neighbouring pair. Returns the stack and every region in it.
    fn chain(
        &mut self,
        axis: Axis,
        panes: &[RegionId],
        cross: f64,
    ) -> (Placement, BTreeSet<RegionId>) {
        let mut members: BTreeSet<RegionId> = panes.iter().copied().collect();
        let mut children = Vec::with_capacity(panes.len() * 2);
        for (index, pane) in panes.iter().enumerate() {
            if index > 0 {
                let sep = self.separator(
                    axis,
                    cross,
                    BTreeSet::from([panes[index - 1]]),
                    BTreeSet::from([*pane]),
                );
                members.insert(sep);
                children.push(Placement::Region(sep));
            }
            children.push(Placement::Region(*pane));
        }
        (Placement::stack(axis, children), members)
    }

    /// Build one half of a compound layout laid out along `axis`.
    fn half(&mut self, axis: Axis, half: Half) -> (Placement, BTreeSet<RegionId>) {
        match half {
            Half::Dominant => {
                let pane = self.pane(axis, 0.5, 1.0);
                (Placement::Region(pane), BTreeSet::from([pane]))
            }
            Half::Split(count) => {
                let cross = axis.cross();
                let share = 1.0 / count as f64;
                let panes: Vec<RegionId> =
                    (0..count).map(|_| self.pane(cross, share, 0.5)).collect();
                self.chain(cross, &panes, 0.5)
            }
        }
    }

    fn finish(self, placement: Placement) -> LayoutTemplate {
        LayoutTemplate {
            id: self.id,
            nodes: self.nodes,
            placement,
            frames: self.frames,
        }
    }
}

fn flex_pair(axis: Axis, main: f64, cross: f64) -> (Fraction, Fraction) {
    match axis {
        Axis::X => (Fraction::new(main), Fraction::new(cross)),
        Axis::Y => (Fraction::new(cross), Fraction::new(main)),
    }
}

fn single(id: LayoutId) -> LayoutTemplate {
    let mut builder = TemplateBuilder::new(id);
    let pane = builder.pane(Axis::X, 1.0, 1.0);
    builder.finish(Placement::Region(pane))
}

/// `count` equal panes along `axis`, each neighbouring pair linked by one
/// separator.
fn symmetric(id: LayoutId, axis: Axis, count: usize) -> LayoutTemplate {
    let mut builder = TemplateBuilder::new(id);
    let share = 1.0 / count as f64;
    let panes: Vec<RegionId> = (0..count).map(|_| builder.pane(axis, share, 1.0)).collect();
    let (placement, _) = builder.chain(axis, &panes, 1.0);
    builder.finish(placement)
}

/// Two halves along `axis` joined by one full-length separator whose groups
/// hold every region of each half.
fn compound(id: LayoutId, axis: Axis, first: Half, second: Half) -> LayoutTemplate {
    let mut builder = TemplateBuilder::new(id);
    let (first_placement, first_members) = builder.half(axis, first);
    let (second_placement, second_members) = builder.half(axis, second);
    let outer = builder.separator(axis, 1.0, first_members, second_members);
    builder.finish(Placement::stack(
        axis,
        vec![first_placement, Placement::Region(outer), second_placement],
    ))
}

/// A broken structural property of a region list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum LayoutIssue {
    /// A separator's positive and negative groups share regions.
    OverlappingGroups {
        separator: RegionId,
        shared: Vec<RegionId>,
    },
    /// A separator's groups are not exactly the regions on either side of it.
    GroupMismatch { separator: RegionId },
    /// A separator sits at the edge of a stack, at the root, or across the
    /// wrong axis.
    MisplacedSeparator { separator: RegionId },
    /// A region is missing from the placement tree or listed twice.
    UnplacedRegion { region: RegionId },
    /// The placement names a region that does not exist.
    DanglingRegion { region: RegionId },
    /// Siblings along an axis do not add up to their parent span.
    FlexSumMismatch {
        axis: Axis,
        expected: f64,
        actual: f64,
    },
    /// A region does not fill its parent span across the stack axis.
    CrossSpanMismatch {
        region: RegionId,
        axis: Axis,
        expected: f64,
        actual: f64,
    },
    /// A pane is smaller than the minimum frame share.
    BelowMinimum {
        region: RegionId,
        axis: Axis,
        flex: f64,
        minimum: f64,
    },
}

/// Check a region list against its placement.
#[must_use]
pub fn check_invariants(
    nodes: &[RegionNode],
    placement: &Placement,
    config: &EngineConfig,
) -> Vec<LayoutIssue> {
    let mut issues = Vec::new();

    let placed = placement.regions();
    let mut seen = BTreeSet::new();
    for id in &placed {
        if nodes.get(id.index()).is_none() {
            issues.push(LayoutIssue::DanglingRegion { region: *id });
        } else if !seen.insert(*id) {
            issues.push(LayoutIssue::UnplacedRegion { region: *id });
        }
    }
    for node in nodes {
        if !seen.contains(&node.id) {
            issues.push(LayoutIssue::UnplacedRegion { region: node.id });
        }
        if let Some((positive, negative)) = node.groups() {
            let shared: Vec<RegionId> = positive.intersection(negative).copied().collect();
            if !shared.is_empty() {
                issues.push(LayoutIssue::OverlappingGroups {
                    separator: node.id,
                    shared,
                });
            }
        }
        if node.is_pane() {
            for axis in [Axis::X, Axis::Y] {
                let flex = node.flex_along(axis).get();
                let minimum = config.min_along(axis);
                if flex + FLEX_EPSILON < minimum {
                    issues.push(LayoutIssue::BelowMinimum {
                        region: node.id,
                        axis,
                        flex,
                        minimum,
                    });
                }
            }
        }
    }
    if issues.iter().any(is_structural) {
        return issues;
    }

    match placement {
        Placement::Region(id) => {
            if let Some(node) = nodes.get(id.index()) {
                if node.is_separator() {
                    issues.push(LayoutIssue::MisplacedSeparator { separator: *id });
                }
                for axis in [Axis::X, Axis::Y] {
                    check_cross_span(node, axis, 1.0, &mut issues);
                }
            }
        }
        stack => check_stack(nodes, stack, 1.0, 1.0, &mut issues),
    }
    issues
}

fn is_structural(issue: &LayoutIssue) -> bool {
    matches!(
        issue,
        LayoutIssue::DanglingRegion { .. } | LayoutIssue::UnplacedRegion { .. }
    )
}

fn check_cross_span(node: &RegionNode, axis: Axis, expected: f64, issues: &mut Vec<LayoutIssue>) {
    let actual = node.flex_along(axis).get();
    if (actual - expected).abs() > FLEX_EPSILON {
        issues.push(LayoutIssue::CrossSpanMismatch {
            region: node.id,
            axis,
            expected,
            actual,
        });
    }
}

/// `span_x`/`span_y` are the flex shares this stack occupies.
fn check_stack(
    nodes: &[RegionNode],
    stack: &Placement,
    span_x: f64,
    span_y: f64,
    issues: &mut Vec<LayoutIssue>,
) {
    let Some(axis) = stack.axis() else {
        return;
    };
    let (span_main, span_cross) = match axis {
        Axis::X => (span_x, span_y),
        Axis::Y => (span_y, span_x),
    };
    let children = stack.children();
    let mut sum = 0.0;

    for (index, child) in children.iter().enumerate() {
        let extent = child.extent(nodes, axis);
        sum += extent;

        match child {
            Placement::Region(id) => {
                let Some(node) = nodes.get(id.index()) else {
                    continue;
                };
                check_cross_span(node, axis.cross(), span_cross, issues);
                if let Some((positive, negative)) = node.groups() {
                    let inner = index > 0 && index + 1 < children.len();
                    if !inner || !node.separates_along(axis) {
                        issues.push(LayoutIssue::MisplacedSeparator { separator: *id });
                        continue;
                    }
                    let before: BTreeSet<RegionId> =
                        children[index - 1].regions().into_iter().collect();
                    let after: BTreeSet<RegionId> =
                        children[index + 1].regions().into_iter().collect();
                    if positive != &before || negative != &after {
                        issues.push(LayoutIssue::GroupMismatch { separator: *id });
                    }
                }
            }
            nested => {
                let (child_x, child_y) = match axis {
                    Axis::X => (extent, span_cross),
                    Axis::Y => (span_cross, extent),
                };
                check_stack(nodes, nested, child_x, child_y, issues);
            }
        }
    }

    if (sum - span_main).abs() > FLEX_EPSILON {
        issues.push(LayoutIssue::FlexSumMismatch {
            axis,
            expected: span_main,
            actual: sum,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pane_flex(template: &LayoutTemplate, frame: usize) -> (f64, f64) {
        let node = &template.nodes[template.frames[frame].index()];
        (node.flex_width.get(), node.flex_height.get())
    }

    fn separators(template: &LayoutTemplate) -> Vec<&RegionNode> {
        template.nodes.iter().filter(|n| n.is_separator()).collect()
    }

    #[test]
    fn codes_round_trip() {
        for (index, id) in LayoutId::ALL.into_iter().enumerate() {
            assert_eq!(usize::from(id.code()), index);
            assert_eq!(LayoutId::from_code(id.code()), Some(id));
        }
        assert_eq!(LayoutId::from_code(17), None);
    }

    #[test]
    fn names_parse_and_display() {
        for id in LayoutId::ALL {
            assert_eq!(id.to_string().parse::<LayoutId>(), Ok(id));
        }
        assert_eq!("double_vert".parse::<LayoutId>(), Ok(LayoutId::DoubleVert));
        assert!("OCTO".parse::<LayoutId>().is_err());
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&LayoutId::TripleVertLeft).unwrap();
        assert_eq!(json, "\"TRIPLE_VERT_LEFT\"");
        let id: LayoutId = serde_json::from_str("\"QUAD_SQ_H\"").unwrap();
        assert_eq!(id, LayoutId::QuadSqH);
    }

    #[test]
    fn unknown_codes_fall_back_to_single() {
        assert_eq!(resolve_code(99), LayoutId::Single);
        assert_eq!(resolve_code(-1), LayoutId::Single);
        assert_eq!(resolve_code(3), LayoutId::TripleVert);
        assert_eq!(resolve_name("nonsense"), LayoutId::Single);

        let template = instantiate_code(400);
        assert_eq!(template.id, LayoutId::Single);
        assert_eq!(template.frame_count(), 1);
        assert_eq!(pane_flex(&template, 0), (1.0, 1.0));
    }

    #[test]
    fn frame_counts_match_catalogue() {
        for id in LayoutId::ALL {
            let template = instantiate(id);
            assert_eq!(template.frame_count(), id.frame_count(), "{id}");
            assert_eq!(separators(&template).len(), id.frame_count() - 1, "{id}");
        }
    }

    #[test]
    fn every_template_is_valid() {
        for id in LayoutId::ALL {
            let report = instantiate(id).invariant_report();
            assert!(report.is_empty(), "{id}: {report:?}");
        }
    }

    #[test]
    fn double_vert_is_two_columns() {
        let template = instantiate(LayoutId::DoubleVert);
        assert_eq!(pane_flex(&template, 0), (0.5, 1.0));
        assert_eq!(pane_flex(&template, 1), (0.5, 1.0));
        let seps = separators(&template);
        assert_eq!(seps[0].orientation(), Orientation::Vertical);
        assert_eq!(seps[0].flex_width, Fraction::ZERO);
        assert_eq!(seps[0].flex_height, Fraction::ONE);
    }

    #[test]
    fn triple_vert_left_outer_group_carries_inner_separator() {
        let template = instantiate(LayoutId::TripleVertLeft);
        let outer = separators(&template)
            .into_iter()
            .find(|n| n.orientation() == Orientation::Vertical)
            .unwrap();
        let inner = separators(&template)
            .into_iter()
            .find(|n| n.orientation() == Orientation::Horizontal)
            .unwrap();
        let (positive, negative) = outer.groups().unwrap();
        assert_eq!(positive, &BTreeSet::from([template.frames[0]]));
        assert!(negative.contains(&inner.id));
        assert!(negative.contains(&template.frames[1]));
        assert!(negative.contains(&template.frames[2]));
        assert_eq!(pane_flex(&template, 1), (0.5, 0.5));
        assert_eq!(inner.flex_width, Fraction::HALF);
    }

    #[test]
    fn quad_left_sub_area_is_split_in_thirds() {
        let template = instantiate(LayoutId::QuadLeft);
        for frame in 1..4 {
            let (width, height) = pane_flex(&template, frame);
            assert_eq!(width, 0.5);
            assert!((height - 1.0 / 3.0).abs() < FLEX_EPSILON);
        }
    }

    #[test]
    fn square_grids_differ_in_major_splitter() {
        let sq_v = instantiate(LayoutId::QuadSqV);
        let sq_h = instantiate(LayoutId::QuadSqH);
        let full_length = |template: &LayoutTemplate| {
            separators(template)
                .into_iter()
                .find(|n| n.flex_width == Fraction::ONE || n.flex_height == Fraction::ONE)
                .map(|n| n.orientation())
        };
        assert_eq!(full_length(&sq_v), Some(Orientation::Vertical));
        assert_eq!(full_length(&sq_h), Some(Orientation::Horizontal));
    }

    #[test]
    fn groups_are_disjoint_everywhere() {
        for id in LayoutId::ALL {
            for sep in separators(&instantiate(id)) {
                let (positive, negative) = sep.groups().unwrap();
                assert!(positive.is_disjoint(negative), "{id} {}", sep.id);
                assert!(!positive.is_empty() && !negative.is_empty());
            }
        }
    }

    #[test]
    fn report_flags_overlap_and_mismatch() {
        let mut template = instantiate(LayoutId::DoubleVert);
        let sep = template.nodes.iter_mut().find(|n| n.is_separator()).unwrap();
        if let crate::region::RegionKind::Separator { negative, .. } = &mut sep.kind {
            negative.insert(RegionId::new(0));
        }
        let report = template.invariant_report();
        assert!(
            report
                .iter()
                .any(|i| matches!(i, LayoutIssue::OverlappingGroups { .. }))
        );
        assert!(
            report
                .iter()
                .any(|i| matches!(i, LayoutIssue::GroupMismatch { .. }))
        );
    }

    #[test]
    fn report_flags_bad_sums() {
        let mut template = instantiate(LayoutId::TripleVert);
        template.nodes[0].flex_width = Fraction::new(0.5);
        let report = template.invariant_report();
        assert!(report.iter().any(|i| matches!(
            i,
            LayoutIssue::FlexSumMismatch { axis: Axis::X, .. }
        )));
    }

    #[test]
    fn report_flags_unplaced_region() {
        let mut template = instantiate(LayoutId::DoubleHoriz);
        template.placement = Placement::Region(template.frames[0]);
        let report = template.invariant_report();
        assert!(
            report
                .iter()
                .any(|i| matches!(i, LayoutIssue::UnplacedRegion { .. }))
        );
    }

    #[test]
    fn extent_of_nested_stack() {
        let template = instantiate(LayoutId::TripleVertLeft);
        let children = template.placement.children();
        assert_eq!(children.len(), 3);
        assert_eq!(children[2].extent(&template.nodes, Axis::X), 0.5);
        assert!((children[2].extent(&template.nodes, Axis::Y) - 1.0).abs() < FLEX_EPSILON);
        assert_eq!(template.placement.extent(&template.nodes, Axis::X), 1.0);
    }
}
