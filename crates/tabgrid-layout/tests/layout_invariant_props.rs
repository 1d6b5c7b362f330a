//! Property tests for the layout engine across every template.
//!
//! # Invariants
//!
//! 1. **Conservation**: after any drag sequence, siblings in every row and
//!    column still sum to their parent span and cross spans still match.
//! 2. **Minimum clamp**: no pane's flex ever drops below the configured
//!    minimum along either axis.
//! 3. **Resize idempotence**: resizing twice to the same size yields the same
//!    rects.
//! 4. **Identity preservation**: switching layouts keeps slot `i` on frame
//!    `i` and never drops a bound surface.
//! 5. **Group disjointness**: no separator's groups overlap, before or after
//!    drags.
//! 6. **Bounds**: every rect lies inside the container.

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use tabgrid_core::{Axis, Size};
use tabgrid_layout::{
    Container, ContentSurface, DragOutcome, EngineConfig, FLEX_EPSILON, LayoutId, RegionId,
    instantiate,
};

struct Recorder(Rc<RefCell<Vec<(u32, u32)>>>);

impl ContentSurface for Recorder {
    fn resize(&mut self, width_px: u32, height_px: u32) {
        self.0.borrow_mut().push((width_px, height_px));
    }
}

fn layout_strategy() -> impl Strategy<Value = LayoutId> {
    (0usize..LayoutId::ALL.len()).prop_map(|index| LayoutId::ALL[index])
}

fn drags_strategy() -> impl Strategy<Value = Vec<(usize, i32)>> {
    prop::collection::vec((0usize..8, -1500i32..1500), 0..40)
}

fn separator_ids(container: &Container) -> Vec<RegionId> {
    container.separators().map(|node| node.id).collect()
}

fn run_drags(container: &mut Container, drags: &[(usize, i32)]) -> Vec<DragOutcome> {
    let separators = separator_ids(container);
    if separators.is_empty() {
        return Vec::new();
    }
    drags
        .iter()
        .map(|(pick, delta)| {
            let id = separators[pick % separators.len()];
            container
                .drag_separator(id, *delta)
                .expect("separator ids come from the container")
        })
        .collect()
}

fn sized(layout: LayoutId, width: u32, height: u32) -> Container {
    let mut container = Container::new(EngineConfig::default());
    container.set_layout(layout);
    container.resize(Size::from((width, height)));
    container
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn drag_sequences_preserve_flex_sums(
        layout in layout_strategy(),
        drags in drags_strategy(),
        width in 1u32..2400,
        height in 1u32..1600,
    ) {
        let mut container = sized(layout, width, height);
        run_drags(&mut container, &drags);
        let report = container.invariant_report();
        prop_assert!(report.is_empty(), "{layout}: {report:?}");
    }

    #[test]
    fn panes_never_drop_below_minimum(
        layout in layout_strategy(),
        drags in drags_strategy(),
        width in 1u32..2400,
        height in 1u32..1600,
    ) {
        let mut container = sized(layout, width, height);
        let config = *container.config();
        run_drags(&mut container, &drags);
        for node in container.nodes().iter().filter(|n| n.is_pane()) {
            for axis in [Axis::X, Axis::Y] {
                let flex = node.flex_along(axis).get();
                prop_assert!(
                    flex + FLEX_EPSILON >= config.min_along(axis),
                    "{layout} {}: {axis:?} flex {flex}",
                    node.id
                );
            }
        }
    }

    #[test]
    fn resize_is_idempotent(
        layout in layout_strategy(),
        drags in drags_strategy(),
        width in 1u32..3000,
        height in 1u32..3000,
    ) {
        let mut container = sized(layout, 1200, 900);
        run_drags(&mut container, &drags);
        container.resize(Size::from((width, height)));
        let first = container.current_pixel_rects();
        container.resize(Size::from((width, height)));
        prop_assert_eq!(first, container.current_pixel_rects());
    }

    #[test]
    fn rects_stay_inside_container(
        layout in layout_strategy(),
        drags in drags_strategy(),
        width in 1u32..2400,
        height in 1u32..1600,
    ) {
        let mut container = sized(layout, width, height);
        run_drags(&mut container, &drags);
        let rects = container.current_pixel_rects();
        prop_assert_eq!(rects.len(), container.nodes().len());
        for entry in rects {
            prop_assert!(entry.rect.right() <= width, "{layout} {entry:?}");
            prop_assert!(entry.rect.bottom() <= height, "{layout} {entry:?}");
        }
    }

    #[test]
    fn layout_switches_keep_surfaces_in_order(
        first in layout_strategy(),
        second in layout_strategy(),
    ) {
        let mut container = sized(first, 1000, 800);
        let logs: Vec<Rc<RefCell<Vec<(u32, u32)>>>> = (0..container.frame_count())
            .map(|_| Rc::default())
            .collect();
        for (frame, log) in logs.iter().enumerate() {
            let region = container.frame_region(frame).expect("frame in range");
            container
                .bind(region, Box::new(Recorder(Rc::clone(log))))
                .expect("frame regions are panes");
        }

        container.set_layout(second);
        let kept = first.frame_count().min(second.frame_count());
        let slots = container.slots();
        prop_assert_eq!(slots.len(), first.frame_count().max(second.frame_count()));
        for slot in 0..first.frame_count() {
            prop_assert!(slots.is_bound(slot));
            if slot < kept {
                prop_assert_eq!(slots.host_of(slot), container.frame_region(slot));
                prop_assert_eq!(logs[slot].borrow().len(), 2);
            } else {
                prop_assert_eq!(slots.host_of(slot), None);
                prop_assert_eq!(logs[slot].borrow().len(), 1);
            }
        }
    }

    #[test]
    fn groups_stay_disjoint_after_drags(
        layout in layout_strategy(),
        drags in drags_strategy(),
    ) {
        let mut container = sized(layout, 1000, 800);
        run_drags(&mut container, &drags);
        for separator in container.separators() {
            let (positive, negative) = separator.groups().expect("separator groups");
            prop_assert!(positive.is_disjoint(negative));
        }
    }
}

#[test]
fn every_template_has_disjoint_groups() {
    for layout in LayoutId::ALL {
        let template = instantiate(layout);
        for node in &template.nodes {
            if let Some((positive, negative)) = node.groups() {
                assert!(positive.is_disjoint(negative), "{layout} {}", node.id);
            }
        }
    }
}
