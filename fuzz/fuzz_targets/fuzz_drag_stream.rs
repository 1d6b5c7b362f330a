#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tabgrid_core::Size;
use tabgrid_layout::{Container, EngineConfig, FLEX_EPSILON, LayoutId};

#[derive(Debug, Arbitrary)]
enum Step {
    Layout(u8),
    Resize(u16, u16),
    Drag { separator: u8, dx: i16, dy: i16 },
}

fuzz_target!(|steps: Vec<Step>| {
    let config = EngineConfig::default();
    let mut container = Container::new(config);
    container.set_layout(LayoutId::Single);

    for step in steps.iter().take(256) {
        match *step {
            Step::Layout(code) => {
                container.set_layout_code(i64::from(code));
            }
            Step::Resize(width, height) => {
                container.resize(Size::from((u32::from(width), u32::from(height))));
            }
            Step::Drag { separator, dx, dy } => {
                let separators: Vec<_> = container.separators().map(|n| n.id).collect();
                if separators.is_empty() {
                    continue;
                }
                let id = separators[usize::from(separator) % separators.len()];
                container
                    .pointer_drag(id, i32::from(dx), i32::from(dy))
                    .expect("separator ids come from the container");
            }
        }

        assert!(container.invariant_report().is_empty());
        for node in container.nodes().iter().filter(|n| n.is_pane()) {
            assert!(node.flex_width.get() + FLEX_EPSILON >= config.min_frame_width);
            assert!(node.flex_height.get() + FLEX_EPSILON >= config.min_frame_height);
        }
    }
});
