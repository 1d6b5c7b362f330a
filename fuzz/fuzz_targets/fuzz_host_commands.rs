#![no_main]

use libfuzzer_sys::fuzz_target;
use tabgrid_layout::{Container, EngineConfig, parse_script};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 4096 {
        return;
    }
    let Ok(commands) = parse_script(text) else {
        return;
    };

    let mut container = Container::new(EngineConfig::default());
    for command in &commands {
        // Unknown regions and drags on panes are host errors, not panics.
        let _ = container.apply(command);
    }

    let report = container.invariant_report();
    assert!(report.is_empty(), "invariants broken: {report:?}");
    let size = container.pixel_size();
    assert!(size.width >= 0.0 && size.height >= 0.0);
    for entry in container.current_pixel_rects() {
        assert!(f64::from(entry.rect.right()) <= size.width.round());
        assert!(f64::from(entry.rect.bottom()) <= size.height.round());
    }
});
