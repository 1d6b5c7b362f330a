//! Replay a host command script against a fresh container.

use std::path::Path;

use serde::Serialize;
use tabgrid_core::Size;
use tabgrid_layout::{
    CommandOutcome, Container, EngineConfig, HostCommand, LayoutId, LayoutIssue, RegionId,
    RegionRect, parse_script,
};
use tracing::{debug, info};

use crate::error::{HarnessError, Result};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayStep {
    pub index: usize,
    pub command: HostCommand,
    pub outcome: CommandOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeFlex {
    pub id: RegionId,
    pub label: String,
    pub flex_width: f64,
    pub flex_height: f64,
}

/// Final state of a replayed container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    pub layout: Option<LayoutId>,
    pub frame_count: usize,
    pub pixel_size: Size,
    pub steps: Vec<ReplayStep>,
    pub nodes: Vec<NodeFlex>,
    pub rects: Vec<RegionRect>,
    pub issues: Vec<LayoutIssue>,
}

/// Load an engine config from TOML, or JSON when the extension is `.json`.
pub fn load_config(path: &Path) -> Result<EngineConfig> {
    let loaded = if path.extension().is_some_and(|ext| ext == "json") {
        EngineConfig::from_json_file(path)
    } else {
        EngineConfig::from_toml_file(path)
    };
    loaded.map_err(|source| HarnessError::Config {
        path: path.to_path_buf(),
        source,
    })
}

/// Apply every command in `script` (a JSON array) in order.
pub fn replay_script(script: &str, config: EngineConfig) -> Result<ReplayReport> {
    let commands = parse_script(script).map_err(HarnessError::Script)?;
    info!(commands = commands.len(), "replaying script");

    let mut container = Container::new(config);
    let mut steps = Vec::with_capacity(commands.len());
    for (index, command) in commands.into_iter().enumerate() {
        let outcome = container
            .apply(&command)
            .map_err(|source| HarnessError::Step { index, source })?;
        debug!(index, ?outcome, "step applied");
        steps.push(ReplayStep {
            index,
            command,
            outcome,
        });
    }

    Ok(ReplayReport {
        layout: container.layout(),
        frame_count: container.frame_count(),
        pixel_size: container.pixel_size(),
        steps,
        nodes: container
            .nodes()
            .iter()
            .map(|node| NodeFlex {
                id: node.id,
                label: node.label(),
                flex_width: node.flex_width.get(),
                flex_height: node.flex_height.get(),
            })
            .collect(),
        rects: container.current_pixel_rects(),
        issues: container.invariant_report(),
    })
}

pub fn replay_file(script: &Path, config: Option<&Path>) -> Result<ReplayReport> {
    let config = match config {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };
    let content = std::fs::read_to_string(script)?;
    replay_script(&content, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabgrid_core::PixelRect;
    use tabgrid_layout::DragOutcome;

    #[test]
    fn replays_scenario_b() {
        let report = replay_script(
            r#"[
                {"op": "set_layout", "layout": 1},
                {"op": "resize", "width": 1000, "height": 800},
                {"op": "drag", "separator": 2, "dx": 200}
            ]"#,
            EngineConfig::default(),
        )
        .unwrap();
        assert_eq!(report.layout, Some(LayoutId::DoubleVert));
        assert_eq!(report.steps.len(), 3);
        assert!(matches!(
            report.steps[2].outcome,
            CommandOutcome::Drag(DragOutcome::Applied { .. })
        ));
        assert_eq!(report.rects[0].rect, PixelRect::new(0, 0, 699, 800));
        assert_eq!(report.nodes[0].label, "pane-0");
        assert!(report.issues.is_empty());
    }

    #[test]
    fn failing_step_reports_index() {
        let err = replay_script(
            r#"[{"op": "set_layout", "layout": "SINGLE"}, {"op": "drag", "separator": 0, "dx": 5}]"#,
            EngineConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, HarnessError::Step { index: 1, .. }));
    }

    #[test]
    fn malformed_script_is_script_error() {
        let err = replay_script("{not json", EngineConfig::default()).unwrap_err();
        assert!(matches!(err, HarnessError::Script(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn report_serializes() {
        let report = replay_script(
            r#"[{"op": "set_layout", "layout": "QUAD_SQ_H"}, {"op": "resize", "width": 800, "height": 600}]"#,
            EngineConfig::default(),
        )
        .unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["layout"], "QUAD_SQ_H");
        assert_eq!(json["frame_count"], 4);
        assert_eq!(json["rects"].as_array().unwrap().len(), 7);
    }
}
