//! Template catalogue and validation reports.

use serde::Serialize;
use tabgrid_layout::{EngineConfig, LayoutId, LayoutIssue, check_invariants, instantiate};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutSummary {
    pub code: u8,
    pub name: &'static str,
    pub frames: usize,
    pub separators: usize,
}

/// One row per layout, in code order.
#[must_use]
pub fn layout_catalogue() -> Vec<LayoutSummary> {
    LayoutId::ALL
        .into_iter()
        .map(|id| {
            let template = instantiate(id);
            LayoutSummary {
                code: id.code(),
                name: id.name(),
                frames: template.frame_count(),
                separators: template.nodes.iter().filter(|n| n.is_separator()).count(),
            }
        })
        .collect()
}

#[must_use]
pub fn render_catalogue(rows: &[LayoutSummary]) -> String {
    let mut out = format!("{:>4}  {:<20} {:>6} {:>10}\n", "code", "name", "frames", "separators");
    for row in rows {
        out.push_str(&format!(
            "{:>4}  {:<20} {:>6} {:>10}\n",
            row.code, row.name, row.frames, row.separators
        ));
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateReport {
    pub layout: LayoutId,
    pub issues: Vec<LayoutIssue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub config: EngineConfig,
    pub templates: Vec<TemplateReport>,
}

impl ValidationReport {
    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.templates.iter().map(|t| t.issues.len()).sum()
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issue_count() == 0
    }

    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for template in &self.templates {
            if template.issues.is_empty() {
                out.push_str(&format!("ok    {}\n", template.layout));
                continue;
            }
            out.push_str(&format!("FAIL  {}\n", template.layout));
            for issue in &template.issues {
                out.push_str(&format!("      {issue:?}\n"));
            }
        }
        out
    }
}

/// Check every template against `config`'s minimums.
#[must_use]
pub fn validate_templates(config: &EngineConfig) -> ValidationReport {
    let templates = LayoutId::ALL
        .into_iter()
        .map(|layout| {
            let template = instantiate(layout);
            TemplateReport {
                layout,
                issues: check_invariants(&template.nodes, &template.placement, config),
            }
        })
        .collect();
    ValidationReport {
        config: *config,
        templates,
    }
}
