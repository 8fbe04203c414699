use super::ExportTarget;
use crate::workflow::Workflow;

pub(super) fn render_header(workflow: &Workflow, target: ExportTarget) -> String {
    let description = workflow
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty());

    match target {
        ExportTarget::Command => match description {
            Some(d) => format!("# {}\n\n{}", workflow.name, d),
            None => format!("# {}", workflow.name),
        },
        ExportTarget::Subagent => {
            let mut header = format!("# Subagent: {}", workflow.name);
            if let Some(d) = description {
                header.push_str("\n\n");
                header.push_str(d);
            }
            header.push_str(&format!(
                "\n\n## Context\nYou run in an isolated context dedicated to: {}",
                description.unwrap_or(&workflow.name)
            ));
            header
        }
    }
}
