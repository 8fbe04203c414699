use crate::compiler::Compiler;
use crate::execution::{ExecutionRecord, NodeResult, NodeStatus};
use crate::workflow::{Node, NodeType, Workflow};
use itertools::Itertools;

/// Formats an execution record into a human-readable progress report.
pub struct ProgressFormatter;

impl ProgressFormatter {
    /// One status line for the workflow, then one line per node in compiled
    /// order. Nodes excluded by cycle handling are listed last.
    pub fn format_record(record: &ExecutionRecord, workflow: &Workflow) -> String {
        let linearization = Compiler::new(workflow).linearize();
        let header = format!("Workflow '{}': {}", workflow.name, record.status);

        let lines = linearization
            .iter()
            .chain(linearization.excluded().iter().copied())
            .map(|node| Self::format_node(node, record.result(&node.id)));

        std::iter::once(header).chain(lines).join("\n")
    }

    fn format_node(node: &Node, result: Option<&NodeResult>) -> String {
        let status = result.map_or(NodeStatus::Pending, |r| r.status);
        let marker = match status {
            NodeStatus::Pending => "[ ]",
            NodeStatus::Running => "[~]",
            NodeStatus::Completed => "[x]",
            NodeStatus::Failed => "[!]",
        };

        let mut line = format!("  {} {} ({})", marker, node.label, node.node_type());
        let Some(result) = result else {
            return line;
        };

        if node.node_type() == NodeType::Loop && result.iterations > 0 {
            line.push_str(&format!(" {}/{}", result.iterations, node.repeat_count()));
        }
        if let Some(branch) = result.branch {
            line.push_str(&format!(" -> {}", branch));
        }
        if let Some(error) = &result.error {
            line.push_str(&format!(": {}", error));
        } else if let Some(output) = &result.output {
            line.push_str(&format!(": {}", Self::first_line(output)));
        }
        line
    }

    /// Keeps multi-line node output from breaking the one-line-per-node layout.
    fn first_line(text: &str) -> &str {
        text.lines().next().unwrap_or("")
    }
}
