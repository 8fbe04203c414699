use super::ExportTarget;
use crate::workflow::{Branch, Node, NodeKind, NodeType, Workflow};
use ahash::AHashMap;

pub const CONDITION_PLACEHOLDER: &str = "Check condition";
pub const TOOL_PLACEHOLDER: &str = "tool";
pub const SERVER_PLACEHOLDER: &str = "server";

/// What a section renderer can see besides the node itself.
pub struct RenderContext<'a> {
    pub workflow: &'a Workflow,
    pub target: ExportTarget,
    pub branch_hints: bool,
}

/// Defines how one node type turns into a document section.
///
/// Returning `None` means the node contributes nothing to the document.
/// Implementations must not fail: missing fields fall back to empty text or a
/// fixed placeholder.
pub trait SectionRenderer: Send + Sync {
    fn node_type(&self) -> NodeType;
    fn render(&self, node: &Node, ctx: &RenderContext<'_>) -> Option<String>;
}

fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn heading_with_body(heading: String, body: &str) -> String {
    if body.is_empty() {
        heading
    } else {
        format!("{}\n{}", heading, body)
    }
}

struct PromptSection;
impl SectionRenderer for PromptSection {
    fn node_type(&self) -> NodeType {
        NodeType::Prompt
    }
    fn render(&self, node: &Node, _ctx: &RenderContext<'_>) -> Option<String> {
        match &node.kind {
            NodeKind::Prompt { prompt } => {
                let raw = text(prompt);
                (!raw.trim().is_empty()).then(|| format!("## Prompt\n{}", raw))
            }
            _ => None,
        }
    }
}

struct ActionSection;
impl SectionRenderer for ActionSection {
    fn node_type(&self) -> NodeType {
        NodeType::Action
    }
    fn render(&self, node: &Node, _ctx: &RenderContext<'_>) -> Option<String> {
        Some(heading_with_body(
            format!("## Action: {}", node.label),
            text(&node.description),
        ))
    }
}

struct DecisionSection;
impl SectionRenderer for DecisionSection {
    fn node_type(&self) -> NodeType {
        NodeType::Decision
    }
    fn render(&self, node: &Node, ctx: &RenderContext<'_>) -> Option<String> {
        let condition = match &node.kind {
            NodeKind::Decision { condition } => non_empty(condition),
            _ => None,
        }
        .unwrap_or(CONDITION_PLACEHOLDER);

        let mut section = format!("## Decision\nCondition: {}", condition);
        if ctx.branch_hints {
            for branch in [Branch::True, Branch::False] {
                let targets = ctx
                    .workflow
                    .outgoing(&node.id)
                    .filter(|e| e.branch() == Some(branch))
                    .filter_map(|e| ctx.workflow.node(&e.target));
                for target in targets {
                    section.push_str(&format!(
                        "\n- If {}: continue with \"{}\"",
                        branch, target.label
                    ));
                }
            }
        }
        Some(section)
    }
}

struct McpCallSection;
impl SectionRenderer for McpCallSection {
    fn node_type(&self) -> NodeType {
        NodeType::McpCall
    }
    fn render(&self, node: &Node, _ctx: &RenderContext<'_>) -> Option<String> {
        let (tool, server) = match &node.kind {
            NodeKind::McpCall { tool, server } => (non_empty(tool), non_empty(server)),
            _ => (None, None),
        };
        let tool = tool.unwrap_or(TOOL_PLACEHOLDER);
        let server = server.unwrap_or(SERVER_PLACEHOLDER);
        Some(format!(
            "## MCP Call: {}\nUse the `{}` tool from the `{}` MCP server.",
            tool, tool, server
        ))
    }
}

struct SubagentSection;
impl SectionRenderer for SubagentSection {
    fn node_type(&self) -> NodeType {
        NodeType::Subagent
    }
    fn render(&self, node: &Node, _ctx: &RenderContext<'_>) -> Option<String> {
        let prompt = match &node.kind {
            NodeKind::Subagent { prompt } => text(prompt),
            _ => "",
        };
        Some(heading_with_body("## Spawn Subagent".to_string(), prompt))
    }
}

struct OutputSection;
impl SectionRenderer for OutputSection {
    fn node_type(&self) -> NodeType {
        NodeType::Output
    }
    fn render(&self, _node: &Node, _ctx: &RenderContext<'_>) -> Option<String> {
        Some("## Output\nReturn the result.".to_string())
    }
}

/// Registers the built-in renderers. Trigger and loop nodes have none and
/// therefore produce no section.
pub(super) fn register_default_renderers(
    registry: &mut AHashMap<NodeType, Box<dyn SectionRenderer>>,
) {
    let defaults: [Box<dyn SectionRenderer>; 6] = [
        Box::new(PromptSection),
        Box::new(ActionSection),
        Box::new(DecisionSection),
        Box::new(McpCallSection),
        Box::new(SubagentSection),
        Box::new(OutputSection),
    ];
    for renderer in defaults {
        registry.insert(renderer.node_type(), renderer);
    }
}
