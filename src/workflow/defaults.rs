use super::definition::{Node, NodeKind, NodeType, Position};
use uuid::Uuid;

/// Loop nodes created from the palette start with this many iterations.
pub const DEFAULT_REPEAT_COUNT: u32 = 3;

/// Creates a fresh node of the given type with its default payload.
///
/// The node is not inserted anywhere; the caller decides which workflow
/// receives it.
pub fn add_node(node_type: NodeType, position: Position) -> Node {
    let id = format!("{}-{}", node_type.as_str(), Uuid::new_v4().simple());
    Node::new(id, default_label(node_type), default_kind(node_type)).with_position(position)
}

pub fn default_label(node_type: NodeType) -> &'static str {
    match node_type {
        NodeType::Trigger => "Start",
        NodeType::Prompt => "Prompt",
        NodeType::Action => "Action",
        NodeType::Decision => "Decision",
        NodeType::Loop => "Loop",
        NodeType::Subagent => "Subagent",
        NodeType::McpCall => "MCP Call",
        NodeType::Output => "Output",
    }
}

pub fn default_kind(node_type: NodeType) -> NodeKind {
    match node_type {
        NodeType::Trigger => NodeKind::Trigger,
        NodeType::Prompt => NodeKind::Prompt { prompt: None },
        NodeType::Action => NodeKind::Action,
        NodeType::Decision => NodeKind::Decision { condition: None },
        NodeType::Loop => NodeKind::Loop {
            repeat_count: Some(DEFAULT_REPEAT_COUNT),
        },
        NodeType::Subagent => NodeKind::Subagent { prompt: None },
        NodeType::McpCall => NodeKind::McpCall {
            tool: None,
            server: None,
        },
        NodeType::Output => NodeKind::Output,
    }
}
