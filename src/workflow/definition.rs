use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, stable node identifier as assigned by the editor.
pub type NodeId = String;

/// Canvas coordinates. Carried through untouched; compilation never reads them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The closed set of step types a workflow can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeType {
    Trigger,
    Prompt,
    Action,
    Decision,
    Loop,
    Subagent,
    McpCall,
    Output,
}

impl NodeType {
    pub const ALL: [NodeType; 8] = [
        NodeType::Trigger,
        NodeType::Prompt,
        NodeType::Action,
        NodeType::Decision,
        NodeType::Loop,
        NodeType::Subagent,
        NodeType::McpCall,
        NodeType::Output,
    ];

    /// The editor's type tag for this node type.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Trigger => "trigger",
            NodeType::Prompt => "prompt",
            NodeType::Action => "action",
            NodeType::Decision => "decision",
            NodeType::Loop => "loop",
            NodeType::Subagent => "subagent",
            NodeType::McpCall => "mcp_call",
            NodeType::Output => "output",
        }
    }

    /// Parses an editor type tag. Accepts the camelCase `mcpCall` spelling as well.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "trigger" => Some(NodeType::Trigger),
            "prompt" => Some(NodeType::Prompt),
            "action" => Some(NodeType::Action),
            "decision" => Some(NodeType::Decision),
            "loop" => Some(NodeType::Loop),
            "subagent" => Some(NodeType::Subagent),
            "mcp_call" | "mcpCall" => Some(NodeType::McpCall),
            "output" => Some(NodeType::Output),
            _ => None,
        }
    }

    /// Maximum number of outbound edges on the default (handle-less) output.
    /// Decision nodes are bounded per branch instead and return `None`.
    pub fn max_default_outputs(&self) -> Option<usize> {
        match self {
            NodeType::Decision => None,
            NodeType::Output => Some(0),
            _ => Some(1),
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the two output handles of a decision node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Branch {
    True,
    False,
}

impl Branch {
    pub fn as_str(&self) -> &'static str {
        match self {
            Branch::True => "true",
            Branch::False => "false",
        }
    }

    pub fn from_handle(handle: &str) -> Option<Self> {
        match handle {
            "true" => Some(Branch::True),
            "false" => Some(Branch::False),
            _ => None,
        }
    }
}

impl From<bool> for Branch {
    fn from(outcome: bool) -> Self {
        if outcome { Branch::True } else { Branch::False }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-specific payload of a node. Each variant carries only the fields
/// that are meaningful for its type; all of them are optional.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Trigger,
    Prompt { prompt: Option<String> },
    Action,
    Decision { condition: Option<String> },
    Loop { repeat_count: Option<u32> },
    Subagent { prompt: Option<String> },
    McpCall { tool: Option<String>, server: Option<String> },
    Output,
}

impl NodeKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::Trigger => NodeType::Trigger,
            NodeKind::Prompt { .. } => NodeType::Prompt,
            NodeKind::Action => NodeType::Action,
            NodeKind::Decision { .. } => NodeType::Decision,
            NodeKind::Loop { .. } => NodeType::Loop,
            NodeKind::Subagent { .. } => NodeType::Subagent,
            NodeKind::McpCall { .. } => NodeType::McpCall,
            NodeKind::Output => NodeType::Output,
        }
    }
}

/// A single step of a workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub position: Position,
    pub label: String,
    pub description: Option<String>,
    /// Reference to an equipped inventory item (skill, MCP server, agent...).
    pub inventory_item: Option<String>,
    pub kind: NodeKind,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, label: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            position: Position::default(),
            label: label.into(),
            description: None,
            inventory_item: None,
            kind,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    /// Number of times a loop node runs. Missing or zero counts count as one.
    pub fn repeat_count(&self) -> u32 {
        match self.kind {
            NodeKind::Loop { repeat_count } => repeat_count.unwrap_or(1).max(1),
            _ => 1,
        }
    }
}

/// A directed connection between two nodes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Edge {
    pub id: String,
    pub source: NodeId,
    pub target: NodeId,
    pub source_handle: Option<String>,
    pub target_handle: Option<String>,
    /// Display-only.
    pub label: Option<String>,
    /// Display-only.
    pub animated: bool,
}

impl Edge {
    pub fn new(id: impl Into<String>, source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            ..Default::default()
        }
    }

    pub fn with_source_handle(mut self, handle: impl Into<String>) -> Self {
        self.source_handle = Some(handle.into());
        self
    }

    /// The decision branch this edge leaves from, if its source handle names one.
    pub fn branch(&self) -> Option<Branch> {
        self.source_handle.as_deref().and_then(Branch::from_handle)
    }
}

/// A named graph of nodes and edges. Node order is the editor's insertion
/// order and is significant for deterministic compilation.
#[derive(Debug, Clone, PartialEq)]
pub struct Workflow {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Workflow {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            version: 1,
            created_at: now,
            updated_at: now,
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn node(&self, node_id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == node_id)
    }

    pub fn outgoing<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.source == node_id)
    }

    pub fn incoming<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.target == node_id)
    }

    /// Nodes without any inbound edge, in insertion order.
    pub fn entry_nodes(&self) -> Vec<&Node> {
        self.nodes
            .iter()
            .filter(|n| self.incoming(&n.id).next().is_none())
            .collect()
    }

    pub fn insert_node(&mut self, node: Node) {
        self.nodes.push(node);
        self.touch();
    }

    /// Removes a node. Edges referencing it are left in place; call
    /// [`Workflow::remove_edges_touching`] to discard them.
    pub fn remove_node(&mut self, node_id: &str) -> Option<Node> {
        let index = self.nodes.iter().position(|n| n.id == node_id)?;
        self.touch();
        Some(self.nodes.remove(index))
    }

    /// Removes every edge whose source or target is `node_id`, returning them.
    pub fn remove_edges_touching(&mut self, node_id: &str) -> Vec<Edge> {
        let (removed, kept): (Vec<Edge>, Vec<Edge>) = std::mem::take(&mut self.edges)
            .into_iter()
            .partition(|e| e.source == node_id || e.target == node_id);
        self.edges = kept;
        self.touch();
        removed
    }

    /// Appends an edge from `source` to `target`, optionally leaving from a
    /// decision branch, and returns a reference to it.
    pub fn connect(&mut self, source: &str, target: &str, branch: Option<Branch>) -> &Edge {
        let id = match branch {
            Some(b) => format!("e-{}-{}-{}", source, b, target),
            None => format!("e-{}-{}", source, target),
        };
        let mut edge = Edge::new(id, source, target);
        edge.source_handle = branch.map(|b| b.as_str().to_string());
        self.edges.push(edge);
        self.touch();
        &self.edges[self.edges.len() - 1]
    }

    /// Applies the property editor's mutation to a node. Returns `false` if
    /// no node with that id exists.
    pub fn update_node<F>(&mut self, node_id: &str, update: F) -> bool
    where
        F: FnOnce(&mut Node),
    {
        match self.nodes.iter_mut().find(|n| n.id == node_id) {
            Some(node) => {
                update(node);
                self.touch();
                true
            }
            None => false,
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
