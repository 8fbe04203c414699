use crate::workflow::{Branch, NodeId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Workflow-level status of one execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WorkflowStatus {
    Pending,
    Running,
    Completed,
    Failed,
    Cancelled,
}

impl WorkflowStatus {
    /// Completed, failed and cancelled are final.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            WorkflowStatus::Completed | WorkflowStatus::Failed | WorkflowStatus::Cancelled
        )
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WorkflowStatus::Pending => "pending",
            WorkflowStatus::Running => "running",
            WorkflowStatus::Completed => "completed",
            WorkflowStatus::Failed => "failed",
            WorkflowStatus::Cancelled => "cancelled",
        })
    }
}

/// Status of a single node within one execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NodeStatus::Pending => "pending",
            NodeStatus::Running => "running",
            NodeStatus::Completed => "completed",
            NodeStatus::Failed => "failed",
        })
    }
}

/// Per-node result slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeResult {
    pub status: NodeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Finished iterations. Loop nodes count each pass; other nodes reach 1.
    pub iterations: u32,
    /// Branch selected by a completed decision node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<Branch>,
}

impl Default for NodeResult {
    fn default() -> Self {
        Self {
            status: NodeStatus::Pending,
            output: None,
            error: None,
            iterations: 0,
            branch: None,
        }
    }
}

/// The progress ledger of one traversal of a workflow graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionRecord {
    pub workflow_id: String,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub status: WorkflowStatus,
    pub current_node: Option<NodeId>,
    /// Node ids in the order they first started.
    pub visited: Vec<NodeId>,
    pub results: BTreeMap<NodeId, NodeResult>,
}

impl ExecutionRecord {
    pub fn new<'a>(workflow_id: &str, node_ids: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            workflow_id: workflow_id.to_string(),
            started_at: None,
            finished_at: None,
            status: WorkflowStatus::Pending,
            current_node: None,
            visited: Vec::new(),
            results: node_ids
                .into_iter()
                .map(|id| (id.to_string(), NodeResult::default()))
                .collect(),
        }
    }

    pub fn result(&self, node_id: &str) -> Option<&NodeResult> {
        self.results.get(node_id)
    }

    pub fn node_status(&self, node_id: &str) -> Option<NodeStatus> {
        self.results.get(node_id).map(|r| r.status)
    }

    /// Nodes that finished with an error, with their messages.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.results.iter().filter_map(|(id, r)| {
            (r.status == NodeStatus::Failed)
                .then(|| (id.as_str(), r.error.as_deref().unwrap_or("")))
        })
    }
}
