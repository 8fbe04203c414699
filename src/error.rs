use crate::execution::{NodeStatus, WorkflowStatus};
use thiserror::Error;

/// Errors that can occur when converting an editor document into a `Workflow`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("Failed to parse workflow JSON: {0}")]
    JsonParseError(String),

    #[error("Node '{node_id}' has an unknown node type: '{type_name}'")]
    UnknownNodeType { node_id: String, type_name: String },

    #[error("Workflow '{workflow_id}' has an out-of-range {field} timestamp: {value}")]
    InvalidTimestamp {
        workflow_id: String,
        field: &'static str,
        value: i64,
    },
}

/// Errors raised by the execution tracker when a driver requests an illegal transition.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExecutionError {
    #[error("Node '{0}' does not exist in this workflow")]
    UnknownNode(String),

    #[error("Node '{node_id}' cannot start until its predecessors have completed")]
    NotEligible { node_id: String },

    #[error("Node '{node_id}' cannot move from {from} to {to}")]
    InvalidTransition {
        node_id: String,
        from: NodeStatus,
        to: NodeStatus,
    },

    #[error("Node '{running_node_id}' is still running; nodes run one at a time")]
    NodeBusy { running_node_id: String },

    #[error("Workflow has already finished with status {status}")]
    WorkflowFinished { status: WorkflowStatus },

    #[error("Decision node '{node_id}' must be completed with a branch outcome")]
    MissingBranchOutcome { node_id: String },

    #[error("Node '{node_id}' is not a decision node and cannot select a branch")]
    NotADecision { node_id: String },
}
