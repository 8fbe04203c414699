use super::definition::{Branch, Edge, NodeId, NodeType, Workflow};
use ahash::{AHashMap, AHashSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// Which end of an edge a violation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Target,
}

/// A structural problem found in a workflow graph.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    DanglingEdge {
        edge_id: String,
        endpoint: Endpoint,
        missing_node_id: NodeId,
    },
    DuplicateNodeId {
        node_id: NodeId,
    },
    DuplicateBranch {
        node_id: NodeId,
        branch: Branch,
        edge_ids: Vec<String>,
    },
    InvalidBranchHandle {
        node_id: NodeId,
        edge_id: String,
        handle: Option<String>,
    },
    MultipleOutputs {
        node_id: NodeId,
        node_type: NodeType,
        edge_ids: Vec<String>,
    },
    OutputHasOutgoingEdge {
        node_id: NodeId,
        edge_id: String,
    },
    MissingTrigger,
    MultipleTriggers {
        node_ids: Vec<NodeId>,
    },
}

impl Violation {
    pub fn severity(&self) -> Severity {
        match self {
            Violation::MissingTrigger | Violation::MultipleTriggers { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::DanglingEdge {
                edge_id,
                endpoint,
                missing_node_id,
            } => {
                let end = match endpoint {
                    Endpoint::Source => "source",
                    Endpoint::Target => "target",
                };
                write!(
                    f,
                    "Edge '{}' references missing {} node '{}'",
                    edge_id, end, missing_node_id
                )
            }
            Violation::DuplicateNodeId { node_id } => {
                write!(f, "Node id '{}' is used more than once", node_id)
            }
            Violation::DuplicateBranch {
                node_id,
                branch,
                edge_ids,
            } => write!(
                f,
                "Decision node '{}' has {} edges on its '{}' handle: {}",
                node_id,
                edge_ids.len(),
                branch,
                edge_ids.join(", ")
            ),
            Violation::InvalidBranchHandle {
                node_id,
                edge_id,
                handle,
            } => write!(
                f,
                "Edge '{}' leaves decision node '{}' from handle {}; expected 'true' or 'false'",
                edge_id,
                node_id,
                handle
                    .as_deref()
                    .map_or_else(|| "<none>".to_string(), |h| format!("'{}'", h))
            ),
            Violation::MultipleOutputs {
                node_id,
                node_type,
                edge_ids,
            } => write!(
                f,
                "Node '{}' of type {} allows one outbound edge but has {}: {}",
                node_id,
                node_type,
                edge_ids.len(),
                edge_ids.join(", ")
            ),
            Violation::OutputHasOutgoingEdge { node_id, edge_id } => write!(
                f,
                "Output node '{}' must not have outbound edges, found '{}'",
                node_id, edge_id
            ),
            Violation::MissingTrigger => write!(f, "Workflow has no trigger node"),
            Violation::MultipleTriggers { node_ids } => write!(
                f,
                "Workflow has {} trigger nodes: {}",
                node_ids.len(),
                node_ids.join(", ")
            ),
        }
    }
}

/// The outcome of [`validate`]. Violations are listed in a stable order:
/// node-level checks follow node insertion order, edge checks follow edge order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// True when no error-severity violation was found. Warnings are allowed.
    pub fn is_valid(&self) -> bool {
        self.errors().next().is_none()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Violation> {
        self.violations
            .iter()
            .filter(|v| v.severity() == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Violation> {
        self.violations
            .iter()
            .filter(|v| v.severity() == Severity::Warning)
    }
}

/// Checks the structural invariants of a workflow graph.
///
/// Nothing here fails: every problem is collected into the report and the
/// caller decides whether to block compilation.
pub fn validate(workflow: &Workflow) -> ValidationReport {
    let mut violations = Vec::new();

    let mut seen: AHashSet<&str> = AHashSet::with_capacity(workflow.nodes.len());
    for node in &workflow.nodes {
        if !seen.insert(node.id.as_str()) {
            violations.push(Violation::DuplicateNodeId {
                node_id: node.id.clone(),
            });
        }
    }

    let mut outbound: AHashMap<&str, Vec<&Edge>> = AHashMap::new();
    for edge in &workflow.edges {
        if !seen.contains(edge.source.as_str()) {
            violations.push(Violation::DanglingEdge {
                edge_id: edge.id.clone(),
                endpoint: Endpoint::Source,
                missing_node_id: edge.source.clone(),
            });
        } else {
            outbound.entry(edge.source.as_str()).or_default().push(edge);
        }
        if !seen.contains(edge.target.as_str()) {
            violations.push(Violation::DanglingEdge {
                edge_id: edge.id.clone(),
                endpoint: Endpoint::Target,
                missing_node_id: edge.target.clone(),
            });
        }
    }

    let mut checked: AHashSet<&str> = AHashSet::with_capacity(workflow.nodes.len());
    for node in &workflow.nodes {
        if !checked.insert(node.id.as_str()) {
            continue;
        }
        let Some(edges) = outbound.get(node.id.as_str()) else {
            continue;
        };
        let node_type = node.node_type();
        match node_type {
            NodeType::Decision => check_decision_edges(&node.id, edges, &mut violations),
            NodeType::Output => {
                for edge in edges {
                    violations.push(Violation::OutputHasOutgoingEdge {
                        node_id: node.id.clone(),
                        edge_id: edge.id.clone(),
                    });
                }
            }
            _ => {
                if edges.len() > 1 {
                    violations.push(Violation::MultipleOutputs {
                        node_id: node.id.clone(),
                        node_type,
                        edge_ids: edges.iter().map(|e| e.id.clone()).collect(),
                    });
                }
            }
        }
    }

    let triggers: Vec<NodeId> = workflow
        .nodes
        .iter()
        .filter(|n| n.node_type() == NodeType::Trigger)
        .map(|n| n.id.clone())
        .collect();
    match triggers.len() {
        0 => violations.push(Violation::MissingTrigger),
        1 => {}
        _ => violations.push(Violation::MultipleTriggers { node_ids: triggers }),
    }

    ValidationReport { violations }
}

fn check_decision_edges(node_id: &str, edges: &[&Edge], violations: &mut Vec<Violation>) {
    let mut per_branch: [Vec<String>; 2] = [Vec::new(), Vec::new()];
    for edge in edges {
        match edge.branch() {
            Some(Branch::True) => per_branch[0].push(edge.id.clone()),
            Some(Branch::False) => per_branch[1].push(edge.id.clone()),
            None => violations.push(Violation::InvalidBranchHandle {
                node_id: node_id.to_string(),
                edge_id: edge.id.clone(),
                handle: edge.source_handle.clone(),
            }),
        }
    }
    for (branch, edge_ids) in [Branch::True, Branch::False].into_iter().zip(per_branch) {
        if edge_ids.len() > 1 {
            violations.push(Violation::DuplicateBranch {
                node_id: node_id.to_string(),
                branch,
                edge_ids,
            });
        }
    }
}
