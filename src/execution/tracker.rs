use super::record::{ExecutionRecord, NodeResult, NodeStatus, WorkflowStatus};
use crate::error::ExecutionError;
use crate::workflow::{Branch, Edge, Node, NodeType, Workflow};
use ahash::AHashMap;
use chrono::Utc;
use tracing::{debug, info, warn};

/// Readiness of an inbound edge, seen from its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EdgeState {
    /// Source completed and the edge is on the taken path.
    Live,
    /// Source will never pass control along this edge in this execution.
    Dead,
    /// Source has not finished yet.
    Blocked,
}

/// Tracks one execution of a workflow graph as an explicit state machine.
///
/// The driver asks which nodes are [`eligible`](Self::eligible), starts one,
/// and reports its completion or failure. Nodes run one at a time. A decision
/// node completes with a branch outcome; successors on the other branch become
/// dead and stay `pending`. Loop nodes re-enter `running` until their repeat
/// count is reached, counting passes on their own result slot.
pub struct ExecutionTracker<'w> {
    workflow: &'w Workflow,
    index: AHashMap<&'w str, usize>,
    incoming: Vec<Vec<&'w Edge>>,
    record: ExecutionRecord,
}

impl<'w> ExecutionTracker<'w> {
    pub fn new(workflow: &'w Workflow) -> Self {
        let mut index: AHashMap<&'w str, usize> = AHashMap::with_capacity(workflow.nodes.len());
        for (i, node) in workflow.nodes.iter().enumerate() {
            index.entry(node.id.as_str()).or_insert(i);
        }

        let mut incoming: Vec<Vec<&'w Edge>> = vec![Vec::new(); workflow.nodes.len()];
        for edge in &workflow.edges {
            if let (Some(_), Some(&target)) =
                (index.get(edge.source.as_str()), index.get(edge.target.as_str()))
            {
                incoming[target].push(edge);
            }
        }

        let record = ExecutionRecord::new(&workflow.id, index.keys().copied());
        Self {
            workflow,
            index,
            incoming,
            record,
        }
    }

    pub fn record(&self) -> &ExecutionRecord {
        &self.record
    }

    pub fn into_record(self) -> ExecutionRecord {
        self.record
    }

    pub fn status(&self) -> WorkflowStatus {
        self.record.status
    }

    pub fn node_status(&self, node_id: &str) -> Option<NodeStatus> {
        self.record.node_status(node_id)
    }

    /// Pending nodes whose predecessors have all completed along the taken
    /// path, in insertion order. Empty once the workflow is finished.
    pub fn eligible(&self) -> Vec<&'w Node> {
        if self.record.status.is_terminal() {
            return Vec::new();
        }
        let dead = self.dead_nodes();
        let workflow = self.workflow;
        workflow
            .nodes
            .iter()
            .enumerate()
            .filter(|(i, node)| self.index.get(node.id.as_str()) == Some(i))
            .filter(|(i, _)| self.is_ready(*i, &dead))
            .map(|(_, node)| node)
            .collect()
    }

    pub fn is_eligible(&self, node_id: &str) -> bool {
        self.eligible().iter().any(|n| n.id == node_id)
    }

    /// Moves an eligible node from `pending` to `running`.
    pub fn start_node(&mut self, node_id: &str) -> Result<(), ExecutionError> {
        self.ensure_active()?;
        let node = self.node(node_id)?;
        if let Some(running) = self.running_node() {
            return Err(ExecutionError::NodeBusy {
                running_node_id: running.to_string(),
            });
        }
        let from = self.slot(node_id)?.status;
        if from != NodeStatus::Pending {
            return Err(ExecutionError::InvalidTransition {
                node_id: node_id.to_string(),
                from,
                to: NodeStatus::Running,
            });
        }
        if !self.is_eligible(node_id) {
            return Err(ExecutionError::NotEligible {
                node_id: node_id.to_string(),
            });
        }

        if self.record.status == WorkflowStatus::Pending {
            self.record.status = WorkflowStatus::Running;
            self.record.started_at = Some(Utc::now());
            info!(workflow_id = %self.record.workflow_id, "Execution started");
        }
        self.slot_mut(node_id)?.status = NodeStatus::Running;
        self.record.current_node = Some(node.id.clone());
        self.record.visited.push(node.id.clone());
        debug!(node_id, from = %from, to = %NodeStatus::Running, "Node transition");
        Ok(())
    }

    /// Reports that a running node finished successfully.
    ///
    /// For a loop node this finishes one pass; the node stays `running` until
    /// its repeat count is reached, or until the workflow is cancelled or
    /// failed. Returns the node's status afterwards.
    pub fn complete_node(
        &mut self,
        node_id: &str,
        output: Option<String>,
    ) -> Result<NodeStatus, ExecutionError> {
        let node = self.node(node_id)?;
        if node.node_type() == NodeType::Decision {
            return Err(ExecutionError::MissingBranchOutcome {
                node_id: node_id.to_string(),
            });
        }
        self.ensure_running(node_id, NodeStatus::Completed)?;

        let repeat = node.repeat_count();
        let stopping = self.record.status.is_terminal();
        let slot = self.slot_mut(node_id)?;
        slot.iterations += 1;
        if output.is_some() {
            slot.output = output;
        }
        // No new pass once the workflow has been cancelled or has failed.
        if node.node_type() == NodeType::Loop && slot.iterations < repeat && !stopping {
            debug!(node_id, iteration = slot.iterations, repeat, "Loop re-entered");
            return Ok(NodeStatus::Running);
        }

        self.finish_node(node_id);
        Ok(NodeStatus::Completed)
    }

    /// Completes a running decision node, selecting the branch to follow.
    pub fn complete_decision(
        &mut self,
        node_id: &str,
        outcome: bool,
        output: Option<String>,
    ) -> Result<Branch, ExecutionError> {
        let node = self.node(node_id)?;
        if node.node_type() != NodeType::Decision {
            return Err(ExecutionError::NotADecision {
                node_id: node_id.to_string(),
            });
        }
        self.ensure_running(node_id, NodeStatus::Completed)?;

        let branch = Branch::from(outcome);
        let slot = self.slot_mut(node_id)?;
        slot.iterations += 1;
        slot.branch = Some(branch);
        if output.is_some() {
            slot.output = output;
        }
        debug!(node_id, branch = %branch, "Decision selected branch");
        self.finish_node(node_id);
        Ok(branch)
    }

    /// Reports that a running node failed. The workflow fails with it unless
    /// it was already cancelled.
    pub fn fail_node(
        &mut self,
        node_id: &str,
        error: impl Into<String>,
    ) -> Result<(), ExecutionError> {
        self.node(node_id)?;
        self.ensure_running(node_id, NodeStatus::Failed)?;

        let error = error.into();
        warn!(node_id, error = %error, "Node failed");
        let slot = self.slot_mut(node_id)?;
        slot.status = NodeStatus::Failed;
        slot.error = Some(error);

        if !self.record.status.is_terminal() {
            self.finish_workflow(WorkflowStatus::Failed);
        }
        Ok(())
    }

    /// Cooperative cancellation. Running nodes may still report back, but no
    /// further node can start.
    pub fn cancel(&mut self) -> Result<(), ExecutionError> {
        self.ensure_active()?;
        self.finish_workflow(WorkflowStatus::Cancelled);
        Ok(())
    }

    fn finish_node(&mut self, node_id: &str) {
        if let Some(slot) = self.record.results.get_mut(node_id) {
            slot.status = NodeStatus::Completed;
        }
        debug!(node_id, from = %NodeStatus::Running, to = %NodeStatus::Completed, "Node transition");
        if self.record.current_node.as_deref() == Some(node_id) {
            self.record.current_node = None;
        }
        if self.record.status == WorkflowStatus::Running && self.eligible().is_empty() {
            self.finish_workflow(WorkflowStatus::Completed);
        }
    }

    fn finish_workflow(&mut self, status: WorkflowStatus) {
        self.record.status = status;
        self.record.finished_at = Some(Utc::now());
        info!(workflow_id = %self.record.workflow_id, status = %status, "Execution finished");
    }

    fn ensure_active(&self) -> Result<(), ExecutionError> {
        let status = self.record.status;
        if status.is_terminal() {
            Err(ExecutionError::WorkflowFinished { status })
        } else {
            Ok(())
        }
    }

    fn ensure_running(&self, node_id: &str, to: NodeStatus) -> Result<(), ExecutionError> {
        let from = self.slot(node_id)?.status;
        if from == NodeStatus::Running {
            Ok(())
        } else {
            Err(ExecutionError::InvalidTransition {
                node_id: node_id.to_string(),
                from,
                to,
            })
        }
    }

    fn running_node(&self) -> Option<&str> {
        self.record
            .results
            .iter()
            .find(|(_, r)| r.status == NodeStatus::Running)
            .map(|(id, _)| id.as_str())
    }

    fn node(&self, node_id: &str) -> Result<&'w Node, ExecutionError> {
        let workflow = self.workflow;
        self.index
            .get(node_id)
            .map(|&i| &workflow.nodes[i])
            .ok_or_else(|| ExecutionError::UnknownNode(node_id.to_string()))
    }

    fn slot(&self, node_id: &str) -> Result<&NodeResult, ExecutionError> {
        self.record
            .results
            .get(node_id)
            .ok_or_else(|| ExecutionError::UnknownNode(node_id.to_string()))
    }

    fn slot_mut(&mut self, node_id: &str) -> Result<&mut NodeResult, ExecutionError> {
        self.record
            .results
            .get_mut(node_id)
            .ok_or_else(|| ExecutionError::UnknownNode(node_id.to_string()))
    }

    fn status_at(&self, i: usize) -> NodeStatus {
        self.record
            .node_status(&self.workflow.nodes[i].id)
            .unwrap_or(NodeStatus::Pending)
    }

    fn edge_state(&self, edge: &Edge, dead: &[bool]) -> EdgeState {
        let Some(&source) = self.index.get(edge.source.as_str()) else {
            return EdgeState::Dead;
        };
        if dead[source] {
            return EdgeState::Dead;
        }
        match self.status_at(source) {
            NodeStatus::Completed => {
                let source_node = &self.workflow.nodes[source];
                if source_node.node_type() != NodeType::Decision {
                    return EdgeState::Live;
                }
                let taken = self
                    .record
                    .result(&source_node.id)
                    .and_then(|r| r.branch);
                if taken.is_some() && edge.branch() == taken {
                    EdgeState::Live
                } else {
                    EdgeState::Dead
                }
            }
            _ => EdgeState::Blocked,
        }
    }

    /// Pending nodes that can never run in this execution: every inbound edge
    /// is dead. Computed to a fixpoint so deadness propagates down chains.
    fn dead_nodes(&self) -> Vec<bool> {
        let mut dead = vec![false; self.workflow.nodes.len()];
        loop {
            let mut changed = false;
            for i in 0..dead.len() {
                if dead[i]
                    || self.incoming[i].is_empty()
                    || self.status_at(i) != NodeStatus::Pending
                {
                    continue;
                }
                if self.incoming[i]
                    .iter()
                    .all(|e| self.edge_state(e, &dead) == EdgeState::Dead)
                {
                    dead[i] = true;
                    changed = true;
                }
            }
            if !changed {
                return dead;
            }
        }
    }

    fn is_ready(&self, i: usize, dead: &[bool]) -> bool {
        if dead[i] || self.status_at(i) != NodeStatus::Pending {
            return false;
        }
        let mut any_live = false;
        for edge in &self.incoming[i] {
            match self.edge_state(edge, dead) {
                EdgeState::Blocked => return false,
                EdgeState::Live => any_live = true,
                EdgeState::Dead => {}
            }
        }
        any_live || self.incoming[i].is_empty()
    }
}
