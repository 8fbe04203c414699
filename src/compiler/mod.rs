use crate::workflow::{Node, Workflow};
use itertools::Itertools;
use tracing::{debug, warn};

mod ordering;

use ordering::kahn_order;

/// The deterministic linear order of a workflow's nodes.
///
/// Holds references into the compiled workflow; nothing is copied. Nodes that
/// could not be placed because they sit on (or behind) a cycle are kept in
/// `excluded` so callers can surface them.
#[derive(Debug, Clone)]
pub struct Linearization<'w> {
    order: Vec<&'w Node>,
    excluded: Vec<&'w Node>,
}

impl<'w> Linearization<'w> {
    /// The ordered nodes.
    pub fn nodes(&self) -> &[&'w Node] {
        &self.order
    }

    /// Nodes left out by cycle handling, in insertion order.
    pub fn excluded(&self) -> &[&'w Node] {
        &self.excluded
    }

    pub fn has_cycle(&self) -> bool {
        !self.excluded.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'w Node> + '_ {
        self.order.iter().copied()
    }

    pub fn node_ids(&self) -> Vec<&'w str> {
        self.order.iter().map(|n| n.id.as_str()).collect()
    }

    pub fn excluded_ids(&self) -> Vec<&'w str> {
        self.excluded.iter().map(|n| n.id.as_str()).collect()
    }

    /// Position of a node in the order, if it was placed.
    pub fn position_of(&self, node_id: &str) -> Option<usize> {
        self.order.iter().position(|n| n.id == node_id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Linearizes a workflow graph for document compilation.
///
/// Decision nodes do not pick a branch here: both subgraphs are placed in the
/// order because the compiled document has to describe both paths.
pub struct Compiler<'w> {
    workflow: &'w Workflow,
}

impl<'w> Compiler<'w> {
    pub fn new(workflow: &'w Workflow) -> Self {
        Self { workflow }
    }

    pub fn linearize(&self) -> Linearization<'w> {
        let nodes = &self.workflow.nodes;
        debug!(
            workflow_id = %self.workflow.id,
            nodes = nodes.len(),
            edges = self.workflow.edges.len(),
            "Linearizing workflow"
        );

        let ordering = kahn_order(self.workflow);
        let order: Vec<&'w Node> = ordering.order.iter().map(|&i| &nodes[i]).collect();
        let excluded: Vec<&'w Node> = ordering.excluded.iter().map(|&i| &nodes[i]).collect();

        if !excluded.is_empty() {
            warn!(
                workflow_id = %self.workflow.id,
                excluded = %excluded.iter().map(|n| n.id.as_str()).join(", "),
                "Cycle detected; nodes left out of the linear order"
            );
        }
        debug!(ordered = order.len(), excluded = excluded.len(), "Linearization finished");

        Linearization { order, excluded }
    }
}
