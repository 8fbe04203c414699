use crate::workflow::Workflow;
use ahash::AHashMap;
use std::collections::VecDeque;

/// Node indices split into the linear order and the nodes that never became ready.
pub(super) struct Ordering {
    pub(super) order: Vec<usize>,
    pub(super) excluded: Vec<usize>,
}

/// Kahn's algorithm over the workflow's edges.
///
/// The frontier is FIFO. Nodes released by the same step are queued in their
/// insertion order, so the result depends only on the node and edge lists.
/// Edges with an unknown endpoint are ignored. Nodes on a cycle, and anything
/// reachable only through one, keep a non-zero in-degree and end up in
/// `excluded`.
pub(super) fn kahn_order(workflow: &Workflow) -> Ordering {
    let count = workflow.nodes.len();

    let mut index: AHashMap<&str, usize> = AHashMap::with_capacity(count);
    for (i, node) in workflow.nodes.iter().enumerate() {
        index.entry(node.id.as_str()).or_insert(i);
    }

    let mut in_degree = vec![0usize; count];
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); count];
    for edge in &workflow.edges {
        if let (Some(&source), Some(&target)) =
            (index.get(edge.source.as_str()), index.get(edge.target.as_str()))
        {
            successors[source].push(target);
            in_degree[target] += 1;
        }
    }

    let mut frontier: VecDeque<usize> = (0..count).filter(|&i| in_degree[i] == 0).collect();
    let mut order = Vec::with_capacity(count);
    let mut released = Vec::new();

    while let Some(current) = frontier.pop_front() {
        order.push(current);
        for &next in &successors[current] {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                released.push(next);
            }
        }
        released.sort_unstable();
        frontier.extend(released.drain(..));
    }

    let excluded = (0..count).filter(|&i| in_degree[i] > 0).collect();
    Ordering { order, excluded }
}
