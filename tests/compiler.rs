//! Tests for linearization: ordering, determinism and cycle exclusion.
mod common;
use common::*;
use tejun::prelude::*;

#[test]
fn test_acyclic_graph_places_every_node_once() {
    for wf in [
        create_summarize_workflow(),
        create_branching_workflow(),
        create_every_type_workflow(),
    ] {
        let linearization = Compiler::new(&wf).linearize();
        assert_eq!(linearization.len(), wf.nodes.len());
        assert!(!linearization.has_cycle());

        let mut ids = linearization.node_ids();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), wf.nodes.len());
    }
}

#[test]
fn test_order_respects_every_edge() {
    let wf = create_branching_workflow();
    let linearization = Compiler::new(&wf).linearize();
    for edge in &wf.edges {
        let source = linearization.position_of(&edge.source).unwrap();
        let target = linearization.position_of(&edge.target).unwrap();
        assert!(source < target, "edge {} is out of order", edge.id);
    }
}

#[test]
fn test_branch_ties_follow_insertion_order() {
    let wf = create_branching_workflow();
    let linearization = Compiler::new(&wf).linearize();
    assert_eq!(
        linearization.node_ids(),
        vec!["start", "check", "read", "create", "done"]
    );
}

#[test]
fn test_linearization_is_deterministic() {
    let wf = create_branching_workflow();
    let first = Compiler::new(&wf).linearize().node_ids();
    for _ in 0..20 {
        assert_eq!(Compiler::new(&wf).linearize().node_ids(), first);
    }
}

#[test]
fn test_nodes_are_borrowed_not_copied() {
    let wf = create_summarize_workflow();
    let linearization = Compiler::new(&wf).linearize();
    assert!(std::ptr::eq(linearization.nodes()[0], &wf.nodes[0]));
}

#[test]
fn test_two_node_cycle_is_excluded_and_reported() {
    let mut wf = Workflow::new("wf-cycle", "Cycle");
    wf.insert_node(Node::new("a", "A", NodeKind::Action));
    wf.insert_node(Node::new("b", "B", NodeKind::Action));
    wf.connect("a", "b", None);
    wf.connect("b", "a", None);

    let linearization = Compiler::new(&wf).linearize();
    assert!(linearization.is_empty());
    assert!(linearization.has_cycle());
    assert_eq!(linearization.excluded_ids(), vec!["a", "b"]);
}

#[test]
fn test_cycle_only_removes_the_affected_part() {
    let mut wf = create_summarize_workflow();
    wf.insert_node(Node::new("x", "X", NodeKind::Action));
    wf.insert_node(Node::new("y", "Y", NodeKind::Action));
    wf.connect("x", "y", None);
    wf.connect("y", "x", None);

    let linearization = Compiler::new(&wf).linearize();
    assert_eq!(linearization.node_ids(), vec!["start", "ask", "done"]);
    assert_eq!(linearization.excluded_ids(), vec!["x", "y"]);
    assert!(linearization.len() < wf.nodes.len());
}

#[test]
fn test_missing_trigger_still_compiles() {
    let mut wf = create_summarize_workflow();
    wf.remove_node("start");
    wf.remove_edges_touching("start");
    let linearization = Compiler::new(&wf).linearize();
    assert_eq!(linearization.node_ids(), vec!["ask", "done"]);
}
