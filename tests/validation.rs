//! Tests for structural validation of workflow graphs.
mod common;
use common::*;
use tejun::prelude::*;

#[test]
fn test_fixtures_are_clean() {
    for wf in [
        create_summarize_workflow(),
        create_branching_workflow(),
        create_every_type_workflow(),
    ] {
        let report = validate(&wf);
        assert!(report.is_empty(), "{}: {:?}", wf.id, report.violations);
    }
}

#[test]
fn test_second_outbound_edge_on_action_is_an_error() {
    let mut wf = create_branching_workflow();
    wf.connect("read", "create", None);

    let report = validate(&wf);
    assert!(!report.is_valid());
    assert_eq!(
        report.errors().collect::<Vec<_>>(),
        vec![&Violation::MultipleOutputs {
            node_id: "read".to_string(),
            node_type: NodeType::Action,
            edge_ids: vec!["e-read-done".to_string(), "e-read-create".to_string()],
        }]
    );
}

#[test]
fn test_decision_branch_rules() {
    let mut wf = create_branching_workflow();
    wf.connect("check", "done", Some(Branch::True));
    wf.edges.push(Edge::new("e-bad", "check", "done").with_source_handle("maybe"));

    let report = validate(&wf);
    let violations = report.errors().cloned().collect::<Vec<_>>();
    assert_eq!(violations.len(), 2);
    assert!(violations.contains(&Violation::InvalidBranchHandle {
        node_id: "check".to_string(),
        edge_id: "e-bad".to_string(),
        handle: Some("maybe".to_string()),
    }));
    assert!(violations.iter().any(|v| matches!(
        v,
        Violation::DuplicateBranch { node_id, branch: Branch::True, edge_ids }
            if node_id == "check" && edge_ids.len() == 2
    )));
}

#[test]
fn test_output_cannot_lead_anywhere() {
    let mut wf = create_summarize_workflow();
    wf.connect("done", "ask", None);

    let report = validate(&wf);
    assert_eq!(
        report.violations,
        vec![Violation::OutputHasOutgoingEdge {
            node_id: "done".to_string(),
            edge_id: "e-done-ask".to_string(),
        }]
    );
}

#[test]
fn test_removed_node_leaves_dangling_edges() {
    let mut wf = create_summarize_workflow();
    wf.remove_node("ask");

    let report = validate(&wf);
    let messages: Vec<String> = report.errors().map(|v| v.to_string()).collect();
    assert_eq!(
        messages,
        vec![
            "Edge 'e-start-ask' references missing target node 'ask'",
            "Edge 'e-ask-done' references missing source node 'ask'",
        ]
    );

    wf.remove_edges_touching("ask");
    assert!(validate(&wf).is_valid());
}

#[test]
fn test_trigger_count_is_a_warning() {
    let mut wf = create_summarize_workflow();
    wf.insert_node(Node::new("again", "Second start", NodeKind::Trigger));

    let report = validate(&wf);
    assert!(report.is_valid());
    assert_eq!(
        report.warnings().map(Violation::severity).collect::<Vec<_>>(),
        vec![Severity::Warning]
    );

    wf.remove_node("start");
    wf.remove_node("again");
    wf.remove_edges_touching("start");
    let report = validate(&wf);
    assert_eq!(report.warnings().collect::<Vec<_>>(), vec![&Violation::MissingTrigger]);
}

#[test]
fn test_update_node_edits_in_place() {
    let mut wf = create_branching_workflow();
    let updated = wf.update_node("check", |node| {
        node.kind = NodeKind::Decision {
            condition: Some("config parses".to_string()),
        };
    });
    assert!(updated);
    assert!(!wf.update_node("ghost", |_| {}));

    let document = export(&wf, ExportTarget::Command);
    assert!(document.contains("Condition: config parses"));
    assert!(validate(&wf).is_empty());
}
