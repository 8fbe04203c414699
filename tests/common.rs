//! Common test utilities for building workflows.
use tejun::prelude::*;

/// `trigger(Start) -> prompt("Summarize the file") -> output`
#[allow(dead_code)]
pub fn create_summarize_workflow() -> Workflow {
    let mut wf = Workflow::new("wf-summarize", "Summarize");
    wf.insert_node(Node::new("start", "Start", NodeKind::Trigger));
    wf.insert_node(Node::new(
        "ask",
        "Prompt",
        NodeKind::Prompt {
            prompt: Some("Summarize the file".to_string()),
        },
    ));
    wf.insert_node(Node::new("done", "Output", NodeKind::Output));
    wf.connect("start", "ask", None);
    wf.connect("ask", "done", None);
    wf
}

/// A decision on "file exists" with one action per branch, both joining an output.
///
/// ```text
/// start -> check -true->  read  -> done
///                -false-> create -> done
/// ```
#[allow(dead_code)]
pub fn create_branching_workflow() -> Workflow {
    let mut wf = Workflow::new("wf-branch", "File Check")
        .with_description("Make sure the config file is in place");
    wf.insert_node(Node::new("start", "Start", NodeKind::Trigger));
    wf.insert_node(Node::new(
        "check",
        "Exists?",
        NodeKind::Decision {
            condition: Some("file exists".to_string()),
        },
    ));
    wf.insert_node(
        Node::new("read", "Read config", NodeKind::Action)
            .with_description("Open the file and load its settings."),
    );
    wf.insert_node(
        Node::new("create", "Create config", NodeKind::Action)
            .with_description("Write a default config file."),
    );
    wf.insert_node(Node::new("done", "Output", NodeKind::Output));
    wf.connect("start", "check", None);
    wf.connect("check", "read", Some(Branch::True));
    wf.connect("check", "create", Some(Branch::False));
    wf.connect("read", "done", None);
    wf.connect("create", "done", None);
    wf
}

/// One node of every type, chained in palette order.
#[allow(dead_code)]
pub fn create_every_type_workflow() -> Workflow {
    let mut wf = Workflow::new("wf-all", "Everything");
    let nodes = vec![
        Node::new("t", "Start", NodeKind::Trigger),
        Node::new(
            "p",
            "Plan",
            NodeKind::Prompt {
                prompt: Some("Plan the change".to_string()),
            },
        ),
        Node::new("a", "Edit files", NodeKind::Action),
        Node::new("l", "Repeat", NodeKind::Loop { repeat_count: Some(2) }),
        Node::new(
            "s",
            "Reviewer",
            NodeKind::Subagent {
                prompt: Some("Review the diff".to_string()),
            },
        ),
        Node::new(
            "m",
            "Search",
            NodeKind::McpCall {
                tool: None,
                server: None,
            },
        ),
        Node::new("o", "Output", NodeKind::Output),
    ];
    for node in nodes {
        wf.insert_node(node);
    }
    for pair in ["t", "p", "a", "l", "s", "m", "o"].windows(2) {
        wf.connect(pair[0], pair[1], None);
    }
    wf
}

/// The editor's JSON for the branching workflow, with a deliberately shuffled node list.
#[allow(dead_code)]
pub const BRANCHING_EDITOR_JSON: &str = r#"{
  "id": "wf-json",
  "name": "Triage",
  "description": "Sort incoming issues",
  "version": 3,
  "createdAt": 1714000000000,
  "updatedAt": 1714000500000,
  "nodes": [
    { "id": "out", "type": "output", "position": { "x": 0, "y": 400 }, "data": { "label": "Done" } },
    { "id": "bug", "type": "mcp_call", "position": { "x": -120, "y": 300 }, "data": { "label": "File bug", "mcpTool": "create_issue", "mcpServer": "github" } },
    { "id": "start", "type": "trigger", "position": { "x": 0, "y": 0 }, "data": { "label": "Start" } },
    { "id": "isbug", "type": "decision", "position": { "x": 0, "y": 200 }, "data": { "label": "Is bug?", "condition": "the issue describes a defect" } },
    { "id": "read", "type": "prompt", "position": { "x": 0, "y": 100 }, "data": { "label": "Read", "prompt": "Read the issue text" } },
    { "id": "ask", "type": "subagent", "position": { "x": 120, "y": 300 }, "data": { "label": "Clarify", "subagentPrompt": "Ask the reporter for details" } }
  ],
  "edges": [
    { "id": "e1", "source": "start", "target": "read", "sourceHandle": null, "targetHandle": null },
    { "id": "e2", "source": "read", "target": "isbug", "animated": true },
    { "id": "e3", "source": "isbug", "target": "bug", "sourceHandle": "true" },
    { "id": "e4", "source": "isbug", "target": "ask", "sourceHandle": "false" },
    { "id": "e5", "source": "bug", "target": "out" },
    { "id": "e6", "source": "ask", "target": "out", "label": "then" }
  ]
}"#;
