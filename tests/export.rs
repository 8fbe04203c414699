//! Tests for document rendering in both export targets.
mod common;
use common::*;
use pretty_assertions::assert_eq;
use tejun::prelude::*;

#[test]
fn test_command_document_for_linear_workflow() {
    let wf = create_summarize_workflow();
    let document = export(&wf, ExportTarget::Command);
    assert_eq!(
        document,
        "# Summarize\n\n## Prompt\nSummarize the file\n\n## Output\nReturn the result."
    );
}

#[test]
fn test_command_header_includes_description() {
    let wf = create_summarize_workflow().with_description("Condense a source file.");
    let document = export(&wf, ExportTarget::Command);
    assert!(document.starts_with("# Summarize\n\nCondense a source file.\n\n## Prompt"));
}

#[test]
fn test_subagent_context_falls_back_to_name() {
    let wf = create_summarize_workflow();
    let document = export(&wf, ExportTarget::Subagent);
    assert_eq!(
        document,
        "# Subagent: Summarize\n\n\
         ## Context\nYou run in an isolated context dedicated to: Summarize\n\n\
         ## Prompt\nSummarize the file\n\n\
         ## Output\nReturn the result."
    );
}

#[test]
fn test_subagent_context_uses_description() {
    let wf = create_branching_workflow();
    let document = export(&wf, ExportTarget::Subagent);
    assert!(document.starts_with(
        "# Subagent: File Check\n\nMake sure the config file is in place\n\n\
         ## Context\nYou run in an isolated context dedicated to: Make sure the config file is in place"
    ));
}

#[test]
fn test_decision_renders_once_with_both_branches() {
    let wf = create_branching_workflow();
    let document = export(&wf, ExportTarget::Command);

    assert_eq!(document.matches("## Decision").count(), 1);
    assert!(document.contains("Condition: file exists"));
    assert!(document.contains("## Action: Read config\nOpen the file and load its settings."));
    assert!(document.contains("## Action: Create config\nWrite a default config file."));
    assert!(document.contains("- If true: continue with \"Read config\""));
    assert!(document.contains("- If false: continue with \"Create config\""));

    let decision = document.find("## Decision").unwrap();
    let read = document.find("## Action: Read config").unwrap();
    let create = document.find("## Action: Create config").unwrap();
    assert!(decision < read && read < create);
}

#[test]
fn test_branch_hints_can_be_disabled() {
    let wf = create_branching_workflow();
    let document = Exporter::builder(&wf)
        .with_branch_hints(false)
        .build()
        .render();
    assert!(document.contains("## Decision\nCondition: file exists\n\n## Action: Read config"));
    assert!(!document.contains("If true"));
}

#[test]
fn test_every_type_with_placeholders() {
    let wf = create_every_type_workflow();
    let document = export(&wf, ExportTarget::Command);
    assert_eq!(
        document,
        "# Everything\n\n\
         ## Prompt\nPlan the change\n\n\
         ## Action: Edit files\n\n\
         ## Spawn Subagent\nReview the diff\n\n\
         ## MCP Call: tool\nUse the `tool` tool from the `server` MCP server.\n\n\
         ## Output\nReturn the result."
    );
}

#[test]
fn test_empty_and_missing_fields_degrade() {
    let mut wf = Workflow::new("wf", "Sparse");
    wf.insert_node(Node::new(
        "p",
        "Prompt",
        NodeKind::Prompt {
            prompt: Some("   ".to_string()),
        },
    ));
    wf.insert_node(Node::new("d", "Decision", NodeKind::Decision { condition: None }));
    wf.insert_node(Node::new("s", "Subagent", NodeKind::Subagent { prompt: None }));
    wf.connect("p", "d", None);
    wf.connect("d", "s", Some(Branch::False));

    let document = export(&wf, ExportTarget::Command);
    assert!(!document.contains("## Prompt"));
    assert!(document.contains("## Decision\nCondition: Check condition\n- If false: continue with \"Subagent\""));
    assert!(document.ends_with("## Spawn Subagent"));
}

#[test]
fn test_cyclic_nodes_are_missing_from_document_but_reported() {
    let mut wf = create_summarize_workflow();
    wf.insert_node(Node::new("x", "Loop back", NodeKind::Action));
    wf.insert_node(Node::new("y", "Loop forth", NodeKind::Action));
    wf.connect("x", "y", None);
    wf.connect("y", "x", None);

    let report = Exporter::builder(&wf).build().render_with_report();
    assert!(!report.document.contains("Loop back"));
    assert_eq!(report.excluded, vec!["x".to_string(), "y".to_string()]);
    assert_eq!(report.target, ExportTarget::Command);
}

#[test]
fn test_documents_are_byte_identical_across_runs() {
    let wf = create_branching_workflow();
    for target in [ExportTarget::Command, ExportTarget::Subagent] {
        let first = export(&wf, target);
        for _ in 0..10 {
            assert_eq!(export(&wf, target), first);
        }
    }
}

struct LoopSection;

impl SectionRenderer for LoopSection {
    fn node_type(&self) -> NodeType {
        NodeType::Loop
    }

    fn render(&self, node: &Node, ctx: &RenderContext<'_>) -> Option<String> {
        let verb = match ctx.target {
            ExportTarget::Command => "Repeat",
            ExportTarget::Subagent => "Iterate",
        };
        Some(format!("## Loop\n{} {} times.", verb, node.repeat_count()))
    }
}

#[test]
fn test_custom_renderer_adds_a_section() {
    let wf = create_every_type_workflow();
    let document = Exporter::builder(&wf)
        .target(ExportTarget::Command)
        .with_custom_renderer(Box::new(LoopSection))
        .build()
        .render();
    assert!(document.contains("## Action: Edit files\n\n## Loop\nRepeat 2 times.\n\n## Spawn Subagent"));
}

#[test]
fn test_export_target_parses_from_str() {
    assert_eq!("command".parse::<ExportTarget>(), Ok(ExportTarget::Command));
    assert_eq!("Subagent".parse::<ExportTarget>(), Ok(ExportTarget::Subagent));
    assert!("script".parse::<ExportTarget>().is_err());
}
