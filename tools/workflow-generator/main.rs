use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use tejun::ui::{UiEdge, UiNode, UiNodeData, UiPosition, UiWorkflow};

/// A CLI tool to generate random editor workflows for stress and determinism checks
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_workflow.json")]
    output: String,

    /// Number of nodes to generate, including the trigger
    #[arg(short, long, default_value_t = 25)]
    nodes: usize,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Add this many back edges, each closing a cycle
    #[arg(long, default_value_t = 0)]
    cycles: usize,
}

/// An unused output handle a later node can attach to.
struct OpenPort {
    node: usize,
    handle: Option<&'static str>,
}

const STEP_TYPES: [&str; 7] = [
    "prompt", "action", "decision", "loop", "subagent", "mcp_call", "output",
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.nodes < 2 {
        eprintln!("Error: --nodes ({}) must be at least 2", cli.nodes);
        std::process::exit(1);
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    println!("Generating a workflow with {} nodes...", cli.nodes);
    let workflow = generate_workflow(&mut rng, cli.nodes, cli.cycles);
    println!(
        "-> Generated {} nodes and {} edges.",
        workflow.nodes.len(),
        workflow.edges.len()
    );

    fs::write(&cli.output, workflow.to_json_pretty()?)?;
    println!("Successfully saved workflow to '{}'", cli.output);

    Ok(())
}

/// Grows a tree from a single trigger: every new node attaches to a random
/// open output, so single-output and per-branch limits always hold. Back
/// edges are drawn from the ports left open afterwards.
fn generate_workflow(rng: &mut StdRng, count: usize, cycles: usize) -> UiWorkflow {
    let mut nodes = vec![make_node(rng, 0, "trigger")];
    let mut edges = Vec::new();
    let mut parents = vec![0usize];
    let mut open = vec![OpenPort {
        node: 0,
        handle: None,
    }];

    for i in 1..count {
        if open.is_empty() {
            break;
        }
        let port = open.swap_remove(rng.random_range(0..open.len()));
        // Keep at least one port alive until the last node so the graph keeps growing.
        let node_type = loop {
            let candidate = STEP_TYPES[rng.random_range(0..STEP_TYPES.len())];
            if candidate != "output" || !open.is_empty() || i == count - 1 {
                break candidate;
            }
        };

        nodes.push(make_node(rng, i, node_type));
        parents.push(port.node);
        edges.push(UiEdge {
            id: Some(format!("e{}", edges.len())),
            source: nodes[port.node].id.clone(),
            target: nodes[i].id.clone(),
            source_handle: port.handle.map(String::from),
            target_handle: None,
            label: None,
            animated: false,
        });

        match node_type {
            "decision" => {
                open.push(OpenPort {
                    node: i,
                    handle: Some("true"),
                });
                open.push(OpenPort {
                    node: i,
                    handle: Some("false"),
                });
            }
            "output" => {}
            _ => open.push(OpenPort {
                node: i,
                handle: None,
            }),
        }
    }

    // Back edges leave from ports that are still open, so they respect the
    // same limits, and point at an ancestor so each one closes a cycle.
    for _ in 0..cycles {
        let candidates: Vec<usize> = (0..open.len())
            .filter(|&i| parents[open[i].node] != 0)
            .collect();
        if candidates.is_empty() {
            break;
        }
        let port = open.swap_remove(candidates[rng.random_range(0..candidates.len())]);
        let mut ancestors = Vec::new();
        let mut current = parents[port.node];
        while current != 0 {
            ancestors.push(current);
            current = parents[current];
        }
        let to = ancestors[rng.random_range(0..ancestors.len())];
        edges.push(UiEdge {
            id: Some(format!("e{}", edges.len())),
            source: nodes[port.node].id.clone(),
            target: nodes[to].id.clone(),
            source_handle: port.handle.map(String::from),
            target_handle: None,
            label: Some("back edge".to_string()),
            animated: true,
        });
    }

    UiWorkflow {
        id: format!("generated-{}", rng.random::<u32>()),
        name: "Generated Workflow".to_string(),
        description: Some(format!("Random workflow with {} steps", nodes.len())),
        version: Some(1),
        created_at: None,
        updated_at: None,
        nodes,
        edges,
    }
}

fn make_node(rng: &mut StdRng, index: usize, node_type: &str) -> UiNode {
    let mut data = UiNodeData {
        label: Some(format!("Step {}", index)),
        ..Default::default()
    };
    match node_type {
        "prompt" => data.prompt = Some(format!("Carry out step {}", index)),
        "action" => data.description = Some(format!("Perform action {}", index)),
        "decision" => data.condition = Some(format!("check {} passes", index)),
        "loop" => data.repeat_count = Some(rng.random_range(1..=5)),
        "subagent" => data.subagent_prompt = Some(format!("Investigate item {}", index)),
        "mcp_call" => {
            if rng.random_bool(0.7) {
                data.mcp_tool = Some("search".to_string());
                data.mcp_server = Some("docs".to_string());
            }
        }
        _ => {}
    }

    UiNode {
        id: format!("n{}", index),
        node_type: node_type.to_string(),
        position: UiPosition {
            x: rng.random_range(0.0..1200.0),
            y: index as f64 * 120.0,
        },
        data,
    }
}
