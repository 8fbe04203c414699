use crate::compiler::{Compiler, Linearization};
use crate::workflow::{NodeType, Workflow};
use ahash::AHashMap;
use std::fmt;
use std::str::FromStr;
use tracing::trace;

mod header;
pub mod sections;

use header::render_header;
use sections::register_default_renderers;
pub use sections::{RenderContext, SectionRenderer};

/// The two document shapes a workflow can be compiled into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExportTarget {
    /// A linear instruction script.
    #[default]
    Command,
    /// A brief for an agent running in its own isolated context.
    Subagent,
}

impl ExportTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportTarget::Command => "command",
            ExportTarget::Subagent => "subagent",
        }
    }
}

impl fmt::Display for ExportTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "command" => Ok(ExportTarget::Command),
            "subagent" => Ok(ExportTarget::Subagent),
            other => Err(format!("unknown export target '{}'", other)),
        }
    }
}

/// A rendered document together with what the compiler had to leave out.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    pub document: String,
    pub target: ExportTarget,
    /// Ids of nodes excluded by cycle handling, in insertion order.
    pub excluded: Vec<String>,
}

/// Renders a workflow into a textual document for one export target.
pub struct Exporter<'w> {
    workflow: &'w Workflow,
    target: ExportTarget,
    branch_hints: bool,
    registry: AHashMap<NodeType, Box<dyn SectionRenderer>>,
}

pub struct ExporterBuilder<'w> {
    workflow: &'w Workflow,
    target: ExportTarget,
    branch_hints: bool,
    registry: AHashMap<NodeType, Box<dyn SectionRenderer>>,
}

impl<'w> ExporterBuilder<'w> {
    pub fn new(workflow: &'w Workflow) -> Self {
        let mut registry: AHashMap<NodeType, Box<dyn SectionRenderer>> = AHashMap::new();
        register_default_renderers(&mut registry);
        Self {
            workflow,
            target: ExportTarget::default(),
            branch_hints: true,
            registry,
        }
    }

    pub fn target(mut self, target: ExportTarget) -> Self {
        self.target = target;
        self
    }

    /// Whether decision sections name the nodes each branch continues with.
    pub fn with_branch_hints(mut self, enabled: bool) -> Self {
        self.branch_hints = enabled;
        self
    }

    /// Adds a renderer, replacing any existing one for the same node type.
    pub fn with_custom_renderer(mut self, renderer: Box<dyn SectionRenderer>) -> Self {
        self.registry.insert(renderer.node_type(), renderer);
        self
    }

    pub fn build(self) -> Exporter<'w> {
        Exporter {
            workflow: self.workflow,
            target: self.target,
            branch_hints: self.branch_hints,
            registry: self.registry,
        }
    }
}

impl<'w> Exporter<'w> {
    pub fn builder(workflow: &'w Workflow) -> ExporterBuilder<'w> {
        ExporterBuilder::new(workflow)
    }

    pub fn target(&self) -> ExportTarget {
        self.target
    }

    /// Linearizes the workflow and renders the document.
    pub fn render(&self) -> String {
        let linearization = Compiler::new(self.workflow).linearize();
        self.render_linearization(&linearization)
    }

    /// Like [`Exporter::render`], but also reports nodes dropped by cycle handling.
    pub fn render_with_report(&self) -> ExportReport {
        let linearization = Compiler::new(self.workflow).linearize();
        ExportReport {
            document: self.render_linearization(&linearization),
            target: self.target,
            excluded: linearization
                .excluded_ids()
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }

    /// Renders an already computed order. The header is emitted once, then
    /// one section per contributing node, separated by blank lines.
    pub fn render_linearization(&self, linearization: &Linearization<'_>) -> String {
        let ctx = RenderContext {
            workflow: self.workflow,
            target: self.target,
            branch_hints: self.branch_hints,
        };

        let mut parts = vec![render_header(self.workflow, self.target)];
        for node in linearization.iter() {
            let Some(renderer) = self.registry.get(&node.node_type()) else {
                continue;
            };
            if let Some(section) = renderer.render(node, &ctx) {
                trace!(node_id = %node.id, node_type = %node.node_type(), "Rendered section");
                parts.push(section);
            }
        }
        parts.join("\n\n")
    }
}

/// Compiles a workflow straight to a document with the default renderers.
pub fn export(workflow: &Workflow, target: ExportTarget) -> String {
    Exporter::builder(workflow).target(target).build().render()
}
