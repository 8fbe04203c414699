//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the tejun crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use tejun::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let json = std::fs::read_to_string("path/to/workflow.json")?;
//! let workflow = UiWorkflow::from_json(&json)?.into_workflow()?;
//!
//! for violation in validate(&workflow).violations {
//!     eprintln!("{}", violation);
//! }
//!
//! let report = Exporter::builder(&workflow)
//!     .target(ExportTarget::Subagent)
//!     .build()
//!     .render_with_report();
//! println!("{}", report.document);
//! # Ok(())
//! # }
//! ```

// Graph model
pub use crate::workflow::{
    Branch, Edge, IntoWorkflow, Node, NodeId, NodeKind, NodeType, Position, Severity,
    ValidationReport, Violation, Workflow, add_node, validate,
};

// Editor records
pub use crate::ui::{UiEdge, UiNode, UiNodeData, UiWorkflow};

// Compilation and export
pub use crate::compiler::{Compiler, Linearization};
pub use crate::export::{
    ExportReport, ExportTarget, Exporter, RenderContext, SectionRenderer, export,
};

// Execution tracking
pub use crate::execution::{
    ExecutionRecord, ExecutionTracker, NodeResult, NodeStatus, WorkflowStatus,
};
pub use crate::trace::ProgressFormatter;

// Error types
pub use crate::error::{ConversionError, ExecutionError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
