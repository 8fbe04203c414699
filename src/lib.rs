//! # Tejun - Workflow Compilation Engine
//!
//! **Tejun** turns a visually composed automation procedure, a directed graph of
//! typed steps (triggers, prompts, decisions, loops, tool and agent calls,
//! outputs), into a linear instruction document that a language-model driven
//! agent can follow. Identical graphs always compile to byte-identical
//! documents.
//!
//! ## Core Workflow
//!
//! 1.  **Load the Graph**: Parse the editor's document into [`ui::UiWorkflow`], or
//!     implement [`workflow::IntoWorkflow`] for your own format.
//! 2.  **Validate**: [`workflow::validate`] reports structural problems without
//!     failing. Compilation works on unvalidated graphs too.
//! 3.  **Linearize**: [`compiler::Compiler`] orders the nodes with Kahn's
//!     algorithm and reports nodes that a cycle kept out of the order.
//! 4.  **Export**: [`export::Exporter`] renders the order as a `command` script
//!     or a `subagent` brief.
//! 5.  **Track Execution**: [`execution::ExecutionTracker`] is the state machine
//!     an execution driver reports progress to.
//!
//! ## Quick Start
//!
//! ```rust
//! use tejun::prelude::*;
//!
//! let mut wf = Workflow::new("wf-1", "Summarize");
//! wf.insert_node(Node::new("start", "Start", NodeKind::Trigger));
//! wf.insert_node(Node::new(
//!     "ask",
//!     "Prompt",
//!     NodeKind::Prompt { prompt: Some("Summarize the file".to_string()) },
//! ));
//! wf.insert_node(Node::new("done", "Output", NodeKind::Output));
//! wf.connect("start", "ask", None);
//! wf.connect("ask", "done", None);
//!
//! assert!(validate(&wf).is_valid());
//!
//! let document = Exporter::builder(&wf)
//!     .target(ExportTarget::Command)
//!     .build()
//!     .render();
//!
//! assert_eq!(
//!     document,
//!     "# Summarize\n\n## Prompt\nSummarize the file\n\n## Output\nReturn the result."
//! );
//! ```

pub mod compiler;
pub mod error;
pub mod execution;
pub mod export;
pub mod prelude;
pub mod trace;
pub mod ui;
pub mod workflow;
