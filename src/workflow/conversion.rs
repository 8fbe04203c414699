use super::definition::Workflow;
use crate::error::ConversionError;

/// A trait for editor or storage formats that can be turned into a `Workflow`.
///
/// This keeps the compiler independent of any particular document layout: the
/// editor records in [`crate::ui`] implement it, and so can any other format a
/// caller wants to feed in.
///
/// # Example
///
/// ```rust
/// use tejun::error::ConversionError;
/// use tejun::workflow::{IntoWorkflow, Node, NodeKind, Workflow};
///
/// struct Checklist {
///     title: String,
///     steps: Vec<String>,
/// }
///
/// impl IntoWorkflow for Checklist {
///     fn into_workflow(self) -> Result<Workflow, ConversionError> {
///         let mut wf = Workflow::new("checklist", self.title);
///         wf.insert_node(Node::new("start", "Start", NodeKind::Trigger));
///         let mut previous = "start".to_string();
///         for (i, step) in self.steps.into_iter().enumerate() {
///             let id = format!("step-{}", i);
///             wf.insert_node(Node::new(&id, "Prompt", NodeKind::Prompt { prompt: Some(step) }));
///             wf.connect(&previous, &id, None);
///             previous = id;
///         }
///         Ok(wf)
///     }
/// }
///
/// let wf = Checklist { title: "Tidy".into(), steps: vec!["Sort imports".into()] }
///     .into_workflow()
///     .unwrap();
/// assert_eq!(wf.nodes.len(), 2);
/// ```
pub trait IntoWorkflow {
    /// Consumes the value and converts it into a workflow graph.
    fn into_workflow(self) -> Result<Workflow, ConversionError>;
}

impl IntoWorkflow for Workflow {
    fn into_workflow(self) -> Result<Workflow, ConversionError> {
        Ok(self)
    }
}
