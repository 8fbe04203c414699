//! Editor document format and its conversion into the workflow model.

mod types;

pub use types::*;

use crate::error::ConversionError;
use crate::workflow::{
    Edge, IntoWorkflow, Node, NodeKind, NodeType, Position, Workflow, defaults::default_label,
};
use chrono::{DateTime, Utc};

impl UiWorkflow {
    pub fn from_json(json: &str) -> Result<Self, ConversionError> {
        serde_json::from_str(json).map_err(|e| ConversionError::JsonParseError(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String, ConversionError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ConversionError::JsonParseError(e.to_string()))
    }

    fn timestamp(
        &self,
        field: &'static str,
        millis: Option<i64>,
    ) -> Result<Option<DateTime<Utc>>, ConversionError> {
        match millis {
            None => Ok(None),
            Some(value) => DateTime::from_timestamp_millis(value).map(Some).ok_or_else(|| {
                ConversionError::InvalidTimestamp {
                    workflow_id: self.id.clone(),
                    field,
                    value,
                }
            }),
        }
    }
}

impl UiNode {
    fn into_node(self) -> Result<Node, ConversionError> {
        let node_type =
            NodeType::from_tag(&self.node_type).ok_or_else(|| ConversionError::UnknownNodeType {
                node_id: self.id.clone(),
                type_name: self.node_type.clone(),
            })?;

        let data = self.data;
        let kind = match node_type {
            NodeType::Trigger => NodeKind::Trigger,
            NodeType::Prompt => NodeKind::Prompt {
                prompt: data.prompt,
            },
            NodeType::Action => NodeKind::Action,
            NodeType::Decision => NodeKind::Decision {
                condition: data.condition,
            },
            NodeType::Loop => NodeKind::Loop {
                repeat_count: data.repeat_count.or(data.loop_count).or(data.count),
            },
            NodeType::Subagent => NodeKind::Subagent {
                prompt: data.subagent_prompt.or(data.agent_prompt).or(data.prompt),
            },
            NodeType::McpCall => NodeKind::McpCall {
                tool: data.mcp_tool,
                server: data.mcp_server,
            },
            NodeType::Output => NodeKind::Output,
        };

        Ok(Node {
            id: self.id,
            position: Position::new(self.position.x, self.position.y),
            label: data
                .label
                .unwrap_or_else(|| default_label(node_type).to_string()),
            description: data.description,
            inventory_item: data.inventory_item_id.or(data.item_id),
            kind,
        })
    }
}

impl UiEdge {
    fn into_edge(self, ordinal: usize) -> Edge {
        let id = self
            .id
            .unwrap_or_else(|| format!("e{}-{}-{}", ordinal, self.source, self.target));
        Edge {
            id,
            source: self.source,
            target: self.target,
            source_handle: self.source_handle,
            target_handle: self.target_handle,
            label: self.label,
            animated: self.animated,
        }
    }
}

impl IntoWorkflow for UiWorkflow {
    fn into_workflow(self) -> Result<Workflow, ConversionError> {
        let created_at = self.timestamp("createdAt", self.created_at)?;
        let updated_at = self.timestamp("updatedAt", self.updated_at)?;

        let mut workflow = Workflow::new(self.id, self.name);
        workflow.description = self.description;
        workflow.version = self.version.unwrap_or(1);
        if let Some(created) = created_at {
            workflow.created_at = created;
            workflow.updated_at = created;
        }
        if let Some(updated) = updated_at {
            workflow.updated_at = updated;
        }

        workflow.nodes = self
            .nodes
            .into_iter()
            .map(UiNode::into_node)
            .collect::<Result<_, _>>()?;
        workflow.edges = self
            .edges
            .into_iter()
            .enumerate()
            .map(|(i, e)| e.into_edge(i))
            .collect();

        Ok(workflow)
    }
}
