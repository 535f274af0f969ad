//! Node data types and the per-node processing state.

use derive_more::From;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::artifact::Artifact;
use super::id::NodeId;
use super::position::Position;

/// Kind of a workflow node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NodeKind {
    /// Pure source: a user-provided image.
    Upload,
    /// Multi-input transform: N images + prompt -> 1 image.
    Edit,
    /// Zero-input transform: prompt -> 1 image.
    Generate,
    /// Pure sink: displays/exports a produced image, and can itself
    /// act as a source for further chaining.
    Result,
}

/// Processing state of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NodeState {
    /// Not yet invoked, or explicitly reset.
    #[default]
    Idle,
    /// An invocation is in flight.
    Running,
    /// The last invocation produced an output.
    Succeeded,
    /// The last invocation failed.
    Failed,
}

/// Configuration for an upload node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UploadNode {
    /// Original file name of the uploaded image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

/// Configuration for an edit node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EditNode {
    /// Editing prompt applied to the upstream images.
    pub prompt: String,
}

/// Configuration for a generate node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GenerateNode {
    /// Generation prompt.
    pub prompt: String,
}

/// Configuration for a synthesized result node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultNode {
    /// Prompt that produced this result.
    pub prompt: String,
    /// Backend-provided description of the result, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// When the result was produced.
    pub generated_at: Timestamp,
}

/// Kind-specific data of a workflow node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, From)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeData {
    /// User-provided source image.
    Upload(UploadNode),
    /// Multi-image edit transform.
    Edit(EditNode),
    /// Text-to-image generation transform.
    Generate(GenerateNode),
    /// Produced result, display/export only.
    Result(ResultNode),
}

impl NodeData {
    /// Returns the kind of this node data.
    pub const fn kind(&self) -> NodeKind {
        match self {
            NodeData::Upload(_) => NodeKind::Upload,
            NodeData::Edit(_) => NodeKind::Edit,
            NodeData::Generate(_) => NodeKind::Generate,
            NodeData::Result(_) => NodeKind::Result,
        }
    }

    /// Returns whether this is an upload node.
    pub const fn is_upload(&self) -> bool {
        matches!(self, NodeData::Upload(_))
    }

    /// Returns whether this is an edit node.
    pub const fn is_edit(&self) -> bool {
        matches!(self, NodeData::Edit(_))
    }

    /// Returns whether this is a generate node.
    pub const fn is_generate(&self) -> bool {
        matches!(self, NodeData::Generate(_))
    }

    /// Returns whether this is a result node.
    pub const fn is_result(&self) -> bool {
        matches!(self, NodeData::Result(_))
    }

    /// Returns the prompt text, for kinds that carry one.
    pub fn prompt(&self) -> Option<&str> {
        match self {
            NodeData::Edit(n) => Some(&n.prompt),
            NodeData::Generate(n) => Some(&n.prompt),
            NodeData::Result(n) => Some(&n.prompt),
            NodeData::Upload(_) => None,
        }
    }
}

/// A workflow node: kind-specific data plus position, processing
/// state, and the optionally produced output artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique node ID, assigned at creation and never reused.
    pub id: NodeId,
    /// Placement in the visual editor.
    pub position: Position,
    /// Kind-specific configuration.
    pub data: NodeData,
    /// Processing state.
    #[serde(default)]
    pub state: NodeState,
    /// Output artifact, present once the node has succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Artifact>,
    /// Error message from the last failed invocation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Node {
    /// Creates a new idle node with a fresh ID.
    pub fn new(data: impl Into<NodeData>, position: Position) -> Self {
        Self {
            id: NodeId::new(),
            position,
            data: data.into(),
            state: NodeState::Idle,
            output: None,
            error: None,
        }
    }

    /// Creates a new node with a specific ID.
    pub fn with_id(id: NodeId, data: impl Into<NodeData>, position: Position) -> Self {
        Self {
            id,
            ..Self::new(data, position)
        }
    }

    /// Presets the node's output, marking it succeeded.
    ///
    /// Used for seeding upload sources and synthesizing result nodes,
    /// both of which are born with their artifact in hand.
    pub fn with_output(mut self, output: Artifact) -> Self {
        self.output = Some(output);
        self.state = NodeState::Succeeded;
        self
    }

    /// Returns the kind of this node.
    pub const fn kind(&self) -> NodeKind {
        self.data.kind()
    }

    /// Returns whether an invocation is currently in flight.
    pub const fn is_running(&self) -> bool {
        matches!(self.state, NodeState::Running)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_data_kind() {
        assert_eq!(NodeData::from(UploadNode::default()).kind(), NodeKind::Upload);
        assert_eq!(NodeData::from(EditNode::default()).kind(), NodeKind::Edit);
        assert_eq!(
            NodeData::from(GenerateNode::default()).kind(),
            NodeKind::Generate
        );
    }

    #[test]
    fn test_with_output_marks_succeeded() {
        let artifact = Artifact::new("image/png", b"img".as_slice());
        let node = Node::new(UploadNode::default(), Position::default())
            .with_output(artifact.clone());

        assert_eq!(node.state, NodeState::Succeeded);
        assert_eq!(node.output, Some(artifact));
    }

    #[test]
    fn test_node_data_serde_tagging() {
        let data = NodeData::from(GenerateNode {
            prompt: "a red bicycle".into(),
        });
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["type"], "generate");
        assert_eq!(json["prompt"], "a red bicycle");

        let back: NodeData = serde_json::from_value(json).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(NodeKind::Upload.to_string(), "upload");
        assert_eq!(NodeState::Running.to_string(), "running");
    }
}
