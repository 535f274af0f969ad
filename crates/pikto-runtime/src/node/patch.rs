//! Shallow-merge update carrier for node config edits.

use serde::{Deserialize, Serialize};

use super::data::{Node, NodeData};
use super::position::Position;

/// A partial node update, applied by shallow merge.
///
/// Fields left as `None` do not touch the node. Config edits never
/// clear a node's output or processing state implicitly; only an
/// invocation or an explicit reset does that.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodePatch {
    /// New prompt text, for kinds that carry one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    /// New file name, for upload nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// New position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// Clears the node's error message.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub clear_error: bool,
}

impl NodePatch {
    /// Creates an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the prompt text.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Sets the file name.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Sets the position.
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Marks the error message for clearing.
    pub fn clearing_error(mut self) -> Self {
        self.clear_error = true;
        self
    }

    /// Applies this patch to a node in place.
    pub(crate) fn apply(&self, node: &mut Node) {
        if let Some(prompt) = &self.prompt {
            match &mut node.data {
                NodeData::Edit(n) => n.prompt = prompt.clone(),
                NodeData::Generate(n) => n.prompt = prompt.clone(),
                NodeData::Result(n) => n.prompt = prompt.clone(),
                // Upload nodes carry no prompt; ignored.
                NodeData::Upload(_) => {}
            }
        }
        if let Some(file_name) = &self.file_name {
            if let NodeData::Upload(n) = &mut node.data {
                n.file_name = Some(file_name.clone());
            }
        }
        if let Some(position) = self.position {
            node.position = position;
        }
        if self.clear_error {
            node.error = None;
        }
    }
}
