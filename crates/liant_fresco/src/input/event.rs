//! Edits and the UI events they dispatch.

use liant_atelier::{UiEvent, READ_EVENT};
use serde::{Deserialize, Serialize};

use crate::error::{TreeError, TreeResult};
use crate::render::{ElementTree, NodeId, NodeKind};

/// Names of the UI events dispatched by edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventName {
    /// Text was typed
    Input,
    /// A control's value was committed
    Change,
    /// A checkbox was toggled
    Checked,
    /// An option was chosen
    Selected,
    /// The host asks for a full read
    Read,
}

impl EventName {
    pub fn as_str(self) -> &'static str {
        match self {
            EventName::Input => "input",
            EventName::Change => "change",
            EventName::Checked => "checked",
            EventName::Selected => "selected",
            EventName::Read => READ_EVENT,
        }
    }

    /// Build the event for `target`.
    pub fn on(self, target: NodeId) -> UiEvent<NodeId> {
        UiEvent::new(self.as_str(), target)
    }
}

/// A user edit to a single element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edit {
    /// Replace the text of an entry
    Type(String),
    /// Set a checkbox
    Check(bool),
    /// Flip a checkbox
    Toggle,
    /// Choose the option with this value
    Choose(String),
}

impl Edit {
    /// Event dispatched after this edit.
    pub fn event_name(&self) -> EventName {
        match self {
            Edit::Type(_) => EventName::Input,
            Edit::Check(_) | Edit::Toggle => EventName::Checked,
            Edit::Choose(_) => EventName::Selected,
        }
    }
}

impl ElementTree {
    /// Apply `edit` to `target` and return the event it dispatches.
    pub fn apply_edit(&mut self, target: NodeId, edit: Edit) -> TreeResult<UiEvent<NodeId>> {
        let name = edit.event_name();
        let node = self.node_mut(target)?;

        match (&mut node.kind, edit) {
            (NodeKind::Input(input), Edit::Type(text)) => input.value = text.into(),
            (NodeKind::Checkbox(checkbox), Edit::Check(checked)) => checkbox.checked = checked,
            (NodeKind::Checkbox(checkbox), Edit::Toggle) => checkbox.checked = !checkbox.checked,
            (NodeKind::Select(select), Edit::Choose(value)) => {
                if !select.select(&value) {
                    return Err(TreeError::WrongControl {
                        id: target,
                        expected: "select with that option",
                    });
                }
            }
            (_, edit) => {
                return Err(TreeError::WrongControl {
                    id: target,
                    expected: match edit {
                        Edit::Type(_) => "text entry",
                        Edit::Check(_) | Edit::Toggle => "checkbox",
                        Edit::Choose(_) => "select",
                    },
                });
            }
        }

        Ok(name.on(target))
    }

    /// Type `text` into a text entry.
    pub fn type_text(&mut self, target: NodeId, text: &str) -> TreeResult<UiEvent<NodeId>> {
        self.apply_edit(target, Edit::Type(text.to_string()))
    }

    /// Flip a checkbox.
    pub fn toggle(&mut self, target: NodeId) -> TreeResult<UiEvent<NodeId>> {
        self.apply_edit(target, Edit::Toggle)
    }

    /// Choose an option of a select control by value.
    pub fn choose(&mut self, target: NodeId, value: &str) -> TreeResult<UiEvent<NodeId>> {
        self.apply_edit(target, Edit::Choose(value.to_string()))
    }
}
