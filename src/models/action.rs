use std::{
    collections::HashMap,
    hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::types::{ActionStatus, ActionType};

/// Payload for queueing an action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewAction {
    /// What the action does.
    pub action_type: ActionType,
    /// Account the action runs against.
    pub account_id: String,
    /// Free-form parameters.
    #[serde(default)]
    pub data: HashMap<String, String>,
}

/// A queued unit of automation work.
///
/// Status transitions are owned by the service. Two actions are equal when
/// their ids are equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    id: String,
    action_type: ActionType,
    status: ActionStatus,
    account_id: String,
    update_id: String,
    #[serde(default)]
    data: HashMap<String, String>,
    #[serde(default)]
    result: Value,
}

impl Action {
    /// Returns the service-assigned id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the kind of work.
    pub fn action_type(&self) -> ActionType {
        self.action_type
    }

    /// Returns the current status.
    pub fn status(&self) -> ActionStatus {
        self.status
    }

    /// Returns the id of the account the action runs against.
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// Returns the id of the update that queued the action.
    pub fn update_id(&self) -> &str {
        &self.update_id
    }

    /// Returns the free-form parameters.
    pub fn data(&self) -> &HashMap<String, String> {
        &self.data
    }

    /// Returns the untyped result payload. `Null` until the action reports one.
    pub fn result(&self) -> &Value {
        &self.result
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Action {}

impl Hash for Action {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
