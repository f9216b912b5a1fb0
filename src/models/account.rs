use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::models::macros::str_opt_ref;

/// Payload for creating an account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewAccount {
    /// Instagram login.
    pub login: String,
    /// Instagram password, if already known. Left out of the payload when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Id of the owning user.
    pub user_id: String,
    /// True if the account itself is a decoy profile.
    #[serde(default)]
    pub is_fake: bool,
}

impl NewAccount {
    /// A payload for a regular account without a password.
    pub fn new(user_id: impl Into<String>, login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: None,
            user_id: user_id.into(),
            is_fake: false,
        }
    }
}

/// An Instagram account managed by the service.
///
/// Two accounts are equal when their ids are equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    id: String,

    login: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    password: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,

    /// Worker node the account runs on.
    sub_server_id: String,

    #[serde(default)]
    actions_ids: Vec<String>,

    user_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    proxy: Option<String>,

    #[serde(default)]
    is_fake: bool,

    /// Decoy profiles attached to this account.
    #[serde(default)]
    fakes: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    owner: Option<String>,
}

impl Account {
    /// Returns the service-assigned id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the Instagram login.
    pub fn login(&self) -> &str {
        &self.login
    }

    /// Returns the stored password, if any.
    pub fn password(&self) -> Option<&str> {
        str_opt_ref!(self.password)
    }

    /// Returns the free-form description, if any.
    pub fn description(&self) -> Option<&str> {
        str_opt_ref!(self.description)
    }

    /// Returns the id of the sub-server the account runs on.
    pub fn sub_server_id(&self) -> &str {
        &self.sub_server_id
    }

    /// Returns ids of the actions queued for this account.
    pub fn actions_ids(&self) -> &[String] {
        &self.actions_ids
    }

    /// Returns the id of the owning user.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Returns the id of the attached proxy, if any.
    pub fn proxy(&self) -> Option<&str> {
        str_opt_ref!(self.proxy)
    }

    /// Returns true if this account is a decoy profile.
    pub fn is_fake(&self) -> bool {
        self.is_fake
    }

    /// Returns ids of the decoy profiles attached to this account.
    pub fn fakes(&self) -> &[String] {
        &self.fakes
    }

    /// Returns the id of the account owning this decoy, if any.
    pub fn owner(&self) -> Option<&str> {
        str_opt_ref!(self.owner)
    }
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Account {}

impl Hash for Account {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
