use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{de_datetime, macros::str_opt_ref, types::ActionType};

/// Payload for registering a user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewUser {
    /// Telegram id of the user.
    pub telegram_id: i64,
}

/// Paid access to one action type, optionally scoped to one account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscribe {
    action_type: ActionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    account_id: Option<String>,
    #[serde(deserialize_with = "de_datetime")]
    subscribe_date: DateTime<Utc>,
}

impl Subscribe {
    /// Returns the action type the subscription covers.
    pub fn action_type(&self) -> ActionType {
        self.action_type
    }

    /// Returns the account the subscription is scoped to, if any.
    pub fn account_id(&self) -> Option<&str> {
        str_opt_ref!(self.account_id)
    }

    /// Returns when the subscription ends.
    pub fn subscribe_date(&self) -> DateTime<Utc> {
        self.subscribe_date
    }

    /// Returns true if this record covers `action_type` for `account_id`.
    pub fn covers(&self, action_type: ActionType, account_id: Option<&str>) -> bool {
        self.action_type == action_type && self.account_id() == account_id
    }
}

/// The root owner of accounts, subscriptions and decoys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    telegram_id: i64,
    id: String,
    #[serde(default)]
    accounts_ids: Vec<String>,
    #[serde(default)]
    subscribes: Vec<Subscribe>,
    #[serde(default)]
    fakes: Vec<String>,
}

impl User {
    /// Returns the Telegram id.
    pub fn telegram_id(&self) -> i64 {
        self.telegram_id
    }

    /// Returns the service-assigned id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns ids of the user's accounts.
    pub fn accounts_ids(&self) -> &[String] {
        &self.accounts_ids
    }

    /// Returns the user's subscriptions.
    pub fn subscribes(&self) -> &[Subscribe] {
        &self.subscribes
    }

    /// Returns ids of the user's decoy profiles.
    pub fn fakes(&self) -> &[String] {
        &self.fakes
    }

    /// Returns when access to `action_type` on `account_id` ends.
    ///
    /// The first matching record wins.
    pub fn subscribe_date(
        &self,
        action_type: ActionType,
        account_id: Option<&str>,
    ) -> Option<DateTime<Utc>> {
        self.subscribes
            .iter()
            .find(|s| s.covers(action_type, account_id))
            .map(Subscribe::subscribe_date)
    }
}
