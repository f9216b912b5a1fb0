use std::collections::HashMap;

use serde_json::{json, Value};

use crate::{
    action::{Action, NewAction},
    api::InstaproApi,
    client::Call,
    result::Result,
    types::{ActionStatus, ActionType},
};

impl InstaproApi {
    /// Queues an action against an account. `data` defaults to an empty map.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or if the reply is not an [`Action`].
    pub async fn create_action(
        &self,
        account_id: &str,
        action_type: ActionType,
        data: Option<HashMap<String, String>>,
    ) -> Result<Action> {
        let action = NewAction {
            action_type,
            account_id: account_id.to_string(),
            data: data.unwrap_or_default(),
        };
        let call = Call::new("/api/actions/create").json(json!(action));
        self.conn.strict("create_action", &call).await
    }

    /// Takes the next queued action for a worker. `None` when the queue is empty.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or if a JSON reply is not an [`Action`].
    pub async fn get_action_queue(&self, instance_id: &str) -> Result<Option<Action>> {
        let call = Call::new("/api/actions/get_queue").json(json!({ "instance_id": instance_id }));
        self.conn.tolerant("get_action_queue", &call).await
    }

    /// Fetches an action.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or if the reply is not an [`Action`].
    pub async fn get_action(&self, instance_id: &str) -> Result<Action> {
        let call = Call::new("/api/actions/get").json(json!({ "instance_id": instance_id }));
        self.conn.strict("get_action", &call).await
    }

    /// Fetches actions one by one, in the order of `instance_ids`.
    ///
    /// # Errors
    ///
    /// Stops at the first id that still fails after its retries.
    pub async fn get_actions<S: AsRef<str>>(&self, instance_ids: &[S]) -> Result<Vec<Action>> {
        let mut actions = Vec::with_capacity(instance_ids.len());
        for id in instance_ids {
            actions.push(self.get_action(id.as_ref()).await?);
        }
        Ok(actions)
    }

    /// Fetches every action of an account.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or if the reply is not a list of actions.
    pub async fn get_all_actions_by_account(&self, instance_id: &str) -> Result<Vec<Action>> {
        let call = Call::new("/api/actions/get_all_by_account")
            .json(json!({ "instance_id": instance_id }));
        self.conn.strict("get_all_actions_by_account", &call).await
    }

    /// Requests a status change and returns the service's reply as-is.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or if the reply is not JSON.
    pub async fn set_status(&self, instance_id: &str, status: ActionStatus) -> Result<Value> {
        let call = Call::new("/api/actions/set_status")
            .json(json!({ "status": status, "instance_id": instance_id }));
        let reply: Value = self.conn.strict("set_status", &call).await?;
        self.conn.note("set_status", &reply.to_string());
        Ok(reply)
    }

    /// Stores `value` under `key` in the action's result.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or if the reply is not JSON.
    pub async fn set_result(&self, instance_id: &str, key: &str, value: &str) -> Result<Value> {
        let call = Call::new("/api/actions/set_result")
            .json(json!({ "key": key, "value": value, "instance_id": instance_id }));
        self.conn.strict("set_result", &call).await
    }

    /// Reads `key` from the action's result. `None` if unset.
    ///
    /// # Errors
    ///
    /// Fails on transport errors.
    pub async fn get_result(&self, instance_id: &str, key: &str) -> Result<Option<String>> {
        let call = Call::new("/api/actions/get_result")
            .json(json!({ "key": key, "instance_id": instance_id }));
        self.conn.text("get_result", &call).await
    }

    /// Removes `key` from the action's result.
    ///
    /// # Errors
    ///
    /// Fails on transport errors.
    pub async fn delete_result(&self, instance_id: &str, key: &str) -> Result<()> {
        let call = Call::new("/api/actions/delete_result")
            .json(json!({ "key": key, "instance_id": instance_id }));
        self.conn.discard("delete_result", &call).await
    }

    /// Stores `value` under `key` in the action's data.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or if the reply is not JSON.
    pub async fn set_data(&self, instance_id: &str, key: &str, value: &str) -> Result<Value> {
        let call = Call::new("/api/actions/set_data")
            .json(json!({ "key": key, "value": value, "instance_id": instance_id }));
        self.conn.strict("set_data", &call).await
    }

    /// Reads `key` from the action's data. `None` if unset.
    ///
    /// # Errors
    ///
    /// Fails on transport errors.
    pub async fn get_data(&self, instance_id: &str, key: &str) -> Result<Option<String>> {
        let call = Call::new("/api/actions/get_data")
            .json(json!({ "key": key, "instance_id": instance_id }));
        self.conn.text("get_data", &call).await
    }

    /// Removes `key` from the action's data.
    ///
    /// # Errors
    ///
    /// Fails on transport errors.
    pub async fn delete_data(&self, instance_id: &str, key: &str) -> Result<()> {
        let call = Call::new("/api/actions/delete_data")
            .json(json!({ "key": key, "instance_id": instance_id }));
        self.conn.discard("delete_data", &call).await
    }
}
