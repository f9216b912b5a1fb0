use chrono::{DateTime, Utc};
use serde_json::json;

use crate::{
    api::InstaproApi,
    client::Call,
    result::Result,
    types::ActionType,
    user::{NewUser, User},
};

impl InstaproApi {
    /// Returns when the user's access to `action_type` ends.
    ///
    /// `account_id` scopes the lookup to one account. `None` matches records
    /// that are not scoped to any account.
    ///
    /// # Errors
    ///
    /// Fails if the user cannot be fetched.
    pub async fn get_subscribe_date(
        &self,
        instance_id: &str,
        action_type: ActionType,
        account_id: Option<&str>,
    ) -> Result<Option<DateTime<Utc>>> {
        let user = self.get_user(instance_id).await?;
        Ok(user.subscribe_date(action_type, account_id))
    }

    /// Extends the user's access to `action_type` by `days`.
    ///
    /// # Errors
    ///
    /// Fails on transport errors.
    pub async fn subscribe(
        &self,
        instance_id: &str,
        action_type: ActionType,
        days: u32,
        account_id: Option<&str>,
    ) -> Result<()> {
        let call = Call::new("/api/users/subscribe").json(json!({
            "instance_id": instance_id,
            "action_type": action_type,
            "days": days,
            "account_id": account_id,
        }));
        self.conn.discard("subscribe", &call).await
    }

    /// Registers a user by Telegram id.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or if the reply is not a [`User`].
    pub async fn create_user(&self, telegram_id: i64) -> Result<User> {
        let call = Call::new("/api/users/create").json(json!(NewUser { telegram_id }));
        let user: User = self.conn.strict("create_user", &call).await?;
        self.conn.note("create_user", &format!("{user:?}"));
        Ok(user)
    }

    /// Looks a user up by Telegram id. `None` if there is no such user.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or if a non-empty reply is not a [`User`].
    pub async fn get_user_by_telegram_id(&self, telegram_id: i64) -> Result<Option<User>> {
        let call = Call::new("/api/users/get_by_telegram_id")
            .json(json!({ "telegram_id": telegram_id }));
        self.conn.nullable("get_user_by_telegram_id", &call).await
    }

    /// Fetches a user.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or if the reply is not a [`User`].
    pub async fn get_user(&self, instance_id: &str) -> Result<User> {
        let call = Call::new("/api/users/get")
            .param("instance_id", instance_id)
            .json(json!({ "instance_id": instance_id }));
        self.conn.strict("get_user", &call).await
    }

    /// Fetches every user.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or if the reply is not a list of users.
    pub async fn get_all_users(&self) -> Result<Vec<User>> {
        let call = Call::new("/api/users/get_all");
        self.conn.strict("get_all_users", &call).await
    }

    /// Deletes a user.
    ///
    /// # Errors
    ///
    /// Fails on transport errors.
    pub async fn delete_user(&self, instance_id: &str) -> Result<()> {
        let call = Call::new("/api/users/delete").json(json!({ "instance_id": instance_id }));
        self.conn.discard("delete_user", &call).await
    }
}
