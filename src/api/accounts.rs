use serde_json::json;

use crate::{
    account::{Account, NewAccount},
    api::InstaproApi,
    client::Call,
    result::Result,
};

impl InstaproApi {
    /// Updates the credentials and description of an account.
    ///
    /// Unset values are sent as `null`.
    ///
    /// # Errors
    ///
    /// Fails on transport errors.
    pub async fn update_account(
        &self,
        instance_id: &str,
        username: Option<&str>,
        password: Option<&str>,
        description: Option<&str>,
    ) -> Result<()> {
        let call = Call::new("/api/accounts/update").json(json!({
            "instance_id": instance_id,
            "username": username,
            "password": password,
            "description": description,
        }));
        self.conn.discard("update_account", &call).await
    }

    /// Registers an account for the user `user_id`.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or if the reply is not an [`Account`].
    pub async fn create_account(&self, user_id: &str, login: &str, is_fake: bool) -> Result<Account> {
        let account = NewAccount {
            is_fake,
            ..NewAccount::new(user_id, login)
        };
        let call = Call::new("/api/accounts/create").json(json!(account));
        self.conn.strict("create_account", &call).await
    }

    /// Attaches a free decoy profile to an account.
    ///
    /// Returns `None` when the service has no decoy to give, which it signals
    /// with an empty or non-JSON reply.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or if a JSON reply is not an [`Account`].
    pub async fn add_fake(&self, instance_id: &str) -> Result<Option<Account>> {
        let call = Call::new("/api/accounts/add_fake").json(json!({ "instance_id": instance_id }));
        self.conn.tolerant("add_fake", &call).await
    }

    /// Detaches the decoy `fake_id` from an account.
    ///
    /// # Errors
    ///
    /// Fails on transport errors.
    pub async fn remove_fake(&self, instance_id: &str, fake_id: &str) -> Result<()> {
        let call = Call::new("/api/accounts/remove_fake")
            .json(json!({ "instance_id": instance_id, "fake_id": fake_id }));
        self.conn.discard("remove_fake", &call).await
    }

    /// Deletes an account.
    ///
    /// # Errors
    ///
    /// Fails on transport errors.
    pub async fn delete_account(&self, instance_id: &str) -> Result<()> {
        let call = Call::new("/api/accounts/delete").json(json!({ "instance_id": instance_id }));
        self.conn.discard("delete_account", &call).await
    }

    /// Fetches an account. `None` if the service returns nothing.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or if a non-empty reply is not an [`Account`].
    pub async fn get_account(&self, instance_id: &str) -> Result<Option<Account>> {
        let call = Call::new("/api/accounts/get").json(json!({ "instance_id": instance_id }));
        self.conn.nullable("get_account", &call).await
    }

    /// Fetches accounts one by one, in the order of `instance_ids`.
    ///
    /// Missing accounts keep their slot as `None`.
    ///
    /// # Errors
    ///
    /// Stops at the first id that still fails after its retries.
    pub async fn get_accounts<S: AsRef<str>>(&self, instance_ids: &[S]) -> Result<Vec<Option<Account>>> {
        let mut accounts = Vec::with_capacity(instance_ids.len());
        for id in instance_ids {
            accounts.push(self.get_account(id.as_ref()).await?);
        }
        Ok(accounts)
    }
}
