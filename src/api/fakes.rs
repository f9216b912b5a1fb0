use serde_json::json;

use crate::{api::InstaproApi, client::Call, fake::Fake, result::Result};

impl InstaproApi {
    /// Creates a decoy profile for the account `instance_id`.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or if the reply is not a [`Fake`].
    pub async fn create_fake(&self, instance_id: &str) -> Result<Fake> {
        let call = Call::new("/api/fakes/create").json(json!({ "instance_id": instance_id }));
        let fake: Fake = self.conn.strict("create_fake", &call).await?;
        self.conn.note("create_fake", &format!("{fake:?}"));
        Ok(fake)
    }

    /// Deletes a decoy profile.
    ///
    /// # Errors
    ///
    /// Fails on transport errors.
    pub async fn delete_fake(&self, instance_id: &str) -> Result<()> {
        let call = Call::new("/api/fakes/delete").json(json!({ "instance_id": instance_id }));
        self.conn.discard("delete_fake", &call).await
    }

    /// Extends paid access for a decoy profile by `days`.
    ///
    /// # Errors
    ///
    /// Fails on transport errors.
    pub async fn subscribe_fake(&self, instance_id: &str, days: u32) -> Result<()> {
        let call = Call::new("/api/fakes/subscribe").json(json!({
            "instance_data": { "instance_id": instance_id },
            "subscribe_data": { "days": days },
        }));
        self.conn.discard("subscribe_fake", &call).await
    }

    /// Updates the username and description of a decoy profile.
    ///
    /// Unset values are sent as `null`.
    ///
    /// # Errors
    ///
    /// Fails on transport errors.
    pub async fn update_fake(
        &self,
        instance_id: &str,
        username: Option<&str>,
        description: Option<&str>,
    ) -> Result<()> {
        let call = Call::new("/api/fakes/update").json(json!({
            "instance_data": { "instance_id": instance_id },
            "update_data": { "username": username, "description": description },
        }));
        self.conn.discard("update_fake", &call).await
    }

    /// Fetches a decoy profile.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or if the reply is not a [`Fake`].
    pub async fn get_fake(&self, instance_id: &str) -> Result<Fake> {
        let call = Call::new("/api/fakes/get").json(json!({ "instance_id": instance_id }));
        self.conn.strict("get_fake", &call).await
    }

    /// Fetches decoy profiles one by one, in the order of `instance_ids`.
    ///
    /// # Errors
    ///
    /// Stops at the first id that still fails after its retries.
    pub async fn get_fakes<S: AsRef<str>>(&self, instance_ids: &[S]) -> Result<Vec<Fake>> {
        let mut fakes = Vec::with_capacity(instance_ids.len());
        for id in instance_ids {
            fakes.push(self.get_fake(id.as_ref()).await?);
        }
        Ok(fakes)
    }
}
