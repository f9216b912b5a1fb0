use serde_json::json;

use crate::{
    analyze::{Analyze, NewAnalyze},
    api::InstaproApi,
    client::Call,
    result::Result,
};

impl InstaproApi {
    /// Starts an analysis of `username` on behalf of the user `user_id`.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or if the reply is not an [`Analyze`].
    pub async fn create_analyze(&self, user_id: &str, username: &str) -> Result<Analyze> {
        let instance = NewAnalyze {
            username: username.to_string(),
        };
        let call = Call::new("/api/analyze/create").json(json!({
            "instance_data": instance,
            "user_data": { "instance_id": user_id },
        }));
        self.conn.strict("create_analyze", &call).await
    }

    /// Stores `values` under `key` in an analysis.
    ///
    /// # Errors
    ///
    /// Fails on transport errors.
    pub async fn update_analyze(&self, instance_id: &str, key: &str, values: &[String]) -> Result<()> {
        let call = Call::new("/api/analyze/update").json(json!({
            "instance_data": { "instance_id": instance_id },
            "update_analyze": { "key": key, "values": values },
        }));
        self.conn.discard("update_analyze", &call).await
    }

    /// Marks an analysis as paid for.
    ///
    /// # Errors
    ///
    /// Fails on transport errors.
    pub async fn subscribe_analyze(&self, instance_id: &str) -> Result<()> {
        let call = Call::new("/api/analyze/subscribe").json(json!({ "instance_id": instance_id }));
        self.conn.discard("subscribe_analyze", &call).await
    }

    /// Fetches an analysis.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or if the reply is not an [`Analyze`].
    pub async fn get_analyze(&self, instance_id: &str) -> Result<Analyze> {
        let call = Call::new("/api/analyze/get").json(json!({ "instance_id": instance_id }));
        self.conn.strict("get_analyze", &call).await
    }
}
