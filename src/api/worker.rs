use serde_json::{Map, Value};

use crate::{
    api::FakeApi,
    client::{Call, Unset},
    result::Result,
    types::UsersGetterType,
};

/// JSON object returned by the worker endpoints.
pub type WorkerReply = Map<String, Value>;

impl FakeApi {
    /// Runs one page of analysis on `instance`.
    ///
    /// `last_max_id` continues from a previous page. It is left out of the
    /// query when unset or empty.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or if the reply is not a JSON object.
    pub async fn analyze(&self, instance: &str, last_max_id: Option<&str>) -> Result<WorkerReply> {
        let call = Call::new("/api/analyze/analyze")
            .param("instance", instance)
            .param_opt("last_max_id", last_max_id, Unset::Omit);
        self.conn.strict("analyze", &call).await
    }

    /// Unfollows `instance` as part of the action `action_id`.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or if the reply is not a JSON object.
    pub async fn unfollow(&self, action_id: &str, instance: &str) -> Result<WorkerReply> {
        let call = Call::new("/api/analyze/unfollow")
            .param("action_id", action_id)
            .param("instance", instance);
        self.conn.strict("unfollow", &call).await
    }

    /// Likes stories of the audience gathered from `instance`.
    ///
    /// Unset `last_max_id` and `bio` are still sent, with empty values.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or if the reply is not a JSON object.
    pub async fn like(
        &self,
        account_id: &str,
        instance: &str,
        instance_type: UsersGetterType,
        last_max_id: Option<&str>,
        bio: Option<&str>,
    ) -> Result<WorkerReply> {
        let call = Call::new("/api/story_like/like")
            .param("instance", instance)
            .param_opt("last_max_id", last_max_id, Unset::Empty)
            .param("instance_type", instance_type)
            .param("account_id", account_id)
            .param_opt("bio", bio, Unset::Empty);
        self.conn.strict("like", &call).await
    }
}
