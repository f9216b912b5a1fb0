use serde_json::json;

use crate::{
    api::InstaproApi,
    client::Call,
    result::Result,
    sub_server::{NewSubServer, SubServer},
};

impl InstaproApi {
    /// Registers a worker node.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or if the reply is not a [`SubServer`].
    pub async fn create_sub_server(&self, host: &str, port: u16) -> Result<SubServer> {
        let server = NewSubServer {
            host: host.to_string(),
            port,
        };
        let call = Call::new("/api/sub_servers/create").json(json!(server));
        let server: SubServer = self.conn.strict("create_sub_server", &call).await?;
        self.conn.note("create_sub_server", &format!("{server:?}"));
        Ok(server)
    }

    /// Fetches a worker node.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or if the reply is not a [`SubServer`].
    pub async fn get_sub_server(&self, instance_id: &str) -> Result<SubServer> {
        let call = Call::new("/api/sub_servers/get").json(json!({ "instance_id": instance_id }));
        self.conn.strict("get_sub_server", &call).await
    }

    /// Takes the least loaded worker node. `None` if there is none.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or if a non-empty reply is not a [`SubServer`].
    pub async fn get_queue_sub_server(&self) -> Result<Option<SubServer>> {
        let call = Call::new("/api/sub_servers/get_queue");
        self.conn.nullable("get_queue_sub_server", &call).await
    }

    /// Fetches every worker node.
    ///
    /// Uses the same path as [`get_sub_server`](Self::get_sub_server), without
    /// a body.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or if the reply is not a list of sub-servers.
    pub async fn get_all_sub_servers(&self) -> Result<Vec<SubServer>> {
        let call = Call::new("/api/sub_servers/get");
        let servers: Vec<SubServer> = self.conn.strict("get_all_sub_servers", &call).await?;
        self.conn
            .note("get_all_sub_servers", &format!("{} sub-servers", servers.len()));
        Ok(servers)
    }

    /// Deletes a worker node.
    ///
    /// # Errors
    ///
    /// Fails on transport errors.
    pub async fn delete_sub_server(&self, instance_id: &str) -> Result<()> {
        let call = Call::new("/api/sub_servers/delete").json(json!({ "instance_id": instance_id }));
        self.conn.discard("delete_sub_server", &call).await
    }
}
