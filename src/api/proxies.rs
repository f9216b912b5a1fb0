use serde_json::json;

use crate::{
    api::InstaproApi,
    client::Call,
    proxy::{NewProxy, Proxy},
    result::Result,
};

impl InstaproApi {
    /// Registers a proxy.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or if the reply is not a [`Proxy`].
    pub async fn create_proxy(
        &self,
        host: &str,
        port: u16,
        username: &str,
        password: &str,
    ) -> Result<Proxy> {
        let proxy = NewProxy {
            host: host.to_string(),
            port,
            username: username.to_string(),
            password: password.to_string(),
        };
        let call = Call::new("/api/proxy/create").json(json!(proxy));
        let proxy: Proxy = self.conn.strict("create_proxy", &call).await?;
        self.conn.note("create_proxy", &format!("{proxy:?}"));
        Ok(proxy)
    }

    /// Fetches a proxy. `None` if the service returns nothing.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or if a non-empty reply is not a [`Proxy`].
    pub async fn get_proxy(&self, instance_id: &str) -> Result<Option<Proxy>> {
        let call = Call::new("/api/proxy/get").json(json!({ "instance_id": instance_id }));
        self.conn.nullable("get_proxy", &call).await
    }

    /// Takes the next free proxy. `None` if there is none.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or if a non-empty reply is not a [`Proxy`].
    pub async fn get_queue_proxy(&self) -> Result<Option<Proxy>> {
        let call = Call::new("/api/proxy/get_queue");
        self.conn.nullable("get_queue_proxy", &call).await
    }
}
