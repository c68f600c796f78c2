//! The plugin contract and its JSON-RPC count implementation

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tally_client::{ClientConfig, RpcClient};
use tally_rpc::RpcRequest;
use tracing::{error, warn};

use crate::error::Result;
use crate::graph::{title_case, Graph, MetricDef};
use crate::shape::count_elements;

/// Key prefix used when none is configured
pub const DEFAULT_PREFIX: &str = "jsonrpc";

/// Contract the monitoring agent drives once per collection cycle
#[async_trait]
pub trait Plugin {
    /// Collect metric values for this cycle
    async fn fetch_metrics(&self) -> Result<HashMap<String, f64>>;

    /// Describe how the agent should render the metrics
    fn graph_definition(&self) -> HashMap<String, Graph>;

    /// Prefix for emitted metric keys
    fn metric_key_prefix(&self) -> String;
}

/// Plugin that counts the elements of one JSON-RPC result
///
/// Each cycle issues a single call (fresh correlation ID, no retry)
/// and reports the element count of the sequence-shaped result. A
/// failed call or an unexpected result shape is logged and recorded
/// as a zero-valued data point; the cycle itself never aborts.
pub struct CountPlugin {
    method: String,
    params: Vec<Value>,
    label: String,
    prefix: String,
    client: RpcClient,
}

impl CountPlugin {
    /// Create a plugin calling `method` with the given positional params
    pub fn new(
        config: ClientConfig,
        method: impl Into<String>,
        params: Vec<Value>,
    ) -> Result<Self> {
        let client = RpcClient::new(config)?;
        Ok(Self {
            method: method.into(),
            params,
            label: String::new(),
            prefix: String::new(),
            client,
        })
    }

    /// Set the graph key the metric is reported under
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the metric key prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }
}

#[async_trait]
impl Plugin for CountPlugin {
    async fn fetch_metrics(&self) -> Result<HashMap<String, f64>> {
        let req = RpcRequest::new(self.method.clone(), self.params.clone());

        let count = match self.client.call(&req).await {
            Ok(result) => match count_elements(&result) {
                Ok(n) => n,
                Err(err) => {
                    warn!(%err, method = %self.method, "unexpected result shape, recording zero");
                    0.0
                }
            },
            Err(err) => {
                error!(%err, method = %self.method, "JSON-RPC call failed, recording zero");
                0.0
            }
        };

        let mut stat = HashMap::new();
        stat.insert("count".to_string(), count);

        Ok(stat)
    }

    fn graph_definition(&self) -> HashMap<String, Graph> {
        let prefix = self.metric_key_prefix();
        let key = if self.label.is_empty() {
            prefix.clone()
        } else {
            self.label.clone()
        };

        let mut graphs = HashMap::new();
        graphs.insert(
            key,
            Graph {
                label: format!("{} Count", title_case(&prefix)),
                unit: "integer".to_string(),
                metrics: vec![MetricDef {
                    name: "count".to_string(),
                    label: "Count".to_string(),
                    stacked: false,
                }],
            },
        );

        graphs
    }

    fn metric_key_prefix(&self) -> String {
        if self.prefix.is_empty() {
            DEFAULT_PREFIX.to_string()
        } else {
            self.prefix.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use url::Url;

    fn plugin_for(url: &str) -> CountPlugin {
        let config = ClientConfig {
            endpoint: Url::parse(url).unwrap(),
            username: "user".to_string(),
            password: "pass".to_string(),
            timeout: Duration::from_secs(5),
        };
        CountPlugin::new(config, "listItems", vec![]).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_metrics_counts_sequence_elements() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_body(r#"{"result": [1, 2, 3], "error": null, "id": "x"}"#)
            .create_async()
            .await;

        let stat = plugin_for(&server.url()).fetch_metrics().await.unwrap();
        assert_eq!(stat["count"], 3.0);
    }

    #[tokio::test]
    async fn test_fetch_metrics_records_zero_on_rpc_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_body(r#"{"result": null, "error": {"code": -1, "message": "boom"}, "id": "x"}"#)
            .create_async()
            .await;

        let stat = plugin_for(&server.url()).fetch_metrics().await.unwrap();
        assert_eq!(stat["count"], 0.0);
    }

    #[tokio::test]
    async fn test_fetch_metrics_records_zero_on_object_result() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_body(r#"{"result": {"a": 1}, "error": null, "id": "x"}"#)
            .create_async()
            .await;

        // Non-sequence results must not abort the cycle.
        let stat = plugin_for(&server.url()).fetch_metrics().await.unwrap();
        assert_eq!(stat["count"], 0.0);
    }

    #[tokio::test]
    async fn test_fetch_metrics_records_zero_when_unreachable() {
        // Nothing is listening on this port.
        let stat = plugin_for("http://127.0.0.1:1").fetch_metrics().await.unwrap();
        assert_eq!(stat["count"], 0.0);
    }

    #[test]
    fn test_graph_definition_defaults() {
        let config = ClientConfig {
            endpoint: Url::parse("http://127.0.0.1").unwrap(),
            username: String::new(),
            password: String::new(),
            timeout: Duration::from_secs(5),
        };
        let plugin = CountPlugin::new(config, "listItems", vec![]).unwrap();

        assert_eq!(plugin.metric_key_prefix(), "jsonrpc");

        let graphs = plugin.graph_definition();
        let graph = &graphs["jsonrpc"];
        assert_eq!(graph.label, "Jsonrpc Count");
        assert_eq!(graph.unit, "integer");
        assert_eq!(graph.metrics.len(), 1);
        assert_eq!(graph.metrics[0].name, "count");
    }

    #[test]
    fn test_graph_definition_uses_label_and_prefix() {
        let config = ClientConfig {
            endpoint: Url::parse("http://127.0.0.1").unwrap(),
            username: String::new(),
            password: String::new(),
            timeout: Duration::from_secs(5),
        };
        let plugin = CountPlugin::new(config, "listItems", vec![json!("queued")])
            .unwrap()
            .with_label("work-queue")
            .with_prefix("queue");

        assert_eq!(plugin.metric_key_prefix(), "queue");

        let graphs = plugin.graph_definition();
        let graph = &graphs["work-queue"];
        assert_eq!(graph.label, "Queue Count");
    }
}
