//! Agent-facing output: metric lines and the graph-schema handshake

use std::collections::HashMap;

use chrono::Utc;
use serde::Serialize;

use crate::error::Result;
use crate::graph::Graph;
use crate::plugin::Plugin;

/// Environment variable the agent sets when it wants the graph schema
pub const PLUGIN_META_ENV: &str = "MACKEREL_AGENT_PLUGIN_META";

#[derive(Serialize)]
struct GraphSchema {
    graphs: HashMap<String, Graph>,
}

/// Drive one collection cycle and print its output for the agent
///
/// When the agent asks for metadata (non-empty [`PLUGIN_META_ENV`]),
/// only the graph schema is printed and no call is made. Otherwise one
/// cycle runs and every metric is printed as a tab-separated line.
pub async fn run<P: Plugin>(plugin: &P) -> Result<()> {
    if meta_requested() {
        println!("{}", format_graph_schema(&plugin.graph_definition())?);
        return Ok(());
    }

    let metrics = plugin.fetch_metrics().await?;
    print!(
        "{}",
        format_metrics(&plugin.metric_key_prefix(), &metrics, Utc::now().timestamp())
    );

    Ok(())
}

fn meta_requested() -> bool {
    std::env::var(PLUGIN_META_ENV)
        .map(|v| !v.is_empty())
        .unwrap_or(false)
}

/// Render the schema handshake: a marker line, then the graphs as JSON
pub fn format_graph_schema(graphs: &HashMap<String, Graph>) -> Result<String> {
    let schema = GraphSchema {
        graphs: graphs.clone(),
    };
    Ok(format!(
        "# mackerel-agent-plugin\n{}",
        serde_json::to_string(&schema)?
    ))
}

/// Render `<prefix>.<name>\t<value>\t<timestamp>` lines, sorted by name
pub fn format_metrics(prefix: &str, metrics: &HashMap<String, f64>, timestamp: i64) -> String {
    let mut names: Vec<&String> = metrics.keys().collect();
    names.sort();

    let mut out = String::new();
    for name in names {
        out.push_str(&format!("{}.{}\t{}\t{}\n", prefix, name, metrics[name], timestamp));
    }
    out
}
