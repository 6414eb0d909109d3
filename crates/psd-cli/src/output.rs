use crate::error::{CliError, Result};
use psdexplorer::core::graph::NetworkGraph;
use serde_json::{Value, json};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

const VIS_NETWORK_URL: &str =
    "https://unpkg.com/vis-network@9.1.9/standalone/umd/vis-network.min.js";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Html,
    Json,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Html,
        }
    }
}

/// Writes `graph` to `path`, creating parent directories as needed.
pub fn write_graph(graph: &NetworkGraph, path: &Path, title: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let output_error = |e: anyhow::Error| CliError::Output {
        path: path.to_path_buf(),
        source: e,
    };

    let mut writer = BufWriter::new(File::create(path)?);
    match OutputFormat::from_path(path) {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, graph).map_err(|e| output_error(e.into()))?
        }
        OutputFormat::Html => writer.write_all(render_html(graph, title)?.as_bytes())?,
    }
    writer.flush()?;

    info!(
        "Wrote network with {} node(s) and {} edge(s) to {:?}",
        graph.nodes().len(),
        graph.edges().len(),
        path
    );
    Ok(())
}

fn vis_nodes(graph: &NetworkGraph) -> Value {
    graph
        .nodes()
        .iter()
        .map(|node| {
            json!({
                "id": node.id,
                "label": node.label,
                "shape": "dot",
                "size": node.size,
                "color": node.color,
                "title": format!("{} (layer {})", node.label, node.layer),
            })
        })
        .collect()
}

fn vis_edges(graph: &NetworkGraph) -> Value {
    graph
        .edges()
        .iter()
        .map(|edge| {
            json!({
                "from": edge.from,
                "to": edge.to,
                "label": edge.label,
                "title": edge.label,
            })
        })
        .collect()
}

/// Serializes `value` for embedding inside a `<script>` element.
fn script_json(value: &Value) -> Result<String> {
    let text = serde_json::to_string(value).map_err(anyhow::Error::from)?;
    Ok(text.replace("</", "<\\/"))
}

pub fn render_html(graph: &NetworkGraph, title: &str) -> Result<String> {
    let nodes = script_json(&vis_nodes(graph))?;
    let edges = script_json(&vis_edges(graph))?;
    let title = title
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");

    Ok(format!(
        r##"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{VIS_NETWORK_URL}"></script>
<style>
  body {{ margin: 0; background-color: #ffffff; }}
  #network {{ width: 100%; height: 600px; }}
</style>
</head>
<body>
<div id="network"></div>
<script>
  var nodes = new vis.DataSet({nodes});
  var edges = new vis.DataSet({edges});
  var options = {{
    "nodes": {{ "font": {{ "color": "black" }} }},
    "physics": {{ "enabled": true, "barnesHut": {{ "springLength": 100 }} }}
  }};
  new vis.Network(document.getElementById("network"), {{ nodes: nodes, edges: edges }}, options);
</script>
</body>
</html>
"##
    ))
}
