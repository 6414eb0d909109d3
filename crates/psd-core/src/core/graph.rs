use serde::Serialize;
use std::collections::HashSet;

const LAYER_PALETTE: [&str; 8] = [
    "#e6194b", "#3cb44b", "#4363d8", "#f58231", "#911eb4", "#42d4f4", "#f032e6", "#9a6324",
];

/// Display color for a layer; the palette repeats for deep expansions.
pub fn layer_color(layer: usize) -> &'static str {
    LAYER_PALETTE[layer % LAYER_PALETTE.len()]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeSpec {
    pub id: String,
    pub label: String,
    pub layer: usize,
    pub size: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeSpec {
    pub from: String,
    pub to: String,
    pub score: f64,
    pub label: String,
}

impl EdgeSpec {
    pub fn new(from: &str, to: &str, score: f64) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            score,
            label: score.to_string(),
        }
    }
}

/// Receiver of admitted proteins and their interactions.
///
/// Rendering is left to implementors; the expansion workflow only ever adds.
pub trait GraphBuilder {
    fn add_node(&mut self, node: NodeSpec);
    fn add_edge(&mut self, edge: EdgeSpec);
}

/// Collects nodes and undirected edges without duplicates.
///
/// A node keeps the attributes of its first insertion, so a protein is drawn
/// with the size and color of the layer that admitted it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NetworkGraph {
    nodes: Vec<NodeSpec>,
    edges: Vec<EdgeSpec>,
    #[serde(skip)]
    node_ids: HashSet<String>,
    #[serde(skip)]
    edge_keys: HashSet<(String, String)>,
}

impl NetworkGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[NodeSpec] {
        &self.nodes
    }

    pub fn edges(&self) -> &[EdgeSpec] {
        &self.edges
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node_ids.contains(id)
    }

    pub fn contains_edge(&self, a: &str, b: &str) -> bool {
        self.edge_keys.contains(&Self::edge_key(a, b))
    }

    fn edge_key(a: &str, b: &str) -> (String, String) {
        if a <= b {
            (a.to_string(), b.to_string())
        } else {
            (b.to_string(), a.to_string())
        }
    }
}

impl GraphBuilder for NetworkGraph {
    fn add_node(&mut self, node: NodeSpec) {
        if self.node_ids.insert(node.id.clone()) {
            self.nodes.push(node);
        }
    }

    fn add_edge(&mut self, edge: EdgeSpec) {
        if edge.from == edge.to {
            return;
        }
        if self.edge_keys.insert(Self::edge_key(&edge.from, &edge.to)) {
            self.edges.push(edge);
        }
    }
}
