//! Canonical walk over a graph and rendering of the result.
//!
//! The walk first decides where every vertex is written, then visits the
//! contexts top-down from the sheet. Within one context the order is fixed:
//! edges sorted by `(relation name, argument ids)`, then declarations and
//! standalone constants, then child cuts sorted by id.

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use super::naming::{LabelAllocator, quote, relation_text};
use super::options::{GenerateOptions, Layout};
use crate::base::{ContextId, CutId, EdgeId, ElementId, VertexId};
use crate::graph::{ContextTree, Graph, GraphError, VertexKind};

/// One emitted node, with cut contents kept nested until rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Atom(String),
    Cut(Vec<Node>),
}

/// Per-call state of a generation pass.
pub(super) struct Emitter<'g> {
    graph: &'g Graph,
    labels: LabelAllocator,
    /// Generic vertices whose defining occurrence belongs to each context
    anchors: FxHashMap<ContextId, Vec<VertexId>>,
    /// Constants that must also be written on their own in each context
    standalone: FxHashMap<ContextId, Vec<VertexId>>,
}

impl<'g> Emitter<'g> {
    pub(super) fn new(graph: &'g Graph, label_prefix: &str) -> Self {
        let tree = graph.context_tree();
        let mut anchors: FxHashMap<ContextId, Vec<VertexId>> = FxHashMap::default();
        let mut standalone: FxHashMap<ContextId, Vec<VertexId>> = FxHashMap::default();

        for vertex in graph.vertices() {
            let Some(own) = tree.owner(ElementId::Vertex(vertex.id)) else {
                continue;
            };
            let uses = graph.use_contexts(&tree, vertex.id);
            match &vertex.kind {
                VertexKind::Generic => {
                    let anchor = anchor_of(&tree, own, &uses);
                    if anchor != own {
                        debug!(vertex = %vertex.id, area = %own, %anchor, "defining occurrence moved out of vertex area");
                    }
                    anchors.entry(anchor).or_default().push(vertex.id);
                }
                VertexKind::Constant(name) => {
                    // Reparsing places a constant at the LCA of its uses;
                    // an isolated occurrence pins it to its own area
                    if tree.lca(uses) != Some(own) {
                        trace!(constant = %name, area = %own, "standalone constant");
                        standalone.entry(own).or_default().push(vertex.id);
                    }
                }
            }
        }

        Self {
            graph,
            labels: LabelAllocator::new(label_prefix),
            anchors,
            standalone,
        }
    }

    /// Walk the whole graph and render it.
    pub(super) fn emit(mut self, options: &GenerateOptions) -> Result<String, GraphError> {
        let nodes = self.context_nodes(ContextId::Sheet)?;
        let mut output = String::new();
        match options.layout {
            Layout::Compact => render_compact(&nodes, &mut output),
            Layout::Indented => render_indented(&nodes, options, 0, &mut output),
        }
        Ok(output)
    }

    fn context_nodes(&mut self, ctx: ContextId) -> Result<Vec<Node>, GraphError> {
        let graph = self.graph;
        let area = graph.area_of(ctx)?;

        let mut edges: Vec<EdgeId> = area.iter().filter_map(|e| e.as_edge()).collect();
        edges.sort_by(|a, b| {
            (graph.relation_name(*a), graph.nu(*a)).cmp(&(graph.relation_name(*b), graph.nu(*b)))
        });
        let mut cuts: Vec<CutId> = area.iter().filter_map(|e| e.as_cut()).collect();
        cuts.sort();

        let anchored = self.anchors.remove(&ctx).unwrap_or_default();
        let mut nodes = Vec::new();

        for edge in edges {
            nodes.push(Node::Atom(self.edge_text(edge, &anchored)?));
        }
        for vertex in anchored {
            if self.labels.get(vertex).is_none() {
                let label = self.labels.define(vertex);
                nodes.push(Node::Atom(format!("[*{}]", label)));
            }
        }
        for vertex in self.standalone.remove(&ctx).unwrap_or_default() {
            if let Some(name) = graph.vertex(vertex).and_then(|v| v.constant_name()) {
                nodes.push(Node::Atom(quote(name)));
            }
        }
        for cut in cuts {
            nodes.push(Node::Cut(self.context_nodes(ContextId::Cut(cut))?));
        }
        Ok(nodes)
    }

    /// `(name arg*)`: constants quoted, generic vertices by label, with
    /// `*` on the first occurrence of a vertex anchored here.
    fn edge_text(&mut self, edge: EdgeId, anchored: &[VertexId]) -> Result<String, GraphError> {
        let graph = self.graph;
        let name = graph
            .relation_name(edge)
            .ok_or(GraphError::MissingRelationName { edge })?;
        let args = graph
            .nu(edge)
            .ok_or(GraphError::InvalidNu { edge, vertex: None })?;

        let mut text = format!("({}", relation_text(name));
        for arg in args {
            let vertex = graph.vertex(*arg).ok_or(GraphError::UnknownVertex(*arg))?;
            text.push(' ');
            match &vertex.kind {
                VertexKind::Constant(name) => text.push_str(&quote(name)),
                VertexKind::Generic => match self.labels.get(*arg) {
                    Some(label) => text.push_str(label),
                    None => {
                        if !anchored.contains(arg) {
                            debug!(vertex = %arg, %edge, "use reached before its anchor");
                        }
                        let label = self.labels.define(*arg);
                        text.push('*');
                        text.push_str(&label);
                    }
                },
            }
        }
        text.push(')');
        Ok(text)
    }
}

/// Innermost context enclosing a vertex's own area and all of its uses.
fn anchor_of(tree: &ContextTree, own: ContextId, uses: &[ContextId]) -> ContextId {
    tree.lca(std::iter::once(own).chain(uses.iter().copied()))
        .unwrap_or(own)
}

fn render_compact(nodes: &[Node], output: &mut String) {
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            output.push(' ');
        }
        match node {
            Node::Atom(text) => output.push_str(text),
            Node::Cut(children) if children.is_empty() => output.push_str("~[ ]"),
            Node::Cut(children) => {
                output.push_str("~[ ");
                render_compact(children, output);
                output.push_str(" ]");
            }
        }
    }
}

fn render_indented(nodes: &[Node], options: &GenerateOptions, indent_level: usize, output: &mut String) {
    for node in nodes {
        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str(&options.indent(indent_level));
        match node {
            Node::Atom(text) => output.push_str(text),
            Node::Cut(children) if children.is_empty() => output.push_str("~[ ]"),
            Node::Cut(children) => {
                output.push_str("~[");
                render_indented(children, options, indent_level + 1, output);
                output.push('\n');
                output.push_str(&options.indent(indent_level));
                output.push(']');
            }
        }
    }
}
