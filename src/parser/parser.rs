//! Recursive descent parser for EGIF
//!
//! One method per grammar rule. The context the rule is writing into is
//! passed down explicitly; entering a cut passes the new cut's id. The
//! graph is built through its public constructors as parsing proceeds, and
//! constant vertices are re-anchored in a pass after the last token.

use indexmap::IndexMap;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use text_size::{TextRange, TextSize};
use tracing::{debug, trace};

use super::errors::{ErrorCode, ParseContext, ParseError, RelatedInfo, SyntaxError};
use super::lexer::{Token, TokenKind, tokenize};
use super::options::{ParseOptions, UnresolvedNames};
use super::preprocess::strip_comments;
use super::scope::{Binding, ScopeStack};
use crate::base::{ContextId, EdgeId, ElementId, VertexId};
use crate::graph::{Alphabet, Graph, GraphError, Vertex};

/// A successfully parsed expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse {
    graph: Graph,
    alphabet: Alphabet,
}

impl Parse {
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Constant names and relation names (with arity) used by the graph
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }
}

/// Parse EGIF text with default options
pub fn parse_egif(input: &str) -> Result<Parse, ParseError> {
    parse_egif_with(input, &ParseOptions::default())
}

/// Parse EGIF text
pub fn parse_egif_with(input: &str, options: &ParseOptions) -> Result<Parse, ParseError> {
    let source = strip_comments(input);
    let tokens = tokenize(&source)?;
    debug!(tokens = tokens.len(), "parsing EGIF");

    let mut parser = Parser::new(&tokens, options, TextSize::of(input));
    parser.parse_expression(ContextId::Sheet, ParseContext::TopLevel, None)?;
    parser.finish()
}

/// Parse independent expressions in parallel; results keep input order
pub fn parse_many(inputs: &[&str]) -> Vec<Result<Parse, ParseError>> {
    inputs.par_iter().map(|input| parse_egif(input)).collect()
}

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    eof: TextSize,
    unresolved: UnresolvedNames,
    graph: Graph,
    scopes: ScopeStack,
    /// The sheet followed by every cut still open at `pos`, outermost first
    open: Vec<ContextId>,
    /// Constant identity is global: one vertex per name
    constants: IndexMap<SmolStr, VertexId>,
    /// Contexts where a constant occurs on its own, outside any relation
    isolated_uses: FxHashMap<VertexId, Vec<ContextId>>,
    edge_ranges: FxHashMap<EdgeId, TextRange>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>], options: &ParseOptions, eof: TextSize) -> Self {
        Self {
            tokens,
            pos: 0,
            eof,
            unresolved: options.unresolved_names,
            graph: Graph::new(),
            scopes: ScopeStack::new(),
            open: vec![ContextId::Sheet],
            constants: IndexMap::new(),
            isolated_uses: FxHashMap::default(),
            edge_ranges: FxHashMap::default(),
        }
    }

    fn finish(self) -> Result<Parse, ParseError> {
        let graph = self.hoist_constants()?;
        let alphabet = Alphabet::from_graph(&graph).map_err(|err| match err {
            GraphError::ArityConflict {
                relation,
                expected,
                found,
                edge,
            } => ParseError::ArityConflict {
                relation,
                expected,
                found,
                range: self.edge_ranges.get(&edge).copied().unwrap_or_default(),
            },
            other => other.into(),
        })?;
        debug!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            cuts = graph.cut_count(),
            "parsed EGIF"
        );
        Ok(Parse { graph, alphabet })
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> Option<TokenKind> {
        self.current().map(|t| t.kind)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current_kind() == Some(kind)
    }

    fn current_range(&self) -> TextRange {
        self.current()
            .map(|t| t.range)
            .unwrap_or_else(|| TextRange::empty(self.eof))
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    /// Consume the current token and return it. Callers check `at` first.
    fn bump(&mut self) -> Token<'a> {
        let token = self.tokens[self.pos];
        self.pos += 1;
        token
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn unexpected(&self, context: ParseContext) -> ParseError {
        let (code, what) = match self.current() {
            Some(token) if matches!(token.kind, TokenKind::RParen | TokenKind::RBracket) => {
                (ErrorCode::E0205, token.kind.describe())
            }
            Some(token) => (ErrorCode::E0901, token.kind.describe()),
            None => (ErrorCode::E0901, "end of input"),
        };
        SyntaxError::new(
            format!("unexpected {} {}", what, context.description()),
            self.current_range(),
            code,
        )
        .with_hint(format!("expected {}", context.expected_description()))
        .into()
    }

    fn expected(&self, what: &str, context: ParseContext) -> ParseError {
        SyntaxError::new(
            format!("expected {} {}", what, context.description()),
            self.current_range(),
            ErrorCode::E0902,
        )
        .into()
    }

    fn unclosed(&self, context: ParseContext, opened: TextRange) -> ParseError {
        let (code, what, closer) = match context {
            ParseContext::Relation => (ErrorCode::E0203, "relation", ")"),
            ParseContext::Cut => (ErrorCode::E0204, "cut", "]"),
            ParseContext::TopLevel | ParseContext::Declaration => {
                (ErrorCode::E0204, "declaration", "]")
            }
        };
        SyntaxError::at_offset(format!("unclosed {}", what), self.eof, code)
            .with_hint(format!("add '{}' to close the {}", closer, what))
            .with_related(RelatedInfo::new(format!("{} opened here", what), opened))
            .into()
    }

    // =========================================================================
    // Grammar rules
    // =========================================================================

    /// Expression = Node*
    ///
    /// Stops before the closing delimiter of `context`, or at end of input on
    /// the sheet.
    fn parse_expression(
        &mut self,
        ctx: ContextId,
        context: ParseContext,
        opened: Option<TextRange>,
    ) -> Result<(), ParseError> {
        loop {
            match self.current_kind() {
                None => {
                    return match opened {
                        Some(range) => Err(self.unclosed(context, range)),
                        None => Ok(()),
                    };
                }
                Some(kind) if Some(kind) == context.closing_delimiter() => return Ok(()),
                Some(TokenKind::RParen | TokenKind::RBracket) => {
                    return Err(self.unexpected(context));
                }
                Some(_) => self.parse_node(ctx, context)?,
            }
        }
    }

    /// Node = Relation | Cut | Declaration | '*name' | name | "constant"
    fn parse_node(&mut self, ctx: ContextId, context: ParseContext) -> Result<(), ParseError> {
        match self.current_kind() {
            Some(TokenKind::LParen) => self.parse_relation(ctx),
            Some(TokenKind::CutOpen) => self.parse_cut(ctx),
            Some(TokenKind::LBracket) => self.parse_declaration(ctx),
            Some(TokenKind::Defining | TokenKind::Bound | TokenKind::Constant) => {
                let token = self.bump();
                self.isolated_occurrence(token, ctx)
            }
            _ => Err(self.unexpected(context)),
        }
    }

    /// Relation = '(' (name | "name") Argument* ')'
    fn parse_relation(&mut self, ctx: ContextId) -> Result<(), ParseError> {
        let open = self.bump().range;

        let name = match self.current_kind() {
            Some(TokenKind::Relation | TokenKind::Constant) => self.bump().value(),
            None => return Err(self.unclosed(ParseContext::Relation, open)),
            Some(_) => return Err(self.expected("relation name", ParseContext::Relation)),
        };

        let mut args = Vec::new();
        let close = loop {
            match self.current_kind() {
                Some(TokenKind::RParen) => break self.bump().range,
                Some(TokenKind::Defining | TokenKind::Bound | TokenKind::Constant) => {
                    let token = self.bump();
                    args.push(self.argument(token, ctx)?);
                }
                None => return Err(self.unclosed(ParseContext::Relation, open)),
                Some(_) => return Err(self.unexpected(ParseContext::Relation)),
            }
        };

        let edge = self.graph.fresh_edge_id();
        trace!(%edge, relation = %name, arity = args.len(), context = %ctx, "edge");
        self.graph = self.graph.add_edge(edge, &args, name, ctx)?;
        self.edge_ranges.insert(edge, open.cover(close));
        Ok(())
    }

    /// Cut = '~[' Expression ']'
    fn parse_cut(&mut self, ctx: ContextId) -> Result<(), ParseError> {
        let open = self.bump().range;
        let cut = self.graph.fresh_cut_id();
        self.graph = self.graph.add_cut(cut, ctx)?;

        let inner = ContextId::Cut(cut);
        self.open.push(inner);
        self.parse_expression(inner, ParseContext::Cut, Some(open))?;
        self.bump();
        self.open.pop();
        self.scopes.exit(inner);
        Ok(())
    }

    /// Declaration = '[' ('*name' | name | "constant") ']'
    fn parse_declaration(&mut self, ctx: ContextId) -> Result<(), ParseError> {
        let open = self.bump().range;
        match self.current_kind() {
            Some(TokenKind::Defining | TokenKind::Bound | TokenKind::Constant) => {
                let token = self.bump();
                self.isolated_occurrence(token, ctx)?;
            }
            None => return Err(self.unclosed(ParseContext::Declaration, open)),
            Some(_) => {
                return Err(self.expected("a defining label", ParseContext::Declaration));
            }
        }
        if self.at(TokenKind::RBracket) {
            self.bump();
            return Ok(());
        }
        match self.current_kind() {
            None => Err(self.unclosed(ParseContext::Declaration, open)),
            Some(_) => Err(self.expected("']'", ParseContext::Declaration)),
        }
    }

    // =========================================================================
    // Occurrences
    // =========================================================================

    /// A vertex token used as a relation argument.
    fn argument(&mut self, token: Token<'a>, ctx: ContextId) -> Result<VertexId, ParseError> {
        match token.kind {
            TokenKind::Defining => self.define(token, ctx),
            TokenKind::Constant => self.constant(token.value(), ctx),
            _ => self.resolve(token, ctx),
        }
    }

    /// A vertex token standing alone, outside any relation.
    fn isolated_occurrence(&mut self, token: Token<'a>, ctx: ContextId) -> Result<(), ParseError> {
        let vertex = self.argument(token, ctx)?;
        let is_constant = self
            .graph
            .vertex(vertex)
            .is_some_and(|v| !v.is_generic());
        if is_constant {
            self.isolated_uses.entry(vertex).or_default().push(ctx);
        }
        Ok(())
    }

    /// `*name`: a fresh generic vertex in the current area.
    fn define(&mut self, token: Token<'a>, ctx: ContextId) -> Result<VertexId, ParseError> {
        let name = token.value();
        if let Some(first) = self.scopes.binding_in(&name, ctx) {
            return Err(ParseError::DuplicateDefinition {
                name,
                range: token.range,
                first: first.range,
            });
        }
        let vertex = self.graph.fresh_vertex_id();
        self.graph = self.graph.add_vertex_in_context(Vertex::generic(vertex), ctx)?;
        self.scopes.push(
            name,
            Binding {
                context: ctx,
                vertex,
                range: token.range,
            },
        );
        Ok(vertex)
    }

    /// A bare name: the innermost enclosing definition of it.
    fn resolve(&mut self, token: Token<'a>, ctx: ContextId) -> Result<VertexId, ParseError> {
        let name = token.value();
        if let Some(binding) = self.scopes.lookup(&name) {
            if self.open.contains(&binding.context) {
                return Ok(binding.vertex);
            }
            return Err(ParseError::OutOfScopeVariable {
                name,
                range: token.range,
                defined: binding.range,
            });
        }
        // A closed binding wins over the lenient reading
        match (self.scopes.retired(&name), self.unresolved) {
            (Some(binding), _) => Err(ParseError::OutOfScopeVariable {
                name,
                range: token.range,
                defined: binding.range,
            }),
            (None, UnresolvedNames::AsConstants) => self.constant(name, ctx),
            (None, UnresolvedNames::Reject) => Err(ParseError::UndefinedVariable {
                name,
                range: token.range,
            }),
        }
    }

    /// The vertex of a constant, created in `ctx` on first occurrence.
    fn constant(&mut self, name: SmolStr, ctx: ContextId) -> Result<VertexId, ParseError> {
        if let Some(vertex) = self.constants.get(&name) {
            return Ok(*vertex);
        }
        let vertex = self.graph.fresh_vertex_id();
        self.graph = self
            .graph
            .add_vertex_in_context(Vertex::constant(vertex, name.clone()), ctx)?;
        self.constants.insert(name, vertex);
        Ok(vertex)
    }

    // =========================================================================
    // Post-parse passes
    // =========================================================================

    /// Move every constant to the innermost context enclosing all of its
    /// occurrences.
    fn hoist_constants(&self) -> Result<Graph, ParseError> {
        let tree = self.graph.context_tree();
        let mut graph = self.graph.clone();
        for (name, vertex) in &self.constants {
            let mut uses = self.graph.use_contexts(&tree, *vertex);
            if let Some(isolated) = self.isolated_uses.get(vertex) {
                uses.extend(isolated.iter().copied());
            }
            let Some(target) = tree.lca(uses) else {
                continue;
            };
            let current = tree.owner(ElementId::Vertex(*vertex));
            if current != Some(target) {
                trace!(constant = %name, %vertex, to = %target, "hoist constant");
                graph = graph.relocate_vertex(*vertex, target)?;
            }
        }
        Ok(graph)
    }
}
