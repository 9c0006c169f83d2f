//! Label allocation and quoting.

use rustc_hash::FxHashMap;
use smol_str::{SmolStr, format_smolstr};

use crate::base::VertexId;

/// Whether `text` lexes as one bare name.
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first == '_' || unicode_ident::is_xid_start(first) => {
            chars.all(unicode_ident::is_xid_continue)
        }
        _ => false,
    }
}

/// Wrap `text` in double quotes, escaping `"` and `\`.
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// A relation name as written after `(`: bare when possible.
pub fn relation_text(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        quote(name)
    }
}

/// Hands out `prefix1`, `prefix2`, ... in order of first definition.
#[derive(Debug)]
pub struct LabelAllocator {
    prefix: SmolStr,
    next: usize,
    labels: FxHashMap<VertexId, SmolStr>,
}

impl LabelAllocator {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: SmolStr::new(prefix),
            next: 1,
            labels: FxHashMap::default(),
        }
    }

    /// The label of a vertex already defined.
    pub fn get(&self, vertex: VertexId) -> Option<&SmolStr> {
        self.labels.get(&vertex)
    }

    /// Give `vertex` the next free label.
    pub fn define(&mut self, vertex: VertexId) -> SmolStr {
        let label = format_smolstr!("{}{}", self.prefix, self.next);
        self.next += 1;
        self.labels.insert(vertex, label.clone());
        label
    }
}
