//! Trust resolution over index paths.
//!
//! A node's effective trust is its own override if set, else its parent's.
//! Walking the path from the root and keeping the last override seen is the
//! same rule without parent pointers.

use crate::parsing::FatalError;

use super::Node;

/// Effective trust of the node reached by `path` (child indices from the
/// root sequence). An empty path asks for the root trust itself.
pub fn resolve_trust(
    nodes: &[Node],
    path: &[usize],
    root_trust: Option<bool>,
) -> Result<bool, FatalError> {
    let mut trusted = root_trust;
    let mut siblings = nodes;
    for &index in path {
        let node = siblings.get(index).ok_or_else(|| FatalError::InvalidPath {
            path: path.to_vec(),
        })?;
        if node.trusted.is_some() {
            trusted = node.trusted;
        }
        siblings = node.children();
    }
    trusted.ok_or(FatalError::UnknownTrust)
}

/// A node visited by [`walk`], with its position and resolved trust.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'n, 'p> {
    pub node: &'n Node,
    pub path: &'p [usize],
    pub trusted: bool,
}

impl NodeRef<'_, '_> {
    /// Index among its siblings.
    pub fn index(&self) -> usize {
        self.path.last().copied().unwrap_or_default()
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }
}

/// Depth-first, pre-order traversal resolving trust on the way down.
pub fn walk<'n>(
    nodes: &'n [Node],
    root_trust: Option<bool>,
    mut visit: impl FnMut(NodeRef<'n, '_>),
) -> Result<(), FatalError> {
    let mut path = Vec::new();
    walk_level(nodes, root_trust, &mut path, &mut visit)
}

fn walk_level<'n>(
    nodes: &'n [Node],
    inherited: Option<bool>,
    path: &mut Vec<usize>,
    visit: &mut impl FnMut(NodeRef<'n, '_>),
) -> Result<(), FatalError> {
    for (index, node) in nodes.iter().enumerate() {
        path.push(index);
        let trusted = node.trusted.or(inherited).ok_or(FatalError::UnknownTrust)?;
        visit(NodeRef {
            node,
            path: path.as_slice(),
            trusted,
        });
        walk_level(node.children(), Some(trusted), path, visit)?;
        path.pop();
    }
    Ok(())
}
