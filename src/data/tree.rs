//! Constituency trees stored as an arena with parent links.

use crate::error::{ComplexityError, Result};

/// Index of a node inside a [`Tree`].
pub type NodeId = usize;

/// A node of a constituency tree: a phrase/pre-terminal category or a word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    label: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    is_word: bool,
}

impl TreeNode {
    /// Category label, or the surface form for words.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether this node is a terminal (word).
    pub fn is_word(&self) -> bool {
        self.is_word
    }
}

/// Ordered labeled tree for one sentence. Node 0 is the root; nodes are
/// stored in pre-order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    nodes: Vec<TreeNode>,
    yield_len: Vec<usize>,
}

impl Tree {
    /// Parse a bracketed tree such as `(TOP (S (NN Haus) (VVFIN steht)))`.
    pub fn parse(src: &str) -> Result<Self> {
        let tokens = tokenize(src);
        if tokens.is_empty() {
            return Err(ComplexityError::TreeParse("empty tree string".to_string()));
        }
        let mut nodes: Vec<TreeNode> = Vec::new();
        let mut stack: Vec<NodeId> = Vec::new();
        let mut closed_root = false;
        let mut i = 0;
        while i < tokens.len() {
            if closed_root {
                return Err(ComplexityError::TreeParse(format!(
                    "unexpected '{}' after end of tree",
                    tokens[i]
                )));
            }
            match tokens[i] {
                "(" => {
                    let label = match tokens.get(i + 1) {
                        Some(&t) if t != "(" && t != ")" => {
                            i += 1;
                            t.to_string()
                        }
                        _ => String::new(),
                    };
                    let id = push_node(&mut nodes, stack.last().copied(), label, false);
                    stack.push(id);
                }
                ")" => {
                    if stack.pop().is_none() {
                        return Err(ComplexityError::TreeParse(
                            "unbalanced closing bracket".to_string(),
                        ));
                    }
                    if stack.is_empty() {
                        closed_root = true;
                    }
                }
                word => {
                    let parent = stack.last().copied().ok_or_else(|| {
                        ComplexityError::TreeParse(format!("word '{}' outside of brackets", word))
                    })?;
                    push_node(&mut nodes, Some(parent), word.to_string(), true);
                }
            }
            i += 1;
        }
        if !stack.is_empty() {
            return Err(ComplexityError::TreeParse(
                "missing closing bracket".to_string(),
            ));
        }
        Ok(Self::from_nodes(nodes))
    }

    fn from_nodes(nodes: Vec<TreeNode>) -> Self {
        // pre-order storage: children always have larger ids than parents
        let mut yield_len = vec![0; nodes.len()];
        for id in (0..nodes.len()).rev() {
            if nodes[id].is_word {
                yield_len[id] = 1;
            }
            if let Some(p) = nodes[id].parent {
                yield_len[p] += yield_len[id];
            }
        }
        Self { nodes, yield_len }
    }

    /// The root node.
    #[inline]
    pub fn root(&self) -> NodeId {
        0
    }

    /// Number of nodes, words included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false for parsed trees.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Access a node.
    #[inline]
    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id]
    }

    /// Label of a node.
    #[inline]
    pub fn label(&self, id: NodeId) -> &str {
        &self.nodes[id].label
    }

    /// Parent of a node.
    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    /// Children of a node, in order.
    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    /// Siblings to the left and right of a node, excluding itself.
    pub fn siblings(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let parent_children = match self.parent(id) {
            Some(p) => self.children(p),
            None => &[],
        };
        parent_children.iter().copied().filter(move |&c| c != id)
    }

    /// Proper ancestors, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&p| self.parent(p))
    }

    /// Proper descendants in pre-order.
    pub fn descendants(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        // pre-order: the subtree of `id` is the contiguous id range after it
        let end = self.subtree_end(id);
        (id + 1)..end
    }

    fn subtree_end(&self, id: NodeId) -> NodeId {
        let mut cur = id;
        loop {
            match self.nodes[cur].children.last() {
                Some(&last) => cur = last,
                None => return cur + 1,
            }
        }
    }

    /// Whether this node is a word.
    #[inline]
    pub fn is_word(&self, id: NodeId) -> bool {
        self.nodes[id].is_word
    }

    /// Non-terminal nodes (phrases and pre-terminals) in pre-order.
    pub fn constituents(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).filter(move |&id| !self.nodes[id].is_word)
    }

    /// The words of the sentence, in order.
    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        self.nodes
            .iter()
            .filter(|n| n.is_word)
            .map(|n| n.label.as_str())
    }

    /// Number of words dominated by a node.
    #[inline]
    pub fn yield_len(&self, id: NodeId) -> usize {
        self.yield_len[id]
    }

    /// Number of words in the sentence.
    #[inline]
    pub fn n_words(&self) -> usize {
        self.yield_len[0]
    }

    /// Height of the tree; a word has height 1, a pre-terminal height 2.
    pub fn height(&self) -> usize {
        let mut heights = vec![1; self.nodes.len()];
        for id in (0..self.nodes.len()).rev() {
            if let Some(p) = self.nodes[id].parent {
                heights[p] = heights[p].max(heights[id] + 1);
            }
        }
        heights.first().copied().unwrap_or(0)
    }
}

fn push_node(
    nodes: &mut Vec<TreeNode>,
    parent: Option<NodeId>,
    label: String,
    is_word: bool,
) -> NodeId {
    let id = nodes.len();
    nodes.push(TreeNode {
        label,
        parent,
        children: Vec::new(),
        is_word,
    });
    if let Some(p) = parent {
        nodes[p].children.push(id);
    }
    id
}

fn tokenize(src: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    for (i, c) in src.char_indices() {
        if c == '(' || c == ')' || c.is_whitespace() {
            if let Some(s) = start.take() {
                tokens.push(&src[s..i]);
            }
            if !c.is_whitespace() {
                tokens.push(&src[i..i + 1]);
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        tokens.push(&src[s..]);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    const SRC: &str = "(TOP (S (PPER Er) (VVFIN sagt) (S (KOUS dass) (PPER sie) (VVFIN kommt))))";

    #[test]
    fn test_parse_structure() {
        let tree = Tree::parse(SRC).unwrap();
        assert_eq!(tree.label(tree.root()), "TOP");
        assert_eq!(tree.n_words(), 5);
        assert_eq!(tree.words().collect::<Vec<_>>(), vec!["Er", "sagt", "dass", "sie", "kommt"]);
        // TOP, 2×S, 5 pre-terminals
        assert_eq!(tree.constituents().count(), 8);
    }

    #[test]
    fn test_height() {
        let tree = Tree::parse(SRC).unwrap();
        // TOP > S > S > KOUS > dass
        assert_eq!(tree.height(), 5);
        assert_eq!(Tree::parse("(NN Haus)").unwrap().height(), 2);
    }

    #[test]
    fn test_navigation() {
        let tree = Tree::parse(SRC).unwrap();
        let s = tree.children(tree.root())[0];
        assert_eq!(tree.label(s), "S");
        assert_eq!(tree.yield_len(s), 5);
        let inner = *tree.children(s).last().unwrap();
        assert_eq!(tree.label(inner), "S");
        assert_eq!(tree.yield_len(inner), 3);
        assert_eq!(tree.ancestors(inner).collect::<Vec<_>>(), vec![s, 0]);
        assert_eq!(tree.siblings(inner).count(), 2);
        assert_eq!(tree.descendants(inner).count(), 6);
    }

    #[test]
    fn test_unlabeled_root() {
        let tree = Tree::parse("( (S (NN x)))").unwrap();
        assert_eq!(tree.label(0), "");
        assert_eq!(tree.label(1), "S");
    }

    #[test]
    fn test_parse_errors() {
        assert!(Tree::parse("").is_err());
        assert!(Tree::parse("(S (NN x)").is_err());
        assert!(Tree::parse("(S (NN x)))").is_err());
        assert!(Tree::parse("x (S y)").is_err());
    }
}
