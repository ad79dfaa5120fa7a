//! Dominance patterns over constituency trees in a tgrep-like syntax.
//!
//! ```text
//! pattern   := primary condition*
//! primary   := LABEL ('|' LABEL)* | '__' | '(' pattern ')'
//! condition := relation primary ('|' relation primary)*
//! relation  := '>' | '>>' | '<' | '<<'
//! ```
//!
//! `A > B` means A's parent matches B, `A >> B` some ancestor, `A < B`
//! some child and `A << B` some descendant. Juxtaposed conditions must
//! all hold; `|` between relations means any of them. Only constituent
//! nodes match; words never do.

use crate::data::{NodeId, Tree};
use crate::error::{ComplexityError, Result};
use std::fmt;

/// Structural relation between the pattern node and an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// `>`: immediately dominated by
    Parent,
    /// `>>`: dominated by
    Ancestor,
    /// `<`: immediately dominates
    Child,
    /// `<<`: dominates
    Descendant,
}

impl Relation {
    fn symbol(&self) -> &'static str {
        match self {
            Self::Parent => ">",
            Self::Ancestor => ">>",
            Self::Child => "<",
            Self::Descendant => "<<",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Head {
    Any,
    Labels(Vec<String>),
    Group(Box<Pattern>),
}

/// A disjunction of relations; at least one must hold.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Condition {
    alternatives: Vec<(Relation, Pattern)>,
}

/// A compiled tree pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    head: Head,
    conditions: Vec<Condition>,
}

impl Pattern {
    /// Parse a pattern such as `S > (CS > TOP) | > TOP`.
    pub fn parse(src: &str) -> Result<Self> {
        let tokens = lex(src)?;
        let mut parser = Parser { tokens, pos: 0 };
        let pattern = parser.pattern()?;
        if let Some(tok) = parser.peek() {
            return Err(ComplexityError::Pattern(format!(
                "unexpected '{}' in pattern '{}'",
                tok, src
            )));
        }
        Ok(pattern)
    }

    /// Whether `node` matches.
    pub fn matches(&self, tree: &Tree, node: NodeId) -> bool {
        if tree.is_word(node) {
            return false;
        }
        let head = match &self.head {
            Head::Any => true,
            Head::Labels(labels) => labels.iter().any(|l| l == tree.label(node)),
            Head::Group(inner) => inner.matches(tree, node),
        };
        head && self.conditions.iter().all(|c| {
            c.alternatives
                .iter()
                .any(|(relation, operand)| related(tree, node, *relation, operand))
        })
    }

    /// All matching nodes in pre-order.
    pub fn find<'t>(&'t self, tree: &'t Tree) -> impl Iterator<Item = NodeId> + 't {
        tree.constituents().filter(move |&n| self.matches(tree, n))
    }
}

fn related(tree: &Tree, node: NodeId, relation: Relation, operand: &Pattern) -> bool {
    match relation {
        Relation::Parent => tree.parent(node).is_some_and(|p| operand.matches(tree, p)),
        Relation::Ancestor => tree.ancestors(node).any(|a| operand.matches(tree, a)),
        Relation::Child => tree.children(node).iter().any(|&c| operand.matches(tree, c)),
        Relation::Descendant => tree.descendants(node).any(|d| operand.matches(tree, d)),
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.head {
            Head::Any => write!(f, "__")?,
            Head::Labels(labels) => write!(f, "{}", labels.join("|"))?,
            Head::Group(inner) => write!(f, "({})", inner)?,
        }
        for condition in &self.conditions {
            for (i, (relation, operand)) in condition.alternatives.iter().enumerate() {
                if i > 0 {
                    write!(f, " |")?;
                }
                write!(f, " {} {}", relation.symbol(), operand)?;
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for Pattern {
    type Err = ComplexityError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Tok {
    Open,
    Close,
    Bar,
    Rel(Relation),
    Label(String),
}

impl fmt::Display for Tok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tok::Open => f.write_str("("),
            Tok::Close => f.write_str(")"),
            Tok::Bar => f.write_str("|"),
            Tok::Rel(r) => f.write_str(r.symbol()),
            Tok::Label(l) => f.write_str(l),
        }
    }
}

fn lex(src: &str) -> Result<Vec<Tok>> {
    let mut tokens = Vec::new();
    let mut chars = src.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {}
            '(' => tokens.push(Tok::Open),
            ')' => tokens.push(Tok::Close),
            '|' => tokens.push(Tok::Bar),
            '>' | '<' => {
                let double = chars.peek() == Some(&c);
                if double {
                    chars.next();
                }
                tokens.push(Tok::Rel(match (c, double) {
                    ('>', false) => Relation::Parent,
                    ('>', true) => Relation::Ancestor,
                    ('<', false) => Relation::Child,
                    _ => Relation::Descendant,
                }));
            }
            c => {
                let mut label = String::from(c);
                while let Some(&n) = chars.peek() {
                    if n.is_whitespace() || "()|<>".contains(n) {
                        break;
                    }
                    label.push(n);
                    chars.next();
                }
                tokens.push(Tok::Label(label));
            }
        }
    }
    if tokens.is_empty() {
        return Err(ComplexityError::Pattern("empty pattern".to_string()));
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Tok>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Tok> {
        self.tokens.get(self.pos)
    }

    fn peek_at(&self, offset: usize) -> Option<&Tok> {
        self.tokens.get(self.pos + offset)
    }

    fn next(&mut self) -> Option<Tok> {
        let tok = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        tok
    }

    fn error(&self, expected: &str) -> ComplexityError {
        match self.peek() {
            Some(tok) => ComplexityError::Pattern(format!("expected {}, found '{}'", expected, tok)),
            None => ComplexityError::Pattern(format!("expected {}, found end of pattern", expected)),
        }
    }

    fn pattern(&mut self) -> Result<Pattern> {
        let head = self.primary()?;
        let mut conditions = Vec::new();
        while let Some(Tok::Rel(_)) = self.peek() {
            conditions.push(self.condition()?);
        }
        Ok(Pattern { head, conditions })
    }

    fn primary(&mut self) -> Result<Head> {
        match self.next() {
            Some(Tok::Open) => {
                let inner = self.pattern()?;
                match self.next() {
                    Some(Tok::Close) => Ok(Head::Group(Box::new(inner))),
                    _ => {
                        self.pos -= 1;
                        Err(self.error("')'"))
                    }
                }
            }
            Some(Tok::Label(label)) if label == "__" => Ok(Head::Any),
            Some(Tok::Label(label)) => {
                let mut labels = vec![label];
                // `A|B` is a label alternative, `... | > X` a relation one
                while let (Some(Tok::Bar), Some(Tok::Label(_))) = (self.peek(), self.peek_at(1)) {
                    self.pos += 1;
                    if let Some(Tok::Label(l)) = self.next() {
                        labels.push(l);
                    }
                }
                Ok(Head::Labels(labels))
            }
            _ => {
                self.pos -= 1;
                Err(self.error("a label or '('"))
            }
        }
    }

    fn condition(&mut self) -> Result<Condition> {
        let mut alternatives = vec![self.relation()?];
        while let (Some(Tok::Bar), Some(Tok::Rel(_))) = (self.peek(), self.peek_at(1)) {
            self.pos += 1;
            alternatives.push(self.relation()?);
        }
        Ok(Condition { alternatives })
    }

    fn relation(&mut self) -> Result<(Relation, Pattern)> {
        let relation = match self.next() {
            Some(Tok::Rel(r)) => r,
            _ => {
                self.pos -= 1;
                return Err(self.error("a relation"));
            }
        };
        let head = self.primary()?;
        Ok((
            relation,
            Pattern {
                head,
                conditions: Vec::new(),
            },
        ))
    }
}
