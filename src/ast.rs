use std::fmt;

/// Index of a node inside its `SyntaxTree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Type keyword on a declaration, function, or parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeName {
    Void,
    Int,
    Bool,
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Void => "void",
            Self::Int => "int",
            Self::Bool => "bool",
        })
    }
}

/// Operator of an `ArithmeticExpr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOp {
    Add,
    Sub,
}

/// Operator of a `LogicalExpr`. `Not` is unary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
    Not,
}

/// Operator of a `RelationalExpr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationalOp {
    LessEqual,
    GreaterEqual,
    Equal,
    NotEqual,
}

impl RelationalOp {
    /// Map a comparison token's spelling to its operator.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "<=" => Some(Self::LessEqual),
            ">=" => Some(Self::GreaterEqual),
            "==" => Some(Self::Equal),
            "!=" => Some(Self::NotEqual),
            _ => None,
        }
    }
}

impl fmt::Display for ArithmeticOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Add => "+",
            Self::Sub => "-",
        })
    }
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::And => "&&",
            Self::Or => "||",
            Self::Not => "!",
        })
    }
}

impl fmt::Display for RelationalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
        })
    }
}

/// Node kind together with the data the node carries itself.
///
/// Structure lives in the child lists: a `Function` owns its
/// parameters followed by its body statements, binary expressions own
/// left then right, `IfElse` owns condition, then-block and an optional
/// else-block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Program,
    Declaration {
        ty: TypeName,
        name: String,
    },
    Function {
        return_type: TypeName,
        name: String,
        /// False for a prototype without `{ ... }`.
        has_body: bool,
    },
    Parameter {
        ty: TypeName,
        name: String,
    },
    Block,
    IfElse,
    Return,
    Print,
    ExpressionStatement,
    AssignExpr,
    /// Identifier or integer literal, spelled as in the source.
    FieldAccess(String),
    ArithmeticExpr(ArithmeticOp),
    LogicalExpr(LogicalOp),
    RelationalExpr(RelationalOp),
}

impl NodeKind {
    /// Label used when rendering the node.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Program => "Program",
            Self::Declaration { .. } => "Declaration",
            Self::Function { .. } => "Function",
            Self::Parameter { .. } => "Parameter",
            Self::Block => "Block",
            Self::IfElse => "IfElse",
            Self::Return => "Return",
            Self::Print => "Print",
            Self::ExpressionStatement => "ExpressionStatement",
            Self::AssignExpr => "AssignExpr",
            Self::FieldAccess(_) => "FieldAccess",
            Self::ArithmeticExpr(_) => "ArithmeticExpr",
            Self::LogicalExpr(_) => "LogicalExpr",
            Self::RelationalExpr(_) => "RelationalExpr",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.name())?;
        match self {
            Self::Declaration { name, .. } | Self::Function { name, .. } => {
                write!(f, " {name}")
            }
            Self::Parameter { ty, name } => write!(f, " {ty} {name}"),
            Self::AssignExpr => f.write_str(" ="),
            Self::FieldAccess(text) => write!(f, " {text}"),
            Self::ArithmeticExpr(op) => write!(f, " {op}"),
            Self::LogicalExpr(op) => write!(f, " {op}"),
            Self::RelationalExpr(op) => write!(f, " {op}"),
            Self::Program
            | Self::Block
            | Self::IfElse
            | Self::Return
            | Self::Print
            | Self::ExpressionStatement => Ok(()),
        }
    }
}

/// A node in the arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub children: Vec<NodeId>,
}

/// Syntax tree stored as an arena of nodes addressed by `NodeId`.
///
/// Children are allocated before their parent, so the root `Program`
/// node is the last one pushed. Every other node appears in exactly
/// one parent's child list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    nodes: Vec<SyntaxNode>,
    root: NodeId,
}

impl SyntaxTree {
    /// Id of the `Program` node.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id.0]
    }

    /// Look up a node, returning `None` for a foreign id.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&SyntaxNode> {
        self.nodes.get(id.0)
    }

    /// Kind of the node at `id`.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    /// Ordered children of the node at `id`.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Number of nodes, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Preorder walk starting at the root.
    #[must_use]
    pub fn iter(&self) -> Preorder<'_> {
        Preorder {
            tree: self,
            stack: vec![self.root],
        }
    }
}

impl<'a> IntoIterator for &'a SyntaxTree {
    type Item = (NodeId, &'a SyntaxNode);
    type IntoIter = Preorder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Preorder iterator over a `SyntaxTree`.
pub struct Preorder<'a> {
    tree: &'a SyntaxTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = (NodeId, &'a SyntaxNode);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.tree.node(id);
        self.stack.extend(node.children.iter().rev());
        Some((id, node))
    }
}

/// Bottom-up arena construction used by the parser.
#[derive(Debug, Default)]
pub(crate) struct TreeBuilder {
    nodes: Vec<SyntaxNode>,
}

impl TreeBuilder {
    pub(crate) const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Allocate a node owning `children`, which must not be owned yet.
    pub(crate) fn push(&mut self, kind: NodeKind, children: Vec<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(SyntaxNode { kind, children });
        id
    }

    pub(crate) fn leaf(&mut self, kind: NodeKind) -> NodeId {
        self.push(kind, Vec::new())
    }

    /// Allocate the `Program` root over the top-level items.
    pub(crate) fn finish(mut self, items: Vec<NodeId>) -> SyntaxTree {
        let root = self.push(NodeKind::Program, items);
        SyntaxTree {
            nodes: self.nodes,
            root,
        }
    }
}
