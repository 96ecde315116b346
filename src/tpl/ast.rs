/// A node of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Literal text, written verbatim.
    Text(String),
    /// Prints a symbol; an empty name prints the current array element.
    Print { name: String },
    /// Splices in another template of the same set.
    Include { name: String },
    /// Repeats `nodes` once per element of a list.
    Array { name: String, nodes: Vec<Node> },
    /// Renders `nodes` if `name` is defined.
    Ifdef { name: String, nodes: Vec<Node> },
    /// Renders `nodes` if `name` is not defined.
    Ifndef { name: String, nodes: Vec<Node> },
    /// Renders `nodes` with a map as the innermost scope.
    Object { name: String, nodes: Vec<Node> },
}

impl Node {
    /// Children of a section node.
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Array { nodes, .. }
            | Node::Ifdef { nodes, .. }
            | Node::Ifndef { nodes, .. }
            | Node::Object { nodes, .. } => Some(nodes),
            Node::Text(_) | Node::Print { .. } | Node::Include { .. } => None,
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Array { nodes, .. }
            | Node::Ifdef { nodes, .. }
            | Node::Ifndef { nodes, .. }
            | Node::Object { nodes, .. } => Some(nodes),
            Node::Text(_) | Node::Print { .. } | Node::Include { .. } => None,
        }
    }
}
