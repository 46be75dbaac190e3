use serde_json::{Map, Number, Value};

/// Kind of a document node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    String,
    Number,
    Boolean,
    Null,
    Array,
    Object,
}

impl NodeKind {
    /// Every kind, in the order the generator draws them.
    pub const ALL: [NodeKind; 6] = [
        NodeKind::String,
        NodeKind::Number,
        NodeKind::Boolean,
        NodeKind::Null,
        NodeKind::Array,
        NodeKind::Object,
    ];

    pub fn is_container(self) -> bool {
        matches!(self, NodeKind::Array | NodeKind::Object)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::String => "string",
            NodeKind::Number => "number",
            NodeKind::Boolean => "boolean",
            NodeKind::Null => "null",
            NodeKind::Array => "array",
            NodeKind::Object => "object",
        }
    }
}

/// A node of a generated document tree.
///
/// Objects keep their members in insertion order; the generator guarantees
/// member keys are unique.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
    Array(Vec<Node>),
    Object(Vec<(String, Node)>),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::String(_) => NodeKind::String,
            Node::Number(_) => NodeKind::Number,
            Node::Boolean(_) => NodeKind::Boolean,
            Node::Null => NodeKind::Null,
            Node::Array(_) => NodeKind::Array,
            Node::Object(_) => NodeKind::Object,
        }
    }

    pub fn is_container(&self) -> bool {
        self.kind().is_container()
    }

    /// Number of direct children; zero for scalars.
    pub fn len(&self) -> usize {
        match self {
            Node::Array(items) => items.len(),
            Node::Object(members) => members.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Direct children in document order.
    pub fn children(&self) -> Box<dyn Iterator<Item = &Node> + '_> {
        match self {
            Node::Array(items) => Box::new(items.iter()),
            Node::Object(members) => Box::new(members.iter().map(|(_, value)| value)),
            _ => Box::new(std::iter::empty()),
        }
    }

    /// Count of all nodes below this one.
    pub fn descendant_count(&self) -> u64 {
        let mut count = 0_u64;
        let mut stack: Vec<&Node> = self.children().collect();
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children());
        }
        count
    }

    /// Levels of nesting below this node; zero for scalars and empty containers.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(&Node, usize)> = self.children().map(|child| (child, 1)).collect();
        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            stack.extend(node.children().map(|child| (child, depth + 1)));
        }
        max_depth
    }

    /// Convert into a `serde_json::Value`.
    ///
    /// Non-finite numbers have no JSON form and become `null`.
    pub fn to_json_value(&self) -> Value {
        match self {
            Node::String(value) => Value::String(value.clone()),
            Node::Number(value) => Number::from_f64(*value)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Node::Boolean(value) => Value::Bool(*value),
            Node::Null => Value::Null,
            Node::Array(items) => Value::Array(items.iter().map(Node::to_json_value).collect()),
            Node::Object(members) => {
                let mut map = Map::new();
                for (key, value) in members {
                    map.insert(key.clone(), value.to_json_value());
                }
                Value::Object(map)
            }
        }
    }
}
