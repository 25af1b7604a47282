//! AST node types.
//!
//! The tree is a single tagged union: statements and expressions share the
//! `Node` type, and an expression statement is just the expression itself.
//! Serializing a node yields a JSON object whose `"type"` member names the
//! variant and whose other members are exactly that variant's fields.

use serde::{Serialize, Serializer};

/// A syntax tree node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Node {
    Program {
        body: Vec<Node>,
    },

    // === Literals ===
    NumericLiteral {
        #[serde(serialize_with = "serialize_number")]
        value: f64,
    },
    /// Digits of a bigint literal, without the trailing `n`.
    BigIntLiteral {
        value: String,
    },
    StringLiteral {
        value: String,
    },
    RegExpLiteral {
        pattern: String,
        flags: String,
    },
    BooleanLiteral {
        value: bool,
    },
    NullLiteral,
    UndefinedLiteral,
    TemplateLiteral {
        expressions: Vec<Node>,
        /// Always one more element than `expressions`.
        quasis: Vec<Node>,
    },
    TemplateElement {
        value: String,
    },
    ArrayLiteral {
        elements: Vec<Node>,
    },
    ObjectLiteral {
        properties: Vec<Node>,
    },
    Property {
        key: Box<Node>,
        value: Box<Node>,
        computed: bool,
        method: bool,
    },

    // === Identifiers ===
    Identifier {
        name: String,
    },
    ThisExpression,
    /// `#name` in a class body or after `.`
    PrivateName {
        id: Box<Node>,
    },

    // === Operations ===
    BinaryExpression {
        left: Box<Node>,
        operator: BinaryOperator,
        right: Box<Node>,
    },
    LogicalExpression {
        left: Box<Node>,
        operator: LogicalOperator,
        right: Box<Node>,
    },
    UnaryExpression {
        operator: UnaryOperator,
        argument: Box<Node>,
    },
    UpdateExpression {
        operator: UpdateOperator,
        prefix: bool,
        argument: Box<Node>,
    },
    AwaitExpression {
        argument: Box<Node>,
    },
    YieldExpression {
        #[serde(skip_serializing_if = "Option::is_none")]
        argument: Option<Box<Node>>,
    },
    /// `a = b`
    AssignmentExpression {
        id: Box<Node>,
        operator: AssignmentOperator,
        value: Box<Node>,
    },
    /// `a += b` and the other compound forms.
    ComplexAssignmentExpression {
        id: Box<Node>,
        operator: AssignmentOperator,
        value: Box<Node>,
    },
    /// A defaulted parameter: `a = 1` in a parameter list.
    AssignmentPattern {
        left: Box<Node>,
        right: Box<Node>,
    },
    SequenceExpression {
        expressions: Vec<Node>,
    },
    ParenthesizedExpression {
        body: Box<Node>,
    },

    // === Member access and calls ===
    MemberExpression {
        object: Box<Node>,
        property: Box<Node>,
        computed: bool,
    },
    OptionalMemberExpression {
        object: Box<Node>,
        property: Box<Node>,
        computed: bool,
        optional: bool,
    },
    CallExpression {
        callee: Box<Node>,
        arguments: Vec<Node>,
    },
    OptionalCallExpression {
        callee: Box<Node>,
        arguments: Vec<Node>,
        optional: bool,
    },
    NewExpression {
        callee: Box<Node>,
        arguments: Vec<Node>,
    },

    // === Functions ===
    ArrowFunctionExpression {
        generator: bool,
        #[serde(rename = "async")]
        is_async: bool,
        params: Vec<Node>,
        /// A `BlockStatement`, or the bare expression of a concise body.
        body: Box<Node>,
    },
    FunctionExpression {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<Box<Node>>,
        generator: bool,
        #[serde(rename = "async")]
        is_async: bool,
        params: Vec<Node>,
        body: Box<Node>,
    },
    FunctionDeclaration {
        id: Box<Node>,
        generator: bool,
        #[serde(rename = "async")]
        is_async: bool,
        params: Vec<Node>,
        body: Box<Node>,
    },

    // === Statements ===
    VariableDeclaration {
        id: Box<Node>,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<Box<Node>>,
        kind: VariableKind,
    },
    BlockStatement {
        body: Vec<Node>,
    },
    IfStatement {
        test: Box<Node>,
        consequent: Box<Node>,
        #[serde(skip_serializing_if = "Option::is_none")]
        alternate: Option<Box<Node>>,
    },
    /// Absent clauses serialize as `null`.
    ForStatement {
        init: Option<Box<Node>>,
        test: Option<Box<Node>>,
        update: Option<Box<Node>>,
        body: Box<Node>,
    },
    ForOfStatement {
        left: Box<Node>,
        right: Box<Node>,
        body: Box<Node>,
    },
    WhileStatement {
        test: Box<Node>,
        body: Box<Node>,
    },
    DoWhileStatement {
        body: Box<Node>,
        test: Box<Node>,
    },
    ContinueStatement,
    BreakStatement,
    ReturnStatement {
        #[serde(skip_serializing_if = "Option::is_none")]
        argument: Option<Box<Node>>,
    },
    ThrowStatement {
        argument: Box<Node>,
    },
    TryStatement {
        block: Box<Node>,
        #[serde(skip_serializing_if = "Option::is_none")]
        handler: Option<Box<Node>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        finalizer: Option<Box<Node>>,
    },
    CatchClause {
        #[serde(skip_serializing_if = "Option::is_none")]
        param: Option<Box<Node>>,
        body: Box<Node>,
    },

    // === Classes ===
    ClassDeclaration {
        id: Box<Node>,
        #[serde(rename = "superClass", skip_serializing_if = "Option::is_none")]
        super_class: Option<Box<Node>>,
        body: Box<Node>,
    },
    ClassBody {
        body: Vec<Node>,
    },
    ClassProperty {
        key: Box<Node>,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<Box<Node>>,
        #[serde(rename = "static")]
        is_static: bool,
    },
    ClassPrivateProperty {
        key: Box<Node>,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<Box<Node>>,
        #[serde(rename = "static")]
        is_static: bool,
    },
    ClassMethodDefinition {
        key: Box<Node>,
        #[serde(rename = "static")]
        is_static: bool,
        kind: MethodKind,
        /// Always a `FunctionExpression`.
        value: Box<Node>,
    },
}

impl Node {
    pub fn identifier(name: impl Into<String>) -> Self {
        Node::Identifier { name: name.into() }
    }

    pub fn block(body: Vec<Node>) -> Self {
        Node::BlockStatement { body }
    }

    /// The `"type"` tag this node serializes with.
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Program { .. } => "Program",
            Node::NumericLiteral { .. } => "NumericLiteral",
            Node::BigIntLiteral { .. } => "BigIntLiteral",
            Node::StringLiteral { .. } => "StringLiteral",
            Node::RegExpLiteral { .. } => "RegExpLiteral",
            Node::BooleanLiteral { .. } => "BooleanLiteral",
            Node::NullLiteral => "NullLiteral",
            Node::UndefinedLiteral => "UndefinedLiteral",
            Node::TemplateLiteral { .. } => "TemplateLiteral",
            Node::TemplateElement { .. } => "TemplateElement",
            Node::ArrayLiteral { .. } => "ArrayLiteral",
            Node::ObjectLiteral { .. } => "ObjectLiteral",
            Node::Property { .. } => "Property",
            Node::Identifier { .. } => "Identifier",
            Node::ThisExpression => "ThisExpression",
            Node::PrivateName { .. } => "PrivateName",
            Node::BinaryExpression { .. } => "BinaryExpression",
            Node::LogicalExpression { .. } => "LogicalExpression",
            Node::UnaryExpression { .. } => "UnaryExpression",
            Node::UpdateExpression { .. } => "UpdateExpression",
            Node::AwaitExpression { .. } => "AwaitExpression",
            Node::YieldExpression { .. } => "YieldExpression",
            Node::AssignmentExpression { .. } => "AssignmentExpression",
            Node::ComplexAssignmentExpression { .. } => "ComplexAssignmentExpression",
            Node::AssignmentPattern { .. } => "AssignmentPattern",
            Node::SequenceExpression { .. } => "SequenceExpression",
            Node::ParenthesizedExpression { .. } => "ParenthesizedExpression",
            Node::MemberExpression { .. } => "MemberExpression",
            Node::OptionalMemberExpression { .. } => "OptionalMemberExpression",
            Node::CallExpression { .. } => "CallExpression",
            Node::OptionalCallExpression { .. } => "OptionalCallExpression",
            Node::NewExpression { .. } => "NewExpression",
            Node::ArrowFunctionExpression { .. } => "ArrowFunctionExpression",
            Node::FunctionExpression { .. } => "FunctionExpression",
            Node::FunctionDeclaration { .. } => "FunctionDeclaration",
            Node::VariableDeclaration { .. } => "VariableDeclaration",
            Node::BlockStatement { .. } => "BlockStatement",
            Node::IfStatement { .. } => "IfStatement",
            Node::ForStatement { .. } => "ForStatement",
            Node::ForOfStatement { .. } => "ForOfStatement",
            Node::WhileStatement { .. } => "WhileStatement",
            Node::DoWhileStatement { .. } => "DoWhileStatement",
            Node::ContinueStatement => "ContinueStatement",
            Node::BreakStatement => "BreakStatement",
            Node::ReturnStatement { .. } => "ReturnStatement",
            Node::ThrowStatement { .. } => "ThrowStatement",
            Node::TryStatement { .. } => "TryStatement",
            Node::CatchClause { .. } => "CatchClause",
            Node::ClassDeclaration { .. } => "ClassDeclaration",
            Node::ClassBody { .. } => "ClassBody",
            Node::ClassProperty { .. } => "ClassProperty",
            Node::ClassPrivateProperty { .. } => "ClassPrivateProperty",
            Node::ClassMethodDefinition { .. } => "ClassMethodDefinition",
        }
    }

    /// Top-level statements of a `Program`, empty for any other node.
    pub fn body(&self) -> &[Node] {
        match self {
            Node::Program { body } => body,
            _ => &[],
        }
    }

    /// Check if this node may appear on the left of `=` or under `++`/`--`.
    pub fn is_assignment_target(&self) -> bool {
        matches!(self, Node::Identifier { .. } | Node::MemberExpression { .. })
    }
}

/// JavaScript has one number type: integral values print without a fraction.
fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// `let` or `const`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    Let,
    Const,
}

impl VariableKind {
    pub fn from_text(text: &str) -> Option<Self> {
        match text {
            "let" => Some(VariableKind::Let),
            "const" => Some(VariableKind::Const),
            _ => None,
        }
    }
}

/// Class method kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    Constructor,
    Method,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOperator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
    #[serde(rename = "**")]
    Pow,
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    NotEq,
    #[serde(rename = "===")]
    StrictEq,
    #[serde(rename = "!==")]
    StrictNotEq,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    LtEq,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    GtEq,
    #[serde(rename = "|")]
    BitOr,
    #[serde(rename = "^")]
    BitXor,
    #[serde(rename = "&")]
    BitAnd,
}

impl BinaryOperator {
    pub fn from_text(text: &str) -> Option<Self> {
        let op = match text {
            "+" => BinaryOperator::Add,
            "-" => BinaryOperator::Sub,
            "*" => BinaryOperator::Mul,
            "/" => BinaryOperator::Div,
            "**" => BinaryOperator::Pow,
            "==" => BinaryOperator::Eq,
            "!=" => BinaryOperator::NotEq,
            "===" => BinaryOperator::StrictEq,
            "!==" => BinaryOperator::StrictNotEq,
            "<" => BinaryOperator::Lt,
            "<=" => BinaryOperator::LtEq,
            ">" => BinaryOperator::Gt,
            ">=" => BinaryOperator::GtEq,
            "|" => BinaryOperator::BitOr,
            "^" => BinaryOperator::BitXor,
            "&" => BinaryOperator::BitAnd,
            _ => return None,
        };
        Some(op)
    }
}

/// Short-circuiting operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LogicalOperator {
    #[serde(rename = "&&")]
    And,
    #[serde(rename = "||")]
    Or,
    #[serde(rename = "??")]
    NullishCoalesce,
}

impl LogicalOperator {
    pub fn from_text(text: &str) -> Option<Self> {
        match text {
            "&&" => Some(LogicalOperator::And),
            "||" => Some(LogicalOperator::Or),
            "??" => Some(LogicalOperator::NullishCoalesce),
            _ => None,
        }
    }
}

/// Prefix operators that build a `UnaryExpression`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOperator {
    #[serde(rename = "!")]
    Not,
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
}

impl UnaryOperator {
    pub fn from_text(text: &str) -> Option<Self> {
        match text {
            "!" => Some(UnaryOperator::Not),
            "+" => Some(UnaryOperator::Plus),
            "-" => Some(UnaryOperator::Minus),
            _ => None,
        }
    }
}

/// `++` / `--`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UpdateOperator {
    #[serde(rename = "++")]
    Increment,
    #[serde(rename = "--")]
    Decrement,
}

impl UpdateOperator {
    pub fn from_text(text: &str) -> Option<Self> {
        match text {
            "++" => Some(UpdateOperator::Increment),
            "--" => Some(UpdateOperator::Decrement),
            _ => None,
        }
    }
}

/// Assignment operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssignmentOperator {
    #[serde(rename = "=")]
    Assign,
    #[serde(rename = "+=")]
    AddAssign,
    #[serde(rename = "-=")]
    SubAssign,
    #[serde(rename = "*=")]
    MulAssign,
    #[serde(rename = "/=")]
    DivAssign,
}

impl AssignmentOperator {
    pub fn from_text(text: &str) -> Option<Self> {
        let op = match text {
            "=" => AssignmentOperator::Assign,
            "+=" => AssignmentOperator::AddAssign,
            "-=" => AssignmentOperator::SubAssign,
            "*=" => AssignmentOperator::MulAssign,
            "/=" => AssignmentOperator::DivAssign,
            _ => return None,
        };
        Some(op)
    }
}
