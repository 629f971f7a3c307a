use std::{fmt, mem};

/// A parsed program: the top-level `define` forms in source order.
///
/// The program exclusively owns its whole tree. It is built once by the
/// parser and only read afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// Top-level definitions in source order.
    pub definitions: Vec<Definition>,
}

/// One `define` form.
///
/// Definitions appear at the top level of a program and, with the same
/// syntax, as statements inside function and block bodies.
#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    /// `define type[a, b]: [x, y];`
    Var(VarDefinition),
    /// `define struct[Name]: [type field, ...];`
    Struct(StructDefinition),
    /// `define func[Name]: [type param, ...], { ... }`
    Func(FuncDefinition),
}

impl Definition {
    /// Line number of the `define` keyword.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Var(def) => def.line,
            Self::Struct(def) => def.line,
            Self::Func(def) => def.line,
        }
    }
}

/// A group of variables declared with one type.
///
/// The number of names and values is only checked when the definition runs.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDefinition {
    /// Declared type name (`int`, `float`, `string`, `bool` or a struct name).
    pub type_name: String,
    /// Variable names in declaration order.
    pub names:     Vec<String>,
    /// Initializer expressions in declaration order.
    pub values:    Vec<Expr>,
    /// Line number in the source code.
    pub line:      usize,
}

/// A typed name: a function parameter or a struct field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Declared type name.
    pub type_name: String,
    /// Parameter or field name.
    pub name:      String,
}

/// A struct type declaration. Registered at startup but never instantiated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDefinition {
    /// Struct type name.
    pub name:   String,
    /// Declared fields in order.
    pub fields: Vec<Parameter>,
    /// Line number in the source code.
    pub line:   usize,
}

/// A user function.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDefinition {
    /// Function name.
    pub name:       String,
    /// Declared parameters in order.
    pub parameters: Vec<Parameter>,
    /// Body statements.
    pub body:       Vec<Statement>,
    /// Line number in the source code.
    pub line:       usize,
}

/// One `elseif (cond) { ... }` arm of an `if` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ElseIfBranch {
    /// The arm's condition.
    pub condition: Expr,
    /// Statements run when the condition holds.
    pub body:      Vec<Statement>,
}

/// A statement inside a function or block body.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A nested `define` form.
    Definition(Definition),
    /// `name: value;`
    Assignment {
        /// Target variable; must already be bound.
        identifier: String,
        /// Value expression.
        value:      Expr,
        /// Line number in the source code.
        line:       usize,
    },
    /// `return;` or `return value;`
    Return {
        /// Optional value expression; absent means nil.
        value: Option<Expr>,
        /// Line number in the source code.
        line:  usize,
    },
    /// `if (c) { } elseif (c) { } else { }`
    If {
        /// Condition of the leading `if`.
        condition:        Expr,
        /// Statements run when `condition` holds.
        then_body:        Vec<Statement>,
        /// `elseif` arms in source order.
        else_if_branches: Vec<ElseIfBranch>,
        /// Statements of the `else` arm; empty when absent.
        else_body:        Vec<Statement>,
        /// Line number in the source code.
        line:             usize,
    },
    /// `for i: [start, end], { }`
    For {
        /// Name of the loop variable.
        iterator: String,
        /// Inclusive lower bound.
        start:    Expr,
        /// Inclusive upper bound.
        end:      Expr,
        /// Loop body.
        body:     Vec<Statement>,
        /// Line number in the source code.
        line:     usize,
    },
    /// An expression evaluated for its effect, e.g. a call.
    Expression {
        /// The expression.
        expr: Expr,
        /// Line number in the source code.
        line: usize,
    },
}

/// The kind of a literal, deciding how its text is turned into a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Int,
    Float,
    String,
    Bool,
}

/// An abstract syntax tree node representing an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal; `text` is the digits, string content, or `true`/`false`.
    Literal {
        /// How to interpret `text`.
        kind: LiteralKind,
        /// Source text of the literal, with string escapes already resolved.
        text: String,
        /// Line number in the source code.
        line: usize,
    },
    /// Reference to a variable by name.
    Identifier {
        /// Name of the variable.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// `-operand`
    Unary {
        /// The unary operator to apply.
        op:      UnaryOperator,
        /// The operand expression.
        operand: Box<Self>,
        /// Line number in the source code.
        line:    usize,
    },
    /// `left op right`
    Binary {
        /// The binary operator to apply.
        op:    BinaryOperator,
        /// Left-hand operand.
        left:  Box<Self>,
        /// Right-hand operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// `condition ? true_expr : false_expr`
    Ternary {
        /// Selector.
        condition:  Box<Self>,
        /// Value when the condition holds.
        true_expr:  Box<Self>,
        /// Value otherwise.
        false_expr: Box<Self>,
        /// Line number in the source code.
        line:       usize,
    },
    /// A call. Dotted callees are flattened, e.g. `console.print`.
    Call {
        /// Callee name, possibly dotted.
        callee:    String,
        /// Argument expressions in order.
        arguments: Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// `object.member` outside call position.
    MemberAccess {
        /// The part before the dot.
        object: String,
        /// The part after the dot.
        member: String,
        /// Line number in the source code.
        line:   usize,
    },
}

impl Expr {
    /// Line number of the expression.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Literal { line, .. }
            | Self::Identifier { line, .. }
            | Self::Unary { line, .. }
            | Self::Binary { line, .. }
            | Self::Ternary { line, .. }
            | Self::Call { line, .. }
            | Self::MemberAccess { line, .. } => *line,
        }
    }

    const fn is_leaf(&self) -> bool {
        matches!(self, Self::Literal { .. } | Self::Identifier { .. } | Self::MemberAccess { .. })
    }

    /// Moves every non-leaf child into `pending`, leaving leaves behind.
    fn detach_children(&mut self, pending: &mut Vec<Self>) {
        match self {
            Self::Unary { operand, .. } => Self::detach(operand, pending),
            Self::Binary { left, right, .. } => {
                Self::detach(left, pending);
                Self::detach(right, pending);
            },
            Self::Ternary { condition,
                            true_expr,
                            false_expr,
                            .. } => {
                Self::detach(condition, pending);
                Self::detach(true_expr, pending);
                Self::detach(false_expr, pending);
            },
            Self::Call { arguments, .. } => {
                for argument in arguments {
                    Self::detach(argument, pending);
                }
            },
            Self::Literal { .. } | Self::Identifier { .. } | Self::MemberAccess { .. } => {},
        }
    }

    fn detach(slot: &mut Self, pending: &mut Vec<Self>) {
        if !slot.is_leaf() {
            pending.push(mem::replace(slot, Self::Identifier { name: String::new(),
                                                               line: 0 }));
        }
    }
}

// Deeply nested expressions are torn down with an explicit worklist so that
// dropping them cannot overflow the native stack.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut expr) = pending.pop() {
            expr.detach_children(&mut pending);
        }
    }
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// `-`
    Negate,
}

impl UnaryOperator {
    /// Source symbol of the operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Negate => "-",
        }
    }
}

/// Infix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
    /// `&&`
    And,
    /// `||`
    Or,
}

impl BinaryOperator {
    /// Source symbol of the operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::And => "&&",
            Self::Or => "||",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
