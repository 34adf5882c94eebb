//! # Script Callbacks
//!
//! Custom value providers given as one-line expressions. The resolution
//! engine only sees the [`ValueCallback`] capability; the language behind it
//! is chosen through a [`ScriptEngine`].
//!
//! The built-in [`ExprEngine`] understands a small expression language:
//!
//! ```text
//! quote(constant(field.name) + "_" + type.simpleName)
//! ```
//!
//! - string literals in single or double quotes
//! - variables `field.name`, `field.type`, `type.qualifiedName`,
//!   `type.simpleName`, `type.packageName`, `type.fixtureName`
//! - functions `upper`, `lower`, `constant` (SCREAMING_SNAKE_CASE), `quote`
//! - `+` concatenation
//!
//! Expressions are compiled once; syntax errors are reported at compile time.

use fixturegen_core::{FixtureError, FixtureResult};
use heck::ToShoutySnakeCase;
use std::fmt;
use std::sync::Arc;

use crate::metadata::TypeDescriptor;
use crate::provider::{ValueProvider, ValueRequest};
use crate::resolve::{ResolutionScope, ValueResolver};

// ============================================================================
// Capability
// ============================================================================

/// The field a callback is asked to produce a value for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    /// Qualified name of the declaring type
    pub owner: String,
    pub name: String,
    /// Qualified type of the field, generics included
    pub type_name: String,
}

/// Names of the field's type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    pub qualified_name: String,
    pub simple_name: String,
    pub package_name: String,
    pub fixture_name: String,
}

impl TypeInfo {
    pub fn from_descriptor(descriptor: &TypeDescriptor) -> Self {
        Self {
            qualified_name: descriptor.qualified_name.clone(),
            simple_name: descriptor.simple_name.clone(),
            package_name: descriptor.package_name.clone(),
            fixture_name: descriptor.fixture_name.clone(),
        }
    }
}

/// A compiled custom value provider
pub trait ValueCallback: Send + Sync {
    fn call(&self, field: &FieldInfo, ty: &TypeInfo) -> FixtureResult<String>;
}

/// Compiles callback source text
pub trait ScriptEngine: Send + Sync {
    fn name(&self) -> &'static str;

    fn compile(&self, source: &str) -> FixtureResult<Arc<dyn ValueCallback>>;
}

// ============================================================================
// CallbackProvider
// ============================================================================

/// Adapts a compiled callback to the provider interface
#[derive(Clone)]
pub struct CallbackProvider {
    source: String,
    callback: Arc<dyn ValueCallback>,
}

impl CallbackProvider {
    pub fn new(source: impl Into<String>, callback: Arc<dyn ValueCallback>) -> Self {
        Self {
            source: source.into(),
            callback,
        }
    }

    /// Compile `source` with `engine`
    pub fn compile(engine: &dyn ScriptEngine, source: &str) -> FixtureResult<Self> {
        Ok(Self::new(source, engine.compile(source)?))
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

impl fmt::Debug for CallbackProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackProvider")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl ValueProvider for CallbackProvider {
    fn provide(
        &self,
        request: &ValueRequest<'_>,
        _resolver: &ValueResolver<'_>,
        _scope: &mut ResolutionScope,
    ) -> FixtureResult<String> {
        let field = FieldInfo {
            owner: request.owner.to_string(),
            name: request.field.to_string(),
            type_name: request.descriptor.qualified_name.clone(),
        };
        let value = self
            .callback
            .call(&field, &TypeInfo::from_descriptor(request.descriptor))?;
        if value.trim().is_empty() {
            return Err(FixtureError::ScriptEval(format!(
                "'{}' produced an empty value for {}.{}",
                self.source, request.owner, request.field
            )));
        }
        Ok(value)
    }
}

// ============================================================================
// ExprEngine
// ============================================================================

/// The built-in expression language
#[derive(Debug, Clone, Copy, Default)]
pub struct ExprEngine;

impl ScriptEngine for ExprEngine {
    fn name(&self) -> &'static str {
        "expr"
    }

    fn compile(&self, source: &str) -> FixtureResult<Arc<dyn ValueCallback>> {
        let compile_error = |message: String| FixtureError::ScriptCompile {
            expression: source.to_string(),
            message,
        };

        let tokens = tokenize(source).map_err(compile_error)?;
        let mut parser = Parser { tokens, pos: 0 };
        let expr = parser.expression().map_err(compile_error)?;
        if let Some(token) = parser.peek() {
            return Err(compile_error(format!("unexpected {}", token)));
        }
        Ok(Arc::new(CompiledExpr(expr)))
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Str(String),
    Ident(String),
    LParen,
    RParen,
    Plus,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Str(s) => write!(f, "string \"{}\"", s),
            Token::Ident(name) => write!(f, "'{}'", name),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::Plus => write!(f, "'+'"),
        }
    }
}

fn tokenize(source: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut chars = source.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '"' | '\'' => {
                chars.next();
                let mut text = String::new();
                loop {
                    match chars.next() {
                        Some('\\') => match chars.next() {
                            Some(escaped) => text.push(escaped),
                            None => return Err("unterminated string literal".to_string()),
                        },
                        Some(ch) if ch == c => break,
                        Some(ch) => text.push(ch),
                        None => return Err("unterminated string literal".to_string()),
                    }
                }
                tokens.push(Token::Str(text));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut ident = String::new();
                while let Some(&ch) = chars.peek() {
                    if ch.is_ascii_alphanumeric() || ch == '_' || ch == '.' {
                        ident.push(ch);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(ident));
            }
            other => return Err(format!("unexpected character '{}'", other)),
        }
    }

    Ok(tokens)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Variable {
    FieldName,
    FieldType,
    QualifiedName,
    SimpleName,
    PackageName,
    FixtureName,
}

impl Variable {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "field.name" => Variable::FieldName,
            "field.type" => Variable::FieldType,
            "type.qualifiedName" => Variable::QualifiedName,
            "type.simpleName" => Variable::SimpleName,
            "type.packageName" => Variable::PackageName,
            "type.fixtureName" => Variable::FixtureName,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Function {
    Upper,
    Lower,
    Constant,
    Quote,
}

impl Function {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "upper" => Function::Upper,
            "lower" => Function::Lower,
            "constant" => Function::Constant,
            "quote" => Function::Quote,
            _ => return None,
        })
    }

    fn apply(self, arg: String) -> String {
        match self {
            Function::Upper => arg.to_uppercase(),
            Function::Lower => arg.to_lowercase(),
            Function::Constant => arg.to_shouty_snake_case(),
            Function::Quote => format!("\"{}\"", arg.replace('\\', "\\\\").replace('"', "\\\"")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Expr {
    Literal(String),
    Var(Variable),
    Call(Function, Box<Expr>),
    Concat(Vec<Expr>),
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn expect(&mut self, expected: Token) -> Result<(), String> {
        match self.next() {
            Some(token) if token == expected => Ok(()),
            Some(token) => Err(format!("expected {}, found {}", expected, token)),
            None => Err(format!("expected {}, found end of input", expected)),
        }
    }

    fn expression(&mut self) -> Result<Expr, String> {
        let mut parts = vec![self.term()?];
        while self.peek() == Some(&Token::Plus) {
            self.next();
            parts.push(self.term()?);
        }
        Ok(if parts.len() == 1 {
            parts.remove(0)
        } else {
            Expr::Concat(parts)
        })
    }

    fn term(&mut self) -> Result<Expr, String> {
        match self.next() {
            Some(Token::Str(text)) => Ok(Expr::Literal(text)),
            Some(Token::Ident(name)) if self.peek() == Some(&Token::LParen) => {
                let function = Function::from_name(&name)
                    .ok_or_else(|| format!("unknown function '{}'", name))?;
                self.next();
                let arg = self.expression()?;
                self.expect(Token::RParen)?;
                Ok(Expr::Call(function, Box::new(arg)))
            }
            Some(Token::Ident(name)) => Variable::from_name(&name)
                .map(Expr::Var)
                .ok_or_else(|| format!("unknown variable '{}'", name)),
            Some(token) => Err(format!("unexpected {}", token)),
            None => Err("empty expression".to_string()),
        }
    }
}

struct CompiledExpr(Expr);

impl CompiledExpr {
    fn eval(expr: &Expr, field: &FieldInfo, ty: &TypeInfo) -> String {
        match expr {
            Expr::Literal(text) => text.clone(),
            Expr::Var(var) => match var {
                Variable::FieldName => field.name.clone(),
                Variable::FieldType => field.type_name.clone(),
                Variable::QualifiedName => ty.qualified_name.clone(),
                Variable::SimpleName => ty.simple_name.clone(),
                Variable::PackageName => ty.package_name.clone(),
                Variable::FixtureName => ty.fixture_name.clone(),
            },
            Expr::Call(function, arg) => function.apply(Self::eval(arg, field, ty)),
            Expr::Concat(parts) => parts.iter().map(|p| Self::eval(p, field, ty)).collect(),
        }
    }
}

impl ValueCallback for CompiledExpr {
    fn call(&self, field: &FieldInfo, ty: &TypeInfo) -> FixtureResult<String> {
        Ok(Self::eval(&self.0, field, ty))
    }
}

// ============================================================================
// Tests
// ============================================================================
