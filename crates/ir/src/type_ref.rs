//! Type references
//!
//! A [`TypeRef`] is a type at a point of use: the declared type of a field,
//! a constructor parameter, a method return type or a generic argument. It is
//! parsed from and rendered to source-level type text, e.g.
//! `java.util.Map<java.lang.String, java.lang.Integer>`, `int[]` or `T`.

use fixturegen_core::{FixtureError, FixtureResult, PrimitiveKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Package whose members are visible without an import
const IMPLICIT_PACKAGE: &str = "java.lang.";

// ============================================================================
// TypeRef
// ============================================================================

/// A resolved type at a point of use
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeRef {
    /// A primitive (`int`, `boolean`, ...)
    Primitive(PrimitiveKind),

    /// A declared class, record, interface or enum with optional generic arguments
    Declared { name: String, args: Vec<TypeRef> },

    /// An array of the component type
    Array(Box<TypeRef>),

    /// A type variable declared by the enclosing element
    Variable(String),

    /// A wildcard argument (`?`, `? extends X`, `? super X`)
    Wildcard {
        bound: Option<Box<TypeRef>>,
        upper: bool,
    },
}

impl TypeRef {
    // ====================================================================
    // Construction
    // ====================================================================

    /// Parse source-level type text
    pub fn parse(text: &str) -> FixtureResult<Self> {
        let mut parser = Parser::new(text);
        let ty = parser.parse_type()?;
        parser.skip_ws();
        if parser.pos < parser.chars.len() {
            return Err(parser.error("unexpected trailing input"));
        }
        Ok(ty)
    }

    /// A declared type without generic arguments
    pub fn declared(name: impl Into<String>) -> Self {
        TypeRef::Declared {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// A declared type with generic arguments
    pub fn generic(name: impl Into<String>, args: Vec<TypeRef>) -> Self {
        TypeRef::Declared {
            name: name.into(),
            args,
        }
    }

    /// An array of this type
    pub fn array_of(component: TypeRef) -> Self {
        TypeRef::Array(Box::new(component))
    }

    // ====================================================================
    // Accessors
    // ====================================================================

    /// Name with generic arguments removed (`java.util.List` for `java.util.List<T>`)
    pub fn erasure(&self) -> String {
        match self {
            TypeRef::Primitive(p) => p.keyword().to_string(),
            TypeRef::Declared { name, .. } => name.clone(),
            TypeRef::Array(component) => format!("{}[]", component.erasure()),
            TypeRef::Variable(name) => name.clone(),
            TypeRef::Wildcard { bound, .. } => bound
                .as_ref()
                .map(|b| b.erasure())
                .unwrap_or_else(|| "java.lang.Object".to_string()),
        }
    }

    /// Generic arguments of a declared type (empty otherwise)
    pub fn args(&self) -> &[TypeRef] {
        match self {
            TypeRef::Declared { args, .. } => args,
            _ => &[],
        }
    }

    /// The `<A, B>` suffix of a declared type, or an empty string
    pub fn generic_text(&self) -> String {
        match self {
            TypeRef::Declared { args, .. } if !args.is_empty() => format!("<{}>", join(args)),
            _ => String::new(),
        }
    }

    /// Whether the type carries generic arguments
    pub fn is_generic(&self) -> bool {
        !self.args().is_empty()
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeRef::Primitive(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, TypeRef::Array(_))
    }

    /// Component type of an array
    pub fn component(&self) -> Option<&TypeRef> {
        match self {
            TypeRef::Array(component) => Some(component),
            _ => None,
        }
    }

    /// Every declared type name mentioned anywhere in this reference
    pub fn declared_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            TypeRef::Declared { name, args } => {
                out.push(name);
                for arg in args {
                    arg.collect_names(out);
                }
            }
            TypeRef::Array(component) => component.collect_names(out),
            TypeRef::Wildcard { bound: Some(b), .. } => b.collect_names(out),
            _ => {}
        }
    }

    // ====================================================================
    // Transformations
    // ====================================================================

    /// Replace type variables with their concrete arguments, recursively
    ///
    /// `java.util.List<T>` with `T -> java.lang.String` becomes
    /// `java.util.List<java.lang.String>`. Variables missing from the map are
    /// left untouched.
    pub fn substitute(&self, map: &HashMap<String, TypeRef>) -> TypeRef {
        if map.is_empty() {
            return self.clone();
        }
        match self {
            TypeRef::Variable(name) => map.get(name).cloned().unwrap_or_else(|| self.clone()),
            TypeRef::Declared { name, args } => TypeRef::Declared {
                name: name.clone(),
                args: args.iter().map(|a| a.substitute(map)).collect(),
            },
            TypeRef::Array(component) => TypeRef::Array(Box::new(component.substitute(map))),
            TypeRef::Wildcard { bound, upper } => TypeRef::Wildcard {
                bound: bound.as_ref().map(|b| Box::new(b.substitute(map))),
                upper: *upper,
            },
            TypeRef::Primitive(_) => self.clone(),
        }
    }

    /// Turn bare declared names that match one of `params` into type variables
    pub fn bind_variables(&self, params: &[String]) -> TypeRef {
        if params.is_empty() {
            return self.clone();
        }
        match self {
            TypeRef::Declared { name, args } if args.is_empty() && params.contains(name) => {
                TypeRef::Variable(name.clone())
            }
            TypeRef::Declared { name, args } => TypeRef::Declared {
                name: name.clone(),
                args: args.iter().map(|a| a.bind_variables(params)).collect(),
            },
            TypeRef::Array(component) => TypeRef::Array(Box::new(component.bind_variables(params))),
            TypeRef::Wildcard { bound, upper } => TypeRef::Wildcard {
                bound: bound.as_ref().map(|b| Box::new(b.bind_variables(params))),
                upper: *upper,
            },
            _ => self.clone(),
        }
    }

    /// Render with `java.lang.` dropped from top-level members of that package
    ///
    /// `com.acme.Box<java.lang.String>` renders as `com.acme.Box<String>`.
    pub fn short_display(&self) -> String {
        match self {
            TypeRef::Declared { name, args } => {
                let name = shorten(name);
                if args.is_empty() {
                    name.to_string()
                } else {
                    let args: Vec<String> = args.iter().map(|a| a.short_display()).collect();
                    format!("{}<{}>", name, args.join(", "))
                }
            }
            TypeRef::Array(component) => format!("{}[]", component.short_display()),
            TypeRef::Wildcard {
                bound: Some(b),
                upper,
            } => format!(
                "? {} {}",
                if *upper { "extends" } else { "super" },
                b.short_display()
            ),
            other => other.to_string(),
        }
    }
}

fn shorten(name: &str) -> &str {
    match name.strip_prefix(IMPLICIT_PACKAGE) {
        Some(rest) if !rest.contains('.') => rest,
        _ => name,
    }
}

fn join(args: &[TypeRef]) -> String {
    args.iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive(p) => f.write_str(p.keyword()),
            TypeRef::Declared { name, args } if args.is_empty() => f.write_str(name),
            TypeRef::Declared { name, args } => write!(f, "{}<{}>", name, join(args)),
            TypeRef::Array(component) => write!(f, "{}[]", component),
            TypeRef::Variable(name) => f.write_str(name),
            TypeRef::Wildcard { bound: None, .. } => f.write_str("?"),
            TypeRef::Wildcard {
                bound: Some(b),
                upper,
            } => write!(f, "? {} {}", if *upper { "extends" } else { "super" }, b),
        }
    }
}

impl TryFrom<String> for TypeRef {
    type Error = FixtureError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TypeRef::parse(&value)
    }
}

impl From<TypeRef> for String {
    fn from(value: TypeRef) -> Self {
        value.to_string()
    }
}

// ============================================================================
// Parser
// ============================================================================

struct Parser<'a> {
    text: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            chars: text.chars().collect(),
            pos: 0,
        }
    }

    fn error(&self, msg: &str) -> FixtureError {
        FixtureError::type_ref(self.text, format!("{} at offset {}", msg, self.pos))
    }

    fn skip_ws(&mut self) {
        while self.pos < self.chars.len() && self.chars[self.pos].is_whitespace() {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn expect(&mut self, c: char) -> FixtureResult<()> {
        self.skip_ws();
        if self.peek() == Some(c) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(&format!("expected '{}'", c)))
        }
    }

    fn ident(&mut self) -> FixtureResult<String> {
        self.skip_ws();
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == '$' || c == '.' {
                self.pos += 1;
            } else {
                break;
            }
        }
        let ident: String = self.chars[start..self.pos].iter().collect();
        let well_formed = !ident.is_empty()
            && ident.split('.').all(|segment| {
                segment
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
            });
        if !well_formed {
            self.pos = start;
            return Err(self.error("expected a type name"));
        }
        Ok(ident)
    }

    fn parse_type(&mut self) -> FixtureResult<TypeRef> {
        self.skip_ws();
        if self.peek() == Some('?') {
            self.pos += 1;
            return self.parse_wildcard();
        }

        let ident = self.ident()?;
        let mut ty = match PrimitiveKind::from_keyword(&ident) {
            Some(kind) => TypeRef::Primitive(kind),
            None => {
                let mut args = Vec::new();
                self.skip_ws();
                if self.peek() == Some('<') {
                    self.pos += 1;
                    loop {
                        args.push(self.parse_type()?);
                        self.skip_ws();
                        match self.peek() {
                            Some(',') => self.pos += 1,
                            Some('>') => {
                                self.pos += 1;
                                break;
                            }
                            _ => return Err(self.error("expected ',' or '>'")),
                        }
                    }
                }
                TypeRef::Declared { name: ident, args }
            }
        };

        loop {
            self.skip_ws();
            if self.peek() != Some('[') {
                break;
            }
            self.pos += 1;
            self.expect(']')?;
            ty = TypeRef::Array(Box::new(ty));
        }
        Ok(ty)
    }

    fn parse_wildcard(&mut self) -> FixtureResult<TypeRef> {
        self.skip_ws();
        match self.peek() {
            Some(',') | Some('>') | None => Ok(TypeRef::Wildcard {
                bound: None,
                upper: true,
            }),
            _ => {
                let keyword = self.ident()?;
                let upper = match keyword.as_str() {
                    "extends" => true,
                    "super" => false,
                    _ => return Err(self.error("expected 'extends' or 'super'")),
                };
                let bound = self.parse_type()?;
                Ok(TypeRef::Wildcard {
                    bound: Some(Box::new(bound)),
                    upper,
                })
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
