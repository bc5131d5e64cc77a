//! Type expressions used in model files.
//!
//! # Grammar
//!
//! | Expression | Meaning |
//! |------------|---------|
//! | `string`, `char`, `bool` | text and boolean scalars |
//! | `i8` .. `i128`, `u8` .. `u128` | integers |
//! | `f32`, `f64`, `decimal` | fractional numbers |
//! | `uri` | string with `uri` format |
//! | `any` | unconstrained value |
//! | `list<T>` / `set<T>` | ordered / unique collection |
//! | `map<K, V>` | key-value map |
//! | `T[]` | array |
//! | anything else | a model type name |

use anyhow::{Result, bail};
use std::fmt;
use typeschema::{Describe, NumberKind, TypeDescriptor};

/// Built-in scalar types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scalar {
    String,
    Char,
    Bool,
    I8,
    I16,
    I32,
    I64,
    I128,
    U8,
    U16,
    U32,
    U64,
    U128,
    F32,
    F64,
    Decimal,
    Uri,
    Any,
}

impl Scalar {
    fn parse(name: &str) -> Option<Self> {
        let scalar = match name {
            "string" => Self::String,
            "char" => Self::Char,
            "bool" => Self::Bool,
            "i8" => Self::I8,
            "i16" => Self::I16,
            "i32" => Self::I32,
            "i64" => Self::I64,
            "i128" => Self::I128,
            "u8" => Self::U8,
            "u16" => Self::U16,
            "u32" => Self::U32,
            "u64" => Self::U64,
            "u128" => Self::U128,
            "f32" => Self::F32,
            "f64" => Self::F64,
            "decimal" => Self::Decimal,
            "uri" => Self::Uri,
            "any" => Self::Any,
            _ => return None,
        };
        Some(scalar)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Char => "char",
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::I128 => "i128",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::U128 => "u128",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Decimal => "decimal",
            Self::Uri => "uri",
            Self::Any => "any",
        }
    }

    /// Descriptor for the scalar, reusing the library's `Describe` impls
    pub fn descriptor(&self) -> TypeDescriptor {
        match self {
            Self::String => String::descriptor(),
            Self::Char => char::descriptor(),
            Self::Bool => bool::descriptor(),
            Self::I8 => i8::descriptor(),
            Self::I16 => i16::descriptor(),
            Self::I32 => i32::descriptor(),
            Self::I64 => i64::descriptor(),
            Self::I128 => i128::descriptor(),
            Self::U8 => u8::descriptor(),
            Self::U16 => u16::descriptor(),
            Self::U32 => u32::descriptor(),
            Self::U64 => u64::descriptor(),
            Self::U128 => u128::descriptor(),
            Self::F32 => f32::descriptor(),
            Self::F64 => f64::descriptor(),
            Self::Decimal => TypeDescriptor::number("decimal", NumberKind::Decimal),
            Self::Uri => TypeDescriptor::uri("uri"),
            Self::Any => TypeDescriptor::other("any"),
        }
    }
}

/// A parsed type expression
///
/// `N` is the representation of model type names: the raw `String` after
/// parsing, an index into the model after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr<N = String> {
    Scalar(Scalar),
    List(Box<TypeExpr<N>>),
    Set(Box<TypeExpr<N>>),
    Map(Box<TypeExpr<N>>, Box<TypeExpr<N>>),
    Array(Box<TypeExpr<N>>),
    Named(N),
}

impl TypeExpr<String> {
    /// Parse a type expression
    pub fn parse(source: &str) -> Result<Self> {
        let mut parser = Parser { source, pos: 0 };
        let expr = parser.expr()?;
        parser.skip_ws();
        if parser.pos != source.len() {
            bail!(
                "Unexpected '{}' at offset {} in type expression '{}'",
                &source[parser.pos..],
                parser.pos,
                source
            );
        }
        Ok(expr)
    }
}

impl<N> TypeExpr<N> {
    /// Replace every model name, failing on the first name `f` rejects
    pub fn try_map_names<M>(&self, f: &mut impl FnMut(&N) -> Result<M>) -> Result<TypeExpr<M>> {
        Ok(match self {
            Self::Scalar(scalar) => TypeExpr::Scalar(*scalar),
            Self::List(inner) => TypeExpr::List(Box::new(inner.try_map_names(f)?)),
            Self::Set(inner) => TypeExpr::Set(Box::new(inner.try_map_names(f)?)),
            Self::Map(key, value) => TypeExpr::Map(
                Box::new(key.try_map_names(f)?),
                Box::new(value.try_map_names(f)?),
            ),
            Self::Array(inner) => TypeExpr::Array(Box::new(inner.try_map_names(f)?)),
            Self::Named(name) => TypeExpr::Named(f(name)?),
        })
    }

    /// Render the expression, naming model types through `name`
    pub fn render(&self, name: &impl Fn(&N) -> String) -> String {
        match self {
            Self::Scalar(scalar) => scalar.as_str().to_string(),
            Self::List(inner) => format!("list<{}>", inner.render(name)),
            Self::Set(inner) => format!("set<{}>", inner.render(name)),
            Self::Map(key, value) => {
                format!("map<{}, {}>", key.render(name), value.render(name))
            }
            Self::Array(inner) => format!("{}[]", inner.render(name)),
            Self::Named(n) => name(n),
        }
    }
}

impl fmt::Display for TypeExpr<String> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&|name: &String| name.clone()))
    }
}

struct Parser<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn expr(&mut self) -> Result<TypeExpr> {
        let ident = self.ident()?;

        let mut expr = match ident {
            "list" | "set" | "map" if self.eat('<') => {
                let first = self.expr()?;
                let expr = if ident == "map" {
                    self.expect(',')?;
                    let value = self.expr()?;
                    TypeExpr::Map(Box::new(first), Box::new(value))
                } else if ident == "list" {
                    TypeExpr::List(Box::new(first))
                } else {
                    TypeExpr::Set(Box::new(first))
                };
                self.expect('>')?;
                expr
            }
            _ => match Scalar::parse(ident) {
                Some(scalar) => TypeExpr::Scalar(scalar),
                None => TypeExpr::Named(ident.to_string()),
            },
        };

        while self.eat('[') {
            self.expect(']')?;
            expr = TypeExpr::Array(Box::new(expr));
        }

        Ok(expr)
    }

    fn ident(&mut self) -> Result<&'a str> {
        self.skip_ws();
        let source = self.source;
        let start = self.pos;
        let len = source[start..]
            .find(|c: char| !(c.is_alphanumeric() || matches!(c, '_' | '.' | ':' | '$')))
            .unwrap_or(source.len() - start);
        if len == 0 {
            bail!(
                "Expected a type name at offset {} in type expression '{}'",
                start,
                source
            );
        }
        self.pos += len;
        Ok(&source[start..self.pos])
    }

    fn skip_ws(&mut self) {
        let rest = &self.source[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn eat(&mut self, c: char) -> bool {
        self.skip_ws();
        if self.source[self.pos..].starts_with(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, c: char) -> Result<()> {
        if !self.eat(c) {
            bail!(
                "Expected '{}' at offset {} in type expression '{}'",
                c,
                self.pos,
                self.source
            );
        }
        Ok(())
    }
}
