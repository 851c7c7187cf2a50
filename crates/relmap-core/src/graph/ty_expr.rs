use crate::{Error, Result};

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A field type annotation as written in a type descriptor.
///
/// Annotations use the familiar generic syntax: `int`, `Optional[Pose]`,
/// `List[Atom]`, `Union[Cup, None]`, `Position | None`, `Type[Position]`.
/// Unions containing `None` are normalized into [`TyExpr::Optional`] when
/// parsed.
#[derive(Clone, PartialEq)]
pub enum TyExpr {
    Primitive(Primitive),

    /// Reference to a type, enum, or external type by name
    Named(String),

    /// The absent value. Only meaningful as a union member.
    None,

    Optional(Box<TyExpr>),

    Collection(CollectionKind, Box<TyExpr>),

    /// A union of two or more distinct, non-`None` members
    Union(Vec<TyExpr>),

    /// A field that holds a type itself rather than an instance of it
    TypeRef(String),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    Bool,
    Int,
    Float,
    String,
    DateTime,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    List,
    Set,
    Tuple,
}

impl TyExpr {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn optional(inner: impl Into<Self>) -> Self {
        Self::union(vec![inner.into(), Self::None])
    }

    pub fn list(element: impl Into<Self>) -> Self {
        Self::Collection(CollectionKind::List, Box::new(element.into()))
    }

    pub fn set(element: impl Into<Self>) -> Self {
        Self::Collection(CollectionKind::Set, Box::new(element.into()))
    }

    pub fn type_ref(name: impl Into<String>) -> Self {
        Self::TypeRef(name.into())
    }

    /// Builds a union, flattening nested unions and lifting `None` into
    /// `Optional`.
    pub fn union(members: Vec<TyExpr>) -> Self {
        fn flatten(members: Vec<TyExpr>, flat: &mut Vec<TyExpr>, optional: &mut bool) {
            for member in members {
                match member {
                    TyExpr::None => *optional = true,
                    TyExpr::Optional(inner) => {
                        *optional = true;
                        flatten(vec![*inner], flat, optional);
                    }
                    TyExpr::Union(nested) => flatten(nested, flat, optional),
                    member => {
                        if !flat.contains(&member) {
                            flat.push(member);
                        }
                    }
                }
            }
        }

        let mut optional = false;
        let mut flat = vec![];
        flatten(members, &mut flat, &mut optional);

        let inner = match flat.len() {
            0 => return Self::None,
            1 => flat.remove(0),
            _ => Self::Union(flat),
        };

        if optional {
            Self::Optional(Box::new(inner))
        } else {
            inner
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, Self::Collection(..))
    }
}

impl From<Primitive> for TyExpr {
    fn from(value: Primitive) -> Self {
        Self::Primitive(value)
    }
}

/// A bare identifier: a primitive, `None`, or a named type.
impl From<&str> for TyExpr {
    fn from(value: &str) -> Self {
        match value {
            "None" | "NoneType" => Self::None,
            "int" => Primitive::Int.into(),
            "float" => Primitive::Float.into(),
            "str" => Primitive::String.into(),
            "bool" => Primitive::Bool.into(),
            "datetime" => Primitive::DateTime.into(),
            name => Self::Named(name.to_string()),
        }
    }
}

impl FromStr for TyExpr {
    type Err = Error;

    fn from_str(src: &str) -> Result<Self> {
        let mut parser = Parser { src, pos: 0 };
        let ty = parser.parse_union()?;
        parser.skip_ws();

        if parser.pos != src.len() {
            return Err(parser.error("unexpected trailing input"));
        }

        Ok(ty)
    }
}

impl TryFrom<String> for TyExpr {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TyExpr> for String {
    fn from(value: TyExpr) -> Self {
        value.to_string()
    }
}

impl Serialize for TyExpr {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TyExpr {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let src = String::deserialize(deserializer)?;
        src.parse().map_err(serde::de::Error::custom)
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn parse_union(&mut self) -> Result<TyExpr> {
        let mut members = vec![self.parse_atom()?];

        while self.eat('|') {
            members.push(self.parse_atom()?);
        }

        Ok(if members.len() == 1 {
            members.remove(0)
        } else {
            TyExpr::union(members)
        })
    }

    fn parse_atom(&mut self) -> Result<TyExpr> {
        let ident = self.ident()?;

        if !self.eat('[') {
            return Ok(TyExpr::from(ident));
        }

        let mut args = vec![self.parse_union()?];
        while self.eat(',') {
            args.push(self.parse_union()?);
        }

        if !self.eat(']') {
            return Err(self.error("expected `]`"));
        }

        let collection = match ident {
            "Optional" => {
                let [arg] = self.single(ident, args)?;
                return Ok(TyExpr::optional(arg));
            }
            "Union" => return Ok(TyExpr::union(args)),
            "Type" => {
                let [arg] = self.single(ident, args)?;
                let TyExpr::Named(name) = arg else {
                    return Err(self.error("`Type[..]` must name a type"));
                };
                return Ok(TyExpr::TypeRef(name));
            }
            "List" | "list" | "Sequence" => CollectionKind::List,
            "Set" | "set" | "FrozenSet" | "frozenset" => CollectionKind::Set,
            "Tuple" | "tuple" => CollectionKind::Tuple,
            other => return Err(self.error(&format!("unknown generic `{other}`"))),
        };

        let [element] = self.single(ident, args)?;
        Ok(TyExpr::Collection(collection, Box::new(element)))
    }

    fn single(&self, generic: &str, args: Vec<TyExpr>) -> Result<[TyExpr; 1]> {
        <[TyExpr; 1]>::try_from(args)
            .map_err(|_| self.error(&format!("`{generic}` takes exactly one type argument")))
    }

    fn ident(&mut self) -> Result<&'a str> {
        self.skip_ws();
        let src = self.src;
        let start = self.pos;

        for ch in src[start..].chars() {
            if ch.is_alphanumeric() || ch == '_' || ch == '.' {
                self.pos += ch.len_utf8();
            } else {
                break;
            }
        }

        if start == self.pos {
            return Err(self.error("expected a type name"));
        }

        Ok(&src[start..self.pos])
    }

    fn eat(&mut self, ch: char) -> bool {
        self.skip_ws();

        if self.src[self.pos..].starts_with(ch) {
            self.pos += ch.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        let rest = &self.src[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn error(&self, message: &str) -> Error {
        Error::invalid_type_graph(format!(
            "malformed type annotation `{}` at offset {}: {message}",
            self.src, self.pos
        ))
    }
}

impl fmt::Display for TyExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(primitive) => primitive.fmt(f),
            Self::Named(name) => f.write_str(name),
            Self::None => f.write_str("None"),
            Self::Optional(inner) => write!(f, "Optional[{inner}]"),
            Self::Collection(kind, element) => write!(f, "{kind}[{element}]"),
            Self::Union(members) => {
                f.write_str("Union[")?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    member.fmt(f)?;
                }
                f.write_str("]")
            }
            Self::TypeRef(name) => write!(f, "Type[{name}]"),
        }
    }
}

impl fmt::Debug for TyExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "str",
            Self::DateTime => "datetime",
        })
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::List => "List",
            Self::Set => "Set",
            Self::Tuple => "Tuple",
        })
    }
}
