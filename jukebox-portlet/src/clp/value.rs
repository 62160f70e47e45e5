//! Loosely-typed values carried through a dispatch table
//!
//! Arguments reach a [`DispatchTable`](super::DispatchTable) as `Value`s and
//! results leave it the same way. Each Rust parameter type used by an invoker
//! implements [`FromValue`], which names the type tag that appears in the
//! dispatch signature and performs the strict, cast-like conversion.

use jukebox_common::{Album, Artist, Song};
use serde::{Deserialize, Serialize};

use super::error::ClpError;
use crate::service::ServiceContext;

/// Type tags used in dispatch signatures
pub mod type_tag {
    pub const BOOLEAN: &str = "boolean";
    pub const INT: &str = "int";
    pub const LONG: &str = "long";
    pub const STRING: &str = "string";
    pub const BYTES: &str = "bytes";
    pub const ALBUM: &str = "jukebox.model.Album";
    pub const ARTIST: &str = "jukebox.model.Artist";
    pub const SONG: &str = "jukebox.model.Song";
    pub const SERVICE_CONTEXT: &str = "jukebox.service.ServiceContext";
}

/// Opaque argument or result value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    /// Absent value; also the result of operations that return nothing
    Null,
    Boolean(bool),
    Int(i32),
    Long(i64),
    String(String),
    Bytes(Vec<u8>),
    Album(Box<Album>),
    Artist(Box<Artist>),
    Song(Box<Song>),
    ServiceContext(ServiceContext),
    List(Vec<Value>),
}

impl Value {
    /// Short name of the variant, used in coercion errors
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => type_tag::BOOLEAN,
            Value::Int(_) => type_tag::INT,
            Value::Long(_) => type_tag::LONG,
            Value::String(_) => type_tag::STRING,
            Value::Bytes(_) => type_tag::BYTES,
            Value::Album(_) => type_tag::ALBUM,
            Value::Artist(_) => type_tag::ARTIST,
            Value::Song(_) => type_tag::SONG,
            Value::ServiceContext(_) => type_tag::SERVICE_CONTEXT,
            Value::List(_) => "list",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// Strict conversion out of a [`Value`]
///
/// `TYPE_TAG` is the signature tag for the implementing type. Conversion
/// never widens or parses: a `Value::Int` is not a `long`.
pub trait FromValue: Sized {
    const TYPE_TAG: &'static str;

    /// Convert, handing the value back unchanged on mismatch
    fn from_value(value: Value) -> Result<Self, Value>;
}

macro_rules! impl_from_value {
    ($ty:ty, $tag:expr, $variant:ident) => {
        impl FromValue for $ty {
            const TYPE_TAG: &'static str = $tag;

            fn from_value(value: Value) -> Result<Self, Value> {
                match value {
                    Value::$variant(inner) => Ok(inner),
                    other => Err(other),
                }
            }
        }

        impl From<$ty> for Value {
            fn from(inner: $ty) -> Self {
                Value::$variant(inner)
            }
        }
    };
}

macro_rules! impl_boxed_from_value {
    ($ty:ty, $tag:expr, $variant:ident) => {
        impl FromValue for $ty {
            const TYPE_TAG: &'static str = $tag;

            fn from_value(value: Value) -> Result<Self, Value> {
                match value {
                    Value::$variant(inner) => Ok(*inner),
                    other => Err(other),
                }
            }
        }

        impl From<$ty> for Value {
            fn from(inner: $ty) -> Self {
                Value::$variant(Box::new(inner))
            }
        }
    };
}

impl_from_value!(bool, type_tag::BOOLEAN, Boolean);
impl_from_value!(i32, type_tag::INT, Int);
impl_from_value!(i64, type_tag::LONG, Long);
impl_from_value!(String, type_tag::STRING, String);
impl_from_value!(ServiceContext, type_tag::SERVICE_CONTEXT, ServiceContext);
impl_boxed_from_value!(Album, type_tag::ALBUM, Album);
impl_boxed_from_value!(Artist, type_tag::ARTIST, Artist);
impl_boxed_from_value!(Song, type_tag::SONG, Song);

impl FromValue for Vec<u8> {
    const TYPE_TAG: &'static str = type_tag::BYTES;

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Bytes(bytes) => Ok(bytes),
            other => Err(other),
        }
    }
}

/// Nullable parameter: shares the inner tag and also accepts `Null`
impl<T: FromValue> FromValue for Option<T> {
    const TYPE_TAG: &'static str = T::TYPE_TAG;

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}

/// Positional reader over an argument list
///
/// Tracks the index of the next argument so coercion failures report the
/// exact position.
pub struct ArgReader {
    method: &'static str,
    args: std::vec::IntoIter<Value>,
    index: usize,
}

impl ArgReader {
    pub fn new(method: &'static str, args: Vec<Value>) -> Self {
        Self {
            method,
            args: args.into_iter(),
            index: 0,
        }
    }

    /// Take the next argument as `T`
    pub fn next<T: FromValue>(&mut self) -> Result<T, ClpError> {
        let index = self.index;
        self.index += 1;

        let value = self.args.next().ok_or_else(|| ClpError::Arity {
            name: self.method.to_string(),
            expected: index + 1,
            actual: index,
        })?;

        T::from_value(value).map_err(|found| ClpError::ArgumentType {
            name: self.method.to_string(),
            index,
            expected: T::TYPE_TAG,
            found: found.kind(),
        })
    }
}
