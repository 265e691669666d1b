//! Target descriptions: how a Rust value exposes its fields to the decoder.
//!
//! A target record implements [`Record`] by listing its fields in declared
//! order. Every [`Field`] carries a stable name, an optional alias and a
//! [`Slot`], the writable location whose variant is the field's declared
//! kind. The [`record!`](crate::record) macro writes these impls for you.
//!
//! [`Decodable`] sits one level above: it tells the entry points whether a
//! target is a record, a sequence of records, an indirection (`Box`/`Option`),
//! or a scalar that can never receive a document.
//!
//! ```rust
//! use serde_lenient::{Field, FieldKind, Record};
//!
//! #[derive(Default)]
//! struct Login {
//!     user_id: u64,
//!     name: String,
//!     token: String,
//! }
//!
//! impl Record for Login {
//!     fn fields(&mut self) -> Vec<Field<'_>> {
//!         vec![
//!             Field::aliased("user_id", "uid", &mut self.user_id),
//!             Field::new("name", &mut self.name),
//!             Field::read_only("token"),
//!         ]
//!     }
//! }
//!
//! let mut login = Login::default();
//! let kinds: Vec<_> = login.fields().iter().map(Field::kind).collect();
//! assert_eq!(kinds, [FieldKind::Unsigned, FieldKind::String, FieldKind::Unrecognized]);
//! ```

use crate::Value;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// The declared kind of a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Unsigned,
    Signed,
    String,
    Bool,
    Float,
    /// `chrono::DateTime<Local>`, the one recognized temporal type.
    Time,
    Unrecognized,
}

impl FieldKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Unsigned => "unsigned",
            FieldKind::Signed => "signed",
            FieldKind::String => "string",
            FieldKind::Bool => "bool",
            FieldKind::Float => "float",
            FieldKind::Time => "time",
            FieldKind::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An unsigned integer field of any width.
///
/// Values wider than the field are truncated, as with an `as` cast.
pub trait UnsignedField {
    fn set_u64(&mut self, value: u64);
}

/// A signed integer field of any width.
///
/// Values wider than the field are truncated, as with an `as` cast.
pub trait SignedField {
    fn set_i64(&mut self, value: i64);
}

/// A floating-point field.
pub trait FloatField {
    fn set_f64(&mut self, value: f64);
}

/// A writable location inside a target record.
pub enum Slot<'a> {
    Unsigned(&'a mut dyn UnsignedField),
    Signed(&'a mut dyn SignedField),
    String(&'a mut String),
    Bool(&'a mut bool),
    Float(&'a mut dyn FloatField),
    Time(&'a mut DateTime<Local>),
    /// A field whose type has no coercion; reported, never written.
    Unrecognized { type_name: &'static str },
    /// A field that is described but may not be written.
    ReadOnly,
}

impl Slot<'_> {
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        match self {
            Slot::Unsigned(_) => FieldKind::Unsigned,
            Slot::Signed(_) => FieldKind::Signed,
            Slot::String(_) => FieldKind::String,
            Slot::Bool(_) => FieldKind::Bool,
            Slot::Float(_) => FieldKind::Float,
            Slot::Time(_) => FieldKind::Time,
            Slot::Unrecognized { .. } | Slot::ReadOnly => FieldKind::Unrecognized,
        }
    }

    #[must_use]
    pub fn is_writable(&self) -> bool {
        !matches!(self, Slot::ReadOnly)
    }
}

impl fmt::Debug for Slot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Unrecognized { type_name } => f
                .debug_struct("Unrecognized")
                .field("type_name", type_name)
                .finish(),
            Slot::ReadOnly => f.write_str("ReadOnly"),
            other => f.debug_tuple(other.kind().as_str()).finish(),
        }
    }
}

/// Maps a Rust field type to the [`Slot`] it decodes through.
///
/// Implement this for newtypes to give them a supported kind:
///
/// ```rust
/// use serde_lenient::{FieldValue, Slot};
///
/// struct UserId(u64);
///
/// impl FieldValue for UserId {
///     fn slot(&mut self) -> Slot<'_> {
///         Slot::Unsigned(&mut self.0)
///     }
/// }
/// ```
pub trait FieldValue {
    fn slot(&mut self) -> Slot<'_>;
}

macro_rules! impl_numeric_fields {
    ($trait:ident, $setter:ident, $wide:ty, $variant:ident: $($t:ty),*) => {
        $(
            impl $trait for $t {
                #[inline]
                fn $setter(&mut self, value: $wide) {
                    *self = value as $t;
                }
            }

            impl FieldValue for $t {
                #[inline]
                fn slot(&mut self) -> Slot<'_> {
                    Slot::$variant(self)
                }
            }
        )*
    };
}

impl_numeric_fields!(UnsignedField, set_u64, u64, Unsigned: u8, u16, u32, u64, usize);
impl_numeric_fields!(SignedField, set_i64, i64, Signed: i8, i16, i32, i64, isize);
impl_numeric_fields!(FloatField, set_f64, f64, Float: f32, f64);

impl FieldValue for String {
    #[inline]
    fn slot(&mut self) -> Slot<'_> {
        Slot::String(self)
    }
}

impl FieldValue for bool {
    #[inline]
    fn slot(&mut self) -> Slot<'_> {
        Slot::Bool(self)
    }
}

impl FieldValue for DateTime<Local> {
    #[inline]
    fn slot(&mut self) -> Slot<'_> {
        Slot::Time(self)
    }
}

macro_rules! impl_unrecognized_fields {
    ($(<$($param:ident),*> $t:ty),* $(,)?) => {
        $(
            impl<$($param),*> FieldValue for $t {
                fn slot(&mut self) -> Slot<'_> {
                    Slot::Unrecognized {
                        type_name: std::any::type_name::<Self>(),
                    }
                }
            }
        )*
    };
}

impl_unrecognized_fields!(
    <T> Vec<T>,
    <T> Option<T>,
    <K, V> HashMap<K, V>,
    <K, V> BTreeMap<K, V>,
    <> Value,
    <> DateTime<Utc>,
    <> NaiveDateTime,
    <> NaiveDate,
);

/// One described field of a target record.
#[derive(Debug)]
pub struct Field<'a> {
    name: &'static str,
    alias: Option<&'static str>,
    slot: Slot<'a>,
}

impl<'a> Field<'a> {
    /// A field matched by its own name.
    pub fn new<T: FieldValue + ?Sized>(name: &'static str, value: &'a mut T) -> Self {
        Self::with_alias(name, None, value)
    }

    /// A field matched by `alias` first, then by its own name.
    pub fn aliased<T: FieldValue + ?Sized>(
        name: &'static str,
        alias: &'static str,
        value: &'a mut T,
    ) -> Self {
        Self::with_alias(name, Some(alias), value)
    }

    /// Describes a field with an optional alias. Used by [`record!`](macro@crate::record).
    pub fn with_alias<T: FieldValue + ?Sized>(
        name: &'static str,
        alias: Option<&'static str>,
        value: &'a mut T,
    ) -> Self {
        Self::from_slot(name, alias, value.slot())
    }

    /// A field the decoder must leave alone.
    #[must_use]
    pub fn read_only(name: &'static str) -> Self {
        Self::from_slot(name, None, Slot::ReadOnly)
    }

    /// Describes a field from a slot built by hand.
    #[must_use]
    pub fn from_slot(name: &'static str, alias: Option<&'static str>, slot: Slot<'a>) -> Self {
        Field { name, alias, slot }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn alias(&self) -> Option<&'static str> {
        self.alias
    }

    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.slot.kind()
    }

    #[must_use]
    pub fn is_writable(&self) -> bool {
        self.slot.is_writable()
    }

    /// Finds this field's source value in `object`.
    ///
    /// The alias is tried first, then the literal name. Returns the key that
    /// matched with its value.
    #[must_use]
    pub fn resolve<'v>(&self, object: &'v Value) -> Option<(&'static str, &'v Value)> {
        self.alias
            .into_iter()
            .chain(std::iter::once(self.name))
            .find_map(|key| object.get(key).map(|value| (key, value)))
    }

    /// Consumes the field, yielding its write location.
    pub fn into_slot(self) -> Slot<'a> {
        self.slot
    }
}

/// A structured record whose fields the decoder can populate.
pub trait Record {
    /// The record's fields in declared order.
    fn fields(&mut self) -> Vec<Field<'_>>;

    fn record_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// A sequence of records, indexed in place.
pub trait Sequence {
    fn len(&self) -> usize;

    fn record_at(&mut self, index: usize) -> Option<&mut dyn Record>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<R: Record> Sequence for Vec<R> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn record_at(&mut self, index: usize) -> Option<&mut dyn Record> {
        self.get_mut(index).map(|record| record as &mut dyn Record)
    }
}

impl<R: Record, const N: usize> Sequence for [R; N] {
    fn len(&self) -> usize {
        N
    }

    fn record_at(&mut self, index: usize) -> Option<&mut dyn Record> {
        self.get_mut(index).map(|record| record as &mut dyn Record)
    }
}

/// The shape of a decode target.
pub enum Shape<'a> {
    Record(&'a mut dyn Record),
    Sequence(&'a mut dyn Sequence),
    /// One level of indirection; `None` is a nil target.
    Indirect(Option<&'a mut dyn Decodable>),
    Scalar,
}

/// A value the decode entry points accept as a target.
pub trait Decodable {
    fn shape(&mut self) -> Shape<'_>;

    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<R: Record> Decodable for Vec<R> {
    fn shape(&mut self) -> Shape<'_> {
        Shape::Sequence(self)
    }
}

impl<R: Record, const N: usize> Decodable for [R; N] {
    fn shape(&mut self) -> Shape<'_> {
        Shape::Sequence(self)
    }
}

impl<T: Decodable> Decodable for Box<T> {
    fn shape(&mut self) -> Shape<'_> {
        Shape::Indirect(Some(&mut **self))
    }
}

impl<T: Decodable> Decodable for Option<T> {
    fn shape(&mut self) -> Shape<'_> {
        Shape::Indirect(self.as_mut().map(|inner| inner as &mut dyn Decodable))
    }
}

macro_rules! impl_scalar_targets {
    ($($t:ty),*) => {
        $(
            impl Decodable for $t {
                fn shape(&mut self) -> Shape<'_> {
                    Shape::Scalar
                }
            }
        )*
    };
}

impl_scalar_targets!(
    u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64, bool, String, Value
);
