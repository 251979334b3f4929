//! Tag-line Serde Serializer implementation.

use serde::ser::{self, Serialize};

use super::{Error, Result};

/// Collects the lines of a tagged document.
///
/// Values are written through an [`ElementSerializer`], which knows the tag
/// name the value is stored under.
#[derive(Debug, Default)]
pub struct TagSerializer {
    lines: Vec<String>,
}

impl TagSerializer {
    /// Creates a new serializer.
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Appends a raw line (used for the `KEY:VALUE` preamble).
    pub fn push_raw(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Returns a serializer that writes one value under `tag`.
    pub fn element(&mut self, tag: &'static str) -> ElementSerializer<'_> {
        ElementSerializer { ser: self, tag }
    }

    /// Consumes the serializer and returns the lines written so far.
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

/// Serializer for a single tagged value.
///
/// - scalars become `<TAG>value`
/// - structs become an aggregate: `<TAG>`, one element per field, `</TAG>`
/// - sequences repeat the element under the same tag
/// - `None` writes nothing
pub struct ElementSerializer<'a> {
    ser: &'a mut TagSerializer,
    tag: &'static str,
}

impl ElementSerializer<'_> {
    fn leaf(self, value: &str) -> Result<()> {
        // Values are written as-is; the format has no escaping.
        self.ser.lines.push(format!("<{}>{}", self.tag, value));
        Ok(())
    }
}

impl<'a> ser::Serializer for ElementSerializer<'a> {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = RepeatedSerializer<'a>;
    type SerializeTuple = ser::Impossible<(), Error>;
    type SerializeTupleStruct = ser::Impossible<(), Error>;
    type SerializeTupleVariant = ser::Impossible<(), Error>;
    type SerializeMap = ser::Impossible<(), Error>;
    type SerializeStruct = AggregateSerializer<'a>;
    type SerializeStructVariant = ser::Impossible<(), Error>;

    /// OFX booleans are `Y` / `N`.
    fn serialize_bool(self, v: bool) -> Result<()> {
        self.leaf(if v { "Y" } else { "N" })
    }

    fn serialize_i8(self, v: i8) -> Result<()> {
        self.leaf(&v.to_string())
    }

    fn serialize_i16(self, v: i16) -> Result<()> {
        self.leaf(&v.to_string())
    }

    fn serialize_i32(self, v: i32) -> Result<()> {
        self.leaf(&v.to_string())
    }

    fn serialize_i64(self, v: i64) -> Result<()> {
        self.leaf(&v.to_string())
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        self.leaf(&v.to_string())
    }

    fn serialize_u16(self, v: u16) -> Result<()> {
        self.leaf(&v.to_string())
    }

    fn serialize_u32(self, v: u32) -> Result<()> {
        self.leaf(&v.to_string())
    }

    fn serialize_u64(self, v: u64) -> Result<()> {
        self.leaf(&v.to_string())
    }

    // Money goes through Decimal and is pre-rendered; binary floats are refused.
    fn serialize_f32(self, _v: f32) -> Result<()> {
        Err(Error::UnsupportedType("f32"))
    }

    fn serialize_f64(self, _v: f64) -> Result<()> {
        Err(Error::UnsupportedType("f64"))
    }

    fn serialize_char(self, v: char) -> Result<()> {
        self.leaf(v.encode_utf8(&mut [0u8; 4]))
    }

    fn serialize_str(self, v: &str) -> Result<()> {
        self.leaf(v)
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<()> {
        Err(Error::UnsupportedType("bytes"))
    }

    fn serialize_none(self) -> Result<()> {
        Ok(())
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<()> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<()> {
        Err(Error::UnsupportedType("unit"))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        Err(Error::UnsupportedType("unit struct"))
    }

    /// Serialize enum variant as its name, e.g. `DEBIT` via `#[serde(rename = "...")]`.
    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<()> {
        self.leaf(variant)
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<()> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<()> {
        Err(Error::UnsupportedType("newtype variant"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(RepeatedSerializer { ser: self.ser, tag: self.tag })
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(Error::UnsupportedType("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(Error::UnsupportedType("tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::UnsupportedType("tuple variant"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(Error::UnsupportedType("map"))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        self.ser.lines.push(format!("<{}>", self.tag));
        Ok(AggregateSerializer { ser: self.ser, tag: self.tag })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::UnsupportedType("struct variant"))
    }
}

/// Writes struct fields as child elements and closes the aggregate.
pub struct AggregateSerializer<'a> {
    ser: &'a mut TagSerializer,
    tag: &'static str,
}

impl ser::SerializeStruct for AggregateSerializer<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<()> {
        value.serialize(self.ser.element(key))
    }

    fn end(self) -> Result<()> {
        self.ser.lines.push(format!("</{}>", self.tag));
        Ok(())
    }
}

/// Writes every element of a sequence under the same tag.
pub struct RepeatedSerializer<'a> {
    ser: &'a mut TagSerializer,
    tag: &'static str,
}

impl ser::SerializeSeq for RepeatedSerializer<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        value.serialize(self.ser.element(self.tag))
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}
