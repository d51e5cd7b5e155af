//! Typed destinations for declared options and arguments.
//!
//! A [`Slot`] is a non-owning handle to a caller-owned [`Cell`]; the
//! parser writes the converted value through it during the single parse
//! call and never takes ownership. Text slots hold a view into the token
//! buffer, so no allocation happens on the way in.

use std::cell::Cell;

use crate::convert;
use crate::error::{Code, ParseError};
use crate::parser::Context;

/// Whether an option accepts a value on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValuePolicy {
    /// A value must be given, inline or as the following token.
    Required,
    /// A value may be given; without one the handler decides the default.
    Optional,
    /// No value is expected; any value present is discarded.
    NotRequired,
}

/// A tagged, non-owning destination for one converted value.
#[derive(Debug, Clone, Copy)]
pub enum Slot<'a> {
    Bool(&'a Cell<bool>),
    I8(&'a Cell<i8>),
    U8(&'a Cell<u8>),
    I16(&'a Cell<i16>),
    U16(&'a Cell<u16>),
    I32(&'a Cell<i32>),
    U32(&'a Cell<u32>),
    I64(&'a Cell<i64>),
    U64(&'a Cell<u64>),
    F32(&'a Cell<f32>),
    F64(&'a Cell<f64>),
    Str(&'a Cell<&'a str>),
}

impl<'a> Slot<'a> {
    /// The value policy implied by the destination type: booleans may be
    /// given bare (binding `true`), everything else needs a value.
    pub fn policy(&self) -> ValuePolicy {
        match self {
            Slot::Bool(_) => ValuePolicy::Optional,
            _ => ValuePolicy::Required,
        }
    }

    /// Convert `value` and write it through the destination.
    ///
    /// A bare boolean (no value) binds `true` without touching the text
    /// parser. Conversion failures map to [`Code::OptionParsing`] tagged
    /// with the name currently being parsed.
    pub fn store(&self, value: Option<&'a str>, ctx: &Context<'a, '_>) -> Result<(), ParseError<'a>> {
        let fail = || ParseError::new(Code::OptionParsing, ctx.name);

        let text = match (self, value) {
            (Slot::Bool(cell), None) => {
                cell.set(true);
                return Ok(());
            }
            (_, None) => return Err(ParseError::new(Code::ValueExpected, ctx.name)),
            (_, Some(text)) => text,
        };

        match self {
            Slot::Bool(cell) => cell.set(convert::parse_bool(text).ok_or_else(fail)?),
            Slot::I8(cell) => cell.set(convert::parse_signed(text).ok_or_else(fail)?),
            Slot::U8(cell) => cell.set(convert::parse_unsigned(text).ok_or_else(fail)?),
            Slot::I16(cell) => cell.set(convert::parse_signed(text).ok_or_else(fail)?),
            Slot::U16(cell) => cell.set(convert::parse_unsigned(text).ok_or_else(fail)?),
            Slot::I32(cell) => cell.set(convert::parse_signed(text).ok_or_else(fail)?),
            Slot::U32(cell) => cell.set(convert::parse_unsigned(text).ok_or_else(fail)?),
            Slot::I64(cell) => cell.set(convert::parse_signed(text).ok_or_else(fail)?),
            Slot::U64(cell) => cell.set(convert::parse_unsigned(text).ok_or_else(fail)?),
            Slot::F32(cell) => cell.set(convert::parse_float(text).ok_or_else(fail)?),
            Slot::F64(cell) => cell.set(convert::parse_float(text).ok_or_else(fail)?),
            Slot::Str(cell) => cell.set(text),
        }

        Ok(())
    }
}

macro_rules! slot_from_cell {
    ($($variant:ident: $ty:ty),* $(,)?) => {
        $(
            impl<'a> From<&'a Cell<$ty>> for Slot<'a> {
                fn from(cell: &'a Cell<$ty>) -> Self {
                    Slot::$variant(cell)
                }
            }
        )*
    };
}

slot_from_cell! {
    Bool: bool,
    I8: i8,
    U8: u8,
    I16: i16,
    U16: u16,
    I32: i32,
    U32: u32,
    I64: i64,
    U64: u64,
    F32: f32,
    F64: f64,
}

impl<'a> From<&'a Cell<&'a str>> for Slot<'a> {
    fn from(cell: &'a Cell<&'a str>) -> Self {
        Slot::Str(cell)
    }
}
