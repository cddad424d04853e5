//! Custom cucumber parameters used in step sentences.
//!
//! `{lto}` is an amount of LTO, `{text}` a double quoted string,
//! `{version}` a transaction version written `(v3)` and `{value}` an
//! association data value.

use std::str::FromStr;

use anyhow::{anyhow, Context, Error, Result};
use cucumber::Parameter;
use lto_common::transaction::DataValue;

use crate::tools::{cast_boolean_or_int, convert_balance};

/// An LTO amount such as `1.5`, held in units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Parameter)]
#[param(name = "lto", regex = r"\d+(?:\.\d+)?")]
pub struct Lto(pub u64);

impl FromStr for Lto {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        convert_balance(s).map(Lto)
    }
}

/// Double quoted text, held without its quotes
#[derive(Debug, Clone, PartialEq, Eq, Parameter)]
#[param(name = "text", regex = r#""[^"]*""#)]
pub struct Text(pub String);

fn unquote(s: &str) -> Option<&str> {
    s.strip_prefix('"')?.strip_suffix('"')
}

impl FromStr for Text {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        unquote(s)
            .map(|text| Text(text.to_string()))
            .ok_or_else(|| anyhow!("Expected quoted text, got {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Parameter)]
#[param(name = "version", regex = r"\(v\d+\)")]
pub struct Version(pub u8);

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let digits = s
            .strip_prefix("(v")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| anyhow!("Expected a version like (v3), got {}", s))?;
        digits
            .parse()
            .map(Version)
            .with_context(|| format!("Invalid version {}", s))
    }
}

/// Quoted values are strings, bare ones booleans or integers
#[derive(Debug, Clone, PartialEq, Eq, Parameter)]
#[param(name = "value", regex = r#""[^"]*"|true|false|-?\d+"#)]
pub struct Value(pub DataValue);

impl FromStr for Value {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match unquote(s) {
            Some(text) => Ok(Value(DataValue::String(text.to_string()))),
            None => cast_boolean_or_int(s).map(Value),
        }
    }
}
