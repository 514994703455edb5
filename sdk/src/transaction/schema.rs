//! # Layout Schemas
//!
//! A [`Schema`] is a static, ordered list of field descriptors describing
//! the canonical on-wire body of one transaction kind. Encoders do not read
//! schemas to produce bytes; instead every buffer they produce is walked
//! against its schema before it leaves the crate, so a layout bug surfaces as
//! a [`LayoutError`] rather than as a payload the node rejects.
//!
//! Four descriptor kinds cover every body in the catalogue:
//!
//! ```text
//! Scalar   fixed-width field (integers, keys, hashes, addresses)
//! Sized    blob whose byte length is an earlier scalar in the same scope
//! Array    `count_field` repetitions of a nested element table
//! Trailing repetitions of a nested element table until the buffer ends
//! ```
//!
//! Length and count references resolve within the enclosing scope only: a
//! field inside an array element can refer to an earlier field of the same
//! element, never to one outside it.

use std::ops::Range;
use thiserror::Error;

use crate::config::{
    DEADLINE_SIZE, MAX_FEE_SIZE, SIGNATURE_SIZE, SIGNER_SIZE, SIZE_SIZE, TYPE_SIZE, VERSION_SIZE,
};

/// One field descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Scalar {
        name: &'static str,
        width: usize,
    },
    Sized {
        name: &'static str,
        length_field: &'static str,
    },
    Array {
        name: &'static str,
        count_field: &'static str,
        element: &'static [Attribute],
    },
    Trailing {
        name: &'static str,
        element: &'static [Attribute],
    },
}

impl Attribute {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Scalar { name, .. }
            | Self::Sized { name, .. }
            | Self::Array { name, .. }
            | Self::Trailing { name, .. } => name,
        }
    }
}

/// Shorthand constructors so schema tables stay readable.
pub const fn scalar(name: &'static str, width: usize) -> Attribute {
    Attribute::Scalar { name, width }
}

pub const fn sized(name: &'static str, length_field: &'static str) -> Attribute {
    Attribute::Sized { name, length_field }
}

pub const fn array(
    name: &'static str,
    count_field: &'static str,
    element: &'static [Attribute],
) -> Attribute {
    Attribute::Array {
        name,
        count_field,
        element,
    }
}

pub const fn trailing(name: &'static str, element: &'static [Attribute]) -> Attribute {
    Attribute::Trailing { name, element }
}

/// Full transaction header.
pub const TRANSACTION_HEADER: &[Attribute] = &[
    scalar("size", SIZE_SIZE),
    scalar("signature", SIGNATURE_SIZE),
    scalar("signer", SIGNER_SIZE),
    scalar("version", VERSION_SIZE),
    scalar("type", TYPE_SIZE),
    scalar("max_fee", MAX_FEE_SIZE),
    scalar("deadline", DEADLINE_SIZE),
];

/// Header of a transaction embedded in an aggregate.
pub const EMBEDDED_HEADER: &[Attribute] = &[
    scalar("size", SIZE_SIZE),
    scalar("signer", SIGNER_SIZE),
    scalar("version", VERSION_SIZE),
    scalar("type", TYPE_SIZE),
];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("{schema}: field {field} needs {needed} bytes at offset {offset}, only {available} left")]
    Truncated {
        schema: &'static str,
        field: String,
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("{schema}: {count} unconsumed bytes after offset {offset}")]
    TrailingBytes {
        schema: &'static str,
        offset: usize,
        count: usize,
    },

    #[error("{schema}: field {field} refers to unknown length field {reference}")]
    UnknownReference {
        schema: &'static str,
        field: &'static str,
        reference: &'static str,
    },

    #[error("{schema}: size field declares {declared} bytes, buffer has {actual}")]
    SizeField {
        schema: &'static str,
        declared: u64,
        actual: usize,
    },
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// A named byte range produced by a schema walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub path: String,
    pub range: Range<usize>,
}

/// Every field of a buffer, in wire order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Layout {
    fields: Vec<Field>,
}

impl Layout {
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Range of the field at `path`, e.g. `mosaics[1].amount`.
    pub fn get(&self, path: &str) -> Option<Range<usize>> {
        self.fields
            .iter()
            .find(|f| f.path == path)
            .map(|f| f.range.clone())
    }
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// Body layout of one transaction kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub name: &'static str,
    pub body: &'static [Attribute],
}

impl Schema {
    pub const fn new(name: &'static str, body: &'static [Attribute]) -> Self {
        Self { name, body }
    }

    /// Walks a full transaction buffer (122-byte header plus body).
    pub fn layout(&self, bytes: &[u8]) -> Result<Layout, LayoutError> {
        self.walk_with_header(TRANSACTION_HEADER, bytes)
    }

    /// Walks an embedded transaction buffer (42-byte header plus body).
    pub fn embedded_layout(&self, bytes: &[u8]) -> Result<Layout, LayoutError> {
        self.walk_with_header(EMBEDDED_HEADER, bytes)
    }

    fn walk_with_header(
        &self,
        header: &'static [Attribute],
        bytes: &[u8],
    ) -> Result<Layout, LayoutError> {
        let mut walker = Walker {
            schema: self.name,
            bytes,
            offset: 0,
            fields: Vec::new(),
        };
        walker.walk(header, "")?;
        walker.walk(self.body, "")?;
        if walker.offset != bytes.len() {
            return Err(LayoutError::TrailingBytes {
                schema: self.name,
                offset: walker.offset,
                count: bytes.len() - walker.offset,
            });
        }
        let declared = read_le(&bytes[..SIZE_SIZE]);
        if declared != bytes.len() as u64 {
            return Err(LayoutError::SizeField {
                schema: self.name,
                declared,
                actual: bytes.len(),
            });
        }
        Ok(Layout {
            fields: walker.fields,
        })
    }
}

struct Walker<'a> {
    schema: &'static str,
    bytes: &'a [u8],
    offset: usize,
    fields: Vec<Field>,
}

impl Walker<'_> {
    fn walk(&mut self, attributes: &'static [Attribute], prefix: &str) -> Result<(), LayoutError> {
        // Scalars seen so far in this scope, for Sized/Array references.
        let mut scope: Vec<(&'static str, u64)> = Vec::new();

        for attribute in attributes {
            match *attribute {
                Attribute::Scalar { name, width } => {
                    let range = self.take(prefix, name, width)?;
                    scope.push((name, read_le(&self.bytes[range])));
                }
                Attribute::Sized { name, length_field } => {
                    let len = self.resolve(&scope, name, length_field)?;
                    self.take(prefix, name, len as usize)?;
                }
                Attribute::Array {
                    name,
                    count_field,
                    element,
                } => {
                    let count = self.resolve(&scope, name, count_field)?;
                    for i in 0..count {
                        self.walk(element, &format!("{prefix}{name}[{i}]."))?;
                    }
                }
                Attribute::Trailing { name, element } => {
                    let mut i = 0usize;
                    while self.offset < self.bytes.len() {
                        let before = self.offset;
                        self.walk(element, &format!("{prefix}{name}[{i}]."))?;
                        if self.offset == before {
                            break;
                        }
                        i += 1;
                    }
                }
            }
        }
        Ok(())
    }

    fn take(&mut self, prefix: &str, name: &str, len: usize) -> Result<Range<usize>, LayoutError> {
        let available = self.bytes.len() - self.offset;
        if len > available {
            return Err(LayoutError::Truncated {
                schema: self.schema,
                field: format!("{prefix}{name}"),
                offset: self.offset,
                needed: len,
                available,
            });
        }
        let range = self.offset..self.offset + len;
        self.offset += len;
        self.fields.push(Field {
            path: format!("{prefix}{name}"),
            range: range.clone(),
        });
        Ok(range)
    }

    fn resolve(
        &self,
        scope: &[(&'static str, u64)],
        field: &'static str,
        reference: &'static str,
    ) -> Result<u64, LayoutError> {
        scope
            .iter()
            .rev()
            .find(|(name, _)| *name == reference)
            .map(|(_, value)| *value)
            .ok_or(LayoutError::UnknownReference {
                schema: self.schema,
                field,
                reference,
            })
    }
}

/// Little-endian value of a scalar. Fields wider than eight bytes (keys,
/// hashes) are never referenced, so their value is irrelevant.
fn read_le(bytes: &[u8]) -> u64 {
    if bytes.len() > 8 {
        return 0;
    }
    bytes
        .iter()
        .rev()
        .fold(0u64, |acc, b| (acc << 8) | u64::from(*b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EMBEDDED_HEADER_SIZE, TRANSACTION_HEADER_SIZE};

    const ITEM: &[Attribute] = &[scalar("id", 2), scalar("len", 1), sized("data", "len")];
    const BODY: &[Attribute] = &[scalar("count", 1), array("items", "count", ITEM)];
    const TEST_SCHEMA: Schema = Schema::new("test", BODY);

    const TAIL_BODY: &[Attribute] = &[trailing("records", &[scalar("value", 2)])];
    const TAIL_SCHEMA: Schema = Schema::new("tail", TAIL_BODY);

    fn with_header(header_size: usize, body: &[u8]) -> Vec<u8> {
        let mut buf = vec![0u8; header_size];
        buf.extend_from_slice(body);
        let len = buf.len() as u32;
        buf[..4].copy_from_slice(&len.to_le_bytes());
        buf
    }

    #[test]
    fn walks_nested_arrays_and_sized_fields() {
        let body = [2, 0x01, 0x00, 2, 0xAA, 0xBB, 0x02, 0x00, 0];
        let buf = with_header(TRANSACTION_HEADER_SIZE, &body);
        let layout = TEST_SCHEMA.layout(&buf).unwrap();

        let base = TRANSACTION_HEADER_SIZE;
        assert_eq!(layout.get("signer"), Some(68..100));
        assert_eq!(layout.get("items[0].data"), Some(base + 4..base + 6));
        assert_eq!(layout.get("items[1].data"), Some(base + 9..base + 9));
        assert_eq!(layout.fields().last().unwrap().path, "items[1].data");
    }

    #[test]
    fn truncated_buffer_names_the_field() {
        let body = [1, 0x01, 0x00, 5, 0xAA];
        let buf = with_header(TRANSACTION_HEADER_SIZE, &body);
        match TEST_SCHEMA.layout(&buf) {
            Err(LayoutError::Truncated { field, needed, available, .. }) => {
                assert_eq!(field, "items[0].data");
                assert_eq!(needed, 5);
                assert_eq!(available, 1);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn leftover_bytes_are_rejected() {
        let body = [0, 0xFF];
        let buf = with_header(TRANSACTION_HEADER_SIZE, &body);
        assert!(matches!(
            TEST_SCHEMA.layout(&buf),
            Err(LayoutError::TrailingBytes { count: 1, .. })
        ));
    }

    #[test]
    fn size_field_must_match_buffer() {
        let mut buf = with_header(TRANSACTION_HEADER_SIZE, &[0]);
        buf[0] = buf[0].wrapping_add(1);
        assert!(matches!(
            TEST_SCHEMA.layout(&buf),
            Err(LayoutError::SizeField { .. })
        ));
    }

    #[test]
    fn trailing_records_repeat_to_the_end() {
        let buf = with_header(EMBEDDED_HEADER_SIZE, &[1, 0, 2, 0, 3, 0]);
        let layout = TAIL_SCHEMA.embedded_layout(&buf).unwrap();
        assert!(layout.get("records[2].value").is_some());
        assert!(layout.get("records[3].value").is_none());

        let odd = with_header(EMBEDDED_HEADER_SIZE, &[1, 0, 2]);
        assert!(TAIL_SCHEMA.embedded_layout(&odd).is_err());
    }

    #[test]
    fn unknown_reference_is_reported() {
        const BAD: Schema = Schema::new("bad", &[sized("blob", "missing")]);
        let buf = with_header(TRANSACTION_HEADER_SIZE, &[]);
        assert!(matches!(
            BAD.layout(&buf),
            Err(LayoutError::UnknownReference { reference: "missing", .. })
        ));
    }
}
