//! Delimited column codec for variable-length string collections.
//!
//! Released attribute names (and any other ordered string collection) are
//! stored in a single text column as a pipe-joined value:
//!
//! ```text
//! ["eduPersonPrincipalName", "mail"]  <->  "eduPersonPrincipalName|mail"
//! ```
//!
//! An absent or empty collection is stored as an absent value (SQL NULL),
//! never as an empty string.
//!
//! # Limitations
//!
//! Elements are not escaped. An element that itself contains [`DELIMITER`]
//! is split into several elements on decode, so callers must only store
//! delimiter-free elements. The codec logs a warning when it sees one but
//! writes the value unchanged.

/// Separator between elements in an encoded column.
pub const DELIMITER: char = '|';

/// Joins `elements` into a single delimited value.
///
/// Returns `None` when `elements` is absent or empty.
pub fn encode<S: AsRef<str>>(elements: Option<&[S]>) -> Option<String> {
    let elements = elements.filter(|e| !e.is_empty())?;

    let mut encoded = String::new();
    for (idx, element) in elements.iter().enumerate() {
        let element = element.as_ref();
        if element.contains(DELIMITER) {
            tracing::warn!(
                element,
                "element contains the column delimiter and will not survive decoding"
            );
        }
        if idx > 0 {
            encoded.push(DELIMITER);
        }
        encoded.push_str(element);
    }
    Some(encoded)
}

/// Splits a delimited value back into its ordered elements.
///
/// Returns `None` when `column` is absent. A value without any delimiter
/// decodes to a single element.
pub fn decode(column: Option<&str>) -> Option<Vec<String>> {
    column.map(|value| value.split(DELIMITER).map(str::to_owned).collect())
}

/// Conversion between an in-memory collection and its column value.
pub trait ColumnConverter {
    /// The in-memory collection type.
    type Attribute;

    /// Converts a collection into its column value.
    fn to_column(attribute: Option<&Self::Attribute>) -> Option<String>;

    /// Converts a column value back into a collection.
    fn from_column(column: Option<&str>) -> Option<Self::Attribute>;
}

/// Converter for fixed-length string arrays.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringArrayConverter;

impl ColumnConverter for StringArrayConverter {
    type Attribute = Box<[String]>;

    fn to_column(attribute: Option<&Self::Attribute>) -> Option<String> {
        encode(attribute.map(|a| &a[..]))
    }

    fn from_column(column: Option<&str>) -> Option<Self::Attribute> {
        decode(column).map(Vec::into_boxed_slice)
    }
}

/// Converter for resizable string lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringListConverter;

impl ColumnConverter for StringListConverter {
    type Attribute = Vec<String>;

    fn to_column(attribute: Option<&Self::Attribute>) -> Option<String> {
        encode(attribute.map(Vec::as_slice))
    }

    fn from_column(column: Option<&str>) -> Option<Self::Attribute> {
        decode(column)
    }
}
