use std::{
    fmt::{self, Display, Formatter},
    ops::Index,
    slice,
    sync::Arc,
};

/// Format code of a text parameter.
pub const FORMAT_TEXT: i16 = 0;
/// Format code of a binary parameter.
pub const FORMAT_BINARY: i16 = 1;
/// Longest parameter in bytes, lengths travel as signed 32 bit integers.
pub const MAX_WIRE_LENGTH: usize = i32::MAX as usize;

/// A parameter in the form it is handed to the server.
///
/// `Text` never contains a zero byte: the encoder cuts textual values at the first one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WireValue {
    Null,
    Text(String),
    Binary(Box<[u8]>),
}

impl WireValue {
    pub fn is_null(&self) -> bool {
        matches!(self, WireValue::Null)
    }
    pub fn format(&self) -> i16 {
        match self {
            WireValue::Binary(..) => FORMAT_BINARY,
            _ => FORMAT_TEXT,
        }
    }
    /// Bytes sent on the wire, `None` for SQL NULL.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            WireValue::Null => None,
            WireValue::Text(v) => Some(v.as_bytes()),
            WireValue::Binary(v) => Some(v),
        }
    }
    /// Length on the wire, -1 for SQL NULL.
    ///
    /// The encoder refuses values longer than [`MAX_WIRE_LENGTH`], a longer value built by
    /// hand reports `i32::MAX`.
    pub fn wire_length(&self) -> i32 {
        self.as_bytes()
            .map_or(-1, |v| i32::try_from(v.len()).unwrap_or(i32::MAX))
    }
}

impl Display for WireValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            WireValue::Null => f.write_str("NULL"),
            WireValue::Text(v) => write!(f, "'{}'", v.replace('\'', "''")),
            WireValue::Binary(v) => write!(f, "'\\x{}'", hex::encode(v)),
        }
    }
}

/// Ordered parameters of one execution. Entry `i` (1-based) binds placeholder `$i`.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct ParameterList(Vec<WireValue>);

impl ParameterList {
    pub fn new() -> Self {
        Self(Vec::new())
    }
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }
    pub fn push(&mut self, value: WireValue) {
        self.0.push(value);
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// Value bound to placeholder `$placeholder`, counting from 1.
    pub fn get(&self, placeholder: usize) -> Option<&WireValue> {
        placeholder.checked_sub(1).and_then(|i| self.0.get(i))
    }
    pub fn iter(&self) -> slice::Iter<'_, WireValue> {
        self.0.iter()
    }
    pub fn as_slice(&self) -> &[WireValue] {
        &self.0
    }
    pub fn formats(&self) -> Vec<i16> {
        self.0.iter().map(WireValue::format).collect()
    }
    pub fn lengths(&self) -> Vec<i32> {
        self.0.iter().map(WireValue::wire_length).collect()
    }
    pub fn has_binary(&self) -> bool {
        self.0.iter().any(|v| matches!(v, WireValue::Binary(..)))
    }
}

impl Index<usize> for ParameterList {
    type Output = WireValue;
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl From<Vec<WireValue>> for ParameterList {
    fn from(value: Vec<WireValue>) -> Self {
        Self(value)
    }
}

impl FromIterator<WireValue> for ParameterList {
    fn from_iter<T: IntoIterator<Item = WireValue>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ParameterList {
    type Item = WireValue;
    type IntoIter = std::vec::IntoIter<WireValue>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ParameterList {
    type Item = &'a WireValue;
    type IntoIter = slice::Iter<'a, WireValue>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for ParameterList {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "${}={}", i + 1, v)?;
        }
        f.write_str("]")
    }
}

pub type Row = Box<[WireValue]>;

/// Raw outcome of executing a prepared statement. Cells are left in wire form.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct RowSet {
    pub labels: Arc<[String]>,
    pub rows: Vec<Row>,
    pub rows_affected: u64,
}

impl RowSet {
    pub fn len(&self) -> usize {
        self.rows.len()
    }
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
    /// Position of the column labelled `label`.
    pub fn column(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|v| v == label)
    }
}
