use std::fmt;

/// Which protocol ended up serving a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportPath {
    Binary,
    Json,
}

impl fmt::Display for TransportPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportPath::Binary => f.write_str("binary"),
            TransportPath::Json => f.write_str("json"),
        }
    }
}

/// The successful result of a transport operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivered<T> {
    pub value: T,
    pub path: TransportPath,
}

impl<T> Delivered<T> {
    pub fn into_value(self) -> T {
        self.value
    }
}
