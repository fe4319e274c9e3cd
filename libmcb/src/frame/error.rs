use std::fmt;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    SizeExceeded { requested: usize, capacity: usize },
    AddressOutOfRange(u16),
    InvalidCommand(u8),
    Malformed { len: usize, min: usize },
    OddLength(usize),
    NoChecksum,
    BufferTooSmall { len: usize, required: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::SizeExceeded { requested, capacity } => {
                write!(f, "frame of {requested} words exceeds capacity of {capacity} words")
            },
            Error::AddressOutOfRange(addr) => {
                write!(f, "address {addr:#x} does not fit the 12-bit address field")
            },
            Error::InvalidCommand(code) => {
                write!(f, "unknown command code {code}")
            },
            Error::Malformed { len, min } => {
                write!(f, "malformed frame: got {len} words, need at least {min}")
            },
            Error::OddLength(len) => {
                write!(f, "byte count {len} is not a whole number of 16-bit words")
            },
            Error::NoChecksum => {
                write!(f, "frame carries no checksum word")
            },
            Error::BufferTooSmall { len, required } => {
                write!(f, "output buffer holds {len} words, need {required}")
            },
        }
    }
}

impl std::error::Error for Error {}

impl From<Error> for std::io::Error {
    fn from(value: Error) -> Self {
        let kind = match value {
            Error::SizeExceeded { .. } | Error::AddressOutOfRange(_) | Error::BufferTooSmall { .. } => {
                std::io::ErrorKind::InvalidInput
            },
            Error::InvalidCommand(_) | Error::Malformed { .. } | Error::OddLength(_) | Error::NoChecksum => {
                std::io::ErrorKind::InvalidData
            },
        };

        std::io::Error::new(kind, value)
    }
}
