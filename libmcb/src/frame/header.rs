//! Header word: destination address, command and segmentation flag.
//!
//! ```text
//!  15                      4   3     1    0
//! +-------------------------+---------+-----+
//! |         address         | command | seg |
//! +-------------------------+---------+-----+
//! ```

use num_enum::{IntoPrimitive, TryFromPrimitive};

use super::consts::header as bits;
use super::Error;


/// Request and reply codes carried in the 3-bit command field.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
pub enum Command {
    ReadRequest = 1,
    WriteRequest = 2,
    Ack = 3,
    ReadError = 5,
    WriteError = 6,
    Idle = 7,
}

impl Command {
    pub fn from_code(code: u8) -> Result<Self, Error> {
        Self::try_from(code).map_err(|_| Error::InvalidCommand(code))
    }

    pub fn code(&self) -> u8 {
        (*self).into()
    }

    pub fn is_request(&self) -> bool {
        matches!(self, Self::ReadRequest | Self::WriteRequest | Self::Idle)
    }

    pub fn is_reply(&self) -> bool {
        !self.is_request()
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::ReadError | Self::WriteError)
    }
}


/// Register address of the configuration payload, 12 bits wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address {
    value: u16,
}

impl Address {
    pub const MAX: Address = Address { value: bits::ADDRESS_MASK };

    pub fn new(value: u16) -> Result<Self, Error> {
        if value > bits::ADDRESS_MASK {
            return Err(Error::AddressOutOfRange(value));
        }

        Ok(Self { value })
    }

    pub fn value(&self) -> u16 {
        self.value
    }
}

impl TryFrom<u16> for Address {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Address> for u16 {
    fn from(value: Address) -> Self {
        value.value
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Header {
    pub address: Address,
    pub command: Command,
    pub segmented: bool,
}

impl Header {
    pub fn new(address: Address, command: Command, segmented: bool) -> Self {
        Self { address, command, segmented }
    }

    pub fn pack(&self) -> u16 {
        let command = self.command.code() as u16;

        ((self.address.value() & bits::ADDRESS_MASK) << bits::ADDRESS_SHIFT)
            | ((command & bits::COMMAND_MASK) << bits::COMMAND_SHIFT)
            | ((self.segmented as u16) << bits::SEGMENTED_SHIFT)
    }

    pub fn unpack(word: u16) -> Result<Self, Error> {
        Ok(Self {
            address: address(word),
            command: Command::from_code(command_code(word))?,
            segmented: segmented(word),
        })
    }
}

impl From<Header> for u16 {
    fn from(value: Header) -> Self {
        value.pack()
    }
}

impl TryFrom<u16> for Header {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::unpack(value)
    }
}


pub(super) fn address(word: u16) -> Address {
    Address { value: (word >> bits::ADDRESS_SHIFT) & bits::ADDRESS_MASK }
}

pub(super) fn command_code(word: u16) -> u8 {
    ((word >> bits::COMMAND_SHIFT) & bits::COMMAND_MASK) as u8
}

pub(super) fn segmented(word: u16) -> bool {
    (word >> bits::SEGMENTED_SHIFT) & bits::SEGMENTED_MASK != 0
}
