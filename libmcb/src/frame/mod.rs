//! Motion control bus (MCB) frames.
//!
//! A frame is a fixed-capacity buffer of 16-bit words:
//!
//! ```text
//! word 0        header (address, command, segmentation flag)
//! word 1..=4    configuration payload
//! word 5..      cyclic payload (optional)
//! last word     CRC-16/XMODEM over all preceding words (optional)
//! ```
//!
//! On a byte stream, words are sent most significant byte first.

pub mod consts;
pub mod crc;

mod codec;
mod error;
mod header;

pub use codec::Codec;
pub use error::Error;
pub use header::{Address, Command, Header};

use arrayvec::ArrayVec;
use bytes::{BufMut, BytesMut};

use consts::{index, size, MAX_FRAME_SIZE};


/// Configuration payload of an idle frame.
pub const IDLE_CONFIG: [u16; size::CONFIG] = [0; size::CONFIG];


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    words: ArrayVec<u16, MAX_FRAME_SIZE>,
    checksum: bool,
}

impl Frame {
    pub fn create(
        header: Header,
        config: &[u16; size::CONFIG],
        cyclic: &[u16],
        checksum: bool,
    ) -> Result<Self, Error> {
        let requested = size::MIN_FRAME + cyclic.len() + if checksum { size::CRC } else { 0 };
        if requested > MAX_FRAME_SIZE {
            return Err(Error::SizeExceeded { requested, capacity: MAX_FRAME_SIZE });
        }

        Ok(Self::build(header, config, cyclic, checksum))
    }

    pub fn idle(address: Address, checksum: bool) -> Self {
        // header, config and checksum always fit
        Self::build(Header::new(address, Command::Idle, false), &IDLE_CONFIG, &[], checksum)
    }

    fn build(header: Header, config: &[u16; size::CONFIG], cyclic: &[u16], checksum: bool) -> Self {
        let mut words: ArrayVec<u16, MAX_FRAME_SIZE> = ArrayVec::new();
        words.push(header.pack());
        words.extend(config.iter().copied());
        words.extend(cyclic.iter().copied());

        if checksum {
            let crc = crc::crc16(&words);
            words.push(crc);
        }

        tracing::trace!(
            address=header.address.value(),
            command=?header.command,
            segmented=header.segmented,
            cyclic=cyclic.len(),
            checksum,
            "frame created"
        );

        Self { words, checksum }
    }

    /// Wrap words received from the bus. Set `checksum` if the last word is
    /// a checksum word.
    pub fn from_words(src: &[u16], checksum: bool) -> Result<Self, Error> {
        let words: ArrayVec<u16, MAX_FRAME_SIZE> = ArrayVec::try_from(src)
            .map_err(|_| Error::SizeExceeded { requested: src.len(), capacity: MAX_FRAME_SIZE })?;

        Ok(Self { words, checksum })
    }

    /// Wrap big-endian words received from a byte stream.
    pub fn from_bytes(src: &[u8], checksum: bool) -> Result<Self, Error> {
        if src.len() % 2 != 0 {
            return Err(Error::OddLength(src.len()));
        }

        let requested = src.len() / 2;
        if requested > MAX_FRAME_SIZE {
            return Err(Error::SizeExceeded { requested, capacity: MAX_FRAME_SIZE });
        }

        let words: ArrayVec<u16, MAX_FRAME_SIZE> = src.chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();

        Ok(Self { words, checksum })
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        buf.reserve(self.words.len() * 2);

        for w in &self.words {
            buf.put_u16(*w);
        }
    }

    pub fn to_bytes(&self) -> BytesMut {
        let mut buf = BytesMut::new();
        self.encode(&mut buf);
        buf
    }

    pub fn as_words(&self) -> &[u16] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn has_checksum(&self) -> bool {
        self.checksum
    }

    fn header_word(&self) -> Result<u16, Error> {
        self.words.get(index::HEADER)
            .copied()
            .ok_or(Error::Malformed { len: self.words.len(), min: size::HEADER })
    }

    pub fn header(&self) -> Result<Header, Error> {
        Header::unpack(self.header_word()?)
    }

    pub fn address(&self) -> Result<Address, Error> {
        Ok(header::address(self.header_word()?))
    }

    pub fn command(&self) -> Result<Command, Error> {
        Command::from_code(header::command_code(self.header_word()?))
    }

    /// Whether the configuration payload continues in a following frame.
    pub fn segmented(&self) -> Result<bool, Error> {
        Ok(header::segmented(self.header_word()?))
    }

    pub fn config(&self) -> Result<&[u16; size::CONFIG], Error> {
        self.words.get(index::CONFIG..index::CONFIG + size::CONFIG)
            .and_then(|c| c.try_into().ok())
            .ok_or(Error::Malformed { len: self.words.len(), min: size::MIN_FRAME })
    }

    /// Copy the configuration payload to `buf`, returning the number of
    /// words written.
    pub fn copy_config(&self, buf: &mut [u16]) -> Result<usize, Error> {
        let config = self.config()?;

        let len = buf.len();
        let dst = buf.get_mut(..size::CONFIG)
            .ok_or(Error::BufferTooSmall { len, required: size::CONFIG })?;

        dst.copy_from_slice(config);
        Ok(size::CONFIG)
    }

    pub fn cyclic(&self) -> Result<&[u16], Error> {
        let min = self.min_len();
        let end = self.words.len().checked_sub(self.crc_len())
            .filter(|_| self.words.len() >= min)
            .ok_or(Error::Malformed { len: self.words.len(), min })?;

        Ok(&self.words[index::CYCLIC..end])
    }

    /// The stored checksum word, if the frame has one.
    pub fn crc(&self) -> Result<u16, Error> {
        if !self.checksum {
            return Err(Error::NoChecksum);
        }

        let min = self.min_len();
        if self.words.len() < min {
            return Err(Error::Malformed { len: self.words.len(), min });
        }

        Ok(self.words[self.words.len() - 1])
    }

    /// Recompute the checksum over all words but the last and compare it to
    /// the stored checksum word.
    pub fn check_checksum(&self) -> Result<bool, Error> {
        let expect = self.crc()?;
        let actual = crc::crc16(&self.words[..self.words.len() - 1]);

        Ok(expect == actual)
    }

    fn crc_len(&self) -> usize {
        if self.checksum { size::CRC } else { 0 }
    }

    fn min_len(&self) -> usize {
        size::MIN_FRAME + self.crc_len()
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use super::crc::crc16;

    fn addr(value: u16) -> Address {
        Address::new(value).unwrap()
    }

    #[test]
    fn test_read_request() {
        let header = Header::new(addr(5), Command::ReadRequest, false);
        let frame = Frame::create(header, &[0, 0, 0, 0], &[], true).unwrap();

        assert_eq!(frame.len(), 6);
        assert_eq!(frame.address(), Ok(addr(5)));
        assert_eq!(frame.command(), Ok(Command::ReadRequest));
        assert_eq!(frame.segmented(), Ok(false));
        assert_eq!(frame.check_checksum(), Ok(true));

        assert_eq!(frame.as_words()[..5], [0x0052, 0, 0, 0, 0]);
        assert_eq!(frame.crc(), Ok(crc16(&[0x0052, 0, 0, 0, 0])));
    }

    #[test]
    fn test_header_fields() {
        let header = Header::new(addr(0x640), Command::WriteRequest, true);
        let frame = Frame::create(header, &[2, 0, 0, 0], &[], false).unwrap();

        assert_eq!(frame.header(), Ok(header));
        assert_eq!(frame.address(), Ok(addr(0x640)));
        assert_eq!(frame.command(), Ok(Command::WriteRequest));
        assert_eq!(frame.segmented(), Ok(true));
    }

    #[test]
    fn test_config() {
        let config = [0x1234, 0xabcd, 0x0000, 0xffff];
        let header = Header::new(addr(0x011), Command::Ack, false);
        let frame = Frame::create(header, &config, &[7, 8, 9], true).unwrap();

        assert_eq!(frame.config(), Ok(&config));

        let mut buf = [0u16; 8];
        assert_eq!(frame.copy_config(&mut buf), Ok(4));
        assert_eq!(buf[..4], config);
        assert_eq!(buf[4..], [0; 4]);

        let mut buf = [0u16; 3];
        assert_eq!(frame.copy_config(&mut buf), Err(Error::BufferTooSmall { len: 3, required: 4 }));
    }

    #[test]
    fn test_cyclic() {
        let cyclic = [0x0101, 0x0202, 0x0303];
        let header = Header::new(addr(1), Command::Idle, false);

        let frame = Frame::create(header, &IDLE_CONFIG, &cyclic, true).unwrap();
        assert_eq!(frame.len(), 9);
        assert_eq!(frame.cyclic(), Ok(&cyclic[..]));
        assert_eq!(frame.check_checksum(), Ok(true));

        let frame = Frame::create(header, &IDLE_CONFIG, &cyclic, false).unwrap();
        assert_eq!(frame.len(), 8);
        assert_eq!(frame.cyclic(), Ok(&cyclic[..]));

        let frame = Frame::create(header, &IDLE_CONFIG, &[], true).unwrap();
        assert_eq!(frame.cyclic(), Ok(&[][..]));
    }

    #[test]
    fn test_sizes() {
        let header = Header::new(addr(0x0ab), Command::Idle, false);
        let cyclic = [0x5a5a; size::MAX_CYCLIC + 1];

        for n in 0..=size::MAX_CYCLIC {
            let frame = Frame::create(header, &IDLE_CONFIG, &cyclic[..n], true).unwrap();
            assert_eq!(frame.len(), 1 + 4 + n + 1);
            assert_eq!(frame.cyclic().map(|c| c.len()), Ok(n));

            let frame = Frame::create(header, &IDLE_CONFIG, &cyclic[..n], false).unwrap();
            assert_eq!(frame.len(), 1 + 4 + n);
        }

        assert_eq!(
            Frame::create(header, &IDLE_CONFIG, &cyclic, true),
            Err(Error::SizeExceeded { requested: 129, capacity: 128 }),
        );

        // without checksum the same payload fills the frame exactly
        let frame = Frame::create(header, &IDLE_CONFIG, &cyclic, false).unwrap();
        assert_eq!(frame.len(), MAX_FRAME_SIZE);

        // payloads longer than u16::MAX words are not wrapped around
        let huge = vec![0u16; 65540];
        assert_eq!(
            Frame::create(header, &IDLE_CONFIG, &huge, true),
            Err(Error::SizeExceeded { requested: 65546, capacity: 128 }),
        );
    }

    #[test]
    fn test_checksum_detects_changes() {
        let header = Header::new(addr(0x321), Command::WriteRequest, true);
        let frame = Frame::create(header, &[1, 2, 3, 4], &[5, 6, 7, 8, 9], true).unwrap();

        assert_eq!(frame.check_checksum(), Ok(true));

        for i in 0..frame.len() - 1 {
            let mut words = frame.as_words().to_vec();
            words[i] ^= 0x0040;

            let altered = Frame::from_words(&words, true).unwrap();
            assert_eq!(altered.check_checksum(), Ok(false), "word {i} altered");
        }

        let mut words = frame.as_words().to_vec();
        *words.last_mut().unwrap() ^= 1;
        assert_eq!(Frame::from_words(&words, true).unwrap().check_checksum(), Ok(false));
    }

    #[test]
    fn test_accessors_idempotent() {
        let header = Header::new(addr(0x0fe), Command::ReadError, true);
        let frame = Frame::create(header, &[9, 8, 7, 6], &[1, 2], true).unwrap();
        let copy = frame.clone();

        for _ in 0..2 {
            assert_eq!(frame.header(), Ok(header));
            assert_eq!(frame.config(), Ok(&[9, 8, 7, 6]));
            assert_eq!(frame.cyclic(), Ok(&[1, 2][..]));
            assert_eq!(frame.check_checksum(), Ok(true));
        }

        assert_eq!(frame, copy);
    }

    #[test]
    fn test_idle() {
        let frame = Frame::idle(addr(0x010), true);

        assert_eq!(frame.len(), 6);
        assert_eq!(frame.command(), Ok(Command::Idle));
        assert_eq!(frame.segmented(), Ok(false));
        assert_eq!(frame.config(), Ok(&IDLE_CONFIG));
        assert_eq!(frame.check_checksum(), Ok(true));

        let header = Header::new(addr(0x010), Command::Idle, false);
        assert_eq!(frame, Frame::create(header, &IDLE_CONFIG, &[], true).unwrap());

        assert_eq!(Frame::idle(addr(0x010), false).len(), 5);
    }

    #[test]
    fn test_malformed() {
        let empty = Frame::from_words(&[], false).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.address(), Err(Error::Malformed { len: 0, min: 1 }));
        assert_eq!(empty.command(), Err(Error::Malformed { len: 0, min: 1 }));
        assert_eq!(empty.segmented(), Err(Error::Malformed { len: 0, min: 1 }));

        let short = Frame::from_words(&[0x0052, 1, 2], true).unwrap();
        assert_eq!(short.address(), Ok(addr(5)));
        assert_eq!(short.config(), Err(Error::Malformed { len: 3, min: 5 }));
        assert_eq!(short.cyclic(), Err(Error::Malformed { len: 3, min: 6 }));
        assert_eq!(short.check_checksum(), Err(Error::Malformed { len: 3, min: 6 }));

        let plain = Frame::from_words(&[0x0052, 1, 2, 3, 4], false).unwrap();
        assert_eq!(plain.check_checksum(), Err(Error::NoChecksum));

        let bad = Frame::from_words(&[0x0008, 0, 0, 0, 0], false).unwrap();
        assert_eq!(bad.command(), Err(Error::InvalidCommand(4)));
        assert_eq!(bad.address(), Ok(addr(0)));

        let words = [0u16; MAX_FRAME_SIZE + 1];
        assert_eq!(
            Frame::from_words(&words, false),
            Err(Error::SizeExceeded { requested: 129, capacity: 128 }),
        );
    }

    #[test]
    fn test_bytes() {
        let header = Header::new(addr(5), Command::ReadRequest, false);
        let frame = Frame::create(header, &[0x1122, 0x3344, 0x5566, 0x7788], &[0x99aa], true).unwrap();

        let bytes = frame.to_bytes();
        assert_eq!(bytes.len(), 14);
        assert_eq!(bytes[..12], [
            0x00, 0x52, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa,
        ]);

        assert_eq!(Frame::from_bytes(&bytes, true), Ok(frame));
        assert_eq!(Frame::from_bytes(&bytes[..13], true), Err(Error::OddLength(13)));
        assert_eq!(
            Frame::from_bytes(&[0; 258], false),
            Err(Error::SizeExceeded { requested: 129, capacity: 128 }),
        );
    }
}
