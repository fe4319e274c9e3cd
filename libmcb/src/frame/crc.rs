//! CRC-16/XMODEM (CRC-CCITT, polynomial 0x1021, zero seed) over 16-bit words.
//!
//! Words are fed most significant byte first, the order in which they are
//! shifted out on the bus.

use crc::{Crc, Digest, CRC_16_XMODEM};


static XMODEM: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);


pub struct Crc16 {
    digest: Digest<'static, u16>,
}

impl Crc16 {
    pub fn new() -> Self {
        Self { digest: XMODEM.digest() }
    }

    pub fn put_u16(&mut self, word: u16) -> &mut Self {
        self.digest.update(&word.to_be_bytes());
        self
    }

    pub fn put_words<'a, T: IntoIterator<Item = &'a u16>>(&mut self, words: T) -> &mut Self {
        for w in words.into_iter() {
            self.put_u16(*w);
        }
        self
    }

    pub fn finalize(self) -> u16 {
        self.digest.finalize()
    }
}

impl Default for Crc16 {
    fn default() -> Self {
        Self::new()
    }
}


pub fn crc16(words: &[u16]) -> u16 {
    let mut crc = Crc16::new();
    crc.put_words(words);
    crc.finalize()
}
