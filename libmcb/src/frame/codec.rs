use bytes::{Buf, BytesMut};

use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::{Decoder, Encoder, Framed};

use super::consts::{size, MAX_FRAME_SIZE};
use super::{Error, Frame};


/// Codec for fixed-size transfers of big-endian frame words.
///
/// Every transfer on the bus has the same length, given by the configured
/// cyclic payload size and checksum mode, so transfers are delimited by
/// size alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Codec {
    cyclic: usize,
    checksum: bool,
}

impl Codec {
    pub fn new(cyclic: usize, checksum: bool) -> Result<Self, Error> {
        let requested = size::MIN_FRAME + cyclic + if checksum { size::CRC } else { 0 };
        if requested > MAX_FRAME_SIZE {
            return Err(Error::SizeExceeded { requested, capacity: MAX_FRAME_SIZE });
        }

        Ok(Self { cyclic, checksum })
    }

    /// Codec for configuration-only transfers.
    pub fn config(checksum: bool) -> Self {
        Self { cyclic: 0, checksum }
    }

    pub fn frame_words(&self) -> usize {
        size::MIN_FRAME + self.cyclic + if self.checksum { size::CRC } else { 0 }
    }

    pub fn frame_bytes(&self) -> usize {
        self.frame_words() * 2
    }

    pub fn wrap<T>(self, io: T) -> Framed<T, Codec>
    where
        T: AsyncRead + AsyncWrite,
    {
        let cap = self.frame_bytes() * 4;
        Framed::with_capacity(io, self, cap)
    }
}

impl Decoder for Codec {
    type Item = Frame;
    type Error = std::io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let size = self.frame_bytes();

        if src.len() < size {
            src.reserve(size - src.len());
            return Ok(None);
        }

        let frame = Frame::from_bytes(&src[..size], self.checksum)?;
        src.advance(size);

        if frame.has_checksum() && !frame.check_checksum()? {
            tracing::warn!(words=frame.len(), "received frame with invalid checksum");
        }

        Ok(Some(frame))
    }
}

impl Encoder<&Frame> for Codec {
    type Error = std::io::Error;

    fn encode(&mut self, frame: &Frame, dst: &mut BytesMut) -> Result<(), Self::Error> {
        if frame.len() != self.frame_words() || frame.has_checksum() != self.checksum {
            Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!(
                    "frame of {} words (checksum: {}) does not match transfer of {} words (checksum: {})",
                    frame.len(), frame.has_checksum(), self.frame_words(), self.checksum,
                ),
            ))?;
        }

        frame.encode(dst);
        Ok(())
    }
}

impl Encoder<Frame> for Codec {
    type Error = std::io::Error;

    fn encode(&mut self, frame: Frame, dst: &mut BytesMut) -> Result<(), Self::Error> {
        self.encode(&frame, dst)
    }
}
