//! Sizes, word offsets and bit masks of the MCB frame layout.

/// Maximum number of words in a frame.
pub const MAX_FRAME_SIZE: usize = 128;

pub mod size {
    pub const HEADER: usize = 1;
    pub const CONFIG: usize = 4;
    pub const CRC: usize = 1;

    /// Header plus configuration, the smallest frame that can be decoded.
    pub const MIN_FRAME: usize = HEADER + CONFIG;

    /// Largest cyclic payload, leaving room for the checksum word.
    pub const MAX_CYCLIC: usize = super::MAX_FRAME_SIZE - HEADER - CONFIG - CRC;
}

pub mod index {
    pub const HEADER: usize = 0;
    pub const CONFIG: usize = 1;
    pub const CYCLIC: usize = 5;
}

pub mod header {
    pub const SEGMENTED_SHIFT: u16 = 0;
    pub const SEGMENTED_MASK: u16 = 0x1;

    pub const COMMAND_SHIFT: u16 = 1;
    pub const COMMAND_MASK: u16 = 0x7;

    pub const ADDRESS_SHIFT: u16 = 4;
    pub const ADDRESS_MASK: u16 = 0xfff;
}
