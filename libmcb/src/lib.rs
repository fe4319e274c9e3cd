//! Frame codec for the Motion Control Bus (MCB), a word-oriented
//! point-to-point protocol exchanging configuration requests/replies and
//! cyclic process data between a controller and a drive.

pub mod frame;

pub use frame::{Address, Command, Frame, Header};
