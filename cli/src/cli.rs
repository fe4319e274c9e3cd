use clap::{Parser, Subcommand, ValueEnum};


/// Build and inspect Motion Control Bus (MCB) frames
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build a frame and print its words
    Encode {
        /// Register address (12 bits, decimal or 0x-prefixed hex)
        #[arg(short, long, value_parser=parse_number)]
        address: u16,

        /// Request or reply code
        #[arg(short, long, value_enum)]
        command: FrameCommand,

        /// Mark the configuration data as segmented (more frames follow)
        #[arg(short, long)]
        segmented: bool,

        /// Configuration words, zero-padded to four words
        #[arg(long, value_delimiter=',', value_parser=parse_number)]
        config: Vec<u16>,

        /// Cyclic data words
        #[arg(long, value_delimiter=',', value_parser=parse_number)]
        cyclic: Vec<u16>,

        /// Do not append a checksum word
        #[arg(long)]
        no_checksum: bool,

        /// Print big-endian wire bytes instead of words
        #[arg(long)]
        bytes: bool,
    },

    /// Decode a frame given as hex words
    Decode {
        /// The frame has no trailing checksum word
        #[arg(long)]
        no_checksum: bool,

        /// Frame words, hex with optional 0x prefix
        #[arg(required=true, value_parser=parse_hex_word)]
        words: Vec<u16>,
    },
}

#[derive(Debug, ValueEnum, Clone, Copy, PartialEq, Eq)]
pub enum FrameCommand {
    Read,
    Write,
    Idle,
    Ack,
    ReadError,
    WriteError,
}

impl From<FrameCommand> for mcb::Command {
    fn from(value: FrameCommand) -> Self {
        match value {
            FrameCommand::Read => mcb::Command::ReadRequest,
            FrameCommand::Write => mcb::Command::WriteRequest,
            FrameCommand::Idle => mcb::Command::Idle,
            FrameCommand::Ack => mcb::Command::Ack,
            FrameCommand::ReadError => mcb::Command::ReadError,
            FrameCommand::WriteError => mcb::Command::WriteError,
        }
    }
}


fn parse_number(s: &str) -> Result<u16, String> {
    let res = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse::<u16>(),
    };

    res.map_err(|e| format!("invalid 16-bit value '{s}': {e}"))
}

fn parse_hex_word(s: &str) -> Result<u16, String> {
    let hex = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);

    u16::from_str_radix(hex, 16)
        .map_err(|e| format!("invalid hex word '{s}': {e}"))
}
