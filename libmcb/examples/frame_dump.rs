//! Build a frame and dump its wire representation.
//!
//! Usage:
//!   cargo run --example frame_dump -- [address] [cyclic-words]

use anyhow::Context;

use mcb::frame::Codec;
use mcb::{Address, Command, Frame, Header};

use pretty_hex::PrettyHex;
use tokio_util::codec::Encoder;


fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);

    let address = args.next()
        .map(|a| a.parse::<u16>())
        .transpose()
        .context("invalid address")?
        .unwrap_or(0x011);

    let cyclic = args.next()
        .map(|n| n.parse::<usize>())
        .transpose()
        .context("invalid cyclic size")?
        .unwrap_or(0);

    let header = Header::new(Address::new(address)?, Command::ReadRequest, false);
    let cyclic: Vec<u16> = (0..cyclic).map(|i| i as u16).collect();
    let frame = Frame::create(header, &[0, 0, 0, 0], &cyclic, true)?;

    println!("Frame:");
    println!("  address:   {:#05x}", frame.address()?.value());
    println!("  command:   {:?}", frame.command()?);
    println!("  segmented: {}", frame.segmented()?);
    println!("  words:     {}", frame.len());
    println!("  crc:       {:#06x}", frame.crc()?);
    println!();

    let mut codec = Codec::new(cyclic.len(), true)?;
    let mut buf = bytes::BytesMut::new();
    codec.encode(&frame, &mut buf)?;

    println!("{:?}", buf.hex_dump());

    Ok(())
}
