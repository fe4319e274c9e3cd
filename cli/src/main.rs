mod cli;

use anyhow::Result;
use clap::{Parser, CommandFactory};

use mcb::frame::consts::size;
use mcb::{Address, Frame, Header};

use cli::*;


fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    match args.command {
        Command::Encode { address, command, segmented, config, cyclic, no_checksum, bytes } => {
            let Some(config) = pad_config(&config) else {
                use clap::error::ErrorKind;

                let mut cmd = Args::command();
                let err = cmd.error(
                    ErrorKind::InvalidValue,
                    format!("At most {} configuration words are allowed", size::CONFIG),
                );
                err.exit();
            };

            let header = Header::new(Address::new(address)?, command.into(), segmented);
            println!("{}", cmd_encode(header, &config, &cyclic, !no_checksum, bytes)?);
        },
        Command::Decode { no_checksum, words } => {
            println!("{}", cmd_decode(&words, !no_checksum)?);
        },
    }

    Ok(())
}

/// Zero-pad configuration words to a full configuration payload.
fn pad_config(config: &[u16]) -> Option<[u16; size::CONFIG]> {
    let mut cfg = [0; size::CONFIG];
    cfg.get_mut(..config.len())?.copy_from_slice(config);
    Some(cfg)
}

fn cmd_encode(header: Header, config: &[u16; size::CONFIG], cyclic: &[u16], checksum: bool, bytes: bool) -> Result<String> {
    tracing::debug!(?header, cyclic=cyclic.len(), checksum, "encoding frame");

    let frame = Frame::create(header, config, cyclic, checksum)?;

    let out = if bytes {
        frame.to_bytes()
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect::<Vec<_>>()
    } else {
        frame.as_words()
            .iter()
            .map(|w| format!("{w:04x}"))
            .collect::<Vec<_>>()
    };

    Ok(out.join(" "))
}

fn cmd_decode(words: &[u16], checksum: bool) -> Result<String> {
    tracing::debug!(words=words.len(), checksum, "decoding frame");

    let frame = Frame::from_words(words, checksum)?;

    let address = frame.address()?;
    let config = frame.config()?;
    let cyclic = frame.cyclic()?;

    let command = match frame.command() {
        Ok(cmd) => format!("{cmd:?}"),
        Err(e) => format!("invalid ({e})"),
    };

    let crc = if frame.has_checksum() {
        let valid = if frame.check_checksum()? { "valid" } else { "invalid" };
        format!("{:04x} ({valid})", frame.crc()?)
    } else {
        "none".to_string()
    };

    let lines = [
        "frame:".to_string(),
        format!("  words:     {}", frame.len()),
        format!("  address:   {:#05x}", address.value()),
        format!("  command:   {command}"),
        format!("  segmented: {}", frame.segmented()?),
        format!("  config:    {}", hex_words(config)),
        format!("  cyclic:    {}", hex_words(cyclic)),
        format!("  checksum:  {crc}"),
    ];

    Ok(lines.join("\n"))
}

fn hex_words(words: &[u16]) -> String {
    if words.is_empty() {
        return "-".to_string();
    }

    words.iter()
        .map(|w| format!("{w:04x}"))
        .collect::<Vec<_>>()
        .join(" ")
}
