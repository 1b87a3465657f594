use std::collections::HashMap;
use std::time::Instant;

use byterace::{ByteStream, RaceScanner};
use clap::Subcommand;

use crate::error::MarkerParseError;
use crate::report::Report;
use crate::AppError;

mod files;
mod http;

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(about = "Race files served over HTTP")]
    Http(http::Http),
    #[command(about = "Race local files")]
    Files(files::Files),
}

/// Options shared by every source kind
#[derive(Clone, Debug, clap::Args)]
pub struct RaceArgs {
    #[clap(
        long,
        short,
        default_value = "A",
        value_parser = parse_marker,
        help = "Marker byte, as one ASCII character or 0xNN"
    )]
    marker: u8,
    #[clap(long, action, help = "Print the report as JSON")]
    json: bool,
    #[clap(long, action, help = "Echo the winning content to stdout")]
    print: bool,
}

impl RaceArgs {
    /// Scan the opened streams and report the winners.
    pub async fn race(
        &self,
        streams: HashMap<String, ByteStream>,
        started: Instant,
    ) -> Result<(), AppError> {
        let candidates = streams.len();
        let mut scanner = RaceScanner::new(streams);
        let content = scanner.scan(self.marker).await;

        let report = Report::new(
            self.marker,
            candidates,
            scanner.marker_offset(),
            &content,
            started.elapsed(),
        );
        let mut stdout = std::io::stdout().lock();
        report.write(&mut stdout, self.json)?;
        if self.print {
            Report::write_content(&mut stdout, &content)?;
        }
        Ok(())
    }
}

pub fn parse_marker(s: &str) -> Result<u8, MarkerParseError> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X"))
    {
        return u8::from_str_radix(hex, 16)
            .map_err(|_| MarkerParseError::Invalid(s.to_owned()));
    }
    match s.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(MarkerParseError::Invalid(s.to_owned())),
    }
}
