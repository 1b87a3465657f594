use std::collections::HashMap;
use std::io::Write;
use std::time::Duration;

use serde::Serialize;

use crate::AppError;

#[derive(Debug, Serialize, PartialEq)]
pub struct Winner {
    pub name: String,
    pub bytes: usize,
}

/// Outcome of one race, as shown to the user
#[derive(Debug, Serialize)]
pub struct Report {
    pub marker: String,
    pub candidates: usize,
    pub offset: Option<usize>,
    pub winners: Vec<Winner>,
    pub elapsed_ms: u128,
}

impl Report {
    pub fn new(
        marker: u8,
        candidates: usize,
        offset: Option<usize>,
        content: &HashMap<String, Vec<u8>>,
        elapsed: Duration,
    ) -> Self {
        let mut winners: Vec<Winner> = content
            .iter()
            .map(|(name, bytes)| Winner {
                name: name.clone(),
                bytes: bytes.len(),
            })
            .collect();
        winners.sort_by(|a, b| a.name.cmp(&b.name));

        Self {
            marker: std::ascii::escape_default(marker).to_string(),
            candidates,
            offset,
            winners,
            elapsed_ms: elapsed.as_millis(),
        }
    }

    pub fn write<W: Write>(
        &self,
        out: &mut W,
        json: bool,
    ) -> Result<(), AppError> {
        if json {
            serde_json::to_writer_pretty(&mut *out, self)
                .map_err(|e| AppError::ReportError(e.to_string()))?;
            writeln!(out)?;
            return Ok(());
        }

        match self.offset {
            Some(offset) => writeln!(
                out,
                "marker '{}' first found at offset {} in {} of {} file(s):",
                self.marker,
                offset,
                self.winners.len(),
                self.candidates
            )?,
            None => writeln!(
                out,
                "marker '{}' not found in any of {} file(s)",
                self.marker, self.candidates
            )?,
        }
        for winner in &self.winners {
            writeln!(out, "\t{}\t{} bytes", winner.name, winner.bytes)?;
        }
        writeln!(out, "exec time: {}ms", self.elapsed_ms)?;
        Ok(())
    }

    /// Echo every winner's content, ordered by name.
    pub fn write_content<W: Write>(
        out: &mut W,
        content: &HashMap<String, Vec<u8>>,
    ) -> Result<(), AppError> {
        let mut names: Vec<&String> = content.keys().collect();
        names.sort();
        for name in names {
            writeln!(out, "==> {} <==", name)?;
            out.write_all(&content[name])?;
            writeln!(out)?;
        }
        Ok(())
    }
}
