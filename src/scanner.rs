use std::collections::HashMap;

use futures::future::join_all;
use tokio::task::JoinHandle;

use crate::stream::ByteStream;

type RoundRead = (ByteStream, Option<u8>);

/// Races a set of named byte streams against each other.
///
/// Every round reads one byte from each active stream in parallel. The
/// first round in which some stream yields the marker eliminates every
/// stream that did not; the winners are then drained to their end.
#[derive(Debug, Default)]
pub struct RaceScanner {
    streams: HashMap<String, ByteStream>,
    content: HashMap<String, Vec<u8>>,
    marker_offset: Option<usize>,
}

impl RaceScanner {
    pub fn new(streams: HashMap<String, ByteStream>) -> Self {
        Self {
            streams,
            ..Default::default()
        }
    }

    /// Register a stream, replacing (and releasing) any stream already
    /// registered under `id`.
    pub fn insert(&mut self, id: impl Into<String>, stream: ByteStream) {
        if let Some(mut previous) = self.streams.insert(id.into(), stream) {
            previous.release();
        }
    }

    pub fn len(&self) -> usize {
        self.streams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    /// Offset at which the most recent scan first met the marker.
    pub fn marker_offset(&self) -> Option<usize> {
        self.marker_offset
    }

    /// Run the race to completion.
    ///
    /// Returns the accumulated bytes of every stream that produced
    /// `marker` at the earliest offset any stream did, or an empty map if
    /// none ever did. All streams are consumed or released on return.
    ///
    /// The streams of the round in flight are moved out of the scanner, so
    /// dropping this future before it completes leaves the scanner empty
    /// and discards the partial content.
    pub async fn scan(&mut self, marker: u8) -> HashMap<String, Vec<u8>> {
        self.content.clear();
        self.marker_offset = None;

        let mut offset = 0;
        while !self.streams.is_empty() {
            let reads = self.read_round().await;
            self.apply_round(reads, marker, offset);
            offset += 1;
        }

        log::debug!(
            "scan finished after {} rounds with {} winner(s)",
            offset,
            self.content.len()
        );
        std::mem::take(&mut self.content)
    }

    /// Fan out one read per active stream and wait for all of them.
    async fn read_round(&mut self) -> Vec<(String, Option<RoundRead>)> {
        let (ids, handles): (Vec<String>, Vec<JoinHandle<RoundRead>>) = self
            .streams
            .drain()
            .map(|(id, mut stream)| {
                let handle = tokio::spawn(async move {
                    let byte = stream.next_byte().await;
                    (stream, byte)
                });
                (id, handle)
            })
            .unzip();

        let joined = join_all(handles).await;
        ids.into_iter()
            .zip(joined)
            .map(|(id, result)| match result {
                Ok(read) => (id, Some(read)),
                Err(err) => {
                    log::warn!("read task for {} failed: {}", id, err);
                    (id, None)
                }
            })
            .collect()
    }

    fn apply_round(
        &mut self,
        reads: Vec<(String, Option<RoundRead>)>,
        marker: u8,
        offset: usize,
    ) {
        let already_found = self.marker_offset.is_some();
        let mut produced = Vec::with_capacity(reads.len());

        for (id, read) in reads {
            match read {
                Some((stream, Some(byte))) => {
                    produced.push((id, stream, byte))
                }
                Some((mut stream, None)) => {
                    stream.release();
                    self.exhausted(id, already_found);
                }
                None => self.exhausted(id, already_found),
            }
        }

        let found_now =
            !already_found && produced.iter().any(|(_, _, b)| *b == marker);
        if found_now {
            log::debug!(
                "marker {:#04x} first found at offset {}",
                marker,
                offset
            );
            self.marker_offset = Some(offset);
        }

        for (id, mut stream, byte) in produced {
            if found_now && byte != marker {
                log::trace!("eliminating {} at offset {}", id, offset);
                stream.release();
                self.content.remove(&id);
                continue;
            }
            self.content.entry(id.clone()).or_default().push(byte);
            self.streams.insert(id, stream);
        }
    }

    fn exhausted(&mut self, id: String, already_found: bool) {
        log::trace!("{} exhausted", id);
        if !already_found {
            self.content.remove(&id);
        }
    }
}
