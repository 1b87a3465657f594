use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::{Path, PathBuf};

use futures::future::join_all;
use futures::TryStreamExt;
use reqwest::header::HeaderValue;
use tokio_util::io::StreamReader;
use url::Url;

use crate::{ByteStream, RaceError, Result};

pub const USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Opens the byte streams a [`crate::RaceScanner`] races over.
///
/// Every stream is fully established (request sent, status checked, file
/// opened) before it is handed out, so construction faults surface here
/// and never during a scan.
#[derive(Debug, Clone)]
pub struct StreamSource {
    client: reqwest::Client,
}

impl StreamSource {
    pub fn new() -> Result<Self> {
        let mut header = reqwest::header::HeaderMap::new();
        header.insert("User-Agent", HeaderValue::from_static(USER_AGENT));
        let client = reqwest::Client::builder()
            .default_headers(header)
            .build()?;
        Ok(Self { client })
    }

    /// Issue a GET for `url` and expose the response body as a stream.
    pub async fn open_url(&self, url: Url) -> Result<ByteStream> {
        log::trace!("opening {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?;
        let body = response
            .bytes_stream()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e));
        Ok(ByteStream::new(StreamReader::new(Box::pin(body))))
    }

    /// Open `<base>/<name>` for every name, concurrently.
    ///
    /// Fails if any single stream cannot be opened, listing every failure;
    /// the streams that did open are released in that case.
    pub async fn open_named(
        &self,
        base: &Url,
        names: &[String],
    ) -> Result<HashMap<String, ByteStream>> {
        let mut unique = names.to_vec();
        unique.sort();
        unique.dedup();

        let attempts = unique.iter().map(|name| async move {
            let stream = match join_url(base, name) {
                Ok(url) => self.open_url(url).await,
                Err(err) => Err(err),
            };
            (name.clone(), stream)
        });
        collect_streams(join_all(attempts).await)
    }
}

/// Open local files, keyed by their file name.
///
/// Paths that share a file name cannot be told apart in the result, so
/// they fail construction instead of shadowing each other.
pub async fn open_files<P: AsRef<Path>>(
    paths: &[P],
) -> Result<HashMap<String, ByteStream>> {
    let mut by_key: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    for path in paths {
        let path = path.as_ref().to_path_buf();
        by_key.entry(file_key(&path)).or_default().push(path);
    }

    let mut collisions = Vec::new();
    let mut unique = Vec::new();
    for (key, mut paths) in by_key {
        if paths.len() > 1 {
            let listed = paths
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            collisions.push((key, RaceError::DuplicateName(listed)));
        } else if let Some(path) = paths.pop() {
            unique.push((key, path));
        }
    }

    let attempts = unique.into_iter().map(|(key, path)| async move {
        let stream = open_file(&path).await;
        (key, stream)
    });
    let mut attempts = join_all(attempts).await;
    attempts.extend(collisions.into_iter().map(|(key, err)| (key, Err(err))));
    collect_streams(attempts)
}

async fn open_file(path: &Path) -> Result<ByteStream> {
    let file = tokio::fs::File::open(path).await?;
    Ok(ByteStream::new(file))
}

fn file_key(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Resolve `name` relative to `base`, treating `base` as a directory.
pub fn join_url(base: &Url, name: &str) -> Result<Url> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join(name)?)
}

fn collect_streams(
    attempts: Vec<(String, Result<ByteStream>)>,
) -> Result<HashMap<String, ByteStream>> {
    let mut streams = HashMap::new();
    let mut failures = Vec::new();
    for (name, attempt) in attempts {
        match attempt {
            Ok(stream) => {
                streams.insert(name, stream);
            }
            Err(err) => failures.push((name, err)),
        }
    }

    if failures.is_empty() {
        return Ok(streams);
    }
    for stream in streams.values_mut() {
        stream.release();
    }
    Err(RaceError::construction(failures))
}
