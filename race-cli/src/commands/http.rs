use std::time::Instant;

use byterace::StreamSource;
use url::Url;

use super::RaceArgs;
use crate::AppError;

const DEFAULT_BASE: &str = "http://localhost:8080";

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "http", about = "Race files served under a base URL")]
pub struct Http {
    #[clap(long, help = "Base URL the files are served under")]
    base: Option<String>,
    #[clap(
        long,
        requires = "port",
        conflicts_with = "base",
        help = "Server host"
    )]
    host: Option<String>,
    #[clap(
        long,
        requires = "host",
        conflicts_with = "base",
        help = "Server port"
    )]
    port: Option<u16>,
    #[clap(flatten)]
    race: RaceArgs,
    #[clap(required = true, help = "Names of the files to race")]
    names: Vec<String>,
}

impl Http {
    /// Base URL, defaulting to a local server
    fn base(&self) -> Result<Url, AppError> {
        let raw = match (&self.base, &self.host, self.port) {
            (Some(base), _, _) => base.clone(),
            (None, Some(host), Some(port)) => {
                format!("http://{}:{}", host, port)
            }
            _ => DEFAULT_BASE.to_owned(),
        };
        Url::parse(&raw)
            .map_err(|e| AppError::InvalidBaseUrl(format!("{}: {}", raw, e)))
    }

    pub async fn run(&self) -> Result<(), AppError> {
        let started = Instant::now();
        let base = self.base()?;
        log::debug!("racing {} file(s) under {}", self.names.len(), base);

        let source = StreamSource::new()?;
        let streams = source
            .open_named(&base, &self.names)
            .await
            .map_err(AppError::StreamsInitError)?;

        self.race.race(streams, started).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct Wrapper {
        #[clap(flatten)]
        http: Http,
    }

    fn parse(args: &[&str]) -> Http {
        let argv = std::iter::once("race-cli").chain(args.iter().copied());
        Wrapper::try_parse_from(argv).unwrap().http
    }

    #[test]
    fn defaults_to_local_server() {
        let http = parse(&["0", "1"]);
        assert_eq!(http.base().unwrap().as_str(), "http://localhost:8080/");
        assert_eq!(http.names, vec!["0", "1"]);
    }

    #[test]
    fn builds_base_from_host_and_port() {
        let http = parse(&["--host", "10.0.0.2", "--port", "9000", "x"]);
        assert_eq!(http.base().unwrap().as_str(), "http://10.0.0.2:9000/");
    }

    #[test]
    fn rejects_empty_name_list() {
        assert!(Wrapper::try_parse_from(["race-cli"]).is_err());
        assert!(Wrapper::try_parse_from(["race-cli", "--base", "http://h"])
            .is_err());
    }

    #[test]
    fn rejects_host_without_port() {
        let argv = ["race-cli", "--host", "example.org", "x"];
        assert!(Wrapper::try_parse_from(argv).is_err());
    }

    #[test]
    fn rejects_malformed_base() {
        let http = parse(&["--base", "not a url", "x"]);
        assert!(matches!(http.base(), Err(AppError::InvalidBaseUrl(_))));
    }
}
