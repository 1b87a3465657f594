use thiserror::Error;

pub type Result<T> = std::result::Result<T, RaceError>;

#[derive(Error, Debug)]
pub enum RaceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("Several paths share this file name: {0}")]
    DuplicateName(String),
    #[error("Creating stream for file: {0}")]
    Construction(String),
}

impl RaceError {
    /// Fold per-stream construction failures into a single error,
    /// formatted as `name: error` pairs.
    pub fn construction<I, S>(failures: I) -> Self
    where
        I: IntoIterator<Item = (S, RaceError)>,
        S: AsRef<str>,
    {
        let message = failures
            .into_iter()
            .map(|(name, err)| format!("{}: {}", name.as_ref(), err))
            .collect::<Vec<_>>()
            .join(" - ");
        Self::Construction(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_joins_every_failure() {
        let failures = vec![
            (
                "0",
                RaceError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "gone",
                )),
            ),
            ("2", RaceError::DuplicateName("a/2, b/2".to_owned())),
        ];

        let err = RaceError::construction(failures);

        assert_eq!(
            err.to_string(),
            "Creating stream for file: 0: IO error: gone - \
             2: Several paths share this file name: a/2, b/2"
        );
    }
}
