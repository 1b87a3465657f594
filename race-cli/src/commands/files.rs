use std::path::PathBuf;
use std::time::Instant;

use byterace::open_files;

use super::RaceArgs;
use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "files", about = "Race local files")]
pub struct Files {
    #[clap(flatten)]
    race: RaceArgs,
    #[clap(value_parser, required = true, help = "Paths of the files to race")]
    paths: Vec<PathBuf>,
}

impl Files {
    pub async fn run(&self) -> Result<(), AppError> {
        let started = Instant::now();
        let streams = open_files(&self.paths)
            .await
            .map_err(AppError::StreamsInitError)?;

        self.race.race(streams, started).await
    }
}
