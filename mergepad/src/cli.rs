use std::path::PathBuf;

use clap::Parser;
use mergepad_core::DiffAlgorithm;

#[derive(Parser, Debug)]
#[command(
    name = "mergepad",
    about = "Compare two text files side by side and build a merged result",
    version
)]
pub struct Cli {
    /// File shown in the left pane
    pub left: Option<PathBuf>,

    /// File shown in the right pane; the two are compared once both load
    pub right: Option<PathBuf>,

    /// Default path offered when saving the merged result
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file to read instead of the default location
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Diff algorithm, overriding the config file
    #[arg(short, long)]
    pub algorithm: Option<AlgorithmArg>,

    /// Start in sync view
    #[arg(short, long)]
    pub sync: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum AlgorithmArg {
    Myers,
    Patience,
    Lcs,
}

impl From<AlgorithmArg> for DiffAlgorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::Myers => DiffAlgorithm::Myers,
            AlgorithmArg::Patience => DiffAlgorithm::Patience,
            AlgorithmArg::Lcs => DiffAlgorithm::Lcs,
        }
    }
}
