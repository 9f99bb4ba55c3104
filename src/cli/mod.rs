pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "freshet")]
#[command(about = "Paginated feed and comment thread sync engine", long_about = None)]
pub struct Cli {
    /// Path to an alternate config file
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch pages of the home recommendation stream
    Feed {
        /// Number of pages to load
        #[arg(short, long, default_value_t = 1)]
        pages: usize,
    },
    /// Fetch pages of one question's answer stream
    Question {
        /// Question id
        id: u64,

        #[arg(short, long, default_value_t = 1)]
        pages: usize,
    },
    /// List root comments for a piece of content
    Comments {
        /// Content kind: answer, article or question
        kind: String,

        /// Content id
        id: u64,

        #[arg(short, long, default_value_t = 1)]
        pages: usize,
    },
}
