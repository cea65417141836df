use clap::Parser;
use std::path::PathBuf;

use ytsum::config::ResponseMode;

#[derive(Parser)]
#[command(name = "ytsum", about = "YouTube transcript summarizer service", version)]
pub struct Cli {
    /// Path to config file (defaults to ~/.config/ytsum/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Bind host
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Success payload: transcript, summary, or both
    #[arg(short, long, value_enum)]
    pub mode: Option<ResponseMode>,

    /// Preferred caption language (repeatable, scanned in order)
    #[arg(short, long = "lang")]
    pub languages: Vec<String>,

    /// Chat-completion model for summarization
    #[arg(long)]
    pub model: Option<String>,

    /// Log outbound call detail
    #[arg(short, long)]
    pub verbose: bool,
}
