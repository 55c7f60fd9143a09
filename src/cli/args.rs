use clap::Parser;

/// Every flag is optional: with none, the monitor resets `write_here.txt`,
/// reads the language from it and starts watching.
#[derive(Parser, Debug)]
#[command(name = "langmon")]
#[command(about = "Watches a text file and translates what you write between the tags")]
#[command(version)]
pub struct Args {
    /// File to monitor (reset on startup) [default: write_here.txt]
    pub file: Option<String>,

    /// Language written into the file on startup [default: german]
    #[arg(short = 'l', long)]
    pub language: Option<String>,

    /// Completion model used for translation [default: gpt-4o-mini]
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// Voice used for spoken translations [default: alloy]
    #[arg(long)]
    pub voice: Option<String>,

    /// Do not synthesize or play audio
    #[arg(long)]
    pub no_audio: bool,

    /// Only print errors
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Print diagnostic logs
    #[arg(short = 'v', long, conflicts_with = "quiet")]
    pub verbose: bool,
}
