use clap::Parser;
use std::path::PathBuf;

/// Build a looping audio playlist from media links
///
/// Each SUBMISSION is either a single URL or a JSON batch such as
/// '[{"url":"https://..."},{"url":"https://..."}]'. Without submissions,
/// lines are read from stdin.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Links or JSON batches to add, in order
    #[arg(value_name = "SUBMISSION")]
    pub submissions: Vec<String>,

    /// Read one JSON batch from a file
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Custom configuration directory
    #[arg(short = 'c', long = "config-dir", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Resolution endpoint base URL (overrides resolver.base_url)
    #[arg(short = 'r', long = "resolver-url", value_name = "URL")]
    pub resolver_url: Option<String>,

    /// Resolve batch items concurrently (overrides playlist.resolve_mode)
    #[arg(long = "concurrent")]
    pub concurrent: bool,

    /// After submitting, simulate N track endings and print each next track
    #[arg(short = 'p', long = "play", value_name = "N", default_value_t = 0)]
    pub play: usize,

    /// Print outcomes as JSON lines instead of notices
    #[arg(long = "json")]
    pub json: bool,

    /// Increase logging verbosity (default: from config, -v: debug, -vv: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_submissions_and_flags() {
        let args = Args::parse_from([
            "pmoplaylist",
            "https://a",
            r#"[{"url":"https://b"}]"#,
            "--concurrent",
            "-p",
            "3",
            "-vv",
        ]);
        assert_eq!(args.submissions.len(), 2);
        assert!(args.concurrent);
        assert_eq!(args.play, 3);
        assert_eq!(args.verbosity, 2);
        assert!(args.file.is_none());
    }
}
