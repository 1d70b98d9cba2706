use clap::Parser;
use std::path::PathBuf;

// Build version with target info
const VERSION_INFO: &str = const_format::concatcp!(
    env!("CARGO_PKG_VERSION"),
    "\n",
    "Target: ",
    std::env::consts::ARCH,
    "-",
    std::env::consts::OS
);

/// Gesture-driven local video player
#[derive(Parser, Debug)]
#[command(author, version = VERSION_INFO, about, long_about = None)]
pub struct Args {
    /// Path to the video file to load - optional, can also drag-and-drop
    #[arg(value_name = "FILE")]
    pub file_path: Option<PathBuf>,

    /// Auto-play on startup
    #[arg(short = 'a', long = "autoplay")]
    pub autoplay: bool,

    /// Start in fullscreen mode
    #[arg(short = 'F', long = "fullscreen")]
    pub fullscreen: bool,

    /// Initial volume (0.0 - 1.0)
    #[arg(long = "volume", value_name = "V")]
    pub volume: Option<f32>,

    /// Double-tap / arrow-key skip amount in seconds
    #[arg(short = 's', long = "seek", value_name = "SECS")]
    pub seek_amount: Option<f64>,

    /// Enable debug logging to file (default: swipa.log)
    #[arg(short = 'l', long = "log", value_name = "LOG_FILE")]
    pub log_file: Option<Option<PathBuf>>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Custom configuration directory (overrides default platform paths)
    #[arg(short = 'c', long = "config-dir", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let args = Args::parse_from(["swipa"]);
        assert!(args.file_path.is_none());
        assert!(!args.autoplay);
        assert_eq!(args.verbosity, 0);
    }

    #[test]
    fn test_parse_full() {
        let args = Args::parse_from([
            "swipa",
            "clip.mp4",
            "-a",
            "--seek",
            "10",
            "-vv",
            "--volume",
            "0.5",
        ]);
        assert_eq!(args.file_path, Some(PathBuf::from("clip.mp4")));
        assert!(args.autoplay);
        assert_eq!(args.seek_amount, Some(10.0));
        assert_eq!(args.verbosity, 2);
        assert_eq!(args.volume, Some(0.5));
    }
}
