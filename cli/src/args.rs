//! Command-line arguments.

use clap::Parser;
use glyphcast::ConvertConfig;
use std::path::PathBuf;

/// Render an image as ASCII text
#[derive(Parser, Debug)]
#[command(name = "glyphcast")]
#[command(version, about = "Convert images to ASCII art", long_about = None)]
pub struct Args {
    /// Image file to convert
    #[arg(required_unless_present = "list_charsets")]
    pub input: Option<PathBuf>,

    /// Output width in characters
    #[arg(short, long, default_value_t = 80)]
    pub width: u32,

    /// Character set name
    #[arg(short, long, default_value = "enhanced")]
    pub charset: String,

    /// Supersampling factor (1 disables supersampling)
    #[arg(short, long, default_value_t = 3)]
    pub sampling_factor: u32,

    /// Disable directional edge strokes
    #[arg(long)]
    pub no_edges: bool,

    /// Sobel magnitude above which a pixel counts as an edge
    #[arg(short = 't', long, default_value_t = 50)]
    pub edge_threshold: u32,

    /// Fail on unknown character set names instead of falling back
    #[arg(long)]
    pub strict_palette: bool,

    /// Write the text to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the available character sets and exit
    #[arg(long)]
    pub list_charsets: bool,
}

impl Args {
    pub fn to_config(&self) -> ConvertConfig {
        ConvertConfig::default()
            .with_width(self.width)
            .with_char_set(self.charset.as_str())
            .with_sampling_factor(self.sampling_factor)
            .with_edge_detection(!self.no_edges)
            .with_edge_threshold(self.edge_threshold)
            .with_strict_palette(self.strict_palette)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_library() {
        let args = Args::parse_from(["glyphcast", "photo.png"]);
        assert_eq!(args.to_config(), ConvertConfig::default());
        assert_eq!(args.input, Some(PathBuf::from("photo.png")));
    }

    #[test]
    fn test_flags_map_to_config() {
        let args = Args::parse_from([
            "glyphcast",
            "photo.png",
            "-w",
            "120",
            "-c",
            "simple",
            "-s",
            "1",
            "--no-edges",
            "-t",
            "10",
            "--strict-palette",
        ]);
        let config = args.to_config();
        assert_eq!(config.width, 120);
        assert_eq!(config.char_set, "simple");
        assert_eq!(config.sampling_factor, 1);
        assert!(!config.edge_detection);
        assert_eq!(config.edge_threshold, 10);
        assert!(config.strict_palette);
    }

    #[test]
    fn test_input_required_without_list() {
        assert!(Args::try_parse_from(["glyphcast"]).is_err());
        assert!(Args::try_parse_from(["glyphcast", "--list-charsets"]).is_ok());
    }
}
