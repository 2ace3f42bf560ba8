use std::path::PathBuf;

use crate::display::OutputMode;

#[derive(clap::Parser, Debug)]
#[command(name = "we-statusline", about = "WE broadband quota for the status bar")]
pub struct Args {
    /// Credentials JSON file. Defaults to ~/dotfiles/.bin/we_usage.json
    #[arg(env = "WE_USAGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Plain `used/totalGB (remain left)` output instead of polybar markup
    #[arg(long)]
    pub simple: bool,

    /// Emit JSON instead of a status line
    #[arg(long, conflicts_with = "simple")]
    pub json: bool,

    /// Debug mode: log each request to stderr
    #[arg(long, env = "WE_STATUSLINE_DEBUG")]
    pub debug: bool,

    /// Portal base URL (defaults to https://my.te.eg)
    #[arg(long, env = "WE_PORTAL_URL", hide = true)]
    pub portal_url: Option<String>,
}

impl Args {
    pub fn parse() -> Self {
        <Args as clap::Parser>::parse()
    }

    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.simple {
            OutputMode::Simple
        } else {
            OutputMode::Decorated
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults_to_decorated() {
        let args = Args::try_parse_from(["we-statusline", "/tmp/we.json"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("/tmp/we.json")));
        assert_eq!(args.output_mode(), OutputMode::Decorated);
        assert_eq!(args.portal_url, None);
    }

    #[test]
    fn test_simple_flag_anywhere() {
        let args = Args::try_parse_from(["we-statusline", "--simple", "/tmp/we.json"]).unwrap();
        assert_eq!(args.output_mode(), OutputMode::Simple);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/we.json")));

        let args = Args::try_parse_from(["we-statusline", "/tmp/we.json", "--simple"]).unwrap();
        assert_eq!(args.output_mode(), OutputMode::Simple);
    }

    #[test]
    fn test_json_conflicts_with_simple() {
        assert!(Args::try_parse_from(["we-statusline", "--json", "--simple"]).is_err());
    }
}
