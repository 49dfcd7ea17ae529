use argh::FromArgs;
use response_time_plots::analysis::constants::DEFAULT_WINDOW;
use response_time_plots::analysis::{
    run_smoothing, SmoothingConfig, SmoothingMethod, SmoothingOutcome, SmoothingToolError,
};
use response_time_plots::common::DisplayOutcome;
use response_time_plots::parsing::default_input_path;
use std::path::PathBuf;

/// Plot response times with a moving average or median filter overlaid
#[derive(FromArgs, Debug)]
pub struct Args {
    /// smoothing window in samples (default: 100)
    #[argh(option, short = 'w', default = "DEFAULT_WINDOW")]
    window: usize,

    /// smoothing method, mean or median (default: mean)
    #[argh(option, short = 'm', default = "SmoothingMethod::Mean")]
    method: SmoothingMethod,

    /// save the plot to this path instead of showing it; format follows the extension
    #[argh(option, short = 'o')]
    output: Option<PathBuf>,
}

impl From<Args> for SmoothingConfig {
    fn from(args: Args) -> Self {
        SmoothingConfig {
            window: args.window,
            method: args.method,
            output: args.output,
        }
    }
}

fn main() -> Result<(), SmoothingToolError> {
    let args: Args = argh::from_env();
    let config = SmoothingConfig::from(args);

    match run_smoothing(&default_input_path(), &config)? {
        SmoothingOutcome::Saved(path) => println!("Plot saved to: {}", path.display()),
        SmoothingOutcome::Displayed(DisplayOutcome::Opened(path)) => {
            println!("Opened plot: {}", path.display())
        }
        SmoothingOutcome::Displayed(DisplayOutcome::Headless(path)) => {
            println!("Plot saved to: {}", path.display())
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, argh::EarlyExit> {
        Args::from_args(&["response-smoothing"], args)
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = SmoothingConfig::from(parse(&[]).unwrap());

        assert_eq!(config.window, 100);
        assert_eq!(config.method, SmoothingMethod::Mean);
        assert_eq!(config.output, None);
    }

    #[test]
    fn parses_all_options() {
        let args = parse(&["--window", "25", "--method", "median", "--output", "out.png"]).unwrap();
        let config = SmoothingConfig::from(args);

        assert_eq!(config.window, 25);
        assert_eq!(config.method, SmoothingMethod::Median);
        assert_eq!(config.output, Some(PathBuf::from("out.png")));
    }

    #[test]
    fn parses_short_flags() {
        let args = parse(&["-w", "7", "-m", "mean", "-o", "plot.svg"]).unwrap();

        assert_eq!(args.window, 7);
        assert_eq!(args.output, Some(PathBuf::from("plot.svg")));
    }

    #[test]
    fn rejects_unknown_method() {
        assert!(parse(&["--method", "mode"]).is_err());
    }

    #[test]
    fn rejects_non_numeric_window() {
        assert!(parse(&["--window", "wide"]).is_err());
    }
}
