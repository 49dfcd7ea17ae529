use response_time_plots::analysis::{run_histogram, HistogramError};
use response_time_plots::common::DisplayOutcome;
use response_time_plots::parsing::default_input_path;

fn main() -> Result<(), HistogramError> {
    let input_file = default_input_path();
    match run_histogram(&input_file)? {
        DisplayOutcome::Opened(path) => println!("Opened histogram: {}", path.display()),
        DisplayOutcome::Headless(path) => println!("Histogram saved to: {}", path.display()),
    }

    Ok(())
}
