use std::path::Path;

use unredact::{UnredactOptions, Unredactor, output_path_for};

use crate::cli::SummaryFormat;

/// Exit code when the input file does not exist.
pub const EXIT_NOT_FOUND: i32 = 2;
/// Exit code for every other failure.
pub const EXIT_FAILURE: i32 = 1;

pub fn run(file: &Path, output: Option<&Path>, format: SummaryFormat) -> Result<(), i32> {
    if !file.is_file() {
        eprintln!("File not found: {}", file.display());
        return Err(EXIT_NOT_FOUND);
    }

    let output = output.map_or_else(|| output_path_for(file), Path::to_path_buf);
    tracing::debug!(input = %file.display(), output = %output.display(), "unredacting");

    let report = Unredactor::new(UnredactOptions::aggressive())
        .unredact_file(file, &output)
        .map_err(|e| {
            eprintln!("Error: {e}");
            EXIT_FAILURE
        })?;

    let output = output.display().to_string();
    match format {
        SummaryFormat::Text => println!("{}", report.summary(&output)),
        SummaryFormat::Json => {
            let obj = serde_json::json!({
                "output": output,
                "pages": report.pages,
                "totals": report.totals,
            });
            let text = serde_json::to_string_pretty(&obj).map_err(|e| {
                eprintln!("Error: failed to serialize report: {e}");
                EXIT_FAILURE
            })?;
            println!("{text}");
        }
    }
    Ok(())
}
