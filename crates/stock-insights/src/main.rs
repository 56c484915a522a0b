mod bootstrap;
mod report;

use anyhow::{Context, Result};
use insights_core::settings::Settings;
use insights_data::pipeline::run_insight;
use insights_data::Dataset;
use insights_ui::app::App;

use crate::report::Report;

/// Exit status for a valid run whose insight cannot be shown.
const EXIT_INSIGHT_UNAVAILABLE: i32 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Stock Insights v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Year: {}, Insight: {}, Output: {}, Theme: {}",
        settings.year,
        settings.insight,
        settings.output,
        settings.theme
    );

    let data_path = settings.data_path();
    let dataset = Dataset::load(&data_path)
        .with_context(|| format!("Could not load stock data from {}", data_path.display()))?;

    let insight = settings.selected_insight();

    match settings.output.as_str() {
        "json" | "text" => {
            let output = match run_insight(insight, dataset.records(), settings.year) {
                Ok(output) => output,
                Err(e) => {
                    tracing::warn!("{}", e);
                    eprintln!("{}", e.user_message());
                    std::process::exit(EXIT_INSIGHT_UNAVAILABLE);
                }
            };

            let report = Report::new(settings.year, insight, &output);
            if settings.output == "json" {
                println!("{}", report.to_json().context("Could not encode report")?);
            } else {
                print!("{}", report.to_text());
            }
        }

        _ => {
            let app = App::new(&dataset, &settings.theme, settings.year, insight);

            // The dashboard exits on q / Esc / Ctrl+C itself. The OS-level
            // listener covers signals delivered outside raw mode.
            tokio::select! {
                result = app.run() => {
                    result.context("Terminal error")?;
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Ctrl+C received; shutting down");
                }
            }
        }
    }

    Ok(())
}
