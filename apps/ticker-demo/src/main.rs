use anyhow::Result;
use clap::Parser;
use ticker_demo::TickerArgs;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args = TickerArgs::parse();
    let stdout = std::io::stdout();
    let summary = ticker_demo::run(&args, &mut stdout.lock())?;

    log::info!(
        "done: {} frames, {} values, final value {}",
        summary.frames,
        summary.values_printed,
        summary.final_value
    );
    Ok(())
}
