use std::path::Path;

use anyhow::Result;

use tick_timer_sim::SimConfig;

fn main() -> Result<()> {
    tick_timer_logging::log_to_stderr();

    let config = match std::env::args_os().nth(1) {
        Some(path) => SimConfig::load(Path::new(&path))?,
        None => SimConfig::default(),
    };

    let report = tick_timer_sim::run(&config)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
