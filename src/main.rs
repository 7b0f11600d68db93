use greenwave::scenario::Scenario;
use std::process::ExitCode;

fn run(path: &str) -> Result<String, Box<dyn std::error::Error>> {
    let scenario = Scenario::load(path)?;
    let corridor = scenario.corridor()?;
    let json = match scenario.genetic_config()? {
        Some(config) => serde_json::to_string_pretty(&corridor.optimize(&config)?)?,
        None => serde_json::to_string_pretty(&corridor.green_waves()?)?,
    };
    Ok(json)
}

fn main() -> ExitCode {
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("Usage: greenwave <scenario.json>");
        return ExitCode::FAILURE;
    };
    match run(&path) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
