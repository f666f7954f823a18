//! Score a JSON payload read from stdin, printing `{"scores": [...]}`.

use std::io::Read;
use std::path::PathBuf;

use iris_classifier::{ClassifierConfig, FlowerClassifier, logging, scoring};

const USAGE: &str = "Usage: iris-score [--config <toml>] < payload.json";

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let Some(config_path) = parse_args(std::env::args().skip(1))? else {
        println!("{USAGE}");
        return Ok(());
    };

    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let config = ClassifierConfig::resolve(config_path.as_deref())?;
    let classifier = FlowerClassifier::load(&config)?;
    let mut payload = String::new();
    std::io::stdin().read_to_string(&mut payload)?;
    println!("{}", scoring::score_json(&classifier, &payload)?);
    Ok(())
}

/// Returns the optional config path, or `Ok(None)` when help was requested.
fn parse_args(
    args: impl IntoIterator<Item = String>,
) -> Result<Option<Option<PathBuf>>, String> {
    let mut config_path = None;
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let value = args.next().ok_or("--config requires a value")?;
                config_path = Some(PathBuf::from(value));
            }
            "--help" | "-h" => return Ok(None),
            unknown => return Err(format!("Unknown argument: {unknown}\n\n{USAGE}")),
        }
    }
    Ok(Some(config_path))
}
