#![deny(missing_docs)]

//! Demo entry point: classify one hardcoded flower and print class probabilities.
use std::path::PathBuf;

use iris_classifier::{ClassifierConfig, FlowerClassifier, Prediction, logging};

/// Sample flower scored by the demo, in `predict` argument order
/// (petal width, petal length, sepal width, sepal length).
const SAMPLE: (f32, f32, f32, f32) = (2.0, 4.3, 0.1, 1.0);

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let Some(options) = parse_args(std::env::args().skip(1))? else {
        println!("{}", help_text());
        return Ok(());
    };

    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let mut config =
        ClassifierConfig::resolve(options.config_path.as_deref()).map_err(|err| err.to_string())?;
    if let Some(model_path) = options.model_path {
        config.model_path = model_path;
    }

    let classifier = FlowerClassifier::load(&config).map_err(|err| err.to_string())?;
    let (petal_width, petal_length, sepal_width, sepal_length) = SAMPLE;
    let probabilities = classifier
        .predict(petal_width, petal_length, sepal_width, sepal_length)
        .map_err(|err| err.to_string())?;

    let prediction = Prediction::new(config.class_names.as_slice(), &probabilities);
    if let Some(top) = prediction.top() {
        tracing::info!("Most likely species: {}", top.class_name);
    }
    for line in prediction.lines() {
        println!("{line}");
    }
    Ok(())
}

#[derive(Debug, Default, PartialEq)]
struct CliOptions {
    model_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
}

/// Returns `Ok(None)` when help was requested.
fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Option<CliOptions>, String> {
    let mut options = CliOptions::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--model" => {
                let value = args.next().ok_or("--model requires a value")?;
                options.model_path = Some(PathBuf::from(value));
            }
            "--config" => {
                let value = args.next().ok_or("--config requires a value")?;
                options.config_path = Some(PathBuf::from(value));
            }
            "--help" | "-h" => return Ok(None),
            unknown => {
                return Err(format!("Unknown argument: {unknown}\n\n{}", help_text()));
            }
        }
    }
    Ok(Some(options))
}

fn help_text() -> String {
    [
        "iris-classifier",
        "",
        "Classify a sample iris flower with an ONNX model.",
        "",
        "Usage:",
        "  iris-classifier [--model <path>] [--config <toml>]",
        "",
        "Options:",
        "  --model <path>   ONNX model to load (default: model.onnx).",
        "  --config <toml>  TOML settings file; IRIS_MODEL_PATH and IRIS_DEVICE still apply.",
        "  -h, --help       Show this help text.",
    ]
    .join("\n")
}
