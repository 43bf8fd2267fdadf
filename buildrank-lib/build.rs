//! This build script validates the weights of the default configuration file (`default_config.toml`)

use ohno::{IntoAppError, bail};
use std::env;
use std::fs;
use std::process;

type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

/// Metric keys that must each carry a weight, in column order
const METRIC_KEYS: [&str; 16] = [
    "lines_of_code",
    "build_steps",
    "build_step_params",
    "build_extensions",
    "build_extension_params",
    "dependencies",
    "artifact_dependencies",
    "build_triggers",
    "project_extensions",
    "project_extension_params",
    "project_parameters",
    "pipeline_secrets",
    "project_secrets",
    "integrations",
    "unique_plugins",
    "plugin_data_subfolders",
];

fn main() {
    match inner_main() {
        Ok(()) => {
            println!("cargo:rerun-if-changed=default_config.toml");
            process::exit(0);
        }
        Err(e) => {
            eprintln!("unable to load default_config.toml: {e:?}");
            process::exit(1);
        }
    }
}

fn inner_main() -> Result<()> {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").into_app_err("CARGO_MANIFEST_DIR should be set during build")?;
    let text = fs::read_to_string(format!("{manifest_dir}/default_config.toml")).into_app_err("reading default_config.toml")?;
    let table: toml::Table = toml::from_str(&text).into_app_err("parsing default_config.toml")?;

    let Some(weights) = table
        .get("scoring")
        .and_then(toml::Value::as_table)
        .and_then(|scoring| scoring.get("weights"))
        .and_then(toml::Value::as_table)
    else {
        bail!("default_config.toml has no [scoring.weights] table");
    };

    for key in weights.keys() {
        if !METRIC_KEYS.contains(&key.as_str()) {
            bail!("unknown metric '{key}' in [scoring.weights]");
        }
    }

    let mut sum = 0.0;
    for key in METRIC_KEYS {
        let Some(weight) = weights.get(key).and_then(toml::Value::as_float) else {
            bail!("[scoring.weights] has no floating-point weight for '{key}'");
        };

        if !weight.is_finite() || weight < 0.0 {
            bail!("weight for '{key}' must be a finite, non-negative number, got {weight}");
        }

        sum += weight;
    }

    if sum <= 0.0 {
        bail!("[scoring.weights] must sum to a positive number");
    }

    Ok(())
}
