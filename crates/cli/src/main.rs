#![deny(unsafe_code)]
//! CLI binary for the dotfield animated dot simulator.
//!
//! Subcommands:
//! - `render <field>` — simulate N frames, write a PNG snapshot
//! - `list` — print available fields and palettes

mod error;

use clap::{Parser, Subcommand};
use dotfield_core::{Config, Mode, Palette, SceneState};
use dotfield_fields::FieldKind;
use dotfield_sim::Simulation;
use error::CliError;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "dotfield", about = "Animated dot field simulator CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Simulate a dot field for N frames and write a PNG snapshot.
    Render {
        /// Field name (e.g. "curl_noise").
        field: String,

        /// Placement mode: "layered" or "grid".
        #[arg(short, long, default_value = "layered")]
        mode: String,

        /// Canvas width in pixels.
        #[arg(short = 'W', long, default_value_t = 800)]
        width: usize,

        /// Canvas height in pixels.
        #[arg(short = 'H', long, default_value_t = 600)]
        height: usize,

        /// Number of simulated frames.
        #[arg(short, long, default_value_t = 300)]
        steps: usize,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Built-in palette applied to every layer
        /// (ocean, neon, ember, monochrome).
        #[arg(short, long)]
        palette: Option<String>,

        /// Full configuration as a JSON string; flags override it.
        #[arg(short, long, default_value = "{}")]
        config: String,

        /// Output file path.
        #[arg(short, long, default_value = "output.png")]
        output: PathBuf,
    },
    /// List available fields and palettes.
    List,
}

fn parse_mode(name: &str) -> Result<Mode, CliError> {
    match name {
        "layered" => Ok(Mode::Layered),
        "grid" => Ok(Mode::Grid),
        other => Err(CliError::Input(format!(
            "invalid --mode {other:?}: expected \"layered\" or \"grid\""
        ))),
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let fields = FieldKind::list_fields();
            let palettes = Palette::list_names();
            if cli.json {
                let info = serde_json::json!({
                    "fields": fields,
                    "palettes": palettes,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Fields:");
                for name in fields {
                    println!("  {name}");
                }
                println!("Palettes:");
                println!("  {}", palettes.join(", "));
            }
        }
        Command::Render {
            field,
            mode,
            width,
            height,
            steps,
            seed,
            palette,
            config,
            output,
        } => {
            let mut config: Config = serde_json::from_str(&config)
                .map_err(|e| CliError::Input(format!("invalid --config JSON: {e}")))?;
            config.field = field.clone();
            config.mode = parse_mode(&mode)?;

            if let Some(name) = palette {
                let palette =
                    Palette::from_name(&name).map_err(|e| CliError::Input(e.to_string()))?;
                for layer in &mut config.layers {
                    layer.palette = palette.colors().to_vec();
                }
            }

            if width == 0 || height == 0 {
                return Err(CliError::Core(dotfield_core::CoreError::InvalidDimensions));
            }

            // Reject unknown field keys here; the tick loop would
            // silently freeze on them.
            FieldKind::from_config(&config.field, &config)?;

            let scene = SceneState::recompute(&config, width as f64, height as f64);
            let dt_secs = scene.frame_interval_ms() / 1000.0;

            let mut sim = Simulation::new(&config, &scene, seed);
            for _ in 0..steps {
                sim.step(&config, &scene, dt_secs);
            }

            dotfield_sim::snapshot::write_png(&output, sim.dots(), &config, &scene)?;

            if cli.json {
                let info = serde_json::json!({
                    "field": field,
                    "mode": mode,
                    "width": width,
                    "height": height,
                    "steps": steps,
                    "seed": seed,
                    "dots": sim.dots().len(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {field} ({width}x{height}, {steps} frames, seed {seed}, {} dots) -> {}",
                    sim.dots().len(),
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_names_parse() {
        assert!(matches!(parse_mode("layered"), Ok(Mode::Layered)));
        assert!(matches!(parse_mode("grid"), Ok(Mode::Grid)));
        let err = parse_mode("spiral").err().expect("bad mode should be rejected");
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn cli_args_parse() {
        let cli = Cli::parse_from([
            "dotfield", "render", "vortex", "--mode", "grid", "-W", "320", "-H", "240",
            "--steps", "10", "--seed", "7",
        ]);
        match cli.command {
            Command::Render {
                field,
                mode,
                width,
                height,
                steps,
                seed,
                ..
            } => {
                assert_eq!(field, "vortex");
                assert_eq!(mode, "grid");
                assert_eq!(width, 320);
                assert_eq!(height, 240);
                assert_eq!(steps, 10);
                assert_eq!(seed, 7);
            }
            Command::List => panic!("expected render"),
        }
    }
}
