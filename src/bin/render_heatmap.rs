use std::fs;
use std::path::PathBuf;

use heatmap_rs::api::{DatasetSource, HeatmapEngine, LayoutConfig, LoaderConfig, load_dataset};
use heatmap_rs::core::{RecordKey, Viewport};
use heatmap_rs::render::{SvgRenderer, render_error_banner};
use heatmap_rs::telemetry::init_default_tracing;
use heatmap_rs::HeatmapResult;

const DEFAULT_OUTPUT_PATH: &str = "heatmap.svg";
const USAGE: &str = "usage: render_heatmap [--input <file.json> | --url <url>] \
[--output <file.svg>] [--config <layout.json>] [--hover <year>:<month>] [--timeout <secs>]";

#[derive(Debug)]
struct CliArgs {
    source: DatasetSource,
    output_path: PathBuf,
    config_path: Option<PathBuf>,
    hover: Option<RecordKey>,
    timeout_secs: Option<u64>,
}

fn main() {
    let _ = init_default_tracing();

    let args = match parse_args() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("error: {err}\n{USAGE}");
            std::process::exit(2);
        }
    };

    if let Err(err) = run(&args) {
        eprintln!("error: {err}");
        let banner = render_error_banner(Viewport::new(1400, 80), &err.to_string());
        if let Err(write_err) = fs::write(&args.output_path, banner) {
            eprintln!(
                "error: failed to write error banner `{}`: {write_err}",
                args.output_path.display()
            );
        }
        std::process::exit(1);
    }
}

fn run(args: &CliArgs) -> HeatmapResult<()> {
    let layout = match &args.config_path {
        Some(path) => LayoutConfig::from_json_file(path)?,
        None => LayoutConfig::default(),
    };
    let loader = LoaderConfig {
        timeout_secs: args.timeout_secs,
        ..LoaderConfig::default()
    };

    let dataset = load_dataset(&args.source, &loader)?;
    let mut engine = HeatmapEngine::new(SvgRenderer::new(), layout)?;
    engine.set_dataset(dataset)?;
    if let Some(key) = args.hover {
        engine.hover_cell(key)?;
    }
    engine.render()?;

    engine.renderer().write_to(&args.output_path)?;
    println!(
        "wrote {} cells to {}",
        engine.scene().len(),
        args.output_path.display()
    );
    Ok(())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut source = DatasetSource::reference();
    let mut output_path = PathBuf::from(DEFAULT_OUTPUT_PATH);
    let mut config_path = None;
    let mut hover = None;
    let mut timeout_secs = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value = |flag: &str| {
            args.next()
                .ok_or_else(|| format!("missing value for {flag}"))
        };
        match arg.as_str() {
            "--input" => source = DatasetSource::File(PathBuf::from(value("--input")?)),
            "--url" => source = DatasetSource::Url(value("--url")?),
            "--output" => output_path = PathBuf::from(value("--output")?),
            "--config" => config_path = Some(PathBuf::from(value("--config")?)),
            "--hover" => hover = Some(parse_hover(&value("--hover")?)?),
            "--timeout" => {
                let raw = value("--timeout")?;
                timeout_secs = Some(
                    raw.parse::<u64>()
                        .map_err(|e| format!("invalid --timeout `{raw}`: {e}"))?,
                );
            }
            "--help" | "-h" => return Err("help requested".to_owned()),
            other => return Err(format!("unknown argument `{other}`")),
        }
    }

    Ok(CliArgs {
        source,
        output_path,
        config_path,
        hover,
        timeout_secs,
    })
}

fn parse_hover(raw: &str) -> Result<RecordKey, String> {
    let (year, month) = raw
        .split_once(':')
        .ok_or_else(|| format!("--hover expects <year>:<month>, got `{raw}`"))?;
    let year = year
        .parse::<i32>()
        .map_err(|e| format!("invalid hover year `{year}`: {e}"))?;
    let month = month
        .parse::<u8>()
        .map_err(|e| format!("invalid hover month `{month}`: {e}"))?;
    Ok(RecordKey::new(year, month))
}
