use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use log::info;
use transform3d::config::{DEFAULT_CONFIG_FILE, OutputFormat, Transform3dConfig};
use transform3d::{build_list, format_sample, sample};

const USAGE: &str = "usage: transform3d [--config=PATH] [--steps=N] [--format=text|matrix|both]";

/// Command line overrides, applied on top of the config file and environment.
#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    config: Option<PathBuf>,
    steps: Option<u32>,
    format: Option<OutputFormat>,
    help: bool,
}

impl CliArgs {
    fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self> {
        let mut parsed = Self::default();
        for arg in args {
            if arg == "--help" || arg == "-h" {
                parsed.help = true;
            } else if let Some(path) = arg.strip_prefix("--config=") {
                parsed.config = Some(PathBuf::from(path));
            } else if let Some(steps) = arg.strip_prefix("--steps=") {
                let steps = steps
                    .parse()
                    .with_context(|| format!("invalid --steps value {steps:?}"))?;
                parsed.steps = Some(steps);
            } else if let Some(format) = arg.strip_prefix("--format=") {
                match OutputFormat::parse(format) {
                    Some(format) => parsed.format = Some(format),
                    None => bail!("invalid --format value {format:?}\n{USAGE}"),
                }
            } else {
                bail!("unknown argument {arg:?}\n{USAGE}");
            }
        }
        Ok(parsed)
    }
}

fn load_config(args: &CliArgs) -> Result<Transform3dConfig> {
    let mut config = match &args.config {
        // An explicit path must exist and parse.
        Some(path) => Transform3dConfig::load_from_file(path)?,
        None => Transform3dConfig::load_or_default(DEFAULT_CONFIG_FILE),
    };
    config.merge_with_env();

    if let Some(steps) = args.steps {
        config.sampling.steps = steps;
    }
    if let Some(format) = args.format {
        config.output.format = format;
    }
    Ok(config)
}

fn init_logging(config: &Transform3dConfig) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(filter) = &config.log.filter {
        builder.parse_filters(filter);
    }
    let _ = builder.try_init();
}

fn main() -> Result<()> {
    let args = CliArgs::parse(std::env::args().skip(1))?;
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }

    let config = load_config(&args)?;
    init_logging(&config);

    let from = build_list(&config.animation.from);
    let to = build_list(&config.animation.to);
    let plan = from.interpolation(&to);
    info!(
        "interpolating {} -> {} operations ({:?}, {} planned)",
        from.len(),
        to.len(),
        plan.matching(),
        plan.len()
    );

    for point in sample(&plan, &config.sampling.progress_values()) {
        println!("{}", format_sample(&point, &config.output));
    }

    Ok(())
}
