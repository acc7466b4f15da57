//! huecraft - Cook, transform and name color palettes
//!
//! This is the main entry point for the huecraft command-line tool.

use anyhow::{bail, Context};
use serde_json::json;
use std::time::Instant;
use tracing::{error, info};

use huecraft::config::Command;
use huecraft::{
    cook, init_tracing, log_error, log_operation_end, log_operation_start, log_registration_stats,
    log_timed_operation, Bounds, CategoryLegend, ColorbarLayout, Config, CookOptions, Extend,
    LegendSpec, PaletteRegistry, Recipe,
};

fn main() -> anyhow::Result<()> {
    // Load configuration
    let (config, command) = Config::load().context("failed to load configuration")?;

    init_tracing(&config.log_level);

    // Validate configuration
    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    info!("Starting huecraft v{}", env!("CARGO_PKG_VERSION"));

    let registry = PaletteRegistry::global();
    let registered = log_timed_operation("register_palettes", || config.register_palettes(registry))
        .context("failed to register configured palettes")?;
    if !registered.is_empty() {
        log_registration_stats(&registered, registry.len());
    }

    let start = Instant::now();
    log_operation_start(command_name(&command), None);
    let result = run(&config, command.clone(), registry);
    if let Err(err) = &result {
        if let Some(lib_err) = err.downcast_ref::<huecraft::HuecraftError>() {
            log_error(lib_err, command_name(&command));
        }
    }
    log_operation_end(command_name(&command), start, result.is_ok());

    let output = result?;
    let rendered = if config.output.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{rendered}");
    Ok(())
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Show { .. } => "show",
        Command::Legend { .. } => "legend",
        Command::List => "list",
        Command::Cook { .. } => "cook",
    }
}

fn run(config: &Config, command: Command, registry: &PaletteRegistry) -> anyhow::Result<serde_json::Value> {
    let model = config.output.color_model;

    match command {
        Command::Show {
            source,
            num_colors,
            reverse,
        } => {
            let options = CookOptions {
                num_colors,
                reverse,
                ..CookOptions::default()
            };
            let palette = cook(source.as_str().into(), &options, registry)
                .with_context(|| format!("cannot build palette '{source}'"))?;
            Ok(json!({
                "name": palette.name(),
                "num_colors": palette.len(),
                "color_model": model,
                "colors": palette.to_model(model).to_json(),
            }))
        }
        Command::Legend {
            source,
            ticks,
            range,
            labels,
            center,
            extend,
            clip,
            proportional,
            category,
        } => {
            let bounds = match (ticks, range) {
                (Some(ticks), _) => Bounds::Ticks(ticks),
                (None, Some(range)) => Bounds::range(range[0], range[1], range.get(2).copied()),
                (None, None) => bail!("either --ticks or --range is required"),
            };
            let mut spec = LegendSpec::new(bounds)
                .uniform_spacing(!proportional)
                .extend(extend.parse::<Extend>()?);
            spec.labels = labels;
            spec.center = center;
            spec.clip = clip;

            let palette = cook(source.as_str().into(), &CookOptions::default(), registry)
                .with_context(|| format!("cannot build palette '{source}'"))?;
            if category {
                let legend = CategoryLegend::new(&palette, &spec)?;
                Ok(serde_json::to_value(legend.settings())?)
            } else {
                Ok(ColorbarLayout::new(&palette, &spec)?.summary())
            }
        }
        Command::List => Ok(json!(registry.names())),
        Command::Cook { recipe } => {
            let recipe = Recipe::from_file(&recipe)
                .with_context(|| format!("cannot read recipe {}", recipe.display()))?;
            let palette = recipe.cook(registry)?;
            Ok(json!({
                "name": palette.name(),
                "num_colors": palette.len(),
                "color_model": model,
                "colors": palette.to_model(model).to_json(),
            }))
        }
    }
}
