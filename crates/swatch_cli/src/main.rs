//! Swatch CLI - command-line editor for theme design tokens
//!
//! Every invocation restores the persisted theme document, replays it into
//! a headless engine, applies one edit, and lets the engine persist the
//! result.

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use swatch_theme::skins::get_skin;
use swatch_theme::{
    resolve_color_reference, validate_typography, AliasRole, ExportOutcome, InteractionState,
    LayerField, NullView, ShadeKey, ShadeShifts, SkinCategory, ThemeBuilder, TypographyPath,
};
use tracing_subscriber::EnvFilter;

/// Derive and edit theme design tokens
#[derive(Parser, Debug)]
#[command(name = "swatch")]
#[command(about = "Derive OKLCH shade ramps, shadows and CSS design tokens")]
#[command(version)]
struct Cli {
    /// Config file or directory containing swatch.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the persisted theme document
    #[arg(short, long, global = true)]
    store: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the theme document as JSON
    Show,

    /// Print the generated @theme CSS block
    Css,

    /// Write the generated CSS through the export chain
    Export {
        /// Output directory
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// Print the effective configuration
    Config,

    /// Set a site color (palette or simple color)
    SetColor { name: String, color: String },

    /// Move a palette's base shade
    BaseShade { palette: String, shade: ShadeKey },

    /// Override the shifts of one shade
    Shift {
        palette: String,
        shade: ShadeKey,
        /// Lightness multiplier
        l: f32,
        /// Chroma multiplier
        c: f32,
        /// Hue offset in degrees
        #[arg(allow_hyphen_values = true)]
        h: f32,
    },

    /// Restore a palette's default base shade and shifts
    ResetShades { palette: String },

    /// Point an alias role at a shade
    Alias {
        palette: String,
        role: AliasRole,
        shade: ShadeKey,
    },

    /// Set the site border radius
    Radius { value: String },

    /// Set a typography value, e.g. `desktop.body.font_size 17` or `weights.bold 650`
    Typography { path: TypographyPath, value: u32 },

    /// Set an animation timing in seconds
    Animation { name: String, seconds: f32 },

    /// Edit the site shadow
    Shadow {
        #[command(subcommand)]
        action: ShadowAction,
    },

    /// Read or write skin colors
    Skin {
        #[command(subcommand)]
        action: SkinAction,
    },

    /// Resolve a color reference to a concrete color
    Resolve { value: String },

    /// Report suspicious typography values
    Check,

    /// Clear the stored theme and return to defaults
    Reset,
}

#[derive(Subcommand, Debug)]
enum ShadowAction {
    /// Replace the whole shadow with a composite value
    Set { value: String },
    /// Append a default layer
    Add,
    /// Remove a layer
    Remove { index: usize },
    /// Show or hide a layer
    Toggle { index: usize },
    /// Edit one layer's fields
    Edit {
        index: usize,
        #[arg(long, allow_hyphen_values = true)]
        x: Option<i32>,
        #[arg(long, allow_hyphen_values = true)]
        y: Option<i32>,
        #[arg(long)]
        blur: Option<i32>,
        #[arg(long, allow_hyphen_values = true)]
        spread: Option<i32>,
        /// Named shadow color
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        opacity: Option<f32>,
        #[arg(long)]
        inset: Option<bool>,
    },
    /// List layers
    List,
}

#[derive(Subcommand, Debug)]
enum SkinAction {
    /// Print a skin as JSON
    Get { name: String },
    /// Set one skin color
    Set {
        name: String,
        category: SkinCategory,
        state: InteractionState,
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut engine = config::resolve(cli.config.as_deref(), cli.store)?;
    if let Commands::Export { dir: Some(dir) } = &cli.command {
        engine.export.dir = Some(dir.clone());
    }

    let mut builder = ThemeBuilder::from_config(&engine, NullView);
    builder.start();

    run(&mut builder, cli.command, &engine)?;
    builder.flush();
    Ok(())
}

fn run(
    builder: &mut ThemeBuilder,
    command: Commands,
    engine: &swatch_theme::EngineConfig,
) -> Result<()> {
    let now = Instant::now();

    match command {
        Commands::Show => {
            let json = builder
                .document()
                .to_json_pretty()
                .context("Failed to serialize theme document")?;
            println!("{json}");
        }
        Commands::Css => print!("{}", builder.css()),
        Commands::Export { .. } => match builder.export_css() {
            ExportOutcome::Saved(path) => tracing::info!("Exported CSS to {}", path.display()),
            ExportOutcome::Inline(css) => print!("{css}"),
        },
        Commands::Config => print!("{}", config::to_toml(engine)?),
        Commands::SetColor { name, color } => {
            builder.select_color(&name, &color);
            tracing::info!("{} set to {}", name, color);
        }
        Commands::BaseShade { palette, shade } => {
            builder.set_base_shade(&palette, shade)?;
            tracing::info!("{} base shade is now {}", palette, shade);
        }
        Commands::Shift {
            palette,
            shade,
            l,
            c,
            h,
        } => {
            if !builder.set_shifts(&palette, shade, ShadeShifts::new(l, c, h), now)? {
                anyhow::bail!("{shade} is the base shade of {palette} and has no shifts");
            }
        }
        Commands::ResetShades { palette } => builder.reset_shades(&palette)?,
        Commands::Alias {
            palette,
            role,
            shade,
        } => builder.set_alias(&palette, role, shade)?,
        Commands::Radius { value } => builder.set_radius(&value),
        Commands::Typography { path, value } => builder.set_typography(path, value),
        Commands::Animation { name, seconds } => builder.set_animation(&name, seconds),
        Commands::Shadow { action } => shadow(builder, action, now)?,
        Commands::Skin { action } => match action {
            SkinAction::Get { name } => {
                let skin = get_skin(builder.document(), &name);
                println!("{}", serde_json::to_string_pretty(&skin)?);
            }
            SkinAction::Set {
                name,
                category,
                state,
                value,
            } => builder.set_skin_color(&name, category, state, &value),
        },
        Commands::Resolve { value } => {
            println!("{}", resolve_color_reference(builder.document(), &value));
        }
        Commands::Check => {
            let warnings = validate_typography(builder.document());
            if warnings.is_empty() {
                tracing::info!("typography looks consistent");
            }
            for warning in warnings {
                println!("warning: {warning}");
            }
        }
        Commands::Reset => {
            builder.reset_theme();
            tracing::info!("theme reset to defaults");
        }
    }

    Ok(())
}

fn shadow(builder: &mut ThemeBuilder, action: ShadowAction, now: Instant) -> Result<()> {
    match action {
        ShadowAction::Set { value } => builder.set_shadow(&value, now),
        ShadowAction::Add => {
            let index = builder.add_shadow_layer(now);
            tracing::info!("added layer {}", index + 1);
        }
        ShadowAction::Remove { index } => builder.remove_shadow_layer(index, now)?,
        ShadowAction::Toggle { index } => {
            let visible = builder.toggle_shadow_layer(index, now)?;
            tracing::info!(
                "layer {} is now {}",
                index + 1,
                if visible { "visible" } else { "hidden" }
            );
        }
        ShadowAction::Edit {
            index,
            x,
            y,
            blur,
            spread,
            color,
            opacity,
            inset,
        } => {
            let fields = [
                x.map(LayerField::HorizontalOffset),
                y.map(LayerField::VerticalOffset),
                blur.map(LayerField::BlurRadius),
                spread.map(LayerField::SpreadRadius),
                color.map(LayerField::ColorName),
                opacity.map(LayerField::Opacity),
                inset.map(LayerField::Inset),
            ];
            for field in fields.into_iter().flatten() {
                builder.set_shadow_field(index, field, now)?;
            }
        }
        ShadowAction::List => {
            for (index, layer) in builder.shadow_layers().layers().iter().enumerate() {
                let marker = if layer.visible { ' ' } else { '-' };
                println!("{marker}{:>2}  {}", index, layer.shadow.to_css());
            }
            println!("   = {}", builder.shadow_layers().composite());
        }
    }
    Ok(())
}
