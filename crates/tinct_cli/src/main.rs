//! Tinct CLI
//!
//! Convert token colors and render derived themes from the command line.

mod edits;
mod storage;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use tinct_color::{hex_to_oklch, invert_lightness, oklch_to_hex, Rgb8};
use tinct_theme::{ColorScheme, EditorConfig, MemoryStyleRoot, ThemeEditor};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::edits::EditsFile;
use crate::storage::DirectoryStorage;

#[derive(Parser)]
#[command(name = "tinct")]
#[command(
    author,
    version,
    about = "Design-token color tools and theme rendering",
    long_about = None
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Editor config file (tinct.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert #RRGGBB to oklch() or oklch() to #RRGGBB
    Convert {
        /// Color value
        value: String,
    },

    /// Derive the other scheme's value by mirroring OKLCH lightness
    Invert {
        /// oklch() value
        value: String,

        /// Offset added to the mirrored lightness (defaults to the config value)
        #[arg(long, allow_hyphen_values = true)]
        offset: Option<f64>,
    },

    /// List the editable token names
    Tokens,

    /// Apply an edits file to a base theme and save the diff as a new theme
    Save {
        /// Id of the base theme the edits are made against
        #[arg(long)]
        base_id: String,

        /// Base theme stylesheet (`:root` and `.dark` rules)
        #[arg(long)]
        base: PathBuf,

        /// Edits file (TOML, `[[edit]]` entries)
        #[arg(long)]
        edits: PathBuf,

        /// Display name of the new theme
        #[arg(long)]
        name: String,

        /// Optional description
        #[arg(long)]
        description: Option<String>,

        /// Scheme the edits are previewed in
        #[arg(long, value_enum, default_value_t = SchemeArg::Light)]
        scheme: SchemeArg,

        /// Directory the theme record is written to
        #[arg(short, long, default_value = "themes")]
        out: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SchemeArg {
    Light,
    Dark,
}

impl From<SchemeArg> for ColorScheme {
    fn from(arg: SchemeArg) -> Self {
        match arg {
            SchemeArg::Light => ColorScheme::Light,
            SchemeArg::Dark => ColorScheme::Dark,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Convert { value } => {
            println!("{}", convert(&value));
        }
        Commands::Invert { value, offset } => {
            let offset = offset.unwrap_or(config.inversion_offset);
            let inverted = invert_lightness(&value, offset)
                .with_context(|| format!("`{value}` is not an oklch() color"))?;
            println!("{inverted}");
        }
        Commands::Tokens => {
            let registry = config.registry();
            debug!("Token registry v{}", registry.version());
            for name in registry.iter() {
                println!("{name}");
            }
        }
        Commands::Save {
            base_id,
            base,
            edits,
            name,
            description,
            scheme,
            out,
        } => {
            let id = cmd_save(
                config,
                &base_id,
                &base,
                &edits,
                &name,
                description.as_deref(),
                scheme.into(),
                &out,
            )?;
            println!("{id}");
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<EditorConfig> {
    match path {
        Some(path) => EditorConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(EditorConfig::default()),
    }
}

/// Hex goes to oklch(), everything else is treated as oklch()
fn convert(value: &str) -> String {
    if Rgb8::from_hex(value).is_ok() {
        hex_to_oklch(value)
    } else {
        oklch_to_hex(value)
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_save(
    config: EditorConfig,
    base_id: &str,
    base: &Path,
    edits: &Path,
    name: &str,
    description: Option<&str>,
    scheme: ColorScheme,
    out: &Path,
) -> Result<String> {
    let base_css = fs::read_to_string(base)
        .with_context(|| format!("Failed to read {}", base.display()))?;
    let edits = EditsFile::load(edits)?;

    let mut root = MemoryStyleRoot::new();
    let loaded = root.apply_stylesheet(&base_css);
    info!("Loaded {} declarations from base theme {}", loaded, base_id);

    let mut editor = ThemeEditor::with_config(root, config);
    editor.observe_theme(Some(base_id));

    for edit in &edits.edit {
        editor
            .preview_token(
                &edit.token,
                edit.light.as_deref(),
                edit.dark.as_deref(),
                scheme,
            )
            .with_context(|| format!("Invalid edit for {}", edit.token))?;
    }

    let storage = DirectoryStorage::new(out);
    let id = pollster::block_on(editor.save_as_new_theme(&storage, name, description))?;
    info!("Saved theme {} to {}", id, out.display());
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn convert_picks_direction_from_input() {
        assert_eq!(convert("#808080"), "oklch(0.6 0 0)");
        assert_eq!(convert("oklch(1 0 0)"), "#FFFFFF");
        assert_eq!(convert("garbage"), tinct_color::FALLBACK_HEX);
    }

    #[test]
    fn cli_parses_save_command() {
        let cli = Cli::try_parse_from([
            "tinct", "save", "--base-id", "neutral", "--base", "base.css", "--edits",
            "edits.toml", "--name", "Sunset", "--scheme", "dark",
        ])
        .unwrap();
        match cli.command {
            Commands::Save { name, scheme, out, .. } => {
                assert_eq!(name, "Sunset");
                assert_eq!(ColorScheme::from(scheme), ColorScheme::Dark);
                assert_eq!(out, PathBuf::from("themes"));
            }
            _ => panic!("expected save"),
        }
    }

    #[test]
    fn save_writes_a_sparse_theme_record() {
        let dir = std::env::temp_dir().join(format!("tinct-cli-save-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let base = dir.join("base.css");
        let edits = dir.join("edits.toml");
        fs::write(
            &base,
            ":root { --primary: oklch(0.205 0 0); --border: oklch(0.922 0 0); }\n\
             .dark { --primary: oklch(0.922 0 0); --border: oklch(1 0 0 / 10%); }\n",
        )
        .unwrap();
        fs::write(
            &edits,
            "[[edit]]\n\
             token = \"--primary\"\n\
             light = \"oklch(0.6 0.2 30)\"\n\
             dark = \"oklch(0.4 0.2 30)\"\n",
        )
        .unwrap();

        let out = dir.join("themes");
        let id = cmd_save(
            EditorConfig::default(),
            "neutral",
            &base,
            &edits,
            "Sunset",
            None,
            ColorScheme::Light,
            &out,
        )
        .unwrap();
        assert_eq!(id, "sunset");

        let record: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out.join("sunset.json")).unwrap()).unwrap();
        assert_eq!(
            record["lightCSS"],
            "[data-theme=\"sunset\"] {\n  --primary: oklch(0.6 0.2 30);\n}"
        );
        assert_eq!(record["baseThemeId"], "neutral");

        fs::remove_dir_all(&dir).ok();
    }
}
