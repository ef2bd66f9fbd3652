use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SystemThemeArg {
    Dark,
    Light,
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render the profile card index page.
    Render(RenderArgs),
    /// Load a page, run the theme and search behaviors on it, and write the result.
    Apply(ApplyArgs),
    /// Add one profile to the profile list.
    Add(AddArgs),
    /// Seed the profile list with the legacy profiles.
    ImportLegacy(ImportLegacyArgs),
}

#[derive(Debug, ClapArgs)]
pub struct RenderArgs {
    /// Profile list JSON file (`{"profiles": [...]}`).
    #[arg(long)]
    pub input: PathBuf,

    /// Output HTML file.
    #[arg(long, default_value = "index.html")]
    pub out: PathBuf,

    /// Page title.
    #[arg(long, default_value = "Profiles")]
    pub title: String,
}

#[derive(Debug, ClapArgs)]
pub struct ApplyArgs {
    /// HTML page to operate on.
    #[arg(long)]
    pub page: PathBuf,

    /// Where to write the resulting HTML. Defaults to stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// JSON file holding the persisted theme preference.
    #[arg(long, default_value = "theme.json")]
    pub store: PathBuf,

    /// System dark-mode preference. Omit to behave as if the platform cannot tell.
    #[arg(long, value_enum)]
    pub system_theme: Option<SystemThemeArg>,

    /// Number of clicks on the theme toggle after load.
    #[arg(long, default_value_t = 0)]
    pub toggle: usize,

    /// Search input values, applied in order as separate input events.
    #[arg(long)]
    pub query: Vec<String>,
}

#[derive(Debug, ClapArgs)]
pub struct AddArgs {
    /// Profile list JSON file. Created if missing.
    #[arg(long, default_value = "profiles.json")]
    pub list: PathBuf,

    /// Display name (required, at most 200 characters).
    #[arg(long)]
    pub name: String,

    /// Role shown under the name (required, at most 200 characters).
    #[arg(long)]
    pub title: String,

    /// Free-form description (required).
    #[arg(long)]
    pub description: String,

    /// Avatar image path or URL, used as-is in the rendered page.
    #[arg(long)]
    pub avatar: Option<String>,
}

#[derive(Debug, ClapArgs)]
pub struct ImportLegacyArgs {
    /// Profile list JSON file. Created if missing.
    #[arg(long, default_value = "profiles.json")]
    pub list: PathBuf,

    /// Directory holding the legacy avatar images.
    #[arg(long, default_value = "images")]
    pub images: PathBuf,

    /// Directory that receives `avatars/`. Defaults to the list's directory.
    #[arg(long)]
    pub media: Option<PathBuf>,

    /// Delete existing profiles with the same name and recreate them.
    #[arg(long)]
    pub force: bool,
}
