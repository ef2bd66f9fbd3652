mod builtin;
mod cli;
mod html;
mod legacy;
mod page;
mod profile;
mod search;
mod store;
mod theme;

use std::path::Path;

use anyhow::Context as _;
use cli::{AddArgs, ApplyArgs, Command, ImportLegacyArgs, RenderArgs};

pub use cli::{
    AddArgs as CliAddArgs, ApplyArgs as CliApplyArgs, Args as CliArgs, Command as CliCommand,
    ImportLegacyArgs as CliImportLegacyArgs, RenderArgs as CliRenderArgs, SystemThemeArg,
};
pub use legacy::{ImportOptions, ImportReport, LEGACY_PROFILES, LegacyProfile};
pub use page::{CardHandle, FixedSystemTheme, Page};
pub use profile::{NAME_MAX_CHARS, NewProfile, Profile, ProfileList, TITLE_MAX_CHARS};
pub use search::{
    CardDisplay, CardFields, CardRecord, CardSearchFilter, CardSource, CardVisibility, normalize,
};
pub use store::{FileStore, MemoryStore};
pub use theme::{
    PreferenceKey, PreferenceStore, SystemTheme, ThemeController, ThemeMode, ThemePreference,
    ThemeTarget,
};

pub fn run(args: CliArgs) -> anyhow::Result<()> {
    match args.command {
        Command::Render(args) => render(&args),
        Command::Apply(args) => apply(&args),
        Command::Add(args) => add(&args),
        Command::ImportLegacy(args) => import_legacy(&args),
    }
}

fn render(args: &RenderArgs) -> anyhow::Result<()> {
    let list = ProfileList::read(&args.input)?;

    let profiles = list.newest_first();
    tracing::info!(count = profiles.len(), "rendering profile cards");
    let html = html::build_index_html(&args.title, &profiles);

    if let Some(parent) = args.out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }
    }
    std::fs::write(&args.out, html).with_context(|| format!("write {}", args.out.display()))?;
    Ok(())
}

fn apply(args: &ApplyArgs) -> anyhow::Result<()> {
    let source = std::fs::read_to_string(&args.page)
        .with_context(|| format!("read {}", args.page.display()))?;
    let mut page = Page::parse(&source);

    let system = FixedSystemTheme(args.system_theme.map(|t| matches!(t, SystemThemeArg::Dark)));
    let store = FileStore::open(&args.store);
    let mut theme = ThemeController::initialize(&system, store, &mut page);

    if args.toggle > 0 && !theme.toggle_enabled() {
        tracing::warn!(clicks = args.toggle, "page has no theme toggle; ignoring clicks");
    }
    for _ in 0..args.toggle {
        if let Some(mode) = theme.on_toggle_click(&mut page) {
            tracing::debug!(mode = mode.as_str(), "theme toggled");
        }
    }

    match CardSearchFilter::initialize(&page) {
        Some(filter) => {
            for query in &args.query {
                page.set_search_value(query);
                filter.on_input(query, &mut page);
                tracing::debug!(
                    query = %query,
                    visible = filter.visible(query).count(),
                    total = filter.records().len(),
                    "filtered cards"
                );
            }
        }
        None if !args.query.is_empty() => {
            tracing::warn!("page has no search input; ignoring queries");
        }
        None => {}
    }

    let html = page.to_html()?;
    match &args.out {
        Some(out) => {
            std::fs::write(out, html).with_context(|| format!("write {}", out.display()))?
        }
        None => {
            use std::io::Write as _;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(html.as_bytes()).context("write stdout")?;
            stdout.flush().context("flush stdout")?;
        }
    }
    Ok(())
}

fn add(args: &AddArgs) -> anyhow::Result<()> {
    let mut list = ProfileList::read_or_default(&args.list)?;
    let profile = NewProfile {
        name: args.name.clone(),
        title: args.title.clone(),
        description: args.description.clone(),
        avatar: args.avatar.clone(),
    }
    .validate(chrono::Utc::now())?;

    tracing::info!(name = %profile.name, "adding profile");
    list.profiles.push(profile);
    list.write(&args.list)
}

fn import_legacy(args: &ImportLegacyArgs) -> anyhow::Result<()> {
    let mut list = ProfileList::read_or_default(&args.list)?;
    let media_dir = match &args.media {
        Some(dir) => dir.as_path(),
        None => args
            .list
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new(".")),
    };

    let report = legacy::import(
        &mut list,
        LEGACY_PROFILES,
        &ImportOptions {
            images_dir: &args.images,
            media_dir,
            force: args.force,
            now: chrono::Utc::now(),
        },
    )?;
    list.write(&args.list)?;

    println!(
        "Import finished. Created: {}, skipped: {}",
        report.created, report.skipped
    );
    Ok(())
}
