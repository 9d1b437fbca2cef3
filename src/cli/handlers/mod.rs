use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};

/// Global override for the data directory (set by -C flag)
static DATA_DIR_OVERRIDE: Mutex<Option<PathBuf>> = Mutex::new(None);

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io::{self, load_config};
use crate::io::data_dir;
use crate::io::recovery;
use crate::model::config::NotedConfig;
use crate::model::note::{FilterMode, Note, NoteId};
use crate::model::preferences::ThemeMode;
use crate::ops::export::export_notes;
use crate::ops::markdown::render_preview;
use crate::ops::note_store::{NoteError, NoteFields, NoteStore};
use crate::ops::query::visible_notes;
use crate::ops::stats::compute_stats;
use crate::session::preferences::{load_theme, save_theme};
use crate::view;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;

    // Store -C override for data_dir()
    if let Some(ref dir) = cli.data_dir {
        std::fs::create_dir_all(dir)
            .map_err(|e| format!("cannot create -C directory '{}': {}", dir, e))?;
        let abs = std::fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?;
        lock_override().replace(abs);
    }

    let ctx = Context::load()?;
    log::debug!("event=cli_start data_dir={}", ctx.data_dir.display());

    match cli.command {
        // No subcommand: launch the TUI
        None => crate::tui::run(&ctx.data_dir),
        Some(cmd) => match cmd {
            // Read commands
            Commands::List(args) => cmd_list(&ctx, args, json),
            Commands::Show(args) => cmd_show(&ctx, args, json),
            Commands::Stats => cmd_stats(&ctx, json),
            Commands::Preview(args) => cmd_preview(args, json),

            // Write commands
            Commands::Add(args) => cmd_add(&ctx, args, json),
            Commands::Edit(args) => cmd_edit(&ctx, args, json),
            Commands::Pin(args) => cmd_set_pinned(&ctx, args.id, true, json),
            Commands::Unpin(args) => cmd_set_pinned(&ctx, args.id, false, json),
            Commands::Delete(args) => cmd_delete(&ctx, args.id, json),
            Commands::Export(args) => cmd_export(&ctx, args, json),

            // Preferences and config
            Commands::Theme(args) => cmd_theme(&ctx, args, json),
            Commands::Category(args) => cmd_category(&ctx, args, json),

            // Maintenance
            Commands::Recovery(args) => cmd_recovery(&ctx, args, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn lock_override() -> std::sync::MutexGuard<'static, Option<PathBuf>> {
    DATA_DIR_OVERRIDE
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Data directory and config shared by every command
struct Context {
    data_dir: PathBuf,
    config: NotedConfig,
}

impl Context {
    fn load() -> Result<Context, Box<dyn std::error::Error>> {
        let explicit = lock_override().clone();
        let data_dir = data_dir::ensure_data_dir(explicit.as_deref())
            .map_err(|e| format!("cannot create data directory: {}", e))?;
        let config = load_config(&data_dir)?;
        start_logging(&data_dir, &config);
        Ok(Context { data_dir, config })
    }

    fn store(&self) -> Result<NoteStore, NoteError> {
        NoteStore::open(&self.data_dir)
    }
}

/// Start the file logger. Failure is reported and otherwise ignored.
fn start_logging(data_dir: &Path, config: &NotedConfig) {
    if let Err(e) = crate::logging::init_logging(&config.log.level, &data_dir::log_dir(data_dir)) {
        eprintln!("warning: logging disabled: {}", e);
    }
}

fn find_note(store: &NoteStore, id: NoteId) -> Result<&Note, NoteError> {
    store.get(id).ok_or(NoteError::NotFound(id))
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_note(note: &Note, verb: &str, json: bool) -> CmdResult {
    if json {
        print_json(note)
    } else {
        println!("{} {}", verb, note.id);
        Ok(())
    }
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date
fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| format!("invalid timestamp '{}' (expected RFC 3339 or YYYY-MM-DD)", s))
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(ctx: &Context, args: ListArgs, json: bool) -> CmdResult {
    let store = ctx.store()?;
    let filter = FilterMode::parse_filter(&args.filter);
    let query = args.search.unwrap_or_default();

    if json {
        let notes = visible_notes(store.notes(), &filter, &query);
        let page_title = filter.page_title();
        print_json(&NoteListJson {
            page_title: &page_title,
            count: notes.len(),
            notes,
        })
    } else {
        let projected = view::project(store.notes(), &filter, &query);
        for line in format_notes_view(&projected) {
            println!("{}", line);
        }
        Ok(())
    }
}

fn cmd_show(ctx: &Context, args: ShowArgs, json: bool) -> CmdResult {
    let store = ctx.store()?;
    let note = find_note(&store, args.id)?;
    let preview_html = args.preview.then(|| render_preview(&note.content));

    if json {
        print_json(&ShowJson { note, preview_html })
    } else {
        let body = preview_html.as_deref().unwrap_or(&note.content);
        for line in format_note(note, body) {
            println!("{}", line);
        }
        Ok(())
    }
}

fn cmd_stats(ctx: &Context, json: bool) -> CmdResult {
    let store = ctx.store()?;
    let stats = compute_stats(store.notes(), &ctx.config.notes.categories);

    if json {
        return print_json(&stats);
    }
    println!("{} notes, {} pinned", stats.total, stats.pinned);
    println!();
    let width = stats.categories.keys().map(|k| k.len()).max().unwrap_or(0);
    for (category, count) in &stats.categories {
        println!("  {:<width$}  {}", category, count, width = width);
    }
    if !stats.colors.is_empty() {
        println!();
        let width = stats.colors.keys().map(|k| k.len()).max().unwrap_or(0);
        for (color, count) in &stats.colors {
            println!("  {:<width$}  {}", color, count, width = width);
        }
    }
    Ok(())
}

fn cmd_preview(args: PreviewArgs, json: bool) -> CmdResult {
    let html = render_preview(&args.text);
    if json {
        print_json(&PreviewJson { html })
    } else {
        println!("{}", html);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(ctx: &Context, args: AddArgs, json: bool) -> CmdResult {
    let mut store = ctx.store()?;
    let fields = NoteFields {
        title: args.title,
        content: args.content,
        category: args
            .category
            .unwrap_or_else(|| ctx.config.notes.default_category.clone()),
        is_pinned: args.pin,
        color: args.color.unwrap_or_default(),
    };
    if !ctx.config.notes.is_category(&fields.category) {
        eprintln!(
            "warning: category '{}' is not in config.toml; it will not appear in the navigation bar",
            fields.category
        );
    }
    let note = store.create(fields)?;
    print_note(&note, "created", json)
}

fn cmd_edit(ctx: &Context, args: EditArgs, json: bool) -> CmdResult {
    let mut store = ctx.store()?;
    let mut fields = NoteFields::from_note(find_note(&store, args.id)?);
    if let Some(title) = args.title {
        fields.title = title;
    }
    if let Some(content) = args.content {
        fields.content = content;
    }
    if let Some(category) = args.category {
        fields.category = category;
    }
    if args.pin {
        fields.is_pinned = true;
    } else if args.unpin {
        fields.is_pinned = false;
    }
    if let Some(color) = args.color {
        fields.color = color;
    }
    let note = store.update(args.id, fields)?;
    print_note(&note, "updated", json)
}

fn cmd_set_pinned(ctx: &Context, id: NoteId, pinned: bool, json: bool) -> CmdResult {
    let mut store = ctx.store()?;
    let note = store.set_pinned(id, pinned)?;
    print_note(&note, if pinned { "pinned" } else { "unpinned" }, json)
}

fn cmd_delete(ctx: &Context, id: NoteId, json: bool) -> CmdResult {
    let mut store = ctx.store()?;
    let note = store.delete(id)?;
    if json {
        print_json(&DeletedJson { deleted: note.id })
    } else {
        println!("deleted {}", note.id);
        Ok(())
    }
}

fn cmd_export(ctx: &Context, args: ExportArgs, json: bool) -> CmdResult {
    let store = ctx.store()?;
    let dir = match args.output {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir()?,
    };
    let path = export_notes(store.notes(), &dir)
        .map_err(|e| format!("cannot write backup in '{}': {}", dir.display(), e))?;
    if json {
        print_json(&ExportJson {
            path: path.display().to_string(),
            count: store.len(),
        })
    } else {
        println!("exported {} notes to {}", store.len(), path.display());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Preferences and config
// ---------------------------------------------------------------------------

fn cmd_theme(ctx: &Context, args: ThemeArgs, json: bool) -> CmdResult {
    let current = load_theme(&ctx.data_dir);
    let theme = match args.action {
        None => current,
        Some(ThemeAction::Light) => ThemeMode::Light,
        Some(ThemeAction::Dark) => ThemeMode::Dark,
        Some(ThemeAction::Toggle) => current.toggled(),
    };
    if args.action.is_some() {
        save_theme(&ctx.data_dir, theme)?;
    }
    if json {
        print_json(&ThemeJson {
            theme: theme.as_str(),
        })
    } else {
        println!("{}", theme);
        Ok(())
    }
}

fn cmd_category(ctx: &Context, args: CategoryCmd, json: bool) -> CmdResult {
    let notes_config = &ctx.config.notes;
    let (name, adding) = match args.action.unwrap_or(CategoryAction::List) {
        CategoryAction::List => {
            if json {
                return print_json(&CategoriesJson {
                    categories: &notes_config.categories,
                    default: &notes_config.default_category,
                });
            }
            for category in &notes_config.categories {
                let marker = if *category == notes_config.default_category {
                    " (default)"
                } else {
                    ""
                };
                println!("{}{}", category, marker);
            }
            return Ok(());
        }
        CategoryAction::Add(arg) => (arg.name, true),
        CategoryAction::Remove(arg) => (arg.name, false),
    };

    let name = name.trim().to_lowercase();
    if name.is_empty() || name == "all" || name == "pinned" {
        return Err(format!("'{}' cannot be used as a category name", name).into());
    }
    if !adding && name == notes_config.default_category {
        return Err(format!("cannot remove the default category '{}'", name).into());
    }

    let mut doc = config_io::read_config_doc(&ctx.data_dir)?;
    let changed = if adding {
        config_io::add_category(&mut doc, &notes_config.categories, &name)
    } else {
        config_io::remove_category(&mut doc, &notes_config.categories, &name)
    };
    if !changed {
        let reason = if adding { "already exists" } else { "does not exist" };
        return Err(format!("category '{}' {}", name, reason).into());
    }
    config_io::write_config_doc(&ctx.data_dir, &doc)?;
    log::info!(
        "event=category_{} name={}",
        if adding { "add" } else { "remove" },
        name
    );
    let action = if adding { "added" } else { "removed" };
    if json {
        return print_json(&CategoryChangeJson {
            category: &name,
            action,
        });
    }
    println!("{} category '{}'", action, name);
    Ok(())
}

// ---------------------------------------------------------------------------
// Recovery log
// ---------------------------------------------------------------------------

fn cmd_recovery(ctx: &Context, args: RecoveryCmd, json: bool) -> CmdResult {
    match args.action {
        Some(RecoveryAction::Path) => {
            println!("{}", recovery::recovery_log_path(&ctx.data_dir).display());
            Ok(())
        }
        Some(RecoveryAction::Prune(prune)) => {
            let before = prune.before.as_deref().map(parse_timestamp).transpose()?;
            let removed = recovery::prune_recovery(&ctx.data_dir, before, prune.all)?;
            println!(
                "pruned {} recovery entr{}",
                removed,
                if removed == 1 { "y" } else { "ies" }
            );
            Ok(())
        }
        None => {
            let entries =
                recovery::read_recovery_entries(&ctx.data_dir, Some(args.limit.unwrap_or(10)));
            if json {
                let values: Vec<serde_json::Value> = entries.iter().map(|e| e.to_json()).collect();
                return print_json(&values);
            }
            if entries.is_empty() {
                println!("recovery log is empty");
            }
            for entry in &entries {
                print!("{}", entry.to_display_markdown());
            }
            Ok(())
        }
    }
}
