use clap::{Parser, Subcommand};

use tag_cli::commands::{config_ops, edit_ops, suggest_ops};

#[derive(Parser)]
#[command(name = "tagtool", about = "Tag suggestion tool")]
struct Cli {
    /// Settings TOML file (default: embedded settings)
    #[arg(long, global = true)]
    settings: Option<String>,
    /// Log engine activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load a tag source and show statistics
    Info {
        /// Tag source file (default: [source] path from settings)
        #[arg(long)]
        source: Option<String>,
        /// Number of top tags to list
        #[arg(long, default_value = "10")]
        top: usize,
    },
    /// Rank tags against a query
    Suggest {
        #[arg(long)]
        source: Option<String>,
        /// Typed text
        query: String,
        /// Maximum number of suggestions
        #[arg(short, long, default_value = "7")]
        n: usize,
        #[arg(long)]
        json: bool,
    },
    /// Suggest tags for the fragment under the cursor in a tag list
    Complete {
        #[arg(long)]
        source: Option<String>,
        /// Tag list being edited
        buffer: String,
        /// Cursor offset in characters (default: end of buffer)
        #[arg(long)]
        cursor: Option<usize>,
        #[arg(short, long, default_value = "7")]
        n: usize,
        #[arg(long)]
        json: bool,
    },
    /// Insert a tag at the cursor
    Apply {
        /// Tag list being edited
        buffer: String,
        /// Tag to insert (storage form)
        tag: String,
        /// Cursor offset in characters (default: end of buffer)
        #[arg(long)]
        cursor: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Append a comma-separated tag list to the end of a tag list
    Append {
        /// Tag list being edited
        buffer: String,
        /// Tags to append (storage form, comma-separated)
        tags: String,
        #[arg(long)]
        json: bool,
    },
    /// Move artist, OC, quantity and species tags to the front
    Reorder {
        /// Comma-separated tag list
        text: String,
        #[arg(long)]
        json: bool,
    },
    /// Show the resolution tag for an image size
    Resolution {
        width: u32,
        height: u32,
        /// Tag list to add the resolution tag to
        #[arg(long)]
        tags: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Convert tags from storage form to display form
    Display {
        #[arg(required = true)]
        tags: Vec<String>,
    },
    /// Convert display text to storage form
    Storage {
        #[arg(required = true)]
        texts: Vec<String>,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("tag_core=debug,tagcomplete=debug")
            }),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    if cli.verbose {
        init_logging();
    }
    let settings = cli.settings.as_deref();

    match cli.command {
        Command::Info { source, top } => {
            let engine = suggest_ops::open_loaded_engine(settings, source.as_deref());
            suggest_ops::info(&engine, top);
        }
        Command::Suggest {
            source,
            query,
            n,
            json,
        } => {
            let engine = suggest_ops::open_loaded_engine(settings, source.as_deref());
            suggest_ops::suggest(&engine, &query, n, json);
        }
        Command::Complete {
            source,
            buffer,
            cursor,
            n,
            json,
        } => {
            let engine = suggest_ops::open_loaded_engine(settings, source.as_deref());
            suggest_ops::complete(&engine, &buffer, cursor, n, json);
        }
        Command::Apply {
            buffer,
            tag,
            cursor,
            json,
        } => {
            let engine = suggest_ops::open_engine(settings);
            edit_ops::apply(&engine, &buffer, cursor, &tag, json);
        }
        Command::Append { buffer, tags, json } => {
            let engine = suggest_ops::open_engine(settings);
            edit_ops::append(&engine, &buffer, &tags, json);
        }
        Command::Reorder { text, json } => edit_ops::reorder(&text, json),
        Command::Resolution {
            width,
            height,
            tags,
            json,
        } => edit_ops::resolution(width, height, tags.as_deref(), json),
        Command::Display { tags } => {
            edit_ops::display(&suggest_ops::open_engine(settings), &tags)
        }
        Command::Storage { texts } => {
            edit_ops::storage(&suggest_ops::open_engine(settings), &texts)
        }
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
