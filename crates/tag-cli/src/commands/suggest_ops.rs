use std::path::Path;
use std::process;

use tagcomplete::{Suggestion, TagEngine};
use tag_core::format::format_suggestion_line;

use super::print_json;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

/// Columns used for plain-text suggestion rows.
const LINE_WIDTH: usize = 40;

/// Build an engine from an optional settings file (defaults otherwise).
pub fn open_engine(settings_file: Option<&str>) -> TagEngine {
    match settings_file {
        Some(file) => die!(
            TagEngine::from_settings_file(Path::new(file)),
            "Error loading settings: {}"
        ),
        None => TagEngine::from_global_settings(),
    }
}

/// Build an engine and load `source`, or the configured source path.
pub fn open_loaded_engine(settings_file: Option<&str>, source: Option<&str>) -> TagEngine {
    let engine = open_engine(settings_file);
    let path = source
        .map(str::to_string)
        .unwrap_or_else(|| engine.settings().source.path.clone());
    die!(
        engine.load_index(Path::new(&path)),
        "Error loading tag source: {}"
    );
    engine
}

pub fn info(engine: &TagEngine, top: usize) {
    let stats = engine.load_stats();
    println!("Tags:               {}", engine.tag_count());
    println!("Rows read:          {}", stats.rows);
    println!("Rows skipped:       {}", stats.skipped_rows);
    println!("Malformed weights:  {}", stats.malformed_weights);
    println!("Primary tags:       {}", stats.primary_tags);
    println!("Alternate tags:     {}", stats.alternate_tags);
    println!("Alternates ignored: {}", stats.alternates_ignored);

    let sample = engine.top_tags(top);
    if !sample.is_empty() {
        println!();
        println!("Top {} tags:", sample.len());
        for record in &sample {
            let display = engine.to_display_form(&record.tag);
            println!("  {}", format_suggestion_line(&display, record.weight, LINE_WIDTH));
        }
    }
}

pub fn suggest(engine: &TagEngine, query: &str, limit: usize, json: bool) {
    let suggestions = engine.suggest(query, limit);
    report(&suggestions, json);
}

pub fn complete(engine: &TagEngine, buffer: &str, cursor: Option<usize>, limit: usize, json: bool) {
    let cursor = cursor.unwrap_or_else(|| buffer.chars().count());
    let fragment = engine.resolve_fragment(buffer, cursor);
    if !json {
        println!("Fragment: {:?} [{}..{}]", fragment.query(), fragment.start, fragment.end);
    }
    let suggestions = engine.get_suggestions(buffer, cursor, limit);
    report(&suggestions, json);
}

fn report(suggestions: &[Suggestion], json: bool) {
    if json {
        print_json(&suggestions);
    } else if suggestions.is_empty() {
        println!("(no suggestions)");
    } else {
        print_lines(suggestions);
    }
}

fn print_lines(suggestions: &[Suggestion]) {
    for s in suggestions {
        println!(
            "  {}  {:?}",
            format_suggestion_line(&s.display, s.weight, LINE_WIDTH),
            s.tier
        );
    }
}
