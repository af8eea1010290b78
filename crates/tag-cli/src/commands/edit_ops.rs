use serde::Serialize;

use tag_core::tag_list::{add_tag_if_missing, promote_priority_tags, resolution_tag, Reorder};
use tagcomplete::TagEngine;

use super::print_json;

#[derive(Serialize)]
struct Resolution<'a> {
    tag: Option<&'a str>,
    text: Option<String>,
}

pub fn apply(engine: &TagEngine, buffer: &str, cursor: Option<usize>, tag: &str, json: bool) {
    let cursor = cursor.unwrap_or_else(|| buffer.chars().count());
    let insertion = engine.apply_suggestion(buffer, cursor, tag);
    if json {
        print_json(&insertion);
    } else {
        println!("{}", insertion.buffer);
        println!("cursor: {}", insertion.cursor);
    }
}

pub fn append(engine: &TagEngine, buffer: &str, tags: &str, json: bool) {
    match engine.append_tag_list(buffer, tags) {
        Some(insertion) if json => print_json(&insertion),
        Some(insertion) => {
            println!("{}", insertion.buffer);
            println!("cursor: {}", insertion.cursor);
        }
        None => {
            eprintln!("Error: no tags in {tags:?}");
            std::process::exit(1);
        }
    }
}

pub fn reorder(text: &str, json: bool) {
    let outcome = promote_priority_tags(text);
    if json {
        print_json(&outcome);
        return;
    }
    match outcome {
        Reorder::Empty => println!("(no tags)"),
        Reorder::TooFew => println!("(nothing to reorder)"),
        Reorder::AlreadyOrdered => println!("(already ordered)"),
        Reorder::Reordered(text) => println!("{text}"),
    }
}

/// Print the resolution tag for a `width`×`height` image, adding it to
/// `text` when a tag list is given.
pub fn resolution(width: u32, height: u32, text: Option<&str>, json: bool) {
    let tag = resolution_tag(width, height);
    let rewritten = match (tag, text) {
        (Some(tag), Some(text)) => add_tag_if_missing(text, tag),
        _ => None,
    };
    if json {
        print_json(&Resolution {
            tag,
            text: rewritten,
        });
        return;
    }
    match (tag, rewritten) {
        (None, _) => println!("(below high res)"),
        (Some(_), Some(text)) => println!("{text}"),
        (Some(tag), None) => println!("{tag}"),
    }
}

pub fn display(engine: &TagEngine, tags: &[String]) {
    for tag in tags {
        println!("{}", engine.to_display_form(tag));
    }
}

pub fn storage(engine: &TagEngine, texts: &[String]) {
    for text in texts {
        println!("{}", engine.to_storage_form(text));
    }
}
