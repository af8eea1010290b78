use std::fs;
use std::process;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn settings_export() {
    print!("{}", tag_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        tag_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: suggestions.max_results={}, suggestions.min_query_chars={}, insertion.separator={:?}, source.path={}",
        s.suggestions.max_results, s.suggestions.min_query_chars, s.insertion.separator, s.source.path
    );
}
