pub mod config_ops;
pub mod edit_ops;
pub mod suggest_ops;

/// Print `value` as pretty JSON, exiting on serialization failure.
pub(crate) fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error encoding JSON: {e}");
            std::process::exit(1);
        }
    }
}
