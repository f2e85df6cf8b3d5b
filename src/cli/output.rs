use crate::config::OutputMode;
use crate::render::RenderedResult;

pub fn print_json(value: &serde_json::Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_default()
    );
}

pub fn print_rendered(rendered: &RenderedResult, mode: OutputMode) {
    match mode {
        OutputMode::Json => print_json(&serde_json::to_value(rendered).unwrap_or_default()),
        OutputMode::Markdown => print!("{}", rendered.to_markdown()),
    }
}

pub fn print_error(err: &crate::error::AppError) {
    eprintln!(
        "{}",
        serde_json::to_string_pretty(&err.to_json()).unwrap_or_default()
    );
}
