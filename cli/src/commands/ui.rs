use console::Style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub fn print_header(title: &str) {
    println!("\n{}", Style::new().bold().cyan().apply_to(title));
    println!("{}", Style::new().dim().apply_to("─".repeat(title.chars().count())));
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", Style::new().red().bold().apply_to("ERROR:"), msg);
}

pub fn print_search_match(rank: usize, document: &str, chunk_index: usize, distance: f32, content: &str) {
    let header = format!("#{} {} [chunk {}] distance {:.4}", rank, document, chunk_index, distance);
    println!("{}", Style::new().bold().blue().apply_to(header));
    println!("{}", Style::new().dim().apply_to(snippet(content, 300)));
    println!();
}

pub fn print_key_value(key: &str, value: &str) {
    println!(
        "{}: {}",
        Style::new().dim().apply_to(key),
        Style::new().bold().apply_to(value)
    );
}

pub fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        .template("{spinner:.green} {msg}")
    {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// First `max_chars` characters with whitespace runs collapsed
pub fn snippet(text: &str, max_chars: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let mut cut: String = collapsed.chars().take(max_chars).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet() {
        assert_eq!(snippet("a\n\n  b   c", 10), "a b c");
        assert_eq!(snippet("résumé text", 6), "résumé…");
    }
}
