//! CLI output formatting utilities.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a search hit.
    pub fn search_result(title: &str, channel: &str, published: &str, url: &str) {
        println!(
            "\n{} {} ({}, {})",
            style(">>").green(),
            style(title).bold(),
            channel,
            style(published).dim()
        );
        println!("   {}", style(url).cyan());
    }

    /// Print a comment.
    pub fn comment(author: &str, likes: u64, replies: u64, text: &str) {
        println!(
            "\n{} {} {}",
            style("*").cyan(),
            style(author).bold(),
            style(format!("({} likes, {} replies)", likes, replies)).dim()
        );
        println!("   {}", content_preview(text, 300));
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}")
        {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// Format an ISO 8601 duration (`P1DT2H3M4S`) as `1d 2h 3m 4s`.
///
/// Anything other than day, hour, minute and second parts is returned as is.
pub fn format_duration(iso: &str) -> String {
    let Some(rest) = iso.strip_prefix('P') else {
        return iso.to_string();
    };
    let (date, time) = rest.split_once('T').unwrap_or((rest, ""));

    let mut parts = Vec::new();
    for (section, units) in [(date, "D"), (time, "HMS")] {
        let mut number = String::new();
        for c in section.chars() {
            if c.is_ascii_digit() {
                number.push(c);
            } else if units.contains(c) && !number.is_empty() {
                parts.push(format!("{}{}", number, c.to_ascii_lowercase()));
                number.clear();
            } else {
                return iso.to_string();
            }
        }
        if !number.is_empty() {
            return iso.to_string();
        }
    }

    if parts.is_empty() {
        iso.to_string()
    } else {
        parts.join(" ")
    }
}

/// Collapse newlines and truncate with an ellipsis.
fn content_preview(content: &str, max_chars: usize) -> String {
    let content = content.replace('\n', " ");
    if content.chars().count() <= max_chars {
        content
    } else {
        let truncated: String = content.chars().take(max_chars).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration("PT3M33S"), "3m 33s");
        assert_eq!(format_duration("PT1H2M3S"), "1h 2m 3s");
        assert_eq!(format_duration("N/A"), "N/A");
        assert_eq!(format_duration("P1DT2H3M"), "1d 2h 3m");
        assert_eq!(format_duration("P2D"), "2d");
        assert_eq!(format_duration("P1M"), "P1M");
    }

    #[test]
    fn test_content_preview() {
        assert_eq!(content_preview("a\nb", 10), "a b");
        assert_eq!(content_preview("héllo world", 5), "héllo...");
    }
}
