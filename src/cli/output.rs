//! Output formatting for CLI

use crate::{Status, types::Signal};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Format a rate in [0, 1] as a percentage
pub fn format_percent(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

fn signal_glyph(signal: Signal) -> char {
    match signal {
        Signal::Neutral => '.',
        Signal::Red => 'R',
        Signal::Orange => 'O',
        Signal::Yellow => 'Y',
        Signal::Green => 'G',
    }
}

/// Render the status grid: signal glyphs on the left, probabilities on the
/// right.
pub fn render_grid(status: &Status) -> String {
    let mut out = String::new();
    for row in &status.grid {
        let glyphs: String = row.iter().map(|cell| signal_glyph(cell.signal)).collect();
        let probabilities: Vec<String> = row
            .iter()
            .map(|cell| format!("{:.2}", cell.probability))
            .collect();
        out.push_str(&format!("  {glyphs}   {}\n", probabilities.join(" ")));
    }
    out
}
