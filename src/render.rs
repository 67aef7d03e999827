// Terminal rendering for the contribution graph and its summary
use crate::grid::{ActivityLevel, Grid};
use crate::report::Report;
use colored::Colorize;

/// 24-bit background colors per activity level, darkest (no activity) to brightest
pub const PALETTE: [(u8, u8, u8); 5] = [
    (15, 23, 30),   // dark grey
    (0, 64, 24),    // dark green
    (0, 100, 32),   // medium green
    (0, 140, 40),   // bright green
    (80, 220, 100), // neon green
];

pub const BANNER: &str = r"
░▒█▀▀▄░▒█▀▀█░▒█▀▀▄░█▀▀▄░▒█▀▀█░▒█░▒█
░▒█░░░░▒█░▄▄░▒█▄▄▀▒█▄▄█░▒█▄▄█░▒█▀▀█
░▒█▄▄▀░▒█▄▄▀░▒█░▒█▒█░▒█░▒█░░░░▒█░▒█
";

/// Always emits the truecolor escape, independent of terminal detection
pub fn block(level: ActivityLevel) -> String {
    let (r, g, b) = PALETTE[level.index()];
    format!("\x1b[48;2;{};{};{}m  \x1b[0m", r, g, b)
}

pub fn render_grid(grid: &Grid) -> String {
    let mut output = String::new();
    for row in &grid.rows {
        for level in row {
            output.push_str(&block(*level));
        }
        output.push('\n');
    }
    output
}

pub fn render_report(report: &Report) -> String {
    let mut output = render_grid(&report.grid);

    output.push('\n');
    output.push_str(&format!("username: {}\n", report.account));
    output.push('\n');
    output.push_str("(in one year)\n");
    output.push_str(&format!("total contributions: {}\n", report.stats.total));
    output.push_str(&format!("avg. contributions: {}\n", report.stats.average));
    output.push('\n');
    match report.today_count {
        Some(count) => output.push_str(&format!("contributions today: {}\n", count)),
        None => output.push_str("No contributions today\n"),
    }

    output
}

pub fn print_banner() {
    println!("{}", BANNER);
    println!("usage: cgraph <command> [args...]");
    println!();
    println!("commands:");
    println!("  {}    use the given username for this run only", "check <name>".green());
    println!("  {}         use the remembered username", "checkme".green());
    println!("  {}          forget the remembered username and ask again", "change".green());
}
