use colored::*;
use tracing::info;
use unicode_width::UnicodeWidthStr;

use airfresh_common::macros::TARGET_PRINT;

use crate::terminal::colors;

pub const TOTAL_WIDTH: usize = 64;

#[macro_export]
macro_rules! mprint {
    () => {
        $crate::terminal::print::print("");
    };
    ($msg:expr) => {
        $crate::terminal::print::print($msg);
    };
}

/// Every line of regular output goes through the tracing subscriber so it
/// never tears through log lines.
pub fn print(msg: &str) {
    info!(target: TARGET_PRINT, raw_msg = msg);
}

/// Centers `title` in a `fill` line of [`TOTAL_WIDTH`] columns.
fn framed(title: &str, fill: &str, bold: bool) -> String {
    let width: usize = UnicodeWidthStr::width(title);
    let mut title: ColoredString = title.color(colors::PRIMARY);
    if bold {
        title = title.bold();
    }
    let pad: usize = TOTAL_WIDTH.saturating_sub(width);
    let left: String = fill.repeat(pad / 2);
    let right: String = fill.repeat(pad - pad / 2);
    format!("{}{title}{}", left.color(colors::SEPARATOR), right.color(colors::SEPARATOR))
}

pub fn banner(no_banner: bool, q_level: u8) {
    if no_banner || q_level > 0 {
        return;
    }
    let title: String = format!("⟦ AIRFRESH v{} ⟧", env!("CARGO_PKG_VERSION"));
    print(&framed(&title, "═", true));
}

pub fn header(msg: &str, q_level: u8) {
    if q_level > 0 {
        return;
    }
    let title: String = format!("⟦ {} ⟧", msg.to_uppercase());
    print(&framed(&title, "─", false));
}

pub fn fat_separator() {
    print(&format!("{}", "═".repeat(TOTAL_WIDTH).color(colors::SEPARATOR)));
}

pub fn print_status<T: AsRef<str>>(msg: T) {
    let prefix: ColoredString = ">".color(colors::SEPARATOR);
    print(&format!("{} {}", prefix, msg.as_ref().color(colors::TEXT_DEFAULT)));
}

pub fn tree_head(idx: usize, name: &str) {
    let idx_str: String = format!("[{}]", idx.to_string().color(colors::ACCENT));
    print(&format!(
        "{} {}",
        idx_str.color(colors::SEPARATOR),
        name.color(colors::PRIMARY)
    ));
}

/// Prints `key....: value` rows under a [`tree_head`], keys padded to the longest one.
pub fn as_tree_one_level(key_value_pair: Vec<(String, ColoredString)>) {
    let key_width: usize = key_value_pair
        .iter()
        .map(|(key, _)| UnicodeWidthStr::width(key.as_str()))
        .max()
        .unwrap_or(0);

    for (i, (key, value)) in key_value_pair.iter().enumerate() {
        let last: bool = i + 1 == key_value_pair.len();
        let branch: ColoredString = if !last {
            "├─".bright_black()
        } else {
            "└─".bright_black()
        };
        let dots: usize = key_width.saturating_sub(UnicodeWidthStr::width(key.as_str())) + 1;
        print(&format!(
            " {} {}{}{} {}",
            branch,
            key.color(colors::TEXT_DEFAULT),
            ".".repeat(dots).color(colors::SEPARATOR),
            ":".color(colors::SEPARATOR),
            value
        ));
    }
}

pub fn centerln(msg: &str) {
    let space: String = " ".repeat(TOTAL_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2);
    print(&format!("{space}{msg}{space}"));
}

pub fn no_results() {
    centerln(&format!("{}", "no devices answered".red().bold()));
}
