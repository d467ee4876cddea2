use colored::*;

pub const TOTAL_WIDTH: usize = 64;

pub fn header(title: &str) {
    let text: ColoredString = format!(" {} ", title.to_uppercase()).bold().bright_green();
    let pad = TOTAL_WIDTH.saturating_sub(title.len() + 2);
    let left: ColoredString = "═".repeat(pad / 2).bright_black();
    let right: ColoredString = "═".repeat(pad - pad / 2).bright_black();
    println!("{left}{text}{right}");
}

pub fn detail(key: &str, value: &str) {
    println!("    {} {}", format!("{key}:").bright_black(), value.normal());
}
