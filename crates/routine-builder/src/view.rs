use std::fmt::Display;

use owo_colors::OwoColorize;
use routine_model::{CatalogItem, ChatMessage, Role};

const BAR_CHAR: &str = "▎";

pub fn print_products(
    items: &[CatalogItem],
    is_selected: impl Fn(u64) -> bool,
) {
    if items.is_empty() {
        println!("{}", "No products found matching your criteria".dimmed());
        return;
    }
    for item in items {
        let mark = if is_selected(item.id) { "[x]" } else { "[ ]" };
        println!(
            "{} {:>4}  {} {}",
            mark.bright_green(),
            item.id.dimmed(),
            item.name.bright_white().bold(),
            format!("({}, {})", item.brand, item.category).dimmed()
        );
    }
}

pub fn print_selection(items: &[CatalogItem]) {
    if items.is_empty() {
        println!(
            "{}",
            "No products selected yet. Use /toggle <id> to add them.".dimmed()
        );
        return;
    }
    for item in items {
        println!(
            "{}{:>4}  {} {}",
            BAR_CHAR.bright_green(),
            item.id.dimmed(),
            item.name.bright_white(),
            item.brand.dimmed()
        );
    }
}

pub fn print_message(message: &ChatMessage) {
    match message.role {
        Role::User => {
            println!("{}🧑 {}", BAR_CHAR.bright_yellow(), message.content);
        }
        Role::Assistant | Role::System => {
            println!(
                "{}🤖 {}",
                BAR_CHAR.bright_cyan(),
                message.content.bright_white()
            );
        }
    }
}

pub fn print_notice(notice: impl Display) {
    println!("{}", notice.bright_green());
}

pub fn print_error(err: impl Display) {
    eprintln!("{} {err}", "error:".bright_red().bold());
}
