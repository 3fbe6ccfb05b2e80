use std::ops::ControlFlow;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use routine_advisor::{Advisor, RelayClient};
use routine_model::{ChatMessage, Role};
use routine_selection::{CatalogBrowser, FileStorage, SelectionStore};
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::command::{Command, HELP};
use crate::view;

/// The front end's controller: owns the selection, the catalog browser
/// and the advisor, and maps commands onto them.
pub struct App {
    store: SelectionStore<FileStorage>,
    browser: CatalogBrowser,
    advisor: Advisor<RelayClient>,
    messages: UnboundedReceiver<ChatMessage>,
    category: String,
    search: String,
}

impl App {
    pub fn new(
        store: SelectionStore<FileStorage>,
        browser: CatalogBrowser,
        advisor: Advisor<RelayClient>,
        messages: UnboundedReceiver<ChatMessage>,
    ) -> Self {
        Self {
            store,
            browser,
            advisor,
            messages,
            category: String::new(),
            search: String::new(),
        }
    }

    pub async fn run(mut self) {
        view::print_notice("Routine builder. Type /help for commands.");
        if !self.store.is_empty() {
            println!("Restored {} selected product(s):", self.store.len());
            view::print_selection(self.store.items());
        }
        println!("Select a category with /category <name> to view products.");

        let mut lines = BufReader::new(io::stdin()).lines();
        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(err) => {
                    error!("error reading input: {err}");
                    break;
                }
            };

            let command = match Command::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(err) => {
                    view::print_error(err);
                    continue;
                }
            };
            if self.execute(command).await.is_break() {
                break;
            }
        }
    }

    async fn execute(&mut self, command: Command) -> ControlFlow<()> {
        match command {
            Command::Help => println!("{HELP}"),
            Command::Categories => match self.browser.catalog().await {
                Ok(catalog) => {
                    for category in catalog.categories() {
                        println!("{category}");
                    }
                }
                Err(err) => view::print_error(err),
            },
            Command::Category(category) => {
                self.category = category.unwrap_or_default();
                self.show_products().await;
            }
            Command::Search(term) => {
                self.search = term.unwrap_or_default();
                self.show_products().await;
            }
            Command::List => self.show_products().await,
            Command::Toggle(id) => self.toggle(id).await,
            Command::Remove(id) => {
                if let Err(err) = self.store.remove(id) {
                    view::print_error(err);
                }
                view::print_selection(self.store.items());
            }
            Command::Clear => {
                if let Err(err) = self.store.clear() {
                    view::print_error(err);
                }
                view::print_notice("Cleared all selections.");
            }
            Command::Selected => view::print_selection(self.store.items()),
            Command::Generate => {
                let result = with_spinner(
                    "✨ Generating...",
                    self.advisor.generate_routine(self.store.items()),
                )
                .await;
                if let Err(err) = result {
                    debug!("routine generation failed: {err}");
                }
                self.flush_messages();
            }
            Command::Ask(question) => {
                let result = with_spinner(
                    "🤔 Thinking...",
                    self.advisor.ask(&question),
                )
                .await;
                if let Err(err) = result {
                    debug!("follow-up failed: {err}");
                }
                self.flush_messages();
            }
            Command::Quit => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    async fn show_products(&self) {
        match self.browser.apply_filters(&self.category, &self.search).await {
            Ok(Some(items)) => {
                view::print_products(&items, |id| self.store.is_selected(id));
            }
            // A newer filter request has superseded this one.
            Ok(None) => {}
            Err(err) => view::print_error(err),
        }
    }

    async fn toggle(&mut self, id: u64) {
        let catalog = match self.browser.catalog().await {
            Ok(catalog) => catalog,
            Err(err) => {
                view::print_error(err);
                return;
            }
        };
        let Some(item) = catalog.get(id) else {
            view::print_error(format!("no product with id {id}"));
            return;
        };

        match self.store.toggle(item) {
            Ok(true) => view::print_notice(format!("Selected {}", item.name)),
            Ok(false) => {
                view::print_notice(format!("Deselected {}", item.name))
            }
            Err(err) => view::print_error(err),
        }
    }

    fn flush_messages(&mut self) {
        while let Ok(message) = self.messages.try_recv() {
            // The user's own input is already on screen.
            if message.role != Role::User {
                view::print_message(&message);
            }
        }
    }
}

async fn with_spinner<F: Future>(message: &'static str, fut: F) -> F::Output {
    let progress_bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {wide_msg}") {
        progress_bar
            .set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    progress_bar.set_message(message);
    progress_bar.enable_steady_tick(Duration::from_millis(100));

    let output = fut.await;
    progress_bar.finish_and_clear();
    output
}
