use thiserror::Error;

/// A line of user input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Categories,
    /// Sets the category filter, or clears it with `None`.
    Category(Option<String>),
    /// Sets the search term, or clears it with `None`.
    Search(Option<String>),
    List,
    Toggle(u64),
    Remove(u64),
    Clear,
    Selected,
    Generate,
    Quit,
    /// Anything that isn't a command is a follow-up question.
    Ask(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command `/{0}`, try /help")]
    Unknown(String),
    #[error("`/{0}` expects a product id")]
    MissingId(&'static str),
    #[error("`{0}` is not a product id")]
    InvalidId(String),
}

pub const HELP: &str = "\
/categories          list the catalog categories
/category [name]     filter by category (no name clears the filter)
/search [term]       filter by search term (no term clears the filter)
/list                show the products matching the filters
/toggle <id>         select or deselect a product
/remove <id>         deselect a product
/clear               deselect everything
/selected            show the selected products
/generate            generate a routine for the selected products
/quit                exit
anything else        ask a follow-up question about the routine";

impl Command {
    /// Parses a line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let Some(command) = line.strip_prefix('/') else {
            return Ok(Some(Self::Ask(line.to_owned())));
        };

        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => {
                (name, Some(arg.trim()).filter(|a| !a.is_empty()))
            }
            None => (command, None),
        };
        let arg = arg.map(str::to_owned);

        let command = match name {
            "help" | "h" => Self::Help,
            "categories" => Self::Categories,
            "category" => Self::Category(arg),
            "search" => Self::Search(arg),
            "list" | "ls" => Self::List,
            "toggle" | "t" => Self::Toggle(parse_id("toggle", arg)?),
            "remove" | "rm" => Self::Remove(parse_id("remove", arg)?),
            "clear" => Self::Clear,
            "selected" => Self::Selected,
            "generate" | "gen" => Self::Generate,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(ParseError::Unknown(other.to_owned())),
        };
        Ok(Some(command))
    }
}

fn parse_id(
    command: &'static str,
    arg: Option<String>,
) -> Result<u64, ParseError> {
    let arg = arg.ok_or(ParseError::MissingId(command))?;
    arg.parse().map_err(|_| ParseError::InvalidId(arg))
}
