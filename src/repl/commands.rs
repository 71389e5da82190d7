//! Command registry for the REPL.

/// Every command the REPL understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Catch,
    Exit,
    Explore,
    Help,
    Inspect,
    Map,
    MapBack,
    Pokedex,
}

impl Command {
    /// All commands, in the order `help` lists them.
    pub const ALL: [Command; 8] = [
        Command::Catch,
        Command::Exit,
        Command::Explore,
        Command::Help,
        Command::Inspect,
        Command::Map,
        Command::MapBack,
        Command::Pokedex,
    ];

    /// Looks a command up by the name typed at the prompt.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cmd| cmd.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Command::Catch => "catch",
            Command::Exit => "exit",
            Command::Explore => "explore",
            Command::Help => "help",
            Command::Inspect => "inspect",
            Command::Map => "map",
            Command::MapBack => "mapb",
            Command::Pokedex => "pokedex",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Command::Catch => "Catch the given Pokemon",
            Command::Exit => "Exit the pokedex",
            Command::Explore => "Explore a location-area for Pokemon",
            Command::Help => "Displays a help message",
            Command::Inspect => "Inspect the given Pokemon",
            Command::Map => "Get a page of location-areas",
            Command::MapBack => "Get the previous page of location-areas",
            Command::Pokedex => "List captured pokemon",
        }
    }

    /// Message shown when a command that needs an argument gets none.
    ///
    /// `None` for commands that take no argument.
    pub fn missing_argument_hint(self) -> Option<&'static str> {
        match self {
            Command::Explore => Some("Please provide a location-area to explore!"),
            Command::Catch => Some("Please provide a Pokemon to catch!"),
            Command::Inspect => Some("Please provide a Pokemon to inspect!"),
            _ => None,
        }
    }
}

/// Renders the `help` text.
pub fn help_text() -> String {
    let mut text = String::from("Welcome to the Pokedex!\nUsage:\n\n");
    for cmd in Command::ALL {
        text.push_str(&format!("{}: {}\n", cmd.name(), cmd.description()));
    }
    text
}
