//! REPL session state and command handlers.

use std::collections::BTreeMap;
use std::io::Write;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;
use url::Url;

use super::catch::{catch_chance, roll};
use super::commands::{help_text, Command};
use crate::error::{PokedexError, Result};
use crate::pokeapi::{LocationAreasPage, PokeApiClient, Pokemon};

/// What the loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

// == Pagination ==
/// A page position, as carried by PokeAPI's `next`/`previous` links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    pub offset: u32,
    pub limit: u32,
}

impl PageCursor {
    /// Reads `offset` and `limit` from a page link.
    pub fn from_link(link: &str) -> Result<Self> {
        let url = Url::parse(link)?;
        let param = |key: &str| {
            url.query_pairs()
                .find(|(k, _)| k == key)
                .and_then(|(_, v)| v.parse::<u32>().ok())
        };

        match (param("offset"), param("limit")) {
            (Some(offset), Some(limit)) => Ok(Self { offset, limit }),
            _ => Err(PokedexError::InvalidPageLink(link.to_string())),
        }
    }
}

/// Where `map` and `mapb` go next. Only those two commands move it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapPagination {
    pub next: Option<PageCursor>,
    pub previous: Option<PageCursor>,
}

impl MapPagination {
    pub fn new(page_size: u32) -> Self {
        Self {
            next: Some(PageCursor {
                offset: 0,
                limit: page_size,
            }),
            previous: None,
        }
    }

    /// Replaces both cursors with the links from a fetched page.
    pub fn update(&mut self, page: &LocationAreasPage) -> Result<()> {
        let next = page.next.as_deref().map(PageCursor::from_link).transpose()?;
        let previous = page
            .previous
            .as_deref()
            .map(PageCursor::from_link)
            .transpose()?;

        self.next = next;
        self.previous = previous;
        Ok(())
    }
}

// == Pokedex ==
#[derive(Debug, Clone)]
pub struct CaughtPokemon {
    pub pokemon: Pokemon,
    pub caught_at: DateTime<Utc>,
}

// == Session ==
/// Everything a running REPL remembers between commands.
#[derive(Debug)]
pub struct Session {
    client: PokeApiClient,
    pages: MapPagination,
    pokedex: BTreeMap<String, CaughtPokemon>,
    rng: StdRng,
}

impl Session {
    /// Creates a session; `seed` fixes catch rolls for reproducible runs.
    pub fn new(client: PokeApiClient, page_size: u32, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            client,
            pages: MapPagination::new(page_size),
            pokedex: BTreeMap::new(),
            rng,
        }
    }

    pub fn pages(&self) -> &MapPagination {
        &self.pages
    }

    pub fn caught(&self, name: &str) -> Option<&CaughtPokemon> {
        self.pokedex.get(name)
    }

    /// Runs one command. Messages for the user go to `out`.
    pub async fn execute<W: Write>(
        &mut self,
        command: Command,
        arg: Option<&str>,
        out: &mut W,
    ) -> Result<Flow> {
        debug!(command = command.name(), ?arg, "executing command");

        let arg = match (command.missing_argument_hint(), arg) {
            (Some(hint), None) => {
                writeln!(out, "{}", hint)?;
                return Ok(Flow::Continue);
            }
            (_, arg) => arg.unwrap_or_default(),
        };

        match command {
            Command::Exit => {
                writeln!(out, "Closing the Pokedex... Goodbye!")?;
                return Ok(Flow::Exit);
            }
            Command::Help => write!(out, "{}", help_text())?,
            Command::Map => self.map_forward(out).await?,
            Command::MapBack => self.map_back(out).await?,
            Command::Explore => self.explore(arg, out).await?,
            Command::Catch => self.catch(arg, out).await?,
            Command::Inspect => self.inspect(arg, out)?,
            Command::Pokedex => self.list_pokedex(out)?,
        }

        Ok(Flow::Continue)
    }

    async fn map_forward<W: Write>(&mut self, out: &mut W) -> Result<()> {
        match self.pages.next {
            Some(cursor) => self.show_page(cursor, out).await,
            None => {
                writeln!(out, "you're on the last page")?;
                Ok(())
            }
        }
    }

    async fn map_back<W: Write>(&mut self, out: &mut W) -> Result<()> {
        match self.pages.previous {
            Some(cursor) => self.show_page(cursor, out).await,
            None => {
                writeln!(out, "you're on the first page")?;
                Ok(())
            }
        }
    }

    async fn show_page<W: Write>(&mut self, cursor: PageCursor, out: &mut W) -> Result<()> {
        let page = self
            .client
            .location_areas(cursor.offset, cursor.limit)
            .await?;

        for area in &page.results {
            writeln!(out, "{}", area.name)?;
        }
        writeln!(out)?;

        self.pages.update(&page)
    }

    async fn explore<W: Write>(&mut self, area: &str, out: &mut W) -> Result<()> {
        writeln!(out, "Exploring {}...", area)?;

        let detail = match self.client.location_area(area).await {
            Ok(detail) => detail,
            Err(e) if e.is_not_found() => {
                writeln!(out, "Location not found!")?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        writeln!(out, "Found Pokemon:")?;
        for encounter in &detail.pokemon_encounters {
            writeln!(out, "\t- {}", encounter.pokemon.name)?;
        }
        writeln!(out)?;
        Ok(())
    }

    async fn catch<W: Write>(&mut self, name: &str, out: &mut W) -> Result<()> {
        if self.pokedex.contains_key(name) {
            writeln!(out, "You've already caught a {}!", name)?;
            return Ok(());
        }

        let pokemon = match self.client.pokemon(name).await {
            Ok(pokemon) => pokemon,
            Err(e) if e.is_not_found() => {
                writeln!(out, "Pokemon not found!")?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        writeln!(out, "Throwing a Pokeball at {}...", name)?;
        let chance = catch_chance(pokemon.base_experience);
        writeln!(out, "You have a {:.0}% chance of catching {}!", chance * 100.0, name)?;

        if roll(&mut self.rng, chance) {
            writeln!(out, "{} was caught!", name)?;
            writeln!(out, "You may now inspect it with the inspect command.")?;
            self.pokedex.insert(
                name.to_string(),
                CaughtPokemon {
                    pokemon,
                    caught_at: Utc::now(),
                },
            );
        } else {
            writeln!(out, "{} escaped!", name)?;
        }
        Ok(())
    }

    fn inspect<W: Write>(&self, name: &str, out: &mut W) -> Result<()> {
        let Some(caught) = self.pokedex.get(name) else {
            writeln!(out, "You haven't caught {} yet!", name)?;
            return Ok(());
        };
        let pokemon = &caught.pokemon;

        writeln!(out, "Name: {}", pokemon.name)?;
        writeln!(out, "Height: {}", pokemon.height)?;
        writeln!(out, "Weight: {}", pokemon.weight)?;
        writeln!(out, "Stats:")?;
        for stat in &pokemon.stats {
            writeln!(out, "\t-{}: {}", stat.stat.name, stat.base_stat)?;
        }
        writeln!(out, "Types:")?;
        for kind in &pokemon.types {
            writeln!(out, "\t-{}", kind.kind.name)?;
        }
        writeln!(
            out,
            "Caught: {}",
            caught.caught_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        Ok(())
    }

    fn list_pokedex<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.pokedex.is_empty() {
            writeln!(out, "You haven't caught any Pokemon!")?;
            return Ok(());
        }

        writeln!(out, "Your Pokedex:")?;
        for name in self.pokedex.keys() {
            writeln!(out, "\t-{}", name)?;
        }
        Ok(())
    }
}
