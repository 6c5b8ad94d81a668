pub mod decide;
pub mod play;
pub mod search;

use std::{fs::read_to_string, path::Path};

use clap::Subcommand;
use color_eyre::eyre::{eyre, Result, WrapErr};
use pacai_rs::{AgentOptions, Layout};

use decide::Decide;
use play::Play;
use search::Search;

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Find a route from Pacman to a goal with one of the graph searches
    Search(Search),
    /// Ask an agent which move it would make from the start of a layout
    Decide(Decide),
    /// Play a whole game with a Pacman agent against random ghosts
    Play(Play),
}

impl Command {
    pub fn run(self) -> Result<()> {
        match self {
            Command::Search(s) => s.run()?,
            Command::Decide(d) => d.run()?,
            Command::Play(p) => p.run()?,
        }

        Ok(())
    }
}

pub(crate) fn load_layout(path: &Path) -> Result<Layout> {
    let text = read_to_string(path)
        .wrap_err_with(|| format!("Couldn't read layout {}", path.display()))?;

    text.parse::<Layout>()
        .map_err(|e| eyre!("{:#}", e))
        .wrap_err_with(|| format!("Couldn't parse layout {}", path.display()))
}

/// Start from the options file, if there is one
pub(crate) fn load_options(path: Option<&Path>) -> Result<AgentOptions> {
    let Some(path) = path else {
        return Ok(AgentOptions::default());
    };

    let text = read_to_string(path)
        .wrap_err_with(|| format!("Couldn't read options {}", path.display()))?;

    serde_json::from_str(&text)
        .wrap_err_with(|| format!("Couldn't parse options {}", path.display()))
}
