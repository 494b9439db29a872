//! Interactive "20 questions" shell on top of a [FactTree].
//!
//! The shell is a small state machine: every [State] is handled by
//! [Session::step], which talks to the user through a [Console] and returns
//! the next state. [Session::run] steps from [State::Menu] until
//! [State::Exit] is reached or input is closed.
//!
//! Engine failures (unknown names, syntax errors in a loaded file, ...) are
//! reported through [Console::warn] and lead back to the menu; only I/O
//! errors of the console itself end a session.

pub mod console;

pub use console::{Console, StdConsole};

use crate::format::write_dot_file;
use crate::model::{FactTree, NodeIndex};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default target of [State::Dump].
pub const DEFAULT_DOT_FILE: &str = "fact_tree.dot";

const MENU: &str = "\
Commands:
  g - guess an object
  d - define an object
  c - compare two objects
  l - load a knowledge base
  s - save the knowledge base
  v - export the tree as Graphviz file
  q - quit";

/// States of the interactive shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Show the commands and read the next one
    Menu,
    /// Play a round: ask qualifiers, guess, learn on a wrong guess
    Guess,
    /// Show the definition of one entity
    Definition,
    /// Show the difference of two entities
    Difference,
    /// Replace the knowledge base with the content of a file
    Load,
    /// Write the knowledge base to a file
    Save,
    /// Write a Graphviz export of the tree
    Dump,
    /// Terminal state
    Exit,
}

impl State {
    /// Maps a menu command to its state, `None` for unknown commands.
    pub fn from_command(command: &str) -> Option<State> {
        let state = match command.trim().chars().next()?.to_ascii_lowercase() {
            'g' => State::Guess,
            'd' => State::Definition,
            'c' => State::Difference,
            'l' => State::Load,
            's' => State::Save,
            'v' => State::Dump,
            'q' | 'x' => State::Exit,
            _ => return None,
        };
        Some(state)
    }
}

// =#========================================================================#=
// SESSION
// =#========================================================================$=
/// An interactive session: a knowledge base and the console it is played on.
pub struct Session<C: Console> {
    tree: FactTree,
    console: C,
    db_path: Option<PathBuf>,
}

impl<C: Console> Session<C> {
    /// Creates a session playing on `tree`.
    pub fn new(tree: FactTree, console: C) -> Self {
        Self {
            tree,
            console,
            db_path: None,
        }
    }

    /// Sets the file offered as default when loading or saving.
    pub fn with_db_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.db_path = Some(path.into());
        self
    }

    /// The knowledge base of this session.
    pub fn tree(&self) -> &FactTree {
        &self.tree
    }

    /// The console of this session.
    pub fn console(&self) -> &C {
        &self.console
    }

    /// Ends the session, handing back knowledge base and console.
    pub fn into_parts(self) -> (FactTree, C) {
        (self.tree, self.console)
    }

    /// Steps through the states, starting at the menu, until [State::Exit].
    ///
    /// Closed input ends the session normally.
    pub fn run(&mut self) -> io::Result<()> {
        let mut state = State::Menu;
        while state != State::Exit {
            state = match self.step(state) {
                Ok(next) => next,
                Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => {
                    debug!("input closed, ending session");
                    State::Exit
                }
                Err(err) => return Err(err),
            };
        }
        info!(size = self.tree.size(), "session ended");
        Ok(())
    }

    /// Handles one state and returns the next one.
    ///
    /// # Errors
    /// Only I/O errors of the console; engine errors are shown to the user.
    pub fn step(&mut self, state: State) -> io::Result<State> {
        debug!(?state, "shell step");
        match state {
            State::Menu => self.menu(),
            State::Guess => self.play(),
            State::Definition => self.define(),
            State::Difference => self.compare(),
            State::Load => self.load(),
            State::Save => self.save(),
            State::Dump => self.dump(),
            State::Exit => Ok(State::Exit),
        }
    }

    fn menu(&mut self) -> io::Result<State> {
        self.console.say(MENU)?;
        let Some(command) = self.console.ask_line("> ")? else {
            return Ok(State::Exit);
        };
        match State::from_command(&command) {
            Some(state) => Ok(state),
            None => {
                self.console
                    .warn(&format!("Unknown command '{}'", command.trim()))?;
                Ok(State::Menu)
            }
        }
    }

    fn play(&mut self) -> io::Result<State> {
        let console = &mut self.console;
        let Some(leaf) = self.tree.try_guess(|qualifier| console.ask_qualifier(qualifier))? else {
            self.console.warn("The knowledge base is empty, load one first.")?;
            return Ok(State::Menu);
        };

        let guessed = self.tree.text_of(leaf).to_owned();
        if self.console.ask_yes_no(&format!("Is it {guessed}? [y/N]: "))? {
            self.console.say("Guessed it!")?;
            return Ok(State::Menu);
        }

        let Some(entity) = self.ask_non_empty("What is it then? ")? else {
            return Ok(State::Menu);
        };
        let Some(difference) =
            self.ask_non_empty(&format!("What does {entity} have that {guessed} does not? "))?
        else {
            return Ok(State::Menu);
        };

        match self.tree.insert(leaf, entity, difference) {
            Ok(learned) => {
                let definition = self
                    .tree
                    .get_definition(learned)
                    .map_err(io::Error::other)?;
                self.console.say(&format!("Learned: {definition}"))?;
            }
            Err(err) => self.console.warn(&format!("Cannot learn that: {err}"))?,
        }
        Ok(State::Menu)
    }

    fn define(&mut self) -> io::Result<State> {
        let Some(name) = self.ask_non_empty("Define which object? ")? else {
            return Ok(State::Menu);
        };
        if let Some(leaf) = self.find(&name)? {
            match self.tree.get_definition(leaf) {
                Ok(definition) => self.console.say(&definition)?,
                Err(err) => self.console.warn(&err.to_string())?,
            }
        }
        Ok(State::Menu)
    }

    fn compare(&mut self) -> io::Result<State> {
        let Some(first) = self.ask_non_empty("First object: ")? else {
            return Ok(State::Menu);
        };
        let Some(second) = self.ask_non_empty("Second object: ")? else {
            return Ok(State::Menu);
        };
        let (Some(first), Some(second)) = (self.find(&first)?, self.find(&second)?) else {
            return Ok(State::Menu);
        };
        match self.tree.get_difference(first, second) {
            Ok(difference) => self.console.say(&difference)?,
            Err(err) => self.console.warn(&err.to_string())?,
        }
        Ok(State::Menu)
    }

    fn load(&mut self) -> io::Result<State> {
        let Some(path) = self.ask_path("Load from", self.db_path.clone())? else {
            return Ok(State::Menu);
        };
        match self.tree.load(&path) {
            Ok(()) => {
                self.console.say(&format!(
                    "Loaded {} objects from {}",
                    self.tree.num_leaves(),
                    path.display()
                ))?;
                self.db_path = Some(path);
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "load failed");
                self.console.warn(&format!("Cannot load {}: {err}", path.display()))?;
            }
        }
        Ok(State::Menu)
    }

    fn save(&mut self) -> io::Result<State> {
        let Some(path) = self.ask_path("Save to", self.db_path.clone())? else {
            return Ok(State::Menu);
        };
        match self.tree.save(&path) {
            Ok(()) => {
                self.console.say(&format!("Saved to {}", path.display()))?;
                self.db_path = Some(path);
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "save failed");
                self.console.warn(&format!("Cannot save {}: {err}", path.display()))?;
            }
        }
        Ok(State::Menu)
    }

    fn dump(&mut self) -> io::Result<State> {
        let default = Some(PathBuf::from(DEFAULT_DOT_FILE));
        let Some(path) = self.ask_path("Export to", default)? else {
            return Ok(State::Menu);
        };
        match write_dot_file(&self.tree, &path) {
            Ok(()) => self.console.say(&format!("Exported to {}", path.display()))?,
            Err(err) => self.console.warn(&format!("Cannot export {}: {err}", path.display()))?,
        }
        Ok(State::Menu)
    }

    // ---- helpers ----

    /// Finds an entity by name, telling the user if it is unknown.
    fn find(&mut self, name: &str) -> io::Result<Option<NodeIndex>> {
        let found = self.tree.find_by_name(name);
        if found.is_none() {
            self.console.warn(&format!("I don't know '{name}'"))?;
        }
        Ok(found)
    }

    /// Asks for a trimmed, non-empty answer; `None` if the user gave none.
    fn ask_non_empty(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let Some(answer) = self.console.ask_line(prompt)? else {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        };
        let answer = answer.trim();
        if answer.is_empty() {
            self.console.warn("No answer given.")?;
            return Ok(None);
        }
        Ok(Some(answer.to_owned()))
    }

    /// Asks for a path, falling back to `default` on an empty answer.
    fn ask_path(&mut self, verb: &str, default: Option<PathBuf>) -> io::Result<Option<PathBuf>> {
        let prompt = match &default {
            Some(path) => format!("{verb} [{}]: ", path.display()),
            None => format!("{verb}: "),
        };
        let Some(answer) = self.console.ask_line(&prompt)? else {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        };
        let answer = answer.trim();
        if !answer.is_empty() {
            return Ok(Some(Path::new(answer).to_path_buf()));
        }
        if default.is_none() {
            self.console.warn("No file given.")?;
        }
        Ok(default)
    }
}
