//! Line-oriented interactive session over a [`MatchController`].

use std::io::Write;
use std::str::FromStr;

use match_state::{MatchController, Oracle, Square, UciMove};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::display::render_state;

const HELP: &str = "\
Commands:
  select <sq>     select a piece, e.g. `select e2`
  move <sq>       move the selected piece, e.g. `move e4`
  <from><to>      select and move in one step, e.g. `e2e4`
  refresh         ask the oracle for the current position again
  reset           clear the move history and start over
  history         list the moves played so far
  show            print the board
  help            show this text
  quit            leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Select(String),
    Move(String),
    SelectAndMove { from: String, to: String },
    Refresh,
    Reset,
    History,
    Show,
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("`{0}` needs a square, e.g. `{0} e2`")]
    MissingSquare(&'static str),
    #[error("Unknown command `{0}` (try `help`)")]
    Unknown(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(CommandError::Empty);
        };
        let arg = words.next().map(str::to_string);
        match head.to_ascii_lowercase().as_str() {
            "select" | "s" => arg.map(Self::Select).ok_or(CommandError::MissingSquare("select")),
            "move" | "m" => arg.map(Self::Move).ok_or(CommandError::MissingSquare("move")),
            "refresh" => Ok(Self::Refresh),
            "reset" => Ok(Self::Reset),
            "history" => Ok(Self::History),
            "show" | "board" => Ok(Self::Show),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            word if word.len() == 4 && word.is_ascii() => Ok(Self::SelectAndMove {
                from: word[..2].to_string(),
                to: word[2..].to_string(),
            }),
            _ => Err(CommandError::Unknown(head.to_string())),
        }
    }
}

/// "1. e2e4 e7e5 2. g1f3", counting full moves from the first ply.
fn numbered<'a>(moves: impl Iterator<Item = &'a UciMove>) -> String {
    let mut out = String::new();
    for (ply, mv) in moves.enumerate() {
        if ply > 0 {
            out.push(' ');
        }
        if ply % 2 == 0 {
            out.push_str(&format!("{}. ", ply / 2 + 1));
        }
        out.push_str(&mv.to_string());
    }
    out
}

/// What the loop should do after a command.
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    Say(String),
    Silent,
    Quit,
}

pub struct Console<O> {
    controller: MatchController<O>,
}

impl<O: Oracle> Console<O> {
    pub fn new(controller: MatchController<O>) -> Self {
        Self { controller }
    }

    #[cfg(test)]
    pub fn controller(&self) -> &MatchController<O> {
        &self.controller
    }

    pub async fn execute(&mut self, command: Command) -> Reply {
        tracing::debug!("Executing {:?}", command);
        match command {
            Command::Select(square) => self.select(&square),
            Command::Move(square) => self.move_to(&square).await,
            Command::SelectAndMove { from, to } => match self.select(&from) {
                Reply::Silent => self.move_to(&to).await,
                other => other,
            },
            Command::Refresh => match self.controller.refresh().await {
                Ok(()) => Reply::Silent,
                Err(e) => Reply::Say(format!("Refresh failed: {}", e)),
            },
            Command::Reset => match self.controller.reset_match().await {
                Ok(()) => Reply::Silent,
                Err(e) => Reply::Say(format!("Reset failed: {}", e)),
            },
            Command::History => {
                let history = self.controller.history();
                if history.is_empty() {
                    Reply::Say("No moves yet".to_string())
                } else {
                    Reply::Say(numbered(history.iter()))
                }
            }
            Command::Show => Reply::Say(render_state(self.controller.state())),
            Command::Help => Reply::Say(HELP.to_string()),
            Command::Quit => Reply::Quit,
        }
    }

    fn select(&mut self, square: &str) -> Reply {
        if let Err(e) = square.parse::<Square>() {
            return Reply::Say(e.to_string());
        }
        if self.controller.select_square(square) {
            Reply::Silent
        } else {
            Reply::Say(format!("No legal moves from {}", square.trim()))
        }
    }

    async fn move_to(&mut self, square: &str) -> Reply {
        match self.controller.try_move_selected_to(square).await {
            Ok(()) => Reply::Silent,
            Err(e) => Reply::Say(e.to_string()),
        }
    }

    /// Read commands from `input` until `quit` or end of input.
    pub async fn run<R>(&mut self, input: R) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        loop {
            print!("> ");
            std::io::stdout().flush()?;
            let Some(line) = lines.next_line().await? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }
            let reply = match line.parse::<Command>() {
                Ok(command) => self.execute(command).await,
                Err(e) => Reply::Say(e.to_string()),
            };
            match reply {
                Reply::Say(text) => println!("{}", text),
                Reply::Silent => {}
                Reply::Quit => break,
            }
        }
        tracing::info!("Session ended after {} moves", self.controller.history().len());
        Ok(())
    }
}
