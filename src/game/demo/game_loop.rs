//! Interactive terminal loop.
//!
//! Reads one command per line, turns it into an engine action, saves the
//! resulting snapshot and prints the table.

use std::io::{self, Write};
use std::path::PathBuf;

use log::warn;
use uuid::Uuid;

use crate::config::game::DEFAULT_VICTORY_POINTS;
use crate::game::dice::{DiceSource, RngDice};
use crate::game::engine::{Action, apply, roll_for_order, try_apply};
use crate::game::setup::{PlayerSetup, SetupConfig};
use crate::game::state::Game;
use crate::game::systems::render::print_game_state;
use crate::game::types::{PieceColor, Position};
use crate::store::{History, JsonFileStore, SnapshotStore, should_persist};

const RECENT_LOG_LINES: usize = 6;

const HELP: &str = "\
Commands:
  setup [points] name:color[+color2] ...   start a game (colors: red blue green yellow)
  order [seat=roll ...]                    roll for first player (no args: everyone, or the tied players)
  seat <seat> <seat> ...                   set the turn order directly
  roll                                     roll the die for the current player
  place <cell> [color]                     place a piece, e.g. `place C3` or `place A1 blue`
  topple [seat]                            declare a topple (default: current player)
  end                                      end the round now
  next                                     start the next round
  undo | redo                              step through history
  reset                                    discard the game
  show | help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Setup(SetupConfig),
    /// `(seat, roll)` pairs, seats 1-based. Empty means roll for everyone,
    /// or for the tied players after a tie.
    Order(Vec<(usize, u8)>),
    Seat(Vec<usize>),
    Roll,
    Place {
        position: Position,
        color: Option<PieceColor>,
    },
    Topple(Option<usize>),
    EndRound,
    NextRound,
    Undo,
    Redo,
    Reset,
    Show,
    Help,
    Quit,
}

fn parse_seat(token: &str) -> Result<usize, String> {
    token
        .parse::<usize>()
        .ok()
        .filter(|s| *s >= 1)
        .ok_or_else(|| format!("`{token}` is not a seat number"))
}

fn parse_color(token: &str) -> Result<PieceColor, String> {
    PieceColor::from_name(token).ok_or_else(|| format!("unknown color `{token}`"))
}

fn parse_setup(args: &[&str]) -> Result<SetupConfig, String> {
    let (victory_points, seats) = match args.first().and_then(|a| a.parse::<i32>().ok()) {
        Some(points) => (points, &args[1..]),
        None => (DEFAULT_VICTORY_POINTS, args),
    };
    let mut players = Vec::new();
    for (i, seat) in seats.iter().enumerate() {
        let (name, colors) = seat
            .split_once(':')
            .ok_or_else(|| format!("expected name:color, got `{seat}`"))?;
        let (color, color2) = match colors.split_once('+') {
            Some((a, b)) => (parse_color(a)?, Some(parse_color(b)?)),
            None => (parse_color(colors)?, None),
        };
        players.push(PlayerSetup {
            name: name.to_string(),
            color,
            color2,
            order: i as u8 + 1,
        });
    }
    Ok(SetupConfig {
        players,
        victory_points,
    })
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&name, args)) = tokens.split_first() else {
        return Ok(Command::Show);
    };

    match name.to_ascii_lowercase().as_str() {
        "setup" => parse_setup(args).map(Command::Setup),
        "order" => args
            .iter()
            .map(|arg| -> Result<(usize, u8), String> {
                let (seat, roll) = arg
                    .split_once('=')
                    .ok_or_else(|| format!("expected seat=roll, got `{arg}`"))?;
                let roll = roll
                    .parse::<u8>()
                    .ok()
                    .filter(|r| (1..=6).contains(r))
                    .ok_or_else(|| format!("`{roll}` is not a die face"))?;
                Ok((parse_seat(seat)?, roll))
            })
            .collect::<Result<Vec<_>, String>>()
            .map(Command::Order),
        "seat" => args
            .iter()
            .map(|a| parse_seat(a))
            .collect::<Result<Vec<_>, String>>()
            .map(Command::Seat),
        "roll" => Ok(Command::Roll),
        "place" => {
            let cell = args.first().ok_or("place needs a cell, e.g. C3")?;
            let position =
                Position::parse(cell).ok_or_else(|| format!("`{cell}` is not a cell (A1..E5)"))?;
            let color = args.get(1).map(|c| parse_color(c)).transpose()?;
            Ok(Command::Place { position, color })
        }
        "topple" => args
            .first()
            .map(|s| parse_seat(s))
            .transpose()
            .map(Command::Topple),
        "end" => Ok(Command::EndRound),
        "next" => Ok(Command::NextRound),
        "undo" => Ok(Command::Undo),
        "redo" => Ok(Command::Redo),
        "reset" => Ok(Command::Reset),
        "show" => Ok(Command::Show),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command `{other}`, try `help`")),
    }
}

fn seat_id(game: &Game, seat: usize) -> Result<Uuid, String> {
    seat.checked_sub(1)
        .and_then(|i| game.players.get(i))
        .map(|p| p.id)
        .ok_or_else(|| format!("there is no seat {seat}"))
}

/// Turn a game command into an engine action.
pub fn to_action(
    command: Command,
    game: Option<&Game>,
    dice: &mut dyn DiceSource,
) -> Result<Action, String> {
    let require_game = || game.ok_or_else(|| "no game yet, use `setup`".to_string());
    match command {
        Command::Setup(config) => Ok(Action::Setup(config)),
        Command::Order(pairs) => {
            let game = require_game()?;
            let rolls = if pairs.is_empty() {
                // After a tie only the tied players roll again.
                let ids: Vec<Uuid> = if game.order_tie.is_empty() {
                    game.players.iter().map(|p| p.id).collect()
                } else {
                    game.order_tie.clone()
                };
                let rolls = roll_for_order(&ids, dice);
                for (id, roll) in &rolls {
                    if let Some(player) = game.player(*id) {
                        println!("{} rolls {}", player.name, roll);
                    }
                }
                rolls
            } else {
                pairs
                    .into_iter()
                    .map(|(seat, roll)| seat_id(game, seat).map(|id| (id, roll)))
                    .collect::<Result<Vec<_>, String>>()?
            };
            Ok(Action::InitialOrder {
                rolls,
                order_override: None,
            })
        }
        Command::Seat(seats) => {
            let game = require_game()?;
            let ids = seats
                .into_iter()
                .map(|seat| seat_id(game, seat))
                .collect::<Result<Vec<_>, String>>()?;
            Ok(Action::InitialOrder {
                rolls: Vec::new(),
                order_override: Some(ids),
            })
        }
        Command::Roll => Ok(Action::RollDice),
        Command::Place { position, color } => Ok(Action::PlacePiece { position, color }),
        Command::Topple(seat) => {
            let player_id = match seat {
                Some(seat) => Some(seat_id(require_game()?, seat)?),
                None => None,
            };
            Ok(Action::ToggleTopple { player_id })
        }
        Command::EndRound => Ok(Action::EndRound),
        Command::NextRound => Ok(Action::StartNewRound),
        Command::Reset => Ok(Action::Reset),
        Command::Undo | Command::Redo | Command::Show | Command::Help | Command::Quit => {
            Err("not a game action".to_string())
        }
    }
}

fn persist(store: &mut JsonFileStore, game: Option<&Game>) {
    let result = match game {
        Some(game) if should_persist(game) => store.save(game),
        Some(_) => Ok(()),
        None => store.clear(),
    };
    if let Err(e) = result {
        warn!("[Store] could not update {}: {}", store.path().display(), e);
    }
}

fn show(game: Option<&Game>) {
    match game {
        Some(game) => print_game_state(game, RECENT_LOG_LINES),
        None => println!("No game. Type `help` for commands."),
    }
}

/// Run the loop until `quit` or end of input.
pub fn run_game_loop(save_path: PathBuf) -> io::Result<()> {
    let mut store = JsonFileStore::new(save_path);
    let mut history = History::default();
    let mut dice = RngDice::system();

    let mut game = store.load().unwrap_or_else(|e| {
        warn!("[Store] could not read {}: {}", store.path().display(), e);
        None
    });
    show(game.as_ref());

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if stdin.read_line(&mut input)? == 0 {
            break;
        }

        let command = match parse_command(&input) {
            Ok(command) => command,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => println!("{HELP}"),
            Command::Show => show(game.as_ref()),
            Command::Undo | Command::Redo => {
                let Some(current) = game.as_ref() else {
                    println!("Nothing to undo");
                    continue;
                };
                let step = if command == Command::Undo {
                    history.undo(current)
                } else {
                    history.redo(current)
                };
                match step {
                    Ok(Some(snapshot)) => {
                        game = apply(game, Action::Load(Box::new(snapshot)), &mut dice);
                        persist(&mut store, game.as_ref());
                        show(game.as_ref());
                    }
                    Ok(None) => println!("Nothing to {}", if command == Command::Undo { "undo" } else { "redo" }),
                    Err(e) => warn!("[Store] history entry unreadable: {}", e),
                }
            }
            command => {
                let action = match to_action(command, game.as_ref(), &mut dice) {
                    Ok(action) => action,
                    Err(message) => {
                        println!("{message}");
                        continue;
                    }
                };
                match try_apply(game.as_ref(), action, &mut dice) {
                    Ok(next) => {
                        match (&game, &next) {
                            (Some(previous), Some(_)) => {
                                if let Err(e) = history.record(previous) {
                                    warn!("[Store] could not record history: {}", e);
                                }
                            }
                            (_, None) => history.clear(),
                            (None, Some(_)) => {}
                        }
                        game = next;
                        persist(&mut store, game.as_ref());
                        show(game.as_ref());
                    }
                    Err(reason) => println!("Cannot do that: {reason}"),
                }
            }
        }
    }
    Ok(())
}
