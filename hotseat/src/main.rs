use std::{
    fmt,
    io::{self, BufRead, Write},
    thread,
    time::{Duration, Instant},
};

use clap::{value_t, App, Arg, ArgMatches};
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;

use seabattle::{
    board::{BOARD_SIZE, ROW_LABELS},
    Board, Coordinate, Phase, Player, Session, SessionError, ShotOutcome,
};

/// Settings taken from the command line.
struct Config {
    names: [String; 2],
    turn_delay: Duration,
    random_fleet: bool,
}

impl Config {
    fn from_matches(matches: &ArgMatches) -> Self {
        let name = |arg, default: &str| matches.value_of(arg).unwrap_or(default).to_owned();
        let delay = value_t!(matches, "turn_delay", u64).unwrap_or_else(|e| e.exit());
        Self {
            names: [name("player_one", "Player 1"), name("player_two", "Player 2")],
            turn_delay: Duration::from_millis(delay),
            random_fleet: matches.is_present("random_fleet"),
        }
    }
}

fn main() -> io::Result<()> {
    pretty_env_logger::init();

    let matches = App::new("Sea Battle")
        .version("1.0")
        .author("Zachary Stewart <zachary@zstewart.com>")
        .about("Two-player hot-seat Sea Battle on one terminal.")
        .arg(
            Arg::with_name("player_one")
                .long("player-one")
                .value_name("NAME")
                .help("name of the player who places and fires first")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("player_two")
                .long("player-two")
                .value_name("NAME")
                .help("name of the second player")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("turn_delay")
                .short("d")
                .long("turn-delay")
                .value_name("MS")
                .help("pause before handing the terminal to the other player, 0 to disable")
                .takes_value(true)
                .default_value("1500"),
        )
        .arg(
            Arg::with_name("random_fleet")
                .short("r")
                .long("random-fleet")
                .help("place both fleets at random and go straight to battle"),
        )
        .get_matches();
    let config = Config::from_matches(&matches);

    let stdin = std::io::stdin();
    let mut input = InputReader::new(stdin.lock());
    let mut session = Session::new(config.names[0].clone(), config.names[1].clone());

    loop {
        let flow = match session.phase() {
            Phase::Placement if config.random_fleet => random_placement(&mut session),
            Phase::Placement => placement_turn(&mut session, &config, &mut input)?,
            Phase::Battle => battle_turn(&mut session, &config, &mut input)?,
            Phase::Finished => game_over(&session, &mut input)?,
        };
        match flow {
            Flow::Continue => {}
            Flow::Reset => {
                info!("players asked for a new game");
                session.reset();
            }
            Flow::Quit => break,
        }
    }
    Ok(())
}

/// What the main loop should do after a turn.
enum Flow {
    Continue,
    Reset,
    Quit,
}

/// Place both fleets without asking the players.
fn random_placement(session: &mut Session) -> Flow {
    let mut rng = rand::thread_rng();
    while session.phase() == Phase::Placement {
        let player = session.active();
        let placed = session
            .fill_fleet(&mut rng)
            .and_then(|_| session.mark_ready());
        if let Err(err) = placed {
            // Start both fleets over rather than leave one player placed.
            debug!("random fleet for {} failed: {}", session.name(player), err);
            println!("Could not place a random fleet: {}", err);
            return Flow::Reset;
        }
        println!("{} placed a random fleet.", session.name(player));
    }
    Flow::Continue
}

/// Let the active player place their fleet until they mark themselves ready.
fn placement_turn(
    session: &mut Session,
    config: &Config,
    input: &mut InputReader<impl BufRead>,
) -> io::Result<Flow> {
    enum Command {
        Place(Vec<Coordinate>),
        Random,
        Ready,
        Reset,
        Quit,
        Help,
    }
    static PLACE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^(?:place|put|p)\s+(?P<cells>.+)$").unwrap());

    let player = session.active();
    println!();
    println!(
        "{}, place your fleet. Type help or ? for commands.",
        session.name(player)
    );
    loop {
        if session.phase() != Phase::Placement || session.active() != player {
            break;
        }
        let board = session.board(player);
        println!();
        if board.fleet_complete() {
            println!("All ships placed, type ready to hand over.");
        } else {
            println!("Ships left to place: {}", board.fleet());
        }
        show_board(board, true);
        println!();

        let cmd = input.read_input_lower(">", |line| match line {
            "?" | "help" | "h" => Some(Command::Help),
            "random" | "rand" | "randomize" => Some(Command::Random),
            "ready" | "done" => Some(Command::Ready),
            "reset" => Some(Command::Reset),
            "quit" | "exit" | "q" => Some(Command::Quit),
            other => match PLACE.captures(other) {
                Some(captures) => match parse_cells(&captures["cells"]) {
                    Ok(cells) => Some(Command::Place(cells)),
                    Err(msg) => {
                        println!("{}", msg);
                        None
                    }
                },
                None => {
                    println!("Invalid placement command \"{}\". Use '?' for help", other);
                    None
                }
            },
        })?;

        match cmd {
            Command::Place(cells) => match session.place_ship(cells) {
                Ok(_) => {}
                Err(SessionError::Place(err)) => println!("Invalid placement: {}.", err.reason()),
                Err(err) => println!("{}", err),
            },
            Command::Random => {
                if let Err(err) = session.fill_fleet(&mut rand::thread_rng()) {
                    println!("{}. Place a ship by hand or reset.", err);
                }
            }
            Command::Ready => match session.mark_ready() {
                Ok(()) => {
                    if session.phase() == Phase::Placement {
                        Handover::new(config.turn_delay, session.name(session.active())).wait();
                    }
                }
                Err(err) => println!("Not yet: {}.", err),
            },
            Command::Reset => return Ok(Flow::Reset),
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => {
                println!(
                    "Available Commands:
    place <cells>       place a ship on the listed cells, e.g. \"place 1А 2А 3А\".
    place <from>-<to>   place a ship on a straight run of cells, e.g. \"place 1А-3А\".
        Rows are А to К; Latin A to J work as well.
    random              place the rest of the fleet at random.
    ready               finish placement once the whole fleet is on the board.
    reset               throw away both boards and start over.
    quit                leave the game.

Ships may not touch each other, not even at the corners.
Board symbols: S ship, . no placement allowed, ~ open water."
                );
            }
        }
    }
    Ok(Flow::Continue)
}

/// Let the active player fire until they miss or win.
fn battle_turn(
    session: &mut Session,
    config: &Config,
    input: &mut InputReader<impl BufRead>,
) -> io::Result<Flow> {
    enum Command {
        Fire(Coordinate),
        Reset,
        Quit,
        Help,
    }
    static FIRE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^(?:(?:fire|shoot|f)\s+)?(?:at\s+)?(?P<coord>\S+)$").unwrap());

    let shooter = session.active();
    let target = shooter.opponent();
    println!();
    println!(
        "{}, your turn. Type a cell like 5Г to fire, or help.",
        session.name(shooter)
    );
    while session.phase() == Phase::Battle {
        println!();
        println!(
            "Enemy waters ({} ships afloat):",
            session.board(target).ships_afloat()
        );
        show_board(session.board(target), false);
        println!("Your fleet:");
        show_board(session.board(shooter), true);
        println!();

        let cmd = input.read_input_lower(">", |line| match line {
            "?" | "help" | "h" => Some(Command::Help),
            "reset" => Some(Command::Reset),
            "quit" | "exit" | "q" => Some(Command::Quit),
            other => match FIRE.captures(other) {
                Some(captures) => match captures["coord"].parse() {
                    Ok(coord) => Some(Command::Fire(coord)),
                    Err(err) => {
                        println!("{}", err);
                        None
                    }
                },
                None => {
                    println!("Invalid command \"{}\". Use '?' for help", other);
                    None
                }
            },
        })?;

        match cmd {
            Command::Fire(coord) => match session.fire_as(shooter, coord) {
                Ok(outcome) => {
                    println!("{}", Report(&outcome));
                    if outcome.passes_turn() {
                        Handover::new(config.turn_delay, session.name(target)).wait();
                        break;
                    }
                }
                Err(SessionError::Shot(err)) => println!("Can't fire there: {}.", err.reason()),
                Err(err) => println!("{}", err),
            },
            Command::Reset => return Ok(Flow::Reset),
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => {
                println!(
                    "Available Commands:
    fire <cell>     fire at a cell of the enemy board, e.g. \"fire 5Г\" or just \"5Г\".
    reset           abandon this battle and place new fleets.
    quit            leave the game.

A hit lets you fire again; a miss passes the turn.
Board symbols: X hit, O miss, S your ship, ~ unknown water."
                );
            }
        }
    }
    Ok(Flow::Continue)
}

/// Show both boards uncovered and ask whether to play again.
fn game_over(session: &Session, input: &mut InputReader<impl BufRead>) -> io::Result<Flow> {
    if let Some(winner) = session.winner() {
        println!();
        println!("{} wins!", session.name(winner));
    }
    for &player in Player::BOTH.iter() {
        println!();
        println!("{}'s fleet:", session.name(player));
        show_board(session.board(player), true);
    }
    println!();
    input.read_input_lower("Play again? (Y/n)", |line| match line {
        "yes" | "y" | "" => Some(Flow::Reset),
        "no" | "n" | "quit" | "q" => Some(Flow::Quit),
        _ => {
            println!("Invalid selection.");
            None
        }
    })
}

/// Parse the cells of a placement: either a list like `1А 2А 3А` or a run like `1А-3А`.
fn parse_cells(text: &str) -> Result<Vec<Coordinate>, String> {
    static RUN: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^(?P<from>\S+)\s*-\s*(?P<to>\S+)$").unwrap());

    let parse = |cell: &str| {
        cell.parse::<Coordinate>()
            .map_err(|err| format!("Invalid cell: {}", err))
    };
    if let Some(captures) = RUN.captures(text) {
        let from = parse(&captures["from"])?;
        let to = parse(&captures["to"])?;
        if from.row == to.row {
            let (lo, hi) = (from.col.min(to.col), from.col.max(to.col));
            Ok((lo..=hi).map(|col| Coordinate::new(col, from.row)).collect())
        } else if from.col == to.col {
            let (lo, hi) = (from.row.min(to.row), from.row.max(to.row));
            Ok((lo..=hi).map(|row| Coordinate::new(from.col, row)).collect())
        } else {
            Err(format!("{} and {} are not in one row or column", from, to))
        }
    } else {
        text.split(|c: char| c == ',' || c.is_whitespace())
            .filter(|cell| !cell.is_empty())
            .map(parse)
            .collect()
    }
}

/// Print a board as a grid with column numbers across the top and row letters down the
/// side.
fn show_board(board: &Board, owner_view: bool) {
    print!("   ");
    for col in 1..=BOARD_SIZE {
        print!("{:>3}", col);
    }
    println!();
    for (label, row) in ROW_LABELS.iter().zip(board.rows()) {
        print!("{:>2} ", label);
        for cell in row {
            print!("{:>3}", cell.display_state(owner_view).symbol());
        }
        println!();
    }
}

/// Display helper describing the result of a shot.
struct Report<'a>(&'a ShotOutcome);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            ShotOutcome::Miss => f.write_str("Miss."),
            ShotOutcome::Hit(_) => f.write_str("Hit! Fire again."),
            ShotOutcome::Sunk(id) => write!(f, "Hit and sunk ({})! Fire again.", id),
            ShotOutcome::Defeated(id) => write!(f, "Hit and sunk ({}), that was the last one!", id),
        }
    }
}

/// Pause between turns so that the next player can take the terminal before their board
/// is printed.
struct Handover<'a> {
    deadline: Option<Instant>,
    next: &'a str,
}

impl<'a> Handover<'a> {
    /// Schedule a handover to the named player. A zero delay skips the pause entirely.
    fn new(delay: Duration, next: &'a str) -> Self {
        let deadline = if delay == Duration::from_millis(0) {
            None
        } else {
            Some(Instant::now() + delay)
        };
        Self { deadline, next }
    }

    /// Block until the delay has passed, then clear the previous player's boards off the
    /// screen.
    fn wait(self) {
        let deadline = match self.deadline {
            Some(deadline) => deadline,
            None => return,
        };
        println!("Pass the terminal to {}...", self.next);
        let now = Instant::now();
        if deadline > now {
            thread::sleep(deadline - now);
        }
        for _ in 0..BOARD_SIZE * 4 {
            println!();
        }
    }
}

/// Helper to read input from the player.
struct InputReader<B> {
    read: B,
    buf: String,
}

impl<B> InputReader<B> {
    fn new(read: B) -> Self {
        Self {
            read,
            buf: String::new(),
        }
    }
}

impl<B: BufRead> InputReader<B> {
    /// Repeatedly tries to read input until the input checker returns `Some`. Converts
    /// to lower case before running the checker; Cyrillic row letters are lowered too,
    /// which coordinate parsing accepts.
    fn read_input_lower<F, T>(&mut self, prompt: &str, mut checker: F) -> io::Result<T>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            self.read_input_inner(prompt)?;
            let line = self.buf.trim().to_lowercase();
            if let Some(val) = checker(&line) {
                return Ok(val);
            }
        }
    }

    /// Helper to print the prompt, clear the string buffer and read a line.
    fn read_input_inner(&mut self, prompt: &str) -> io::Result<()> {
        print!("{} ", prompt);
        io::stdout().flush()?;
        self.buf.clear();
        if self.read.read_line(&mut self.buf)? == 0 {
            println!();
            std::process::exit(0);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(text: &str) -> Vec<Coordinate> {
        text.split_whitespace().map(|c| c.parse().unwrap()).collect()
    }

    #[test]
    fn parses_cell_lists() {
        assert_eq!(parse_cells("1А 2А, 3а"), Ok(cells("1А 2А 3А")));
        assert!(parse_cells("1А 2Й").is_err());
    }

    #[test]
    fn expands_runs() {
        assert_eq!(parse_cells("3А-1А"), Ok(cells("1А 2А 3А")));
        assert_eq!(parse_cells("5b - 5d"), Ok(cells("5Б 5В 5Г")));
        assert!(parse_cells("1А-2Б").is_err());
    }

    #[test]
    fn reads_until_accepted() {
        let mut input = InputReader::new(&b"what\n  READY \n"[..]);
        let got = input
            .read_input_lower(">", |line| if line == "ready" { Some(line.len()) } else { None })
            .unwrap();
        assert_eq!(got, 5);
    }
}
