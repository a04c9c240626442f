use std::io;
use std::process::ExitCode;
use word_scramble::cli::{CliInterface, parse_cli};
use word_scramble::config::Config;
use word_scramble::logging::init_logging;
use word_scramble::session::{Session, game_loop};
use word_scramble::tui::TuiInterface;

fn main() -> ExitCode {
    let config = Config::from_cli(&parse_cli());

    if let Some(path) = &config.log_file
        && let Err(e) = init_logging(path)
    {
        eprintln!("Logging disabled, could not open '{}': {e}", path.display());
    }

    let dictionary = match config.dictionary() {
        Ok(dictionary) => dictionary,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    log::info!("Loaded {} dictionary words", dictionary.len());

    let source = config.word_source();
    let session = match config.seed {
        Some(seed) => Session::with_seed(dictionary, source, seed),
        None => Session::new(dictionary, source),
    };
    let mut session = match session {
        Ok(session) => session,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if config.plain {
        let mut interface = CliInterface::new(io::stdin().lock(), io::stdout());
        game_loop(&mut session, &mut interface);
    } else {
        let mut interface = match TuiInterface::new() {
            Ok(interface) => interface,
            Err(e) => {
                eprintln!("Failed to start the terminal interface: {e}");
                return ExitCode::FAILURE;
            }
        };
        game_loop(&mut session, &mut interface);
        if let Err(e) = interface.cleanup() {
            eprintln!("Failed to restore the terminal: {e}");
        }
    }

    log::info!("Final score: {}", session.score());
    ExitCode::SUCCESS
}
