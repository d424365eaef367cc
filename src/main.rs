use chrono::Local;
use std::io;
use std::process::ExitCode;
use wordle_assist::cli::{CliInterface, parse_cli};
use wordle_assist::game_state::game_loop;
use wordle_assist::logging::{init_logging, log_file_path};
use wordle_assist::tui::TuiInterface;
use wordle_assist::wordbank::Wordbank;

fn main() -> ExitCode {
    let cli = parse_cli();

    // The TUI owns the screen, so its log goes to a file.
    let log_file = if cli.tui { log_file_path() } else { None };
    if let Err(e) = init_logging(cli.verbose, log_file.as_deref()) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let settings = match cli.settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let skip = cli.skip_count(Local::now().date_naive());
    let wordbank = match Wordbank::load(
        cli.wordbank_path.as_deref(),
        cli.dictionary_path.as_deref(),
        skip,
    ) {
        Ok(wordbank) => wordbank,
        Err(e) => {
            eprintln!("Failed to load word lists: {e}");
            return ExitCode::FAILURE;
        }
    };
    log::info!(
        "{} candidates, {} dictionary words, {} past solutions skipped",
        wordbank.word_count(),
        wordbank.dictionary().len(),
        wordbank.past_solutions().len()
    );

    if cli.tui {
        let mut interface = match TuiInterface::new() {
            Ok(interface) => interface,
            Err(e) => {
                eprintln!("Failed to start the terminal interface: {e}");
                return ExitCode::FAILURE;
            }
        };
        game_loop(&wordbank, &settings, &mut interface);
    } else {
        let mut interface = CliInterface::new(io::stdin().lock());
        game_loop(&wordbank, &settings, &mut interface);
    }
    ExitCode::SUCCESS
}
