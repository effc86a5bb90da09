pub mod parser;

use anyhow::Error;
use clap::{App, Arg};
use config::Config;
use controller::entity::ranked_table;
use controller::{
    Catalog, PageSettings, RecommendationResponse, ShelfKind, ToTable, UserAction, UserId,
    UserStore,
};
use engine::Engine;
use log::LevelFilter;
use memory::demo::demo_controller;
use memory::MemoryController;
use parser::Statement;
use simplelog::{SimpleLogger, TermLogger, TerminalMode};

macro_rules! prompt {
    ($ed:ident) => {{
        prompt!($ed, "")
    }};

    ($ed:ident, $user:expr) => {{
        use rustyline::error::ReadlineError;

        let msg = if $user.is_empty() {
            format!("{}", PROMPT)
        } else {
            format!("({}) {}", $user, PROMPT)
        };

        match $ed.readline(&msg) {
            Ok(line) => {
                $ed.add_history_entry(line.as_str());
                Ok(line)
            }

            Err(ReadlineError::Interrupted) => {
                continue;
            }

            Err(ReadlineError::Eof) => {
                if $user.is_empty() {
                    println!("Exiting...Good bye!");
                } else {
                    println!("Logging out {}", $user);
                }

                break;
            }

            Err(e) => Err(e),
        }
    }};
}

fn page_settings(page: usize) -> PageSettings {
    PageSettings {
        page,
        ..Default::default()
    }
}

fn print_books(books: &[controller::Book]) {
    if books.is_empty() {
        println!("Nothing to show");
    } else {
        println!("{}", ranked_table(books));
    }
}

fn query_book(controller: &MemoryController, book_id: &str) {
    match controller.book(&book_id.to_string()) {
        Ok(Some(book)) => println!("{}", book.to_table()),
        Ok(None) => println!("No book with id({})", book_id),
        Err(e) => println!("{}", e),
    }
}

fn logged_in_prompt(
    controller: &MemoryController,
    config: Config,
    user_id: UserId,
) -> Result<(), Error> {
    let name = match controller.user(&user_id)? {
        Some(user) => user.name,
        None => {
            println!("No user with id({})", user_id);
            return Ok(());
        }
    };

    let engine = Engine::with_controller(controller, config);
    let mut rl = rustyline::Editor::<()>::new();

    loop {
        let opt: String = prompt!(rl, name)?;

        match opt.trim() {
            "q" | "quit" => {
                println!("Bye!");
                break;
            }

            "d" | "logout" => {
                println!("Logging out {}", name);
                break;
            }

            "v" | "version" => {
                println!("version: {}", VERSION);
            }

            "?" | "h" | "help" => {
                println!("Session help:");
                println!("similar(id(<book>)[, <page>])   Books like this one");
                println!("liked[(<page>)]                 Books you could like");
                println!("interest[(<page>)]              Books matching your tastes");
                println!("rate(id(<book>), <1-5>)         Rate a book");
                println!("action(id(<book>), <payload>)   favorite | unfavorite | finished |");
                println!("                                started | want-to-read | relevant |");
                println!("                                irrelevant");
                println!("prefs                           Show your taste profile");
                println!("query_book(id(<book>))          Show a book");
                println!("d | logout                      Back to the main prompt");
            }

            empty if empty.is_empty() => {}

            line => match parser::parse_line(line) {
                Some(stmt) => match stmt {
                    Statement::Login(_) => println!("Invalid in this context!"),

                    Statement::QueryBook(book_id) => query_book(controller, &book_id),

                    Statement::Similar(book_id, page) => {
                        match engine.similar_books(&book_id, page_settings(page), Some(&user_id)) {
                            Ok(books) => print_books(&books),
                            Err(e) => println!("{}", e),
                        }
                    }

                    Statement::Liked(page) => {
                        match engine.possibly_liked_books(page_settings(page), Some(&user_id)) {
                            Ok(books) => print_books(&books),
                            Err(e) => println!("{}", e),
                        }
                    }

                    Statement::Interest(page) => {
                        match engine.user_interest_books(page_settings(page), Some(&user_id)) {
                            Ok(books) => print_books(&books),
                            Err(e) => println!("{}", e),
                        }
                    }

                    Statement::Rate(book_id, value) => {
                        match engine.rate_book(&user_id, &book_id, value) {
                            Ok(()) => println!("Rated id({}) with {}", book_id, value),
                            Err(e) => println!("{}", e),
                        }
                    }

                    Statement::Action(book_id, payload) => {
                        let action = UserAction::from_payload(&payload);
                        apply_shelf_effects(controller, &user_id, &book_id, &action);

                        match engine.apply_action(&user_id, &book_id, &action) {
                            Ok(()) => println!("Applied {} to id({})", action, book_id),
                            Err(e) => println!("{}", e),
                        }
                    }

                    Statement::Prefs => match show_preferences(controller, &user_id) {
                        Ok(()) => {}
                        Err(e) => println!("{}", e),
                    },
                },

                None => println!("Invalid syntax!"),
            },
        }
    }

    Ok(())
}

/// Shelving and recommendation responses live in the store; the engine
/// only sees the preference-weight side of the action.
fn apply_shelf_effects(
    controller: &MemoryController,
    user_id: &UserId,
    book_id: &str,
    action: &UserAction,
) {
    let book_id = book_id.to_string();

    match action {
        UserAction::AddedToFavorites => controller.shelve(user_id, ShelfKind::Favorite, &book_id),
        UserAction::RemovedFromFavorites => {
            controller.unshelve(user_id, ShelfKind::Favorite, &book_id)
        }
        UserAction::FinishedReading => controller.shelve(user_id, ShelfKind::Read, &book_id),
        UserAction::StartedReading => controller.shelve(user_id, ShelfKind::Reading, &book_id),
        UserAction::WantToRead => controller.shelve(user_id, ShelfKind::WantToRead, &book_id),
        UserAction::RespondedToRecommendation(response) => {
            controller.respond(user_id, &book_id, *response);

            if let RecommendationResponse::Irrelevant = response {
                println!("Noted, id({}) won't come back", book_id);
            }
        }
        _ => {}
    }
}

fn show_preferences(controller: &MemoryController, user_id: &UserId) -> Result<(), Error> {
    let genre_prefs = controller.genre_preferences(user_id)?;
    let author_prefs = controller.author_preferences(user_id)?;

    if genre_prefs.is_empty() && author_prefs.is_empty() {
        println!("No preferences recorded yet");
        return Ok(());
    }

    for pref in genre_prefs {
        println!("{}", pref.to_table());
    }

    for pref in author_prefs {
        println!("{}", pref.to_table());
    }

    Ok(())
}

fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    if TermLogger::init(level, simplelog::Config::default(), TerminalMode::Mixed).is_err() {
        let _ = SimpleLogger::init(level, simplelog::Config::default());
    }
}

const VERSION: &str = env!("CARGO_PKG_VERSION");
const PROMPT: &str = ">> ";

fn main() -> Result<(), Error> {
    let matches = App::new("bookrec")
        .version(VERSION)
        .about("Book recommendation engine playground")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .takes_value(true)
                .help("Engine constants file (TOML)"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Enable debug logging"),
        )
        .get_matches();

    init_logger(matches.is_present("verbose"));

    let config = match matches.value_of("config") {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let controller = demo_controller()?;

    println!("Welcome to bookrec {}", VERSION);
    let mut rl = rustyline::Editor::<()>::new();

    loop {
        let opt: String = prompt!(rl)?;

        match opt.trim() {
            "?" | "h" | "help" => {
                println!("Main help:");
                println!("h | help                        Shows this help");
                println!("q | quit                        Quit");
                println!("login(id(<user>))               Start a session (try alice or bruno)");
                println!("similar(id(<book>)[, <page>])   Books like this one, anonymously");
                println!("query_book(id(<book>))          Show a book");
            }

            "q" | "quit" => {
                println!("Bye!");
                break;
            }

            "v" | "version" => {
                println!("version: {}", VERSION);
            }

            empty if empty.is_empty() => {}

            line => match parser::parse_line(line) {
                Some(stmt) => match stmt {
                    Statement::Login(user_id) => {
                        logged_in_prompt(&controller, config.clone(), user_id)?
                    }

                    Statement::QueryBook(book_id) => query_book(&controller, &book_id),

                    Statement::Similar(book_id, page) => {
                        let engine = Engine::with_controller(&controller, config.clone());

                        match engine.similar_books(&book_id, page_settings(page), None) {
                            Ok(books) => print_books(&books),
                            Err(e) => println!("{}", e),
                        }
                    }

                    _ => println!("Log in first!"),
                },

                None => println!("Invalid syntax!"),
            },
        }
    }

    Ok(())
}
