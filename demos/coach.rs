//! Interactive fitness coach on the command line.
//!
//! ## How to run
//!
//! ```shell
//! $ cargo run --example coach --features reqwest-blocking -- coach.toml
//! ```
//!
//! See the [`fitcoach::config`] module for the configuration format. The API key may also be
//! supplied through `OPENAI_API_KEY`. Set `RUST_LOG=fitcoach=debug` to see request logging.
//!
//! Enter messages line by line. Commands:
//!
//! - `/meals`: suggest meals from the configured nutrition table
//! - `/reset`: start the conversation over
//!
//! Press Ctrl+D (EOF) to exit.

use std::{
    env,
    io::{self, Write},
};

use fitcoach::{
    config::Config,
    meal_plan,
    session::{Action, Session},
};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config_file = env::args()
        .nth(1)
        .expect("requires argument: path to TOML config file");
    let config = Config::load(&config_file).expect("failed to load config");
    let api = config.api().expect("failed to configure API");

    let mut session =
        Session::new(config.profile, config.goal).expect("invalid profile in config");
    if let Some(name) = &config.name {
        session = session.with_name(name.as_str());
    }

    println!("Your AI Fitness Coach");
    println!(
        "Estimated daily calories: {} kcal (target for {}: {} kcal)",
        session.estimate(),
        session.goal().label().to_lowercase(),
        session.daily_target()
    );

    let client = reqwest::blocking::Client::new();

    while let Some(input) = read_next_line() {
        match input.as_str() {
            "" => continue,
            "/reset" => {
                println!("{}", session.reset());
                continue;
            }
            "/meals" => {
                suggest_meals(&config, &session);
                continue;
            }
            _ => {}
        }

        let http_req = session.user_message(&api, &input);
        let raw = client
            .execute(http_req.into())
            .expect("failed to execute request")
            .text()
            .expect("failed to fetch response text");

        match session.handle_response(&raw) {
            Ok(Action::HandleCoachReply(reply)) => println!("Coach: {}", reply),
            Err(err) => eprintln!("Error: {}", err),
        }
    }
}

/// Prints a few meals suiting the session's goal.
fn suggest_meals(config: &Config, session: &Session) {
    let Some(path) = &config.meals_csv else {
        eprintln!("No nutrition table configured (set `meals_csv`).");
        return;
    };

    match meal_plan::load_meals_from_path(path) {
        Ok(meals) => {
            let mut rng = rand::thread_rng();
            for meal in meal_plan::suggest_meals(&meals, session.goal(), &mut rng) {
                println!("  * {}", meal);
            }
        }
        Err(err) => eprintln!("Error: {}", err),
    }
}

/// Helper function that shows a prompt and reads a trimmed line from stdin.
fn read_next_line() -> Option<String> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut input = String::new();

    stdout.write_all(b"You: ").expect("stdout failed to write");
    stdout.flush().expect("stdout failed to flush");
    if stdin.read_line(&mut input).expect("stdin failed to read") == 0 {
        None
    } else {
        Some(input.trim().to_owned())
    }
}
