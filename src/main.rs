//! Ticket Booth entry point
//!
//! Natively this is a command-line booth over a catalog file. Web builds use
//! the `TicketBooth` object exported from the library (`platform::web`).

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;
    use std::process::ExitCode;

    use clap::{Parser, Subcommand};
    use ticket_booth::platform::open_store;
    use ticket_booth::{Catalog, Settings, Ticket, TicketBooth};

    /// Ticket Booth - tonight's movie, never the same one twice.
    #[derive(Parser, Debug)]
    #[command(name = "ticket-booth")]
    #[command(version, about, long_about = None)]
    pub struct Cli {
        /// Path to the movie catalog (JSON array)
        pub catalog: PathBuf,

        /// Directory holding the unwatched pool
        #[arg(long)]
        pub state_dir: Option<PathBuf>,

        /// Fixed RNG seed for reproducible draws
        #[arg(long)]
        pub seed: Option<u64>,

        #[command(subcommand)]
        pub command: Option<Command>,
    }

    #[derive(Subcommand, Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub enum Command {
        /// Draw the next movie (default)
        #[default]
        Pick,
        /// Reshuffle the whole catalog into a new cycle
        Reset,
        /// Show how many movies are left this cycle.
        ///
        /// An exhausted or unreadable stored pool is replaced by a fresh one
        /// on startup, so this may write state too.
        Status,
    }

    /// An exhausted pool is not kept across runs, so the next run reshuffles
    const EXHAUSTED: &str = "You've seen the whole list. The next pick starts a new cycle.";

    pub fn run() -> ExitCode {
        let cli = Cli::parse();

        let mut settings = Settings::load();
        if let Some(dir) = cli.state_dir {
            settings.state_dir = dir;
        }
        if cli.seed.is_some() {
            settings.seed = cli.seed;
        }

        let catalog = match Catalog::load(&cli.catalog) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load {}: {e}", cli.catalog.display());
                return ExitCode::FAILURE;
            }
        };

        let store = open_store(&settings);
        let mut booth = TicketBooth::from_settings(catalog, store, &settings);

        match cli.command.unwrap_or_default() {
            Command::Pick => match booth.issue() {
                Some(ticket) => {
                    println!("{}", render_ticket(&ticket, booth.total()));
                    if booth.is_exhausted() {
                        println!("\n{EXHAUSTED}");
                    }
                }
                None => println!("{EXHAUSTED}"),
            },
            Command::Reset => {
                booth.reset();
                println!("Reshuffled {} movies.", booth.total());
            }
            Command::Status => {
                println!("{} of {} remaining", booth.remaining(), booth.total());
            }
        }

        ExitCode::SUCCESS
    }

    fn render_ticket(ticket: &Ticket, total: usize) -> String {
        let movie = &ticket.movie;
        let year = movie.year.map(|y| y.to_string()).unwrap_or_else(|| "—".into());

        let mut lines = vec![
            format!("ADMIT ONE  No. {}", ticket.serial),
            String::new(),
            movie.title.clone(),
            format!("dir. {}", movie.director),
            format!("{} min · {} · {}", movie.runtime, movie.genre, year),
        ];
        if let Some(vibe) = &movie.vibe {
            lines.push(format!("Vibe: {vibe}"));
        }
        if let Some(blurb) = &movie.blurb {
            lines.push(blurb.clone());
        }
        if let Some(good_for) = &movie.good_for {
            lines.push(format!("Good for: {good_for}"));
        }
        lines.push(String::new());
        lines.push(format!("{} of {} remaining", ticket.remaining, total));
        lines.join("\n")
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    env_logger::init();
    log::info!("Ticket booth (native) starting...");
    cli::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
