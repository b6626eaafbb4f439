mod api;
mod app;
mod catalog;
mod config;
mod logging;
mod ui;

use api::{CatalogClient, CatalogError};
use app::{App, Screen};
use catalog::Movie;
use clap::{Parser, Subcommand};
use config::Config;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

/// Terminal catalog of Studio Ghibli films
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Catalog endpoint (defaults to the public Ghibli API)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Path to a JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write logs to this file (logging is off otherwise)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive catalog (default)
    Run,
    /// Fetch the catalog once and print it
    List {
        /// Print the normalized records as JSON
        #[arg(long)]
        json: bool,
    },
}

const TICK: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let file_config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .unwrap_or_else(|e| {
        eprintln!("Warning: {e}. Using default configuration.");
        Config::default()
    });
    let config = file_config.with_overrides(cli.endpoint, cli.log_file)?;

    let log_file = logging::resolve_log_file(config.log_file.clone());
    logging::init_tracing(log_file.as_deref());

    let client = CatalogClient::new(config.endpoint)?;
    tracing::info!(endpoint = client.endpoint(), "starting ghibli-catalog");

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_screen(client)?,
        Commands::List { json } => {
            let movies = match client.fetch_catalog().await {
                Ok(movies) => movies,
                Err(e) => {
                    report_failure(&e);
                    std::process::exit(1);
                }
            };
            let mut stdout = std::io::stdout().lock();
            if json {
                serde_json::to_writer_pretty(&mut stdout, &movies)?;
                writeln!(stdout)?;
            } else {
                write!(stdout, "{}", format_catalog(&movies))?;
            }
        }
    }

    Ok(())
}

fn report_failure(e: &CatalogError) {
    tracing::error!(error = %e, "catalog load failed");
    eprintln!("{}", e.user_message());
    eprintln!("{}", e.recovery_hint());
}

/// Plain-text rendering of the catalog for `list`.
fn format_catalog(movies: &[Movie]) -> String {
    let mut out = String::from("Studio Ghibli\nCatálogo de filmes\n");
    for movie in movies {
        out.push_str(&format!(
            "\n{}\n  🎬 {}\n  📅 {}\n  ⭐ {}\n  {}\n  {}\n",
            movie.title,
            movie.director,
            movie.release_date,
            movie.score_label(),
            movie.image,
            movie.description,
        ));
    }
    out.push_str(&format!("\n{} filmes carregados da API\n", movies.len()));
    out
}

fn run_screen(client: CatalogClient) -> Result<(), Box<dyn std::error::Error>> {
    // Start the load before the first frame so `Loading` is shown while it runs
    let mut app = App::new().with_loader(client.spawn_load());

    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, &mut app);
    ratatui::restore();

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    Ok(())
}

fn run_app(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    let size = terminal.size()?;
    app.update_page_size(size.height);

    loop {
        app.poll_catalog();
        let mut scroll_limit = 0;
        terminal.draw(|frame| {
            ui::render(app, frame);
            scroll_limit = ui::detail_scroll_limit(app, frame.area());
        })?;
        app.set_detail_scroll_limit(scroll_limit);

        if app.should_quit {
            return Ok(());
        }

        if event::poll(TICK)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    handle_key(app, key);
                }
                Event::Resize(_, height) => {
                    app.update_page_size(height);
                }
                _ => {}
            }
        } else {
            app.on_tick();
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // If help is showing, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    if key.code == KeyCode::Char('?') {
        app.show_help = true;
        return;
    }

    if app.overlay_visible() {
        handle_detail_key(app, key);
        return;
    }

    match app.screen {
        Screen::Loaded(_) => handle_list_key(app, key),
        Screen::Loading | Screen::Error => {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                app.should_quit = true;
            }
        }
    }
}

fn handle_list_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.cursor_next();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.cursor_prev();
        }
        KeyCode::PageDown => {
            app.cursor_page_down();
        }
        KeyCode::PageUp => {
            app.cursor_page_up();
        }
        KeyCode::Home | KeyCode::Char('g') => {
            app.cursor_first();
        }
        KeyCode::End | KeyCode::Char('G') => {
            app.cursor_last();
        }
        KeyCode::Enter => {
            app.select_current();
            app.status_msg.clear();
        }
        _ => {}
    }
}

fn handle_detail_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => {
            app.dismiss_detail();
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.scroll_down();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.scroll_up();
        }
        KeyCode::PageDown => {
            app.scroll_page_down();
        }
        KeyCode::PageUp => {
            app.scroll_page_up();
        }
        KeyCode::Char('o') => {
            if let Some(url) = app.selected_movie().map(|m| m.image.clone()) {
                app.status_msg = match open_url(&url) {
                    Ok(()) => format!("Abrindo: {url}"),
                    Err(e) => {
                        tracing::warn!(error = %e, url = %url, "could not open image");
                        format!("Não foi possível abrir: {url}")
                    }
                };
            }
        }
        _ => {}
    }
}

/// Hand a URL to the platform opener without waiting for it.
fn open_url(url: &str) -> std::io::Result<()> {
    use std::process::{Command, Stdio};

    let mut command = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    } else {
        Command::new("xdg-open")
    };

    command
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
}
