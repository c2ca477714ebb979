use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::{ArgAction, Parser, ValueEnum};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    Terminal,
};

use querydocs::app::App;
use querydocs::clipboard::SystemClipboard;
use querydocs::content::{segment, Catalog};
use querydocs::events;
use querydocs::logging::{self, LogTarget};
use querydocs::session::SessionStore;
use querydocs::ui::{self, Theme, NARROW_BREAKPOINT, SIDEBAR_WIDTH};

#[derive(Parser, Debug)]
#[command(name = "querydocs")]
#[command(about = "Terminal viewer for SQL tutorial topics")]
struct Args {
    /// Path to a topics JSON file (defaults to the built-in catalog)
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Topic id to open at startup (overrides the saved session)
    #[arg(short, long)]
    topic: Option<String>,

    /// Color theme
    #[arg(long, value_enum, default_value_t = ThemeArg::Auto)]
    theme: ThemeArg,

    /// Do not restore or persist the active topic across runs
    #[arg(long)]
    no_session: bool,

    /// List catalog topics and exit
    #[arg(short, long)]
    list: bool,

    /// Print a topic's segmented content as JSON and exit
    #[arg(short, long, value_name = "ID")]
    dump: Option<String>,

    /// Append diagnostics to this file (interactive runs are silent otherwise)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ThemeArg {
    /// Detect from the terminal background
    Auto,
    Dark,
    Light,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let interactive = !args.list && args.dump.is_none();
    let target = match (&args.log_file, interactive) {
        (Some(path), _) => LogTarget::File(path.as_path()),
        // Raw mode owns the terminal; without a log file there is nowhere
        // safe to write, so diagnostics are dropped.
        (None, true) => LogTarget::None,
        (None, false) => LogTarget::Stderr,
    };
    logging::init(target, args.verbose)?;

    let catalog = match &args.catalog {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin()?,
    };

    if args.list {
        return list_topics(&catalog);
    }
    if let Some(id) = &args.dump {
        return dump_topic(&catalog, id);
    }

    let session = if args.no_session {
        None
    } else {
        SessionStore::default_path().map(SessionStore::new)
    };

    let theme = match args.theme {
        ThemeArg::Auto => Theme::auto_detect(),
        ThemeArg::Dark => Theme::dark(),
        ThemeArg::Light => Theme::light(),
    };

    let app = App::new(
        catalog,
        args.catalog.clone(),
        Box::new(SystemClipboard),
        session,
        args.topic.as_deref(),
        theme,
    );

    run_tui(app)
}

/// Print the catalog's ids and titles to stdout.
fn list_topics(catalog: &Catalog) -> Result<()> {
    for topic in catalog.topics() {
        println!("{:<24} {}", topic.id, topic.title);
    }
    Ok(())
}

/// Print one topic's segmented content as JSON to stdout.
fn dump_topic(catalog: &Catalog, id: &str) -> Result<()> {
    if !catalog.contains(id) {
        anyhow::bail!("unknown topic id: {id}");
    }
    let topic = catalog.resolve(id);
    let segments = segment(&topic.content);
    println!("{}", serde_json::to_string_pretty(&segments)?);
    Ok(())
}

/// Run the TUI with the given app state
fn run_tui(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 40;
    const MIN_HEIGHT: u16 = 10;

    while app.running {
        // Draw UI
        terminal.draw(|frame| {
            let area = frame.area();

            // Check for minimum terminal size
            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered = Rect::new(
                    0,
                    (area.height / 2).saturating_sub(2),
                    area.width,
                    area.height.min(5),
                );
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Min(8),    // Sidebar + content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, chunks[0]);

            let body = chunks[1];
            if area.width >= NARROW_BREAKPOINT {
                // Wide: persistent sidebar next to the content pane
                let cols =
                    Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
                        .split(body);
                ui::sidebar::render(frame, app, cols[0]);
                ui::content::render(frame, app, cols[1]);
            } else {
                // Narrow: content fills the body, sidebar is an overlay
                ui::content::render(frame, app, body);
                if app.sidebar_open {
                    let overlay =
                        Rect::new(body.x, body.y, SIDEBAR_WIDTH.min(body.width), body.height);
                    frame.render_widget(ratatui::widgets::Clear, overlay);
                    ui::sidebar::render(frame, app, overlay);
                }
            }

            ui::common::render_status_bar(frame, app, chunks[2]);

            // Render help overlay if active
            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => {
                    let width = terminal.size()?.width;
                    events::handle_mouse_event(app, mouse, width);
                }
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Expire the copied indicator and stale status messages
        app.tick(Instant::now());
    }

    Ok(())
}
