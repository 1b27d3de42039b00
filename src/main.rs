use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

use stenos::app::App;
use stenos::config::Config;
use stenos::event::{AppEvent, EventHandler};
use stenos::keyboard::steno::StenoKeys;
use stenos::ui::components::keyboard_diagram::KeyboardDiagram;
use stenos::ui::components::stroke_hint::StrokeHint;
use stenos::ui::components::typing_area::TypingArea;
use stenos::ui::layout::{DrillLayout, line_width};

#[derive(Parser)]
#[command(
    name = "stenos",
    version,
    about = "Terminal drill tool for practicing stenographic chord input"
)]
struct Cli {
    #[arg(long, help = "Word frequency list (`<occurrences> <word>` per line)")]
    words: Option<PathBuf>,

    #[arg(long, help = "Canonical stroke list (`<word>: <stroke>` per line)")]
    strokes: Option<PathBuf>,

    #[arg(short, long, help = "Number of most frequent words to drill")]
    pool_size: Option<usize>,

    #[arg(long, help = "Directory for state, history and the log file")]
    data_dir: Option<PathBuf>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Start with the stroke hint hidden")]
    no_hint: bool,

    #[arg(long, help = "Write the effective configuration to the config file and exit")]
    write_config: bool,
}

impl Cli {
    fn apply(self, config: &mut Config) {
        if let Some(words) = self.words {
            config.words_path = words;
        }
        if let Some(strokes) = self.strokes {
            config.strokes_path = strokes;
        }
        if let Some(pool_size) = self.pool_size {
            config.pool_size = pool_size;
        }
        if let Some(data_dir) = self.data_dir {
            config.data_dir = data_dir;
        }
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
        if self.no_hint {
            config.show_stroke_hint = false;
        }
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("stenos: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let write_config = cli.write_config;

    let mut config = Config::load()?;
    cli.apply(&mut config);
    config.validate();

    if write_config {
        let path = config.save()?;
        println!("wrote {}", path.display());
        return Ok(());
    }

    // Held until after the failure is logged so the writer can flush it.
    let _log_guard = init_logging(&config.log_path())?;
    install_panic_hook();
    info!("starting stenos");

    log_failure(drill(&config))
}

fn drill(config: &Config) -> Result<()> {
    let (columns, _) = terminal::size().context("querying terminal size")?;
    let mut app = App::new(config, columns as usize)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(err) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(err).context("entering alternate screen");
    }

    let backend = CrosstermBackend::new(stdout);
    let result = Terminal::new(backend)
        .map_err(anyhow::Error::from)
        .and_then(|mut terminal| {
            let events = EventHandler::new();
            let result = run_app(&mut terminal, &mut app, &events);
            terminal.show_cursor()?;
            result
        });

    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;

    info!(completed = app.session.completed_lines(), "session ended");
    result
}

fn log_failure<T>(result: Result<T>) -> Result<T> {
    if let Err(err) = &result {
        error!("{err:#}");
    }
    result
}

/// Empty the log file, creating it and its directory when missing.
fn truncate_log(log_path: &Path) -> Result<()> {
    if let Some(dir) = log_path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    fs::File::create(log_path).with_context(|| format!("truncating {}", log_path.display()))?;
    Ok(())
}

/// Log to `log_path`, truncated on every start. The terminal is never
/// written to.
fn init_logging(log_path: &Path) -> Result<WorkerGuard> {
    truncate_log(log_path)?;
    let dir = log_path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = log_path
        .file_name()
        .context("log path has no file name")?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("stenos=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("installing log subscriber: {err}"))?;
    Ok(guard)
}

/// Restore the terminal before the default hook prints the panic message.
fn install_panic_hook() {
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        error!(target: "stenos::panic", %info, "panic");
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_panic(info);
    }));
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next() {
            Some(AppEvent::Key(key)) => app.handle_key(&key),
            Some(AppEvent::Resize(width, _)) => app.resize(width),
            None => return Ok(()),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn render(frame: &mut ratatui::Frame, app: &mut App) {
    let area = frame.area();
    app.resize(line_width(area) as u16);

    let colors = &app.theme.colors;
    let layout = DrillLayout::new(area);
    let session = &app.session;

    frame.render_widget(Block::default().style(Style::default().bg(colors.bg())), area);

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " stenos ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" lines {} ", session.completed_lines()),
            Style::default().fg(colors.lookahead()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout.header);

    let input = Paragraph::new(session.input().as_str()).style(Style::default().fg(colors.fg()));
    frame.render_widget(input, layout.input);

    let target = session.target();
    let statuses = session.statuses();
    let lookahead = session.lookahead().text();
    frame.render_widget(
        TypingArea::new(&target, &statuses, &lookahead, &app.theme),
        layout.words,
    );

    if let (Some(stroke), Some(word)) = (session.stroke_hint(), session.current_word()) {
        frame.render_widget(StrokeHint::new(&word.word, stroke, &app.theme), layout.hint);
        let pressed = StenoKeys::parse(stroke).unwrap_or_default();
        frame.render_widget(KeyboardDiagram::new(pressed, &app.theme), layout.keyboard);
    }

    let footer = Paragraph::new(Line::from(Span::styled(
        format!(
            " [{}] Toggle hint  [{}] Quit  [Backspace] Delete ",
            app.toggle_hint_key, app.quit_key
        ),
        Style::default().fg(colors.lookahead()),
    )));
    frame.render_widget(footer, layout.footer);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_truncate_log_empties_previous_run() {
        let dir = TempDir::new().unwrap();
        let log_path = dir.path().join("logs").join("stenos.log");
        truncate_log(&log_path).unwrap();
        fs::write(&log_path, "old run\n").unwrap();

        truncate_log(&log_path).unwrap();
        assert_eq!(fs::read_to_string(&log_path).unwrap(), "");
    }

    #[test]
    fn test_failure_reaches_log_file_while_guard_is_held() {
        let dir = TempDir::new().unwrap();
        let appender = tracing_appender::rolling::never(dir.path(), "stenos.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let subscriber = tracing_subscriber::fmt()
            .with_writer(writer)
            .with_ansi(false)
            .finish();

        let result: Result<()> = Err(anyhow::anyhow!("drill pool has 1 word(s)"));
        let returned = tracing::subscriber::with_default(subscriber, || log_failure(result));
        drop(guard);

        assert!(returned.is_err());
        let log = fs::read_to_string(dir.path().join("stenos.log")).unwrap();
        assert!(log.contains("drill pool has 1 word(s)"));
        assert!(log.contains("ERROR"));
    }
}
