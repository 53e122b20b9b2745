mod renderer;

use std::{
    io::{Stdout, Write},
    time::{Duration, Instant},
};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    queue,
    terminal::{self, ClearType},
};

use crate::{
    generators::Bias,
    session::{Command, MazeSession, Tick},
};
use renderer::Renderer;

/// What the input loop made of a key press.
#[derive(Debug, PartialEq)]
enum UserInputEvent {
    Command(Command),
    Quit,
    Ignored,
}

impl UserInputEvent {
    fn from_key(key: KeyEvent) -> Self {
        let token = match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return UserInputEvent::Quit,
            KeyCode::Up => "up".to_string(),
            KeyCode::Down => "down".to_string(),
            KeyCode::Left => "left".to_string(),
            KeyCode::Right => "right".to_string(),
            KeyCode::Char(c) => c.to_ascii_lowercase().to_string(),
            _ => return UserInputEvent::Ignored,
        };
        Command::from_key_token(&token).map_or(UserInputEvent::Ignored, UserInputEvent::Command)
    }
}

pub struct App {
    rows: u16,
    cols: u16,
    bias: Bias,
    seed: Option<u64>,
    /// How often the session is stepped
    tick_duration: Duration,
}

impl App {
    pub fn new(rows: u16, cols: u16, bias: Bias, seed: Option<u64>, tick_duration: Duration) -> Self {
        Self {
            rows,
            cols,
            bias,
            seed,
            tick_duration,
        }
    }

    /// Set a panic hook to restore terminal state on panic
    /// This ensures that the terminal is not left in raw mode or alternate screen on panic
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = App::restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
            hook(panic_info);
        }));
    }

    /// Setup terminal in raw mode and enter alternate screen
    /// Also sets a panic hook to restore terminal on panic
    pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        App::set_panic_hook();
        queue!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Restore terminal to original state
    /// Leave alternate screen and disable raw mode
    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
        stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Main application loop: poll for keys until the next tick is due, step
    /// the session once, redraw.
    pub fn run(&self) -> std::io::Result<()> {
        let mut session = match MazeSession::new(self.rows, self.cols, self.bias, self.seed) {
            Ok(session) => session,
            Err(e) => {
                tracing::error!("[app] cannot create maze: {}", e);
                return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
            }
        };
        let mut renderer = Renderer::new(std::io::stdout());
        // Last command rejection or invariant violation, shown under the maze
        let mut message: Option<String> = None;
        // Set once stepping hit a broken invariant; cleared by the next new maze or refresh
        let mut halted = false;

        tracing::info!("[app] started main loop");
        renderer.render(&session, None)?;
        let mut next_tick = Instant::now() + self.tick_duration;
        loop {
            let timeout = next_tick.saturating_duration_since(Instant::now());
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        match UserInputEvent::from_key(key) {
                            UserInputEvent::Quit => {
                                tracing::debug!("[app] quit key pressed, exiting");
                                break;
                            }
                            UserInputEvent::Command(command) => {
                                tracing::debug!("[app] command {:?}", command);
                                if matches!(command, Command::Generate { .. } | Command::Refresh) {
                                    halted = false;
                                }
                                message = match session.execute(command) {
                                    Ok(()) => None,
                                    Err(e) => {
                                        tracing::warn!("[app] command {:?} rejected: {}", command, e);
                                        Some(e.to_string())
                                    }
                                };
                            }
                            UserInputEvent::Ignored => {}
                        }
                        renderer.render(&session, message.as_deref())?;
                    }
                    Event::Resize(_, _) => renderer.render(&session, message.as_deref())?,
                    _ => {}
                }
                continue;
            }

            next_tick += self.tick_duration;
            if halted {
                continue;
            }
            match session.step() {
                Ok(Tick::Idle) => {}
                Ok(_) => renderer.render(&session, message.as_deref())?,
                Err(e) => {
                    tracing::error!("[app] stepping stopped: {}", e);
                    halted = true;
                    message = Some(e.to_string());
                    renderer.render(&session, message.as_deref())?;
                }
            }
        }
        tracing::info!("[app] exiting main loop");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{game::Direction, solvers::Solver};
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> UserInputEvent {
        UserInputEvent::from_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(press(KeyCode::Esc), UserInputEvent::Quit);
        assert_eq!(press(KeyCode::Char('q')), UserInputEvent::Quit);
        assert_eq!(
            press(KeyCode::Char('D')),
            UserInputEvent::Command(Command::StartSearch(Solver::Dfs))
        );
        assert_eq!(
            press(KeyCode::Right),
            UserInputEvent::Command(Command::ManualMove(Direction::Right))
        );
        assert_eq!(
            press(KeyCode::Char('v')),
            UserInputEvent::Command(Command::Generate {
                bias: Bias::Vertical,
                seed: None
            })
        );
        assert_eq!(press(KeyCode::Char('x')), UserInputEvent::Ignored);
        assert_eq!(press(KeyCode::Tab), UserInputEvent::Ignored);
    }
}
