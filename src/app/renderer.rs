use std::{
    fmt,
    io::{Stdout, Write},
};

use crossterm::{
    QueueableCommand, cursor, queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};
use unicode_truncate::UnicodeTruncateStr;

use crate::{
    maze::{Grid, Orientation},
    session::{MazeSession, Mode},
};

/// What occupies one slot of the drawn maze. Cells sit at odd coordinates and
/// the slots between them are walls or openings.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Glyph {
    Wall,
    Open,
    Entrance,
    Exit,
    Visited,
    Path,
    Player,
}

impl Glyph {
    /// The width of each glyph when rendered, in character widths.
    const WIDTH: u16 = 2;
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            Glyph::Wall => "⬜".with(Color::White),
            Glyph::Open => "  ".with(Color::Reset),
            Glyph::Entrance => "🟩".with(Color::Green),
            Glyph::Exit => "🟥".with(Color::Red),
            Glyph::Visited => "* ".with(Color::Blue),
            Glyph::Path => "🟨".with(Color::Yellow),
            Glyph::Player => "🟣".with(Color::Magenta),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Glyph::WIDTH as usize,
                "Each glyph must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}

/// Slot grid of `(2 * cols + 1) x (2 * rows + 1)` glyphs. Sizes are kept in
/// `usize` since the slot count outgrows `u16` well before the grid does.
struct Frame {
    glyphs: Vec<Glyph>,
    width: usize,
    height: usize,
}

impl Frame {
    fn new(grid: &Grid) -> Self {
        let width = grid.cols() as usize * 2 + 1;
        let height = grid.rows() as usize * 2 + 1;
        let mut frame = Frame {
            glyphs: vec![Glyph::Wall; width * height],
            width,
            height,
        };
        for cell in grid.cells() {
            frame.set(Frame::cell_slot(cell.coord()), Glyph::Open);
        }
        frame
    }

    fn cell_slot((x, y): (u16, u16)) -> (usize, usize) {
        (x as usize * 2 + 1, y as usize * 2 + 1)
    }

    /// Slot between two adjacent cells.
    fn between(a: (u16, u16), b: (u16, u16)) -> (usize, usize) {
        (
            a.0 as usize + b.0 as usize + 1,
            a.1 as usize + b.1 as usize + 1,
        )
    }

    fn set(&mut self, (x, y): (usize, usize), glyph: Glyph) {
        self.glyphs[y * self.width + x] = glyph;
    }

    fn rows(&self) -> impl Iterator<Item = &[Glyph]> {
        self.glyphs.chunks(self.width)
    }

    /// Terminal columns and lines needed to show the frame and the status lines.
    fn needed_size(&self) -> (usize, usize) {
        (
            self.width.saturating_mul(Glyph::WIDTH as usize),
            self.height.saturating_add(Renderer::STATUS_LINES as usize),
        )
    }

    fn paint(session: &MazeSession) -> Self {
        let grid = session.grid();
        let mut frame = Frame::new(grid);

        for edge in session.edges().iter().filter(|e| e.connected) {
            let (x, y) = Frame::cell_slot(grid.unravel_index(edge.cell1));
            let slot = match edge.orientation {
                Orientation::Horizontal => (x + 1, y),
                Orientation::Vertical => (x, y + 1),
            };
            frame.set(slot, Glyph::Open);
        }

        if session.show_visited() {
            for &cell in session.visited() {
                frame.set(Frame::cell_slot(grid.unravel_index(cell)), Glyph::Visited);
            }
        }

        let path = session.path();
        for &cell in path {
            frame.set(Frame::cell_slot(grid.unravel_index(cell)), Glyph::Path);
        }
        for pair in path.windows(2) {
            let slot = Frame::between(grid.unravel_index(pair[0]), grid.unravel_index(pair[1]));
            frame.set(slot, Glyph::Path);
        }

        frame.set(Frame::cell_slot(grid.unravel_index(grid.entrance())), Glyph::Entrance);
        frame.set(Frame::cell_slot(grid.unravel_index(grid.exit())), Glyph::Exit);
        if let Some(position) = session.manual_position() {
            frame.set(Frame::cell_slot(position), Glyph::Player);
        }
        frame
    }
}

pub struct Renderer {
    /// Standard output handle to write to the terminal
    stdout: Stdout,
}

impl Renderer {
    /// Lines printed under the maze
    const STATUS_LINES: u16 = 4;

    pub fn new(stdout: Stdout) -> Self {
        Self { stdout }
    }

    /// Draw the whole session, with `message` on the last status line.
    pub fn render(&mut self, session: &MazeSession, message: Option<&str>) -> std::io::Result<()> {
        let frame = Frame::paint(session);
        let (term_width, term_height) = terminal::size()?;

        let needed = frame.needed_size();

        self.stdout.queue(terminal::Clear(ClearType::All))?;
        if (term_width as usize) < needed.0 || (term_height as usize) < needed.1 {
            let msg = format!(
                "Terminal size ({}x{}) is too small for the maze ({}x{}). Please resize the terminal.",
                term_width, term_height, needed.0, needed.1
            );
            queue!(
                self.stdout,
                cursor::MoveTo(0, 0),
                style::PrintStyledContent(
                    Renderer::fit(&msg, term_width)
                        .with(Color::Yellow)
                        .attribute(Attribute::Bold)
                ),
            )?;
            return self.stdout.flush();
        }

        for (y, row) in frame.rows().enumerate() {
            self.stdout.queue(cursor::MoveTo(0, y as u16))?;
            for glyph in row {
                self.stdout.queue(style::Print(glyph))?;
            }
        }

        // fits on screen, so it fits in u16
        let top = frame.height as u16;
        let lines = Renderer::status_lines(session, message);
        for (i, (line, color)) in lines.iter().enumerate() {
            queue!(
                self.stdout,
                cursor::MoveTo(0, top + i as u16),
                style::PrintStyledContent(
                    Renderer::fit(line, term_width)
                        .with(*color)
                        .attribute(Attribute::Bold)
                )
            )?;
        }
        self.stdout.flush()
    }

    fn fit(line: &str, width: u16) -> String {
        line.unicode_truncate(width as usize).0.to_string()
    }

    fn status_lines(session: &MazeSession, message: Option<&str>) -> Vec<(String, Color)> {
        let headline = match session.mode() {
            Mode::Building => format!(
                "Building... {}/{} walls removed",
                session.builder().accepted_count(),
                session.grid().len() - 1
            ),
            Mode::AwaitingSearch => "Maze ready".to_string(),
            Mode::Searching(solver) => format!("Searching with {}", solver),
            Mode::AnimatingPath => "Exit found, tracing the way back".to_string(),
            Mode::Solved => "Solved".to_string(),
            Mode::Manual if session.won() => "You won!".to_string(),
            Mode::Manual => "Manual mode".to_string(),
        };
        let stats = if session.is_manual() {
            format!("Steps: {}", session.moves())
        } else {
            format!(
                "Steps: {}  Wrong moves: {}",
                session.steps(),
                session.wrong_moves()
            )
        };
        let help = if session.won() {
            "Press 'n' to play a new random maze, 'r' to play the same maze again"
        } else {
            "b/d: BFS/DFS  n/h/v: new maze  r: refresh  s: visited  m: manual  arrows: move  Esc: exit"
        };
        vec![
            (headline, Color::Green),
            (stats, Color::Reset),
            (help.to_string(), Color::Cyan),
            (message.unwrap_or_default().to_string(), Color::Red),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{generators::Bias, session::Tick};

    #[test]
    fn test_frame_opens_exactly_the_carved_walls() {
        let mut session = MazeSession::new(3, 4, Bias::None, Some(6)).unwrap();
        while session.step().unwrap() != Tick::Idle {}
        let frame = Frame::paint(&session);
        assert_eq!((frame.width, frame.height), (9, 7));

        // 12 cells plus 11 openings; entrance and exit are drawn on cells
        let passable = frame
            .glyphs
            .iter()
            .filter(|g| !matches!(g, Glyph::Wall))
            .count();
        assert_eq!(passable, 12 + 11);
        assert!(frame.rows().next().unwrap().iter().all(|g| *g == Glyph::Wall));
    }

    #[test]
    fn test_frame_marks_solution_and_player() {
        let mut session = MazeSession::new(4, 4, Bias::None, Some(1)).unwrap();
        while session.step().unwrap() != Tick::Idle {}
        session.start_search(crate::solvers::Solver::Bfs).unwrap();
        while session.step().unwrap() != Tick::Idle {}
        let frame = Frame::paint(&session);
        let path_glyphs = frame.glyphs.iter().filter(|g| **g == Glyph::Path).count();
        // every cell and gap of the solution except the two endpoints
        assert_eq!(path_glyphs, 2 * session.path().len() - 1 - 2);

        session.toggle_manual_mode();
        let frame = Frame::paint(&session);
        assert!(frame.glyphs.contains(&Glyph::Player));
        assert!(!frame.glyphs.contains(&Glyph::Path));
    }

    #[test]
    fn test_wide_grid_frame_size() {
        let session = MazeSession::new(1, 40000, Bias::None, Some(3)).unwrap();
        let frame = Frame::paint(&session);
        assert_eq!((frame.width, frame.height), (80001, 3));
        assert_eq!(frame.needed_size(), (160002, 3 + Renderer::STATUS_LINES as usize));
        // exit sits on the last cell slot of the middle row
        assert_eq!(frame.rows().nth(1).unwrap()[80000 - 1], Glyph::Exit);
    }

    #[test]
    fn test_status_reports_wrong_moves() {
        let session = MazeSession::new(2, 2, Bias::None, Some(0)).unwrap();
        let lines = Renderer::status_lines(&session, Some("oops"));
        assert!(lines[0].0.starts_with("Building"));
        assert_eq!(lines[1].0, "Steps: 0  Wrong moves: 0");
        assert_eq!(lines[3].0, "oops");
    }
}
