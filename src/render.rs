use std::io;

use ratatui::{
    backend::Backend,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Terminal,
};

use crate::game::{CellState, Frame};

// ============================================================================
// Visual Constants
// ============================================================================

pub const CELL_WIDTH: u16 = 2;
pub const BLOCK_CHAR: &str = "██";
pub const EMPTY_CHAR: &str = "  ";

const FRESH_FOOD_COLOR: Color = Color::Green;
const ALERT_COLOR: Color = Color::Red;

// ============================================================================
// Renderer
// ============================================================================

/// Draws frames handed over by the session. Must finish well inside a tick.
pub trait Renderer {
    fn render(&mut self, frame: &Frame<'_>) -> io::Result<()>;
}

/// Renders to a terminal through ratatui.
pub struct TerminalRenderer<B: Backend> {
    terminal: Terminal<B>,
}

impl<B: Backend> TerminalRenderer<B> {
    pub fn new(backend: B) -> io::Result<Self> {
        Ok(Self {
            terminal: Terminal::new(backend)?,
        })
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

impl<B: Backend> Renderer for TerminalRenderer<B> {
    fn render(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        self.terminal.draw(|f| {
            let area = board_area(frame, f.size());
            let style = if frame.alert {
                Style::default().fg(ALERT_COLOR)
            } else {
                Style::default()
            };
            let block = Block::default().borders(Borders::ALL).border_style(style);
            let inner = block.inner(area);
            f.render_widget(block, area);
            f.render_widget(Paragraph::new(board_lines(frame, style)), inner);
        })?;
        Ok(())
    }
}

fn board_area(frame: &Frame<'_>, area: Rect) -> Rect {
    let cols = u16::try_from(frame.board.width.max(0)).unwrap_or(u16::MAX);
    let rows = u16::try_from(frame.board.height.max(0)).unwrap_or(u16::MAX);
    let width = cols.saturating_mul(CELL_WIDTH).saturating_add(2);
    let height = rows.saturating_add(2);
    Rect {
        x: area.x,
        y: area.y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

fn board_lines(frame: &Frame<'_>, base: Style) -> Vec<Line<'static>> {
    let snake_style = if frame.highlight_food && !frame.alert {
        base.fg(FRESH_FOOD_COLOR)
    } else {
        base
    };

    frame
        .grid()
        .into_iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .into_iter()
                .map(|cell| match cell {
                    CellState::Empty => Span::styled(EMPTY_CHAR, base),
                    CellState::Snake => Span::styled(BLOCK_CHAR, snake_style),
                    CellState::Food => Span::styled(BLOCK_CHAR, base),
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

// ============================================================================
// Test Helpers
// ============================================================================

pub mod test_helpers {
    use super::*;
    use crate::geometry::{Board, Cell};

    /// Owned copy of a rendered [`Frame`].
    #[derive(Clone, PartialEq, Eq, Debug)]
    pub struct RecordedFrame {
        pub snake: Vec<Cell>,
        pub food: Cell,
        pub board: Board,
        pub highlight_food: bool,
        pub alert: bool,
    }

    /// Keeps every frame it is asked to draw.
    #[derive(Default)]
    pub struct RecordingRenderer {
        pub frames: Vec<RecordedFrame>,
    }

    impl Renderer for RecordingRenderer {
        fn render(&mut self, frame: &Frame<'_>) -> io::Result<()> {
            self.frames.push(RecordedFrame {
                snake: frame.snake.cells().to_vec(),
                food: frame.food,
                board: frame.board,
                highlight_food: frame.highlight_food,
                alert: frame.alert,
            });
            Ok(())
        }
    }
}
