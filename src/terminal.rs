//! Terminal display and input handling

use crate::color::Color;
use crate::controls::{Action, MOUSE_SENSITIVITY};
use crate::framebuffer::FrameBuffer;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, stdout, BufWriter, Stdout, Write};
use std::time::{Duration, Instant};

/// Rows kept free below the image for the status line
const STATUS_ROWS: u16 = 2;

/// Encode a frame as upper-half-block cells, two vertical samples per cell.
///
/// The foreground (the block) shows the upper sample and the background the
/// lower one, both as 24-bit color. Escape codes are only emitted when a color
/// changes. Odd heights pad the last row with black. Rows are separated by
/// newlines and the last row ends with a color reset.
pub fn encode_halfblock(frame: &FrameBuffer) -> String {
    let width = frame.width();
    let output_height = frame.height().div_ceil(2);
    let mut result = String::with_capacity(width * output_height * 20);

    let mut last_fg: Option<Color> = None;
    let mut last_bg: Option<Color> = None;

    for y in 0..output_height {
        if y > 0 {
            result.push('\n');
        }
        for x in 0..width {
            let top = frame.get(y * 2, x).unwrap_or_default();
            let bottom = frame.get(y * 2 + 1, x).unwrap_or_default();

            let fg_changed = last_fg != Some(top);
            let bg_changed = last_bg != Some(bottom);

            if fg_changed && bg_changed {
                result.push_str(&format!(
                    "\x1b[38;2;{};{};{};48;2;{};{};{}m",
                    top.r, top.g, top.b, bottom.r, bottom.g, bottom.b
                ));
            } else if fg_changed {
                result.push_str(&format!("\x1b[38;2;{};{};{}m", top.r, top.g, top.b));
            } else if bg_changed {
                result.push_str(&format!("\x1b[48;2;{};{};{}m", bottom.r, bottom.g, bottom.b));
            }
            last_fg = Some(top);
            last_bg = Some(bottom);

            result.push('\u{2580}');
        }
    }

    result.push_str("\x1b[0m");
    result
}

/// Terminal display handler with buffered output
pub struct TerminalDisplay {
    width: u16,
    height: u16,
    last_resize_check: Instant,
    buffer: BufWriter<Stdout>,
}

impl TerminalDisplay {
    pub fn new() -> io::Result<Self> {
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        terminal::enable_raw_mode()?;
        execute!(stdout, terminal::Clear(terminal::ClearType::All))?;

        let (width, height) = terminal::size()?;

        Ok(Self {
            width,
            height: height.saturating_sub(STATUS_ROWS),
            last_resize_check: Instant::now(),
            buffer: BufWriter::new(stdout),
        })
    }

    /// Sample grid that fills the display: one column and two rows per cell
    pub fn sample_size(&self) -> (usize, usize) {
        (self.width.max(1) as usize, (self.height.max(1) as usize) * 2)
    }

    /// Check if terminal has been resized
    pub fn check_resize(&mut self) -> bool {
        if self.last_resize_check.elapsed() < Duration::from_millis(100) {
            return false;
        }
        self.last_resize_check = Instant::now();

        if let Ok((new_width, new_height)) = terminal::size() {
            let new_height = new_height.saturating_sub(STATUS_ROWS);
            if new_width != self.width || new_height != self.height {
                self.width = new_width;
                self.height = new_height;
                return true;
            }
        }
        false
    }

    /// Draw encoded frame content with a status line below it
    pub fn render(&mut self, content: &str, status: &str) -> io::Result<()> {
        // Hide cursor and disable line wrap while drawing
        write!(self.buffer, "\x1b[?25l\x1b[?7l")?;

        // Position every line explicitly so an overlong line cannot shift the rest
        let mut rows = 0;
        for (i, line) in content.lines().enumerate() {
            write!(self.buffer, "\x1b[{};1H{}", i + 1, line)?;
            rows = i + 1;
        }

        write!(self.buffer, "\x1b[0m\x1b[J")?;
        write!(self.buffer, "\x1b[{};1H\x1b[K{}", rows + 1, status)?;
        write!(self.buffer, "\x1b[?25h\x1b[?7h")?;

        self.buffer.flush()
    }

    /// Drain every input event already queued, without blocking
    pub fn drain_events(&self) -> io::Result<Vec<Event>> {
        let mut events = Vec::new();
        while event::poll(Duration::ZERO)? {
            events.push(event::read()?);
        }
        Ok(events)
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = self.buffer.flush();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen);
    }
}

/// Parse keyboard input into actions
pub fn parse_key_event(event: KeyEvent) -> Action {
    if event.kind == KeyEventKind::Release {
        return Action::None;
    }
    match event.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('w') => Action::MoveForward,
        KeyCode::Char('s') => Action::MoveBack,
        KeyCode::Char('a') => Action::MoveLeft,
        KeyCode::Char('d') => Action::MoveRight,
        KeyCode::Char(' ') => Action::MoveUp,
        KeyCode::Char('x') => Action::MoveDown,
        KeyCode::Up => Action::LookUp,
        KeyCode::Down => Action::LookDown,
        KeyCode::Left => Action::LookLeft,
        KeyCode::Right => Action::LookRight,
        KeyCode::Char('o') => Action::ToggleOrbit,
        KeyCode::Char('p') => Action::Pause,
        KeyCode::Char('r') => Action::Reset,
        _ => Action::None,
    }
}

/// Turns mouse movement into look deltas.
///
/// The first event after construction only records the position.
#[derive(Debug, Default)]
pub struct MouseLook {
    last: Option<(u16, u16)>,
}

impl MouseLook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, event: MouseEvent) -> Action {
        if !matches!(event.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
            return Action::None;
        }

        let position = (event.column, event.row);
        let action = match self.last {
            Some((col, row)) if (col, row) != position => Action::Look {
                d_yaw: (event.column as f32 - col as f32) * MOUSE_SENSITIVITY,
                d_pitch: (event.row as f32 - row as f32) * MOUSE_SENSITIVITY,
            },
            _ => Action::None,
        };
        self.last = Some(position);
        action
    }
}

/// Map any terminal event to an action
pub fn parse_event(event: Event, mouse: &mut MouseLook) -> Action {
    match event {
        Event::Key(key) => parse_key_event(key),
        Event::Mouse(m) => mouse.handle(m),
        _ => Action::None,
    }
}
