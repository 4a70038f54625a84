//! In-place terminal rendering of encode progress.
//!
//! The renderer has two modes, chosen by whether the total duration is known:
//! a 50-cell percentage bar driven by `ElapsedTime` events, or a plain frame
//! counter driven by `FrameCount` events. Either way the indicator occupies a
//! single line that is rewritten on every update.

use super::ProgressEvent;
use crate::processing::duration::DurationEstimate;
use crate::terminal_output;
use console::{Alignment, Term};
use std::io;

/// Number of cells in the percentage bar.
pub const BAR_WIDTH: usize = 50;

const FILLED_CELL: &str = "█";
const EMPTY_CELL: &str = "░";

/// Where progress lines are drawn.
pub trait TerminalSurface {
    /// Current width in columns.
    fn width(&self) -> usize;

    /// Prints `text` followed by a newline.
    fn write_line(&mut self, text: &str) -> io::Result<()>;

    /// Moves the cursor to the start of the previous line and clears it.
    fn move_up_and_clear(&mut self) -> io::Result<()>;
}

impl TerminalSurface for Term {
    fn width(&self) -> usize {
        usize::from(self.size().1)
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        Term::write_line(self, text)
    }

    fn move_up_and_clear(&mut self) -> io::Result<()> {
        Term::move_cursor_up(self, 1)?;
        Term::clear_line(self)
    }
}

/// Percentage of `total_secs` covered by `elapsed`. Not clamped: trailing
/// packets can push it past 100.
#[must_use]
pub fn progress_percent(elapsed_secs: f64, total_secs: f64) -> f64 {
    elapsed_secs / total_secs * 100.0
}

/// Number of filled bar cells for `percent` (`floor(50 * percent / 100)`).
#[must_use]
pub fn filled_cells(percent: f64) -> usize {
    let cells = (BAR_WIDTH as f64 * percent / 100.0).floor();
    if cells > 0.0 { cells as usize } else { 0 }
}

/// Formats the bar, e.g. `[█████░░░…] 10.0%`.
#[must_use]
pub fn progress_bar(percent: f64) -> String {
    let filled = filled_cells(percent);
    format!(
        "[{}{}] {percent:.1}%",
        FILLED_CELL.repeat(filled),
        EMPTY_CELL.repeat(BAR_WIDTH.saturating_sub(filled))
    )
}

/// Text for `event` under `duration`, or `None` when the event does not
/// belong to the active mode.
#[must_use]
pub fn progress_text(event: &ProgressEvent, duration: DurationEstimate) -> Option<String> {
    match (duration, event) {
        (DurationEstimate::Unknown, ProgressEvent::FrameCount(frames)) => {
            Some(format!("Processed {frames} frames"))
        }
        (DurationEstimate::Known(total), ProgressEvent::ElapsedTime(elapsed)) => {
            Some(progress_bar(progress_percent(elapsed.as_secs_f64(), total)))
        }
        _ => None,
    }
}

/// Tracks whether the line above the cursor is a progress line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderState {
    last_line_was_progress: bool,
}

impl RenderState {
    #[must_use]
    pub fn last_line_was_progress(&self) -> bool {
        self.last_line_was_progress
    }

    /// Draws `text` as the progress line.
    ///
    /// The first draw reserves a blank line above the indicator; later draws
    /// overwrite the previous indicator instead of scrolling.
    pub fn redraw<S>(&mut self, surface: &mut S, text: &str) -> io::Result<()>
    where
        S: TerminalSurface + ?Sized,
    {
        if self.last_line_was_progress {
            surface.move_up_and_clear()?;
        } else {
            surface.write_line("")?;
        }
        surface.write_line(text)?;
        self.last_line_was_progress = true;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.last_line_was_progress = false;
    }
}

/// Renders progress events for one encode.
#[derive(Debug, Clone)]
pub struct ProgressRenderer {
    duration: DurationEstimate,
    state: RenderState,
}

impl ProgressRenderer {
    #[must_use]
    pub fn new(duration: DurationEstimate) -> Self {
        Self {
            duration,
            state: RenderState::default(),
        }
    }

    #[must_use]
    pub fn state(&self) -> RenderState {
        self.state
    }

    /// Renders `event`, centred to the surface width. Returns whether
    /// anything was drawn.
    pub fn render<S>(&mut self, event: &ProgressEvent, surface: &mut S) -> io::Result<bool>
    where
        S: TerminalSurface + ?Sized,
    {
        let Some(text) = progress_text(event, self.duration) else {
            return Ok(false);
        };

        let styled = match event {
            ProgressEvent::ElapsedTime(_) => terminal_output::progress(&text),
            ProgressEvent::FrameCount(_) => text,
        };
        let centered = console::pad_str(&styled, surface.width(), Alignment::Center, None);
        self.state.redraw(surface, &centered)?;
        Ok(true)
    }

    /// Leaves the progress line behind with a blank line after it.
    pub fn finish<S>(&mut self, surface: &mut S) -> io::Result<()>
    where
        S: TerminalSurface + ?Sized,
    {
        if self.state.last_line_was_progress() {
            surface.write_line("")?;
            self.state.reset();
        }
        Ok(())
    }
}
