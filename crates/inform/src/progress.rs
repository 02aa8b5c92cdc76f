//! Progress rendering: a block-character bar and a milestone bar.

use std::io::{self, Write};

/// Eighth-block characters, one-eighth first.
const PARTIAL_BLOCKS: [char; 7] = ['▏', '▎', '▍', '▌', '▋', '▊', '▉'];

/// Default width of a [`ProgressBar`].
const BAR_WIDTH: usize = 79;

/// Render `fraction` (0 to 1) as a bar of unicode blocks, `width` cells
/// wide at full scale. Partial cells use eighth blocks.
///
/// ```
/// use inform::render_bar;
///
/// assert_eq!(render_bar(0.5, 8), "████");
/// assert_eq!(render_bar(1.0, 4), "████");
/// assert_eq!(render_bar(0.0, 4), "");
/// ```
#[must_use]
pub fn render_bar(fraction: f64, width: usize) -> String {
    let fraction = fraction.clamp(0.0, 1.0);
    let scaled = fraction * width as f64;
    let full = scaled.floor() as usize;
    let eighths = ((scaled - scaled.floor()) * 8.0).round() as usize;

    let mut bar = "█".repeat(full);
    if eighths >= 8 {
        bar.push('█');
    } else if eighths > 0 {
        bar.push(PARTIAL_BLOCKS[eighths - 1]);
    }
    bar
}

/// An incremental milestone bar.
///
/// Ticks are printed as the reported fraction advances, with countdown
/// digits at each tenth of the width (9 at 10%, 8 at 20%, down to 0 at
/// completion), so interrupted runs show how far they got. [`done`]
/// completes the bar and terminates the line.
///
/// [`done`]: Self::done
pub struct ProgressBar {
    width: usize,
    drawn: usize,
    target: Box<dyn Write + Send>,
}

impl ProgressBar {
    /// Create a bar of the default width drawing to stdout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_writer(BAR_WIDTH, io::stdout())
    }

    /// Create a bar of the given width drawing to `writer`.
    #[must_use]
    pub fn with_writer(width: usize, writer: impl Write + Send + 'static) -> Self {
        Self {
            width,
            drawn: 0,
            target: Box::new(writer),
        }
    }

    /// Advance the bar to `fraction` (0 to 1), printing any newly reached
    /// ticks.
    pub fn update(&mut self, fraction: f64) -> io::Result<()> {
        let fraction = fraction.clamp(0.0, 1.0);
        let goal = (fraction * self.width as f64).floor() as usize;
        while self.drawn < goal {
            self.drawn += 1;
            let tick = self.tick_char(self.drawn);
            write!(self.target, "{tick}")?;
        }
        self.target.flush()
    }

    /// Complete the bar and terminate the line.
    pub fn done(&mut self) -> io::Result<()> {
        self.update(1.0)?;
        writeln!(self.target)?;
        self.target.flush()
    }

    fn tick_char(&self, position: usize) -> char {
        for decade in 1..=10usize {
            if position == self.width * decade / 10 {
                return char::from_digit((10 - decade) as u32, 10).unwrap_or('.');
            }
        }
        '.'
    }
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ProgressBar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressBar")
            .field("width", &self.width)
            .field("drawn", &self.drawn)
            .finish_non_exhaustive()
    }
}
