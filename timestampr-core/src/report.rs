//! Console output: status lines, the per-table progress bar and the final
//! summary.

use crate::Result;
use crate::error::TimestamprError;
use crate::models::RunStats;
use std::io::Write;

const BAR_WIDTH: usize = 28;

/// Formats a message as a labelled section, e.g. `[Error] message`.
pub fn format_section(section: &str, message: &str) -> String {
    format!("[{}] {}", section, message)
}

/// Writes run progress to a console-like sink.
#[derive(Debug)]
pub struct Reporter<W: Write> {
    out: W,
    progress: Option<Progress>,
}

#[derive(Debug, Clone, Copy)]
struct Progress {
    current: usize,
    total: usize,
}

impl Progress {
    fn render(self) -> String {
        let (filled, percent) = if self.total == 0 {
            (BAR_WIDTH, 100)
        } else {
            let current = self.current.min(self.total);
            (
                BAR_WIDTH * current / self.total,
                current * 100 / self.total,
            )
        };

        let mut bar = "=".repeat(filled);
        if filled < BAR_WIDTH {
            bar.push('>');
            bar.push_str(&"-".repeat(BAR_WIDTH - filled - 1));
        }

        let digits = self.total.to_string().len();
        format!(
            " {:>digits$}/{} [{}] {:>3}%",
            self.current, self.total, bar, percent
        )
    }
}

impl<W: Write> Reporter<W> {
    /// Creates a reporter writing to `out`.
    pub const fn new(out: W) -> Self {
        Self {
            out,
            progress: None,
        }
    }

    /// Writes a plain status line.
    pub fn status(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "{}", message).map_err(|e| TimestamprError::io("status line", e))
    }

    /// Writes a `[Warning] message` line.
    pub fn warning(&mut self, message: &str) -> Result<()> {
        self.status(&format_section("Warning", message))
    }

    /// Writes an `[Error] message` line.
    pub fn error(&mut self, message: &str) -> Result<()> {
        self.status(&format_section("Error", message))
    }

    /// Reports a failed run. Informational outcomes are printed bare.
    pub fn failure(&mut self, error: &TimestamprError) -> Result<()> {
        if error.is_informational() {
            self.status(&error.to_string())
        } else {
            self.error(&error.to_string())
        }
    }

    /// Draws an empty bar for `total` steps.
    pub fn start_progress(&mut self, total: usize) -> Result<()> {
        self.progress = Some(Progress { current: 0, total });
        self.draw()
    }

    /// Moves the bar one step forward.
    pub fn advance(&mut self) -> Result<()> {
        if let Some(progress) = self.progress.as_mut() {
            progress.current = progress.current.saturating_add(1);
        }
        self.draw()
    }

    /// Completes the bar and ends its line.
    pub fn finish_progress(&mut self) -> Result<()> {
        if let Some(progress) = self.progress.as_mut() {
            progress.current = progress.total;
        }
        self.draw()?;
        self.progress = None;
        // A clean line breaks the bar before the summary
        writeln!(self.out).map_err(|e| TimestamprError::io("progress bar", e))
    }

    /// Writes the `Updated N columns in M tables.` line.
    pub fn summary(&mut self, stats: &RunStats) -> Result<()> {
        self.status(&stats.to_string())
    }

    /// Returns the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self) -> Result<()> {
        let Some(progress) = self.progress else {
            return Ok(());
        };
        write!(self.out, "\r{}", progress.render())
            .and_then(|()| self.out.flush())
            .map_err(|e| TimestamprError::io("progress bar", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(reporter: Reporter<Vec<u8>>) -> String {
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_progress_rendering() {
        let half = Progress {
            current: 1,
            total: 2,
        };
        assert_eq!(
            half.render(),
            " 1/2 [==============>-------------]  50%"
        );

        let empty = Progress {
            current: 0,
            total: 2,
        };
        assert_eq!(
            empty.render(),
            " 0/2 [>---------------------------]   0%"
        );

        let done = Progress {
            current: 12,
            total: 12,
        };
        assert_eq!(
            done.render(),
            " 12/12 [============================] 100%"
        );

        let padded = Progress {
            current: 3,
            total: 10,
        };
        assert!(padded.render().starts_with("  3/10 ["));
    }

    #[test]
    fn test_full_run_output() {
        let mut reporter = Reporter::new(Vec::new());
        reporter.start_progress(2).unwrap();
        reporter.advance().unwrap();
        reporter.advance().unwrap();
        reporter.finish_progress().unwrap();
        reporter
            .summary(&RunStats {
                tables: 2,
                columns: 2,
            })
            .unwrap();

        let text = output(reporter);
        assert!(text.contains(" 0/2 ["));
        assert!(text.contains(" 1/2 ["));
        assert!(text.ends_with("100%\nUpdated 2 columns in 2 tables.\n"));
    }

    #[test]
    fn test_sections() {
        let mut reporter = Reporter::new(Vec::new());
        reporter.error("No .env file found. Aborting...").unwrap();
        reporter.warning("bad line").unwrap();
        reporter.failure(&TimestamprError::NothingToUpdate).unwrap();
        reporter
            .failure(&TimestamprError::MissingCredentials { missing: vec![] })
            .unwrap();

        assert_eq!(
            output(reporter),
            "[Error] No .env file found. Aborting...\n\
             [Warning] bad line\n\
             No tables needs updating.\n\
             [Error] Missing required database parameters\n"
        );
    }

    #[test]
    fn test_advance_without_start_writes_nothing() {
        let mut reporter = Reporter::new(Vec::new());
        reporter.advance().unwrap();
        assert!(output(reporter).is_empty());
    }
}
