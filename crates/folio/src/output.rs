//! Terminal output for the `folio` commands.

use console::{Style, Term};

/// Width the labels of [`Output::field`] are padded to.
const LABEL_WIDTH: usize = 16;

/// Writes status lines to stderr and descriptor data to stdout.
///
/// Only [`Output::data`] touches stdout, so `folio show | jq` sees JSON alone.
pub(crate) struct Output {
    stderr: Term,
    stdout: Term,
    label: Style,
    ok: Style,
    warn: Style,
    fail: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            stderr: Term::stderr(),
            stdout: Term::stdout(),
            label: Style::new().cyan().bold(),
            ok: Style::new().green(),
            warn: Style::new().yellow(),
            fail: Style::new().red(),
        }
    }

    /// Print a `label  value` line with the label styled and aligned.
    pub(crate) fn field(&self, label: &str, value: &str) {
        let label = self.label.apply_to(pad_label(label));
        let _ = self.stderr.write_line(&format!("{label}{value}"));
    }

    /// Print the final verdict of a command (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.stderr.write_line(&self.ok.apply_to(msg).to_string());
    }

    /// Print a `warning:` line (yellow) for settings that load but look risky.
    pub(crate) fn warning(&self, msg: &str) {
        let line = format!("warning: {msg}");
        let _ = self.stderr.write_line(&self.warn.apply_to(line).to_string());
    }

    /// Print an error line (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.stderr.write_line(&self.fail.apply_to(msg).to_string());
    }

    /// Write uncolored data to stdout.
    pub(crate) fn data(&self, data: &str) -> std::io::Result<()> {
        self.stdout.write_line(data)
    }
}

fn pad_label(label: &str) -> String {
    format!("{:<LABEL_WIDTH$}", format!("{label}:"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_pad_label_aligns_values() {
        assert_eq!(pad_label("Theme"), "Theme:          ");
        assert_eq!(pad_label("Theme").len(), LABEL_WIDTH);
    }

    #[test]
    fn test_pad_label_keeps_long_labels_whole() {
        let label = "A label longer than the column";
        assert_eq!(pad_label(label), format!("{label}:"));
    }
}
