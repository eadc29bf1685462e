use std::io::Write;
use std::path::Path;

pub const USAGE: &str = "Usage: pdftext <path-to-pdf>";

pub fn print_usage(w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "{}", USAGE)
}

pub fn print_file_not_found(w: &mut dyn Write, path: &Path) -> std::io::Result<()> {
    writeln!(w, "File not found: {}", path.display())
}

/// Print extracted text (or the diagnostic that replaced it), followed by
/// a newline.
pub fn print_extraction(w: &mut dyn Write, text: &str) -> std::io::Result<()> {
    writeln!(w, "{}", text)?;
    w.flush()
}
