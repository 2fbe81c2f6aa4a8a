//! Per-level distribution table for external plotting.

use super::ReportError;
use crate::analysis::{Comparison, LEVELS};
use std::io::Write;
use std::path::Path;

/// CSV header written by [`write_distribution_table`].
pub const TABLE_HEADER: &str = "level,hist1,hist2,cdf1,cdf2";

/// Writes one CSV row per intensity level.
pub fn write_distribution_table<W: Write>(
    mut writer: W,
    comparison: &Comparison,
) -> std::io::Result<()> {
    writeln!(writer, "{TABLE_HEADER}")?;

    let (h1, h2) = (
        comparison.first.histogram.densities(),
        comparison.second.histogram.densities(),
    );
    let (c1, c2) = (comparison.first.cdf.values(), comparison.second.cdf.values());

    for level in 0..LEVELS {
        writeln!(
            writer,
            "{},{},{},{},{}",
            level, h1[level], h2[level], c1[level], c2[level]
        )?;
    }

    writer.flush()
}

/// Writes the distribution table to a file.
pub fn write_distribution_file(
    path: impl AsRef<Path>,
    comparison: &Comparison,
) -> Result<(), ReportError> {
    let file = std::fs::File::create(path.as_ref())?;
    write_distribution_table(std::io::BufWriter::new(file), comparison)?;
    tracing::info!(path = %path.as_ref().display(), "Wrote distribution table");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Sample;

    #[test]
    fn test_table_shape() {
        let a = Sample::new(vec![0, 255]);
        let b = Sample::new(vec![255]);
        let comparison = Comparison::with_default_alpha(&a, &b).unwrap();

        let mut buffer = Vec::new();
        write_distribution_table(&mut buffer, &comparison).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), LEVELS + 1);
        assert_eq!(lines[0], TABLE_HEADER);
        assert_eq!(lines[1], "0,0.5,0,0.5,0");
        assert_eq!(lines[256], "255,0.5,1,1,1");
    }
}
