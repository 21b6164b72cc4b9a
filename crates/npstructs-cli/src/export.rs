use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Result;
use npstructs_core::progress::{LocateStage, NoOpReporter, ProgressReporter};
use npstructs_core::ResultTable;

/// Write the table as CSV or JSON, chosen by the file extension.
pub fn write_table(table: &ResultTable, path: &Path) -> Result<()> {
    write_table_with(table, path, &NoOpReporter)
}

/// Same as [`write_table`], reporting the `Writing` stage in table rows.
pub fn write_table_with(
    table: &ResultTable,
    path: &Path,
    reporter: &dyn ProgressReporter,
) -> Result<()> {
    reporter.begin_stage(LocateStage::Writing, Some(table.len()));
    let mut writer = BufWriter::new(File::create(path)?);
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        write_json(table, &mut writer)?;
    } else {
        write_csv(table, &mut writer)?;
    }
    writer.flush()?;

    reporter.advance(table.len());
    reporter.finish_stage();
    Ok(())
}

/// One row per structure: `x,y,size,frame`.
pub fn write_csv<W: Write>(table: &ResultTable, writer: &mut W) -> Result<()> {
    writeln!(writer, "x,y,size,frame")?;
    for r in table.iter() {
        writeln!(writer, "{},{},{},{}", r.x, r.y, r.size, r.frame)?;
    }
    Ok(())
}

pub fn write_json<W: Write>(table: &ResultTable, writer: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, table)?;
    writeln!(writer)?;
    Ok(())
}
