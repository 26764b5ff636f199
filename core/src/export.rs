//! CSV export of the two output tables.

use crate::{
    classes::ClassStatistics,
    error::RfmResult,
    pipeline::CustomerSegment,
};
use serde::Serialize;
use std::io::Write;

fn write_rows<W: Write, T: Serialize>(writer: W, rows: &[T]) -> RfmResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_class_statistics<W: Write>(writer: W, stats: &[ClassStatistics]) -> RfmResult<()> {
    write_rows(writer, stats)
}

pub fn write_segmentation<W: Write>(writer: W, segments: &[CustomerSegment]) -> RfmResult<()> {
    write_rows(writer, segments)
}

pub fn class_statistics_csv(stats: &[ClassStatistics]) -> RfmResult<String> {
    let mut buf = Vec::new();
    write_class_statistics(&mut buf, stats)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

pub fn segmentation_csv(segments: &[CustomerSegment]) -> RfmResult<String> {
    let mut buf = Vec::new();
    write_segmentation(&mut buf, segments)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
