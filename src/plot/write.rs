use super::Series;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct Row<'a> {
    series : &'a str,
    x : f64,
    y : f64
}

/// Writes the series in long format, with header series,x,y and one row per point.
pub fn write_csv<W>(series : &[Series], writer : W) -> anyhow::Result<()>
where
    W : Write
{
    let mut wtr = csv::Writer::from_writer(writer);
    for s in series.iter() {
        for p in s.points.iter() {
            wtr.serialize(Row { series : &s.label, x : p.x, y : p.y })?;
        }
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<W>(series : &[Series], mut writer : W) -> anyhow::Result<()>
where
    W : Write
{
    serde_json::to_writer_pretty(&mut writer, series)?;
    writeln!(writer)?;
    Ok(())
}
