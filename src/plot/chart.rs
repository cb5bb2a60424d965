use super::Series;
use std::fmt;

const DEFAULT_WIDTH : usize = 50;

/// Renders a series as horizontal bars, one line per point, with bar lengths
/// proportional to the ordinate. Suitable for quick inspection of a PMF or density
/// in a terminal.
pub struct TextChart<'a> {
    series : &'a Series,
    width : usize
}

impl<'a> TextChart<'a> {

    pub fn new(series : &'a Series) -> Self {
        Self { series, width : DEFAULT_WIDTH }
    }

    /// Number of characters of the longest bar.
    pub fn width(mut self, width : usize) -> Self {
        self.width = width.max(1);
        self
    }

}

impl<'a> fmt::Display for TextChart<'a> {

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.series.label)?;
        let max = self.series.points.iter().map(|p| p.y ).fold(0.0, f64::max);
        for p in self.series.points.iter() {
            let len = if max > 0.0 {
                ((p.y / max) * self.width as f64).round() as usize
            } else {
                0
            };
            writeln!(f, "{:>8.3} | {:<w$} {:.4}", p.x, "#".repeat(len), p.y, w = self.width)?;
        }
        Ok(())
    }

}

#[test]
fn bars_scale_to_width() {
    let s = crate::plot::binomial_pmf(2, 0.5).unwrap();
    let txt = format!("{}", TextChart::new(&s).width(10));
    let lines : Vec<_> = txt.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "Bin(2, 0.5)");
    assert!(lines[2].contains(&"#".repeat(10)));
    assert!(lines[1].contains(&"#".repeat(5)));
    assert!(!lines[1].contains(&"#".repeat(6)));
}
