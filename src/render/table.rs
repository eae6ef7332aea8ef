//! Terminal summary table

use super::RenderSink;
use crate::series::VolatilityCurve;
use chrono::NaiveDate;
use std::io::Write;

/// Summary statistics of one curve
#[derive(Debug, Clone, PartialEq)]
pub struct CurveStats {
    /// Legend label, e.g. "BTC-USD 30 Days"
    pub label: String,
    pub points: usize,
    /// Most recent (date, value)
    pub latest: Option<(NaiveDate, f64)>,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl CurveStats {
    pub fn from_curve(curve: &VolatilityCurve) -> Self {
        let values = curve.points.iter().map(|(_, v)| *v);
        let n = curve.points.len();

        let (min, max, sum) = values.fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(min, max, sum), v| (min.min(v), max.max(v), sum + v),
        );

        if n == 0 {
            return Self {
                label: curve.label(),
                points: 0,
                latest: None,
                min: 0.0,
                max: 0.0,
                mean: 0.0,
            };
        }

        Self {
            label: curve.label(),
            points: n,
            latest: curve.points.first().copied(),
            min,
            max,
            mean: sum / n as f64,
        }
    }

    /// Format as a table row (percentages)
    pub fn format_row(&self) -> String {
        let (date, latest) = match self.latest {
            Some((d, v)) => (d.format("%Y-%m-%d").to_string(), v),
            None => ("-".to_string(), 0.0),
        };
        format!(
            "{:<22} {:>6} {:>10} {:>9.2}% {:>9.2}% {:>9.2}% {:>9.2}%",
            self.label,
            self.points,
            date,
            latest * 100.0,
            self.min * 100.0,
            self.max * 100.0,
            self.mean * 100.0,
        )
    }
}

/// Renders a summary row per curve to a writer
pub struct TableSink<W: Write> {
    out: W,
    rows: Vec<CurveStats>,
}

impl TableSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TableSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            rows: Vec::new(),
        }
    }

    /// Consume the sink, returning the writer
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Format as table for CLI output
    pub fn format_table(&self) -> String {
        let mut table = String::from(
            r#"
══════════════════════════════════════════════════════════════════════════════════
                         REALIZED VOLATILITY (ANNUALIZED)
══════════════════════════════════════════════════════════════════════════════════
"#,
        );
        table.push_str(&format!(
            "{:<22} {:>6} {:>10} {:>10} {:>10} {:>10} {:>10}\n",
            "Curve", "Points", "Latest", "Value", "Min", "Max", "Mean"
        ));
        table.push_str(
            "──────────────────────────────────────────────────────────────────────────────────\n",
        );
        for row in &self.rows {
            table.push_str(&row.format_row());
            table.push('\n');
        }
        table.push_str(
            "══════════════════════════════════════════════════════════════════════════════════\n",
        );
        table
    }
}

impl<W: Write> RenderSink for TableSink<W> {
    fn draw(&mut self, curve: &VolatilityCurve) -> anyhow::Result<()> {
        self.rows.push(CurveStats::from_curve(curve));
        Ok(())
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        let table = self.format_table();
        self.out.write_all(table.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}
