use std::convert::Infallible;

use colored::Colorize;

use crate::series::BudgetSeries;

use super::table::{Alignment, Table, TableColumn};
use super::{ChartRenderer, PlotSpec};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChartOptions {
    /// Columns used by the strip chart on each row.
    pub width: usize,
    /// ASCII only, no colors.
    pub plain: bool,
    pub currency: String,
}

impl Default for TextChartOptions {
    fn default() -> Self {
        Self {
            width: 40,
            plain: false,
            currency: "$".into(),
        }
    }
}

/// Terminal rendering: one row per day with amounts and a strip chart scaled
/// to the plot's y range.
#[derive(Debug, Clone, Default)]
pub struct TextChartRenderer {
    options: TextChartOptions,
}

impl TextChartRenderer {
    pub fn new(options: TextChartOptions) -> Self {
        Self { options }
    }

    fn money(&self, value: f64) -> String {
        if value < 0.0 {
            format!("-{}{:.2}", self.options.currency, -value)
        } else {
            format!("{}{:.2}", self.options.currency, value)
        }
    }

    fn column(&self, value: f64, plot: &PlotSpec) -> usize {
        let width = self.options.width.max(2);
        let span = plot.y_max - plot.y_min;
        if span <= 0.0 {
            return 0;
        }
        let ratio = ((value - plot.y_min) / span).clamp(0.0, 1.0);
        (ratio * (width - 1) as f64).round() as usize
    }

    fn strip(&self, spent: f64, remaining: f64, plot: &PlotSpec) -> String {
        let width = self.options.width.max(2);
        let plain = self.options.plain;
        let zero = self.column(0.0, plot);
        let spent_at = self.column(spent, plot);
        let remaining_at = self.column(remaining, plot);

        (0..width)
            .map(|idx| match (idx == spent_at, idx == remaining_at) {
                (true, true) => "*".to_string(),
                (true, false) if plain => "S".to_string(),
                (true, false) => "S".bright_red().to_string(),
                (false, true) if plain => "R".to_string(),
                (false, true) => "R".green().to_string(),
                _ if idx == zero && plain => "|".to_string(),
                _ if idx == zero => "│".to_string(),
                _ if plain => ".".to_string(),
                _ => "·".dimmed().to_string(),
            })
            .collect()
    }
}

impl ChartRenderer for TextChartRenderer {
    type Output = String;
    type Error = Infallible;

    fn render(&self, series: &BudgetSeries, plot: &PlotSpec) -> Result<String, Infallible> {
        let rows = series
            .rows()
            .into_iter()
            .map(|(date, spent, remaining)| {
                vec![
                    date.format("%Y-%m-%d").to_string(),
                    self.money(spent),
                    self.money(remaining),
                    self.strip(spent, remaining, plot),
                ]
            })
            .collect();

        let table = Table {
            columns: vec![
                TableColumn::new(plot.x_label.clone(), Alignment::Left),
                TableColumn::new("Spending", Alignment::Right),
                TableColumn::new("Remaining", Alignment::Right),
                TableColumn::new("Chart", Alignment::Left),
            ],
            rows,
            plain: self.options.plain,
        };

        let title = format!("=== {} ===", plot.title);
        let title = if self.options.plain {
            title
        } else {
            title.bold().to_string()
        };

        Ok(format!(
            "{title}\n{}\n{} axis: {} .. {}  (S = spending, R = remaining, * = both)",
            table.render(),
            plot.y_label,
            self.money(plot.y_min),
            self.money(plot.y_max),
        ))
    }
}
