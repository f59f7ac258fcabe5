use super::model::{IndicatorDataset, NameSet, years};

// ---------------------------------------------------------------------------
// Series – one plotted line
// ---------------------------------------------------------------------------

/// The values of one (country, indicator) row, tagged with where they came
/// from.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub country: String,
    pub indicator: String,
    /// One slot per year starting at 1960; `None` is a gap.
    pub values: Vec<Option<f64>>,
}

impl Series {
    /// Legend label: `"<country>, <indicator>"`.
    pub fn name(&self) -> String {
        format!("{}, {}", self.country, self.indicator)
    }

    /// Series are grouped in the legend by country.
    pub fn legend_group(&self) -> &str {
        &self.country
    }

    /// `(year, value)` pairs in year order.
    pub fn points(&self) -> impl Iterator<Item = (i32, Option<f64>)> + '_ {
        years().zip(self.values.iter().copied())
    }

    /// Runs of consecutive present values as `[year, value]` points, so
    /// absent years draw as gaps rather than zeros.
    pub fn segments(&self) -> Vec<Vec<[f64; 2]>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for (year, value) in self.points() {
            match value {
                Some(v) => current.push([year as f64, v]),
                None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }
}

// ---------------------------------------------------------------------------
// PlotSpec – everything the chart needs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverMode {
    /// Hover reports every series at the pointer's x position.
    X,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HoverLabel {
    /// Maximum characters of the series name shown; `None` = no limit.
    pub name_length: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotLayout {
    pub title: &'static str,
    pub x_axis_title: &'static str,
    pub y_axis_title: &'static str,
    pub show_legend: bool,
    pub hover_mode: HoverMode,
    pub background: &'static str,
    pub hover_label: HoverLabel,
}

impl PlotLayout {
    pub fn new(show_legend: bool) -> Self {
        PlotLayout {
            title: "Indicator Comparison Plot",
            x_axis_title: "Year",
            y_axis_title: "Value",
            show_legend,
            hover_mode: HoverMode::X,
            background: "White",
            hover_label: HoverLabel { name_length: None },
        }
    }
}

/// A line chart comparing indicators across countries.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSpec {
    pub series: Vec<Series>,
    pub layout: PlotLayout,
}

/// One series per row matching both `countries` and `indicators`, in
/// source order. No indicators means no series.
pub fn comparison_plot(
    dataset: &IndicatorDataset,
    countries: &NameSet,
    indicators: &NameSet,
    show_legend: bool,
) -> PlotSpec {
    let series = dataset
        .records_for(countries)
        .filter(|r| indicators.contains(&r.indicator_name))
        .map(|r| Series {
            country: r.country_name.clone(),
            indicator: r.indicator_name.clone(),
            values: r.values.clone(),
        })
        .collect();

    PlotSpec {
        series,
        layout: PlotLayout::new(show_legend),
    }
}
