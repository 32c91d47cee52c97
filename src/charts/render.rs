//! Chart panels drawn with plotters
//!
//! Every panel draws onto a caller-supplied drawing area, so the same code
//! renders a standalone figure or one cell of the dashboard.

use super::summary::{SentimentCrosstab, SpoilerGroup};
use crate::models::SentimentLabel;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::collections::BTreeMap;

pub(crate) type DrawResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

const BAR_COLOR: RGBColor = RGBColor(70, 130, 180);
const BOX_COLOR: RGBColor = RGBColor(255, 160, 90);
const HEAT_LOW: RGBColor = RGBColor(255, 255, 217);
const HEAT_HIGH: RGBColor = RGBColor(8, 29, 88);

/// Bars of review count per rating on a fixed 1-10 axis
pub(crate) fn draw_rating_distribution<DB>(
    area: &DrawingArea<DB, Shift>,
    counts: &BTreeMap<u8, usize>,
    caption_size: u32,
) -> DrawResult<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let top = counts.values().copied().max().unwrap_or(0).max(1) as f64 * 1.1;

    let mut chart = ChartBuilder::on(area)
        .caption("Review Rating trend", ("sans-serif", caption_size))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(0.5f64..10.5f64, 0f64..top)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(10)
        .x_label_formatter(&|x| format!("{x:.0}"))
        .y_label_formatter(&|y| format!("{y:.0}"))
        .x_desc("Rating (1-10)")
        .y_desc("Total Reviews")
        .draw()?;

    chart.draw_series(counts.iter().map(|(rating, count)| {
        let x = f64::from(*rating);
        Rectangle::new([(x - 0.4, 0.0), (x + 0.4, *count as f64)], BAR_COLOR.filled())
    }))?;

    Ok(())
}

/// Count grid of rating rows by sentiment columns with annotated cells
pub(crate) fn draw_sentiment_heatmap<DB>(
    area: &DrawingArea<DB, Shift>,
    crosstab: &SentimentCrosstab,
    caption_size: u32,
) -> DrawResult<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let rows = crosstab.ratings.len().max(1);
    let peak = crosstab.max().max(1) as f64;
    let ratings = crosstab.ratings.clone();

    let mut chart = ChartBuilder::on(area)
        .caption("Sentiment Distribution by Rating", ("sans-serif", caption_size))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5f64..2.5f64, -0.5f64..(rows as f64 - 0.5))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(SentimentLabel::ALL.len())
        .y_labels(rows)
        .x_label_formatter(&|x| {
            cell_index(*x, SentimentLabel::ALL.len())
                .map(|i| SentimentLabel::ALL[i].to_string())
                .unwrap_or_default()
        })
        .y_label_formatter(&|y| {
            cell_index(*y, ratings.len())
                .map(|i| ratings[i].to_string())
                .unwrap_or_default()
        })
        .x_desc("Sentiment")
        .y_desc("Rating")
        .draw()?;

    let cells: Vec<(f64, f64, usize)> = crosstab
        .counts
        .iter()
        .enumerate()
        .flat_map(|(row, counts)| {
            counts
                .iter()
                .enumerate()
                .map(move |(col, count)| (col as f64, row as f64, *count))
        })
        .collect();

    chart.draw_series(cells.iter().map(|(x, y, count)| {
        let color = heat_color(*count as f64 / peak);
        Rectangle::new([(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)], color.filled())
    }))?;

    chart.draw_series(cells.iter().map(|(x, y, count)| {
        let ink = if *count as f64 / peak > 0.5 { &WHITE } else { &BLACK };
        let style = ("sans-serif", caption_size * 2 / 3)
            .into_font()
            .color(ink)
            .pos(Pos::new(HPos::Center, VPos::Center));
        Text::new(count.to_string(), (*x, *y), style)
    }))?;

    Ok(())
}

/// Box per spoiler group over the compound score
pub(crate) fn draw_spoiler_impact<DB>(
    area: &DrawingArea<DB, Shift>,
    groups: &[SpoilerGroup],
    caption_size: u32,
) -> DrawResult<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let mut chart = ChartBuilder::on(area)
        .caption("Sentiment Distribution by Spoiler Status", ("sans-serif", caption_size))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5f64..1.5f64, -1.05f64..1.05f64)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(2)
        .x_label_formatter(&|x| match cell_index(*x, 2) {
            Some(0) => "No spoiler".to_string(),
            Some(1) => "Spoiler".to_string(),
            _ => String::new(),
        })
        .x_desc("Contains Spoiler?")
        .y_desc("Sentiment Score")
        .draw()?;

    for group in groups {
        let x = if group.spoiler { 1.0 } else { 0.0 };
        let s = group.stats;

        chart.draw_series(std::iter::once(Rectangle::new(
            [(x - 0.25, s.q1), (x + 0.25, s.q3)],
            BOX_COLOR.mix(0.6).filled(),
        )))?;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(x - 0.25, s.q1), (x + 0.25, s.q3)],
            BLACK.stroke_width(1),
        )))?;

        let segments = [
            vec![(x - 0.25, s.median), (x + 0.25, s.median)],
            vec![(x, s.min), (x, s.q1)],
            vec![(x, s.q3), (x, s.max)],
            vec![(x - 0.1, s.min), (x + 0.1, s.min)],
            vec![(x - 0.1, s.max), (x + 0.1, s.max)],
        ];
        chart.draw_series(
            segments
                .into_iter()
                .map(|points| PathElement::new(points, BLACK.stroke_width(2))),
        )?;
    }

    Ok(())
}

/// Index of the cell centered on `value`, if it is a tick on a whole number
fn cell_index(value: f64, len: usize) -> Option<usize> {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return None;
    }
    let index = rounded as usize;
    (index < len).then_some(index)
}

/// Linear blend from pale yellow to dark blue
fn heat_color(intensity: f64) -> RGBColor {
    let t = intensity.clamp(0.0, 1.0);
    let blend = |lo: u8, hi: u8| (f64::from(lo) + (f64::from(hi) - f64::from(lo)) * t).round() as u8;
    RGBColor(
        blend(HEAT_LOW.0, HEAT_HIGH.0),
        blend(HEAT_LOW.1, HEAT_HIGH.1),
        blend(HEAT_LOW.2, HEAT_HIGH.2),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_index() {
        assert_eq!(cell_index(0.0, 3), Some(0));
        assert_eq!(cell_index(2.0, 3), Some(2));
        assert_eq!(cell_index(3.0, 3), None);
        assert_eq!(cell_index(0.5, 3), None);
        assert_eq!(cell_index(-1.0, 3), None);
    }

    #[test]
    fn test_heat_color_ends() {
        assert_eq!(heat_color(0.0), HEAT_LOW);
        assert_eq!(heat_color(1.0), HEAT_HIGH);
        assert_eq!(heat_color(7.0), HEAT_HIGH);
    }
}
