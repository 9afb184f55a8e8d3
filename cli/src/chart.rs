//! Prop chart drawn with ratatui into an inline viewport.
//!
//! One horizontal bar per game, oldest at the top, with a dashed marker at the prop line.

use proptrack::{
    props::{ChartBar, Outcome},
    PropLine,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Paragraph},
    Frame, Terminal, TerminalOptions, Viewport,
};
use std::io;

const MARKER: &str = "┆";

fn outcome_style(outcome: Outcome) -> Style {
    match outcome {
        Outcome::Over => Style::default().fg(Color::Green),
        Outcome::Under => Style::default().fg(Color::Red),
    }
}

fn line_style() -> Style {
    Style::default().fg(Color::Blue)
}

/// Rows needed: title, prop line annotation, one per bar
pub fn height(bars: &[ChartBar]) -> u16 {
    bars.len() as u16 + 2
}

fn scale_max(bars: &[ChartBar], line: PropLine) -> f64 {
    bars.iter()
        .map(|b| b.value)
        .fold(line.value(), f64::max)
        .max(1.0)
        .ceil()
}

pub fn draw(frame: &mut Frame, title: &str, bars: &[ChartBar], line: PropLine) {
    let area = frame.size();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let label_width = bars.iter().map(|b| b.label.len()).max().unwrap_or(0) as u16 + 1;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(label_width), Constraint::Min(1)])
        .split(rows[2]);
    let (labels_area, bars_area) = (columns[0], columns[1]);

    frame.render_widget(
        Paragraph::new(title).style(Style::default().add_modifier(Modifier::BOLD)),
        rows[0],
    );

    let labels: Vec<Line> = bars.iter().map(|b| Line::from(b.label.as_str())).collect();
    frame.render_widget(Paragraph::new(labels), labels_area);

    let max = scale_max(bars, line);
    let data: Vec<Bar> = bars
        .iter()
        .map(|b| {
            Bar::default()
                .value(b.value.max(0.0).round() as u64)
                .text_value(String::new())
                .style(outcome_style(b.outcome))
        })
        .collect();
    let chart = BarChart::default()
        .data(BarGroup::default().bars(&data))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .group_gap(0)
        .max(max as u64);
    frame.render_widget(chart, bars_area);

    if bars_area.width == 0 {
        return;
    }
    let span = f64::from(bars_area.width.saturating_sub(1));
    let marker_x = bars_area.x + ((line.value() / max) * span).round() as u16;

    // dashed rule through the gaps, bars that clear the line stay on top
    let buf = frame.buffer_mut();
    for y in bars_area.y..bars_area.y + (bars.len() as u16).min(bars_area.height) {
        let cell = buf.get_mut(marker_x, y);
        if cell.symbol() == " " {
            cell.set_symbol(MARKER).set_style(line_style());
        }
    }

    let annotation = format!("{MARKER} Prop Line: {line}");
    let width = (annotation.chars().count() as u16).min(area.width);
    let x = marker_x.min(area.right().saturating_sub(width));
    frame.render_widget(
        Paragraph::new(annotation).style(line_style()),
        Rect::new(x, rows[1].y, width, 1),
    );
}

/// Draws the chart below the cursor without taking over the screen.
pub fn print(title: &str, bars: &[ChartBar], line: PropLine) -> io::Result<()> {
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::with_options(
        backend,
        TerminalOptions {
            viewport: Viewport::Inline(height(bars)),
        },
    )?;
    terminal.draw(|frame| draw(frame, title, bars, line))?;
    println!();
    Ok(())
}

/// Numbered value list under the chart
pub fn legend(bars: &[ChartBar]) -> String {
    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            format!(
                "{:>3}. {:<16} {:>7.1}  {}\n",
                i + 1,
                bar.label,
                bar.value,
                bar.outcome
            )
        })
        .collect()
}
