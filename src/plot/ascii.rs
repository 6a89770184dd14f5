//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - monthly trend: `o` points joined by a `-` line, month initials underneath
//! - product distribution: one horizontal `#` bar per product

use std::collections::BTreeMap;

use crate::domain::Month;
use crate::report::{NO_DATA, fmt_currency};

/// Line chart of the 12 monthly sums.
pub fn render_month_trend(by_month: &[(Month, f64)], width: usize, height: usize) -> String {
    let width = width.max(Month::ALL.len());
    let height = height.max(3);

    let y_max = by_month.iter().map(|&(_, v)| v).fold(0.0_f64, f64::max);
    let y_max = if y_max > 0.0 { y_max } else { 1.0 };
    let y_min = 0.0;

    let mut grid = vec![vec![' '; width]; height];

    let cells: Vec<(usize, usize)> = by_month
        .iter()
        .map(|&(month, v)| {
            (
                map_x(month.index(), Month::ALL.len(), width),
                map_y(v, y_min, y_max, height),
            )
        })
        .collect();

    // Line first so points overlay it.
    for w in cells.windows(2) {
        let (x0, y0) = w[0];
        let (x1, y1) = w[1];
        draw_line(&mut grid, x0, y0, x1, y1, '-');
    }
    for &(x, y) in &cells {
        grid[y][x] = 'o';
    }

    let mut axis = vec![' '; width];
    for month in Month::ALL {
        let x = map_x(month.index(), Month::ALL.len(), width);
        axis[x] = month.abbrev().chars().next().unwrap_or(' ');
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: months=[Jan, Dec] | sales=[{y_min:.2}, {y_max:.2}]\n"
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out.push_str(&axis.into_iter().collect::<String>());
    out.push('\n');
    out
}

/// Horizontal bar chart of sales per product (key order).
pub fn render_product_bars(by_product: &BTreeMap<String, f64>, width: usize) -> String {
    if by_product.is_empty() {
        return format!("{NO_DATA}\n");
    }

    let width = width.max(1);
    let label_width = by_product.keys().map(|k| k.chars().count()).max().unwrap_or(0);
    let max = by_product.values().copied().fold(0.0_f64, f64::max);

    let mut out = String::new();
    out.push_str(&format!("Plot: sales by product | max={}\n", fmt_currency(max)));
    for (product, &sales) in by_product {
        let len = if max > 0.0 {
            ((sales / max) * width as f64).round() as usize
        } else {
            0
        };
        out.push_str(&format!(
            "{product:<label_width$} |{} {}\n",
            "#".repeat(len),
            fmt_currency(sales)
        ));
    }
    out
}

fn map_x(idx: usize, n: usize, width: usize) -> usize {
    if n < 2 {
        return 0;
    }
    let u = idx as f64 / (n as f64 - 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
