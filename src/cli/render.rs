//! Plain-text table rendering for CLI output

use crate::types::{CustomerDetail, CustomerValue, MetricsSummary, MonthlyRevenue, SegmentRevenue};

#[derive(Clone, Copy)]
enum Align {
    Left,
    Right,
}

/// Render rows under a header, padding every column to its widest cell
fn table(headers: &[(&str, Align)], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|(h, _)| h.len()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let format_row = |cells: Vec<&str>| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(headers)
            .zip(&widths)
            .map(|((cell, (_, align)), &width)| match align {
                Align::Left => format!("{:<width$}", cell, width = width),
                Align::Right => format!("{:>width$}", cell, width = width),
            })
            .collect();
        padded.join("  ").trim_end().to_string()
    };

    let mut out = String::new();
    out.push_str(&format_row(headers.iter().map(|(h, _)| *h).collect()));
    out.push('\n');
    for row in rows {
        out.push_str(&format_row(row.iter().map(String::as_str).collect()));
        out.push('\n');
    }
    out
}

pub fn segments(rows: &[SegmentRevenue]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|r| vec![r.segment.clone(), format!("{:.2}", r.total_revenue)])
        .collect();
    table(&[("SEGMENT", Align::Left), ("REVENUE", Align::Right)], &cells)
}

pub fn months(rows: &[MonthlyRevenue]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|r| vec![r.year_month.clone(), format!("{:.2}", r.total_revenue)])
        .collect();
    table(&[("MONTH", Align::Left), ("REVENUE", Align::Right)], &cells)
}

pub fn customer_values(rows: &[CustomerValue]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .enumerate()
        .map(|(rank, r)| {
            vec![
                (rank + 1).to_string(),
                r.customer_id.to_string(),
                r.customer_name.clone(),
                format!("{:.2}", r.lifetime_value),
            ]
        })
        .collect();
    table(
        &[
            ("#", Align::Right),
            ("ID", Align::Right),
            ("CUSTOMER", Align::Left),
            ("LIFETIME VALUE", Align::Right),
        ],
        &cells,
    )
}

pub fn customers(rows: &[CustomerDetail]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|c| {
            vec![
                c.id.to_string(),
                c.name.clone(),
                c.email.clone(),
                c.signup_date.to_string(),
                c.segment.clone(),
                c.orders.len().to_string(),
            ]
        })
        .collect();
    table(
        &[
            ("ID", Align::Right),
            ("NAME", Align::Left),
            ("EMAIL", Align::Left),
            ("SIGNUP", Align::Left),
            ("SEGMENT", Align::Left),
            ("ORDERS", Align::Right),
        ],
        &cells,
    )
}

pub fn customer(detail: &CustomerDetail) -> String {
    let mut out = format!(
        "{} (#{})\n  email:   {}\n  signup:  {}\n  segment: {}\n\n",
        detail.name, detail.id, detail.email, detail.signup_date, detail.segment
    );
    let cells: Vec<Vec<String>> = detail
        .orders
        .iter()
        .map(|o| {
            vec![
                o.id.to_string(),
                o.order_date.to_string(),
                format!("{:.2}", o.amount),
            ]
        })
        .collect();
    out.push_str(&table(
        &[
            ("ORDER", Align::Right),
            ("DATE", Align::Left),
            ("AMOUNT", Align::Right),
        ],
        &cells,
    ));
    out
}

pub fn summary(s: &MetricsSummary) -> String {
    format!(
        "Customers:        {}\nOrders:           {}\nOrphan orders:    {}\nTotal revenue:    {:.2}\nCustomer revenue: {:.2}\n",
        s.customer_count, s.order_count, s.orphan_order_count, s.total_revenue, s.joined_revenue
    )
}
