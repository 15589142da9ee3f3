//! Rendering of the visible set and the category list.

use std::collections::BTreeSet;
use std::io::Write;

use storefront_products::{Product, VisibleSet};

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns
    Table,
    /// JSON array
    Json,
}

pub const EMPTY_MESSAGE: &str = "No product found";

pub fn write_products<W: Write>(
    out: &mut W,
    products: VisibleSet<'_>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &products.to_vec())?;
            writeln!(out)?;
        }
        OutputFormat::Table => write_table(out, &products.to_vec())?,
    }
    Ok(())
}

pub fn write_categories<W: Write>(
    out: &mut W,
    categories: &BTreeSet<String>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, categories)?;
            writeln!(out)?;
        }
        OutputFormat::Table => {
            for category in categories {
                writeln!(out, "{category}")?;
            }
        }
    }
    Ok(())
}

fn write_table<W: Write>(out: &mut W, products: &[&Product]) -> std::io::Result<()> {
    if products.is_empty() {
        return writeln!(out, "{EMPTY_MESSAGE}");
    }

    let rows: Vec<[String; 4]> = products
        .iter()
        .map(|p| {
            [
                p.id_typed().to_string(),
                p.name().to_string(),
                p.category().to_string(),
                p.price().to_string(),
            ]
        })
        .collect();

    let header = ["ID", "NAME", "CATEGORY", "PRICE"];
    let mut widths = header.map(|h| h.len());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_row(out, &header.map(String::from), &widths)?;
    for row in &rows {
        write_row(out, row, &widths)?;
    }
    Ok(())
}

fn write_row<W: Write>(out: &mut W, cells: &[String; 4], widths: &[usize; 4]) -> std::io::Result<()> {
    let [id, name, category, price] = cells;
    writeln!(
        out,
        "{id:<w0$}  {name:<w1$}  {category:<w2$}  {price:>w3$}",
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
        w3 = widths[3],
    )
}
