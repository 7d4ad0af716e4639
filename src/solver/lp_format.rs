// CPLEX-LP text serialization of a `NativeModel`

use super::native::{BoundKind, ColumnKind, Direction, NativeModel, NativeRow};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Write `model` to `path`, replacing any existing file.
pub fn write_lp_file(model: &NativeModel, path: &Path) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_lp(model, &mut out)?;
    out.flush()
}

pub fn write_lp<W: Write>(model: &NativeModel, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "\\* Problem: {} columns, {} rows *\\",
        model.num_cols(),
        model.num_rows()
    )?;
    writeln!(out)?;

    match model.direction() {
        Direction::Minimize => writeln!(out, "Minimize")?,
        Direction::Maximize => writeln!(out, "Maximize")?,
    }
    let objective: Vec<(usize, f64)> = model
        .columns()
        .iter()
        .enumerate()
        .filter(|(_, col)| col.objective != 0.0)
        .map(|(k, col)| (k + 1, col.objective))
        .collect();
    write!(out, " obj:")?;
    write_terms(model, &objective, out)?;
    writeln!(out)?;
    writeln!(out)?;

    writeln!(out, "Subject To")?;
    // Without columns a row has no variable to write, so nothing is emitted.
    let rows: &[NativeRow] = if model.num_cols() > 0 { model.rows() } else { &[] };
    for row in rows {
        let (lower, upper) = row.bounds();
        match row.bound_kind {
            BoundKind::Free => continue,
            BoundKind::Double => {
                write_row(model, &format!("{}_lo", row.name), row, ">=", lower, out)?;
                write_row(model, &format!("{}_up", row.name), row, "<=", upper, out)?;
            }
            BoundKind::Fixed => write_row(model, &row.name, row, "=", lower, out)?,
            BoundKind::Lower => write_row(model, &row.name, row, ">=", lower, out)?,
            BoundKind::Upper => write_row(model, &row.name, row, "<=", upper, out)?,
        }
    }
    writeln!(out)?;

    writeln!(out, "Bounds")?;
    for col in model.columns() {
        let (lower, upper) = col.bounds();
        match col.bound_kind {
            BoundKind::Free => writeln!(out, " {} free", col.name)?,
            BoundKind::Fixed => writeln!(out, " {} = {}", col.name, number(lower))?,
            BoundKind::Lower => writeln!(out, " {} >= {}", col.name, number(lower))?,
            BoundKind::Upper => writeln!(out, " -inf <= {} <= {}", col.name, number(upper))?,
            BoundKind::Double => writeln!(
                out,
                " {} <= {} <= {}",
                number(lower),
                col.name,
                number(upper)
            )?,
        }
    }

    let integers: Vec<&str> = model
        .columns()
        .iter()
        .filter(|col| col.kind == ColumnKind::Integer)
        .map(|col| col.name.as_str())
        .collect();
    if !integers.is_empty() {
        writeln!(out)?;
        writeln!(out, "Generals")?;
        for name in integers {
            writeln!(out, " {name}")?;
        }
    }

    writeln!(out)?;
    writeln!(out, "End")
}

fn write_row<W: Write>(
    model: &NativeModel,
    name: &str,
    row: &NativeRow,
    relation: &str,
    rhs: f64,
    out: &mut W,
) -> io::Result<()> {
    write!(out, " {name}:")?;
    write_terms(model, &row.coefficients, out)?;
    writeln!(out, " {relation} {}", number(rhs))
}

fn write_terms<W: Write>(model: &NativeModel, terms: &[(usize, f64)], out: &mut W) -> io::Result<()> {
    if terms.is_empty() {
        // LP readers need at least one variable per expression.
        if let Some(first) = model.columns().first() {
            write!(out, " 0 {}", first.name)?;
        }
        return Ok(());
    }
    for &(j, coefficient) in terms {
        let Some(col) = model.column(j) else {
            continue;
        };
        let sign = if coefficient < 0.0 { '-' } else { '+' };
        write!(out, " {sign} {} {}", number(coefficient.abs()), col.name)?;
    }
    Ok(())
}

fn number(value: f64) -> String {
    if value == f64::INFINITY {
        "+inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-inf".to_string()
    } else {
        format!("{value}")
    }
}
