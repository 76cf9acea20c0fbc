use crate::display;
use std::io::{self, BufRead, Write};
use tfindex_core::query::DEFAULT_WEIGHT;
use tfindex_core::{Index, QuerySet};

/// Menu loop over already-built tables. Ends on option 3 or end of input.
pub fn run<R: BufRead, W: Write>(index: &Index, mut input: R, out: &mut W) -> anyhow::Result<()> {
    loop {
        writeln!(out, "\nSearch options:")?;
        writeln!(out, "1. Search by single word")?;
        writeln!(out, "2. Search by word file")?;
        writeln!(out, "3. Exit")?;
        let Some(choice) = prompt(&mut input, out, "Enter your choice (1-3): ")? else { break };

        match choice.parse::<i64>() {
            Ok(1) => {
                if !search_word(index, &mut input, out)? { break; }
            }
            Ok(2) => {
                if !search_file(index, &mut input, out)? { break; }
            }
            Ok(3) => {
                writeln!(out, "Exiting program.")?;
                break;
            }
            Ok(_) => writeln!(out, "Invalid option, please try again.")?,
            Err(_) => writeln!(out, "Please enter a valid number.")?,
        }
    }
    Ok(())
}

/// Returns `false` once input is exhausted.
fn search_word<R: BufRead, W: Write>(index: &Index, input: &mut R, out: &mut W) -> anyhow::Result<bool> {
    let Some(word) = prompt(input, out, "Enter a word to search: ")? else { return Ok(false) };
    let Some(weight) = prompt(input, out, "Enter the weight for this word (default is 1.0): ")? else { return Ok(false) };
    let weight = if weight.is_empty() {
        DEFAULT_WEIGHT
    } else {
        match weight.parse::<f64>() {
            Ok(w) if w.is_finite() => w,
            _ => {
                writeln!(out, "Invalid weight value. Using default weight 1.0.")?;
                DEFAULT_WEIGHT
            }
        }
    };
    let Some(top) = prompt(input, out, "Enter number of top documents to retrieve: ")? else { return Ok(false) };
    let Ok(top) = top.parse::<i64>() else {
        writeln!(out, "Please enter a valid number.")?;
        return Ok(true);
    };

    let results = index.find(&word, weight, crate::top_n(top));
    display::print_results(out, &format!("'{word}' (weight: {weight})"), &results)?;
    Ok(true)
}

fn search_file<R: BufRead, W: Write>(index: &Index, input: &mut R, out: &mut W) -> anyhow::Result<bool> {
    let Some(path) = prompt(input, out, "Enter the path of the word file: ")? else { return Ok(false) };
    if path.is_empty() {
        writeln!(out, "No word file selected. Returning to menu.")?;
        return Ok(true);
    }
    let Some(top) = prompt(input, out, "Enter number of top documents to retrieve: ")? else { return Ok(false) };
    let Ok(top) = top.parse::<i64>() else {
        writeln!(out, "Please enter a valid number for top N documents.")?;
        return Ok(true);
    };

    match QuerySet::load(&path) {
        Ok(query) => {
            let results = index.find_multi(&query.terms, crate::top_n(top));
            display::print_results(out, &format!("query in '{path}'"), &results)?;
        }
        Err(e) => {
            tracing::warn!(path = %path, error = %e, "error processing word file");
            writeln!(out, "Error processing word file '{path}': {e}")?;
        }
    }
    Ok(true)
}

/// Print `msg`, then read one trimmed line. `None` at end of input.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, msg: &str) -> io::Result<Option<String>> {
    write!(out, "{msg}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
