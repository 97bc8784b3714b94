use std::io::Write;

use anyhow::Context;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum Format {
    /// Space separated on a single line
    Plain,
    /// One permutation per line
    Lines,
    /// A JSON listing with per-length counts
    Json,
}

pub(crate) fn write_words(
    format: Format,
    input: &str,
    words: Vec<String>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    write_formatted(format, input, words, out)
        .with_context(|| anyhow::anyhow!("Failed to write permutations"))
}

fn write_formatted(
    format: Format,
    input: &str,
    words: Vec<String>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match format {
        Format::Plain => {
            for word in &words {
                write!(out, "{} ", word)?;
            }
            writeln!(out)?;
        }
        Format::Lines => {
            for word in &words {
                writeln!(out, "{}", word)?;
            }
        }
        Format::Json => {
            serde_json::to_writer(&mut *out, &words_list::Words::new(input, words))?;
            writeln!(out)?;
        }
    }
    Ok(())
}
