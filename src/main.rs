use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use words::{Casing, Dictionary, Enumeration, Tokenization};

mod output;

const LARGE_ENUMERATION: u128 = 1_000_000;

fn main() -> anyhow::Result<()> {
    match dotenvy::dotenv() {
        Err(e) if !e.not_found() => eprintln!("Failed to load dotenv file: {}", e),
        _ => {}
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();

    let mut stdout = BufWriter::new(std::io::stdout().lock());
    run(&opts, std::io::stdin().lock(), &mut stdout)?;
    stdout
        .flush()
        .with_context(|| anyhow::anyhow!("Failed to flush stdout"))
}

/// Print every distinct permutation of every subset of a word's characters,
/// capitalized and ordered by length.
#[derive(Debug, Parser)]
struct Opts {
    /// Word to permute. When omitted, a single line is read from stdin.
    word: Option<String>,

    /// Drop whitespace instead of permuting it like any other character.
    #[arg(long)]
    skip_whitespace: bool,

    /// Casing applied to each produced string.
    #[arg(long, value_enum, default_value_t = CasingArg::Title)]
    casing: CasingArg,

    /// Shortest subset of characters to arrange.
    #[arg(long, default_value_t = 0)]
    min_len: usize,

    /// Longest subset of characters to arrange. Defaults to the whole word.
    #[arg(long)]
    max_len: Option<usize>,

    /// Only arrange subsets of exactly these sizes, e.g. `--lengths 1,5,4`.
    #[arg(long, value_delimiter = ',')]
    lengths: Vec<usize>,

    /// Newline-delimited word list. Only permutations found in it are printed,
    /// compared case-insensitively, and the word must be alphabetic.
    #[arg(short, long)]
    dictionary: Option<PathBuf>,

    /// How the permutations are written to stdout.
    #[arg(short, long, value_enum, default_value_t = output::Format::Plain)]
    format: output::Format,

    /// Refuse to run when more arrangements than this would be generated.
    #[arg(long)]
    limit: Option<u64>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CasingArg {
    Title,
    Lower,
    Upper,
    Preserve,
}

impl From<CasingArg> for Casing {
    fn from(arg: CasingArg) -> Self {
        match arg {
            CasingArg::Title => Casing::Title,
            CasingArg::Lower => Casing::Lower,
            CasingArg::Upper => Casing::Upper,
            CasingArg::Preserve => Casing::Preserve,
        }
    }
}

impl Opts {
    fn tokenization(&self) -> Tokenization {
        if self.skip_whitespace {
            Tokenization::SkipWhitespace
        } else {
            Tokenization::Verbatim
        }
    }

    fn options(&self) -> words::Options {
        words::Options {
            casing: self.casing.into(),
            min_len: self.min_len,
            max_len: self.max_len,
            lengths: (!self.lengths.is_empty()).then(|| self.lengths.iter().copied().collect()),
        }
    }
}

fn run(opts: &Opts, input: impl BufRead, out: &mut impl Write) -> anyhow::Result<()> {
    if let Some(max_len) = opts.max_len {
        anyhow::ensure!(
            opts.min_len <= max_len,
            "--min-len ({}) must not exceed --max-len ({})",
            opts.min_len,
            max_len
        );
    }

    let word = match &opts.word {
        Some(word) => word.clone(),
        None => read_word(input)?,
    };

    let tokens = words::tokenize(&word, opts.tokenization());
    let dictionary = match &opts.dictionary {
        Some(path) => {
            anyhow::ensure!(
                !tokens.is_empty() && tokens.iter().all(|c| c.is_alphabetic()),
                "Input can only be alphabetic when checking against a dictionary, got {:?}",
                word
            );
            Some(load_dictionary(path)?)
        }
        None => None,
    };

    let options = opts.options();
    let sizes = options.sizes(tokens.len());

    // Counts positional arrangements, an upper bound on distinct ones.
    let arrangements = words::total_arrangements(tokens.len(), sizes.iter().copied());
    if let Some(limit) = opts.limit {
        if !arrangements.is_some_and(|total| total <= u128::from(limit)) {
            anyhow::bail!(
                "Permuting {} characters exceeds the limit of {} arrangements; narrow --max-len or raise --limit",
                tokens.len(),
                limit
            );
        }
    }

    tracing::debug!(
        tokens = tokens.len(),
        ?sizes,
        ?arrangements,
        "enumerating permutations"
    );
    if arrangements.is_none_or(|total| total > LARGE_ENUMERATION) {
        tracing::warn!(?arrangements, "large enumeration, this may take a while");
    }

    let mut enumeration = Enumeration::new(&tokens, &options);
    tracing::debug!(distinct = enumeration.len(), "enumeration complete");

    if let Some(dictionary) = &dictionary {
        enumeration.retain_words(dictionary);
        tracing::debug!(words = enumeration.len(), "dictionary filter applied");
    }
    if enumeration.is_empty() {
        tracing::warn!(word = %word, ?sizes, "no permutations to print");
    }

    output::write_words(opts.format, &word, enumeration.into_sorted(), out)
}

fn load_dictionary(path: &Path) -> anyhow::Result<Dictionary> {
    let file = std::fs::File::open(path)
        .with_context(|| anyhow::anyhow!("Failed to open dictionary {}", path.display()))?;
    let dictionary = Dictionary::from_reader(std::io::BufReader::new(file))
        .with_context(|| anyhow::anyhow!("Failed to read dictionary {}", path.display()))?;
    tracing::debug!(words = dictionary.len(), path = %path.display(), "dictionary loaded");
    Ok(dictionary)
}

/// Read one line, without its line terminator.
fn read_word(mut input: impl BufRead) -> anyhow::Result<String> {
    let mut line = String::new();
    let count = input
        .read_line(&mut line)
        .with_context(|| anyhow::anyhow!("Failed to read a word from stdin"))?;
    if count == 0 {
        anyhow::bail!("No input line on stdin");
    }

    let word = line.strip_suffix('\n').unwrap_or(&line);
    let word = word.strip_suffix('\r').unwrap_or(word);
    Ok(word.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_with(args: &[&str], stdin: &str) -> anyhow::Result<String> {
        let opts = Opts::try_parse_from(std::iter::once("word-subsets").chain(args.iter().copied()))?;
        let mut out = Vec::new();
        run(&opts, stdin.as_bytes(), &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn reads_one_line_from_stdin() {
        assert_eq!(run_with(&[], "ab\nignored\n").unwrap(), " A B Ab Ba \n");
    }

    #[test]
    fn strips_windows_line_endings() {
        assert_eq!(run_with(&[], "a\r\n").unwrap(), " A \n");
    }

    #[test]
    fn empty_line_prints_the_empty_string() {
        assert_eq!(run_with(&[], "\n").unwrap(), " \n");
    }

    #[test]
    fn line_without_terminator_is_accepted() {
        assert_eq!(run_with(&[], "a").unwrap(), " A \n");
    }

    #[test]
    fn exhausted_stdin_is_an_error() {
        let err = run_with(&[], "").unwrap_err();
        assert!(err.to_string().contains("No input line"));
    }

    #[test]
    fn positional_word_skips_stdin() {
        assert_eq!(run_with(&["ba", "--format", "lines"], "").unwrap(), "\nA\nB\nAb\nBa\n");
    }

    #[test]
    fn digits_from_the_usage_example() {
        let out = run_with(&["123"], "").unwrap();
        let words: Vec<&str> = out.split(' ').collect();
        // 16 entries plus the newline after the trailing space
        assert_eq!(words.len(), 17);
        assert_eq!(words.last(), Some(&"\n"));
    }

    #[test]
    fn whitespace_can_be_skipped() {
        let kept = run_with(&["--format", "lines"], "a b\n").unwrap();
        assert!(kept.lines().any(|l| l == "A b"));

        let skipped = run_with(&["--skip-whitespace", "--format", "lines"], "a b\n").unwrap();
        assert_eq!(skipped, "\nA\nB\nAb\nBa\n");
    }

    #[test]
    fn casing_and_length_bounds() {
        let out = run_with(
            &["--casing", "upper", "--min-len", "2", "--format", "lines"],
            "ab\n",
        )
        .unwrap();
        assert_eq!(out, "AB\nBA\n");
    }

    #[test]
    fn inverted_length_bounds_are_rejected() {
        assert!(run_with(&["--min-len", "3", "--max-len", "1"], "abc\n").is_err());
    }

    #[test]
    fn limit_guards_against_factorial_blowup() {
        let err = run_with(&["--limit", "15"], "123\n").unwrap_err();
        assert!(err.to_string().contains("exceeds the limit"));
        assert!(run_with(&["--limit", "16"], "123\n").is_ok());
    }

    #[test]
    fn eleven_characters_are_not_rejected_by_default() {
        let out = run_with(&["--format", "lines"], "aaaaaaaaaaa\n").unwrap();
        assert_eq!(out.lines().count(), 12);
        assert_eq!(out.lines().last(), Some("Aaaaaaaaaaa"));
    }

    #[test]
    fn min_len_past_the_word_prints_nothing() {
        assert_eq!(run_with(&["--min-len", "5"], "ab\n").unwrap(), "\n");
        let options = words::Options {
            min_len: 5,
            ..Default::default()
        };
        assert!(Enumeration::new(&['a', 'b'], &options).is_empty());
    }

    #[test]
    fn explicit_lengths() {
        let out = run_with(&["--lengths", "1,3", "--format", "lines"], "abc\n").unwrap();
        let lengths: Vec<usize> = out.lines().map(str::len).collect();
        assert_eq!(lengths, vec![1, 1, 1, 3, 3, 3, 3, 3, 3]);

        let out = run_with(
            &["--lengths", "2", "--lengths", "1", "--format", "lines"],
            "ab\n",
        )
        .unwrap();
        assert_eq!(out, "A\nB\nAb\nBa\n");
    }

    fn dictionary_file(words: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(words.as_bytes()).unwrap();
        file
    }

    #[test]
    fn dictionary_keeps_only_listed_words() {
        let file = dictionary_file("man\nmen\nmens\nsnam\n");
        let path = file.path().to_str().unwrap();

        let out = run_with(&["--dictionary", path, "--format", "lines"], "mens\n").unwrap();
        assert_eq!(out, "Men\nMens\n");

        let out = run_with(&["--dictionary", path, "--lengths", "3"], "nam\n").unwrap();
        assert_eq!(out, "Man \n");
    }

    #[test]
    fn dictionary_mode_rejects_non_alphabetic_words() {
        let file = dictionary_file("aliens\n");
        let path = file.path().to_str().unwrap();
        let err = run_with(&["--dictionary", path], "a_liens\n").unwrap_err();
        assert!(err.to_string().contains("alphabetic"));
    }

    #[test]
    fn missing_dictionary_is_an_error() {
        let err = run_with(&["--dictionary", "/nonexistent/words.txt"], "man\n").unwrap_err();
        assert!(err.to_string().contains("Failed to open dictionary"));
    }

    #[test]
    fn json_output() {
        let out = run_with(&["--format", "json"], "ab\n").unwrap();
        let listing: words_list::Words = serde_json::from_str(out.trim_end()).unwrap();
        assert_eq!(listing.input, "ab");
        assert_eq!(listing.words, vec!["", "A", "B", "Ab", "Ba"]);
    }
}
