mod render;
mod walkthrough;

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{ArgGroup, Parser, ValueEnum};
use gst_tree::{Builder, Text};

const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";
const DEFAULT_TERMINATORS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Preset {
    /// One highly periodic word
    Abac,
    /// Two overlapping words
    Abab,
}

impl Preset {
    fn words(self) -> Vec<String> {
        match self {
            Preset::Abac => vec!["abacababacabacaba".to_string()],
            Preset::Abab => vec!["abaabaab".to_string(), "abbaabbab".to_string()],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Output {
    /// Indented tree with edge labels and suffix links
    Tree,
    /// Suffix array
    Sa,
    /// Suffixes in suffix-array order
    Sfx,
    /// LCP array
    Lcp,
}

#[derive(Debug, Parser)]
#[command(
    name = "gst",
    about = "Build generalized suffix trees and derive suffix/LCP arrays",
    group = ArgGroup::new("input").required(true).args(["preset", "stdin", "file", "words"])
)]
struct Cli {
    /// Symbols input words may use
    #[arg(short, long, default_value = DEFAULT_ALPHABET)]
    alphabet: String,

    /// Terminator symbols, or a count of default terminators to take
    #[arg(short, long, default_value = DEFAULT_TERMINATORS)]
    terminators: String,

    /// Build one of the bundled preset inputs
    #[arg(short, long, value_enum)]
    preset: Option<Preset>,

    /// Read whitespace-separated words from stdin
    #[arg(short = 'i', long)]
    stdin: bool,

    /// Read whitespace-separated words from a file
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Words given directly on the command line
    #[arg(short = 'w', long = "word", num_args = 1..)]
    words: Vec<String>,

    /// What to print for the finished tree
    #[arg(short, long, value_enum, default_value = "tree", conflicts_with = "walkthrough")]
    output: Output,

    /// Narrate the construction phase by phase
    #[arg(long)]
    walkthrough: bool,

    /// Also print the word table and the concatenated text
    #[arg(short, long)]
    display: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let words = gather_words(&cli)?;
    check_alphabet(&words, &cli.alphabet)?;
    let terminators = resolve_terminators(&cli.terminators)?;
    log::debug!(
        "building over {} words with {} terminators",
        words.len(),
        terminators.len()
    );

    let text = Text::compose(&words, &terminators)?;
    if cli.display {
        render::word_table(&text);
    }
    if cli.walkthrough {
        return walkthrough::run(text);
    }

    let tree = Builder::new(text).finish()?;
    log::debug!("{} nodes over {} symbols", tree.node_count(), tree.len());
    match cli.output {
        Output::Tree => render::tree(&tree),
        Output::Sa => println!("{}", join(tree.suffix_array())),
        Output::Sfx => {
            for suffix in tree.string_suffixes() {
                println!("{suffix}");
            }
        }
        Output::Lcp => println!("{}", join(tree.lcp_array())),
    }
    Ok(())
}

fn gather_words(cli: &Cli) -> Result<Vec<String>> {
    if let Some(preset) = cli.preset {
        return Ok(preset.words());
    }
    if cli.stdin {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("reading words from stdin")?;
        return Ok(split_words(&input));
    }
    if let Some(path) = &cli.file {
        let input = std::fs::read_to_string(path)
            .with_context(|| format!("reading words from {}", path.display()))?;
        return Ok(split_words(&input));
    }
    Ok(cli.words.clone())
}

fn split_words(input: &str) -> Vec<String> {
    input.split_whitespace().map(str::to_string).collect()
}

/// Boundary validation: every word symbol must come from the alphabet.
/// The core separately rejects words that touch the terminator set.
fn check_alphabet(words: &[String], alphabet: &str) -> Result<()> {
    for (index, word) in words.iter().enumerate() {
        if let Some(symbol) = word.chars().find(|&c| !alphabet.contains(c)) {
            bail!("word {index} contains {symbol:?}, which is outside the alphabet {alphabet:?}");
        }
    }
    Ok(())
}

/// `-t` takes either the terminator symbols themselves or a count of the
/// default terminator run.
fn resolve_terminators(arg: &str) -> Result<String> {
    if !arg.is_empty() && arg.bytes().all(|b| b.is_ascii_digit()) {
        let count: usize = arg.parse().context("terminator count")?;
        if count == 0 || count > DEFAULT_TERMINATORS.len() {
            bail!(
                "terminator count must be between 1 and {}",
                DEFAULT_TERMINATORS.len()
            );
        }
        return Ok(DEFAULT_TERMINATORS[..count].to_string());
    }
    Ok(arg.to_string())
}

pub(crate) fn join(values: &[usize]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_words() {
        assert_eq!(split_words("ab  cd\nef\t"), vec!["ab", "cd", "ef"]);
        assert!(split_words("  \n ").is_empty());
    }

    #[test]
    fn test_resolve_terminators_count() {
        assert_eq!(resolve_terminators("3").unwrap(), "ABC");
        assert_eq!(resolve_terminators("26").unwrap(), DEFAULT_TERMINATORS);
        assert!(resolve_terminators("0").is_err());
        assert!(resolve_terminators("27").is_err());
    }

    #[test]
    fn test_resolve_terminators_symbols() {
        assert_eq!(resolve_terminators("XYZ").unwrap(), "XYZ");
        assert_eq!(resolve_terminators("A1").unwrap(), "A1");
    }

    #[test]
    fn test_check_alphabet() {
        let words = vec!["abc".to_string(), "cba".to_string()];
        assert!(check_alphabet(&words, DEFAULT_ALPHABET).is_ok());
        let words = vec!["abQc".to_string()];
        assert!(check_alphabet(&words, DEFAULT_ALPHABET).is_err());
    }

    #[test]
    fn test_preset_words() {
        assert_eq!(Preset::Abac.words(), vec!["abacababacabacaba"]);
        assert_eq!(Preset::Abab.words().len(), 2);
    }

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
