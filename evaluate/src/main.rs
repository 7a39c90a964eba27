use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;
use lingohash::{Classifier, Language, Model};

#[derive(Parser, Debug)]
#[command(about = "A program to evaluate the accuracy of lingohash on single words.")]
struct Args {
    /// The model file to use when classifying words
    #[arg(long)]
    model: PathBuf,

    /// A directory of word lists. Each `.txt` file contains one word per line, and the first
    /// two characters of its name are the language code.
    #[arg(default_value = "../lingua/language-testdata/single-words")]
    data_dir: PathBuf,

    /// The number of misclassified words to show
    #[arg(long, default_value = "20")]
    n_errors: usize,

    /// The number of confused language pairs to show
    #[arg(long, default_value = "10")]
    n_confusions: usize,
}

struct TestResult {
    expected: Language,
    detected: Language,
    word: String,
    filename: String,
    line_number: usize,
}

impl TestResult {
    fn is_correct(&self) -> bool {
        self.expected == self.detected
    }
}

fn trim(mut s: &[u8]) -> &[u8] {
    while let Some((&first, rest)) = s.split_first() {
        if !matches!(first, b' ' | b'\t' | b'\n' | b'\r') {
            break;
        }
        s = rest;
    }
    while let Some((&last, rest)) = s.split_last() {
        if !matches!(last, b' ' | b'\t' | b'\n' | b'\r') {
            break;
        }
        s = rest;
    }
    s
}

fn read_words(path: &Path) -> io::Result<Vec<Vec<u8>>> {
    let data = fs::read(path)?;
    Ok(data
        .split(|&b| b == b'\n')
        .map(trim)
        .filter(|w| !w.is_empty())
        .map(|w| w.to_vec())
        .collect())
}

fn collect_word_lists(dir: &Path, files: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        // Symbolic links to directories are not followed.
        let file_type = entry.file_type()?;
        let path = entry.path();
        if file_type.is_dir() {
            collect_word_lists(&path, files)?;
        } else if path.is_file() && path.extension().map_or(false, |ext| ext == "txt") {
            files.push(path);
        }
    }
    Ok(())
}

fn truncate(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    eprintln!("Loading model file...");
    let mut f = zstd::Decoder::new(File::open(&args.model)?)?;
    let model = Model::read(&mut f)?;
    let classifier = Classifier::new(model);

    println!("Testing language detection accuracy on individual words...");
    println!("Data directory: {}", args.data_dir.display());
    println!();

    let mut files = vec![];
    if let Err(e) = collect_word_lists(&args.data_dir, &mut files) {
        eprintln!("Error: {}", e);
        eprintln!("Make sure the data directory exists and contains .txt files");
        eprintln!("with filenames starting with 2-letter language codes.");
        eprintln!("Each file should contain one word per line.");
        return Err(e.into());
    }
    files.sort();

    let mut results = vec![];
    for path in files {
        let filename = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let expected = match filename.get(..2).and_then(|code| code.parse::<Language>().ok()) {
            Some(lang) if classifier.model().languages().contains(&lang) => lang,
            _ => continue,
        };
        let words = match read_words(&path) {
            Ok(words) => words,
            Err(e) => {
                eprintln!("Error processing file {}: {}", filename, e);
                continue;
            }
        };
        eprintln!("Processing {} ({} words)...", filename, words.len());
        for (i, word) in words.into_iter().enumerate() {
            let detected = classifier.classify(&word);
            results.push(TestResult {
                expected,
                detected,
                word: String::from_utf8_lossy(&word).into_owned(),
                filename: filename.clone(),
                line_number: i + 1,
            });
            if results.len() % 100 == 0 {
                eprintln!("  Processed {} words so far...", results.len());
            }
        }
    }

    let n_total = results.len();
    let n_correct = results.iter().filter(|r| r.is_correct()).count();
    let mut lang_total = BTreeMap::<&str, usize>::new();
    let mut lang_correct = BTreeMap::<&str, usize>::new();
    for r in &results {
        *lang_total.entry(r.expected.code()).or_default() += 1;
        if r.is_correct() {
            *lang_correct.entry(r.expected.code()).or_default() += 1;
        }
    }

    let rule = "=".repeat(70);
    let thin_rule = "-".repeat(70);

    println!();
    println!("{}", rule);
    println!("OVERALL RESULTS");
    println!("{}", rule);
    println!("Total word tests: {}", n_total);
    println!("Correct predictions: {}", n_correct);
    let accuracy = if n_total > 0 {
        100.0 * n_correct as f64 / n_total as f64
    } else {
        0.0
    };
    println!("Overall accuracy: {:.2}%", accuracy);
    println!();

    println!("PER-LANGUAGE ACCURACY");
    println!("{}", thin_rule);
    println!("{:>8}{:>10}{:>10}{:>12}", "Lang", "Correct", "Total", "Accuracy");
    println!("{}", thin_rule);
    for (lang, &total) in &lang_total {
        let correct = lang_correct.get(lang).copied().unwrap_or(0);
        let accuracy = 100.0 * correct as f64 / total as f64;
        println!("{:>8}{:>10}{:>10}{:>11.1}%", lang, correct, total, accuracy);
    }

    println!();
    println!("MISCLASSIFICATIONS (first {} examples):", args.n_errors);
    println!("{}", thin_rule);
    println!(
        "{:>15}{:>10}{:>10}{:>15}{:>8}",
        "Word", "Expected", "Detected", "File", "Line"
    );
    println!("{}", thin_rule);
    for r in results
        .iter()
        .filter(|r| !r.is_correct())
        .take(args.n_errors)
    {
        println!(
            "{:>15}{:>10}{:>10}{:>15}{:>8}",
            truncate(&r.word, 14),
            r.expected,
            r.detected,
            truncate(&r.filename, 14),
            r.line_number,
        );
    }

    println!();
    println!("MOST COMMON CONFUSIONS:");
    println!("{}", thin_rule);
    let mut confusions = BTreeMap::<(Language, Language), usize>::new();
    for r in results.iter().filter(|r| !r.is_correct()) {
        *confusions.entry((r.expected, r.detected)).or_default() += 1;
    }
    let mut confusions: Vec<_> = confusions.into_iter().collect();
    confusions.sort_by(|(_, a), (_, b)| b.cmp(a));
    println!("{:>12}{:>12}{:>10}", "Expected", "Detected", "Count");
    println!("{}", thin_rule);
    for ((expected, detected), count) in confusions.into_iter().take(args.n_confusions) {
        println!(
            "{:>12}{:>12}{:>10}",
            expected.code(),
            detected.code(),
            count
        );
    }

    Ok(())
}
