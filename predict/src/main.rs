use std::fs::File;
use std::io::{prelude::*, stdin, stdout, BufWriter};
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use lingohash::{Classifier, Model};

#[derive(Parser, Debug)]
#[command(about = "A program to identify the language of each line.")]
struct Args {
    /// The model file to use when classifying text
    #[arg(long)]
    model: PathBuf,

    /// Print the score of each language after the line
    #[arg(long)]
    scores: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    eprintln!("Loading model file...");
    let mut f = zstd::Decoder::new(File::open(args.model)?)?;
    let model = Model::read(&mut f)?;
    let classifier = Classifier::new(model);

    eprintln!("Start classification");
    let mut n_lines = 0;
    let start = Instant::now();
    let mut out = BufWriter::new(stdout().lock());
    for line in stdin().lock().split(b'\n') {
        let mut line = line?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        n_lines += 1;
        if args.scores {
            let prediction = classifier.classify_with_scores(&line);
            write!(out, "{}\t", prediction.language())?;
            out.write_all(&line)?;
            if let Some(scores) = prediction.scores() {
                for (lang, score) in classifier.model().languages().iter().zip(scores) {
                    write!(out, "\t{}:{}", lang, score)?;
                }
            }
            writeln!(out)?;
        } else {
            write!(out, "{}\t", classifier.classify(&line))?;
            out.write_all(&line)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    let duration = start.elapsed();
    eprintln!("Elapsed: {} [sec]", duration.as_secs_f64());
    eprintln!(
        "Speed: {} [lines/sec]",
        n_lines as f64 / duration.as_secs_f64()
    );

    Ok(())
}
