use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use lingohash::{Language, Model, WeightValue, DEFAULT_DIMENSION, DEFAULT_LANGUAGE};
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(
    about = "A program to manipulate trained models.",
    group = ArgGroup::new("input").required(true),
)]
struct Args {
    /// Input path of the model file
    #[arg(long, group = "input")]
    model_in: Option<PathBuf>,

    /// Input path of a CSV file of weights (columns: bucket, language, weight).
    /// Rows with an empty bucket are intercepts.
    #[arg(long, group = "input", requires = "languages")]
    csv_in: Option<PathBuf>,

    /// Comma-separated language codes in the column order of the model (used with --csv-in)
    #[arg(long, value_delimiter = ',')]
    languages: Vec<String>,

    /// The number of hash buckets (used with --csv-in)
    #[arg(long, default_value_t = DEFAULT_DIMENSION)]
    dimension: u32,

    /// The language returned for texts without any feature
    #[arg(long)]
    default_language: Option<String>,

    /// Output path of the model file
    #[arg(long)]
    model_out: Option<PathBuf>,

    /// Output the weights of the model as a CSV file.
    #[arg(long)]
    dump_csv: Option<PathBuf>,

    /// The compression level of the model file
    #[arg(long, default_value = "19")]
    zstd_level: i32,
}

#[derive(Deserialize, Serialize)]
struct WeightRecord {
    bucket: Option<u32>,
    language: String,
    weight: WeightValue,
}

fn read_csv<R>(
    rdr: R,
    languages: Vec<Language>,
    dimension: u32,
    default_language: Language,
) -> Result<Model, Box<dyn std::error::Error>>
where
    R: Read,
{
    let n_langs = languages.len();
    let n_weights = usize::try_from(dimension)?
        .checked_mul(n_langs)
        .ok_or("the weight matrix is too large")?;
    let mut weights = vec![0.0; n_weights];
    let mut intercepts = vec![0.0; n_langs];
    let mut rdr = csv::Reader::from_reader(rdr);
    for result in rdr.deserialize() {
        let record: WeightRecord = result?;
        let lang = record.language.parse::<Language>()?;
        let idx = languages
            .iter()
            .position(|&l| l == lang)
            .ok_or_else(|| format!("{} is not in --languages", lang))?;
        match record.bucket {
            Some(bucket) if bucket < dimension => {
                weights[bucket as usize * n_langs + idx] = record.weight;
            }
            Some(bucket) => {
                return Err(format!("bucket {} is out of range 0..{}", bucket, dimension).into());
            }
            None => intercepts[idx] = record.weight,
        }
    }
    Ok(Model::new(
        dimension,
        languages,
        weights,
        intercepts,
        default_language,
    )?)
}

fn write_csv<W>(wtr: W, model: &Model) -> Result<(), Box<dyn std::error::Error>>
where
    W: Write,
{
    let mut wtr = csv::Writer::from_writer(wtr);
    for (&language, &weight) in model.languages().iter().zip(model.intercepts()) {
        wtr.serialize(WeightRecord {
            bucket: None,
            language: language.code().to_string(),
            weight,
        })?;
    }
    let n_langs = model.languages().len();
    for (bucket, row) in (0..).zip(model.weights().chunks(n_langs)) {
        for (&language, &weight) in model.languages().iter().zip(row) {
            if weight != 0.0 {
                wtr.serialize(WeightRecord {
                    bucket: Some(bucket),
                    language: language.code().to_string(),
                    weight,
                })?;
            }
        }
    }
    wtr.flush()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_language = args
        .default_language
        .as_deref()
        .map(str::parse::<Language>)
        .transpose()?;

    let mut model = if let Some(path) = args.model_in {
        eprintln!("Loading model file...");
        let mut f = zstd::Decoder::new(fs::File::open(path)?)?;
        Model::read(&mut f)?
    } else if let Some(path) = args.csv_in {
        eprintln!("Loading weight file...");
        let languages = args
            .languages
            .iter()
            .map(|code| code.parse::<Language>())
            .collect::<Result<Vec<_>, _>>()?;
        read_csv(
            fs::File::open(path)?,
            languages,
            args.dimension,
            default_language.unwrap_or(DEFAULT_LANGUAGE),
        )?
    } else {
        unreachable!();
    };

    if let Some(lang) = default_language {
        model.set_default_language(lang)?;
    }

    if let Some(path) = args.dump_csv {
        eprintln!("Saving weight file...");
        write_csv(fs::File::create(path)?, &model)?;
    }

    if let Some(path) = args.model_out {
        eprintln!("Saving model file...");
        let mut f = zstd::Encoder::new(fs::File::create(path)?, args.zstd_level)?;
        model.write(&mut f)?;
        f.finish()?;
    }

    Ok(())
}
