#![cfg_attr(docsrs, feature(doc_cfg))]

//! # lingohash
//!
//! lingohash identifies the language of short texts, such as single words, with a linear
//! model over hashed character features.
//!
//! ## Examples
//!
//! ```no_run
//! use std::fs::File;
//! use std::io::{prelude::*, stdin};
//!
//! use lingohash::{Classifier, Model};
//!
//! // Model files written by the tools are compressed with zstd.
//! let mut f = zstd::Decoder::new(File::open("model.zst").unwrap()).unwrap();
//! let model = Model::read(&mut f).unwrap();
//! let classifier = Classifier::new(model);
//!
//! for line in stdin().lock().lines() {
//!     let lang = classifier.classify(&line.unwrap());
//!     println!("{}", lang);
//! }
//! ```
//!
//! Features are extracted by [`Features`] and assigned to buckets by
//! [`FeatureToken::bucket()`]. Both are exposed to check bucket assignments against the
//! training process.

mod classifier;
mod decoder;
mod feature;
mod hasher;
mod language;
mod model;

pub mod errors;

pub use classifier::{Classifier, Prediction};
pub use decoder::Utf8Decoder;
pub use feature::{unicode_class, FeatureToken, Features};
pub use hasher::{murmurhash2, SEED};
pub use language::{Language, DEFAULT_LANGUAGE};
pub use model::{Model, ScoreValue, WeightValue, DEFAULT_DIMENSION};
