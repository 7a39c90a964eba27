use std::io::{Read, Write};

use bincode::{Decode, Encode};

use crate::errors::{LingohashError, Result};
use crate::language::Language;

/// Number of hash buckets of the standard models.
pub const DEFAULT_DIMENSION: u32 = 1 << 12;

/// Magic line at the head of a model file.
const MODEL_MAGIC: &[u8] = b"LingohashModel 0.1.0\n";

pub type WeightValue = f32;
pub type ScoreValue = f32;

/// Model data.
///
/// The weights form a `dimension` × `languages.len()` matrix stored row by row: the weights
/// of bucket `b` occupy `weights[b * languages.len()..(b + 1) * languages.len()]`, in the
/// order of `languages`.
#[derive(Clone, Debug, PartialEq, Decode, Encode)]
pub struct Model {
    pub(crate) dimension: u32,
    pub(crate) languages: Vec<Language>,
    pub(crate) weights: Vec<WeightValue>,
    pub(crate) intercepts: Vec<WeightValue>,
    pub(crate) default_language: Language,
}

impl Model {
    /// Creates a new model.
    ///
    /// # Arguments
    ///
    /// * `dimension` - The number of hash buckets.
    /// * `languages` - Languages in the column order of the weights.
    /// * `weights` - Row-major weight matrix of `dimension` rows.
    /// * `intercepts` - Bias of each language.
    /// * `default_language` - The language returned for texts without any feature.
    ///
    /// # Errors
    ///
    /// Returns an error if the shapes of the arrays disagree, if `languages` is empty or
    /// contains duplicates, if a weight is not finite, or if `default_language` is not one of
    /// `languages`.
    pub fn new(
        dimension: u32,
        languages: Vec<Language>,
        weights: Vec<WeightValue>,
        intercepts: Vec<WeightValue>,
        default_language: Language,
    ) -> Result<Self> {
        let model = Self {
            dimension,
            languages,
            weights,
            intercepts,
            default_language,
        };
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<()> {
        if self.dimension == 0 {
            return Err(LingohashError::invalid_model(
                "dimension must be at least 1",
            ));
        }
        if self.languages.is_empty() {
            return Err(LingohashError::invalid_model(
                "a model must have at least one language",
            ));
        }
        for (i, lang) in self.languages.iter().enumerate() {
            if self.languages[..i].contains(lang) {
                return Err(LingohashError::invalid_model(format!(
                    "duplicate language: {}",
                    lang
                )));
            }
        }
        let n_weights = usize::try_from(self.dimension)
            .ok()
            .and_then(|d| d.checked_mul(self.languages.len()))
            .ok_or_else(|| LingohashError::invalid_model("the weight matrix is too large"))?;
        if self.weights.len() != n_weights {
            return Err(LingohashError::shape_mismatch(
                "weights",
                n_weights,
                self.weights.len(),
            ));
        }
        if self.intercepts.len() != self.languages.len() {
            return Err(LingohashError::shape_mismatch(
                "intercepts",
                self.languages.len(),
                self.intercepts.len(),
            ));
        }
        if !self.weights.iter().chain(&self.intercepts).all(|w| w.is_finite()) {
            return Err(LingohashError::invalid_model(
                "weights must be finite values",
            ));
        }
        if !self.languages.contains(&self.default_language) {
            return Err(LingohashError::invalid_model(format!(
                "the default language {} is not in the model",
                self.default_language
            )));
        }
        Ok(())
    }

    /// Exports the model data.
    ///
    /// # Arguments
    ///
    /// * `wtr` - Byte-oriented sink object.
    ///
    /// # Errors
    ///
    /// When `wtr` generates an error, it will be returned as is.
    pub fn write<W>(&self, wtr: &mut W) -> Result<()>
    where
        W: Write,
    {
        wtr.write_all(MODEL_MAGIC)?;
        bincode::encode_into_std_write(self, wtr, bincode::config::standard())?;
        Ok(())
    }

    /// Creates a model from a reader.
    ///
    /// # Arguments
    ///
    /// * `rdr` - A data source.
    ///
    /// # Returns
    ///
    /// A model data read from `rdr`.
    ///
    /// # Errors
    ///
    /// When `rdr` generates an error, it will be returned as is. An error is also returned if
    /// the data is not a model or the model is inconsistent.
    pub fn read<R>(rdr: &mut R) -> Result<Self>
    where
        R: Read,
    {
        let mut magic = [0; MODEL_MAGIC.len()];
        rdr.read_exact(&mut magic)?;
        if magic != MODEL_MAGIC {
            return Err(LingohashError::invalid_model(
                "model must be a LingohashModel 0.1.0 model",
            ));
        }
        let model: Self = bincode::decode_from_std_read(rdr, bincode::config::standard())?;
        model.validate()?;
        Ok(model)
    }

    /// Returns the number of hash buckets.
    pub const fn dimension(&self) -> u32 {
        self.dimension
    }

    /// Returns the languages in the column order of the weights.
    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    /// Returns the row-major weight matrix.
    pub fn weights(&self) -> &[WeightValue] {
        &self.weights
    }

    /// Returns the bias of each language.
    pub fn intercepts(&self) -> &[WeightValue] {
        &self.intercepts
    }

    /// Returns the language used for texts without any feature.
    pub const fn default_language(&self) -> Language {
        self.default_language
    }

    /// Replaces the default language.
    ///
    /// # Errors
    ///
    /// Returns an error if `lang` is not in the model.
    pub fn set_default_language(&mut self, lang: Language) -> Result<()> {
        if !self.languages.contains(&lang) {
            return Err(LingohashError::invalid_argument(
                "lang",
                format!("{} is not in the model", lang),
            ));
        }
        self.default_language = lang;
        Ok(())
    }
}
