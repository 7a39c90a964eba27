use crate::feature::Features;
use crate::language::Language;
use crate::model::{Model, ScoreValue};

/// Result of [`Classifier::classify_with_scores()`].
#[derive(Clone, Debug, PartialEq)]
pub struct Prediction {
    language: Language,
    n_features: u32,
    scores: Option<Vec<ScoreValue>>,
}

impl Prediction {
    /// Gets the predicted language.
    pub const fn language(&self) -> Language {
        self.language
    }

    /// Gets the number of features extracted from the text, saturated at [`u32::MAX`].
    pub const fn n_features(&self) -> u32 {
        self.n_features
    }

    /// Gets the final score of each language in the order of [`Model::languages()`].
    ///
    /// Returns [`None`] if no feature is extracted from the text.
    pub fn scores(&self) -> Option<&[ScoreValue]> {
        self.scores.as_deref()
    }
}

/// Language classifier.
///
/// A classifier is immutable, so it can be shared between threads to classify texts in
/// parallel.
#[derive(Clone, Debug)]
pub struct Classifier {
    model: Model,
}

/// Returns the factor applied to the summed weights of `n_features` features.
#[inline]
fn feature_scale(n_features: u32) -> ScoreValue {
    1.0 / (n_features as ScoreValue).sqrt()
}

impl Classifier {
    /// Creates a new classifier.
    ///
    /// # Arguments
    ///
    /// * `model` - A model data.
    ///
    /// # Returns
    ///
    /// A new classifier.
    pub const fn new(model: Model) -> Self {
        Self { model }
    }

    /// Returns the model of this classifier.
    pub const fn model(&self) -> &Model {
        &self.model
    }

    /// Adds the weights of all features of `text` to `ys`, and returns the number of
    /// features. The count saturates at [`u32::MAX`].
    fn add_feature_scores(&self, text: &[u8], ys: &mut [ScoreValue]) -> u32 {
        let n_langs = self.model.languages.len();
        let mut n_features: u32 = 0;
        for token in Features::from_bytes(text) {
            n_features = n_features.saturating_add(1);
            let bucket = token.bucket(self.model.dimension) as usize;
            let weights = &self.model.weights[bucket * n_langs..(bucket + 1) * n_langs];
            for (y, w) in ys.iter_mut().zip(weights) {
                *y += w;
            }
        }
        n_features
    }

    /// Computes the final scores, or returns [`None`] if `text` has no feature.
    fn scores(&self, text: &[u8]) -> (u32, Option<Vec<ScoreValue>>) {
        let mut ys = vec![ScoreValue::default(); self.model.languages.len()];
        let n_features = self.add_feature_scores(text, &mut ys);
        if n_features == 0 {
            return (0, None);
        }
        let scale = feature_scale(n_features);
        for (y, b) in ys.iter_mut().zip(&self.model.intercepts) {
            *y = *y * scale + b;
        }
        (n_features, Some(ys))
    }

    /// Returns the language of the first maximum score.
    fn argmax(&self, ys: &[ScoreValue]) -> Language {
        let mut best = 0;
        for (i, &y) in ys.iter().enumerate().skip(1) {
            if y > ys[best] {
                best = i;
            }
        }
        self.model.languages[best]
    }

    /// Identifies the language of a text.
    ///
    /// Any byte sequence is accepted. Malformed UTF-8 only reduces the number of features,
    /// and a text without any feature is classified as [`Model::default_language()`].
    ///
    /// # Arguments
    ///
    /// * `text` - A text.
    ///
    /// # Returns
    ///
    /// The language with the highest score. Ties are resolved to the language that comes
    /// first in [`Model::languages()`].
    pub fn classify<T>(&self, text: &T) -> Language
    where
        T: AsRef<[u8]> + ?Sized,
    {
        match self.scores(text.as_ref()) {
            (_, Some(ys)) => self.argmax(&ys),
            (_, None) => self.model.default_language,
        }
    }

    /// Identifies the language of a text. This function also returns scores.
    ///
    /// # Arguments
    ///
    /// * `text` - A text.
    ///
    /// # Returns
    ///
    /// A prediction with the scores of all languages.
    pub fn classify_with_scores<T>(&self, text: &T) -> Prediction
    where
        T: AsRef<[u8]> + ?Sized,
    {
        let (n_features, scores) = self.scores(text.as_ref());
        let language = scores
            .as_deref()
            .map_or(self.model.default_language, |ys| self.argmax(ys));
        Prediction {
            language,
            n_features,
            scores,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;
    use std::thread;

    use crate::feature::FeatureToken;
    use crate::model::DEFAULT_DIMENSION;
    use Language::*;

    const QU: FeatureToken = FeatureToken::AsciiNgram(0x7175);
    const TH: FeatureToken = FeatureToken::AsciiNgram(0x7468);
    const HAN: FeatureToken = FeatureToken::UnicodeClass(49);

    fn toy_classifier(
        languages: Vec<Language>,
        entries: &[(FeatureToken, Language, f32)],
        default_language: Language,
    ) -> Classifier {
        let n_langs = languages.len();
        let mut weights = vec![0.0; DEFAULT_DIMENSION as usize * n_langs];
        for &(token, lang, w) in entries {
            let bucket = token.bucket(DEFAULT_DIMENSION) as usize;
            let idx = languages.iter().position(|&l| l == lang).unwrap();
            weights[bucket * n_langs + idx] += w;
        }
        let intercepts = vec![0.0; n_langs];
        let model = Model::new(
            DEFAULT_DIMENSION,
            languages,
            weights,
            intercepts,
            default_language,
        )
        .unwrap();
        Classifier::new(model)
    }

    fn en_fr_classifier() -> Classifier {
        toy_classifier(vec![En, Fr], &[(QU, Fr, 5.0), (TH, En, 5.0)], En)
    }

    #[test]
    fn test_classify_toy_model() {
        let classifier = en_fr_classifier();
        assert_eq!(Fr, classifier.classify("quoi"));
        assert_eq!(En, classifier.classify("the"));
        assert_eq!(Fr, classifier.classify("QUOI"));
    }

    #[test]
    fn test_classify_empty() {
        let classifier = toy_classifier(vec![Fr, En], &[], En);
        assert_eq!(En, classifier.classify(""));
        assert_eq!(En, classifier.classify(b"".as_slice()));
    }

    #[test]
    fn test_classify_malformed_only() {
        let classifier = toy_classifier(vec![Fr, En], &[], En);
        let text: &[u8] = &[0xff, 0x80, 0xfe, 0xf0, 0x9f];
        assert_eq!(classifier.classify(""), classifier.classify(text));
        let prediction = classifier.classify_with_scores(text);
        assert_eq!(0, prediction.n_features());
        assert_eq!(None, prediction.scores());
    }

    #[test]
    fn test_classify_all_zero_tie() {
        let classifier = toy_classifier(vec![De, En, Fr], &[], Fr);
        assert_eq!(De, classifier.classify("hello"));
        assert_eq!(De, classifier.classify("水"));
        assert_eq!(De, classifier.classify(" "));
        assert_eq!(Fr, classifier.classify(""));
    }

    #[test]
    fn test_classify_tie_with_intercepts() {
        let model = Model::new(
            1,
            vec![Ja, Zh, De],
            vec![0.0; 3],
            vec![-1.0, 2.0, 2.0],
            Ja,
        )
        .unwrap();
        let classifier = Classifier::new(model);
        assert_eq!(Zh, classifier.classify("x"));
    }

    #[test]
    fn test_classify_deterministic() {
        let classifier = en_fr_classifier();
        for text in ["quoi", "the", "ab cd", "水", "\u{1f600}x", ""] {
            let first = classifier.classify_with_scores(text);
            for _ in 0..3 {
                assert_eq!(first, classifier.classify_with_scores(text));
            }
        }
    }

    #[test]
    fn test_classify_script() {
        let classifier = toy_classifier(
            vec![En, Fr, Zh],
            &[(QU, Fr, 5.0), (TH, En, 5.0), (HAN, Zh, 5.0)],
            En,
        );
        for word in ["the", "quoi"] {
            let latin = classifier.classify(word);
            let han: String = word
                .chars()
                .map(|c| char::from_u32(0x4e00 + u32::from(c)).unwrap())
                .collect();
            assert_ne!(latin, classifier.classify(&han));
            assert_eq!(Zh, classifier.classify(&han));
        }
    }

    #[test]
    fn test_classify_with_scores() {
        let classifier = en_fr_classifier();
        // "quoi" has 9 features, and only "qu" has a weight.
        let prediction = classifier.classify_with_scores("quoi");
        assert_eq!(Fr, prediction.language());
        assert_eq!(9, prediction.n_features());
        let scores = prediction.scores().unwrap();
        assert_eq!(0.0, scores[0]);
        assert!((scores[1] - 5.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_classify_normalization() {
        // Three features in the only bucket: 3 * 1.0 / sqrt(3).
        let model = Model::new(1, vec![En], vec![1.0], vec![0.5], En).unwrap();
        let classifier = Classifier::new(model);
        let prediction = classifier.classify_with_scores("a\u{e9}");
        assert_eq!(3, prediction.n_features());
        let expected = 3.0 * (1.0 / 3f32.sqrt()) + 0.5;
        assert_eq!(expected, prediction.scores().unwrap()[0]);
    }

    #[test]
    fn test_feature_scale() {
        assert_eq!(1.0, feature_scale(1));
        assert_eq!(0.5, feature_scale(4));
        let scale = feature_scale(u32::MAX);
        assert!(scale.is_finite() && scale > 0.0);
    }

    #[test]
    fn test_classify_multithread() {
        let classifier = Arc::new(en_fr_classifier());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let classifier = Arc::clone(&classifier);
                thread::spawn(move || {
                    let text = if i % 2 == 0 { "quoi" } else { "the" };
                    (0..100).map(|_| classifier.classify(text)).collect::<Vec<_>>()
                })
            })
            .collect();
        for (i, h) in handles.into_iter().enumerate() {
            let expected = if i % 2 == 0 { Fr } else { En };
            assert!(h.join().unwrap().into_iter().all(|l| l == expected));
        }
    }
}
