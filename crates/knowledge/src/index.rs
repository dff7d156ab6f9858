//! In-memory TF-IDF similarity index.
//!
//! Built once from the corpus texts and read-only afterwards. Row `i` of the
//! term matrix belongs to document `i` of the corpus.
//!
//! Weighting follows the usual vectorizer defaults:
//! - tokens are lowercased runs of two or more word characters
//! - English stop words are dropped
//! - `idf(t) = ln((1 + n) / (1 + df(t))) + 1`
//! - document vectors are raw term counts times idf, L2 normalized

use crate::stopwords::is_stop_word;
use lazy_static::lazy_static;
use regex::Regex;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};

lazy_static! {
    /// Two or more word characters between word boundaries
    static ref TOKEN_PATTERN: Regex = Regex::new(r"\b\w\w+\b").unwrap();
}

/// Split text into index terms.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|token| !is_stop_word(token))
        .map(str::to_string)
        .collect()
}

/// Sparse, L2-normalized term-weight vector. Entries are sorted by term id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    fn from_counts(counts: BTreeMap<usize, usize>, idf: &[f64]) -> Self {
        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(term, count)| (term, count as f64 * idf[term]))
            .collect();

        let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut entries {
                *w /= norm;
            }
        }

        Self { entries }
    }

    /// True when no known term occurred.
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cosine similarity. Both vectors are normalized, so this is the dot product.
    pub fn cosine(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut dot = 0.0;

        while i < self.entries.len() && j < other.entries.len() {
            let (a_term, a_weight) = self.entries[i];
            let (b_term, b_weight) = other.entries[j];
            match a_term.cmp(&b_term) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    dot += a_weight * b_weight;
                    i += 1;
                    j += 1;
                }
            }
        }

        dot
    }
}

/// A ranked document position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredHit {
    /// Position in the corpus
    pub index: usize,
    /// Cosine similarity to the query
    pub score: f64,
}

/// Fitted vocabulary, idf weights and one vector per document.
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    vectors: Vec<SparseVector>,
}

impl SimilarityIndex {
    /// Fit the index over the corpus texts.
    ///
    /// Returns `None` when there is nothing to index: no texts, or no
    /// token survives stop-word removal.
    pub fn fit<S: AsRef<str>>(texts: &[S]) -> Option<Self> {
        if texts.is_empty() {
            return None;
        }

        let tokenized: Vec<Vec<String>> = texts.iter().map(|t| tokenize(t.as_ref())).collect();

        // Sorted vocabulary keeps term ids stable across runs
        let terms: BTreeSet<&str> = tokenized
            .iter()
            .flat_map(|tokens| tokens.iter().map(String::as_str))
            .collect();
        if terms.is_empty() {
            tracing::warn!("Corpus has no indexable terms");
            return None;
        }

        let vocabulary: HashMap<String, usize> = terms
            .into_iter()
            .enumerate()
            .map(|(id, term)| (term.to_string(), id))
            .collect();

        let counts: Vec<BTreeMap<usize, usize>> = tokenized
            .iter()
            .map(|tokens| count_terms(&vocabulary, tokens))
            .collect();

        let mut df = vec![0usize; vocabulary.len()];
        for doc in &counts {
            for term in doc.keys() {
                df[*term] += 1;
            }
        }

        let n = texts.len() as f64;
        let idf: Vec<f64> = df
            .iter()
            .map(|&d| ((1.0 + n) / (1.0 + d as f64)).ln() + 1.0)
            .collect();

        let vectors = counts
            .into_iter()
            .map(|c| SparseVector::from_counts(c, &idf))
            .collect();

        tracing::info!(
            documents = texts.len(),
            vocabulary = vocabulary.len(),
            "Built similarity index"
        );

        Some(Self {
            vocabulary,
            idf,
            vectors,
        })
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Project text into the fitted term space. Unknown terms are ignored.
    pub fn transform(&self, text: &str) -> SparseVector {
        let tokens = tokenize(text);
        SparseVector::from_counts(count_terms(&self.vocabulary, &tokens), &self.idf)
    }

    /// Similarity of the query to every document, in corpus order.
    pub fn similarities(&self, query: &SparseVector) -> Vec<f64> {
        self.vectors.iter().map(|doc| doc.cosine(query)).collect()
    }

    /// The `k` most similar documents.
    ///
    /// Ordered by score descending; equal scores keep corpus order.
    pub fn top_k(&self, query: &str, k: usize) -> Vec<ScoredHit> {
        let vector = self.transform(query);
        if vector.is_zero() {
            tracing::debug!("Query has no known terms; all scores are zero");
        }

        let mut hits: Vec<ScoredHit> = self
            .similarities(&vector)
            .into_iter()
            .enumerate()
            .map(|(index, score)| ScoredHit { index, score })
            .collect();

        // Stable sort: ties stay in ascending corpus index
        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        hits.truncate(k);
        hits
    }
}

fn count_terms(vocabulary: &HashMap<String, usize>, tokens: &[String]) -> BTreeMap<usize, usize> {
    let mut counts = BTreeMap::new();
    for token in tokens {
        if let Some(&term) = vocabulary.get(token) {
            *counts.entry(term).or_insert(0) += 1;
        }
    }
    counts
}
