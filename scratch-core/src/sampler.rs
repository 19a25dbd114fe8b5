//! Drawing the answer set from a song corpus.

use rand::Rng;
use std::collections::BTreeSet;
use thiserror::Error;

/// Error type for sampling answers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SampleError {
    #[error("Corpus too small: {requested} titles requested but only {available} available")]
    CorpusTooSmall { requested: usize, available: usize },
}

/// The hidden titles of one game, in the order they are numbered.
///
/// Fixed for the whole session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSet {
    titles: Vec<String>,
}

impl AnswerSet {
    /// Build an answer set from titles the caller already chose.
    pub fn from_titles<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            titles: titles.into_iter().map(Into::into).collect(),
        }
    }

    /// Draw `count` distinct titles uniformly at random.
    pub fn sample(corpus: &BTreeSet<String>, count: usize) -> Result<Self, SampleError> {
        Self::sample_with_rng(corpus, count, &mut rand::thread_rng())
    }

    /// Draw with a specific RNG (useful for testing).
    pub fn sample_with_rng<R: Rng>(
        corpus: &BTreeSet<String>,
        count: usize,
        rng: &mut R,
    ) -> Result<Self, SampleError> {
        if count > corpus.len() {
            return Err(SampleError::CorpusTooSmall {
                requested: count,
                available: corpus.len(),
            });
        }

        let pool: Vec<&String> = corpus.iter().collect();
        let titles = rand::seq::index::sample(rng, pool.len(), count)
            .into_iter()
            .map(|i| pool[i].clone())
            .collect();

        Ok(Self { titles })
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Title by its 1-based number.
    pub fn get(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|i| self.titles.get(i))
            .map(String::as_str)
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.titles.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn corpus(titles: &[&str]) -> BTreeSet<String> {
        titles.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_sample_distinct_titles() {
        let corpus = corpus(&["Alpha", "Bravo", "Charlie", "Delta", "Echo"]);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let answers = AnswerSet::sample_with_rng(&corpus, 3, &mut rng).unwrap();
            assert_eq!(answers.len(), 3);
            let unique: BTreeSet<&str> = answers.iter().collect();
            assert_eq!(unique.len(), 3);
            assert!(answers.iter().all(|t| corpus.contains(t)));
        }
    }

    #[test]
    fn test_sample_whole_corpus() {
        let corpus = corpus(&["One", "Two"]);
        let answers = AnswerSet::sample(&corpus, 2).unwrap();
        let drawn: BTreeSet<String> = answers.titles().iter().cloned().collect();
        assert_eq!(drawn, corpus);
    }

    #[test]
    fn test_corpus_too_small() {
        let corpus = corpus(&["Only"]);
        let result = AnswerSet::sample(&corpus, 2);
        assert_eq!(
            result.unwrap_err(),
            SampleError::CorpusTooSmall {
                requested: 2,
                available: 1
            }
        );
    }

    #[test]
    fn test_same_seed_same_answers() {
        let corpus = corpus(&["a", "b", "c", "d", "e", "f"]);
        let first = AnswerSet::sample_with_rng(&corpus, 4, &mut StdRng::seed_from_u64(42)).unwrap();
        let second = AnswerSet::sample_with_rng(&corpus, 4, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_get_is_one_based() {
        let answers = AnswerSet::from_titles(["CAT", "DOG"]);
        assert_eq!(answers.get(1), Some("CAT"));
        assert_eq!(answers.get(2), Some("DOG"));
        assert_eq!(answers.get(0), None);
        assert_eq!(answers.get(3), None);
    }
}
