use crate::filter::{filter_by_identifier, IdentifierSet};
use crate::functions::{self, EntropyError};
use crate::split::{split_at_boundary, SplitError};
use crate::table::{Table, TableError};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use serde::Serialize;
use thiserror::Error;

/// The impurity a split's weighted child entropy is subtracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Baseline {
    /// Exactly one bit, the maximum entropy of a binary label.
    OneBit,

    /// Entropy of the labels of every feature row.
    ParentEntropy,
}

impl Default for Baseline {
    fn default() -> Self {
        Self::OneBit
    }
}

#[derive(Debug, Clone)]
pub struct GainOptions {
    label_column: usize,
    baseline: Baseline,
    parallel: bool,
}

impl GainOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Column of the label table holding the class label.
    pub fn label_column(mut self, column: usize) -> Self {
        self.label_column = column;
        self
    }

    pub fn baseline(mut self, baseline: Baseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// Evaluates candidate columns of [`GainOptions::best_split`] on the rayon pool.
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Splits `features` on `column` and scores the split against `labels`.
    ///
    /// `features` and `labels` are joined on their identifier column (column 0).
    /// Identifiers of `features` must be unique.
    pub fn evaluate(
        &self,
        features: &Table,
        labels: &Table,
        column: usize,
    ) -> Result<SplitGain, GainError> {
        if features.is_empty() {
            return Err(GainError::EmptyFeatures);
        }
        labels.check_column(self.label_column)?;

        let (left, right) = split_at_boundary(features, column)?;
        let left_labels = self.join_labels(&left, labels)?;
        let right_labels = self.join_labels(&right, labels)?;

        let left_entropy = self.label_entropy(&left_labels)?;
        let right_entropy = self.label_entropy(&right_labels)?;
        let weight = left_labels.rows_len() as f64 / features.rows_len() as f64;

        let baseline = match self.baseline {
            Baseline::OneBit => 1.0,
            Baseline::ParentEntropy => {
                let all_labels = self.join_labels(features, labels)?;
                self.label_entropy(&all_labels)?
            }
        };
        let gain = baseline - weight * left_entropy - (1.0 - weight) * right_entropy;
        log::debug!(
            "column {}: left entropy = {}, right entropy = {}, gain = {}",
            column,
            left_entropy,
            right_entropy,
            gain
        );

        Ok(SplitGain {
            column,
            boundary: left.rows_len(),
            left_rows: left_labels.rows_len(),
            right_rows: right_labels.rows_len(),
            left_entropy,
            right_entropy,
            gain,
        })
    }

    /// Returns the highest-gain split among `columns`.
    ///
    /// Columns holding a single value cannot be split and are skipped; `None`
    /// means no candidate could be split. Ties go to the lowest column index.
    pub fn best_split(
        &self,
        features: &Table,
        labels: &Table,
        columns: &[usize],
    ) -> Result<Option<SplitGain>, GainError> {
        let evaluate = |&column: &usize| {
            log::trace!("evaluating split column {}", column);
            match self.evaluate(features, labels, column) {
                Err(GainError::Split(SplitError::UniformColumn { .. })) => Ok(None),
                result => result.map(Some),
            }
        };
        let results = if self.parallel {
            columns
                .into_par_iter()
                .map(evaluate)
                .collect::<Result<Vec<_>, _>>()?
        } else {
            columns
                .iter()
                .map(evaluate)
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(results.into_iter().flatten().fold(None, |best, s| match best {
            Some(b) if b.gain > s.gain || (b.gain == s.gain && b.column < s.column) => Some(b),
            _ => Some(s),
        }))
    }

    fn join_labels(&self, features: &Table, labels: &Table) -> Result<Table, TableError> {
        let ids = features.column(0)?.into_iter().collect::<IdentifierSet>();
        Ok(filter_by_identifier(&ids, labels))
    }

    fn label_entropy(&self, labels: &Table) -> Result<f64, GainError> {
        let probabilities = functions::frequencies(labels, self.label_column)?;
        Ok(functions::entropy(&probabilities)?)
    }
}

impl Default for GainOptions {
    fn default() -> Self {
        Self {
            label_column: 1,
            baseline: Baseline::OneBit,
            parallel: false,
        }
    }
}

/// Information gain of `features` split on `column`, with default options.
pub fn information_gain(features: &Table, labels: &Table, column: usize) -> Result<f64, GainError> {
    GainOptions::default()
        .evaluate(features, labels, column)
        .map(|s| s.gain)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitGain {
    pub column: usize,

    /// Number of feature rows on the left side.
    pub boundary: usize,

    /// Label rows joined to each side.
    pub left_rows: usize,
    pub right_rows: usize,

    pub left_entropy: f64,
    pub right_entropy: f64,
    pub gain: f64,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GainError {
    #[error("feature table must have one or more rows")]
    EmptyFeatures,

    #[error("invalid split")]
    Split(#[from] SplitError),

    #[error("invalid table access")]
    Table(#[from] TableError),

    #[error("label distribution has no defined entropy")]
    Entropy(#[from] EntropyError),
}
