//! Grade average with pass/fail verdict

use serde::{Deserialize, Serialize};

/// Minimum average for a student to pass
pub const MEDIA_APROVACAO: f64 = 6.0;

/// Average of a student's grades
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    /// Mean formatted with exactly two decimals
    pub media: String,
    pub passou: bool,
}

impl Media {
    /// Compute the arithmetic mean of `notas`.
    ///
    /// Returns `None` for an empty slice. Halves round away from zero
    /// (4.125 becomes "4.13").
    pub fn from_notas(notas: &[f64]) -> Option<Self> {
        if notas.is_empty() {
            return None;
        }

        let media = notas.iter().sum::<f64>() / notas.len() as f64;
        let rounded = (media * 100.0).round() / 100.0;

        Some(Self {
            media: format!("{:.2}", rounded),
            passou: media >= MEDIA_APROVACAO,
        })
    }
}
