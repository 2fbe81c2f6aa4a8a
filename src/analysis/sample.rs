//! Intensity sample type.

use super::AnalysisError;
use std::sync::Arc;

/// Largest representable intensity level.
pub const MAX_INTENSITY: u8 = u8::MAX;

/// An ordered, immutable sequence of 8-bit intensity values.
///
/// Cloning is cheap: the values are shared, so a clone is a snapshot
/// that later work cannot observe changing.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Sample {
    values: Arc<[u8]>,
}

impl Sample {
    /// Creates a sample from already-quantized intensities.
    pub fn new(values: Vec<u8>) -> Self {
        Self {
            values: values.into(),
        }
    }

    /// Creates a sample from wider integers, rejecting anything outside 0-255.
    ///
    /// Accepts any primitive integer type. Values are never clipped; the
    /// first offending value is reported. A `u128` beyond `i128::MAX` is
    /// reported as `i128::MAX`.
    pub fn from_raw<T>(values: &[T]) -> Result<Self, AnalysisError>
    where
        T: Copy + TryInto<u8> + TryInto<i128>,
    {
        let mut out = Vec::with_capacity(values.len());
        for (index, &raw) in values.iter().enumerate() {
            match TryInto::<u8>::try_into(raw) {
                Ok(level) => out.push(level),
                Err(_) => {
                    let value = TryInto::<i128>::try_into(raw).unwrap_or(i128::MAX);
                    return Err(AnalysisError::OutOfRangeValue { index, value });
                }
            }
        }
        Ok(Self::new(out))
    }

    /// Returns the intensities in their original order.
    #[inline]
    pub fn values(&self) -> &[u8] {
        &self.values
    }

    /// Returns the number of values.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the sample holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns a sorted copy of the values.
    pub fn sorted(&self) -> Vec<u8> {
        let mut sorted = self.values.to_vec();
        sorted.sort_unstable();
        sorted
    }

    /// BLAKE3 digest of the values, hex encoded.
    pub fn digest(&self) -> String {
        blake3::hash(&self.values).to_hex().to_string()
    }
}

impl From<Vec<u8>> for Sample {
    fn from(values: Vec<u8>) -> Self {
        Self::new(values)
    }
}

impl From<&[u8]> for Sample {
    fn from(values: &[u8]) -> Self {
        Self {
            values: values.into(),
        }
    }
}

impl FromIterator<u8> for Sample {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl std::fmt::Debug for Sample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sample")
            .field("len", &self.values.len())
            .finish_non_exhaustive()
    }
}
