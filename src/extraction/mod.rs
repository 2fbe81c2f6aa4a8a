//! Intensity sample extraction.
//!
//! This module turns decoded images (or synthetic generators) into the
//! flat 8-bit intensity samples the analysis engine consumes. It sits
//! outside the engine: nothing in [`crate::analysis`] depends on it.

mod luma;
mod source;

pub use luma::{luma_601, luma_from_image};
pub use source::{ImageFileSource, SampleSource, SourceError, SyntheticSource};

use crate::analysis::Sample;

/// Acquires one sample from each of two sources.
///
/// Both samples are taken before anything is compared, so a comparison
/// always sees a consistent pair.
pub fn acquire_pair<A, B>(first: &mut A, second: &mut B) -> Result<(Sample, Sample), SourceError>
where
    A: SampleSource + ?Sized,
    B: SampleSource + ?Sized,
{
    let a = first.acquire()?;
    let b = second.acquire()?;

    tracing::debug!(
        first = %first.describe(),
        first_len = a.len(),
        second = %second.describe(),
        second_len = b.len(),
        "Acquired sample pair"
    );

    Ok((a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_pair_from_synthetic() {
        let mut first = SyntheticSource::new(1, 64);
        let mut second = SyntheticSource::new(2, 32);

        let (a, b) = acquire_pair(&mut first, &mut second).unwrap();
        assert_eq!(a.len(), 64);
        assert_eq!(b.len(), 32);
    }

    #[test]
    fn test_acquire_pair_propagates_failure() {
        let mut first = SyntheticSource::new(1, 64);
        let mut second = SyntheticSource::new(2, 0);

        assert!(acquire_pair(&mut first, &mut second).is_err());
        // The first source was still consumed.
        assert_eq!(first.drawn(), 1);
    }
}
