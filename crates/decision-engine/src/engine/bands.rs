use super::EngineError;

/// Ordered threshold classifier evaluated highest band first with inclusive lower bounds.
///
/// Scores that clear no threshold (including NaN) fall through to `floor`.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdBands<S, O> {
    bands: Vec<(S, O)>,
    floor: O,
}

impl<S, O> ThresholdBands<S, O>
where
    S: PartialOrd + Copy,
    O: Copy,
{
    pub fn new(bands: Vec<(S, O)>, floor: O) -> Result<Self, EngineError> {
        let descending = bands.windows(2).all(|pair| pair[0].0 > pair[1].0);
        let comparable = bands
            .iter()
            .all(|(threshold, _)| threshold.partial_cmp(threshold).is_some());
        if !descending || !comparable {
            return Err(EngineError::UnorderedBands);
        }

        Ok(Self { bands, floor })
    }

    pub fn classify(&self, score: S) -> O {
        self.bands
            .iter()
            .find(|(threshold, _)| score >= *threshold)
            .map(|(_, outcome)| *outcome)
            .unwrap_or(self.floor)
    }

    pub fn thresholds(&self) -> impl Iterator<Item = (S, O)> + '_ {
        self.bands.iter().copied()
    }

    pub fn floor(&self) -> O {
        self.floor
    }
}
