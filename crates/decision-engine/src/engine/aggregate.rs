use std::collections::BTreeMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::effect::{Adjustment, WeightedScore};

/// Strategy combining rule outputs into a single score.
pub trait ScoreAggregator<C> {
    type Score;

    fn aggregate(&self, contributions: &[C]) -> Self::Score;
}

/// Sum of `score x weight`, truncated toward zero and clipped to `[floor, ceiling]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedSum {
    pub floor: i32,
    pub ceiling: i32,
}

impl WeightedSum {
    pub const fn percent() -> Self {
        Self {
            floor: 0,
            ceiling: 100,
        }
    }
}

impl<K> ScoreAggregator<WeightedScore<K>> for WeightedSum {
    type Score = i32;

    fn aggregate(&self, contributions: &[WeightedScore<K>]) -> i32 {
        let total: Decimal = contributions
            .iter()
            .map(|contribution| contribution.weighted_score)
            .sum();

        total
            .trunc()
            .to_i32()
            .unwrap_or(self.ceiling)
            .clamp(self.floor, self.ceiling)
    }
}

/// `clip(baseline + sum(delta), min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaselineDelta {
    pub baseline: i32,
    pub min: i32,
    pub max: i32,
}

impl<C> ScoreAggregator<Adjustment<C>> for BaselineDelta {
    type Score = i32;

    fn aggregate(&self, contributions: &[Adjustment<C>]) -> i32 {
        contributions
            .iter()
            .fold(self.baseline, |score, adjustment| {
                score.saturating_add(adjustment.delta)
            })
            .clamp(self.min, self.max)
    }
}

/// Fixed point value per reason code; stacked additively with no upper clip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointTable<C: Ord> {
    points: BTreeMap<C, u32>,
}

impl<C: Ord> PointTable<C> {
    pub fn new(entries: impl IntoIterator<Item = (C, u32)>) -> Self {
        Self {
            points: entries.into_iter().collect(),
        }
    }

    pub fn points_for(&self, code: &C) -> u32 {
        self.points.get(code).copied().unwrap_or(0)
    }
}

impl<C: Ord> ScoreAggregator<C> for PointTable<C> {
    type Score = u32;

    fn aggregate(&self, contributions: &[C]) -> u32 {
        contributions
            .iter()
            .map(|code| self.points_for(code))
            .fold(0u32, u32::saturating_add)
    }
}
