//! Deduplication and ranking of detector output.

use serde::Serialize;

use crate::signal::Signal;

/// Upper bound on signals that reach the renderers.
pub const MAX_RANKED_SIGNALS: usize = 4;

/// At most one signal per kind, sorted by descending score, at most
/// [`MAX_RANKED_SIGNALS`] long. Ties keep detector pipeline order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RankedSignals(Vec<Signal>);

impl RankedSignals {
    pub fn as_slice(&self) -> &[Signal] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Signal> {
        self.0.iter()
    }

    pub fn primary(&self) -> Option<&Signal> {
        self.0.first()
    }
}

impl<'a> IntoIterator for &'a RankedSignals {
    type Item = &'a Signal;
    type IntoIter = std::slice::Iter<'a, Signal>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Keep the highest-scoring signal per kind, sort by score, cap the length.
///
/// Reduction runs over the input in order, so the earlier detector wins when
/// two signals of the same kind tie on score.
pub fn rank_signals(raw: Vec<Signal>) -> RankedSignals {
    let mut best: Vec<Signal> = Vec::new();

    for signal in raw {
        match best.iter_mut().find(|kept| kept.kind == signal.kind) {
            Some(kept) if signal.score > kept.score => *kept = signal,
            Some(_) => {}
            None => best.push(signal),
        }
    }

    // `sort_by` is stable: equal scores keep first-seen order.
    best.sort_by(|a, b| b.score.cmp(&a.score));
    best.truncate(MAX_RANKED_SIGNALS);

    RankedSignals(best)
}
