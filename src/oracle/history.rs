/*!
A bounded history of models.

Models are kept most recent first, and the oldest model is dropped when the history is full.
A history with zero capacity keeps nothing.
*/

use std::collections::VecDeque;

use crate::structures::literal::{CLiteral, Literal};

/// Recent models, each indexed by atom - 1.
#[derive(Clone, Debug, Default)]
pub struct SolutionHistory {
    capacity: usize,
    models: VecDeque<Vec<CLiteral>>,
}

impl SolutionHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        SolutionHistory {
            capacity,
            models: VecDeque::with_capacity(capacity.min(1024)),
        }
    }

    /// Records a model, dropping the oldest model if required.
    pub fn record(&mut self, model: Vec<CLiteral>) {
        if self.capacity == 0 {
            return;
        }
        if self.models.len() == self.capacity {
            self.models.pop_back();
        }
        self.models.push_front(model);
    }

    /// Models, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &[CLiteral]> {
        self.models.iter().map(|model| model.as_slice())
    }

    /// Models on which `literal` is true, most recent first.
    pub fn containing(&self, literal: CLiteral) -> impl Iterator<Item = &[CLiteral]> {
        self.iter()
            .filter(move |model| model.get(literal.atom_index()) == Some(&literal))
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn clear(&mut self) {
        self.models.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded() {
        let mut history = SolutionHistory::with_capacity(2);
        history.record(vec![1, 2]);
        history.record(vec![-1, 2]);
        history.record(vec![-1, -2]);

        assert_eq!(history.len(), 2);
        assert_eq!(history.iter().next(), Some([-1, -2].as_slice()));
        assert_eq!(history.containing(2).count(), 1);
    }

    #[test]
    fn zero_capacity() {
        let mut history = SolutionHistory::with_capacity(0);
        history.record(vec![1]);
        assert!(history.is_empty());
    }
}
