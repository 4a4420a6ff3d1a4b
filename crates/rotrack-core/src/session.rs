//! In-memory criteria selection state for one evaluation sitting.
//!
//! The session owns the mutable snapshot; every label it reports is
//! recomputed from that snapshot by the classifier.

use crate::classifier::{classify, Classification};
use crate::error::EngineError;
use crate::model::{Criterion, PerformanceLevel};

/// The criteria an evaluator is ticking through.
#[derive(Debug, Clone, Default)]
pub struct EvaluationSession {
    criteria: Vec<Criterion>,
}

impl EvaluationSession {
    pub fn new(criteria: Vec<Criterion>) -> Self {
        Self { criteria }
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn select(&mut self, index: usize) -> Result<PerformanceLevel, EngineError> {
        self.set(index, true)
    }

    pub fn deselect(&mut self, index: usize) -> Result<PerformanceLevel, EngineError> {
        self.set(index, false)
    }

    /// Flip one criterion and return the resulting label.
    pub fn toggle(&mut self, index: usize) -> Result<PerformanceLevel, EngineError> {
        let selected = self.criterion(index)?.is_selected;
        self.set(index, !selected)
    }

    /// Current label for the snapshot.
    pub fn performance_level(&self) -> PerformanceLevel {
        self.classification().level
    }

    pub fn classification(&self) -> Classification {
        classify(&self.criteria)
    }

    /// Clear every selection, keeping the criteria themselves.
    ///
    /// Call this when a new evaluation sitting starts; nothing clears the
    /// session implicitly.
    pub fn reset(&mut self) {
        tracing::debug!(criteria = self.criteria.len(), "resetting evaluation session");
        for c in &mut self.criteria {
            c.is_selected = false;
        }
    }

    fn criterion(&self, index: usize) -> Result<&Criterion, EngineError> {
        self.criteria.get(index).ok_or(EngineError::UnknownCriterion {
            index,
            len: self.criteria.len(),
        })
    }

    fn set(&mut self, index: usize, selected: bool) -> Result<PerformanceLevel, EngineError> {
        let len = self.criteria.len();
        let criterion = self
            .criteria
            .get_mut(index)
            .ok_or(EngineError::UnknownCriterion { index, len })?;
        criterion.is_selected = selected;
        Ok(self.performance_level())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PerformanceLevel::{Fail, Honors, Pass};

    fn session() -> EvaluationSession {
        EvaluationSession::new(vec![
            Criterion::new(Fail, "Safety", false),
            Criterion::new(Fail, "Safety", false),
            Criterion::new(Honors, "Notes", false),
            Criterion::new(Pass, "Teamwork", true),
        ])
    }

    #[test]
    fn toggling_updates_label() {
        let mut s = session();
        assert_eq!(s.performance_level(), Pass);
        assert_eq!(s.toggle(2).unwrap(), Honors);
        assert_eq!(s.toggle(0).unwrap(), Fail);
        assert_eq!(s.toggle(0).unwrap(), Honors);
        assert_eq!(s.deselect(2).unwrap(), Pass);
        assert_eq!(s.select(1).unwrap(), Fail);
    }

    #[test]
    fn unknown_index_is_rejected() {
        let mut s = session();
        assert_eq!(
            s.toggle(9),
            Err(EngineError::UnknownCriterion { index: 9, len: 4 })
        );
        assert_eq!(
            s.select(4),
            Err(EngineError::UnknownCriterion { index: 4, len: 4 })
        );
    }

    #[test]
    fn reset_clears_all_selections() {
        let mut s = session();
        s.select(0).unwrap();
        s.select(2).unwrap();
        s.reset();
        assert!(s.criteria().iter().all(|c| !c.is_selected));
        assert_eq!(s.criteria().len(), 4);
        assert_eq!(s.performance_level(), Pass);
    }

    #[test]
    fn repeated_reads_are_identical() {
        let mut s = session();
        s.select(2).unwrap();
        assert_eq!(s.classification(), s.classification());
    }
}
