//! Rotation execution bookkeeping.

use super::plan::RotationPlan;

/// Runtime state while a rotation plan is being stepped.
#[derive(Debug, Clone)]
pub struct RotationExecutor {
    /// The plan being executed.
    plan: RotationPlan,

    /// Steps taken so far.
    current_step: u32,
}

impl RotationExecutor {
    /// Create a new executor for a plan.
    pub fn new(plan: RotationPlan) -> Self {
        Self {
            plan,
            current_step: 0,
        }
    }

    /// Check if every planned step has been taken.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.current_step >= self.plan.steps.0
    }

    /// Get the number of steps taken.
    #[inline]
    pub fn steps_taken(&self) -> u32 {
        self.current_step
    }

    /// Get the total number of steps.
    #[inline]
    pub fn total_steps(&self) -> u32 {
        self.plan.steps.0
    }

    /// Get steps remaining.
    #[inline]
    pub fn steps_remaining(&self) -> u32 {
        self.plan.steps.0.saturating_sub(self.current_step)
    }

    /// Record one completed step.
    ///
    /// Returns `true` if more steps remain.
    pub fn advance(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }
        self.current_step += 1;
        !self.is_complete()
    }

    /// Get progress as a fraction (0.0 to 1.0).
    #[inline]
    pub fn progress(&self) -> f64 {
        if self.plan.steps.0 == 0 {
            1.0
        } else {
            self.current_step as f64 / self.plan.steps.0 as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::units::Degrees;

    #[test]
    fn test_executor_complete() {
        let plan = RotationPlan::relative(Degrees(1.0), 10.0).unwrap();
        let mut executor = RotationExecutor::new(plan);

        assert!(!executor.is_complete());
        assert_eq!(executor.steps_taken(), 0);

        let mut calls = 1;
        while executor.advance() {
            calls += 1;
        }

        assert_eq!(calls, 10);
        assert!(executor.is_complete());
        assert_eq!(executor.steps_taken(), 10);
        assert!((executor.progress() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_plan() {
        let executor = RotationExecutor::new(RotationPlan::zero());
        assert!(executor.is_complete());
        assert_eq!(executor.steps_remaining(), 0);
        assert!((executor.progress() - 1.0).abs() < 1e-12);
    }
}
