//! Settling detection. A needle is classified the first time its linear
//! speed dips under the stillness threshold and never again.

use crate::domain::needle::Needle;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RestDetector {
    pub threshold: f32,
}

impl RestDetector {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    #[inline]
    pub fn is_still(&self, speed: f32) -> bool {
        speed < self.threshold
    }

    /// True exactly when `needle` should transition to stopped this tick.
    ///
    /// `speed` is `None` when the backend no longer knows the body; such a
    /// needle can't move anymore, so it counts as still.
    pub fn observe(&self, needle: &Needle, speed: Option<f32>) -> bool {
        if needle.stopped() {
            return false;
        }
        match speed {
            Some(s) => self.is_still(s),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::needle::NeedleStatus;
    use crate::physics_backend::BodyHandle;

    #[test]
    fn fires_below_threshold_only() {
        let det = RestDetector::new(0.1);
        let needle = Needle::new(1, BodyHandle(1), 0);
        assert!(!det.observe(&needle, Some(0.5)));
        assert!(!det.observe(&needle, Some(0.1)));
        assert!(det.observe(&needle, Some(0.099)));
        assert!(det.observe(&needle, None));
    }

    #[test]
    fn stopped_needles_are_never_re_evaluated() {
        let det = RestDetector::new(0.1);
        let mut needle = Needle::new(1, BodyHandle(1), 0);
        needle.status = NeedleStatus::Crossed;
        assert!(!det.observe(&needle, Some(0.0)));
        needle.status = NeedleStatus::SettledNoCross;
        assert!(!det.observe(&needle, Some(0.0)));
    }
}
