//! Clock abstraction
//!
//! Year-dependent rules never read the system time directly; the engine is
//! handed a [`Clock`] so tests and configuration can pin "now".

use chrono::{Datelike, Utc};

/// Source of the current calendar year
pub trait Clock: Send + Sync {
    fn current_year(&self) -> i32;
}

/// Reads the current UTC date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_year(&self) -> i32 {
        Utc::now().year()
    }
}

/// Always reports the same year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i32);

impl Clock for FixedClock {
    fn current_year(&self) -> i32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_returns_plausible_year() {
        let year = SystemClock.current_year();
        assert!(year >= 2024);
        assert!(year < 2100);
    }

    #[test]
    fn test_fixed_clock_is_pinned() {
        let clock = FixedClock(1999);
        assert_eq!(clock.current_year(), 1999);
        assert_eq!(clock.current_year(), 1999);
    }

    #[test]
    fn test_clock_as_trait_object() {
        let clocks: Vec<Box<dyn Clock>> = vec![Box::new(FixedClock(2030)), Box::new(SystemClock)];
        assert_eq!(clocks[0].current_year(), 2030);
        assert!(clocks[1].current_year() > 2000);
    }
}
