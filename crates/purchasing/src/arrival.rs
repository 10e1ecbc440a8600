//! Expected-arrival lookups.
//!
//! Two seams:
//! - [`ArrivalSource`] is what data sources implement; it may fail.
//! - [`ArrivalLookup`] is what readiness analysis consumes; it has no error
//!   channel, so a broken secondary source can never abort an analysis.
//!
//! [`ResilientArrivals`] adapts the former into the latter.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::warn;

use kitready_core::MaterialId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArrivalError {
    /// The backing data (e.g. purchasing module) is not available for this scope.
    #[error("arrival source unavailable: {0}")]
    Unavailable(String),

    #[error("arrival query failed: {0}")]
    Query(String),
}

/// Fallible source of promised arrival dates.
pub trait ArrivalSource {
    /// Earliest promised arrival for `material_id` among open orders.
    fn earliest_arrival(&self, material_id: MaterialId) -> Result<Option<NaiveDate>, ArrivalError>;
}

impl<S> ArrivalSource for &S
where
    S: ArrivalSource + ?Sized,
{
    fn earliest_arrival(&self, material_id: MaterialId) -> Result<Option<NaiveDate>, ArrivalError> {
        (**self).earliest_arrival(material_id)
    }
}

/// Infallible arrival lookup; `None` means "unknown".
pub trait ArrivalLookup {
    fn expected_arrival(&self, material_id: MaterialId) -> Option<NaiveDate>;
}

impl<L> ArrivalLookup for &L
where
    L: ArrivalLookup + ?Sized,
{
    fn expected_arrival(&self, material_id: MaterialId) -> Option<NaiveDate> {
        (**self).expected_arrival(material_id)
    }
}

/// Converts source failures into "unknown arrival" (logged, never propagated).
#[derive(Debug, Clone)]
pub struct ResilientArrivals<S> {
    source: S,
}

impl<S> ResilientArrivals<S>
where
    S: ArrivalSource,
{
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

impl<S> ArrivalLookup for ResilientArrivals<S>
where
    S: ArrivalSource,
{
    fn expected_arrival(&self, material_id: MaterialId) -> Option<NaiveDate> {
        match self.source.earliest_arrival(material_id) {
            Ok(date) => date,
            Err(err) => {
                warn!(%material_id, error = %err, "arrival lookup failed; treating as unknown");
                None
            }
        }
    }
}

/// Lookup that never knows an arrival date.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoArrivals;

impl ArrivalLookup for NoArrivals {
    fn expected_arrival(&self, _material_id: MaterialId) -> Option<NaiveDate> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl ArrivalSource for Broken {
        fn earliest_arrival(&self, _: MaterialId) -> Result<Option<NaiveDate>, ArrivalError> {
            Err(ArrivalError::Unavailable("purchasing".to_string()))
        }
    }

    struct Fixed(NaiveDate);

    impl ArrivalSource for Fixed {
        fn earliest_arrival(&self, _: MaterialId) -> Result<Option<NaiveDate>, ArrivalError> {
            Ok(Some(self.0))
        }
    }

    #[test]
    fn failures_become_unknown() {
        let lookup = ResilientArrivals::new(Broken);
        assert_eq!(lookup.expected_arrival(MaterialId::new()), None);
    }

    #[test]
    fn successes_pass_through() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let lookup = ResilientArrivals::new(Fixed(date));
        assert_eq!(lookup.expected_arrival(MaterialId::new()), Some(date));
    }

    #[test]
    fn no_arrivals_is_always_unknown() {
        assert_eq!(NoArrivals.expected_arrival(MaterialId::new()), None);
    }
}
