use crate::core::models::variant::Variant;
use crate::engine::config::{Bounds, FilterCriteria};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum RejectionReason {
    EmptySequence,
    ChargeOutOfRange {
        value: f64,
        bounds: Bounds<f64>,
    },
    HydrophobicityOutOfRange {
        value: f64,
        bounds: Bounds<f64>,
    },
    LengthOutOfRange {
        value: usize,
        bounds: Bounds<usize>,
    },
    LengthChangeExceeded {
        change: usize,
        tolerance: usize,
    },
    Custom {
        filter: &'static str,
        message: String,
    },
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySequence => write!(f, "sequence is empty"),
            Self::ChargeOutOfRange { value, bounds } => write!(
                f,
                "net charge {:.3} outside [{}, {}]",
                value, bounds.min, bounds.max
            ),
            Self::HydrophobicityOutOfRange { value, bounds } => write!(
                f,
                "hydrophobicity {:.3} outside [{}, {}]",
                value, bounds.min, bounds.max
            ),
            Self::LengthOutOfRange { value, bounds } => write!(
                f,
                "length {} outside [{}, {}]",
                value, bounds.min, bounds.max
            ),
            Self::LengthChangeExceeded { change, tolerance } => write!(
                f,
                "length changed by {} (tolerance {})",
                change, tolerance
            ),
            Self::Custom { filter, message } => write!(f, "{}: {}", filter, message),
        }
    }
}

/// An independent acceptance predicate over a variant's recorded descriptors.
pub trait VariantFilter: Send + Sync {
    fn name(&self) -> &'static str;

    fn check(&self, variant: &Variant) -> Result<(), RejectionReason>;
}

struct NonEmpty;

impl VariantFilter for NonEmpty {
    fn name(&self) -> &'static str {
        "non-empty"
    }

    fn check(&self, variant: &Variant) -> Result<(), RejectionReason> {
        if variant.is_empty() {
            return Err(RejectionReason::EmptySequence);
        }
        Ok(())
    }
}

struct ChargeWithin(Bounds<f64>);

impl VariantFilter for ChargeWithin {
    fn name(&self) -> &'static str {
        "charge"
    }

    fn check(&self, variant: &Variant) -> Result<(), RejectionReason> {
        let value = variant.descriptors().net_charge;
        if self.0.contains(value) {
            Ok(())
        } else {
            Err(RejectionReason::ChargeOutOfRange {
                value,
                bounds: self.0,
            })
        }
    }
}

struct HydrophobicityWithin(Bounds<f64>);

impl VariantFilter for HydrophobicityWithin {
    fn name(&self) -> &'static str {
        "hydrophobicity"
    }

    fn check(&self, variant: &Variant) -> Result<(), RejectionReason> {
        let value = variant.descriptors().avg_hydrophobicity;
        if self.0.contains(value) {
            Ok(())
        } else {
            Err(RejectionReason::HydrophobicityOutOfRange {
                value,
                bounds: self.0,
            })
        }
    }
}

struct LengthWithin(Bounds<usize>);

impl VariantFilter for LengthWithin {
    fn name(&self) -> &'static str {
        "length"
    }

    fn check(&self, variant: &Variant) -> Result<(), RejectionReason> {
        let value = variant.len();
        if self.0.contains(value) {
            Ok(())
        } else {
            Err(RejectionReason::LengthOutOfRange {
                value,
                bounds: self.0,
            })
        }
    }
}

struct LengthChange {
    parent_length: usize,
    tolerance: usize,
}

impl VariantFilter for LengthChange {
    fn name(&self) -> &'static str {
        "length-tolerance"
    }

    fn check(&self, variant: &Variant) -> Result<(), RejectionReason> {
        let change = variant.len().abs_diff(self.parent_length);
        if change <= self.tolerance {
            Ok(())
        } else {
            Err(RejectionReason::LengthChangeExceeded {
                change,
                tolerance: self.tolerance,
            })
        }
    }
}

/// Ordered list of filters. Every filter runs on every variant, so a rejected
/// variant carries all the reasons it failed, not just the first.
pub struct FilterSet {
    filters: Vec<Box<dyn VariantFilter>>,
}

impl FilterSet {
    pub fn empty() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    pub fn from_criteria(criteria: &FilterCriteria, parent_length: usize) -> Self {
        let mut set = Self::empty().with_filter(NonEmpty);
        if let Some(bounds) = criteria.charge {
            set = set.with_filter(ChargeWithin(bounds));
        }
        if let Some(bounds) = criteria.hydrophobicity {
            set = set.with_filter(HydrophobicityWithin(bounds));
        }
        if let Some(bounds) = criteria.length {
            set = set.with_filter(LengthWithin(bounds));
        }
        set.with_filter(LengthChange {
            parent_length,
            tolerance: criteria.length_tolerance,
        })
    }

    pub fn with_filter(mut self, filter: impl VariantFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn evaluate(&self, variant: &Variant) -> Vec<RejectionReason> {
        self.filters
            .iter()
            .filter_map(|f| f.check(variant).err())
            .collect()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl fmt::Debug for FilterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RejectedVariant {
    pub variant: Variant,
    pub reasons: Vec<RejectionReason>,
}
