//! Cash flow types for schedule-based analytics.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Date, Frequency};

/// Type of cash flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CashFlowType {
    /// Regular coupon payment
    Coupon,
    /// Combined coupon and principal (final payment)
    CouponAndPrincipal,
}

impl fmt::Display for CashFlowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CashFlowType::Coupon => "Coupon",
            CashFlowType::CouponAndPrincipal => "Coupon+Principal",
        };
        write!(f, "{name}")
    }
}

/// A future payment positioned on the settlement-relative year axis.
///
/// `time_years` is measured from settlement; `coupon` and `principal` are
/// kept apart so calendar reports can split them, while analytics only
/// need [`CashFlow::amount`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    date: Date,
    time_years: f64,
    coupon: f64,
    principal: f64,
    cf_type: CashFlowType,
}

impl CashFlow {
    /// Creates a coupon-only cash flow.
    #[must_use]
    pub fn coupon(date: Date, time_years: f64, coupon: f64) -> Self {
        Self {
            date,
            time_years,
            coupon,
            principal: 0.0,
            cf_type: CashFlowType::Coupon,
        }
    }

    /// Creates the final payment: last coupon plus principal.
    #[must_use]
    pub fn final_payment(date: Date, time_years: f64, coupon: f64, principal: f64) -> Self {
        Self {
            date,
            time_years,
            coupon,
            principal,
            cf_type: CashFlowType::CouponAndPrincipal,
        }
    }

    /// Payment date.
    #[must_use]
    pub fn date(&self) -> Date {
        self.date
    }

    /// Time from settlement in years.
    #[must_use]
    pub fn time_years(&self) -> f64 {
        self.time_years
    }

    /// Coupon portion of the payment.
    #[must_use]
    pub fn coupon_amount(&self) -> f64 {
        self.coupon
    }

    /// Principal portion of the payment.
    #[must_use]
    pub fn principal_amount(&self) -> f64 {
        self.principal
    }

    /// Total payment amount.
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.coupon + self.principal
    }

    /// Type of cash flow.
    #[must_use]
    pub fn cf_type(&self) -> CashFlowType {
        self.cf_type
    }

    /// Returns a copy with both portions multiplied by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            coupon: self.coupon * factor,
            principal: self.principal * factor,
            ..*self
        }
    }
}

impl fmt::Display for CashFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} t={:.4} {:.6} ({})",
            self.date,
            self.time_years,
            self.amount(),
            self.cf_type
        )
    }
}

/// Ordered future cash flows of one bond, as seen from a settlement date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowSchedule {
    settlement: Date,
    frequency: Frequency,
    flows: Vec<CashFlow>,
}

impl CashFlowSchedule {
    /// Creates an empty schedule.
    #[must_use]
    pub fn new(settlement: Date, frequency: Frequency) -> Self {
        Self {
            settlement,
            frequency,
            flows: Vec::new(),
        }
    }

    /// Creates an empty schedule with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(settlement: Date, frequency: Frequency, capacity: usize) -> Self {
        Self {
            settlement,
            frequency,
            flows: Vec::with_capacity(capacity),
        }
    }

    /// Appends a cash flow. Callers push in payment order.
    pub fn push(&mut self, cf: CashFlow) {
        self.flows.push(cf);
    }

    /// Settlement date the schedule is measured from.
    #[must_use]
    pub fn settlement(&self) -> Date {
        self.settlement
    }

    /// Payment frequency the schedule was generated with.
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Returns the number of cash flows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flows.len()
    }

    /// Returns true if no payments remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// Returns an iterator over the cash flows.
    pub fn iter(&self) -> impl Iterator<Item = &CashFlow> {
        self.flows.iter()
    }

    /// Returns the cash flows as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[CashFlow] {
        &self.flows
    }

    /// Last payment, if any.
    #[must_use]
    pub fn last(&self) -> Option<&CashFlow> {
        self.flows.last()
    }

    /// Payment times in years.
    #[must_use]
    pub fn times(&self) -> Vec<f64> {
        self.flows.iter().map(CashFlow::time_years).collect()
    }

    /// Sum of all undiscounted payments.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.flows.iter().map(CashFlow::amount).sum()
    }

    /// Time to the final payment, zero for an empty schedule.
    #[must_use]
    pub fn time_to_maturity(&self) -> f64 {
        self.last().map_or(0.0, CashFlow::time_years)
    }
}

impl<'a> IntoIterator for &'a CashFlowSchedule {
    type Item = &'a CashFlow;
    type IntoIter = std::slice::Iter<'a, CashFlow>;

    fn into_iter(self) -> Self::IntoIter {
        self.flows.iter()
    }
}
