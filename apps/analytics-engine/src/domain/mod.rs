//! Input records consumed by the analytics core.

mod customer;
mod subscription;

pub use customer::{CustomerRecord, Plan, clv_values};
pub use subscription::SubscriptionPeriod;
