// src/output/mod.rs
//! Delivery of converted documents.
//!
//! `plan_page` and `plan_database` map a run's documents to destinations
//! without touching the filesystem; `deliver` executes the plan.

mod paths;
mod types;
mod writer;

pub use paths::{page_filename, plan_database, plan_page};
pub use types::{Delivered, DeliveryFailure, DeliveryTarget, OutputPlan, OutputReport};
pub use writer::deliver;
