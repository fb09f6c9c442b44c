//! # luxplay-domain
//!
//! Pure domain model for the luxplay playback controller.
//!
//! ## Responsibilities
//! - Foundational types: error taxonomy, timestamps
//! - Define **sensor readings** (light level or presence) and the **day window**
//! - Define the **decision engine** mapping a reading and the wall clock to a desired state
//! - Define **transitions** and the controller's bookkeeping state
//! - Define the **player command** vocabulary and playback states
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod command;
pub mod controller_state;
pub mod decision;
pub mod playback;
pub mod reading;
pub mod transition;
pub mod volume;
pub mod window;
