//! Product-specific entry points.
//!
//! Each VDP product is the generic [`Dispatcher`](crate::Dispatcher) with
//! its endpoint descriptor fixed; these modules are plain constructors with
//! no logic of their own. Payload types are the caller's: any
//! `serde::Serialize` type implementing [`ApiPayload`](crate::ApiPayload).

pub mod atmlocator;
pub mod merchantmeasurement;
pub mod visadirect;
