//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs`: Domain types and pure logic
//! - `wire.rs`: Raw serde structs matching backend responses
//! - `convert.rs`: `TryFrom`/`From` conversions with validation
//! - `client.rs`: Sub-client with HTTP methods

pub mod instrument;
pub mod series;
