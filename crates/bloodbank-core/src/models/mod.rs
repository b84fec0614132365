//! Data models for blood bank records.
//!
//! This module contains the record shapes exchanged with the record store:
//!
//! - `BloodGroup`, `Antigen`, `ProductType`: blood classification vocabulary
//! - `BloodUnit`, `NewBloodUnit`: donated units and their create requests
//! - `Donor`, `NewDonor`: registered donors
//! - `Drive`, `NewDrive`: donation drives
//! - `Admin`, `NewAdmin`, `Role`: staff accounts
//!
//! Field decoding is deliberately tolerant, see [`wire`].

pub mod admin;
pub mod blood;
pub mod donor;
pub mod drive;
pub mod unit;
pub mod wire;

pub use admin::{Admin, NewAdmin, Role};
pub use blood::{Antigen, BloodGroup, ProductType, UnknownBloodGroup};
pub use donor::{Donor, NewDonor};
pub use drive::{Drive, NewDrive};
pub use unit::{BloodUnit, NewBloodUnit};
