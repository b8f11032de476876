//! # Receita Core
//!
//! Core logic for issuing medical prescriptions:
//! - CPF validation and progressive formatting ([`cpf`])
//! - Name normalisation ([`names`])
//! - Prescription payloads and validation ([`prescription`], [`form`])
//! - Printable HTML rendering ([`render`])
//! - Download file naming ([`download`])
//!
//! Everything here is synchronous and pure apart from reading the clock in
//! [`render::render_today`].
//!
//! **No API concerns**: HTTP handlers, CORS and wire schemas belong in `api-rest` and
//! `api-shared`.

pub mod config;
pub mod constants;
pub mod cpf;
pub mod dates;
pub mod download;
pub mod error;
pub mod form;
pub mod names;
pub mod prescription;
pub mod render;

pub use config::CoreConfig;
pub use constants::*;
pub use cpf::Cpf;
pub use error::{CoreError, CoreResult};
pub use form::PrescriptionForm;
pub use prescription::{DoctorRecord, MedicationEntry, Prescription, PrescriptionPayload};
pub use receita_types::NonEmptyText;
