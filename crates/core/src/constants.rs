//! Constants used throughout the Receita core crate.
//!
//! Labels printed on the prescription are Portuguese because the document is handed to
//! Brazilian patients and pharmacies.

/// Default listen address for the REST service.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";

/// Default clinic UTC offset (Brasília time).
pub const DEFAULT_UTC_OFFSET: &str = "-03:00";

/// Clinic heading used when the doctor profile has no clinic name.
pub const DEFAULT_CLINIC_LABEL: &str = "Consultório Médico";

/// Title printed above the prescription date.
pub const DOCUMENT_TITLE: &str = "Receita Médica";

/// Signature label used when the prescription has no doctor attached.
pub const SIGNATURE_PLACEHOLDER: &str = "Assinatura do Médico";

/// Prefix of generated download file names.
pub const DOWNLOAD_FILE_PREFIX: &str = "receita";

/// Extension of generated download file names.
pub const DOWNLOAD_FILE_EXTENSION: &str = "html";

/// Number of digits in a complete CPF.
pub const CPF_LEN: usize = 11;

/// `documentType` sent with every prescription payload.
pub const DOCUMENT_TYPE: &str = "Receita";
