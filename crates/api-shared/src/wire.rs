//! JSON request and response bodies.

use receita_types::null_as_default;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Error body returned with every non-2xx status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

impl ErrorRes {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct MedicationReq {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub dosage: String,
    #[serde(deserialize_with = "null_as_default")]
    pub quantity: String,
    #[serde(deserialize_with = "null_as_default")]
    pub administration: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct DoctorReq {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// CRM licence number.
    #[serde(deserialize_with = "null_as_default")]
    pub crm: String,
    pub specialty: Option<String>,
    pub clinic_name: Option<String>,
    pub clinic_address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Body of `POST /generate-prescription-pdf`.
///
/// Every field defaults to blank, whether absent or `null`; blank required fields are rejected by
/// validation with a specific message.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratePrescriptionReq {
    /// Always `"Receita"` from the current front end.
    #[serde(deserialize_with = "null_as_default")]
    pub document_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub service_location: String,
    #[serde(deserialize_with = "null_as_default")]
    pub patient_name: String,
    /// Digits only.
    #[serde(rename = "patientCPF", deserialize_with = "null_as_default")]
    pub patient_cpf: String,
    #[serde(deserialize_with = "null_as_default")]
    pub medications: Vec<MedicationReq>,
    pub doctor: Option<DoctorReq>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CpfReq {
    #[serde(deserialize_with = "null_as_default")]
    pub cpf: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FormatCpfRes {
    pub formatted: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidateCpfRes {
    pub valid: bool,
    pub formatted: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prescription_request_uses_front_end_field_names() {
        let req: GeneratePrescriptionReq = serde_json::from_str(
            r#"{
                "documentType": "Receita",
                "serviceLocation": "UBS Centro",
                "patientName": "João",
                "patientCPF": "52998224725",
                "medications": [{"name": "Dipirona", "dosage": "500 mg"}],
                "doctor": {"name": "Ana", "crm": "1", "clinicAddress": "Rua A"}
            }"#,
        )
        .expect("parse request");

        assert_eq!(req.patient_cpf, "52998224725");
        assert_eq!(req.medications[0].quantity, "");
        assert_eq!(
            req.doctor.and_then(|d| d.clinic_address),
            Some("Rua A".to_string())
        );
    }

    #[test]
    fn null_doctor_is_accepted() {
        let req: GeneratePrescriptionReq =
            serde_json::from_str(r#"{"doctor": null}"#).expect("parse request");
        assert!(req.doctor.is_none());
        assert!(req.patient_name.is_empty());
    }

    #[test]
    fn null_fields_are_read_as_blank() {
        let req: GeneratePrescriptionReq = serde_json::from_str(
            r#"{
                "serviceLocation": null,
                "patientName": null,
                "patientCPF": null,
                "medications": null,
                "doctor": {"name": null, "crm": null, "phone": null}
            }"#,
        )
        .expect("parse request");
        assert!(req.service_location.is_empty());
        assert!(req.patient_name.is_empty());
        assert!(req.medications.is_empty());
        let doctor = req.doctor.expect("doctor");
        assert!(doctor.name.is_empty());
        assert_eq!(doctor.phone, None);

        let entry: MedicationReq =
            serde_json::from_str(r#"{"name": "Dipirona", "quantity": null}"#).expect("parse entry");
        assert!(entry.quantity.is_empty());

        let cpf: CpfReq = serde_json::from_str(r#"{"cpf": null}"#).expect("parse cpf");
        assert!(cpf.cpf.is_empty());
    }

    #[test]
    fn error_body_shape() {
        let json = serde_json::to_string(&ErrorRes::new("Requisição inválida")).unwrap();
        assert_eq!(json, r#"{"error":"Requisição inválida"}"#);
    }
}
