//! Prescription payloads and their validated form.
//!
//! [`PrescriptionPayload`] mirrors the JSON the front end posts: every field is free text and
//! any of them may be blank. [`Prescription`] is what the renderer works from; building one
//! from a payload is the only validation the renderer performs.

use crate::constants::DOCUMENT_TYPE;
use crate::{CoreError, CoreResult};
use receita_types::{null_as_default, NonEmptyText};
use serde::{Deserialize, Serialize};

/// One medication line as typed into the form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MedicationEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub dosage: String,
    #[serde(deserialize_with = "null_as_default")]
    pub quantity: String,
    #[serde(deserialize_with = "null_as_default")]
    pub administration: String,
}

impl MedicationEntry {
    /// An entry is printed only when it has a name.
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// Issuing doctor, taken from the signed-in user's profile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DoctorRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub crm: String,
    pub specialty: Option<String>,
    pub clinic_name: Option<String>,
    pub clinic_address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Renderer input as received over the wire.
///
/// Missing and `null` fields deserialise as blank so that an absent `patientName` is reported
/// as a validation error rather than as malformed JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrescriptionPayload {
    #[serde(deserialize_with = "null_as_default")]
    pub document_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub service_location: String,
    #[serde(deserialize_with = "null_as_default")]
    pub patient_name: String,
    #[serde(rename = "patientCPF", deserialize_with = "null_as_default")]
    pub patient_cpf: String,
    #[serde(deserialize_with = "null_as_default")]
    pub medications: Vec<MedicationEntry>,
    pub doctor: Option<DoctorRecord>,
}

impl Default for PrescriptionPayload {
    fn default() -> Self {
        Self {
            document_type: DOCUMENT_TYPE.to_string(),
            service_location: String::new(),
            patient_name: String::new(),
            patient_cpf: String::new(),
            medications: Vec::new(),
            doctor: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Medication {
    pub name: NonEmptyText,
    pub dosage: Option<NonEmptyText>,
    pub quantity: Option<NonEmptyText>,
    pub administration: Option<NonEmptyText>,
}

/// Doctor details with blank fields already dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Doctor {
    pub name: Option<NonEmptyText>,
    pub crm: Option<NonEmptyText>,
    pub specialty: Option<NonEmptyText>,
    pub clinic_name: Option<NonEmptyText>,
    pub clinic_address: Option<NonEmptyText>,
    pub phone: Option<NonEmptyText>,
    pub email: Option<NonEmptyText>,
}

/// A prescription ready to render.
///
/// Guarantees: patient name, CPF and service location are non-blank, and there is at least
/// one medication, each with a name. Medication order follows the payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prescription {
    patient_name: NonEmptyText,
    patient_cpf: NonEmptyText,
    service_location: NonEmptyText,
    medications: Vec<Medication>,
    doctor: Option<Doctor>,
}

impl Prescription {
    /// Validates a payload.
    ///
    /// Medication entries without a name are dropped silently.
    ///
    /// # Errors
    ///
    /// - [`CoreError::MissingRequiredFields`] naming the first blank required field
    /// - [`CoreError::NoMedication`] if no entry has a name
    pub fn try_from_payload(payload: &PrescriptionPayload) -> CoreResult<Self> {
        let required = |value: &str, label: &'static str| {
            NonEmptyText::new(value).map_err(|_| CoreError::MissingRequiredFields(label))
        };

        let patient_name = required(&payload.patient_name, "nome do paciente")?;
        let patient_cpf = required(&payload.patient_cpf, "CPF do paciente")?;
        let service_location = required(&payload.service_location, "local de atendimento")?;

        let medications: Vec<Medication> = payload
            .medications
            .iter()
            .filter_map(|entry| {
                Some(Medication {
                    name: NonEmptyText::new(&entry.name).ok()?,
                    dosage: NonEmptyText::from_optional(Some(&entry.dosage)),
                    quantity: NonEmptyText::from_optional(Some(&entry.quantity)),
                    administration: NonEmptyText::from_optional(Some(&entry.administration)),
                })
            })
            .collect();

        if medications.is_empty() {
            return Err(CoreError::NoMedication);
        }

        let doctor = payload.doctor.as_ref().map(|d| Doctor {
            name: NonEmptyText::from_optional(Some(&d.name)),
            crm: NonEmptyText::from_optional(Some(&d.crm)),
            specialty: NonEmptyText::from_optional(d.specialty.as_ref()),
            clinic_name: NonEmptyText::from_optional(d.clinic_name.as_ref()),
            clinic_address: NonEmptyText::from_optional(d.clinic_address.as_ref()),
            phone: NonEmptyText::from_optional(d.phone.as_ref()),
            email: NonEmptyText::from_optional(d.email.as_ref()),
        });

        Ok(Self {
            patient_name,
            patient_cpf,
            service_location,
            medications,
            doctor,
        })
    }

    pub fn patient_name(&self) -> &str {
        self.patient_name.as_str()
    }

    /// CPF exactly as supplied (normally digits only).
    pub fn patient_cpf(&self) -> &str {
        self.patient_cpf.as_str()
    }

    pub fn service_location(&self) -> &str {
        self.service_location.as_str()
    }

    pub fn medications(&self) -> &[Medication] {
        &self.medications
    }

    pub fn doctor(&self) -> Option<&Doctor> {
        self.doctor.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> PrescriptionPayload {
        PrescriptionPayload {
            service_location: "UBS Centro".into(),
            patient_name: "João da Silva".into(),
            patient_cpf: "52998224725".into(),
            medications: vec![MedicationEntry {
                name: "Amoxicilina".into(),
                dosage: "500 mg".into(),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn deserialises_front_end_json() {
        let json = r#"{
            "documentType": "Receita",
            "serviceLocation": "UBS Centro",
            "patientName": "João da Silva",
            "patientCPF": "52998224725",
            "medications": [
                {"name": "Amoxicilina", "dosage": "500 mg", "quantity": "21 cápsulas", "administration": "1 a cada 8h"}
            ],
            "doctor": {"name": "Ana Lima", "crm": "12345-SP", "clinicName": null}
        }"#;

        let payload: PrescriptionPayload = serde_json::from_str(json).expect("parse payload");
        assert_eq!(payload.patient_cpf, "52998224725");
        assert_eq!(payload.medications[0].quantity, "21 cápsulas");
        let doctor = payload.doctor.expect("doctor");
        assert_eq!(doctor.crm, "12345-SP");
        assert_eq!(doctor.clinic_name, None);
    }

    #[test]
    fn missing_fields_deserialise_as_blank() {
        let payload: PrescriptionPayload =
            serde_json::from_str(r#"{"serviceLocation": "UBS"}"#).expect("parse payload");
        assert!(payload.patient_name.is_empty());
        assert!(payload.medications.is_empty());
        assert!(payload.doctor.is_none());
    }

    #[test]
    fn null_fields_deserialise_as_blank() {
        let json = r#"{
            "serviceLocation": "UBS",
            "patientName": null,
            "patientCPF": null,
            "medications": null,
            "doctor": {"name": null, "crm": "1"}
        }"#;

        let payload: PrescriptionPayload = serde_json::from_str(json).expect("parse payload");
        assert!(payload.patient_name.is_empty());
        assert!(payload.patient_cpf.is_empty());
        assert!(payload.medications.is_empty());
        assert_eq!(payload.doctor.as_ref().expect("doctor").name, "");
        assert!(matches!(
            Prescription::try_from_payload(&payload),
            Err(CoreError::MissingRequiredFields("nome do paciente"))
        ));

        let entry: MedicationEntry =
            serde_json::from_str(r#"{"name": "Dipirona", "dosage": null}"#).expect("parse entry");
        assert_eq!(entry.dosage, "");
    }

    #[test]
    fn reports_first_missing_required_field() {
        let mut p = payload();
        p.patient_name = "  ".into();
        p.service_location.clear();
        assert!(matches!(
            Prescription::try_from_payload(&p),
            Err(CoreError::MissingRequiredFields("nome do paciente"))
        ));

        let mut p = payload();
        p.patient_cpf.clear();
        assert!(matches!(
            Prescription::try_from_payload(&p),
            Err(CoreError::MissingRequiredFields("CPF do paciente"))
        ));

        let mut p = payload();
        p.service_location.clear();
        assert!(matches!(
            Prescription::try_from_payload(&p),
            Err(CoreError::MissingRequiredFields("local de atendimento"))
        ));
    }

    #[test]
    fn drops_unnamed_medications_and_keeps_order() {
        let mut p = payload();
        p.medications = vec![
            MedicationEntry {
                name: "Dipirona".into(),
                ..Default::default()
            },
            MedicationEntry {
                name: " ".into(),
                dosage: "10 mg".into(),
                ..Default::default()
            },
            MedicationEntry {
                name: "Loratadina".into(),
                ..Default::default()
            },
        ];

        let prescription = Prescription::try_from_payload(&p).expect("valid");
        let names: Vec<&str> = prescription
            .medications()
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(names, ["Dipirona", "Loratadina"]);
    }

    #[test]
    fn rejects_when_no_medication_has_a_name() {
        let mut p = payload();
        p.medications = vec![MedicationEntry {
            dosage: "500 mg".into(),
            ..Default::default()
        }];
        assert!(matches!(
            Prescription::try_from_payload(&p),
            Err(CoreError::NoMedication)
        ));

        p.medications.clear();
        assert!(matches!(
            Prescription::try_from_payload(&p),
            Err(CoreError::NoMedication)
        ));
    }
}
