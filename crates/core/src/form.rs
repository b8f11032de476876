//! Prescription form validation.
//!
//! The form is checked before anything is sent to the renderer. Its rules are stricter than the
//! renderer's: a CPF, when typed, must pass the checksum, and at least one medication needs both
//! a name and a dosage. Checks run in on-screen order and stop at the first failure so the user
//! sees one message at a time.

use crate::constants::DOCUMENT_TYPE;
use crate::cpf::Cpf;
use crate::prescription::{DoctorRecord, MedicationEntry, PrescriptionPayload};
use crate::{names, CoreError, CoreResult};
use receita_types::null_as_default;
use serde::{Deserialize, Serialize};

/// Form state as edited by the user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrescriptionForm {
    #[serde(deserialize_with = "null_as_default")]
    pub service_location: String,
    #[serde(deserialize_with = "null_as_default")]
    pub patient_name: String,
    /// CPF as displayed in the input, usually punctuated.
    #[serde(rename = "patientCPF", deserialize_with = "null_as_default")]
    pub patient_cpf: String,
    #[serde(deserialize_with = "null_as_default")]
    pub medications: Vec<MedicationEntry>,
}

/// Validates `form`, returning the parsed CPF when one was typed.
///
/// # Errors
///
/// - [`CoreError::MissingRequiredFields`] for a blank service location or patient name
/// - [`CoreError::InvalidCpf`] if a CPF was typed and fails the checksum
/// - [`CoreError::NoMedication`] if no medication has both name and dosage
pub fn validate_form(form: &PrescriptionForm) -> CoreResult<Option<Cpf>> {
    if form.service_location.trim().is_empty() {
        return Err(CoreError::MissingRequiredFields("local de atendimento"));
    }

    if form.patient_name.trim().is_empty() {
        return Err(CoreError::MissingRequiredFields("nome do paciente"));
    }

    let cpf = match form.patient_cpf.trim() {
        "" => None,
        typed => Some(Cpf::parse(typed)?),
    };

    let has_complete_medication = form
        .medications
        .iter()
        .any(|m| m.has_name() && !m.dosage.trim().is_empty());
    if !has_complete_medication {
        return Err(CoreError::NoMedication);
    }

    Ok(cpf)
}

impl PrescriptionForm {
    /// Validates the form and builds the renderer payload.
    ///
    /// The CPF is reduced to digits, the patient name is proper-cased and unnamed medications
    /// are left out.
    pub fn into_payload(self, doctor: Option<DoctorRecord>) -> CoreResult<PrescriptionPayload> {
        let cpf = validate_form(&self)?;

        Ok(PrescriptionPayload {
            document_type: DOCUMENT_TYPE.to_string(),
            service_location: self.service_location.trim().to_string(),
            patient_name: names::proper_case(self.patient_name.trim()),
            patient_cpf: cpf.map(|c| c.digits().to_owned()).unwrap_or_default(),
            medications: self
                .medications
                .into_iter()
                .filter(MedicationEntry::has_name)
                .collect(),
            doctor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> PrescriptionForm {
        PrescriptionForm {
            service_location: "UBS Centro".into(),
            patient_name: "maria das dores".into(),
            patient_cpf: "529.982.247-25".into(),
            medications: vec![
                MedicationEntry {
                    name: "Dipirona".into(),
                    dosage: "500 mg".into(),
                    ..Default::default()
                },
                MedicationEntry::default(),
            ],
        }
    }

    #[test]
    fn accepts_a_complete_form() {
        assert!(validate_form(&form()).is_ok());
    }

    #[test]
    fn checks_fields_in_screen_order() {
        let mut f = form();
        f.service_location.clear();
        f.patient_name.clear();
        assert!(matches!(
            validate_form(&f),
            Err(CoreError::MissingRequiredFields("local de atendimento"))
        ));

        let mut f = form();
        f.patient_name = " ".into();
        f.patient_cpf = "123".into();
        assert!(matches!(
            validate_form(&f),
            Err(CoreError::MissingRequiredFields("nome do paciente"))
        ));
    }

    #[test]
    fn blank_cpf_is_allowed_but_a_wrong_one_is_not() {
        let parsed = validate_form(&form()).expect("valid form").expect("typed cpf");
        assert_eq!(parsed.digits(), "52998224725");

        let mut f = form();
        f.patient_cpf.clear();
        assert_eq!(validate_form(&f).expect("blank cpf allowed"), None);

        f.patient_cpf = "529.982.247-26".into();
        assert!(matches!(validate_form(&f), Err(CoreError::InvalidCpf)));

        f.patient_cpf = "111.111.111-11".into();
        assert!(matches!(validate_form(&f), Err(CoreError::InvalidCpf)));
    }

    #[test]
    fn requires_a_medication_with_name_and_dosage() {
        let mut f = form();
        f.medications = vec![MedicationEntry {
            name: "Dipirona".into(),
            ..Default::default()
        }];
        assert!(matches!(validate_form(&f), Err(CoreError::NoMedication)));
    }

    #[test]
    fn into_payload_normalises_fields() {
        let payload = form().into_payload(None).expect("valid form");

        assert_eq!(payload.document_type, DOCUMENT_TYPE);
        assert_eq!(payload.patient_name, "Maria Das Dores");
        assert_eq!(payload.patient_cpf, "52998224725");
        assert_eq!(payload.medications.len(), 1);
        assert_eq!(payload.medications[0].name, "Dipirona");
    }

    #[test]
    fn null_form_fields_are_reported_as_missing() {
        let f: PrescriptionForm = serde_json::from_str(
            r#"{"serviceLocation": "UBS", "patientName": null, "patientCPF": null, "medications": null}"#,
        )
        .expect("parse form");
        assert!(matches!(
            validate_form(&f),
            Err(CoreError::MissingRequiredFields("nome do paciente"))
        ));
    }

    #[test]
    fn into_payload_serialises_to_the_wire_shape() {
        let payload = form().into_payload(None).expect("valid form");
        let json = serde_json::to_value(&payload).expect("serialise");

        assert_eq!(json["documentType"], "Receita");
        assert_eq!(json["patientCPF"], "52998224725");
        assert_eq!(json["serviceLocation"], "UBS Centro");
        assert!(json["doctor"].is_null());
    }
}
