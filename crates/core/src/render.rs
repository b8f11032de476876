//! Printable prescription documents.
//!
//! The renderer turns a [`Prescription`] into one self-contained HTML document: inline styles
//! only, no external resources, and an `@page` rule sizing it for A4 with fixed margins. Printing
//! it from any browser (or "save as PDF") gives the same pagination without a PDF library on the
//! server.
//!
//! Document layout, top to bottom:
//! 1. clinic and doctor header (only when a doctor is attached)
//! 2. title and long-form date
//! 3. patient summary: name, formatted CPF, service location
//! 4. numbered medication list
//! 5. signature block
//!
//! Optional lines are built as `Option<String>` fragments and joined, so a blank field simply
//! contributes nothing. All user-supplied text is HTML-escaped.
//!
//! Output depends only on the prescription, the date and the clinic label, so two calls on the
//! same day with the same payload produce identical bytes.

use crate::config::CoreConfig;
use crate::constants::{DEFAULT_CLINIC_LABEL, DOCUMENT_TITLE, SIGNATURE_PLACEHOLDER};
use crate::dates::long_date_pt_br;
use crate::prescription::{Doctor, Medication, Prescription, PrescriptionPayload};
use crate::{cpf, CoreResult};
use chrono::NaiveDate;
use receita_types::NonEmptyText;
use std::fmt::Write;

const PAGE_STYLE: &str = "\
      @page {
        size: A4;
        margin: 20mm;
      }
      body {
        font-family: 'Helvetica Neue', Helvetica, Arial, sans-serif;
        color: #1f2937;
        line-height: 1.6;
        margin: 0;
        padding: 40px;
      }";

const MUTED_LINE: &str = "margin: 5px 0; color: #6b7280; font-size: 14px;";

/// Validates `payload` and renders it with the stock clinic label.
///
/// # Errors
///
/// Returns the validation errors of [`Prescription::try_from_payload`], or
/// [`crate::CoreError::Template`] if writing the document fails.
pub fn render(payload: &PrescriptionPayload, date: NaiveDate) -> CoreResult<String> {
    let prescription = Prescription::try_from_payload(payload)?;
    render_prescription(&prescription, date, DEFAULT_CLINIC_LABEL)
}

/// Validates `payload` and renders it dated today at the configured clinic.
pub fn render_today(payload: &PrescriptionPayload, cfg: &CoreConfig) -> CoreResult<String> {
    let prescription = Prescription::try_from_payload(payload)?;
    let today = cfg.today();
    tracing::debug!(
        medications = prescription.medications().len(),
        date = %today,
        "rendering prescription"
    );
    render_prescription(&prescription, today, cfg.clinic_label())
}

/// Renders an already validated prescription.
///
/// `clinic_label` heads the document when the doctor has no clinic name.
pub fn render_prescription(
    prescription: &Prescription,
    date: NaiveDate,
    clinic_label: &str,
) -> CoreResult<String> {
    let mut out = String::with_capacity(8 * 1024);

    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html lang=\"pt-BR\">")?;
    writeln!(out, "  <head>")?;
    writeln!(out, "    <meta charset=\"UTF-8\">")?;
    writeln!(
        out,
        "    <title>{} - {}</title>",
        DOCUMENT_TITLE,
        escape(prescription.patient_name())
    )?;
    writeln!(out, "    <style>\n{}\n    </style>", PAGE_STYLE)?;
    writeln!(out, "  </head>")?;
    writeln!(out, "  <body>")?;

    if let Some(doctor) = prescription.doctor() {
        writeln!(out, "{}", doctor_header(doctor, clinic_label))?;
    }
    writeln!(out, "{}", title_block(date))?;
    writeln!(out, "{}", patient_block(prescription))?;
    writeln!(
        out,
        "    <h3 style=\"margin: 0 0 20px 0; font-size: 16px; color: #374151; border-bottom: 2px solid #0d9488; padding-bottom: 10px;\">Prescrição</h3>"
    )?;
    for (index, medication) in prescription.medications().iter().enumerate() {
        writeln!(out, "{}", medication_block(index + 1, medication))?;
    }
    writeln!(out, "{}", signature_block(prescription.doctor()))?;

    writeln!(out, "  </body>")?;
    writeln!(out, "</html>")?;

    Ok(out)
}

fn doctor_header(doctor: &Doctor, clinic_label: &str) -> String {
    let clinic_name = doctor
        .clinic_name
        .as_ref()
        .map(NonEmptyText::as_str)
        .unwrap_or(clinic_label);

    let clinic = join_lines([
        Some(format!(
            "      <h1 style=\"margin: 0; font-size: 24px; color: #0d9488; font-weight: 700;\">{}</h1>",
            escape(clinic_name)
        )),
        muted_line(doctor.clinic_address.as_ref(), ""),
        muted_line(doctor.phone.as_ref(), "Tel: "),
    ]);

    let identity = join_lines([
        doctor.name.as_ref().map(|name| {
            format!(
                "      <p style=\"margin: 0; color: #374151;\"><strong>Dr(a). {}</strong></p>",
                escape(name.as_str())
            )
        }),
        muted_line(doctor.crm.as_ref(), "CRM: "),
        muted_line(doctor.specialty.as_ref(), ""),
    ]);

    join_lines([
        Some("    <div class=\"clinic\" style=\"margin-bottom: 30px; text-align: center;\">".into()),
        Some(clinic),
        Some("    </div>".into()),
        Some("    <hr style=\"border: none; border-top: 2px solid #e5e7eb; margin: 20px 0;\">".into()),
        (!identity.is_empty()).then(|| {
            format!(
                "    <div class=\"doctor\" style=\"text-align: right; margin-bottom: 20px;\">\n{}\n    </div>",
                identity
            )
        }),
    ])
}

fn title_block(date: NaiveDate) -> String {
    format!(
        "    <div style=\"text-align: center; margin-bottom: 30px;\">
      <h2 style=\"margin: 0; font-size: 20px; color: #374151; text-transform: uppercase; letter-spacing: 2px;\">{}</h2>
      <p class=\"date\" style=\"margin: 10px 0; color: #6b7280; font-size: 14px;\">{}</p>
    </div>",
        DOCUMENT_TITLE,
        long_date_pt_br(date)
    )
}

fn patient_block(prescription: &Prescription) -> String {
    let field = |label: &str, value: &str, value_style: &str| {
        format!(
            "      <div style=\"margin-bottom: 15px;\">
        <span style=\"color: #6b7280; font-size: 14px;\">{}:</span>
        <p style=\"margin: 5px 0; {}\">{}</p>
      </div>",
            label,
            value_style,
            escape(value)
        )
    };

    join_lines([
        Some("    <div class=\"patient\" style=\"margin-bottom: 30px; padding: 20px; background: #f0fdfa; border-radius: 8px; border: 1px solid #99f6e4;\">".into()),
        Some(field(
            "Paciente",
            prescription.patient_name(),
            "font-size: 18px; font-weight: 600; color: #1f2937;",
        )),
        Some(field(
            "CPF",
            &cpf::format(prescription.patient_cpf()),
            "font-size: 16px; color: #1f2937;",
        )),
        Some(field(
            "Local de Atendimento",
            prescription.service_location(),
            "font-size: 16px; color: #1f2937;",
        )),
        Some("    </div>".into()),
    ])
}

fn medication_block(number: usize, medication: &Medication) -> String {
    let heading = match &medication.dosage {
        Some(dosage) => format!(
            "{}. {} - {}",
            number,
            escape(medication.name.as_str()),
            escape(dosage.as_str())
        ),
        None => format!("{}. {}", number, escape(medication.name.as_str())),
    };

    join_lines([
        Some("    <div class=\"medication\" style=\"margin-bottom: 20px; padding: 15px; background: #f8f9fa; border-radius: 8px; border-left: 4px solid #0d9488;\">".into()),
        Some(format!(
            "      <div style=\"font-weight: 600; font-size: 16px; color: #1f2937; margin-bottom: 8px;\">{}</div>",
            heading
        )),
        medication.quantity.as_ref().map(|quantity| {
            format!(
                "      <div style=\"color: #4b5563; margin-bottom: 6px;\"><strong>Quantidade:</strong> {}</div>",
                escape(quantity.as_str())
            )
        }),
        medication.administration.as_ref().map(|administration| {
            format!(
                "      <div style=\"color: #4b5563; white-space: pre-wrap;\"><strong>Administração:</strong> {}</div>",
                escape(administration.as_str())
            )
        }),
        Some("    </div>".into()),
    ])
}

fn signature_block(doctor: Option<&Doctor>) -> String {
    let signer = doctor
        .and_then(|d| d.name.as_ref())
        .map(|name| format!("Dr(a). {}", escape(name.as_str())))
        .unwrap_or_else(|| SIGNATURE_PLACEHOLDER.to_string());

    join_lines([
        Some("    <div class=\"signature\" style=\"margin-top: 60px; text-align: center;\">".into()),
        Some("      <div style=\"display: inline-block; border-top: 1px solid #1f2937; padding-top: 10px; min-width: 300px;\">".into()),
        Some(format!(
            "        <p style=\"margin: 0; font-weight: 600; color: #1f2937;\">{}</p>",
            signer
        )),
        doctor.and_then(|d| muted_line(d.crm.as_ref(), "CRM: ")),
        Some("      </div>".into()),
        Some("    </div>".into()),
    ])
}

fn muted_line(value: Option<&NonEmptyText>, prefix: &str) -> Option<String> {
    value.map(|v| {
        format!(
            "      <p style=\"{}\">{}{}</p>",
            MUTED_LINE,
            prefix,
            escape(v.as_str())
        )
    })
}

fn join_lines<I>(fragments: I) -> String
where
    I: IntoIterator<Item = Option<String>>,
{
    fragments
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Escapes text for use in HTML element content and quoted attributes.
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
