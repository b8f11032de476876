//! Long-form Brazilian Portuguese dates for printed documents.

use chrono::{Datelike, NaiveDate};

const MONTHS_PT_BR: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Formats `date` as `DD de <mês> de AAAA`, e.g. `05 de março de 2026`.
pub fn long_date_pt_br(date: NaiveDate) -> String {
    let month = MONTHS_PT_BR[date.month0() as usize];
    format!("{:02} de {} de {}", date.day(), month, date.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_day_and_spells_month() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        assert_eq!(long_date_pt_br(date), "05 de março de 2026");
    }

    #[test]
    fn covers_year_boundaries() {
        let jan = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let dec = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        assert_eq!(long_date_pt_br(jan), "31 de janeiro de 2025");
        assert_eq!(long_date_pt_br(dec), "01 de dezembro de 2025");
    }
}
