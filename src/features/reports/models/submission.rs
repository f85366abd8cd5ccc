//! Validated report submissions and the text stored in `reports.details`.

use crate::core::error::{AppError, Result};
use crate::shared::constants::{MAX_DEPARTMENT_LEN, MIN_REPORT_DETAILS_LEN};
use crate::shared::validation::non_blank;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskSubmission {
    pub department: String,
    pub risk_types: Vec<String>,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSubmission {
    pub department: String,
    pub event_types: Vec<String>,
    pub location: String,
    pub details: String,
    pub witnesses: Option<String>,
}

impl RiskSubmission {
    pub fn new(
        department: Option<&str>,
        risk_types: &[String],
        details: Option<&str>,
    ) -> Result<Self> {
        let department = department_name(department)?;
        let risk_types = labels(risk_types);
        if risk_types.is_empty() {
            return Err(AppError::BadRequest(
                "At least one risk type must be selected".to_string(),
            ));
        }
        let details = details_text(details)?;

        Ok(Self {
            department,
            risk_types,
            details,
        })
    }

    pub fn compose_details(&self, image_urls: &[String]) -> String {
        with_images(
            format!(
                "Departman: {} | Risk Türleri: {} | Detaylar: {}",
                self.department,
                self.risk_types.join(", "),
                self.details
            ),
            image_urls,
        )
    }
}

impl EventSubmission {
    /// `require_types` is off for the mobile client, which may send no event type
    pub fn new(
        department: Option<&str>,
        event_types: &[String],
        location: Option<&str>,
        details: Option<&str>,
        witnesses: Option<&str>,
        require_types: bool,
    ) -> Result<Self> {
        let department = department_name(department)?;
        let event_types = labels(event_types);
        if require_types && event_types.is_empty() {
            return Err(AppError::BadRequest(
                "At least one event type must be selected".to_string(),
            ));
        }
        let location = required(location, "Location is required")?;
        let details = details_text(details)?;

        Ok(Self {
            department,
            event_types,
            location,
            details,
            witnesses: non_blank(witnesses),
        })
    }

    pub fn compose_details(&self, image_urls: &[String]) -> String {
        with_images(
            format!(
                "Departman: {} | Olay Türleri: {} | Yer: {} | Detaylar: {}",
                self.department,
                self.event_types.join(", "),
                self.location,
                self.details
            ),
            image_urls,
        )
    }
}

fn required(value: Option<&str>, message: &str) -> Result<String> {
    non_blank(value).ok_or_else(|| AppError::BadRequest(message.to_string()))
}

fn department_name(value: Option<&str>) -> Result<String> {
    let department = required(value, "Department is required")?;
    if department.chars().count() > MAX_DEPARTMENT_LEN {
        return Err(AppError::BadRequest(format!(
            "Department must be at most {} characters",
            MAX_DEPARTMENT_LEN
        )));
    }
    Ok(department)
}

fn labels(values: &[String]) -> Vec<String> {
    values
        .iter()
        .filter_map(|v| non_blank(Some(v)))
        .collect()
}

fn details_text(details: Option<&str>) -> Result<String> {
    match non_blank(details) {
        Some(text) if text.chars().count() >= MIN_REPORT_DETAILS_LEN => Ok(text),
        _ => Err(AppError::BadRequest(format!(
            "Details must be at least {} characters",
            MIN_REPORT_DETAILS_LEN
        ))),
    }
}

fn with_images(mut text: String, image_urls: &[String]) -> String {
    if !image_urls.is_empty() {
        text.push_str(" | Görseller: ");
        text.push_str(&image_urls.join(", "));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_risk_details_format() {
        let submission = RiskSubmission::new(
            Some("Üretim"),
            &strings(&["Kaygan Zemin", "Gaz Sızıntısı"]),
            Some("  Koridorda yağ var  "),
        )
        .unwrap();

        assert_eq!(
            submission.compose_details(&[]),
            "Departman: Üretim | Risk Türleri: Kaygan Zemin, Gaz Sızıntısı | Detaylar: Koridorda yağ var"
        );
    }

    #[test]
    fn test_risk_details_with_images() {
        let submission =
            RiskSubmission::new(Some("Depo"), &strings(&["Elektrik Kaçağı"]), Some("Kablo açık"))
                .unwrap();
        let images = strings(&["/static/uploads/1_a.png", "/static/uploads/1_b.jpg"]);

        assert_eq!(
            submission.compose_details(&images),
            "Departman: Depo | Risk Türleri: Elektrik Kaçağı | Detaylar: Kablo açık | Görseller: /static/uploads/1_a.png, /static/uploads/1_b.jpg"
        );
    }

    #[test]
    fn test_risk_requires_type_and_details() {
        assert!(RiskSubmission::new(Some("Depo"), &strings(&["  "]), Some("Kablo açık")).is_err());
        assert!(RiskSubmission::new(Some("Depo"), &strings(&["Yangın"]), Some(" abcd ")).is_err());
        assert!(RiskSubmission::new(None, &strings(&["Yangın"]), Some("Kablo açık")).is_err());
    }

    #[test]
    fn test_department_fits_column() {
        let at_limit = "Ş".repeat(MAX_DEPARTMENT_LEN);
        let submission =
            RiskSubmission::new(Some(&at_limit), &strings(&["Yangın"]), Some("Kablo açık"))
                .unwrap();
        assert_eq!(submission.department.chars().count(), MAX_DEPARTMENT_LEN);

        let too_long = "D".repeat(MAX_DEPARTMENT_LEN + 1);
        let risk = RiskSubmission::new(Some(&too_long), &strings(&["Yangın"]), Some("Kablo açık"));
        assert!(matches!(risk, Err(AppError::BadRequest(_))));

        let event = EventSubmission::new(
            Some(&too_long),
            &[],
            Some("B Blok"),
            Some("Panoda kıvılcım"),
            None,
            false,
        );
        assert!(matches!(event, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_event_details_format() {
        let submission = EventSubmission::new(
            Some("Bakım"),
            &strings(&["Yangın"]),
            Some("B Blok"),
            Some("Panoda kıvılcım"),
            Some("   "),
            true,
        )
        .unwrap();

        assert_eq!(submission.witnesses, None);
        assert_eq!(
            submission.compose_details(&[]),
            "Departman: Bakım | Olay Türleri: Yangın | Yer: B Blok | Detaylar: Panoda kıvılcım"
        );
    }

    #[test]
    fn test_event_requires_location() {
        let result = EventSubmission::new(
            Some("Bakım"),
            &strings(&["Yangın"]),
            None,
            Some("Panoda kıvılcım"),
            None,
            true,
        );
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_mobile_event_may_omit_types() {
        let submission = EventSubmission::new(
            Some("Bakım"),
            &[],
            Some("B Blok"),
            Some("Panoda kıvılcım"),
            Some("Ali Veli"),
            false,
        )
        .unwrap();
        assert!(submission.compose_details(&[]).contains("Olay Türleri:  | Yer"));
        assert_eq!(submission.witnesses.as_deref(), Some("Ali Veli"));
    }
}
