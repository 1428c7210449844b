use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::validation::{self, ValidationError};

// ============================================================================
// ID Type
// ============================================================================

/// Identifier assigned by the TIN service. Opaque to the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TinRecordId(pub String);

impl TinRecordId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TinRecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Record
// ============================================================================

/// TIN identity record as returned by `GET /tins`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TinRecord {
    #[serde(alias = "_id")]
    pub id: TinRecordId,
    pub name: String,
    pub address: String,
    #[serde(default, with = "calendar_date")]
    pub birthdate: Option<NaiveDate>,
    pub tin_number: String,
    /// Effective date of the record, independent of `birthdate`
    #[serde(default, with = "calendar_date")]
    pub date: Option<NaiveDate>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl TinRecord {
    /// `YYYY-MM-DD` or "-" when the service sent no birthdate
    pub fn birthdate_display(&self) -> String {
        display_date(self.birthdate)
    }

    pub fn date_display(&self) -> String {
        display_date(self.date)
    }
}

fn display_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(calendar_date::FORMAT).to_string())
        .unwrap_or_else(|| "-".to_string())
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Editable fields of the create/update form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TinField {
    Name,
    Address,
    Birthdate,
    TinNumber,
    Date,
}

impl TinField {
    pub const ALL: [TinField; 5] = [
        TinField::Name,
        TinField::Address,
        TinField::Birthdate,
        TinField::TinNumber,
        TinField::Date,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TinField::Name => "Name",
            TinField::Address => "Address",
            TinField::Birthdate => "Birthdate",
            TinField::TinNumber => "TIN Number",
            TinField::Date => "Date",
        }
    }
}

/// Request body for `POST /tins` and `PUT /tins/{id}`.
///
/// Values stay form-shaped strings until submission; dates are `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TinRecordDto {
    pub name: String,
    pub address: String,
    pub birthdate: String,
    pub tin_number: String,
    pub date: String,
}

impl TinRecordDto {
    /// Empty create form. The effective date defaults to today.
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            date: today.format(calendar_date::FORMAT).to_string(),
            ..Self::default()
        }
    }

    /// Edit form prefilled from an existing record
    pub fn from_record(record: &TinRecord, today: NaiveDate) -> Self {
        Self {
            name: record.name.clone(),
            address: record.address.clone(),
            birthdate: record
                .birthdate
                .map(|d| d.format(calendar_date::FORMAT).to_string())
                .unwrap_or_default(),
            tin_number: record.tin_number.clone(),
            date: record
                .date
                .unwrap_or(today)
                .format(calendar_date::FORMAT)
                .to_string(),
        }
    }

    pub fn get(&self, field: TinField) -> &str {
        match field {
            TinField::Name => &self.name,
            TinField::Address => &self.address,
            TinField::Birthdate => &self.birthdate,
            TinField::TinNumber => &self.tin_number,
            TinField::Date => &self.date,
        }
    }

    pub fn set(&mut self, field: TinField, value: String) {
        match field {
            TinField::Name => self.name = value,
            TinField::Address => self.address = value,
            TinField::Birthdate => self.birthdate = value,
            TinField::TinNumber => self.tin_number = value,
            TinField::Date => self.date = value,
        }
    }

    /// Required fields first, then TIN format, then date shape
    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing: Vec<TinField> = TinField::ALL
            .into_iter()
            .filter(|f| self.get(*f).trim().is_empty())
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        if !validation::validate_tin_number(&self.tin_number) {
            return Err(ValidationError::MalformedTinNumber);
        }

        for field in [TinField::Birthdate, TinField::Date] {
            if calendar_date::parse(self.get(field)).is_none() {
                return Err(ValidationError::InvalidDate(field));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Calendar date (de)serialization
// ============================================================================

/// Dates travel as `YYYY-MM-DD`; a time component sent by the service is dropped.
pub mod calendar_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d";

    /// Calendar part of `2024-03-15`, `2024-03-15T00:00:00.000Z` or `2024-03-15 10:00`
    pub fn parse(value: &str) -> Option<NaiveDate> {
        let value = value.trim();
        let date_part = value
            .split(|c: char| c == 'T' || c == ' ')
            .next()
            .unwrap_or(value);
        NaiveDate::parse_from_str(date_part, FORMAT).ok()
    }

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_str(&date.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => {
                let date = parse(value);
                if date.is_none() {
                    log::warn!("unreadable calendar date {:?}, treating as absent", value);
                }
                Ok(date)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn valid_dto() -> TinRecordDto {
        TinRecordDto {
            name: "Juan Dela Cruz".into(),
            address: "12 Rizal St, Manila".into(),
            birthdate: "1990-05-01".into(),
            tin_number: "123-456-789".into(),
            date: "2024-03-15".into(),
        }
    }

    #[test]
    fn test_deserialize_service_payload() {
        let raw = r#"{
            "_id": "65f0c2a1",
            "name": "Juan Dela Cruz",
            "address": "12 Rizal St",
            "birthdate": "1990-05-01T00:00:00.000Z",
            "tinNumber": "123-456-789",
            "date": "2024-03-15",
            "isActive": false,
            "user": "u-1"
        }"#;
        let record: TinRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.id, TinRecordId::new("65f0c2a1"));
        assert_eq!(record.birthdate, Some(ymd(1990, 5, 1)));
        assert_eq!(record.date, Some(ymd(2024, 3, 15)));
        assert!(!record.is_active);
        assert_eq!(record.birthdate_display(), "1990-05-01");
    }

    #[test]
    fn test_missing_optional_fields() {
        let raw = r#"{"id":"a","name":"n","address":"x","tinNumber":"123456789"}"#;
        let record: TinRecord = serde_json::from_str(raw).unwrap();
        assert!(record.is_active);
        assert_eq!(record.birthdate, None);
        assert_eq!(record.date_display(), "-");
    }

    #[test]
    fn test_unreadable_date_keeps_rest_of_list() {
        let raw = r#"[
            {"_id":"a","name":"Ana","address":"x","birthdate":"1990-05-01","tinNumber":"123456789"},
            {"_id":"b","name":"Ben","address":"y","birthdate":"05/01/1990","tinNumber":"987654321","date":"soon"}
        ]"#;
        let records: Vec<TinRecord> = serde_json::from_str(raw).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].birthdate, Some(ymd(1990, 5, 1)));
        assert_eq!(records[1].birthdate, None);
        assert_eq!(records[1].date, None);
        assert_eq!(records[1].birthdate_display(), "-");
    }

    #[test]
    fn test_serialize_dates_without_time() {
        let record = TinRecord {
            id: TinRecordId::new("a"),
            name: "n".into(),
            address: "x".into(),
            birthdate: Some(ymd(2001, 2, 3)),
            tin_number: "123456789".into(),
            date: None,
            is_active: true,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["birthdate"], "2001-02-03");
        assert_eq!(json["tinNumber"], "123456789");
        assert_eq!(json["isActive"], true);
        assert!(json["date"].is_null());
    }

    #[test]
    fn test_dto_wire_shape() {
        let json = serde_json::to_value(valid_dto()).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 5);
        assert!(keys.contains(&"tinNumber"));
        assert!(keys.contains(&"birthdate"));
    }

    #[test]
    fn test_blank_form_defaults_date_to_today() {
        let dto = TinRecordDto::blank(ymd(2026, 10, 19));
        assert_eq!(dto.date, "2026-10-19");
        assert!(dto.name.is_empty());
        assert!(dto.tin_number.is_empty());
    }

    #[test]
    fn test_edit_form_from_record() {
        let record = TinRecord {
            id: TinRecordId::new("a"),
            name: "Maria".into(),
            address: "Cebu".into(),
            birthdate: None,
            tin_number: "987/654/321".into(),
            date: None,
            is_active: true,
        };
        let dto = TinRecordDto::from_record(&record, ymd(2026, 1, 2));
        assert_eq!(dto.birthdate, "");
        assert_eq!(dto.date, "2026-01-02");
        assert_eq!(dto.tin_number, "987/654/321");
    }

    #[test]
    fn test_validate_ok() {
        assert_eq!(valid_dto().validate(), Ok(()));
    }

    #[test]
    fn test_validate_reports_every_missing_field() {
        let mut dto = valid_dto();
        dto.set(TinField::Name, "   ".into());
        dto.set(TinField::Date, String::new());
        assert_eq!(
            dto.validate(),
            Err(ValidationError::MissingFields(vec![TinField::Name, TinField::Date]))
        );
    }

    #[test]
    fn test_validate_missing_before_format() {
        let mut dto = valid_dto();
        dto.address.clear();
        dto.tin_number = "12".into();
        assert!(matches!(dto.validate(), Err(ValidationError::MissingFields(_))));
    }

    #[test]
    fn test_validate_rejects_eight_digit_tin() {
        let mut dto = valid_dto();
        dto.tin_number = "12-3456-78".into();
        let err = dto.validate().unwrap_err();
        assert_eq!(err, ValidationError::MalformedTinNumber);
        assert_eq!(
            err.to_string(),
            "TIN Number must contain exactly 9 digits (excluding / or -)."
        );
    }

    #[test]
    fn test_validate_rejects_bad_date() {
        let mut dto = valid_dto();
        dto.birthdate = "01/05/1990".into();
        assert_eq!(
            dto.validate(),
            Err(ValidationError::InvalidDate(TinField::Birthdate))
        );
    }

    #[test]
    fn test_calendar_date_parse() {
        assert_eq!(calendar_date::parse("2024-03-15"), Some(ymd(2024, 3, 15)));
        assert_eq!(
            calendar_date::parse("2024-03-15T23:59:59+08:00"),
            Some(ymd(2024, 3, 15))
        );
        assert_eq!(calendar_date::parse("2024-13-01"), None);
        assert_eq!(calendar_date::parse(""), None);
    }
}
