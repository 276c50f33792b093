//! Models that represent employees, their roles, and directory payloads.

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    types::EmployeeId,
    validation::rules::{
        validate_hourly_wage, validate_name, validate_optional_email, validate_pin,
    },
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
/// Directory entry for a person who can use the timeclock.
pub struct Employee {
    /// PIN used both for lookup and keypad login.
    pub employee_id: EmployeeId,
    pub name: String,
    /// Hourly rate applied to worked hours when computing daily wage.
    pub hourly_wage: f64,
    pub role: EmployeeRole,
    /// Inactive employees keep their history but cannot clock.
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    pub fn new(
        employee_id: EmployeeId,
        name: String,
        hourly_wage: f64,
        role: EmployeeRole,
        active: bool,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            employee_id,
            name,
            hourly_wage,
            role,
            active,
            email: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies the present fields of `patch`. Fields are assumed validated.
    pub fn apply(&mut self, patch: UpdateEmployee, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(wage) = patch.hourly_wage {
            self.hourly_wage = wage;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(active) = patch.active {
            self.active = active;
        }
        if let Some(email) = patch.email {
            self.email = Some(email).filter(|e| !e.is_empty());
        }
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ToSchema)]
/// Supported employee roles.
pub enum EmployeeRole {
    #[default]
    Employee,
    Manager,
    /// Opens the admin dashboard after PIN entry.
    Admin,
}

impl EmployeeRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeRole::Employee => "employee",
            EmployeeRole::Manager => "manager",
            EmployeeRole::Admin => "admin",
        }
    }
}

impl FromStr for EmployeeRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "employee" => Ok(EmployeeRole::Employee),
            "manager" => Ok(EmployeeRole::Manager),
            "admin" => Ok(EmployeeRole::Admin),
            other => Err(format!("unknown role `{}`", other)),
        }
    }
}

impl Serialize for EmployeeRole {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EmployeeRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // tolerate "Admin" / "ADMIN" from older clients
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            de::Error::unknown_variant(&s, &["employee", "manager", "admin"])
        })
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
/// Payload for registering a new employee.
pub struct CreateEmployee {
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    /// Accepts a number or a numeric string, as sent by HTML form inputs.
    #[serde(deserialize_with = "de_lenient_f64")]
    #[schema(value_type = f64, minimum = 0)]
    #[validate(custom(function = "validate_hourly_wage"))]
    pub hourly_wage: f64,
    #[serde(default = "default_active", deserialize_with = "de_lenient_bool")]
    #[schema(value_type = bool, default = true)]
    pub active: bool,
    #[serde(default)]
    pub role: EmployeeRole,
    /// Requested PIN. A free 4-digit PIN is issued when absent.
    #[serde(default, deserialize_with = "de_blank_as_none")]
    #[validate(custom(function = "validate_pin"))]
    pub employee_id: Option<String>,
    #[serde(default, deserialize_with = "de_blank_as_none")]
    #[validate(email)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
/// Payload for updating portions of an existing employee.
pub struct UpdateEmployee {
    #[validate(custom(function = "validate_name"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_opt_f64")]
    #[schema(value_type = Option<f64>, minimum = 0)]
    #[validate(custom(function = "validate_hourly_wage"))]
    pub hourly_wage: Option<f64>,
    pub role: Option<EmployeeRole>,
    pub active: Option<bool>,
    /// An empty string clears the stored address.
    #[serde(default, deserialize_with = "de_trimmed")]
    #[validate(custom(function = "validate_optional_email"))]
    pub email: Option<String>,
}

fn default_active() -> bool {
    true
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

fn number_from(value: NumberOrString) -> Result<f64, String> {
    match value {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("`{}` is not a number", s)),
    }
}

fn de_lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    number_from(NumberOrString::deserialize(deserializer)?).map_err(de::Error::custom)
}

fn de_lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<NumberOrString>::deserialize(deserializer)?
        .map(number_from)
        .transpose()
        .map_err(de::Error::custom)
}

fn de_lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Text(String),
    }

    match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(b) => Ok(b),
        BoolOrString::Text(s) => match s.trim() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(de::Error::custom(format!("`{}` is not a boolean", other))),
        },
    }
}

fn de_trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.map(|s| s.trim().to_string()))
}

fn de_blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn role_serializes_snake_case_and_tolerates_casing() {
        assert_eq!(
            serde_json::to_value(EmployeeRole::Manager).unwrap(),
            json!("manager")
        );
        let role: EmployeeRole = serde_json::from_str("\"ADMIN\"").unwrap();
        assert_eq!(role, EmployeeRole::Admin);
        assert!(serde_json::from_str::<EmployeeRole>("\"owner\"").is_err());
    }

    #[test]
    fn create_payload_accepts_form_strings() {
        let payload: CreateEmployee = serde_json::from_value(json!({
            "name": "Kim",
            "hourlyWage": "15000",
            "active": "true",
            "role": "employee",
            "employeeId": ""
        }))
        .unwrap();
        assert_eq!(payload.hourly_wage, 15000.0);
        assert!(payload.active);
        assert!(payload.employee_id.is_none());
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn create_payload_defaults_active_and_role() {
        let payload: CreateEmployee =
            serde_json::from_value(json!({ "name": "Lee", "hourlyWage": 9860 })).unwrap();
        assert!(payload.active);
        assert_eq!(payload.role, EmployeeRole::Employee);
    }

    #[test]
    fn create_payload_validation_flags_bad_fields() {
        let payload: CreateEmployee = serde_json::from_value(json!({
            "name": "  ",
            "hourlyWage": -1,
            "employeeId": "12x4",
            "email": "not-an-email"
        }))
        .unwrap();
        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("hourly_wage"));
        assert!(fields.contains_key("employee_id"));
        assert!(fields.contains_key("email"));
    }

    #[test]
    fn update_with_empty_email_clears_address() {
        let mut employee = Employee::new(
            EmployeeId::parse("0002").unwrap(),
            "Han".into(),
            10.0,
            EmployeeRole::Employee,
            true,
            Utc::now(),
        );
        employee.email = Some("han@example.com".into());

        let patch: UpdateEmployee = serde_json::from_value(json!({ "email": " " })).unwrap();
        assert!(patch.validate().is_ok());
        employee.apply(patch, Utc::now());
        assert!(employee.email.is_none());

        let patch: UpdateEmployee =
            serde_json::from_value(json!({ "email": "broken" })).unwrap();
        assert!(patch.validate().unwrap_err().field_errors().contains_key("email"));
    }

    #[test]
    fn apply_updates_only_present_fields() {
        let now = Utc::now();
        let mut employee = Employee::new(
            EmployeeId::parse("1234").unwrap(),
            "Park".into(),
            10.0,
            EmployeeRole::Employee,
            true,
            now,
        );
        employee.apply(
            UpdateEmployee {
                hourly_wage: Some(12.5),
                role: Some(EmployeeRole::Manager),
                ..Default::default()
            },
            now,
        );
        assert_eq!(employee.name, "Park");
        assert_eq!(employee.hourly_wage, 12.5);
        assert_eq!(employee.role, EmployeeRole::Manager);
        assert!(employee.active);
    }

    #[test]
    fn employee_serializes_camel_case() {
        let employee = Employee::new(
            EmployeeId::parse("0001").unwrap(),
            "Choi".into(),
            15000.0,
            EmployeeRole::Admin,
            true,
            Utc::now(),
        );
        let value = serde_json::to_value(&employee).unwrap();
        assert_eq!(value["employeeId"], "0001");
        assert_eq!(value["hourlyWage"], 15000.0);
        assert_eq!(value["role"], "admin");
        assert!(value.get("email").is_none());
    }
}
