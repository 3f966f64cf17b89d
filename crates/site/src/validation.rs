//! Server-side form validation.
//!
//! Every state-changing form is validated here before the handler touches
//! the database. Validators collect all problems at once so the form can
//! re-render with the full list and sticky values.

use cedar_motors_core::Email;
use chrono::Datelike;
use rust_decimal::Decimal;

/// Oldest model year accepted in the inventory.
pub const MIN_VEHICLE_YEAR: i32 = 1900;

/// Collects validation failures for a single form submission.
#[derive(Debug, Default)]
pub struct FormErrors(Vec<String>);

impl FormErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the collector, returning `Err` if anything failed.
    pub fn finish(self) -> Result<(), Vec<String>> {
        if self.0.is_empty() { Ok(()) } else { Err(self.0) }
    }

    #[must_use]
    pub fn into_messages(self) -> Vec<String> {
        self.0
    }
}

/// Validate a registration or account-update name pair.
pub fn check_names(errors: &mut FormErrors, first_name: &str, last_name: &str) {
    if first_name.trim().is_empty() {
        errors.push("Please provide a first name.");
    }
    if last_name.trim().len() < 2 {
        errors.push("Please provide a last name of at least 2 characters.");
    }
}

/// Validate an email address, returning the parsed form when well-formed.
pub fn check_email(errors: &mut FormErrors, email: &str) -> Option<Email> {
    match Email::parse(email) {
        Ok(email) => Some(email),
        Err(_) => {
            errors.push("A valid email address is required.");
            None
        }
    }
}

/// Validate password strength for registration and password changes.
///
/// Requires at least 12 characters with an uppercase letter, a lowercase
/// letter, a digit, and a symbol.
pub fn check_password_strength(errors: &mut FormErrors, password: &str) {
    let long_enough = password.chars().count() >= 12;
    let has_upper = password.chars().any(char::is_uppercase);
    let has_lower = password.chars().any(char::is_lowercase);
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password
        .chars()
        .any(|c| !c.is_alphanumeric() && !c.is_whitespace());

    if !(long_enough && has_upper && has_lower && has_digit && has_symbol) {
        errors.push(
            "Password must be at least 12 characters and include an uppercase letter, \
             a lowercase letter, a number, and a symbol.",
        );
    }
}

/// Validate a new classification name.
///
/// Names must be non-empty and strictly alphanumeric, no spaces.
pub fn check_classification_name(errors: &mut FormErrors, name: &str) {
    if name.is_empty() || !name.chars().all(char::is_alphanumeric) {
        errors.push("Classification name must contain only letters and numbers, no spaces.");
    }
}

/// Raw vehicle form fields before type conversion.
///
/// Numeric fields arrive as strings so a bad value can be reported
/// alongside the other failures instead of rejecting the whole form.
#[derive(Debug, Default, Clone)]
pub struct VehicleFormInput {
    pub classification_id: String,
    pub make: String,
    pub model: String,
    pub description: String,
    pub image: String,
    pub thumbnail: String,
    pub price: String,
    pub year: String,
    pub miles: String,
    pub color: String,
}

/// Vehicle fields after successful validation.
#[derive(Debug)]
pub struct ValidVehicle {
    pub classification_id: i32,
    pub make: String,
    pub model: String,
    pub description: String,
    pub image: String,
    pub thumbnail: String,
    pub price: Decimal,
    pub year: i32,
    pub miles: i32,
    pub color: String,
}

/// Validate a vehicle add/edit form.
///
/// Returns the converted fields, or every failure found.
pub fn check_vehicle(input: &VehicleFormInput) -> Result<ValidVehicle, Vec<String>> {
    let mut errors = FormErrors::new();

    let classification_id = match input.classification_id.trim().parse::<i32>() {
        Ok(id) if id > 0 => Some(id),
        _ => {
            errors.push("Please choose a classification.");
            None
        }
    };

    let make = input.make.trim();
    if make.len() < 3 {
        errors.push("Make must be at least 3 characters.");
    }
    let model = input.model.trim();
    if model.len() < 3 {
        errors.push("Model must be at least 3 characters.");
    }
    if input.description.trim().is_empty() {
        errors.push("Please provide a description.");
    }
    if input.image.trim().is_empty() {
        errors.push("Please provide an image path.");
    }
    if input.thumbnail.trim().is_empty() {
        errors.push("Please provide a thumbnail path.");
    }

    let price = match input.price.trim().parse::<Decimal>() {
        Ok(p) if p > Decimal::ZERO => Some(p),
        _ => {
            errors.push("Price must be a positive number.");
            None
        }
    };

    let max_year = chrono::Utc::now().year() + 1;
    let year = match input.year.trim().parse::<i32>() {
        Ok(y) if (MIN_VEHICLE_YEAR..=max_year).contains(&y) => Some(y),
        _ => {
            errors.push(format!(
                "Year must be between {MIN_VEHICLE_YEAR} and {max_year}."
            ));
            None
        }
    };

    let miles = match input.miles.trim().parse::<i32>() {
        Ok(m) if m >= 0 => Some(m),
        _ => {
            errors.push("Miles must be zero or a positive whole number.");
            None
        }
    };

    if input.color.trim().is_empty() {
        errors.push("Please provide a color.");
    }

    match (classification_id, price, year, miles) {
        (Some(classification_id), Some(price), Some(year), Some(miles))
            if errors.is_empty() =>
        {
            Ok(ValidVehicle {
                classification_id,
                make: make.to_string(),
                model: model.to_string(),
                description: input.description.trim().to_string(),
                image: input.image.trim().to_string(),
                thumbnail: input.thumbnail.trim().to_string(),
                price,
                year,
                miles,
                color: input.color.trim().to_string(),
            })
        }
        _ => Err(errors.into_messages()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_vehicle_input() -> VehicleFormInput {
        VehicleFormInput {
            classification_id: "2".to_string(),
            make: "Toyota".to_string(),
            model: "Tacoma".to_string(),
            description: "Reliable midsize pickup.".to_string(),
            image: "/images/vehicles/tacoma.jpg".to_string(),
            thumbnail: "/images/vehicles/tacoma-tn.jpg".to_string(),
            price: "32500".to_string(),
            year: "2021".to_string(),
            miles: "18000".to_string(),
            color: "Silver".to_string(),
        }
    }

    #[test]
    fn test_names_rejects_short_last_name() {
        let mut errors = FormErrors::new();
        check_names(&mut errors, "Ann", "B");
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_names_accepts_valid() {
        let mut errors = FormErrors::new();
        check_names(&mut errors, "Ann", "Lee");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_password_strength() {
        let cases = [
            ("short1!A", false),
            ("alllowercase12345!", false),
            ("ALLUPPERCASE12345!", false),
            ("NoDigitsHereAtAll!", false),
            ("NoSymbolsHere12345", false),
            ("Str0ng&Secure!Pass", true),
        ];
        for (password, ok) in cases {
            let mut errors = FormErrors::new();
            check_password_strength(&mut errors, password);
            assert_eq!(errors.is_empty(), ok, "password: {password}");
        }
    }

    #[test]
    fn test_classification_name_rules() {
        let mut errors = FormErrors::new();
        check_classification_name(&mut errors, "SUV");
        assert!(errors.is_empty());

        let mut errors = FormErrors::new();
        check_classification_name(&mut errors, "Sport Utility");
        assert!(!errors.is_empty());

        let mut errors = FormErrors::new();
        check_classification_name(&mut errors, "");
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_vehicle_valid_input_converts() {
        let valid = check_vehicle(&valid_vehicle_input()).expect("input should validate");
        assert_eq!(valid.classification_id, 2);
        assert_eq!(valid.year, 2021);
        assert_eq!(valid.miles, 18_000);
        assert_eq!(valid.price, Decimal::from(32_500));
    }

    #[test]
    fn test_vehicle_collects_all_failures() {
        let input = VehicleFormInput {
            classification_id: "abc".to_string(),
            make: "To".to_string(),
            price: "-5".to_string(),
            year: "1850".to_string(),
            miles: "-1".to_string(),
            ..valid_vehicle_input()
        };
        let errors = check_vehicle(&input).expect_err("input should fail");
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn test_vehicle_year_upper_bound() {
        let next_year = chrono::Utc::now().year() + 1;
        let mut input = valid_vehicle_input();
        input.year = next_year.to_string();
        assert!(check_vehicle(&input).is_ok());

        input.year = (next_year + 1).to_string();
        assert!(check_vehicle(&input).is_err());
    }

    #[test]
    fn test_email_check() {
        let mut errors = FormErrors::new();
        assert!(check_email(&mut errors, "a@b.com").is_some());
        assert!(errors.is_empty());

        let mut errors = FormErrors::new();
        assert!(check_email(&mut errors, "not-an-email").is_none());
        assert!(!errors.is_empty());
    }
}
