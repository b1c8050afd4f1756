use crate::constants::{MAX_PARTNER_VEHICLES, PARTNER_COMMISSION_PERCENT};
use crate::models::VehicleType;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// A rental business asking to list its vehicles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PartnerApplication {
    pub id: Uuid,
    pub business_name: String,
    pub owner_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub vehicle_types: Vec<VehicleType>,
    pub vehicle_count: u32,
    /// Platform commission per booking, in percent
    pub commission: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Body of a partnership application. Any `commission` sent by the client
/// is ignored; the platform rate applies.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPartnerApplication {
    pub business_name: String,
    pub owner_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub vehicle_types: Vec<VehicleType>,
    pub vehicle_count: u32,
}

impl NewPartnerApplication {
    pub fn validate(&self) -> Result<(), String> {
        for (field, value) in [
            ("businessName", &self.business_name),
            ("ownerName", &self.owner_name),
            ("address", &self.address),
        ] {
            if value.trim().is_empty() {
                return Err(format!("{} must not be empty", field));
            }
        }

        if !is_plausible_email(self.email.trim()) {
            return Err(format!("Invalid email address: '{}'", self.email));
        }

        if !is_plausible_phone(&self.phone) {
            return Err(format!("Invalid phone number: '{}'", self.phone));
        }

        if self.vehicle_types.is_empty() {
            return Err("vehicleTypes must list at least one of car, bike, truck".to_string());
        }

        if self.vehicle_count == 0 || self.vehicle_count > MAX_PARTNER_VEHICLES {
            return Err(format!(
                "vehicleCount must be between 1 and {}",
                MAX_PARTNER_VEHICLES
            ));
        }

        Ok(())
    }

    /// Trimmed fields, vehicle types deduplicated in first-seen order.
    pub fn into_application(self) -> PartnerApplication {
        let mut vehicle_types = Vec::with_capacity(self.vehicle_types.len());
        for t in self.vehicle_types {
            if !vehicle_types.contains(&t) {
                vehicle_types.push(t);
            }
        }

        PartnerApplication {
            id: Uuid::new_v4(),
            business_name: self.business_name.trim().to_string(),
            owner_name: self.owner_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            vehicle_types,
            vehicle_count: self.vehicle_count,
            commission: PARTNER_COMMISSION_PERCENT,
            created_at: OffsetDateTime::now_utc(),
        }
    }
}

// One '@', non-empty local part, dotted domain, no whitespace
fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain.contains('.')
        && domain.split('.').all(|part| !part.is_empty())
}

// Digits plus common separators, 7 to 15 digits (E.164 maximum)
fn is_plausible_phone(phone: &str) -> bool {
    let phone = phone.trim();
    let allowed = phone
        .chars()
        .enumerate()
        .all(|(i, c)| c.is_ascii_digit() || " -()".contains(c) || (c == '+' && i == 0));
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    allowed && (7..=15).contains(&digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn application() -> NewPartnerApplication {
        NewPartnerApplication {
            business_name: " Pink City Rentals ".to_string(),
            owner_name: "Asha Verma".to_string(),
            email: "asha@pinkcityrentals.in".to_string(),
            phone: "+91 98290 12345".to_string(),
            address: "MI Road, Jaipur".to_string(),
            vehicle_types: vec![VehicleType::Car, VehicleType::Bike, VehicleType::Car],
            vehicle_count: 12,
        }
    }

    #[test]
    fn test_valid_application() {
        let new = application();
        assert!(new.validate().is_ok());

        let stored = new.into_application();
        assert_eq!(stored.business_name, "Pink City Rentals");
        assert_eq!(stored.vehicle_types, vec![VehicleType::Car, VehicleType::Bike]);
        assert_eq!(stored.commission, 10.0);
    }

    #[test]
    fn test_required_text_fields() {
        let mut new = application();
        new.owner_name = "  ".to_string();
        assert_eq!(new.validate().unwrap_err(), "ownerName must not be empty");
    }

    #[test]
    fn test_email_shapes() {
        for good in ["a@b.co", "first.last@mail.example.org"] {
            assert!(is_plausible_email(good), "{} rejected", good);
        }
        for bad in ["", "asha", "@rentals.in", "asha@", "asha@rentals", "a@@b.in", "a b@c.in", "a@b..in"] {
            assert!(!is_plausible_email(bad), "{} accepted", bad);
        }
    }

    #[test]
    fn test_phone_shapes() {
        assert!(is_plausible_phone("+91 98290 12345"));
        assert!(is_plausible_phone("(0141) 222-3333"));
        assert!(!is_plausible_phone("12345"));
        assert!(!is_plausible_phone("98290-ABCDE"));
        assert!(!is_plausible_phone("91+9829012345"));
    }

    #[test]
    fn test_vehicle_fields() {
        let mut new = application();
        new.vehicle_types.clear();
        assert!(new.validate().is_err());

        let mut new = application();
        new.vehicle_count = 0;
        assert!(new.validate().is_err());
    }

    #[test]
    fn test_unknown_vehicle_type_fails_to_parse() {
        let result = serde_json::from_value::<NewPartnerApplication>(serde_json::json!({
            "businessName": "Boats R Us",
            "ownerName": "Sam",
            "email": "sam@boats.in",
            "phone": "9829012345",
            "address": "Lake Road",
            "vehicleTypes": ["boat"],
            "vehicleCount": 3,
            "commission": 10
        }));
        assert!(result.is_err());
    }
}
