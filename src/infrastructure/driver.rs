use super::local::LocalDummyGateway;
use crate::domain::ports::PaymentGatewayBox;
use crate::error::PaymentError;
use std::fmt;
use std::str::FromStr;

/// Every provider implementation the crate can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Driver {
    LocalDummy,
}

impl Driver {
    pub const ALL: &'static [Driver] = &[Driver::LocalDummy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Driver::LocalDummy => "LocalDummy",
        }
    }

    /// Builds a gateway with default parameters.
    pub fn create(&self) -> PaymentGatewayBox {
        match self {
            Driver::LocalDummy => Box::new(LocalDummyGateway::new()),
        }
    }
}

/// Strips a leading namespace separator and lowercases, so `\LocalDummy`,
/// `localdummy` and `LocalDummy` compare equal.
pub fn normalize_driver_name(name: &str) -> String {
    name.trim().trim_start_matches('\\').to_ascii_lowercase()
}

impl FromStr for Driver {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_driver_name(s).as_str() {
            "localdummy" | "dummy" => Ok(Driver::LocalDummy),
            _ => Err(PaymentError::UnknownDriver(s.to_string())),
        }
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_driver_names() {
        assert_eq!("LocalDummy".parse::<Driver>().unwrap(), Driver::LocalDummy);
        assert_eq!("\\localdummy".parse::<Driver>().unwrap(), Driver::LocalDummy);
        assert_eq!("Dummy".parse::<Driver>().unwrap(), Driver::LocalDummy);
        assert!(matches!(
            "Stripe".parse::<Driver>(),
            Err(PaymentError::UnknownDriver(ref name)) if name == "Stripe"
        ));
    }

    #[test]
    fn test_create_builds_matching_gateway() {
        for driver in Driver::ALL {
            let gateway = driver.create();
            assert_eq!(gateway.short_name(), driver.as_str());
        }
    }
}
