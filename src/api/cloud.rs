use std::{fmt, str::FromStr};

use crate::lib::errors::ApiError;

/// Falcon API cloud region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cloud {
    /// Let the API client pick the region from the credentials.
    #[default]
    Autodiscover,
    Us1,
    Us2,
    Eu1,
    UsGov1,
}

impl Cloud {
    pub const ALL: [Cloud; 5] = [
        Cloud::Autodiscover,
        Cloud::Us1,
        Cloud::Us2,
        Cloud::Eu1,
        Cloud::UsGov1,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Cloud::Autodiscover => "autodiscover",
            Cloud::Us1 => "us-1",
            Cloud::Us2 => "us-2",
            Cloud::Eu1 => "eu-1",
            Cloud::UsGov1 => "us-gov-1",
        }
    }

    /// Position in [`Cloud::ALL`], used as the default of a choice prompt.
    pub fn index(&self) -> usize {
        Cloud::ALL
            .iter()
            .position(|cloud| cloud == self)
            .unwrap_or_default()
    }
}

impl FromStr for Cloud {
    type Err = ApiError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Cloud::ALL
            .into_iter()
            .find(|cloud| cloud.as_str() == normalized)
            .ok_or_else(|| ApiError::InvalidCloud {
                cloud: value.to_string(),
            })
    }
}

impl fmt::Display for Cloud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_regions_case_insensitively() {
        assert_eq!("us-1".parse::<Cloud>(), Ok(Cloud::Us1));
        assert_eq!(" EU-1 ".parse::<Cloud>(), Ok(Cloud::Eu1));
        assert_eq!("us-gov-1".parse::<Cloud>(), Ok(Cloud::UsGov1));
        assert_eq!("autodiscover".parse::<Cloud>(), Ok(Cloud::Autodiscover));
    }

    #[test]
    fn unknown_region_is_rejected() {
        assert_eq!(
            "us-3".parse::<Cloud>(),
            Err(ApiError::InvalidCloud {
                cloud: "us-3".into()
            })
        );
        assert!("".parse::<Cloud>().is_err());
    }

    #[test]
    fn display_round_trips_through_index() {
        for cloud in Cloud::ALL {
            assert_eq!(Cloud::ALL[cloud.index()], cloud);
            assert_eq!(cloud.to_string().parse::<Cloud>(), Ok(cloud));
        }
    }
}
