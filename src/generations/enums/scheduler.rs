use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::generations::errors::GenerationError;

/// Diffusion sampling scheduler accepted by the inference endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scheduler {
    #[serde(rename = "DDIM")]
    Ddim,
    #[serde(rename = "DDPM")]
    Ddpm,
    #[serde(rename = "DPM-M")]
    DpmM,
    #[serde(rename = "DPM-S")]
    DpmS,
    #[default]
    #[serde(rename = "EULER-A")]
    EulerA,
    #[serde(rename = "EULER-D")]
    EulerD,
    #[serde(rename = "HEUN")]
    Heun,
    #[serde(rename = "IPNDM")]
    Ipndm,
    #[serde(rename = "KDPM2-A")]
    Kdpm2A,
    #[serde(rename = "KDPM2-D")]
    Kdpm2D,
    #[serde(rename = "PNDM")]
    Pndm,
    #[serde(rename = "K-LMS")]
    KLms,
}

impl Scheduler {
    pub const ALL: [Scheduler; 12] = [
        Self::Ddim,
        Self::Ddpm,
        Self::DpmM,
        Self::DpmS,
        Self::EulerA,
        Self::EulerD,
        Self::Heun,
        Self::Ipndm,
        Self::Kdpm2A,
        Self::Kdpm2D,
        Self::Pndm,
        Self::KLms,
    ];

    pub fn value(&self) -> &'static str {
        match *self {
            Self::Ddim => "DDIM",
            Self::Ddpm => "DDPM",
            Self::DpmM => "DPM-M",
            Self::DpmS => "DPM-S",
            Self::EulerA => "EULER-A",
            Self::EulerD => "EULER-D",
            Self::Heun => "HEUN",
            Self::Ipndm => "IPNDM",
            Self::Kdpm2A => "KDPM2-A",
            Self::Kdpm2D => "KDPM2-D",
            Self::Pndm => "PNDM",
            Self::KLms => "K-LMS",
        }
    }
}

impl FromStr for Scheduler {
    type Err = GenerationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|scheduler| scheduler.value() == value)
            .copied()
            .ok_or_else(|| {
                let allowed: Vec<&str> = Self::ALL.iter().map(Scheduler::value).collect();
                GenerationError::Validation(format!(
                    "scheduler must be one of {}, got {:?}.",
                    allowed.join(", "),
                    value
                ))
            })
    }
}

impl fmt::Display for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_listed_value() {
        for scheduler in Scheduler::ALL {
            assert_eq!(scheduler.value().parse::<Scheduler>().unwrap(), scheduler);
        }
    }

    #[test]
    fn serializes_to_wire_names() {
        assert_eq!(serde_json::to_string(&Scheduler::KLms).unwrap(), r#""K-LMS""#);
        assert_eq!(serde_json::to_string(&Scheduler::Kdpm2A).unwrap(), r#""KDPM2-A""#);
        assert_eq!(
            serde_json::from_str::<Scheduler>(r#""DPM-S""#).unwrap(),
            Scheduler::DpmS
        );
    }

    #[test]
    fn rejects_values_outside_the_set() {
        for value in ["euler-a", "K_EULER", "LMS", "", "EULER-A "] {
            let err = value.parse::<Scheduler>().unwrap_err();
            assert!(matches!(err, GenerationError::Validation(_)), "{value:?}");
        }
    }

    #[test]
    fn defaults_to_euler_ancestral() {
        assert_eq!(Scheduler::default(), Scheduler::EulerA);
        assert_eq!(Scheduler::default().to_string(), "EULER-A");
    }
}
