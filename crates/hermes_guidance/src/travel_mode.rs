use serde::{Deserialize, Serialize};

use crate::error::GuidanceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum TravelMode {
    Inaccessible = 0,
    #[default]
    Driving = 1,
    Cycling = 2,
    Walking = 3,
    Ferry = 4,
    Train = 5,
    PushingBike = 6,
}

impl TravelMode {
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl From<TravelMode> for u8 {
    fn from(value: TravelMode) -> Self {
        value.code()
    }
}

impl TryFrom<u8> for TravelMode {
    type Error = GuidanceError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TravelMode::Inaccessible),
            1 => Ok(TravelMode::Driving),
            2 => Ok(TravelMode::Cycling),
            3 => Ok(TravelMode::Walking),
            4 => Ok(TravelMode::Ferry),
            5 => Ok(TravelMode::Train),
            6 => Ok(TravelMode::PushingBike),
            other => Err(GuidanceError::UnknownTravelMode(other)),
        }
    }
}
