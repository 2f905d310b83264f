use serde::{Deserialize, Serialize};

use crate::error::GuidanceError;

/// Maneuver triggered at a route point, numbered as on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum TurnInstruction {
    #[default]
    NoTurn = 0,
    GoStraight = 1,
    TurnSlightRight = 2,
    TurnRight = 3,
    TurnSharpRight = 4,
    UTurn = 5,
    TurnSharpLeft = 6,
    TurnLeft = 7,
    TurnSlightLeft = 8,
    ReachViaLocation = 9,
    HeadOn = 10,
    EnterRoundAbout = 11,
    LeaveRoundAbout = 12,
    StayOnRoundAbout = 13,
    StartAtEndOfStreet = 14,
    ReachedYourDestination = 15,
    EnterAgainstAllowedDirection = 16,
    LeaveAgainstAllowedDirection = 17,
}

impl TurnInstruction {
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Whether the maneuver is announced to the driver.
    pub fn is_necessary(&self) -> bool {
        !matches!(
            self,
            TurnInstruction::NoTurn | TurnInstruction::StayOnRoundAbout
        )
    }

    pub fn is_turn(&self) -> bool {
        *self != TurnInstruction::NoTurn
    }
}

impl From<TurnInstruction> for u8 {
    fn from(value: TurnInstruction) -> Self {
        value.code()
    }
}

impl TryFrom<u8> for TurnInstruction {
    type Error = GuidanceError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        let instruction = match value {
            0 => TurnInstruction::NoTurn,
            1 => TurnInstruction::GoStraight,
            2 => TurnInstruction::TurnSlightRight,
            3 => TurnInstruction::TurnRight,
            4 => TurnInstruction::TurnSharpRight,
            5 => TurnInstruction::UTurn,
            6 => TurnInstruction::TurnSharpLeft,
            7 => TurnInstruction::TurnLeft,
            8 => TurnInstruction::TurnSlightLeft,
            9 => TurnInstruction::ReachViaLocation,
            10 => TurnInstruction::HeadOn,
            11 => TurnInstruction::EnterRoundAbout,
            12 => TurnInstruction::LeaveRoundAbout,
            13 => TurnInstruction::StayOnRoundAbout,
            14 => TurnInstruction::StartAtEndOfStreet,
            15 => TurnInstruction::ReachedYourDestination,
            16 => TurnInstruction::EnterAgainstAllowedDirection,
            17 => TurnInstruction::LeaveAgainstAllowedDirection,
            other => return Err(GuidanceError::UnknownTurnInstruction(other)),
        };

        Ok(instruction)
    }
}
