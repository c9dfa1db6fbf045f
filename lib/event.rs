use crate::chess::{Color, Fen, IllegalMove, ParseMoveError};
use crate::registry::GameCode;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// An event relayed to one or more members of a room.
#[derive(Debug, Display, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(rename_all = "snake_case")]
pub enum Event {
    #[display(fmt = "room `{}` created", code)]
    RoomCreated { code: GameCode, position: Fen },

    #[display(fmt = "joined as {}", role)]
    RoomJoined { role: Color, position: Fen },

    #[display(fmt = "{}", message)]
    PlayerJoined { message: String },

    #[display(fmt = "position `{}`", position)]
    Update { position: Fen },

    #[display(fmt = "{}", message)]
    Alert { message: String },

    #[display(fmt = "{}", message)]
    Error { message: String },
}

/// The subset of a room an [`Event`] is addressed to.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(rename_all = "snake_case")]
pub enum Audience {
    /// The connection the request originated from.
    #[display(fmt = "caller")]
    Caller,
    /// Every room member except the caller.
    #[display(fmt = "others")]
    Others,
    /// Every room member, the caller included.
    #[display(fmt = "room")]
    Room,
}

/// An [`Event`] addressed to an [`Audience`].
#[derive(Debug, Display, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display(fmt = "{} -> {}", event, audience)]
pub struct Outbound {
    pub audience: Audience,
    pub event: Event,
}

impl Outbound {
    /// Addresses an [`Event`] to the caller only.
    pub fn caller(event: Event) -> Self {
        Outbound {
            audience: Audience::Caller,
            event,
        }
    }

    /// Addresses an [`Event`] to the rest of the room.
    pub fn others(event: Event) -> Self {
        Outbound {
            audience: Audience::Others,
            event,
        }
    }

    /// Addresses an [`Event`] to the whole room.
    pub fn room(event: Event) -> Self {
        Outbound {
            audience: Audience::Room,
            event,
        }
    }
}

/// The reason why a request was rejected.
///
/// Rejections are recoverable and never mutate session state; they are reported
/// back to the originating connection only.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Reject {
    #[display(fmt = "invalid game code")]
    UnknownRoom,
    #[display(fmt = "role already taken")]
    RoleTaken,
    #[display(fmt = "malformed move")]
    MalformedMove,
    #[display(fmt = "illegal move")]
    IllegalMove,
}

#[doc(hidden)]
impl From<ParseMoveError> for Reject {
    fn from(_: ParseMoveError) -> Self {
        Reject::MalformedMove
    }
}

#[doc(hidden)]
impl From<IllegalMove> for Reject {
    fn from(_: IllegalMove) -> Self {
        Reject::IllegalMove
    }
}

impl From<Reject> for Outbound {
    fn from(r: Reject) -> Self {
        Outbound::caller(Event::Error {
            message: r.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn events_round_trip_through_ron(o: Outbound) {
        let encoded = ron::to_string(&o).unwrap();
        assert_eq!(ron::from_str::<Outbound>(&encoded).ok(), Some(o));
    }

    #[proptest]
    fn rejections_become_error_events_for_the_caller(r: Reject) {
        let o = Outbound::from(r);
        assert_eq!(o.audience, Audience::Caller);
        assert_eq!(
            o.event,
            Event::Error {
                message: r.to_string()
            }
        );
    }

    #[test]
    fn rejections_carry_the_original_messages() {
        assert_eq!(Reject::UnknownRoom.to_string(), "invalid game code");
        assert_eq!(Reject::RoleTaken.to_string(), "role already taken");
        assert_eq!(Reject::MalformedMove.to_string(), "malformed move");
        assert_eq!(Reject::IllegalMove.to_string(), "illegal move");
    }
}
