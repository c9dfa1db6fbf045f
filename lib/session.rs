use crate::chess::{Color, Move, Piece, Position, Role, Square};
use crate::event::{Event, Outbound, Reject};
use crate::marks::{Fallen, Marks};
use crate::util::Assume;
use arrayvec::ArrayString;
use derive_more::Display;
use rand::Rng;
use std::collections::BTreeSet;
use std::fmt::Write;
use tracing::{instrument, warn};

/// An opaque player-connection identifier, minted by the gateway.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[display(fmt = "{}", _0)]
pub struct PlayerId(ArrayString<32>);

impl PlayerId {
    /// Mints a fresh random identifier.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let mut token = ArrayString::new();
        write!(token, "{:032x}", rng.gen::<u128>()).assume();
        PlayerId(token)
    }
}

/// The two seats of a room.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
struct Seats {
    white: Option<PlayerId>,
    black: Option<PlayerId>,
}

/// The state machine of one game.
///
/// The creator holds the white seat from the start; the session is joinable
/// only while the black seat is open. Every mutation of the position is the
/// result of applying one legal move, plus the marked-rook promotion overlay.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Session {
    position: Position,
    seats: Seats,
    marks: Marks,
}

impl Session {
    /// Opens a session, seating the creator as white.
    pub fn new(position: Position, marks: Marks, creator: PlayerId) -> Self {
        Session {
            position,
            seats: Seats {
                white: Some(creator),
                black: None,
            },
            marks,
        }
    }

    /// The current position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// The marked-rook trackers.
    pub fn marks(&self) -> &Marks {
        &self.marks
    }

    /// Seats a player as black if the seat is still open.
    #[instrument(level = "debug", skip(self), err)]
    pub fn join(&mut self, player: PlayerId) -> Result<Vec<Outbound>, Reject> {
        if self.seats.black.is_some() {
            return Err(Reject::RoleTaken);
        }

        self.seats.black = Some(player);

        Ok(vec![
            Outbound::caller(Event::RoomJoined {
                role: Color::Black,
                position: self.position.clone().into(),
            }),
            Outbound::others(Event::PlayerJoined {
                message: "Black has joined the game!".to_string(),
            }),
        ])
    }

    /// Processes one move submission.
    ///
    /// The capture check reads the destination against the trackers as they
    /// stood before the move, since the variant rule is defined in terms of a
    /// piece landing on the marked square. Capture and relocation are mutually
    /// exclusive per move.
    #[instrument(level = "debug", skip(self), err)]
    pub fn submit(&mut self, descriptor: &str) -> Result<Vec<Outbound>, Reject> {
        let m: Move = descriptor.trim().parse()?;
        self.position.make(m)?;

        let mut events = Vec::new();

        match self.marks.capture(m.whither()) {
            None => self.marks.follow(m.whence(), m.whither()),

            Some(fallen) => {
                let (survivor, queen, message) = match fallen {
                    Fallen::Rookmeo { survivor } => (
                        survivor,
                        Color::White,
                        "Rookmeo captured! Juliet becomes a queen for White!",
                    ),
                    Fallen::Juliet { survivor } => (
                        survivor,
                        Color::Black,
                        "Juliet captured! Rookmeo becomes a queen for Black!",
                    ),
                };

                if let Some(s) = survivor {
                    if let Err(e) = self.position.place(Piece(queen, Role::Queen), s) {
                        warn!("survivor at `{}` keeps its rook; {}", s, e);
                    }
                }

                events.push(Outbound::room(Event::Alert {
                    message: message.to_string(),
                }));
            }
        }

        events.push(Outbound::room(Event::Update {
            position: self.position.clone().into(),
        }));

        Ok(events)
    }

    /// The legal destination [`Square`]s for the piece on a square.
    ///
    /// Pure query; neither the position nor the trackers change.
    pub fn destinations(&self, whence: Square) -> BTreeSet<Square> {
        self.position.destinations(whence)
    }
}
