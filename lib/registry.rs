use crate::chess::{Position, Square};
use crate::event::{Event, Outbound, Reject};
use crate::marks::Marks;
use crate::session::{PlayerId, Session};
use crate::util::Assume;
use arrayvec::ArrayString;
use derive_more::{Display, Error};
use rand::{thread_rng, Rng};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde::de::Error as _;
use std::collections::{BTreeSet, HashMap};
use std::str::FromStr;
use std::sync::{Arc, RwLock};
use tracing::{info, instrument};

#[cfg(test)]
use proptest::prelude::*;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// A 6-character room identifier drawn from uppercase letters and digits.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display(fmt = "{}", _0)]
pub struct GameCode(
    #[cfg_attr(
        test,
        strategy(proptest::string::string_regex("[A-Z0-9]{6}").unwrap()
            .prop_map(|s| arrayvec::ArrayString::from(&s).unwrap()))
    )]
    ArrayString<6>,
);

impl GameCode {
    /// Draws a fresh random code.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let mut code = ArrayString::new();
        for _ in 0..code.capacity() {
            code.push(ALPHABET[rng.gen_range(0..ALPHABET.len())] as char);
        }
        GameCode(code)
    }
}

/// The reason why parsing [`GameCode`] failed.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[display(fmt = "game codes are 6 letters or digits")]
pub struct ParseCodeError;

impl FromStr for GameCode {
    type Err = ParseCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == 6 && s.bytes().all(|b| b.is_ascii_alphanumeric()) {
            Ok(GameCode(
                ArrayString::from(&s.to_ascii_uppercase()).map_err(|_| ParseCodeError)?,
            ))
        } else {
            Err(ParseCodeError)
        }
    }
}

impl Serialize for GameCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GameCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer)?
            .parse()
            .map_err(D::Error::custom)
    }
}

/// The process-wide mapping from [`GameCode`] to [`Session`].
///
/// The registry supports concurrent creation and lookup across unrelated
/// rooms; within a room, move submissions serialize behind the session's
/// write lock while destination queries share its read lock.
#[derive(Debug, Default)]
pub struct Registry {
    rooms: RwLock<HashMap<GameCode, Arc<RwLock<Session>>>>,
}

impl Registry {
    /// Opens a new room, seating the creator as white.
    ///
    /// The code is guaranteed unique among live rooms; collisions are
    /// regenerated.
    #[instrument(level = "debug", skip(self))]
    pub fn create(&self, creator: PlayerId) -> (GameCode, Vec<Outbound>) {
        let mut rng = thread_rng();
        let session = Session::new(Position::default(), Marks::random(&mut rng), creator);
        let position = session.position().clone().into();

        let mut rooms = self.rooms.write().assume();

        let code = loop {
            let code = GameCode::random(&mut rng);
            if !rooms.contains_key(&code) {
                break code;
            }
        };

        rooms.insert(code, Arc::new(RwLock::new(session)));
        drop(rooms);

        info!(%code, "room created");

        (
            code,
            vec![Outbound::caller(Event::RoomCreated { code, position })],
        )
    }

    /// Seats a player as black in an existing room.
    #[instrument(level = "debug", skip(self), err)]
    pub fn join(&self, code: GameCode, player: PlayerId) -> Result<Vec<Outbound>, Reject> {
        let events = self.room(code)?.write().assume().join(player)?;
        info!(%code, "black joined");
        Ok(events)
    }

    /// Submits a move to an existing room.
    #[instrument(level = "debug", skip(self), err)]
    pub fn submit(&self, code: GameCode, descriptor: &str) -> Result<Vec<Outbound>, Reject> {
        self.room(code)?.write().assume().submit(descriptor)
    }

    /// The legal destination [`Square`]s from a square of a room's position.
    #[instrument(level = "trace", skip(self), err)]
    pub fn destinations(&self, code: GameCode, whence: Square) -> Result<BTreeSet<Square>, Reject> {
        Ok(self.room(code)?.read().assume().destinations(whence))
    }

    /// Closes a room, releasing its code.
    ///
    /// Returns whether the room existed. Rooms are never reclaimed implicitly.
    #[instrument(level = "debug", skip(self))]
    pub fn close(&self, code: GameCode) -> bool {
        let existed = self.rooms.write().assume().remove(&code).is_some();

        if existed {
            info!(%code, "room closed");
        }

        existed
    }

    fn room(&self, code: GameCode) -> Result<Arc<RwLock<Session>>, Reject> {
        self.rooms
            .read()
            .assume()
            .get(&code)
            .cloned()
            .ok_or(Reject::UnknownRoom)
    }
}
