use super::{Color, Fen, Move, ParseFenError, Piece, Square};
use derive_more::{Display, Error, From};
use proptest::{prelude::*, sample::Selector};
use shakmaty as sm;
use std::collections::BTreeSet;
use std::str::FromStr;
use test_strategy::Arbitrary;

/// Represents an illegal [`Move`] in a given [`Position`].
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "move `{}` is illegal in position `{}`", _0, _1)]
pub struct IllegalMove(pub Move, pub Position);

/// The reason why the position represented by the FEN string is illegal.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum IllegalPosition {
    #[display(fmt = "at least one side has no king")]
    MissingKing,
    #[display(fmt = "at least one side has multiple kings")]
    TooManyKings,
    #[display(fmt = "there are pawns on the back-rank")]
    PawnsOnBackRank,
    #[display(fmt = "the player in check is not to move")]
    OppositeCheck,
    #[display(fmt = "invalid en passant square; wrong rank, occupied, or missing pushed pawn")]
    InvalidEnPassantSquare,
    #[display(fmt = "invalid castling rights")]
    InvalidCastlingRights,
    #[display(fmt = "no sequence of legal moves can reach this position")]
    Other,
}

#[doc(hidden)]
impl From<sm::PositionError<sm::Chess>> for IllegalPosition {
    fn from(e: sm::PositionError<sm::Chess>) -> Self {
        let kinds = e.kinds();

        if kinds.contains(sm::PositionErrorKinds::MISSING_KING) {
            IllegalPosition::MissingKing
        } else if kinds.contains(sm::PositionErrorKinds::TOO_MANY_KINGS) {
            IllegalPosition::TooManyKings
        } else if kinds.contains(sm::PositionErrorKinds::PAWNS_ON_BACKRANK) {
            IllegalPosition::PawnsOnBackRank
        } else if kinds.contains(sm::PositionErrorKinds::OPPOSITE_CHECK) {
            IllegalPosition::OppositeCheck
        } else if kinds.contains(sm::PositionErrorKinds::INVALID_EP_SQUARE) {
            IllegalPosition::InvalidEnPassantSquare
        } else if kinds.contains(sm::PositionErrorKinds::INVALID_CASTLING_RIGHTS) {
            IllegalPosition::InvalidCastlingRights
        } else {
            IllegalPosition::Other
        }
    }
}

/// The current position on the chess board.
///
/// This type guarantees that it only holds positions reachable by the rules oracle.
#[derive(Debug, Display, Default, Clone, Eq, PartialEq, Hash, Arbitrary)]
#[display(fmt = "{}", "Fen::from(self.clone())")]
pub struct Position(
    #[strategy((0..256, any::<Selector>()).prop_map(|(moves, selector)| {
        let mut chess = sm::Chess::default();
        for _ in 0..moves {
            match selector.try_select(sm::Position::legal_moves(&chess)) {
                Some(m) => sm::Position::play_unchecked(&mut chess, &m),
                _ => break,
            }
        }
        chess
    }).no_shrink())]
    sm::Chess,
);

impl Position {
    /// The side to move.
    pub fn turn(&self) -> Color {
        sm::Position::turn(&self.0).into()
    }

    /// The [`Piece`] on a [`Square`], if any.
    pub fn piece_on(&self, s: Square) -> Option<Piece> {
        sm::Position::board(&self.0)
            .piece_at(s.into())
            .map(Into::into)
    }

    /// An iterator over the legal [`Move`]s that can be played in this position.
    pub fn moves(&self) -> impl ExactSizeIterator<Item = Move> {
        sm::Position::legal_moves(&self.0)
            .into_iter()
            .map(|vm| sm::uci::Uci::from_standard(&vm).into())
    }

    /// The legal destination [`Square`]s for the piece on a [`Square`].
    pub fn destinations(&self, whence: Square) -> BTreeSet<Square> {
        self.moves()
            .filter(|m| m.whence() == whence)
            .map(|m| m.whither())
            .collect()
    }

    /// Play a [`Move`] if legal in this position.
    pub fn make(&mut self, m: Move) -> Result<(), IllegalMove> {
        match sm::uci::Uci::to_move(&m.into(), &self.0) {
            Ok(vm) if sm::Position::is_legal(&self.0, &vm) => {
                sm::Position::play_unchecked(&mut self.0, &vm);
                Ok(())
            }

            _ => Err(IllegalMove(m, self.clone())),
        }
    }

    /// Replaces the piece on a [`Square`], revoking any castling rights through it.
    ///
    /// Fails without mutating the position if the oracle cannot represent the result.
    pub fn place(&mut self, p: Piece, s: Square) -> Result<(), IllegalPosition> {
        let mut setup = sm::Position::into_setup(self.0.clone(), sm::EnPassantMode::Always);
        setup.board.remove_piece_at(s.into());
        setup.board.set_piece_at(s.into(), p.into());
        setup.castling_rights &= !sm::Bitboard::from(sm::Square::from(s));

        self.0 = setup
            .position(sm::CastlingMode::Standard)
            .or_else(sm::PositionError::ignore_impossible_check)?;

        Ok(())
    }
}

/// The reason why parsing [`Position`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum ParsePositionError {
    #[display(fmt = "failed to parse fen; {}", _0)]
    InvalidFen(ParseFenError),
    #[display(fmt = "illegal position; {}", _0)]
    IllegalPosition(IllegalPosition),
}

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<Fen>()?.try_into()?)
    }
}

impl TryFrom<Fen> for Position {
    type Error = IllegalPosition;

    fn try_from(fen: Fen) -> Result<Self, Self::Error> {
        Ok(Position(
            sm::Setup::from(fen).position(sm::CastlingMode::Standard)?,
        ))
    }
}

#[doc(hidden)]
impl From<Position> for sm::Setup {
    fn from(pos: Position) -> Self {
        sm::Position::into_setup(pos.0, sm::EnPassantMode::Always)
    }
}

#[doc(hidden)]
impl From<sm::Chess> for Position {
    fn from(chess: sm::Chess) -> Self {
        Position(chess)
    }
}

#[doc(hidden)]
impl From<Position> for sm::Chess {
    fn from(pos: Position) -> Self {
        pos.0
    }
}

#[cfg(test)]
mod tests {
    use super::super::Role;
    use super::*;
    use test_strategy::proptest;

    #[test]
    fn default_position_is_the_standard_starting_position() {
        assert_eq!(
            Position::default().to_string(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
        );
    }

    #[proptest]
    fn turn_returns_the_current_side_to_play(pos: Position) {
        assert_eq!(pos.turn(), sm::Setup::from(pos).turn.into());
    }

    #[proptest]
    fn moves_returns_all_legal_moves_from_this_position(pos: Position) {
        for m in pos.moves() {
            let mut next = pos.clone();
            assert_eq!(next.piece_on(m.whence()).map(|p| p.color()), Some(pos.turn()));
            assert_eq!(next.make(m).err(), None);
        }
    }

    #[proptest]
    fn legal_move_updates_position(
        #[by_ref]
        #[filter(#pos.moves().len() > 0)]
        mut pos: Position,
        selector: Selector,
    ) {
        let m = selector.select(pos.moves());
        let before = pos.clone();
        assert_eq!(pos.make(m), Ok(()));
        assert_ne!(pos, before);
    }

    #[proptest]
    fn illegal_move_fails_without_changing_position(
        #[by_ref] mut pos: Position,
        #[filter(#pos.clone().make(#m).is_err())] m: Move,
    ) {
        let before = pos.clone();
        assert_eq!(pos.make(m), Err(IllegalMove(m, before.clone())));
        assert_eq!(pos, before);
    }

    #[test]
    fn knight_destinations_from_the_starting_position() {
        let pos = Position::default();
        let whence = "b1".parse().unwrap();
        let expected: BTreeSet<Square> =
            ["a3", "c3"].iter().map(|s| s.parse().unwrap()).collect();
        assert_eq!(pos.destinations(whence), expected);
    }

    #[proptest]
    fn destinations_are_empty_for_unoccupied_squares(
        #[by_ref] pos: Position,
        #[filter(#pos.piece_on(#s).is_none())] s: Square,
    ) {
        assert_eq!(pos.destinations(s), BTreeSet::new());
    }

    #[test]
    fn place_swaps_the_piece_and_revokes_castling_rights() {
        let mut pos = Position::default();
        let s = "a1".parse().unwrap();

        assert_eq!(pos.place(Piece(Color::White, Role::Queen), s), Ok(()));
        assert_eq!(pos.piece_on(s), Some(Piece(Color::White, Role::Queen)));
        assert_eq!(
            pos.to_string(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/QNBQKBNR w Kkq - 0 1"
        );
    }

    #[test]
    fn place_rejects_positions_the_oracle_cannot_represent() {
        // A black queen on h1 would check the white king out of turn.
        let mut pos: Position = "4k3/8/8/8/8/8/8/4K2R b K - 0 1".parse().unwrap();
        let before = pos.clone();

        assert_ne!(
            pos.place(Piece(Color::Black, Role::Queen), "h1".parse().unwrap()),
            Ok(())
        );

        assert_eq!(pos, before);
    }

    #[proptest]
    fn all_positions_can_be_represented_using_fen_notation(pos: Position) {
        assert_eq!(Position::try_from(Fen::from(pos.clone())), Ok(pos));
    }

    #[proptest]
    fn parsing_printed_position_preserves_legal_moves(pos: Position) {
        let replica: Position = pos.to_string().parse().unwrap();
        assert_eq!(
            pos.moves().collect::<Vec<_>>(),
            replica.moves().collect::<Vec<_>>()
        );
    }

    #[proptest]
    fn position_has_an_equivalent_shakmaty_representation(pos: Position) {
        assert_eq!(Position::from(sm::Chess::from(pos.clone())), pos);
    }
}
