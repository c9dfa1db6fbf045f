use derive_more::{Display, Error};
use serde::{Serialize, Serializer};
use shakmaty as sm;
use std::str::FromStr;

#[cfg(test)]
use proptest::prelude::*;

/// A square of the chess board.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display(fmt = "{}", _0)]
pub struct Square(
    #[cfg_attr(test, strategy((0..64u32).prop_map(sm::Square::new)))] sm::Square,
);

impl Square {
    /// White's queenside rook origin.
    pub const A1: Square = Square(sm::Square::A1);
    /// White's kingside rook origin.
    pub const H1: Square = Square(sm::Square::H1);
    /// Black's queenside rook origin.
    pub const A8: Square = Square(sm::Square::A8);
    /// Black's kingside rook origin.
    pub const H8: Square = Square(sm::Square::H8);
}

/// The reason why parsing [`Square`] failed.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[display(fmt = "expected a square in algebraic notation")]
pub struct ParseSquareError;

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match sm::Square::from_ascii(s.as_bytes()) {
            Ok(s) => Ok(Square(s)),
            Err(_) => Err(ParseSquareError),
        }
    }
}

impl Serialize for Square {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[doc(hidden)]
impl From<sm::Square> for Square {
    fn from(s: sm::Square) -> Self {
        Square(s)
    }
}

#[doc(hidden)]
impl From<Square> for sm::Square {
    fn from(s: Square) -> Self {
        s.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn parsing_printed_square_is_an_identity(s: Square) {
        assert_eq!(s.to_string().parse(), Ok(s));
    }

    #[proptest]
    fn parsing_square_fails_for_invalid_input(#[strategy("[^a-h]{2}")] s: String) {
        assert_eq!(s.parse::<Square>(), Err(ParseSquareError));
    }

    #[proptest]
    fn square_has_an_equivalent_shakmaty_representation(s: Square) {
        assert_eq!(Square::from(sm::Square::from(s)), s);
    }

    #[test]
    fn rook_origins_print_in_algebraic_notation() {
        assert_eq!(Square::A1.to_string(), "a1");
        assert_eq!(Square::H1.to_string(), "h1");
        assert_eq!(Square::A8.to_string(), "a8");
        assert_eq!(Square::H8.to_string(), "h8");
    }
}
