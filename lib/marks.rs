use crate::chess::Square;
use rand::Rng;

/// The outcome of a capture on a marked square.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Fallen {
    /// White's marked rook fell; the survivor is Juliet's square, if she still stands.
    Rookmeo { survivor: Option<Square> },
    /// Black's marked rook fell; the survivor is Rookmeo's square, if he still stands.
    Juliet { survivor: Option<Square> },
}

/// Tracks the two marked rooks of a game.
///
/// Rookmeo is White's marked rook and Juliet is Black's. Either tracker is
/// cleared permanently once its piece is captured; the sticky captured flags
/// outlive the trackers.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Marks {
    rookmeo: Option<Square>,
    juliet: Option<Square>,
    rookmeo_captured: bool,
    juliet_captured: bool,
}

impl Marks {
    /// Constructs trackers pinned to the given squares.
    pub fn new(rookmeo: Option<Square>, juliet: Option<Square>) -> Self {
        Marks {
            rookmeo,
            juliet,
            rookmeo_captured: false,
            juliet_captured: false,
        }
    }

    /// Draws one marked rook per side, uniformly among its two origin corners.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Marks::new(
            Some(if rng.gen() { Square::A1 } else { Square::H1 }),
            Some(if rng.gen() { Square::A8 } else { Square::H8 }),
        )
    }

    /// The square Rookmeo currently stands on.
    pub fn rookmeo(&self) -> Option<Square> {
        self.rookmeo
    }

    /// The square Juliet currently stands on.
    pub fn juliet(&self) -> Option<Square> {
        self.juliet
    }

    /// Whether Rookmeo was ever captured.
    pub fn rookmeo_captured(&self) -> bool {
        self.rookmeo_captured
    }

    /// Whether Juliet was ever captured.
    pub fn juliet_captured(&self) -> bool {
        self.juliet_captured
    }

    /// Records a capture if the destination hits a marked square.
    ///
    /// On a hit both trackers are cleared for good and the fallen side's flag
    /// is raised; the survivor's last known square is reported so the caller
    /// can apply the promotion side-effect. At most one branch can fire per
    /// move, since a single destination cannot match both trackers.
    pub fn capture(&mut self, whither: Square) -> Option<Fallen> {
        if self.rookmeo == Some(whither) {
            self.rookmeo_captured = true;
            self.rookmeo = None;
            Some(Fallen::Rookmeo {
                survivor: self.juliet.take(),
            })
        } else if self.juliet == Some(whither) {
            self.juliet_captured = true;
            self.juliet = None;
            Some(Fallen::Juliet {
                survivor: self.rookmeo.take(),
            })
        } else {
            None
        }
    }

    /// Relocates the tracker whose piece just moved, if any.
    ///
    /// Must only be called when no capture fired this move; a marked rook that
    /// was just captured did not move itself.
    pub fn follow(&mut self, whence: Square, whither: Square) {
        if self.rookmeo == Some(whence) {
            self.rookmeo = Some(whither);
        } else if self.juliet == Some(whence) {
            self.juliet = Some(whither);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::thread_rng;

    fn square(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn random_marks_sit_on_rook_origins() {
        let mut rng = thread_rng();

        for _ in 0..64 {
            let marks = Marks::random(&mut rng);
            assert!([Square::A1, Square::H1].contains(&marks.rookmeo().unwrap()));
            assert!([Square::A8, Square::H8].contains(&marks.juliet().unwrap()));
            assert!(!marks.rookmeo_captured());
            assert!(!marks.juliet_captured());
        }
    }

    #[test]
    fn capturing_rookmeo_clears_both_trackers_for_good() {
        let mut marks = Marks::new(Some(Square::A1), Some(Square::H8));

        assert_eq!(
            marks.capture(Square::A1),
            Some(Fallen::Rookmeo {
                survivor: Some(Square::H8)
            })
        );

        assert_eq!(marks.rookmeo(), None);
        assert_eq!(marks.juliet(), None);
        assert!(marks.rookmeo_captured());
        assert!(!marks.juliet_captured());

        // Trackers are never reassigned.
        assert_eq!(marks.capture(Square::A1), None);
        marks.follow(Square::A1, square("a4"));
        assert_eq!(marks.rookmeo(), None);
    }

    #[test]
    fn capturing_juliet_reports_rookmeo_as_survivor() {
        let mut marks = Marks::new(Some(Square::H1), Some(Square::A8));

        assert_eq!(
            marks.capture(Square::A8),
            Some(Fallen::Juliet {
                survivor: Some(Square::H1)
            })
        );

        assert!(marks.juliet_captured());
        assert!(!marks.rookmeo_captured());
    }

    #[test]
    fn capturing_a_marked_rook_that_fell_earlier_reports_no_survivor() {
        let mut marks = Marks::new(None, Some(Square::A8));

        assert_eq!(marks.capture(Square::A8), Some(Fallen::Juliet { survivor: None }));
    }

    #[test]
    fn capture_misses_unmarked_squares() {
        let mut marks = Marks::new(Some(Square::A1), Some(Square::A8));
        let before = marks.clone();

        assert_eq!(marks.capture(square("e4")), None);
        assert_eq!(marks, before);
    }

    #[test]
    fn tracker_follows_its_piece() {
        let mut marks = Marks::new(Some(Square::A1), Some(Square::A8));

        marks.follow(Square::A1, square("a4"));
        assert_eq!(marks.rookmeo(), Some(square("a4")));
        assert_eq!(marks.juliet(), Some(Square::A8));

        marks.follow(Square::A8, square("d8"));
        assert_eq!(marks.juliet(), Some(square("d8")));
    }

    #[test]
    fn tracker_ignores_unrelated_moves() {
        let mut marks = Marks::new(Some(Square::A1), Some(Square::A8));
        let before = marks.clone();

        marks.follow(square("e2"), square("e4"));
        assert_eq!(marks, before);
    }
}
