use std::fmt::Debug;

/// A trait for types that can be assumed to hold a value.
pub trait Assume {
    /// The type of the assumed value.
    type Assumed;

    /// Assume `Self` holds a value of `Self::Assumed`.
    fn assume(self) -> Self::Assumed;
}

impl<T> Assume for Option<T> {
    type Assumed = T;

    #[track_caller]
    fn assume(self) -> Self::Assumed {
        match self {
            Some(v) => v,
            None => unreachable!("unexpected `None`"),
        }
    }
}

impl<T, E: Debug> Assume for Result<T, E> {
    type Assumed = T;

    #[track_caller]
    fn assume(self) -> Self::Assumed {
        match self {
            Ok(v) => v,
            Err(e) => unreachable!("unexpected `{e:?}`"),
        }
    }
}
