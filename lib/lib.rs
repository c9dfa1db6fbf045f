/// Chess domain types backed by the rules oracle.
pub mod chess;
/// Events relayed to room members by the gateway.
pub mod event;
/// The marked-rook variant overlay.
pub mod marks;
/// The process-wide room registry.
pub mod registry;
/// The per-room game session.
pub mod session;
/// Assorted utilities.
pub mod util;
