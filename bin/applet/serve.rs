use crate::io::{Io, Pipe};
use anyhow::Error as Anyhow;
use clap::Parser;
use lib::chess::Square;
use lib::event::Outbound;
use lib::registry::{GameCode, Registry};
use lib::session::PlayerId;
use rand::thread_rng;
use serde::Serialize;
use std::collections::BTreeSet;
use std::io::ErrorKind::UnexpectedEof;
use tokio::io::{stdin, stdout};
use tracing::{debug, instrument};

/// A line-oriented gateway serving variant chess rooms over stdio.
#[derive(Debug, Default, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Serve {}

impl Serve {
    #[instrument(level = "trace", skip(self), err)]
    pub async fn execute(self) -> Result<(), Anyhow> {
        let io = Pipe::new(stdout(), stdin());
        Gateway::new(io).run().await
    }
}

/// One request line addressed to the engine.
#[derive(Debug, Parser)]
#[clap(
    no_binary_name = true,
    disable_help_flag = true,
    disable_version_flag = true
)]
enum Request {
    /// Open a new room and take the white seat.
    Create,
    /// Join an existing room as black.
    Join { code: GameCode },
    /// Submit a move in pure coordinate notation.
    Move { code: GameCode, descriptor: String },
    /// List the legal destinations from a square.
    Moves { code: GameCode, whence: Square },
    /// Close a room, releasing its code.
    Close { code: GameCode },
    /// Exit the gateway.
    Quit,
}

/// The reply to a legal-destination query.
#[derive(Debug, Serialize)]
struct Destinations {
    moves: BTreeSet<Square>,
}

struct Gateway<T: Io> {
    registry: Registry,
    io: T,
}

impl<T: Io> Gateway<T> {
    fn new(io: T) -> Self {
        Gateway {
            registry: Registry::default(),
            io,
        }
    }

    async fn relay(&mut self, events: &[Outbound]) -> Result<(), Anyhow> {
        for event in events {
            self.io.send(&ron::to_string(event)?).await?;
        }

        Ok(())
    }

    async fn run(&mut self) -> Result<(), Anyhow> {
        loop {
            let line = match self.io.recv().await {
                Err(e) if e.kind() == UnexpectedEof => break Ok(()),
                Err(e) => break Err(e.into()),
                Ok(line) => line,
            };

            let request = match Request::try_parse_from(line.split_whitespace()) {
                Err(e) => {
                    self.io.send(&e.to_string()).await?;
                    continue;
                }
                Ok(request) => request,
            };

            let events = match request {
                Request::Quit => break Ok(()),

                Request::Create => {
                    let player = PlayerId::random(&mut thread_rng());
                    let (code, events) = self.registry.create(player);
                    debug!(%code, %player, "created");
                    events
                }

                Request::Join { code } => {
                    let player = PlayerId::random(&mut thread_rng());
                    match self.registry.join(code, player) {
                        Ok(events) => events,
                        Err(e) => vec![e.into()],
                    }
                }

                Request::Move { code, descriptor } => {
                    match self.registry.submit(code, &descriptor) {
                        Ok(events) => events,
                        Err(e) => vec![e.into()],
                    }
                }

                Request::Moves { code, whence } => match self.registry.destinations(code, whence) {
                    Ok(moves) => {
                        self.io.send(&ron::to_string(&Destinations { moves })?).await?;
                        vec![]
                    }
                    Err(e) => vec![e.into()],
                },

                Request::Close { code } => {
                    self.registry.close(code);
                    vec![]
                }
            };

            self.relay(&events).await?;
            self.io.flush().await?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MockIo;
    use std::collections::VecDeque;
    use std::io;
    use test_strategy::proptest;
    use tokio::runtime;

    fn script(lines: &[&str]) -> MockIo {
        let mut lines: VecDeque<String> = lines.iter().map(|s| s.to_string()).collect();
        let mut io = MockIo::new();

        io.expect_recv().returning(move || {
            lines
                .pop_front()
                .ok_or_else(|| io::ErrorKind::UnexpectedEof.into())
        });

        io.expect_flush().returning(|| Ok(()));
        io
    }

    #[proptest]
    fn quit_exits_the_gateway() {
        let rt = runtime::Builder::new_multi_thread().build()?;
        let mut io = script(&["quit"]);
        io.expect_send().never();

        assert!(rt.block_on(Gateway::new(io).run()).is_ok());
    }

    #[proptest]
    fn eof_exits_the_gateway() {
        let rt = runtime::Builder::new_multi_thread().build()?;
        let mut io = script(&[]);
        io.expect_send().never();

        assert!(rt.block_on(Gateway::new(io).run()).is_ok());
    }

    #[proptest]
    fn create_reports_the_room_to_the_caller() {
        let rt = runtime::Builder::new_multi_thread().build()?;
        let mut io = script(&["create"]);

        io.expect_send()
            .once()
            .withf(|s| s.contains("room_created") && s.contains("caller"))
            .returning(|_| Ok(()));

        assert!(rt.block_on(Gateway::new(io).run()).is_ok());
    }

    #[proptest]
    fn unknown_rooms_are_reported_as_errors() {
        let rt = runtime::Builder::new_multi_thread().build()?;
        let mut io = script(&["move AAAAAA e2e4"]);

        io.expect_send()
            .once()
            .withf(|s| s.contains("invalid game code"))
            .returning(|_| Ok(()));

        assert!(rt.block_on(Gateway::new(io).run()).is_ok());
    }

    #[proptest]
    fn invalid_requests_prompt_again() {
        let rt = runtime::Builder::new_multi_thread().build()?;
        let mut io = script(&["frobnicate"]);

        io.expect_send().once().returning(|_| Ok(()));

        assert!(rt.block_on(Gateway::new(io).run()).is_ok());
    }
}
