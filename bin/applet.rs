use anyhow::Error as Anyhow;
use clap::Subcommand;
use derive_more::From;

mod serve;

#[derive(From, Subcommand)]
pub enum Applet {
    Serve(serve::Serve),
}

impl Default for Applet {
    fn default() -> Self {
        serve::Serve::default().into()
    }
}

impl Applet {
    pub async fn execute(self) -> Result<(), Anyhow> {
        match self {
            Applet::Serve(a) => Ok(a.execute().await?),
        }
    }
}
