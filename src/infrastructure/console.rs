//! # Console Host
//!
//! `Host` implementation for the terminal front-end: notices are printed to stdout,
//! archives go through the `ArchiveSink`.

use crate::domain::traits::Host;
use crate::domain::types::DoneReason;
use crate::infrastructure::files::ArchiveSink;
use crate::strings::{messages, wizard};
use async_trait::async_trait;
use std::path::PathBuf;

pub struct ConsoleHost {
    sink: ArchiveSink,
}

impl ConsoleHost {
    pub fn new(sink: ArchiveSink) -> Self {
        Self { sink }
    }

    /// Prints a line of wizard output.
    pub fn show(&self, text: &str) {
        println!("{text}");
    }
}

#[async_trait]
impl Host for ConsoleHost {
    async fn save_bytes(&self, bytes: &[u8], filename: &str) -> anyhow::Result<PathBuf> {
        let path = self.sink.save(bytes, filename).await?;
        self.show(&messages::archive_saved(&path.display().to_string()));
        Ok(path)
    }

    async fn notify(&self, message: &str) {
        self.show(&format!("\n⚠️  {message}\n"));
    }

    fn wizard_done(&self, reason: DoneReason) {
        match reason {
            DoneReason::Cancel => self.show(wizard::CANCELLED),
            DoneReason::Done => self.show(wizard::FINISHED),
        }
    }
}
