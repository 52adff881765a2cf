//! Async host driver.
//!
//! One task owns the [`Shell`]. It waits on whichever comes first, the next
//! host event or the shell's next timer deadline, so the core stays
//! single-threaded while the host talks to it over channels.

use std::future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

use crate::ui::events::HostEvent;
use crate::ui::shell::{Shell, ShellEffect};
use crate::ui::timer::Millis;

pub struct Runtime {
    shell: Shell,
    started: Instant,
}

impl Runtime {
    /// Wall-clock zero is the moment the runtime is created.
    pub fn new(shell: Shell) -> Self {
        Self {
            shell,
            started: Instant::now(),
        }
    }

    /// Drive the shell until `events` closes or nobody listens for effects.
    /// The shell is torn down and handed back on exit.
    pub async fn run(
        mut self,
        mut events: mpsc::Receiver<HostEvent>,
        effects: mpsc::Sender<ShellEffect>,
    ) -> Shell {
        'run: loop {
            let deadline = self
                .shell
                .next_deadline()
                .map(|at| self.started + Duration::from_millis(at));

            let produced = tokio::select! {
                received = events.recv() => match received {
                    Some(event) => {
                        let now = self.elapsed();
                        self.shell.handle(event.stamped(now), now)
                    }
                    None => break 'run,
                },
                _ = wait_for(deadline) => {
                    let now = self.elapsed();
                    self.shell.advance(now)
                }
            };

            for effect in produced {
                if effects.send(effect).await.is_err() {
                    debug!("effect receiver dropped");
                    break 'run;
                }
            }
        }

        self.shell.teardown();
        self.shell
    }

    fn elapsed(&self) -> Millis {
        Millis::try_from(self.started.elapsed().as_millis()).unwrap_or(Millis::MAX)
    }
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => future::pending().await,
    }
}
