use std::io;
use std::process::Child;
use std::sync::{Arc, Mutex};

use xvfb_launch::launcher::{ServerCommand, SpawnBackend};
use xvfb_launch::types::DisplayId;

/// How a scripted stand-in for the display server behaves once spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerBehaviour {
    /// Send the ready signal to the parent right away, then stay up.
    Ready,
    /// Stay up without ever signalling.
    Hang,
    /// Exit immediately with a failure status.
    Crash,
    /// Send `SIGUSR2` to the parent, then stay up without signalling ready.
    SpuriousThenHang,
    /// Send `SIGUSR2`, pause briefly, then signal ready.
    SpuriousThenReady,
    /// Signal ready only if `SIGUSR1` was inherited as ignored (Linux only).
    ReadyIfSignalIgnored,
}

impl ServerBehaviour {
    fn script(self) -> &'static str {
        match self {
            ServerBehaviour::Ready => "kill -USR1 $PPID; exec sleep 30",
            ServerBehaviour::Hang => "exec sleep 30",
            ServerBehaviour::Crash => "exit 1",
            ServerBehaviour::SpuriousThenHang => "kill -USR2 $PPID; exec sleep 30",
            ServerBehaviour::SpuriousThenReady => {
                "kill -USR2 $PPID; sleep 0.2; kill -USR1 $PPID; exec sleep 30"
            }
            // SIGUSR1 is signal 10, i.e. bit 0x200 of the SigIgn mask.
            ServerBehaviour::ReadyIfSignalIgnored => {
                "ign=$(awk '/^SigIgn/ {print $2}' /proc/$$/status); \
                 if [ $(( 0x$ign & 0x200 )) -ne 0 ]; then kill -USR1 $PPID; fi; \
                 exec sleep 30"
            }
        }
    }
}

/// One spawn performed by a [`ScriptedBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnRecord {
    pub display: DisplayId,
    pub pid: u32,
    pub behaviour: ServerBehaviour,
    /// Arguments the launcher asked for.
    pub requested_args: Vec<String>,
}

/// A spawn backend whose children are `sh -c` scripts.
///
/// Attempt `n` (0-based) follows `script[n]`; attempts past the end repeat
/// the last entry. Every spawn is recorded.
#[derive(Debug, Clone)]
pub struct ScriptedBackend {
    script: Vec<ServerBehaviour>,
    spawned: Arc<Mutex<Vec<SpawnRecord>>>,
}

impl ScriptedBackend {
    pub fn new(script: Vec<ServerBehaviour>) -> Self {
        Self {
            script,
            spawned: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn always(behaviour: ServerBehaviour) -> Self {
        Self::new(vec![behaviour])
    }

    pub fn records(&self) -> Vec<SpawnRecord> {
        self.spawned.lock().unwrap().clone()
    }

    pub fn spawn_count(&self) -> usize {
        self.spawned.lock().unwrap().len()
    }

    fn behaviour_for(&self, attempt: usize) -> ServerBehaviour {
        self.script
            .get(attempt)
            .or_else(|| self.script.last())
            .copied()
            .unwrap_or(ServerBehaviour::Hang)
    }
}

impl SpawnBackend for ScriptedBackend {
    fn spawn(&mut self, command: &ServerCommand) -> io::Result<Child> {
        let behaviour = self.behaviour_for(self.spawn_count());
        let stand_in = ServerCommand::new(
            "sh",
            vec!["-c".to_string(), behaviour.script().to_string()],
            command.display,
        );
        let child = stand_in.to_command().spawn()?;

        self.spawned.lock().unwrap().push(SpawnRecord {
            display: command.display,
            pid: child.id(),
            behaviour,
            requested_args: command.args.clone(),
        });
        Ok(child)
    }
}
