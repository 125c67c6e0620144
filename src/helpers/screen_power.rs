use std::process::Command;
use log::{debug, error, warn};

/// Operations on the display's screen saver / blanking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenPowerCommand {
    /// Blank the screen after this many idle seconds
    SetIdleTimeout(u32),
    /// Enable idle blanking
    Enable,
    /// Disable idle blanking
    Disable,
    /// Blank the screen now
    BlankNow,
    /// Turn the screen back on and restart the idle timer
    Unblank,
}

impl ScreenPowerCommand {
    /// Arguments for `xset`
    pub fn xset_args(&self) -> Vec<String> {
        let arg = match self {
            ScreenPowerCommand::SetIdleTimeout(seconds) => seconds.to_string(),
            ScreenPowerCommand::Enable => "on".to_string(),
            ScreenPowerCommand::Disable => "off".to_string(),
            ScreenPowerCommand::BlankNow => "activate".to_string(),
            ScreenPowerCommand::Unblank => "reset".to_string(),
        };
        vec!["s".to_string(), arg]
    }
}

/// The screen power facility
///
/// Fire-and-forget: implementations log failures and never report them.
pub trait ScreenPower: Send + std::fmt::Debug {
    fn run(&self, command: ScreenPowerCommand);
}

/// Screen power control through the X11 `xset` utility
#[derive(Debug, Clone)]
pub struct XsetScreenPower {
    program: String,
}

impl XsetScreenPower {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }
}

impl Default for XsetScreenPower {
    fn default() -> Self {
        Self::new("xset")
    }
}

impl ScreenPower for XsetScreenPower {
    fn run(&self, command: ScreenPowerCommand) {
        let args = command.xset_args();
        debug!("{} {}", self.program, args.join(" "));

        match Command::new(&self.program).args(&args).output() {
            Ok(output) => {
                if !output.status.success() {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    warn!("{} {} failed: {}", self.program, args.join(" "), stderr.trim());
                }
            }
            Err(e) => {
                error!("Failed to execute {}: {}", self.program, e);
            }
        }
    }
}
