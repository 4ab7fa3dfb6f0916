pub const APP_NAME: &str = "Playtime";

pub const CONFIG_FILE: &str = "playtime.config";
pub const CONFIG_DIR_NAME: &str = "playtime";
pub const ERROR_LOG_FILE: &str = "playtime-error.log";
pub const DEBUG_LOG_FILE: &str = "playtime-debug.log";

pub const ROSTER_SIZE: u8 = 9;
pub const DEFAULT_TICK_MS: u64 = 500;

/// Ticks may fall this many intervals behind before the ticker resyncs.
pub const TICK_RESYNC_INTERVALS: u32 = 3;

pub const IDLE_POLL_MS: u64 = 250;

pub const BOARD_HELP: &str =
    "[Space] clock  [1-9] player  [a-h/←→] segment  [q/Esc] quit";
