pub const DEFAULT_CALL_AUDIO: &str = "call.mp3";
pub const DEFAULT_HOME_AUDIO: &str = "home.mp3";
pub const DEFAULT_CALLER_NAME: &str = "The Big Leagues";
pub const DEFAULT_CALLER_INITIALS: &str = "BL";
pub const DEFAULT_CALLER_LABEL: &str = "Mobile";
pub const DEFAULT_CONTRACT_ADDRESS: &str = "7PVk3W4kXAWkSy15TTfbXdrFSg6FB3tPaUrYjeJdpump";
pub const DEFAULT_THEME: &str = "graphite";

// The phone is 40 columns wide; longer strings would be clipped by the chassis.
pub const MAX_CALLER_NAME_CHARS: usize = 40;
pub const MAX_CALLER_INITIALS_CHARS: usize = 3;
pub const MAX_CALLER_LABEL_CHARS: usize = 16;
pub const MAX_CONTRACT_ADDRESS_CHARS: usize = 96;
pub(super) const MAX_DEVICE_NAME_BYTES: usize = 256;
