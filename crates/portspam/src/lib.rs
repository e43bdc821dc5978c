extern crate self as portspam;

pub use core_affinity;
pub use portspam_channel as channel;
pub use portspam_detect as detect;
pub use portspam_frame as frame;
pub use portspam_timing as timing;
pub use portspam_utils as utils;
pub use tracing;
