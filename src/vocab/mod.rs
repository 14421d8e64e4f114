mod dep_spec;
mod platform;

pub use self::dep_spec::DepSpec;
pub use self::platform::{Platform, PlatformSupport};
