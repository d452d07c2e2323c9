pub mod tool_locator;

pub use tool_locator::{find_java, jar_version, locate_jar, JavaRuntime, DEFAULT_TOOL_STEM};
