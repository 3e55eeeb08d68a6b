//! Runtime tool path resolution
//!
//! Resolves paths to the external CLIs the pipeline shells out to.
//! For each tool we check an environment variable `{TOOL}_BIN`
//! (e.g. `DOCKER_BIN`) and fall back to PATH-based invocation when it
//! is not set. CI environments can pin exact tool paths via the envvar;
//! developer machines just use whatever is on PATH. The override is also
//! how tests point a tool at a stub.

use std::env;

/// Get the path to an external tool.
///
/// Checks `{TOOL}_BIN` (uppercase tool name + "_BIN", hyphens mapped to
/// underscores) and falls back to the tool name itself, which relies on PATH.
pub fn get_tool_path(tool: &str) -> String {
    let env_var = format!("{}_BIN", tool.to_uppercase().replace('-', "_"));
    env::var(&env_var).unwrap_or_else(|_| tool.to_string())
}

/// Tool names used by the pipeline.
pub mod tools {
    pub const DOCKER: &str = "docker";
    pub const AWS: &str = "aws";
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_get_tool_path_from_env() {
        env::set_var("SOME_TOOL_BIN", "/custom/path/to/some-tool");
        assert_eq!(get_tool_path("some-tool"), "/custom/path/to/some-tool");
        env::remove_var("SOME_TOOL_BIN");
    }

    #[test]
    fn test_get_tool_path_fallback() {
        env::remove_var("ABSENT_TOOL_BIN");
        assert_eq!(get_tool_path("absent-tool"), "absent-tool");
    }

    #[test]
    fn test_uppercase_conversion() {
        env::set_var("DOCKER_BIN", "/opt/docker/bin/docker");
        assert_eq!(get_tool_path("docker"), "/opt/docker/bin/docker");
        env::remove_var("DOCKER_BIN");
    }
}
