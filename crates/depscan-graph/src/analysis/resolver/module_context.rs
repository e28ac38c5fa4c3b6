use std::path::Path;

use tracing::debug;

use crate::runtime::Runtime;

/// Name under which the scan root is importable, e.g. the Go module path
/// `github.com/acme/app` or a Python top-level package name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleContext {
    name: String,
}

impl ModuleContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read the `module` directive of `<root>/go.mod`.
    ///
    /// A missing or unreadable file means no module context.
    pub async fn detect(root: &Path, runtime: &dyn Runtime) -> Option<Self> {
        let go_mod = root.join("go.mod");
        if !runtime.exists(&go_mod) {
            return None;
        }
        let bytes = match runtime.read_file(&go_mod).await {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!(path = %go_mod.display(), error = %e, "go.mod not readable");
                return None;
            }
        };
        let name = parse_go_mod(&String::from_utf8_lossy(&bytes))?;
        debug!(module = %name, "detected module context from go.mod");
        Some(Self::new(name))
    }

    /// Part of `raw` after the module name and `separator`.
    ///
    /// `Some("")` when `raw` is the module name itself; `None` when `raw`
    /// does not belong to the module (`acme/appx` is not inside `acme/app`).
    pub fn strip<'a>(&self, raw: &'a str, separator: char) -> Option<&'a str> {
        let rest = raw.strip_prefix(self.name.as_str())?;
        if rest.is_empty() {
            return Some(rest);
        }
        rest.strip_prefix(separator)
    }
}

/// Module path declared in a `go.mod` file.
pub fn parse_go_mod(contents: &str) -> Option<String> {
    contents.lines().find_map(|line| {
        let line = line.split("//").next().unwrap_or("").trim();
        let rest = line.strip_prefix("module")?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let name = rest.trim().trim_matches('"');
        (!name.is_empty()).then(|| name.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::test_utils::{TestRuntime, create_test_project};
    use tempfile::TempDir;

    #[test]
    fn parses_module_directive() {
        let go_mod = "// comment\nmodule github.com/acme/app // trailing\n\ngo 1.22\n";
        assert_eq!(parse_go_mod(go_mod).as_deref(), Some("github.com/acme/app"));
        assert_eq!(parse_go_mod("module \"quoted/mod\"\n").as_deref(), Some("quoted/mod"));
        assert_eq!(parse_go_mod("modules x\ngo 1.22\n"), None);
        assert_eq!(parse_go_mod(""), None);
    }

    #[test]
    fn strip_requires_a_separator_boundary() {
        let module = ModuleContext::new("github.com/acme/app");
        assert_eq!(module.strip("github.com/acme/app/internal/db", '/'), Some("internal/db"));
        assert_eq!(module.strip("github.com/acme/app", '/'), Some(""));
        assert_eq!(module.strip("github.com/acme/appx", '/'), None);
        assert_eq!(module.strip("fmt", '/'), None);

        let package = ModuleContext::new("myapp");
        assert_eq!(package.strip("myapp.models.user", '.'), Some("models.user"));
    }

    #[tokio::test]
    async fn detects_from_go_mod() {
        let temp = TempDir::new().unwrap();
        let runtime = TestRuntime::new(temp.path().to_path_buf());
        assert_eq!(ModuleContext::detect(temp.path(), &runtime).await, None);

        create_test_project(temp.path(), &[("go.mod", "module example.com/svc\n\ngo 1.21\n")]);
        let detected = ModuleContext::detect(temp.path(), &runtime).await;
        assert_eq!(detected, Some(ModuleContext::new("example.com/svc")));
    }
}
