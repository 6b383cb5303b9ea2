//! Built-in import registry.
//!
//! Maps the logical package keys used by the generation steps to the import
//! paths of the libraries a generated root file depends on. Configuration
//! and the project manifest overlay these entries.

use rootgen_core::domain::{ImportRegistry, keys};

/// `(key, import path)` pairs shipped with rootgen.
pub const BUILTIN_IMPORTS: &[(&str, &str)] = &[
    (keys::CLI_FRAMEWORK, "github.com/spf13/cobra"),
    (keys::APP_SDK, "github.com/hdget/hdsdk"),
    (keys::UTILS, "github.com/hdget/hdutils"),
];

/// Registry holding every built-in entry.
pub fn builtin_registry() -> ImportRegistry {
    BUILTIN_IMPORTS.iter().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_step_key_resolves() {
        let registry = builtin_registry();
        for key in [keys::CLI_FRAMEWORK, keys::APP_SDK, keys::UTILS] {
            assert!(registry.resolve(key).is_ok(), "missing {key}");
        }
        assert_eq!(registry.len(), BUILTIN_IMPORTS.len());
    }
}
