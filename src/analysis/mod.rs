//! Module analysis for post-install usage hints.
//!
//! After a single Python file is installed, its public functions, classes
//! and constants are extracted with tree-sitter and turned into a few
//! `import`/call lines the user can paste into a REPL.

mod python;
mod usage;

pub use python::{extract, parse_python};
pub use usage::{usage_examples, USAGE_HEADER};

use std::path::Path;
use tracing::debug;

/// A function or method parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub has_default: bool,
}

/// A public function or method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionInfo {
    pub name: String,
    pub params: Vec<Parameter>,
}

impl FunctionInfo {
    /// Parameters as shown to users: defaulted ones end in `=...`.
    pub fn formatted_params(&self) -> Vec<String> {
        self.params
            .iter()
            .map(|p| {
                if p.has_default {
                    format!("{}=...", p.name)
                } else {
                    p.name.clone()
                }
            })
            .collect()
    }
}

/// A public class and its public methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassInfo {
    pub name: String,
    pub methods: Vec<FunctionInfo>,
}

/// Public surface of one module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleAnalysis {
    pub functions: Vec<FunctionInfo>,
    pub classes: Vec<ClassInfo>,
    pub variables: Vec<String>,
}

impl ModuleAnalysis {
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty() && self.classes.is_empty() && self.variables.is_empty()
    }
}

/// Analyze a `.py` file. Anything unreadable or unparsable yields an empty
/// analysis.
pub fn analyze_file(path: &Path) -> ModuleAnalysis {
    if path.extension().and_then(|e| e.to_str()) != Some("py") {
        return ModuleAnalysis::default();
    }

    let source = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            debug!("Skipping analysis of {:?}: {}", path, e);
            return ModuleAnalysis::default();
        }
    };

    match parse_python(&source) {
        Some(tree) if !tree.root_node().has_error() => extract(&tree, source.as_bytes()),
        _ => {
            debug!("Skipping analysis of {:?}: syntax error", path);
            ModuleAnalysis::default()
        }
    }
}
