#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//! AST-level test to detect `.unwrap()` / `.expect()` in library code.
//!
//! Theme sync runs inside the page for its whole lifetime. A panic in the
//! wasm client aborts it and leaves the theme frozen, so failures must be
//! logged and degraded instead.
//!
//! Example of bad code:
//! ```ignore
//! let storage = window.local_storage().unwrap().unwrap();
//! ```
//!
//! Example of correct code:
//! ```ignore
//! let storage = window
//!     .local_storage()
//!     .map_err(unavailable)?
//!     .ok_or_else(|| ThemeError::StorageUnavailable("localStorage disabled".into()))?;
//! ```
//!
//! `#[cfg(test)]` modules and `#[test]` functions are skipped.

use std::fs;
use std::path::Path;
use syn::visit::Visit;
use syn::{Attribute, ExprMethodCall, File, ItemFn, ItemMod};
use walkdir::WalkDir;

struct PanicVisitor {
    current_file: String,
    violations: Vec<(String, String)>,
}

impl PanicVisitor {
    fn new(file: String) -> Self {
        Self {
            current_file: file,
            violations: Vec::new(),
        }
    }
}

fn is_test_only(attrs: &[Attribute]) -> bool {
    attrs.iter().any(|attr| {
        if attr.path().is_ident("test") {
            return true;
        }
        if !attr.path().is_ident("cfg") {
            return false;
        }
        match &attr.meta {
            syn::Meta::List(list) => list
                .tokens
                .to_string()
                .split(|c: char| !c.is_alphanumeric() && c != '_')
                .any(|word| word == "test"),
            _ => false,
        }
    })
}

impl<'ast> Visit<'ast> for PanicVisitor {
    fn visit_item_mod(&mut self, item: &'ast ItemMod) {
        if is_test_only(&item.attrs) {
            return;
        }
        syn::visit::visit_item_mod(self, item);
    }

    fn visit_item_fn(&mut self, item: &'ast ItemFn) {
        if is_test_only(&item.attrs) {
            return;
        }
        syn::visit::visit_item_fn(self, item);
    }

    fn visit_expr_method_call(&mut self, call: &'ast ExprMethodCall) {
        let method = call.method.to_string();
        if method == "unwrap" || method == "expect" {
            self.violations.push((
                self.current_file.clone(),
                format!(".{}() outside tests", method),
            ));
        }
        syn::visit::visit_expr_method_call(self, call);
    }
}

fn analyze_source(file: &str, content: &str) -> Vec<(String, String)> {
    let syntax: File = match syn::parse_file(content) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Warning: Failed to parse {}: {}", file, e);
            return vec![];
        }
    };

    let mut visitor = PanicVisitor::new(file.to_string());
    visitor.visit_file(&syntax);
    visitor.violations
}

fn analyze_file(path: &Path) -> Vec<(String, String)> {
    match fs::read_to_string(path) {
        Ok(content) => analyze_source(&path.display().to_string(), &content),
        Err(_) => vec![],
    }
}

#[test]
fn detects_unwrap_in_library_code() {
    let bad_code = r#"
        fn load(store: &Store) -> String {
            store.load().unwrap()
        }
    "#;

    assert_eq!(analyze_source("bad.rs", bad_code).len(), 1);
}

#[test]
fn allows_unwrap_in_test_modules() {
    let good_code = r#"
        fn load(store: &Store) -> Option<String> {
            store.load().ok()
        }

        #[cfg(all(test, feature = "server"))]
        mod tests {
            #[test]
            fn loads() {
                load(&Store::new()).unwrap();
            }
        }
    "#;

    assert!(analyze_source("good.rs", good_code).is_empty());
}

#[test]
fn allows_unwrap_or_family() {
    let good_code = r#"
        fn os_dark(scheme: &Scheme) -> bool {
            scheme.prefers_dark().unwrap_or(false)
        }
    "#;

    assert!(analyze_source("good.rs", good_code).is_empty());
}

#[test]
fn library_code_never_unwraps() {
    let src_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");

    let mut all_violations = Vec::new();

    for entry in WalkDir::new(&src_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "rs"))
    {
        all_violations.extend(analyze_file(entry.path()));
    }

    if !all_violations.is_empty() {
        let mut msg = String::from("\n\nPanicking calls in library code:\n\n");
        for (file, issue) in &all_violations {
            msg.push_str(&format!("  {}: {}\n", file, issue));
        }
        msg.push_str("\nPropagate with `?` or degrade with a logged fallback.\n");
        panic!("{}", msg);
    }
}
