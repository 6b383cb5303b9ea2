//! File emitter: turns pending builder output into final file content.
//!
//! A fresh file is printed whole. An existing file is spliced: the original
//! text is kept byte-for-byte, missing imports go into the import section,
//! and new declarations are appended at the end in pipeline order.

use crate::domain::{
    builder::Pending,
    index::DeclarationIndex,
    render::{is_std_path, print_decl, print_file, print_import_block, print_import_spec},
};

/// Result of an emit: the content to write and whether it differs from the
/// original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedFile {
    pub content: String,
    pub changed: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FileEmitter;

impl FileEmitter {
    pub fn new() -> Self {
        Self
    }

    /// `original` is `None` for a file that does not exist yet; `index` must
    /// describe `original` when it is present.
    pub fn emit(
        &self,
        original: Option<&str>,
        index: &DeclarationIndex,
        package: &str,
        pending: &Pending,
    ) -> EmittedFile {
        match original {
            None => EmittedFile {
                content: print_file(package, &pending.imports, &pending.decls),
                changed: true,
            },
            Some(original) if pending.is_empty() => EmittedFile {
                content: original.to_string(),
                changed: false,
            },
            Some(original) => {
                let content = self.splice(original, index, pending);
                EmittedFile {
                    changed: content != original,
                    content,
                }
            }
        }
    }

    fn splice(&self, original: &str, index: &DeclarationIndex, pending: &Pending) -> String {
        let mut text = original.to_string();
        let eol = if original.contains("\r\n") { "\r\n" } else { "\n" };

        if !pending.imports.is_empty() {
            let layout = index.layout();
            match layout.group_close {
                Some(close) => {
                    let mut specs: Vec<_> = pending.imports.iter().collect();
                    specs.sort_by_key(|s| (!is_std_path(&s.path), s.path.clone()));
                    let mut insert = String::new();
                    if !text[..close].ends_with('\n') {
                        insert.push('\n');
                    }
                    for spec in specs {
                        insert.push('\t');
                        insert.push_str(&print_import_spec(spec));
                        insert.push('\n');
                    }
                    text.insert_str(close, &insert.replace('\n', eol));
                }
                None => {
                    let at = layout.last_import_end.unwrap_or(layout.package_end);
                    let block = format!("\n\n{}", print_import_block(&pending.imports));
                    text.insert_str(at, &block.replace('\n', eol));
                }
            }
        }

        if !pending.decls.is_empty() {
            text.truncate(text.trim_end().len());
            for decl in &pending.decls {
                text.push_str(eol);
                text.push_str(eol);
                text.push_str(&print_decl(decl).replace('\n', eol));
            }
            text.push_str(eol);
        }

        text
    }
}
