//! Interface discovery in Rust sources.
//!
//! Finds `trait` items by name and lowers them into [`InterfaceDecl`]s. Doc
//! comments are passed through line by line, so `/// #[http(...)]` directives
//! reach the directive parser untouched.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use httpgen_core::{InterfaceDecl, MethodDecl};
use quote::ToTokens;
use tracing::{debug, warn};

/// A discovered interface and the file it was declared in.
#[derive(Debug, Clone)]
pub struct Discovered {
    pub decl: InterfaceDecl,
    pub file: PathBuf,
}

/// Collect `.rs` files below `folder_path`, sorted so discovery is deterministic.
pub fn collect_files(folder_path: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(folder_path)
        .with_context(|| format!("Failed to read directory: {}", folder_path.display()))?
    {
        let entry = entry.with_context(|| "Failed to read directory entry")?;
        let path = entry.path();
        if path.is_file() {
            if path.extension().is_some_and(|ext| ext == "rs") {
                files.push(path);
            }
        } else if path.is_dir() {
            files.extend(collect_files(&path)?);
        }
    }
    files.sort();
    Ok(files)
}

/// Expand files and directories into a sorted, de-duplicated list of sources.
pub fn resolve_sources(patterns: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        if pattern.is_dir() {
            files.extend(collect_files(pattern)?);
        } else if pattern.is_file() {
            files.push(pattern.clone());
        } else {
            anyhow::bail!("No such file or directory: {}", pattern.display());
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

/// Doc lines of an item, one entry per source line.
pub fn doc_lines(attrs: &[syn::Attribute]) -> Vec<String> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            syn::Meta::NameValue(syn::MetaNameValue {
                value:
                    syn::Expr::Lit(syn::ExprLit {
                        lit: syn::Lit::Str(lit_str),
                        ..
                    }),
                ..
            }) => Some(lit_str.value()),
            _ => None,
        })
        .flat_map(|doc| doc.lines().map(str::to_string).collect::<Vec<_>>())
        .collect()
}

fn type_text(ty: &syn::Type) -> String {
    ty.to_token_stream().to_string()
}

/// Result types of a signature: none for `()`, one per element for tuples.
fn result_types(output: &syn::ReturnType) -> Vec<String> {
    match output {
        syn::ReturnType::Default => Vec::new(),
        syn::ReturnType::Type(_, ty) => match ty.as_ref() {
            syn::Type::Tuple(tuple) => tuple.elems.iter().map(type_text).collect(),
            ty => vec![type_text(ty)],
        },
    }
}

/// Lower a trait into an interface declaration. Receivers are not parameters.
pub fn lower_trait(item: &syn::ItemTrait) -> InterfaceDecl {
    let methods = item
        .items
        .iter()
        .filter_map(|item| match item {
            syn::TraitItem::Fn(method) => Some(method),
            _ => None,
        })
        .map(|method| MethodDecl {
            name: method.sig.ident.to_string(),
            params: method
                .sig
                .inputs
                .iter()
                .filter_map(|arg| match arg {
                    syn::FnArg::Typed(pat_type) => Some(type_text(&pat_type.ty)),
                    syn::FnArg::Receiver(_) => None,
                })
                .collect(),
            results: result_types(&method.sig.output),
            docs: doc_lines(&method.attrs),
        })
        .collect();
    InterfaceDecl {
        name: item.ident.to_string(),
        docs: doc_lines(&item.attrs),
        methods,
    }
}

/// Traits named in `names`, in file order.
pub fn find_traits(file_ast: &syn::File, names: &[String]) -> Vec<InterfaceDecl> {
    file_ast
        .items
        .iter()
        .filter_map(|item| match item {
            syn::Item::Trait(item_trait) if names.iter().any(|name| item_trait.ident == name) => {
                Some(lower_trait(item_trait))
            }
            _ => None,
        })
        .collect()
}

/// Discover the requested interfaces in `files`, returned in the order requested.
///
/// Names that match nothing are logged and skipped.
pub fn discover(files: &[PathBuf], names: &[String]) -> Result<Vec<Discovered>> {
    let mut found: Vec<Discovered> = Vec::new();
    for file in files {
        let content = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read file: {}", file.display()))?;
        let file_ast = syn::parse_file(&content)
            .with_context(|| format!("Failed to parse file: {}", file.display()))?;
        for decl in find_traits(&file_ast, names) {
            if found.iter().any(|seen| seen.decl.name == decl.name) {
                warn!(interface = %decl.name, file = %file.display(), "interface declared more than once, keeping the first");
                continue;
            }
            debug!(interface = %decl.name, file = %file.display(), "discovered interface");
            found.push(Discovered {
                decl,
                file: file.clone(),
            });
        }
    }

    let mut ordered = Vec::with_capacity(found.len());
    for name in names {
        match found.iter().position(|d| &d.decl.name == name) {
            Some(index) => ordered.push(found.swap_remove(index)),
            None => warn!(interface = %name, "requested interface was not found"),
        }
    }
    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::test_helpers::create_test_temp_dir;
    use crate::test_trait;

    #[test]
    fn test_lower_trait() {
        let item = test_trait!(
            r#"
            /// Dict manages dictionaries.
            pub trait Dict {
                /// GetDict fetches one entry.
                /// #[http(get = "/v1/dicts/{id}")]
                fn get_dict(&self, req: GetDictRequest) -> GetDictResponse;
                fn notify(&self, a: A, b: B);
                fn pair(&self) -> (A, B);
                const LIMIT: usize;
            }
            "#
        );
        let decl = lower_trait(&item);
        assert_eq!(decl.name, "Dict");
        assert_eq!(decl.docs, vec![" Dict manages dictionaries.".to_string()]);
        assert_eq!(decl.methods.len(), 3);

        let get = &decl.methods[0];
        assert_eq!(get.name, "get_dict");
        assert_eq!(get.params, vec!["GetDictRequest".to_string()]);
        assert_eq!(get.results, vec!["GetDictResponse".to_string()]);
        assert_eq!(
            get.docs,
            vec![
                " GetDict fetches one entry.".to_string(),
                r#" #[http(get = "/v1/dicts/{id}")]"#.to_string()
            ]
        );

        assert_eq!(decl.methods[1].params.len(), 2);
        assert!(decl.methods[1].results.is_empty());
        assert_eq!(decl.methods[2].results.len(), 2);
    }

    #[test]
    fn test_block_doc_is_split_into_lines() {
        let item = test_trait!(
            r#"
            /** Hello
            #[http(get = "/hello")] */
            trait Hello {}
            "#
        );
        let docs = lower_trait(&item).docs;
        assert_eq!(docs.len(), 2);
        assert!(docs[1].contains("#[http"));
    }

    #[test]
    fn test_discover_in_requested_order() {
        let dir = create_test_temp_dir();
        fs::create_dir(dir.path().join("api")).unwrap();
        fs::write(
            dir.path().join("api/a.rs"),
            "pub trait Alpha { fn a(&self, r: R) -> S; }\npub trait Ignored {}\n",
        )
        .unwrap();
        fs::write(dir.path().join("b.rs"), "pub trait Beta { fn b(&self, r: R) -> S; }\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "pub trait Gamma {}").unwrap();

        let files = resolve_sources(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(files.len(), 2);

        let names = vec!["Beta".to_string(), "Alpha".to_string(), "Gamma".to_string()];
        let found = discover(&files, &names).unwrap();
        let found_names: Vec<_> = found.iter().map(|d| d.decl.name.as_str()).collect();
        assert_eq!(found_names, vec!["Beta", "Alpha"]);
        assert!(found[1].file.ends_with("api/a.rs"));
    }

    #[test]
    fn test_discover_reports_unparsable_file() {
        let dir = create_test_temp_dir();
        let file = dir.path().join("broken.rs");
        fs::write(&file, "pub trait {").unwrap();
        let err = discover(&[file], &["Broken".to_string()]).unwrap_err();
        assert!(err.to_string().contains("Failed to parse file"));
    }

    #[test]
    fn test_resolve_sources_missing_path() {
        let err = resolve_sources(&[PathBuf::from("/definitely/not/here")]).unwrap_err();
        assert!(err.to_string().contains("No such file or directory"));
    }
}
