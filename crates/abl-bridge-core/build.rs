// Links the prebuilt ABL grammar when the `linked` feature is enabled.
//
// The grammar itself (parser tables, external scanner) lives in the
// tree-sitter-abl project. We only need its static library on the search path.
use std::env;

fn main() {
    println!("cargo:rerun-if-env-changed=TREE_SITTER_ABL_LIB_DIR");
    println!("cargo:rerun-if-changed=build.rs");

    if env::var_os("CARGO_FEATURE_LINKED").is_none() {
        return;
    }

    if let Some(dir) = env::var_os("TREE_SITTER_ABL_LIB_DIR") {
        println!("cargo:rustc-link-search=native={}", dir.to_string_lossy());
    }
    println!("cargo:rustc-link-lib=static=tree-sitter-abl");
}
