use indoc::indoc;
use std::env;
use std::fs;
use std::path::Path;

const HELP_REL: &str = "assets/help.md";

fn main() {
    let manifest = env::var("CARGO_MANIFEST_DIR").expect("cargo sets CARGO_MANIFEST_DIR");
    let basename = Path::new(HELP_REL)
        .file_name()
        .and_then(|name| name.to_str())
        .expect("help asset path ends in a utf-8 filename");
    let help_path = Path::new(&manifest).join(HELP_REL);
    println!("cargo:rerun-if-changed={}", help_path.display());

    // RFC3339 so runtime code can re-parse into any display format.
    let stamp = fs::metadata(&help_path)
        .and_then(|meta| meta.modified())
        .map(|t| chrono::DateTime::<chrono::Local>::from(t).to_rfc3339())
        .unwrap_or_default();

    // Copy the markdown into OUT_DIR and generate a tiny source file that
    // includes it from there, keeping generated artifacts out of the
    // tracked tree.
    let out_dir = env::var("OUT_DIR").expect("cargo sets OUT_DIR");
    fs::copy(&help_path, Path::new(&out_dir).join(basename)).expect("copying help.md into OUT_DIR");

    let gen_src = format!(
        indoc!(
            r#"
                pub struct HelpAsset {{ pub markdown: &'static str, pub modified_rfc3339: &'static str }}

                pub const HELP_ASSET: HelpAsset = HelpAsset {{
                    markdown: include_str!(concat!(env!("OUT_DIR"), "/{file}")),
                    modified_rfc3339: "{stamp}",
                }};
            "#
        ),
        file = basename,
        stamp = stamp.replace('"', "\\\""),
    );
    fs::write(Path::new(&out_dir).join("generated_help.rs"), gen_src)
        .expect("writing generated_help.rs into OUT_DIR");
}
