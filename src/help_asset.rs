//! Compiled-in help document.
//!
//! `build.rs` copies `assets/help.md` into `OUT_DIR` and generates this
//! module's contents: the markdown itself plus the file's modification
//! time, so the help overlay can show when the reference was last touched.

include!(concat!(env!("OUT_DIR"), "/generated_help.rs"));

#[cfg(test)]
mod tests {
    use super::HELP_ASSET;

    #[test]
    fn embedded_help_mentions_the_core_shortcuts() {
        assert!(HELP_ASSET.markdown.contains("Ctrl+Q"));
        assert!(HELP_ASSET.markdown.contains("Tab"));
    }
}
